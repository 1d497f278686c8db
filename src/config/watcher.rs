//! Catalog hot reload.
//!
//! # Design Decisions
//! - The catalog's directory is watched, not the file: editors save by
//!   renaming a temp file over the target, which replaces the inode a
//!   file watch would be attached to
//! - Only events naming the catalog file trigger a reload
//! - A catalog that fails to load is logged and skipped; the receiver keeps
//!   whatever it last accepted

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use notify::event::{EventKind, ModifyKind};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::CatalogConfig;

/// Sends a freshly validated catalog whenever the file is saved.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<CatalogConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end for reloaded catalogs.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<CatalogConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            update_tx,
        };
        (watcher, update_rx)
    }

    /// Start watching. Updates flow for as long as the returned handle lives.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let dir = watch_dir(&self.path).to_path_buf();
        let file_name = self.path.file_name().map(OsString::from).ok_or_else(|| {
            notify::Error::generic(&format!("{} does not name a file", self.path.display()))
        })?;

        let Self { path, update_tx } = self;
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if is_catalog_save(&event, &file_name) => {
                    tracing::debug!(kind = ?event.kind, "Catalog saved");
                    match load_config(&path) {
                        Ok(catalog) => {
                            let _ = update_tx.send(catalog);
                        }
                        Err(e) => {
                            tracing::error!(error = %e, path = %path.display(), "Catalog reload rejected");
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::info!(dir = %dir.display(), "Catalog watcher started");
        Ok(watcher)
    }
}

fn watch_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// True for create, write and rename events that name `file_name`.
fn is_catalog_save(event: &Event, file_name: &OsString) -> bool {
    let relevant = match event.kind {
        EventKind::Create(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    };
    relevant
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}
