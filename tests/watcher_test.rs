//! Hot reload of a catalog saved by renaming a temp file over it.

use std::fs;
use std::path::Path;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;

use pattern_dispatch::config::watcher::ConfigWatcher;
use pattern_dispatch::CatalogConfig;

fn catalog(response: &str) -> String {
    format!(
        r#"
        [[intents]]
        name = "greet"
        templates = ["hello"]
        response = "{response}"
        "#
    )
}

/// Write next to the catalog, then rename over it.
fn atomic_save(path: &Path, content: &str) {
    let tmp = path.with_extension("toml.tmp");
    fs::write(&tmp, content).unwrap();
    fs::rename(&tmp, path).unwrap();
}

/// Drain updates until one carries `response`; a save may emit several events.
async fn wait_for(updates: &mut UnboundedReceiver<CatalogConfig>, response: &str) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    loop {
        match tokio::time::timeout_at(deadline, updates.recv()).await {
            Ok(Some(config)) if config.intents[0].response == response => return true,
            Ok(Some(_)) => continue,
            Ok(None) | Err(_) => return false,
        }
    }
}

#[tokio::test]
async fn test_reloads_survive_rename_over_saves() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(&path, catalog("a")).unwrap();

    let (watcher, mut updates) = ConfigWatcher::new(&path);
    let _handle = watcher.run().unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    atomic_save(&path, &catalog("b"));
    assert!(wait_for(&mut updates, "b").await, "first save never reloaded");

    atomic_save(&path, &catalog("c"));
    assert!(wait_for(&mut updates, "c").await, "second save never reloaded");
}

#[tokio::test]
async fn test_invalid_save_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(&path, catalog("a")).unwrap();

    let (watcher, mut updates) = ConfigWatcher::new(&path);
    let _handle = watcher.run().unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    atomic_save(&path, "[[intents]]\nname = \"greet\"\ntemplates = []\n");
    atomic_save(&path, &catalog("d"));
    assert!(wait_for(&mut updates, "d").await);
}

#[test]
fn test_path_without_file_name_rejected() {
    let (watcher, _updates) = ConfigWatcher::new(Path::new("/"));
    assert!(watcher.run().is_err());
}
