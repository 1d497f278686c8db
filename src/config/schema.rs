//! Configuration schema definitions.
//!
//! This module defines the catalog file structure and the dispatcher options.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::tree::CandidateOrder;

/// Root configuration: dispatcher options plus the intent catalog.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// Tree and matching options.
    pub dispatcher: DispatcherConfig,

    /// Logging settings for the binary.
    pub logging: LoggingConfig,

    /// Intent definitions, each binding templates to a response.
    pub intents: Vec<IntentConfig>,
}

/// Options for a [`crate::dispatch::Dispatcher`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Token separator for templates and input (e.g., " " or "/").
    pub separator: String,

    /// Number of leading tokens routed through the tree.
    /// Derived from the template count when unset; values below 1 become 1.
    pub max_depth: Option<usize>,

    /// Keep compiled templates so later registrations can trigger a rebuild.
    pub preserve_on_rebuild: bool,

    /// Ordering applied to the candidates a lookup gathers.
    pub candidate_order: CandidateOrder,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            separator: " ".to_string(),
            max_depth: None,
            preserve_on_rebuild: false,
            candidate_order: CandidateOrder::Weighted,
        }
    }
}

impl DispatcherConfig {
    /// Default options with a different separator.
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            ..Self::default()
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or filter directives (trace, debug, info, warn, error).
    /// `RUST_LOG` takes precedence when set.
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// One intent: a set of templates sharing a response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntentConfig {
    /// Intent identifier, reported on match.
    pub name: String,

    /// Templates that trigger this intent.
    pub templates: Vec<String>,

    /// Response text; `{name}` is replaced with the captured value.
    #[serde(default)]
    pub response: String,
}
