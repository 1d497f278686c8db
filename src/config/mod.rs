//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! catalog file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, template compilation)
//!     → CatalogConfig (validated, immutable)
//!     → catalog::build_dispatcher
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new catalog
//!     → validation.rs validates
//!     → new dispatcher built and swapped in
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal catalogs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{CatalogConfig, DispatcherConfig, IntentConfig, LogFormat, LoggingConfig};
pub use validation::ValidationError;
