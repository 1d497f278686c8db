//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! dispatch/, tree/, config/ produce:
//!     → tracing events (registration, build, candidate trials, reloads)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, pretty or JSON)
//!     → any `metrics` recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Per-candidate events are `trace` level so the hot path stays quiet
//! - Metrics are cheap when no recorder is installed

pub mod logging;
pub mod metrics;
