//! Metrics collection.
//!
//! # Responsibilities
//! - Define dispatch metrics (matches, misses, candidate counts)
//! - Record through the `metrics` facade; the embedding application decides
//!   whether and where to export them
//!
//! # Metrics
//! - `dispatch_matches_total` (counter): successful dispatches by handler
//! - `dispatch_misses_total` (counter): inputs no template matched
//! - `dispatch_candidates` (histogram): candidates gathered per lookup
//! - `dispatch_templates_compiled` (gauge): templates in the last built tree
//!
//! # Design Decisions
//! - Without an installed recorder every call is a no-op
//! - Handler name is the only label, keeping cardinality bounded by the catalog

pub fn record_match(handler: &str) {
    metrics::counter!("dispatch_matches_total", "handler" => handler.to_string()).increment(1);
}

pub fn record_miss() {
    metrics::counter!("dispatch_misses_total").increment(1);
}

pub fn record_candidates(count: usize) {
    metrics::histogram!("dispatch_candidates").record(count as f64);
}

pub fn record_compiled(count: usize) {
    metrics::gauge!("dispatch_templates_compiled").set(count as f64);
}
