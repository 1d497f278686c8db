//! Template registration and dispatch.
//!
//! # Responsibilities
//! - Compile templates as they are registered
//! - Build the pattern tree from pending templates
//! - Resolve input text to the best template and invoke its handler
//!
//! # Design Decisions
//! - Lifecycle is pending → built; matching requires a built dispatcher
//! - Without preserve mode the dispatcher is frozen after `build`
//! - With preserve mode every build starts from a fresh tree holding all
//!   templates registered so far
//! - Pending templates are inserted last-registered-first, so among equal
//!   weights the most recent registration is tried first
//! - `dispatch` takes `&self` and never mutates; share a built dispatcher
//!   across threads freely

use std::fmt;
use std::sync::Arc;

use crate::config::DispatcherConfig;
use crate::dispatch::handler::{Handler, Params};
use crate::dispatch::types::{DispatchError, DispatchResult, Matched, Resolved};
use crate::observability::metrics;
use crate::pattern::{self, CompiledPattern, Weight};
use crate::tree::{Candidate, PatternTree};

/// A compiled template bound to its handler.
pub struct Route<T> {
    pattern: CompiledPattern,
    handler: Handler<T>,
}

impl<T> Route<T> {
    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn handler(&self) -> &Handler<T> {
        &self.handler
    }
}

impl<T> Candidate for Route<T> {
    fn weight(&self) -> Weight {
        self.pattern.weight()
    }

    fn template(&self) -> &str {
        self.pattern.raw()
    }
}

impl<T> fmt::Debug for Route<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("template", &self.pattern.raw())
            .field("weight", &self.pattern.weight())
            .field("handler", &self.handler.name())
            .finish()
    }
}

/// Compiles templates into a pattern tree and dispatches input to handlers.
pub struct Dispatcher<T> {
    config: DispatcherConfig,
    pending: Vec<Arc<Route<T>>>,
    tree: PatternTree<Route<T>>,
    max_depth: Option<usize>,
    built: bool,
}

impl<T> Dispatcher<T> {
    /// Dispatcher with default options (space separator).
    pub fn new() -> Self {
        Self::from_valid_config(DispatcherConfig::default())
    }

    /// Dispatcher with explicit options.
    pub fn with_config(config: DispatcherConfig) -> DispatchResult<Self> {
        if config.separator.is_empty() {
            return Err(DispatchError::InvalidConfig(
                "separator must not be empty".to_string(),
            ));
        }
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: DispatcherConfig) -> Self {
        let tree = PatternTree::new(1, config.separator.clone(), config.candidate_order);
        Self {
            config,
            pending: Vec::new(),
            tree,
            max_depth: None,
            built: false,
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Routing depth in effect, once resolved by a build.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Compiled template count when built, pending count otherwise.
    pub fn len(&self) -> usize {
        if self.built {
            self.tree.len()
        } else {
            self.pending.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compile `template` and queue it for the next build.
    ///
    /// Fails without touching the tree when the dispatcher is built and
    /// preserve mode is off.
    pub fn register(&mut self, template: &str, handler: Handler<T>) -> DispatchResult<()> {
        if self.built && !self.config.preserve_on_rebuild {
            tracing::warn!(template, "Registration rejected: dispatcher already built");
            return Err(DispatchError::RegistrationAfterBuild {
                template: template.to_string(),
            });
        }

        let pattern = pattern::compile(template, &self.config.separator)?;
        tracing::trace!(
            template,
            weight = %pattern.weight(),
            handler = handler.name(),
            "Template registered"
        );

        self.pending.push(Arc::new(Route { pattern, handler }));
        self.built = false;
        Ok(())
    }

    /// Insert pending templates into the tree.
    ///
    /// Returns `false` when there is nothing to do because the dispatcher is
    /// already built.
    pub fn build(&mut self) -> bool {
        if self.built {
            tracing::debug!("Dispatcher was already built");
            return false;
        }

        let max_depth = self.resolve_max_depth();
        let mut tree = PatternTree::new(
            max_depth,
            self.config.separator.clone(),
            self.config.candidate_order,
        );

        if self.config.preserve_on_rebuild {
            for route in self.pending.iter().rev() {
                tree.insert(route.pattern.template().tokens(), Arc::clone(route));
            }
        } else {
            while let Some(route) = self.pending.pop() {
                tree.insert(route.pattern.template().tokens(), Arc::clone(&route));
            }
        }

        tracing::debug!(
            templates = tree.len(),
            max_depth,
            order = ?tree.order(),
            "Dispatcher built"
        );
        metrics::record_compiled(tree.len());

        self.tree = tree;
        self.built = true;
        true
    }

    fn resolve_max_depth(&mut self) -> usize {
        let depth = match (self.max_depth, self.config.max_depth) {
            (Some(depth), _) => depth,
            (None, Some(0)) => {
                tracing::debug!("Max depth must be at least 1; defaulting to 1");
                1
            }
            (None, Some(depth)) => depth,
            (None, None) => (self.pending.len() / 5).max(1),
        };
        self.max_depth = Some(depth);
        depth
    }

    /// Find the template that fully matches `text` without invoking it.
    pub fn find(&self, text: &str) -> DispatchResult<Option<Resolved<T>>> {
        if !self.built {
            return Err(DispatchError::NotPrepared);
        }

        let candidates = self.tree.lookup(text);
        metrics::record_candidates(candidates.len());

        for route in candidates {
            if let Some(captures) = route.pattern.captures(text) {
                tracing::trace!(template = route.pattern.raw(), "Candidate matched");
                return Ok(Some(Resolved { route, captures }));
            }
            tracing::trace!(template = route.pattern.raw(), "Candidate rejected");
        }
        Ok(None)
    }

    /// Dispatch `text` to the best matching handler.
    ///
    /// `Ok(None)` means no template matched; it is distinct from a handler
    /// that returned an empty value.
    pub fn dispatch(&self, text: &str) -> DispatchResult<Option<Matched<T>>> {
        self.dispatch_with(text, &Params::new())
    }

    /// Like [`Dispatcher::dispatch`], also offering `extras` to the handler.
    pub fn dispatch_with(&self, text: &str, extras: &Params) -> DispatchResult<Option<Matched<T>>> {
        let Some(Resolved { route, captures }) = self.find(text)? else {
            metrics::record_miss();
            tracing::debug!(text, "No template matched");
            return Ok(None);
        };

        let params = route.handler.bind(captures, extras)?;
        let value = route.handler.call(&params);
        metrics::record_match(route.handler.name());

        Ok(Some(Matched {
            route,
            params,
            value,
        }))
    }

    /// Human-readable dump of the built tree.
    pub fn describe_tree(&self) -> String {
        self.tree.to_string()
    }
}

impl<T> Default for Dispatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Display for Dispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.built {
            write!(f, "<Dispatcher (built) with {} templates>", self.len())
        } else {
            write!(f, "<Dispatcher (unbuilt) with {} pending templates>", self.len())
        }
    }
}

impl<T> fmt::Debug for Dispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("built", &self.built)
            .field("max_depth", &self.max_depth)
            .field("pending", &self.pending)
            .field("tree", &self.tree)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(name: &str, value: &'static str) -> Handler<&'static str> {
        Handler::new(name, &[], move |_: &Params| value)
    }

    fn echo(name: &str, accepts: &[&str]) -> Handler<Params> {
        Handler::new(name, accepts, |p: &Params| p.clone())
    }

    #[test]
    fn test_literal_match() {
        let mut d = Dispatcher::new();
        d.register("play", constant("play", "Playing music")).unwrap();
        assert!(d.build());

        let matched = d.dispatch("play").unwrap().unwrap();
        assert_eq!(matched.value, "Playing music");
        assert_eq!(matched.template(), "play");
        assert_eq!(matched.handler_name(), "play");
        assert!(matched.params.is_empty());
    }

    #[test]
    fn test_capture_keeps_input_case() {
        let mut d = Dispatcher::new();
        d.register("open <app>", echo("open", &["app"])).unwrap();
        d.build();

        let matched = d.dispatch("open Slack").unwrap().unwrap();
        assert_eq!(matched.value["app"], "Slack");
    }

    #[test]
    fn test_no_match_is_not_an_error() {
        let mut d = Dispatcher::new();
        d.register("play <song> with <app=(spotify|itunes)>", echo("play", &["song", "app"]))
            .unwrap();
        d.build();

        assert!(d.dispatch("play X with zune").unwrap().is_none());
        assert!(d.dispatch("stop").unwrap().is_none());

        let matched = d.dispatch("play X with itunes").unwrap().unwrap();
        assert_eq!(matched.value["song"], "X");
        assert_eq!(matched.value["app"], "itunes");
    }

    #[test]
    fn test_empty_handler_output_still_matches() {
        let mut d = Dispatcher::new();
        d.register("noop", constant("noop", "")).unwrap();
        d.build();

        let matched = d.dispatch("noop").unwrap();
        assert_eq!(matched.map(|m| m.value), Some(""));
    }

    #[test]
    fn test_dispatch_before_build_fails() {
        let mut d = Dispatcher::new();
        d.register("play", constant("play", "x")).unwrap();
        assert_eq!(d.dispatch("play").unwrap_err(), DispatchError::NotPrepared);
        assert_eq!(d.find("play").unwrap_err(), DispatchError::NotPrepared);
    }

    #[test]
    fn test_register_after_build_rejected() {
        let mut d = Dispatcher::new();
        d.register("play", constant("play", "x")).unwrap();
        d.build();

        let err = d.register("stop", constant("stop", "y")).unwrap_err();
        assert!(matches!(err, DispatchError::RegistrationAfterBuild { .. }));
        assert_eq!(d.len(), 1);
        assert!(d.dispatch("stop").unwrap().is_none());
        assert!(!d.build());
    }

    #[test]
    fn test_preserve_mode_rebuild() {
        let config = DispatcherConfig {
            preserve_on_rebuild: true,
            ..DispatcherConfig::default()
        };
        let mut d = Dispatcher::with_config(config).unwrap();
        assert!(d.config().preserve_on_rebuild);
        assert_eq!(d.config().separator, " ");
        d.register("play", constant("play", "x")).unwrap();
        d.build();

        d.register("stop", constant("stop", "y")).unwrap();
        assert!(!d.is_built());
        assert!(d.build());
        assert_eq!(d.len(), 2);
        assert_eq!(d.dispatch("play").unwrap().unwrap().value, "x");
        assert_eq!(d.dispatch("stop").unwrap().unwrap().value, "y");
    }

    #[test]
    fn test_compile_errors_surface_at_registration() {
        let mut d: Dispatcher<()> = Dispatcher::new();
        let err = d.register("<app> now", Handler::new("h", &["app"], |_: &Params| ())).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Pattern(pattern::PatternError::FirstTokenIsVariable { .. })
        ));

        let err = d.register("open <app", Handler::new("h", &["app"], |_: &Params| ())).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Pattern(pattern::PatternError::Malformed { .. })
        ));
        assert!(d.is_empty());
    }

    #[test]
    fn test_unexpected_capture_surfaces() {
        let mut d = Dispatcher::new();
        d.register("open <app>", constant("open", "x")).unwrap();
        d.build();

        let err = d.dispatch("open slack").unwrap_err();
        assert!(matches!(err, DispatchError::UnexpectedCapture { .. }));
    }

    #[test]
    fn test_exact_literal_never_resolves_to_longer_template() {
        let mut d = Dispatcher::new();
        d.register("turn on the light", constant("first", "first")).unwrap();
        d.register("turn on the light now", constant("second", "second")).unwrap();
        d.build();

        for _ in 0..10 {
            assert_eq!(d.dispatch("turn on the light").unwrap().unwrap().value, "first");
        }
        assert_eq!(d.dispatch("turn on the light now").unwrap().unwrap().value, "second");
    }

    #[test]
    fn test_equal_weight_tie_goes_to_latest_registration() {
        let mut d = Dispatcher::new();
        d.register("say <a>", constant("older", "older")).unwrap();
        d.register("say <b>", constant("newer", "newer")).unwrap();
        d.build();

        let resolved = d.find("say hi").unwrap().unwrap();
        assert_eq!(resolved.handler_name(), "newer");
    }

    #[test]
    fn test_max_depth_resolution() {
        let mut d = Dispatcher::new();
        for i in 0..12 {
            d.register(&format!("cmd{} <x>", i), echo("h", &["x"])).unwrap();
        }
        d.build();
        assert_eq!(d.max_depth(), Some(2));

        let config = DispatcherConfig {
            max_depth: Some(0),
            ..DispatcherConfig::default()
        };
        let mut clamped: Dispatcher<()> = Dispatcher::with_config(config).unwrap();
        clamped.build();
        assert_eq!(clamped.max_depth(), Some(1));
    }

    #[test]
    fn test_dispatch_with_extras() {
        let mut d = Dispatcher::with_config(DispatcherConfig::with_separator("/")).unwrap();
        d.register("GET:/api/echo", echo("echo", &["url_params"])).unwrap();
        d.build();

        let mut extras = Params::new();
        extras.insert("url_params".to_string(), "msg=hi".to_string());
        extras.insert("form_data".to_string(), "dropped".to_string());

        let matched = d.dispatch_with("GET:/api/echo", &extras).unwrap().unwrap();
        assert_eq!(matched.value.len(), 1);
        assert_eq!(matched.value["url_params"], "msg=hi");
    }

    #[test]
    fn test_empty_separator_rejected() {
        let err = Dispatcher::<()>::with_config(DispatcherConfig::with_separator("")).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidConfig(_)));
    }

    #[test]
    fn test_display() {
        let mut d = Dispatcher::new();
        d.register("play", constant("play", "x")).unwrap();
        assert_eq!(d.to_string(), "<Dispatcher (unbuilt) with 1 pending templates>");
        d.build();
        assert_eq!(d.to_string(), "<Dispatcher (built) with 1 templates>");
        assert!(d.describe_tree().contains("[literal] play"));
    }
}
