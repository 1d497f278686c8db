//! Template compilation errors.

use thiserror::Error;

/// Errors raised while turning a template into a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Unbalanced brackets, bad variable names or an invalid regex fragment.
    #[error("malformed template `{template}`: {reason}")]
    Malformed { template: String, reason: String },

    /// Templates must start with a literal so the tree can route them.
    #[error("first token of template `{template}` cannot be a variable")]
    FirstTokenIsVariable { template: String },
}

impl PatternError {
    pub(crate) fn malformed(template: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            template: template.to_string(),
            reason: reason.into(),
        }
    }

    /// The raw template that failed to compile.
    pub fn template(&self) -> &str {
        match self {
            Self::Malformed { template, .. } | Self::FirstTokenIsVariable { template } => template,
        }
    }
}
