//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Compile every template so bad syntax is caught before a build
//! - Check that response placeholders name captured variables
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CatalogConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::{BTreeSet, HashSet};

use thiserror::Error;

use crate::catalog::response::ResponseTemplate;
use crate::config::schema::CatalogConfig;
use crate::pattern::{self, PatternError};

/// A single semantic problem in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("dispatcher.separator must not be empty")]
    EmptySeparator,

    #[error("intent name must not be empty")]
    EmptyIntentName,

    #[error("duplicate intent `{0}`")]
    DuplicateIntent(String),

    #[error("intent `{0}` has no templates")]
    NoTemplates(String),

    #[error("intent `{intent}`: {source}")]
    Template {
        intent: String,
        #[source]
        source: PatternError,
    },

    #[error("intent `{intent}`: response uses `{{{name}}}` but no template captures it")]
    UnknownPlaceholder { intent: String, name: String },
}

/// Validate `config`, collecting every error found.
pub fn validate_config(config: &CatalogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let separator = config.dispatcher.separator.as_str();

    if separator.is_empty() {
        errors.push(ValidationError::EmptySeparator);
    }

    let mut names = HashSet::new();
    for intent in &config.intents {
        if intent.name.is_empty() {
            errors.push(ValidationError::EmptyIntentName);
        } else if !names.insert(intent.name.as_str()) {
            errors.push(ValidationError::DuplicateIntent(intent.name.clone()));
        }

        if intent.templates.is_empty() {
            errors.push(ValidationError::NoTemplates(intent.name.clone()));
        }

        // Template checks need a usable separator.
        if separator.is_empty() {
            continue;
        }

        let mut captured = BTreeSet::new();
        for raw in &intent.templates {
            match pattern::compile(raw, separator) {
                Ok(compiled) => {
                    captured.extend(compiled.template().variable_names().map(str::to_string));
                }
                Err(source) => errors.push(ValidationError::Template {
                    intent: intent.name.clone(),
                    source,
                }),
            }
        }

        for name in ResponseTemplate::parse(&intent.response).placeholders() {
            if !captured.contains(name) {
                errors.push(ValidationError::UnknownPlaceholder {
                    intent: intent.name.clone(),
                    name: name.to_string(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
