//! Template to regex compilation.
//!
//! # Responsibilities
//! - Reassemble tokens into a single anchored, case-insensitive regex
//! - Turn `<name>` into a lazy named group and `<name=pattern>` into a
//!   named group with the given body
//! - Assign each pattern its specificity weight

use std::collections::BTreeMap;
use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::pattern::template::{Template, Token};
use crate::pattern::types::PatternError;

/// Specificity score used to order candidates; higher is tried first.
///
/// Literal-only templates get [`Weight::LITERAL`]; anything with a variable is
/// weighted by the length of its raw text. Two variable templates of equal
/// length are not ordered by anything more clever than insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Weight(u32);

impl Weight {
    pub const LITERAL: Weight = Weight(u32::MAX);

    /// Weight for a template with variables and `len` characters.
    pub fn from_len(len: usize) -> Self {
        // Capped one below the sentinel so a variable template never ties a literal one.
        Self(u32::try_from(len).unwrap_or(u32::MAX).min(u32::MAX - 1))
    }

    pub fn of(template: &Template) -> Self {
        if template.has_variables() {
            Self::from_len(template.raw().chars().count())
        } else {
            Self::LITERAL
        }
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn is_literal(self) -> bool {
        self == Self::LITERAL
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_literal() {
            write!(f, "literal")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// An immutable compiled template.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    template: Template,
    weight: Weight,
    regex: Regex,
}

impl CompiledPattern {
    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn raw(&self) -> &str {
        self.template.raw()
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Match the whole of `text`, returning the named groups that took part.
    ///
    /// Captured values keep the casing of the input.
    pub fn captures(&self, text: &str) -> Option<BTreeMap<String, String>> {
        let caps = self.regex.captures(text)?;
        let values = self
            .regex
            .capture_names()
            .flatten()
            .filter_map(|name| {
                caps.name(name)
                    .map(|m| (name.to_string(), m.as_str().to_string()))
            })
            .collect();
        Some(values)
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Parse and compile `raw` in one step.
pub fn compile(raw: &str, separator: &str) -> Result<CompiledPattern, PatternError> {
    compile_template(Template::parse(raw, separator)?)
}

/// Compile an already parsed template.
pub fn compile_template(template: Template) -> Result<CompiledPattern, PatternError> {
    let separator = regex::escape(template.separator());
    let mut body = String::with_capacity(template.raw().len() + 16);

    for (i, token) in template.tokens().iter().enumerate() {
        if i > 0 {
            body.push_str(&separator);
        }
        match token {
            Token::Literal(text) => body.push_str(text),
            Token::Variable {
                name,
                pattern: None,
            } => body.push_str(&format!("(?P<{}>.*?)", name)),
            Token::Variable {
                name,
                pattern: Some(pattern),
            } => body.push_str(&format!("(?P<{}>{})", name, pattern)),
        }
    }

    let regex = RegexBuilder::new(&format!("^(?:{})$", body))
        .case_insensitive(true)
        .build()
        .map_err(|e| PatternError::malformed(template.raw(), e.to_string()))?;

    Ok(CompiledPattern {
        weight: Weight::of(&template),
        template,
        regex,
    })
}
