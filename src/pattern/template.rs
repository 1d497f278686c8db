//! Template tokenizing.
//!
//! # Responsibilities
//! - Split a raw template on the configured separator
//! - Classify each piece as a literal or a `<name>` / `<name=pattern>` variable
//! - Reject malformed variable syntax up front
//!
//! # Design Decisions
//! - A separator inside `<...>` does not split, so `<app=(zune|play music)>`
//!   stays a single token
//! - Variable syntax must span a whole token; `file<n>` is malformed
//! - Literal text is kept verbatim and doubles as a regex fragment

use std::collections::HashSet;

use crate::pattern::types::PatternError;

/// One separator-delimited piece of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text, matched case-insensitively.
    Literal(String),
    /// Named placeholder, optionally restricted to a regex fragment.
    Variable {
        name: String,
        pattern: Option<String>,
    },
}

impl Token {
    pub fn is_variable(&self) -> bool {
        matches!(self, Token::Variable { .. })
    }
}

/// A parsed template: the raw text plus its token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    raw: String,
    separator: String,
    tokens: Vec<Token>,
}

impl Template {
    /// Parse `raw` using `separator` as the token delimiter.
    pub fn parse(raw: &str, separator: &str) -> Result<Self, PatternError> {
        if separator.is_empty() {
            return Err(PatternError::malformed(raw, "separator must not be empty"));
        }

        let mut tokens = Vec::new();
        let mut seen = HashSet::new();
        for piece in split_outside_brackets(raw, separator)? {
            let token = parse_token(raw, piece)?;
            if let Token::Variable { name, .. } = &token {
                if !seen.insert(name.clone()) {
                    return Err(PatternError::malformed(
                        raw,
                        format!("variable `{}` appears more than once", name),
                    ));
                }
            }
            tokens.push(token);
        }

        if tokens.first().is_some_and(Token::is_variable) {
            return Err(PatternError::FirstTokenIsVariable {
                template: raw.to_string(),
            });
        }

        Ok(Self {
            raw: raw.to_string(),
            separator: separator.to_string(),
            tokens,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// True when at least one token is a variable.
    pub fn has_variables(&self) -> bool {
        self.tokens.iter().any(Token::is_variable)
    }

    /// Names of all variables, in template order.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|token| match token {
            Token::Variable { name, .. } => Some(name.as_str()),
            Token::Literal(_) => None,
        })
    }
}

/// Split on `separator` except where the separator sits inside angle brackets.
fn split_outside_brackets<'a>(raw: &'a str, separator: &str) -> Result<Vec<&'a str>, PatternError> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut resume_at = 0;

    for (i, c) in raw.char_indices() {
        if i < resume_at {
            continue;
        }
        if depth == 0 && raw[i..].starts_with(separator) {
            pieces.push(&raw[start..i]);
            start = i + separator.len();
            resume_at = start;
            continue;
        }
        match c {
            '<' => depth += 1,
            '>' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| PatternError::malformed(raw, format!("unmatched '>' at byte {}", i)))?;
            }
            _ => {}
        }
    }

    if depth > 0 {
        return Err(PatternError::malformed(raw, "unclosed '<'"));
    }

    pieces.push(&raw[start..]);
    Ok(pieces)
}

fn parse_token(raw: &str, piece: &str) -> Result<Token, PatternError> {
    let inner = match piece.strip_prefix('<').and_then(|p| p.strip_suffix('>')) {
        Some(inner) => inner,
        None if piece.contains(['<', '>']) => {
            return Err(PatternError::malformed(
                raw,
                format!("variable syntax must span the whole token in `{}`", piece),
            ));
        }
        None => return Ok(Token::Literal(piece.to_string())),
    };

    let (name, pattern) = match inner.split_once('=') {
        Some((name, pattern)) => (name, Some(pattern)),
        None => (inner, None),
    };

    if !is_group_name(name) {
        return Err(PatternError::malformed(
            raw,
            format!("invalid variable name `{}`", name),
        ));
    }
    if pattern.is_some_and(str::is_empty) {
        return Err(PatternError::malformed(
            raw,
            format!("variable `{}` has an empty pattern", name),
        ));
    }

    Ok(Token::Variable {
        name: name.to_string(),
        pattern: pattern.map(str::to_string),
    })
}

/// Names usable as regex capture groups: `[A-Za-z_][A-Za-z0-9_]*`.
fn is_group_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
