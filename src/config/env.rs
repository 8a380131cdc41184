//! Environment variable expansion for registry configuration values.
//!
//! Registry URLs, query params and headers may reference environment
//! variables using `${VAR}` syntax.
//!
//! # Syntax
//!
//! - `${VAR_NAME}` - replaced with the variable's value (empty when unset)
//! - `$${escaped}` - produces literal `${escaped}` in output
//!
//! Variable names are word characters only (`[A-Za-z0-9_]`); anything else
//! inside `${...}` is kept as literal text.
//!
//! # Example
//!
//! ```
//! use regkit::config::{expand_env_vars, EnvVars};
//!
//! let env = EnvVars::from_pairs([("TOKEN", "secret")]);
//! assert_eq!(expand_env_vars("Bearer ${TOKEN}", &env), "Bearer secret");
//! ```

use std::collections::HashMap;

/// A segment of a templated string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference: ${NAME}
    Variable(String),
}

fn is_var_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse a string containing `${VAR}` references.
pub fn parse_env_template(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut current_literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            current_literal.push(c);
            continue;
        }

        match chars.peek() {
            Some('$') => {
                chars.next();
                if chars.peek() == Some(&'{') {
                    // $${...} -> literal ${...}
                    chars.next();
                    current_literal.push_str("${");
                    for c in chars.by_ref() {
                        current_literal.push(c);
                        if c == '}' {
                            break;
                        }
                    }
                } else {
                    current_literal.push('$');
                }
            }
            Some('{') => {
                chars.next();

                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }

                if closed && is_var_name(&name) {
                    if !current_literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                    }
                    segments.push(Segment::Variable(name));
                } else {
                    current_literal.push_str("${");
                    current_literal.push_str(&name);
                    if closed {
                        current_literal.push('}');
                    }
                }
            }
            _ => current_literal.push(c),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    segments
}

/// Extract referenced variable names in first-reference order, without
/// duplicates.
pub fn extract_env_vars(input: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for segment in parse_env_template(input) {
        if let Segment::Variable(name) = segment {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Check if a string references any variable.
pub fn has_env_vars(input: &str) -> bool {
    parse_env_template(input)
        .iter()
        .any(|seg| matches!(seg, Segment::Variable(_)))
}

/// Remove every `${VAR}` reference from a template, keeping literal text.
pub fn strip_env_vars(input: &str) -> String {
    parse_env_template(input)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Literal(text) => Some(text),
            Segment::Variable(_) => None,
        })
        .collect()
}

/// Snapshot of environment variables used for expansion.
///
/// Injected explicitly so that resolution is deterministic under test.
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    vars: HashMap<String, String>,
}

impl EnvVars {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build an environment from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set a variable, returning the updated environment.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Look up a variable (empty values included).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// True if the variable is present and non-empty.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.is_empty())
    }
}

/// Outcome of expanding a template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Expansion {
    /// The expanded string.
    pub value: String,
    /// Every variable referenced, in first-reference order.
    pub referenced: Vec<String>,
    /// Referenced variables that were unset or empty.
    pub empty: Vec<String>,
}

/// Expand a template, reporting which variables were referenced and which
/// resolved to empty.
pub fn expand(input: &str, env: &EnvVars) -> Expansion {
    let mut expansion = Expansion::default();

    for segment in parse_env_template(input) {
        match segment {
            Segment::Literal(text) => expansion.value.push_str(&text),
            Segment::Variable(name) => {
                let value = env.get(&name).unwrap_or_default();
                expansion.value.push_str(value);
                if value.is_empty() && !expansion.empty.contains(&name) {
                    expansion.empty.push(name.clone());
                }
                if !expansion.referenced.contains(&name) {
                    expansion.referenced.push(name);
                }
            }
        }
    }

    expansion
}

/// Expand a template, substituting unset variables with the empty string.
pub fn expand_env_vars(input: &str, env: &EnvVars) -> String {
    expand(input, env).value
}
