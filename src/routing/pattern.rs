//! Path pattern compilation.
//!
//! # Responsibilities
//! - Turn a declared path (`/users/:id`, `/static/*`) into an anchored regex
//! - Flag patterns containing a wildcard so the matcher can rank them last
//!
//! # Design Decisions
//! - `:name` matches one or more non-`/` characters
//! - `*` matches any suffix, across segment boundaries
//! - Anchored at both ends with an optional trailing slash
//! - Literal characters are passed through unescaped: `/file.txt` also
//!   matches `/fileXtxt`, and unbalanced metacharacters fail to compile

use regex::Regex;
use thiserror::Error;

/// A path pattern that could not be compiled.
#[derive(Debug, Clone, Error)]
#[error("invalid route pattern `{pattern}`: {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Matching predicate derived from a declared path.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    regex: Regex,
    wildcard: bool,
}

impl CompiledRoute {
    /// Compile a declared path pattern.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let mut source = String::with_capacity(pattern.len() + 16);
        let mut wildcard = false;
        source.push('^');

        let mut chars = pattern.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                ':' if chars.peek().is_some_and(|n| is_param_char(*n)) => {
                    while chars.peek().is_some_and(|n| is_param_char(*n)) {
                        chars.next();
                    }
                    source.push_str("[^/]+");
                }
                '*' => {
                    wildcard = true;
                    source.push_str(".*");
                }
                other => source.push(other),
            }
        }
        source.push_str("/?$");

        let regex = Regex::new(&source).map_err(|e| PatternError {
            pattern: pattern.to_string(),
            source: e,
        })?;

        Ok(Self { regex, wildcard })
    }

    /// Returns true if `url` satisfies the pattern.
    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// The generated regex source, for diagnostics.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

fn is_param_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
