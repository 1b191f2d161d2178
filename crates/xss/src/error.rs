//! Error types for style sheet resolution.
//!
//! Only conditions an author can fix before shipping a sheet are errors.
//! Malformed shorthand values are recovered locally with a `log::warn!`
//! diagnostic and never surface here.

use thiserror::Error;

/// Errors that can abort a resolution pass.
///
/// # Examples
///
/// ```rust
/// use xss::parser::media::parse_media_query;
/// use xss::XssError;
///
/// // Missing closing parenthesis
/// let result = parse_media_query("screen and (min-width: 300px");
/// assert!(matches!(result, Err(XssError::InvalidQuery(_))));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum XssError {
    /// A conditional key did not contain a parseable media query.
    ///
    /// The string contains the offending query text.
    #[error("invalid media query: {0}")]
    InvalidQuery(String),

    /// A feature name that names no feature, such as a bare `min-` prefix.
    ///
    /// Well-formed features the environment does not supply are not errors;
    /// they simply never match.
    #[error("malformed media feature name: {0}")]
    UnknownFeature(String),

    /// A known media feature was given a value of the wrong kind.
    #[error("invalid value `{value}` for media feature `{feature}`")]
    InvalidQueryValue {
        /// The feature name as written, including any `min-`/`max-` prefix.
        feature: String,
        /// The rejected value text.
        value: String,
    },

    /// A user-supplied pipeline rule failed.
    #[error("rule `{rule}` failed: {message}")]
    Rule {
        /// Name of the failing rule.
        rule: String,
        /// Human readable failure description.
        message: String,
    },
}

impl XssError {
    /// Convenience constructor for rule failures.
    pub fn rule(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rule {
            rule: rule.into(),
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XssError>;
