//! Configuration-time errors.
//!
//! Validation runs never fail: a failing rule is reported through
//! [`ValidationState::messages`](crate::ValidationState). The errors here
//! come from checking message templates and loading a [`RuleMessages`]
//! catalog.
//!
//! [`RuleMessages`]: crate::RuleMessages

/// Errors raised while validating templates or loading message catalogs.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RulesError {
    /// A `{` was opened but never closed.
    #[error("unclosed placeholder at byte {position} in template {template:?}")]
    UnclosedPlaceholder { template: String, position: usize },

    /// The template names a placeholder the rule cannot fill.
    #[error("unknown placeholder {{{placeholder}}} in template {template:?}")]
    UnknownPlaceholder {
        template: String,
        placeholder: String,
    },

    /// The catalog document could not be parsed.
    #[error("invalid message catalog: {0}")]
    Config(#[from] serde_json::Error),
}

impl RulesError {
    /// Returns the offending template, if the error concerns one.
    #[must_use]
    pub fn template(&self) -> Option<&str> {
        match self {
            Self::UnclosedPlaceholder { template, .. }
            | Self::UnknownPlaceholder { template, .. } => Some(template),
            Self::Config(_) => None,
        }
    }
}

/// Result alias for configuration-time operations.
pub type RulesResult<T> = Result<T, RulesError>;
