//! Failure message templates.
//!
//! Templates are plain strings with `{placeholder}` slots. Two placeholders
//! are filled by this crate:
//!
//! - `{name}`: the field's display name, substituted when a rule fails
//! - `{needle}`: the searched substring of a `contains` rule
//!
//! Both are filled in a single [`format_message`] pass when a rule fails,
//! so substituted text is never scanned for placeholders. Unknown
//! placeholders are left untouched.

use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};

/// Placeholder for the field display name.
pub const NAME: &str = "name";

/// Placeholder for the `contains` needle.
pub const NEEDLE: &str = "needle";

/// Default template for required rules.
pub const DEFAULT_REQUIRED: &str = "{name} is required.";

/// Default template for email rules.
pub const DEFAULT_EMAIL: &str = "Not a valid email";

/// Default template for contains rules.
pub const DEFAULT_CONTAINS: &str = "{name} must contain \"{needle}.\"";

/// Substitutes `{key}` slots in `template` with the matching values.
///
/// Slots with no matching substitution are copied verbatim, braces included.
/// An unclosed `{` is copied verbatim as well.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_rules::message::format_message;
///
/// assert_eq!(format_message("{name} is required.", &[("name", "Email")]), "Email is required.");
/// assert_eq!(format_message("{name} vs {other}", &[("name", "A")]), "A vs {other}");
/// ```
#[must_use]
pub fn format_message(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let key = &after[..close];
        match substitutions.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

/// Checks that every placeholder in `template` is closed and listed in
/// `allowed`.
pub fn validate_template(template: &str, allowed: &[&str]) -> RulesResult<()> {
    let mut offset = 0;

    while let Some(open) = template[offset..].find('{') {
        let start = offset + open;
        let Some(close) = template[start + 1..].find('}') else {
            return Err(RulesError::UnclosedPlaceholder {
                template: template.to_owned(),
                position: start,
            });
        };

        let key = &template[start + 1..start + 1 + close];
        if !allowed.contains(&key) {
            return Err(RulesError::UnknownPlaceholder {
                template: template.to_owned(),
                placeholder: key.to_owned(),
            });
        }
        offset = start + close + 2;
    }

    Ok(())
}

// ============================================================================
// MESSAGE CATALOG
// ============================================================================

/// Default failure templates used by the built-in rule builders.
///
/// Missing keys fall back to the English defaults, so a catalog document
/// only needs to list the templates it overrides:
///
/// ```json
/// { "required": "{name} ne peut pas être vide." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleMessages {
    /// Template for `is_required`.
    pub required: String,
    /// Template for `is_email`.
    pub email: String,
    /// Template for `contains`.
    pub contains: String,
}

impl Default for RuleMessages {
    fn default() -> Self {
        Self {
            required: DEFAULT_REQUIRED.to_owned(),
            email: DEFAULT_EMAIL.to_owned(),
            contains: DEFAULT_CONTAINS.to_owned(),
        }
    }
}

impl RuleMessages {
    /// Parses a JSON catalog and validates every template in it.
    pub fn from_json(source: &str) -> RulesResult<Self> {
        let messages: Self = serde_json::from_str(source)?;
        messages.validate()?;
        Ok(messages)
    }

    /// Checks each template against the placeholders its rule can fill.
    pub fn validate(&self) -> RulesResult<()> {
        validate_template(&self.required, &[NAME])?;
        validate_template(&self.email, &[NAME])?;
        validate_template(&self.contains, &[NAME, NEEDLE])
    }

    /// Replaces the required template.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_required(mut self, template: impl Into<String>) -> Self {
        self.required = template.into();
        self
    }

    /// Replaces the email template.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_email(mut self, template: impl Into<String>) -> Self {
        self.email = template.into();
        self
    }

    /// Replaces the contains template.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_contains(mut self, template: impl Into<String>) -> Self {
        self.contains = template.into();
        self
    }
}
