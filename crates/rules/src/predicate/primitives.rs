//! Built-in predicates: required, email, contains.

use std::borrow::Cow;
use std::sync::LazyLock;

use super::Value;
use crate::rule::RuleKey;

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$"
    ).unwrap()
});

// ============================================================================
// VALUE HELPERS
// ============================================================================

/// Truthiness: `null`, `false`, `0` and `""` are falsy, everything else is
/// truthy (empty arrays and objects included).
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Returns `true` if `value` is a string shaped like an email address.
#[must_use]
pub fn is_email(value: &Value) -> bool {
    value.as_str().is_some_and(|s| EMAIL_REGEX.is_match(s))
}

/// Returns `true` if the textual form of `value` contains `needle`.
///
/// Numbers and booleans are searched through their textual form, `null`
/// reads as the empty string, arrays and objects never match.
#[must_use]
pub fn contains_text(value: &Value, needle: &str) -> bool {
    as_text(value).is_some_and(|text| text.contains(needle))
}

fn as_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => Some(Cow::Borrowed("")),
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

// ============================================================================
// PREDICATES
// ============================================================================

crate::predicate! {
    /// Passes when the value is truthy. Keyed as [`RuleKey::Required`].
    pub Truthy;
    key { Some(RuleKey::Required) }
    rule(value, all) { is_truthy(value) }
    fn truthy();
}

crate::predicate! {
    /// Passes when the value is a string shaped like an email address.
    pub Email;
    key { Some(RuleKey::Email) }
    rule(value, all) { is_email(value) }
    fn email();
}

crate::predicate! {
    /// Passes when the value's text contains `needle`.
    ///
    /// Different needles are different rules.
    #[derive(PartialEq, Eq, Hash)]
    pub Contains { needle: String };
    key(self) { Some(RuleKey::Contains(self.needle.clone())) }
    rule(self, value, all) { contains_text(value, &self.needle) }
    new(needle: impl Into<String>) { Self { needle: needle.into() } }
    fn contains(needle: impl Into<String>);
}
