//! Predicates: the checks a rule runs.
//!
//! A [`Predicate`] is a synchronous test over the value under test and the
//! record of all field values, plus the [`RuleKey`] that identifies it for
//! deduplication.
//!
//! Built-ins live in [`primitives`]: [`truthy`], [`email`] and
//! [`contains`]. Closures become predicates through [`from_fn`] (keyed, so
//! they deduplicate) or directly through
//! [`RuleSet::is_validated_by`](crate::RuleSet::is_validated_by)
//! (anonymous, always kept).

use std::fmt;

pub use serde_json::Value;

use crate::rule::RuleKey;

pub mod primitives;

pub use primitives::{
    Contains, Email, Truthy, contains, contains_text, email, is_email, is_truthy, truthy,
};

/// Record of every field value of the form being validated, by field name.
pub type FieldValues = serde_json::Map<String, Value>;

/// A synchronous check over one field value.
pub trait Predicate: Send + Sync {
    /// Identity used for deduplication; `None` means the predicate has no
    /// stable identity and never matches another rule.
    fn key(&self) -> Option<RuleKey>;

    /// Returns `true` when `value` satisfies the predicate.
    fn test(&self, value: &Value, all_values: &FieldValues) -> bool;
}

impl<P: Predicate + ?Sized> Predicate for Box<P> {
    fn key(&self) -> Option<RuleKey> {
        (**self).key()
    }

    fn test(&self, value: &Value, all_values: &FieldValues) -> bool {
        (**self).test(value, all_values)
    }
}

// ============================================================================
// CLOSURE PREDICATES
// ============================================================================

/// Predicate built from a closure.
#[derive(Clone)]
pub struct FromFn<F> {
    key: Option<RuleKey>,
    check: F,
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl<F> Predicate for FromFn<F>
where
    F: Fn(&Value, &FieldValues) -> bool + Send + Sync,
{
    fn key(&self) -> Option<RuleKey> {
        self.key.clone()
    }

    fn test(&self, value: &Value, all_values: &FieldValues) -> bool {
        (self.check)(value, all_values)
    }
}

/// Wraps a closure as a predicate identified by `key`.
///
/// ```rust,ignore
/// let no_spaces = predicate::from_fn(RuleKey::named("no_spaces"), |value, _| {
///     value.as_str().is_some_and(|s| !s.contains(' '))
/// });
/// let rules = RuleSet::new().set_requirement(no_spaces, "{name} must not contain spaces");
/// ```
pub fn from_fn<F>(key: RuleKey, check: F) -> FromFn<F>
where
    F: Fn(&Value, &FieldValues) -> bool + Send + Sync,
{
    FromFn {
        key: Some(key),
        check,
    }
}

/// Wraps a closure as a predicate without identity.
pub fn anonymous<F>(check: F) -> FromFn<F>
where
    F: Fn(&Value, &FieldValues) -> bool + Send + Sync,
{
    FromFn { key: None, check }
}
