//! Rule records and their deduplication keys.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::unit::ExecutionUnit;

// ============================================================================
// RULE KEY
// ============================================================================

/// Stable identity of a predicate.
///
/// Two non-forced rules with equal keys are the same rule; only the first
/// one survives a merge. `Contains` rules with different needles are
/// different rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "arg", rename_all = "snake_case")]
#[non_exhaustive]
pub enum RuleKey {
    /// Value must be truthy.
    Required,
    /// Value must be an email address.
    Email,
    /// Value must contain the given needle.
    Contains(String),
    /// Caller-defined rule identified by a tag.
    Named(Cow<'static, str>),
}

impl RuleKey {
    /// Creates a caller-defined key.
    pub fn named(tag: impl Into<Cow<'static, str>>) -> Self {
        Self::Named(tag.into())
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("required"),
            Self::Email => f.write_str("email"),
            Self::Contains(needle) => write!(f, "contains({needle:?})"),
            Self::Named(tag) => f.write_str(tag),
        }
    }
}

// ============================================================================
// RULE
// ============================================================================

/// One predicate in runnable form.
///
/// Cloning a rule clones a handle to its execution unit; the unit itself is
/// built once and never changes.
#[derive(Clone)]
pub struct Rule {
    key: Option<RuleKey>,
    forced: bool,
    unit: Arc<dyn ExecutionUnit>,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("key", &self.key)
            .field("forced", &self.forced)
            .finish_non_exhaustive()
    }
}

impl Rule {
    /// Creates a rule that takes part in deduplication.
    pub fn new(key: Option<RuleKey>, unit: impl ExecutionUnit + 'static) -> Self {
        Self::from_shared(key, false, Arc::new(unit))
    }

    /// Creates a rule that is kept even when an equivalent rule exists.
    pub fn forced(key: Option<RuleKey>, unit: impl ExecutionUnit + 'static) -> Self {
        Self::from_shared(key, true, Arc::new(unit))
    }

    /// Creates a rule around an already shared unit.
    pub fn from_shared(key: Option<RuleKey>, forced: bool, unit: Arc<dyn ExecutionUnit>) -> Self {
        Self { key, forced, unit }
    }

    /// Dedup key, `None` for anonymous predicates.
    pub fn key(&self) -> Option<&RuleKey> {
        self.key.as_ref()
    }

    /// Whether this rule bypasses deduplication.
    pub fn is_forced(&self) -> bool {
        self.forced
    }

    /// The unit that runs this rule.
    pub fn unit(&self) -> &Arc<dyn ExecutionUnit> {
        &self.unit
    }

    /// True when both rules carry the same key. Anonymous rules match nothing.
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.matches_key(other.key.as_ref())
    }

    pub(crate) fn matches_key(&self, key: Option<&RuleKey>) -> bool {
        match (&self.key, key) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
