//! The immutable rule container and its builder methods.

use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::engine::RunState;
use crate::message::{NEEDLE, RuleMessages};
use crate::predicate::{self, FieldValues, Predicate, Value};
use crate::rule::{Rule, RuleKey};
use crate::unit::{EventualUnit, ExecutionUnit, SimpleUnit};

/// An immutable, ordered set of rules for one field.
///
/// Builder methods take `&self` and return a new set; the receiver is
/// never changed and stays usable. Rule storage is shared between sets, so
/// building is cheap.
///
/// Each set owns the result of its most recent run, see
/// [`run_validation`](Self::run_validation) and [`state`](Self::state).
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_rules::RuleSet;
///
/// let base = RuleSet::new().is_required();
/// let email = base.is_email();
/// let company_email = email.contains("@acme.com");
///
/// assert_eq!(base.len(), 1);
/// assert_eq!(company_email.len(), 3);
/// ```
pub struct RuleSet {
    pub(crate) rules: Arc<[Rule]>,
    messages: Arc<RuleMessages>,
    pub(crate) state: Arc<Mutex<RunState>>,
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.rules)
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}

/// Clones share the rules but start with a fresh, never-run state.
impl Clone for RuleSet {
    fn clone(&self) -> Self {
        Self {
            rules: Arc::clone(&self.rules),
            messages: Arc::clone(&self.messages),
            state: Arc::default(),
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Rule> for RuleSet {
    /// Collects rules, dropping non-forced duplicates.
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self::from_parts(dedup(iter), Arc::default())
    }
}

impl RuleSet {
    /// Creates an empty set. An empty set accepts every value.
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), Arc::default())
    }

    /// Concatenates the rules of `sets` in order and drops non-forced
    /// duplicates, keeping the first occurrence.
    ///
    /// The message catalog of the first set is kept.
    pub fn merge<'a, I>(sets: I) -> Self
    where
        I: IntoIterator<Item = &'a RuleSet>,
    {
        let mut messages = None;
        let mut concatenated = Vec::new();

        for set in sets {
            messages.get_or_insert_with(|| Arc::clone(&set.messages));
            concatenated.extend(set.rules.iter().cloned());
        }

        Self::from_parts(dedup(concatenated), messages.unwrap_or_default())
    }

    fn from_parts(rules: Vec<Rule>, messages: Arc<RuleMessages>) -> Self {
        Self {
            rules: rules.into(),
            messages,
            state: Arc::default(),
        }
    }

    /// Another handle to this very set: same rules, catalog and run state.
    fn share(&self) -> Self {
        Self {
            rules: Arc::clone(&self.rules),
            messages: Arc::clone(&self.messages),
            state: Arc::clone(&self.state),
        }
    }

    // ========================================================================
    // INTROSPECTION
    // ========================================================================

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rules in launch order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Dedup keys in launch order; `None` for anonymous rules.
    pub fn keys(&self) -> impl Iterator<Item = Option<&RuleKey>> {
        self.rules.iter().map(Rule::key)
    }

    /// Returns `true` if both sets share the same rule storage.
    pub fn same_rules(&self, other: &RuleSet) -> bool {
        Arc::ptr_eq(&self.rules, &other.rules)
    }

    /// The default message templates used by the built-in builders.
    pub fn messages(&self) -> &RuleMessages {
        &self.messages
    }

    // ========================================================================
    // CORE BUILDERS
    // ========================================================================

    /// Returns a set that uses `messages` for later built-in rules.
    /// Rules already present keep their messages.
    pub fn with_messages(&self, messages: RuleMessages) -> Self {
        Self {
            rules: Arc::clone(&self.rules),
            messages: Arc::new(messages),
            state: Arc::default(),
        }
    }

    /// Appends `rule` and re-applies deduplication.
    pub fn with_rule(&self, rule: Rule) -> Self {
        let mut extended = Vec::with_capacity(self.rules.len() + 1);
        extended.extend(self.rules.iter().cloned());
        extended.push(rule);
        Self::from_parts(dedup(extended), Arc::clone(&self.messages))
    }

    /// Appends a forced rule checking `predicate`; `message` is formatted
    /// with `{name}` on failure.
    pub fn force_requirement<P>(&self, predicate: P, message: impl Into<String>) -> Self
    where
        P: Predicate + 'static,
    {
        let key = predicate.key();
        self.with_rule(Rule::forced(key, SimpleUnit::new(predicate, message)))
    }

    /// Appends a forced rule around a pre-built unit.
    pub fn force_unit(&self, key: Option<RuleKey>, unit: impl ExecutionUnit + 'static) -> Self {
        self.with_rule(Rule::forced(key, unit))
    }

    /// Appends a rule checking `predicate` unless a non-forced rule with the
    /// same key is already present, in which case the returned set is this
    /// set: it shares both the rules and the latest run state.
    pub fn set_requirement<P>(&self, predicate: P, message: impl Into<String>) -> Self
    where
        P: Predicate + 'static,
    {
        let key = predicate.key();
        self.set_unit(key, SimpleUnit::new(predicate, message))
    }

    fn set_unit(&self, key: Option<RuleKey>, unit: impl ExecutionUnit + 'static) -> Self {
        let present = self
            .rules
            .iter()
            .filter(|rule| !rule.is_forced())
            .any(|rule| rule.matches_key(key.as_ref()));

        if present {
            return self.share();
        }
        self.with_rule(Rule::new(key, unit))
    }

    // ========================================================================
    // NAMED BUILDERS
    // ========================================================================

    /// Requires a truthy value, with the catalog's required message.
    pub fn is_required(&self) -> Self {
        self.is_required_with(self.messages.required.clone())
    }

    /// Requires a truthy value.
    pub fn is_required_with(&self, message: impl Into<String>) -> Self {
        self.set_requirement(predicate::truthy(), message)
    }

    /// Requires an email address, with the catalog's email message.
    pub fn is_email(&self) -> Self {
        self.is_email_with(self.messages.email.clone())
    }

    /// Requires an email address.
    pub fn is_email_with(&self, message: impl Into<String>) -> Self {
        self.set_requirement(predicate::email(), message)
    }

    /// Requires the value to contain `needle`, with the catalog's contains
    /// message.
    pub fn contains(&self, needle: impl Into<String>) -> Self {
        self.contains_with(needle, &self.messages.contains)
    }

    /// Requires the value to contain `needle`. `{name}` and `{needle}` in
    /// `template` are filled together when the rule fails; the needle is
    /// reported verbatim, braces included.
    pub fn contains_with(&self, needle: impl Into<String>, template: &str) -> Self {
        let needle = needle.into();
        let predicate = predicate::Contains::new(needle.clone());
        let key = predicate.key();
        self.set_unit(key, SimpleUnit::new(predicate, template).with_param(NEEDLE, needle))
    }

    /// Appends a forced rule checking `check`.
    ///
    /// Closures have no stable identity, so the same check added twice runs
    /// twice.
    pub fn is_validated_by<F>(&self, check: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Value, &FieldValues) -> bool + Send + Sync + 'static,
    {
        self.force_requirement(predicate::anonymous(check), message)
    }

    /// Appends a forced rule whose verdict arrives asynchronously.
    ///
    /// ```rust,ignore
    /// let username = RuleSet::new().is_required().is_eventually_validated_by(
    ///     |value, _| async move { !directory.exists(value.as_str().unwrap_or_default()).await },
    ///     "{name} is already taken",
    /// );
    /// ```
    pub fn is_eventually_validated_by<F, Fut>(&self, check: F, message: impl Into<String>) -> Self
    where
        F: Fn(Arc<Value>, Arc<FieldValues>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        self.force_unit(None, EventualUnit::new(check, message))
    }
}

/// Keeps forced rules and the first non-forced rule per key.
fn dedup(rules: impl IntoIterator<Item = Rule>) -> Vec<Rule> {
    let mut seen: HashSet<RuleKey> = HashSet::new();
    let mut kept = Vec::new();

    for rule in rules {
        if let Some(key) = rule.key() {
            if seen.contains(key) && !rule.is_forced() {
                tracing::trace!(%key, "dropping duplicate rule");
                continue;
            }
            seen.insert(key.clone());
        }
        kept.push(rule);
    }

    kept
}
