//! Execution units: the runnable form of a rule.
//!
//! Every rule, sync or async, is turned into an [`ExecutionUnit`] when it is
//! added to a [`RuleSet`](crate::RuleSet). Running a unit yields a boxed
//! future that settles exactly once, either [`Outcome::Passed`] or
//! [`Outcome::Failed`] with exactly one formatted message.
//!
//! - [`SimpleUnit`] wraps a synchronous [`Predicate`]
//! - [`EventualUnit`] wraps an async predicate returning `bool`
//! - [`CustomUnit`] wraps an arbitrary async closure that builds its own
//!   [`Outcome`]

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{self, BoxFuture};
use serde_json::Value;

use crate::message::{self, NAME};
use crate::predicate::{FieldValues, Predicate};

/// Everything a unit sees during one run.
///
/// All three parts are reference counted so every unit of a run can hold
/// them past the first `.await`.
#[derive(Debug, Clone)]
pub struct RuleInput {
    /// The value under test.
    pub value: Arc<Value>,
    /// Every field value of the enclosing record.
    pub all_values: Arc<FieldValues>,
    /// Display name used for `{name}`.
    pub field_name: Arc<str>,
}

impl RuleInput {
    /// Bundles the inputs of a run.
    pub fn new(value: Value, all_values: FieldValues, field_name: &str) -> Self {
        Self {
            value: Arc::new(value),
            all_values: Arc::new(all_values),
            field_name: Arc::from(field_name),
        }
    }

    /// Formats `template` with this input's field name.
    #[must_use]
    pub fn failure(&self, template: &str) -> Outcome {
        self.failure_with(template, &[])
    }

    /// Formats `template` with the field name and `params` in one pass, so
    /// substituted text is never scanned for placeholders again.
    #[must_use]
    pub fn failure_with(&self, template: &str, params: &[(&str, &str)]) -> Outcome {
        let mut substitutions = Vec::with_capacity(params.len() + 1);
        substitutions.push((NAME, &*self.field_name));
        substitutions.extend_from_slice(params);
        Outcome::Failed(message::format_message(template, &substitutions))
    }
}

/// How a single rule settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The value satisfies the rule.
    Passed,
    /// The value fails the rule; carries the formatted message.
    Failed(String),
}

impl Outcome {
    /// Returns `true` for [`Outcome::Passed`].
    #[must_use]
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// The failure message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Passed => None,
            Self::Failed(message) => Some(message),
        }
    }
}

/// A rule in runnable form.
///
/// Implementations must not panic; a failing check is reported as
/// [`Outcome::Failed`].
pub trait ExecutionUnit: Send + Sync {
    /// Starts checking `input`. The returned future owns everything it needs.
    fn execute(&self, input: RuleInput) -> BoxFuture<'static, Outcome>;
}

// ============================================================================
// SIMPLE UNIT
// ============================================================================

/// Unit around a synchronous predicate. Settles on first poll.
pub struct SimpleUnit<P> {
    predicate: P,
    template: String,
    params: Vec<(&'static str, String)>,
}

impl<P> SimpleUnit<P> {
    /// Wraps `predicate`; `template` is formatted with `{name}` on failure.
    pub fn new(predicate: P, template: impl Into<String>) -> Self {
        Self {
            predicate,
            template: template.into(),
            params: Vec::new(),
        }
    }

    /// Adds a `{key}` substitution applied together with `{name}` on failure.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    /// The unformatted failure template.
    pub fn template(&self) -> &str {
        &self.template
    }
}

impl<P: fmt::Debug> fmt::Debug for SimpleUnit<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleUnit")
            .field("predicate", &self.predicate)
            .field("template", &self.template)
            .field("params", &self.params)
            .finish()
    }
}

impl<P: Predicate> ExecutionUnit for SimpleUnit<P> {
    fn execute(&self, input: RuleInput) -> BoxFuture<'static, Outcome> {
        let outcome = if self.predicate.test(&input.value, &input.all_values) {
            Outcome::Passed
        } else {
            let params: Vec<(&str, &str)> =
                self.params.iter().map(|(k, v)| (*k, v.as_str())).collect();
            input.failure_with(&self.template, &params)
        };
        future::ready(outcome).boxed()
    }
}

// ============================================================================
// EVENTUAL UNIT
// ============================================================================

type AsyncCheck = dyn Fn(Arc<Value>, Arc<FieldValues>) -> BoxFuture<'static, bool> + Send + Sync;

/// Unit around an async predicate that settles whenever its future does.
pub struct EventualUnit {
    check: Arc<AsyncCheck>,
    template: Arc<str>,
}

impl EventualUnit {
    /// Wraps `check`; a `false` result is reported with `template`.
    pub fn new<F, Fut>(check: F, template: impl Into<String>) -> Self
    where
        F: Fn(Arc<Value>, Arc<FieldValues>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Self {
            check: Arc::new(move |value: Arc<Value>, all_values: Arc<FieldValues>| {
                check(value, all_values).boxed()
            }),
            template: Arc::from(template.into()),
        }
    }
}

impl fmt::Debug for EventualUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventualUnit")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

impl ExecutionUnit for EventualUnit {
    fn execute(&self, input: RuleInput) -> BoxFuture<'static, Outcome> {
        let pending = (self.check)(Arc::clone(&input.value), Arc::clone(&input.all_values));
        let template = Arc::clone(&self.template);
        async move {
            if pending.await {
                Outcome::Passed
            } else {
                input.failure(&template)
            }
        }
        .boxed()
    }
}

// ============================================================================
// CUSTOM UNIT
// ============================================================================

type CustomCheck = dyn Fn(RuleInput) -> BoxFuture<'static, Outcome> + Send + Sync;

/// Unit around an async closure that produces its own [`Outcome`].
///
/// Use [`RuleInput::failure`] inside the closure to format a message with
/// the field name.
pub struct CustomUnit {
    check: Box<CustomCheck>,
}

impl CustomUnit {
    /// Wraps `check`.
    pub fn new<F, Fut>(check: F) -> Self
    where
        F: Fn(RuleInput) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Outcome> + Send + 'static,
    {
        Self {
            check: Box::new(move |input: RuleInput| check(input).boxed()),
        }
    }
}

impl fmt::Debug for CustomUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomUnit").finish_non_exhaustive()
    }
}

impl ExecutionUnit for CustomUnit {
    fn execute(&self, input: RuleInput) -> BoxFuture<'static, Outcome> {
        (self.check)(input)
    }
}
