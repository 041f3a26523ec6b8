//! Running a rule set against a value.

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use serde::{Deserialize, Serialize};

use crate::predicate::{FieldValues, Value};
use crate::rule_set::RuleSet;
use crate::unit::{Outcome, RuleInput};

/// Snapshot of a rule set's latest result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationState {
    /// `true` until a run has settled.
    pub waiting: bool,
    /// Verdict of the latest settled run.
    pub valid: Option<bool>,
    /// One message per failing rule, in the order the rules settled.
    pub messages: Vec<String>,
}

impl ValidationState {
    fn waiting() -> Self {
        Self {
            waiting: true,
            valid: None,
            messages: Vec::new(),
        }
    }

    fn settled(messages: Vec<String>) -> Self {
        Self {
            waiting: false,
            valid: Some(messages.is_empty()),
            messages,
        }
    }

    /// Returns `true` while no run has settled.
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    /// Returns `true` if the latest run passed every rule.
    pub fn is_valid(&self) -> bool {
        self.valid == Some(true)
    }

    /// Returns `true` if the latest run failed at least one rule.
    pub fn is_invalid(&self) -> bool {
        self.valid == Some(false)
    }
}

impl Default for ValidationState {
    fn default() -> Self {
        Self::waiting()
    }
}

/// Mutable result slot owned by each [`RuleSet`].
#[derive(Debug, Default)]
pub(crate) struct RunState {
    generation: u64,
    valid: Option<bool>,
    messages: Vec<String>,
}

impl RuleSet {
    /// Checks `value` against every rule and waits until all of them settle.
    ///
    /// All rules run concurrently. A failing rule never stops the others, so
    /// the result lists every applicable message. Messages appear in the
    /// order the rules settled: synchronous rules settle in declaration
    /// order, async rules whenever their future completes.
    ///
    /// The set's state is reset to waiting when the run starts and updated
    /// when it ends, unless a newer run has started in the meantime. The
    /// returned snapshot is always the result of this run.
    pub async fn run_validation(
        &self,
        value: Value,
        all_values: FieldValues,
        field_name: &str,
    ) -> ValidationState {
        let generation = {
            let mut state = self.state.lock();
            state.generation = state.generation.wrapping_add(1);
            state.valid = None;
            state.messages.clear();
            state.generation
        };

        tracing::debug!(
            field = field_name,
            rules = self.rules.len(),
            generation,
            "validation run started"
        );

        let input = RuleInput::new(value, all_values, field_name);
        let mut pending: FuturesUnordered<_> = self
            .rules
            .iter()
            .map(|rule| rule.unit().execute(input.clone()))
            .collect();

        let mut messages = Vec::new();
        while let Some(outcome) = pending.next().await {
            if let Outcome::Failed(message) = outcome {
                tracing::trace!(field = field_name, %message, "rule failed");
                messages.push(message);
            }
        }

        let settled = ValidationState::settled(messages);
        tracing::debug!(
            field = field_name,
            valid = settled.is_valid(),
            failures = settled.messages.len(),
            generation,
            "validation run settled"
        );

        let mut state = self.state.lock();
        if state.generation == generation {
            state.valid = settled.valid;
            state.messages.clone_from(&settled.messages);
        } else {
            tracing::debug!(
                field = field_name,
                generation,
                latest = state.generation,
                "discarding superseded validation run"
            );
        }

        settled
    }

    /// Snapshot of the latest settled run, or the waiting state.
    pub fn state(&self) -> ValidationState {
        let state = self.state.lock();
        match state.valid {
            None => ValidationState::waiting(),
            Some(valid) => ValidationState {
                waiting: false,
                valid: Some(valid),
                messages: state.messages.clone(),
            },
        }
    }
}
