//! # nebula-rules
//!
//! Composable, asynchronous validation rules for a single field.
//!
//! A [`RuleSet`] is an immutable, ordered collection of rules. Builder
//! methods never mutate the set they are called on; each one returns a new
//! set with one more rule (or the same rules, when the new rule is a
//! duplicate of one already present).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nebula_rules::prelude::*;
//! use serde_json::json;
//!
//! let email = RuleSet::new().is_required().is_email();
//!
//! let state = email.run_validation(json!(""), FieldValues::new(), "Email").await;
//! assert_eq!(state.valid, Some(false));
//! assert!(state.messages.contains(&"Email is required.".to_string()));
//! ```
//!
//! ## Deduplication
//!
//! Every built-in predicate carries a stable [`RuleKey`]. Adding a rule whose
//! key is already present is a no-op, so several code paths can each ask for
//! "required" without producing duplicate messages. Forced rules
//! ([`RuleSet::is_validated_by`], [`RuleSet::force_requirement`], ...) are
//! never collapsed.
//!
//! ## Execution
//!
//! [`RuleSet::run_validation`] drives every rule concurrently, waits for all
//! of them to settle and collects one message per failing rule in the order
//! the rules settled.

mod engine;
pub mod error;
mod macros;
pub mod message;
pub mod predicate;
pub mod prelude;
pub mod rule;
pub mod rule_set;
pub mod unit;

pub use engine::ValidationState;
pub use error::{RulesError, RulesResult};
pub use message::RuleMessages;
pub use predicate::{FieldValues, Predicate};
pub use rule::{Rule, RuleKey};
pub use rule_set::RuleSet;
pub use unit::{CustomUnit, EventualUnit, ExecutionUnit, Outcome, RuleInput, SimpleUnit};
