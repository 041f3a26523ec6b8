//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use nebula_rules::prelude::*;
//!
//! let email = RuleSet::new().is_required().is_email();
//! ```

pub use crate::engine::ValidationState;
pub use crate::message::RuleMessages;
pub use crate::predicate::{FieldValues, Predicate, Value, contains, email, from_fn, truthy};
pub use crate::rule::{Rule, RuleKey};
pub use crate::rule_set::RuleSet;
pub use crate::unit::{CustomUnit, ExecutionUnit, Outcome, RuleInput};
