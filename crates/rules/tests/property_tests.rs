//! Property-based tests for nebula-rules.

use nebula_rules::prelude::*;
use nebula_rules::predicate::is_truthy;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Required,
    Email,
    Contains(String),
    Forced,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Required),
        Just(Step::Email),
        "[a-c]{1,2}".prop_map(Step::Contains),
        Just(Step::Forced),
    ]
}

fn build(steps: &[Step]) -> RuleSet {
    steps.iter().fold(RuleSet::new(), |set, step| match step {
        Step::Required => set.is_required(),
        Step::Email => set.is_email(),
        Step::Contains(needle) => set.contains(needle.clone()),
        Step::Forced => set.is_validated_by(|_, _| true, "forced"),
    })
}

fn non_forced_keys(set: &RuleSet) -> Vec<RuleKey> {
    set.rules()
        .iter()
        .filter(|rule| !rule.is_forced())
        .filter_map(|rule| rule.key().cloned())
        .collect()
}

// ============================================================================
// DEDUP
// ============================================================================

proptest! {
    #[test]
    fn merge_with_self_is_idempotent(steps in prop::collection::vec(step(), 0..12), copies in 1usize..5) {
        let set = build(&steps);
        let merged = RuleSet::merge(std::iter::repeat_n(&set, copies));
        prop_assert_eq!(non_forced_keys(&merged), non_forced_keys(&set));
    }

    #[test]
    fn non_forced_keys_are_unique(steps in prop::collection::vec(step(), 0..12)) {
        let keys = non_forced_keys(&build(&steps));
        let unique: std::collections::HashSet<_> = keys.iter().collect();
        prop_assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn forced_rules_are_never_dropped(steps in prop::collection::vec(step(), 0..12)) {
        let set = build(&steps);
        let forced_steps = steps.iter().filter(|s| matches!(s, Step::Forced)).count();
        let forced_rules = set.rules().iter().filter(|r| r.is_forced()).count();
        prop_assert_eq!(forced_rules, forced_steps);
    }
}

// ============================================================================
// PRIMITIVES
// ============================================================================

proptest! {
    #[test]
    fn non_empty_strings_are_truthy(s in ".+") {
        prop_assert!(is_truthy(&Value::String(s)));
    }

    #[test]
    fn non_zero_integers_are_truthy(n in any::<i64>().prop_filter("non-zero", |n| *n != 0)) {
        prop_assert!(is_truthy(&Value::from(n)));
    }
}
