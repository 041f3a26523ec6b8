use nebula_rules::prelude::*;
use pretty_assertions::assert_eq;

fn keys(set: &RuleSet) -> Vec<Option<RuleKey>> {
    set.keys().map(|k| k.cloned()).collect()
}

#[test]
fn merging_a_set_with_itself_is_idempotent() {
    let set = RuleSet::new().is_required().is_email().contains("@acme.com");

    for copies in 1..=4 {
        let merged = RuleSet::merge(std::iter::repeat_n(&set, copies));
        assert_eq!(keys(&merged), keys(&set), "{copies} copies");
    }
}

#[test]
fn forced_rules_bypass_dedup() {
    let check = |value: &Value, _: &FieldValues| value.is_string();
    let forced = RuleSet::new()
        .is_validated_by(check, "{name} must be text")
        .is_validated_by(check, "{name} must be text");
    assert_eq!(forced.len(), 2);

    let required = RuleSet::new().is_required().is_required();
    assert_eq!(required.len(), 1);
}

#[test]
fn merging_keeps_every_forced_rule() {
    let check = |value: &Value, _: &FieldValues| !value.is_null();
    let set = RuleSet::new().is_required().is_validated_by(check, "x");
    let merged = RuleSet::merge([&set, &set]);
    assert_eq!(keys(&merged), vec![Some(RuleKey::Required), None, None]);
}

#[test]
fn set_requirement_with_present_key_returns_same_rules() {
    let set = RuleSet::new().is_required().is_email();
    let again = set.set_requirement(truthy(), "ignored");
    assert!(again.same_rules(&set));
    assert_eq!(again.len(), 2);
}

#[test]
fn keyed_closures_dedup_by_tag() {
    let no_spaces = || {
        from_fn(RuleKey::named("no_spaces"), |value, _| {
            value.as_str().is_some_and(|s| !s.contains(' '))
        })
    };
    let set = RuleSet::new()
        .set_requirement(no_spaces(), "{name} must not contain spaces")
        .set_requirement(no_spaces(), "{name} must not contain spaces");
    assert_eq!(keys(&set), vec![Some(RuleKey::named("no_spaces"))]);
}

#[test]
fn composition_from_several_code_paths() {
    // Two independent layers both ask for "required".
    let from_schema = RuleSet::new().is_required();
    let from_form = RuleSet::new().is_required().is_email();
    let combined = RuleSet::merge([&from_schema, &from_form]);
    assert_eq!(keys(&combined), vec![Some(RuleKey::Required), Some(RuleKey::Email)]);

    // Inputs stay untouched.
    assert_eq!(from_schema.len(), 1);
    assert_eq!(from_form.len(), 2);
}
