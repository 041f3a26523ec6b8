use std::sync::Arc;
use std::time::Duration;

use nebula_rules::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn no_values() -> FieldValues {
    FieldValues::new()
}

#[tokio::test]
async fn valid_email_passes_every_rule() {
    let set = RuleSet::new().is_required().is_email();
    set.run_validation(json!("a@b.com"), no_values(), "Email").await;

    assert_eq!(
        set.state(),
        ValidationState {
            waiting: false,
            valid: Some(true),
            messages: vec![],
        }
    );
}

#[tokio::test]
async fn empty_value_reports_every_failure() {
    let set = RuleSet::new().is_required().is_email();
    let state = set.run_validation(json!(""), no_values(), "Email").await;

    assert_eq!(state.valid, Some(false));
    assert_eq!(state.messages.len(), 2);
    assert!(state.messages.contains(&"Email is required.".to_string()));
    assert!(state.messages.contains(&"Not a valid email".to_string()));
}

#[tokio::test]
async fn field_name_is_substituted() {
    let set = RuleSet::new().is_required();
    let state = set.run_validation(json!(""), no_values(), "Email").await;
    assert_eq!(state.messages, vec!["Email is required.".to_string()]);
}

#[tokio::test]
async fn contains_substitutes_needle() {
    let set = RuleSet::new().contains("foo");

    let state = set.run_validation(json!("xfoox"), no_values(), "Bio").await;
    assert!(state.is_valid());

    let state = set.run_validation(json!("bar"), no_values(), "Bio").await;
    assert!(state.is_invalid());
    assert_eq!(state.messages, vec!["Bio must contain \"foo.\"".to_string()]);
}

#[tokio::test]
async fn contains_reports_needle_verbatim() {
    let set = RuleSet::new().contains("{name}");

    let state = set.run_validation(json!("x"), no_values(), "Bio").await;
    assert_eq!(state.messages, vec!["Bio must contain \"{name}.\"".to_string()]);

    let state = set.run_validation(json!("say {name}"), no_values(), "Bio").await;
    assert!(state.is_valid());
}

#[tokio::test]
async fn run_waits_for_slowest_rule() {
    let set = RuleSet::new().is_required().is_eventually_validated_by(
        |_, _| async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            true
        },
        "{name} is taken",
    );

    let state = set.run_validation(json!("ada"), no_values(), "Username").await;
    assert_eq!(state.valid, Some(true));
    assert!(!state.waiting);
}

#[tokio::test]
async fn messages_follow_settlement_order() {
    let set = RuleSet::new()
        .is_eventually_validated_by(
            |_, _| async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                false
            },
            "slow: {name}",
        )
        .is_required();

    let state = set.run_validation(json!(null), no_values(), "Field").await;
    assert_eq!(
        state.messages,
        vec!["Field is required.".to_string(), "slow: Field".to_string()]
    );
}

#[tokio::test]
async fn sync_failures_keep_declaration_order() {
    let set = RuleSet::new()
        .is_email()
        .contains("x")
        .is_required();

    let state = set.run_validation(json!(""), no_values(), "F").await;
    assert_eq!(
        state.messages,
        vec![
            "Not a valid email".to_string(),
            "F must contain \"x.\"".to_string(),
            "F is required.".to_string(),
        ]
    );
}

#[tokio::test]
async fn custom_predicates_see_all_values() {
    let set = RuleSet::new().is_validated_by(
        |value, all| all.get("password") == Some(value),
        "{name} must match the password",
    );

    let mut all = FieldValues::new();
    all.insert("password".into(), json!("hunter2"));

    let state = set.run_validation(json!("hunter2"), all.clone(), "Confirm").await;
    assert!(state.is_valid());

    let state = set.run_validation(json!("hunter3"), all, "Confirm").await;
    assert_eq!(state.messages, vec!["Confirm must match the password".to_string()]);
}

#[tokio::test]
async fn rule_sets_run_on_other_tasks() {
    let set = Arc::new(RuleSet::new().is_required().is_email());

    let handles: Vec<_> = ["a@b.com", "", "nope"]
        .into_iter()
        .map(|value| {
            let set = Arc::clone(&set);
            tokio::spawn(async move { set.run_validation(json!(value), FieldValues::new(), "Email").await })
        })
        .collect();

    let mut verdicts = Vec::new();
    for handle in handles {
        verdicts.push(handle.await.unwrap().valid);
    }
    assert_eq!(verdicts, vec![Some(true), Some(false), Some(false)]);
}

#[test]
fn runs_without_a_tokio_runtime() {
    let set = RuleSet::new().is_required().contains("@");
    let state = futures::executor::block_on(set.run_validation(json!("a@b"), no_values(), "x"));
    assert!(state.is_valid());
}
