use nebula_rules::prelude::*;
use nebula_rules::RulesError;
use pretty_assertions::assert_eq;
use serde_json::json;

const FRENCH: &str = r#"{
    "required": "{name} est obligatoire.",
    "contains": "{name} doit contenir « {needle} »."
}"#;

#[tokio::test]
async fn catalog_drives_default_messages() {
    let messages = RuleMessages::from_json(FRENCH).unwrap();
    let set = RuleSet::new()
        .with_messages(messages)
        .is_required()
        .is_email()
        .contains("@acme.fr");

    let state = set.run_validation(json!(""), FieldValues::new(), "Courriel").await;
    assert_eq!(
        state.messages,
        vec![
            "Courriel est obligatoire.".to_string(),
            "Not a valid email".to_string(),
            "Courriel doit contenir « @acme.fr ».".to_string(),
        ]
    );
}

#[tokio::test]
async fn explicit_message_overrides_catalog() {
    let set = RuleSet::new().is_required_with("Please fill in {name}");
    let state = set.run_validation(json!(null), FieldValues::new(), "City").await;
    assert_eq!(state.messages, vec!["Please fill in City".to_string()]);
}

#[test]
fn catalog_rejects_unfillable_placeholders() {
    let err = RuleMessages::from_json(r#"{ "email": "{needle}?" }"#).unwrap_err();
    assert!(matches!(err, RulesError::UnknownPlaceholder { .. }));
    assert_eq!(err.template(), Some("{needle}?"));
}
