//! Validates a few sign-up form values and prints the results.
//!
//! ```sh
//! RUST_LOG=nebula_rules=debug cargo run -p nebula-rules --example signup_field
//! ```

use std::time::Duration;

use nebula_rules::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

const TAKEN: &[&str] = &["admin@acme.com", "root@acme.com"];

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let email = RuleSet::new()
        .is_required()
        .is_email()
        .contains("@acme.com")
        .is_eventually_validated_by(
            |value, _| async move {
                // Stand-in for a directory lookup.
                tokio::time::sleep(Duration::from_millis(25)).await;
                !value.as_str().is_some_and(|s| TAKEN.contains(&s))
            },
            "{name} is already registered",
        );

    let mut form = FieldValues::new();
    for candidate in ["", "ada@example.org", "admin@acme.com", "ada@acme.com"] {
        form.insert("email".into(), json!(candidate));
        let state = email
            .run_validation(json!(candidate), form.clone(), "Email")
            .await;

        match serde_json::to_string(&state) {
            Ok(line) => println!("{candidate:>16} -> {line}"),
            Err(err) => eprintln!("cannot render state: {err}"),
        }
    }
}
