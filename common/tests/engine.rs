//! End-to-end checks of the template variable engine.

use common::error::ValidationError;
use common::field::{FilledTemplate, fill_template};
use common::model::place_holder::FieldKind;
use common::placeholder::{extract, substitute};
use pretty_assertions::assert_eq;
use std::collections::{BTreeMap, HashMap};

fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

const LEASE: &str = "RESIDENTIAL LEASE AGREEMENT

This Lease Agreement is made on {date} between:

Landlord: {landlord_name}
Tenant: {tenant_name}

The lease term is from {start_date} to {end_date}.
Monthly rent is {rent_amount}, due on the {due_day} of each month.
A security deposit of {deposit_amount} is required.

Landlord: {landlord_name}";

#[test]
fn fills_the_rent_reminder() {
    let filled = fill_template(
        "Pay {rent_amount} by {due_date} to {landlord_name}.",
        &form(&[
            ("rent_amount", "1200"),
            ("due_date", "2025-01-01"),
            ("landlord_name", "Acme LLC"),
        ]),
        &BTreeMap::new(),
    )
    .unwrap();

    assert_eq!(filled.content, "Pay $1200 by January 01, 2025 to Acme LLC.");
}

#[test]
fn fills_a_full_lease() {
    let filled = fill_template(
        LEASE,
        &form(&[
            ("date", "2024-06-01"),
            ("landlord_name", "Acme LLC"),
            ("tenant_name", "Jo Park"),
            ("start_date", "2024-07-01"),
            ("end_date", "2025-06-30"),
            ("rent_amount", "1850"),
            ("rent_amount_currency", "€"),
            ("due_day", "1st"),
            ("deposit_amount", "3700"),
        ]),
        &BTreeMap::new(),
    )
    .unwrap();

    assert!(extract(&filled.content).is_empty());
    assert!(filled.content.contains("made on June 01, 2024 between"));
    assert!(filled.content.contains("from July 01, 2024 to June 30, 2025"));
    assert!(filled.content.contains("Monthly rent is €1850, due on the 1st"));
    assert!(filled.content.contains("deposit of $3700 is required"));
    assert_eq!(filled.content.matches("Acme LLC").count(), 2);
    assert_eq!(filled.variables.len(), 8);
}

#[test]
fn first_invalid_field_in_body_order_is_reported() {
    let err = fill_template(
        LEASE,
        &form(&[
            ("date", "2024-06-01"),
            ("start_date", "July"),
            ("rent_amount", "lots"),
        ]),
        &BTreeMap::new(),
    )
    .unwrap_err();

    assert_eq!(err, ValidationError::InvalidDate("start_date".to_string()));
    assert_eq!(
        err.to_string(),
        "Invalid date format for Start Date. Please use a valid date."
    );
}

#[test]
fn declared_kinds_fix_heuristic_misreads() {
    let body = "Pay by {payment_method} on {payment_schedule}.";
    let inputs = form(&[
        ("payment_method", "wire transfer"),
        ("payment_schedule", "the first Monday"),
    ]);

    let err = fill_template(body, &inputs, &BTreeMap::new()).unwrap_err();
    assert_eq!(err, ValidationError::InvalidNumber("payment_method".to_string()));

    let declared: BTreeMap<String, FieldKind> = [
        ("payment_method".to_string(), FieldKind::Plain),
        ("payment_schedule".to_string(), FieldKind::Plain),
    ]
    .into_iter()
    .collect();
    let FilledTemplate { content, .. } = fill_template(body, &inputs, &declared).unwrap();
    assert_eq!(content, "Pay by wire transfer on the first Monday.");
}

#[test]
fn extraction_is_stable() {
    let first = extract(LEASE);
    assert_eq!(extract(LEASE), first);
    assert_eq!(
        first,
        vec![
            "date",
            "landlord_name",
            "tenant_name",
            "start_date",
            "end_date",
            "rent_amount",
            "due_day",
            "deposit_amount",
        ]
    );
}

#[test]
fn substitution_clears_every_token_of_a_name() {
    for name in extract(LEASE) {
        let filled = substitute(LEASE, [(name.as_str(), "VALUE")]);
        assert!(!filled.contains(&format!("{{{name}}}")), "{name} left behind");
        assert!(filled.contains("VALUE"));
    }
}

#[test]
fn substitution_without_values_is_identity() {
    let none: [(&str, &str); 0] = [];
    assert_eq!(substitute(LEASE, none), LEASE);
}
