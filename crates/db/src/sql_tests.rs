//! Unit tests for the pure SQL fragment builders.
//!
//! Nothing here touches a database — the builders return a clause string
//! plus bind values, so placeholder numbering and column mapping are
//! asserted directly.  Tests that need a real Postgres instance live in
//! `tests/integration.rs` and are ignored by default.

use sqlx::types::BigDecimal;
use std::str::FromStr;

use crate::repository::companies::CompanyPatch;
use crate::repository::jobs::JobPatch;
use crate::sql::{filter_clause, set_clause, CompanyFilter, SqlValue};
use crate::DbError;

// ============================================================
// set_clause
// ============================================================

#[test]
fn set_clause_numbers_placeholders_in_pair_order() {
    let fragment = set_clause(vec![
        ("title", SqlValue::Text("Engineer".into())),
        ("salary", SqlValue::Int(90_000)),
    ])
    .expect("two pairs should build");

    assert_eq!(fragment.clause, "title = $1, salary = $2");
    assert_eq!(
        fragment.values,
        vec![SqlValue::Text("Engineer".into()), SqlValue::Int(90_000)]
    );
    assert_eq!(fragment.next_placeholder(), 3);
}

#[test]
fn set_clause_rejects_an_empty_patch() {
    let err = set_clause(Vec::new()).unwrap_err();
    assert!(matches!(err, DbError::BadRequest(_)));
}

#[test]
fn job_patch_maps_only_supplied_fields() {
    let patch = JobPatch {
        salary: Some(500),
        ..JobPatch::default()
    };

    let fragment = set_clause(patch.into_pairs()).expect("one pair should build");
    assert_eq!(fragment.clause, "salary = $1");
    assert_eq!(fragment.values, vec![SqlValue::Int(500)]);
}

#[test]
fn job_patch_keeps_declaration_order_for_full_updates() {
    let equity = BigDecimal::from_str("0.125").unwrap();
    let patch = JobPatch {
        title: Some("Staff Engineer".into()),
        salary: Some(180_000),
        equity: Some(equity.clone()),
    };

    let fragment = set_clause(patch.into_pairs()).expect("three pairs should build");
    assert_eq!(fragment.clause, "title = $1, salary = $2, equity = $3");
    assert_eq!(fragment.values[2], SqlValue::Numeric(equity));
}

#[test]
fn company_patch_maps_its_snake_case_columns() {
    let patch = CompanyPatch {
        num_employees: Some(42),
        logo_url: Some("https://example.com/logo.png".into()),
        ..CompanyPatch::default()
    };

    let fragment = set_clause(patch.into_pairs()).expect("two pairs should build");
    assert_eq!(fragment.clause, "num_employees = $1, logo_url = $2");
}

// ============================================================
// filter_clause
// ============================================================

#[test]
fn empty_filter_builds_an_empty_fragment() {
    let fragment = filter_clause(&CompanyFilter::default()).expect("empty filter is valid");
    assert_eq!(fragment.clause, "");
    assert!(fragment.values.is_empty());
}

#[test]
fn inverted_employee_bounds_are_rejected() {
    let filter = CompanyFilter {
        min_employees: Some(5),
        max_employees: Some(2),
        name: None,
    };

    let err = filter_clause(&filter).unwrap_err();
    assert!(matches!(err, DbError::BadRequest(_)));
}

#[test]
fn equal_employee_bounds_are_allowed() {
    let filter = CompanyFilter {
        min_employees: Some(3),
        max_employees: Some(3),
        name: None,
    };

    let fragment = filter_clause(&filter).expect("equal bounds are valid");
    assert_eq!(
        fragment.clause,
        "num_employees >= $1 AND num_employees <= $2"
    );
}

#[test]
fn name_filter_uses_case_insensitive_substring_match() {
    let filter = CompanyFilter {
        name: Some("net".into()),
        ..CompanyFilter::default()
    };

    let fragment = filter_clause(&filter).expect("name-only filter is valid");
    assert_eq!(fragment.clause, "name ILIKE $1");
    assert_eq!(fragment.values, vec![SqlValue::Text("%net%".into())]);
}

#[test]
fn placeholder_numbering_skips_absent_fields() {
    let filter = CompanyFilter {
        min_employees: None,
        max_employees: Some(100),
        name: Some("net".into()),
    };

    let fragment = filter_clause(&filter).expect("partial filter is valid");
    assert_eq!(fragment.clause, "num_employees <= $1 AND name ILIKE $2");
    assert_eq!(
        fragment.values,
        vec![SqlValue::Int(100), SqlValue::Text("%net%".into())]
    );
}

#[test]
fn full_filter_joins_conditions_with_and() {
    let filter = CompanyFilter {
        min_employees: Some(10),
        max_employees: Some(500),
        name: Some("corp".into()),
    };

    let fragment = filter_clause(&filter).expect("full filter is valid");
    assert_eq!(
        fragment.clause,
        "num_employees >= $1 AND num_employees <= $2 AND name ILIKE $3"
    );
    assert_eq!(fragment.values.len(), 3);
}
