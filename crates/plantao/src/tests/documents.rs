//! Tests for fail-soft document reading

use plantao_core::model::{OccurrenceId, WorkStatus};
use serde_json::json;

use super::fixtures::{memory_planner, wednesday_draft};
use crate::documents::{DocumentKeys, Documents};
use crate::platform::{MemoryStorage, Storage};

fn documents() -> Documents<MemoryStorage> {
    Documents::new(MemoryStorage::new(), DocumentKeys::default())
}

#[test]
fn test_key_names() {
    let keys = DocumentKeys::default();
    assert_eq!(keys.shifts(), "plantonmed_shifts");
    assert_eq!(keys.sporadic_shifts(), "plantonmed_sporadic_shifts");
    assert_eq!(keys.sporadic_estimate(), "plantonmed_sporadic_estimate");
    assert_eq!(keys.work_statuses(), "plantonmed_shift_statuses");
    assert_eq!(keys.payment_statuses(), "plantonmed_payment_statuses");
    assert_eq!(keys.profile(), "plantonmed_profile");
}

#[test]
fn test_missing_documents_are_defaults() {
    let docs = documents();
    let inputs = docs.inputs().unwrap();
    assert!(inputs.shifts.fixed_shifts.is_empty());
    assert!(inputs.sporadic.is_empty());
    assert!(inputs.estimate.is_none());
    assert!(inputs.statuses.work.is_empty());
    assert_eq!(docs.profile().unwrap().goal(), 0.0);
}

#[test]
fn test_unparseable_text_reads_as_absent() {
    let docs = documents();
    docs.storage().set_raw("plantonmed_shifts", "{\"fixedShifts\": [");
    docs.storage().set_raw("plantonmed_profile", "undefined");
    assert!(docs.shifts().unwrap().fixed_shifts.is_empty());
    assert_eq!(docs.profile().unwrap().goal(), 0.0);
}

#[test]
fn test_broken_document_is_replaced_on_next_write() {
    let planner = memory_planner();
    planner
        .documents()
        .storage()
        .set_raw("plantonmed_shifts", "not json");

    planner.add_fixed_shift(wednesday_draft()).unwrap();
    assert_eq!(planner.documents().shifts().unwrap().fixed_shifts.len(), 1);
}

#[test]
fn test_null_document_reads_as_absent() {
    let docs = documents();
    docs.storage().set_raw("plantonmed_sporadic_estimate", "null");
    assert!(docs.sporadic_estimate().unwrap().is_none());
}

#[test]
fn test_legacy_estimate_in_sporadic_key_reads_as_empty() {
    let docs = documents();
    docs.storage()
        .set(
            "plantonmed_sporadic_shifts",
            &json!({ "averageShiftsPerMonth": "4", "averageNetValue": "800" }),
        )
        .unwrap();
    assert!(docs.sporadic_shifts().unwrap().is_empty());
}

#[test]
fn test_broken_entries_do_not_hide_the_rest() {
    let docs = documents();
    docs.storage()
        .set(
            "plantonmed_sporadic_shifts",
            &json!([
                "garbage",
                { "id": "a", "hospital": "HC", "date": "2024-03-10" },
                { "id": "b", "hospital": "HC", "date": "10/03/2024" },
            ]),
        )
        .unwrap();
    let list = docs.sporadic_shifts().unwrap();
    assert_eq!(list.len(), 2);
    assert!(list[0].date.is_some());
    // an unreadable date keeps the entry but it is never placed
    assert!(list[1].date.is_none());
}

#[test]
fn test_explicit_pending_entries_are_dropped() {
    let docs = documents();
    docs.storage()
        .set(
            "plantonmed_shift_statuses",
            &json!({ "x-2024-03-06": "pending", "x-2024-03-13": "completed", "y": "bogus" }),
        )
        .unwrap();

    let work = docs.work_statuses().unwrap();
    assert_eq!(work.len(), 1);
    assert_eq!(
        work.get(&OccurrenceId::from_raw("x-2024-03-13")),
        WorkStatus::Completed
    );

    docs.save_work_statuses(&work).unwrap();
    assert_eq!(
        docs.storage().get("plantonmed_shift_statuses").unwrap(),
        Some(json!({ "x-2024-03-13": "completed" }))
    );
}
