//! Property-based wire-format tests for the row types.
//!
//! Uses proptest to verify:
//! 1. Any valid `Task` survives a JSON encode -> decode round-trip.
//! 2. Any status string deserializes without a panic (unrecognized values
//!    land on `Unknown`).
//! 3. `TaskPatch` serializes exactly the fields it carries.
//! 4. Patch application is idempotent and never touches backend-owned
//!    fields.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;
use zudio_types::{Task, TaskId, TaskPatch, TaskPriority, TaskStatus};

// --- Strategies for row types ---

/// Strategy for generating arbitrary `TaskId` values.
fn arb_task_id() -> impl Strategy<Value = TaskId> {
    any::<u128>().prop_map(|n| TaskId::from_uuid(Uuid::from_u128(n)))
}

/// Strategy for generating arbitrary `TaskStatus` values (wire variants only).
fn arb_status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Todo),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Review),
        Just(TaskStatus::Done),
    ]
}

/// Strategy for generating arbitrary `TaskPriority` values.
fn arb_priority() -> impl Strategy<Value = TaskPriority> {
    prop_oneof![
        Just(TaskPriority::Low),
        Just(TaskPriority::Medium),
        Just(TaskPriority::High),
        Just(TaskPriority::Urgent),
    ]
}

/// Strategy for generating timestamps within the backend's plausible range.
fn arb_datetime() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_102_444_800).prop_map(|secs| {
        Utc.timestamp_opt(secs, 0)
            .single()
            .expect("in-range timestamp")
    })
}

/// Strategy for generating arbitrary `Task` rows.
fn arb_task() -> impl Strategy<Value = Task> {
    (
        arb_task_id(),
        "[^\x00]{1,128}",
        prop::option::of("[^\x00]{0,512}"),
        arb_priority(),
        arb_status(),
        prop::option::of(arb_datetime()),
        any::<u128>(),
        prop::option::of(any::<u128>()),
        arb_datetime(),
    )
        .prop_map(
            |(id, title, description, priority, status, due_date, creator, assignee, created_at)| {
                Task {
                    id,
                    title,
                    description,
                    priority,
                    status,
                    due_date,
                    created_by: Uuid::from_u128(creator),
                    assigned_to: assignee.map(Uuid::from_u128),
                    created_at,
                }
            },
        )
}

/// Strategy for generating arbitrary `TaskPatch` values.
fn arb_patch() -> impl Strategy<Value = TaskPatch> {
    (
        prop::option::of("[^\x00]{1,128}"),
        prop::option::of("[^\x00]{0,512}"),
        prop::option::of(arb_priority()),
        prop::option::of(arb_status()),
        prop::option::of(arb_datetime()),
        prop::option::of(any::<u128>()),
    )
        .prop_map(
            |(title, description, priority, status, due_date, assigned_to)| TaskPatch {
                title,
                description,
                priority,
                status,
                due_date,
                assigned_to: assigned_to.map(Uuid::from_u128),
            },
        )
}

// --- Property tests ---

proptest! {
    /// Any valid task survives a JSON encode -> decode round-trip.
    #[test]
    fn task_round_trip(task in arb_task()) {
        let json = serde_json::to_string(&task).expect("encode should succeed");
        let decoded: Task = serde_json::from_str(&json).expect("decode should succeed");
        prop_assert_eq!(task, decoded);
    }

    /// Any status string deserializes without a panic; strings that are not
    /// a known variant land on `Unknown`.
    #[test]
    fn any_status_string_deserializes(raw in "[^\"\\\\\x00-\x1F]{0,32}") {
        let json = format!("\"{raw}\"");
        let status: TaskStatus = serde_json::from_str(&json).expect("status decode never fails");
        let known = ["todo", "in_progress", "review", "done"].contains(&raw.as_str());
        prop_assert_eq!(status == TaskStatus::Unknown, !known);
    }

    /// A patch serializes exactly the fields it carries, never nulls.
    #[test]
    fn patch_serializes_only_carried_fields(patch in arb_patch()) {
        let json = serde_json::to_value(&patch).expect("encode should succeed");
        let obj = json.as_object().expect("patch is an object");
        let carried = usize::from(patch.title.is_some())
            + usize::from(patch.description.is_some())
            + usize::from(patch.priority.is_some())
            + usize::from(patch.status.is_some())
            + usize::from(patch.due_date.is_some())
            + usize::from(patch.assigned_to.is_some());
        prop_assert_eq!(obj.len(), carried);
        prop_assert!(!obj.values().any(serde_json::Value::is_null));
        prop_assert_eq!(patch.is_empty(), obj.is_empty());
    }

    /// Applying a patch twice yields the same row as applying it once.
    #[test]
    fn patch_apply_is_idempotent(task in arb_task(), patch in arb_patch()) {
        let mut once = task;
        patch.apply(&mut once);
        let mut twice = once.clone();
        patch.apply(&mut twice);
        prop_assert_eq!(once, twice);
    }

    /// A patch never touches backend-owned fields.
    #[test]
    fn patch_never_touches_backend_owned_fields(task in arb_task(), patch in arb_patch()) {
        let mut patched = task.clone();
        patch.apply(&mut patched);
        prop_assert_eq!(patched.id, task.id);
        prop_assert_eq!(patched.created_by, task.created_by);
        prop_assert_eq!(patched.created_at, task.created_at);
    }

    /// Fields the patch does not carry are left exactly as they were.
    #[test]
    fn patch_preserves_uncarried_fields(task in arb_task(), status in arb_status()) {
        let mut patched = task.clone();
        TaskPatch::status(status).apply(&mut patched);
        prop_assert_eq!(patched.status, status);
        prop_assert_eq!(patched.title, task.title);
        prop_assert_eq!(patched.description, task.description);
        prop_assert_eq!(patched.priority, task.priority);
        prop_assert_eq!(patched.due_date, task.due_date);
        prop_assert_eq!(patched.assigned_to, task.assigned_to);
    }
}
