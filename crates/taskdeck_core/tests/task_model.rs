use taskdeck_core::{Task, TaskStatus, TaskValidationError};
use uuid::Uuid;

#[test]
fn new_task_sets_defaults() {
    let task = Task::new("Write report", "Quarterly numbers").unwrap();

    assert!(!task.id.is_nil());
    assert_eq!(task.title, "Write report");
    assert_eq!(task.description, "Quarterly numbers");
    assert_eq!(task.status, TaskStatus::Pending);
    assert!(!task.is_completed());
}

#[test]
fn new_task_trims_surrounding_whitespace() {
    let task = Task::new("  Buy milk  ", "\t2% whole\n").unwrap();

    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.description, "2% whole");
}

#[test]
fn empty_title_is_rejected() {
    let err = Task::new("", "body").unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyTitle);

    let err = Task::new("   ", "body").unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyTitle);
}

#[test]
fn empty_description_is_rejected() {
    let err = Task::new("title", "").unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyDescription);

    let err = Task::new("title", " \n ").unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyDescription);
}

#[test]
fn validate_rejects_whitespace_only_fields() {
    let mut task = Task::new("valid", "valid").unwrap();

    task.title = "   ".to_string();
    assert_eq!(task.validate(), Err(TaskValidationError::EmptyTitle));

    task.title = "valid".to_string();
    task.description = String::new();
    assert_eq!(task.validate(), Err(TaskValidationError::EmptyDescription));
}

#[test]
fn mark_completed_is_one_way_and_idempotent() {
    let mut task = Task::new("Finish slides", "For the Tuesday review").unwrap();

    task.mark_completed();
    assert_eq!(task.status, TaskStatus::Completed);
    assert!(task.is_completed());

    task.mark_completed();
    assert_eq!(task.status, TaskStatus::Completed);
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let task_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let task = Task::with_id(task_id, "Ship release", "Tag and publish").unwrap();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], task_id.to_string());
    assert_eq!(json["title"], "Ship release");
    assert_eq!(json["description"], "Tag and publish");
    assert_eq!(json["status"], "Pending");

    let created = json["created_date"].as_str().unwrap();
    assert_eq!(created.len(), 19, "expected `YYYY-MM-DD HH:MM:SS`: {created}");
    assert_eq!(&created[4..5], "-");
    assert_eq!(&created[10..11], " ");
    assert_eq!(&created[13..14], ":");

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn completed_status_serializes_capitalized() {
    let mut task = Task::new("Pay rent", "Before the 3rd").unwrap();
    task.mark_completed();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["status"], "Completed");
}

#[test]
fn deserialize_accepts_persisted_document() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "Buy milk",
        "description": "2% whole",
        "status": "Completed",
        "created_date": "2026-08-05 09:30:00"
    });

    let task: Task = serde_json::from_value(value).unwrap();
    assert_eq!(task.status, TaskStatus::Completed);
    assert_eq!(task.created_date_text(), "2026-08-05 09:30:00");
}

#[test]
fn deserialize_rejects_unparseable_created_date() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "Buy milk",
        "description": "2% whole",
        "status": "Pending",
        "created_date": "yesterday"
    });

    assert!(serde_json::from_value::<Task>(value).is_err());
}

#[test]
fn deserialize_rejects_unknown_status() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "Buy milk",
        "description": "2% whole",
        "status": "Archived",
        "created_date": "2026-08-05 09:30:00"
    });

    assert!(serde_json::from_value::<Task>(value).is_err());
}
