use serde_json::json;
use simpletodo_core::{EditRequest, EditResult, KEY_ITEM_POSITION, KEY_ITEM_TEXT};

#[test]
fn edit_request_uses_boundary_field_names() {
    let request = EditRequest {
        text: "Walk dog".to_string(),
        position: 4,
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value[KEY_ITEM_TEXT], "Walk dog");
    assert_eq!(value[KEY_ITEM_POSITION], 4);
}

#[test]
fn edit_result_parses_from_boundary_payload() {
    let result: EditResult = serde_json::from_value(json!({
        "todo_item_text": "Buy oat milk",
        "todo_item_position": 0,
    }))
    .unwrap();
    assert_eq!(result.text, "Buy oat milk");
    assert_eq!(result.position, 0);
}

#[test]
fn edit_result_rejects_payload_missing_position() {
    let parsed = serde_json::from_value::<EditResult>(json!({ "todo_item_text": "x" }));
    assert!(parsed.is_err());
}

#[test]
fn from_parts_requires_both_fields() {
    assert!(EditResult::from_parts(Some("x".to_string()), None).is_none());
    assert!(EditResult::from_parts(None, Some(0)).is_none());
    assert_eq!(
        EditResult::from_parts(Some("x".to_string()), Some(2)),
        Some(EditResult {
            text: "x".to_string(),
            position: 2
        })
    );
}
