use rowscope::{CellValue, EditController};

fn editing(row: &str, column: &str) -> EditController<String> {
    let mut edit = EditController::new();
    edit.begin(row.to_string(), column, true, CellValue::Integer(42));
    edit
}

#[test]
fn test_begin_sets_draft_from_value() {
    let edit = editing("r3", "amount");
    let state = edit.state().expect("editing");
    assert_eq!(state.coord.row, "r3");
    assert_eq!(state.coord.column_id, "amount");
    assert_eq!(state.draft, "42");
    assert_eq!(state.original, CellValue::Integer(42));
    assert_eq!(state.error, None);
}

#[test]
fn test_begin_refuses_non_editable() {
    let mut edit: EditController<String> = EditController::new();
    assert!(!edit.begin("r1".to_string(), "date", false, CellValue::Empty));
    assert!(!edit.is_editing());
}

#[test]
fn test_single_editor() {
    let mut edit = editing("r3", "amount");
    assert!(!edit.begin("r1".to_string(), "name", true, CellValue::Empty));
    assert!(edit.is_editing_cell(&"r3".to_string(), "amount"));
    assert!(!edit.is_editing_cell(&"r1".to_string(), "name"));
}

#[test]
fn test_draft_operations() {
    let mut edit = editing("r3", "amount");
    assert!(edit.backspace());
    edit.insert_char('7');
    assert_eq!(edit.state().map(|s| s.draft.as_str()), Some("47"));
    edit.set_draft("");
    assert!(!edit.backspace());
}

#[test]
fn test_draft_operations_without_edit() {
    let mut edit: EditController<String> = EditController::new();
    assert!(!edit.set_draft("x"));
    assert!(!edit.insert_char('x'));
    assert!(!edit.backspace());
}

#[test]
fn test_reject_keeps_editing() {
    let mut edit = editing("r3", "amount");
    edit.reject("must be positive");
    assert!(edit.is_editing());
    assert_eq!(
        edit.state().and_then(|s| s.error.as_deref()),
        Some("must be positive")
    );
}

#[test]
fn test_finish_and_cancel_exit() {
    let mut edit = editing("r3", "amount");
    let done = edit.finish().expect("was editing");
    assert_eq!(done.coord.row, "r3");
    assert!(!edit.is_editing());
    assert!(edit.finish().is_none());

    let mut edit = editing("r1", "name");
    assert!(edit.cancel());
    assert!(!edit.cancel());
    assert!(edit.begin("r2".to_string(), "name", true, CellValue::Empty));
}
