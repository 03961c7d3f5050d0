mod common;

use common::{Invoice, columns};
use rowscope::{CellValue, Column, ColumnLayout};

fn layout() -> ColumnLayout {
    ColumnLayout::new(&columns(), 40.0, 2000.0)
}

// ============================================================================
// Column
// ============================================================================

#[test]
fn test_column_defaults() {
    let col: Column<Invoice> = Column::new("name", "Name", 100.0);
    assert!(!col.sortable);
    assert!(!col.editable);
    assert_eq!(col.min_width, None);
}

#[test]
fn test_column_field_accessor() {
    let row = Invoice::new("r1", "Acme", 250, "2024-01-01");
    let col: Column<Invoice> = Column::new("amount", "Amount", 100.0);
    assert_eq!(col.value(&row), CellValue::Integer(250));

    let renamed: Column<Invoice> = Column::new("customer", "Customer", 100.0).field("name");
    assert_eq!(renamed.value(&row), CellValue::text("Acme"));
}

#[test]
fn test_column_derived_accessor() {
    let row = Invoice::new("r1", "Acme", 250, "2024-01-01");
    let col = Column::new("label", "Label", 100.0)
        .derived(|r: &Invoice| format!("{} ({})", r.name, r.id).into());
    assert_eq!(col.value(&row), CellValue::text("Acme (r1)"));
}

#[test]
fn test_column_render_callback() {
    let plain: Column<Invoice> = Column::new("amount", "Amount", 100.0);
    assert_eq!(plain.render(&CellValue::Integer(5)), "5");

    let cents: Column<Invoice> = Column::new("amount", "Amount", 100.0).render_with(|v| match v {
        CellValue::Integer(i) => format!("${}.{:02}", i / 100, i % 100),
        other => other.to_string(),
    });
    assert_eq!(cents.render(&CellValue::Integer(1234)), "$12.34");
}

#[test]
fn test_column_parse_draft_by_kind() {
    let col: Column<Invoice> = Column::new("amount", "Amount", 100.0);
    let current = CellValue::Integer(10);
    assert_eq!(col.parse_draft(" 42 ", &current), Ok(CellValue::Integer(42)));
    assert!(col.parse_draft("forty", &current).is_err());
    assert_eq!(col.parse_draft("", &current), Ok(CellValue::Empty));
    assert_eq!(
        col.parse_draft("anything", &CellValue::text("x")),
        Ok(CellValue::text("anything"))
    );
}

#[test]
fn test_column_edit_callback() {
    let col: Column<Invoice> = Column::new("name", "Name", 100.0).edit_with(|draft, _| {
        if draft.trim().is_empty() {
            Err("name is required".to_string())
        } else {
            Ok(CellValue::text(draft.trim()))
        }
    });
    assert_eq!(
        col.parse_draft("  Acme ", &CellValue::Empty),
        Ok(CellValue::text("Acme"))
    );
    assert_eq!(
        col.parse_draft("   ", &CellValue::Empty),
        Err("name is required".to_string())
    );
}

// ============================================================================
// ColumnLayout
// ============================================================================

#[test]
fn test_layout_initial_widths() {
    let layout = layout();
    assert_eq!(
        layout.widths(),
        vec![
            ("name".to_string(), 200.0),
            ("amount".to_string(), 120.0),
            ("date".to_string(), 140.0),
        ]
    );
    assert_eq!(layout.total_width(), 460.0);
}

#[test]
fn test_layout_resize_applies_delta() {
    let mut layout = layout();
    assert_eq!(layout.resize_column("name", 15.0), Some(215.0));
    assert_eq!(layout.resize_column("name", -5.0), Some(210.0));
    assert_eq!(layout.total_width(), 470.0);
}

#[test]
fn test_layout_zero_delta_idempotent() {
    let mut layout = layout();
    for _ in 0..5 {
        assert_eq!(layout.resize_column("amount", 0.0), Some(120.0));
    }
}

#[test]
fn test_layout_clamps_to_column_min() {
    let mut layout = layout();
    for _ in 0..50 {
        let width = layout.resize_column("amount", -7.0);
        assert!(width.is_some_and(|w| w >= 80.0));
    }
    assert_eq!(layout.width("amount"), Some(80.0));
}

#[test]
fn test_layout_clamps_to_global_bounds() {
    let mut layout = layout();
    layout.resize_column("date", -1000.0);
    assert_eq!(layout.width("date"), Some(40.0));
    layout.resize_column("date", 10_000.0);
    assert_eq!(layout.width("date"), Some(2000.0));
}

#[test]
fn test_layout_deltas_compose() {
    let mut a = layout();
    let mut b = layout();
    for _ in 0..10 {
        a.resize_column("name", 3.0);
    }
    b.resize_column("name", 30.0);
    assert_eq!(a.width("name"), b.width("name"));
}

#[test]
fn test_layout_unknown_column_noop() {
    let mut layout = layout();
    assert_eq!(layout.resize_column("missing", 10.0), None);
    assert_eq!(layout.total_width(), 460.0);
}

#[test]
fn test_layout_non_finite_delta_noop() {
    let mut layout = layout();
    assert_eq!(layout.resize_column("name", f64::NAN), None);
    assert_eq!(layout.width("name"), Some(200.0));
}

#[test]
fn test_layout_initial_width_clamped() {
    let cols: Vec<Column<Invoice>> = vec![Column::new("tiny", "Tiny", 5.0)];
    let layout = ColumnLayout::new(&cols, 40.0, 2000.0);
    assert_eq!(layout.width("tiny"), Some(40.0));
}

#[test]
fn test_layout_set_columns_keeps_surviving_widths() {
    let mut layout = layout();
    layout.resize_column("name", 50.0);

    let next: Vec<Column<Invoice>> = vec![
        Column::new("name", "Name", 200.0),
        Column::new("status", "Status", 90.0),
    ];
    layout.set_columns(&next);
    assert_eq!(
        layout.widths(),
        vec![("name".to_string(), 250.0), ("status".to_string(), 90.0)]
    );
    assert_eq!(layout.width("amount"), None);
}

#[test]
fn test_layout_hit_testing() {
    let layout = layout();
    assert_eq!(layout.column_offsets(), vec![0.0, 200.0, 320.0]);
    assert_eq!(layout.column_at_x(0.0), Some(0));
    assert_eq!(layout.column_at_x(199.9), Some(0));
    assert_eq!(layout.column_at_x(200.0), Some(1));
    assert_eq!(layout.column_at_x(459.0), Some(2));
    assert_eq!(layout.column_at_x(460.0), None);
    assert_eq!(layout.column_at_x(-1.0), None);
}
