use rowscope::{ScrollRequest, Viewport, ViewportState, compute_window};

fn state(offset: f64, container: f64, row_height: f64, overscan: usize) -> ViewportState {
    ViewportState {
        scroll_offset: offset,
        container_height: container,
        row_height,
        overscan,
    }
}

fn viewport(total: usize, container: f64) -> Viewport {
    let mut vp = Viewport::new(20.0, 2);
    vp.set_total_rows(total);
    vp.set_container_height(container);
    vp
}

// ============================================================================
// compute_window
// ============================================================================

#[test]
fn test_window_at_top() {
    let w = compute_window(&state(0.0, 200.0, 20.0, 3), 1000);
    assert_eq!(w.start_index, 0);
    assert_eq!(w.end_index, 13);
    assert_eq!(w.top_offset, 0.0);
}

#[test]
fn test_window_mid_scroll() {
    // floor(400/20) - 3 = 17, ceil(600/20) + 3 = 33
    let w = compute_window(&state(400.0, 200.0, 20.0, 3), 1000);
    assert_eq!(w.start_index, 17);
    assert_eq!(w.end_index, 33);
    assert_eq!(w.top_offset, 340.0);
    assert_eq!(w.range(), 17..33);
}

#[test]
fn test_window_clamped_at_end() {
    let w = compute_window(&state(1900.0, 200.0, 20.0, 3), 100);
    assert_eq!(w.end_index, 100);
    assert_eq!(w.start_index, 92);
}

#[test]
fn test_window_partial_row() {
    // Offset 30 shows half of row 1: floor(1.5) = 1, ceil(11.5) = 12
    let w = compute_window(&state(30.0, 200.0, 20.0, 0), 1000);
    assert_eq!(w.range(), 1..12);
    assert_eq!(w.top_offset, 20.0);
}

#[test]
fn test_window_empty_rows() {
    let w = compute_window(&state(0.0, 200.0, 20.0, 3), 0);
    assert!(w.is_empty());
    assert_eq!(w.len(), 0);
}

#[test]
fn test_window_invalid_row_height() {
    assert!(compute_window(&state(0.0, 200.0, 0.0, 3), 100).is_empty());
    assert!(compute_window(&state(0.0, 200.0, -5.0, 3), 100).is_empty());
    assert!(compute_window(&state(0.0, 200.0, f64::NAN, 3), 100).is_empty());
}

#[test]
fn test_window_fewer_rows_than_container() {
    let w = compute_window(&state(0.0, 500.0, 20.0, 3), 4);
    assert_eq!(w.range(), 0..4);
}

#[test]
fn test_window_size_bounded_by_container() {
    for &(container, row_height, overscan) in &[
        (200.0_f64, 20.0_f64, 3usize),
        (210.0, 20.0, 0),
        (55.0, 10.0, 5),
        (1.0, 32.0, 1),
    ] {
        let bound = (container / row_height).ceil() as usize + 2 * overscan;
        for step in 0..200 {
            let offset = step as f64 * row_height;
            let w = compute_window(&state(offset, container, row_height, overscan), 100_000);
            assert!(
                w.len() <= bound,
                "offset {} container {} rh {} overscan {}: {} > {}",
                offset,
                container,
                row_height,
                overscan,
                w.len(),
                bound
            );
        }
    }
}

#[test]
fn test_window_size_independent_of_total() {
    let small = compute_window(&state(400.0, 200.0, 20.0, 3), 100);
    let large = compute_window(&state(400.0, 200.0, 20.0, 3), 100_000);
    assert_eq!(small, large);
    assert_eq!(large.len(), 16);
}

// ============================================================================
// Viewport
// ============================================================================

#[test]
fn test_viewport_total_height_and_max_offset() {
    let vp = viewport(100, 200.0);
    assert_eq!(vp.total_height(), 2000.0);
    assert_eq!(vp.max_offset(), 1800.0);
    assert!(vp.can_scroll());
    assert_eq!(vp.rows_per_page(), 10);
}

#[test]
fn test_viewport_scroll_clamps() {
    let mut vp = viewport(100, 200.0);
    assert!(vp.apply(ScrollRequest::Delta(5000.0)));
    assert_eq!(vp.scroll_offset(), 1800.0);
    assert!(vp.apply(ScrollRequest::ToOffset(-50.0)));
    assert_eq!(vp.scroll_offset(), 0.0);
    assert!(!vp.apply(ScrollRequest::Delta(-10.0)));
}

#[test]
fn test_viewport_scroll_recomputes_window() {
    let mut vp = viewport(100, 200.0);
    assert_eq!(vp.window().range(), 0..12);
    vp.apply(ScrollRequest::ToOffset(400.0));
    assert_eq!(vp.window().range(), 18..32);
    assert_eq!(vp.window().top_offset, 360.0);
}

#[test]
fn test_viewport_page_and_home_end() {
    let mut vp = viewport(100, 200.0);
    vp.apply(ScrollRequest::PageDown);
    assert_eq!(vp.scroll_offset(), 200.0);
    vp.apply(ScrollRequest::End);
    assert_eq!(vp.scroll_offset(), 1800.0);
    vp.apply(ScrollRequest::PageUp);
    assert_eq!(vp.scroll_offset(), 1600.0);
    vp.apply(ScrollRequest::Home);
    assert_eq!(vp.scroll_offset(), 0.0);
}

#[test]
fn test_viewport_into_view() {
    let mut vp = viewport(100, 200.0);

    // Below the viewport: align row bottom with container bottom
    vp.apply(ScrollRequest::IntoView(15));
    assert_eq!(vp.scroll_offset(), 120.0);

    // Already visible: no movement
    assert!(!vp.apply(ScrollRequest::IntoView(10)));

    // Above the viewport: align row top
    vp.apply(ScrollRequest::IntoView(2));
    assert_eq!(vp.scroll_offset(), 40.0);

    // Out of range: no movement
    assert!(!vp.apply(ScrollRequest::IntoView(500)));
}

#[test]
fn test_viewport_non_finite_scroll_ignored() {
    let mut vp = viewport(100, 200.0);
    vp.apply(ScrollRequest::ToOffset(100.0));
    assert!(!vp.apply(ScrollRequest::ToOffset(f64::NAN)));
    assert!(!vp.apply(ScrollRequest::Delta(f64::INFINITY)));
    assert_eq!(vp.scroll_offset(), 100.0);
}

#[test]
fn test_viewport_same_row_count_keeps_window() {
    let mut vp = viewport(100, 200.0);
    let generation = vp.generation();
    assert!(!vp.set_total_rows(100));
    assert_eq!(vp.generation(), generation);
    assert!(vp.set_total_rows(50));
    assert!(vp.generation() > generation);
}

#[test]
fn test_viewport_shrink_clamps_offset() {
    let mut vp = viewport(100, 200.0);
    vp.apply(ScrollRequest::End);
    vp.set_total_rows(20);
    assert_eq!(vp.scroll_offset(), 200.0);
    assert_eq!(vp.window().end_index, 20);
}

#[test]
fn test_viewport_resize_clamps_offset() {
    let mut vp = viewport(100, 200.0);
    vp.apply(ScrollRequest::End);
    vp.set_container_height(2400.0);
    assert_eq!(vp.scroll_offset(), 0.0);
    assert!(!vp.can_scroll());
    assert!(!vp.set_container_height(f64::NAN));
}

#[test]
fn test_viewport_row_index_at() {
    let mut vp = viewport(100, 200.0);
    vp.apply(ScrollRequest::ToOffset(100.0));
    assert_eq!(vp.row_index_at(0.0), Some(5));
    assert_eq!(vp.row_index_at(39.9), Some(6));
    assert_eq!(vp.row_index_at(-1.0), None);
    assert_eq!(vp.row_index_at(f64::NAN), None);
    assert_eq!(vp.row_index_at(f64::INFINITY), None);
    assert_eq!(vp.row_index_at(1e300), None);

    let short = viewport(3, 200.0);
    assert_eq!(short.row_index_at(70.0), None);
}
