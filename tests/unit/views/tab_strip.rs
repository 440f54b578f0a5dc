use super::*;
use crate::kernel::test_support::doc_ids;
use crate::ui::backend::test::TestBackend;
use crate::ui::backend::Backend;

fn strip(metrics: TabStripMetrics, area: Rect, n: usize) -> (TabStrip, Vec<DocumentId>) {
    let ids = doc_ids(n);
    let mut strip = TabStrip::new(metrics);
    strip.set_area(area);
    for (i, id) in ids.iter().enumerate() {
        strip.add_tab(*id, format!("tab{i}"), false);
    }
    (strip, ids)
}

fn wide_metrics() -> TabStripMetrics {
    TabStripMetrics {
        min_tab_width: 120,
        max_tab_width: 200,
        ..TabStripMetrics::default()
    }
}

#[test]
fn two_tabs_in_400_cells_are_200_wide_and_x250_hits_second() {
    let (strip, ids) = strip(wide_metrics(), Rect::new(0, 0, 400, 1), 2);

    assert_eq!(strip.tab_width(), 200);
    let hit = strip.hit_test(Pos::new(250, 0)).unwrap();
    assert_eq!(hit.index, 1);
    assert_eq!(hit.id, ids[1]);
    assert!(!hit.on_close);
}

#[test]
fn width_clamps_to_min_and_max() {
    let (mut strip, _) = strip(wide_metrics(), Rect::new(0, 0, 400, 1), 5);
    assert_eq!(strip.tab_width(), 120);

    strip.set_area(Rect::new(0, 0, 1000, 1));
    assert_eq!(strip.tab_width(), 200);
}

#[test]
fn empty_strip_uses_full_width_clamped() {
    let (strip, _) = strip(wide_metrics(), Rect::new(0, 0, 150, 1), 0);
    assert_eq!(strip.tab_width(), 150);
    assert!(strip.layout().is_empty());
}

#[test]
fn max_wins_when_min_exceeds_max() {
    let metrics = TabStripMetrics {
        min_tab_width: 30,
        max_tab_width: 10,
        ..TabStripMetrics::default()
    };
    let (strip, _) = strip(metrics, Rect::new(0, 0, 100, 1), 2);
    assert_eq!(strip.tab_width(), 10);
}

#[test]
fn layout_places_tabs_left_to_right_from_area_origin() {
    let (strip, ids) = strip(TabStripMetrics::default(), Rect::new(5, 2, 40, 1), 2);
    let rects = strip.layout();

    assert_eq!(rects.len(), 2);
    assert_eq!(rects[0].rect, Rect::new(5, 2, 20, 1));
    assert_eq!(rects[1].rect, Rect::new(25, 2, 20, 1));
    assert_eq!(rects[1].id, ids[1]);
    // 1-cell button, 1 cell before the trailing edge.
    assert_eq!(rects[0].close, Rect::new(23, 2, 1, 1));
}

#[test]
fn pointer_down_on_close_affordance_emits_close_intent() {
    let (strip, ids) = strip(TabStripMetrics::default(), Rect::new(0, 0, 40, 1), 2);

    assert_eq!(
        strip.pointer_down(Pos::new(18, 0)),
        Some(TabStripEvent::Closed(ids[0]))
    );
    assert_eq!(
        strip.pointer_down(Pos::new(5, 0)),
        Some(TabStripEvent::Selected(ids[0]))
    );
    assert_eq!(
        strip.pointer_down(Pos::new(39, 0)),
        Some(TabStripEvent::Selected(ids[1]))
    );
}

#[test]
fn pointer_outside_tabs_or_strip_misses() {
    let (strip, _) = strip(TabStripMetrics::default(), Rect::new(0, 0, 100, 1), 2);
    assert_eq!(strip.tab_width(), 24);

    assert!(strip.hit_test(Pos::new(60, 0)).is_none());
    assert!(strip.hit_test(Pos::new(5, 1)).is_none());
    assert!(strip.pointer_down(Pos::new(100, 0)).is_none());
}

#[test]
fn hover_tracks_tab_and_close_and_resets_on_leave() {
    let (mut strip, _) = strip(TabStripMetrics::default(), Rect::new(0, 0, 40, 1), 2);
    strip.take_redraw();

    assert!(strip.pointer_moved(Pos::new(3, 0)));
    assert_eq!(
        strip.hover(),
        TabHover {
            tab: Some(0),
            close: false
        }
    );
    assert!(!strip.pointer_moved(Pos::new(4, 0)));

    assert!(strip.pointer_moved(Pos::new(18, 0)));
    assert!(strip.hover().close);

    assert!(strip.pointer_left());
    assert_eq!(strip.hover(), TabHover::default());
    assert!(!strip.pointer_left());
    assert!(strip.take_redraw());
    assert!(!strip.take_redraw());
}

#[test]
fn membership_change_clears_hover() {
    let (mut strip, ids) = strip(TabStripMetrics::default(), Rect::new(0, 0, 40, 1), 2);
    strip.pointer_moved(Pos::new(25, 0));
    assert_eq!(strip.hover().tab, Some(1));

    strip.remove_tab(ids[0]);
    assert_eq!(strip.hover(), TabHover::default());
    assert_eq!(strip.tabs().len(), 1);
}

#[test]
fn remove_active_tab_clears_active_marker() {
    let (mut strip, ids) = strip(TabStripMetrics::default(), Rect::new(0, 0, 40, 1), 2);
    strip.set_active(ids[1]);
    strip.remove_tab(ids[1]);
    assert_eq!(strip.active(), None);
}

fn render(strip: &TabStrip, width: u16) -> TestBackend {
    let mut painter = Painter::new();
    strip.paint(&mut painter, &Theme::default());
    let mut backend = TestBackend::new(width, 1);
    backend.draw(Rect::new(0, 0, width, 1), painter.cmds());
    backend
}

#[test]
fn paint_shows_dirty_marker_title_and_close_on_active_tab() {
    let ids = doc_ids(1);
    let mut strip = TabStrip::new(TabStripMetrics::default());
    strip.set_area(Rect::new(0, 0, 30, 1));
    strip.add_tab(ids[0], "main.rs".to_string(), true);
    strip.set_active(ids[0]);

    let backend = render(&strip, 30);
    let buf = backend.buffer();
    assert!(buf.row_text(0).starts_with(" ● main.rs"));
    assert_eq!(buf.cell(22, 0).unwrap().symbol, "×");
}

#[test]
fn paint_hides_close_on_idle_tabs_and_truncates_long_titles() {
    let ids = doc_ids(1);
    let mut strip = TabStrip::new(TabStripMetrics::default());
    strip.set_area(Rect::new(0, 0, 12, 1));
    strip.add_tab(ids[0], "a_very_long_filename.txt".to_string(), false);

    let backend = render(&strip, 12);
    let row = backend.buffer().row_text(0);
    assert!(row.starts_with(" a_very_…"));
    assert!(!row.contains('×'));
}

#[test]
fn truncate_keeps_short_titles() {
    assert_eq!(truncate_to_width("abc", 3), "abc");
    assert_eq!(truncate_to_width("abcd", 3), "ab…");
    assert_eq!(truncate_to_width("abcd", 0), "");
}

#[test]
fn truncate_never_splits_a_grapheme_cluster() {
    // Regional-indicator pair: one flag, two code points.
    assert_eq!(truncate_to_width("🇺🇸ab", 2), "…");
    assert_eq!(truncate_to_width("e\u{301}e\u{301}e\u{301}", 2), "e\u{301}…");
}

#[test]
fn tab_width_survives_tab_counts_beyond_u16() {
    let ids = doc_ids(1);
    let mut strip = TabStrip::new(TabStripMetrics::default());
    strip.set_area(Rect::new(0, 0, 400, 1));
    for _ in 0..=usize::from(u16::MAX) {
        strip.add_tab(ids[0], "t".to_string(), false);
    }

    assert_eq!(strip.tab_width(), TabStripMetrics::default().min_tab_width);
    assert!(strip.hit_test(Pos::new(5, 0)).is_some());
}
