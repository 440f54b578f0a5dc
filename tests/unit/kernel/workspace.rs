use super::*;
use crate::kernel::services::ports::ConfirmChoice;
use crate::kernel::test_support::{RecordingEngines, ScriptedHost};

fn workspace() -> (Workspace, RecordingEngines) {
    let engines = RecordingEngines::default();
    let ws = Workspace::new(Rc::new(engines.clone()), WorkspaceConfig::default());
    (ws, engines)
}

fn with_panes(n: usize, host: &mut ScriptedHost) -> (Workspace, RecordingEngines) {
    let (mut ws, engines) = workspace();
    for _ in 1..n {
        ws.split_vertically(host);
    }
    (ws, engines)
}

#[test]
fn starts_with_one_pane_holding_one_tab() {
    let (ws, _) = workspace();
    assert_eq!(ws.pane_count(), 1);
    assert_eq!(ws.active_pane_index(), 0);
    assert_eq!(ws.active_pane().len(), 1);
}

#[test]
fn removing_the_only_pane_is_refused() {
    let mut host = ScriptedHost::default();
    let (mut ws, engines) = workspace();
    let id = ws.active_pane_id();

    assert!(!ws.remove_pane(0, &mut host));
    assert!(!ws.close_active_pane(&mut host));

    assert_eq!(ws.pane_ids(), &[id]);
    assert_eq!(engines.log.borrow().dropped, 0);
}

#[test]
fn splits_set_axis_and_focus_new_pane() {
    let mut host = ScriptedHost::default();
    let (mut ws, _) = workspace();

    let right = ws.split_vertically(&mut host);
    assert_eq!(ws.axis(), SplitAxis::Vertical);
    assert_eq!(ws.active_pane_id(), right);

    let below = ws.split_horizontally(&mut host);
    assert_eq!(ws.axis(), SplitAxis::Horizontal);
    assert_eq!(ws.pane_count(), 3);
    assert_eq!(ws.active_pane_index(), 2);
    assert_eq!(ws.active_pane_id(), below);
    assert_eq!(host.last_title(), Some("panemux - Untitled"));
}

#[test]
fn removing_active_last_pane_clamps_focus() {
    let mut host = ScriptedHost::default();
    let (mut ws, engines) = with_panes(3, &mut host);
    assert_eq!(ws.active_pane_index(), 2);

    assert!(ws.close_active_pane(&mut host));

    assert_eq!(ws.pane_count(), 2);
    assert_eq!(ws.active_pane_index(), 1);
    assert_eq!(engines.log.borrow().dropped, 1);
}

#[test]
fn removing_pane_before_focus_keeps_same_pane_focused() {
    let mut host = ScriptedHost::default();
    let (mut ws, _) = with_panes(3, &mut host);
    ws.focus_pane_at(1, &mut host);
    let focused = ws.active_pane_id();

    assert!(ws.remove_pane(0, &mut host));

    assert_eq!(ws.active_pane_index(), 0);
    assert_eq!(ws.active_pane_id(), focused);
}

#[test]
fn removing_active_middle_pane_focuses_its_successor() {
    let mut host = ScriptedHost::default();
    let (mut ws, _) = with_panes(3, &mut host);
    let last = ws.pane_ids()[2];
    ws.focus_pane_at(1, &mut host);

    assert!(ws.remove_pane(1, &mut host));

    assert_eq!(ws.active_pane_index(), 1);
    assert_eq!(ws.active_pane_id(), last);
}

#[test]
fn removing_out_of_range_index_is_noop() {
    let mut host = ScriptedHost::default();
    let (mut ws, _) = with_panes(2, &mut host);
    assert!(!ws.remove_pane(5, &mut host));
    assert_eq!(ws.pane_count(), 2);
}

#[test]
fn focus_navigation_saturates() {
    let mut host = ScriptedHost::default();
    let (mut ws, _) = with_panes(2, &mut host);

    ws.focus_next_pane(&mut host);
    assert_eq!(ws.active_pane_index(), 1);

    ws.focus_previous_pane(&mut host);
    ws.focus_previous_pane(&mut host);
    assert_eq!(ws.active_pane_index(), 0);
}

#[test]
fn focus_change_retitles_window() {
    let mut host = ScriptedHost::default();
    let (mut ws, _) = workspace();
    ws.active_pane_mut().create_tab(None, "left.txt", &mut host);
    ws.split_vertically(&mut host);
    assert_eq!(host.last_title(), Some("panemux - Untitled"));

    ws.focus_previous_pane(&mut host);
    assert_eq!(host.last_title(), Some("panemux - left.txt"));
}

#[test]
fn tab_operations_go_to_the_active_pane_only() {
    let mut host = ScriptedHost::default();
    let (mut ws, _) = with_panes(2, &mut host);
    let first = ws.pane_ids()[0];

    let id = ws.create_new_tab(&mut host);
    assert_eq!(ws.active_pane().len(), 2);
    assert_eq!(ws.pane(first).unwrap().len(), 1);

    ws.select_tab_at(0, &mut host);
    ws.select_next_tab(&mut host);
    assert_eq!(ws.active_pane().active_document_id(), Some(id));
    ws.select_previous_tab(&mut host);
    assert_ne!(ws.active_pane().active_document_id(), Some(id));

    assert_eq!(ws.close_active_tab(&mut host), CloseOutcome::Closed);
    assert_eq!(ws.active_pane().len(), 1);
}

#[test]
fn save_as_answer_for_removed_pane_is_ignored() {
    let mut host = ScriptedHost::default();
    let (mut ws, _) = with_panes(2, &mut host);
    let pane = ws.active_pane_id();
    let doc = ws.active_pane().active_document_id().unwrap();
    ws.active_pane_mut().mark_dirty(doc, &mut host);
    assert_eq!(ws.save_active_file(&mut host), SaveOutcome::AwaitingSavePath);
    let request = host.save_requests.pop().unwrap();
    assert_eq!(request.pane, pane);

    assert!(ws.close_active_pane(&mut host));

    let out = ws.complete_save_as(&request, Some(PathBuf::from("/work/gone.txt")), &mut host);
    assert_eq!(out, SaveAsOutcome::Ignored);
    assert!(host.fs.get(Path::new("/work/gone.txt")).is_none());
}

#[test]
fn save_as_answer_reaches_unfocused_pane() {
    let mut host = ScriptedHost::answering(ConfirmChoice::Save);
    let (mut ws, _) = workspace();
    let doc = ws.active_pane().active_document_id().unwrap();
    ws.active_pane_mut().replace_text(doc, "left", &mut host);
    ws.close_active_tab(&mut host);
    let request = host.save_requests.pop().unwrap();

    ws.split_vertically(&mut host);
    let out = ws.complete_save_as(&request, Some(PathBuf::from("/work/left.txt")), &mut host);

    assert_eq!(out, SaveAsOutcome::Closed);
    assert_eq!(host.fs.get(Path::new("/work/left.txt")).as_deref(), Some("left"));
    assert_eq!(ws.active_pane_index(), 1);
    assert_eq!(host.last_title(), Some("panemux - Untitled"));
}

#[test]
fn unsaved_changes_are_seen_across_panes() {
    let mut host = ScriptedHost::default();
    let (mut ws, _) = with_panes(2, &mut host);
    assert!(!ws.has_unsaved_changes());

    let first = ws.pane_ids()[0];
    let pane = ws.pane_mut(first).unwrap();
    let doc = pane.active_document_id().unwrap();
    pane.mark_dirty(doc, &mut host);

    assert!(ws.has_unsaved_changes());
}

#[test]
fn language_services_reach_panes_added_later() {
    let mut host = ScriptedHost::default();
    let (mut ws, engines) = workspace();

    ws.initialize_language_services(Path::new("/proj"));
    ws.split_horizontally(&mut host);
    ws.tick();

    let log = engines.log.borrow();
    assert_eq!(log.count("initialize:/proj"), 2);
    assert_eq!(log.count("tick"), 2);
}

#[test]
fn vertical_layout_splits_width_with_separator_gaps() {
    let mut host = ScriptedHost::default();
    let (ws, _) = with_panes(3, &mut host);

    let rects: Vec<Rect> = ws
        .pane_layout(Rect::new(0, 0, 32, 10))
        .into_iter()
        .map(|(_, r)| r)
        .collect();

    assert_eq!(
        rects,
        vec![
            Rect::new(0, 0, 10, 10),
            Rect::new(11, 0, 10, 10),
            Rect::new(22, 0, 10, 10),
        ]
    );
}

#[test]
fn horizontal_layout_gives_remainder_to_last_pane() {
    let mut host = ScriptedHost::default();
    let (mut ws, _) = workspace();
    ws.split_horizontally(&mut host);

    let rects: Vec<Rect> = ws
        .pane_layout(Rect::new(0, 1, 20, 10))
        .into_iter()
        .map(|(_, r)| r)
        .collect();

    assert_eq!(rects, vec![Rect::new(0, 1, 20, 4), Rect::new(0, 6, 20, 5)]);
}

#[test]
fn strip_click_in_other_pane_moves_focus_first() {
    let mut host = ScriptedHost::default();
    let (mut ws, _) = with_panes(2, &mut host);
    let first = ws.pane_ids()[0];
    let second_tab = ws.pane_mut(first).unwrap().create_tab(None, "b", &mut host);
    ws.pane_mut(first)
        .unwrap()
        .tab_strip_mut()
        .set_area(Rect::new(0, 0, 40, 1));
    let second = ws.pane_ids()[1];
    ws.pane_mut(second)
        .unwrap()
        .tab_strip_mut()
        .set_area(Rect::new(41, 0, 40, 1));
    ws.pane_mut(first).unwrap().select_tab_at(0, &mut host);

    assert!(ws.handle_strip_click(Pos::new(25, 0), &mut host));

    assert_eq!(ws.active_pane_index(), 0);
    assert_eq!(ws.active_pane().active_document_id(), Some(second_tab));
    assert!(!ws.handle_strip_click(Pos::new(25, 5), &mut host));
}

#[test]
fn pointer_motion_updates_hover_and_clears_other_strips() {
    let mut host = ScriptedHost::default();
    let (mut ws, _) = with_panes(2, &mut host);
    let [a, b] = [ws.pane_ids()[0], ws.pane_ids()[1]];
    ws.pane_mut(a)
        .unwrap()
        .tab_strip_mut()
        .set_area(Rect::new(0, 0, 20, 1));
    ws.pane_mut(b)
        .unwrap()
        .tab_strip_mut()
        .set_area(Rect::new(21, 0, 20, 1));

    assert!(ws.handle_pointer_moved(Pos::new(2, 0)));
    assert_eq!(ws.pane(a).unwrap().tab_strip().hover().tab, Some(0));

    assert!(ws.handle_pointer_moved(Pos::new(23, 0)));
    assert_eq!(ws.pane(a).unwrap().tab_strip().hover().tab, None);
    assert_eq!(ws.pane(b).unwrap().tab_strip().hover().tab, Some(0));
}

#[test]
fn layout_with_more_panes_than_cells_stays_in_range() {
    let mut host = ScriptedHost::default();
    let (ws, _) = with_panes(usize::from(u16::MAX) + 1, &mut host);

    let layout = ws.pane_layout(Rect::new(0, 0, 80, 24));

    assert_eq!(layout.len(), usize::from(u16::MAX) + 1);
    assert!(layout.iter().all(|(_, r)| r.w <= 80 && r.h == 24));
}

#[test]
fn save_as_request_goes_stale_when_its_document_closes() {
    let mut host = ScriptedHost::answering(ConfirmChoice::DontSave);
    let (mut ws, _) = workspace();
    let doc = ws.active_pane().active_document_id().unwrap();
    ws.active_pane_mut().mark_dirty(doc, &mut host);
    assert_eq!(ws.save_active_file(&mut host), SaveOutcome::AwaitingSavePath);
    let request = host.save_requests.pop().unwrap();
    assert!(ws.save_as_still_wanted(&request));

    assert_eq!(ws.close_active_tab(&mut host), CloseOutcome::Closed);

    assert!(!ws.save_as_still_wanted(&request));
}

#[test]
fn save_as_request_goes_stale_once_answered_or_pane_removed() {
    let mut host = ScriptedHost::default();
    let (mut ws, _) = with_panes(2, &mut host);
    let first = ws.pane_ids()[0];
    ws.focus_pane_at(0, &mut host);
    assert_eq!(ws.save_active_file(&mut host), SaveOutcome::AwaitingSavePath);
    let answered = host.save_requests.pop().unwrap();
    ws.complete_save_as(&answered, None, &mut host);
    assert!(!ws.save_as_still_wanted(&answered));

    ws.focus_pane_at(1, &mut host);
    assert_eq!(ws.save_active_file(&mut host), SaveOutcome::AwaitingSavePath);
    let orphaned = host.save_requests.pop().unwrap();
    assert_ne!(orphaned.pane, first);
    assert!(ws.close_active_pane(&mut host));
    assert!(!ws.save_as_still_wanted(&orphaned));
}
