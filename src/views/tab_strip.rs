//! Tab strip for one pane: layout, hit-testing, hover tracking and painting.
//!
//! The strip mirrors the pane's document list but never owns it. Pointer
//! input only produces intents (`TabStripEvent`); the pane decides what to do.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::kernel::services::ports::TabStripMetrics;
use crate::kernel::DocumentId;
use crate::ui::core::geom::{Pos, Rect};
use crate::ui::core::painter::Painter;
use crate::ui::core::style::{Mod, Style};
use crate::ui::core::theme::Theme;

const DIRTY_MARKER: &str = "●";
const CLOSE_GLYPH: &str = "×";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabItem {
    pub id: DocumentId,
    pub title: String,
    pub dirty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabRect {
    pub index: usize,
    pub id: DocumentId,
    pub rect: Rect,
    pub close: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabHit {
    pub index: usize,
    pub id: DocumentId,
    pub on_close: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabStripEvent {
    Selected(DocumentId),
    Closed(DocumentId),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabHover {
    pub tab: Option<usize>,
    pub close: bool,
}

#[derive(Debug)]
pub struct TabStrip {
    metrics: TabStripMetrics,
    area: Rect,
    tabs: Vec<TabItem>,
    active: Option<DocumentId>,
    hover: TabHover,
    needs_redraw: bool,
}

impl TabStrip {
    pub fn new(metrics: TabStripMetrics) -> Self {
        Self {
            metrics,
            area: Rect::default(),
            tabs: Vec::new(),
            active: None,
            hover: TabHover::default(),
            needs_redraw: true,
        }
    }

    pub fn metrics(&self) -> TabStripMetrics {
        self.metrics
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn set_area(&mut self, area: Rect) {
        if self.area != area {
            self.area = area;
            self.needs_redraw = true;
        }
    }

    pub fn tabs(&self) -> &[TabItem] {
        &self.tabs
    }

    pub fn active(&self) -> Option<DocumentId> {
        self.active
    }

    pub fn hover(&self) -> TabHover {
        self.hover
    }

    /// Returns and clears the pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    // Membership is written by the owning pane only.

    pub(crate) fn add_tab(&mut self, id: DocumentId, title: String, dirty: bool) {
        self.tabs.push(TabItem { id, title, dirty });
        self.membership_changed();
    }

    pub(crate) fn remove_tab(&mut self, id: DocumentId) {
        let before = self.tabs.len();
        self.tabs.retain(|t| t.id != id);
        if self.tabs.len() == before {
            return;
        }
        if self.active == Some(id) {
            self.active = None;
        }
        self.membership_changed();
    }

    pub(crate) fn update_title(&mut self, id: DocumentId, title: &str) {
        if let Some(tab) = self.tabs.iter_mut().find(|t| t.id == id) {
            tab.title = title.to_string();
            self.needs_redraw = true;
        }
    }

    pub(crate) fn update_dirty(&mut self, id: DocumentId, dirty: bool) {
        if let Some(tab) = self.tabs.iter_mut().find(|t| t.id == id) {
            if tab.dirty != dirty {
                tab.dirty = dirty;
                self.needs_redraw = true;
            }
        }
    }

    pub(crate) fn set_active(&mut self, id: DocumentId) {
        if self.active != Some(id) {
            self.active = Some(id);
            self.needs_redraw = true;
        }
    }

    fn membership_changed(&mut self) {
        // Indices shift under the pointer; wait for the next motion event.
        self.hover = TabHover::default();
        self.needs_redraw = true;
    }

    /// `clamp(W / n, min, max)`, with `n = 0` treated as 1. When `min > max`, `max` wins.
    pub fn tab_width(&self) -> u16 {
        let n = u16::try_from(self.tabs.len()).unwrap_or(u16::MAX).max(1);
        (self.area.w / n)
            .max(self.metrics.min_tab_width)
            .min(self.metrics.max_tab_width)
    }

    /// Rects for every tab in order. Tabs past the strip's right edge are still
    /// reported; painting and hit-testing clip to the strip area.
    pub fn layout(&self) -> Vec<TabRect> {
        let width = self.tab_width();
        self.tabs
            .iter()
            .enumerate()
            .map(|(index, tab)| {
                let x = offset(self.area.x, index, width);
                let rect = Rect::new(x, self.area.y, width, self.area.h);
                TabRect {
                    index,
                    id: tab.id,
                    rect,
                    close: self.close_rect(rect),
                }
            })
            .collect()
    }

    fn close_rect(&self, tab: Rect) -> Rect {
        let w = self.metrics.close_button_width.min(tab.w);
        let x = tab
            .right()
            .saturating_sub(self.metrics.close_button_margin)
            .saturating_sub(w)
            .max(tab.x);
        Rect::new(x, tab.y, w, tab.h)
    }

    pub fn hit_test(&self, pos: Pos) -> Option<TabHit> {
        if !self.area.contains(pos) {
            return None;
        }
        let width = self.tab_width();
        if width == 0 {
            return None;
        }
        let index = ((pos.x - self.area.x) / width) as usize;
        let tab = self.tabs.get(index)?;
        let rect = Rect::new(offset(self.area.x, index, width), self.area.y, width, self.area.h);
        Some(TabHit {
            index,
            id: tab.id,
            on_close: self.close_rect(rect).contains(pos),
        })
    }

    pub fn pointer_down(&self, pos: Pos) -> Option<TabStripEvent> {
        let hit = self.hit_test(pos)?;
        let event = if hit.on_close {
            TabStripEvent::Closed(hit.id)
        } else {
            TabStripEvent::Selected(hit.id)
        };
        tracing::debug!(index = hit.index, ?event, "tab strip intent");
        Some(event)
    }

    /// Update hover from a motion event. Returns true when a redraw is needed.
    pub fn pointer_moved(&mut self, pos: Pos) -> bool {
        let next = match self.hit_test(pos) {
            Some(hit) => TabHover {
                tab: Some(hit.index),
                close: hit.on_close,
            },
            None => TabHover::default(),
        };
        self.set_hover(next)
    }

    pub fn pointer_left(&mut self) -> bool {
        self.set_hover(TabHover::default())
    }

    fn set_hover(&mut self, next: TabHover) -> bool {
        if self.hover == next {
            return false;
        }
        self.hover = next;
        self.needs_redraw = true;
        true
    }

    pub fn paint(&self, painter: &mut Painter, theme: &Theme) {
        if self.area.is_empty() {
            return;
        }
        painter.fill(self.area, Style::default().bg(theme.tab_bar_bg));

        for slot in self.layout() {
            let visible = slot.rect.intersect(self.area);
            if visible.is_empty() {
                break;
            }
            let Some(tab) = self.tabs.get(slot.index) else {
                continue;
            };
            let active = self.active == Some(tab.id);
            let hovered = self.hover.tab == Some(slot.index);

            let (bg, fg) = if active {
                (theme.tab_active_bg, theme.tab_active_fg)
            } else if hovered {
                (theme.tab_hover_bg, theme.tab_inactive_fg)
            } else {
                (theme.tab_inactive_bg, theme.tab_inactive_fg)
            };
            let base = Style::default().bg(bg).fg(fg);
            painter.fill(visible, base);

            let text_y = slot.rect.y + slot.rect.h / 2;
            let mut x = slot.rect.x.saturating_add(1);
            if tab.dirty {
                painter.text_in(visible, Pos::new(x, text_y), DIRTY_MARKER, base.fg(theme.dirty_fg));
                x = x.saturating_add(2);
            }

            let title_end = slot.close.x.saturating_sub(1);
            let title_width = title_end.saturating_sub(x);
            let title = truncate_to_width(&tab.title, title_width);
            let title_style = if active { base.add_mod(Mod::BOLD) } else { base };
            painter.text_in(visible, Pos::new(x, text_y), title, title_style);

            if hovered || active {
                let close_style = if hovered && self.hover.close {
                    base.bg(theme.close_hover_bg).fg(theme.close_fg)
                } else {
                    base.fg(theme.close_fg)
                };
                let close = slot.close.intersect(self.area);
                painter.fill(close, close_style);
                painter.text_in(close, Pos::new(slot.close.x, text_y), CLOSE_GLYPH, close_style);
            }
        }
    }
}

fn offset(origin: u16, index: usize, width: u16) -> u16 {
    let x = origin as u64 + index as u64 * width as u64;
    x.min(u16::MAX as u64) as u16
}

/// Cut `title` to at most `max` cells, marking the cut with `…`.
pub fn truncate_to_width(title: &str, max: u16) -> String {
    let max = max as usize;
    if UnicodeWidthStr::width(title) <= max {
        return title.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for g in title.graphemes(true) {
        let w = UnicodeWidthStr::width(g);
        if used + w + 1 > max {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
#[path = "../../tests/unit/views/tab_strip.rs"]
mod tests;
