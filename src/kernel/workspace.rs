//! Split container: an ordered row (or column) of panes with one focused.

use slotmap::{new_key_type, SlotMap};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::document::DocumentId;
use super::pane::{CloseOutcome, Pane, SaveAsOutcome, SaveOutcome};
use super::services::ports::{EngineFactory, Host, SaveAsRequest, WorkspaceConfig};
use crate::ui::core::geom::{Pos, Rect};

new_key_type! {
    pub struct PaneId;
}

/// `Vertical` places panes side by side; `Horizontal` stacks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitAxis {
    #[default]
    Vertical,
    Horizontal,
}

pub struct Workspace {
    panes: SlotMap<PaneId, Pane>,
    order: Vec<PaneId>,
    axis: SplitAxis,
    active: usize,
    engines: Rc<dyn EngineFactory>,
    config: Rc<WorkspaceConfig>,
    language_root: Option<PathBuf>,
}

impl Workspace {
    pub fn new(engines: Rc<dyn EngineFactory>, config: WorkspaceConfig) -> Self {
        let mut workspace = Self {
            panes: SlotMap::with_key(),
            order: Vec::new(),
            axis: SplitAxis::default(),
            active: 0,
            engines,
            config: Rc::new(config),
            language_root: None,
        };
        workspace.insert_pane();
        workspace
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn axis(&self) -> SplitAxis {
        self.axis
    }

    pub fn pane_count(&self) -> usize {
        self.order.len()
    }

    pub fn pane_ids(&self) -> &[PaneId] {
        &self.order
    }

    pub fn pane(&self, id: PaneId) -> Option<&Pane> {
        self.panes.get(id)
    }

    /// False once the pane or document behind `request` is gone, or the
    /// request was already answered. Hosts use this to drop stale prompts.
    pub fn save_as_still_wanted(&self, request: &SaveAsRequest) -> bool {
        self.panes
            .get(request.pane)
            .is_some_and(|pane| pane.awaiting_save_path(request.document))
    }

    pub fn pane_mut(&mut self, id: PaneId) -> Option<&mut Pane> {
        self.panes.get_mut(id)
    }

    pub fn active_pane_index(&self) -> usize {
        self.active
    }

    pub fn active_pane_id(&self) -> PaneId {
        self.order[self.active]
    }

    pub fn active_pane(&self) -> &Pane {
        &self.panes[self.active_pane_id()]
    }

    pub fn active_pane_mut(&mut self) -> &mut Pane {
        let id = self.active_pane_id();
        &mut self.panes[id]
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.panes.values().any(Pane::has_unsaved_changes)
    }

    pub fn window_title(&self) -> String {
        self.active_pane().window_title()
    }

    fn insert_pane(&mut self) -> PaneId {
        let engines = self.engines.clone();
        let config = self.config.clone();
        let id = self
            .panes
            .insert_with_key(|id| Pane::new(id, engines, config));
        if let Some(root) = &self.language_root {
            self.panes[id].initialize_language_services(root);
        }
        self.order.push(id);
        id
    }

    /// Append a pane along `axis` and focus it.
    pub fn add_pane(&mut self, axis: SplitAxis, host: &mut dyn Host) -> PaneId {
        self.axis = axis;
        let id = self.insert_pane();
        self.active = self.order.len() - 1;
        tracing::info!(pane = ?id, ?axis, panes = self.order.len(), "pane added");
        self.active_pane().update_window_title(host);
        id
    }

    pub fn split_vertically(&mut self, host: &mut dyn Host) -> PaneId {
        self.add_pane(SplitAxis::Vertical, host)
    }

    pub fn split_horizontally(&mut self, host: &mut dyn Host) -> PaneId {
        self.add_pane(SplitAxis::Horizontal, host)
    }

    /// Remove the pane at `index`. The only pane is never removed.
    pub fn remove_pane(&mut self, index: usize, host: &mut dyn Host) -> bool {
        if self.order.len() <= 1 {
            tracing::warn!("refusing to remove the only pane");
            return false;
        }
        if index >= self.order.len() {
            tracing::debug!(index, "remove of unknown pane index ignored");
            return false;
        }

        let id = self.order.remove(index);
        if index < self.active {
            self.active -= 1;
        } else if self.active >= self.order.len() {
            self.active = self.order.len() - 1;
        }

        if let Some(pane) = self.panes.remove(id) {
            let discarded = pane.shutdown();
            if discarded > 0 {
                tracing::warn!(pane = ?id, discarded, "pane removed with unsaved documents");
            }
        }
        tracing::info!(pane = ?id, panes = self.order.len(), "pane removed");
        self.active_pane().update_window_title(host);
        true
    }

    pub fn close_active_pane(&mut self, host: &mut dyn Host) -> bool {
        self.remove_pane(self.active, host)
    }

    pub fn focus_pane_at(&mut self, index: usize, host: &mut dyn Host) {
        if index >= self.order.len() || index == self.active {
            return;
        }
        self.active = index;
        tracing::debug!(index, "pane focused");
        self.active_pane().update_window_title(host);
    }

    pub fn focus_next_pane(&mut self, host: &mut dyn Host) {
        self.focus_pane_at(self.active + 1, host);
    }

    pub fn focus_previous_pane(&mut self, host: &mut dyn Host) {
        if self.active > 0 {
            self.focus_pane_at(self.active - 1, host);
        }
    }

    pub fn open_file(&mut self, host: &mut dyn Host) -> Option<DocumentId> {
        self.active_pane_mut().open_file(host)
    }

    pub fn open_path(&mut self, path: &Path, host: &mut dyn Host) -> Option<DocumentId> {
        self.active_pane_mut().open_path(path, host)
    }

    pub fn save_active_file(&mut self, host: &mut dyn Host) -> SaveOutcome {
        self.active_pane_mut().save_active_file(host)
    }

    pub fn create_new_tab(&mut self, host: &mut dyn Host) -> DocumentId {
        self.active_pane_mut().new_untitled_tab(host)
    }

    pub fn close_active_tab(&mut self, host: &mut dyn Host) -> CloseOutcome {
        self.active_pane_mut().close_active_tab(host)
    }

    pub fn select_next_tab(&mut self, host: &mut dyn Host) {
        self.active_pane_mut().select_next_tab(host);
    }

    pub fn select_previous_tab(&mut self, host: &mut dyn Host) {
        self.active_pane_mut().select_previous_tab(host);
    }

    pub fn select_tab_at(&mut self, index: usize, host: &mut dyn Host) {
        self.active_pane_mut().select_tab_at(index, host);
    }

    /// Route a save-as answer back to the pane that asked. Answers for panes
    /// that have since been removed are dropped.
    pub fn complete_save_as(
        &mut self,
        request: &SaveAsRequest,
        path: Option<PathBuf>,
        host: &mut dyn Host,
    ) -> SaveAsOutcome {
        let focused = self.active_pane_id() == request.pane;
        let Some(pane) = self.panes.get_mut(request.pane) else {
            tracing::debug!(pane = ?request.pane, "save-as answer for removed pane ignored");
            return SaveAsOutcome::Ignored;
        };
        let outcome = pane.complete_save_as(request.document, path, host);
        if !focused {
            // The pane titled the window on the way; put the focused one back.
            self.active_pane().update_window_title(host);
        }
        outcome
    }

    /// Focus the pane whose tab strip is under `pos` and let it handle the click.
    pub fn handle_strip_click(&mut self, pos: Pos, host: &mut dyn Host) -> bool {
        let Some(index) = self
            .order
            .iter()
            .position(|id| self.panes[*id].tab_strip().area().contains(pos))
        else {
            return false;
        };
        self.focus_pane_at(index, host);
        self.active_pane_mut().handle_strip_click(pos, host)
    }

    /// Forward pointer motion to every strip. Returns true if any needs a redraw.
    pub fn handle_pointer_moved(&mut self, pos: Pos) -> bool {
        let mut redraw = false;
        for pane in self.panes.values_mut() {
            let strip = pane.tab_strip_mut();
            redraw |= if strip.area().contains(pos) {
                strip.pointer_moved(pos)
            } else {
                strip.pointer_left()
            };
        }
        redraw
    }

    /// Drain document notices in every pane.
    pub fn sync(&mut self, host: &mut dyn Host) {
        let active = self.active_pane_id();
        let mut retitle = false;
        for (id, pane) in self.panes.iter_mut() {
            retitle |= pane.sync() && id == active;
        }
        if retitle {
            self.active_pane().update_window_title(host);
        }
    }

    pub fn tick(&mut self) {
        for pane in self.panes.values_mut() {
            pane.tick();
        }
    }

    pub fn initialize_language_services(&mut self, root: &Path) {
        tracing::info!(root = %root.display(), "initializing language services");
        self.language_root = Some(root.to_path_buf());
        for pane in self.panes.values_mut() {
            pane.initialize_language_services(root);
        }
    }

    /// Equal split of `area` along the axis, one cell between neighbours.
    pub fn pane_layout(&self, area: Rect) -> Vec<(PaneId, Rect)> {
        let n = u16::try_from(self.order.len()).unwrap_or(u16::MAX);
        let gaps = n.saturating_sub(1);
        let (span, origin) = match self.axis {
            SplitAxis::Vertical => (area.w, area.x),
            SplitAxis::Horizontal => (area.h, area.y),
        };
        let usable = span.saturating_sub(gaps);
        let base = usable / n.max(1);
        let extra = usable % n.max(1);

        let mut at = origin;
        self.order
            .iter()
            .enumerate()
            .map(|(i, id)| {
                // The last pane absorbs the remainder.
                let len = if i + 1 == self.order.len() { base + extra } else { base };
                let rect = match self.axis {
                    SplitAxis::Vertical => Rect::new(at, area.y, len, area.h),
                    SplitAxis::Horizontal => Rect::new(area.x, at, area.w, len),
                };
                at = at.saturating_add(len).saturating_add(1);
                (*id, rect)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/workspace.rs"]
mod tests;
