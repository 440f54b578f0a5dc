//! A tab container: owns its documents, the active pointer, and the
//! close-confirmation workflow.
//!
//! Every operation that can change what the user sees takes the `Host` so the
//! window title follows the active document. A pane is never observably
//! empty: closing the last tab creates a fresh untitled one.

use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};

use super::document::{Document, DocumentError, DocumentEvent, DocumentId, DocumentNotice};
use super::services::ports::{
    ConfirmChoice, EngineFactory, Host, SaveAsRequest, WorkspaceConfig,
};
use super::workspace::PaneId;
use crate::ui::core::geom::Pos;
use crate::views::tab_strip::{TabStrip, TabStripEvent};

const OPEN_FAILED: &str = "Failed to open file";
const SAVE_FAILED: &str = "Failed to save file";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    Cancelled,
    /// Suspended until the host answers the save-as request.
    AwaitingSavePath,
    /// A close for this document is already waiting on save-as.
    AlreadyPending,
    Failed,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseState {
    Idle,
    Confirming,
    Saving,
    Discarding,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    AwaitingSavePath,
    Failed,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveAsOutcome {
    Saved,
    /// Saved, and the close waiting on it went through.
    Closed,
    Cancelled,
    Failed,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveAsPurpose {
    Save,
    SaveThenClose,
}

pub struct Pane {
    id: PaneId,
    documents: FxHashMap<DocumentId, Document>,
    order: Vec<DocumentId>,
    active: Option<DocumentId>,
    tab_strip: TabStrip,
    engines: Rc<dyn EngineFactory>,
    config: Rc<WorkspaceConfig>,
    notices_tx: Sender<DocumentNotice>,
    notices: Receiver<DocumentNotice>,
    pending_save_as: FxHashMap<DocumentId, SaveAsPurpose>,
    language_root: Option<PathBuf>,
}

impl std::fmt::Debug for Pane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pane")
            .field("id", &self.id)
            .field("order", &self.order)
            .field("active", &self.active)
            .field("pending_save_as", &self.pending_save_as)
            .finish()
    }
}

impl Pane {
    /// New pane holding one untitled tab. The window title is left alone; the
    /// caller refreshes it once the pane is focused.
    pub fn new(id: PaneId, engines: Rc<dyn EngineFactory>, config: Rc<WorkspaceConfig>) -> Self {
        let (notices_tx, notices) = mpsc::channel();
        let mut pane = Self {
            id,
            documents: FxHashMap::default(),
            order: Vec::new(),
            active: None,
            tab_strip: TabStrip::new(config.tab_strip),
            engines,
            config,
            notices_tx,
            notices,
            pending_save_as: FxHashMap::default(),
            language_root: None,
        };
        let doc = Document::create(pane.engines.create(), None, &pane.config.untitled_name);
        let first = pane.insert_document(doc);
        pane.active = Some(first);
        pane.tab_strip.set_active(first);
        pane
    }

    pub fn id(&self) -> PaneId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn tab_ids(&self) -> &[DocumentId] {
        &self.order
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(&id)
    }

    pub fn active_document_id(&self) -> Option<DocumentId> {
        self.active
    }

    pub fn active_document(&self) -> Option<&Document> {
        self.active.and_then(|id| self.documents.get(&id))
    }

    pub fn active_index(&self) -> Option<usize> {
        let active = self.active?;
        self.order.iter().position(|id| *id == active)
    }

    pub fn tab_strip(&self) -> &TabStrip {
        &self.tab_strip
    }

    pub fn tab_strip_mut(&mut self) -> &mut TabStrip {
        &mut self.tab_strip
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.documents.values().any(Document::is_dirty)
    }

    /// Whether a close of `id` is suspended on a save-as answer.
    pub fn pending_close(&self, id: DocumentId) -> bool {
        self.pending_save_as.get(&id) == Some(&SaveAsPurpose::SaveThenClose)
    }

    /// Whether a save-as answer for `id` would still be acted on.
    pub fn awaiting_save_path(&self, id: DocumentId) -> bool {
        self.pending_save_as.contains_key(&id)
    }

    pub fn close_state(&self, id: DocumentId) -> CloseState {
        if self.pending_close(id) {
            CloseState::Saving
        } else {
            CloseState::Idle
        }
    }

    pub fn window_title(&self) -> String {
        match self.active_document() {
            Some(doc) => format!("{} - {}", self.config.app_title, doc.display_title()),
            None => self.config.app_title.clone(),
        }
    }

    pub fn update_window_title(&self, host: &mut dyn Host) {
        let title = self.window_title();
        host.chrome().set_title(&title);
    }

    pub fn create_tab(
        &mut self,
        content: Option<&str>,
        display_name: &str,
        host: &mut dyn Host,
    ) -> DocumentId {
        let doc = Document::create(self.engines.create(), content, display_name);
        let id = self.insert_document(doc);
        self.activate(id, host);
        tracing::debug!(pane = ?self.id, doc = %id, "tab created");
        id
    }

    pub fn new_untitled_tab(&mut self, host: &mut dyn Host) -> DocumentId {
        let name = self.config.untitled_name.clone();
        self.create_tab(None, &name, host)
    }

    /// Load `path` into a new active tab. On failure nothing changes and the
    /// error is handed back unreported.
    pub fn open_file_in_new_tab(
        &mut self,
        path: &Path,
        host: &mut dyn Host,
    ) -> Result<DocumentId, DocumentError> {
        let doc = Document::load_from_path(self.engines.create(), host.files(), path)?;
        let id = self.insert_document(doc);
        self.activate(id, host);
        tracing::info!(pane = ?self.id, doc = %id, path = %path.display(), "file opened");
        Ok(id)
    }

    /// Ask the host for a path and open it. A dismissed picker does nothing.
    pub fn open_file(&mut self, host: &mut dyn Host) -> Option<DocumentId> {
        let path = host.dialogs().pick_open_path()?;
        self.open_path(&path, host)
    }

    /// Open `path`, reporting a failure to the user.
    pub fn open_path(&mut self, path: &Path, host: &mut dyn Host) -> Option<DocumentId> {
        match self.open_file_in_new_tab(path, host) {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::warn!(pane = ?self.id, path = %path.display(), error = %err, "open failed");
                host.dialogs().report_error(OPEN_FAILED, &err.to_string());
                None
            }
        }
    }

    pub fn select_tab(&mut self, id: DocumentId, host: &mut dyn Host) {
        if self.active == Some(id) || !self.documents.contains_key(&id) {
            return;
        }
        self.activate(id, host);
    }

    pub fn select_tab_at(&mut self, index: usize, host: &mut dyn Host) {
        if let Some(id) = self.order.get(index).copied() {
            self.select_tab(id, host);
        }
    }

    pub fn select_next_tab(&mut self, host: &mut dyn Host) {
        let Some(index) = self.active_index() else {
            return;
        };
        if index + 1 < self.order.len() {
            self.select_tab_at(index + 1, host);
        }
    }

    pub fn select_previous_tab(&mut self, host: &mut dyn Host) {
        match self.active_index() {
            Some(index) if index > 0 => self.select_tab_at(index - 1, host),
            _ => {}
        }
    }

    pub fn mark_dirty(&mut self, id: DocumentId, host: &mut dyn Host) {
        if let Some(doc) = self.documents.get_mut(&id) {
            doc.mark_dirty();
            self.refresh(host);
        }
    }

    pub fn replace_text(&mut self, id: DocumentId, text: &str, host: &mut dyn Host) {
        if let Some(doc) = self.documents.get_mut(&id) {
            doc.replace_text(text);
            self.refresh(host);
        }
    }

    pub fn close_active_tab(&mut self, host: &mut dyn Host) -> CloseOutcome {
        match self.active {
            Some(id) => self.close_tab(id, host),
            None => CloseOutcome::Ignored,
        }
    }

    pub fn close_tab(&mut self, id: DocumentId, host: &mut dyn Host) -> CloseOutcome {
        let Some(doc) = self.documents.get(&id) else {
            tracing::debug!(pane = ?self.id, doc = %id, "close of unknown document ignored");
            return CloseOutcome::Ignored;
        };
        if self.pending_close(id) {
            tracing::debug!(pane = ?self.id, doc = %id, "close already waiting on save-as");
            return CloseOutcome::AlreadyPending;
        }
        if !doc.is_dirty() {
            self.remove_document(id, host);
            return CloseOutcome::Closed;
        }

        let message = format!("Do you want to save changes to \"{}\"?", doc.display_name());
        self.trace_close(id, CloseState::Idle, CloseState::Confirming);
        match host.dialogs().confirm_save_discard_cancel(&message) {
            ConfirmChoice::Save => {
                self.trace_close(id, CloseState::Confirming, CloseState::Saving);
                self.save_then_close(id, host)
            }
            ConfirmChoice::DontSave => {
                self.trace_close(id, CloseState::Confirming, CloseState::Discarding);
                self.remove_document(id, host);
                CloseOutcome::Closed
            }
            ConfirmChoice::Cancel => {
                self.trace_close(id, CloseState::Confirming, CloseState::Cancelled);
                CloseOutcome::Cancelled
            }
        }
    }

    fn save_then_close(&mut self, id: DocumentId, host: &mut dyn Host) -> CloseOutcome {
        let bound = self
            .documents
            .get(&id)
            .is_some_and(|doc| doc.path().is_some());
        if bound {
            if self.save_document(id, host) {
                self.remove_document(id, host);
                return CloseOutcome::Closed;
            }
            self.trace_close(id, CloseState::Saving, CloseState::Idle);
            return CloseOutcome::Failed;
        }

        if let Some(purpose) = self.pending_save_as.get_mut(&id) {
            // A plain save-as is already on screen; let its answer close the tab too.
            *purpose = SaveAsPurpose::SaveThenClose;
            return CloseOutcome::AwaitingSavePath;
        }
        self.request_save_as(id, SaveAsPurpose::SaveThenClose, host);
        CloseOutcome::AwaitingSavePath
    }

    pub fn save_active_file(&mut self, host: &mut dyn Host) -> SaveOutcome {
        let Some(id) = self.active else {
            return SaveOutcome::Ignored;
        };
        let Some(doc) = self.documents.get_mut(&id) else {
            return SaveOutcome::Ignored;
        };
        match doc.save(host.files()) {
            Ok(()) => {
                self.refresh(host);
                SaveOutcome::Saved
            }
            Err(DocumentError::NoPath) => {
                if !self.pending_save_as.contains_key(&id) {
                    self.request_save_as(id, SaveAsPurpose::Save, host);
                }
                SaveOutcome::AwaitingSavePath
            }
            Err(err) => {
                self.report_save_failure(id, &err, host);
                SaveOutcome::Failed
            }
        }
    }

    /// Resume the save-as started for `id`. `None` means the user dismissed
    /// the dialog: the document stays open and dirty.
    pub fn complete_save_as(
        &mut self,
        id: DocumentId,
        path: Option<PathBuf>,
        host: &mut dyn Host,
    ) -> SaveAsOutcome {
        let Some(purpose) = self.pending_save_as.remove(&id) else {
            tracing::debug!(pane = ?self.id, doc = %id, "save-as answer without request ignored");
            return SaveAsOutcome::Ignored;
        };
        let closing = purpose == SaveAsPurpose::SaveThenClose;
        let Some(doc) = self.documents.get_mut(&id) else {
            return SaveAsOutcome::Ignored;
        };
        let Some(path) = path else {
            if closing {
                self.trace_close(id, CloseState::Saving, CloseState::Idle);
            }
            tracing::debug!(pane = ?self.id, doc = %id, "save-as dismissed");
            return SaveAsOutcome::Cancelled;
        };

        if let Err(err) = doc.save_as(host.files(), &path) {
            self.report_save_failure(id, &err, host);
            if closing {
                self.trace_close(id, CloseState::Saving, CloseState::Idle);
            }
            return SaveAsOutcome::Failed;
        }
        self.refresh(host);
        if closing {
            self.remove_document(id, host);
            SaveAsOutcome::Closed
        } else {
            SaveAsOutcome::Saved
        }
    }

    /// Route a click on the tab strip to select/close.
    pub fn handle_strip_click(&mut self, pos: Pos, host: &mut dyn Host) -> bool {
        match self.tab_strip.pointer_down(pos) {
            Some(TabStripEvent::Selected(id)) => {
                self.select_tab(id, host);
                true
            }
            Some(TabStripEvent::Closed(id)) => {
                self.close_tab(id, host);
                true
            }
            None => false,
        }
    }

    /// Drain document notices into the tab strip. Returns true when the
    /// active document's label changed.
    pub fn sync(&mut self) -> bool {
        let mut active_changed = false;
        while let Ok(notice) = self.notices.try_recv() {
            if !self.documents.contains_key(&notice.id) {
                continue;
            }
            match &notice.event {
                DocumentEvent::TitleChanged(title) => {
                    self.tab_strip.update_title(notice.id, title)
                }
                DocumentEvent::DirtyChanged(dirty) => {
                    self.tab_strip.update_dirty(notice.id, *dirty)
                }
            }
            active_changed |= self.active == Some(notice.id);
        }
        active_changed
    }

    pub fn tick(&mut self) {
        for doc in self.documents.values_mut() {
            doc.tick();
        }
    }

    /// Start language services for every document, and for documents created later.
    pub fn initialize_language_services(&mut self, root: &Path) {
        self.language_root = Some(root.to_path_buf());
        for doc in self.documents.values_mut() {
            doc.initialize_engine(root);
        }
    }

    /// Close every document engine. Returns how many dirty documents were discarded.
    pub fn shutdown(mut self) -> usize {
        let mut discarded = 0;
        for id in std::mem::take(&mut self.order) {
            if let Some(doc) = self.documents.remove(&id) {
                discarded += usize::from(doc.is_dirty());
                doc.close();
            }
        }
        discarded
    }

    fn insert_document(&mut self, mut doc: Document) -> DocumentId {
        let id = doc.id();
        doc.subscribe(self.notices_tx.clone());
        if let Some(root) = &self.language_root {
            doc.initialize_engine(root);
        }
        self.tab_strip
            .add_tab(id, doc.display_name().to_string(), doc.is_dirty());
        self.order.push(id);
        self.documents.insert(id, doc);
        id
    }

    fn activate(&mut self, id: DocumentId, host: &mut dyn Host) {
        self.active = Some(id);
        self.tab_strip.set_active(id);
        self.update_window_title(host);
    }

    fn remove_document(&mut self, id: DocumentId, host: &mut dyn Host) {
        let Some(doc) = self.documents.remove(&id) else {
            return;
        };
        self.pending_save_as.remove(&id);
        self.order.retain(|d| *d != id);
        self.tab_strip.remove_tab(id);
        doc.close();
        tracing::info!(pane = ?self.id, doc = %id, "tab closed");

        if self.active != Some(id) {
            return;
        }
        self.active = None;
        match self.order.last().copied() {
            Some(next) => self.activate(next, host),
            None => {
                self.new_untitled_tab(host);
            }
        }
    }

    fn refresh(&mut self, host: &mut dyn Host) {
        if self.sync() {
            self.update_window_title(host);
        }
    }

    /// Save a path-bound document, reporting failures. Returns true on success.
    fn save_document(&mut self, id: DocumentId, host: &mut dyn Host) -> bool {
        let Some(doc) = self.documents.get_mut(&id) else {
            return false;
        };
        match doc.save(host.files()) {
            Ok(()) => {
                self.refresh(host);
                true
            }
            Err(err) => {
                self.report_save_failure(id, &err, host);
                false
            }
        }
    }

    fn request_save_as(&mut self, id: DocumentId, purpose: SaveAsPurpose, host: &mut dyn Host) {
        let Some(doc) = self.documents.get(&id) else {
            return;
        };
        let request = SaveAsRequest {
            pane: self.id,
            document: id,
            suggested_name: doc.display_name().to_string(),
            directory: doc.path().and_then(Path::parent).map(Path::to_path_buf),
        };
        self.pending_save_as.insert(id, purpose);
        tracing::debug!(pane = ?self.id, doc = %id, ?purpose, "save-as requested");
        host.dialogs().request_save_path(request);
    }

    fn report_save_failure(&self, id: DocumentId, err: &DocumentError, host: &mut dyn Host) {
        tracing::warn!(pane = ?self.id, doc = %id, error = %err, "save failed");
        host.dialogs().report_error(SAVE_FAILED, &err.to_string());
    }

    fn trace_close(&self, id: DocumentId, from: CloseState, to: CloseState) {
        tracing::debug!(pane = ?self.id, doc = %id, ?from, ?to, "close state");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/pane.rs"]
mod tests;
