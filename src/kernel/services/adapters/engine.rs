//! Default document engine: a `ropey::Rope` plus bookkeeping of the
//! language-service notifications it has been sent.

use lsp_types::{TextDocumentIdentifier, TextDocumentItem, Url};
use ropey::Rope;
use std::path::{Path, PathBuf};

use crate::kernel::services::ports::{DocumentEngine, EngineFactory};

#[derive(Debug, Default)]
pub struct RopeEngine {
    rope: Rope,
    /// Bumped on every text replacement, as an LSP document version.
    version: i32,
    workspace_root: Option<PathBuf>,
    open: Option<TextDocumentItem>,
    ticks: u64,
}

impl RopeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn workspace_root(&self) -> Option<&Path> {
        self.workspace_root.as_deref()
    }

    /// The document as last announced with `notify_opened`, if still open.
    pub fn open_document(&self) -> Option<&TextDocumentItem> {
        self.open.as_ref()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl DocumentEngine for RopeEngine {
    fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.version = self.version.saturating_add(1);
    }

    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn initialize(&mut self, workspace_root: &Path) {
        tracing::debug!(root = %workspace_root.display(), "engine initialized");
        self.workspace_root = Some(workspace_root.to_path_buf());
    }

    fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    fn notify_opened(&mut self, uri: &Url, language_id: &str) {
        tracing::debug!(%uri, language_id, version = self.version, "didOpen");
        self.open = Some(TextDocumentItem::new(
            uri.clone(),
            language_id.to_string(),
            self.version,
            self.rope.to_string(),
        ));
    }

    fn notify_saved(&mut self, uri: &Url) {
        tracing::debug!(%uri, "didSave");
    }

    fn notify_closed(&mut self, uri: &Url) {
        let closed = TextDocumentIdentifier::new(uri.clone());
        tracing::debug!(uri = %closed.uri, "didClose");
        if self.open.as_ref().is_some_and(|item| item.uri == closed.uri) {
            self.open = None;
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RopeEngineFactory;

impl EngineFactory for RopeEngineFactory {
    fn create(&self) -> Box<dyn DocumentEngine> {
        Box::new(RopeEngine::new())
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/engine.rs"]
mod tests;
