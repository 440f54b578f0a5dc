//! Binding to the text / language-service engine behind each document.
//!
//! The workspace never looks inside a buffer: it only moves whole texts in
//! and out and forwards lifecycle notifications.

use lsp_types::Url;
use std::path::Path;

pub trait DocumentEngine {
    fn set_text(&mut self, text: &str);

    fn text(&self) -> String;

    /// Start language services rooted at `workspace_root`.
    fn initialize(&mut self, workspace_root: &Path);

    /// Per-frame maintenance.
    fn tick(&mut self);

    fn notify_opened(&mut self, uri: &Url, language_id: &str);

    fn notify_saved(&mut self, uri: &Url);

    fn notify_closed(&mut self, uri: &Url);
}

/// Creates one exclusively owned engine per document.
pub trait EngineFactory {
    fn create(&self) -> Box<dyn DocumentEngine>;
}
