//! One open buffer: identity, file binding, dirty state, and its engine.

use lsp_types::Url;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;

use super::language::LanguageId;
use super::services::ports::{DocumentEngine, FileError, FileSystem};

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(u64);

impl DocumentId {
    fn next() -> Self {
        Self(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    TitleChanged(String),
    DirtyChanged(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentNotice {
    pub id: DocumentId,
    pub event: DocumentEvent,
}

#[derive(Debug)]
pub enum DocumentError {
    Io { path: PathBuf, source: FileError },
    /// Save without a bound path; the caller has to go through save-as.
    NoPath,
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            DocumentError::NoPath => write!(f, "No file path specified"),
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocumentError::Io { source, .. } => Some(source),
            DocumentError::NoPath => None,
        }
    }
}

pub struct Document {
    id: DocumentId,
    path: Option<PathBuf>,
    display_name: String,
    dirty: bool,
    language: LanguageId,
    engine: Box<dyn DocumentEngine>,
    subscriber: Option<Sender<DocumentNotice>>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.id)
            .field("path", &self.path)
            .field("display_name", &self.display_name)
            .field("dirty", &self.dirty)
            .field("language", &self.language)
            .finish()
    }
}

impl Document {
    pub fn create(
        mut engine: Box<dyn DocumentEngine>,
        initial_content: Option<&str>,
        display_name: &str,
    ) -> Self {
        if let Some(content) = initial_content {
            engine.set_text(content);
        }
        Self {
            id: DocumentId::next(),
            path: None,
            display_name: display_name.to_string(),
            dirty: false,
            language: LanguageId::PlainText,
            engine,
            subscriber: None,
        }
    }

    /// Read `path` and bind a new document to it. Nothing is allocated when the read fails.
    /// Relative paths are resolved against the current directory.
    pub fn load_from_path(
        mut engine: Box<dyn DocumentEngine>,
        files: &dyn FileSystem,
        path: &Path,
    ) -> Result<Self, DocumentError> {
        let path = absolute_path(path);
        let path = path.as_path();
        let content = files
            .read_text_file(path)
            .map_err(|source| DocumentError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        engine.set_text(&content);

        let language = LanguageId::from_path(path);
        let mut doc = Self {
            id: DocumentId::next(),
            path: Some(path.to_path_buf()),
            display_name: display_name_for(path),
            dirty: false,
            language,
            engine,
            subscriber: None,
        };
        if let Some(uri) = doc.uri() {
            doc.engine.notify_opened(&uri, language.language_id());
        }
        Ok(doc)
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn language(&self) -> LanguageId {
        self.language
    }

    pub fn display_title(&self) -> String {
        if self.dirty {
            format!("● {}", self.display_name)
        } else {
            self.display_name.clone()
        }
    }

    pub fn text(&self) -> String {
        self.engine.text()
    }

    /// Install the single subscriber for title/dirty notices, replacing any previous one.
    pub fn subscribe(&mut self, tx: Sender<DocumentNotice>) {
        self.subscriber = Some(tx);
    }

    pub fn mark_dirty(&mut self) {
        if self.dirty {
            return;
        }
        self.dirty = true;
        self.emit(DocumentEvent::DirtyChanged(true));
    }

    pub fn replace_text(&mut self, text: &str) {
        self.engine.set_text(text);
        self.mark_dirty();
    }

    pub fn save(&mut self, files: &dyn FileSystem) -> Result<(), DocumentError> {
        let Some(path) = self.path.clone() else {
            return Err(DocumentError::NoPath);
        };
        write_text(files, &path, &self.engine.text())?;

        self.set_clean();
        if let Some(uri) = self.uri() {
            self.engine.notify_saved(&uri);
        }
        tracing::info!(doc = %self.id, path = %path.display(), "saved");
        Ok(())
    }

    pub fn save_as(&mut self, files: &dyn FileSystem, path: &Path) -> Result<(), DocumentError> {
        let path = absolute_path(path);
        let path = path.as_path();
        write_text(files, path, &self.engine.text())?;

        let rebinding = self.path.as_deref() != Some(path);
        if rebinding {
            if let Some(old) = self.uri() {
                self.engine.notify_closed(&old);
            }
            self.path = Some(path.to_path_buf());
            self.language = LanguageId::from_path(path);
            if let Some(uri) = self.uri() {
                self.engine.notify_opened(&uri, self.language.language_id());
            }

            let name = display_name_for(path);
            if name != self.display_name {
                self.display_name = name;
                self.emit(DocumentEvent::TitleChanged(self.display_name.clone()));
            }
        }

        self.set_clean();
        if let Some(uri) = self.uri() {
            self.engine.notify_saved(&uri);
        }
        tracing::info!(doc = %self.id, path = %path.display(), "saved as");
        Ok(())
    }

    pub fn tick(&mut self) {
        self.engine.tick();
    }

    pub fn initialize_engine(&mut self, workspace_root: &Path) {
        self.engine.initialize(workspace_root);
    }

    /// Release the engine. Consumes the document, so nothing can follow it.
    pub fn close(mut self) {
        if let Some(uri) = self.uri() {
            self.engine.notify_closed(&uri);
        }
        tracing::debug!(doc = %self.id, "document closed");
    }

    fn set_clean(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        self.emit(DocumentEvent::DirtyChanged(false));
    }

    fn uri(&self) -> Option<Url> {
        let path = self.path.as_deref()?;
        match Url::from_file_path(path) {
            Ok(uri) => Some(uri),
            Err(()) => {
                tracing::debug!(doc = %self.id, path = %path.display(), "path has no file uri");
                None
            }
        }
    }

    fn emit(&mut self, event: DocumentEvent) {
        let Some(tx) = self.subscriber.as_ref() else {
            return;
        };
        let notice = DocumentNotice { id: self.id, event };
        if tx.send(notice).is_err() {
            self.subscriber = None;
        }
    }
}

fn absolute_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "cannot resolve relative path");
            path.to_path_buf()
        }
    }
}

fn display_name_for(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

fn write_text(files: &dyn FileSystem, path: &Path, text: &str) -> Result<(), DocumentError> {
    files
        .write_text_file(path, text)
        .map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/document.rs"]
mod tests;
