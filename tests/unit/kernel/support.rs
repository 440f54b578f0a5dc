//! Recording doubles for the workspace capabilities.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use lsp_types::Url;
use rustc_hash::FxHashMap;

use crate::kernel::services::ports::{
    ConfirmChoice, Dialogs, DocumentEngine, EngineFactory, FileError, FileResult, FileSystem,
    Host, SaveAsRequest, WindowChrome,
};

#[derive(Default)]
pub struct MemoryFs {
    files: RefCell<FxHashMap<PathBuf, String>>,
    pub fail_writes: Cell<bool>,
}

impl MemoryFs {
    pub fn insert(&self, path: impl Into<PathBuf>, content: &str) {
        self.files
            .borrow_mut()
            .insert(path.into(), content.to_string());
    }

    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }
}

impl FileSystem for MemoryFs {
    fn read_text_file(&self, path: &Path) -> FileResult<String> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| FileError::NotFound(path.to_path_buf()))
    }

    fn write_text_file(&self, path: &Path, content: &str) -> FileResult<()> {
        if self.fail_writes.get() {
            return Err(FileError::PermissionDenied(path.to_path_buf()));
        }
        self.insert(path, content);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct EngineLog {
    pub calls: Vec<String>,
    pub dropped: usize,
}

impl EngineLog {
    pub fn count(&self, prefix: &str) -> usize {
        self.calls.iter().filter(|c| c.starts_with(prefix)).count()
    }
}

pub struct RecordingEngine {
    text: String,
    log: Rc<RefCell<EngineLog>>,
}

impl DocumentEngine for RecordingEngine {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.log.borrow_mut().calls.push("set_text".to_string());
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn initialize(&mut self, workspace_root: &Path) {
        self.log
            .borrow_mut()
            .calls
            .push(format!("initialize:{}", workspace_root.display()));
    }

    fn tick(&mut self) {
        self.log.borrow_mut().calls.push("tick".to_string());
    }

    fn notify_opened(&mut self, uri: &Url, language_id: &str) {
        self.log
            .borrow_mut()
            .calls
            .push(format!("opened:{}:{}", uri, language_id));
    }

    fn notify_saved(&mut self, uri: &Url) {
        self.log.borrow_mut().calls.push(format!("saved:{}", uri));
    }

    fn notify_closed(&mut self, uri: &Url) {
        self.log.borrow_mut().calls.push(format!("closed:{}", uri));
    }
}

impl Drop for RecordingEngine {
    fn drop(&mut self) {
        self.log.borrow_mut().dropped += 1;
    }
}

#[derive(Default, Clone)]
pub struct RecordingEngines {
    pub log: Rc<RefCell<EngineLog>>,
}

impl RecordingEngines {
    pub fn engine(&self) -> Box<dyn DocumentEngine> {
        self.create()
    }
}

impl EngineFactory for RecordingEngines {
    fn create(&self) -> Box<dyn DocumentEngine> {
        Box::new(RecordingEngine {
            text: String::new(),
            log: self.log.clone(),
        })
    }
}

/// Fresh ids, allocated the same way documents get them.
pub fn doc_ids(n: usize) -> Vec<crate::kernel::DocumentId> {
    let engines = RecordingEngines::default();
    (0..n)
        .map(|_| crate::kernel::document::Document::create(engines.engine(), None, "t").id())
        .collect()
}

#[derive(Default)]
pub struct ScriptedHost {
    pub fs: MemoryFs,
    pub confirms: VecDeque<ConfirmChoice>,
    pub confirm_messages: Vec<String>,
    pub open_paths: VecDeque<Option<PathBuf>>,
    pub save_requests: Vec<SaveAsRequest>,
    pub errors: Vec<(String, String)>,
    pub titles: Vec<String>,
}

impl ScriptedHost {
    pub fn answering(choice: ConfirmChoice) -> Self {
        let mut host = Self::default();
        host.confirms.push_back(choice);
        host
    }

    pub fn last_title(&self) -> Option<&str> {
        self.titles.last().map(String::as_str)
    }
}

impl Dialogs for ScriptedHost {
    fn pick_open_path(&mut self) -> Option<PathBuf> {
        self.open_paths.pop_front().flatten()
    }

    fn request_save_path(&mut self, request: SaveAsRequest) {
        self.save_requests.push(request);
    }

    fn confirm_save_discard_cancel(&mut self, message: &str) -> ConfirmChoice {
        self.confirm_messages.push(message.to_string());
        self.confirms.pop_front().unwrap_or(ConfirmChoice::Cancel)
    }

    fn report_error(&mut self, title: &str, message: &str) {
        self.errors.push((title.to_string(), message.to_string()));
    }
}

impl WindowChrome for ScriptedHost {
    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }
}

impl Host for ScriptedHost {
    fn files(&self) -> &dyn FileSystem {
        &self.fs
    }

    fn dialogs(&mut self) -> &mut dyn Dialogs {
        self
    }

    fn chrome(&mut self) -> &mut dyn WindowChrome {
        self
    }
}
