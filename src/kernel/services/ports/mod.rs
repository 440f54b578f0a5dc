//! Service ports: traits + data contracts.

pub mod config;
pub mod dialogs;
pub mod engine;
pub mod file;

pub use config::{TabStripMetrics, WorkspaceConfig};
pub use dialogs::{ConfirmChoice, Dialogs, SaveAsRequest};
pub use engine::{DocumentEngine, EngineFactory};
pub use file::{FileError, FileSystem, Result as FileResult};

pub trait WindowChrome {
    fn set_title(&mut self, title: &str);
}

/// Everything the workspace reaches outside itself for.
pub trait Host {
    fn files(&self) -> &dyn FileSystem;

    fn dialogs(&mut self) -> &mut dyn Dialogs;

    fn chrome(&mut self) -> &mut dyn WindowChrome;
}
