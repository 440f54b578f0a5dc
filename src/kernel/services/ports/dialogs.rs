use std::path::PathBuf;

use crate::kernel::{DocumentId, PaneId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Save,
    DontSave,
    Cancel,
}

/// An in-flight save-as, addressed by stable ids so the answer can arrive
/// after any number of other events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveAsRequest {
    pub pane: PaneId,
    pub document: DocumentId,
    pub suggested_name: String,
    pub directory: Option<PathBuf>,
}

pub trait Dialogs {
    fn pick_open_path(&mut self) -> Option<PathBuf>;

    /// Ask the user for a destination. The host answers later through
    /// `Workspace::complete_save_as`; `None` there means the dialog was dismissed.
    fn request_save_path(&mut self, request: SaveAsRequest);

    fn confirm_save_discard_cancel(&mut self, message: &str) -> ConfirmChoice;

    fn report_error(&mut self, title: &str, message: &str);
}
