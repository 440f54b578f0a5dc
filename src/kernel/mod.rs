//! Headless workspace core: documents, panes and the split container.
//!
//! Everything outside the process (disk, dialogs, window chrome, the text
//! engine) is reached through `services::ports`.

pub mod document;
pub mod language;
pub mod pane;
pub mod services;
pub mod workspace;

pub use document::{Document, DocumentError, DocumentEvent, DocumentId, DocumentNotice};
pub use language::LanguageId;
pub use pane::{CloseOutcome, CloseState, Pane, SaveAsOutcome, SaveOutcome};
pub use workspace::{PaneId, SplitAxis, Workspace};

#[cfg(test)]
#[path = "../../tests/unit/kernel/support.rs"]
pub(crate) mod test_support;
