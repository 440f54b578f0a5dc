//! panemux - split-pane, tabbed document workspace.
//!
//! Modules:
//! - kernel: documents, panes, workspace, and the capability ports
//! - views: tab strip widget (layout, hit-testing, painting)
//! - ui: geometry, paint commands, rendering backends
//! - tui: terminal lifetime for the demo binary

pub mod kernel;
#[cfg(feature = "tui")]
pub mod tui;
pub mod ui;
pub mod views;
