//! UI layer (thin wrapper over `ratatui`).
//!
//! Widgets emit `PaintCmd`s against plain cell geometry; only the backend
//! adapter touches `ratatui` types.

pub mod backend;
pub mod core;
