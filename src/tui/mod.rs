//! Terminal integration (crossterm + ratatui) for the demo binary.
//!
//! Kept apart from `kernel` so the workspace core builds without terminal crates.

pub mod terminal_guard;
