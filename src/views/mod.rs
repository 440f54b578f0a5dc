//! Presentation widgets: pure layout, hit-testing and painting.

pub mod tab_strip;

pub use tab_strip::{TabHit, TabHover, TabItem, TabRect, TabStrip, TabStripEvent};
