//! Services layer (ports + adapters).
//!
//! - `ports`: capability contracts the workspace consumes.
//! - `adapters`: concrete implementations backed by the OS.

pub mod adapters;
pub mod ports;
