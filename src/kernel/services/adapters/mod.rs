//! Service adapters: OS-backed implementations of the ports.

pub mod engine;
pub mod file;
pub mod paths;
pub mod settings;

pub use engine::{RopeEngine, RopeEngineFactory};
pub use file::LocalFileSystem;
pub use paths::{config_dir, data_dir, ensure_log_dir, log_dir};
pub use settings::{ensure_settings_file, load_settings, load_settings_from, settings_path};
