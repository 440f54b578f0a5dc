//! Per-platform locations for settings and logs.
//!
//! - macOS: ~/Library/Application Support/panemux/{settings.json,logs}
//! - Linux: $XDG_CONFIG_HOME/panemux (or ~/.config) and $XDG_DATA_HOME/panemux/logs
//!   (or ~/.local/share)
//! - Windows: %APPDATA%\panemux

use std::io;
use std::path::{Path, PathBuf};

pub(crate) const APP_NAME: &str = "panemux";
const LOG_DIR: &str = "logs";

pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        home_join("Library/Application Support")
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|d| PathBuf::from(d).join(APP_NAME))
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_or_home("XDG_CONFIG_HOME", ".config")
    }
}

pub fn data_dir() -> Option<PathBuf> {
    #[cfg(any(target_os = "macos", target_os = "windows"))]
    {
        config_dir()
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_or_home("XDG_DATA_HOME", ".local/share")
    }
}

pub fn log_dir() -> Option<PathBuf> {
    data_dir().map(|d| d.join(LOG_DIR))
}

pub fn ensure_log_dir() -> io::Result<PathBuf> {
    let dir = log_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "Cannot determine log directory")
    })?;
    ensure_dir(&dir)?;
    Ok(dir)
}

pub(crate) fn ensure_dir(dir: &Path) -> io::Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(not(target_os = "windows"))]
fn home_join(rel: &str) -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(rel).join(APP_NAME))
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn xdg_or_home(var: &str, fallback: &str) -> Option<PathBuf> {
    match std::env::var_os(var) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir).join(APP_NAME)),
        _ => home_join(fallback),
    }
}
