use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc;

use panemux::kernel::services::adapters::{ensure_settings_file, load_settings, RopeEngineFactory};
use panemux::kernel::Workspace;
use panemux::tui::terminal_guard::{self, TerminalGuard, TerminationSignal};
use panemux::ui::backend::terminal::RatatuiTerminal;

mod app;
mod logging;

fn main() -> io::Result<()> {
    let logging = logging::init();

    if let Err(err) = ensure_settings_file() {
        tracing::warn!(error = %err, "settings file unavailable");
    }
    let config = load_settings().unwrap_or_default();
    let files: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();

    let guard = TerminalGuard::enter()?;
    guard.restore_on_panic();
    let (signal_tx, signal_rx) = mpsc::channel();
    forward_signals(&guard, signal_tx);

    let mut host = app::host::TerminalHost::new(RatatuiTerminal::new(io::stdout())?);
    let mut workspace = Workspace::new(Rc::new(RopeEngineFactory), config);
    if let Ok(cwd) = std::env::current_dir() {
        workspace.initialize_language_services(&cwd);
    }
    for path in &files {
        workspace.open_path(path, &mut host);
    }
    workspace.active_pane().update_window_title(&mut host);

    let result = app::run(&mut workspace, &mut host, &signal_rx);
    if workspace.has_unsaved_changes() {
        tracing::warn!("exiting with unsaved changes");
    }
    drop(host);
    drop(guard);
    if let (Err(err), Some(logging)) = (&result, &logging) {
        eprintln!("panemux: {err} (logs in {})", logging.log_dir().display());
    }
    result
}

#[cfg(unix)]
fn forward_signals(guard: &TerminalGuard, tx: mpsc::Sender<TerminationSignal>) {
    if let Err(err) = terminal_guard::forward_termination_signals(guard.restorer(), tx) {
        tracing::warn!(error = %err, "signal forwarding unavailable");
    }
}

#[cfg(not(unix))]
fn forward_signals(_guard: &TerminalGuard, _tx: mpsc::Sender<TerminationSignal>) {}
