//! Demo frontend: a terminal host and its event loop.

pub mod host;
pub mod input;
pub mod render;

use std::io;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};

use panemux::kernel::Workspace;
use panemux::tui::terminal_guard::TerminationSignal;

use host::TerminalHost;
use input::Flow;

const FRAME: Duration = Duration::from_millis(50);

pub fn run(
    ws: &mut Workspace,
    host: &mut TerminalHost,
    signals: &Receiver<TerminationSignal>,
) -> io::Result<()> {
    loop {
        ws.sync(host);
        ws.tick();
        host.begin_next_save_prompt(ws);
        host.render(ws)?;

        if let Ok(signal) = signals.try_recv() {
            tracing::info!(?signal, "shutting down");
            return Ok(());
        }
        if !event::poll(FRAME)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if input::handle_key(key, ws, host) == Flow::Quit {
                    tracing::info!("quit requested");
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => {
                input::handle_mouse(mouse, ws, host);
            }
            _ => {}
        }
    }
}
