//! Keyboard and mouse routing to workspace operations.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use panemux::kernel::{CloseOutcome, SaveAsOutcome, SaveOutcome, Workspace};
use panemux::ui::core::geom::Pos;

use super::host::{Prompt, PromptKind, TerminalHost};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn handle_key(key: KeyEvent, ws: &mut Workspace, host: &mut TerminalHost) -> Flow {
    if host.prompt.is_some() {
        handle_prompt_key(key, ws, host);
        return Flow::Continue;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    if !(ctrl && key.code == KeyCode::Char('q')) {
        host.quit_armed = false;
    }
    host.clear_status();

    match (key.code, ctrl, alt) {
        (KeyCode::Char('q'), true, _) => return request_quit(ws, host),
        (KeyCode::Char('n'), true, _) => {
            ws.create_new_tab(host);
        }
        (KeyCode::Char('o'), true, _) => {
            host.prompt = Some(Prompt {
                kind: PromptKind::Open,
                input: String::new(),
            });
        }
        (KeyCode::Char('s'), true, _) => {
            if ws.save_active_file(host) == SaveOutcome::Saved {
                host.info("Saved");
            }
        }
        (KeyCode::Char('w'), true, _) => {
            if ws.close_active_tab(host) == CloseOutcome::AlreadyPending {
                host.info("Close already waiting for a file name");
            }
        }
        (KeyCode::Char('d'), true, _) => {
            ws.split_vertically(host);
        }
        (KeyCode::Char('e'), true, _) => {
            ws.split_horizontally(host);
        }
        (KeyCode::Char('k'), true, _) => {
            if !ws.close_active_pane(host) {
                host.info("Cannot close the only pane");
            }
        }
        (KeyCode::Left, _, true) => ws.select_previous_tab(host),
        (KeyCode::Right, _, true) => ws.select_next_tab(host),
        (KeyCode::Up, _, true) => ws.focus_previous_pane(host),
        (KeyCode::Down, _, true) => ws.focus_next_pane(host),
        (KeyCode::Char(c @ '1'..='9'), false, true) => {
            let index = c as usize - '1' as usize;
            ws.select_tab_at(index, host);
        }
        (KeyCode::Char(c), false, false) => edit_active(ws, host, |text| text.push(c)),
        (KeyCode::Enter, false, false) => edit_active(ws, host, |text| text.push('\n')),
        (KeyCode::Backspace, false, false) => edit_active(ws, host, |text| {
            text.pop();
        }),
        _ => {}
    }
    Flow::Continue
}

fn request_quit(ws: &Workspace, host: &mut TerminalHost) -> Flow {
    if ws.has_unsaved_changes() && !host.quit_armed {
        host.quit_armed = true;
        host.info("Unsaved changes. Press Ctrl-Q again to quit without saving");
        return Flow::Continue;
    }
    Flow::Quit
}

fn edit_active(ws: &mut Workspace, host: &mut TerminalHost, edit: impl FnOnce(&mut String)) {
    let pane = ws.active_pane_mut();
    let Some(doc) = pane.active_document() else {
        return;
    };
    let id = doc.id();
    let mut text = doc.text();
    edit(&mut text);
    pane.replace_text(id, &text, host);
}

fn handle_prompt_key(key: KeyEvent, ws: &mut Workspace, host: &mut TerminalHost) {
    let Some(prompt) = host.prompt.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            prompt.input.push(c);
        }
        KeyCode::Backspace => {
            prompt.input.pop();
        }
        KeyCode::Enter => {
            if let Some(prompt) = host.prompt.take() {
                submit_prompt(prompt, ws, host);
            }
        }
        KeyCode::Esc => {
            if let Some(prompt) = host.prompt.take() {
                if let PromptKind::SaveAs(request) = prompt.kind {
                    ws.complete_save_as(&request, None, host);
                }
            }
        }
        _ => {}
    }
}

fn submit_prompt(prompt: Prompt, ws: &mut Workspace, host: &mut TerminalHost) {
    let input = prompt.input.trim();
    match prompt.kind {
        PromptKind::Open => {
            if input.is_empty() {
                return;
            }
            host.answer_open(PathBuf::from(input));
            ws.open_file(host);
        }
        PromptKind::SaveAs(request) => {
            let path = if input.is_empty() {
                None
            } else {
                Some(absolute(PathBuf::from(input)))
            };
            match ws.complete_save_as(&request, path, host) {
                SaveAsOutcome::Saved | SaveAsOutcome::Closed => host.info("Saved"),
                SaveAsOutcome::Cancelled
                | SaveAsOutcome::Failed
                | SaveAsOutcome::Ignored => {}
            }
        }
    }
}

fn absolute(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}

/// Returns true when the frame should be redrawn.
pub fn handle_mouse(ev: MouseEvent, ws: &mut Workspace, host: &mut TerminalHost) -> bool {
    let pos = Pos::new(ev.column, ev.row);
    match ev.kind {
        MouseEventKind::Moved => ws.handle_pointer_moved(pos),
        MouseEventKind::Down(MouseButton::Left) => {
            if host.prompt.is_some() {
                return false;
            }
            if !ws.handle_strip_click(pos, host) {
                let index = ws
                    .pane_layout(host.main_area())
                    .iter()
                    .position(|(_, rect)| rect.contains(pos));
                if let Some(index) = index {
                    ws.focus_pane_at(index, host);
                }
            }
            true
        }
        _ => false,
    }
}
