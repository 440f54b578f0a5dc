//! Terminal implementation of the workspace capabilities.
//!
//! Confirmation is a blocking key prompt over the last frame. Open and
//! save-as are status-line prompts driven by the event loop; save-as answers
//! go back through `Workspace::complete_save_as`.

use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use panemux::kernel::services::adapters::LocalFileSystem;
use panemux::kernel::services::ports::{
    ConfirmChoice, Dialogs, FileSystem, Host, SaveAsRequest, WindowChrome,
};
use panemux::kernel::Workspace;
use panemux::ui::backend::terminal::RatatuiTerminal;
use panemux::ui::core::geom::{Pos, Rect};
use panemux::ui::core::painter::{PaintCmd, Painter};
use panemux::ui::core::style::{Mod, Style};
use panemux::ui::core::theme::Theme;

use super::render::{self, StatusLine};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    Open,
    SaveAs(SaveAsRequest),
}

#[derive(Debug, Clone)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

impl Prompt {
    fn label(&self) -> &'static str {
        match self.kind {
            PromptKind::Open => "Open: ",
            PromptKind::SaveAs(_) => "Save as: ",
        }
    }
}

#[derive(Debug, Clone)]
enum Status {
    Info(String),
    Error(String),
}

pub struct TerminalHost {
    terminal: RatatuiTerminal,
    files: LocalFileSystem,
    theme: Theme,
    title: String,
    status: Option<Status>,
    save_requests: VecDeque<SaveAsRequest>,
    pub prompt: Option<Prompt>,
    open_answer: Option<PathBuf>,
    last_frame: Vec<PaintCmd>,
    main_area: Rect,
    pub quit_armed: bool,
}

impl TerminalHost {
    pub fn new(terminal: RatatuiTerminal) -> Self {
        Self {
            terminal,
            files: LocalFileSystem::new(),
            theme: Theme::default(),
            title: String::new(),
            status: None,
            save_requests: VecDeque::new(),
            prompt: None,
            open_answer: None,
            last_frame: Vec::new(),
            main_area: Rect::default(),
            quit_armed: false,
        }
    }

    /// Area the panes were laid out in on the last frame.
    pub fn main_area(&self) -> Rect {
        self.main_area
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.status = Some(Status::Info(message.into()));
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Answer the next `pick_open_path` call.
    pub fn answer_open(&mut self, path: PathBuf) {
        self.open_answer = Some(path);
    }

    /// Turn the oldest queued save-as request that `ws` still wants into the
    /// active prompt.
    pub fn begin_next_save_prompt(&mut self, ws: &Workspace) {
        if self.prompt.is_some() {
            return;
        }
        let request = loop {
            let Some(request) = self.save_requests.pop_front() else {
                return;
            };
            if ws.save_as_still_wanted(&request) {
                break request;
            }
            tracing::debug!(doc = %request.document, "stale save-as request dropped");
        };
        let input = match &request.directory {
            Some(dir) => dir.join(&request.suggested_name).display().to_string(),
            None => request.suggested_name.clone(),
        };
        self.prompt = Some(Prompt {
            kind: PromptKind::SaveAs(request),
            input,
        });
    }

    pub fn render(&mut self, ws: &mut Workspace) -> io::Result<()> {
        let (status_text, error) = self.status_text(ws);
        let prompt_caret = self
            .prompt
            .as_ref()
            .map(|p| 1 + p.label().len() + p.input.chars().count());
        let theme = &self.theme;
        let mut frame = None;

        self.terminal.draw(|backend, area| {
            let mut painter = Painter::new();
            let caret = render::paint_workspace(
                ws,
                area,
                theme,
                StatusLine {
                    text: &status_text,
                    error,
                },
                &mut painter,
            );
            backend.draw(area, painter.cmds());
            let cursor = match prompt_caret {
                Some(x) => Some(Pos::new(x as u16, area.bottom().saturating_sub(1))),
                None => caret,
            };
            backend.set_cursor(cursor);
            frame = Some((painter.take(), area));
        })?;

        if let Some((cmds, area)) = frame {
            self.last_frame = cmds;
            self.main_area = area.take_bottom(1).0;
        }
        Ok(())
    }

    fn status_text(&self, ws: &Workspace) -> (String, bool) {
        if let Some(prompt) = &self.prompt {
            return (format!("{}{}", prompt.label(), prompt.input), false);
        }
        match &self.status {
            Some(Status::Error(msg)) => (msg.clone(), true),
            Some(Status::Info(msg)) => (msg.clone(), false),
            None => (
                format!(
                    "[{}/{}] {}",
                    ws.active_pane_index() + 1,
                    ws.pane_count(),
                    self.title
                ),
                false,
            ),
        }
    }

    /// Draw the last frame with `line` over the status row.
    fn draw_overlay(&mut self, line: &str) -> io::Result<()> {
        let last = &self.last_frame;
        let theme = &self.theme;
        self.terminal.draw(|backend, area| {
            backend.draw(area, last);
            let (_, status) = area.take_bottom(1);
            let style = Style::default()
                .bg(theme.status_bg)
                .fg(theme.status_fg)
                .add_mod(Mod::BOLD);
            let mut painter = Painter::new();
            painter.fill(status, style);
            painter.text_in(status, Pos::new(status.x + 1, status.y), line, style);
            backend.draw(area, painter.cmds());
            backend.set_cursor(None);
        })
    }
}

impl Dialogs for TerminalHost {
    fn pick_open_path(&mut self) -> Option<PathBuf> {
        self.open_answer.take()
    }

    fn request_save_path(&mut self, request: SaveAsRequest) {
        self.save_requests.push_back(request);
    }

    fn confirm_save_discard_cancel(&mut self, message: &str) -> ConfirmChoice {
        let line = format!("{message}  [s]ave  [d]on't save  [c]ancel");
        loop {
            if let Err(err) = self.draw_overlay(&line) {
                tracing::warn!(error = %err, "confirm prompt draw failed");
                return ConfirmChoice::Cancel;
            }
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('s') | KeyCode::Char('y') => return ConfirmChoice::Save,
                    KeyCode::Char('d') | KeyCode::Char('n') => return ConfirmChoice::DontSave,
                    KeyCode::Char('c') | KeyCode::Esc => return ConfirmChoice::Cancel,
                    _ => {}
                },
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "confirm prompt read failed");
                    return ConfirmChoice::Cancel;
                }
            }
        }
    }

    fn report_error(&mut self, title: &str, message: &str) {
        self.status = Some(Status::Error(format!("{title}: {message}")));
    }
}

impl WindowChrome for TerminalHost {
    fn set_title(&mut self, title: &str) {
        if self.title == title {
            return;
        }
        self.title = title.to_string();
        if let Err(err) = crossterm::execute!(io::stdout(), crossterm::terminal::SetTitle(title)) {
            tracing::debug!(error = %err, "terminal title not set");
        }
    }
}

impl Host for TerminalHost {
    fn files(&self) -> &dyn FileSystem {
        &self.files
    }

    fn dialogs(&mut self) -> &mut dyn Dialogs {
        self
    }

    fn chrome(&mut self) -> &mut dyn WindowChrome {
        self
    }
}
