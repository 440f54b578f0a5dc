//! Frame composition: tab strips, document previews, separators, status line.

use unicode_width::UnicodeWidthStr;

use panemux::kernel::{SplitAxis, Workspace};
use panemux::ui::core::geom::{Pos, Rect};
use panemux::ui::core::painter::Painter;
use panemux::ui::core::style::{Mod, Style};
use panemux::ui::core::theme::Theme;

pub struct StatusLine<'a> {
    pub text: &'a str,
    pub error: bool,
}

/// Lay out every pane into `area` (updating each tab strip's hit area) and
/// paint the frame. Returns the caret position for the focused document.
pub fn paint_workspace(
    ws: &mut Workspace,
    area: Rect,
    theme: &Theme,
    status: StatusLine<'_>,
    painter: &mut Painter,
) -> Option<Pos> {
    painter.fill(area, Style::default().bg(theme.editor_bg));
    let (main, status_area) = area.take_bottom(1);

    let strip_h = ws.config().tab_strip.height;
    let axis = ws.axis();
    let focused = ws.active_pane_id();
    let layout = ws.pane_layout(main);
    let mut caret = None;

    for (i, (id, rect)) in layout.iter().enumerate() {
        let Some(pane) = ws.pane_mut(*id) else {
            continue;
        };
        let (strip, body) = rect.take_top(strip_h);
        pane.tab_strip_mut().set_area(strip);
        pane.tab_strip().paint(painter, theme);

        if let Some(doc) = pane.active_document() {
            let pos = paint_text(painter, body, &doc.text(), theme);
            if *id == focused {
                caret = pos;
            }
        }

        if i + 1 < layout.len() {
            let color = if *id == focused {
                theme.focus_border
            } else {
                theme.separator
            };
            paint_separator(painter, *rect, axis, Style::default().fg(color).bg(theme.editor_bg));
        }
    }

    painter.fill(status_area, Style::default().bg(theme.status_bg));
    let fg = if status.error {
        theme.error_fg
    } else {
        theme.status_fg
    };
    let mods = if status.error { Mod::BOLD } else { Mod::NONE };
    painter.text_in(
        status_area,
        Pos::new(status_area.x + 1, status_area.y),
        status.text,
        Style::default().bg(theme.status_bg).fg(fg).add_mod(mods),
    );
    caret
}

fn paint_separator(painter: &mut Painter, rect: Rect, axis: SplitAxis, style: Style) {
    match axis {
        SplitAxis::Vertical => painter.vrule(Pos::new(rect.right(), rect.y), rect.h, '│', style),
        SplitAxis::Horizontal => painter.hrule(Pos::new(rect.x, rect.bottom()), rect.w, '─', style),
    }
}

/// Paint the tail of `text` that fits in `body`; returns the position just
/// after the last character.
fn paint_text(painter: &mut Painter, body: Rect, text: &str, theme: &Theme) -> Option<Pos> {
    if body.is_empty() {
        return None;
    }
    let style = Style::default().bg(theme.editor_bg).fg(theme.editor_fg);
    let lines: Vec<&str> = text.split('\n').collect();
    let skip = lines.len().saturating_sub(body.h as usize);
    let visible = &lines[skip..];

    for (row, line) in visible.iter().enumerate() {
        painter.text_in(body, Pos::new(body.x, body.y + row as u16), *line, style);
    }

    let last = visible.last().copied().unwrap_or_default();
    let x = body.x as usize + UnicodeWidthStr::width(last);
    let y = body.y as usize + visible.len().saturating_sub(1);
    let pos = Pos::new(x.min(u16::MAX as usize) as u16, y as u16);
    body.contains(pos).then_some(pos)
}
