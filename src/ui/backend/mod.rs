//! Rendering backends.
//!
//! Every backend is a grid of cells; `replay` turns paint commands into cell
//! writes so the terminal and headless backends agree cell for cell.

use crate::ui::core::geom::{Pos, Rect};
use crate::ui::core::painter::{PaintCmd, RuleAxis};
use crate::ui::core::style::Style;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

pub trait Backend {
    fn draw(&mut self, area: Rect, cmds: &[PaintCmd]);

    fn set_cursor(&mut self, pos: Option<Pos>);
}

/// Cell-addressable target. Writes outside `bounds` must be ignored.
pub trait CellGrid {
    fn bounds(&self) -> Rect;

    fn put(&mut self, x: u16, y: u16, symbol: &str, style: Style);
}

pub fn replay(grid: &mut dyn CellGrid, cmds: &[PaintCmd]) {
    let bounds = grid.bounds();
    for cmd in cmds {
        match cmd {
            PaintCmd::Fill { rect, style } => {
                let r = rect.intersect(bounds);
                for y in r.y..r.bottom() {
                    for x in r.x..r.right() {
                        grid.put(x, y, " ", *style);
                    }
                }
            }
            PaintCmd::Rule {
                from,
                len,
                axis,
                ch,
                style,
            } => {
                let span = match axis {
                    RuleAxis::Horizontal => Rect::new(from.x, from.y, *len, 1),
                    RuleAxis::Vertical => Rect::new(from.x, from.y, 1, *len),
                };
                let r = span.intersect(bounds);
                let mut buf = [0u8; 4];
                let symbol = ch.encode_utf8(&mut buf);
                for y in r.y..r.bottom() {
                    for x in r.x..r.right() {
                        grid.put(x, y, symbol, *style);
                    }
                }
            }
            PaintCmd::Text {
                pos,
                text,
                style,
                clip,
            } => {
                let clip = clip.unwrap_or(bounds).intersect(bounds);
                put_text(grid, *pos, text, *style, clip);
            }
        }
    }
}

fn put_text(grid: &mut dyn CellGrid, pos: Pos, text: &str, style: Style, clip: Rect) {
    if clip.is_empty() || pos.y < clip.y || pos.y >= clip.bottom() {
        return;
    }
    let mut x = pos.x;
    for g in text.graphemes(true) {
        let w = UnicodeWidthStr::width(g) as u16;
        if w == 0 {
            continue;
        }
        if x.saturating_add(w) > clip.right() {
            break;
        }
        if x >= clip.x {
            grid.put(x, pos.y, g, style);
            for dx in 1..w {
                grid.put(x + dx, pos.y, " ", style);
            }
        }
        x = x.saturating_add(w);
    }
}

#[cfg(feature = "tui")]
#[path = "ratatui.rs"]
pub mod terminal;
