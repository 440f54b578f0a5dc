//! Paint command recording. Widgets describe a frame; backends replay it.

use super::geom::{Pos, Rect};
use super::style::Style;

/// Direction a rule runs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleAxis {
    Horizontal,
    Vertical,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaintCmd {
    Fill {
        rect: Rect,
        style: Style,
    },
    /// `len` repetitions of `ch` starting at `from`.
    Rule {
        from: Pos,
        len: u16,
        axis: RuleAxis,
        ch: char,
        style: Style,
    },
    /// Cut at `clip` (when set) and the target area; wide glyphs are never split.
    Text {
        pos: Pos,
        text: String,
        style: Style,
        clip: Option<Rect>,
    },
}

#[derive(Debug, Default)]
pub struct Painter {
    cmds: Vec<PaintCmd>,
}

impl Painter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    pub fn cmds(&self) -> &[PaintCmd] {
        &self.cmds
    }

    /// Hand the recorded frame over, leaving the painter empty.
    pub fn take(&mut self) -> Vec<PaintCmd> {
        std::mem::take(&mut self.cmds)
    }

    pub fn fill(&mut self, rect: Rect, style: Style) {
        if !rect.is_empty() {
            self.cmds.push(PaintCmd::Fill { rect, style });
        }
    }

    pub fn hrule(&mut self, from: Pos, len: u16, ch: char, style: Style) {
        self.rule(from, len, RuleAxis::Horizontal, ch, style);
    }

    pub fn vrule(&mut self, from: Pos, len: u16, ch: char, style: Style) {
        self.rule(from, len, RuleAxis::Vertical, ch, style);
    }

    fn rule(&mut self, from: Pos, len: u16, axis: RuleAxis, ch: char, style: Style) {
        if len > 0 {
            self.cmds.push(PaintCmd::Rule {
                from,
                len,
                axis,
                ch,
                style,
            });
        }
    }

    pub fn text(&mut self, pos: Pos, text: impl Into<String>, style: Style) {
        self.push_text(pos, text.into(), style, None);
    }

    /// Text confined to `clip`; nothing is recorded when the row misses it.
    pub fn text_in(&mut self, clip: Rect, pos: Pos, text: impl Into<String>, style: Style) {
        if clip.is_empty() || pos.y < clip.y || pos.y >= clip.bottom() {
            return;
        }
        self.push_text(pos, text.into(), style, Some(clip));
    }

    fn push_text(&mut self, pos: Pos, text: String, style: Style, clip: Option<Rect>) {
        if text.is_empty() {
            return;
        }
        self.cmds.push(PaintCmd::Text {
            pos,
            text,
            style,
            clip,
        });
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/painter.rs"]
mod tests;
