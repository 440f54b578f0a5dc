use super::*;
use crate::ui::core::painter::Painter;
use crate::ui::core::style::Color;

fn draw(backend: &mut TestBackend, p: &Painter) {
    let area = backend.buffer().area();
    backend.draw(area, p.cmds());
}

#[test]
fn wide_glyph_that_does_not_fit_is_skipped() {
    let mut backend = TestBackend::new(1, 1);
    let mut p = Painter::new();
    p.text(Pos::new(0, 0), "界", Style::default());
    draw(&mut backend, &p);
    assert_eq!(backend.buffer().cell(0, 0).unwrap().symbol, " ");
}

#[test]
fn wide_glyph_occupies_two_cells() {
    let mut backend = TestBackend::new(3, 1);
    let mut p = Painter::new();
    p.text(Pos::new(0, 0), "界a", Style::default());
    draw(&mut backend, &p);
    assert_eq!(backend.buffer().row_text(0), "界 a");
}

#[test]
fn text_respects_clip() {
    let mut backend = TestBackend::new(6, 1);
    let mut p = Painter::new();
    p.text_in(Rect::new(0, 0, 3, 1), Pos::new(0, 0), "abcdef", Style::default());
    draw(&mut backend, &p);
    assert_eq!(backend.buffer().row_text(0), "abc   ");
}

#[test]
fn fill_clips_to_buffer_and_styles_cells() {
    let mut backend = TestBackend::new(2, 2);
    let style = Style::default().bg(Color::Indexed(4));
    let mut p = Painter::new();
    p.text(Pos::new(0, 0), "AB", Style::default());
    p.fill(Rect::new(1, 0, 10, 10), style);
    draw(&mut backend, &p);

    let buf = backend.buffer();
    assert_eq!(buf.cell(0, 0).unwrap().symbol, "A");
    assert_eq!(buf.cell(1, 0).unwrap().symbol, " ");
    assert_eq!(buf.cell(1, 1).unwrap().style, style);
}

#[test]
fn rules_write_a_row_or_column_clipped_to_the_buffer() {
    let mut backend = TestBackend::new(3, 3);
    let mut p = Painter::new();
    p.vrule(Pos::new(1, 0), 5, '│', Style::default());
    p.hrule(Pos::new(0, 2), 9, '─', Style::default());
    draw(&mut backend, &p);
    for y in 0..2 {
        assert_eq!(backend.buffer().cell(1, y).unwrap().symbol, "│");
    }
    assert_eq!(backend.buffer().row_text(2), "───");
}
