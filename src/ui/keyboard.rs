//! Keyboard grid rendering

use crate::keyboard::{KeyTint, OnScreenKeyboard, VisualKey};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

mod palette {
    use ratatui::style::Color;
    pub const KEY_OFF: Color = Color::Rgb(40, 40, 50);
    pub const KEY_OK: Color = Color::Rgb(80, 200, 120);
    pub const KEY_FAIL: Color = Color::Rgb(220, 70, 70);
    pub const TEXT: Color = Color::Rgb(180, 180, 190);
    pub const TEXT_ON: Color = Color::Rgb(20, 20, 25);
}

pub struct KeyboardWidget<'a> {
    keyboard: &'a OnScreenKeyboard,
}

impl<'a> KeyboardWidget<'a> {
    pub fn new(keyboard: &'a OnScreenKeyboard) -> Self {
        Self { keyboard }
    }
}

fn tint_colors(tint: KeyTint) -> (Color, Color) {
    match tint {
        KeyTint::Idle => (palette::KEY_OFF, palette::TEXT),
        KeyTint::Success => (palette::KEY_OK, palette::TEXT_ON),
        KeyTint::Failure => (palette::KEY_FAIL, palette::TEXT_ON),
    }
}

fn render_key(buf: &mut Buffer, area: Rect, key: &VisualKey) {
    // one cell of padding on the left, matching `OnScreenKeyboard::key_at`
    let x = area.x + 1 + key.x;
    let y = area.y + key.row;
    if y >= area.bottom() || x + key.width > area.right() {
        return;
    }

    let (bg, fg) = tint_colors(key.tint);
    let mut style = Style::default().fg(fg).bg(bg);
    if key.tint != KeyTint::Idle {
        style = style.add_modifier(Modifier::BOLD);
    }
    buf.set_string(
        x,
        y,
        format!("{:^w$}", key.label, w = key.width as usize),
        style,
    );
}

impl Widget for KeyboardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for key in self.keyboard.keys() {
            render_key(buf, area, key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::{GRID_HEIGHT, GRID_WIDTH};
    use crate::session::Outcome;

    fn render(kb: &OnScreenKeyboard, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        KeyboardWidget::new(kb).render(area, &mut buf);
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_renders_all_rows() {
        let kb = OnScreenKeyboard::new();
        let buf = render(&kb, Rect::new(0, 0, GRID_WIDTH, GRID_HEIGHT));

        assert!(row_text(&buf, 0).contains(" 1 "));
        assert!(row_text(&buf, 0).contains(" + "));
        assert!(row_text(&buf, 1).contains(" Q "));
        assert!(row_text(&buf, 2).contains(" L "));
        assert!(row_text(&buf, 3).contains(" . "));
        assert!(row_text(&buf, 4).contains("space"));
    }

    #[test]
    fn test_key_colors_follow_tint() {
        let mut kb = OnScreenKeyboard::new();
        kb.flash('1', Outcome::Correct);
        kb.flash('2', Outcome::Incorrect);
        let buf = render(&kb, Rect::new(0, 0, GRID_WIDTH, GRID_HEIGHT));

        // "1" starts at column 1, "2" at column 6, "3" at column 11
        assert_eq!(buf[(1, 0)].bg, palette::KEY_OK);
        assert_eq!(buf[(6, 0)].bg, palette::KEY_FAIL);
        assert_eq!(buf[(11, 0)].bg, palette::KEY_OFF);
    }

    #[test]
    fn test_drawn_cells_match_hit_testing() {
        let kb = OnScreenKeyboard::new();
        let area = Rect::new(3, 2, GRID_WIDTH, GRID_HEIGHT);
        let buf = render(&kb, area);

        for key in kb.keys() {
            let x = area.x + 1 + key.x;
            let y = area.y + key.row;
            assert_eq!(buf[(x, y)].bg, palette::KEY_OFF);
            let hit = kb.key_at(area, x, y).unwrap();
            assert_eq!(kb.key(hit).char, key.char);
        }
    }

    #[test]
    fn test_narrow_area_does_not_panic() {
        let kb = OnScreenKeyboard::new();
        let buf = render(&kb, Rect::new(0, 0, 12, 2));
        assert!(row_text(&buf, 0).contains(" 1 "));
    }
}
