//! Result popup drawn over the main screen

use crate::report::FinalReport;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Narrowest the popup gets; it grows for wider lines
const NOTICE_WIDTH: u16 = 40;

/// Modal popup with the result of a run
pub struct Notice<'a> {
    report: &'a FinalReport,
}

impl<'a> Notice<'a> {
    pub fn new(report: &'a FinalReport) -> Self {
        Self { report }
    }

    /// Centered rect for the popup inside `area`
    pub fn area(&self, area: Rect) -> Rect {
        let lines = self.report.notice_lines();
        let widest = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
        // body lines, a blank line, the hint and two borders
        let height = lines.len() as u16 + 4;
        let width = NOTICE_WIDTH.max(widest + 4).min(area.width);
        let height = height.min(area.height);

        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }
}

impl Widget for Notice<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = self.area(area);
        let accent = if self.report.completed {
            Color::Green
        } else {
            Color::Yellow
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(accent))
            .title(Line::from(format!(" {} ", self.report.notice_title())).centered())
            .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD));

        let mut lines: Vec<Line> = self
            .report
            .notice_lines()
            .into_iter()
            .map(Line::from)
            .collect();
        lines.push(Line::default());
        lines.push(Line::styled(
            "(esc) close / (enter) again",
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        ));

        Clear.render(popup, buf);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block)
            .render(popup, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn report(completed: bool) -> FinalReport {
        FinalReport {
            elapsed: Duration::from_secs(75),
            speed: 123.456,
            fail_count: 3,
            typed: 20,
            target_len: 20,
            completed,
            accuracy: 87.0,
        }
    }

    fn rendered(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_notice_shows_report() {
        let report = report(true);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);

        Notice::new(&report).render(area, &mut buf);

        let text = rendered(&buf);
        assert!(text.contains("Well done!"));
        assert!(text.contains("Speed: 123.46 chars/min"));
        assert!(text.contains("Mistakes: 3"));
        assert!(text.contains("Time: 01:15"));
        assert!(text.contains("Accuracy: 87%"));
    }

    #[test]
    fn test_notice_clears_background() {
        let report = report(false);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        buf.set_string(0, 12, "x".repeat(80), Style::default());

        let notice = Notice::new(&report);
        let popup = notice.area(area);
        notice.render(area, &mut buf);

        assert!(rendered(&buf).contains("Stopped"));
        // a cell inside the popup but away from the text
        assert_eq!(buf[(popup.x + 1, 12)].symbol(), " ");
        assert_eq!(buf[(0, 12)].symbol(), "x");
    }

    #[test]
    fn test_notice_is_centered() {
        let report = report(true);
        let popup = Notice::new(&report).area(Rect::new(0, 0, 80, 24));

        assert_eq!(popup.width, NOTICE_WIDTH);
        assert_eq!(popup.height, 8);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 8);
    }

    #[test]
    fn test_notice_grows_for_wide_lines() {
        let report = FinalReport {
            speed: 123_456_789_012_345_678_901_234.0,
            ..report(true)
        };
        let line = &report.notice_lines()[0];
        let popup = Notice::new(&report).area(Rect::new(0, 0, 80, 24));

        assert!(line.len() + 4 > NOTICE_WIDTH as usize);
        assert_eq!(popup.width as usize, line.len() + 4);
    }

    #[test]
    fn test_notice_in_tiny_area() {
        let report = report(true);
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);

        Notice::new(&report).render(area, &mut buf);
    }
}
