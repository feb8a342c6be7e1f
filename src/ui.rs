pub mod keyboard;
pub mod notice;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{LineGauge, Paragraph, Widget},
};

use crate::app::{App, AppState};
use crate::keyboard::{GRID_HEIGHT, GRID_WIDTH};
use crate::session::CharState;

use self::keyboard::KeyboardWidget;
use self::notice::Notice;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
const GAUGE_WIDTH: u16 = 30;

pub const LEGEND: &str = "(enter) start / (esc) stop / (↑↓) length / (ctrl+c) quit";

/// Smallest terminal the full screen fits in
pub const MIN_WIDTH: u16 = GRID_WIDTH + 2 * HORIZONTAL_MARGIN;
pub const MIN_HEIGHT: u16 = GRID_HEIGHT + 6 + 2 * VERTICAL_MARGIN;

/// Regions of the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    pub header: Rect,
    pub target: Rect,
    pub keyboard: Rect,
    pub result: Rect,
    pub legend: Rect,
}

impl Screen {
    /// Split `area`, or `None` when the terminal is too small to draw the keyboard.
    ///
    /// The keyboard rect is also what mouse clicks are hit-tested against.
    pub fn layout(area: Rect) -> Option<Self> {
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            return None;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Length(1),
                Constraint::Min(1), // target text
                Constraint::Length(1),
                Constraint::Length(GRID_HEIGHT),
                Constraint::Length(1), // result / status
                Constraint::Length(1), // legend
            ])
            .split(area);

        let kb_row = chunks[4];
        let keyboard = Rect::new(
            kb_row.x + (kb_row.width - GRID_WIDTH) / 2,
            kb_row.y,
            GRID_WIDTH,
            GRID_HEIGHT,
        );

        Some(Self {
            header: chunks[0],
            target: chunks[2],
            keyboard,
            result: chunks[5],
            legend: chunks[6],
        })
    }
}

impl App {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(GAUGE_WIDTH), Constraint::Min(1)])
            .split(area);

        let span = self.config.max_length.saturating_sub(self.config.min_length);
        let ratio = if span == 0 {
            1.0
        } else {
            (self.difficulty.saturating_sub(self.config.min_length) as f64 / span as f64)
                .clamp(0.0, 1.0)
        };

        LineGauge::default()
            .ratio(ratio)
            .label(format!("length: {:<3}", self.difficulty))
            .filled_style(Style::default().fg(Color::Cyan))
            .unfilled_style(Style::default().fg(Color::DarkGray))
            .render(chunks[0], buf);

        let stats = Line::from(vec![
            Span::styled(
                format!("{:.2} chars/min", self.live_speed()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(
                format!("fails: {}", self.session.fail_count()),
                Style::default().fg(Color::Red),
            ),
        ]);
        Paragraph::new(stats)
            .alignment(Alignment::Right)
            .render(chunks[1], buf);
    }

    fn render_target(&self, area: Rect, buf: &mut Buffer) {
        if self.state == AppState::Idle {
            Paragraph::new(Span::styled(
                "Press enter to start",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::ITALIC),
            ))
            .alignment(Alignment::Center)
            .render(area, buf);
            return;
        }

        let consumed_style = Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM);
        let current_style = Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let pending_style = Style::default();

        // wrap by character so the cursor's line is cursor / width
        let width = area.width.max(1) as usize;
        let target = self.session.target();
        let lines = target
            .chunks(width)
            .enumerate()
            .map(|(row, chunk)| {
                let spans = chunk
                    .iter()
                    .enumerate()
                    .map(|(col, c)| {
                        let style = match self.session.char_state(row * width + col) {
                            CharState::Consumed => consumed_style,
                            CharState::Current => current_style,
                            CharState::Pending => pending_style,
                        };
                        Span::styled(c.to_string(), style)
                    })
                    .collect::<Vec<Span>>();
                Line::from(spans)
            })
            .collect::<Vec<Line>>();

        let alignment = if lines.len() <= 1 {
            Alignment::Center
        } else {
            Alignment::Left
        };

        // vertically centre short prompts, scroll long ones to keep the cursor in view
        let line_count = lines.len() as u16;
        let top = area.height.saturating_sub(line_count) / 2;
        let cursor_line = (self.session.cursor().min(target.len().saturating_sub(1)) / width) as u16;
        let scroll = cursor_line.saturating_sub(area.height.saturating_sub(1));
        let text_area = Rect::new(area.x, area.y + top, area.width, area.height - top);

        Paragraph::new(lines)
            .alignment(alignment)
            .scroll((scroll, 0))
            .render(text_area, buf);
    }

    fn render_result(&self, area: Rect, buf: &mut Buffer) {
        let line = if let Some(status) = self.status() {
            Span::styled(status.to_string(), Style::default().fg(Color::Cyan))
        } else if let Some(report) = &self.result {
            let color = if report.completed {
                Color::Green
            } else {
                Color::Yellow
            };
            Span::styled(
                report.headline(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        } else {
            return;
        };

        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(screen) = Screen::layout(area) else {
            buf.set_string(
                area.x,
                area.y,
                "⌨ Window too small",
                Style::default().fg(Color::Yellow),
            );
            return;
        };

        self.render_header(screen.header, buf);
        self.render_target(screen.target, buf);
        KeyboardWidget::new(&self.keyboard).render(screen.keyboard, buf);
        self.render_result(screen.result, buf);

        Paragraph::new(Span::styled(
            LEGEND,
            Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
        ))
        .alignment(Alignment::Center)
        .render(screen.legend, buf);

        if self.notice_open {
            if let Some(report) = &self.result {
                Notice::new(report).render(area, buf);
            }
        }
    }
}
