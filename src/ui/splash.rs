//! Splash screen rendering with logo and progress bar

use crate::state::SplashState;
use crate::ui::widgets::centered_rect;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};

const LOGO_WIDTH: u16 = 44;

/// Build the logo text with styling
fn build_logo() -> Vec<Line<'static>> {
    let frame_style = Style::default().fg(Color::Cyan);
    let text_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    vec![
        Line::from(Span::styled(
            "╭──────────────────────────────────────────╮",
            frame_style,
        )),
        Line::from(vec![
            Span::styled("│", frame_style),
            Span::styled("          $  S E N D  M O N E Y  $        ", text_style),
            Span::styled("│", frame_style),
        ]),
        Line::from(Span::styled(
            "╰──────────────────────────────────────────╯",
            frame_style,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Bank and wallet transfers from your terminal",
            Style::default().fg(Color::Gray),
        )),
    ]
}

/// Draw the splash screen
pub fn draw(frame: &mut Frame, area: Rect, splash_state: &SplashState) {
    let lines = build_logo();
    let logo_height = lines.len() as u16;

    // Logo, gap, progress bar
    let block = centered_rect(area, LOGO_WIDTH, logo_height + 2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(logo_height),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(block);

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .percent(splash_state.percent())
        .label(format!("Loading {}%", splash_state.percent()));
    frame.render_widget(gauge, chunks[2]);

    // Draw "Press any key to skip" hint at bottom
    if area.height > 2 {
        let hint = "Press any key to skip";
        let hint_area = Rect {
            x: area.x,
            y: area.y + area.height - 2,
            width: area.width,
            height: 1,
        };
        let hint_line = Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)));
        frame.render_widget(
            Paragraph::new(hint_line).alignment(Alignment::Center),
            hint_area,
        );
    }
}
