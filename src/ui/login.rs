//! Login screen rendering

use super::components::{render_button, BUTTON_HEIGHT};
use super::forms::{draw_help_text, draw_input, FieldLook};
use super::widgets::centered_rect;
use crate::app::App;
use crate::state::LoginField;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the login form centered in `area`
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.login_form;
    let panel = centered_rect(area, 52, 18);

    let block = Block::default()
        .title(" Sign In ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Heading
            Constraint::Length(3),             // Username
            Constraint::Length(1),             // Username error
            Constraint::Length(3),             // Password
            Constraint::Length(1),             // Password error
            Constraint::Length(BUTTON_HEIGHT), // Sign in
            Constraint::Length(1),             // Demo credentials
        ])
        .horizontal_margin(1)
        .split(inner);

    let heading = Paragraph::new(Line::from(Span::styled(
        "Welcome back",
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(heading, chunks[0]);

    draw_input(
        frame,
        chunks[1],
        "Email",
        &form.username,
        "testuser@example.com",
        FieldLook {
            is_active: form.active_field == LoginField::Username,
            has_error: form.username_error.is_some(),
            alignment: Alignment::Left,
        },
    );
    draw_error(frame, chunks[2], form.username_error.as_deref());

    draw_input(
        frame,
        chunks[3],
        "Password",
        &form.masked_password(),
        "",
        FieldLook {
            is_active: form.active_field == LoginField::Password,
            has_error: form.password_error.is_some(),
            alignment: Alignment::Left,
        },
    );
    draw_error(frame, chunks[4], form.password_error.as_deref());

    let label = if form.is_loading {
        "Signing in..."
    } else {
        "Sign In"
    };
    render_button(
        frame,
        chunks[5],
        label,
        form.active_field == LoginField::Submit,
        !form.is_loading,
    );

    draw_help_text(frame, chunks[6], "Demo: testuser / password123");
}

fn draw_error(frame: &mut Frame, area: Rect, error: Option<&str>) {
    if let Some(error) = error {
        let line = Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}
