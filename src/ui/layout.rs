//! Layout components (sidebar, status bar)

use super::components::{render_sidebar_button, BUTTON_HEIGHT};
use crate::app::{App, SIDEBAR_VIEWS};
use crate::platform::{LANGUAGE_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Create the main layout with sidebar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20), // Sidebar
            Constraint::Min(0),     // Main content
        ])
        .split(area);

    // Reserve bottom line for status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[0]);

    (sidebar_chunks[0], main_chunks[0])
}

/// Create full-width layout without sidebar (login and the send-money flow)
pub fn create_layout_no_sidebar(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Draw the sidebar with boxed buttons
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Min(0)];
    constraints.extend(SIDEBAR_VIEWS.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (idx, view) in SIDEBAR_VIEWS.iter().enumerate() {
        render_sidebar_button(
            frame,
            chunks[idx + 1],
            &(idx + 1).to_string(),
            view.title(),
            app.state.current_view == *view,
        );
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Session indicator
    match &app.state.user {
        Some(user) => spans.push(Span::styled(
            format!(" ● {} ", user.username),
            Style::default().fg(Color::Green),
        )),
        None => spans.push(Span::styled(" ○ ", Style::default().fg(Color::Red))),
    }

    // View-specific hints
    let hints = get_view_hints(app.state.current_view);
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Language and quit hint on the right
    let right = format!(" {}  ^C:quit ", app.state.language.toggle_label());
    let width = right.chars().count() as u16;
    let right_area = Rect {
        x: area.width.saturating_sub(width),
        y: area.height.saturating_sub(1),
        width: width.min(area.width),
        height: 1,
    };
    let right_widget =
        Paragraph::new(right).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(right_widget, right_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View) -> String {
    match view {
        View::Splash => "Press any key to skip".to_string(),
        View::Login => "Tab:next  Enter:sign in  Esc:quit".to_string(),
        View::Home => "j/k:nav  Enter:open  s:send  r:refresh  1-3:menu  q:quit".to_string(),
        View::SendMoney => format!(
            "Tab:next  ←/→:choose  {SUBMIT_SHORTCUT}:submit  {LANGUAGE_SHORTCUT}:language  Esc:back"
        ),
        View::Confirmation => "Enter:confirm  Esc:edit".to_string(),
        View::History => "Tab:switch list  j/k:nav  Enter:details  r:reload  Esc:back".to_string(),
        View::Profile => format!("j/k:nav  Enter:select  {LANGUAGE_SHORTCUT}:language  Esc:back"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_reserves_sidebar_and_status_line() {
        let (sidebar, main) = create_layout(Rect::new(0, 0, 100, 30));
        assert_eq!(sidebar.width, 20);
        assert_eq!(main.width, 80);
        assert_eq!(main.height, 29);
    }

    #[test]
    fn test_send_money_hints_mention_shortcuts() {
        let hints = get_view_hints(View::SendMoney);
        assert!(hints.contains(SUBMIT_SHORTCUT));
        assert!(hints.contains(LANGUAGE_SHORTCUT));
    }
}
