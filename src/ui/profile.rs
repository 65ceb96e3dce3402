//! Profile screen: language preference and logout

use super::widgets::render_scrollable_list;
use crate::app::{App, ProfileAction, PROFILE_ACTIONS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let username = app
        .state
        .user
        .as_ref()
        .map(|u| u.username.as_str())
        .unwrap_or("-");
    let info = vec![
        Line::from(vec![
            Span::styled("User       ", Style::default().fg(Color::DarkGray)),
            Span::styled(username, Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("Language   ", Style::default().fg(Color::DarkGray)),
            Span::raw(app.state.language.display_name()),
        ]),
        Line::from(vec![
            Span::styled("Validation ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{:?}", app.config.validity_mode())),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(info).block(Block::default().title(" Profile ").borders(Borders::ALL)),
        chunks[0],
    );

    let items: Vec<ListItem> = PROFILE_ACTIONS
        .iter()
        .map(|action| match action {
            ProfileAction::ToggleLanguage => ListItem::new(format!(
                "Switch language to {}",
                app.state.language.toggle().display_name()
            )),
            ProfileAction::Logout => {
                ListItem::new(Span::styled("Log out", Style::default().fg(Color::Red)))
            }
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .title(" Actions ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_symbol("▸ ")
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    render_scrollable_list(frame, chunks[1], list, app.state.selected_index);
}
