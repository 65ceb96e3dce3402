//! Home screen: balance and quick actions

use super::components::{render_card, BUTTON_HEIGHT};
use crate::app::{App, HOME_CARDS};
use crate::state::{Balance, LoadState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![
        Constraint::Length(2), // Greeting
        Constraint::Length(5), // Balance
    ];
    constraints.extend(HOME_CARDS.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    let name = app
        .state
        .user
        .as_ref()
        .map(|u| u.username.as_str())
        .unwrap_or("there");
    let greeting = Paragraph::new(Line::from(vec![
        Span::raw("Hello, "),
        Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
    ]));
    frame.render_widget(greeting, chunks[0]);

    draw_balance(frame, chunks[1], &app.state.balance);

    for (idx, card) in HOME_CARDS.iter().enumerate() {
        render_card(
            frame,
            chunks[idx + 2],
            card.label(),
            card.hint(),
            app.state.selected_index == idx,
        );
    }
}

fn draw_balance(frame: &mut Frame, area: Rect, balance: &LoadState<Balance>) {
    let value = match balance {
        LoadState::Loaded(balance) => Line::from(vec![
            Span::styled(
                balance.formatted(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {}", balance.currency),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        LoadState::Failed(_) => Line::from(Span::styled(
            "Unavailable (r to retry)",
            Style::default().fg(Color::Red),
        )),
        LoadState::Loading | LoadState::Idle => Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let block = Block::default()
        .title(" Available Balance ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(Paragraph::new(vec![Line::from(""), value]).block(block), area);
}
