//! History screen: saved requests and transactions

use super::widgets::render_scrollable_list;
use crate::app::App;
use crate::state::{HistoryTab, LoadState, RequestStatus, SavedRequest, Transaction};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
    Frame,
};

const TABS: [HistoryTab; 2] = [HistoryTab::SavedRequests, HistoryTab::Transactions];

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let selected_tab = TABS
        .iter()
        .position(|t| *t == app.state.history_tab)
        .unwrap_or(0);
    let tabs = Tabs::new(TABS.iter().map(|t| t.label()))
        .select(selected_tab)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().title(" History ").borders(Borders::ALL));
    frame.render_widget(tabs, chunks[0]);

    let block = Block::default()
        .title(format!(" {} ", app.state.history_tab.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    match app.state.history_tab {
        HistoryTab::SavedRequests => draw_list(
            frame,
            chunks[1],
            block,
            &app.state.saved_requests,
            "No saved requests yet",
            request_item,
            app.state.selected_index,
        ),
        HistoryTab::Transactions => draw_list(
            frame,
            chunks[1],
            block,
            &app.state.transactions,
            "No transactions yet",
            transaction_item,
            app.state.selected_index,
        ),
    }
}

fn draw_list<T>(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    state: &LoadState<Vec<T>>,
    empty: &str,
    item: fn(&T) -> ListItem,
    selected_index: usize,
) {
    let message = match state {
        LoadState::Loaded(list) if !list.is_empty() => {
            let items: Vec<ListItem> = list.iter().map(item).collect();
            let list = List::new(items).block(block).highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );
            render_scrollable_list(frame, area, list, selected_index);
            return;
        }
        LoadState::Loaded(_) => Span::styled(empty, Style::default().fg(Color::DarkGray)),
        LoadState::Failed(err) => Span::styled(err.as_str(), Style::default().fg(Color::Red)),
        LoadState::Loading | LoadState::Idle => {
            Span::styled("Loading...", Style::default().fg(Color::DarkGray))
        }
    };
    frame.render_widget(Paragraph::new(Line::from(message)).block(block), area);
}

fn status_color(status: RequestStatus) -> Color {
    match status {
        RequestStatus::Saved => Color::Blue,
        RequestStatus::Submitted => Color::Yellow,
        RequestStatus::Completed => Color::Green,
        RequestStatus::Failed => Color::Red,
    }
}

fn request_item(request: &SavedRequest) -> ListItem<'_> {
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(
                format!("{:<8}", request.id),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "{} · {}",
                request.service_name, request.provider_name
            )),
        ]),
        Line::from(vec![
            Span::styled(
                format!("        {:<14}", request.formatted_amount()),
                Style::default().fg(Color::Green),
            ),
            Span::styled(
                format!("{:<20}", request.formatted_date()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                request.status.name(),
                Style::default().fg(status_color(request.status)),
            ),
        ]),
    ])
}

fn transaction_item(tx: &Transaction) -> ListItem<'_> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{:<24}", tx.recipient_name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{:<12}", tx.formatted_amount()),
            Style::default().fg(Color::Red),
        ),
        Span::styled(
            format!("{:<14}", tx.formatted_date()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(tx.formatted_status()),
    ])];
    if tx.has_note() {
        lines.push(Line::from(Span::styled(
            format!("  {}", tx.note.as_deref().unwrap_or("")),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    ListItem::new(lines)
}
