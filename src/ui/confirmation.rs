//! Transfer confirmation screen

use super::components::{render_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::PendingTransfer;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn detail_line<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label:<12}"), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

/// Summary lines for a pending transfer, followed by every submitted field
fn summary(pending: &PendingTransfer) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(Span::styled(
            pending.formatted_amount(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        detail_line("Recipient", pending.recipient_name.clone()),
        detail_line("Service", pending.service_name.clone()),
        detail_line("Provider", pending.provider_name.clone()),
    ];
    if let Some(note) = pending.note.as_deref().filter(|n| !n.trim().is_empty()) {
        lines.push(detail_line("Note", note.to_string()));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Submitted details",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for (name, value) in &pending.form_data.fields {
        lines.push(detail_line(name, value.clone()));
    }
    lines
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Confirm Transfer ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(pending) = &app.state.pending_transfer else {
        frame.render_widget(Paragraph::new("Nothing to confirm"), inner);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(BUTTON_HEIGHT)])
        .margin(1)
        .split(inner);

    frame.render_widget(Paragraph::new(summary(pending)), chunks[0]);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Length(24), Constraint::Min(0)])
        .split(chunks[1]);

    let confirm_label = if app.state.confirming {
        "Processing..."
    } else {
        "Enter  Confirm"
    };
    render_button(frame, buttons[0], confirm_label, true, !app.state.confirming);
    render_button(
        frame,
        buttons[1],
        "Esc  Edit",
        false,
        !app.state.confirming,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::FormData;

    #[test]
    fn test_summary_lists_submitted_fields() {
        let pending = PendingTransfer {
            recipient_name: "Sara Mohammed".into(),
            amount: 75.5,
            note: None,
            service_name: "Wallet Transfer".into(),
            provider_name: "Quick Pay".into(),
            form_data: FormData {
                service_id: "wallet_transfer".into(),
                provider_id: "502".into(),
                fields: [("full_name", "Sara Mohammed"), ("msisdn", "+971501234567")]
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            },
        };
        let text: Vec<String> = summary(&pending).iter().map(|l| l.to_string()).collect();
        assert_eq!(text[0], "$75.50");
        assert!(text.iter().any(|l| l.contains("Quick Pay")));
        assert!(text.iter().any(|l| l.contains("+971501234567")));
        assert!(!text.iter().any(|l| l.starts_with("Note")));
    }
}
