//! Dynamic send-money form rendering

use super::field_renderer::{
    draw_dropdown, draw_field_widget, draw_help_text, widget_height, FieldLook, FIELD_HEIGHT,
};
use crate::app::App;
use crate::locale::{Language, Msg};
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::forms::{Focus, SendMoneySession};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// One vertical slot of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    ServicePicker,
    ProviderPicker,
    Field(usize),
    SubmitError,
    Submit,
}

impl Row {
    fn focus(self) -> Option<Focus> {
        match self {
            Self::ServicePicker => Some(Focus::ServicePicker),
            Self::ProviderPicker => Some(Focus::ProviderPicker),
            Self::Field(i) => Some(Focus::Field(i)),
            Self::Submit => Some(Focus::Submit),
            Self::SubmitError => None,
        }
    }
}

fn alignment(language: Language) -> Alignment {
    if language.is_arabic() {
        Alignment::Right
    } else {
        Alignment::Left
    }
}

/// Rows currently on the form with their heights, top to bottom
fn rows(session: &SendMoneySession) -> Vec<(Row, u16)> {
    let mut rows = vec![(Row::ServicePicker, FIELD_HEIGHT)];
    if session.selected_service().is_some() {
        rows.push((Row::ProviderPicker, FIELD_HEIGHT));
    }
    if session.selected_provider().is_some() {
        rows.extend(
            session
                .widgets()
                .iter()
                .enumerate()
                .map(|(i, w)| (Row::Field(i), widget_height(w))),
        );
        if session.submit_error().is_some() {
            rows.push((Row::SubmitError, 1));
        }
        rows.push((Row::Submit, BUTTON_HEIGHT));
    }
    rows
}

/// First visible row offset that keeps the focused row on screen
fn scroll_offset(rows: &[(Row, u16)], focus: Focus, height: u16) -> u16 {
    let mut top = 0u16;
    for (row, h) in rows {
        if row.focus() == Some(focus) {
            let bottom = top + h;
            return bottom.saturating_sub(height);
        }
        top += h;
    }
    0
}

/// Draw the send-money screen
pub fn draw_send_money(frame: &mut Frame, area: Rect, app: &App) {
    let title = app
        .state
        .send_money
        .as_ref()
        .map(|s| s.title().to_string())
        .unwrap_or_else(|| "Send Money".to_string());

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(err) = &app.state.catalog_error {
        draw_catalog_error(frame, inner, err);
        return;
    }
    let Some(session) = &app.state.send_money else {
        let loading = Paragraph::new(Span::styled(
            "Loading services...",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(loading, inner);
        return;
    };

    if inner.height < 2 {
        return;
    }
    let content = Rect {
        height: inner.height - 1,
        ..inner
    };
    let help_area = Rect {
        y: inner.y + inner.height - 1,
        height: 1,
        ..inner
    };

    draw_form(frame, content, session);
    let submit = Msg::Submit.text(session.language());
    draw_help_text(
        frame,
        help_area,
        &format!("Fill in the details, then Enter on {submit} or {SUBMIT_SHORTCUT}"),
    );
}

fn draw_catalog_error(frame: &mut Frame, area: Rect, err: &str) {
    let text = vec![
        Line::from(Span::styled(
            "⚠ Services unavailable",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(err, Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc to go back",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let banner = Paragraph::new(text).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(banner, area);
}

fn draw_form(frame: &mut Frame, area: Rect, session: &SendMoneySession) {
    let language = session.language();
    let align = alignment(language);
    let focus = session.focus();
    let rows = rows(session);
    let offset = scroll_offset(&rows, focus, area.height);

    let mut top = 0u16;
    for (row, height) in rows {
        let row_top = top;
        top += height;
        // Only draw rows that fit entirely
        if row_top < offset || row_top - offset + height > area.height {
            continue;
        }
        let rect = Rect {
            x: area.x,
            y: area.y + row_top - offset,
            width: area.width,
            height,
        };
        let is_active = row.focus() == Some(focus);

        match row {
            Row::ServicePicker => {
                let entries = session.service_entries();
                let index = session.selected_service_index().map_or(0, |i| i + 1);
                draw_dropdown(
                    frame,
                    rect,
                    Msg::Service.text(language),
                    entries.get(index).map(String::as_str).unwrap_or(""),
                    index == 0,
                    FieldLook::new(is_active, align),
                );
            }
            Row::ProviderPicker => {
                let entries = session.provider_entries();
                let index = session.selected_provider_index().map_or(0, |i| i + 1);
                draw_dropdown(
                    frame,
                    rect,
                    Msg::Provider.text(language),
                    entries.get(index).map(String::as_str).unwrap_or(""),
                    index == 0,
                    FieldLook::new(is_active, align),
                );
            }
            Row::Field(i) => {
                if let Some(widget) = session.widgets().get(i) {
                    draw_field_widget(frame, rect, widget, is_active, align);
                }
            }
            Row::SubmitError => {
                let message = session.submit_error().unwrap_or("");
                let line = Line::from(Span::styled(
                    message,
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ));
                frame.render_widget(Paragraph::new(line).alignment(align), rect);
            }
            Row::Submit => {
                let form = session.form();
                let label = if form.is_submitting {
                    Msg::Submitting.text(language)
                } else {
                    Msg::Submit.text(language)
                };
                render_button(frame, rect, label, is_active, form.can_submit());
            }
        }
    }
}
