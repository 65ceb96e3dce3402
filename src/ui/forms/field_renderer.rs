//! Field rendering utilities for forms

use crate::state::forms::FieldWidget;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by a boxed input
pub const FIELD_HEIGHT: u16 = 3;

/// Rows a widget needs, including its error line when shown
pub fn widget_height(widget: &FieldWidget) -> u16 {
    FIELD_HEIGHT + u16::from(widget.error_visible())
}

/// Focus, error and text direction of a drawn field
#[derive(Debug, Clone, Copy)]
pub struct FieldLook {
    pub is_active: bool,
    pub has_error: bool,
    pub alignment: Alignment,
}

impl FieldLook {
    pub fn new(is_active: bool, alignment: Alignment) -> Self {
        Self {
            is_active,
            has_error: false,
            alignment,
        }
    }
}

fn field_styles(look: FieldLook) -> (Style, Style) {
    let border = if look.has_error {
        Style::default().fg(Color::Red)
    } else if look.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let text = if look.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    (border, text)
}

/// Draw a single-line text input with a dim placeholder and a block cursor
pub fn draw_input(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    look: FieldLook,
) {
    let (border_style, text_style) = field_styles(look);
    let cursor = if look.is_active { "▌" } else { "" };

    let mut spans = if value.is_empty() && !placeholder.is_empty() {
        vec![Span::styled(placeholder, Style::default().fg(Color::DarkGray))]
    } else {
        vec![Span::styled(value, text_style)]
    };
    spans.push(Span::styled(cursor, Style::default().fg(Color::Cyan)));

    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(look.alignment)
            .block(block),
        area,
    );
}

/// Draw a dropdown as `◀ entry ▶`
pub fn draw_dropdown(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    display: &str,
    is_placeholder: bool,
    look: FieldLook,
) {
    let (border_style, text_style) = field_styles(look);
    let value_style = if is_placeholder {
        Style::default().fg(Color::DarkGray)
    } else {
        text_style
    };
    let arrow_style = if look.is_active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::styled("◀ ", arrow_style),
        Span::styled(display, value_style),
        Span::styled(" ▶", arrow_style),
    ]);
    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(
        Paragraph::new(line).alignment(look.alignment).block(block),
        area,
    );
}

/// Draw a schema-built field with its error line underneath
pub fn draw_field_widget(
    frame: &mut Frame,
    area: Rect,
    widget: &FieldWidget,
    is_active: bool,
    alignment: Alignment,
) {
    let box_area = Rect {
        height: FIELD_HEIGHT.min(area.height),
        ..area
    };
    let look = FieldLook {
        is_active,
        has_error: widget.error_visible(),
        alignment,
    };

    if widget.is_dropdown() {
        draw_dropdown(
            frame,
            box_area,
            &widget.label,
            widget.display_value(),
            widget.selected == 0,
            look,
        );
    } else {
        draw_input(
            frame,
            box_area,
            &widget.label,
            &widget.value,
            &widget.placeholder,
            look,
        );
    }

    if let Some(error) = &widget.error {
        if area.height > FIELD_HEIGHT {
            let error_area = Rect {
                y: area.y + FIELD_HEIGHT,
                height: 1,
                ..area
            };
            let line = Line::from(Span::styled(
                format!(" {error}"),
                Style::default().fg(Color::Red),
            ));
            frame.render_widget(Paragraph::new(line).alignment(alignment), error_area);
        }
    }
}

/// Draw a dim one-line help text
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(help, area);
}
