//! Saved request details dialog

use super::base::{render_dialog, DialogConfig};
use crate::state::{LoadState, SavedRequest};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render the JSON view of a saved request, or a loading notice
pub fn render_request_dialog(frame: &mut Frame, details: &LoadState<SavedRequest>) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let (title, message) = match details {
        LoadState::Loaded(request) => {
            let json = request
                .to_formatted_json()
                .unwrap_or_else(|err| format!("Unable to render request: {err}"));
            (format!("Request {}", request.id), json)
        }
        LoadState::Failed(err) => ("Request".to_string(), err.clone()),
        LoadState::Loading | LoadState::Idle => {
            ("Request".to_string(), "Loading request...".to_string())
        }
    };

    let hint = if details.loaded().is_some() {
        vec![
            Span::styled("y", key_style),
            Span::raw(":copy JSON  "),
            Span::styled("Esc", key_style),
            Span::raw(":close"),
        ]
    } else {
        vec![Span::styled("Esc", key_style), Span::raw(":close")]
    };

    render_dialog(
        frame,
        DialogConfig {
            title: &title,
            title_color: Color::Cyan,
            border_color: Color::Cyan,
            message: &message,
            preformatted: true,
            hint: Some(hint),
            max_width: 72,
        },
    );
}
