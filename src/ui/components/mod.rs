//! Reusable UI components

mod button;
mod dialog;

pub use button::{render_button, render_card, render_sidebar_button, BUTTON_HEIGHT};
pub use dialog::{render_error_dialog, render_request_dialog};
