//! Dialog components for TUI

mod base;
mod error_dialog;
mod request_dialog;

pub use error_dialog::render_error_dialog;
pub use request_dialog::render_request_dialog;
