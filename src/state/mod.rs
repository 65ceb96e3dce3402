//! Application state module

mod app_state;
pub mod forms;
mod login_form;
mod splash_state;

pub use app_state::*;
pub use login_form::*;
pub use splash_state::*;
