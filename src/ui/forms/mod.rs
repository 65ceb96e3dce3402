//! Form rendering module
//!
//! - `field_renderer`: boxed inputs, dropdowns and error lines
//! - `send_money`: the dynamic send-money form

mod field_renderer;
mod send_money;

pub use field_renderer::{draw_help_text, draw_input, FieldLook};
pub use send_money::draw_send_money;
