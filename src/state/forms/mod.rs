//! Dynamic form layer
//!
//! JSON catalog -> typed field schema -> headless widgets -> per-field
//! validation -> aggregated form state.

mod catalog;
mod field;
mod form_state;
mod renderer;
mod send_money;
mod validation;

pub use catalog::Catalog;
pub use form_state::{FormData, ValidityMode};
pub use renderer::{FieldInput, FieldWidget};
pub use send_money::{Focus, FormError, SendMoneySession};
