//! Session-held models.

pub mod session;

pub use session::keys as session_keys;
pub use session::{CartView, Theme};
