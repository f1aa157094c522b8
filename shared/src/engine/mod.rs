//! Pure settings-reconciliation logic for the chat panel.
//!
//! Everything in here operates on plain [`crate::models::ChatSettings`]
//! values with no I/O and no failure modes; the frontend's reducer and
//! event handlers are the only callers.

pub mod agent;
pub mod mapping;
pub mod model;
pub mod payload;
pub mod prompt;

pub use agent::*;
pub use mapping::*;
pub use model::*;
pub use payload::*;
pub use prompt::*;
