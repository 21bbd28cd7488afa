//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! managing the cycle store, the TUI shell state, and user interactions.

pub mod store;
pub mod state;

pub use store::*;
pub use state::*;
