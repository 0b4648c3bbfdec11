//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! managing application state, form editing, and the submission lifecycle.

pub mod form;
pub mod state;

pub use form::*;
pub use state::*;
