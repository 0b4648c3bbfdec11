//! Infrastructure layer providing external service integrations.
//!
//! This module contains implementations for external concerns like
//! the platform API, session storage, and background submissions.

pub mod api;
pub mod session;
pub mod submit;

pub use api::*;
pub use session::*;
pub use submit::*;
