//! Presentation layer handling terminal UI and user input.
//!
//! This module manages the terminal user interface using ratatui,
//! handles keyboard input, and holds the user-facing message catalog.

pub mod input;
pub mod messages;
pub mod ui;

pub use input::*;
pub use ui::*;
