//! Gatherly terminal client library.
//!
//! A terminal client for the Gatherly platform: create an organization
//! page and publish updates to it without leaving the shell.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
