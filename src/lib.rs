//! nl-ask - A terminal client for natural-language-to-SQL backends.
//!
//! This library exposes the core modules for use in integration tests.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod session;
pub mod tui;
