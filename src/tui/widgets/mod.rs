//! TUI widgets for nl-ask.
//!
//! Contains reusable UI components.

pub mod chat;
pub mod header;
pub mod input;
pub mod sidebar;
pub mod spinner;
pub mod table;
pub mod toast;
