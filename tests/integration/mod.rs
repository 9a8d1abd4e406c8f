//! Integration tests for nl-ask.

pub mod config_test;
pub mod http_test;
pub mod render_test;
pub mod session_test;
