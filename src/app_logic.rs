/*
 * This module provides the application logic layer, primarily centered
 * around `LookupAppLogic` which acts as the Presenter between the lookup
 * coordinator and the presentation shell. It also includes
 * `SessionViewState` for managing the shell-facing state mirror.
 * Unit tests for `LookupAppLogic` are in `handler_tests.rs`.
 */
pub mod handler;
pub mod session_view_state;
pub mod ui_constants;

#[cfg(test)]
mod handler_tests;

pub use handler::LookupAppLogic;
pub use session_view_state::SessionViewState;
