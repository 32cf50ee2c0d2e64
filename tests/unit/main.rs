//! Unit test harness for motor-controller.
//!
//! Organizes unit tests for each component of the library.

#[path = "../common/mod.rs"]
mod common;

mod config_validation;
mod io_layer;
mod settings_dispatch;
