//! Configuration management for the terminal interface.
//!
//! Values are resolved in precedence order: built-in defaults, then the
//! config file, then CLI flags and environment variables.

mod config;

pub use config::*;
