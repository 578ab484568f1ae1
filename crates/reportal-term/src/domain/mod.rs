//! Core domain logic for the terminal interface.
//!
//! This module contains the session state and data models that drive the
//! terminal UI, independent of transport and rendering details.

pub mod models;
pub mod services;
