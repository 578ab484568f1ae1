//! Type definitions for the reporting agent API
//!
//! This crate provides the shared contract between the reporting backend and
//! its UI clients. The wire layer mirrors the backend's JSON exactly; the
//! component layer is a typed discriminated union that descriptors must pass
//! through before any widget sees them, so schema drift surfaces as a typed
//! error at one boundary instead of degraded rendering scattered across the
//! widget set.
//!
//! ## Example
//!
//! ```rust
//! use reportal_ui_types::{ComponentConfig, ReportComponent};
//!
//! let config = ComponentConfig::new(
//!     "Metric".to_string(),
//!     serde_json::json!({"title": "Spend", "value": "¥120,000"}),
//! );
//!
//! let component = ReportComponent::from_config(&config).unwrap();
//! assert_eq!(component.type_name(), "Metric");
//! ```

pub mod components;
pub mod types;

pub use components::*;
pub use types::*;
