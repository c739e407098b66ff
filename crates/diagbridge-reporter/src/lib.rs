//! Reporter bridge between the compiler and a build tool.
//!
//! This crate provides:
//! - Translation of compiler positions into the build tool's position record
//! - Rendering of problem text, with explanations gated by an explain policy
//! - A [`DelegatingReporter`] that forwards finished problems to a [`Reporter`]
//! - Bridge configuration (`diagbridge.toml`)
//!
//! # Example
//!
//! ```toml
//! # diagbridge.toml
//! [explain]
//! enabled = true
//! once = true
//! levels = ["error", "warning"]
//!
//! [render]
//! show_source = true
//! ```

mod config;
mod error;
mod position;
mod problem;
mod render;
mod reporter;
mod severity;

pub use config::{BridgeConfig, ExplainConfig, RenderConfig};
pub use error::{ConfigError, ReportError, Result};
pub use position::{line_number, pointer_space, strip_line_terminator, ExternalPosition};
pub use problem::Problem;
pub use render::{
    render, Context, ExplainOnce, ExplainPolicy, ExplainSetting, MessageRendering, PlainRendering,
};
pub use reporter::{DelegatingReporter, Reporter};
pub use severity::Severity;
