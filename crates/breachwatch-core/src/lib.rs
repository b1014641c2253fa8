//! Breachwatch Core - Foundation crate for the Breachwatch breach query tool.
//!
//! This crate provides the breach record model, the closed set of queryable
//! fields, projected rows, error handling, and configuration management that
//! the collection crate and the CLI depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - The wire-level [`BreachRecord`]
//! - [`field`] - [`BreachField`] and its declared [`FieldKind`]
//! - [`row`] - Field-ordered [`Row`] values produced by the query chain
//!
//! # Example
//!
//! ```rust
//! use breachwatch_core::{BreachField, FieldKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let field: BreachField = "PwnCount".parse()?;
//! assert_eq!(field.kind(), FieldKind::Number);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod field;
pub mod row;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, QueryConfig, SourceConfig};
pub use error::{BreachwatchError, ConfigError, ConfigResult, Result};
pub use field::{BreachField, FieldKind};
pub use row::{FieldValue, Row};
pub use types::BreachRecord;
