//! Breachwatch Collection - chainable queries over the public breach list.
//!
//! The list is fetched once through a [`BreachSource`], optionally checked
//! against the [`BreachSchema`], and then filtered, sorted and projected in
//! memory through a [`BreachCollection`]. Every chain call mutates the
//! collection in place and hands back `&mut Self`; [`BreachCollection::breaches`]
//! ends the chain with a detached `Vec<Row>`.
//!
//! # Example
//!
//! ```rust,no_run
//! use breachwatch_collection::{BreachCollection, HttpSource, LoadOptions, SortKey};
//! use breachwatch_core::{BreachField, SourceConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = HttpSource::new(&SourceConfig::default())?;
//! let mut collection = BreachCollection::load(&source, &LoadOptions::default()).await?;
//!
//! let rows = collection
//!     .by_domain(Some(""))
//!     .is_sensitive(false)
//!     .verified()
//!     .by_data_class(["Names", "Job titles"])
//!     .sort("-PwnCount".parse::<SortKey>()?)
//!     .pluck(&[BreachField::Name, BreachField::PwnCount])
//!     .breaches(Some(10));
//!
//! println!("{}", serde_json::to_string_pretty(&rows)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod collection;
pub mod error;
pub mod loader;
pub mod schema;
pub mod sort;
pub mod source;

// Re-export commonly used types
pub use collection::BreachCollection;
pub use error::{CollectionError, Result};
pub use loader::{load_breaches, LoadOptions};
pub use schema::{BreachSchema, FieldRule, FieldShape, ValidationError};
pub use sort::{SortDirection, SortKey};
pub use source::{BreachSource, HttpSource, StaticSource};
