//! Loading the breach list: one fetch, optional validation, date coercion.

use crate::error::{CollectionError, Result};
use crate::schema::BreachSchema;
use crate::source::BreachSource;
use breachwatch_core::BreachRecord;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Options controlling how a list is loaded.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Check every record against the schema before coercing it
    pub validate: bool,
    /// Schema to check against; the default breach schema when `None`
    pub schema: Option<BreachSchema>,
}

impl LoadOptions {
    /// Options with validation switched on or off.
    #[must_use]
    pub fn validated(validate: bool) -> Self {
        Self {
            validate,
            schema: None,
        }
    }

    /// Validate against a custom schema.
    #[must_use]
    pub fn with_schema(mut self, schema: BreachSchema) -> Self {
        self.validate = true;
        self.schema = Some(schema);
        self
    }
}

/// Fetch the list once and turn it into records.
///
/// With validation enabled the whole list is checked before anything is
/// coerced, and the first nonconforming record aborts the load.
///
/// # Errors
/// Returns a transport error if the fetch fails or a record cannot be
/// coerced, and a validation error if validation is enabled and a record
/// does not match the schema.
pub async fn load_breaches(
    source: &dyn BreachSource,
    options: &LoadOptions,
) -> Result<Vec<BreachRecord>> {
    let raw = source.fetch().await?;
    debug!(source = %source.describe(), count = raw.len(), "fetched breach list");

    if options.validate {
        let checked = match options.schema.as_ref() {
            Some(schema) => schema.validate_all(&raw),
            None => BreachSchema::default().validate_all(&raw),
        };
        if let Err(e) = checked {
            warn!(
                index = e.index,
                path = %e.path,
                "breach record failed validation"
            );
            return Err(e.into());
        }
    }

    let records = raw
        .into_iter()
        .enumerate()
        .map(|(index, value)| coerce(index, value))
        .collect::<Result<Vec<_>>>()?;

    info!(
        count = records.len(),
        source = %source.describe(),
        validated = options.validate,
        "loaded breach list"
    );

    Ok(records)
}

fn coerce(index: usize, value: Value) -> Result<BreachRecord> {
    serde_json::from_value(value).map_err(|e| CollectionError::Decode {
        message: format!("record {index}: {e}"),
    })
}
