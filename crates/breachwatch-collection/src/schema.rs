//! Structural validation of raw breach records.
//!
//! The schema declares, per wire field, the primitive shape the value must
//! have and whether the field is required. Validation runs over the raw JSON
//! before records are coerced, and stops at the first nonconforming field.

use breachwatch_core::BreachField;
use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Expected primitive shape of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// Any string
    String,
    /// Empty, or a dotted hostname such as `adobe.com`
    DomainName,
    /// Calendar date, `YYYY-MM-DD`
    Date,
    /// RFC 3339 timestamp
    DateTime,
    /// Non-negative integer
    Integer,
    /// `true` or `false`
    Boolean,
    /// Array whose items are all strings
    StringList,
}

impl fmt::Display for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::DomainName => "domain name",
            Self::Date => "date (YYYY-MM-DD)",
            Self::DateTime => "RFC 3339 date-time",
            Self::Integer => "non-negative integer",
            Self::Boolean => "boolean",
            Self::StringList => "list of strings",
        };
        f.write_str(name)
    }
}

/// A record that does not match the schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid breach record at {path}: expected {expected}, found {actual}")]
pub struct ValidationError {
    /// Position of the record in the list
    pub index: usize,
    /// `Name` of the record, when it has a readable one
    pub record: Option<String>,
    /// Path to the offending value, e.g. `[3].DataClasses[1]`
    pub path: String,
    /// What the schema expected
    pub expected: String,
    /// What was found
    pub actual: String,
}

/// Declared shape of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Field the rule applies to
    pub field: BreachField,
    /// Expected shape
    pub shape: FieldShape,
    /// Whether the field must be present
    pub required: bool,
}

impl FieldRule {
    const fn required(field: BreachField, shape: FieldShape) -> Self {
        Self {
            field,
            shape,
            required: true,
        }
    }

    const fn optional(field: BreachField, shape: FieldShape) -> Self {
        Self {
            field,
            shape,
            required: false,
        }
    }
}

/// Field-by-field shape declaration for breach records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreachSchema {
    rules: Vec<FieldRule>,
}

impl Default for BreachSchema {
    fn default() -> Self {
        use BreachField as F;
        use FieldShape as S;

        Self {
            rules: vec![
                FieldRule::required(F::Name, S::String),
                FieldRule::optional(F::Title, S::String),
                FieldRule::optional(F::Domain, S::DomainName),
                FieldRule::required(F::BreachDate, S::Date),
                FieldRule::required(F::AddedDate, S::DateTime),
                FieldRule::required(F::ModifiedDate, S::DateTime),
                FieldRule::required(F::PwnCount, S::Integer),
                FieldRule::optional(F::Description, S::String),
                FieldRule::optional(F::LogoPath, S::String),
                FieldRule::required(F::DataClasses, S::StringList),
                FieldRule::required(F::IsVerified, S::Boolean),
                FieldRule::required(F::IsFabricated, S::Boolean),
                FieldRule::required(F::IsSensitive, S::Boolean),
                FieldRule::required(F::IsRetired, S::Boolean),
                FieldRule::required(F::IsSpamList, S::Boolean),
                FieldRule::optional(F::IsMalware, S::Boolean),
                FieldRule::optional(F::IsSubscriptionFree, S::Boolean),
            ],
        }
    }
}

impl BreachSchema {
    /// Build a schema from explicit rules.
    #[must_use]
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// Validate the record at position `index`.
    pub fn validate(&self, index: usize, record: &Value) -> Result<(), ValidationError> {
        let fail = |path: String, expected: String, actual: String| ValidationError {
            index,
            record: record
                .get(BreachField::Name.as_str())
                .and_then(Value::as_str)
                .map(str::to_string),
            path,
            expected,
            actual,
        };

        let Some(object) = record.as_object() else {
            return Err(fail(
                format!("[{index}]"),
                "object".to_string(),
                describe(record),
            ));
        };

        for rule in &self.rules {
            let path = format!("[{index}].{}", rule.field);
            match object.get(rule.field.as_str()) {
                None if rule.required => {
                    return Err(fail(path, rule.shape.to_string(), "missing".to_string()));
                }
                None => {}
                Some(value) => {
                    check_shape(rule.shape, value, &path)
                        .map_err(|(path, actual)| fail(path, rule.shape.to_string(), actual))?;
                }
            }
        }

        Ok(())
    }

    /// Validate every record, stopping at the first failure.
    pub fn validate_all(&self, records: &[Value]) -> Result<(), ValidationError> {
        records
            .iter()
            .enumerate()
            .try_for_each(|(index, record)| self.validate(index, record))
    }
}

/// Check one value, returning the offending path and a description of what
/// was found on failure.
fn check_shape(shape: FieldShape, value: &Value, path: &str) -> Result<(), (String, String)> {
    let mismatch = || Err((path.to_string(), describe(value)));

    match shape {
        FieldShape::String => match value {
            Value::String(_) => Ok(()),
            _ => mismatch(),
        },
        FieldShape::DomainName => match value.as_str() {
            Some(domain) if domain.is_empty() || domain_regex().is_match(domain) => Ok(()),
            _ => mismatch(),
        },
        FieldShape::Date => match value.as_str() {
            Some(raw) if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok() => Ok(()),
            _ => mismatch(),
        },
        FieldShape::DateTime => match value.as_str() {
            Some(raw) if DateTime::parse_from_rfc3339(raw).is_ok() => Ok(()),
            _ => mismatch(),
        },
        FieldShape::Integer => match value.as_u64() {
            Some(_) => Ok(()),
            None => mismatch(),
        },
        FieldShape::Boolean => match value {
            Value::Bool(_) => Ok(()),
            _ => mismatch(),
        },
        FieldShape::StringList => {
            let Some(items) = value.as_array() else {
                return mismatch();
            };
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    return Err((format!("{path}[{i}]"), describe(item)));
                }
            }
            Ok(())
        }
    }
}

fn domain_regex() -> &'static Regex {
    static DOMAIN_REGEX: OnceLock<Regex> = OnceLock::new();
    DOMAIN_REGEX.get_or_init(|| {
        Regex::new(r"^(?i)([a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z][a-z0-9-]{0,62}$")
            .expect("valid regex")
    })
}

/// Short description of a JSON value for error messages.
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(items) => format!("array of {}", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}
