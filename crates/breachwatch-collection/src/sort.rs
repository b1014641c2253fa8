//! Sort keys and the type-aware row comparison.
//!
//! A [`SortKey`] names a [`BreachField`] and a [`SortDirection`]. The field's
//! declared [`FieldKind`] picks the comparison rule. Rows that do not carry
//! the key (after a projection) always sort last.

use crate::error::{CollectionError, Result};
use breachwatch_core::{BreachField, FieldKind, FieldValue, Row};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

impl SortDirection {
    /// Direction from a numeric sign: negative is descending.
    #[must_use]
    pub fn from_sign(sign: i64) -> Self {
        if sign < 0 {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    /// Apply the direction to an ascending ordering.
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl From<i8> for SortDirection {
    fn from(sign: i8) -> Self {
        Self::from_sign(i64::from(sign))
    }
}

impl FromStr for SortDirection {
    type Err = CollectionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "asc" | "1" => Ok(Self::Ascending),
            "desc" | "-1" => Ok(Self::Descending),
            other => Err(CollectionError::InvalidDirection {
                value: other.to_string(),
            }),
        }
    }
}

/// A field plus a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    /// Field to order by
    pub field: BreachField,
    /// Direction to order in
    pub direction: SortDirection,
}

impl Default for SortKey {
    fn default() -> Self {
        Self::ascending(BreachField::AddedDate)
    }
}

impl SortKey {
    /// Ascending order on `field`.
    #[must_use]
    pub fn ascending(field: BreachField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    /// Descending order on `field`.
    #[must_use]
    pub fn descending(field: BreachField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }

    /// Parse `key` with an explicit direction.
    ///
    /// A leading `-` on `key` forces descending order regardless of
    /// `direction`.
    pub fn parse_with(key: &str, direction: SortDirection) -> Result<Self> {
        let (name, direction) = match key.strip_prefix('-') {
            Some(stripped) => (stripped, SortDirection::Descending),
            None => (key, direction),
        };
        let field = name.parse::<BreachField>()?;
        Ok(Self { field, direction })
    }

    /// Compare two rows under this key.
    #[must_use]
    pub fn compare(&self, a: &Row, b: &Row) -> Ordering {
        match (a.get(self.field), b.get(self.field)) {
            (Some(x), Some(y)) => self
                .direction
                .apply(compare_values(self.field.kind(), x, y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl FromStr for SortKey {
    type Err = CollectionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_with(s, SortDirection::Ascending)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Ascending => write!(f, "{}", self.field),
            SortDirection::Descending => write!(f, "-{}", self.field),
        }
    }
}

/// Ascending comparison of two values of a field of declared `kind`.
fn compare_values(kind: FieldKind, a: &FieldValue, b: &FieldValue) -> Ordering {
    match (kind, a, b) {
        (FieldKind::Date, FieldValue::Date(x), FieldValue::Date(y)) => {
            x.timestamp_millis().cmp(&y.timestamp_millis())
        }
        (FieldKind::Number, FieldValue::Number(x), FieldValue::Number(y)) => x.cmp(y),
        (FieldKind::Boolean, FieldValue::Flag(x), FieldValue::Flag(y)) => x.cmp(y),
        (FieldKind::String, FieldValue::Text(x), FieldValue::Text(y)) => collate(x, y),
        (FieldKind::List, FieldValue::List(x), FieldValue::List(y)) => x
            .len()
            .cmp(&y.len())
            .then_with(|| {
                x.iter()
                    .zip(y)
                    .map(|(l, r)| collate(l, r))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            }),
        _ => Ordering::Equal,
    }
}

/// Locale-style string order: case-insensitive first, then lowercase before
/// uppercase, then code points.
fn collate(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}
