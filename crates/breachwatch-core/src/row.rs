//! Field-ordered rows produced by the query chain.
//!
//! A loaded [`BreachRecord`] becomes a [`Row`] holding every field in
//! canonical order. Projection narrows a row to a caller-chosen field list;
//! a requested field the source row does not carry is kept with the
//! [`FieldValue::Absent`] marker so the key is still present.

use crate::field::BreachField;
use crate::types::BreachRecord;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// The value of one field in a [`Row`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// String-typed field
    Text(String),
    /// Date-typed field
    Date(DateTime<Utc>),
    /// Numeric field
    Number(u64),
    /// Boolean flag
    Flag(bool),
    /// List of strings
    List(Vec<String>),
    /// The field was requested but the source row did not carry it
    Absent,
}

impl FieldValue {
    /// Whether this is the absent marker.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Date(date) => {
                serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            Self::Number(n) => serializer.serialize_u64(*n),
            Self::Flag(b) => serializer.serialize_bool(*b),
            Self::List(items) => items.serialize(serializer),
            Self::Absent => serializer.serialize_none(),
        }
    }
}

/// An ordered set of field/value entries with unique fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    entries: Vec<(BreachField, FieldValue)>,
}

impl Row {
    /// Number of fields in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the row carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the row carries `field`, even as [`FieldValue::Absent`].
    #[must_use]
    pub fn contains_key(&self, field: BreachField) -> bool {
        self.entries.iter().any(|(f, _)| *f == field)
    }

    /// Fields in row order.
    pub fn keys(&self) -> impl Iterator<Item = BreachField> + '_ {
        self.entries.iter().map(|(f, _)| *f)
    }

    /// The value of `field`, or `None` when it is missing or absent.
    #[must_use]
    pub fn get(&self, field: BreachField) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v)
            .filter(|v| !v.is_absent())
    }

    /// String value of `field`.
    #[must_use]
    pub fn text(&self, field: BreachField) -> Option<&str> {
        match self.get(field) {
            Some(FieldValue::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Boolean value of `field`.
    #[must_use]
    pub fn flag(&self, field: BreachField) -> Option<bool> {
        match self.get(field) {
            Some(FieldValue::Flag(b)) => Some(*b),
            _ => None,
        }
    }

    /// Numeric value of `field`.
    #[must_use]
    pub fn number(&self, field: BreachField) -> Option<u64> {
        match self.get(field) {
            Some(FieldValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// Date value of `field`.
    #[must_use]
    pub fn date(&self, field: BreachField) -> Option<DateTime<Utc>> {
        match self.get(field) {
            Some(FieldValue::Date(date)) => Some(*date),
            _ => None,
        }
    }

    /// List value of `field`.
    #[must_use]
    pub fn list(&self, field: BreachField) -> Option<&[String]> {
        match self.get(field) {
            Some(FieldValue::List(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Shorthand for the `Name` field.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.text(BreachField::Name)
    }

    /// A new row holding exactly `fields`, in that order.
    ///
    /// Duplicate fields are kept once, at their first position.
    #[must_use]
    pub fn project(&self, fields: &[BreachField]) -> Row {
        let mut entries: Vec<(BreachField, FieldValue)> = Vec::with_capacity(fields.len());
        for &field in fields {
            if entries.iter().any(|(f, _)| *f == field) {
                continue;
            }
            let value = self
                .entries
                .iter()
                .find(|(f, _)| *f == field)
                .map_or(FieldValue::Absent, |(_, v)| v.clone());
            entries.push((field, value));
        }
        Row { entries }
    }
}

impl From<&BreachRecord> for Row {
    fn from(record: &BreachRecord) -> Self {
        Row {
            entries: BreachField::ALL
                .iter()
                .map(|&field| (field, record.value(field)))
                .collect(),
        }
    }
}

impl From<BreachRecord> for Row {
    fn from(record: BreachRecord) -> Self {
        Row::from(&record)
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> BreachRecord {
        BreachRecord {
            name: "Gawker".to_string(),
            title: "Gawker".to_string(),
            domain: "gawker.com".to_string(),
            breach_date: Utc.with_ymd_and_hms(2010, 12, 11, 0, 0, 0).unwrap(),
            added_date: Utc.with_ymd_and_hms(2013, 12, 4, 0, 0, 0).unwrap(),
            modified_date: Utc.with_ymd_and_hms(2013, 12, 4, 0, 0, 0).unwrap(),
            pwn_count: 1_247_574,
            description: String::new(),
            logo_path: String::new(),
            data_classes: vec!["Email addresses".to_string(), "Passwords".to_string()],
            is_verified: true,
            is_fabricated: false,
            is_sensitive: false,
            is_retired: false,
            is_spam_list: false,
            is_malware: false,
            is_subscription_free: false,
        }
    }

    #[test]
    fn test_full_row_has_every_field() {
        let row = Row::from(record());
        assert_eq!(row.len(), BreachField::ALL.len());
        assert_eq!(row.keys().collect::<Vec<_>>(), BreachField::ALL.to_vec());
        assert_eq!(row.name(), Some("Gawker"));
        assert_eq!(row.number(BreachField::PwnCount), Some(1_247_574));
        assert_eq!(row.flag(BreachField::IsVerified), Some(true));
        assert_eq!(row.list(BreachField::DataClasses).map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_project_orders_and_marks_absent() {
        let row = Row::from(record());
        let narrowed = row.project(&[BreachField::PwnCount, BreachField::Name]);
        assert_eq!(
            narrowed.keys().collect::<Vec<_>>(),
            vec![BreachField::PwnCount, BreachField::Name]
        );

        let again = narrowed.project(&[BreachField::Name, BreachField::Domain]);
        assert!(again.contains_key(BreachField::Domain));
        assert_eq!(again.get(BreachField::Domain), None);
        assert_eq!(again.name(), Some("Gawker"));
    }

    #[test]
    fn test_project_drops_duplicates() {
        let row = Row::from(record());
        let narrowed = row.project(&[BreachField::Name, BreachField::Name]);
        assert_eq!(narrowed.len(), 1);
    }

    #[test]
    fn test_serialize_in_row_order() {
        let row = Row::from(record()).project(&[
            BreachField::PwnCount,
            BreachField::Name,
            BreachField::AddedDate,
        ]);
        let json = serde_json::to_string(&row).expect("serialize row");
        assert_eq!(
            json,
            r#"{"PwnCount":1247574,"Name":"Gawker","AddedDate":"2013-12-04T00:00:00Z"}"#
        );

        let absent = row.project(&[BreachField::Domain]);
        assert_eq!(
            serde_json::to_string(&absent).expect("serialize row"),
            r#"{"Domain":null}"#
        );
    }
}
