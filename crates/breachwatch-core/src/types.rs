//! The breach record as published by the breach list endpoint.
//!
//! Field names are PascalCase on the wire. Date-valued fields are coerced to
//! [`DateTime<Utc>`] while deserializing: `BreachDate` arrives as a bare
//! `YYYY-MM-DD` date, the other dates as RFC 3339 timestamps.

use crate::field::BreachField;
use crate::row::FieldValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the breach list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct BreachRecord {
    /// Unique breach name
    pub name: String,
    /// Human-readable title
    #[serde(default)]
    pub title: String,
    /// Breached domain, empty when the breach has no associated site
    #[serde(default)]
    pub domain: String,
    /// When the breach occurred (midnight UTC)
    #[serde(with = "date_only")]
    pub breach_date: DateTime<Utc>,
    /// When the breach was added to the list
    #[serde(with = "date_time")]
    pub added_date: DateTime<Utc>,
    /// When the entry was last modified
    #[serde(with = "date_time")]
    pub modified_date: DateTime<Utc>,
    /// Number of affected accounts
    pub pwn_count: u64,
    /// Free-form HTML description, carried through unmodified
    #[serde(default)]
    pub description: String,
    /// Logo URL, carried through unmodified
    #[serde(default)]
    pub logo_path: String,
    /// Kinds of data exposed, in published order
    #[serde(default)]
    pub data_classes: Vec<String>,
    /// Breach has been verified
    pub is_verified: bool,
    /// Breach is believed to be fabricated
    pub is_fabricated: bool,
    /// Breach is flagged as sensitive
    pub is_sensitive: bool,
    /// Breach has been retired
    pub is_retired: bool,
    /// Breach is a spam list
    pub is_spam_list: bool,
    /// Breach originated from malware
    #[serde(default)]
    pub is_malware: bool,
    /// Breach is exempt from subscription gating
    #[serde(default)]
    pub is_subscription_free: bool,
}

impl BreachRecord {
    /// Value of a single field.
    #[must_use]
    pub fn value(&self, field: BreachField) -> FieldValue {
        match field {
            BreachField::Name => FieldValue::Text(self.name.clone()),
            BreachField::Title => FieldValue::Text(self.title.clone()),
            BreachField::Domain => FieldValue::Text(self.domain.clone()),
            BreachField::BreachDate => FieldValue::Date(self.breach_date),
            BreachField::AddedDate => FieldValue::Date(self.added_date),
            BreachField::ModifiedDate => FieldValue::Date(self.modified_date),
            BreachField::PwnCount => FieldValue::Number(self.pwn_count),
            BreachField::Description => FieldValue::Text(self.description.clone()),
            BreachField::LogoPath => FieldValue::Text(self.logo_path.clone()),
            BreachField::DataClasses => FieldValue::List(self.data_classes.clone()),
            BreachField::IsVerified => FieldValue::Flag(self.is_verified),
            BreachField::IsFabricated => FieldValue::Flag(self.is_fabricated),
            BreachField::IsSensitive => FieldValue::Flag(self.is_sensitive),
            BreachField::IsRetired => FieldValue::Flag(self.is_retired),
            BreachField::IsSpamList => FieldValue::Flag(self.is_spam_list),
            BreachField::IsMalware => FieldValue::Flag(self.is_malware),
            BreachField::IsSubscriptionFree => FieldValue::Flag(self.is_subscription_free),
        }
    }
}

/// Parse a wire date: RFC 3339, a zone-less `YYYY-MM-DDTHH:MM:SS`, or a bare
/// `YYYY-MM-DD` (taken as midnight UTC).
#[must_use]
pub fn parse_wire_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn deserialize_wire_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_wire_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date '{raw}'")))
}

mod date_only {
    use chrono::{DateTime, Utc};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D>(d: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        super::deserialize_wire_date(d)
    }
}

mod date_time {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D>(d: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        super::deserialize_wire_date(d)
    }
}
