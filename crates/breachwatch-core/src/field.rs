//! The closed set of breach record fields.
//!
//! Every filter, projection and sort key names a [`BreachField`]. Parsing a
//! field from its wire name is case-sensitive and rejects anything that is
//! not part of the record, so an unknown sort key is caught before the chain
//! runs rather than producing an arbitrary order.

use crate::error::BreachwatchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A field of a breach record, named exactly as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BreachField {
    /// Unique breach name, e.g. `Adobe`
    Name,
    /// Human-readable title
    Title,
    /// Domain of the breached site, possibly empty
    Domain,
    /// Date the breach occurred
    BreachDate,
    /// Date the breach was added to the list
    AddedDate,
    /// Date the entry was last modified
    ModifiedDate,
    /// Number of accounts affected
    PwnCount,
    /// HTML description
    Description,
    /// Logo URL
    LogoPath,
    /// Kinds of data exposed
    DataClasses,
    /// Breach has been verified
    IsVerified,
    /// Breach is believed to be fabricated
    IsFabricated,
    /// Breach is flagged as sensitive
    IsSensitive,
    /// Breach has been retired
    IsRetired,
    /// Breach is a spam list
    IsSpamList,
    /// Breach originated from malware
    IsMalware,
    /// Breach is exempt from subscription gating
    IsSubscriptionFree,
}

/// Declared semantic type of a field, which picks its comparison rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Compared by instant
    Date,
    /// Compared numerically, `false < true`
    Boolean,
    /// Compared numerically
    Number,
    /// Compared with a locale-style collation
    String,
    /// Ordered sequence of strings
    List,
}

impl BreachField {
    /// Every field in canonical record order.
    pub const ALL: [BreachField; 17] = [
        Self::Name,
        Self::Title,
        Self::Domain,
        Self::BreachDate,
        Self::AddedDate,
        Self::ModifiedDate,
        Self::PwnCount,
        Self::Description,
        Self::LogoPath,
        Self::DataClasses,
        Self::IsVerified,
        Self::IsFabricated,
        Self::IsSensitive,
        Self::IsRetired,
        Self::IsSpamList,
        Self::IsMalware,
        Self::IsSubscriptionFree,
    ];

    /// Wire name of the field.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Title => "Title",
            Self::Domain => "Domain",
            Self::BreachDate => "BreachDate",
            Self::AddedDate => "AddedDate",
            Self::ModifiedDate => "ModifiedDate",
            Self::PwnCount => "PwnCount",
            Self::Description => "Description",
            Self::LogoPath => "LogoPath",
            Self::DataClasses => "DataClasses",
            Self::IsVerified => "IsVerified",
            Self::IsFabricated => "IsFabricated",
            Self::IsSensitive => "IsSensitive",
            Self::IsRetired => "IsRetired",
            Self::IsSpamList => "IsSpamList",
            Self::IsMalware => "IsMalware",
            Self::IsSubscriptionFree => "IsSubscriptionFree",
        }
    }

    /// Declared semantic type of the field.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::BreachDate | Self::AddedDate | Self::ModifiedDate => FieldKind::Date,
            Self::PwnCount => FieldKind::Number,
            Self::DataClasses => FieldKind::List,
            Self::IsVerified
            | Self::IsFabricated
            | Self::IsSensitive
            | Self::IsRetired
            | Self::IsSpamList
            | Self::IsMalware
            | Self::IsSubscriptionFree => FieldKind::Boolean,
            Self::Name | Self::Title | Self::Domain | Self::Description | Self::LogoPath => {
                FieldKind::String
            }
        }
    }
}

impl FromStr for BreachField {
    type Err = BreachwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| BreachwatchError::UnknownField {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for BreachField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
