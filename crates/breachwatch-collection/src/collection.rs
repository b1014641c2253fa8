//! The chainable breach collection.
//!
//! A [`BreachCollection`] keeps the rows produced at load time untouched and
//! works on a separate copy. Every chain method narrows, reorders or reshapes
//! that working copy and returns `&mut Self`; [`BreachCollection::breaches`]
//! hands back a detached `Vec<Row>` and [`BreachCollection::reset`] goes back
//! to the loaded rows without another fetch.

use crate::error::Result;
use crate::loader::{load_breaches, LoadOptions};
use crate::sort::{SortDirection, SortKey};
use crate::source::BreachSource;
use breachwatch_core::{BreachField, BreachRecord, FieldKind, Row};
use std::collections::HashSet;
use tracing::{debug, trace};

/// A loaded breach list and the current state of a query over it.
#[derive(Debug, Clone)]
pub struct BreachCollection {
    original: Vec<Row>,
    working: Vec<Row>,
}

impl BreachCollection {
    /// Build a collection from records already in hand.
    #[must_use]
    pub fn from_records(records: Vec<BreachRecord>) -> Self {
        let original: Vec<Row> = records.into_iter().map(Row::from).collect();
        Self {
            working: original.clone(),
            original,
        }
    }

    /// Fetch the list from `source` once and build a collection over it.
    ///
    /// # Errors
    /// Propagates transport and validation errors from [`load_breaches`].
    pub async fn load(source: &dyn BreachSource, options: &LoadOptions) -> Result<Self> {
        let records = load_breaches(source, options).await?;
        Ok(Self::from_records(records))
    }

    /// Keep the rows for which `predicate` holds, preserving their order.
    pub fn filter<F>(&mut self, mut predicate: F) -> &mut Self
    where
        F: FnMut(&Row) -> bool,
    {
        let before = self.working.len();
        self.working.retain(|row| predicate(row));
        trace!(before, after = self.working.len(), "filter applied");
        self
    }

    /// Keep rows whose boolean `field` equals `expected`.
    ///
    /// Rows that do not carry the field never match, nor does a field that
    /// is not boolean.
    pub fn by_flag(&mut self, field: BreachField, expected: bool) -> &mut Self {
        if field.kind() != FieldKind::Boolean {
            debug!(%field, "flag filter on a non-boolean field matches nothing");
        }
        self.filter(|row| row.flag(field) == Some(expected))
    }

    /// Keep rows whose `IsVerified` equals `expected`.
    pub fn is_verified(&mut self, expected: bool) -> &mut Self {
        self.by_flag(BreachField::IsVerified, expected)
    }

    /// Keep verified breaches.
    pub fn verified(&mut self) -> &mut Self {
        self.is_verified(true)
    }

    /// Keep rows whose `IsFabricated` equals `expected`.
    pub fn is_fabricated(&mut self, expected: bool) -> &mut Self {
        self.by_flag(BreachField::IsFabricated, expected)
    }

    /// Keep fabricated breaches.
    pub fn fabricated(&mut self) -> &mut Self {
        self.is_fabricated(true)
    }

    /// Keep rows whose `IsSensitive` equals `expected`.
    pub fn is_sensitive(&mut self, expected: bool) -> &mut Self {
        self.by_flag(BreachField::IsSensitive, expected)
    }

    /// Keep sensitive breaches.
    pub fn sensitive(&mut self) -> &mut Self {
        self.is_sensitive(true)
    }

    /// Keep rows whose `IsRetired` equals `expected`.
    pub fn is_retired(&mut self, expected: bool) -> &mut Self {
        self.by_flag(BreachField::IsRetired, expected)
    }

    /// Keep retired breaches.
    pub fn retired(&mut self) -> &mut Self {
        self.is_retired(true)
    }

    /// Keep rows whose `IsSpamList` equals `expected`.
    pub fn is_spam_list(&mut self, expected: bool) -> &mut Self {
        self.by_flag(BreachField::IsSpamList, expected)
    }

    /// Keep spam lists.
    pub fn spam_list(&mut self) -> &mut Self {
        self.is_spam_list(true)
    }

    /// Keep rows whose `IsMalware` equals `expected`.
    pub fn is_malware(&mut self, expected: bool) -> &mut Self {
        self.by_flag(BreachField::IsMalware, expected)
    }

    /// Keep rows whose `IsSubscriptionFree` equals `expected`.
    pub fn is_subscription_free(&mut self, expected: bool) -> &mut Self {
        self.by_flag(BreachField::IsSubscriptionFree, expected)
    }

    /// Keep rows whose `Name` is one of `names`.
    pub fn by_name<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: HashSet<String> = names.into_iter().map(|n| n.as_ref().to_string()).collect();
        self.filter(|row| row.name().is_some_and(|name| names.contains(name)))
    }

    /// Filter on `Domain`.
    ///
    /// `Some(domain)` keeps exact matches, so `Some("")` keeps breaches with
    /// no domain. `None` keeps breaches whose domain is non-empty.
    pub fn by_domain(&mut self, domain: Option<&str>) -> &mut Self {
        match domain {
            Some(wanted) => self.filter(|row| row.text(BreachField::Domain) == Some(wanted)),
            None => self.filter(|row| {
                row.text(BreachField::Domain)
                    .is_some_and(|domain| !domain.is_empty())
            }),
        }
    }

    /// Keep rows whose `DataClasses` contain every one of `classes`.
    pub fn by_data_class<I, S>(&mut self, classes: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for class in classes {
            let class = class.as_ref();
            self.filter(|row| {
                row.list(BreachField::DataClasses)
                    .is_some_and(|classes| classes.iter().any(|c| c == class))
            });
        }
        self
    }

    /// Reshape every row to exactly `fields`, in that order.
    ///
    /// Fields the row does not carry are kept as absent. [`reset`](Self::reset)
    /// is the only way back to full rows.
    pub fn pluck(&mut self, fields: &[BreachField]) -> &mut Self {
        for row in &mut self.working {
            *row = row.project(fields);
        }
        debug!(fields = ?fields, rows = self.working.len(), "projected rows");
        self
    }

    /// Order rows by `key`. Rows with equal keys keep their relative order.
    pub fn sort(&mut self, key: SortKey) -> &mut Self {
        self.working.sort_by(|a, b| key.compare(a, b));
        debug!(%key, rows = self.working.len(), "sorted rows");
        self
    }

    /// Order rows by `field` in `direction`.
    pub fn sort_by(&mut self, field: BreachField, direction: SortDirection) -> &mut Self {
        self.sort(SortKey { field, direction })
    }

    /// End the chain: the first `limit` rows, or all of them when `limit` is
    /// `None` or zero.
    #[must_use]
    pub fn breaches(&self, limit: Option<usize>) -> Vec<Row> {
        match limit {
            Some(limit) if limit > 0 => self.working.iter().take(limit).cloned().collect(),
            _ => self.working.clone(),
        }
    }

    /// The first row of the working set.
    #[must_use]
    pub fn first(&self) -> Option<Row> {
        self.working.first().cloned()
    }

    /// Discard every filter, sort and projection applied so far.
    pub fn reset(&mut self) -> &mut Self {
        self.working.clone_from(&self.original);
        debug!(rows = self.working.len(), "collection reset");
        self
    }

    /// Number of rows in the working set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.working.len()
    }

    /// Whether the working set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// The rows as loaded.
    #[must_use]
    pub fn original(&self) -> &[Row] {
        &self.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(name: &str, pwn_count: u64) -> BreachRecord {
        BreachRecord {
            name: name.to_string(),
            title: name.to_string(),
            domain: String::new(),
            breach_date: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            added_date: Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap(),
            modified_date: Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap(),
            pwn_count,
            description: String::new(),
            logo_path: String::new(),
            data_classes: Vec::new(),
            is_verified: true,
            is_fabricated: false,
            is_sensitive: false,
            is_retired: false,
            is_spam_list: false,
            is_malware: false,
            is_subscription_free: false,
        }
    }

    fn names(rows: &[Row]) -> Vec<&str> {
        rows.iter().filter_map(Row::name).collect()
    }

    #[test]
    fn test_filter_preserves_order() {
        let mut collection =
            BreachCollection::from_records(vec![record("a", 3), record("b", 1), record("c", 2)]);
        let rows = collection
            .filter(|row| row.number(BreachField::PwnCount) != Some(1))
            .breaches(None);
        assert_eq!(names(&rows), vec!["a", "c"]);
    }

    #[test]
    fn test_by_name() {
        let mut collection =
            BreachCollection::from_records(vec![record("a", 3), record("b", 1), record("c", 2)]);
        let rows = collection.by_name(["c", "a", "zz"]).breaches(None);
        assert_eq!(names(&rows), vec!["a", "c"]);
    }

    #[test]
    fn test_flag_filter_after_pluck_matches_nothing() {
        let mut collection = BreachCollection::from_records(vec![record("a", 3)]);
        collection.pluck(&[BreachField::Name]).verified();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_flag_filter_on_non_boolean_field() {
        let mut collection = BreachCollection::from_records(vec![record("a", 3)]);
        collection.by_flag(BreachField::Name, true);
        assert!(collection.is_empty());
    }

    #[test]
    fn test_limit() {
        let mut collection =
            BreachCollection::from_records(vec![record("a", 3), record("b", 1), record("c", 2)]);
        assert_eq!(collection.breaches(Some(2)).len(), 2);
        assert_eq!(collection.breaches(Some(10)).len(), 3);
        assert_eq!(collection.first().as_ref().and_then(Row::name), Some("a"));
        collection.filter(|_| false);
        assert_eq!(collection.first(), None);
    }

    #[test]
    fn test_sort_by_direction() {
        let mut collection =
            BreachCollection::from_records(vec![record("a", 3), record("b", 1), record("c", 2)]);
        let rows = collection
            .sort_by(BreachField::PwnCount, SortDirection::Descending)
            .breaches(None);
        assert_eq!(names(&rows), vec!["a", "c", "b"]);
    }
}
