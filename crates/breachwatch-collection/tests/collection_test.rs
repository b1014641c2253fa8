use breachwatch_collection::{BreachCollection, LoadOptions, SortKey, StaticSource};
use breachwatch_core::{BreachField, Row};
use std::collections::HashSet;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/breaches.json");

async fn fixture() -> BreachCollection {
    let source = StaticSource::from_path(FIXTURE).expect("read fixture");
    BreachCollection::load(&source, &LoadOptions::validated(true))
        .await
        .expect("load fixture")
}

fn names(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .filter_map(Row::name)
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_end_to_end_chain() {
    let mut collection = fixture().await;

    let rows = collection
        .by_domain(Some(""))
        .is_sensitive(false)
        .verified()
        .by_data_class(["names", "job-titles"])
        .sort("-PwnCount".parse::<SortKey>().expect("parse key"))
        .pluck(&[BreachField::Name, BreachField::PwnCount])
        .breaches(None);

    let json = serde_json::to_value(&rows).expect("serialize rows");
    assert_eq!(
        json,
        serde_json::json!([
            { "Name": "ScrapedProfiles", "PwnCount": 622_161_052 },
            { "Name": "RecruiterDump", "PwnCount": 125_929_660 },
        ])
    );
}

#[tokio::test]
async fn test_filters_are_a_conjunction() {
    let mut collection = fixture().await;
    let total = collection.len();

    collection
        .is_spam_list(false)
        .by_data_class(["names"])
        .is_fabricated(false);
    let rows = collection.breaches(None);

    assert!(rows.len() <= total);
    for row in &rows {
        assert_eq!(row.flag(BreachField::IsSpamList), Some(false));
        assert_eq!(row.flag(BreachField::IsFabricated), Some(false));
        let classes = row.list(BreachField::DataClasses).expect("data classes");
        assert!(classes.iter().any(|c| c == "names"));
    }
    assert_eq!(names(&rows), vec!["ScrapedProfiles", "RecruiterDump", "Acme"]);
}

#[tokio::test]
async fn test_flag_helpers_keep_matching_breaches() {
    type Apply = fn(&mut BreachCollection) -> &mut BreachCollection;
    let cases: [(&str, Apply, Vec<&str>); 9] = [
        (
            "verified",
            BreachCollection::verified,
            vec!["ScrapedProfiles", "RecruiterDump", "Acme", "QuietDating"],
        ),
        ("fabricated", BreachCollection::fabricated, vec!["QuietDating"]),
        ("sensitive", BreachCollection::sensitive, vec!["QuietDating"]),
        ("retired", BreachCollection::retired, vec!["Acme"]),
        ("spam_list", BreachCollection::spam_list, vec!["ComboList"]),
        ("malware", |c| c.is_malware(true), vec!["ComboList"]),
        (
            "subscription_free",
            |c| c.is_subscription_free(true),
            vec!["ComboList"],
        ),
        (
            "not_malware",
            |c| c.is_malware(false),
            vec!["ScrapedProfiles", "RecruiterDump", "Acme", "QuietDating"],
        ),
        (
            "not_retired",
            |c| c.is_retired(false),
            vec!["ScrapedProfiles", "RecruiterDump", "QuietDating", "ComboList"],
        ),
    ];

    let mut collection = fixture().await;
    for (label, apply, expected) in cases {
        collection.reset();
        let rows = apply(&mut collection).breaches(None);
        assert_eq!(names(&rows), expected, "filter {label}");
    }
}

#[tokio::test]
async fn test_data_classes_are_anded() {
    let mut collection = fixture().await;
    let rows = collection
        .by_data_class(["email", "job-titles"])
        .breaches(None);
    assert_eq!(names(&rows), vec!["ScrapedProfiles", "Acme"]);
}

#[tokio::test]
async fn test_empty_and_omitted_domain_are_disjoint() {
    let mut collection = fixture().await;

    let empty: HashSet<String> = names(&collection.by_domain(Some("")).breaches(None))
        .into_iter()
        .collect();
    collection.reset();
    let any: HashSet<String> = names(&collection.by_domain(None).breaches(None))
        .into_iter()
        .collect();

    assert!(!empty.is_empty());
    assert!(!any.is_empty());
    assert!(empty.is_disjoint(&any));
    assert_eq!(empty.len() + any.len(), collection.original().len());
    assert!(any.contains("Acme"));
}

#[tokio::test]
async fn test_exact_domain_match() {
    let mut collection = fixture().await;
    assert_eq!(names(&collection.by_domain(Some("acme.example")).breaches(None)), vec!["Acme"]);
    collection.reset();
    assert!(collection.by_domain(Some("ACME.example")).is_empty());
}

#[tokio::test]
async fn test_sort_and_minus_sort_are_reversed() {
    for key in ["PwnCount", "AddedDate", "Name", "BreachDate"] {
        let mut collection = fixture().await;
        let ascending = names(&collection.sort(key.parse().expect("parse key")).breaches(None));
        let descending = names(
            &collection
                .sort(format!("-{key}").parse().expect("parse key"))
                .breaches(None),
        );

        let mut reversed = descending.clone();
        reversed.reverse();
        assert_eq!(ascending, reversed, "sorting by {key}");
    }
}

#[tokio::test]
async fn test_default_sort_is_added_date_ascending() {
    let mut collection = fixture().await;
    let rows = collection.sort(SortKey::default()).breaches(None);
    assert_eq!(
        names(&rows),
        vec!["QuietDating", "Acme", "RecruiterDump", "ScrapedProfiles", "ComboList"]
    );
}

#[tokio::test]
async fn test_sort_is_stable() {
    let mut collection = fixture().await;
    // IsVerified: every record but ComboList is true
    let rows = collection
        .sort("IsVerified".parse().expect("parse key"))
        .breaches(None);
    assert_eq!(
        names(&rows),
        vec!["ComboList", "ScrapedProfiles", "RecruiterDump", "Acme", "QuietDating"]
    );

    collection.reset();
    let rows = collection
        .sort("-IsSpamList".parse().expect("parse key"))
        .breaches(None);
    assert_eq!(
        names(&rows),
        vec!["ComboList", "ScrapedProfiles", "RecruiterDump", "Acme", "QuietDating"]
    );
}

#[tokio::test]
async fn test_sort_puts_missing_keys_last() {
    let mut collection = fixture().await;
    collection.pluck(&[BreachField::Name]);
    let before = names(&collection.breaches(None));
    let after = names(&collection.sort("-PwnCount".parse().expect("parse key")).breaches(None));
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_pluck_keeps_only_requested_keys() {
    let mut collection = fixture().await;
    let rows = collection.pluck(&[BreachField::Name]).breaches(None);

    assert_eq!(rows.len(), 5);
    for row in &rows {
        assert_eq!(row.keys().collect::<Vec<_>>(), vec![BreachField::Name]);
        let json = serde_json::to_value(row).expect("serialize row");
        assert_eq!(json.as_object().map(serde_json::Map::len), Some(1));
    }
}

#[tokio::test]
async fn test_pluck_twice_marks_missing_fields_absent() {
    let mut collection = fixture().await;
    let rows = collection
        .pluck(&[BreachField::Name])
        .pluck(&[BreachField::Name, BreachField::Domain])
        .breaches(Some(1));

    let json = serde_json::to_value(&rows).expect("serialize rows");
    assert_eq!(
        json,
        serde_json::json!([{ "Name": "ScrapedProfiles", "Domain": null }])
    );
}

#[tokio::test]
async fn test_reset_restores_original() {
    let mut collection = fixture().await;
    let loaded = collection.breaches(None);

    collection
        .is_verified(false)
        .sort("-AddedDate".parse().expect("parse key"))
        .pluck(&[BreachField::Name]);
    assert_ne!(collection.breaches(None), loaded);

    collection.reset();
    assert_eq!(collection.breaches(None), loaded);
    assert_eq!(collection.original(), loaded.as_slice());
}

#[tokio::test]
async fn test_zero_and_missing_limit_return_everything() {
    let collection = fixture().await;
    assert_eq!(collection.breaches(Some(0)).len(), 5);
    assert_eq!(collection.breaches(None).len(), 5);
    assert_eq!(collection.breaches(Some(0)), collection.breaches(None));
    assert_eq!(names(&collection.breaches(Some(2))), vec!["ScrapedProfiles", "RecruiterDump"]);
}

#[tokio::test]
async fn test_terminal_result_is_detached() {
    let mut collection = fixture().await;
    let snapshot = collection.breaches(None);
    collection.filter(|_| false);
    assert!(collection.is_empty());
    assert_eq!(snapshot.len(), 5);
}
