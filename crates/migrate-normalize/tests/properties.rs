//! Property tests for normalization and deduplication.

use std::collections::HashSet;

use chrono::NaiveDate;
use migrate_normalize::{
    DedupIndex, canonical_timestamp, identity_key, normalize_date, to_timestamp,
};
use proptest::prelude::*;

fn valid_date() -> impl Strategy<Value = NaiveDate> {
    (1900i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).expect("valid date"))
}

fn time_suffix() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        (0u32..24, 0u32..60).prop_map(|(h, m)| format!("T{h:02}:{m:02}")),
        (0u32..24, 0u32..60, 0u32..60, 0u32..1000)
            .prop_map(|(h, m, s, ms)| format!("T{h:02}:{m:02}:{s:02}.{ms:03}Z")),
        (0u32..24, 0u32..60, 0u32..60).prop_map(|(h, m, s)| format!(" {h:02}:{m:02}:{s:02}")),
    ]
}

proptest! {
    #[test]
    fn normalize_is_idempotent(
        date in valid_date(),
        suffix in time_suffix(),
        slash in any::<bool>(),
    ) {
        let sep = if slash { '/' } else { '-' };
        let raw = format!(
            "{}{sep}{}{sep}{}{suffix}",
            date.format("%d"),
            date.format("%m"),
            date.format("%Y")
        );
        let once = normalize_date(&raw).expect("normalizes");
        let twice = normalize_date(&once).expect("normalizes again");
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.starts_with(&date.format("%Y-%m-%d").to_string()));
    }

    #[test]
    fn canonical_double_parse_is_stable(date in valid_date(), suffix in time_suffix()) {
        let raw = format!("{}{suffix}", date.format("%d/%m/%Y"));
        let canonical = canonical_timestamp(&raw).expect("canonical");
        let reparsed = canonical_timestamp(&canonical).expect("canonical again");
        prop_assert_eq!(&canonical, &reparsed);
        prop_assert!(to_timestamp(&canonical).is_ok());
    }

    #[test]
    fn normalize_never_panics(raw in ".{0,24}") {
        let _ = normalize_date(&raw);
    }

    #[test]
    fn representatives_have_unique_identity(
        values in prop::collection::vec("[a-cA-C ]{1,4}", 0..40),
    ) {
        let mut index = DedupIndex::new();
        for value in &values {
            index.put("Categoria", value);
        }
        let representatives = index.representatives("Categoria");
        let keys: HashSet<String> = representatives.iter().map(|v| identity_key(v)).collect();
        prop_assert_eq!(keys.len(), representatives.len());
        prop_assert_eq!(representatives.len() + index.duplicate_count(), values.len());
    }

    #[test]
    fn first_spelling_is_representative(value in "[a-z]{1,8}") {
        let mut index = DedupIndex::new();
        index.put("Categoria", &value);
        let outcome = index.put("Categoria", &value.to_uppercase());
        prop_assert!(!outcome.accepted);
        prop_assert_eq!(outcome.representative, value);
    }
}
