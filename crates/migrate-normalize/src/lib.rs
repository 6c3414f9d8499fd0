//! Normalization utilities for the legacy migration.
//!
//! - **datetime**: day-first legacy dates to ISO 8601
//! - **identity**: comparison keys that ignore case, accents and punctuation
//! - **dedup**: first-seen deduplication by identity key, with a duplicates log
//! - **numeric**: lenient integer coercion
//! - **hash**: SHA-256 hex digests

pub mod datetime;
pub mod dedup;
pub mod hash;
pub mod identity;
pub mod numeric;

pub use datetime::{canonical_timestamp, format_timestamp, normalize_date, to_timestamp};
pub use dedup::{
    CategoryDuplicates, DedupIndex, DedupKey, DuplicateEntry, DuplicatesReport, PutOutcome,
};
pub use hash::sha256_hex;
pub use identity::identity_key;
pub use numeric::parse_integer;
