//! Newest-first ordering of dated records.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use migrate_model::{RepairRecord, SelectedRecord};
use migrate_normalize::{normalize_date, to_timestamp};

/// Records that may carry a date.
pub trait Dated {
    fn date(&self) -> Option<&str>;
}

impl Dated for RepairRecord {
    fn date(&self) -> Option<&str> {
        self.date_time()
    }
}

impl Dated for SelectedRecord {
    fn date(&self) -> Option<&str> {
        self.get("DataTime")
    }
}

/// The instant a record sorts by.
///
/// The stored value is normalized again before parsing; normalization is
/// idempotent so already-canonical values parse to the same instant.
pub fn sort_instant<T: Dated + ?Sized>(record: &T) -> Option<DateTime<Utc>> {
    let stored = record.date()?;
    let iso = normalize_date(stored).ok()?;
    to_timestamp(&iso).ok()
}

/// Stable sort, newest first.
///
/// Records without a usable date go after all dated ones. Ties and undated
/// records keep their input order.
pub fn sort_by_date_desc<T: Dated>(records: &mut [T]) {
    records.sort_by_cached_key(|record| match sort_instant(record) {
        Some(instant) => (false, Reverse(instant)),
        None => (true, Reverse(DateTime::<Utc>::MIN_UTC)),
    });
}
