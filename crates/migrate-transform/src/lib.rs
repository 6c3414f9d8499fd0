//! Transformation stage of the legacy migration.
//!
//! - **schema**: declared layout of the wide repair-list rows
//! - **repair**: raw rows to typed repair records, with field issues
//! - **selection**: deny-list field selection for open-schema tables
//! - **sort**: stable newest-first ordering
//! - **extract**: deduplicated reference datasets

pub mod extract;
pub mod repair;
pub mod schema;
pub mod selection;
pub mod sort;

// === Transformation ===
pub use repair::{RecordTransformer, RepairListTransformer, TransformOutput, transform_rows};
pub use schema::{AVARIAS, EXTRAS, IndexedList, RepairListSchema};
pub use selection::{DerivedDate, FieldSelection};

// === Ordering ===
pub use sort::{Dated, sort_by_date_desc, sort_instant};

// === Extraction ===
pub use extract::{
    CATEGORY_FIELDS, Category, CategorySource, DatasetExtractor, FieldSource, ValueOrder,
    category_field,
};
