//! Data model for the legacy repair-shop migration.
//!
//! - **raw**: ordered wide-format rows as read from the legacy exports
//! - **record**: the typed repair-order record produced by the transformer
//! - **selected**: open-schema records produced by field selection
//! - **reference**: single-field reference values and datasets
//! - **error**: the error taxonomy shared by every stage

pub mod error;
pub mod raw;
pub mod record;
pub mod reference;
pub mod selected;

pub use error::{ErrorKind, FieldIssue, InvalidDate, MigrationError, NumericCoercionFailure};
pub use raw::{FieldValue, RawRecord};
pub use record::{DateField, OrderNumber, RepairRecord};
pub use reference::{ReferenceDataset, ReferenceValue};
pub use selected::SelectedRecord;
