//! Property extraction with named-then-structural fallback.
//!
//! Source documents carry localized, occasionally renamed field names. A
//! lookup first tries the preferred names, then (when allowed) falls back to
//! the first property of a matching structural kind, so classification keeps
//! working after a column rename.

mod extract;
mod fields;

pub use extract::{FieldLookup, PropertyKind, extract, extract_date, extract_labels, extract_text};
pub use fields::FieldMap;
