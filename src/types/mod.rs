//! Core domain types for the herald.

pub mod collection;
pub mod ids;
pub mod row;

pub use collection::{CollectionKind, UnknownCollection};
pub use ids::{ChannelId, CollectionId, RowId};
pub use row::{DateRange, PropertyBag, PropertyValue, Row, RowParseError, trim_to_minute};
