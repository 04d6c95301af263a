//! Field names used by the watched Notion workspace.

use super::extract::{FieldLookup, PropertyKind};

/// Where each logical field lives in the watched databases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    /// Feature status; falls back to any status/select/multi-select column.
    pub feature_status: FieldLookup,
    /// Feature content (primary text).
    pub feature_content: FieldLookup,
    /// Feature description (secondary text); rich text only.
    pub feature_description: FieldLookup,
    /// Schedule date; falls back to the first date column.
    pub schedule_date: FieldLookup,
    /// Schedule tags; falls back to the first multi-select column.
    pub schedule_tags: FieldLookup,
}

impl Default for FieldMap {
    fn default() -> Self {
        FieldMap {
            feature_status: FieldLookup::with_fallback(
                ["상태"],
                [
                    PropertyKind::Status,
                    PropertyKind::Select,
                    PropertyKind::MultiSelect,
                ],
            ),
            feature_content: FieldLookup::named(
                ["내용"],
                [PropertyKind::RichText, PropertyKind::Title],
            ),
            feature_description: FieldLookup::named(
                ["설명", "Description"],
                [PropertyKind::RichText],
            ),
            schedule_date: FieldLookup::with_fallback(["날짜"], [PropertyKind::Date]),
            schedule_tags: FieldLookup::with_fallback(["태그"], [PropertyKind::MultiSelect]),
        }
    }
}
