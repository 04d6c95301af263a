//! Typed property lookup over a [`PropertyBag`].

use crate::types::{DateRange, PropertyBag, PropertyValue};

/// Structural kind of a property, used for fallback matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Status,
    Select,
    MultiSelect,
    Date,
    RichText,
    Title,
}

impl PropertyKind {
    /// The kind of a property value, or `None` for unsupported types.
    pub fn of(value: &PropertyValue) -> Option<PropertyKind> {
        match value {
            PropertyValue::Status(_) => Some(PropertyKind::Status),
            PropertyValue::Select(_) => Some(PropertyKind::Select),
            PropertyValue::MultiSelect(_) => Some(PropertyKind::MultiSelect),
            PropertyValue::Date(_) => Some(PropertyKind::Date),
            PropertyValue::RichText(_) => Some(PropertyKind::RichText),
            PropertyValue::Title(_) => Some(PropertyKind::Title),
            PropertyValue::Unsupported(_) => None,
        }
    }
}

/// How to find one logical field in a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLookup {
    /// Preferred property names, tried in order.
    pub names: Vec<String>,
    /// Kinds accepted by the structural fallback, and by name-only lookups.
    pub kinds: Vec<PropertyKind>,
    /// Whether to scan for the first property of an accepted kind when no
    /// preferred name is present.
    pub structural_fallback: bool,
}

impl FieldLookup {
    /// A lookup that falls back to the first property of one of `kinds`.
    pub fn with_fallback<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        kinds: impl IntoIterator<Item = PropertyKind>,
    ) -> Self {
        FieldLookup {
            names: names.into_iter().map(Into::into).collect(),
            kinds: kinds.into_iter().collect(),
            structural_fallback: true,
        }
    }

    /// A lookup that only matches by name, and only properties of `kinds`.
    pub fn named<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        kinds: impl IntoIterator<Item = PropertyKind>,
    ) -> Self {
        FieldLookup {
            names: names.into_iter().map(Into::into).collect(),
            kinds: kinds.into_iter().collect(),
            structural_fallback: false,
        }
    }

    fn accepts(&self, value: &PropertyValue) -> bool {
        PropertyKind::of(value).is_some_and(|kind| self.kinds.contains(&kind))
    }
}

/// Finds the property a lookup refers to.
///
/// With a structural fallback, a property found by name is returned whatever
/// its type; the typed helpers below then read it as empty if the type does
/// not fit. A name-only lookup ignores properties of other kinds.
pub fn extract<'a>(bag: &'a PropertyBag, lookup: &FieldLookup) -> Option<&'a PropertyValue> {
    if !lookup.structural_fallback {
        return lookup
            .names
            .iter()
            .filter_map(|name| bag.get(name))
            .find(|value| lookup.accepts(value));
    }

    if let Some(value) = lookup.names.iter().find_map(|name| bag.get(name)) {
        return Some(value);
    }

    bag.iter()
        .map(|(_, value)| value)
        .find(|value| lookup.accepts(value))
}

/// Option labels of the field, or an empty list.
pub fn extract_labels(bag: &PropertyBag, lookup: &FieldLookup) -> Vec<String> {
    extract(bag, lookup)
        .map(PropertyValue::labels)
        .unwrap_or_default()
}

/// Text of the field, or an empty string.
pub fn extract_text(bag: &PropertyBag, lookup: &FieldLookup) -> String {
    extract(bag, lookup)
        .map(PropertyValue::text)
        .unwrap_or_default()
}

/// Date range of the field, if it has one.
pub fn extract_date(bag: &PropertyBag, lookup: &FieldLookup) -> Option<DateRange> {
    extract(bag, lookup).and_then(PropertyValue::date).cloned()
}
