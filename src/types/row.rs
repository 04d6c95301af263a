//! Rows fetched from the document store and their typed properties.
//!
//! Notion returns each property as a JSON object tagged by a `type` field.
//! Only the handful of shapes the herald reads are modelled; anything else
//! becomes [`PropertyValue::Unsupported`] so a surprising schema never fails
//! the row.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::ids::RowId;

/// A date or date-time range as the document store reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    /// ISO 8601 start (`2024-03-01` or `2024-03-01T09:30:00.000+09:00`).
    pub start: String,
    /// Optional ISO 8601 end.
    pub end: Option<String>,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: Option<String>) -> Self {
        DateRange {
            start: start.into(),
            end,
        }
    }

    /// Renders the range at minute precision: `YYYY-MM-DD HH:MM` or `start ~ end`.
    pub fn display(&self) -> String {
        let start = trim_to_minute(&self.start);
        match self.end.as_deref().map(trim_to_minute) {
            Some(end) if !end.is_empty() => format!("{start} ~ {end}"),
            _ => start,
        }
    }
}

/// Cuts an ISO timestamp down to `YYYY-MM-DD HH:MM`. Date-only values are
/// returned unchanged.
pub fn trim_to_minute(iso: &str) -> String {
    match iso.split_once('T') {
        Some((date, time)) => {
            let hhmm = time.get(..5).unwrap_or(time);
            format!("{date} {hhmm}")
        }
        None => iso.to_string(),
    }
}

/// One typed property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Status(Option<String>),
    Select(Option<String>),
    MultiSelect(Vec<String>),
    Date(Option<DateRange>),
    /// Rich text, as its individual text runs.
    RichText(Vec<String>),
    /// Title text, as its individual text runs.
    Title(Vec<String>),
    /// A property type the herald does not read, carrying the type name.
    Unsupported(String),
}

impl PropertyValue {
    /// Option names held by a status, select or multi-select property,
    /// trimmed, with empty names dropped. Other types have no labels.
    pub fn labels(&self) -> Vec<String> {
        let names: Vec<&str> = match self {
            PropertyValue::Status(name) | PropertyValue::Select(name) => {
                name.as_deref().into_iter().collect()
            }
            PropertyValue::MultiSelect(names) => names.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        };
        names
            .into_iter()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Concatenated, trimmed text of a rich-text or title property. Empty
    /// for any other type.
    pub fn text(&self) -> String {
        match self {
            PropertyValue::RichText(runs) | PropertyValue::Title(runs) => {
                runs.concat().trim().to_string()
            }
            _ => String::new(),
        }
    }

    pub fn date(&self) -> Option<&DateRange> {
        match self {
            PropertyValue::Date(range) => range.as_ref(),
            _ => None,
        }
    }
}

/// Properties of a row in the order the document store listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyBag(Vec<(String, PropertyValue)>);

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property. A later property with the same name shadows nothing:
    /// lookups by name return the first one.
    pub fn push(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.0.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, PropertyValue)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (S, PropertyValue)>>(iter: I) -> Self {
        PropertyBag(iter.into_iter().map(|(n, v)| (n.into(), v)).collect())
    }
}

/// A record fetched from a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: RowId,
    pub properties: PropertyBag,
    /// Only used for fetch ordering; never compared by the diff.
    pub last_edited_time: Option<DateTime<Utc>>,
}

/// Errors from turning a JSON result into a [`Row`].
#[derive(Debug, Error)]
pub enum RowParseError {
    /// The result has no usable `id`.
    #[error("row has no id")]
    MissingId,

    /// The result is not a JSON object of the expected shape.
    #[error("malformed row: {0}")]
    Json(#[from] serde_json::Error),
}

impl Row {
    pub fn new(id: impl Into<RowId>) -> Self {
        Row {
            id: id.into(),
            properties: PropertyBag::new(),
            last_edited_time: None,
        }
    }

    /// Builder-style helper, mostly for tests and fixtures.
    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.push(name, value);
        self
    }

    /// Parses one element of a query response's `results` array.
    ///
    /// Properties with malformed payloads degrade to
    /// [`PropertyValue::Unsupported`]; only a missing id rejects the row.
    pub fn from_json(value: Value) -> Result<Row, RowParseError> {
        let wire: WireRow = serde_json::from_value(value)?;
        let id = wire
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or(RowParseError::MissingId)?;

        let properties = wire
            .properties
            .into_iter()
            .map(|(name, value)| (name, parse_property(value)))
            .collect();

        let last_edited_time = wire
            .last_edited_time
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Ok(Row {
            id: RowId(id),
            properties,
            last_edited_time,
        })
    }
}

// ─── Wire format ───

#[derive(Deserialize)]
struct WireRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    properties: serde_json::Map<String, Value>,
    #[serde(default)]
    last_edited_time: Option<String>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireProperty {
    Status {
        #[serde(default)]
        status: Option<WireOption>,
    },
    Select {
        #[serde(default)]
        select: Option<WireOption>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Option<Vec<WireOption>>,
    },
    Date {
        #[serde(default)]
        date: Option<WireDate>,
    },
    RichText {
        #[serde(default)]
        rich_text: Option<Vec<WireText>>,
    },
    Title {
        #[serde(default)]
        title: Option<Vec<WireText>>,
    },
}

#[derive(Deserialize)]
struct WireOption {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Deserialize)]
struct WireText {
    #[serde(default)]
    plain_text: Option<String>,
}

#[derive(Deserialize)]
struct WireDate {
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    end: Option<String>,
}

fn parse_property(value: Value) -> PropertyValue {
    let type_name = value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();

    let Ok(wire) = serde_json::from_value::<WireProperty>(value) else {
        return PropertyValue::Unsupported(type_name);
    };

    match wire {
        WireProperty::Status { status } => PropertyValue::Status(status.and_then(|o| o.name)),
        WireProperty::Select { select } => PropertyValue::Select(select.and_then(|o| o.name)),
        WireProperty::MultiSelect { multi_select } => PropertyValue::MultiSelect(
            multi_select
                .unwrap_or_default()
                .into_iter()
                .filter_map(|o| o.name)
                .collect(),
        ),
        WireProperty::Date { date } => PropertyValue::Date(
            date.and_then(|d| d.start.map(|start| DateRange::new(start, d.end))),
        ),
        WireProperty::RichText { rich_text } => PropertyValue::RichText(text_runs(rich_text)),
        WireProperty::Title { title } => PropertyValue::Title(text_runs(title)),
    }
}

fn text_runs(runs: Option<Vec<WireText>>) -> Vec<String> {
    runs.unwrap_or_default()
        .into_iter()
        .filter_map(|t| t.plain_text)
        .collect()
}
