//! The collections the herald watches.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the independently polled and tracked collections.
///
/// The snake-case name is stable: it appears in the state file, in logs and
/// in the observability API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CollectionKind {
    /// Feature requests, tracked with per-row completion status.
    #[serde(rename = "features")]
    Feature,
    /// Freeform board posts; only arrival matters.
    #[serde(rename = "boards")]
    Board,
    /// Scheduled events with tags and a date range.
    #[serde(rename = "schedules")]
    Schedule,
}

impl CollectionKind {
    /// All collections, in the order a tick visits them.
    pub const ALL: [CollectionKind; 3] = [
        CollectionKind::Feature,
        CollectionKind::Board,
        CollectionKind::Schedule,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CollectionKind::Feature => "features",
            CollectionKind::Board => "boards",
            CollectionKind::Schedule => "schedules",
        }
    }

    /// Whether newly appeared rows get a settle delay before evaluation.
    ///
    /// Board notices carry no row content, so there is nothing to wait for.
    pub fn settles(&self) -> bool {
        !matches!(self, CollectionKind::Board)
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown collection name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown collection: {0}")]
pub struct UnknownCollection(pub String);

impl FromStr for CollectionKind {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CollectionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownCollection(s.to_string()))
    }
}
