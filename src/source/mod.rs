//! Document source: where collections are fetched from.
//!
//! The watcher only sees the [`DocumentSource`] trait. [`NotionClient`] is the
//! production implementation; tests script responses through an in-memory
//! fake.

use std::future::Future;

mod error;
mod notion;
mod retry;

pub use error::{SourceError, SourceErrorKind};
pub use notion::{NOTION_API_BASE, NOTION_VERSION, NotionClient, QueryRequest};
pub use retry::{RetryConfig, retry_with_backoff};

use crate::types::{CollectionId, Row};

/// Queries a collection for its most recently edited rows.
///
/// Implementations return at most `page_size` rows, newest-edited first.
/// A failure is an `Err`, never an empty success: the watcher must be able
/// to tell "no rows" from "could not ask".
pub trait DocumentSource {
    fn query(
        &self,
        collection: &CollectionId,
        page_size: u32,
    ) -> impl Future<Output = Result<Vec<Row>, SourceError>> + Send;
}
