//! Client for the document list surface of a Paperless-ngx server:
//! filtered listing, bulk edits and selection metadata, plus an in-memory
//! mock backend (feature `mock`) serving the same endpoints from fixtures.

pub mod bulk_edit;
pub mod classifier;
pub mod client;
pub mod correspondent;
pub mod document;
pub mod document_type;
pub mod errors;
pub mod filter;
#[cfg(feature = "mock")]
pub mod mock;
pub mod page;
pub mod selection;
pub mod tag;

pub use bulk_edit::{BulkEdit, BulkEditMethod};
pub use client::{PaperlessNgxClient, PaperlessNgxClientBuilder};
pub use document::Document;
pub use errors::PaperlessError;
pub use filter::{CorrespondentFilter, DocumentFilter};
pub use selection::{SelectionData, SelectionState};
