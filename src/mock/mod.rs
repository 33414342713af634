//! In-memory stand-in for a Paperless-ngx server.
//!
//! Serves the document list, bulk edit, selection data and classifier
//! endpoints from a fixed set of [`Fixtures`]. Bulk edits are not persisted:
//! only the most recent one is kept and replayed over a fresh copy of the
//! fixtures on every read, so a second edit replaces the first.

mod error;
mod handlers;

pub use error::MockError;

use crate::{
    bulk_edit::BulkEdit,
    client::{PaperlessNgxClient, PaperlessNgxClientBuilder},
    correspondent::Correspondent,
    document::Document,
    document_type::DocumentType,
    errors::PaperlessError,
    tag::Tag,
};
use axum::{
    routing::{get, post},
    Router,
};
use log::{error, info};
use serde::Deserialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::{net::TcpListener, task::JoinHandle};

const SAMPLE_FIXTURES: &str = include_str!("../../fixtures/paperless.json");

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Fixtures {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub correspondents: Vec<Correspondent>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub document_types: Vec<DocumentType>,
}

impl Fixtures {
    /// The bundled sample set: four documents, three correspondents, four
    /// tags and two document types.
    pub fn sample() -> Result<Fixtures, PaperlessError> {
        Fixtures::from_json(SAMPLE_FIXTURES)
    }

    pub fn from_json(json: &str) -> Result<Fixtures, PaperlessError> {
        Ok(serde_json::from_str(json)?)
    }
}

pub(crate) struct MockState {
    fixtures: Fixtures,
    base_url: String,
    last_bulk_edit: Mutex<Option<BulkEdit>>,
}

impl MockState {
    fn new(fixtures: Fixtures, base_url: String) -> MockState {
        MockState {
            fixtures,
            base_url,
            last_bulk_edit: Mutex::new(None),
        }
    }

    fn edit_slot(&self) -> MutexGuard<'_, Option<BulkEdit>> {
        self.last_bulk_edit
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, edit: BulkEdit) {
        *self.edit_slot() = Some(edit);
    }

    fn last_bulk_edit(&self) -> Option<BulkEdit> {
        self.edit_slot().clone()
    }

    /// Fixture documents with the last bulk edit applied.
    fn documents(&self) -> Vec<Document> {
        let mut docs = self.fixtures.documents.clone();
        if let Some(edit) = self.last_bulk_edit() {
            edit.apply(&mut docs);
        }
        docs
    }
}

pub(crate) fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/documents/", get(handlers::list_documents))
        .route("/api/documents/bulk_edit/", post(handlers::bulk_edit))
        .route(
            "/api/documents/selection_data/",
            post(handlers::selection_data),
        )
        .route("/api/documents/:id/", get(handlers::get_document))
        .route("/api/correspondents/", get(handlers::list_correspondents))
        .route("/api/tags/", get(handlers::list_tags))
        .route("/api/document_types/", get(handlers::list_document_types))
        .with_state(state)
}

/// A running mock server bound to an ephemeral localhost port. Dropping it
/// stops the server.
pub struct MockBackend {
    url: String,
    state: Arc<MockState>,
    server: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start(fixtures: Fixtures) -> Result<MockBackend, PaperlessError> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}", listener.local_addr()?);

        let state = Arc::new(MockState::new(fixtures, url.clone()));
        let app = router(state.clone());
        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!("Mock backend stopped: {e}");
            }
        });

        info!("Mock Paperless backend listening on {url}");
        Ok(MockBackend { url, state, server })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// A client pointed at this backend. The token is sent but not checked.
    pub fn client(&self) -> Result<PaperlessNgxClient, PaperlessError> {
        PaperlessNgxClientBuilder::default()
            .set_url(&self.url)
            .set_auth_token("mock")
            .build()
    }

    pub fn last_bulk_edit(&self) -> Option<BulkEdit> {
        self.state.last_bulk_edit()
    }

    /// Forgets the recorded bulk edit so reads see the plain fixtures again.
    pub fn reset(&self) {
        *self.state.edit_slot() = None;
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}
