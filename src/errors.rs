#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PaperlessError {
    #[error("The configuration was incomplete")]
    IncompleteConfig(),

    #[error("No {kind} named {name:?}")]
    UnknownName { kind: &'static str, name: String },

    #[error("Invalid query parameter {param}: {value:?}")]
    InvalidQuery { param: String, value: String },

    #[error("Invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unsupported bulk edit method: {0}")]
    UnsupportedBulkEdit(String),

    #[error("Bulk edit was not accepted: {0}")]
    BulkEditRejected(String),

    #[error("API interaction error: {0}")]
    API(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}
