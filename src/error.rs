use thiserror::Error;

use crate::contact::ContactError;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("local storage is not available")]
    StorageUnavailable,
    #[error("storage: {0}")]
    Storage(String),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("request: {0}")]
    Request(#[from] gloo_net::Error),
    #[error(transparent)]
    Contact(#[from] ContactError),
    #[error("feedback: {0}")]
    Feedback(String),
}

pub type Result<T> = std::result::Result<T, SiteError>;
