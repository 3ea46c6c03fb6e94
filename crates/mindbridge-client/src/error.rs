use mindbridge_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure, timeout or undecodable response body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server responded {0}")]
    Status(reqwest::StatusCode),

    /// The server answered with `success: false` or without a reply.
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
