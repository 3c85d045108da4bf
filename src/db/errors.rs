use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(String),
    #[error("store responded with {status}: {message}")]
    Status { status: u16, message: String },
    #[error("decode error: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("registrant repository unavailable: {0}")]
    Unavailable(#[from] StoreError),
}
