use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server rejected the payload as malformed")]
    RejectedPayload,

    #[error("unexpected status from server: {0}")]
    UnexpectedStatus(u16),

    #[error("feed file has no usable entries: {0}")]
    EmptyFeed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;
