use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("in-flight request aborted")]
    Aborted,

    #[error("transport operation failed: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TransportError>;
