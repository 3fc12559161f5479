use bytes::Bytes;
use thiserror::Error;
use transport_traits::{NonHttpReply, TransportError};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("response was not an HTTP response from {}", .0.url)]
    NonHttpResponse(NonHttpReply),

    #[error("request failed with status {status}")]
    RequestFailed { status: u16, body: Bytes },

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("fetch client released before the request resolved")]
    ClientReleased,
}

pub type Result<T> = std::result::Result<T, FetchError>;
