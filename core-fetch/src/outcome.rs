//! Outcome Classification
//!
//! Turns a raw transport reply into the typed result both fetch idioms
//! share. Classification is a pure function: deterministic, side-effect
//! free, and total: every transport reply and every transport error maps
//! to exactly one [`Outcome`].

use bytes::Bytes;
use std::ops::Range;
use transport_traits::RawReply;

use crate::error::FetchError;

/// The classified result of one fetch attempt.
///
/// `Ok` carries the response body for a success-range status; every other
/// condition is a [`FetchError`].
pub type Outcome = crate::error::Result<Bytes>;

/// HTTP status range treated as success.
const SUCCESS_RANGE: Range<u16> = 200..300;

/// Classify a raw transport reply into an [`Outcome`].
///
/// - Transport failure → [`FetchError::Transport`]
/// - Reply not interpretable as HTTP → [`FetchError::NonHttpResponse`]
/// - Status in `200..300` → `Ok(body)`
/// - Any other status → [`FetchError::RequestFailed`] with the body
///   preserved byte-for-byte for caller inspection
pub fn classify(reply: transport_traits::Result<RawReply>) -> Outcome {
    match reply {
        Err(err) => Err(FetchError::Transport(err)),
        Ok(RawReply::NonHttp(raw)) => Err(FetchError::NonHttpResponse(raw)),
        Ok(RawReply::Http(reply)) => {
            if SUCCESS_RANGE.contains(&reply.status) {
                Ok(reply.body)
            } else {
                Err(FetchError::RequestFailed {
                    status: reply.status,
                    body: reply.body,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use transport_traits::{HttpReply, NonHttpReply, TransportError};

    fn http_reply(status: u16, body: &'static [u8]) -> transport_traits::Result<RawReply> {
        Ok(RawReply::Http(HttpReply {
            status,
            headers: HashMap::new(),
            body: Bytes::from_static(body),
        }))
    }

    #[test]
    fn test_every_success_range_status_classifies_ok() {
        for status in 200..300 {
            let outcome = classify(http_reply(status, b"payload"));
            match outcome {
                Ok(body) => assert_eq!(&body[..], b"payload"),
                Err(e) => panic!("status {} should classify as success, got {}", status, e),
            }
        }
    }

    #[test]
    fn test_non_success_statuses_classify_as_request_failed() {
        for status in [100, 199, 300, 301, 400, 404, 429, 500, 503, 599] {
            let outcome = classify(http_reply(status, b"body bytes"));
            match outcome {
                Err(FetchError::RequestFailed { status: s, body }) => {
                    assert_eq!(s, status);
                    assert_eq!(&body[..], b"body bytes");
                }
                other => panic!("status {} should fail classification, got {:?}", status, other),
            }
        }
    }

    #[test]
    fn test_transport_error_classifies_without_panicking() {
        let outcome = classify(Err(TransportError::Timeout));
        assert!(matches!(
            outcome,
            Err(FetchError::Transport(TransportError::Timeout))
        ));

        let outcome = classify(Err(TransportError::Connect("refused".to_string())));
        assert!(matches!(
            outcome,
            Err(FetchError::Transport(TransportError::Connect(_)))
        ));
    }

    #[test]
    fn test_non_http_reply_preserves_descriptor() {
        let outcome = classify(Ok(RawReply::NonHttp(NonHttpReply {
            url: "ftp://example.com/file".to_string(),
            content_type: None,
            body: Bytes::from_static(b"raw"),
        })));

        match outcome {
            Err(FetchError::NonHttpResponse(raw)) => {
                assert_eq!(raw.url, "ftp://example.com/file");
                assert_eq!(&raw.body[..], b"raw");
            }
            other => panic!("expected NonHttpResponse, got {:?}", other),
        }
    }
}
