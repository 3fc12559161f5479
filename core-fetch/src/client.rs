//! Fetch Client
//!
//! One underlying operation, perform a transport call and classify it,
//! exposed through two thin adapters: the await-style [`FetchClient::fetch`]
//! and the stream factory [`FetchClient::fetch_stream`]. Both idioms share
//! [`execute`], so their observable semantics cannot drift apart.

use std::sync::Arc;
use tracing::instrument;
use transport_traits::{FetchRequest, Transport};

use crate::outcome::{classify, Outcome};
use crate::stream::{FetchStream, LateResultHandler};

/// The shared fetch routine: one transport call, classified.
pub(crate) async fn execute(transport: &dyn Transport, request: &FetchRequest) -> Outcome {
    classify(transport.perform(request).await)
}

/// Shared state behind the client handles. In-flight units of work hold
/// this only weakly, so tearing down the last handle never keeps a
/// transport call artificially alive.
pub(crate) struct ClientInner {
    pub(crate) transport: Arc<dyn Transport>,
}

/// Client wrapping a transport behind the two fetch idioms.
///
/// Cheap to clone; all clones share one underlying state. A stream whose
/// client handles have all been dropped resolves to
/// [`FetchError::ClientReleased`](crate::FetchError::ClientReleased) instead
/// of touching the transport.
#[derive(Clone)]
pub struct FetchClient {
    inner: Arc<ClientInner>,
}

impl FetchClient {
    /// Create a new client over the given transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(ClientInner { transport }),
        }
    }

    /// Perform exactly one fetch and suspend until its outcome is available.
    ///
    /// Invokes the transport once, with no retries and no caching, and returns the
    /// classified [`Outcome`]. Every failure comes back as data; this method
    /// never panics on transport misbehavior.
    ///
    /// # Cancellation
    ///
    /// Rust-native: dropping the returned future drops the in-flight
    /// transport call, which aborts the underlying I/O. A caller that needs
    /// to observe outcomes past its own cancellation should use
    /// [`fetch_stream`](Self::fetch_stream) with a late-result handler.
    #[instrument(skip(self, request), fields(url = %request.url))]
    pub async fn fetch(&self, request: &FetchRequest) -> Outcome {
        execute(self.inner.transport.as_ref(), request).await
    }

    /// Create a cold stream that performs the fetch on first poll.
    ///
    /// Each call produces an independent subscription: subscribing always
    /// triggers exactly one transport call, with no deduplication across
    /// streams. The stream yields at most one [`Outcome`] and then
    /// terminates.
    ///
    /// Dropping the stream cancels the subscription. If the in-flight unit
    /// of work observes the cancellation once its outcome is ready, the
    /// outcome is routed to `on_late_result` instead of downstream; with no
    /// handler registered it is discarded. The cancellation check happens
    /// strictly after the outcome is computed, so a result racing the
    /// cancellation is captured exactly once: forwarded or handed to the
    /// handler, never lost, never delivered twice.
    pub fn fetch_stream(
        &self,
        request: FetchRequest,
        on_late_result: Option<LateResultHandler>,
    ) -> FetchStream {
        FetchStream::new(Arc::downgrade(&self.inner), request, on_late_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use mockall::mock;
    use std::collections::HashMap;
    use transport_traits::{HttpMethod, HttpReply, RawReply, TransportError};

    use crate::error::FetchError;

    mock! {
        Transport {}

        #[async_trait]
        impl Transport for Transport {
            async fn perform(&self, request: &FetchRequest) -> transport_traits::Result<RawReply>;
        }
    }

    fn request() -> FetchRequest {
        FetchRequest::new(HttpMethod::Get, "https://example.com/data")
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mut mock_transport = MockTransport::new();
        mock_transport.expect_perform().times(1).returning(|_| {
            Ok(RawReply::Http(HttpReply {
                status: 200,
                headers: HashMap::new(),
                body: Bytes::from_static(b"hello"),
            }))
        });

        let client = FetchClient::new(Arc::new(mock_transport));
        let outcome = client.fetch(&request()).await;

        assert_eq!(&outcome.unwrap()[..], b"hello");
    }

    #[tokio::test]
    async fn test_fetch_not_found_preserves_body() {
        let mut mock_transport = MockTransport::new();
        mock_transport.expect_perform().times(1).returning(|_| {
            Ok(RawReply::Http(HttpReply {
                status: 404,
                headers: HashMap::new(),
                body: Bytes::from_static(b"not found"),
            }))
        });

        let client = FetchClient::new(Arc::new(mock_transport));
        let outcome = client.fetch(&request()).await;

        match outcome {
            Err(FetchError::RequestFailed { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(&body[..], b"not found");
            }
            other => panic!("expected RequestFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_transport_error() {
        let mut mock_transport = MockTransport::new();
        mock_transport
            .expect_perform()
            .times(1)
            .returning(|_| Err(TransportError::Timeout));

        let client = FetchClient::new(Arc::new(mock_transport));
        let outcome = client.fetch(&request()).await;

        assert!(matches!(
            outcome,
            Err(FetchError::Transport(TransportError::Timeout))
        ));
    }

    #[tokio::test]
    async fn test_sequential_fetches_hit_transport_independently() {
        let mut mock_transport = MockTransport::new();
        mock_transport.expect_perform().times(2).returning(|_| {
            Ok(RawReply::Http(HttpReply {
                status: 200,
                headers: HashMap::new(),
                body: Bytes::from_static(b"fresh"),
            }))
        });

        let client = FetchClient::new(Arc::new(mock_transport));
        let req = request();

        // Same descriptor twice: no caching between calls.
        assert!(client.fetch(&req).await.is_ok());
        assert!(client.fetch(&req).await.is_ok());
    }
}
