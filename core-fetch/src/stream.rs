//! Stream-Style Fetch Bridge
//!
//! Exposes one fetch as a cold, cancellable, at-most-one-item stream.
//!
//! ## Subscription lifecycle
//!
//! ```text
//! Idle ──first poll──▶ Running ──outcome, not cancelled──▶ item + completion
//!                         │
//!                         ├── outcome, cancellation observed ──▶ late-result handler
//!                         │
//!                         └── stream dropped ──▶ token cancelled, task tears
//!                             itself down asynchronously
//! ```
//!
//! The unit of work races the transport call against its cancellation token,
//! then reads the token strictly *after* the outcome exists to decide the
//! delivery path. That ordering is the crux: an outcome that resolves
//! concurrently with cancellation is still routed exactly once, downstream
//! or to the late-result handler, never lost, never duplicated.

use std::future::Future;
use std::pin::Pin;
use std::sync::Weak;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::oneshot;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;
use transport_traits::{FetchRequest, TransportError};

use crate::client::{execute, ClientInner};
use crate::error::FetchError;
use crate::outcome::Outcome;

/// Handler receiving an outcome that resolved after its subscription was
/// cancelled. Invoked at most once.
pub type LateResultHandler = Box<dyn FnOnce(Outcome) + Send + 'static>;

/// Cold stream over one fetch attempt.
///
/// Created by [`FetchClient::fetch_stream`](crate::FetchClient::fetch_stream). No transport call happens until
/// the stream is first polled; dropping it cancels the subscription without
/// blocking the caller.
pub struct FetchStream {
    state: State,
}

enum State {
    /// Constructed but not yet subscribed. Cold: nothing runs.
    Idle {
        owner: Weak<ClientInner>,
        request: FetchRequest,
        on_late_result: Option<LateResultHandler>,
    },
    /// Unit of work spawned; the guard cancels its token on drop.
    Running {
        rx: oneshot::Receiver<Outcome>,
        _guard: DropGuard,
    },
    /// Terminal: one item delivered, or the subscription was torn down.
    Done,
}

impl FetchStream {
    pub(crate) fn new(
        owner: Weak<ClientInner>,
        request: FetchRequest,
        on_late_result: Option<LateResultHandler>,
    ) -> Self {
        Self {
            state: State::Idle {
                owner,
                request,
                on_late_result,
            },
        }
    }
}

impl Stream for FetchStream {
    type Item = Outcome;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match &mut this.state {
                State::Idle { .. } => {
                    let State::Idle {
                        owner,
                        request,
                        on_late_result,
                    } = std::mem::replace(&mut this.state, State::Done)
                    else {
                        unreachable!()
                    };

                    let token = CancellationToken::new();
                    let rx = spawn_unit_of_work(owner, request, on_late_result, token.clone());
                    this.state = State::Running {
                        rx,
                        _guard: token.drop_guard(),
                    };
                }
                State::Running { rx, .. } => {
                    return match Pin::new(rx).poll(cx) {
                        Poll::Ready(Ok(outcome)) => {
                            this.state = State::Done;
                            Poll::Ready(Some(outcome))
                        }
                        Poll::Ready(Err(_)) => {
                            // Sender dropped without sending: the unit of
                            // work routed its outcome to the late path.
                            // Complete empty.
                            this.state = State::Done;
                            Poll::Ready(None)
                        }
                        Poll::Pending => Poll::Pending,
                    };
                }
                State::Done => return Poll::Ready(None),
            }
        }
    }
}

/// Spawn the in-flight unit of work for one subscription.
///
/// The task owns its cancellation token and result slot; nothing else
/// references it, so no locking is needed.
fn spawn_unit_of_work(
    owner: Weak<ClientInner>,
    request: FetchRequest,
    on_late_result: Option<LateResultHandler>,
    token: CancellationToken,
) -> oneshot::Receiver<Outcome> {
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        debug!(url = %request.url, "fetch subscription started");
        let outcome = run_unit_of_work(&owner, &request, &token).await;
        deliver(outcome, &token, tx, on_late_result);
    });

    rx
}

/// Produce exactly one outcome for this unit of work.
async fn run_unit_of_work(
    owner: &Weak<ClientInner>,
    request: &FetchRequest,
    token: &CancellationToken,
) -> Outcome {
    // Snapshot the transport handle rather than holding the client alive for
    // the duration of the call: the owner stays weakly referenced throughout.
    let transport = match owner.upgrade() {
        Some(inner) => std::sync::Arc::clone(&inner.transport),
        None => return Err(FetchError::ClientReleased),
    };

    let fetch = execute(transport.as_ref(), request);
    tokio::pin!(fetch);

    // Biased toward the fetch: an outcome that is ready at the same instant
    // the token fires is still captured as the real result.
    let outcome = tokio::select! {
        biased;
        outcome = &mut fetch => outcome,
        () = token.cancelled() => {
            // Dropping `fetch` aborts the underlying transport call.
            Err(FetchError::Transport(TransportError::Aborted))
        }
    };

    // Owner torn down mid-flight overrides whatever the transport returned.
    if owner.upgrade().is_none() {
        return Err(FetchError::ClientReleased);
    }

    outcome
}

/// Route the outcome downstream or to the late-result handler.
///
/// The cancellation flag is read only after the outcome exists. A send that
/// fails because the subscriber vanished between the check and the send is
/// treated the same as an observed cancellation, so the outcome is never
/// silently lost while a handler is registered.
fn deliver(
    outcome: Outcome,
    token: &CancellationToken,
    tx: oneshot::Sender<Outcome>,
    on_late_result: Option<LateResultHandler>,
) {
    if token.is_cancelled() {
        route_late(outcome, on_late_result);
    } else if let Err(outcome) = tx.send(outcome) {
        route_late(outcome, on_late_result);
    }
}

fn route_late(outcome: Outcome, on_late_result: Option<LateResultHandler>) {
    match on_late_result {
        Some(handler) => handler(outcome),
        None => {
            debug!(
                outcome = ?outcome.as_ref().map(|body| body.len()),
                "discarding outcome resolved after cancellation (no late-result handler)"
            );
        }
    }
}
