//! # Fetch Bridge
//!
//! Normalizes a raw transport call into a typed [`Outcome`] and exposes it
//! through two concurrency idioms over one shared routine:
//!
//! - an await-style call ([`FetchClient::fetch`]) that suspends the caller
//!   until the outcome is available, and
//! - a cold, cancellable stream ([`FetchClient::fetch_stream`]) that emits at
//!   most one outcome per subscription.
//!
//! The stream side carries the interesting guarantee: a subscriber that
//! cancels mid-flight still gets a deterministic, race-free hand-off of the
//! in-flight outcome to an optional late-result handler, while a normal
//! subscriber receives exactly one terminal item.
//!
//! ## Components
//!
//! - **Classification** (`outcome`): turns a raw transport reply into an [`Outcome`]
//! - **Client** (`client`): the await-style call and the stream factory
//! - **Stream bridge** (`stream`): the in-flight unit of work and its cancellation plumbing
//! - **Errors** (`error`): [`FetchError`] taxonomy
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use core_fetch::FetchClient;
//! use transport_traits::{FetchRequest, HttpMethod};
//! use transport_reqwest::ReqwestTransport;
//!
//! let client = FetchClient::new(Arc::new(ReqwestTransport::new()));
//! let request = FetchRequest::new(HttpMethod::Get, "https://api.example.com/data");
//!
//! // Await-style: one call, one outcome.
//! let outcome = client.fetch(&request).await;
//!
//! // Stream-style: cold until polled, cancellable by dropping the stream.
//! use futures::StreamExt;
//! let mut stream = client.fetch_stream(request, Some(Box::new(|outcome| {
//!     tracing::info!(?outcome, "resolved after cancellation");
//! })));
//! let outcome = stream.next().await;
//! ```

pub mod client;
pub mod error;
pub mod outcome;
pub mod stream;

pub use client::FetchClient;
pub use error::{FetchError, Result};
pub use outcome::{classify, Outcome};
pub use stream::{FetchStream, LateResultHandler};
