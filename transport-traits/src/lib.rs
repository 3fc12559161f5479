//! # Transport Capability Traits
//!
//! Defines the seam between the fetch layer and the code that actually
//! performs network I/O. A transport receives an immutable [`FetchRequest`],
//! makes exactly one attempt to satisfy it, and produces either a
//! [`RawReply`] or a [`TransportError`]. Everything above this crate treats
//! the transport as an external collaborator: connection pooling, TLS, and
//! HTTP semantics all live behind the [`Transport`] trait.
//!
//! ## Components
//!
//! - **Request types** (`http`): [`FetchRequest`] builder and [`HttpMethod`]
//! - **Reply types** (`http`): [`RawReply`], [`HttpReply`], [`NonHttpReply`]
//! - **Transport trait** (`http`): the single-call async contract
//! - **Errors** (`error`): [`TransportError`] taxonomy

pub mod error;
pub mod http;

pub use error::{Result, TransportError};
pub use http::{FetchRequest, HttpMethod, HttpReply, NonHttpReply, RawReply, Transport};
