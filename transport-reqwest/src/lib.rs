//! # Reqwest Transport
//!
//! [`Transport`](transport_traits::Transport) implementation backed by
//! `reqwest`. Provides connection pooling, TLS, and timeout handling for the
//! fetch layer while keeping its single-attempt contract: one `perform` call
//! issues exactly one HTTP request.

pub mod http;

pub use http::ReqwestTransport;
