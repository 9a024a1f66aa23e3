//! Single-request JSON fetch.
//!
//! # Overview
//! A `Fetch` describes one HTTP call (method + URL). `Fetch::send` performs
//! it synchronously, buffers the response body and decodes it as JSON,
//! returning a `serde_json::Value` or a `FetchError`.
//!
//! # Design
//! - `Fetch` is immutable once built; it can be shared freely across threads.
//! - Building the request and parsing the body are pure (`build_request`,
//!   `parse_response`); only `send_with` does I/O, through a `Transport`.
//! - `UreqTransport` is the default transport. Its config is created once per
//!   process; each call gets its own session, released before `send` returns.
//! - Requests never carry a body. Headers are always
//!   `Content-Type: application/json` and `Accept: application/json`.

pub mod buffer;
pub mod error;
pub mod fetch;
pub mod http;
pub mod transport;

pub use buffer::ResponseBuffer;
pub use error::FetchError;
pub use fetch::{Fetch, ParsedResponse};
pub use http::{HttpMethod, HttpRequest};
pub use transport::{Session, Transport, TransportConfig, UreqSession, UreqTransport};
