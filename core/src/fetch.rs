//! Request descriptor and single-shot executor.
//!
//! # Design
//! `Fetch` holds only a method and a URL and never changes after
//! construction. Execution is split the same way as the I/O boundary:
//! `build_request` produces an `HttpRequest`, a `Transport` session performs
//! it into a `ResponseBuffer`, and `parse_response` turns the buffered bytes
//! into a `serde_json::Value`. `send_with` drives the three steps; the
//! session and buffer are locals, so both are dropped before it returns on
//! every path.

use log::{debug, trace, warn};
use serde_json::Value;

use crate::buffer::ResponseBuffer;
use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest, ACCEPT_JSON, CONTENT_TYPE_JSON};
use crate::transport::{Session, Transport, UreqTransport};

/// The decoded JSON document handed back by a successful send.
pub type ParsedResponse = Value;

/// One pending HTTP call: a method and a target URL, both fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetch {
    method: HttpMethod,
    url: String,
}

impl Fetch {
    pub fn new(method: HttpMethod, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
        }
    }

    /// Like `new`, with the method given by name (`"GET"` or `"get"`).
    pub fn parse(method: &str, url: &str) -> Result<Self, FetchError> {
        Ok(Self::new(method.parse()?, url))
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The request as it will be put on the wire.
    pub fn build_request(&self) -> HttpRequest {
        HttpRequest {
            method: self.method,
            url: self.url.clone(),
            headers: [CONTENT_TYPE_JSON, ACCEPT_JSON]
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        }
    }

    /// Decode a complete response body. Any JSON value is accepted as root.
    pub fn parse_response(&self, body: &[u8]) -> Result<ParsedResponse, FetchError> {
        serde_json::from_slice(body).map_err(|e| {
            warn!("{} {}: invalid JSON response: {e}", self.method, self.url);
            FetchError::ParseFailure(e.to_string())
        })
    }

    /// Perform the request with the process-wide `ureq` transport.
    pub fn send(&self) -> Result<ParsedResponse, FetchError> {
        self.send_with(UreqTransport::shared())
    }

    /// Perform the request through `transport`, blocking until it completes.
    pub fn send_with<T: Transport>(&self, transport: &T) -> Result<ParsedResponse, FetchError> {
        let mut session = transport.open().inspect_err(|e| {
            warn!("{} {}: {e}", self.method, self.url);
        })?;
        trace!("{} {}: session open", self.method, self.url);

        let request = self.build_request();
        let mut buffer = ResponseBuffer::new();
        let status = session.perform(&request, &mut buffer).inspect_err(|e| {
            warn!("{} {}: {e}", self.method, self.url);
        })?;
        drop(session);

        if (200..300).contains(&status) {
            debug!("{} {}: {status}, {} bytes", self.method, self.url, buffer.len());
        } else {
            warn!("{} {}: {status}, {} bytes", self.method, self.url, buffer.len());
        }

        self.parse_response(buffer.as_bytes())
    }
}
