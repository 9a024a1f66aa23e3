//! Transport seam between the executor and the network.
//!
//! # Design
//! A `Transport` hands out one `Session` per call; the session performs a
//! single exchange and is released when dropped, so every exit path of the
//! executor closes it. Body bytes are pushed into a `Write` sink as they
//! arrive rather than returned, which keeps buffering in the executor's
//! hands.
//!
//! `UreqTransport` is the production implementation. Its `ureq` config is
//! built once per transport (and once per process for the shared default);
//! each session gets its own `ureq::Agent`. Nothing is torn down globally.

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use log::{trace, warn};
use ureq::config::Config;
use ureq::{Agent, RequestBuilder};

use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest};

/// Environment variable holding an optional whole-call timeout in seconds.
pub const TIMEOUT_ENV: &str = "FETCH_TIMEOUT_SECS";

/// Opens one session per call.
pub trait Transport {
    type Session: Session;

    fn open(&self) -> Result<Self::Session, FetchError>;
}

/// A single-use exchange. Dropping the session releases it.
pub trait Session {
    /// Send `request`, stream the response body into `sink` and return the
    /// HTTP status. Blocks until the exchange completes or fails.
    fn perform(&mut self, request: &HttpRequest, sink: &mut dyn Write) -> Result<u16, FetchError>;
}

/// Settings applied to every session of a `UreqTransport`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportConfig {
    /// Upper bound for the whole exchange. `None` blocks until the network
    /// gives up.
    pub timeout: Option<Duration>,
}

impl TransportConfig {
    /// Read the config from `FETCH_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_timeout_var(std::env::var(TIMEOUT_ENV).ok().as_deref())
    }

    fn from_timeout_var(value: Option<&str>) -> Self {
        let timeout = match value.map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(e) => {
                    warn!("ignoring {TIMEOUT_ENV}={raw:?}: {e}");
                    None
                }
            },
        };
        Self { timeout }
    }
}

/// Blocking transport backed by `ureq`.
#[derive(Clone)]
pub struct UreqTransport {
    config: Config,
}

impl UreqTransport {
    pub fn new(settings: &TransportConfig) -> Self {
        // Status codes are data here, not errors: the body is parsed whatever
        // the server answered. Redirects are not followed, so a 3xx is parsed
        // as its own response.
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .max_redirects_will_error(false)
            .timeout_global(settings.timeout)
            .build();
        Self { config }
    }

    /// Process-wide transport, configured from the environment on first use.
    pub fn shared() -> &'static UreqTransport {
        static SHARED: OnceLock<UreqTransport> = OnceLock::new();
        SHARED.get_or_init(|| UreqTransport::new(&TransportConfig::from_env()))
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(&TransportConfig::default())
    }
}

impl Transport for UreqTransport {
    type Session = UreqSession;

    fn open(&self) -> Result<UreqSession, FetchError> {
        trace!("opening ureq session");
        Ok(UreqSession {
            agent: Agent::new_with_config(self.config.clone()),
        })
    }
}

/// One `ureq::Agent`, used for a single exchange.
pub struct UreqSession {
    agent: Agent,
}

impl Session for UreqSession {
    fn perform(&mut self, request: &HttpRequest, sink: &mut dyn Write) -> Result<u16, FetchError> {
        let url = request.url.as_str();
        let headers = request.headers.as_slice();

        let result = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(url), headers).call(),
            HttpMethod::Post => with_headers(self.agent.post(url), headers).send_empty(),
            HttpMethod::Put => with_headers(self.agent.put(url), headers).send_empty(),
            HttpMethod::Delete => with_headers(self.agent.delete(url), headers).call(),
        };
        let mut response = result.map_err(|e| FetchError::TransportFailure(e.to_string()))?;

        let status = response.status().as_u16();
        let mut reader = response.body_mut().as_reader();
        io::copy(&mut reader, sink).map_err(|e| FetchError::TransportFailure(e.to_string()))?;
        Ok(status)
    }
}

impl Drop for UreqSession {
    fn drop(&mut self) {
        trace!("ureq session closed");
    }
}

fn with_headers<B>(builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    headers
        .iter()
        .fold(builder, |b, (name, value)| b.header(name.as_str(), value.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_timeout() {
        assert_eq!(TransportConfig::default().timeout, None);
        assert_eq!(TransportConfig::from_timeout_var(None).timeout, None);
    }

    #[test]
    fn timeout_var_is_seconds() {
        let config = TransportConfig::from_timeout_var(Some(" 30 "));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn bad_timeout_var_is_ignored() {
        assert_eq!(TransportConfig::from_timeout_var(Some("soon")).timeout, None);
        assert_eq!(TransportConfig::from_timeout_var(Some("")).timeout, None);
    }

    #[test]
    fn shared_transport_is_built_once() {
        let a = UreqTransport::shared() as *const UreqTransport;
        let b = UreqTransport::shared() as *const UreqTransport;
        assert_eq!(a, b);
    }

    #[test]
    fn open_hands_out_independent_sessions() {
        let transport = UreqTransport::default();
        let first = transport.open();
        let second = transport.open();
        assert!(first.is_ok());
        assert!(second.is_ok());
    }
}
