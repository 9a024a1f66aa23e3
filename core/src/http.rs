//! HTTP request types shared by the executor and the transports.
//!
//! # Design
//! `HttpRequest` describes what goes on the wire as plain data. The executor
//! builds it without touching the network; a `Transport` session turns it
//! into an actual exchange. All fields use owned types so values can be
//! handed across the FFI boundary without lifetime concerns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Header sent with every request to announce the payload type.
pub const CONTENT_TYPE_JSON: (&str, &str) = ("Content-Type", "application/json");

/// Header sent with every request to ask for a JSON response.
pub const ACCEPT_JSON: (&str, &str) = ("Accept", "application/json");

/// HTTP method for a request.
///
/// Serializes to the lowercase identifier form (`"get"`); `Display` and
/// `as_str` give the uppercase wire name (`"GET"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 4] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
    ];

    /// Uppercase name as it appears on the request line.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Lowercase identifier used in configuration and serialized forms.
    pub fn nick(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts either the wire name or the identifier form, nothing else.
impl FromStr for HttpMethod {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s || m.nick() == s)
            .ok_or_else(|| FetchError::ParseFailure(format!("unknown HTTP method `{s}`")))
    }
}

/// An HTTP request described as plain data.
///
/// Built by `Fetch::build_request`. Requests never carry a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
}
