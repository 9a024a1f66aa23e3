//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with a C-compatible representation:
//! `*mut c_char` instead of `String` or `serde_json::Value`, and enums with
//! explicit discriminants. Conversion functions live here to keep `lib.rs`
//! focused on the `extern "C"` surface.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use fetch_core::{FetchError, HttpMethod, ParsedResponse};

/// Opaque handle to a `Fetch`. C callers receive a pointer to this and pass
/// it back into every `fetch_*` function.
pub struct FfiFetch {
    pub(crate) inner: fetch_core::Fetch,
}

// ---------------------------------------------------------------------------
// Methods
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

impl From<FfiHttpMethod> for HttpMethod {
    fn from(m: FfiHttpMethod) -> Self {
        match m {
            FfiHttpMethod::Get => HttpMethod::Get,
            FfiHttpMethod::Post => HttpMethod::Post,
            FfiHttpMethod::Put => HttpMethod::Put,
            FfiHttpMethod::Delete => HttpMethod::Delete,
        }
    }
}

impl FfiHttpMethod {
    /// Validate a discriminant received from C. Values outside 0..=3 are not
    /// methods.
    pub(crate) fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(FfiHttpMethod::Get),
            1 => Some(FfiHttpMethod::Post),
            2 => Some(FfiHttpMethod::Put),
            3 => Some(FfiHttpMethod::Delete),
            _ => None,
        }
    }

    /// Uppercase wire name as a static C string.
    pub(crate) fn name(self) -> &'static CStr {
        match self {
            FfiHttpMethod::Get => c"GET",
            FfiHttpMethod::Post => c"POST",
            FfiHttpMethod::Put => c"PUT",
            FfiHttpMethod::Delete => c"DELETE",
        }
    }

    /// Lowercase identifier as a static C string.
    pub(crate) fn nick(self) -> &'static CStr {
        match self {
            FfiHttpMethod::Get => c"get",
            FfiHttpMethod::Post => c"post",
            FfiHttpMethod::Put => c"put",
            FfiHttpMethod::Delete => c"delete",
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiFetchResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    SessionInit = 1,
    Transport = 2,
    Parse = 3,
    BodyNotSupported = 4,
    NullArg = 5,
    Panic = 6,
}

/// Result envelope for `fetch_send`.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `json` holds
/// the response re-encoded as compact JSON text.
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `json` is null.
#[repr(C)]
pub struct FfiFetchResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub json: *mut c_char,
}

impl FfiFetchResult {
    /// Build a success result carrying the decoded response.
    pub(crate) fn ok(value: ParsedResponse) -> *mut Self {
        // serde_json escapes control characters, so the text never holds NUL.
        let json = match CString::new(value.to_string()) {
            Ok(s) => s.into_raw(),
            Err(_) => return Self::error(FfiErrorCode::Parse, "response contains NUL".to_string()),
        };
        Box::into_raw(Box::new(FfiFetchResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            json,
        }))
    }

    /// Build an error result from a `FetchError`.
    pub(crate) fn from_error(err: FetchError) -> *mut Self {
        let code = match &err {
            FetchError::SessionInitFailure(_) => FfiErrorCode::SessionInit,
            FetchError::TransportFailure(_) => FfiErrorCode::Transport,
            FetchError::ParseFailure(_) => FfiErrorCode::Parse,
        };
        Self::error(code, err.to_string())
    }

    /// Build an error result for a caller-supplied request body.
    pub(crate) fn body_not_supported() -> *mut Self {
        Self::error(
            FfiErrorCode::BodyNotSupported,
            "request bodies are not supported".to_string(),
        )
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, msg.to_string())
    }

    fn error(error_code: FfiErrorCode, msg: String) -> *mut Self {
        let result = Box::new(FfiFetchResult {
            error_code,
            error_message: CString::new(msg).unwrap_or_default().into_raw(),
            json: std::ptr::null_mut(),
        });
        Box::into_raw(result)
    }
}
