//! C-ABI wrapper around `fetch-core`.
//!
//! # Overview
//! Exposes single-request JSON fetches through `extern "C"` functions:
//! `fetch_new` builds an immutable request handle, `fetch_send` performs it
//! and returns the decoded JSON as text inside an `FfiFetchResult`.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `fetch_send` takes a `body` pointer for call-site compatibility but
//!   rejects anything non-null before touching the network.
//! - Methods arrive from C as `u32` and are validated before use; unknown
//!   values yield null or false, never an out-of-range enum.
//! - Method names are exposed as static strings, so converting a method to
//!   text never allocates.
//! - The C caller owns all returned heap pointers and must call the matching
//!   `fetch_free*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use fetch_core::HttpMethod;
use log::warn;

use types::*;

// ---------------------------------------------------------------------------
// Handle lifecycle
// ---------------------------------------------------------------------------

/// Create a request handle for `method` (an `FfiHttpMethod` value) and
/// `url`. The url is copied.
///
/// Returns null if `method` is not a known `FfiHttpMethod`, if `url` is null
/// or not valid UTF-8, or if an internal panic occurs. The caller must free
/// the returned pointer with `fetch_free`.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_new(method: u32, url: *const c_char) -> *mut FfiFetch {
    catch_unwind(|| {
        let Some(method) = FfiHttpMethod::from_raw(method) else {
            return std::ptr::null_mut();
        };
        if url.is_null() {
            return std::ptr::null_mut();
        }
        let url = match unsafe { CStr::from_ptr(url) }.to_str() {
            Ok(u) => u,
            Err(_) => return std::ptr::null_mut(),
        };
        let fetch = fetch_core::Fetch::new(method.into(), url);
        Box::into_raw(Box::new(FfiFetch { inner: fetch }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a handle created by `fetch_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_free(fetch: *mut FfiFetch) {
    if !fetch.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(fetch) });
        });
    }
}

/// Write the method the handle was created with into `out`.
///
/// Returns false, leaving `out` untouched, if either pointer is null.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_method(fetch: *const FfiFetch, out: *mut FfiHttpMethod) -> bool {
    catch_unwind(|| {
        if fetch.is_null() || out.is_null() {
            return false;
        }
        let fetch = unsafe { &*fetch };
        unsafe { *out = fetch.inner.method().into() };
        true
    })
    .unwrap_or(false)
}

/// A copy of the handle's url, or null if `fetch` is null.
///
/// The caller must free the returned string with `fetch_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_url(fetch: *const FfiFetch) -> *mut c_char {
    catch_unwind(|| {
        if fetch.is_null() {
            return std::ptr::null_mut();
        }
        let fetch = unsafe { &*fetch };
        CString::new(fetch.inner.url())
            .map(CString::into_raw)
            .unwrap_or(std::ptr::null_mut())
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Perform the request and decode the response as JSON. Blocks the calling
/// thread until the exchange completes.
///
/// `body` must be null: request bodies are not supported, and a non-null
/// `body` yields `BodyNotSupported` without any network activity.
/// The caller must free the returned pointer with `fetch_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_send(fetch: *const FfiFetch, body: *const c_char) -> *mut FfiFetchResult {
    catch_unwind(|| {
        if fetch.is_null() {
            return FfiFetchResult::null_arg("fetch");
        }
        let fetch = unsafe { &*fetch };
        if !body.is_null() {
            warn!(
                "{} {}: refusing to send a request body",
                fetch.inner.method(),
                fetch.inner.url()
            );
            return FfiFetchResult::body_not_supported();
        }
        match fetch.inner.send() {
            Ok(value) => FfiFetchResult::ok(value),
            Err(e) => FfiFetchResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiFetchResult::panic("panic in fetch_send"))
}

// ---------------------------------------------------------------------------
// Method names
// ---------------------------------------------------------------------------

/// Uppercase wire name of `method` ("GET", ...), or null if `method` is not
/// a known `FfiHttpMethod`. Static; do not free.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_http_method_name(method: u32) -> *const c_char {
    catch_unwind(|| {
        FfiHttpMethod::from_raw(method)
            .map(|m| m.name().as_ptr())
            .unwrap_or(std::ptr::null())
    })
    .unwrap_or(std::ptr::null())
}

/// Lowercase identifier of `method` ("get", ...), or null if `method` is not
/// a known `FfiHttpMethod`. Static; do not free.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_http_method_nick(method: u32) -> *const c_char {
    catch_unwind(|| {
        FfiHttpMethod::from_raw(method)
            .map(|m| m.nick().as_ptr())
            .unwrap_or(std::ptr::null())
    })
    .unwrap_or(std::ptr::null())
}

/// Parse a method from its wire name or identifier into `out`.
///
/// Returns false, leaving `out` untouched, if either pointer is null or the
/// name is not one of the four known methods.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_http_method_parse(name: *const c_char, out: *mut FfiHttpMethod) -> bool {
    catch_unwind(|| {
        if name.is_null() || out.is_null() {
            return false;
        }
        let parsed = unsafe { CStr::from_ptr(name) }
            .to_str()
            .ok()
            .and_then(|s| s.parse::<HttpMethod>().ok());
        match parsed {
            Some(method) => {
                unsafe { *out = method.into() };
                true
            }
            None => false,
        }
    })
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiFetchResult` returned by `fetch_send`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_free_result(result: *mut FfiFetchResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.json.is_null() {
            drop(unsafe { CString::from_raw(result.json) });
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
