//! C entry points.
//!
//! Each export takes a NUL-terminated JSON request and returns a newly
//! allocated NUL-terminated JSON envelope. The host must hand every returned
//! pointer back to [`storebridge_free_string`] exactly once.
//!
//! Search, lookup, download and version run in full. The storefront exports
//! (bag, authenticate, rotate password token, purchase, list versions and
//! version metadata) go through the [`Unlinked`] connector, so they always fail
//! with `storefront client is not linked into this build`. Embedders with a
//! real storefront client call [`Bridge::new`] with their own connector.

use crate::bridge::{Bridge, Operation};
use crate::config::BridgeConfig;
use crate::envelope::{self, FALLBACK_ERROR_ENVELOPE};
use crate::storefront::Unlinked;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "STOREBRIDGE_LOG";

static INIT_LOGGING: Once = Once::new();

fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
        // A host that already installed a subscriber keeps it.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Borrowed view of the request. `None` for a null pointer.
unsafe fn read_request(request: *const c_char) -> Option<String> {
    if request.is_null() {
        return None;
    }
    Some(CStr::from_ptr(request).to_string_lossy().into_owned())
}

fn into_raw(response: String) -> *mut c_char {
    match CString::new(response) {
        Ok(text) => text.into_raw(),
        Err(_) => fallback(),
    }
}

fn fallback() -> *mut c_char {
    // The literal has no interior NUL.
    CString::new(FALLBACK_ERROR_ENVELOPE)
        .map(CString::into_raw)
        .unwrap_or(std::ptr::null_mut())
}

fn run(operation: Operation, request: *const c_char) -> *mut c_char {
    init_logging();
    let payload = unsafe { read_request(request) };

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => return envelope::failure(&format!("failed to start runtime: {}", e)),
        };
        let bridge = Bridge::new(Unlinked, BridgeConfig::default());
        runtime.block_on(bridge.handle(operation, payload.as_deref()))
    }));

    match outcome {
        Ok(response) => into_raw(response),
        Err(_) => {
            tracing::error!(operation = operation.name(), "bridge call panicked");
            into_raw(envelope::failure(&"internal error"))
        }
    }
}

#[no_mangle]
pub extern "C" fn storebridge_search(request: *const c_char) -> *mut c_char {
    run(Operation::Search, request)
}

#[no_mangle]
pub extern "C" fn storebridge_lookup(request: *const c_char) -> *mut c_char {
    run(Operation::Lookup, request)
}

#[no_mangle]
pub extern "C" fn storebridge_fetch_bag(request: *const c_char) -> *mut c_char {
    run(Operation::FetchBag, request)
}

#[no_mangle]
pub extern "C" fn storebridge_authenticate(request: *const c_char) -> *mut c_char {
    run(Operation::Authenticate, request)
}

#[no_mangle]
pub extern "C" fn storebridge_rotate_password_token(request: *const c_char) -> *mut c_char {
    run(Operation::RotatePasswordToken, request)
}

#[no_mangle]
pub extern "C" fn storebridge_purchase(request: *const c_char) -> *mut c_char {
    run(Operation::Purchase, request)
}

#[no_mangle]
pub extern "C" fn storebridge_list_versions(request: *const c_char) -> *mut c_char {
    run(Operation::ListVersions, request)
}

#[no_mangle]
pub extern "C" fn storebridge_get_version_metadata(request: *const c_char) -> *mut c_char {
    run(Operation::GetVersionMetadata, request)
}

#[no_mangle]
pub extern "C" fn storebridge_download(request: *const c_char) -> *mut c_char {
    run(Operation::Download, request)
}

#[no_mangle]
pub extern "C" fn storebridge_version() -> *mut c_char {
    run(Operation::Version, std::ptr::null())
}

/// Releases a string returned by any `storebridge_*` export.
///
/// # Safety
///
/// `value` must be null or a pointer previously returned by this library that
/// has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn storebridge_free_string(value: *mut c_char) {
    if !value.is_null() {
        drop(CString::from_raw(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn take(ptr: *mut c_char) -> String {
        assert!(!ptr.is_null());
        let text = unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned();
        unsafe { storebridge_free_string(ptr) };
        text
    }

    #[test]
    fn test_null_request() {
        let out: serde_json::Value =
            serde_json::from_str(&take(storebridge_lookup(std::ptr::null()))).unwrap();
        assert_eq!(out["ok"], false);
        assert_eq!(out["error"], "request body is empty");
    }

    #[test]
    fn test_version_export() {
        let out: serde_json::Value = serde_json::from_str(&take(storebridge_version())).unwrap();
        assert_eq!(out["ok"], true);
        assert_eq!(out["result"]["module"], "storebridge");
    }

    #[test]
    fn test_free_null() {
        unsafe { storebridge_free_string(std::ptr::null_mut()) };
    }
}
