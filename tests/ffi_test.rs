use serde_json::{json, Value};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use storebridge::ffi::{
    storebridge_authenticate, storebridge_download, storebridge_fetch_bag,
    storebridge_free_string, storebridge_get_version_metadata, storebridge_list_versions,
    storebridge_lookup, storebridge_purchase, storebridge_rotate_password_token,
    storebridge_search, storebridge_version,
};

fn call(export: extern "C" fn(*const c_char) -> *mut c_char, request: &str) -> Value {
    let request = CString::new(request).unwrap();
    let ptr = export(request.as_ptr());
    assert!(!ptr.is_null());
    let text = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_owned();
    unsafe { storebridge_free_string(ptr) };
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_version() {
    let ptr = storebridge_version();
    let text = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_owned();
    unsafe { storebridge_free_string(ptr) };

    let out: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        out,
        json!({"ok": true, "result": {"module": "storebridge", "version": env!("CARGO_PKG_VERSION")}})
    );
}

#[test]
fn test_empty_requests() {
    let exports: [extern "C" fn(*const c_char) -> *mut c_char; 3] =
        [storebridge_search, storebridge_lookup, storebridge_download];
    for export in exports {
        let out = call(export, "");
        assert_eq!(out, json!({"ok": false, "error": "request body is empty"}));
    }

    let ptr = storebridge_purchase(std::ptr::null());
    let text = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_owned();
    unsafe { storebridge_free_string(ptr) };
    assert!(text.contains("request body is empty"));
}

#[test]
fn test_malformed_request() {
    let out = call(storebridge_lookup, "{\"bundleID\":");
    assert_eq!(out["ok"], false);
    assert!(out["error"]
        .as_str()
        .unwrap()
        .starts_with("failed to decode request payload: "));
}

#[test]
fn test_blank_device_identifier() {
    let out = call(
        storebridge_authenticate,
        r#"{"email":"user@example.com","password":"secret","deviceIdentifier":""}"#,
    );
    assert_eq!(out, json!({"ok": false, "error": "device identifier is empty"}));
}

#[test]
fn test_unlinked_storefront() {
    let out = call(
        storebridge_authenticate,
        r#"{"email":"user@example.com","password":"secret","deviceIdentifier":"AABBCCDDEEFF"}"#,
    );
    assert_eq!(out["ok"], false);
    assert_eq!(out["error"], "storefront client is not linked into this build");
}

#[test]
fn test_every_storefront_export_is_unlinked() {
    let exports: [extern "C" fn(*const c_char) -> *mut c_char; 6] = [
        storebridge_fetch_bag,
        storebridge_authenticate,
        storebridge_rotate_password_token,
        storebridge_purchase,
        storebridge_list_versions,
        storebridge_get_version_metadata,
    ];
    for export in exports {
        let out = call(export, r#"{"deviceIdentifier":"AABBCCDDEEFF"}"#);
        assert_eq!(
            out,
            json!({"ok": false, "error": "storefront client is not linked into this build"})
        );
    }
}

#[test]
fn test_free_null_is_noop() {
    unsafe { storebridge_free_string(std::ptr::null_mut()) };
}
