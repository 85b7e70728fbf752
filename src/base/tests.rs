use crate::base::error::BridgeError;
use crate::base::neterror::NetError;

#[test]
fn test_net_error_roundtrip() {
    let original = NetError::ConnectionRefused;
    let code = original.as_i32();
    assert_eq!(code, -102);
    let converted = NetError::from(code);
    assert!(matches!(converted, NetError::ConnectionRefused));

    let custom = NetError::JsonParseError;
    let custom_code = custom.as_i32();
    assert_eq!(custom_code, -10003);
    assert!(matches!(NetError::from(custom_code), NetError::JsonParseError));
}

#[test]
fn test_unknown_error() {
    let err = NetError::from(-9999);
    assert!(matches!(err, NetError::Unknown(-9999)));
}

#[test]
fn test_collision_avoidance() {
    // Chromium reserves -900..=-906 for blob errors
    let blob_range = -906..=-900;
    for err in [
        NetError::HttpBodyError,
        NetError::InvalidUtf8,
        NetError::JsonParseError,
    ] {
        assert!(!blob_range.contains(&err.as_i32()));
    }
}

#[test]
fn test_timeout_classifies_as_timeout() {
    let err = BridgeError::from(NetError::ConnectionTimedOut);
    assert!(matches!(err, BridgeError::Timeout));
    assert!(err.is_transport());

    let err = BridgeError::from(NetError::ConnectionRefused);
    assert!(matches!(err, BridgeError::Network(NetError::ConnectionRefused)));
    assert_eq!(err.to_string(), "request failed: Connection refused");
}

#[test]
fn test_fixed_messages() {
    assert_eq!(
        BridgeError::PasswordTokenExpired.to_string(),
        "password token is expired"
    );
    assert_eq!(BridgeError::LicenseRequired.to_string(), "License required");
    assert_eq!(
        BridgeError::TemporarilyUnavailable.to_string(),
        "item is temporarily unavailable"
    );
    assert_eq!(
        BridgeError::SubscriptionRequired.to_string(),
        "subscription required"
    );
    assert!(BridgeError::AuthCodeRequired
        .to_string()
        .starts_with("Authentication requires verification code\n"));
}

#[test]
fn test_remote_rejected_passes_message_verbatim() {
    let err = BridgeError::RemoteRejected("Your account is disabled.".into());
    assert_eq!(err.to_string(), "Your account is disabled.");
}
