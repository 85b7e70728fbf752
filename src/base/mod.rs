//! Base types and error handling.
//!
//! - [`NetError`](neterror::NetError): transport error codes matching Chromium's `net_error_list.h`
//! - [`BridgeError`](error::BridgeError): the error taxonomy every bridge operation returns

pub mod context;
pub mod error;
pub mod neterror;

#[cfg(test)]
mod tests;
