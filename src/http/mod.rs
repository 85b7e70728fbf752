//! HTTP/1.1 exchange layer.
//!
//! - [`streamfactory`]: opens a connection and performs the HTTP/1.1 handshake
//! - [`transaction`]: one request/response with cookie handling and a deadline
//! - [`response`]: the buffered response handed back to callers

pub mod requestbody;
pub mod response;
pub mod streamfactory;
pub mod transaction;

pub use requestbody::RequestBody;
pub use response::HttpResponse;
