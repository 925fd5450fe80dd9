//! HTTP transport layer
//!
//! ```text
//!   Dispatcher ──► HttpTransport (trait) ──► ReqwestTransport
//!                                      └──► any custom implementation
//! ```

pub mod http_client;
pub mod traits;

pub use http_client::ReqwestTransport;
pub use traits::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

#[cfg(test)]
pub use traits::MockHttpTransport;
