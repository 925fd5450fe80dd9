//! Shared fixtures for client tests

use parking_lot::Mutex;
use std::sync::Arc;

use super::PwintyClient;
use crate::config::ClientSettings;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, MockHttpTransport};

/// Requests seen by a mocked transport, in send order
pub type Captured = Arc<Mutex<Vec<HttpRequest>>>;

pub fn settings() -> ClientSettings {
    ClientSettings::default()
        .with_credentials("merchant-1", "key-1")
        .with_base_url("http://pwinty.test")
}

/// Transport that answers every request with `status`/`body` and records it
pub fn respond_with(status: u16, body: &str) -> (Arc<dyn HttpTransport>, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&captured);
    let response = HttpResponse::new(status, body);

    let mut transport = MockHttpTransport::new();
    transport.expect_send().returning(move |request| {
        sink.lock().push(request);
        Ok(response.clone())
    });

    (Arc::new(transport), captured)
}

pub fn client_responding(status: u16, body: &str) -> (PwintyClient, Captured) {
    let (transport, captured) = respond_with(status, body);
    (PwintyClient::with_transport(&settings(), transport), captured)
}
