//! Request dispatcher
//!
//! Every facade call goes through [`Dispatcher::request`]: credentials and
//! JSON headers are attached, the body is serialized, one request is sent and
//! the response is turned into either decoded data or a [`PwintyError`].
//!
//! A response counts as a success only when the status is 2xx *and* the body
//! holds JSON. Otherwise the error message is the service's `errorMessage`
//! when it sent one, or the raw body text.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::config::ClientSettings;
use crate::error::{PwintyError, PwintyResult};
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

pub const HEADER_MERCHANT_ID: &str = "X-Pwinty-MerchantId";
pub const HEADER_API_KEY: &str = "X-Pwinty-REST-API-Key";

/// Prefix of every API route
pub const API_PREFIX: &str = "/v3.0";

const JSON: &str = "application/json";

// Controls, space, gen-delims and `& + = ;` are encoded. The remaining
// sub-delims `! $ ' ( ) * ,` are valid inside a segment and pass through.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'&')
    .add(b'+')
    .add(b'=')
    .add(b';')
    .add(b':')
    .add(b'@')
    .add(b'[')
    .add(b']')
    .add(b'\\')
    .add(b'^')
    .add(b'|');

/// Percent-encode a value for use as one path segment
pub(crate) fn segment(value: impl fmt::Display) -> String {
    utf8_percent_encode(&value.to_string(), PATH_SEGMENT).to_string()
}

/// Builds, sends and interprets API calls.
///
/// Base URL and credentials are fixed at construction; the dispatcher holds
/// no other state.
pub struct Dispatcher {
    base_url: String,
    merchant_id: Option<String>,
    api_key: Option<String>,
    transport: Arc<dyn HttpTransport>,
}

impl Dispatcher {
    pub fn new(settings: &ClientSettings, transport: Arc<dyn HttpTransport>) -> Self {
        Dispatcher {
            base_url: settings.resolved_base_url(),
            merchant_id: settings.merchant_id.clone(),
            api_key: settings.api_key.clone(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> PwintyResult<T> {
        self.request(HttpMethod::Get, path, None::<&()>).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> PwintyResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(HttpMethod::Post, path, Some(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> PwintyResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(HttpMethod::Put, path, Some(body)).await
    }

    /// Send one request and decode its data as `T`
    #[instrument(level = "debug", skip(self, body))]
    pub async fn request<T, B>(&self, method: HttpMethod, path: &str, body: Option<&B>) -> PwintyResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let data = self.send(method, path, body).await?;
        serde_json::from_value(data).map_err(PwintyError::Decode)
    }

    async fn send<B>(&self, method: HttpMethod, path: &str, body: Option<&B>) -> PwintyResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let merchant_id = self
            .merchant_id
            .as_deref()
            .ok_or(PwintyError::MissingCredentials("merchant id"))?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(PwintyError::MissingCredentials("API key"))?;

        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(PwintyError::Encode)?;

        let request = HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            headers: vec![
                (HEADER_MERCHANT_ID.to_string(), merchant_id.to_string()),
                (HEADER_API_KEY.to_string(), api_key.to_string()),
                ("Content-Type".to_string(), JSON.to_string()),
                ("Accept".to_string(), JSON.to_string()),
            ],
            body,
        };

        debug!(url = %request.url, "Pwinty API request");
        let response = self.transport.send(request).await?;
        debug!(status = response.status, "Pwinty API response");

        interpret(response)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url)
            .field("merchant_id", &self.merchant_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

/// Decode-or-fail step for a completed exchange
fn interpret(response: HttpResponse) -> PwintyResult<Value> {
    // Unparseable bodies and JSON null both mean "no data"
    let data = serde_json::from_str::<Value>(&response.body)
        .ok()
        .filter(|value| !value.is_null());

    match data {
        Some(data) if response.is_success() => Ok(data),
        data => {
            let message = data
                .as_ref()
                .and_then(|value| value.get("errorMessage"))
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .map(str::to_string)
                .unwrap_or(response.body);

            warn!(status = response.status, message = %message, "Pwinty API request failed");

            Err(PwintyError::Api {
                status: response.status,
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{respond_with, settings};
    use crate::transport::{MockHttpTransport, TransportError};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Pong {
        pong: bool,
    }

    fn dispatcher(status: u16, body: &str) -> (Dispatcher, crate::client::testing::Captured) {
        let (transport, captured) = respond_with(status, body);
        (Dispatcher::new(&settings(), transport), captured)
    }

    #[tokio::test]
    async fn test_headers_present_exactly_once() {
        let (dispatcher, captured) = dispatcher(200, r#"{"pong":true}"#);

        let pong: Pong = dispatcher.get("/v3.0/ping").await.unwrap();
        assert!(pong.pong);

        let requests = captured.lock();
        let request = &requests[0];
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "http://pwinty.test/v3.0/ping");
        assert_eq!(request.header_values(HEADER_MERCHANT_ID), vec!["merchant-1"]);
        assert_eq!(request.header_values(HEADER_API_KEY), vec!["key-1"]);
        assert_eq!(request.header_values("content-type"), vec!["application/json"]);
        assert_eq!(request.header_values("accept"), vec!["application/json"]);
        assert_eq!(request.body, None);
    }

    #[tokio::test]
    async fn test_body_serialized_as_json() {
        let (dispatcher, captured) = dispatcher(200, r#"{"pong":true}"#);

        let _: Pong = dispatcher.post("/v3.0/ping", &json!({ "a": 1 })).await.unwrap();

        let requests = captured.lock();
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"a":1}"#));
    }

    #[tokio::test]
    async fn test_error_message_from_service() {
        let (dispatcher, _) = dispatcher(500, r#"{"errorMessage":"boom"}"#);

        let err = dispatcher.get::<Value>("/v3.0/ping").await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_error_without_message_uses_raw_text() {
        let (dispatcher, _) = dispatcher(404, r#"{"detail":"nope"}"#);

        let err = dispatcher.get::<Value>("/v3.0/ping").await.unwrap_err();
        assert_eq!(err.to_string(), r#"{"detail":"nope"}"#);
    }

    #[tokio::test]
    async fn test_success_status_with_invalid_json_fails() {
        let (dispatcher, _) = dispatcher(200, "<html>gateway</html>");

        let err = dispatcher.get::<Value>("/v3.0/ping").await.unwrap_err();
        assert!(err.is_api_error());
        assert_eq!(err.to_string(), "<html>gateway</html>");
    }

    #[tokio::test]
    async fn test_success_status_with_empty_body_fails() {
        let (dispatcher, _) = dispatcher(200, "");

        let err = dispatcher.get::<Value>("/v3.0/ping").await.unwrap_err();
        assert_eq!(err.status(), Some(200));
        assert_eq!(err.to_string(), "");
    }

    #[tokio::test]
    async fn test_null_body_is_no_data() {
        let (dispatcher, _) = dispatcher(200, "null");

        let err = dispatcher.get::<Value>("/v3.0/ping").await.unwrap_err();
        assert_eq!(err.to_string(), "null");
    }

    #[tokio::test]
    async fn test_wrong_shape_is_decode_error() {
        let (dispatcher, _) = dispatcher(200, r#"{"ping":1}"#);

        let err = dispatcher.get::<Pong>("/v3.0/ping").await.unwrap_err();
        assert!(matches!(err, PwintyError::Decode(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Err(TransportError::Other("connection reset".to_string())));
        let dispatcher = Dispatcher::new(&settings(), Arc::new(transport));

        let err = dispatcher.get::<Value>("/v3.0/ping").await.unwrap_err();
        assert!(matches!(err, PwintyError::Transport(TransportError::Other(_))));
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_before_sending() {
        let mut transport = MockHttpTransport::new();
        transport.expect_send().never();
        let dispatcher = Dispatcher::new(&ClientSettings::default(), Arc::new(transport));

        let err = dispatcher.get::<Value>("/v3.0/ping").await.unwrap_err();
        assert!(matches!(err, PwintyError::MissingCredentials("merchant id")));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let (transport, _) = respond_with(200, "{}");
        let dispatcher = Dispatcher::new(&settings(), transport);

        let rendered = format!("{:?}", dispatcher);
        assert!(rendered.contains("merchant-1"));
        assert!(!rendered.contains("key-1"));
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment(1234), "1234");
        assert_eq!(segment("a b/c"), "a%20b%2Fc");
        assert_eq!(segment("a?b#c&d"), "a%3Fb%23c%26d");
        assert_eq!(segment("it's(1)"), "it's(1)");
    }
}
