//! Configured HTTP transport shared by all services.
//!
//! # Design
//! `ApiTransport` is the single point of configuration (base URL, version
//! prefix, JSON headers, timeout) and the single point of error
//! classification. Every call runs the same pipeline: log the outbound
//! request, perform it, then either decode the body or classify the failure
//! into an [`ApiError`]. Nothing downstream ever sees a raw `reqwest` error.
//!
//! Classification order matters:
//! 1. a response arrived with a non-2xx status — `Server`, status preserved,
//!    message taken from the body when the server sent one;
//! 2. a 2xx response whose body does not decode — still `Server`: the status
//!    was received, the contract was not honored;
//! 3. the request could not be built — `Request`, status 0;
//! 4. anything else that kept a response from arriving (timeout, refused
//!    connection, DNS) — `Network`, status 0, fixed unreachable message.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ApiError;

/// Address of the local backend; fixed configuration, not runtime input.
pub const API_BASE_URL: &str = "http://localhost:9000";

/// API version segment appended to the base URL.
pub const API_VERSION: &str = "v1";

// 10 second timeout
const REQUEST_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Asynchronous HTTP client with fixed base URL, JSON headers and timeout.
///
/// A single failed attempt always surfaces as exactly one [`ApiError`];
/// the transport never retries.
#[derive(Debug, Clone)]
pub struct ApiTransport {
    http: Client,
    base_url: String,
}

impl ApiTransport {
    /// Build a transport rooted at `base_url` (the `/api/v1` prefix is
    /// appended here). Fails with a `Request` error if the underlying
    /// client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ApiError::request(err.to_string()))?;

        Ok(Self {
            http,
            base_url: format!("{}/api/{}", base_url.trim_end_matches('/'), API_VERSION),
        })
    }

    /// Transport against the default local backend.
    pub fn local() -> Result<Self, ApiError> {
        Self::new(API_BASE_URL)
    }

    /// `GET` an endpoint and decode the response body as `T`.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let request = self.http.get(self.url(endpoint));
        self.dispatch(Method::GET, endpoint, request).await
    }

    /// `GET` with URL-encoded query parameters.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let request = self.http.get(self.url(endpoint)).query(query);
        self.dispatch(Method::GET, endpoint, request).await
    }

    /// `POST` an optional JSON body and decode the response as `T`.
    pub async fn post<T, B>(&self, endpoint: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = self.http.post(self.url(endpoint));
        if let Some(body) = body {
            request = request.json(body);
        }
        self.dispatch(Method::POST, endpoint, request).await
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// The log → perform → classify pipeline shared by every call.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        debug!(%method, endpoint, "outbound request");

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                return Err(Self::log_failure(
                    &method,
                    endpoint,
                    classify_send_failure(err),
                ))
            }
        };

        let status = response.status();
        debug!(%method, endpoint, status = status.as_u16(), "inbound response");

        // Reading the body can still fail if the connection dies mid-stream;
        // without a complete response that is a network failure.
        let body = match response.text().await {
            Ok(body) => body,
            Err(_) => return Err(Self::log_failure(&method, endpoint, ApiError::network())),
        };

        if !status.is_success() {
            let err = ApiError::server(status.as_u16(), server_message(status, body));
            return Err(Self::log_failure(&method, endpoint, err));
        }

        serde_json::from_str(&body).map_err(|err| {
            let err = ApiError::server(status.as_u16(), format!("malformed response body: {err}"));
            Self::log_failure(&method, endpoint, err)
        })
    }

    /// Logging observes the classified error and returns it unchanged.
    fn log_failure(method: &Method, endpoint: &str, err: ApiError) -> ApiError {
        warn!(
            %method,
            endpoint,
            status = err.status,
            kind = ?err.kind,
            "request failed: {}",
            err.message
        );
        err
    }
}

/// A send-phase failure produced no response: builder errors could not even
/// construct the request, everything else means the backend was unreachable.
fn classify_send_failure(err: reqwest::Error) -> ApiError {
    if err.is_builder() {
        ApiError::request(err.to_string())
    } else {
        ApiError::network()
    }
}

/// Message for a non-2xx response: the body when the server sent one, the
/// status line otherwise.
fn server_message(status: StatusCode, body: String) -> String {
    if body.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        body
    }
}
