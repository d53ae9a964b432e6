//! json-server backed record client.
//!
//! Records live in one collection of a json-server style REST service. The
//! service assigns numeric identifiers on create and they are round-tripped as
//! the last URL path segment afterwards.
//!
//! ```text
//! create  POST   <base>        -> 200 | 201, {"id": <number>, ...}
//! read    GET    <base>/<id>   -> 200
//! update  PUT    <base>/<id>   -> 200
//! delete  DELETE <base>/<id>   -> 200
//! ```

use std::time::Duration;

use reqwest::blocking::{Client as HttpClient, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::traits::Client;

const APPLICATION_JSON: &str = "application/json";

/// A [`Client`] that stores records in a json-server collection.
///
/// A 404 on `read` is reported as [`ClientError::NotFound`], matching the
/// filesystem backend. Every other unexpected status, including a 404 on
/// `update` or `delete`, is [`ClientError::UnexpectedStatus`].
#[derive(Clone, Debug)]
pub struct JsonServerClient {
    base_url: Url,
    http: HttpClient,
}

impl JsonServerClient {
    /// Create a client for the collection at `endpoint`, e.g.
    /// `http://localhost:3000/posts`.
    ///
    /// Requests have no timeout; use [`with_timeout`](Self::with_timeout) to
    /// bound them.
    pub fn new(endpoint: &str) -> ClientResult<Self> {
        let http = HttpClient::builder().timeout(None::<Duration>).build()?;
        Self::with_http_client(Url::parse(endpoint)?, http)
    }

    /// Like [`new`](Self::new), with a per-request timeout on the transport.
    pub fn with_timeout(endpoint: &str, timeout: Duration) -> ClientResult<Self> {
        let http = HttpClient::builder().timeout(timeout).build()?;
        Self::with_http_client(Url::parse(endpoint)?, http)
    }

    /// Use a caller-configured HTTP client (proxies, TLS, timeouts).
    pub fn with_http_client(base_url: Url, http: HttpClient) -> ClientResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidEndpoint(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        Ok(Self { base_url, http })
    }

    /// The collection URL records are created under.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The URL of the record at `id`: the base path with `id` appended as a
    /// new segment. Scheme, host, port and query of the base are kept.
    pub fn record_url(&self, id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        url
    }
}

/// Drain the response and check its status against `accepted`.
///
/// The body is read in full before the status check so that the connection
/// is released and the body can be reported as the error message.
fn expect_status(response: Response, accepted: &[StatusCode]) -> ClientResult<Vec<u8>> {
    let status = response.status();
    let body = response.bytes()?.to_vec();
    if !accepted.contains(&status) {
        return Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }
    Ok(body)
}

/// Pull the service-assigned identifier out of a create response.
fn parse_created_id(body: &[u8]) -> ClientResult<String> {
    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| ClientError::Protocol(format!("decoding create response: {e}")))?;
    let id = payload
        .get("id")
        .ok_or_else(|| ClientError::Protocol("create response has no \"id\" field".into()))?;
    let Value::Number(number) = id else {
        return Err(ClientError::Protocol(format!(
            "create response \"id\" is not a number: {id}"
        )));
    };

    if let Some(n) = number.as_u64() {
        return Ok(n.to_string());
    }
    if let Some(n) = number.as_i64() {
        return Ok(n.to_string());
    }
    match number.as_f64() {
        Some(f) if f.is_finite() => Ok((f.trunc() as i64).to_string()),
        _ => Err(ClientError::Protocol(format!(
            "create response \"id\" is not representable: {number}"
        ))),
    }
}

impl Client for JsonServerClient {
    fn create(&self, payload: &[u8]) -> ClientResult<String> {
        let response = self
            .http
            .post(self.base_url.clone())
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .body(payload.to_vec())
            .send()?;
        let body = expect_status(response, &[StatusCode::OK, StatusCode::CREATED])?;
        let id = parse_created_id(&body)?;
        debug!(%id, bytes = payload.len(), url = %self.base_url, "created record");
        Ok(id)
    }

    fn read(&self, id: &str) -> ClientResult<Vec<u8>> {
        let url = self.record_url(id);
        let response = self.http.get(url.clone()).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::not_found_with_status(
                id,
                StatusCode::NOT_FOUND.as_u16(),
            ));
        }
        let body = expect_status(response, &[StatusCode::OK])?;
        debug!(%id, bytes = body.len(), %url, "read record");
        Ok(body)
    }

    fn update(&self, id: &str, payload: &[u8]) -> ClientResult<()> {
        let url = self.record_url(id);
        let response = self
            .http
            .put(url.clone())
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .body(payload.to_vec())
            .send()?;
        expect_status(response, &[StatusCode::OK])?;
        debug!(%id, bytes = payload.len(), %url, "updated record");
        Ok(())
    }

    fn delete(&self, id: &str) -> ClientResult<()> {
        let url = self.record_url(id);
        let response = self.http.delete(url.clone()).send()?;
        expect_status(response, &[StatusCode::OK])?;
        debug!(%id, %url, "deleted record");
        Ok(())
    }
}
