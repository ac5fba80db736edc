//! `SdClient` - Schedules Direct JSON API client and transport core.

use std::io::Read;
use std::time::Duration;

use chrono::Utc;
use flate2::read::{GzDecoder, ZlibDecoder};
use reqwest::header::{CONTENT_ENCODING, CONTENT_TYPE, HeaderMap};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::instrument;
use url::Url;

use crate::error::{Error, Result, ServiceError, preview};
use crate::session::{Credentials, Session, SessionState};
use crate::types::{BaseResponse, TokenResponse};

/// Default base URL of the JSON service.
const DEFAULT_BASE_URL: &str = "https://json.schedulesdirect.org/";

/// API version appended to the base URL.
pub const DEFAULT_API_VERSION: &str = "20141201";

/// Header carrying the session token.
const TOKEN_HEADER: &str = "token";

/// Per-call caps for endpoints that take a list of program IDs.
///
/// Larger inputs are split into sequential batches of at most this size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchLimits {
    /// Cap for `programs` (default: 5000).
    pub program_info: usize,
    /// Cap for descriptions, language cross references and artwork
    /// (default: 500).
    pub metadata: usize,
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self {
            program_info: 5_000,
            metadata: 500,
        }
    }
}

/// One request to the service, relative to `<base_url><api_version>/`.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(&'static str, String)>,
    body: Option<Vec<u8>>,
    needs_auth: bool,
}

impl ApiRequest {
    /// Creates an authenticated request.
    ///
    /// `path` is relative to the versioned API root, or an absolute
    /// `http(s)://` URL which is used as is.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            needs_auth: true,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Creates a PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Sends the request without a token.
    #[must_use]
    pub fn unauthenticated(mut self) -> Self {
        self.needs_auth = false;
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Adds a request header.
    #[must_use]
    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Sets a raw request body.
    #[must_use]
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| Error::Configuration(format!("failed to encode request body: {e}")))?;
        Ok(self.body(bytes))
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the path or absolute URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns `true` if the request carries the session token.
    #[must_use]
    pub const fn needs_auth(&self) -> bool {
        self.needs_auth
    }

    /// Returns `true` for verbs that send `Content-Type: application/json`.
    fn is_write(&self) -> bool {
        [Method::POST, Method::PUT, Method::DELETE].contains(&self.method)
    }
}

/// Schedules Direct JSON API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct SdClient {
    /// HTTP client.
    http_client: Client,
    /// `<base_url><api_version>/`
    api_root: Url,
    /// Token state, never locked across network I/O.
    session: Mutex<Session>,
    /// Batch caps for bulk-ID endpoints.
    batch_limits: BatchLimits,
}

/// Builder for `SdClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct SdClientBuilder {
    base_url: Option<Url>,
    api_version: Option<String>,
    user_agent: Option<String>,
    credentials: Option<Credentials>,
    batch_limits: Option<BatchLimits>,
    gzip: bool,
    timeout: Option<Duration>,
}

impl SdClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_version: None,
            user_agent: None,
            credentials: None,
            batch_limits: None,
            gzip: true,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Overrides the API version (default: `20141201`).
    #[must_use]
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Sets the User-Agent sent as the client identifier (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the account credentials (required). The password is hashed
    /// immediately.
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: &str) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    /// Overrides the per-call batch caps.
    #[must_use]
    pub const fn batch_limits(mut self, limits: BatchLimits) -> Self {
        self.batch_limits = Some(limits);
        self
    }

    /// Enables or disables transparent gzip decoding in the HTTP layer
    /// (default: enabled).
    #[must_use]
    pub const fn gzip(mut self, enabled: bool) -> Self {
        self.gzip = enabled;
        self
    }

    /// Sets a total timeout per HTTP request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds an unauthenticated client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `credentials` are not set.
    /// - The base URL cannot be combined with the API version.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<SdClient> {
        let user_agent = self
            .user_agent
            .ok_or_else(|| Error::Configuration(String::from("user_agent is required")))?;
        let credentials = self
            .credentials
            .ok_or_else(|| Error::Configuration(String::from("credentials are required")))?;

        let mut base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| Error::Configuration(format!("invalid default base URL: {e}")))?
        };
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let api_version = self
            .api_version
            .unwrap_or_else(|| String::from(DEFAULT_API_VERSION));
        let api_root = base_url
            .join(&format!("{api_version}/"))
            .map_err(|e| Error::Configuration(format!("invalid API version {api_version:?}: {e}")))?;

        let mut http_builder = Client::builder().user_agent(&user_agent).gzip(self.gzip);
        if let Some(timeout) = self.timeout {
            http_builder = http_builder.timeout(timeout);
        }
        let http_client = http_builder
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(SdClient {
            http_client,
            api_root,
            session: Mutex::new(Session::new(credentials)),
            batch_limits: self.batch_limits.unwrap_or_default(),
        })
    }

    /// Builds the client and obtains the first token.
    ///
    /// # Errors
    ///
    /// Returns the [`build`](Self::build) errors, or whatever
    /// [`SdClient::authenticate`] returns.
    pub async fn connect(self) -> Result<SdClient> {
        let client = self.build()?;
        client.authenticate().await?;
        Ok(client)
    }
}

/// Body of a token request.
#[derive(Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

impl SdClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> SdClientBuilder {
        SdClientBuilder::new()
    }

    /// Returns the batch caps in use.
    #[must_use]
    pub const fn batch_limits(&self) -> BatchLimits {
        self.batch_limits
    }

    /// Returns the versioned API root, `<base_url><api_version>/`.
    #[must_use]
    pub const fn api_root(&self) -> &Url {
        &self.api_root
    }

    /// Returns whether the current token is usable right now.
    pub async fn session_state(&self) -> SessionState {
        self.session.lock().await.state(Utc::now())
    }

    /// Returns a fully formed image URL. Absolute URLs are returned as is.
    #[must_use]
    pub fn image_url(&self, uri: &str) -> String {
        if is_absolute(uri) {
            return String::from(uri);
        }
        format!("{}image/{uri}", self.api_root)
    }

    /// Requests a new token and stores it in the session.
    ///
    /// The token request itself is never retried. On failure the session is
    /// left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] if the service rejects the credentials,
    /// or any transport, decode or HTTP error from the token request.
    #[instrument(skip_all)]
    pub async fn authenticate(&self) -> Result<()> {
        let request = {
            let session = self.session.lock().await;
            let credentials = session.credentials();
            tracing::debug!(username = credentials.username(), "Requesting token");
            ApiRequest::post("token")
                .unauthenticated()
                .json(&TokenRequest {
                    username: credentials.username(),
                    password: credentials.password_hash(),
                })?
        };

        let body = self.execute(&request, None).await?;
        let reply: TokenResponse = decode_json(&body, "token response")?;
        if reply.token.is_empty() {
            return Err(Error::decode("token response did not contain a token", &[]));
        }

        let mut session = self.session.lock().await;
        session.store_token(reply.token, reply.base.datetime, Utc::now());
        tracing::info!(expires = ?session.token_expiry(), "Obtained Schedules Direct token");
        Ok(())
    }

    /// Sends a request and returns the raw (decompressed) response body.
    ///
    /// A stale token is renewed before the request. If the service rejects
    /// the token, the client re-authenticates and retries exactly once.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] if the request needs auth and no token was
    ///   ever obtained.
    /// - [`Error::Transport`] if the HTTP exchange fails.
    /// - [`Error::Decode`] if the body cannot be decompressed.
    /// - [`Error::Service`] if the body is an error envelope.
    /// - [`Error::Http`] for any other HTTP error status.
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: &ApiRequest) -> Result<Vec<u8>> {
        let result = self.send_with_reauth(request).await;
        self.session.lock().await.failed_request_count = 0;
        result
    }

    /// Sends `request`, re-authenticating once when the service rejects its
    /// token. A failed renewal of a stale token is returned as is.
    ///
    /// The retry is bounded by `retried`, which belongs to this call. The
    /// session counter only tells `current_token` that a retry is in flight.
    async fn send_with_reauth(&self, request: &ApiRequest) -> Result<Vec<u8>> {
        let mut retried = false;
        loop {
            let token = if request.needs_auth {
                Some(self.current_token().await?)
            } else {
                None
            };
            let rejected = match self.execute(request, token.as_deref()).await {
                Err(Error::Service(err)) if request.needs_auth && err.code.is_auth_rejection() => {
                    err
                }
                other => return other,
            };
            if retried {
                return Err(Error::Service(rejected));
            }
            retried = true;
            self.session.lock().await.failed_request_count = 1;

            tracing::warn!(
                code = rejected.code.code(),
                response = %rejected.response,
                "Token rejected, re-authenticating and retrying once"
            );
            self.authenticate().await?;
        }
    }

    /// Returns the token to send, renewing it first when it is stale.
    async fn current_token(&self) -> Result<String> {
        let (token, renew) = {
            let session = self.session.lock().await;
            let Some(token) = session.token() else {
                return Err(Error::Configuration(String::from("not authenticated")));
            };
            let renew = session.failed_request_count == 0 && session.is_stale(Utc::now());
            (String::from(token), renew)
        };
        if !renew {
            return Ok(token);
        }

        tracing::info!("Token is stale, renewing before request");
        self.authenticate().await?;
        self.session
            .lock()
            .await
            .token()
            .map(String::from)
            .ok_or_else(|| Error::Configuration(String::from("not authenticated")))
    }

    /// Resolves a request path against the versioned API root.
    fn resolve_url(&self, path: &str) -> Result<Url> {
        let result = if is_absolute(path) {
            Url::parse(path)
        } else {
            self.api_root.join(path.trim_start_matches('/'))
        };
        result.map_err(|e| Error::Configuration(format!("invalid request path {path:?}: {e}")))
    }

    /// Performs one HTTP exchange and classifies the reply.
    async fn execute(&self, request: &ApiRequest, token: Option<&str>) -> Result<Vec<u8>> {
        let url = self.resolve_url(&request.path)?;

        let mut builder = self.http_client.request(request.method.clone(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = token {
            builder = builder.header(TOKEN_HEADER, token);
        }
        if request.is_write() {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        let http_request = builder
            .build()
            .map_err(|e| Error::Configuration(format!("invalid request: {e}")))?;

        tracing::debug!(
            method = %http_request.method(),
            url = %http_request.url(),
            "Schedules Direct request"
        );

        let response = self
            .http_client
            .execute(http_request)
            .await
            .map_err(Error::Transport)?;

        let status = response.status();
        tracing::trace!(%status, headers = ?response.headers(), "Response headers");
        let encoding = content_encoding(response.headers());

        let raw = response.bytes().await.map_err(|e| {
            if e.is_decode() {
                Error::Decode {
                    message: format!("failed to read response body: {e}"),
                    fragment: None,
                }
            } else {
                Error::Transport(e)
            }
        })?;
        let body = decompress(encoding.as_deref(), raw.to_vec())?;

        tracing::debug!(%status, body_len = body.len(), "Response body received");
        tracing::trace!(body_preview = %preview(&body), "Response body preview");

        if let Some(err) = error_envelope(&body) {
            tracing::debug!(code = err.code.code(), "Service returned an error envelope");
            return Err(Error::Service(err));
        }
        if status.is_client_error() || status.is_server_error() {
            return Err(Error::Http {
                status: status.as_u16(),
                body: preview(&body),
            });
        }
        Ok(body)
    }

    /// POSTs `ids` in sequential batches of at most `cap` and merges the
    /// decoded replies in input order.
    ///
    /// Any failing batch fails the whole call; no partial result is returned.
    pub(crate) async fn post_id_batches<C>(
        &self,
        template: &ApiRequest,
        ids: &[String],
        cap: usize,
    ) -> Result<C>
    where
        C: DeserializeOwned + Default + IntoIterator + Extend<<C as IntoIterator>::Item>,
    {
        let cap = cap.max(1);
        let batches = ids.len().div_ceil(cap);
        let mut merged = C::default();

        for (index, batch) in ids.chunks(cap).enumerate() {
            tracing::debug!(
                path = %template.path,
                batch = index.saturating_add(1),
                batches,
                size = batch.len(),
                "Sending ID batch"
            );
            let request = template.clone().json(batch)?;
            let body = self.send(&request).await?;
            let decoded: C = decode_json(&body, &template.path)?;
            merged.extend(decoded);
        }
        Ok(merged)
    }
}

/// Returns `true` for `http://` and `https://` URLs.
fn is_absolute(path: &str) -> bool {
    path.starts_with("https://") || path.starts_with("http://")
}

/// Returns the lowercased `Content-Encoding`, if present.
fn content_encoding(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_ascii_lowercase())
}

/// Decompresses a body the HTTP layer left encoded.
fn decompress(encoding: Option<&str>, body: Vec<u8>) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let result = match encoding {
        Some("gzip" | "x-gzip") => GzDecoder::new(body.as_slice()).read_to_end(&mut out),
        Some("deflate") => ZlibDecoder::new(body.as_slice()).read_to_end(&mut out),
        _ => return Ok(body),
    };
    if let Err(e) = result {
        return Err(Error::decode(
            format!(
                "failed to decompress {} response body: {e}",
                encoding.unwrap_or_default()
            ),
            &body,
        ));
    }
    tracing::debug!(
        encoding,
        compressed = body.len(),
        decompressed = out.len(),
        "Decompressed response body"
    );
    Ok(out)
}

/// Parses `body` as an error envelope. Returns `None` for anything that is
/// not a JSON object with a non-zero `code`.
fn error_envelope(body: &[u8]) -> Option<ServiceError> {
    if body.trim_ascii_start().first() != Some(&b'{') {
        return None;
    }
    let base: BaseResponse = serde_json::from_slice(body).ok()?;
    base.is_error().then(|| base.into_service_error())
}

/// Decodes a JSON document.
///
/// # Errors
///
/// Returns [`Error::Decode`] with a preview of `body` if it does not match `T`.
pub fn decode_json<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| Error::decode(format!("failed to decode {what}: {e}"), body))
}

/// Decodes newline-delimited JSON, one document per non-empty line.
///
/// For replies fetched with [`SdClient::send`] from endpoints that stream one
/// object per line.
///
/// # Errors
///
/// Returns [`Error::Decode`] for the first line that does not match `T`.
pub fn decode_lines<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<Vec<T>> {
    body.split(|b| *b == b'\n')
        .map(<[u8]>::trim_ascii)
        .filter(|line| !line.is_empty())
        .map(|line| decode_json(line, what))
        .collect()
}
