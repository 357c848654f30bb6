//! The authenticated HTTP client.
//!
//! One instance serves the whole application: it resolves URLs against its
//! base, injects the session token, issues a single round trip per call (no
//! retries), classifies the transport- and application-level result into
//! [`ApiError`] variants, shows user feedback through the injected
//! [`UiNotifier`], and tears the session down when authentication is lost.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Response};
use serde::Serialize;
use tracing::{debug, warn};

use super::envelope::Envelope;
use super::request::RequestDescriptor;
use crate::config::ClientConfig;
use crate::errors::{ApiError, Result};
use crate::notify::{NoopNotifier, UiNotifier};
use crate::session::SessionManager;

/// User-visible notice texts. The status table is fixed: classification never
/// depends on response bodies for transport-level failures.
mod messages {
    use std::borrow::Cow;

    pub const NETWORK_FAILED: &str = "network request failed";
    pub const SESSION_EXPIRED: &str = "session expired, please sign in again";
    pub const FORBIDDEN: &str = "access denied";
    pub const REQUEST_FAILED: &str = "request failed";

    pub fn for_status(code: u16) -> Cow<'static, str> {
        match code {
            400 => "bad request parameters".into(),
            401 => "unauthorized, please sign in again".into(),
            403 => "access denied".into(),
            404 => "requested resource does not exist".into(),
            500 => "server internal error".into(),
            502 => "bad gateway".into(),
            503 => "service unavailable".into(),
            504 => "gateway timeout".into(),
            other => format!("request failed ({other})").into(),
        }
    }
}

/// Authenticated HTTP client over the platform's REST services.
pub struct HttpClient {
    client: ReqwestClient,
    base_url: String,
    session: Arc<SessionManager>,
    notifier: Arc<dyn UiNotifier>,
    logout_delay: Duration,
}

impl HttpClient {
    /// Start building a client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Build a client from startup configuration and a session context.
    pub fn from_config(config: &ClientConfig, session: Arc<SessionManager>) -> Result<Self> {
        Self::builder()
            .base_url(&config.api_base_url)
            .timeout(config.timeout)
            .logout_delay(config.logout_delay)
            .session(session)
            .build()
    }

    /// The base URL relative paths resolve against (exposed for callers that
    /// build absolute URLs themselves, e.g. file uploads).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The injected session context.
    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Issue one request as described and classify the outcome.
    ///
    /// The loading indicator, when requested, is shown exactly once and
    /// hidden exactly once regardless of which branch the call takes. Every
    /// error path has already shown its notice (unless suppressed) by the
    /// time this returns.
    pub async fn request(&self, descriptor: RequestDescriptor) -> Result<Envelope> {
        let url = self.resolve_url(&descriptor.path);
        debug!(method = %descriptor.method, %url, "dispatching request");

        // Invalid header overrides are a programmer error, not a network
        // condition; fail before any UI side effect.
        let headers = self.build_headers(&descriptor.headers)?;

        if descriptor.show_loading {
            self.notifier.show_loading(&descriptor.loading_text);
        }

        let outcome = self.dispatch(&descriptor, &url, headers).await;

        if descriptor.show_loading {
            self.notifier.hide_loading();
        }

        match outcome {
            Ok(response) => self.classify(response, descriptor.show_error).await,
            Err(err) => {
                warn!(method = %descriptor.method, %url, error = %err, "transport failure");
                if descriptor.show_error {
                    self.notifier.toast(messages::NETWORK_FAILED);
                }
                Err(err)
            }
        }
    }

    /// GET convenience wrapper.
    pub async fn get(&self, path: &str) -> Result<Envelope> {
        self.request(RequestDescriptor::get(path)).await
    }

    /// POST convenience wrapper with a JSON body.
    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Envelope> {
        self.request(RequestDescriptor::post(path).json(body)?).await
    }

    /// PUT convenience wrapper with a JSON body.
    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<Envelope> {
        self.request(RequestDescriptor::put(path).json(body)?).await
    }

    /// DELETE convenience wrapper.
    pub async fn delete(&self, path: &str) -> Result<Envelope> {
        self.request(RequestDescriptor::delete(path)).await
    }

    fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn build_headers(&self, overrides: &[(String, String)]) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (raw_name, raw_value) in overrides {
            let name = HeaderName::from_bytes(raw_name.as_bytes())
                .map_err(|e| ApiError::Config(format!("invalid header name '{raw_name}': {e}")))?;
            let value = HeaderValue::from_str(raw_value)
                .map_err(|e| ApiError::Config(format!("invalid value for '{raw_name}': {e}")))?;
            headers.insert(name, value);
        }

        // The token overlays any caller-supplied Authorization header.
        if let Some(token) = self.session.current_token() {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ApiError::Config(format!("token is not a valid header value: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    async fn dispatch(
        &self,
        descriptor: &RequestDescriptor,
        url: &str,
        headers: HeaderMap,
    ) -> Result<Response> {
        let mut builder = self.client.request(descriptor.method.clone(), url).headers(headers);
        if !descriptor.query.is_empty() {
            builder = builder.query(&descriptor.query);
        }
        if let Some(body) = &descriptor.body {
            builder = builder.json(body);
        }

        builder.send().await.map_err(|e| ApiError::Network(e.to_string()))
    }

    async fn classify(&self, response: Response, show_error: bool) -> Result<Envelope> {
        let status = response.status();

        if !status.is_success() {
            let code = status.as_u16();
            debug!(code, "transport status error");
            if show_error {
                self.notifier.toast(&messages::for_status(code));
            }
            if code == 401 {
                self.auth_lost();
            }
            return Err(ApiError::Status { code });
        }

        let envelope: Envelope =
            response.json().await.map_err(|e| ApiError::Decode(e.to_string()))?;

        if envelope.is_success() {
            return Ok(envelope);
        }

        debug!(code = envelope.code, msg = %envelope.msg, "application status error");
        match envelope.code {
            401 => {
                if show_error {
                    self.notifier.toast(messages::SESSION_EXPIRED);
                }
                self.auth_lost();
                Err(ApiError::SessionExpired)
            }
            403 => {
                if show_error {
                    self.notifier.toast(messages::FORBIDDEN);
                }
                Err(ApiError::Forbidden)
            }
            code => {
                let message: Cow<'_, str> = if envelope.msg.is_empty() {
                    messages::REQUEST_FAILED.into()
                } else {
                    envelope.msg.as_str().into()
                };
                if show_error {
                    self.notifier.toast(&message);
                }
                Err(ApiError::Business { code, message: message.into_owned() })
            }
        }
    }

    /// Unified teardown for both 401 channels (transport and application).
    ///
    /// Clearing is deferred so the notice can render before any navigation
    /// reset the observers trigger. Best-effort and last-write-wins: a login
    /// completing inside the delay window can still be clobbered by this
    /// task.
    fn auth_lost(&self) {
        let session = Arc::clone(&self.session);
        let delay = self.logout_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(error) = session.clear_session() {
                warn!(%error, "failed to clear session after authentication loss");
            }
        });
    }
}

/// Builder for [`HttpClient`].
pub struct HttpClientBuilder {
    base_url: Option<String>,
    session: Option<Arc<SessionManager>>,
    notifier: Arc<dyn UiNotifier>,
    timeout: Duration,
    logout_delay: Duration,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            session: None,
            notifier: Arc::new(NoopNotifier),
            timeout: Duration::from_secs(30),
            logout_delay: Duration::from_millis(1500),
        }
    }
}

impl HttpClientBuilder {
    /// Base URL prepended to relative paths.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// The session context consulted on every request.
    pub fn session(mut self, session: Arc<SessionManager>) -> Self {
        self.session = Some(session);
        self
    }

    /// Where toasts and the loading indicator go. Silent by default.
    pub fn notifier(mut self, notifier: Arc<dyn UiNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Transport timeout applied to every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Delay between an authentication loss and the session teardown.
    pub fn logout_delay(mut self, delay: Duration) -> Self {
        self.logout_delay = delay;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the base URL or session is missing, or
    /// the underlying transport client cannot be constructed.
    pub fn build(self) -> Result<HttpClient> {
        let base_url =
            self.base_url.ok_or_else(|| ApiError::Config("base URL not set".to_string()))?;
        let session =
            self.session.ok_or_else(|| ApiError::Config("session context not set".to_string()))?;

        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .no_proxy()
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build transport client: {e}")))?;

        Ok(HttpClient {
            client,
            base_url,
            session,
            notifier: self.notifier,
            logout_delay: self.logout_delay,
        })
    }
}
