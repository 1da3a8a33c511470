//! Authenticated access to the TappedOut REST backend.
//!
//! [`ApiClient`] is the one place outbound calls go through:
//! - before sending, the bearer token of the current session (if any) is
//!   attached;
//! - every request is bounded by the client timeout;
//! - after receiving, failed statuses are classified, the user is notified
//!   once, a 401 tears the session down, and the error is handed back to
//!   the caller.
//!
//! Nothing is retried, queued or de-duplicated.

pub mod error;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ApiError, ErrorKind};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Request, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::session::{SessionContext, SessionEvent};
use crate::config::ApiConfig;
use crate::notifications::Notifier;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ApiClient {
    http: Client,
    base_url: Url,
    session: Arc<SessionContext>,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        session: Arc<SessionContext>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            ApiError::InvalidRequest(format!("Invalid base URL {}: {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidRequest(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("tappedout/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(ApiError::from_transport)?;

        Ok(Self {
            http,
            base_url,
            session,
            notifier,
        })
    }

    pub fn from_config(
        config: &ApiConfig,
        session: Arc<SessionContext>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ApiError> {
        Self::new(&config.base_url, config.timeout(), session, notifier)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Resolve path segments against the base URL. Each segment is
    /// percent-encoded, so names and e-mails are safe to pass as-is.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::InvalidRequest(format!("{} cannot be used as a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start a request with the current bearer token attached.
    pub fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        let builder = self.http.request(method, self.endpoint(segments)?);
        Ok(match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder.build().map_err(ApiError::from_transport)?;
        self.execute(request).await
    }

    /// Send a built request and run the response through classification.
    pub async fn execute(&self, request: Request) -> Result<Response, ApiError> {
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!(%method, %url, "Sending request");

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                let err = ApiError::from_transport(e);
                tracing::warn!(%method, %url, error = %err, "Request failed");
                return Err(err);
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_response(status, &body);
        tracing::warn!(
            %method,
            %url,
            status = status.as_u16(),
            error = %err,
            "Request rejected"
        );
        self.report(&err);
        Err(err)
    }

    fn report(&self, err: &ApiError) {
        let Some(kind) = err.kind() else {
            return;
        };
        if kind == ErrorKind::SessionExpired {
            self.session.clear(SessionEvent::Expired);
        }
        if let Some(message) = err.user_message() {
            self.notifier.error(message);
        }
    }

    /// Send and decode a JSON body.
    pub async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(builder).await?;
        response.json().await.map_err(ApiError::from_transport)
    }

    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        self.fetch(self.request(Method::GET, segments)?).await
    }

    pub async fn get_with_query<T, Q>(&self, segments: &[&str], query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.fetch(self.request(Method::GET, segments)?.query(query))
            .await
    }

    pub async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(self.request(Method::POST, segments)?.json(body))
            .await
    }

    /// POST without a body, ignoring whatever comes back
    pub async fn post_empty(&self, segments: &[&str]) -> Result<(), ApiError> {
        self.send(self.request(Method::POST, segments)?).await?;
        Ok(())
    }

    pub async fn put<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(self.request(Method::PUT, segments)?.json(body))
            .await
    }

    pub async fn patch<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(self.request(Method::PATCH, segments)?.json(body))
            .await
    }

    pub async fn delete(&self, segments: &[&str]) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, segments)?).await?;
        Ok(())
    }

    /// Success toast after a mutation resolved
    pub fn notify_success(&self, message: &str) {
        self.notifier.success(message);
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("session", &self.session)
            .finish()
    }
}
