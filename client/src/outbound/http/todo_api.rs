//! Reqwest-backed implementation of the [`TodoApi`] port.
//!
//! The adapter owns transport details only: endpoint construction, the
//! anti-forgery header, the shared cookie store standing in for the browser
//! session, and mapping classified responses into domain types. Calls carry
//! no timeout; failure is transport rejection or classification.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Url};
use tracing::{debug, warn};

use super::classify::{Classified, classify};
use crate::domain::ports::TodoApi;
use crate::domain::{ApiError, CreateTodoError, Todo, TodoList, UserDetails, Username};

const XSRF_HEADER: &str = "X-Xsrf-Token";
const XSRF_COOKIE: &str = "XSRF-TOKEN";
const APPLICATION_JSON: &str = "application/json";

/// Anti-forgery policy, exactly one active per deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XsrfPolicy {
    /// Fixed header value matching gateway-enforced policy configuration.
    Constant(String),
    /// Header value read from the `XSRF-TOKEN` cookie in the client's own
    /// store; no cookie means no header.
    FromCookie,
}

/// HTTP adapter for the identity-aware todo API.
pub struct HttpTodoApi {
    client: Client,
    jar: Arc<Jar>,
    base: Url,
    xsrf: XsrfPolicy,
}

impl HttpTodoApi {
    /// Build an adapter over a base URL with the given anti-forgery policy.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, xsrf: XsrfPolicy) -> Result<Self, reqwest::Error> {
        let jar = Arc::new(Jar::default());
        let client = Client::builder().cookie_provider(Arc::clone(&jar)).build()?;
        Ok(Self {
            client,
            jar,
            base: ensure_trailing_slash(base),
            xsrf,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|error| ApiError::transport(format!("invalid endpoint {path}: {error}")))
    }

    fn xsrf_token(&self) -> Option<String> {
        match &self.xsrf {
            XsrfPolicy::Constant(value) => Some(value.clone()),
            XsrfPolicy::FromCookie => cookie_value(self.jar.as_ref(), &self.base, XSRF_COOKIE),
        }
    }

    fn with_common_headers(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(ACCEPT, APPLICATION_JSON);
        match self.xsrf_token() {
            Some(token) => request.header(XSRF_HEADER, token),
            None => request,
        }
    }

    async fn get_classified(&self, path: &str) -> Result<Classified, ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .with_common_headers(self.client.get(url.clone()))
            .send()
            .await
            .map_err(|error| {
                warn!(%url, %error, "request failed below HTTP");
                ApiError::transport(error.to_string())
            })?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "classifying response");
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|error| ApiError::transport(error.to_string()))?;
        classify(url.as_str(), status, &headers, &body)
    }
}

/// Normalise a base URL so relative joins extend the path instead of
/// replacing its last segment.
pub(crate) fn ensure_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

fn cookie_value(store: &dyn CookieStore, url: &Url, name: &str) -> Option<String> {
    let header = store.cookies(url)?;
    let raw = header.to_str().ok()?;
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(cookie_name, _)| *cookie_name == name)
        .map(|(_, value)| value.to_owned())
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    async fn fetch_user(&self) -> Result<UserDetails, ApiError> {
        match self.get_classified("user").await? {
            Classified::Empty => Ok(UserDetails::empty()),
            Classified::Json(value) => serde_json::from_value(value)
                .map_err(|error| ApiError::decode(format!("invalid user payload: {error}"))),
        }
    }

    async fn fetch_own_todos(&self) -> Result<Vec<Todo>, ApiError> {
        match self.get_classified("todos").await? {
            Classified::Empty => Ok(Vec::new()),
            Classified::Json(value) => serde_json::from_value::<TodoList>(value)
                .map(|list| list.todos)
                .map_err(|error| ApiError::decode(format!("invalid todos payload: {error}"))),
        }
    }

    async fn fetch_todos_for(&self, username: &Username) -> Result<Vec<Todo>, ApiError> {
        let path = format!("todos/{username}");
        match self.get_classified(&path).await? {
            Classified::Empty => Ok(Vec::new()),
            Classified::Json(value) => serde_json::from_value::<TodoList>(value)
                .map(|list| list.todos)
                .map_err(|error| ApiError::decode(format!("invalid todos payload: {error}"))),
        }
    }

    async fn create_todo(&self, todo: &Todo) -> Result<(), CreateTodoError> {
        let url = self
            .endpoint("todos")
            .map_err(|error| CreateTodoError::transport(error.to_string()))?;
        let response = self
            .with_common_headers(self.client.post(url.clone()))
            .json(todo)
            .send()
            .await
            .map_err(|error| {
                warn!(%url, %error, "request failed below HTTP");
                CreateTodoError::transport(error.to_string())
            })?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "create todo response");
        if !status.is_success() {
            return Err(CreateTodoError::rejected(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }
        Ok(())
    }

    async fn probe_non_interactive_login(&self) -> Result<(), ApiError> {
        let url = self.endpoint("login/non-interactive")?;
        // The probe is fire-and-observe: the redirect chain it triggers is
        // not readable by this client, so only a network-level rejection
        // counts as failure. The response is dropped unread.
        debug!(%url, "probing non-interactive login");
        self.client
            .get(url)
            .send()
            .await
            .map(|_| ())
            .map_err(|error| ApiError::transport(error.to_string()))
    }

    async fn end_app_session(&self) -> Result<(), ApiError> {
        let url = self.endpoint("pa/oidc/logout")?;
        debug!(%url, "ending app session");
        self.client
            .get(url)
            .send()
            .await
            .map(|_| ())
            .map_err(|error| ApiError::transport(error.to_string()))
    }
}
