//! HTTP plumbing and the auth endpoints.

use std::time::Duration;

use courtside_core::SessionStore;
use courtside_core::model::CurrentUser;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{
    ApiError,
    types::{AuthSession, Credentials, ProfileEnvelope, Registration},
};

/// REST client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Service root, e.g. `https://api.courtside.example/api`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Configuration with the default 10 s request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), timeout: Duration::from_secs(10) }
    }
}

/// Typed client for the Courtside REST service.
///
/// Holds the session handle so every authenticated request reads the
/// current token and a rejected token clears the session for the whole
/// process.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    session: SessionStore,
}

impl ApiClient {
    /// Build a client for the given service and session.
    pub fn new(config: ApiConfig, session: SessionStore) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Http(err.to_string()))?;
        Ok(Self { http, config, session })
    }

    /// The session this client authenticates with.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // --- auth ------------------------------------------------------------

    /// Create an account. Installs the returned token on success.
    pub async fn register(&self, form: &Registration) -> Result<AuthSession, ApiError> {
        let auth: AuthSession =
            self.send_json(self.http.post(self.endpoint("/auth/register")).json(form)).await?;
        self.session.set_token(&auth.token);
        Ok(auth)
    }

    /// Log in with email and password. Installs the returned token on
    /// success.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession, ApiError> {
        let auth: AuthSession =
            self.send_json(self.http.post(self.endpoint("/auth/login")).json(credentials)).await?;
        self.session.set_token(&auth.token);
        Ok(auth)
    }

    /// Exchange an OAuth callback code for a session. Installs the returned
    /// token on success.
    pub async fn oauth_callback(&self, code: &str) -> Result<AuthSession, ApiError> {
        #[derive(Serialize)]
        struct Exchange<'a> {
            code: &'a str,
        }
        let auth: AuthSession = self
            .send_json(self.http.post(self.endpoint("/auth/oauth/callback")).json(&Exchange { code }))
            .await?;
        self.session.set_token(&auth.token);
        Ok(auth)
    }

    /// Fetch the authenticated user's profile.
    pub async fn profile(&self) -> Result<CurrentUser, ApiError> {
        let envelope: ProfileEnvelope = self.get_json("/auth/profile").await?;
        Ok(envelope.user)
    }

    /// Log out: clears the session (and thereby tears down any live
    /// realtime channel). Purely client-side.
    pub fn logout(&self) {
        self.session.clear();
    }

    // --- plumbing --------------------------------------------------------

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn bearer(&self) -> Result<String, ApiError> {
        // Fail fast: never issue an authenticated request without a token.
        self.session.token().ok_or(ApiError::Unauthorized)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let token = self.bearer()?;
        self.send_json(self.http.get(self.endpoint(path)).bearer_auth(token)).await
    }

    pub(crate) async fn get_json_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        let token = self.bearer()?;
        self.send_json(self.http.get(self.endpoint(path)).bearer_auth(token).query(query)).await
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let token = self.bearer()?;
        self.send_json(self.http.post(self.endpoint(path)).bearer_auth(token).json(body)).await
    }

    pub(crate) async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let token = self.bearer()?;
        let response =
            self.http.post(self.endpoint(path)).bearer_auth(token).json(body).send().await?;
        self.check(response).await?;
        Ok(())
    }

    pub(crate) async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        let token = self.bearer()?;
        let response = self.http.delete(self.endpoint(path)).bearer_auth(token).send().await?;
        self.check(response).await?;
        Ok(())
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let response = self.check(response).await?;
        response.json::<T>().await.map_err(ApiError::from)
    }

    /// Map error statuses, clearing the session on rejected credentials.
    async fn check(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("rest request rejected as unauthorized, clearing session");
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status: status.as_u16(), message });
        }
        Ok(response)
    }
}
