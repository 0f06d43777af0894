//! REST client for the LessonPilot backend.
//!
//! Wraps every endpoint the web client uses (auth, resource CRUD, generation
//! and document threads) using [`reqwest`]. Protected calls carry
//! `Authorization: Bearer <token>`.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::models::wire;
use crate::models::{
    AuthToken, DocumentKind, GenerateRequest, GeneratedDocument, Message, ResetPasswordRequest,
    SignUpRequest, UserInfo,
};
use crate::page::{Page, PageRequest};
use crate::{ApiError, ResourceKind};

/// HTTP client for the REST backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && self.token == other.token
    }
}

impl ApiClient {
    /// Create an unauthenticated client.
    ///
    /// * `base_url` - API root, e.g. `https://api.lessonpilot.app/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Client for the configured backend carrying the stored token, if any.
    pub fn from_session(config: &store::ClientConfig, session: &store::Session) -> Self {
        Self::new(config.api.base_url.clone()).with_token(session.token.clone())
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path relative to the API root.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // ---- auth ----

    /// Register a new account. The backend emails a verification code.
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<(), ApiError> {
        let rb = self.public(Method::POST, "/Auth/register").json(request);
        Self::send_empty(rb).await
    }

    /// Confirm an email address with the code sent at sign-up.
    pub async fn verify_email(&self, email: &str, code: &str) -> Result<(), ApiError> {
        let rb = self
            .public(Method::POST, "/Auth/verify-email")
            .json(&json!({ "email": email.trim(), "code": code.trim() }));
        Self::send_empty(rb).await
    }

    pub async fn resend_verification(&self, email: &str) -> Result<(), ApiError> {
        let rb = self
            .public(Method::POST, "/Auth/resend-verification")
            .json(&json!({ "email": email.trim() }));
        Self::send_empty(rb).await
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthToken, ApiError> {
        let rb = self
            .public(Method::POST, "/Auth/login")
            .json(&json!({ "email": email.trim().to_lowercase(), "password": password }));
        let value = Self::send_value(rb).await?;
        Ok(wire::unwrap_data(value)?)
    }

    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        let rb = self
            .public(Method::POST, "/Auth/forgot-password")
            .json(&json!({ "email": email.trim() }));
        Self::send_empty(rb).await
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), ApiError> {
        let rb = self.public(Method::POST, "/Auth/reset-password").json(request);
        Self::send_empty(rb).await
    }

    /// Profile of the signed-in user (the access-gate endpoint).
    pub async fn current_user(&self) -> Result<UserInfo, ApiError> {
        let rb = self.protected(Method::GET, "/Auth/me")?;
        let value = Self::send_value(rb).await?;
        Ok(wire::unwrap_data(value)?)
    }

    // ---- resources ----

    /// Fetch one page of a collection.
    pub async fn list<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        request: PageRequest,
    ) -> Result<Page<T>, ApiError> {
        let path = format!("{}?{}", kind.path(), request.query());
        let rb = self.protected(Method::GET, &path)?;
        let value = Self::send_value(rb).await?;
        Ok(Page::decode(value, request)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, kind: ResourceKind, id: &str) -> Result<T, ApiError> {
        let rb = self.protected(Method::GET, &Self::item_path(kind, id))?;
        let value = Self::send_value(rb).await?;
        Ok(wire::unwrap_data(value)?)
    }

    pub async fn create<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        kind: ResourceKind,
        body: &B,
    ) -> Result<T, ApiError> {
        let rb = self.protected(Method::POST, kind.path())?.json(body);
        let value = Self::send_value(rb).await?;
        Ok(wire::unwrap_data(value)?)
    }

    pub async fn update<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        kind: ResourceKind,
        id: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let rb = self
            .protected(Method::PUT, &Self::item_path(kind, id))?
            .json(body);
        let value = Self::send_value(rb).await?;
        Ok(wire::unwrap_data(value)?)
    }

    pub async fn delete(&self, kind: ResourceKind, id: &str) -> Result<(), ApiError> {
        let rb = self.protected(Method::DELETE, &Self::item_path(kind, id))?;
        Self::send_empty(rb).await
    }

    // ---- generation & threads ----

    /// Ask the AI service to generate a new document.
    pub async fn generate(
        &self,
        kind: DocumentKind,
        request: &GenerateRequest,
    ) -> Result<GeneratedDocument, ApiError> {
        let rb = self
            .protected(Method::POST, &format!("{}/generate", kind.path()))?
            .json(request);
        let value = Self::send_value(rb).await?;
        Ok(wire::unwrap_data(value)?)
    }

    /// The follow-up thread of a document, oldest first.
    pub async fn messages(&self, kind: DocumentKind, id: &str) -> Result<Vec<Message>, ApiError> {
        let rb = self.protected(Method::GET, &Self::thread_path(kind, id, "messages"))?;
        let value = Self::send_value(rb).await?;
        Ok(wire::unwrap_data(value)?)
    }

    /// Post a follow-up question; returns the assistant's reply.
    pub async fn send_message(
        &self,
        kind: DocumentKind,
        id: &str,
        content: &str,
    ) -> Result<Message, ApiError> {
        let rb = self
            .protected(Method::POST, &Self::thread_path(kind, id, "messages"))?
            .json(&json!({ "content": content }));
        let value = Self::send_value(rb).await?;
        Ok(wire::unwrap_data(value)?)
    }

    /// Regenerate a document. The result is appended to the thread; the
    /// original content is kept.
    pub async fn regenerate(&self, kind: DocumentKind, id: &str) -> Result<Message, ApiError> {
        let rb = self.protected(Method::POST, &Self::thread_path(kind, id, "regenerate"))?;
        let value = Self::send_value(rb).await?;
        Ok(wire::unwrap_data(value)?)
    }

    // ---- private helpers ----

    fn item_path(kind: ResourceKind, id: &str) -> String {
        format!("{}/{}", kind.path(), id)
    }

    fn thread_path(kind: DocumentKind, id: &str, action: &str) -> String {
        format!("{}/{}/{}", kind.path(), id, action)
    }

    /// Request that does not require a session. The token is still attached
    /// when present.
    fn public(&self, method: Method, path: &str) -> RequestBuilder {
        let rb = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        }
    }

    /// Request that requires a session.
    fn protected(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        if self.token.is_none() {
            return Err(ApiError::NotSignedIn);
        }
        Ok(self.public(method, path))
    }

    async fn send_value(rb: RequestBuilder) -> Result<Value, ApiError> {
        let response = rb.send().await?;
        Self::read_value(response).await
    }

    async fn send_empty(rb: RequestBuilder) -> Result<(), ApiError> {
        let response = rb.send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Map non-2xx statuses to [`ApiError`], returning the response unchanged
    /// on success.
    async fn ensure_success(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        tracing::warn!(status = status.as_u16(), url = %response.url(), "API request failed");
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized {
                status: status.as_u16(),
            });
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Parse a successful JSON body. An empty body reads as `null`.
    async fn read_value(response: Response) -> Result<Value, ApiError> {
        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::AUTHORIZATION;

    fn client() -> ApiClient {
        ApiClient::new("https://api.example.org/api/").with_token(Some("tok".to_string()))
    }

    fn response(status: u16, body: &'static str) -> Response {
        let http = http::Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        Response::from(http)
    }

    #[test]
    fn test_url_joining() {
        let c = client();
        assert_eq!(c.base_url(), "https://api.example.org/api");
        assert_eq!(c.url("/LessonNotes"), "https://api.example.org/api/LessonNotes");
        assert_eq!(c.url("Class?page=1&pageSize=10"), "https://api.example.org/api/Class?page=1&pageSize=10");
    }

    #[test]
    fn test_bearer_header_on_protected_requests() {
        let req = client()
            .protected(Method::GET, "/Assessments/7")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(req.method(), Method::GET);
        assert_eq!(req.url().as_str(), "https://api.example.org/api/Assessments/7");
        assert_eq!(req.headers().get(AUTHORIZATION).unwrap(), "Bearer tok");
    }

    #[test]
    fn test_protected_without_token_fails() {
        let anon = ApiClient::new("https://api.example.org/api");
        assert!(matches!(
            anon.protected(Method::GET, "/Auth/me"),
            Err(ApiError::NotSignedIn)
        ));
        let req = anon.public(Method::POST, "/Auth/login").build().unwrap();
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let c = ApiClient::new("http://x").with_token(Some("  ".to_string()));
        assert!(c.token().is_none());
    }

    #[test]
    fn test_from_session() {
        let config = store::ClientConfig::new("https://api.example.org/api".to_string());
        let session = store::Session {
            token: Some("abc".to_string()),
            ..Default::default()
        };
        let c = ApiClient::from_session(&config, &session);
        assert_eq!(c.token(), Some("abc"));
        assert_eq!(c.base_url(), "https://api.example.org/api");
    }

    #[test]
    fn test_paths() {
        assert_eq!(ApiClient::item_path(ResourceKind::Topics, "3"), "/Topics/3");
        assert_eq!(
            ApiClient::thread_path(DocumentKind::Plan, "9", "regenerate"),
            "/LessonPlans/9/regenerate"
        );
    }

    #[tokio::test]
    async fn test_read_value_success_and_empty() {
        let value = ApiClient::read_value(response(200, r#"{"id": 5}"#)).await.unwrap();
        assert_eq!(value["id"], 5);

        let value = ApiClient::read_value(response(204, "")).await.unwrap();
        assert!(value.is_null());
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let err = ApiClient::read_value(response(401, "")).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { status: 401 }));

        let err = ApiClient::read_value(response(403, "")).await.unwrap_err();
        assert!(err.is_unauthorized());

        let err = ApiClient::read_value(response(409, r#"{"message":"Topic exists"}"#))
            .await
            .unwrap_err();
        match &err {
            ApiError::Status { status, body } => {
                assert_eq!(*status, 409);
                assert!(body.contains("Topic exists"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.user_message(), "Topic exists");
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let err = ApiClient::read_value(response(200, "{not json")).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_protected_calls_short_circuit_without_token() {
        let anon = ApiClient::new("http://127.0.0.1:9");
        let err = anon.current_user().await.unwrap_err();
        assert!(matches!(err, ApiError::NotSignedIn));
        let err = anon
            .list::<UserInfo>(ResourceKind::Users, PageRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotSignedIn));
    }
}
