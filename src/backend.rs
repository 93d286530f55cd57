//! Client for the JAJA backend. Every call forwards the visitor's cookies so
//! the backend sees its own session.

use std::time::Duration;

use http::{header, HeaderValue, StatusCode};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::auth::AuthStatus;
use crate::export::ExportKind;
use crate::model::{
    ApplicationsPage, DemoModeChange, EmailsResponse, Stats, TestEmail, TestEmailDraft,
};

/// All `Cookie` headers of a request folded into one value. HTTP/2 clients
/// may split cookies across several headers.
pub fn forwarded_cookie(headers: &http::HeaderMap) -> Option<HeaderValue> {
    let mut values = headers.get_all(header::COOKIE).iter();
    let first = values.next()?;
    let mut joined = first.as_bytes().to_vec();
    for value in values {
        joined.extend_from_slice(b"; ");
        joined.extend_from_slice(value.as_bytes());
    }
    HeaderValue::from_bytes(&joined).ok()
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("not signed in")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("rate limited")]
    RateLimited,
    #[error("backend answered {0}")]
    Status(u16),
}

impl BackendError {
    /// Maps a non-success status to an error; `None` for 2xx.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        if status.is_success() {
            return None;
        }
        Some(match status.as_u16() {
            401 | 403 => BackendError::Unauthorized,
            404 => BackendError::NotFound,
            429 => BackendError::RateLimited,
            code => BackendError::Status(code),
        })
    }
}

#[derive(Clone, Debug)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

#[derive(serde::Deserialize)]
struct AddedTestEmail {
    email_id: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, cookie: Option<&HeaderValue>) -> RequestBuilder {
        let req = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match cookie {
            Some(c) => req.header(header::COOKIE, c.clone()),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, BackendError> {
        let resp = req.send().await?;
        match BackendError::from_status(resp.status()) {
            Some(err) => {
                tracing::debug!(status = %resp.status(), url = %resp.url(), "backend rejected request");
                Err(err)
            }
            None => Ok(resp),
        }
    }

    async fn json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, BackendError> {
        Ok(self.send(req).await?.json::<T>().await?)
    }

    /// Never fails: an unreachable backend reads as `Unavailable`.
    pub async fn check_session(&self, cookie: Option<&HeaderValue>) -> AuthStatus {
        match self.request(Method::GET, "/me", cookie).send().await {
            Ok(resp) => AuthStatus::from_status(resp.status().as_u16()),
            Err(e) => {
                tracing::warn!(error = %e, base_url = %self.base_url, "session check failed");
                AuthStatus::Unavailable
            }
        }
    }

    pub async fn applications(
        &self,
        cookie: Option<&HeaderValue>,
        page: u32,
    ) -> Result<ApplicationsPage, BackendError> {
        let path = format!("/get-emails?page={page}");
        let resp: EmailsResponse = self
            .json(self.request(Method::GET, &path, cookie))
            .await?;
        Ok(resp.into())
    }

    pub async fn stats(&self, cookie: Option<&HeaderValue>) -> Result<Stats, BackendError> {
        self.json(self.request(Method::GET, "/api/stats", cookie))
            .await
    }

    pub async fn delete_application(
        &self,
        cookie: Option<&HeaderValue>,
        id: &str,
    ) -> Result<(), BackendError> {
        let path = format!("/delete-email/{}", urlencoding::encode(id));
        self.send(self.request(Method::DELETE, &path, cookie))
            .await?;
        Ok(())
    }

    pub async fn export(
        &self,
        cookie: Option<&HeaderValue>,
        kind: ExportKind,
    ) -> Result<Response, BackendError> {
        self.send(self.request(Method::GET, kind.backend_path(), cookie))
            .await
    }

    pub async fn test_emails(
        &self,
        cookie: Option<&HeaderValue>,
    ) -> Result<Vec<TestEmail>, BackendError> {
        self.json(self.request(Method::GET, "/test-emails", cookie))
            .await
    }

    pub async fn test_email_categories(
        &self,
        cookie: Option<&HeaderValue>,
    ) -> Result<Vec<String>, BackendError> {
        self.json(self.request(Method::GET, "/test-email-categories", cookie))
            .await
    }

    pub async fn search_test_emails(
        &self,
        cookie: Option<&HeaderValue>,
        query: &str,
    ) -> Result<Vec<TestEmail>, BackendError> {
        let path = format!("/search-test-emails?q={}", urlencoding::encode(query));
        self.json(self.request(Method::GET, &path, cookie)).await
    }

    /// Returns the id the backend assigned.
    pub async fn add_test_email(
        &self,
        cookie: Option<&HeaderValue>,
        draft: &TestEmailDraft,
    ) -> Result<String, BackendError> {
        let added: AddedTestEmail = self
            .json(self.request(Method::POST, "/add-test-email", cookie).json(draft))
            .await?;
        Ok(added.email_id)
    }

    pub async fn update_test_email(
        &self,
        cookie: Option<&HeaderValue>,
        id: &str,
        draft: &TestEmailDraft,
    ) -> Result<(), BackendError> {
        let path = format!("/update-test-email/{}", urlencoding::encode(id));
        self.send(self.request(Method::PUT, &path, cookie).json(draft))
            .await?;
        Ok(())
    }

    pub async fn delete_test_email(
        &self,
        cookie: Option<&HeaderValue>,
        id: &str,
    ) -> Result<(), BackendError> {
        let path = format!("/delete-test-email/{}", urlencoding::encode(id));
        self.send(self.request(Method::DELETE, &path, cookie))
            .await?;
        Ok(())
    }

    pub async fn set_demo_mode(
        &self,
        cookie: Option<&HeaderValue>,
        enabled: bool,
    ) -> Result<DemoModeChange, BackendError> {
        let path = if enabled {
            "/enable-demo-mode"
        } else {
            "/disable-demo-mode"
        };
        self.json(self.request(Method::POST, path, cookie)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(BackendError::from_status(StatusCode::OK).is_none());
        assert!(matches!(
            BackendError::from_status(StatusCode::UNAUTHORIZED),
            Some(BackendError::Unauthorized)
        ));
        assert!(matches!(
            BackendError::from_status(StatusCode::FORBIDDEN),
            Some(BackendError::Unauthorized)
        ));
        assert!(matches!(
            BackendError::from_status(StatusCode::NOT_FOUND),
            Some(BackendError::NotFound)
        ));
        assert!(matches!(
            BackendError::from_status(StatusCode::TOO_MANY_REQUESTS),
            Some(BackendError::RateLimited)
        ));
        assert!(matches!(
            BackendError::from_status(StatusCode::BAD_GATEWAY),
            Some(BackendError::Status(502))
        ));
    }

    #[test]
    fn test_base_url_is_normalised() {
        let client = BackendClient::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_forwarded_cookie_joins_headers() {
        let mut headers = http::HeaderMap::new();
        assert!(forwarded_cookie(&headers).is_none());

        headers.append(header::COOKIE, HeaderValue::from_static("session=abc"));
        assert_eq!(forwarded_cookie(&headers).unwrap(), "session=abc");

        headers.append(header::COOKIE, HeaderValue::from_static("jaja-consent=true"));
        assert_eq!(
            forwarded_cookie(&headers).unwrap(),
            "session=abc; jaja-consent=true"
        );
    }

    /// Spawns a backend whose `/me` answers `status` when the session cookie
    /// is present and 401 otherwise.
    async fn fake_me(status: StatusCode) -> BackendClient {
        use axum::{routing::get, Router};

        let app = Router::new().route(
            "/me",
            get(move |headers: http::HeaderMap| async move {
                match headers.get(header::COOKIE) {
                    Some(c) if c == "session=abc" => status,
                    _ => StatusCode::UNAUTHORIZED,
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        BackendClient::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_check_session_forwards_cookie() {
        let cookie = HeaderValue::from_static("session=abc");
        let client = fake_me(StatusCode::OK).await;
        assert_eq!(
            client.check_session(Some(&cookie)).await,
            AuthStatus::Authenticated
        );
        assert_eq!(client.check_session(None).await, AuthStatus::Unauthorized);
    }

    #[tokio::test]
    async fn test_check_session_classifies_status() {
        let cookie = HeaderValue::from_static("session=abc");
        let client = fake_me(StatusCode::UNAUTHORIZED).await;
        assert_eq!(
            client.check_session(Some(&cookie)).await,
            AuthStatus::Unauthorized
        );

        let client = fake_me(StatusCode::INTERNAL_SERVER_ERROR).await;
        assert_eq!(
            client.check_session(Some(&cookie)).await,
            AuthStatus::Unavailable
        );

        // nothing listens on the discard port
        let client = BackendClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.check_session(Some(&cookie)).await,
            AuthStatus::Unavailable
        );
    }
}
