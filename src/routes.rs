//! Plain axum routes served next to the Leptos app.

use axum::{
    http::{header, HeaderValue},
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use crate::export::export_handler;
use crate::state::SiteState;
use crate::subscribe::subscribe_handler;

const ROBOTS_TXT: &str = "User-agent: *\nAllow: /\nDisallow: /dashboard\nDisallow: /export/\nDisallow: /api/\n";

async fn robots() -> impl IntoResponse {
    (
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (
                header::CONTENT_SECURITY_POLICY,
                HeaderValue::from_static("default-src 'none'"),
            ),
        ],
        ROBOTS_TXT,
    )
}

pub fn router(state: SiteState) -> Router {
    Router::new()
        .route("/api/subscribe", post(subscribe_handler))
        .route("/export/{kind}", get(export_handler))
        .route("/robots.txt", get(robots))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        routing::post,
        Json,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::{MailerLiteConfig, SiteConfig};
    use crate::export::ExportKind;

    fn state(mailerlite: Option<MailerLiteConfig>) -> SiteState {
        let config = SiteConfig {
            mailerlite,
            ..SiteConfig::default()
        };
        SiteState::new(config).expect("state should build")
    }

    async fn subscribe(app: Router, body: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(
                Request::post("/api/subscribe")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_subscribe_requires_email() {
        let (status, body) = subscribe(router(state(None)), r#"{"type":"founding"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Email is required" }));
    }

    #[tokio::test]
    async fn test_subscribe_rejects_unknown_type() {
        let (status, body) =
            subscribe(router(state(None)), r#"{"email":"a@b.c","type":"daily"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid subscription type" }));
    }

    #[tokio::test]
    async fn test_subscribe_non_string_type_is_invalid() {
        let (status, body) = subscribe(router(state(None)), r#"{"email":"a@b.c","type":5}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid subscription type" }));
    }

    #[tokio::test]
    async fn test_subscribe_without_config() {
        let (status, body) =
            subscribe(router(state(None)), r#"{"email":"a@b.c","type":"updates"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Server configuration error" }));
    }

    #[tokio::test]
    async fn test_subscribe_malformed_body() {
        let (status, body) = subscribe(router(state(None)), "not json").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }

    /// Spawns a stand-in for MailerLite answering every request with `status`.
    async fn fake_mailerlite(status: StatusCode) -> String {
        let app = Router::new().route(
            "/api/subscribers",
            post(move |Json(body): Json<Value>| async move {
                assert!(body["groups"].is_array());
                (status, Json(json!({ "message": "stub" })))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/api/subscribers")
    }

    fn mailerlite(endpoint: String) -> MailerLiteConfig {
        MailerLiteConfig {
            api_key: "test-key".into(),
            founding_group_id: "100".into(),
            updates_group_id: "200".into(),
            endpoint,
        }
    }

    #[tokio::test]
    async fn test_subscribe_success() {
        let endpoint = fake_mailerlite(StatusCode::CREATED).await;
        let app = router(state(Some(mailerlite(endpoint))));
        let (status, body) = subscribe(app, r#"{"email":"a@b.c","type":"founding"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
    }

    #[tokio::test]
    async fn test_subscribe_passes_upstream_status() {
        let endpoint = fake_mailerlite(StatusCode::UNPROCESSABLE_ENTITY).await;
        let app = router(state(Some(mailerlite(endpoint))));
        let (status, body) = subscribe(app, r#"{"email":"bad","type":"updates"}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, json!({ "error": "Failed to create subscriber" }));
    }

    #[tokio::test]
    async fn test_robots_has_csp() {
        let resp = router(state(None))
            .oneshot(Request::get("/robots.txt").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::CONTENT_SECURITY_POLICY],
            "default-src 'none'"
        );
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("User-agent:"));
    }

    #[tokio::test]
    async fn test_unknown_export_is_not_found() {
        let resp = router(state(None))
            .oneshot(Request::get("/export/pdf").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_export_failure_redirects_to_dashboard() {
        // nothing listens on the discard port, so the backend call fails
        let config = SiteConfig {
            server_api_url: "http://127.0.0.1:9".into(),
            ..SiteConfig::default()
        };
        let app = router(SiteState::new(config).unwrap());
        let resp = app
            .oneshot(Request::get("/export/csv").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers()[header::LOCATION],
            "/dashboard?export_error=failed&export=csv"
        );
    }

    /// Spawns a stand-in backend whose `/process-csv` answers `status`, and
    /// returns site state pointed at it. The visitor's cookies must arrive
    /// joined into one header.
    async fn fake_backend(status: StatusCode) -> SiteState {
        let app = Router::new().route(
            "/process-csv",
            get(move |headers: axum::http::HeaderMap| async move {
                assert_eq!(headers[header::COOKIE], "session=abc; jaja-consent=true");
                (
                    status,
                    [(header::CONTENT_TYPE, "text/csv")],
                    "company,status\nAcme,Interview\n",
                )
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        let config = SiteConfig {
            server_api_url: format!("http://{addr}"),
            ..SiteConfig::default()
        };
        SiteState::new(config).unwrap()
    }

    fn export_request() -> Request<Body> {
        Request::get("/export/csv")
            .header(header::COOKIE, "session=abc")
            .header(header::COOKIE, "jaja-consent=true")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_export_serves_dated_attachment() {
        let app = router(fake_backend(StatusCode::OK).await);
        let before = chrono::Utc::now().date_naive();
        let resp = app.oneshot(export_request()).await.unwrap();
        let after = chrono::Utc::now().date_naive();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/csv");
        let disposition = resp.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        let expected = |date| format!("attachment; filename=\"{}\"", ExportKind::Csv.file_name(date));
        assert!(disposition == expected(before) || disposition == expected(after));
        assert!(disposition.contains("job_applications_"));

        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"company,status\nAcme,Interview\n");
    }

    #[tokio::test]
    async fn test_export_rate_limit_redirects_with_reason() {
        let app = router(fake_backend(StatusCode::TOO_MANY_REQUESTS).await);
        let resp = app.oneshot(export_request()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers()[header::LOCATION],
            "/dashboard?export_error=rate_limited&export=csv"
        );
    }
}
