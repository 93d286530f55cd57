//! Newsletter signup, proxied to MailerLite so the API key stays on the server.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionType {
    Founding,
    Updates,
}

impl SubscriptionType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "founding" => Some(SubscriptionType::Founding),
            "updates" => Some(SubscriptionType::Updates),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionType::Founding => "founding",
            SubscriptionType::Updates => "updates",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            SubscriptionType::Founding => {
                "Welcome to the founding members group! We'll be in touch soon with early access details."
            }
            SubscriptionType::Updates => {
                "Thanks for subscribing! You'll receive our monthly progress updates."
            }
        }
    }
}

pub const SIGNUP_ERROR_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Body of `POST /api/subscribe`. Both fields are optional on the wire so
/// their absence can be reported precisely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscribeRequest {
    pub email: Option<String>,
    pub kind: Option<String>,
}

impl SubscribeRequest {
    /// Reads `email` and `type` from any JSON document. Fields that are
    /// missing or not strings come back as `None` and fail validation, so
    /// only a body that is not JSON at all is an error here.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        let field = |name: &str| {
            value
                .get(name)
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        };
        Ok(Self {
            email: field("email"),
            kind: field("type"),
        })
    }

    pub fn validate(&self) -> Result<(String, SubscriptionType), SubscribeError> {
        let email = self
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(SubscribeError::MissingEmail)?;
        let kind = self
            .kind
            .as_deref()
            .and_then(SubscriptionType::parse)
            .ok_or(SubscribeError::InvalidType)?;
        Ok((email.to_string(), kind))
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubscribeError {
    #[error("Email is required")]
    MissingEmail,
    #[error("Invalid subscription type")]
    InvalidType,
    #[error("Server configuration error")]
    NotConfigured,
    #[error("Failed to create subscriber")]
    Upstream(u16),
    #[error("Internal server error")]
    Internal(String),
}

impl SubscribeError {
    pub fn status_code(&self) -> u16 {
        match self {
            SubscribeError::MissingEmail | SubscribeError::InvalidType => 400,
            SubscribeError::NotConfigured | SubscribeError::Internal(_) => 500,
            SubscribeError::Upstream(code) => *code,
        }
    }
}

#[cfg(feature = "ssr")]
pub use server::{subscribe_handler, subscribe_with, MailerLite};

#[cfg(feature = "ssr")]
mod server {
    use axum::{
        body::Bytes,
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Response},
        Json,
    };
    use reqwest::Client;
    use serde_json::json;

    use super::{SubscribeError, SubscribeRequest, SubscriptionType};
    use crate::config::MailerLiteConfig;
    use crate::state::SiteState;

    impl IntoResponse for SubscribeError {
        fn into_response(self) -> Response {
            let status = StatusCode::from_u16(self.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(json!({ "error": self.to_string() }))).into_response()
        }
    }

    #[derive(Clone, Debug)]
    pub struct MailerLite {
        client: Client,
        config: MailerLiteConfig,
    }

    impl MailerLite {
        pub fn new(client: Client, config: MailerLiteConfig) -> Self {
            Self { client, config }
        }

        fn group_id(&self, kind: SubscriptionType) -> &str {
            match kind {
                SubscriptionType::Founding => &self.config.founding_group_id,
                SubscriptionType::Updates => &self.config.updates_group_id,
            }
        }

        /// Creates or updates the subscriber and adds them to the group for `kind`.
        pub async fn subscribe(
            &self,
            email: &str,
            kind: SubscriptionType,
        ) -> Result<(), SubscribeError> {
            let resp = self
                .client
                .post(&self.config.endpoint)
                .bearer_auth(&self.config.api_key)
                .header(reqwest::header::ACCEPT, "application/json")
                .json(&json!({ "email": email, "groups": [self.group_id(kind)] }))
                .send()
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "MailerLite request failed");
                    SubscribeError::Internal(e.to_string())
                })?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                tracing::error!(%status, body = %body, "MailerLite API error");
                return Err(SubscribeError::Upstream(status.as_u16()));
            }
            tracing::info!(kind = kind.as_str(), "subscriber created");
            Ok(())
        }
    }

    /// Validates and forwards a signup from any client.
    pub async fn subscribe_with(
        state: &SiteState,
        request: &SubscribeRequest,
    ) -> Result<SubscriptionType, SubscribeError> {
        let (email, kind) = request.validate()?;
        let Some(mailer) = state.mailer.as_ref() else {
            tracing::error!("Missing MailerLite configuration");
            return Err(SubscribeError::NotConfigured);
        };
        mailer.subscribe(&email, kind).await?;
        Ok(kind)
    }

    pub async fn subscribe_handler(
        State(state): State<SiteState>,
        body: Bytes,
    ) -> Result<Json<serde_json::Value>, SubscribeError> {
        let request = SubscribeRequest::from_json(&body).map_err(|e| {
            tracing::error!(error = %e, "Subscription error");
            SubscribeError::Internal(e.to_string())
        })?;
        subscribe_with(&state, &request).await?;
        Ok(Json(json!({ "success": true })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: Option<&str>, kind: Option<&str>) -> SubscribeRequest {
        SubscribeRequest {
            email: email.map(str::to_string),
            kind: kind.map(str::to_string),
        }
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            request(Some(" me@example.com "), Some("founding")).validate(),
            Ok(("me@example.com".to_string(), SubscriptionType::Founding))
        );
        assert_eq!(
            request(Some(""), Some("updates")).validate(),
            Err(SubscribeError::MissingEmail)
        );
        assert_eq!(
            request(None, Some("updates")).validate(),
            Err(SubscribeError::MissingEmail)
        );
        assert_eq!(
            request(Some("me@example.com"), Some("weekly")).validate(),
            Err(SubscribeError::InvalidType)
        );
        assert_eq!(
            request(Some("me@example.com"), None).validate(),
            Err(SubscribeError::InvalidType)
        );
    }

    #[test]
    fn test_error_bodies_and_codes() {
        assert_eq!(SubscribeError::MissingEmail.to_string(), "Email is required");
        assert_eq!(SubscribeError::InvalidType.status_code(), 400);
        assert_eq!(SubscribeError::NotConfigured.to_string(), "Server configuration error");
        assert_eq!(SubscribeError::Upstream(422).status_code(), 422);
        assert_eq!(SubscribeError::Upstream(422).to_string(), "Failed to create subscriber");
        assert_eq!(
            SubscribeError::Internal("eof".into()).to_string(),
            "Internal server error"
        );
    }

    #[test]
    fn test_request_reads_type_field() {
        let req = SubscribeRequest::from_json(br#"{"email":"a@b.c","type":"updates"}"#).unwrap();
        assert_eq!(req.validate().unwrap().1, SubscriptionType::Updates);
    }

    #[test]
    fn test_request_non_string_fields_are_invalid() {
        let req = SubscribeRequest::from_json(br#"{"email":"a@b.c","type":5}"#).unwrap();
        assert_eq!(req.kind, None);
        assert_eq!(req.validate(), Err(SubscribeError::InvalidType));

        let req = SubscribeRequest::from_json(br#"{"email":["a@b.c"],"type":"founding"}"#).unwrap();
        assert_eq!(req.validate(), Err(SubscribeError::MissingEmail));

        // valid JSON that is not an object carries no fields
        let req = SubscribeRequest::from_json(b"[1, 2]").unwrap();
        assert_eq!(req, SubscribeRequest::default());

        assert!(SubscribeRequest::from_json(b"not json").is_err());
    }
}
