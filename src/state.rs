use std::sync::Arc;

use crate::backend::{BackendClient, BackendError};
use crate::config::SiteConfig;
use crate::subscribe::MailerLite;

/// Shared by the axum routes and, through Leptos context, the server functions.
#[derive(Clone, Debug)]
pub struct SiteState {
    pub config: Arc<SiteConfig>,
    pub backend: BackendClient,
    pub mailer: Option<MailerLite>,
}

impl SiteState {
    pub fn new(config: SiteConfig) -> Result<Self, BackendError> {
        let backend = BackendClient::new(&config.server_api_url, config.backend_timeout)?;
        let mailer = match config.mailerlite.clone() {
            Some(ml) => Some(MailerLite::new(
                reqwest::Client::builder()
                    .timeout(config.backend_timeout)
                    .build()?,
                ml,
            )),
            None => {
                tracing::warn!("MailerLite is not configured, signups will fail");
                None
            }
        };
        Ok(Self {
            config: Arc::new(config),
            backend,
            mailer,
        })
    }
}
