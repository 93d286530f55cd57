use std::time::Duration;

use crate::consent::DEFAULT_POSTHOG_HOST;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const MAILERLITE_SUBSCRIBERS_URL: &str = "https://connect.mailerlite.com/api/subscribers";
const DEFAULT_BACKEND_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct MailerLiteConfig {
    pub api_key: String,
    pub founding_group_id: String,
    pub updates_group_id: String,
    pub endpoint: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostHogConfig {
    pub key: String,
    pub host: String,
}

/// Runtime settings read from the environment at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    /// Backend URL as seen by browsers (login/logout redirects).
    pub public_api_url: String,
    /// Backend URL used by this server.
    pub server_api_url: String,
    pub backend_timeout: Duration,
    pub mailerlite: Option<MailerLiteConfig>,
    pub posthog: Option<PostHogConfig>,
}

impl SiteConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let public_api_url = get("NEXT_PUBLIC_API_URL")
            .or_else(|| get("API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let server_api_url = get("SERVER_API_URL")
            .or_else(|| get("NEXT_SERVER_API_URL"))
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| public_api_url.clone());
        let backend_timeout = Duration::from_millis(
            get("BACKEND_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_BACKEND_TIMEOUT_MS),
        );

        let mailerlite = match (
            get("MAILERLITE_API_KEY"),
            get("MAILERLITE_FOUNDING_GROUP_ID"),
            get("MAILERLITE_UPDATES_GROUP_ID"),
        ) {
            (Some(api_key), Some(founding_group_id), Some(updates_group_id)) => {
                Some(MailerLiteConfig {
                    api_key,
                    founding_group_id,
                    updates_group_id,
                    endpoint: get("MAILERLITE_ENDPOINT")
                        .unwrap_or_else(|| MAILERLITE_SUBSCRIBERS_URL.to_string()),
                })
            }
            _ => None,
        };

        let posthog = get("POSTHOG_KEY")
            .or_else(|| get("NEXT_PUBLIC_POSTHOG_KEY"))
            .map(|key| PostHogConfig {
                key,
                host: get("POSTHOG_HOST")
                    .or_else(|| get("NEXT_PUBLIC_POSTHOG_HOST"))
                    .unwrap_or_else(|| DEFAULT_POSTHOG_HOST.to_string()),
            });

        SiteConfig {
            public_api_url,
            server_api_url,
            backend_timeout,
            mailerlite,
            posthog,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> SiteConfig {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        SiteConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let c = SiteConfig::default();
        assert_eq!(c.public_api_url, DEFAULT_API_URL);
        assert_eq!(c.server_api_url, DEFAULT_API_URL);
        assert_eq!(c.backend_timeout, Duration::from_millis(10_000));
        assert!(c.mailerlite.is_none());
        assert!(c.posthog.is_none());
    }

    #[test]
    fn test_server_url_overrides_public() {
        let c = config(&[
            ("NEXT_PUBLIC_API_URL", "https://api.justajobapp.com/"),
            ("SERVER_API_URL", "http://backend:8000"),
        ]);
        assert_eq!(c.public_api_url, "https://api.justajobapp.com");
        assert_eq!(c.server_api_url, "http://backend:8000");
    }

    #[test]
    fn test_partial_mailerlite_config_is_ignored() {
        let c = config(&[
            ("MAILERLITE_API_KEY", "key"),
            ("MAILERLITE_FOUNDING_GROUP_ID", "1"),
            ("MAILERLITE_UPDATES_GROUP_ID", " "),
        ]);
        assert!(c.mailerlite.is_none());

        let c = config(&[
            ("MAILERLITE_API_KEY", "key"),
            ("MAILERLITE_FOUNDING_GROUP_ID", "1"),
            ("MAILERLITE_UPDATES_GROUP_ID", "2"),
        ]);
        let ml = c.mailerlite.expect("complete config");
        assert_eq!(ml.endpoint, MAILERLITE_SUBSCRIBERS_URL);
        assert_eq!(ml.updates_group_id, "2");
    }

    #[test]
    fn test_posthog_host_default() {
        let c = config(&[("POSTHOG_KEY", "phc_123")]);
        let ph = c.posthog.expect("posthog configured");
        assert_eq!(ph.host, DEFAULT_POSTHOG_HOST);
    }
}
