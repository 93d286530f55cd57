use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const CONSENT_COOKIE: &str = "jaja-consent";
pub const CONSENT_DAYS: i64 = 365;
pub const DEFAULT_POSTHOG_HOST: &str = "https://us.i.posthog.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Consent {
    Accepted,
    Declined,
}

impl Consent {
    pub fn as_str(self) -> &'static str {
        match self {
            Consent::Accepted => "true",
            Consent::Declined => "false",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "true" => Some(Consent::Accepted),
            "false" => Some(Consent::Declined),
            _ => None,
        }
    }
}

/// Looks up one cookie in a `Cookie` request header and URL-decodes its value.
pub fn read_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| {
            urlencoding::decode(raw)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| raw.to_string())
        })
}

/// Consent recorded in the request's cookies. Unknown values read as `None`,
/// which keeps analytics off.
pub fn consent_from_header(header: &str) -> Option<Consent> {
    read_cookie(header, CONSENT_COOKIE).and_then(|v| Consent::from_value(&v))
}

/// Whether the visitor has answered the banner. Any value of the consent
/// cookie counts, even one `consent_from_header` does not recognise.
pub fn consent_recorded(header: &str) -> bool {
    read_cookie(header, CONSENT_COOKIE).is_some()
}

/// `Set-Cookie` value persisting a consent decision for a year.
pub fn consent_set_cookie(consent: Consent, now: DateTime<Utc>) -> String {
    let expires = now + Duration::days(CONSENT_DAYS);
    format!(
        "{CONSENT_COOKIE}={}; Expires={}; Max-Age={}; Path=/; SameSite=Lax",
        urlencoding::encode(consent.as_str()),
        expires.format("%a, %d %b %Y %H:%M:%S GMT"),
        CONSENT_DAYS * 24 * 60 * 60,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalyticsDecision {
    Enable,
    OptOut,
    Undecided,
}

/// Analytics only start with explicit consent and without a Global Privacy
/// Control signal.
pub fn analytics_decision(consent: Option<Consent>, gpc: bool) -> AnalyticsDecision {
    match (consent, gpc) {
        (_, true) | (Some(Consent::Declined), _) => AnalyticsDecision::OptOut,
        (Some(Consent::Accepted), false) => AnalyticsDecision::Enable,
        (None, false) => AnalyticsDecision::Undecided,
    }
}

/// `Sec-GPC: 1` is the header form of `navigator.globalPrivacyControl`.
pub fn gpc_from_header(value: Option<&str>) -> bool {
    value.map(str::trim) == Some("1")
}

/// Inline loader for PostHog. Pageviews are captured by the library itself.
pub fn posthog_snippet(key: &str, host: &str) -> String {
    let host = host.trim_end_matches('/');
    let key_js = serde_json::to_string(key).unwrap_or_else(|_| "\"\"".to_string());
    let host_js = serde_json::to_string(host).unwrap_or_else(|_| "\"\"".to_string());
    let src_js = serde_json::to_string(&format!("{host}/static/array.js"))
        .unwrap_or_else(|_| "\"\"".to_string());
    format!(
        "(function(){{var s=document.createElement('script');s.async=true;s.src={src_js};\
         s.onload=function(){{window.posthog&&window.posthog.init({key_js},{{api_host:{host_js},\
         person_profiles:'identified_only',capture_pageview:true,respect_dnt:true}});}};\
         document.head.appendChild(s);}})();"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_read_cookie() {
        let header = "session=abc; jaja-consent=true;other=%20x";
        assert_eq!(read_cookie(header, "jaja-consent").as_deref(), Some("true"));
        assert_eq!(read_cookie(header, "other").as_deref(), Some(" x"));
        assert_eq!(read_cookie(header, "missing"), None);
        // prefix of another cookie name must not match
        assert_eq!(read_cookie("jaja-consent-old=false", "jaja-consent"), None);
    }

    #[test]
    fn test_consent_from_header() {
        assert_eq!(
            consent_from_header("jaja-consent=false"),
            Some(Consent::Declined)
        );
        assert_eq!(consent_from_header("jaja-consent=maybe"), None);
        assert_eq!(consent_from_header(""), None);
    }

    #[test]
    fn test_unknown_consent_value_hides_banner_but_not_analytics() {
        let header = "session=abc; jaja-consent=maybe";
        assert!(consent_recorded(header));
        assert_eq!(
            analytics_decision(consent_from_header(header), false),
            AnalyticsDecision::Undecided
        );
        assert!(consent_recorded("jaja-consent=false"));
        assert!(!consent_recorded("session=abc"));
        assert!(!consent_recorded(""));
    }

    #[test]
    fn test_set_cookie_value() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(
            consent_set_cookie(Consent::Accepted, now),
            "jaja-consent=true; Expires=Thu, 01 Jan 2026 12:00:00 GMT; Max-Age=31536000; Path=/; SameSite=Lax"
        );
    }

    #[test]
    fn test_analytics_decision() {
        use AnalyticsDecision::*;
        assert_eq!(analytics_decision(Some(Consent::Accepted), false), Enable);
        assert_eq!(analytics_decision(Some(Consent::Accepted), true), OptOut);
        assert_eq!(analytics_decision(Some(Consent::Declined), false), OptOut);
        assert_eq!(analytics_decision(None, true), OptOut);
        assert_eq!(analytics_decision(None, false), Undecided);
    }

    #[test]
    fn test_gpc_header() {
        assert!(gpc_from_header(Some("1")));
        assert!(!gpc_from_header(Some("0")));
        assert!(!gpc_from_header(None));
    }

    #[test]
    fn test_posthog_snippet_escapes_key() {
        let snippet = posthog_snippet("phc_\"key", "https://eu.i.posthog.com/");
        assert!(snippet.contains(r#""phc_\"key""#));
        assert!(snippet.contains(r#""https://eu.i.posthog.com/static/array.js""#));
        assert!(snippet.contains(r#"api_host:"https://eu.i.posthog.com""#));
    }
}
