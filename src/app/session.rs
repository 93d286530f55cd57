//! Server functions and context shared by every page: the backend session,
//! the public backend URL and the consent cookie.

use leptos::prelude::*;
use leptos::server_fn::codec::GetUrl;

use crate::auth::AuthStatus;
use crate::consent::Consent;

#[cfg(feature = "ssr")]
use crate::state::SiteState;

#[cfg(feature = "ssr")]
pub(crate) fn site_state() -> Result<SiteState, ServerFnError> {
    use_context::<SiteState>().ok_or_else(|| ServerFnError::new("Site state is missing"))
}

/// The visitor's cookies, forwarded to the backend as is.
#[cfg(feature = "ssr")]
pub(crate) fn visitor_cookie() -> Option<http::HeaderValue> {
    use_context::<http::request::Parts>()
        .and_then(|parts| crate::backend::forwarded_cookie(&parts.headers))
}

#[server(input = GetUrl)]
pub async fn check_auth() -> Result<AuthStatus, ServerFnError> {
    let state = site_state()?;
    Ok(state.backend.check_session(visitor_cookie().as_ref()).await)
}

#[server(input = GetUrl)]
pub async fn public_api_url() -> Result<String, ServerFnError> {
    Ok(site_state()?.config.public_api_url.clone())
}

/// True once the consent cookie exists, whatever its value.
#[server(input = GetUrl)]
pub async fn consent_recorded() -> Result<bool, ServerFnError> {
    let header = visitor_cookie();
    Ok(header
        .as_ref()
        .and_then(|h| h.to_str().ok())
        .is_some_and(crate::consent::consent_recorded))
}

#[server]
pub async fn set_consent(consent: Consent) -> Result<(), ServerFnError> {
    use crate::consent::consent_set_cookie;
    use http::{header, HeaderValue};

    let response = use_context::<leptos_axum::ResponseOptions>()
        .ok_or_else(|| ServerFnError::new("Response options are missing"))?;
    let cookie = consent_set_cookie(consent, chrono::Utc::now());
    response.append_header(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(ServerFnError::new)?,
    );
    tracing::debug!(consent = consent.as_str(), "consent recorded");
    Ok(())
}

#[derive(Clone, Copy)]
pub struct Session {
    pub auth: Resource<Result<AuthStatus, ServerFnError>>,
    pub api_url: Resource<Result<String, ServerFnError>>,
    /// Whether this browser has signed in before; only known after hydration.
    pub returning_user: ReadSignal<bool>,
}

impl Session {
    pub fn auth_status(&self) -> Option<AuthStatus> {
        self.auth
            .get()
            .map(|res| res.unwrap_or(AuthStatus::Unavailable))
    }

    pub fn api_url(&self) -> Option<String> {
        self.api_url.get().and_then(Result::ok)
    }
}

pub fn provide_session() -> Session {
    let auth = Resource::new(|| (), |_| check_auth());
    let api_url = Resource::new(|| (), |_| public_api_url());
    let (returning_user, set_returning_user) = signal(false);

    #[cfg(feature = "hydrate")]
    {
        use crate::auth::{RETURNING_USER_KEY, RETURNING_USER_VALUE};
        use codee::string::FromToStringCodec;
        use leptos_use::storage::use_local_storage;

        let (stored, set_stored, clear_stored) =
            use_local_storage::<String, FromToStringCodec>(RETURNING_USER_KEY);

        // effects only run in the browser, so SSR and hydration agree on `false`
        Effect::new(move |_| set_returning_user.set(stored.get() == RETURNING_USER_VALUE));

        Effect::new(move |_| {
            let Some(status) = auth.get().map(|r| r.unwrap_or(AuthStatus::Unavailable)) else {
                return;
            };
            match status.returning_user_update() {
                Some(true) => set_stored.set(RETURNING_USER_VALUE.to_string()),
                Some(false) => clear_stored(),
                None => {}
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = set_returning_user;

    let session = Session {
        auth,
        api_url,
        returning_user,
    };
    provide_context(session);
    session
}

pub fn use_session() -> Session {
    expect_context::<Session>()
}
