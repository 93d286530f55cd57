//! Session handling is delegated to the backend; this module only interprets
//! its answers.

use serde::{Deserialize, Serialize};

/// Local storage key remembering that this browser has signed in before.
pub const RETURNING_USER_KEY: &str = "hasLoggedInBefore";
pub const RETURNING_USER_VALUE: &str = "1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthStatus {
    Authenticated,
    Unauthorized,
    /// The backend failed or could not be reached.
    Unavailable,
}

impl AuthStatus {
    /// Interprets the status code of `GET {api}/me`.
    pub fn from_status(code: u16) -> Self {
        match code {
            200..=299 => AuthStatus::Authenticated,
            401 => AuthStatus::Unauthorized,
            _ => AuthStatus::Unavailable,
        }
    }

    pub fn is_authenticated(self) -> bool {
        self == AuthStatus::Authenticated
    }

    /// What a session check means for the returning-user flag.
    pub fn returning_user_update(self) -> Option<bool> {
        match self {
            AuthStatus::Authenticated => Some(true),
            AuthStatus::Unauthorized => Some(false),
            AuthStatus::Unavailable => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCta {
    Logout,
    LoginWithGoogle,
    RequestEarlyAccess,
}

impl NavCta {
    pub fn choose(auth: AuthStatus, returning_user: bool) -> Self {
        if auth.is_authenticated() {
            NavCta::Logout
        } else if returning_user {
            NavCta::LoginWithGoogle
        } else {
            NavCta::RequestEarlyAccess
        }
    }
}

pub fn login_url(api_url: &str) -> String {
    format!("{}/login", api_url.trim_end_matches('/'))
}

pub fn logout_url(api_url: &str) -> String {
    format!("{}/logout", api_url.trim_end_matches('/'))
}
