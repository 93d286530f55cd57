use leptos::{either::EitherOf3, prelude::*};
use leptos_router::components::A;

use super::session::use_session;
use crate::auth::{login_url, NavCta};

const PRIMARY_BUTTON: &str =
    "inline-flex items-center px-4 py-2 rounded-md bg-amber-600 text-white hover:bg-amber-700 font-medium transition-colors";
const GOOGLE_BUTTON: &str =
    "inline-flex items-center gap-2 px-4 py-2 rounded-md border border-gray-300 bg-white text-gray-700 hover:bg-gray-50 font-medium transition-colors";

#[component]
pub fn GoogleIcon() -> impl IntoView {
    view! {
        <svg class="h-4 w-4" viewBox="0 0 24 24" aria-hidden="true">
            <path
                fill="#4285F4"
                d="M22.56 12.25c0-.78-.07-1.53-.2-2.25H12v4.26h5.92c-.26 1.37-1.04 2.53-2.21 3.31v2.77h3.57c2.08-1.92 3.28-4.74 3.28-8.09z"
            />
            <path
                fill="#34A853"
                d="M12 23c2.97 0 5.46-.98 7.28-2.66l-3.57-2.77c-.98.66-2.23 1.06-3.71 1.06-2.86 0-5.29-1.93-6.16-4.53H2.18v2.84C3.99 20.53 7.7 23 12 23z"
            />
            <path
                fill="#FBBC05"
                d="M5.84 14.09c-.22-.66-.35-1.36-.35-2.09s.13-1.43.35-2.09V7.07H2.18C1.43 8.55 1 10.22 1 12s.43 3.45 1.18 4.93l2.85-2.22.81-.62z"
            />
            <path
                fill="#EA4335"
                d="M12 5.38c1.62 0 3.06.56 4.21 1.64l3.15-3.15C17.45 2.09 14.97 1 12 1 7.7 1 3.99 3.47 2.18 7.07l3.66 2.84c.87-2.6 3.3-4.53 6.16-4.53z"
            />
        </svg>
    }
}

/// Login link to the backend's OAuth entry point.
#[component]
pub fn LoginWithGoogle() -> impl IntoView {
    let session = use_session();
    let href = move || {
        session
            .api_url()
            .map(|url| login_url(&url))
            .unwrap_or_default()
    };
    view! {
        <a href=href rel="external" class=GOOGLE_BUTTON>
            <GoogleIcon />
            "Login with Google"
        </a>
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let cta = move || {
        session
            .auth_status()
            .map(|status| NavCta::choose(status, session.returning_user.get()))
    };

    view! {
        <nav class="sticky top-0 z-40 border-b border-white/10 bg-background/95 backdrop-blur">
            <div class="max-w-7xl mx-auto px-4 py-3 flex items-center justify-between">
                <A href="/" attr:class="flex items-center gap-3">
                    <img alt="Just A Job App logo" class="h-12 w-12 object-contain" src="/logo.svg" />
                    <div class="flex flex-col">
                        <span class="text-xl md:text-2xl font-bold bg-clip-text text-transparent bg-gradient-to-r from-amber-600 to-emerald-600">
                            "Just A Job App"
                        </span>
                        <span class="text-xs text-muted -mt-1 hidden sm:block">
                            "Get the Unfair Advantage in Your Job Search."
                        </span>
                    </div>
                </A>
                <Transition fallback=|| ()>
                    {move || {
                        cta()
                            .map(|cta| match cta {
                                NavCta::Logout => {
                                    EitherOf3::A(
                                        view! {
                                            <A href="/logout" attr:class=PRIMARY_BUTTON>
                                                "Logout"
                                            </A>
                                        },
                                    )
                                }
                                NavCta::LoginWithGoogle => EitherOf3::B(view! { <LoginWithGoogle /> }),
                                NavCta::RequestEarlyAccess => {
                                    EitherOf3::C(
                                        view! {
                                            <a href="#waitlist" class=PRIMARY_BUTTON>
                                                "Request Early Access"
                                            </a>
                                        },
                                    )
                                }
                            })
                    }}
                </Transition>
            </div>
        </nav>
    }
}
