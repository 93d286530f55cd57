use leptos::prelude::*;
use leptos_meta::Title;

use super::session::use_session;

#[cfg(feature = "hydrate")]
const LOGOUT_DELAY: std::time::Duration = std::time::Duration::from_millis(600);

/// Shows a short notice, then hands over to the backend's logout endpoint.
#[component]
pub fn LogoutPage() -> impl IntoView {
    let session = use_session();

    #[cfg(feature = "hydrate")]
    Effect::new(move |scheduled: Option<bool>| {
        if scheduled == Some(true) {
            return true;
        }
        let Some(api_url) = session.api_url() else {
            return false;
        };
        let target = crate::auth::logout_url(&api_url);
        set_timeout(
            move || {
                if let Err(e) = window().location().set_href(&target) {
                    log::error!("logout redirect failed: {e:?}");
                }
            },
            LOGOUT_DELAY,
        );
        true
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = session;

    view! {
        <Title text="Logging out" />
        <div class="min-h-[70vh] flex items-center justify-center px-4">
            <div class="max-w-md w-full p-8 text-center rounded-xl bg-gradient-to-br from-amber-950/30 to-emerald-950/30 border border-amber-800/50">
                <div class="flex flex-col items-center gap-4">
                    <img alt="Logo" src="/logo.svg" class="h-12 w-12" />
                    <h1 class="text-2xl font-semibold bg-clip-text text-transparent bg-gradient-to-r from-amber-600 to-emerald-600">
                        "Logging you out"
                    </h1>
                    <p class="text-muted">"Please wait a moment…"</p>
                    <div class="mt-2 h-8 w-8 animate-spin rounded-full border-2 border-emerald-500 border-t-transparent" />
                </div>
            </div>
        </div>
    }
}
