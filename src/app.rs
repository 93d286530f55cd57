mod charts;
mod consent_banner;
mod dashboard;
mod footer;
mod homepage;
mod landing;
mod legal;
mod logout;
mod navbar;
mod session;
mod signup;
mod stats_overview;
mod test_emails;
mod toast;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path};

use consent_banner::ConsentBanner;
use dashboard::DashboardPage;
use footer::Footer;
use homepage::HomePage;
use landing::LandingPage;
use legal::LegalPageView;
use logout::LogoutPage;
use navbar::Navbar;
use session::provide_session;
use test_emails::TestEmailsPage;
use toast::{provide_toasts, Toaster};

use crate::legal::LegalPage;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="color-scheme" content="dark" />
                <link rel="icon" type="image/svg+xml" href="/favicon.svg" />
                <link rel="stylesheet" id="leptos" href="/pkg/jaja-site.css" />
                {analytics_script().map(|js| view! { <script inner_html=js></script> })}
                <MetaTags />
            </head>
            <body class="bg-background text-foreground">
                <App />
            </body>
        </html>
    }
}

/// PostHog loader, only when the visitor consented and sent no GPC signal.
#[cfg(feature = "ssr")]
fn analytics_script() -> Option<String> {
    use crate::consent::{
        analytics_decision, consent_from_header, gpc_from_header, posthog_snippet,
        AnalyticsDecision,
    };
    use crate::state::SiteState;
    use http::{header, request::Parts};

    let state = use_context::<SiteState>()?;
    let posthog = state.config.posthog.as_ref()?;
    let parts = use_context::<Parts>()?;
    let cookie = crate::backend::forwarded_cookie(&parts.headers);

    let consent = cookie
        .as_ref()
        .and_then(|v| v.to_str().ok())
        .and_then(consent_from_header);
    let gpc = gpc_from_header(
        parts
            .headers
            .get(header::HeaderName::from_static("sec-gpc"))
            .and_then(|v| v.to_str().ok()),
    );
    match analytics_decision(consent, gpc) {
        AnalyticsDecision::Enable => Some(posthog_snippet(&posthog.key, &posthog.host)),
        AnalyticsDecision::OptOut | AnalyticsDecision::Undecided => None,
    }
}

#[cfg(not(feature = "ssr"))]
fn analytics_script() -> Option<String> {
    None
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();
    provide_toasts();
    provide_session();

    view! {
        <Title formatter=|title| format!("{title} | Just A Job App") />
        <Meta
            name="description"
            content="Get the unfair advantage in your job search. Track every application and see where your search really stands."
        />

        <Router>
            <div class="flex flex-col min-h-screen">
                <Navbar />
                <main class="flex-grow bg-gradient-to-b from-background to-background/95">
                    <Routes fallback=|| view! { <NotFound /> }>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/landing_page") view=LandingPage />
                        <Route path=path!("/dashboard") view=DashboardPage />
                        <Route path=path!("/dashboard/test-emails") view=TestEmailsPage />
                        <Route path=path!("/logout") view=LogoutPage />
                        <Route
                            path=path!("/cookies")
                            view=|| view! { <LegalPageView page=LegalPage::Cookies /> }
                        />
                        <Route
                            path=path!("/privacy")
                            view=|| view! { <LegalPageView page=LegalPage::Privacy /> }
                        />
                        <Route
                            path=path!("/dsar")
                            view=|| view! { <LegalPageView page=LegalPage::Dsar /> }
                        />
                    </Routes>
                </main>
                <Footer />
            </div>
            <ConsentBanner />
            <Toaster />
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    #[cfg(feature = "ssr")]
    if let Some(resp) = use_context::<leptos_axum::ResponseOptions>() {
        resp.set_status(http::StatusCode::NOT_FOUND);
    }
    view! {
        <Title text="Page not found" />
        <div class="min-h-[50vh] flex flex-col items-center justify-center gap-4">
            <h1 class="text-3xl font-bold">"Page not found."</h1>
            <A href="/" attr:class="text-emerald-500 hover:text-emerald-400 underline">
                "Back to the home page"
            </A>
        </div>
    }
}
