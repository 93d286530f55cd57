use leptos::{prelude::*, task::spawn_local};

use super::session::{consent_recorded, set_consent};
use crate::consent::Consent;

/// Asks for analytics consent until the visitor decides.
#[component]
pub fn ConsentBanner() -> impl IntoView {
    let recorded = Resource::new(|| (), |_| consent_recorded());
    let (dismissed, set_dismissed) = signal(false);

    let visible = move || {
        !dismissed.get() && matches!(recorded.get(), Some(Ok(false)))
    };

    let decide = move |consent: Consent| {
        set_dismissed.set(true);
        spawn_local(async move {
            match set_consent(consent).await {
                // analytics are wired into the page head, so a reload starts them
                Ok(()) if consent == Consent::Accepted => {
                    if let Err(e) = window().location().reload() {
                        log::error!("reload after consent failed: {e:?}");
                    }
                }
                Ok(()) => {}
                Err(e) => log::error!("saving consent failed: {e}"),
            }
        });
    };

    view! {
        <Transition fallback=|| ()>
            <Show when=visible>
                <div class="fixed bottom-0 left-0 right-0 z-50 p-4">
                    <div class="mx-auto max-w-7xl rounded-xl bg-gray-900 border border-gray-700 p-6">
                        <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-4">
                            <div class="flex-1">
                                <h3 class="text-lg font-semibold text-white mb-2">
                                    "Privacy & Analytics Consent"
                                </h3>
                                <p class="text-sm text-gray-300 leading-relaxed">
                                    "We use analytics (PostHog) to understand how you use our app and improve your experience. We respect your privacy and do not share your data with third parties for advertising. "
                                    <a
                                        class="text-blue-400 hover:text-blue-300 underline transition-colors"
                                        href="/privacy"
                                    >
                                        "Learn more"
                                    </a>
                                    "."
                                </p>
                            </div>
                            <div class="flex gap-3 md:flex-shrink-0">
                                <button
                                    class="px-3 py-1.5 rounded-md bg-gray-700 hover:bg-gray-600 text-white text-sm font-medium"
                                    on:click=move |_| decide(Consent::Declined)
                                >
                                    "Decline"
                                </button>
                                <button
                                    class="px-3 py-1.5 rounded-md bg-emerald-600 hover:bg-emerald-700 text-white text-sm font-medium"
                                    on:click=move |_| decide(Consent::Accepted)
                                >
                                    "Accept"
                                </button>
                            </div>
                        </div>
                    </div>
                </div>
            </Show>
        </Transition>
    }
}
