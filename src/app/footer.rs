use leptos::prelude::*;
use leptos_router::components::A;

use super::navbar::LoginWithGoogle;

/// Year of the build, from the RFC 3339 timestamp written by build.rs.
fn copyright_year() -> &'static str {
    env!("BUILD_TIME").get(..4).unwrap_or("2025")
}

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="border-t border-white/10 py-12 bg-background/95 backdrop-blur">
            <div class="max-w-7xl mx-auto px-4">
                <div class="grid grid-cols-1 md:grid-cols-3 gap-8 text-center md:text-left">
                    <div>
                        <h3 class="text-lg font-semibold mb-4 text-emerald-600">"Just A Job App"</h3>
                        <p class="text-muted mb-4">"Stop Dreading Your Job Search."</p>
                    </div>
                    <div>
                        <h3 class="text-lg font-semibold mb-4 text-emerald-600">
                            "Get the System Behind a 3x Interview Rate."
                        </h3>
                        <p class="text-muted mb-4">
                            "Join 300+ ambitious professionals who want to take back their time and focus on what actually matters: landing the offer."
                        </p>
                        <a
                            class="inline-flex items-center px-4 py-2 text-sm font-medium rounded-md text-black bg-yellow-400 hover:bg-yellow-500 transition-colors duration-200"
                            href="https://www.buymeacoffee.com/justajobapp"
                            rel="noopener noreferrer"
                            target="_blank"
                        >
                            <span class="mr-2">"☕"</span>
                            "Buy us a coffee"
                        </a>
                    </div>
                    <div>
                        <h3 class="text-lg font-semibold mb-4 text-emerald-600">
                            "Already a Beta Tester?"
                        </h3>
                        <p class="text-muted mb-4">"Log In Below."</p>
                        <LoginWithGoogle />
                    </div>
                </div>
                <div class="mt-12 pt-6 border-t border-white/10 text-center text-sm text-muted">
                    <div class="flex justify-center gap-6">
                        <A href="/privacy" attr:class="hover:text-foreground">"Privacy Policy"</A>
                        <A href="/cookies" attr:class="hover:text-foreground">"Cookie Policy"</A>
                        <A href="/dsar" attr:class="hover:text-foreground">"Your Privacy Choices"</A>
                    </div>
                    <p class="mt-2 text-amber-600 font-medium">
                        {format!("© {} Just A Job App", copyright_year())}
                    </p>
                </div>
            </div>
        </footer>
    }
}
