use leptos::prelude::*;
use leptos_meta::Title;

use super::signup::SignupForm;
use crate::subscribe::SubscriptionType;

#[component]
fn ProofItem(
    #[prop(into)] title: String,
    #[prop(into)] text: String,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center">
            {children()}
            <h3 class="text-lg font-semibold">{title}</h3>
            <p class="text-sm text-muted">{text}</p>
        </div>
    }
}

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <Title text="Request Early Access" />
        <div class="max-w-7xl mx-auto px-4 py-6 text-center">
            <h1 class="text-2xl font-bold tracking-tight sm:text-3xl bg-clip-text text-transparent bg-gradient-to-r pb-6 from-amber-600 to-emerald-600">
                "9 out of 10 applications are met with rejection or silence."
            </h1>
            <p class="text-4xl font-bold tracking-tight sm:text-6xl bg-clip-text text-transparent bg-gradient-to-r pb-6 from-amber-600 to-emerald-600">
                "We're building the platform to make yours the one they can't ignore."
            </p>
            <p class="mt-6 text-lg leading-8 text-muted">
                "We're creating a new tool for ambitious professionals, combining a smart application tracker with a game that gets you real feedback. Our private beta is currently full, but you can request early access to our next release."
            </p>
            <div class="mt-10 flex items-center justify-center gap-x-6">
                <a
                    href="#waitlist"
                    class="px-6 py-3 rounded-xl bg-amber-600 text-white hover:bg-amber-700 text-lg font-medium"
                >
                    "Request Early Access"
                </a>
            </div>
            <p class="mt-4 text-sm text-muted">"Sign up to be first in line when we open more spots."</p>
        </div>

        <div class="bg-white/5 py-12">
            <div class="mx-auto max-w-7xl px-6 lg:px-8 grid grid-cols-1 md:grid-cols-3 gap-8 text-center">
                <ProofItem
                    title="Featured on GitHub"
                    text="As seen on their official YouTube channel with over 500,000 subscribers."
                >
                    <svg class="h-10 w-10 mb-2" fill="none" stroke="currentColor" stroke-width="2" viewBox="0 0 24 24">
                        <path d="M9 19c-5 1.5-5-2.5-7-3m14 6v-3.87a3.37 3.37 0 0 0-.94-2.61c3.14-.35 6.44-1.54 6.44-7A5.44 5.44 0 0 0 20 4.77 5.07 5.07 0 0 0 19.91 1S18.73.65 16 2.48a13.38 13.38 0 0 0-7 0C6.27.65 5.09 1 5.09 1A5.07 5.07 0 0 0 5 4.77a5.44 5.44 0 0 0-1.5 3.78c0 5.42 3.3 6.61 6.44 7A3.37 3.37 0 0 0 9 18.13V22" />
                    </svg>
                </ProofItem>
                <ProofItem
                    title="Trusted by Developers"
                    text="A 42% increase in GitHub stars after our feature, validating our approach."
                >
                    <svg class="h-10 w-10 mb-2 text-amber-500" fill="currentColor" viewBox="0 0 24 24">
                        <polygon points="12 2 15.09 8.26 22 9.27 17 14.14 18.18 21.02 12 17.77 5.82 21.02 7 14.14 2 9.27 8.91 8.26 12 2" />
                    </svg>
                </ProofItem>
                <ProofItem
                    title="Join The Waitlist"
                    text="300+ professionals have already signed up organically to get early access."
                >
                    <svg class="h-10 w-10 mb-2 text-emerald-500" fill="none" stroke="currentColor" stroke-width="2" viewBox="0 0 24 24">
                        <path d="M17 21v-2a4 4 0 0 0-4-4H5a4 4 0 0 0-4 4v2" />
                        <circle cx="9" cy="7" r="4" />
                        <path d="M23 21v-2a4 4 0 0 0-3-3.87" />
                        <path d="M16 3.13a4 4 0 0 1 0 7.75" />
                    </svg>
                </ProofItem>
            </div>
        </div>

        <div class="max-w-4xl mx-auto px-4 py-24">
            <h2 class="text-3xl font-bold tracking-tight sm:text-4xl">
                "The Job Search is Officially Broken. It's Not Just You."
            </h2>
            <p class="mt-6 text-lg leading-8 text-muted">
                "Does this sound familiar? You spend hours tailoring your resume and writing the perfect cover letter, only to send it into a black hole. Days turn into weeks. The only reply is a generic rejection email, or worse, complete silence."
            </p>
            <p class="mt-4 text-lg leading-8 text-muted">"You're not imagining it. The game has changed:"</p>
            <ul class="mt-6 space-y-4 text-muted">
                <li>
                    <strong class="font-semibold text-foreground">"It's 3x more competitive: "</strong>
                    "The number of applications per hire has tripled since early 2021. (Source: AshbyHQ)"
                </li>
                <li>
                    <strong class="font-semibold text-foreground">"It's overwhelming: "</strong>
                    "Our research shows 77% of job seekers use over three different tools to manage a process 64% already find frustrating."
                </li>
                <li>
                    <strong class="font-semibold text-foreground">"It's leading to burnout: "</strong>
                    "64% of applicants report feeling exhausted and stuck. (Source: Huntr)"
                </li>
            </ul>
            <p class="mt-6 text-lg leading-8 text-muted">
                "You're left wondering, \"Is my experience not good enough?\" when the real problem is you're playing a game with no rules and no scoreboard."
            </p>
        </div>

        <section id="waitlist" class="max-w-2xl mx-auto px-4 pb-24 text-center scroll-mt-24">
            <h2 class="text-3xl font-bold tracking-tight sm:text-4xl">
                "Get the Unfair Advantage in Your Job Search"
            </h2>
            <p class="mt-6 text-lg leading-8 text-muted">
                "Join 300+ ambitious professionals on the priority list. We'll give you early access to the tools that turn your hidden achievements into your next big opportunity. Your search is 100% confidential."
            </p>
            <div class="mt-8 text-left">
                <SignupForm
                    kind=SubscriptionType::Founding
                    button_label="Request Early Access"
                    button_class="w-full px-4 py-3 rounded-md bg-amber-600 hover:bg-amber-700 text-white font-medium disabled:opacity-60"
                />
            </div>
        </section>
    }
}
