use leptos::prelude::*;
use leptos_meta::Title;

use super::signup::SignupForm;
use crate::subscribe::SubscriptionType;

const CARD: &str = "rounded-xl border border-white/10 bg-white/5 p-6";

#[component]
fn Section(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <section class="max-w-4xl mx-auto py-12">
            <h2 class="text-3xl font-bold text-center mb-8">{title}</h2>
            {children()}
        </section>
    }
}

#[component]
fn Checklist(
    items: &'static [&'static str],
    mark: &'static str,
    mark_class: &'static str,
) -> impl IntoView {
    view! {
        <ul class="space-y-3 text-muted">
            {items
                .iter()
                .map(|item| {
                    view! {
                        <li class="flex items-start gap-2">
                            <span class=mark_class>{mark}</span>
                            <span>{*item}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}

const FOR_YOU: &[&str] = &[
    "You're so frustrated with the job search you're willing to try a radically new approach.",
    "You're excited by the idea of shaping a product from the very beginning.",
    "You're willing to offer feedback on early, imperfect, and even buggy prototypes.",
    "You believe a clear, confident message is the key to a better job search.",
];

const NOT_FOR_YOU: &[&str] = &[
    "You're looking for a polished, feature-complete tool to use today.",
    "You don't have time to provide feedback or join occasional feedback sessions.",
    "You're happy with the current \"spray and pray\" job application process.",
];

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Title text="Help Fix the Job Search" />
        <div class="max-w-7xl mx-auto px-4 py-6 space-y-16">
            <section class="max-w-4xl mx-auto text-center py-12">
                <h1 class="text-4xl md:text-6xl font-bold mb-6 bg-clip-text text-transparent bg-gradient-to-r from-purple-600 to-indigo-600 leading-normal">
                    "Your LinkedIn Profile Says \"Seeking New Opportunities.\" That's a Cry for Help, Not a Strategy."
                </h1>
                <p class="text-xl md:text-2xl text-muted mb-10 max-w-3xl mx-auto">
                    "The job search is broken. I have a blueprint for a tool that focuses on what truly matters, clarity and human connection, but it's not built yet. I'm looking for frustrated job seekers to help me create it."
                </p>
                <a
                    href="#waitlist"
                    class="inline-block bg-purple-600 hover:bg-purple-700 text-white px-8 py-4 text-lg rounded-xl"
                >
                    "Help Fix the Job Search"
                </a>
            </section>

            <Section title="Why Your Job Search Feels Hopeless">
                <div class="prose prose-invert prose-lg mx-auto">
                    <p class="text-xl mb-4">"It's not your experience. It's the broken process."</p>
                    <p class="mb-4">
                        "You're told to \"network,\" but you don't know what to say. You're asked, \"What are you looking for?\" and you give a vague answer. You \"spray and pray,\" sending hundreds of applications into a black hole, feeling more dejected with every automated rejection."
                    </p>
                    <p>
                        "This isn't a personal failure; it's a system failure. The current tools are designed for tracking busywork, not for building clarity or leveraging the real relationships that lead to offers."
                    </p>
                </div>
            </Section>

            <Section title="From a Clear Message to a Landed Offer">
                <div class="prose prose-invert prose-lg mx-auto">
                    <p class="mb-4">
                        "This isn't just about another app. This is a mission to build a smarter, more humane way to find a job. The vision starts with a simple, powerful idea: "
                        <strong>"Clarity is your unfair advantage."</strong>
                    </p>
                    <p class="mb-4">
                        "But a powerful message is just the beginning. It's the key that unlocks the rest of the process: focusing your efforts, leveraging your network, and managing the conversations that lead to offers."
                    </p>
                    <p>
                        "Our mission is to build a single tool that guides you through that entire journey. A tool I wish I had, and with your help, we can finally build it."
                    </p>
                </div>
            </Section>

            <Section title="The Blueprint: From a Messy Brain Dump to a Killer One-Liner.">
                <p class="text-center text-muted mb-8">
                    "This isn't ready yet, but here is the three-step process we are designing. Founding members will be the first to test it and provide feedback."
                </p>
                <div class="grid md:grid-cols-3 gap-8">
                    <div class=CARD>
                        <h3 class="text-xl font-semibold mb-4">"Step 1: Your Raw Thoughts"</h3>
                        <p class="text-muted mb-4">
                            "The journey will begin with you telling the system everything that's on your mind: your skills, your confusing job titles, your vague ideas about company size."
                        </p>
                        <div class="bg-white/10 p-4 rounded-lg">
                            <p class="text-sm italic">
                                "THE INPUT: \"I'm a mobile developer with around 10 years in HCM/CPG, looking for my next role.\""
                            </p>
                        </div>
                    </div>
                    <div class=CARD>
                        <h3 class="text-xl font-semibold mb-4">
                            "Step 2: Guided Questions to Find Your Focus"
                        </h3>
                        <p class="text-muted">
                            "The system will then ask you simple, clarifying questions to translate your jargon and nail down your specifics on experience, industry, and ideal work environment."
                        </p>
                    </div>
                    <div class=CARD>
                        <h3 class="text-xl font-semibold mb-4">
                            "Step 3: Your Polished, Powerful \"After\""
                        </h3>
                        <p class="text-muted mb-4">
                            "The generator will instantly provide a clear, confident statement you can use on your LinkedIn profile, in your resume, and in every networking message."
                        </p>
                        <div class="bg-white/10 p-4 rounded-lg">
                            <p class="text-sm italic">
                                "THE GOAL: \"Senior mobile engineer with experience in HR and retail software, seeking a native Android developer role at a mid-sized company in the Denver area.\""
                            </p>
                        </div>
                    </div>
                </div>
            </Section>

            <Section title="Are You One of Us?">
                <div class="grid md:grid-cols-2 gap-8">
                    <div class=CARD>
                        <h3 class="text-xl font-semibold mb-4 text-green-600">"This is for you if:"</h3>
                        <Checklist items=FOR_YOU mark="✓" mark_class="text-green-500" />
                    </div>
                    <div class=CARD>
                        <h3 class="text-xl font-semibold mb-4 text-red-600">"This is NOT for you if:"</h3>
                        <Checklist items=NOT_FOR_YOU mark="✗" mark_class="text-red-500" />
                    </div>
                </div>
            </Section>

            <Section title="This Started as a Sketch in My Notebook.">
                <div class="prose prose-invert prose-lg mx-auto">
                    <p class="mb-4">
                        "My name is Lianna Novitz, and after my own soul-crushing job search post-layoff, I became obsessed with finding a better way. Just a Job App (JAJA) is my answer."
                    </p>
                    <p class="mb-4">
                        "To be perfectly clear: the tool I've described on this page is still a vision. The code isn't finished. The features aren't built. Right now, it's a blueprint and a passionate belief that we can fix this."
                    </p>
                    <p>
                        "I'm not asking you to buy a product. I'm asking you to believe in a mission and to join a small, dedicated group of founding jobseekers to help me build it right. Your voice and your experience are more valuable than any line of code I could write right now."
                    </p>
                </div>
            </Section>

            <section id="waitlist" class="max-w-4xl mx-auto py-12 scroll-mt-24">
                <h2 class="text-3xl font-bold text-center mb-8">"Help Fix the Job Search"</h2>
                <div class="grid md:grid-cols-2 gap-8">
                    <div class=CARD>
                        <h3 class="text-xl font-semibold mb-4">"Option 1: Become an Insider"</h3>
                        <p class="text-muted mb-6">
                            "Tired of applying into a black hole? Get exclusive access to our private beta and help shape a tool that puts jobseekers first."
                        </p>
                        <SignupForm kind=SubscriptionType::Founding button_label="I Want Insider Access" />
                    </div>
                    <div class=CARD>
                        <h3 class="text-xl font-semibold mb-4">"Option 2: Follow the Launch"</h3>
                        <p class="text-muted mb-6">
                            "Want to see if we can actually build a better way to find work? Sign up and we'll only email you with major milestone updates."
                        </p>
                        <SignupForm
                            kind=SubscriptionType::Updates
                            button_label="Keep Me Posted"
                            button_class="w-full px-4 py-3 rounded-md border border-white/30 hover:bg-white/10 font-medium disabled:opacity-60"
                        />
                    </div>
                </div>
            </section>
        </div>
    }
}
