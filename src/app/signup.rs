use leptos::{either::Either, prelude::*};

use crate::subscribe::{SubscriptionType, SIGNUP_ERROR_MESSAGE};

/// Same validation and MailerLite call as `POST /api/subscribe`.
#[server]
pub async fn subscribe_newsletter(email: String, kind: String) -> Result<String, ServerFnError> {
    use crate::subscribe::{subscribe_with, SubscribeRequest};

    let state = super::session::site_state()?;
    let request = SubscribeRequest {
        email: Some(email),
        kind: Some(kind),
    };
    match subscribe_with(&state, &request).await {
        Ok(kind) => Ok(kind.success_message().to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "newsletter signup failed");
            Err(ServerFnError::new(e))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SignupStatus {
    Idle,
    Loading,
    Success(String),
    Error,
}

#[component]
pub fn SignupForm(
    kind: SubscriptionType,
    #[prop(into)] button_label: String,
    #[prop(default = "w-full px-4 py-3 rounded-md bg-purple-600 hover:bg-purple-700 text-white font-medium disabled:opacity-60")]
    button_class: &'static str,
) -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let action = ServerAction::<SubscribeNewsletter>::new();

    let status = move || {
        if action.pending().get() {
            return SignupStatus::Loading;
        }
        match action.value().get() {
            None => SignupStatus::Idle,
            Some(Ok(message)) => SignupStatus::Success(message),
            Some(Err(_)) => SignupStatus::Error,
        }
    };

    Effect::new(move |_| {
        if let Some(Ok(_)) = action.value().get() {
            set_email.set(String::new());
        }
    });

    view! {
        <form
            class="space-y-4"
            on:submit=move |ev| {
                ev.prevent_default();
                action
                    .dispatch(SubscribeNewsletter {
                        email: email.get_untracked(),
                        kind: kind.as_str().to_string(),
                    });
            }
        >
            <input
                class="w-full px-4 py-3 rounded-md border border-white/20 bg-background text-foreground placeholder-muted focus:outline-none focus:ring-2 focus:ring-purple-500"
                placeholder="Your Email Address"
                type="email"
                name="email"
                required
                prop:value=email
                on:input=move |ev| set_email.set(event_target_value(&ev))
                disabled=move || status() == SignupStatus::Loading
            />
            <button
                class=button_class
                type="submit"
                disabled=move || status() == SignupStatus::Loading
            >
                {move || {
                    if status() == SignupStatus::Loading {
                        "Submitting...".to_string()
                    } else {
                        button_label.clone()
                    }
                }}
            </button>
            {move || match status() {
                SignupStatus::Success(message) => {
                    Some(
                        Either::Left(
                            view! {
                                <div class="p-4 bg-green-100 text-green-800 rounded-lg text-center">
                                    {message}
                                </div>
                            },
                        ),
                    )
                }
                SignupStatus::Error => {
                    Some(
                        Either::Right(
                            view! {
                                <div class="p-4 bg-red-100 text-red-800 rounded-lg text-center">
                                    {SIGNUP_ERROR_MESSAGE}
                                </div>
                            },
                        ),
                    )
                }
                SignupStatus::Idle | SignupStatus::Loading => None,
            }}
        </form>
    }
}
