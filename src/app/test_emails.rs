//! Admin panel for the backend's test emails and demo mode.

use leptos::{either::Either, prelude::*, task::spawn_local};
use leptos::server_fn::codec::{GetUrl, Json};
use leptos_meta::Title;
use leptos_router::components::A;
use serde::{Deserialize, Serialize};

use super::toast::{use_toasts, ToastKind};
use crate::model::{
    demo_mode_active, DemoModeChange, TestEmail, TestEmailDraft, APPLICATION_STATUSES,
};

const LOGIN_REQUIRED: &str = "Please log in to toggle developer mode";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DemoToggle {
    Changed(DemoModeChange),
    LoginRequired,
}

#[server(input = GetUrl)]
pub async fn list_test_emails() -> Result<Vec<TestEmail>, ServerFnError> {
    use super::session::{site_state, visitor_cookie};

    site_state()?
        .backend
        .test_emails(visitor_cookie().as_ref())
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "listing test emails failed");
            ServerFnError::new(e)
        })
}

#[server(input = GetUrl)]
pub async fn search_test_emails(query: String) -> Result<Vec<TestEmail>, ServerFnError> {
    use super::session::{site_state, visitor_cookie};

    site_state()?
        .backend
        .search_test_emails(visitor_cookie().as_ref(), query.trim())
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, query = %query, "searching test emails failed");
            ServerFnError::new(e)
        })
}

#[server(input = GetUrl)]
pub async fn test_email_categories() -> Result<Vec<String>, ServerFnError> {
    use super::session::{site_state, visitor_cookie};

    site_state()?
        .backend
        .test_email_categories(visitor_cookie().as_ref())
        .await
        .map_err(ServerFnError::new)
}

#[server(input = Json)]
pub async fn add_test_email(draft: TestEmailDraft) -> Result<String, ServerFnError> {
    use super::session::{site_state, visitor_cookie};

    if let Some(field) = draft.missing_field() {
        return Err(ServerFnError::new(format!("{field} is required")));
    }
    let id = site_state()?
        .backend
        .add_test_email(visitor_cookie().as_ref(), &draft)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "adding test email failed");
            ServerFnError::new(e)
        })?;
    tracing::info!(id = %id, "test email added");
    Ok(id)
}

#[server(input = Json)]
pub async fn update_test_email(id: String, draft: TestEmailDraft) -> Result<(), ServerFnError> {
    use super::session::{site_state, visitor_cookie};

    if let Some(field) = draft.missing_field() {
        return Err(ServerFnError::new(format!("{field} is required")));
    }
    site_state()?
        .backend
        .update_test_email(visitor_cookie().as_ref(), &id, &draft)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, id = %id, "updating test email failed");
            ServerFnError::new(e)
        })
}

#[server]
pub async fn delete_test_email(id: String) -> Result<(), ServerFnError> {
    use super::session::{site_state, visitor_cookie};

    site_state()?
        .backend
        .delete_test_email(visitor_cookie().as_ref(), &id)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, id = %id, "deleting test email failed");
            ServerFnError::new(e)
        })
}

#[server]
pub async fn set_demo_mode(enabled: bool) -> Result<DemoToggle, ServerFnError> {
    use super::session::{site_state, visitor_cookie};
    use crate::backend::BackendError;

    match site_state()?
        .backend
        .set_demo_mode(visitor_cookie().as_ref(), enabled)
        .await
    {
        Ok(change) => {
            tracing::info!(enabled, loaded = change.loaded_count, "demo mode changed");
            Ok(DemoToggle::Changed(change))
        }
        Err(BackendError::Unauthorized) => Ok(DemoToggle::LoginRequired),
        Err(e) => {
            tracing::error!(error = %e, enabled, "demo mode toggle failed");
            Err(ServerFnError::new(e))
        }
    }
}

async fn fetch_test_emails(query: String) -> Result<Vec<TestEmail>, ServerFnError> {
    if query.trim().is_empty() {
        list_test_emails().await
    } else {
        search_test_emails(query).await
    }
}

/// Editable fields of a [`TestEmailDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DraftField {
    CompanyName,
    ApplicationStatus,
    JobTitle,
    Subject,
    EmailFrom,
    EmailBody,
    Category,
    Notes,
}

impl DraftField {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "company_name" => DraftField::CompanyName,
            "application_status" => DraftField::ApplicationStatus,
            "job_title" => DraftField::JobTitle,
            "subject" => DraftField::Subject,
            "email_from" => DraftField::EmailFrom,
            "email_body" => DraftField::EmailBody,
            "category" => DraftField::Category,
            "notes" => DraftField::Notes,
            _ => return None,
        })
    }

    fn label(self) -> &'static str {
        match self {
            DraftField::CompanyName => "Company Name",
            DraftField::ApplicationStatus => "Application Status",
            DraftField::JobTitle => "Job Title",
            DraftField::Subject => "Subject",
            DraftField::EmailFrom => "From Email",
            DraftField::EmailBody => "Email Body",
            DraftField::Category => "Category",
            DraftField::Notes => "Notes (Optional)",
        }
    }

    fn get(self, draft: &TestEmailDraft) -> String {
        match self {
            DraftField::CompanyName => draft.company_name.clone(),
            DraftField::ApplicationStatus => draft.application_status.clone(),
            DraftField::JobTitle => draft.job_title.clone(),
            DraftField::Subject => draft.subject.clone(),
            DraftField::EmailFrom => draft.email_from.clone(),
            DraftField::EmailBody => draft.email_body.clone(),
            DraftField::Category => draft.category.clone().unwrap_or_default(),
            DraftField::Notes => draft.notes.clone().unwrap_or_default(),
        }
    }

    /// Blank optional fields are stored as `None` so they are left out of the request.
    fn set(self, draft: &mut TestEmailDraft, value: String) {
        let optional = |v: String| (!v.trim().is_empty()).then_some(v);
        match self {
            DraftField::CompanyName => draft.company_name = value,
            DraftField::ApplicationStatus => draft.application_status = value,
            DraftField::JobTitle => draft.job_title = value,
            DraftField::Subject => draft.subject = value,
            DraftField::EmailFrom => draft.email_from = value,
            DraftField::EmailBody => draft.email_body = value,
            DraftField::Category => draft.category = optional(value),
            DraftField::Notes => draft.notes = optional(value),
        }
    }
}

const INPUT: &str = "w-full rounded-md bg-white/5 border border-white/20 px-3 py-2 text-sm focus:outline-none focus:border-amber-600";
const BUTTON: &str = "px-3 py-2 rounded-md border border-white/20 hover:bg-white/10 text-sm disabled:opacity-50";

#[component]
fn DraftInput(
    form: RwSignal<TestEmailDraft>,
    field: DraftField,
    placeholder: &'static str,
    #[prop(optional)] multiline: bool,
    #[prop(optional)] list: Option<&'static str>,
) -> impl IntoView {
    let value = move || form.with(|d| field.get(d));

    view! {
        <label class="block space-y-1">
            <span class="text-sm text-muted">{field.label()}</span>
            {if multiline {
                Either::Left(
                    view! {
                        <textarea
                            class=INPUT
                            rows="6"
                            placeholder=placeholder
                            prop:value=value
                            on:input=move |ev| form.update(|d| field.set(d, event_target_value(&ev)))
                        ></textarea>
                    },
                )
            } else {
                Either::Right(
                    view! {
                        <input
                            class=INPUT
                            type="text"
                            list=list
                            placeholder=placeholder
                            prop:value=value
                            on:input=move |ev| form.update(|d| field.set(d, event_target_value(&ev)))
                        />
                    },
                )
            }}
        </label>
    }
}

#[component]
fn StatusSelect(form: RwSignal<TestEmailDraft>) -> impl IntoView {
    let field = DraftField::ApplicationStatus;
    view! {
        <label class="block space-y-1">
            <span class="text-sm text-muted">{field.label()}</span>
            <select
                class=INPUT
                prop:value=move || form.with(|d| field.get(d))
                on:change=move |ev| form.update(|d| field.set(d, event_target_value(&ev)))
            >
                <option value="">"Select status"</option>
                {APPLICATION_STATUSES
                    .into_iter()
                    .map(|status| view! { <option value=status>{status}</option> })
                    .collect_view()}
            </select>
        </label>
    }
}

#[component]
pub fn TestEmailsPage() -> impl IntoView {
    let toasts = use_toasts();

    let (search, set_search) = signal(String::new());
    let (query, set_query) = signal(String::new());
    let emails = Resource::new(move || query.get(), fetch_test_emails);
    let categories = Resource::new(|| (), |_| test_email_categories());

    let form = RwSignal::new(TestEmailDraft::default());
    let editing = RwSignal::new(None::<String>);
    let form_open = RwSignal::new(false);
    let demo_busy = RwSignal::new(false);

    let demo_active = move || {
        emails
            .get()
            .and_then(Result::ok)
            .is_some_and(|list| demo_mode_active(&list))
    };

    let close_form = move || {
        form_open.set(false);
        editing.set(None);
        form.set(TestEmailDraft::default());
    };

    let open_edit = move |email: &TestEmail| {
        form.set(TestEmailDraft::from(email));
        editing.set(Some(email.id.clone()));
        form_open.set(true);
    };

    let toggle_demo = move |_| {
        let enable = !demo_active();
        demo_busy.set(true);
        spawn_local(async move {
            match set_demo_mode(enable).await {
                Ok(DemoToggle::Changed(change)) if enable => {
                    toasts.push(
                        ToastKind::Success,
                        "Demo Mode Enabled",
                        Some(format!("Loaded {} demo emails", change.loaded_count)),
                    );
                    emails.refetch();
                }
                Ok(DemoToggle::Changed(_)) => {
                    toasts.push(
                        ToastKind::Success,
                        "Demo Mode Disabled",
                        Some("Demo mode has been disabled".to_string()),
                    );
                    emails.refetch();
                }
                Ok(DemoToggle::LoginRequired) => toasts.push(
                    ToastKind::Warning,
                    "Authentication Required",
                    Some(LOGIN_REQUIRED.to_string()),
                ),
                Err(e) => {
                    log::error!("demo mode toggle failed: {e}");
                    let verb = if enable { "enable" } else { "disable" };
                    toasts.push(
                        ToastKind::Danger,
                        "Error",
                        Some(format!("Failed to {verb} demo mode")),
                    );
                }
            }
            demo_busy.set(false);
        });
    };

    let save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = form.get_untracked();
        if let Some(name) = draft.missing_field() {
            let label = DraftField::from_name(name).map_or(name, DraftField::label);
            toasts.push(
                ToastKind::Warning,
                "Missing required field",
                Some(format!("{label} is required")),
            );
            return;
        }
        let id = editing.get_untracked();
        spawn_local(async move {
            let (result, verb, done) = match id {
                Some(id) => (update_test_email(id, draft).await, "update", "updated"),
                None => (add_test_email(draft).await.map(|_| ()), "add", "added"),
            };
            match result {
                Ok(()) => {
                    toasts.push(
                        ToastKind::Success,
                        "Success",
                        Some(format!("Test email {done} successfully")),
                    );
                    close_form();
                    emails.refetch();
                }
                Err(e) => {
                    log::error!("{verb} test email failed: {e}");
                    toasts.push(
                        ToastKind::Danger,
                        "Error",
                        Some(format!("Failed to {verb} test email")),
                    );
                }
            }
        });
    };

    let delete = move |id: String| {
        spawn_local(async move {
            match delete_test_email(id).await {
                Ok(()) => {
                    toasts.push(
                        ToastKind::Success,
                        "Success",
                        Some("Test email deleted successfully".to_string()),
                    );
                    emails.refetch();
                }
                Err(e) => {
                    log::error!("delete test email failed: {e}");
                    toasts.push(
                        ToastKind::Danger,
                        "Error",
                        Some("Failed to delete test email".to_string()),
                    );
                }
            }
        });
    };

    view! {
        <Title text="Test Email Manager" />
        <div class="max-w-7xl mx-auto px-4 py-8 space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Test Email Manager"</h1>
                <A href="/dashboard" attr:class="text-sm text-muted hover:text-foreground">
                    "Back to Dashboard"
                </A>
            </div>

            <div class="rounded-xl border border-white/10 bg-white/5 p-6 flex flex-col md:flex-row md:items-center md:justify-between gap-4">
                <div>
                    <h2 class="text-lg font-semibold">"Demo Mode"</h2>
                    <p class="text-sm text-muted">
                        "Demo mode uses test emails instead of real Gmail data for live presentations."
                    </p>
                </div>
                <Transition fallback=|| ()>
                    <button class=BUTTON disabled=move || demo_busy.get() on:click=toggle_demo>
                        {move || if demo_active() { "Disable Demo" } else { "Enable Demo" }}
                    </button>
                </Transition>
            </div>

            <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-4">
                <form
                    class="flex items-center gap-2 flex-1 max-w-md"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        set_query.set(search.get_untracked());
                    }
                >
                    <input
                        class=INPUT
                        type="search"
                        placeholder="Search emails..."
                        prop:value=search
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                    />
                    <button class=BUTTON type="submit">
                        "Search"
                    </button>
                </form>
                <button
                    class="px-3 py-2 rounded-md bg-emerald-600 hover:bg-emerald-700 text-white text-sm"
                    on:click=move |_| {
                        close_form();
                        form_open.set(true);
                    }
                >
                    "Add Test Email"
                </button>
            </div>

            <Show when=move || form_open.get()>
                <form class="rounded-xl border border-white/10 bg-white/5 p-6 space-y-4" on:submit=save>
                    <h2 class="text-lg font-semibold">
                        {move || {
                            if editing.with(Option::is_some) { "Edit Test Email" } else { "Add Test Email" }
                        }}
                    </h2>
                    <div class="grid md:grid-cols-2 gap-4">
                        <DraftInput form field=DraftField::CompanyName placeholder="Enter company name" />
                        <StatusSelect form />
                        <DraftInput form field=DraftField::JobTitle placeholder="Enter job title" />
                        <DraftInput form field=DraftField::Subject placeholder="Enter email subject" />
                        <DraftInput form field=DraftField::EmailFrom placeholder="Enter sender email" />
                        <DraftInput
                            form
                            field=DraftField::Category
                            placeholder="Select or type a category"
                            list="test-email-categories"
                        />
                    </div>
                    <Transition fallback=|| ()>
                        <datalist id="test-email-categories">
                            {move || {
                                categories
                                    .get()
                                    .and_then(Result::ok)
                                    .unwrap_or_default()
                                    .into_iter()
                                    .map(|c| view! { <option value=c></option> })
                                    .collect_view()
                            }}
                        </datalist>
                    </Transition>
                    <DraftInput
                        form
                        field=DraftField::EmailBody
                        placeholder="Enter email body content"
                        multiline=true
                    />
                    <DraftInput
                        form
                        field=DraftField::Notes
                        placeholder="Add any notes about this test email"
                    />
                    <div class="flex justify-end gap-2">
                        <button class=BUTTON type="button" on:click=move |_| close_form()>
                            "Cancel"
                        </button>
                        <button
                            class="px-3 py-2 rounded-md bg-amber-600 hover:bg-amber-700 text-white text-sm"
                            type="submit"
                        >
                            {move || if editing.with(Option::is_some) { "Update" } else { "Add" }}
                        </button>
                    </div>
                </form>
            </Show>

            <Transition fallback=|| view! { <div class="loading-skeleton h-64 rounded-xl"></div> }>
                {move || Suspend::new(async move {
                    match emails.await {
                        Ok(list) if list.is_empty() => {
                            Either::Left(view! { <p class="text-muted">"No test emails found."</p> }.into_any())
                        }
                        Ok(list) => {
                            Either::Left(
                                view! {
                                    <div class="overflow-x-auto max-h-[32rem] overflow-y-auto rounded-xl border border-white/10">
                                        <table class="w-full text-sm text-left">
                                            <thead class="bg-white/5 text-muted">
                                                <tr>
                                                    <th class="px-4 py-3">"Company"</th>
                                                    <th class="px-4 py-3">"Status"</th>
                                                    <th class="px-4 py-3">"Job Title"</th>
                                                    <th class="px-4 py-3">"Subject"</th>
                                                    <th class="px-4 py-3">"Type"</th>
                                                    <th class="px-4 py-3">"Actions"</th>
                                                </tr>
                                            </thead>
                                            <tbody>
                                                {list
                                                    .into_iter()
                                                    .map(|email| {
                                                        let id = email.id.clone();
                                                        let kind = if email.is_demo_email { "Demo" } else { "Test" };
                                                        let color = crate::charts::status_color(&email.application_status);
                                                        let TestEmail { company_name, application_status, job_title, subject, .. } = email
                                                            .clone();
                                                        view! {
                                                            <tr class="border-t border-white/10">
                                                                <td class="px-4 py-3">{company_name}</td>
                                                                <td class="px-4 py-3">
                                                                    <span class="inline-flex items-center gap-2">
                                                                        <span class="w-2 h-2 rounded-full" style:background-color=color />
                                                                        {application_status}
                                                                    </span>
                                                                </td>
                                                                <td class="px-4 py-3">{job_title}</td>
                                                                <td class="px-4 py-3 truncate max-w-xs">{subject}</td>
                                                                <td class="px-4 py-3">{kind}</td>
                                                                <td class="px-4 py-3 space-x-3 whitespace-nowrap">
                                                                    <button
                                                                        class="text-amber-500 hover:text-amber-400"
                                                                        on:click=move |_| open_edit(&email)
                                                                    >
                                                                        "Edit"
                                                                    </button>
                                                                    <button
                                                                        class="text-red-500 hover:text-red-400"
                                                                        on:click=move |_| delete(id.clone())
                                                                    >
                                                                        "Delete"
                                                                    </button>
                                                                </td>
                                                            </tr>
                                                        }
                                                    })
                                                    .collect_view()}
                                            </tbody>
                                        </table>
                                    </div>
                                }
                                    .into_any(),
                            )
                        }
                        Err(e) => {
                            log::error!("loading test emails failed: {e}");
                            Either::Right(
                                view! {
                                    <div class="text-center py-8">
                                        <p class="text-red-600 mb-4">"Failed to load test emails"</p>
                                        <button class=BUTTON on:click=move |_| emails.refetch()>
                                            "Retry"
                                        </button>
                                    </div>
                                },
                            )
                        }
                    }
                })}
            </Transition>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_field_names_cover_required_fields() {
        for name in [
            "company_name",
            "application_status",
            "subject",
            "job_title",
            "email_from",
            "email_body",
        ] {
            assert!(DraftField::from_name(name).is_some(), "{name}");
        }
        assert_eq!(DraftField::from_name("email_body").map(DraftField::label), Some("Email Body"));
        assert_eq!(DraftField::from_name("id"), None);
    }

    #[test]
    fn test_draft_field_set_optional_blank_is_none() {
        let mut draft = TestEmailDraft::default();
        DraftField::Category.set(&mut draft, "  ".into());
        assert_eq!(draft.category, None);
        DraftField::Category.set(&mut draft, "rejections".into());
        assert_eq!(DraftField::Category.get(&draft), "rejections");
        DraftField::Subject.set(&mut draft, "Your application".into());
        assert_eq!(draft.subject, "Your application");
    }

    #[test]
    fn test_demo_toggle_round_trips_as_json() {
        let toggle = DemoToggle::Changed(DemoModeChange {
            message: "ok".into(),
            loaded_count: 12,
            demo_mode: true,
        });
        let json = serde_json::to_string(&toggle).unwrap();
        assert_eq!(serde_json::from_str::<DemoToggle>(&json).unwrap(), toggle);
    }
}
