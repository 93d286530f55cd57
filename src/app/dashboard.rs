use leptos::{either::Either, prelude::*, task::spawn_local};
use leptos::server_fn::codec::GetUrl;
use leptos_meta::Title;
use leptos_router::{
    components::A,
    hooks::{use_navigate, use_query_map},
    NavigateOptions,
};

use super::charts::{SankeyDiagram, StatusPieChart, WeeklyApplicationsGraph};
use super::stats_overview::StatsOverview;
use super::toast::{use_toasts, ToastKind};
use crate::export::{ExportFailure, ExportKind, EXPORT_KINDS};
use crate::model::{Application, ApplicationsPage, DashboardLoad, Stats};

const LOAD_ERROR: &str = "Failed to load applications";
const NO_APPLICATIONS: &str = "No applications found";

#[server(input = GetUrl)]
pub async fn load_dashboard(page: u32) -> Result<DashboardLoad, ServerFnError> {
    use super::session::{site_state, visitor_cookie};
    use crate::backend::BackendError;

    let state = site_state()?;
    let cookie = visitor_cookie();
    if !state
        .backend
        .check_session(cookie.as_ref())
        .await
        .is_authenticated()
    {
        return Ok(DashboardLoad::Unauthenticated);
    }

    match state.backend.applications(cookie.as_ref(), page.max(1)).await {
        Ok(page) => Ok(DashboardLoad::Loaded(page)),
        Err(BackendError::NotFound) => Ok(DashboardLoad::NoApplications),
        Err(BackendError::Unauthorized) => Ok(DashboardLoad::Unauthenticated),
        Err(e) => {
            tracing::error!(error = %e, page, "loading applications failed");
            Err(ServerFnError::new(LOAD_ERROR))
        }
    }
}

#[server(input = GetUrl)]
pub async fn load_stats() -> Result<Stats, ServerFnError> {
    use super::session::{site_state, visitor_cookie};

    let state = site_state()?;
    state
        .backend
        .stats(visitor_cookie().as_ref())
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "loading stats failed");
            ServerFnError::new(e)
        })
}

#[server]
pub async fn remove_application(id: String) -> Result<(), ServerFnError> {
    use super::session::{site_state, visitor_cookie};

    let state = site_state()?;
    state
        .backend
        .delete_application(visitor_cookie().as_ref(), &id)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, id = %id, "removing application failed");
            ServerFnError::new(e)
        })?;
    tracing::info!(id = %id, "application removed");
    Ok(())
}

/// Moves `current` by `delta`, staying within `1..=total_pages`.
fn step_page(current: u32, delta: i64, total_pages: u32) -> u32 {
    let last = i64::from(total_pages.max(1));
    (i64::from(current) + delta).clamp(1, last) as u32
}

/// Pairs each row with a key for `<For>`. Rows the backend sent without an id
/// fall back to their position so they stay distinct.
fn keyed_rows(apps: &[Application]) -> Vec<(String, Application)> {
    apps.iter()
        .enumerate()
        .map(|(index, app)| {
            let key = if app.id.is_empty() {
                format!("row-{index}")
            } else {
                app.id.clone()
            };
            (key, app.clone())
        })
        .collect()
}

fn visible_rows(rows: &[(String, Application)], removed: &[String]) -> Vec<(String, Application)> {
    rows.iter()
        .filter(|(key, _)| !removed.contains(key))
        .cloned()
        .collect()
}

fn received_label(app: &Application) -> String {
    app.received()
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

#[component]
fn DownloadLinks() -> impl IntoView {
    view! {
        <div class="flex flex-wrap gap-2">
            {EXPORT_KINDS
                .into_iter()
                .map(|kind| {
                    view! {
                        <a
                            href=kind.href()
                            rel="external"
                            class="px-3 py-2 rounded-md border border-white/20 hover:bg-white/10 text-sm"
                        >
                            {format!("Download {}", kind.label())}
                        </a>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn ApplicationsTable(
    #[prop(into)] rows: Signal<Vec<(String, Application)>>,
    on_remove: Callback<(String, String)>,
) -> impl IntoView {
    view! {
        <div class="overflow-x-auto rounded-xl border border-white/10">
            <table class="w-full text-sm text-left">
                <thead class="bg-white/5 text-muted">
                    <tr>
                        <th class="px-4 py-3">"Company"</th>
                        <th class="px-4 py-3">"Received"</th>
                        <th class="px-4 py-3">"Job Title"</th>
                        <th class="px-4 py-3">"Status"</th>
                        <th class="px-4 py-3">"Subject"</th>
                        <th class="px-4 py-3 sr-only">"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || rows.get()
                        key=|(key, _)| key.clone()
                        let:row
                    >
                        {
                            let (key, app) = row;
                            let id = app.id.clone();
                            let color = crate::charts::status_color(app.status_label());
                            view! {
                                <tr class="border-t border-white/10">
                                    <td class="px-4 py-3">{app.company_label().to_string()}</td>
                                    <td class="px-4 py-3 whitespace-nowrap">{received_label(&app)}</td>
                                    <td class="px-4 py-3">{app.job_title_label().to_string()}</td>
                                    <td class="px-4 py-3">
                                        <span class="inline-flex items-center gap-2">
                                            <span class="w-2 h-2 rounded-full" style:background-color=color />
                                            {app.status_label().to_string()}
                                        </span>
                                    </td>
                                    <td class="px-4 py-3 truncate max-w-xs">
                                        {app.subject.clone().unwrap_or_default()}
                                    </td>
                                    <td class="px-4 py-3 text-right">
                                        <button
                                            class="text-red-500 hover:text-red-400"
                                            on:click=move |_| on_remove.run((key.clone(), id.clone()))
                                        >
                                            "Remove"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    </For>
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn Pagination(page: ReadSignal<u32>, set_page: WriteSignal<u32>, total_pages: u32) -> impl IntoView {
    let button = "px-3 py-2 rounded-md border border-white/20 hover:bg-white/10 disabled:opacity-40";
    view! {
        <div class="flex items-center justify-center gap-4">
            <button
                class=button
                disabled=move || page.get() <= 1
                on:click=move |_| set_page.update(|p| *p = step_page(*p, -1, total_pages))
            >
                "Previous"
            </button>
            <span class="text-sm text-muted">
                {move || format!("Page {} of {}", page.get(), total_pages.max(1))}
            </span>
            <button
                class=button
                disabled=move || page.get() >= total_pages
                on:click=move |_| set_page.update(|p| *p = step_page(*p, 1, total_pages))
            >
                "Next"
            </button>
        </div>
    }
}

#[component]
fn DashboardContent(
    loaded: ApplicationsPage,
    page: ReadSignal<u32>,
    set_page: WriteSignal<u32>,
) -> impl IntoView {
    let toasts = use_toasts();
    let total_pages = loaded.total_pages;
    // row keys are only unique within one page
    let removed = RwSignal::new(Vec::<String>::new());
    let all_rows = keyed_rows(&loaded.applications);
    let rows = Signal::derive(move || removed.with(|removed| visible_rows(&all_rows, removed)));
    let applications = Signal::derive(move || {
        rows.with(|rows| rows.iter().map(|(_, app)| app.clone()).collect::<Vec<_>>())
    });

    let on_remove = Callback::new(move |(key, id): (String, String)| {
        spawn_local(async move {
            match remove_application(id.clone()).await {
                Ok(()) => {
                    removed.update(|r| r.push(key));
                    toasts.success("Item removed successfully");
                }
                Err(e) => {
                    log::error!("removing {id} failed: {e}");
                    toasts.push(
                        ToastKind::Danger,
                        "Failed to remove item",
                        Some("Please try again or contact support.".to_string()),
                    );
                }
            }
        });
    });

    view! {
        <SankeyDiagram applications />
        <StatusPieChart applications />
        <WeeklyApplicationsGraph applications />
        <ApplicationsTable rows on_remove />
        <Pagination page set_page total_pages />
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let toasts = use_toasts();
    let navigate = use_navigate();
    let query = use_query_map();

    let (page, set_page) = signal(1u32);
    let dashboard = Resource::new(move || page.get(), load_dashboard);
    let stats = Resource::new(|| (), |_| load_stats());

    let to_home = navigate.clone();
    Effect::new(move |_| {
        if let Some(Ok(DashboardLoad::Unauthenticated)) = dashboard.get() {
            toasts.push(
                ToastKind::Warning,
                "You need to be logged in to access this page.",
                None,
            );
            to_home("/", NavigateOptions::default());
        }
    });

    // failed downloads come back here as query parameters
    Effect::new(move |_| {
        let params = query.get();
        let Some(failure) = params
            .get("export_error")
            .and_then(|v| ExportFailure::from_param(&v))
        else {
            return;
        };
        let label = params
            .get("export")
            .and_then(|slug| ExportKind::from_slug(&slug))
            .map_or("file", ExportKind::label);
        toasts.push(
            ToastKind::Danger,
            format!("Failed to download {label}"),
            Some(failure.message().to_string()),
        );
        navigate(
            "/dashboard",
            NavigateOptions {
                replace: true,
                ..Default::default()
            },
        );
    });

    view! {
        <Title text="Dashboard" />
        <div class="max-w-7xl mx-auto px-4 py-8 space-y-6">
            <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-4">
                <h1 class="text-3xl font-bold">"Your Job Applications"</h1>
                <div class="flex flex-wrap items-center gap-2">
                    <DownloadLinks />
                    <A
                        href="/dashboard/test-emails"
                        attr:class="px-3 py-2 rounded-md text-sm text-muted hover:text-foreground"
                    >
                        "Manage Test Emails"
                    </A>
                </div>
            </div>

            <Transition fallback=|| ()>
                {move || Suspend::new(async move {
                    match stats.await {
                        Ok(stats) => Some(view! { <StatsOverview stats /> }),
                        Err(e) => {
                            log::warn!("stats unavailable: {e}");
                            None
                        }
                    }
                })}
            </Transition>

            <Transition fallback=move || {
                view! {
                    <div class="space-y-4">
                        <div class="loading-skeleton h-64 rounded-xl"></div>
                        <div class="loading-skeleton h-96 rounded-xl"></div>
                    </div>
                }
            }>
                {move || Suspend::new(async move {
                    let message = match dashboard.await {
                        Ok(DashboardLoad::Loaded(loaded)) => {
                            return Either::Left(
                                view! { <DashboardContent loaded page set_page /> },
                            );
                        }
                        // the redirect effect takes over
                        Ok(DashboardLoad::Unauthenticated) => None,
                        Ok(DashboardLoad::NoApplications) => Some(NO_APPLICATIONS),
                        Err(_) => Some(LOAD_ERROR),
                    };
                    Either::Right(
                        message
                            .map(|message| {
                                view! {
                                    <div class="text-center py-12">
                                        <p class="text-red-600 mb-4">{message}</p>
                                        <button
                                            class="px-4 py-2 rounded-md bg-white/10 hover:bg-white/20"
                                            on:click=move |_| dashboard.refetch()
                                        >
                                            "Retry"
                                        </button>
                                    </div>
                                }
                            }),
                    )
                })}
            </Transition>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_page_bounds() {
        assert_eq!(step_page(1, -1, 5), 1);
        assert_eq!(step_page(1, 1, 5), 2);
        assert_eq!(step_page(5, 1, 5), 5);
        assert_eq!(step_page(3, -1, 5), 2);
        // zero pages still means one page
        assert_eq!(step_page(1, 1, 0), 1);
    }

    #[test]
    fn test_rows_without_id_get_distinct_keys() {
        let apps = vec![
            Application {
                id: "a1".into(),
                ..Default::default()
            },
            Application::default(),
            Application::default(),
        ];
        let rows = keyed_rows(&apps);
        let keys: Vec<_> = rows.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, ["a1", "row-1", "row-2"]);

        // removing one id-less row leaves the other in place
        let left = visible_rows(&rows, &["row-1".to_string()]);
        let keys: Vec<_> = left.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, ["a1", "row-2"]);
    }

    #[test]
    fn test_received_label() {
        let app = Application {
            received_at: Some("2024-01-15T10:30:00".into()),
            ..Default::default()
        };
        assert_eq!(received_label(&app), "Jan 15, 2024");
        assert_eq!(received_label(&Application::default()), "");
    }
}
