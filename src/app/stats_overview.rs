use leptos::prelude::*;

use crate::model::Stats;

const CARD: &str = "rounded-xl border border-white/10 bg-white/5";

#[component]
fn MetricCard(
    #[prop(into)] label: String,
    #[prop(into)] value: String,
    #[prop(optional)] unit: Option<&'static str>,
) -> impl IntoView {
    view! {
        <div class=format!("{CARD} p-4")>
            <div class="text-sm text-muted">{label}</div>
            <div class="text-2xl font-bold">{value}</div>
            {unit.map(|u| view! { <div class="text-xs text-muted">{u}</div> })}
        </div>
    }
}

/// Breakdown entries in display order: label, count, text colour.
fn breakdown(stats: &Stats) -> [(&'static str, u64, &'static str); 8] {
    let b = &stats.status_breakdown;
    [
        ("Interviews", b.interviews, "text-cyan-600"),
        ("Rejections", b.rejections, "text-red-600"),
        ("Offers", b.offers, "text-green-600"),
        ("Assessments", b.assessments, "text-yellow-600"),
        ("Awaiting Response", b.awaiting_response, "text-gray-400"),
        ("Availability Requests", b.availability_requests, "text-emerald-600"),
        ("Info Requests", b.information_requests, "text-teal-600"),
        ("Inbound Requests", b.inbound_requests, "text-purple-600"),
    ]
}

#[component]
pub fn StatsOverview(stats: Stats) -> impl IntoView {
    let entries = breakdown(&stats);
    let overview = stats.overview;
    let activity = stats.activity;

    view! {
        <div class="w-full space-y-6">
            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                <MetricCard label="Total Applications" value=overview.total_applications.to_string() />
                <MetricCard label="Unique Companies" value=overview.unique_companies.to_string() />
                <MetricCard label="Active Days" value=overview.days_active.to_string() />
            </div>

            <div class=format!("{CARD} p-6")>
                <h3 class="text-lg font-semibold mb-4">"Application Status Breakdown"</h3>
                <div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-4">
                    {entries
                        .into_iter()
                        .map(|(label, count, color)| {
                            view! {
                                <div>
                                    <div class="text-sm text-muted">{label}</div>
                                    <div class=format!("text-xl font-semibold {color}")>{count}</div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <MetricCard
                    label="Last 7 Days"
                    value=activity.last_7_days.to_string()
                    unit="applications"
                />
                <MetricCard
                    label="Last 30 Days"
                    value=activity.last_30_days.to_string()
                    unit="applications"
                />
                <MetricCard
                    label="Average Per Week"
                    value=activity.avg_per_week.to_string()
                    unit="applications"
                />
            </div>
        </div>
    }
}
