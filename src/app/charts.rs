//! SVG rendering of the layouts computed in `crate::charts`.

use leptos::prelude::*;

use crate::charts::{num, pie, sankey, weekly};
use crate::model::Application;

const CARD: &str = "rounded-xl border border-white/10 bg-white/5 p-6";

#[component]
pub fn StatusPieChart(#[prop(into)] applications: Signal<Vec<Application>>) -> impl IntoView {
    let chart = Memo::new(move |_| applications.with(|apps| pie::layout(apps)));

    move || {
        chart.get().map(|chart| {
            view! {
                <div class=CARD>
                    <h3 class="text-lg font-semibold mb-4">"Application Status Distribution"</h3>
                    <div class="flex flex-col lg:flex-row items-center gap-8">
                        <div class="relative flex-shrink-0">
                            <svg
                                width=num(pie::WIDTH)
                                height=num(pie::HEIGHT)
                                viewBox=format!("0 0 {} {}", num(pie::WIDTH), num(pie::HEIGHT))
                            >
                                {chart
                                    .slices
                                    .iter()
                                    .map(|slice| {
                                        view! {
                                            <g>
                                                <path
                                                    d=slice.path.clone()
                                                    fill=slice.color
                                                    stroke="white"
                                                    stroke-width="1"
                                                    class="hover:opacity-80 transition-opacity"
                                                >
                                                    <title>
                                                        {format!("{}: {} ({}%)", slice.name, slice.value, slice.percentage)}
                                                    </title>
                                                </path>
                                                {(!slice.label.is_empty())
                                                    .then(|| {
                                                        view! {
                                                            <text
                                                                x=num(slice.label_x)
                                                                y=num(slice.label_y)
                                                                text-anchor="middle"
                                                                dominant-baseline="middle"
                                                                class="fill-white text-sm font-semibold pointer-events-none"
                                                            >
                                                                {slice.label.clone()}
                                                            </text>
                                                        }
                                                    })}
                                            </g>
                                        }
                                    })
                                    .collect_view()}
                            </svg>
                        </div>
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-x-8 gap-y-2 w-full">
                            {chart
                                .slices
                                .into_iter()
                                .map(|slice| {
                                    view! {
                                        <div class="flex items-center gap-2 text-sm">
                                            <div
                                                class="w-4 h-4 rounded flex-shrink-0"
                                                style:background-color=slice.color
                                            />
                                            <span class="flex-1 truncate">{slice.name}</span>
                                            <span class="font-semibold whitespace-nowrap">
                                                {format!("{} ({}%)", slice.value, slice.percentage)}
                                            </span>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>
                </div>
            }
        })
    }
}

#[component]
pub fn WeeklyApplicationsGraph(
    #[prop(into)] applications: Signal<Vec<Application>>,
) -> impl IntoView {
    let graph = Memo::new(move |_| applications.with(|apps| weekly::layout(apps)));

    move || {
        graph.get().map(|g| {
            let chart_h = g.chart_height;
            view! {
                <div class=CARD>
                    <h3 class="text-lg font-semibold mb-4">"Weekly Job Applications"</h3>
                    <div class="w-full overflow-x-auto">
                        <svg
                            width=num(weekly::WIDTH)
                            height=num(weekly::HEIGHT)
                            viewBox=format!("0 0 {} {}", num(weekly::WIDTH), num(weekly::HEIGHT))
                            class="w-full h-auto max-w-full"
                            preserveAspectRatio="xMidYMid meet"
                        >
                            <g transform=format!(
                                "translate({}, {})",
                                num(weekly::PADDING_LEFT),
                                num(weekly::PADDING_TOP),
                            )>
                                <line x1="0" y1="0" x2="0" y2=num(chart_h) stroke="#e5e7eb" stroke-width="2" />
                                <line
                                    x1="0"
                                    y1=num(chart_h)
                                    x2=num(g.chart_width)
                                    y2=num(chart_h)
                                    stroke="#e5e7eb"
                                    stroke-width="2"
                                />
                                {g
                                    .ticks
                                    .iter()
                                    .map(|tick| {
                                        view! {
                                            <g>
                                                <line
                                                    x1="0"
                                                    y1=num(tick.y)
                                                    x2=num(g.chart_width)
                                                    y2=num(tick.y)
                                                    stroke="#374151"
                                                    stroke-width="1"
                                                />
                                                <text
                                                    x="-10"
                                                    y=num(tick.y)
                                                    text-anchor="end"
                                                    dominant-baseline="middle"
                                                    class="text-sm fill-gray-400"
                                                >
                                                    {tick.value}
                                                </text>
                                            </g>
                                        }
                                    })
                                    .collect_view()}
                                {g
                                    .points
                                    .iter()
                                    .map(|p| {
                                        let label_y = chart_h + 20.0;
                                        view! {
                                            <g>
                                                <rect
                                                    x=num(p.bar_x)
                                                    y=num(p.y)
                                                    width=num(p.bar_width)
                                                    height=num(p.bar_height)
                                                    fill="#3b82f6"
                                                    fill-opacity="0.3"
                                                />
                                                <circle cx=num(p.x) cy=num(p.y) r="5" fill="#1e40af" />
                                                <text
                                                    x=num(p.x)
                                                    y=num(p.y - 10.0)
                                                    text-anchor="middle"
                                                    class="text-sm font-semibold fill-gray-200"
                                                >
                                                    {p.count}
                                                </text>
                                                <text
                                                    x=num(p.x)
                                                    y=num(label_y)
                                                    text-anchor="middle"
                                                    class="text-xs fill-gray-400"
                                                    transform=format!(
                                                        "rotate(-45 {} {})",
                                                        num(p.x),
                                                        num(chart_h + 25.0),
                                                    )
                                                >
                                                    {p.label.clone()}
                                                </text>
                                            </g>
                                        }
                                    })
                                    .collect_view()}
                                <path d=g.line_path.clone() fill="none" stroke="#2563eb" stroke-width="3" />
                            </g>
                        </svg>
                    </div>
                    <div class="mt-4 text-sm text-muted">
                        <p>
                            {format!("Total unique applications: {} over {} weeks", g.total, g.weeks)}
                        </p>
                        <p>{format!("Average per week: {}", g.average)}</p>
                    </div>
                </div>
            }
        })
    }
}

#[component]
pub fn SankeyDiagram(#[prop(into)] applications: Signal<Vec<Application>>) -> impl IntoView {
    let diagram = Memo::new(move |_| applications.with(|apps| sankey::layout(apps)));

    move || {
        diagram.get().map(|d| {
            view! {
                <div class=CARD>
                    <h3 class="text-lg font-semibold mb-4">"Application Flow"</h3>
                    <div class="w-full overflow-x-auto">
                        <svg
                            width=num(sankey::WIDTH)
                            height=num(sankey::HEIGHT)
                            viewBox=format!("-50 0 {} {}", num(sankey::WIDTH + 100.0), num(sankey::HEIGHT))
                            class="w-full h-auto max-w-full"
                            preserveAspectRatio="xMidYMid meet"
                        >
                            <rect
                                x=num(d.source_x)
                                y=num(d.source_y)
                                width=num(d.node_width)
                                height=num(d.source_height)
                                fill="#3b82f6"
                            />
                            <text
                                x=num(d.source_x - 10.0)
                                y=num(d.center_y)
                                text-anchor="end"
                                dominant-baseline="middle"
                                class="text-xs font-semibold"
                                fill="#9ca3af"
                            >
                                {format!("Unique Applications ({})", d.total)}
                            </text>
                            {d
                                .links
                                .iter()
                                .map(|link| {
                                    view! {
                                        <g>
                                            <path
                                                d=link.path.clone()
                                                fill=link.color
                                                fill-opacity="0.3"
                                                stroke=link.color
                                                stroke-width="1"
                                            />
                                            <rect
                                                x=num(d.target_x)
                                                y=num(link.target_y - d.target_height / 2.0)
                                                width=num(d.node_width)
                                                height=num(d.target_height)
                                                fill=link.color
                                            />
                                            <text
                                                x=num(d.target_x + d.node_width + 10.0)
                                                y=num(link.target_y)
                                                dominant-baseline="middle"
                                                class="text-xs"
                                                fill="#9ca3af"
                                            >
                                                {format!("{} ({})", link.name, link.value)}
                                            </text>
                                        </g>
                                    }
                                })
                                .collect_view()}
                        </svg>
                    </div>
                </div>
            }
        })
    }
}
