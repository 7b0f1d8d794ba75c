//! クリニック詳細画面
//!
//! 生データ行から組み立てた詳細と、固定のグラフ・設備・連絡先を表示する。

use crate::app::DashboardContext;
use crate::map::bridge;
use clinic_map_common::detail::{
    ChartSeries, ClinicDetail, CONTACT_LINES, MONTHLY_WORKLOAD, RESOURCE_LEVELS,
    SERVICE_DISTRIBUTION, SERVICE_RADIUS_METERS, YEARLY_TRENDS,
};
use leptos::prelude::*;

const DETAIL_MAP_ID: &str = "detail-map";

#[component]
pub fn ClinicDetailPage(ctx: DashboardContext, id: String) -> impl IntoView {
    let state = ctx.state;
    let lookup_id = id.clone();
    let detail = Memo::new(move |_| {
        state.with(|s| s.detail(&lookup_id))
    });
    let loading = move || state.with(|s| s.clinics_status.is_loading());

    // 描画後に小地図を作る
    Effect::new(move |_| {
        if let Some(d) = detail.get() {
            request_animation_frame(move || {
                bridge::show_detail_map_js(
                    DETAIL_MAP_ID,
                    d.position.lat,
                    d.position.lon,
                    &d.name,
                    SERVICE_RADIUS_METERS,
                );
            });
        }
    });

    view! {
        <div class="detail-page">
            <a class="back-link" href="#/">"← Back to dashboard"</a>
            {move || match (detail.get(), loading()) {
                (Some(d), _) => view! { <DetailBody detail=d /> }.into_any(),
                (None, true) => view! { <div class="alert alert-info">"Loading clinic…"</div> }.into_any(),
                (None, false) => view! {
                    <div class="alert alert-warning">
                        {format!("Clinic \"{}\" was not found.", id)}
                    </div>
                }.into_any(),
            }}
        </div>
    }
}

#[component]
fn DetailBody(detail: ClinicDetail) -> impl IntoView {
    let badge_class = format!("badge bg-{}", detail.condition_tone.as_str());

    view! {
        <div class="detail-header">
            <h2>{detail.name.clone()}</h2>
            <p class="text-muted">{detail.location_label()}</p>
            <span class=badge_class>{detail.condition.clone()}</span>
        </div>

        <div class="detail-grid">
            <div class="card">
                <div id=DETAIL_MAP_ID class="detail-map"></div>
            </div>

            <div class="card">
                <h5>"Facility Information"</h5>
                <table class="info-table">
                    <tbody>
                        {detail.info_rows
                            .iter()
                            .map(|(label, value)| view! {
                                <tr><th>{label.clone()}</th><td>{value.clone()}</td></tr>
                            })
                            .collect_view()}
                    </tbody>
                </table>
            </div>

            <div class="card">
                <h5>"Resources"</h5>
                {RESOURCE_LEVELS
                    .iter()
                    .map(|(label, percent, tone)| view! {
                        <div class="resource">
                            <div class="resource-label">{*label}</div>
                            <div class="progress">
                                <div
                                    class=format!("progress-bar bg-{}", tone.as_str())
                                    style:width=format!("{percent}%")
                                >
                                    {format!("{percent}%")}
                                </div>
                            </div>
                        </div>
                    })
                    .collect_view()}
            </div>

            <div class="card">
                <h5>"Contact"</h5>
                <ul class="contact">
                    {CONTACT_LINES
                        .iter()
                        .map(|(label, value)| view! {
                            <li><strong>{format!("{label}: ")}</strong>{*value}</li>
                        })
                        .collect_view()}
                </ul>
            </div>

            <BarChart series=MONTHLY_WORKLOAD />
            <PieChart series=SERVICE_DISTRIBUTION />
            <LineChart series=YEARLY_TRENDS />
        </div>
    }
}

#[component]
fn BarChart(series: ChartSeries) -> impl IntoView {
    let color = series.colors.first().copied().unwrap_or("#1CABE2");

    view! {
        <div class="card chart">
            <h5>{series.title}</h5>
            <div class="bar-chart" title=series.label>
                {series.bars()
                    .into_iter()
                    .map(|(label, value, percent)| view! {
                        <div class="bar-column">
                            <div class="bar-value">{value}</div>
                            <div class="bar" style:height=format!("{percent:.0}%") style:background=color></div>
                            <div class="bar-label">{label}</div>
                        </div>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// conic-gradient で描く円グラフ
#[component]
fn PieChart(series: ChartSeries) -> impl IntoView {
    let total = series.total().max(1) as f64;
    let mut start = 0.0;
    let stops: Vec<String> = series
        .values
        .iter()
        .zip(series.colors.iter().cycle())
        .map(|(value, color)| {
            let end = start + *value as f64 / total * 100.0;
            let stop = format!("{color} {start:.1}% {end:.1}%");
            start = end;
            stop
        })
        .collect();
    let gradient = format!("conic-gradient({})", stops.join(", "));

    view! {
        <div class="card chart">
            <h5>{series.title}</h5>
            <div class="pie" style:background=gradient></div>
            <ul class="legend">
                {series.labels
                    .iter()
                    .zip(series.values.iter())
                    .zip(series.colors.iter().cycle())
                    .map(|((label, value), color)| view! {
                        <li>
                            <span class="legend-dot" style:background=*color></span>
                            {format!("{label} ({value}%)")}
                        </li>
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}

/// SVG の折れ線グラフ（幅300×高さ150）
#[component]
fn LineChart(series: ChartSeries) -> impl IntoView {
    const WIDTH: f64 = 300.0;
    const HEIGHT: f64 = 150.0;

    let color = series.colors.first().copied().unwrap_or("#1976D2");
    let max = series.max_value().max(1) as f64;
    let step = WIDTH / (series.values.len().saturating_sub(1).max(1)) as f64;
    let points: Vec<(f64, f64)> = series
        .values
        .iter()
        .enumerate()
        .map(|(i, value)| (i as f64 * step, HEIGHT - *value as f64 / max * (HEIGHT - 10.0)))
        .collect();
    let polyline = points
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ");

    view! {
        <div class="card chart">
            <h5>{series.title}</h5>
            <svg class="line-chart" viewBox="-10 -10 320 185">
                <polyline points=polyline fill="none" stroke=color stroke-width="2" />
                {points
                    .iter()
                    .zip(series.labels.iter())
                    .map(|((x, y), label)| view! {
                        <circle cx=x.to_string() cy=y.to_string() r="3" fill=color />
                        <text x=x.to_string() y=(HEIGHT + 20.0).to_string() text-anchor="middle" font-size="10">{*label}</text>
                    })
                    .collect_view()}
            </svg>
        </div>
    }
}
