//! ダッシュボード（見出し・絞り込み・リスト・地図）

use crate::app::DashboardContext;
use crate::components::{
    clinic_list::ClinicList, map_panel::MapPanel, search_filters::SearchFilters,
    status_banner::StatusBanner,
};
use clinic_map_common::summary::header_badges;
use leptos::prelude::*;

#[component]
pub fn Dashboard(ctx: DashboardContext) -> impl IntoView {
    let state = ctx.state;
    let set_state = ctx.set_state;

    let show_clusters = move || state.with(|s| s.show_clusters);
    let show_boundaries = move || state.with(|s| s.show_boundaries);

    view! {
        <div class="dashboard">
            <div class="dashboard-header">
                <div class="badges">
                    <h4>"Afghanistan Clinics"</h4>
                    {move || {
                        state.with(header_badges)
                            .into_iter()
                            .map(|badge| view! {
                                <div class="header-badge">
                                    <span class=format!("badge-dot bg-{}", badge.tone)></span>
                                    <div>
                                        <div class="badge-label">{badge.label}</div>
                                        <div class="badge-value">{badge.value}</div>
                                    </div>
                                </div>
                            })
                            .collect_view()
                    }}
                </div>

                <div class="toggles">
                    <button
                        class=move || if show_clusters() { "btn btn-primary" } else { "btn btn-outline-primary" }
                        title="Toggle clustering"
                        on:click=move |_| set_state.update(|s| s.show_clusters = !s.show_clusters)
                    >
                        {move || if show_clusters() { "Clustering: On" } else { "Clustering: Off" }}
                    </button>
                    <button
                        class=move || if show_boundaries() { "btn btn-secondary" } else { "btn btn-outline-secondary" }
                        title="Toggle district boundaries"
                        on:click=move |_| set_state.update(|s| s.show_boundaries = !s.show_boundaries)
                    >
                        {move || if show_boundaries() { "Boundaries: On" } else { "Boundaries: Off" }}
                    </button>
                </div>
            </div>

            <SearchFilters ctx=ctx />
            <StatusBanner state=state />

            <div class="main-content">
                <ClinicList ctx=ctx />
                <MapPanel ctx=ctx />
            </div>
        </div>
    }
}
