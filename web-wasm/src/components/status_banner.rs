//! 読込中・読込失敗のバナー

use clinic_map_common::DashboardState;
use leptos::prelude::*;

#[component]
pub fn StatusBanner(state: ReadSignal<DashboardState>) -> impl IntoView {
    let loading = move || state.with(|s| s.loading_message());
    let errors = move || {
        state.with(|s| {
            s.error_messages()
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
    };

    view! {
        {move || loading().map(|message| view! {
            <div class="alert alert-info">{message}</div>
        })}
        <Show when=move || !errors().is_empty()>
            <div class="alert alert-warning">
                {move || errors()
                    .into_iter()
                    .map(|message| view! { <span class="alert-item">{message}</span> })
                    .collect_view()}
            </div>
        </Show>
    }
}
