//! 集計カードとフッター

use clinic_map_common::summary::{footer_text, SUMMARY_CARDS};
use leptos::prelude::*;

#[component]
pub fn SummaryFooter() -> impl IntoView {
    let year = js_sys::Date::new_0().get_full_year() as i32;

    view! {
        <section class="summary">
            <div class="summary-cards">
                {SUMMARY_CARDS
                    .iter()
                    .map(|(label, value)| view! {
                        <div class="summary-card">
                            <div class="summary-value">{*value}</div>
                            <div class="summary-label">{*label}</div>
                        </div>
                    })
                    .collect_view()}
            </div>
        </section>
        <footer class="footer">{footer_text(year)}</footer>
    }
}
