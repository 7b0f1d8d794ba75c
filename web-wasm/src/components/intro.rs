use leptos::prelude::*;

#[component]
pub fn Intro() -> impl IntoView {
    view! {
        <section class="intro">
            <h2><strong>"Locations"</strong></h2>
            <p class="text-muted">
                "UNICEF Afghanistan supports clinics across all provinces and districts, \
                 helping deliver healthcare and essential services to communities."
            </p>
        </section>
    }
}
