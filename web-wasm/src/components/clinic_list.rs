//! クリニックリスト
//!
//! 行クリックで選択し、選択行を強調する。

use crate::app::DashboardContext;
use crate::map::surfaces::{list_item_dom_id, LIST_CONTAINER_ID};
use clinic_map_common::ClinicRecord;
use leptos::prelude::*;

const CLINIC_IMAGE_URL: &str =
    "https://raw.githubusercontent.com/rahimiabdulrahmanab/Clinics-Dashboard/main/hospital.png";

#[component]
pub fn ClinicList(ctx: DashboardContext) -> impl IntoView {
    let state = ctx.state;

    view! {
        <div class="clinic-list-panel">
            <div class="list-header">
                <h6>"Clinic List"</h6>
                <span class="badge">{move || state.with(|s| s.visible_count())}</span>
            </div>

            <ul class="clinic-list" id=LIST_CONTAINER_ID>
                <For
                    each=move || state.with(|s| s.visible().to_vec())
                    key=|record| record.id.clone()
                    children=move |record| view! { <ClinicItem ctx=ctx record=record /> }
                />
                <Show when=move || state.with(|s| s.shows_empty_message())>
                    <li class="clinic-item empty">"No clinics match your filters."</li>
                </Show>
            </ul>
        </div>
    }
}

#[component]
fn ClinicItem(ctx: DashboardContext, record: ClinicRecord) -> impl IntoView {
    let id = record.id.clone();
    let dom_id = list_item_dom_id(&record.id);
    let title = if record.name.is_empty() {
        "Unnamed Facility".to_string()
    } else {
        record.name.clone()
    };
    let location = record.location_label(" • ");
    let lat = format!("Lat {:.2}", record.latitude);
    let lon = format!("Lon {:.2}", record.longitude);

    view! {
        <li
            id=dom_id
            class="clinic-item"
            class:active=move || ctx.is_selected(&id)
            on:click=move |_| ctx.select_from_list(&record)
        >
            <img src=CLINIC_IMAGE_URL alt="Clinic" width="64" height="64" />
            <div class="clinic-item-body">
                <div class="clinic-name">{title}</div>
                <div class="clinic-location">{location}</div>
                <div class="clinic-coords">
                    <span class="badge">{lat}</span>
                    <span class="badge">{lon}</span>
                </div>
            </div>
        </li>
    }
}
