//! 検索・絞り込みフォーム
//!
//! 名前と郡は2文字以上で候補を最大5件表示する。

use crate::app::DashboardContext;
use leptos::prelude::*;

#[component]
pub fn SearchFilters(ctx: DashboardContext) -> impl IntoView {
    let state = ctx.state;
    let set_state = ctx.set_state;

    let (name, set_name) = signal(String::new());
    let (district, set_district) = signal(String::new());
    let (name_suggestions, set_name_suggestions) = signal(Vec::<String>::new());
    let (district_suggestions, set_district_suggestions) = signal(Vec::<String>::new());

    let on_name_input = move |value: String| {
        set_name_suggestions.set(state.with(|s| s.name_suggestions(&value)));
        set_state.update(|s| s.set_name_pattern(&value));
        set_name.set(value);
    };

    let on_district_input = move |value: String| {
        set_district_suggestions.set(state.with(|s| s.district_suggestions(&value)));
        set_state.update(|s| s.set_district_pattern(&value));
        set_district.set(value);
    };

    let facility_types = move || state.with(|s| s.facility_type_options());

    view! {
        <div class="search-filters">
            <div class="filter-field">
                <input
                    type="text"
                    placeholder="Search By Facility Name"
                    prop:value=move || name.get()
                    on:input=move |ev| on_name_input(event_target_value(&ev))
                />
                <SuggestionList
                    items=name_suggestions
                    on_pick=move |value: String| {
                        set_state.update(|s| s.set_name_pattern(&value));
                        set_name.set(value);
                        set_name_suggestions.set(Vec::new());
                    }
                />
            </div>

            <div class="filter-field">
                <select disabled=true>
                    <option>"Search By Service (coming soon)"</option>
                </select>
            </div>

            <div class="filter-field">
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    set_state.update(|s| s.set_facility_type(&value));
                }>
                    <option value="">"Facility Type"</option>
                    {move || facility_types()
                        .into_iter()
                        .map(|ft| view! { <option value=ft.clone()>{ft.clone()}</option> })
                        .collect_view()}
                </select>
            </div>

            <div class="filter-field">
                <input
                    type="text"
                    placeholder="Search By District"
                    prop:value=move || district.get()
                    on:input=move |ev| on_district_input(event_target_value(&ev))
                />
                <SuggestionList
                    items=district_suggestions
                    on_pick=move |value: String| {
                        set_state.update(|s| s.set_district_pattern(&value));
                        set_district.set(value);
                        set_district_suggestions.set(Vec::new());
                    }
                />
            </div>
        </div>
    }
}

/// 入力欄の下に出す候補
#[component]
fn SuggestionList<F>(items: ReadSignal<Vec<String>>, on_pick: F) -> impl IntoView
where
    F: Fn(String) + 'static + Clone + Send + Sync,
{
    view! {
        <Show when=move || !items.get().is_empty()>
            <ul class="suggestions">
                {
                    let on_pick = on_pick.clone();
                    move || {
                        let on_pick = on_pick.clone();
                        items
                            .get()
                            .into_iter()
                            .map(|item| {
                                let on_pick = on_pick.clone();
                                let picked = item.clone();
                                view! {
                                    <li class="suggestion" on:click=move |_| on_pick(picked.clone())>
                                        {item}
                                    </li>
                                }
                            })
                            .collect_view()
                    }
                }
            </ul>
        </Show>
    }
}
