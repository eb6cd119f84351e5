//! # Garage Search Page
//!
//! Keyword/service search over active garage listings.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use xecare_domain::Garage;

use super::stars;
use crate::services::api;
use crate::state::{use_app_state, AlertSeverity};

#[component]
pub fn GarageSearchPage() -> impl IntoView {
    let state = use_app_state();
    let keyword = RwSignal::new(String::new());
    let service = RwSignal::new(String::new());
    let searching = RwSignal::new(false);

    let run_search = move || {
        searching.set(true);
        spawn_local(async move {
            match api::search_garages(&keyword.get_untracked(), &service.get_untracked()).await {
                Ok(garages) => state.garages.set(garages),
                Err(err) => state.notify(AlertSeverity::Error, err.to_string()),
            }
            searching.set(false);
        });
    };

    // Initial listing on mount.
    Effect::new(move |_| run_search());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        run_search();
    };

    view! {
        <div class="page">
            <h1>"Find a garage"</h1>
            <form class="search-bar" on:submit=on_submit>
                <input
                    prop:value=move || keyword.get()
                    on:input=move |ev| keyword.set(event_target_value(&ev))
                    placeholder="Name or area"
                />
                <input
                    prop:value=move || service.get()
                    on:input=move |ev| service.set(event_target_value(&ev))
                    placeholder="Service (e.g. oil change)"
                />
                <button class="btn btn-primary" type="submit" disabled=move || searching.get()>
                    "Search"
                </button>
            </form>
            <div class="garage-grid">
                <For
                    each=move || state.garages.get()
                    key=|garage| garage.id
                    children=move |garage| view! { <GarageCard garage=garage /> }
                />
            </div>
            <Show when=move || !searching.get() && state.garages.get().is_empty()>
                <div class="panel text-muted">"No garages match your search"</div>
            </Show>
        </div>
    }
}

/// Single search-result card.
#[component]
pub fn GarageCard(garage: Garage) -> impl IntoView {
    let rating = garage.average_rating.round() as u8;

    view! {
        <A href=format!("/garages/{}", garage.id) attr:class="garage-card">
            <div class="garage-name">{garage.name.clone()}</div>
            <div class="garage-address text-muted">{garage.address.clone()}</div>
            <div class="garage-rating">
                <span class="stars">{stars(rating)}</span>
                <span class="text-muted">
                    {format!("{:.1} ({} reviews)", garage.average_rating, garage.review_count)}
                </span>
            </div>
        </A>
    }
}
