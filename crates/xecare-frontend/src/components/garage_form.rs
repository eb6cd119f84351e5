//! # Garage Registration / Edit Form
//!
//! Listing form with debounced server-side address validation. Typing is
//! validated after a settle window; programmatic fills (accepting the
//! suggested address) bypass the window.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::services::address::AddressValidator;
use crate::services::api;
use crate::state::{use_app_state, AlertSeverity};

/// New-listing page.
#[component]
pub fn RegisterGaragePage() -> impl IntoView {
    view! { <GarageForm garage_id=None /> }
}

/// Edit page for an existing listing.
#[component]
pub fn EditGaragePage() -> impl IntoView {
    let params = use_params_map();
    let garage_id = params
        .read_untracked()
        .get("id")
        .and_then(|v| v.parse::<i64>().ok());
    view! { <GarageForm garage_id=garage_id /> }
}

#[component]
fn GarageForm(garage_id: Option<i64>) -> impl IntoView {
    let state = use_app_state();
    let navigate = use_navigate();
    let validator = AddressValidator::new();

    let name = RwSignal::new(String::new());
    let address = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);

    // Prefill when editing.
    if let Some(id) = garage_id {
        spawn_local(async move {
            match api::fetch_garage(id).await {
                Ok(garage) => {
                    name.set(garage.name);
                    phone.set(garage.phone);
                    description.set(garage.description.unwrap_or_default());
                    // Prefilled address is trusted data: validate without
                    // waiting for a settle window.
                    address.set(garage.address.clone());
                    validator.request(&garage.address, true);
                }
                Err(err) => state.notify(AlertSeverity::Error, err.to_string()),
            }
        });
    }

    let on_address_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        address.set(value.clone());
        validator.request(&value, false);
    };

    let use_suggestion = move |_| {
        let Some(formatted) = validator
            .result
            .get_untracked()
            .and_then(|check| check.formatted)
        else {
            return;
        };
        address.set(formatted.clone());
        validator.request(&formatted, true);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(token) = state.auth_token.get_untracked() else {
            state.notify(AlertSeverity::Warning, "Sign in to manage a garage");
            return;
        };
        let check = validator.result.get_untracked();
        if !check.as_ref().is_some_and(|c| c.valid) {
            state.notify(AlertSeverity::Warning, "Address could not be verified");
            return;
        }
        let (latitude, longitude) = check
            .map(|c| (c.latitude, c.longitude))
            .unwrap_or((None, None));

        submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let name_text = name.get_untracked();
            let address_text = address.get_untracked();
            let phone_text = phone.get_untracked();
            let description_text = description.get_untracked();
            let payload = api::GaragePayload {
                name: &name_text,
                address: &address_text,
                phone: &phone_text,
                description: (!description_text.is_empty()).then_some(&description_text),
                latitude,
                longitude,
            };
            let result = match garage_id {
                Some(id) => api::update_garage(&token, id, &payload).await,
                None => api::register_garage(&token, &payload).await,
            };
            match result {
                Ok(garage) => {
                    let message = if garage_id.is_some() {
                        "Garage updated"
                    } else {
                        "Garage submitted for approval"
                    };
                    state.notify(AlertSeverity::Info, message);
                    navigate(&format!("/garages/{}", garage.id), Default::default());
                }
                Err(err) => state.notify(AlertSeverity::Error, err.to_string()),
            }
            submitting.set(false);
        });
    };

    let address_hint = move || {
        if validator.validating.get() {
            return view! { <span class="text-muted">"Checking address..."</span> }.into_any();
        }
        match validator.result.get() {
            Some(check) if check.valid => {
                let suggestion = check.formatted.filter(|f| *f != address.get());
                view! {
                    <span class="nominal">"Address verified"</span>
                    {suggestion.map(|f| view! {
                        <button type="button" class="btn btn-sm" on:click=use_suggestion>
                            {format!("Use \"{f}\"")}
                        </button>
                    })}
                }
                .into_any()
            }
            Some(_) => view! { <span class="critical">"Address not found"</span> }.into_any(),
            None => view! { <span></span> }.into_any(),
        }
    };

    view! {
        <div class="page page-narrow">
            <h1>{if garage_id.is_some() { "Edit garage" } else { "Register your garage" }}</h1>
            <form class="panel" on:submit=on_submit>
                <label>"Garage name"</label>
                <input
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <label>"Address"</label>
                <input
                    prop:value=move || address.get()
                    on:input=on_address_input
                />
                <div class="address-hint">{address_hint}</div>
                <label>"Phone"</label>
                <input
                    prop:value=move || phone.get()
                    on:input=move |ev| phone.set(event_target_value(&ev))
                />
                <label>"Description"</label>
                <textarea
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                />
                <button class="btn btn-primary" type="submit" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Saving..." } else { "Save" }}
                </button>
            </form>
        </div>
    }
}
