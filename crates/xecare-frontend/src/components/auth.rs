//! # Sign In / Register Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::services::{api, session};
use crate::state::{use_app_state, AlertSeverity};

#[component]
pub fn LoginPage() -> impl IntoView {
    let state = use_app_state();
    let navigate = use_navigate();

    let registering = RwSignal::new(false);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        busy.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let email_text = email.get_untracked();
            let password_text = password.get_untracked();
            let result = if registering.get_untracked() {
                let name_text = full_name.get_untracked();
                let phone_text = phone.get_untracked();
                api::register(&api::RegisterPayload {
                    email: &email_text,
                    password: &password_text,
                    full_name: &name_text,
                    phone: (!phone_text.is_empty()).then_some(&phone_text),
                })
                .await
            } else {
                api::login(&email_text, &password_text).await
            };
            match result {
                Ok(auth) => {
                    session::establish(&state, auth.token, auth.user);
                    navigate("/", Default::default());
                }
                Err(err) => state.notify(AlertSeverity::Error, err.to_string()),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="page page-narrow">
            <h1>{move || if registering.get() { "Create account" } else { "Sign in" }}</h1>
            <form class="panel" on:submit=on_submit>
                <Show when=move || registering.get()>
                    <label>"Full name"</label>
                    <input
                        prop:value=move || full_name.get()
                        on:input=move |ev| full_name.set(event_target_value(&ev))
                    />
                    <label>"Phone"</label>
                    <input
                        prop:value=move || phone.get()
                        on:input=move |ev| phone.set(event_target_value(&ev))
                    />
                </Show>
                <label>"Email"</label>
                <input
                    type="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <label>"Password"</label>
                <input
                    type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button class="btn btn-primary" type="submit" disabled=move || busy.get()>
                    {move || if registering.get() { "Register" } else { "Sign in" }}
                </button>
                <button
                    type="button"
                    class="btn btn-link"
                    on:click=move |_| registering.update(|r| *r = !*r)
                >
                    {move || {
                        if registering.get() {
                            "Have an account? Sign in"
                        } else {
                            "New here? Create an account"
                        }
                    }}
                </button>
            </form>
        </div>
    }
}
