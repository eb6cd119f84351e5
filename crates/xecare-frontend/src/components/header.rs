//! # Header Component
//!
//! Top navigation bar with role-aware links and session controls.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use xecare_domain::UserRole;

use crate::services::session;
use crate::state::use_app_state;

#[component]
pub fn Header() -> impl IntoView {
    let state = use_app_state();
    let navigate = use_navigate();

    let role = move || state.current_user.get().map(|u| u.role);
    let is_owner = move || role() == Some(UserRole::GarageOwner);
    let is_admin = move || role() == Some(UserRole::Admin);
    let signed_in = move || state.current_user.get().is_some();

    let on_logout = move |_| {
        session::clear(&state);
        navigate("/", Default::default());
    };

    view! {
        <header class="app-header">
            <A href="/" attr:class="brand">"XeCare"</A>
            <nav class="nav-links">
                <A href="/">"Find a garage"</A>
                <A href="/emergencies/new" attr:class="nav-emergency">"Roadside rescue"</A>
                <Show when=is_owner>
                    <A href="/dashboard">"My garage"</A>
                </Show>
                <Show when=is_admin>
                    <A href="/admin">"Approvals"</A>
                </Show>
            </nav>
            <div class="session">
                <Show
                    when=signed_in
                    fallback=|| view! { <A href="/login" attr:class="btn btn-sm">"Sign in"</A> }
                >
                    <span class="user-name">
                        {move || state.current_user.get().map(|u| u.full_name).unwrap_or_default()}
                    </span>
                    <button class="btn btn-sm" on:click=on_logout.clone()>"Sign out"</button>
                </Show>
            </div>
        </header>
    }
}
