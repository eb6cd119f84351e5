//! # XeCare Client
//!
//! Browser application for the XeCare garage marketplace: garage search
//! and booking, roadside-rescue requests with a simulated journey view,
//! owner dashboard, and admin approvals.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod components;
pub mod services;
pub mod state;

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use components::*;
use state::{provide_app_state, use_app_state};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_app_state();

    let state = use_app_state();
    services::session::restore(&state);

    view! {
        <Title text="XeCare" />
        <Router>
            <Header />
            <main class="app-main">
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=GarageSearchPage />
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/garages/new") view=RegisterGaragePage />
                    <Route path=path!("/garages/:id") view=GarageDetailPage />
                    <Route path=path!("/garages/:id/edit") view=EditGaragePage />
                    <Route path=path!("/dashboard") view=DashboardPage />
                    <Route path=path!("/admin") view=AdminApprovalsPage />
                    <Route path=path!("/emergencies/new") view=EmergencyNewPage />
                    <Route path=path!("/emergencies/:id") view=EmergencyDetailPage />
                </Routes>
            </main>
        </Router>
        <ToastContainer />
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page">
            <div class="panel text-muted">"Page not found"</div>
        </div>
    }
}

#[component]
fn ToastContainer() -> impl IntoView {
    let state = use_app_state();

    view! {
        <div class="toast-container">
            <For
                each=move || state.alerts.get()
                key=|alert| alert.id
                children=move |alert| {
                    let id = alert.id;
                    let on_dismiss = move |_| {
                        state.alerts.update(|alerts| alerts.retain(|a| a.id != id));
                    };
                    view! {
                        <div class="toast">
                            <div class="flex justify-between items-center gap-md">
                                <div class="flex items-center gap-sm">
                                    <span class=format!("status-dot {}", alert.severity.class())></span>
                                    <span>{alert.message.clone()}</span>
                                </div>
                                <button class="btn btn-sm" on:click=on_dismiss>"×"</button>
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}

pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("XeCare client v{}", env!("CARGO_PKG_VERSION"));
    leptos::mount::mount_to_body(App);
}
