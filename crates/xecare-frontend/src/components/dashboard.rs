//! # Owner Dashboard
//!
//! Garage owner's appointment queue with status actions.

use leptos::prelude::*;
use leptos::task::spawn_local;
use xecare_domain::{Appointment, AppointmentStatus};

use super::appointment_status_class;
use crate::services::api;
use crate::state::{use_app_state, AlertSeverity};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let state = use_app_state();
    let garage_id = RwSignal::new(String::new());

    let load = move || {
        let Some(token) = state.auth_token.get_untracked() else {
            return;
        };
        let Ok(id) = garage_id.get_untracked().parse::<i64>() else {
            return;
        };
        spawn_local(async move {
            match api::fetch_garage_appointments(&token, id).await {
                Ok(list) => state.appointments.set(list),
                Err(err) => state.notify(AlertSeverity::Error, err.to_string()),
            }
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        load();
    };

    let pending = move || {
        state
            .appointments
            .get()
            .iter()
            .filter(|a| a.status == AppointmentStatus::Pending)
            .count()
    };

    view! {
        <div class="page">
            <h1>"My garage"</h1>
            <form class="search-bar" on:submit=on_submit>
                <input
                    prop:value=move || garage_id.get()
                    on:input=move |ev| garage_id.set(event_target_value(&ev))
                    placeholder="Garage id"
                />
                <button class="btn" type="submit">"Load appointments"</button>
            </form>
            <div class="panel">
                <div class="panel-header">
                    <span class="panel-title">"Appointments"</span>
                    <span class="panel-badge">{move || format!("{} pending", pending())}</span>
                </div>
                <div class="panel-body">
                    <For
                        each=move || state.appointments.get()
                        key=|a| (a.id, a.status)
                        children=move |appointment| {
                            view! { <AppointmentRow appointment=appointment /> }
                        }
                    />
                </div>
            </div>
        </div>
    }
}

#[component]
fn AppointmentRow(appointment: Appointment) -> impl IntoView {
    let state = use_app_state();
    let id = appointment.id;

    let set_status = move |status: AppointmentStatus| {
        let Some(token) = state.auth_token.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match api::update_appointment_status(&token, id, status).await {
                Ok(updated) => {
                    state.appointments.update(|list| {
                        if let Some(slot) = list.iter_mut().find(|a| a.id == id) {
                            *slot = updated;
                        }
                    });
                }
                Err(err) => state.notify(AlertSeverity::Error, err.to_string()),
            }
        });
    };

    // Next actions depend on where the appointment is in its lifecycle.
    let actions = match appointment.status {
        AppointmentStatus::Pending => vec![
            ("Confirm", AppointmentStatus::Confirmed),
            ("Decline", AppointmentStatus::Cancelled),
        ],
        AppointmentStatus::Confirmed => vec![("Start work", AppointmentStatus::InProgress)],
        AppointmentStatus::InProgress => vec![("Complete", AppointmentStatus::Completed)],
        AppointmentStatus::Completed | AppointmentStatus::Cancelled => Vec::new(),
    };

    view! {
        <div class="appointment-row">
            <span class=format!("status-badge {}", appointment_status_class(appointment.status))>
                {appointment.status.as_str()}
            </span>
            <span>{appointment.scheduled_at.format("%Y-%m-%d %H:%M").to_string()}</span>
            <span class="text-muted">
                {appointment.notes.clone().unwrap_or_else(|| "—".into())}
            </span>
            <span class="row-actions">
                {actions
                    .into_iter()
                    .map(|(label, status)| view! {
                        <button class="btn btn-sm" on:click=move |_| set_status(status)>
                            {label}
                        </button>
                    })
                    .collect_view()}
            </span>
        </div>
    }
}
