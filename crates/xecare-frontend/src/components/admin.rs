//! # Admin Approvals
//!
//! Queue of garages awaiting approval.

use leptos::prelude::*;
use leptos::task::spawn_local;
use xecare_domain::Garage;

use crate::services::api;
use crate::state::{use_app_state, AlertSeverity};

#[component]
pub fn AdminApprovalsPage() -> impl IntoView {
    let state = use_app_state();
    let pending = RwSignal::new(Vec::<Garage>::new());

    let reload = move || {
        let Some(token) = state.auth_token.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match api::fetch_pending_garages(&token).await {
                Ok(list) => pending.set(list),
                Err(err) => state.notify(AlertSeverity::Error, err.to_string()),
            }
        });
    };

    Effect::new(move |_| {
        state.auth_token.track();
        reload();
    });

    let decide = move |garage_id: i64, approve: bool| {
        let Some(token) = state.auth_token.get_untracked() else {
            return;
        };
        spawn_local(async move {
            let result = if approve {
                api::approve_garage(&token, garage_id).await
            } else {
                api::reject_garage(&token, garage_id, "Does not meet listing requirements").await
            };
            match result {
                Ok(_) => {
                    pending.update(|list| list.retain(|g| g.id != garage_id));
                    state.notify(
                        AlertSeverity::Info,
                        if approve { "Garage approved" } else { "Garage rejected" },
                    );
                }
                Err(err) => state.notify(AlertSeverity::Error, err.to_string()),
            }
        });
    };

    view! {
        <div class="page">
            <h1>"Garage approvals"</h1>
            <div class="panel">
                <div class="panel-header">
                    <span class="panel-title">"Awaiting review"</span>
                    <span class="panel-badge">{move || pending.get().len()}</span>
                </div>
                <div class="panel-body">
                    <For
                        each=move || pending.get()
                        key=|garage| garage.id
                        children=move |garage| {
                            let id = garage.id;
                            view! {
                                <div class="approval-row">
                                    <div>
                                        <strong>{garage.name.clone()}</strong>
                                        <div class="text-muted">{garage.address.clone()}</div>
                                    </div>
                                    <div class="row-actions">
                                        <button
                                            class="btn btn-primary btn-sm"
                                            on:click=move |_| decide(id, true)
                                        >
                                            "Approve"
                                        </button>
                                        <button
                                            class="btn btn-danger btn-sm"
                                            on:click=move |_| decide(id, false)
                                        >
                                            "Reject"
                                        </button>
                                    </div>
                                </div>
                            }
                        }
                    />
                    <Show when=move || pending.get().is_empty()>
                        <div class="text-muted">"Nothing waiting for review"</div>
                    </Show>
                </div>
            </div>
        </div>
    }
}
