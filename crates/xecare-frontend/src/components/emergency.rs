//! # Emergency Request Pages
//!
//! Filing a roadside-assistance request, tracking its quotes, and the
//! simulated "rescue vehicle en route" journey once a quote is accepted.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};
use xecare_domain::{EmergencyQuote, EmergencyStatus};
use xecare_journey::{estimate_route, CarProgress, JourneyPhase};

use super::emergency_status_class;
use crate::services::api;
use crate::services::journey::JourneyController;
use crate::state::{use_app_state, AlertSeverity, RouteStatus};

/// Form for filing a new emergency request.
#[component]
pub fn EmergencyNewPage() -> impl IntoView {
    let state = use_app_state();
    let navigate = use_navigate();

    let description = RwSignal::new(String::new());
    let latitude = RwSignal::new(String::new());
    let longitude = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(token) = state.auth_token.get_untracked() else {
            state.notify(AlertSeverity::Warning, "Sign in to request assistance");
            return;
        };
        let (Ok(lat), Ok(lon)) = (
            latitude.get_untracked().trim().parse::<f64>(),
            longitude.get_untracked().trim().parse::<f64>(),
        ) else {
            state.notify(AlertSeverity::Warning, "Enter your location coordinates");
            return;
        };

        submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let text = description.get_untracked();
            let payload = api::EmergencyPayload {
                description: &text,
                latitude: lat,
                longitude: lon,
            };
            match api::create_emergency(&token, &payload).await {
                Ok(request) => {
                    state.notify(AlertSeverity::Info, "Rescue request sent");
                    navigate(&format!("/emergencies/{}", request.id), Default::default());
                }
                Err(err) => state.notify(AlertSeverity::Error, err.to_string()),
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="page page-narrow">
            <h1>"Roadside rescue"</h1>
            <form class="panel" on:submit=on_submit>
                <label>"What happened?"</label>
                <textarea
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                    placeholder="Flat tire, dead battery, ..."
                />
                <div class="form-row">
                    <div>
                        <label>"Latitude"</label>
                        <input
                            prop:value=move || latitude.get()
                            on:input=move |ev| latitude.set(event_target_value(&ev))
                            placeholder="21.0122"
                        />
                    </div>
                    <div>
                        <label>"Longitude"</label>
                        <input
                            prop:value=move || longitude.get()
                            on:input=move |ev| longitude.set(event_target_value(&ev))
                            placeholder="105.8019"
                        />
                    </div>
                </div>
                <button class="btn btn-primary" type="submit" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Sending..." } else { "Request rescue" }}
                </button>
            </form>
        </div>
    }
}

/// Emergency request detail: status, quotes, and the journey simulation.
#[component]
pub fn EmergencyDetailPage() -> impl IntoView {
    let state = use_app_state();
    let controller = JourneyController::new(state.car_progress);
    let params = use_params_map();
    let request_id =
        Memo::new(move |_| params.read().get("id").and_then(|v| v.parse::<i64>().ok()));

    // Estimation runs once per request load and again on manual refresh.
    // It is synchronous local math; "loading" only exists so the panel can
    // render a consistent lifecycle.
    let calculate_route = move || {
        let Some(request) = state.active_request.get_untracked() else {
            state.route_status.set(RouteStatus::Idle);
            return;
        };
        state.route_status.set(RouteStatus::Loading);
        match estimate_route(request.garage_position(), request.incident_position()) {
            Ok(route) => state.route_status.set(RouteStatus::Loaded(route)),
            Err(err) => state.route_status.set(RouteStatus::Error(err.to_string())),
        }
    };

    let load_request = move || {
        let Some(id) = request_id.get_untracked() else {
            return;
        };
        let Some(token) = state.auth_token.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match api::fetch_emergency(&token, id).await {
                Ok(request) => {
                    let quoted = request.status == EmergencyStatus::Quoted;
                    state.active_request.set(Some(request));
                    calculate_route();
                    if quoted {
                        match api::fetch_quotes(&token, id).await {
                            Ok(quotes) => state.quotes.set(quotes),
                            Err(err) => log::warn!("quote fetch failed: {err}"),
                        }
                    } else {
                        state.quotes.set(Vec::new());
                    }
                }
                Err(err) => state.notify(AlertSeverity::Error, err.to_string()),
            }
        });
    };

    Effect::new(move |_| {
        request_id.track();
        state.auth_token.track();
        controller.reset();
        state.active_request.set(None);
        state.route_status.set(RouteStatus::Idle);
        load_request();
    });

    // The animation arms itself only once the request is accepted and the
    // route estimate is loaded; a finished run leaves its terminal snapshot
    // in place rather than restarting.
    Effect::new(move |_| {
        let accepted = state
            .active_request
            .get()
            .is_some_and(|r| r.status == EmergencyStatus::Accepted);
        let status = state.route_status.get();
        if accepted
            && !controller.is_running()
            && state.car_progress.get_untracked().is_none()
        {
            if let Some(route) = status.route() {
                controller.start(route);
            }
        }
    });

    // Unmount must leave no timer behind.
    on_cleanup(move || controller.reset());

    let on_refresh = move |_| {
        controller.reset();
        state.route_status.set(RouteStatus::Idle);
        load_request();
    };

    let on_replay = move |_| {
        controller.reset();
        let accepted = state
            .active_request
            .get_untracked()
            .is_some_and(|r| r.status == EmergencyStatus::Accepted);
        if let (true, Some(route)) = (accepted, state.route_status.get_untracked().route()) {
            controller.start(route);
        }
    };

    let on_retry_route = move |_| calculate_route();

    let on_cancel = move |_| {
        let (Some(token), Some(id)) = (state.auth_token.get_untracked(), request_id.get_untracked())
        else {
            return;
        };
        spawn_local(async move {
            match api::cancel_emergency(&token, id).await {
                Ok(request) => {
                    state.active_request.set(Some(request));
                    state.notify(AlertSeverity::Info, "Request cancelled");
                }
                Err(err) => state.notify(AlertSeverity::Error, err.to_string()),
            }
        });
    };

    let request = move || state.active_request.get();

    view! {
        <div class="page">
            <Show
                when=move || request().is_some()
                fallback=|| view! { <div class="panel text-muted">"Loading request..."</div> }
            >
                {move || {
                    request().map(|req| {
                        let cancellable = req.status.is_cancellable();
                        view! {
                            <div class="panel">
                                <div class="panel-header">
                                    <span class="panel-title">
                                        "Rescue request #" {req.id}
                                    </span>
                                    <span
                                        class=format!(
                                            "status-badge {}",
                                            emergency_status_class(req.status),
                                        )
                                    >
                                        {req.status.as_str()}
                                    </span>
                                </div>
                                <div class="panel-body">
                                    <p>{req.description.clone()}</p>
                                    <p class="text-muted">
                                        {format!(
                                            "Incident at ({:.4}, {:.4})",
                                            req.latitude, req.longitude,
                                        )}
                                    </p>
                                    {req.garage.as_ref().map(|g| view! {
                                        <div class="garage-summary">
                                            <strong>{g.name.clone()}</strong>
                                            <div>{g.address.clone()}</div>
                                            <div>{g.phone.clone()}</div>
                                        </div>
                                    })}
                                    <Show when=move || cancellable>
                                        <button class="btn btn-danger" on:click=on_cancel>
                                            "Cancel request"
                                        </button>
                                    </Show>
                                </div>
                            </div>
                        }
                    })
                }}
            </Show>

            <QuoteList />

            <RoutePanel on_retry=on_retry_route />

            <JourneyPanel on_replay=on_replay on_refresh=on_refresh />
        </div>
    }
}

/// Quotes offered by garages, with accept actions while QUOTED.
#[component]
fn QuoteList() -> impl IntoView {
    let state = use_app_state();

    let quoted = move || {
        state
            .active_request
            .get()
            .is_some_and(|r| r.status == EmergencyStatus::Quoted)
    };

    view! {
        <Show when=move || quoted() && !state.quotes.get().is_empty()>
            <div class="panel">
                <div class="panel-header">
                    <span class="panel-title">"Quotes"</span>
                    <span class="panel-badge">{move || state.quotes.get().len()}</span>
                </div>
                <div class="panel-body">
                    <For
                        each=move || state.quotes.get()
                        key=|quote| quote.id
                        children=move |quote| view! { <QuoteRow quote=quote /> }
                    />
                </div>
            </div>
        </Show>
    }
}

#[component]
fn QuoteRow(quote: EmergencyQuote) -> impl IntoView {
    let state = use_app_state();
    let request_id = quote.request_id;
    let quote_id = quote.id;

    let on_accept = move |_| {
        let Some(token) = state.auth_token.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match api::accept_quote(&token, request_id, quote_id).await {
                Ok(request) => {
                    // Moving to ACCEPTED is what arms the journey animation.
                    state.active_request.set(Some(request));
                    state.quotes.set(Vec::new());
                    state.notify(AlertSeverity::Info, "Quote accepted, help is on the way");
                }
                Err(err) => state.notify(AlertSeverity::Error, err.to_string()),
            }
        });
    };

    view! {
        <div class="quote-row">
            <div class="quote-details">
                <strong>{quote.garage_name.clone()}</strong>
                {quote.message.clone().map(|m| view! { <div class="text-muted">{m}</div> })}
            </div>
            <div class="quote-price">{format!("{:.0}k VND", quote.price / 1000.0)}</div>
            <button class="btn btn-primary btn-sm" on:click=on_accept>"Accept"</button>
        </div>
    }
}

/// Route estimate panel: loading, loaded, or error with retry.
#[component]
fn RoutePanel(
    on_retry: impl Fn(web_sys::MouseEvent) + Copy + Send + Sync + 'static,
) -> impl IntoView {
    let state = use_app_state();

    view! {
        <Show when=move || state.route_status.get() != RouteStatus::Idle>
            <div class="panel">
                <div class="panel-header">
                    <span class="panel-title">"Route estimate"</span>
                </div>
                <div class="panel-body">
                    {move || match state.route_status.get() {
                        RouteStatus::Idle => view! { <div></div> }.into_any(),
                        RouteStatus::Loading => {
                            view! { <div class="text-muted">"Estimating route..."</div> }
                                .into_any()
                        }
                        RouteStatus::Loaded(route) => view! {
                            <div class="route-summary">
                                <span class="metric">
                                    <span class="metric-label">"DISTANCE"</span>
                                    <span class="metric-value">{route.distance_text.clone()}</span>
                                </span>
                                <span class="metric">
                                    <span class="metric-label">"ETA"</span>
                                    <span class="metric-value">{route.duration_text.clone()}</span>
                                </span>
                            </div>
                        }
                        .into_any(),
                        RouteStatus::Error(message) => view! {
                            <div class="error-panel">
                                <span>{message}</span>
                                <button class="btn btn-sm" on:click=on_retry>"Retry"</button>
                            </div>
                        }
                        .into_any(),
                    }}
                </div>
            </div>
        </Show>
    }
}

/// The simulated journey: progress bar, countdown, phase badge, speed.
#[component]
fn JourneyPanel(
    on_replay: impl Fn(web_sys::MouseEvent) + Copy + Send + Sync + 'static,
    on_refresh: impl Fn(web_sys::MouseEvent) + Copy + Send + Sync + 'static,
) -> impl IntoView {
    let state = use_app_state();

    view! {
        <Show when=move || state.car_progress.get().is_some()>
            {move || {
                state.car_progress.get().map(|p| view! { <JourneyReadout progress=p /> })
            }}
            <div class="journey-actions">
                <button class="btn btn-sm" on:click=on_replay>"Replay journey"</button>
                <button class="btn btn-sm" on:click=on_refresh>"Refresh"</button>
            </div>
        </Show>
    }
}

#[component]
fn JourneyReadout(progress: CarProgress) -> impl IntoView {
    let phase_class = match progress.phase {
        JourneyPhase::Preparing => "warning",
        JourneyPhase::Traveling => "nominal",
        JourneyPhase::Arrived => "info",
    };

    view! {
        <div class="panel journey-panel">
            <div class="panel-header">
                <span class="panel-title">"Rescue vehicle"</span>
                <span class=format!("status-badge {phase_class}")>
                    {progress.phase.as_str()}
                </span>
            </div>
            <div class="panel-body">
                <div class="journey-location">{progress.location_label.clone()}</div>
                <div class="progress-bar">
                    <div
                        class="progress-fill"
                        style=format!("width: {:.1}%;", progress.percent)
                    ></div>
                </div>
                <div class="journey-metrics">
                    <span class="metric">
                        <span class="metric-label">"PROGRESS"</span>
                        <span class="metric-value">{format!("{:.0}%", progress.percent)}</span>
                    </span>
                    <span class="metric">
                        <span class="metric-label">"REMAINING"</span>
                        <span class="metric-value">
                            {format_countdown(progress.remaining_secs)}
                        </span>
                    </span>
                    <span class="metric">
                        <span class="metric-label">"SPEED"</span>
                        <span class="metric-value">
                            {format!("{} km/h", progress.speed_kmh)}
                        </span>
                    </span>
                    <span class="metric">
                        <span class="metric-label">"DISTANCE"</span>
                        <span class="metric-value">
                            {format!("{:.1} km", progress.distance_km)}
                        </span>
                    </span>
                </div>
            </div>
        </div>
    }
}

/// `M:SS` countdown rendering.
fn format_countdown(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_formatting() {
        assert_eq!(format_countdown(0), "0:00");
        assert_eq!(format_countdown(59), "0:59");
        assert_eq!(format_countdown(220), "3:40");
        assert_eq!(format_countdown(3605), "60:05");
    }
}
