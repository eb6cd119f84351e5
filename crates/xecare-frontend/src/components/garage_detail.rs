//! # Garage Detail Page
//!
//! Listing detail with services, appointment booking, and reviews.

use chrono::{DateTime, NaiveDateTime, Utc};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use xecare_domain::{Garage, Review};

use super::stars;
use crate::services::api;
use crate::state::{use_app_state, AlertSeverity};

#[component]
pub fn GarageDetailPage() -> impl IntoView {
    let state = use_app_state();
    let params = use_params_map();
    let garage_id =
        Memo::new(move |_| params.read().get("id").and_then(|v| v.parse::<i64>().ok()));

    let garage = RwSignal::new(None::<Garage>);
    let reviews = RwSignal::new(Vec::<Review>::new());

    Effect::new(move |_| {
        let Some(id) = garage_id.get() else { return };
        spawn_local(async move {
            match api::fetch_garage(id).await {
                Ok(g) => garage.set(Some(g)),
                Err(err) => state.notify(AlertSeverity::Error, err.to_string()),
            }
            match api::fetch_reviews(id).await {
                Ok(list) => reviews.set(list),
                Err(err) => log::warn!("review fetch failed: {err}"),
            }
        });
    });

    view! {
        <div class="page">
            <Show
                when=move || garage.get().is_some()
                fallback=|| view! { <div class="panel text-muted">"Loading garage..."</div> }
            >
                {move || {
                    garage.get().map(|g| view! {
                        <div class="panel">
                            <div class="panel-header">
                                <span class="panel-title">{g.name.clone()}</span>
                                <span class="stars">
                                    {stars(g.average_rating.round() as u8)}
                                </span>
                            </div>
                            <div class="panel-body">
                                <div>{g.address.clone()}</div>
                                <div>{g.phone.clone()}</div>
                                {g.description.clone().map(|d| view! { <p>{d}</p> })}
                            </div>
                        </div>
                    })
                }}
            </Show>

            {move || garage_id.get().map(|id| view! { <BookingForm garage_id=id /> })}

            <div class="panel">
                <div class="panel-header">
                    <span class="panel-title">"Reviews"</span>
                    <span class="panel-badge">{move || reviews.get().len()}</span>
                </div>
                <div class="panel-body">
                    <For
                        each=move || reviews.get()
                        key=|review| review.id
                        children=move |review| view! {
                            <div class="review-row">
                                <span class="stars">{stars(review.rating)}</span>
                                <strong>{review.user_name.clone()}</strong>
                                {review.comment.clone().map(|c| view! { <p>{c}</p> })}
                            </div>
                        }
                    />
                </div>
            </div>

            {move || garage_id.get().map(|id| view! { <ReviewForm garage_id=id reviews=reviews /> })}
        </div>
    }
}

/// Appointment booking against one of the garage's services.
#[component]
fn BookingForm(garage_id: i64) -> impl IntoView {
    let state = use_app_state();
    let services = RwSignal::new(Vec::<xecare_domain::GarageService>::new());
    let service_id = RwSignal::new(String::new());
    let vehicle_id = RwSignal::new(String::new());
    let scheduled = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());

    Effect::new(move |_| {
        spawn_local(async move {
            match api::fetch_garage_services(garage_id).await {
                Ok(list) => services.set(list),
                Err(err) => log::warn!("service fetch failed: {err}"),
            }
        });
        if let Some(token) = state.auth_token.get() {
            spawn_local(async move {
                match api::fetch_my_vehicles(&token).await {
                    Ok(list) => state.vehicles.set(list),
                    Err(err) => log::warn!("vehicle fetch failed: {err}"),
                }
            });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(token) = state.auth_token.get_untracked() else {
            state.notify(AlertSeverity::Warning, "Sign in to book an appointment");
            return;
        };
        let (Ok(service), Ok(vehicle)) = (
            service_id.get_untracked().parse::<i64>(),
            vehicle_id.get_untracked().parse::<i64>(),
        ) else {
            state.notify(AlertSeverity::Warning, "Pick a service and a vehicle");
            return;
        };
        let Some(when) = parse_local_datetime(&scheduled.get_untracked()) else {
            state.notify(AlertSeverity::Warning, "Pick a valid date and time");
            return;
        };

        spawn_local(async move {
            let note_text = notes.get_untracked();
            let payload = api::AppointmentPayload {
                garage_id,
                vehicle_id: vehicle,
                service_id: service,
                scheduled_at: when,
                notes: (!note_text.is_empty()).then_some(note_text),
            };
            match api::create_appointment(&token, &payload).await {
                Ok(_) => state.notify(AlertSeverity::Info, "Appointment requested"),
                Err(err) => state.notify(AlertSeverity::Error, err.to_string()),
            }
        });
    };

    view! {
        <form class="panel" on:submit=on_submit>
            <div class="panel-header">
                <span class="panel-title">"Book an appointment"</span>
            </div>
            <div class="panel-body form-grid">
                <select on:change=move |ev| service_id.set(event_target_value(&ev))>
                    <option value="">"Select a service"</option>
                    <For
                        each=move || services.get()
                        key=|s| s.id
                        children=move |s| view! {
                            <option value=s.id.to_string()>
                                {format!("{} ({:.0}k VND)", s.name, s.base_price / 1000.0)}
                            </option>
                        }
                    />
                </select>
                <select on:change=move |ev| vehicle_id.set(event_target_value(&ev))>
                    <option value="">"Select a vehicle"</option>
                    <For
                        each=move || state.vehicles.get()
                        key=|v| v.id
                        children=move |v| view! {
                            <option value=v.id.to_string()>
                                {format!("{} {} ({})", v.brand, v.model, v.license_plate)}
                            </option>
                        }
                    />
                </select>
                <input
                    type="datetime-local"
                    on:input=move |ev| scheduled.set(event_target_value(&ev))
                />
                <input
                    prop:value=move || notes.get()
                    on:input=move |ev| notes.set(event_target_value(&ev))
                    placeholder="Notes (optional)"
                />
                <button class="btn btn-primary" type="submit">"Book"</button>
            </div>
        </form>
    }
}

/// Star-rating review form.
#[component]
fn ReviewForm(garage_id: i64, reviews: RwSignal<Vec<Review>>) -> impl IntoView {
    let state = use_app_state();
    let rating = RwSignal::new(5u8);
    let comment = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(token) = state.auth_token.get_untracked() else {
            state.notify(AlertSeverity::Warning, "Sign in to leave a review");
            return;
        };
        if Review::validate_rating(rating.get_untracked()).is_err() {
            state.notify(AlertSeverity::Warning, "Rating must be 1 to 5 stars");
            return;
        }

        spawn_local(async move {
            let text = comment.get_untracked();
            let payload = api::ReviewPayload {
                garage_id,
                rating: rating.get_untracked(),
                comment: (!text.is_empty()).then_some(text.as_str()),
            };
            match api::create_review(&token, &payload).await {
                Ok(review) => {
                    reviews.update(|list| list.insert(0, review));
                    comment.set(String::new());
                    state.notify(AlertSeverity::Info, "Thanks for your review");
                }
                Err(err) => state.notify(AlertSeverity::Error, err.to_string()),
            }
        });
    };

    view! {
        <form class="panel" on:submit=on_submit>
            <div class="panel-header">
                <span class="panel-title">"Leave a review"</span>
            </div>
            <div class="panel-body">
                <select on:change=move |ev| {
                    if let Ok(value) = event_target_value(&ev).parse::<u8>() {
                        rating.set(value);
                    }
                }>
                    {(1..=5u8).rev().map(|n| view! {
                        <option value=n.to_string() selected=n == 5>
                            {super::stars(n)}
                        </option>
                    }).collect_view()}
                </select>
                <textarea
                    prop:value=move || comment.get()
                    on:input=move |ev| comment.set(event_target_value(&ev))
                    placeholder="How was the service?"
                />
                <button class="btn btn-primary" type="submit">"Submit review"</button>
            </div>
        </form>
    }
}

/// Parse the `datetime-local` input format into UTC.
fn parse_local_datetime(value: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    Some(naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_datetime_local_values() {
        let parsed = parse_local_datetime("2026-09-01T14:30").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-09-01T14:30:00+00:00");
        assert!(parse_local_datetime("2026-09-01T14:30:15").is_some());
        assert!(parse_local_datetime("tomorrow").is_none());
    }
}
