//! Journey replay CLI
//!
//! Replays the emergency rescue journey animation in the terminal, either
//! against a mocked request or one fetched from the XeCare backend.

use anyhow::{bail, Result};
use chrono::Utc;
use clap::Parser;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use xecare_domain::{EmergencyRequest, EmergencyStatus, GarageSummary, GeoPoint};
use xecare_journey::{estimate_route, JourneyPhase, JourneyTimeline};

#[derive(Parser, Debug)]
#[command(name = "journey-sim")]
#[command(about = "Replay a rescue journey animation in the terminal")]
struct Args {
    /// Emergency request id to fetch (omit for a mocked request)
    #[arg(short, long)]
    request_id: Option<i64>,

    /// API base URL
    #[arg(long, default_value = "http://localhost:8080/api")]
    api_url: String,

    /// Tick interval in milliseconds
    #[arg(long, default_value = "100")]
    tick_ms: u64,

    /// Time compression factor applied on top of the animation clock
    #[arg(long, default_value = "10")]
    speedup: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("journey_sim=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let request = match args.request_id {
        Some(id) => fetch_request(&args.api_url, id).await?,
        None => mock_request(),
    };

    info!(
        "Request #{} | status {} | incident ({:.4}, {:.4})",
        request.id,
        request.status.as_str(),
        request.latitude,
        request.longitude
    );

    // Same entry condition as the browser: the journey only runs for an
    // accepted request with a loaded route estimate.
    if request.status != EmergencyStatus::Accepted {
        bail!(
            "request status is {}, journey runs only when ACCEPTED",
            request.status.as_str()
        );
    }

    let route = estimate_route(request.garage_position(), request.incident_position())?;
    if request.garage_position().is_none() {
        warn!("garage has no geocoded location, using mocked estimate");
    }
    let timeline = JourneyTimeline::from_route(&route);
    info!(
        "Route: {} over {} (animated as {}s)",
        route.distance_text,
        route.duration_text,
        timeline.animation_secs()
    );
    let mut elapsed_ms = 0u64;
    let mut last_label = String::new();

    loop {
        let progress = timeline.sample(elapsed_ms);

        if progress.location_label != last_label {
            info!("--- {}", progress.location_label);
            last_label = progress.location_label.clone();
        }

        match progress.phase {
            JourneyPhase::Preparing => {
                if elapsed_ms % 1000 == 0 {
                    info!(
                        "PREPARING | departs in {}s",
                        timeline.preparing_ms().saturating_sub(elapsed_ms) / 1000 + 1
                    );
                }
            }
            JourneyPhase::Traveling => {
                if elapsed_ms % 1000 == 0 {
                    info!(
                        "TRAVELING | {:5.1}% | {:>4} km/h | {}s remaining",
                        progress.percent, progress.speed_kmh, progress.remaining_secs
                    );
                }
            }
            JourneyPhase::Arrived => {
                info!("ARRIVED   | 100.0% | rescue vehicle on site");
                break;
            }
        }

        sleep(Duration::from_millis(args.tick_ms / args.speedup.max(1))).await;
        elapsed_ms += args.tick_ms;
    }

    info!(
        "Journey complete: {} in {}s animated",
        route.distance_text,
        timeline.animation_secs()
    );

    Ok(())
}

/// Fetch an emergency request from the backend REST API.
async fn fetch_request(api_url: &str, id: i64) -> Result<EmergencyRequest> {
    let url = format!("{api_url}/emergencies/{id}");
    info!("Fetching {url}");
    let response = Client::new().get(&url).send().await?;
    if !response.status().is_success() {
        bail!("API returned status {}", response.status());
    }
    Ok(response.json().await?)
}

/// Mocked accepted request around central Hanoi.
fn mock_request() -> EmergencyRequest {
    let garage = GeoPoint::default();
    EmergencyRequest {
        id: 0,
        user_id: 0,
        description: "Flat tire on the ring road".into(),
        latitude: 21.0122,
        longitude: 105.8019,
        status: EmergencyStatus::Accepted,
        garage: Some(GarageSummary {
            id: 0,
            name: "Thanh Xuan Auto Care".into(),
            address: "215 Nguyen Trai, Thanh Xuan, Hanoi".into(),
            phone: "0901234567".into(),
            latitude: Some(garage.latitude),
            longitude: Some(garage.longitude),
        }),
        created_at: Utc::now(),
    }
}
