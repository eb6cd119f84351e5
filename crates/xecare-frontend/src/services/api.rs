//! # API Client
//!
//! Typed wrappers over the backend REST endpoints. All business logic
//! lives server-side; these functions only shape requests and decode
//! responses.

use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use xecare_domain::{
    Appointment, AppointmentStatus, EmergencyQuote, EmergencyRequest, Garage, GarageService,
    Review, UserProfile, Vehicle,
};

const API_URL: &str = "http://localhost:8080/api";

/// API-level errors surfaced to the UI.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Request failed ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn authorize(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
        None => builder,
    }
}

async fn decode<T: DeserializeOwned>(response: gloo_net::http::Response) -> ApiResult<T> {
    let status = response.status();
    if status == 401 {
        return Err(ApiError::Unauthorized);
    }
    if !response.ok() {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| "unexpected error".into());
        return Err(ApiError::Status { status, message });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn get_json<T: DeserializeOwned>(path: &str, token: Option<&str>) -> ApiResult<T> {
    let response = authorize(Request::get(&format!("{API_URL}{path}")), token)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    decode(response).await
}

async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    token: Option<&str>,
    body: &B,
) -> ApiResult<T> {
    let response = authorize(Request::post(&format!("{API_URL}{path}")), token)
        .json(body)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    decode(response).await
}

async fn put_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    token: Option<&str>,
    body: &B,
) -> ApiResult<T> {
    let response = authorize(Request::put(&format!("{API_URL}{path}")), token)
        .json(body)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    decode(response).await
}

// =============================================================================
// AUTH
// =============================================================================

#[derive(Serialize)]
pub struct LoginPayload<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct RegisterPayload<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub full_name: &'a str,
    pub phone: Option<&'a str>,
}

#[derive(Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

pub async fn login(email: &str, password: &str) -> ApiResult<AuthResponse> {
    post_json("/auth/login", None, &LoginPayload { email, password }).await
}

pub async fn register(payload: &RegisterPayload<'_>) -> ApiResult<AuthResponse> {
    post_json("/auth/register", None, payload).await
}

pub async fn fetch_profile(token: &str) -> ApiResult<UserProfile> {
    get_json("/users/me", Some(token)).await
}

// =============================================================================
// GARAGES
// =============================================================================

#[derive(Serialize)]
pub struct GaragePayload<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub phone: &'a str,
    pub description: Option<&'a str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub async fn search_garages(keyword: &str, service: &str) -> ApiResult<Vec<Garage>> {
    let mut query = Vec::new();
    if !keyword.is_empty() {
        query.push(format!("q={}", urlencode(keyword)));
    }
    if !service.is_empty() {
        query.push(format!("service={}", urlencode(service)));
    }
    let path = if query.is_empty() {
        "/garages".to_string()
    } else {
        format!("/garages?{}", query.join("&"))
    };
    get_json(&path, None).await
}

pub async fn fetch_garage(id: i64) -> ApiResult<Garage> {
    get_json(&format!("/garages/{id}"), None).await
}

pub async fn register_garage(token: &str, payload: &GaragePayload<'_>) -> ApiResult<Garage> {
    post_json("/garages", Some(token), payload).await
}

pub async fn update_garage(
    token: &str,
    id: i64,
    payload: &GaragePayload<'_>,
) -> ApiResult<Garage> {
    put_json(&format!("/garages/{id}"), Some(token), payload).await
}

pub async fn fetch_garage_services(garage_id: i64) -> ApiResult<Vec<GarageService>> {
    get_json(&format!("/garages/{garage_id}/services"), None).await
}

// =============================================================================
// GEOCODING
// =============================================================================

/// Result of server-side address validation/geocoding.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AddressCheck {
    pub valid: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub formatted: Option<String>,
}

#[derive(Serialize)]
struct AddressPayload<'a> {
    address: &'a str,
}

pub async fn validate_address(address: &str) -> ApiResult<AddressCheck> {
    post_json("/geocode/validate", None, &AddressPayload { address }).await
}

// =============================================================================
// VEHICLES & APPOINTMENTS
// =============================================================================

#[derive(Serialize)]
pub struct VehiclePayload<'a> {
    pub license_plate: &'a str,
    pub brand: &'a str,
    pub model: &'a str,
    pub year: u16,
}

#[derive(Serialize)]
pub struct AppointmentPayload {
    pub garage_id: i64,
    pub vehicle_id: i64,
    pub service_id: i64,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub notes: Option<String>,
}

pub async fn fetch_my_vehicles(token: &str) -> ApiResult<Vec<Vehicle>> {
    get_json("/vehicles", Some(token)).await
}

pub async fn create_vehicle(token: &str, payload: &VehiclePayload<'_>) -> ApiResult<Vehicle> {
    post_json("/vehicles", Some(token), payload).await
}

pub async fn create_appointment(
    token: &str,
    payload: &AppointmentPayload,
) -> ApiResult<Appointment> {
    post_json("/appointments", Some(token), payload).await
}

pub async fn fetch_my_appointments(token: &str) -> ApiResult<Vec<Appointment>> {
    get_json("/appointments", Some(token)).await
}

pub async fn fetch_garage_appointments(
    token: &str,
    garage_id: i64,
) -> ApiResult<Vec<Appointment>> {
    get_json(&format!("/garages/{garage_id}/appointments"), Some(token)).await
}

#[derive(Serialize)]
struct StatusPayload {
    status: AppointmentStatus,
}

pub async fn update_appointment_status(
    token: &str,
    id: i64,
    status: AppointmentStatus,
) -> ApiResult<Appointment> {
    put_json(
        &format!("/appointments/{id}/status"),
        Some(token),
        &StatusPayload { status },
    )
    .await
}

// =============================================================================
// EMERGENCY REQUESTS
// =============================================================================

#[derive(Serialize)]
pub struct EmergencyPayload<'a> {
    pub description: &'a str,
    pub latitude: f64,
    pub longitude: f64,
}

pub async fn create_emergency(
    token: &str,
    payload: &EmergencyPayload<'_>,
) -> ApiResult<EmergencyRequest> {
    post_json("/emergencies", Some(token), payload).await
}

pub async fn fetch_emergency(token: &str, id: i64) -> ApiResult<EmergencyRequest> {
    get_json(&format!("/emergencies/{id}"), Some(token)).await
}

pub async fn fetch_quotes(token: &str, request_id: i64) -> ApiResult<Vec<EmergencyQuote>> {
    get_json(&format!("/emergencies/{request_id}/quotes"), Some(token)).await
}

pub async fn accept_quote(
    token: &str,
    request_id: i64,
    quote_id: i64,
) -> ApiResult<EmergencyRequest> {
    post_json(
        &format!("/emergencies/{request_id}/quotes/{quote_id}/accept"),
        Some(token),
        &(),
    )
    .await
}

pub async fn cancel_emergency(token: &str, id: i64) -> ApiResult<EmergencyRequest> {
    post_json(&format!("/emergencies/{id}/cancel"), Some(token), &()).await
}

// =============================================================================
// REVIEWS
// =============================================================================

#[derive(Serialize)]
pub struct ReviewPayload<'a> {
    pub garage_id: i64,
    pub rating: u8,
    pub comment: Option<&'a str>,
}

pub async fn fetch_reviews(garage_id: i64) -> ApiResult<Vec<Review>> {
    get_json(&format!("/garages/{garage_id}/reviews"), None).await
}

pub async fn create_review(token: &str, payload: &ReviewPayload<'_>) -> ApiResult<Review> {
    post_json("/reviews", Some(token), payload).await
}

// =============================================================================
// ADMIN
// =============================================================================

pub async fn fetch_pending_garages(token: &str) -> ApiResult<Vec<Garage>> {
    get_json("/admin/garages/pending", Some(token)).await
}

pub async fn approve_garage(token: &str, id: i64) -> ApiResult<Garage> {
    post_json(&format!("/admin/garages/{id}/approve"), Some(token), &()).await
}

pub async fn reject_garage(token: &str, id: i64, reason: &str) -> ApiResult<Garage> {
    #[derive(Serialize)]
    struct RejectPayload<'a> {
        reason: &'a str,
    }
    post_json(
        &format!("/admin/garages/{id}/reject"),
        Some(token),
        &RejectPayload { reason },
    )
    .await
}

/// Minimal percent-encoding for query values.
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urlencode_escapes_reserved_characters() {
        assert_eq!(urlencode("oil change"), "oil+change");
        assert_eq!(urlencode("a&b=c"), "a%26b%3Dc");
        assert_eq!(urlencode("garage-1_x.y~z"), "garage-1_x.y~z");
    }
}
