//! # XeCare Domain Model
//!
//! Core entities, value objects, and enums for the garage marketplace
//! client. These types are the single source of truth across the journey
//! simulator and the frontend, and mirror the backend's REST wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// VALUE OBJECTS
// =============================================================================

/// Geographic point (WGS84 latitude/longitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether the point lies within valid WGS84 bounds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Calculate great-circle distance to another point (Haversine formula).
    #[must_use]
    pub fn distance_to_km(&self, other: &GeoPoint) -> f64 {
        const EARTH_RADIUS_KM: f64 = 6371.0;

        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        // Hoan Kiem lake, Hanoi
        Self {
            latitude: 21.0285,
            longitude: 105.8542,
        }
    }
}

// =============================================================================
// ENUMS
// =============================================================================

/// Account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Customer,
    GarageOwner,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "CUSTOMER",
            Self::GarageOwner => "GARAGE_OWNER",
            Self::Admin => "ADMIN",
        }
    }
}

/// Garage listing lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GarageStatus {
    PendingApproval,
    Active,
    Inactive,
    Rejected,
}

impl GarageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingApproval => "PENDING_APPROVAL",
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Rejected => "REJECTED",
        }
    }
}

/// Appointment lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Emergency roadside-assistance request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmergencyStatus {
    Pending,
    Quoted,
    Accepted,
    Cancelled,
    Completed,
}

impl EmergencyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Quoted => "QUOTED",
            Self::Accepted => "ACCEPTED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        }
    }

    /// A request may only be cancelled before a quote is accepted.
    #[must_use]
    pub fn is_cancellable(&self) -> bool {
        matches!(self, Self::Pending | Self::Quoted)
    }

    /// Client-side guard for status transitions.
    #[must_use]
    pub fn can_transition_to(&self, next: EmergencyStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, EmergencyStatus::Quoted)
                | (Self::Pending, EmergencyStatus::Cancelled)
                | (Self::Quoted, EmergencyStatus::Accepted)
                | (Self::Quoted, EmergencyStatus::Cancelled)
                | (Self::Accepted, EmergencyStatus::Completed)
        )
    }
}

// =============================================================================
// ENTITY TYPES
// =============================================================================

/// Authenticated user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
}

/// Garage listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Garage {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: GarageStatus,
    pub average_rating: f32,
    pub review_count: u32,
    #[serde(default)]
    pub services: Vec<GarageService>,
    pub created_at: DateTime<Utc>,
}

impl Garage {
    /// Location of the garage, when geocoded.
    #[must_use]
    pub fn position(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }
}

/// A service offered by a garage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarageService {
    pub id: i64,
    pub garage_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub base_price: f64,
}

/// Customer vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub owner_id: i64,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub year: u16,
}

/// Appointment booked against a garage service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub garage_id: i64,
    pub user_id: i64,
    pub vehicle_id: i64,
    pub service_id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

/// Compact garage shape embedded in an emergency request once assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarageSummary {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GarageSummary {
    #[must_use]
    pub fn position(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }
}

/// Emergency roadside-assistance request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyRequest {
    pub id: i64,
    pub user_id: i64,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: EmergencyStatus,
    pub garage: Option<GarageSummary>,
    pub created_at: DateTime<Utc>,
}

impl EmergencyRequest {
    /// Incident location.
    #[must_use]
    pub fn incident_position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Assigned garage location, when known and geocoded.
    #[must_use]
    pub fn garage_position(&self) -> Option<GeoPoint> {
        self.garage.as_ref().and_then(GarageSummary::position)
    }
}

/// Price quote from a garage on an emergency request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyQuote {
    pub id: i64,
    pub request_id: i64,
    pub garage_id: i64,
    pub garage_name: String,
    pub price: f64,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Customer review of a garage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub garage_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Ratings are 1..=5 stars.
    pub fn validate_rating(rating: u8) -> Result<(), DomainError> {
        if (1..=5).contains(&rating) {
            Ok(())
        } else {
            Err(DomainError::InvalidRating(rating))
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level errors.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: i64 },

    #[error("Invalid coordinates: lat={lat}, lon={lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error("Invalid rating: {0} (expected 1..=5)")]
    InvalidRating(u8),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::address::en::StreetName;
    use fake::faker::company::en::CompanyName;
    use fake::Fake;

    fn sample_garage() -> Garage {
        Garage {
            id: 1,
            owner_id: 10,
            name: CompanyName().fake(),
            address: StreetName().fake(),
            phone: "0901234567".into(),
            description: None,
            latitude: Some(21.0285),
            longitude: Some(105.8542),
            status: GarageStatus::Active,
            average_rating: 4.5,
            review_count: 12,
            services: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn haversine_identical_points_is_zero() {
        let p = GeoPoint::new(21.0285, 105.8542);
        assert_eq!(p.distance_to_km(&p), 0.0);
    }

    #[test]
    fn haversine_antipodal_points() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        let d = a.distance_to_km(&b);
        // Half the Earth's circumference: pi * 6371 km
        assert!((d - std::f64::consts::PI * 6371.0).abs() < 1.0);
    }

    #[test]
    fn haversine_hanoi_sample() {
        let garage = GeoPoint::new(21.0285, 105.8542);
        let incident = GeoPoint::new(21.0122, 105.8019);
        let d = garage.distance_to_km(&incident);
        assert!(d > 4.0 && d < 7.0, "got {d}");
    }

    #[test]
    fn geo_point_bounds() {
        assert!(GeoPoint::new(21.0, 105.0).is_valid());
        assert!(!GeoPoint::new(91.0, 105.0).is_valid());
        assert!(!GeoPoint::new(21.0, -181.0).is_valid());
    }

    #[test]
    fn emergency_status_wire_format() {
        let json = serde_json::to_string(&EmergencyStatus::Accepted).unwrap();
        assert_eq!(json, "\"ACCEPTED\"");
        let back: EmergencyStatus = serde_json::from_str("\"QUOTED\"").unwrap();
        assert_eq!(back, EmergencyStatus::Quoted);
    }

    #[test]
    fn emergency_transitions() {
        assert!(EmergencyStatus::Pending.can_transition_to(EmergencyStatus::Quoted));
        assert!(EmergencyStatus::Quoted.can_transition_to(EmergencyStatus::Accepted));
        assert!(!EmergencyStatus::Accepted.can_transition_to(EmergencyStatus::Quoted));
        assert!(!EmergencyStatus::Cancelled.can_transition_to(EmergencyStatus::Accepted));
        assert!(EmergencyStatus::Quoted.is_cancellable());
        assert!(!EmergencyStatus::Accepted.is_cancellable());
    }

    #[test]
    fn garage_position_requires_both_coordinates() {
        let mut garage = sample_garage();
        assert!(garage.position().is_some());
        garage.longitude = None;
        assert!(garage.position().is_none());
    }

    #[test]
    fn review_rating_bounds() {
        assert!(Review::validate_rating(1).is_ok());
        assert!(Review::validate_rating(5).is_ok());
        assert!(Review::validate_rating(0).is_err());
        assert!(Review::validate_rating(6).is_err());
    }
}
