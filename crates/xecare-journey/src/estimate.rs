//! Route distance/duration estimation between a garage and an incident.
//!
//! No routing engine is involved: with both coordinates available this is
//! straight-line Haversine distance at a fixed urban average speed, and
//! with the garage location missing it falls back to a mocked estimate.

use rand::Rng;
use serde::{Deserialize, Serialize};
use xecare_domain::GeoPoint;

/// Assumed urban average speed for the naive ETA.
pub const URBAN_SPEED_KMH: f64 = 30.0;

/// Mocked fallback ranges when the garage has no geocoded location.
const MOCK_DISTANCE_KM: std::ops::Range<f64> = 5.0..25.0;
const MOCK_DURATION_MIN: std::ops::Range<u32> = 10..40;

/// Computed route estimate between garage and incident.
///
/// `distance_text`/`duration_text` are the display strings the backend or
/// UI carries around; the phase timeline re-parses them defensively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub distance_km: f64,
    pub duration_minutes: u32,
    pub distance_text: String,
    pub duration_text: String,
}

impl RouteInfo {
    fn new(distance_km: f64, duration_minutes: u32) -> Self {
        Self {
            distance_km,
            duration_minutes,
            distance_text: format!("{distance_km:.1} km"),
            duration_text: format!("{duration_minutes} min"),
        }
    }
}

/// Estimation errors.
#[derive(Debug, thiserror::Error)]
pub enum EstimateError {
    #[error("Invalid coordinates: lat={lat}, lon={lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },
}

/// Estimate the route from `garage` to `incident`.
///
/// A missing garage position yields a mocked estimate rather than an
/// error; the incident position is always required and validated.
pub fn estimate_route(
    garage: Option<GeoPoint>,
    incident: GeoPoint,
) -> Result<RouteInfo, EstimateError> {
    estimate_route_with(garage, incident, &mut rand::thread_rng())
}

/// Estimation with an injected RNG for the mocked fallback.
pub fn estimate_route_with<R: Rng>(
    garage: Option<GeoPoint>,
    incident: GeoPoint,
    rng: &mut R,
) -> Result<RouteInfo, EstimateError> {
    if !incident.is_valid() {
        return Err(EstimateError::InvalidCoordinates {
            lat: incident.latitude,
            lon: incident.longitude,
        });
    }

    match garage {
        Some(origin) => {
            if !origin.is_valid() {
                return Err(EstimateError::InvalidCoordinates {
                    lat: origin.latitude,
                    lon: origin.longitude,
                });
            }
            let distance_km = origin.distance_to_km(&incident);
            let duration_minutes = (distance_km / URBAN_SPEED_KMH * 60.0).round() as u32;
            Ok(RouteInfo::new(distance_km, duration_minutes))
        }
        None => {
            // Placeholder for missing routing data, matching real-world
            // magnitudes for an urban callout.
            let distance_km = rng.gen_range(MOCK_DISTANCE_KM);
            let duration_minutes = rng.gen_range(MOCK_DURATION_MIN);
            Ok(RouteInfo::new(distance_km, duration_minutes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn estimate_from_known_coordinates() {
        let garage = GeoPoint::new(21.0285, 105.8542);
        let incident = GeoPoint::new(21.0122, 105.8019);
        let route = estimate_route(Some(garage), incident).unwrap();

        assert!(route.distance_km > 4.0 && route.distance_km < 7.0);
        assert_eq!(
            route.duration_minutes,
            (route.distance_km / URBAN_SPEED_KMH * 60.0).round() as u32
        );
        assert!(route.distance_text.ends_with(" km"));
        assert!(route.duration_text.ends_with(" min"));
    }

    #[test]
    fn estimate_same_point_is_zero() {
        let p = GeoPoint::new(21.0285, 105.8542);
        let route = estimate_route(Some(p), p).unwrap();
        assert_eq!(route.distance_km, 0.0);
        assert_eq!(route.duration_minutes, 0);
    }

    #[test]
    fn mocked_fallback_stays_in_range() {
        let incident = GeoPoint::new(21.0122, 105.8019);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let route = estimate_route_with(None, incident, &mut rng).unwrap();
            assert!((5.0..25.0).contains(&route.distance_km));
            assert!((10..40).contains(&route.duration_minutes));
        }
    }

    #[test]
    fn invalid_incident_coordinates_error() {
        let incident = GeoPoint::new(95.0, 105.8019);
        let err = estimate_route(None, incident).unwrap_err();
        assert!(matches!(err, EstimateError::InvalidCoordinates { .. }));
    }

    #[test]
    fn invalid_garage_coordinates_error() {
        let garage = GeoPoint::new(21.0, 200.0);
        let incident = GeoPoint::new(21.0122, 105.8019);
        let err = estimate_route(Some(garage), incident).unwrap_err();
        assert!(matches!(err, EstimateError::InvalidCoordinates { .. }));
    }
}
