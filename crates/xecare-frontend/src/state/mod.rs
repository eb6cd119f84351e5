//! # Application State
//!
//! Reactive state management for the XeCare client.

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use uuid::Uuid;
use xecare_domain::{
    Appointment, EmergencyQuote, EmergencyRequest, Garage, UserProfile, Vehicle,
};
use xecare_journey::{CarProgress, RouteInfo};

/// Route estimation status for the active emergency request.
///
/// `Loaded` is immutable until an explicit recalculation replaces it.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum RouteStatus {
    #[default]
    Idle,
    Loading,
    Loaded(RouteInfo),
    Error(String),
}

impl RouteStatus {
    pub fn route(&self) -> Option<&RouteInfo> {
        match self {
            Self::Loaded(route) => Some(route),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Global application state. Signal handles are arena-allocated, so the
/// whole struct is cheaply copyable into event closures.
#[derive(Clone, Copy, Debug)]
pub struct AppState {
    pub auth_token: RwSignal<Option<String>>,
    pub current_user: RwSignal<Option<UserProfile>>,
    pub garages: RwSignal<Vec<Garage>>,
    pub vehicles: RwSignal<Vec<Vehicle>>,
    pub appointments: RwSignal<Vec<Appointment>>,
    pub active_request: RwSignal<Option<EmergencyRequest>>,
    pub quotes: RwSignal<Vec<EmergencyQuote>>,
    pub route_status: RwSignal<RouteStatus>,
    pub car_progress: RwSignal<Option<CarProgress>>,
    pub alerts: RwSignal<Vec<Alert>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            auth_token: RwSignal::new(None),
            current_user: RwSignal::new(None),
            garages: RwSignal::new(Vec::new()),
            vehicles: RwSignal::new(Vec::new()),
            appointments: RwSignal::new(Vec::new()),
            active_request: RwSignal::new(None),
            quotes: RwSignal::new(Vec::new()),
            route_status: RwSignal::new(RouteStatus::Idle),
            car_progress: RwSignal::new(None),
            alerts: RwSignal::new(Vec::new()),
        }
    }

    /// Push a toast alert.
    pub fn notify(&self, severity: AlertSeverity, message: impl Into<String>) {
        let alert = Alert {
            id: Uuid::new_v4(),
            severity,
            message: message.into(),
            timestamp: Utc::now(),
        };
        self.alerts.update(|alerts| {
            alerts.insert(0, alert);
            if alerts.len() > 10 {
                alerts.truncate(10);
            }
        });
    }

    /// Whether a signed-in session is present.
    pub fn is_authenticated(&self) -> bool {
        self.auth_token.get().is_some()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub struct Alert {
    pub id: Uuid,
    pub severity: AlertSeverity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertSeverity {
    Info,
    Warning,
    Error,
}

impl AlertSeverity {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "critical",
        }
    }
}

pub fn provide_app_state() {
    let state = AppState::new();
    provide_context(state);
}

pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_status_accessors() {
        assert!(!RouteStatus::Idle.is_loaded());
        assert!(!RouteStatus::Loading.is_loaded());
        assert!(!RouteStatus::Error("boom".into()).is_loaded());
        assert!(RouteStatus::Idle.route().is_none());
    }
}
