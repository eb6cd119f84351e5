//! Page and panel components for the XeCare client.

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod emergency;
pub mod garage_detail;
pub mod garage_form;
pub mod garage_search;
pub mod header;

pub use admin::AdminApprovalsPage;
pub use auth::LoginPage;
pub use dashboard::DashboardPage;
pub use emergency::{EmergencyDetailPage, EmergencyNewPage};
pub use garage_detail::GarageDetailPage;
pub use garage_form::{EditGaragePage, RegisterGaragePage};
pub use garage_search::GarageSearchPage;
pub use header::Header;

use xecare_domain::{AppointmentStatus, EmergencyStatus, GarageStatus};

/// CSS class for an emergency status badge.
pub fn emergency_status_class(status: EmergencyStatus) -> &'static str {
    match status {
        EmergencyStatus::Pending | EmergencyStatus::Quoted => "warning",
        EmergencyStatus::Accepted => "nominal",
        EmergencyStatus::Completed => "info",
        EmergencyStatus::Cancelled => "offline",
    }
}

/// CSS class for an appointment status badge.
pub fn appointment_status_class(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Pending => "warning",
        AppointmentStatus::Confirmed | AppointmentStatus::InProgress => "nominal",
        AppointmentStatus::Completed => "info",
        AppointmentStatus::Cancelled => "offline",
    }
}

/// CSS class for a garage listing status badge.
pub fn garage_status_class(status: GarageStatus) -> &'static str {
    match status {
        GarageStatus::PendingApproval => "warning",
        GarageStatus::Active => "nominal",
        GarageStatus::Inactive => "info",
        GarageStatus::Rejected => "offline",
    }
}

/// Render a star rating like `★★★★☆`.
pub fn stars(rating: u8) -> String {
    let full = usize::from(rating.min(5));
    "★".repeat(full) + &"☆".repeat(5 - full)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_renders_five_slots() {
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(5), "★★★★★");
        assert_eq!(stars(9), "★★★★★");
    }
}
