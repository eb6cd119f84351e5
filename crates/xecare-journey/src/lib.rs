//! # XeCare Journey Simulator
//!
//! Client-side synthesis of a "rescue vehicle en route" experience for
//! emergency roadside-assistance requests. The backend provides no live
//! position feed; everything here is derived from a single estimated
//! distance/duration pair.
//!
//! ## Features
//!
//! - Straight-line (Haversine) distance and naive urban ETA estimation
//! - Deterministic preparing/traveling/arrived phase timeline
//! - Mocked estimates when the garage has no geocoded location
//!
//! The timeline is a pure function of elapsed wall-clock milliseconds, so
//! the same core drives both the browser animation session and the
//! `journey-sim` terminal replay tool.

pub mod estimate;
pub mod timeline;

pub use estimate::{estimate_route, EstimateError, RouteInfo};
pub use timeline::{CarProgress, JourneyPhase, JourneyTimeline};
