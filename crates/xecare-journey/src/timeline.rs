//! Deterministic phase timeline for the rescue journey animation.
//!
//! The animation deliberately compresses the real ETA to one-third for UX
//! pacing; this is not a live tracker. All state is a pure function of
//! elapsed milliseconds since the run started, which makes the invariants
//! (forward-only phases, monotonic progress) hold by construction.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::estimate::RouteInfo;

/// Assumed when the duration text carries no parseable integer.
pub const DEFAULT_MINUTES: u32 = 25;
/// Ceiling for parsed ETAs. Anything above a day is garbage input; the
/// clamp also keeps every derived duration inside browser timer range.
pub const MAX_MINUTES: u32 = 24 * 60;
/// Assumed when the distance text carries no parseable number.
pub const DEFAULT_DISTANCE_KM: f64 = 5.0;

/// Display floor for the synthesized speed readout.
const MIN_SPEED_KMH: u32 = 50;

const PREPARING_LABEL: &str = "Garage crew is preparing the rescue vehicle";
const ARRIVED_LABEL: &str = "Arrived at your location";

/// Coarse location descriptions keyed by progress thresholds.
const LOCATION_BUCKETS: [(f64, &str); 6] = [
    (15.0, "Rescue vehicle is leaving the garage"),
    (35.0, "On the main road heading your way"),
    (60.0, "About halfway to your location"),
    (80.0, "Entering your area"),
    (95.0, "A few streets away"),
    (100.0, "Almost there, pulling up"),
];

/// Animation phase. Forward-only within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JourneyPhase {
    Preparing,
    Traveling,
    Arrived,
}

impl JourneyPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preparing => "PREPARING",
            Self::Traveling => "TRAVELING",
            Self::Arrived => "ARRIVED",
        }
    }
}

/// Snapshot of the simulated rescue vehicle, read-only to presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarProgress {
    pub percent: f64,
    pub phase: JourneyPhase,
    pub location_label: String,
    pub remaining_secs: u32,
    pub total_animation_secs: u32,
    pub speed_kmh: u32,
    pub distance_km: f64,
}

/// Fixed per-run animation parameters derived from a route estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyTimeline {
    estimated_minutes: u32,
    distance_km: f64,
    animation_secs: u32,
    preparing_ms: u64,
    traveling_ms: u64,
}

impl JourneyTimeline {
    /// Build a timeline from a route estimate's display texts.
    pub fn from_route(route: &RouteInfo) -> Self {
        Self::from_texts(&route.duration_text, &route.distance_text)
    }

    /// Build a timeline from raw display texts, falling back to defaults
    /// when no number can be extracted.
    pub fn from_texts(duration_text: &str, distance_text: &str) -> Self {
        let estimated_minutes = parse_minutes(duration_text);
        let distance_km = parse_distance_km(distance_text);

        // One-third compression of the real ETA.
        let animation_secs = estimated_minutes * 60 / 3;
        let preparing_ms = (u64::from(animation_secs) * 100).max(1000);
        let traveling_ms = u64::from(animation_secs) * 900;

        Self {
            estimated_minutes,
            distance_km,
            animation_secs,
            preparing_ms,
            traveling_ms,
        }
    }

    pub fn estimated_minutes(&self) -> u32 {
        self.estimated_minutes
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn animation_secs(&self) -> u32 {
        self.animation_secs
    }

    /// Duration of the preparing phase: at least one second, otherwise
    /// 10% of the animated journey.
    pub fn preparing_ms(&self) -> u64 {
        self.preparing_ms
    }

    /// Duration of the traveling phase: 90% of the animated journey.
    pub fn traveling_ms(&self) -> u64 {
        self.traveling_ms
    }

    /// Elapsed time at which the run is complete.
    pub fn total_ms(&self) -> u64 {
        self.preparing_ms + self.traveling_ms
    }

    /// When the defensive final cleanup should fire, one second past the
    /// natural end of the run.
    pub fn cleanup_at_ms(&self) -> u64 {
        self.total_ms() + 1000
    }

    /// Sample the journey at `elapsed_ms` since the run started.
    pub fn sample(&self, elapsed_ms: u64) -> CarProgress {
        let remaining_secs = u64::from(self.animation_secs)
            .saturating_sub(elapsed_ms / 1000) as u32;

        if elapsed_ms < self.preparing_ms {
            return CarProgress {
                percent: 0.0,
                phase: JourneyPhase::Preparing,
                location_label: PREPARING_LABEL.to_string(),
                remaining_secs,
                total_animation_secs: self.animation_secs,
                speed_kmh: 0,
                distance_km: self.distance_km,
            };
        }

        let travel_elapsed = elapsed_ms - self.preparing_ms;
        let percent = if self.traveling_ms == 0 {
            100.0
        } else {
            (travel_elapsed as f64 / self.traveling_ms as f64 * 100.0).min(100.0)
        };

        if percent >= 100.0 {
            return CarProgress {
                percent: 100.0,
                phase: JourneyPhase::Arrived,
                location_label: ARRIVED_LABEL.to_string(),
                remaining_secs: 0,
                total_animation_secs: self.animation_secs,
                speed_kmh: 0,
                distance_km: self.distance_km,
            };
        }

        // Synthesized from covered distance over real elapsed time,
        // floored at a plausible urban minimum.
        let speed_kmh = if percent > 0.0 && elapsed_ms > 0 {
            let elapsed_hours = elapsed_ms as f64 / 3_600_000.0;
            let covered_km = percent / 100.0 * self.distance_km;
            ((covered_km / elapsed_hours).round() as u32).max(MIN_SPEED_KMH)
        } else {
            0
        };

        CarProgress {
            percent,
            phase: JourneyPhase::Traveling,
            location_label: location_label(percent).to_string(),
            remaining_secs,
            total_animation_secs: self.animation_secs,
            speed_kmh,
            distance_km: self.distance_km,
        }
    }
}

/// Pick the location description for a traveling progress value.
fn location_label(percent: f64) -> &'static str {
    for (threshold, label) in LOCATION_BUCKETS {
        if percent < threshold {
            return label;
        }
    }
    ARRIVED_LABEL
}

fn minutes_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("valid regex"))
}

fn distance_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid regex"))
}

/// First integer in the duration text clamped to [`MAX_MINUTES`], or the
/// 25-minute default.
fn parse_minutes(text: &str) -> u32 {
    minutes_regex()
        .find(text)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .map(|minutes| minutes.min(MAX_MINUTES))
        .unwrap_or(DEFAULT_MINUTES)
}

/// First decimal number in the distance text, or the 5 km default.
fn parse_distance_km(text: &str) -> f64 {
    distance_regex()
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(DEFAULT_DISTANCE_KM)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase_rank(phase: JourneyPhase) -> u8 {
        match phase {
            JourneyPhase::Preparing => 0,
            JourneyPhase::Traveling => 1,
            JourneyPhase::Arrived => 2,
        }
    }

    #[test]
    fn unparseable_duration_defaults_to_25_minutes() {
        for text in ["", "soon", "~~", "vài phút"] {
            let timeline = JourneyTimeline::from_texts(text, "5.0 km");
            assert_eq!(timeline.estimated_minutes(), 25, "text={text:?}");
        }
    }

    #[test]
    fn absurd_duration_text_is_clamped_to_a_day() {
        let timeline = JourneyTimeline::from_texts("100000000 min", "5 km");
        assert_eq!(timeline.estimated_minutes(), MAX_MINUTES);
        assert_eq!(timeline.animation_secs(), MAX_MINUTES * 20);
        assert!(timeline.cleanup_at_ms() <= u64::from(u32::MAX));

        // Digit runs too long even for u32 fall back like any other
        // unparseable text.
        let timeline = JourneyTimeline::from_texts("99999999999 min", "5 km");
        assert_eq!(timeline.estimated_minutes(), DEFAULT_MINUTES);
    }

    #[test]
    fn unparseable_distance_defaults_to_5_km() {
        let timeline = JourneyTimeline::from_texts("11 min", "unknown");
        assert!((timeline.distance_km() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parses_display_texts() {
        let timeline = JourneyTimeline::from_texts("11 min", "5.4 km");
        assert_eq!(timeline.estimated_minutes(), 11);
        assert!((timeline.distance_km() - 5.4).abs() < 1e-9);
    }

    #[test]
    fn example_scenario_durations() {
        // 11 minutes -> 220 s animated, 22 s preparing, 198 s traveling.
        let timeline = JourneyTimeline::from_texts("11 min", "5.4 km");
        assert_eq!(timeline.animation_secs(), 220);
        assert_eq!(timeline.preparing_ms(), 22_000);
        assert_eq!(timeline.traveling_ms(), 198_000);
        assert_eq!(timeline.cleanup_at_ms(), 221_000);
    }

    #[test]
    fn short_eta_still_gets_a_full_second_of_preparing() {
        let timeline = JourneyTimeline::from_texts("0 min", "0.1 km");
        assert_eq!(timeline.preparing_ms(), 1000);
        // Nothing to travel: first post-preparing sample is the arrival.
        let p = timeline.sample(1000);
        assert_eq!(p.phase, JourneyPhase::Arrived);
        assert_eq!(p.percent, 100.0);
    }

    #[test]
    fn progress_is_monotonic_and_phases_forward_only() {
        let timeline = JourneyTimeline::from_texts("11 min", "5.4 km");
        let mut last_percent = -1.0;
        let mut last_rank = 0;
        let mut elapsed = 0;
        while elapsed <= timeline.cleanup_at_ms() {
            let p = timeline.sample(elapsed);
            assert!(p.percent >= last_percent, "regressed at {elapsed}ms");
            assert!(phase_rank(p.phase) >= last_rank, "phase regressed at {elapsed}ms");
            last_percent = p.percent;
            last_rank = phase_rank(p.phase);
            elapsed += 500;
        }
        assert_eq!(last_percent, 100.0);
        assert_eq!(last_rank, phase_rank(JourneyPhase::Arrived));
    }

    #[test]
    fn preparing_counts_down_without_moving() {
        let timeline = JourneyTimeline::from_texts("11 min", "5.4 km");
        let start = timeline.sample(0);
        assert_eq!(start.phase, JourneyPhase::Preparing);
        assert_eq!(start.percent, 0.0);
        assert_eq!(start.speed_kmh, 0);
        assert_eq!(start.remaining_secs, 220);

        let later = timeline.sample(10_000);
        assert_eq!(later.phase, JourneyPhase::Preparing);
        assert_eq!(later.remaining_secs, 210);
    }

    #[test]
    fn traveling_speed_is_floored_at_50() {
        let timeline = JourneyTimeline::from_texts("11 min", "5.4 km");
        // Just into the traveling phase: tiny covered distance over a long
        // elapsed time would read absurdly low without the floor.
        let p = timeline.sample(timeline.preparing_ms() + 200);
        assert_eq!(p.phase, JourneyPhase::Traveling);
        assert!(p.percent > 0.0);
        assert!(p.speed_kmh >= 50);
    }

    #[test]
    fn arrival_is_terminally_consistent() {
        let timeline = JourneyTimeline::from_texts("11 min", "5.4 km");
        for elapsed in [
            timeline.total_ms(),
            timeline.cleanup_at_ms(),
            timeline.cleanup_at_ms() + 60_000,
        ] {
            let p = timeline.sample(elapsed);
            assert_eq!(p.phase, JourneyPhase::Arrived);
            assert_eq!(p.percent, 100.0);
            assert_eq!(p.remaining_secs, 0);
            assert_eq!(p.speed_kmh, 0);
            assert_eq!(p.location_label, "Arrived at your location");
        }
    }

    #[test]
    fn location_labels_advance_through_buckets() {
        let timeline = JourneyTimeline::from_texts("11 min", "5.4 km");
        let at = |pct: f64| {
            let elapsed = timeline.preparing_ms()
                + (pct / 100.0 * timeline.traveling_ms() as f64) as u64;
            timeline.sample(elapsed).location_label
        };
        assert_eq!(at(5.0), "Rescue vehicle is leaving the garage");
        assert_eq!(at(20.0), "On the main road heading your way");
        assert_eq!(at(50.0), "About halfway to your location");
        assert_eq!(at(70.0), "Entering your area");
        assert_eq!(at(90.0), "A few streets away");
        assert_eq!(at(97.0), "Almost there, pulling up");
    }

    #[test]
    fn remaining_tracks_the_animated_clock() {
        let timeline = JourneyTimeline::from_texts("11 min", "5.4 km");
        let p = timeline.sample(100_000);
        assert_eq!(p.remaining_secs, 120);
    }
}
