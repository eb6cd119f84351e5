//! # Journey Animation Session
//!
//! Drives the rescue-journey timeline with browser timers and publishes
//! snapshots into reactive state. All live timer handles are owned by a
//! single session value so that one idempotent `stop()` clears everything:
//! on unmount, on refresh, on replay, and after natural completion.

use gloo_timers::callback::{Interval, Timeout};
use leptos::prelude::*;
use xecare_journey::{CarProgress, JourneyPhase, JourneyTimeline, RouteInfo};

/// Live timer handles for one animation run.
///
/// Dropping a handle cancels the underlying browser timer, so clearing
/// the session is just dropping its fields.
struct AnimationSession {
    /// 1 s countdown ticker for the preparing phase.
    preparing: Option<Interval>,
    /// Hands off from preparing to traveling at the phase boundary.
    handoff: Option<Timeout>,
    /// 100 ms progress ticker for the traveling phase.
    traveling: Option<Interval>,
    /// Final clear, one second past the natural end of the run.
    cleanup: Option<Timeout>,
    /// Wall-clock start of the run (`Date.now()` milliseconds).
    started_at: f64,
}

impl AnimationSession {
    fn elapsed_ms(&self) -> u64 {
        (js_sys::Date::now() - self.started_at).max(0.0) as u64
    }

    fn active_timers(&self) -> usize {
        usize::from(self.preparing.is_some())
            + usize::from(self.handoff.is_some())
            + usize::from(self.traveling.is_some())
            + usize::from(self.cleanup.is_some())
    }
}

/// Handle for starting and stopping the journey animation.
///
/// Copyable so timer closures can stop the session they belong to.
#[derive(Clone, Copy)]
pub struct JourneyController {
    session: StoredValue<Option<AnimationSession>, LocalStorage>,
    progress: RwSignal<Option<CarProgress>>,
}

impl JourneyController {
    pub fn new(progress: RwSignal<Option<CarProgress>>) -> Self {
        Self {
            session: StoredValue::new_local(None),
            progress,
        }
    }

    /// Whether an animation run is currently active.
    pub fn is_running(&self) -> bool {
        self.session.with_value(Option::is_some)
    }

    /// Stop all timers. Idempotent, safe with no timers active.
    pub fn stop(&self) {
        self.session.update_value(|slot| {
            if let Some(session) = slot.take() {
                log::debug!(
                    "journey stop: cleared {} timer handle(s)",
                    session.active_timers()
                );
            }
        });
    }

    /// Stop timers and discard the displayed progress.
    pub fn reset(&self) {
        self.stop();
        self.progress.set(None);
    }

    /// Start a run from zero for the given route estimate.
    ///
    /// Any previous run is stopped first; the caller is responsible for
    /// the entry conditions (route loaded, request accepted).
    pub fn start(&self, route: &RouteInfo) {
        self.stop();

        let timeline = JourneyTimeline::from_route(route);
        let controller = *self;
        let progress = self.progress;
        let started_at = js_sys::Date::now();

        log::debug!(
            "journey start: {}s animated ({}ms preparing, {}ms traveling)",
            timeline.animation_secs(),
            timeline.preparing_ms(),
            timeline.traveling_ms(),
        );

        progress.set(Some(timeline.sample(0)));

        // Preparing phase: once-a-second countdown refresh.
        let prep_timeline = timeline.clone();
        let preparing = Interval::new(1000, move || {
            let elapsed = controller.elapsed_ms();
            progress.set(Some(prep_timeline.sample(elapsed)));
        });

        // Phase handoff: clear the preparing ticker, start the traveling
        // ticker. Sequential chaining guarantees the phases never overlap.
        let travel_timeline = timeline.clone();
        let handoff_ms = timer_ms(timeline.preparing_ms());
        let handoff = Timeout::new(handoff_ms, move || {
            controller.session.update_value(|session| {
                let Some(session) = session else { return };
                session.preparing = None;

                let timeline = travel_timeline.clone();
                session.traveling = Some(Interval::new(100, move || {
                    let elapsed = controller.elapsed_ms();
                    let snapshot = timeline.sample(elapsed);
                    let arrived = snapshot.phase == JourneyPhase::Arrived;
                    progress.set(Some(snapshot));
                    if arrived {
                        // Defer the clear so the running tick closure is
                        // not dropped from inside itself.
                        Timeout::new(0, move || controller.stop()).forget();
                    }
                }));
            });
        });

        // Guaranteed final clear even if natural completion already ran.
        let cleanup_timeline = timeline.clone();
        let cleanup = Timeout::new(timer_ms(timeline.cleanup_at_ms()), move || {
            progress.set(Some(cleanup_timeline.sample(cleanup_timeline.cleanup_at_ms())));
            Timeout::new(0, move || controller.stop()).forget();
        });

        self.session.set_value(Some(AnimationSession {
            preparing: Some(preparing),
            handoff: Some(handoff),
            traveling: None,
            cleanup: Some(cleanup),
            started_at,
        }));
    }

    fn elapsed_ms(&self) -> u64 {
        self.session
            .with_value(|s| s.as_ref().map(AnimationSession::elapsed_ms))
            .unwrap_or(0)
    }
}

/// Browser timers take u32 milliseconds; the timeline clamps its inputs
/// so this never truncates in practice.
fn timer_ms(ms: u64) -> u32 {
    u32::try_from(ms).unwrap_or(u32::MAX)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    wasm_bindgen_test_configure!(run_in_browser);

    fn route() -> RouteInfo {
        RouteInfo {
            distance_km: 5.4,
            duration_minutes: 11,
            distance_text: "5.4 km".into(),
            duration_text: "11 min".into(),
        }
    }

    #[wasm_bindgen_test]
    fn stop_is_idempotent_without_a_session() {
        let controller = JourneyController::new(RwSignal::new(None));
        assert!(!controller.is_running());
        controller.stop();
        controller.stop();
        assert!(!controller.is_running());
    }

    #[wasm_bindgen_test]
    fn stop_clears_a_running_session_once_and_again() {
        let progress = RwSignal::new(None);
        let controller = JourneyController::new(progress);

        controller.start(&route());
        assert!(controller.is_running());
        assert!(progress.get_untracked().is_some());

        controller.stop();
        assert!(!controller.is_running());
        controller.stop();
        assert!(!controller.is_running());
        // Stopping leaves the last snapshot on display.
        assert!(progress.get_untracked().is_some());
    }

    #[wasm_bindgen_test]
    fn reset_discards_the_displayed_progress() {
        let progress = RwSignal::new(None);
        let controller = JourneyController::new(progress);

        controller.start(&route());
        controller.reset();
        assert!(!controller.is_running());
        assert!(progress.get_untracked().is_none());
        // Safe with nothing left to clear.
        controller.reset();
    }

    #[wasm_bindgen_test]
    fn restart_replaces_the_previous_session() {
        let progress = RwSignal::new(None);
        let controller = JourneyController::new(progress);

        controller.start(&route());
        controller.start(&route());
        assert!(controller.is_running());

        controller.stop();
        assert!(!controller.is_running());
    }
}
