//! The spin state machine.
//!
//! Owns the wheel's rotation over time. A spin request captures a snapshot of
//! the entries, picks a randomized target and the host then drives the
//! animation by calling [`SpinController::advance`] once per frame.
//!
//! # State Transitions
//!
//! ```text
//! ┌──────────┐  request_spin   ┌─────────────┐  t == 1   ┌──────────┐
//! │          ├─────────────────►             ├───────────►          │
//! │   Idle   │                 │  Spinning   │  Winner   │   Idle   │
//! │          ◄─────────────────┤             │           │          │
//! └──────────┘     cancel      └─────────────┘           └──────────┘
//! ```
//!
//! Requests made while spinning, or with no entries, are dropped rather than
//! queued. Only one spin is ever in flight.
use crate::entry::{Entry, EntrySnapshot};
use crate::event::{EventBus, WheelEvent};
use crate::resolver;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Minimum number of whole turns added by a spin
pub const MIN_TURNS: f64 = 5.0;
/// Random whole-turn range added on top of [`MIN_TURNS`]
pub const EXTRA_TURNS: f64 = 5.0;

/// Cubic ease-out: fast start, zero velocity at `t == 1`
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// The rotation a single accepted spin will add.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinRequest {
    /// Whole and fractional turns, in `[5, 10)`
    pub turns: f64,
    /// Sub-turn offset in degrees, in `[0, 360)`
    pub offset_degrees: f64,
}

impl SpinRequest {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            turns: MIN_TURNS + rng.gen_range(0.0..EXTRA_TURNS),
            offset_degrees: rng.gen_range(0.0..360.0),
        }
    }

    /// Degrees this request adds to the current rotation
    pub fn added_degrees(&self) -> f64 {
        self.turns * 360.0 + self.offset_degrees
    }
}

/// Everything a spin in flight needs, moved into the `Spinning` state.
#[derive(Debug, Clone)]
pub struct ActiveSpin {
    snapshot: EntrySnapshot,
    baseline: f64,
    target: f64,
    duration_secs: f64,
    started_at: Option<f64>,
    last_segment: usize,
}

impl ActiveSpin {
    pub fn snapshot(&self) -> &EntrySnapshot {
        &self.snapshot
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Rotation after the eased fraction `progress` of this spin
    fn rotation_at(&self, progress: f64) -> f64 {
        self.baseline + (self.target - self.baseline) * ease_out_cubic(progress)
    }
}

#[derive(Debug, Clone, Default)]
pub enum SpinState {
    #[default]
    Idle,
    Spinning(ActiveSpin),
}

impl SpinState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SpinState::Idle)
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self, SpinState::Spinning(_))
    }
}

/// Drives the wheel rotation frame by frame and reports spin outcomes.
#[derive(Debug)]
pub struct SpinController {
    state: SpinState,
    /// Running rotation total in degrees; never decreases
    rotation: f64,
    spin_duration: Duration,
    last_frame: Option<f64>,
    rng: StdRng,
    events: EventBus,
}

impl Default for SpinController {
    fn default() -> Self {
        Self::new(Duration::from_millis(5_000))
    }
}

impl SpinController {
    pub fn new(spin_duration: Duration) -> Self {
        Self::with_rng(spin_duration, StdRng::from_entropy())
    }

    /// Seeded controller for reproducible spins
    pub fn with_seed(spin_duration: Duration, seed: u64) -> Self {
        Self::with_rng(spin_duration, StdRng::seed_from_u64(seed))
    }

    fn with_rng(spin_duration: Duration, rng: StdRng) -> Self {
        Self {
            state: SpinState::Idle,
            rotation: 0.0,
            spin_duration,
            last_frame: None,
            rng,
            events: EventBus::new(),
        }
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn is_spinning(&self) -> bool {
        self.state.is_spinning()
    }

    /// Running rotation total in degrees
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Rotation reduced to `[0, 360)` for drawing
    pub fn display_rotation(&self) -> f32 {
        resolver::normalize_degrees(self.rotation) as f32
    }

    pub fn spin_duration(&self) -> Duration {
        self.spin_duration
    }

    /// Applies to the next accepted spin; a spin in flight keeps its duration
    pub fn set_spin_duration(&mut self, duration: Duration) {
        self.spin_duration = duration;
    }

    /// Starts a spin with a random target. Returns whether it was accepted.
    pub fn request_spin(&mut self, entries: &[Entry]) -> bool {
        let request = SpinRequest::random(&mut self.rng);
        self.request_spin_with(entries, request)
    }

    /// Starts a spin with an explicit request. Returns whether it was accepted.
    pub fn request_spin_with(&mut self, entries: &[Entry], request: SpinRequest) -> bool {
        if self.is_spinning() {
            log::debug!("Spin ignored: a spin is already in flight");
            return false;
        }
        if entries.is_empty() {
            log::debug!("Spin ignored: no entries");
            return false;
        }
        if self.spin_duration.is_zero() {
            log::warn!("Spin ignored: spin duration is zero");
            return false;
        }

        let snapshot = EntrySnapshot::capture(entries);
        let target = self.rotation + request.added_degrees();
        let spin = ActiveSpin {
            last_segment: resolver::segment_at(self.rotation, snapshot.len()),
            snapshot,
            baseline: self.rotation,
            target,
            duration_secs: self.spin_duration.as_secs_f64(),
            started_at: None,
        };

        log::info!(
            "Spin started: {} entries, {:.1}° -> {:.1}°",
            spin.snapshot.len(),
            spin.baseline,
            spin.target
        );
        self.events.emit(WheelEvent::SpinStarted {
            entry_count: spin.snapshot.len(),
            target_rotation: target,
        });
        self.state = SpinState::Spinning(spin);
        true
    }

    /// Advances the animation to the frame time `now` (seconds, monotonic).
    ///
    /// The first frame after a spin is accepted marks its start. Frame times
    /// earlier than the previous frame are treated as the previous frame.
    pub fn advance(&mut self, now: f64) {
        let now = match self.last_frame {
            Some(last) if now < last => last,
            _ => now,
        };
        self.last_frame = Some(now);

        let SpinState::Spinning(spin) = &mut self.state else {
            return;
        };

        let started_at = *spin.started_at.get_or_insert(now);
        let elapsed = now - started_at;
        let progress = (elapsed / spin.duration_secs).min(1.0);

        if progress < 1.0 {
            let rotation = spin.rotation_at(progress);
            let segment = resolver::segment_at(rotation, spin.snapshot.len());
            if segment != spin.last_segment {
                spin.last_segment = segment;
                log::debug!("Segment tick: {}", segment);
                self.events.emit(WheelEvent::SegmentTick { segment });
            }
            self.rotation = self.rotation.max(rotation);
            return;
        }

        self.finish();
    }

    fn finish(&mut self) {
        let SpinState::Spinning(spin) = std::mem::take(&mut self.state) else {
            return;
        };
        self.rotation = spin.target;

        let index = resolver::resolve(spin.target, spin.snapshot.len());
        match spin.snapshot.get(index) {
            Some(entry) => {
                log::info!("Spin finished: winner #{} '{}'", index, entry.name);
                self.events.emit(WheelEvent::Winner {
                    index,
                    entry: entry.clone(),
                });
            }
            None => log::error!(
                "Resolved index {} outside snapshot of {}",
                index,
                spin.snapshot.len()
            ),
        }
    }

    /// Tears down a spin in flight without producing a winner.
    ///
    /// The wheel stays where it was last drawn.
    pub fn cancel(&mut self) {
        if let SpinState::Spinning(spin) = std::mem::take(&mut self.state) {
            log::info!("Spin cancelled at {:.1}° (target {:.1}°)", self.rotation, spin.target);
            self.events.clear();
        }
    }

    /// Takes the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<WheelEvent> {
        self.events.drain()
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryList;

    fn fixed_request(added: f64) -> SpinRequest {
        SpinRequest {
            turns: (added / 360.0).floor(),
            offset_degrees: added % 360.0,
        }
    }

    #[test]
    fn test_ease_out_cubic() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(0.5), 0.875);
        assert_eq!(ease_out_cubic(2.0), 1.0);
    }

    #[test]
    fn test_random_request_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let request = SpinRequest::random(&mut rng);
            assert!((5.0..10.0).contains(&request.turns));
            assert!((0.0..360.0).contains(&request.offset_degrees));
            let added = request.added_degrees();
            assert!((1800.0..3960.0).contains(&added));
        }
    }

    #[test]
    fn test_rejects_empty_entries() {
        let mut controller = SpinController::with_seed(Duration::from_secs(1), 1);
        assert!(!controller.request_spin(&[]));
        assert!(controller.state().is_idle());
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn test_interpolates_from_baseline() {
        let entries = EntryList::from_names(["A", "B", "C", "D"]);
        let mut controller = SpinController::with_seed(Duration::from_secs(2), 1);
        assert!(controller.request_spin_with(entries.entries(), fixed_request(1800.0)));

        controller.advance(10.0);
        assert_eq!(controller.rotation(), 0.0);
        controller.advance(11.0);
        assert!((controller.rotation() - 1800.0 * 0.875).abs() < 1e-9);
        controller.advance(12.0);
        assert_eq!(controller.rotation(), 1800.0);
        assert!(controller.state().is_idle());

        // Second spin continues from the previous total
        assert!(controller.request_spin_with(entries.entries(), fixed_request(1890.0)));
        controller.advance(20.0);
        controller.advance(21.0);
        assert!((controller.rotation() - (1800.0 + 1890.0 * 0.875)).abs() < 1e-9);
        controller.advance(22.0);
        assert_eq!(controller.rotation(), 3690.0);
        assert_eq!(controller.display_rotation(), 90.0);
    }

    #[test]
    fn test_out_of_order_frames_are_clamped() {
        let entries = EntryList::from_names(["A", "B"]);
        let mut controller = SpinController::with_seed(Duration::from_secs(2), 3);
        controller.request_spin_with(entries.entries(), fixed_request(1800.0));
        controller.advance(5.0);
        controller.advance(6.0);
        let rotation = controller.rotation();
        controller.advance(5.5);
        assert_eq!(controller.rotation(), rotation);
        assert!(controller.is_spinning());
    }

    #[test]
    fn test_ticks_once_per_new_segment() {
        let entries = EntryList::from_names(["A", "B", "C", "D"]);
        let mut controller = SpinController::with_seed(Duration::from_secs(1), 5);
        controller.request_spin_with(entries.entries(), fixed_request(1800.0));
        controller.drain_events();

        controller.advance(0.0);
        assert!(controller.drain_events().is_empty());

        // Tiny step stays in segment 0
        controller.advance(0.000_001);
        assert!(controller.drain_events().is_empty());

        let mut t = 0.0;
        let mut ticks = Vec::new();
        while t < 0.99 {
            t += 0.01;
            controller.advance(t);
            for event in controller.drain_events() {
                if let WheelEvent::SegmentTick { segment } = event {
                    ticks.push(segment);
                }
            }
        }
        assert!(!ticks.is_empty());
        assert!(ticks.windows(2).all(|pair| pair[0] != pair[1]));
        assert!(ticks.iter().all(|&segment| segment < 4));
    }

    #[test]
    fn test_cancel_discards_spin() {
        let entries = EntryList::from_names(["A", "B", "C"]);
        let mut controller = SpinController::with_seed(Duration::from_secs(1), 9);
        controller.request_spin(entries.entries());
        controller.advance(0.0);
        controller.advance(0.5);
        let rotation = controller.rotation();
        controller.cancel();

        assert!(controller.state().is_idle());
        assert_eq!(controller.rotation(), rotation);
        controller.advance(5.0);
        assert!(controller.drain_events().iter().all(|e| e.winner().is_none()));
        assert!(controller.request_spin(entries.entries()));
    }
}
