//! # Toast Queue
//!
//! The "Added to cart!" notifications on the product detail screen.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Toast Entry Lifecycle                                │
//! │                                                                         │
//! │   spawn(now)                                                            │
//! │       │                                                                 │
//! │       ▼        enter (300ms)         dwell (2000ms)        exit (300ms) │
//! │  ┌──────────┐ ─────────────► ┌─────────┐ ─────────────► ┌─────────┐    │
//! │  │ Entering │                │ Visible │                │ Exiting │    │
//! │  │ op 0 → 1 │                │ op 1    │                │ op 1 → 0│    │
//! │  │ y 20 → 0 │                │ y 0     │                │ y 0→-20 │    │
//! │  └──────────┘                └─────────┘                └────┬────┘    │
//! │                                                              │          │
//! │                                                              ▼          │
//! │                                                        ┌─────────┐     │
//! │                                                        │ Removed │     │
//! │                                                        │(dropped)│     │
//! │                                                        └─────────┘     │
//! │                                                                         │
//! │  Every entry runs its own timeline. Spawning never resets, delays or   │
//! │  cancels another entry.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Time
//! The queue never reads the clock. Callers pass `now` into [`ToastQueue::spawn`]
//! and [`ToastQueue::tick`], and schedule their next wakeup from
//! [`ToastQueue::next_transition`]. A late tick lands in the same state as a
//! punctual one: phase boundaries are carried forward exactly rather than
//! restarted from the tick instant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

use crate::easing::Easing;

/// Vertical offset a toast starts from while entering.
pub const ENTER_OFFSET: f32 = 20.0;

/// Vertical offset a toast ends at while exiting.
pub const EXIT_OFFSET: f32 = -20.0;

// =============================================================================
// Identity
// =============================================================================

/// Toast identifier, increasing for the lifetime of its queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ToastId(u64);

impl ToastId {
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

// =============================================================================
// Phase
// =============================================================================

/// Animation phase of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastPhase {
    Entering,
    Visible,
    Exiting,
    Removed,
}

impl ToastPhase {
    /// The phase that follows this one.
    pub const fn next(self) -> ToastPhase {
        match self {
            ToastPhase::Entering => ToastPhase::Visible,
            ToastPhase::Visible => ToastPhase::Exiting,
            ToastPhase::Exiting | ToastPhase::Removed => ToastPhase::Removed,
        }
    }
}

// =============================================================================
// Timings
// =============================================================================

/// Phase durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastTimings {
    pub enter: Duration,
    pub dwell: Duration,
    pub exit: Duration,
}

impl ToastTimings {
    /// Builds timings from milliseconds.
    pub const fn from_millis(enter: u64, dwell: u64, exit: u64) -> Self {
        ToastTimings {
            enter: Duration::from_millis(enter),
            dwell: Duration::from_millis(dwell),
            exit: Duration::from_millis(exit),
        }
    }

    /// How long `phase` lasts; `None` for the terminal phase.
    pub const fn duration_of(&self, phase: ToastPhase) -> Option<Duration> {
        match phase {
            ToastPhase::Entering => Some(self.enter),
            ToastPhase::Visible => Some(self.dwell),
            ToastPhase::Exiting => Some(self.exit),
            ToastPhase::Removed => None,
        }
    }

    /// Spawn-to-removal time.
    pub fn total(&self) -> Duration {
        self.enter + self.dwell + self.exit
    }
}

impl Default for ToastTimings {
    /// 300ms in, 2s on screen, 300ms out.
    fn default() -> Self {
        ToastTimings::from_millis(300, 2000, 300)
    }
}

// =============================================================================
// Entry
// =============================================================================

/// Render values for one toast at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastFrame {
    pub id: ToastId,
    pub phase: ToastPhase,
    /// 0.0 (invisible) to 1.0 (opaque).
    pub opacity: f32,
    /// Vertical offset; positive is below the resting position.
    pub translate_y: f32,
}

/// One toast's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastEntry {
    id: ToastId,
    phase: ToastPhase,
    phase_started_at: Instant,
}

impl ToastEntry {
    fn new(id: ToastId, now: Instant) -> Self {
        ToastEntry {
            id,
            phase: ToastPhase::Entering,
            phase_started_at: now,
        }
    }

    pub fn id(&self) -> ToastId {
        self.id
    }

    pub fn phase(&self) -> ToastPhase {
        self.phase
    }

    pub fn phase_started_at(&self) -> Instant {
        self.phase_started_at
    }

    /// Instant at which the current phase ends.
    pub fn next_transition(&self, timings: &ToastTimings) -> Option<Instant> {
        timings
            .duration_of(self.phase)
            .map(|duration| self.phase_started_at + duration)
    }

    /// Moves through every phase that has fully elapsed by `now`.
    ///
    /// Each new phase starts at the exact boundary, not at `now`.
    pub fn advance(&mut self, now: Instant, timings: &ToastTimings) {
        while let Some(ends_at) = self.next_transition(timings) {
            if now < ends_at {
                break;
            }
            self.phase = self.phase.next();
            self.phase_started_at = ends_at;
        }
    }

    /// Opacity and offset at `now`.
    pub fn frame(&self, now: Instant, timings: &ToastTimings) -> ToastFrame {
        let mut at_now = *self;
        at_now.advance(now, timings);

        let progress = match timings.duration_of(at_now.phase) {
            Some(duration) if !duration.is_zero() => {
                let elapsed = now.saturating_duration_since(at_now.phase_started_at);
                (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
            }
            _ => 1.0,
        };

        let (opacity, translate_y) = match at_now.phase {
            ToastPhase::Entering => {
                let eased = Easing::EaseOut.apply(progress);
                (eased, ENTER_OFFSET * (1.0 - eased))
            }
            ToastPhase::Visible => (1.0, 0.0),
            ToastPhase::Exiting => {
                let eased = Easing::EaseIn.apply(progress);
                (1.0 - eased, EXIT_OFFSET * eased)
            }
            ToastPhase::Removed => (0.0, EXIT_OFFSET),
        };

        ToastFrame {
            id: self.id,
            phase: at_now.phase,
            opacity,
            translate_y,
        }
    }
}

// =============================================================================
// Queue
// =============================================================================

/// The active set of toasts for one screen.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    timings: ToastTimings,
    next_id: u64,
    entries: Vec<ToastEntry>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        ToastQueue::new(ToastTimings::default())
    }
}

impl ToastQueue {
    pub fn new(timings: ToastTimings) -> Self {
        ToastQueue {
            timings,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn timings(&self) -> &ToastTimings {
        &self.timings
    }

    /// Adds a new entering toast at the end of the active set.
    pub fn spawn(&mut self, now: Instant) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        self.entries.push(ToastEntry::new(id, now));
        id
    }

    /// Advances every entry to `now` and drops the ones that finished.
    ///
    /// Returns the ids that were removed, oldest first.
    pub fn tick(&mut self, now: Instant) -> Vec<ToastId> {
        let timings = self.timings;
        let mut removed = Vec::new();

        self.entries.retain_mut(|entry| {
            entry.advance(now, &timings);
            if entry.phase == ToastPhase::Removed {
                removed.push(entry.id);
                false
            } else {
                true
            }
        });

        removed
    }

    /// When the given toast next changes phase, if it is still active.
    pub fn next_transition(&self, id: ToastId) -> Option<Instant> {
        self.get(id)
            .and_then(|entry| entry.next_transition(&self.timings))
    }

    pub fn get(&self, id: ToastId) -> Option<&ToastEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Active entries in spawn order.
    pub fn entries(&self) -> &[ToastEntry] {
        &self.entries
    }

    /// Render values for every entry still on screen at `now`.
    pub fn frames(&self, now: Instant) -> Vec<ToastFrame> {
        self.entries
            .iter()
            .map(|entry| entry.frame(now, &self.timings))
            .filter(|frame| frame.phase != ToastPhase::Removed)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry. Ids keep increasing afterwards.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_spawn_starts_entering_at_start_values() {
        let t0 = Instant::now();
        let mut queue = ToastQueue::default();

        let id = queue.spawn(t0);

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.get(id).unwrap().phase(), ToastPhase::Entering);

        let frame = queue.frames(t0)[0];
        assert!(frame.opacity.abs() < EPS);
        assert!((frame.translate_y - ENTER_OFFSET).abs() < EPS);
    }

    #[test]
    fn test_full_lifecycle() {
        let t0 = Instant::now();
        let mut queue = ToastQueue::default();
        let id = queue.spawn(t0);

        queue.tick(t0 + ms(299));
        assert_eq!(queue.get(id).unwrap().phase(), ToastPhase::Entering);

        queue.tick(t0 + ms(300));
        assert_eq!(queue.get(id).unwrap().phase(), ToastPhase::Visible);

        queue.tick(t0 + ms(2299));
        assert_eq!(queue.get(id).unwrap().phase(), ToastPhase::Visible);

        queue.tick(t0 + ms(2300));
        assert_eq!(queue.get(id).unwrap().phase(), ToastPhase::Exiting);

        let removed = queue.tick(t0 + ms(2600));
        assert_eq!(removed, vec![id]);
        assert!(queue.get(id).is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_late_tick_skips_phases() {
        let t0 = Instant::now();
        let mut queue = ToastQueue::default();
        let id = queue.spawn(t0);

        queue.tick(t0 + ms(2400));
        let entry = queue.get(id).unwrap();
        assert_eq!(entry.phase(), ToastPhase::Exiting);
        // Boundary is carried forward, not restarted at the tick.
        assert_eq!(entry.phase_started_at(), t0 + ms(2300));
        assert_eq!(queue.next_transition(id), Some(t0 + ms(2600)));
    }

    #[test]
    fn test_entry_advance_is_idempotent() {
        let t0 = Instant::now();
        let timings = ToastTimings::default();
        let mut entry = ToastEntry::new(ToastId(0), t0);

        entry.advance(t0 + ms(100), &timings);
        assert_eq!(entry.phase(), ToastPhase::Entering);
        assert_eq!(entry.phase_started_at(), t0);

        entry.advance(t0 + ms(2350), &timings);
        let after_first = entry;
        entry.advance(t0 + ms(2350), &timings);
        assert_eq!(entry.phase(), ToastPhase::Exiting);
        assert_eq!(entry.phase_started_at(), after_first.phase_started_at());
    }

    #[test]
    fn test_next_transition_follows_phases() {
        let t0 = Instant::now();
        let mut queue = ToastQueue::default();
        let id = queue.spawn(t0);

        assert_eq!(queue.next_transition(id), Some(t0 + ms(300)));
        queue.tick(t0 + ms(300));
        assert_eq!(queue.next_transition(id), Some(t0 + ms(2300)));
        queue.tick(t0 + ms(2300));
        assert_eq!(queue.next_transition(id), Some(t0 + ms(2600)));
        queue.tick(t0 + ms(2600));
        assert_eq!(queue.next_transition(id), None);
    }

    #[test]
    fn test_simultaneous_spawns_are_independent() {
        let t0 = Instant::now();
        let mut queue = ToastQueue::default();

        let a = queue.spawn(t0);
        let b = queue.spawn(t0);
        let c = queue.spawn(t0);
        assert_eq!(queue.len(), 3);
        assert!(a < b && b < c);

        queue.tick(t0 + ms(300));
        assert!(queue.entries().iter().all(|e| e.phase() == ToastPhase::Visible));

        let removed = queue.tick(t0 + ms(2600));
        assert_eq!(removed, vec![a, b, c]);
    }

    #[test]
    fn test_staggered_spawns_do_not_reset_each_other() {
        let t0 = Instant::now();
        let mut queue = ToastQueue::default();

        let first = queue.spawn(t0);
        queue.tick(t0 + ms(1000));
        let second = queue.spawn(t0 + ms(1000));

        queue.tick(t0 + ms(2300));
        assert_eq!(queue.get(first).unwrap().phase(), ToastPhase::Exiting);
        assert_eq!(queue.get(second).unwrap().phase(), ToastPhase::Visible);

        queue.tick(t0 + ms(2600));
        assert!(queue.get(first).is_none());
        assert!(queue.get(second).is_some());

        queue.tick(t0 + ms(3600));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_frames_follow_curves() {
        let t0 = Instant::now();
        let mut queue = ToastQueue::default();
        queue.spawn(t0);

        let entering = queue.frames(t0 + ms(150))[0];
        assert_eq!(entering.phase, ToastPhase::Entering);
        assert!(entering.opacity > 0.5, "ease-out is ahead of linear");
        assert!(entering.translate_y > 0.0 && entering.translate_y < ENTER_OFFSET);

        let visible = queue.frames(t0 + ms(1000))[0];
        assert_eq!(visible.phase, ToastPhase::Visible);
        assert_eq!((visible.opacity, visible.translate_y), (1.0, 0.0));

        let exiting = queue.frames(t0 + ms(2450))[0];
        assert_eq!(exiting.phase, ToastPhase::Exiting);
        assert!(exiting.opacity > 0.5, "ease-in is behind linear");
        assert!(exiting.translate_y < 0.0 && exiting.translate_y > EXIT_OFFSET);

        assert!(queue.frames(t0 + ms(2600)).is_empty());
    }

    #[test]
    fn test_ids_increase_across_clear() {
        let t0 = Instant::now();
        let mut queue = ToastQueue::default();
        let a = queue.spawn(t0);
        queue.clear();
        let b = queue.spawn(t0);
        assert!(b > a);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_zero_timings_finish_immediately() {
        let t0 = Instant::now();
        let mut queue = ToastQueue::new(ToastTimings::from_millis(0, 0, 0));
        let id = queue.spawn(t0);
        assert_eq!(queue.tick(t0), vec![id]);
    }

    #[test]
    fn test_phase_next_is_terminal() {
        assert_eq!(ToastPhase::Entering.next(), ToastPhase::Visible);
        assert_eq!(ToastPhase::Removed.next(), ToastPhase::Removed);
        assert_eq!(ToastTimings::default().total(), ms(2600));
    }
}
