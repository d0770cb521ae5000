//! Expand/collapse transitions.
//!
//! A transition walks through three phases in order: `Initial` (starting
//! style applied), `Active` (progress advances with the clock) and `Settled`
//! (target style applied). The owning element flips its collapsed flag when
//! the transition settles.

use std::time::{Duration, Instant};

/// Phase of a running transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initial,
    Active,
    Settled,
}

/// What the transition reveals or hides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Expand,
    Collapse,
}

#[derive(Debug, Clone)]
pub struct Transition {
    kind: TransitionKind,
    phase: Phase,
    started: Option<Instant>,
    duration: Duration,
    progress: f32,
}

impl Transition {
    pub(crate) fn new(kind: TransitionKind, duration: Duration) -> Self {
        Self {
            kind,
            phase: Phase::Initial,
            started: None,
            duration,
            progress: 0.0,
        }
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Fraction of the duration elapsed, 0.0 to 1.0.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Move the transition forward one step and return the resulting phase.
    ///
    /// `Initial` always becomes `Active` on the first call (the next frame),
    /// regardless of duration. `Active` settles once the duration elapsed.
    pub(crate) fn advance(&mut self, now: Instant) -> Phase {
        match self.phase {
            Phase::Initial => {
                self.phase = Phase::Active;
                self.started = Some(now);
            }
            Phase::Active => {
                let started = self.started.unwrap_or(now);
                let elapsed = now.saturating_duration_since(started);
                if elapsed >= self.duration {
                    self.phase = Phase::Settled;
                    self.progress = 1.0;
                } else {
                    self.progress = (elapsed.as_nanos() as f64 / self.duration.as_nanos() as f64) as f32;
                }
            }
            Phase::Settled => {}
        }
        self.phase
    }

    /// How many of `total` subtree rows are on screen at this point.
    pub fn visible_rows(&self, total: usize) -> usize {
        let shown = match self.kind {
            TransitionKind::Expand => self.progress,
            TransitionKind::Collapse => 1.0 - self.progress,
        };
        ((total as f32 * shown).ceil() as usize).min(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases_run_in_order() {
        let start = Instant::now();
        let mut t = Transition::new(TransitionKind::Expand, Duration::from_millis(100));
        assert_eq!(t.phase(), Phase::Initial);

        assert_eq!(t.advance(start), Phase::Active);
        assert_eq!(t.advance(start + Duration::from_millis(50)), Phase::Active);
        assert!((t.progress() - 0.5).abs() < 0.01);

        assert_eq!(t.advance(start + Duration::from_millis(100)), Phase::Settled);
        assert_eq!(t.progress(), 1.0);
    }

    #[test]
    fn test_zero_duration_settles_on_second_step() {
        let now = Instant::now();
        let mut t = Transition::new(TransitionKind::Collapse, Duration::ZERO);
        assert_eq!(t.advance(now), Phase::Active);
        assert_eq!(t.advance(now), Phase::Settled);
    }

    #[test]
    fn test_visible_rows_expand() {
        let start = Instant::now();
        let mut t = Transition::new(TransitionKind::Expand, Duration::from_millis(100));
        assert_eq!(t.visible_rows(4), 0);

        t.advance(start);
        t.advance(start + Duration::from_millis(50));
        assert_eq!(t.visible_rows(4), 2);

        t.advance(start + Duration::from_millis(200));
        assert_eq!(t.visible_rows(4), 4);
    }

    #[test]
    fn test_visible_rows_collapse() {
        let start = Instant::now();
        let mut t = Transition::new(TransitionKind::Collapse, Duration::from_millis(100));
        assert_eq!(t.visible_rows(3), 3);

        t.advance(start);
        t.advance(start + Duration::from_millis(100));
        assert_eq!(t.visible_rows(3), 0);
    }
}
