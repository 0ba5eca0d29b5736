//! Simulated route scanner
//!
//! `Idle -> Scanning -> Done`. There is no computation behind the progress;
//! each tick adds a random step until 100 is reached.

use crate::rng::RandomSource;
use crate::tuning::ScanTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    Scanning,
    Done,
}

/// Status line shown under the progress bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    Initiating,
    Analyzing,
    Triangulating,
    RouteFound,
}

impl ScanStatus {
    pub fn message(&self) -> &'static str {
        match self {
            ScanStatus::Initiating => "Initiating coordinate scan…",
            ScanStatus::Analyzing => "Analyzing Martian terrain…",
            ScanStatus::Triangulating => "Triangulating return satellites…",
            ScanStatus::RouteFound => "Route found. Press to head home.",
        }
    }
}

/// Status tier for an in-progress scan
pub fn status_for(progress: f32) -> ScanStatus {
    if progress >= 100.0 {
        ScanStatus::RouteFound
    } else if progress > 66.0 {
        ScanStatus::Triangulating
    } else if progress > 33.0 {
        ScanStatus::Analyzing
    } else {
        ScanStatus::Initiating
    }
}

/// What the scan button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanAction {
    StartScan,
    NavigateHome,
}

/// Label of the scan button once the route is found
pub const RETURN_LABEL: &str = "🚀 Return now";

/// One tick's worth of display state
#[derive(Debug, Clone, PartialEq)]
pub struct ScanFrame {
    pub progress: f32,
    pub status: ScanStatus,
    /// This tick reached 100
    pub finished: bool,
}

impl ScanFrame {
    /// `"42%"`
    pub fn percent_label(&self) -> String {
        format!("{:.0}%", self.progress)
    }

    /// Integer percentage for `aria-valuenow`
    pub fn value_now(&self) -> String {
        format!("{:.0}", self.progress)
    }

    /// Bar width custom property value
    pub fn bar_width(&self) -> String {
        format!("{}%", self.progress)
    }

    /// Three-stop highlight centered on the current percentage
    pub fn bar_gradient(&self) -> String {
        let p = self.progress;
        format!(
            "linear-gradient(90deg, #1b2440 {}%, #25d366 {}%, #1b2440 {}%)",
            (p - 1.0).max(0.0),
            p,
            p + 1.0
        )
    }
}

#[derive(Debug, Clone)]
pub struct Scanner {
    phase: ScanPhase,
    progress: f32,
    tuning: ScanTuning,
}

impl Scanner {
    pub fn new(tuning: ScanTuning) -> Self {
        Self {
            phase: ScanPhase::Idle,
            progress: 0.0,
            tuning,
        }
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn tick_ms(&self) -> u32 {
        self.tuning.tick_ms
    }

    pub fn button_action(&self) -> ScanAction {
        match self.phase {
            ScanPhase::Done => ScanAction::NavigateHome,
            ScanPhase::Idle | ScanPhase::Scanning => ScanAction::StartScan,
        }
    }

    /// Begin scanning from 0. No-op while scanning or once done.
    pub fn start(&mut self) -> bool {
        if self.phase != ScanPhase::Idle {
            return false;
        }
        self.phase = ScanPhase::Scanning;
        self.progress = 0.0;
        true
    }

    /// Advance by one random step. `None` unless scanning, so ticks after
    /// completion are suppressed.
    pub fn tick(&mut self, rng: &mut impl RandomSource) -> Option<ScanFrame> {
        if self.phase != ScanPhase::Scanning {
            return None;
        }
        let step = rng.spread(self.tuning.step_min, self.tuning.step_var).max(0.0);
        self.progress = (self.progress + step).clamp(0.0, 100.0);

        let finished = self.progress >= 100.0;
        if finished {
            self.phase = ScanPhase::Done;
            log::info!("Route scan complete");
        }
        Some(ScanFrame {
            progress: self.progress,
            status: status_for(self.progress),
            finished,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{FixedSequence, seeded};

    fn scanner() -> Scanner {
        Scanner::new(ScanTuning::default())
    }

    #[test]
    fn test_idle_until_started() {
        let mut s = scanner();
        assert_eq!(s.phase(), ScanPhase::Idle);
        assert!(s.tick(&mut seeded(1)).is_none());
        assert_eq!(s.progress(), 0.0);
        assert_eq!(s.button_action(), ScanAction::StartScan);
    }

    #[test]
    fn test_restart_while_scanning_is_noop() {
        let mut s = scanner();
        assert!(s.start());
        s.tick(&mut FixedSequence::constant(0.5));
        let progress = s.progress();
        assert!(!s.start());
        assert_eq!(s.progress(), progress);
        assert_eq!(s.phase(), ScanPhase::Scanning);
    }

    #[test]
    fn test_step_range() {
        let mut s = scanner();
        s.start();
        let f = s.tick(&mut FixedSequence::constant(0.0)).unwrap();
        assert_eq!(f.progress, 1.5);

        let mut s = scanner();
        s.start();
        let f = s.tick(&mut FixedSequence::constant(0.999)).unwrap();
        assert!(f.progress < 7.5);
    }

    #[test]
    fn test_completes_exactly_once() {
        let mut s = scanner();
        s.start();
        let mut rng = seeded(9);
        let mut finished = 0;
        let mut ticks = 0;
        while let Some(frame) = s.tick(&mut rng) {
            ticks += 1;
            if frame.finished {
                finished += 1;
                assert_eq!(frame.progress, 100.0);
                assert_eq!(frame.status, ScanStatus::RouteFound);
            }
            assert!(ticks < 100);
        }
        assert_eq!(finished, 1);
        assert_eq!(s.phase(), ScanPhase::Done);
        assert_eq!(s.button_action(), ScanAction::NavigateHome);
        assert!(s.tick(&mut rng).is_none());
        assert!(!s.start());
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(status_for(0.0), ScanStatus::Initiating);
        assert_eq!(status_for(33.0), ScanStatus::Initiating);
        assert_eq!(status_for(33.5), ScanStatus::Analyzing);
        assert_eq!(status_for(66.0), ScanStatus::Analyzing);
        assert_eq!(status_for(66.1), ScanStatus::Triangulating);
        assert_eq!(status_for(100.0), ScanStatus::RouteFound);
    }

    #[test]
    fn test_frame_formatting() {
        let frame = ScanFrame {
            progress: 42.0,
            status: status_for(42.0),
            finished: false,
        };
        assert_eq!(frame.percent_label(), "42%");
        assert_eq!(frame.value_now(), "42");
        assert_eq!(frame.bar_width(), "42%");
        assert_eq!(
            frame.bar_gradient(),
            "linear-gradient(90deg, #1b2440 41%, #25d366 42%, #1b2440 43%)"
        );

        let start = ScanFrame {
            progress: 0.5,
            status: status_for(0.5),
            finished: false,
        };
        assert!(start.bar_gradient().contains("#1b2440 0%"));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn progress_is_monotonic_and_bounded(seed in any::<u64>()) {
                let mut s = scanner();
                s.start();
                let mut rng = seeded(seed);
                let mut last = 0.0;
                let mut ticks = 0;
                while let Some(frame) = s.tick(&mut rng) {
                    prop_assert!(frame.progress >= last);
                    prop_assert!(frame.progress <= 100.0);
                    prop_assert_eq!(frame.finished, frame.progress >= 100.0);
                    last = frame.progress;
                    ticks += 1;
                }
                // Minimum step of 1.5 bounds the scan length
                prop_assert!(ticks <= 67);
                prop_assert_eq!(s.phase(), ScanPhase::Done);
            }
        }
    }
}
