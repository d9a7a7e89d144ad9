//! Interruptible property animator with spring timing.
//!
//! The animator only tracks progress; whoever owns it maps progress onto
//! concrete properties. It can be paused and scrubbed, then continued
//! forward or reversed from wherever it was left.

use crate::core::config;

/// Where an animation ended up when it finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatingPosition {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    Inactive,
    Active,
}

/// Damped spring timing curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringTiming {
    pub duration_ms: f64,
    pub damping_ratio: f64,
}

impl SpringTiming {
    pub fn new(duration_ms: f64, damping_ratio: f64) -> Self {
        Self {
            duration_ms,
            damping_ratio,
        }
    }

    /// Offset still remaining at normalized time `s` (1.0 at the start,
    /// 0.0 from `s >= 1` on). Underdamped springs dip slightly below zero.
    pub fn response(&self, s: f64) -> f64 {
        if s <= 0.0 {
            return 1.0;
        }
        if s >= 1.0 {
            return 0.0;
        }

        let decay = -config::SPRING_SETTLE_EPSILON.ln();
        let zeta = self.damping_ratio.max(0.05);

        if zeta < 1.0 {
            // Envelope e^(-zeta*omega*s) reaches epsilon at s = 1
            let omega = decay / zeta;
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * omega * s).exp();
            envelope * ((omega_d * s).cos() + (zeta * omega / omega_d) * (omega_d * s).sin())
        } else {
            // Critically damped; (1 + w) e^-w needs a larger w for the same epsilon
            let omega = decay * 1.5;
            (1.0 + omega * s) * (-omega * s).exp()
        }
    }
}

#[cfg(test)]
impl Default for SpringTiming {
    fn default() -> Self {
        Self::new(config::ANIM_SETTLE_MS, config::ANIM_DAMPING_RATIO)
    }
}

#[derive(Debug, Clone)]
pub struct PropertyAnimator {
    timing: SpringTiming,
    state: AnimatorState,
    running: bool,
    reversed: bool,

    // Linear fraction of the transition, 0 = from, 1 = to
    fraction: f64,

    // Settle run
    elapsed: f64,
    settle_ms: f64,
    settle_from: f64,
}

impl PropertyAnimator {
    pub fn new(timing: SpringTiming) -> Self {
        Self {
            timing,
            state: AnimatorState::Inactive,
            running: false,
            reversed: false,
            fraction: 0.0,
            elapsed: 0.0,
            settle_ms: 0.0,
            settle_from: 0.0,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Activate without running, so the fraction can be scrubbed.
    pub fn pause(&mut self) {
        self.state = AnimatorState::Active;
        self.running = false;
    }

    pub fn fraction_complete(&self) -> f64 {
        self.fraction
    }

    /// Ignored while running.
    pub fn set_fraction_complete(&mut self, fraction: f64) {
        if self.running {
            return;
        }
        self.state = AnimatorState::Active;
        self.fraction = fraction.clamp(0.0, 1.0);
    }

    pub fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }

    /// Resume toward the end (or the start when reversed).
    ///
    /// A `duration_factor` of 0 plays out only the remaining distance of
    /// the original duration; a positive factor scales the full duration.
    pub fn continue_animation(&mut self, duration_factor: f64) {
        if self.state == AnimatorState::Inactive {
            return;
        }

        let distance = (self.target() - self.fraction).abs();
        self.settle_ms = if duration_factor <= 0.0 {
            self.timing.duration_ms * distance
        } else {
            self.timing.duration_ms * duration_factor
        };
        self.settle_from = self.fraction;
        self.elapsed = 0.0;
        self.running = true;
    }

    /// Advance the clock. Returns the final position on the tick the
    /// animation finishes.
    pub fn update(&mut self, dt_ms: f64) -> Option<AnimatingPosition> {
        if !self.running {
            return None;
        }

        self.elapsed += dt_ms;
        let s = self.settle_time();
        let target = self.target();

        if s >= 1.0 {
            self.fraction = target;
            self.running = false;
            self.state = AnimatorState::Inactive;
            return Some(if self.reversed {
                AnimatingPosition::Start
            } else {
                AnimatingPosition::End
            });
        }

        self.fraction = self.settle_from + (target - self.settle_from) * s;
        None
    }

    /// Progress to apply to animated properties. Linear while scrubbing,
    /// spring-shaped while running.
    pub fn presented_progress(&self) -> f64 {
        if !self.running {
            return self.fraction;
        }
        let target = self.target();
        target + (self.settle_from - target) * self.timing.response(self.settle_time())
    }

    fn target(&self) -> f64 {
        if self.reversed {
            0.0
        } else {
            1.0
        }
    }

    fn settle_time(&self) -> f64 {
        if self.settle_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.settle_ms).min(1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animator() -> PropertyAnimator {
        PropertyAnimator::new(SpringTiming::default())
    }

    fn run_to_end(anim: &mut PropertyAnimator) -> Option<AnimatingPosition> {
        for _ in 0..1000 {
            if let Some(pos) = anim.update(16.0) {
                return Some(pos);
            }
        }
        None
    }

    #[test]
    fn test_response_endpoints() {
        let timing = SpringTiming::default();
        assert_eq!(timing.response(0.0), 1.0);
        assert_eq!(timing.response(1.0), 0.0);
        assert!(timing.response(0.5).abs() < 0.1);
    }

    #[test]
    fn test_underdamped_overshoots_slightly() {
        let timing = SpringTiming::new(500.0, 0.8);
        let min = (1..100)
            .map(|i| timing.response(i as f64 / 100.0))
            .fold(f64::MAX, f64::min);
        assert!(min < 0.0, "0.8 damping should overshoot");
        assert!(min > -0.05, "overshoot should stay small, got {}", min);
    }

    #[test]
    fn test_critically_damped_never_overshoots() {
        let timing = SpringTiming::new(500.0, 1.0);
        for i in 0..=100 {
            assert!(timing.response(i as f64 / 100.0) >= 0.0);
        }
    }

    #[test]
    fn test_paused_animator_scrubs() {
        let mut anim = animator();
        anim.pause();
        assert_eq!(anim.state(), AnimatorState::Active);
        assert!(!anim.is_running());

        anim.set_fraction_complete(0.4);
        assert_eq!(anim.fraction_complete(), 0.4);
        assert_eq!(anim.presented_progress(), 0.4);

        anim.set_fraction_complete(1.7);
        assert_eq!(anim.fraction_complete(), 1.0);
    }

    #[test]
    fn test_update_while_paused_is_noop() {
        let mut anim = animator();
        anim.pause();
        anim.set_fraction_complete(0.5);
        assert_eq!(anim.update(100.0), None);
        assert_eq!(anim.fraction_complete(), 0.5);
    }

    #[test]
    fn test_fraction_locked_while_running() {
        let mut anim = animator();
        anim.pause();
        anim.set_fraction_complete(0.5);
        anim.continue_animation(0.0);
        anim.set_fraction_complete(0.1);
        assert_eq!(anim.fraction_complete(), 0.5);
    }

    #[test]
    fn test_continue_forward_finishes_at_end() {
        let mut anim = animator();
        anim.pause();
        anim.set_fraction_complete(0.5);
        anim.continue_animation(0.0);
        assert!(anim.is_running());

        assert_eq!(run_to_end(&mut anim), Some(AnimatingPosition::End));
        assert_eq!(anim.fraction_complete(), 1.0);
        assert_eq!(anim.presented_progress(), 1.0);
        assert_eq!(anim.state(), AnimatorState::Inactive);
    }

    #[test]
    fn test_continue_reversed_finishes_at_start() {
        let mut anim = animator();
        anim.pause();
        anim.set_fraction_complete(0.2);
        anim.set_reversed(true);
        anim.continue_animation(0.0);

        assert_eq!(run_to_end(&mut anim), Some(AnimatingPosition::Start));
        assert_eq!(anim.fraction_complete(), 0.0);
    }

    #[test]
    fn test_zero_factor_uses_remaining_time() {
        let mut anim = PropertyAnimator::new(SpringTiming::new(500.0, 0.8));
        anim.pause();
        anim.set_fraction_complete(0.8);
        anim.continue_animation(0.0);

        // 20% of 500ms remain
        assert_eq!(anim.update(90.0), None);
        assert_eq!(anim.update(20.0), Some(AnimatingPosition::End));
    }

    #[test]
    fn test_positive_factor_scales_full_duration() {
        let mut anim = PropertyAnimator::new(SpringTiming::new(500.0, 0.8));
        anim.pause();
        anim.set_fraction_complete(0.8);
        anim.continue_animation(1.0);

        assert_eq!(anim.update(400.0), None);
        assert_eq!(anim.update(100.0), Some(AnimatingPosition::End));
    }

    #[test]
    fn test_continue_on_inactive_is_noop() {
        let mut anim = animator();
        anim.continue_animation(0.0);
        assert!(!anim.is_running());
        assert_eq!(anim.update(16.0), None);
    }

    #[test]
    fn test_unit_factor_from_zero_runs_full_duration() {
        let mut anim = PropertyAnimator::new(SpringTiming::new(200.0, 0.8));
        anim.pause();
        anim.continue_animation(1.0);
        assert!(anim.is_running());
        assert_eq!(anim.update(199.0), None);
        assert_eq!(anim.update(1.0), Some(AnimatingPosition::End));
    }

    #[test]
    fn test_presented_progress_moves_toward_target() {
        let mut anim = animator();
        anim.pause();
        anim.set_fraction_complete(0.3);
        anim.continue_animation(0.0);
        anim.update(100.0);
        assert!(anim.presented_progress() > 0.3);
    }
}
