//! Drag-driven panel controller: maps pan gestures onto an interruptible
//! collapse/expand transition.
//!
//! A transition cycle runs Idle -> Scrubbing -> Settling -> Idle. The
//! gesture begin creates a paused animator aimed at the opposite state,
//! drag updates scrub it, and release decides whether to finish the
//! transition or fall back to where it started.

use log::{debug, info, trace};

use crate::core::config::PanelConfig;
use crate::core::types::Vec2;
use crate::panel::animator::{AnimatingPosition, PropertyAnimator, SpringTiming};
use crate::panel::pan_gesture::{PanEvent, PanPhase};
use crate::panel::panel_state::{PanelState, StyleAttributes};
use crate::panel::panel_view::PanelSurface;

/// Registered on release. Carries the state to commit if the animation
/// finishes at its end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SettleCompletion {
    target: PanelState,
}

/// The in-flight transition. At most one exists per controller.
#[derive(Debug, Clone)]
struct AnimationHandle {
    animator: PropertyAnimator,
    from: StyleAttributes,
    to: StyleAttributes,
    completion: Option<SettleCompletion>,
}

pub struct PanelController<S: PanelSurface> {
    surface: S,
    config: PanelConfig,
    state: PanelState,
    container_height: f64,
    handle: Option<AnimationHandle>,
}

impl<S: PanelSurface> PanelController<S> {
    pub fn new(surface: S, container_height: f64, config: PanelConfig) -> Self {
        let mut controller = Self {
            surface,
            config,
            state: PanelState::Collapsed,
            container_height,
            handle: None,
        };
        controller.apply_current_style();
        controller
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Dispatch one pan sample to the matching gesture entry point.
    pub fn handle_pan(&mut self, event: &PanEvent) {
        match event.phase {
            PanPhase::Began => self.gesture_began(),
            PanPhase::Ended => self.gesture_ended(event.velocity, event.translation),
            PanPhase::Changed => self.gesture_changed(event.translation),
        }
    }

    pub fn gesture_began(&mut self) {
        if self.handle.is_some() {
            trace!("gesture began while a transition is in flight; ignored");
            return;
        }

        let from = self.state.style(&self.config, self.container_height);
        let to = self.state.next().style(&self.config, self.container_height);

        let mut animator = PropertyAnimator::new(SpringTiming::new(
            self.config.duration_ms,
            self.config.damping_ratio,
        ));
        animator.pause();

        debug!(
            "transition {:?} -> {:?} created, paused at 0",
            self.state,
            self.state.next()
        );

        self.handle = Some(AnimationHandle {
            animator,
            from,
            to,
            completion: None,
        });
    }

    pub fn gesture_changed(&mut self, translation: Vec2) {
        let half = self.container_height / 2.0;
        let state = self.state;
        let (min, max) = (self.config.progress_min, self.config.progress_max);

        let handle = match self.handle.as_mut() {
            Some(h) => h,
            None => {
                trace!("gesture changed without a transition; ignored");
                return;
            }
        };
        if handle.animator.is_running() || half <= 0.0 {
            return;
        }

        let progress = state.select(-translation.y / half, translation.y / half);
        handle.animator.set_fraction_complete(progress.clamp(min, max));

        self.present();
    }

    pub fn gesture_ended(&mut self, velocity: Vec2, translation: Vec2) {
        let threshold = self.config.reverse_threshold;
        let target = self.state.next();

        let handle = match self.handle.as_mut() {
            Some(h) => h,
            None => {
                trace!("gesture ended without a transition; ignored");
                return;
            }
        };
        // A second release mid-settle would register another completion
        // and could toggle the state twice.
        if handle.animator.is_running() {
            trace!("gesture ended while settling; ignored");
            return;
        }

        let fraction = handle.animator.fraction_complete();
        let reversed = fraction < threshold;
        handle.animator.set_reversed(reversed);
        handle.completion = Some(SettleCompletion { target });
        handle.animator.continue_animation(0.0);

        debug!(
            "settling {} at {:.3} (translation {:.1}, velocity {:.1})",
            if reversed { "back" } else { "forward" },
            fraction,
            translation.y,
            velocity.y
        );
    }

    /// Advance a settling transition by one frame.
    pub fn update(&mut self, dt_ms: f64) {
        let finished = match self.handle.as_mut() {
            Some(h) if h.animator.is_running() => h.animator.update(dt_ms),
            _ => return,
        };

        match finished {
            None => self.present(),
            Some(position) => self.complete(position),
        }
    }

    /// Record new container bounds. Mid-transition the captured styles
    /// stay as they were; the next completion picks up the new bounds.
    pub fn set_container_height(&mut self, height: f64) {
        if height == self.container_height {
            return;
        }
        self.container_height = height;
        if self.handle.is_none() {
            self.apply_current_style();
        }
    }

    // ===== Private helpers =====

    fn complete(&mut self, position: AnimatingPosition) {
        let completion = self.handle.take().and_then(|h| h.completion);

        if position == AnimatingPosition::End {
            if let Some(completion) = completion {
                debug_assert_eq!(completion.target, self.state.next());
                info!("panel {:?} -> {:?}", self.state, completion.target);
                self.state.toggle();
            }
        } else {
            debug!("transition reversed; panel stays {:?}", self.state);
        }

        self.apply_current_style();
    }

    fn present(&mut self) {
        if let Some(h) = &self.handle {
            let style = h.from.lerp(&h.to, h.animator.presented_progress());
            self.surface.apply_style(&style);
            self.surface.layout_if_needed();
        }
    }

    fn apply_current_style(&mut self) {
        let style = self.state.style(&self.config, self.container_height);
        self.surface.apply_style(&style);
        self.surface.layout_if_needed();
    }
}

#[cfg(test)]
impl<S: PanelSurface> PanelController<S> {
    pub fn container_height(&self) -> f64 {
        self.container_height
    }

    /// Fraction complete of the current transition, if there is one.
    pub fn fraction_complete(&self) -> Option<f64> {
        self.handle.as_ref().map(|h| h.animator.fraction_complete())
    }

    pub fn is_scrubbing(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|h| !h.animator.is_running())
    }

    pub fn is_settling(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| h.animator.is_running())
    }
}
