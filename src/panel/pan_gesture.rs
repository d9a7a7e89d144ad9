//! Turns raw mouse events into pan gesture phases.

use crate::core::types::{MouseEvent, Vec2};

const PAN_BUTTON: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanPhase {
    Began,
    Changed,
    Ended,
}

/// One sample of an ongoing pan. Translation is relative to the press
/// point; velocity is in px/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanEvent {
    pub phase: PanPhase,
    pub translation: Vec2,
    pub velocity: Vec2,
}

pub struct PanRecognizer {
    active: bool,
    origin: Vec2,
    last_pos: Vec2,
    last_time_ms: f64,
    velocity: Vec2,
}

impl PanRecognizer {
    pub fn new() -> Self {
        Self {
            active: false,
            origin: Vec2::default(),
            last_pos: Vec2::default(),
            last_time_ms: 0.0,
            velocity: Vec2::default(),
        }
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Feed one mouse event. `inside_target` only matters for presses:
    /// a pan starts only on the target.
    pub fn handle_mouse(
        &mut self,
        e: &MouseEvent,
        time_ms: f64,
        inside_target: bool,
    ) -> Option<PanEvent> {
        let pos = Vec2::new(e.x, e.y);

        if e.button == PAN_BUTTON && e.pressed {
            if !inside_target {
                return None;
            }
            self.active = true;
            self.origin = pos;
            self.last_pos = pos;
            self.last_time_ms = time_ms;
            self.velocity = Vec2::default();
            return Some(PanEvent {
                phase: PanPhase::Began,
                translation: Vec2::default(),
                velocity: Vec2::default(),
            });
        }

        if !self.active {
            return None;
        }

        if e.button == PAN_BUTTON && e.released {
            self.track(pos, time_ms);
            self.active = false;
            return Some(PanEvent {
                phase: PanPhase::Ended,
                translation: pos - self.origin,
                velocity: self.velocity,
            });
        }

        if e.dragging {
            self.track(pos, time_ms);
            return Some(PanEvent {
                phase: PanPhase::Changed,
                translation: pos - self.origin,
                velocity: self.velocity,
            });
        }

        None
    }

    fn track(&mut self, pos: Vec2, time_ms: f64) {
        let dt = time_ms - self.last_time_ms;
        if dt > 0.0 {
            self.velocity = (pos - self.last_pos) * (1000.0 / dt);
        }
        self.last_pos = pos;
        self.last_time_ms = time_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(x: f64, y: f64) -> MouseEvent {
        MouseEvent {
            x,
            y,
            button: 1,
            pressed: true,
            ..Default::default()
        }
    }

    fn drag(x: f64, y: f64) -> MouseEvent {
        MouseEvent {
            x,
            y,
            button: 1,
            dragging: true,
            ..Default::default()
        }
    }

    fn release(x: f64, y: f64) -> MouseEvent {
        MouseEvent {
            x,
            y,
            button: 1,
            released: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_full_pan_sequence() {
        let mut pan = PanRecognizer::new();

        let began = pan.handle_mouse(&press(100.0, 700.0), 0.0, true).unwrap();
        assert_eq!(began.phase, PanPhase::Began);
        assert_eq!(began.translation, Vec2::default());

        let changed = pan.handle_mouse(&drag(100.0, 600.0), 100.0, true).unwrap();
        assert_eq!(changed.phase, PanPhase::Changed);
        assert_eq!(changed.translation, Vec2::new(0.0, -100.0));
        assert_eq!(changed.velocity, Vec2::new(0.0, -1000.0));

        let ended = pan.handle_mouse(&release(100.0, 550.0), 150.0, true).unwrap();
        assert_eq!(ended.phase, PanPhase::Ended);
        assert_eq!(ended.translation, Vec2::new(0.0, -150.0));
        assert_eq!(ended.velocity, Vec2::new(0.0, -1000.0));
        assert!(!pan.is_active());
    }

    #[test]
    fn test_press_outside_target_ignored() {
        let mut pan = PanRecognizer::new();
        assert!(pan.handle_mouse(&press(10.0, 10.0), 0.0, false).is_none());
        assert!(pan.handle_mouse(&drag(10.0, 50.0), 16.0, false).is_none());
        assert!(pan.handle_mouse(&release(10.0, 50.0), 32.0, false).is_none());
    }

    #[test]
    fn test_hover_motion_without_pan_ignored() {
        let mut pan = PanRecognizer::new();
        let hover = MouseEvent {
            x: 5.0,
            y: 5.0,
            ..Default::default()
        };
        assert!(pan.handle_mouse(&hover, 0.0, true).is_none());
    }

    #[test]
    fn test_zero_dt_keeps_previous_velocity() {
        let mut pan = PanRecognizer::new();
        pan.handle_mouse(&press(0.0, 100.0), 0.0, true);
        pan.handle_mouse(&drag(0.0, 90.0), 10.0, true);
        let e = pan.handle_mouse(&drag(0.0, 80.0), 10.0, true).unwrap();
        assert_eq!(e.velocity, Vec2::new(0.0, -1000.0));
        assert_eq!(e.translation, Vec2::new(0.0, -20.0));
    }
}
