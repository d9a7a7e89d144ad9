//! Panel output surface and its drawing.

use crate::core::types::{Color, Vec2};
use crate::panel::panel_state::StyleAttributes;
use crate::platform::renderer::Renderer;

const GRABBER_W: f64 = 36.0;
const GRABBER_H: f64 = 5.0;
const GRABBER_TOP: f64 = 8.0;

/// Properties the controller writes to whatever displays the panel.
pub trait PanelSurface {
    fn set_height(&mut self, height: f64);
    fn set_fill_color(&mut self, color: Color);
    fn set_corner_radius(&mut self, radius: f64);
    fn layout_if_needed(&mut self);

    fn apply_style(&mut self, style: &StyleAttributes) {
        self.set_height(style.height);
        self.set_fill_color(style.fill_color);
        self.set_corner_radius(style.corner_radius);
    }
}

/// Bottom-anchored, full-width panel. Only the top corners are rounded.
#[derive(Debug, Clone)]
pub struct PanelView {
    height: f64,
    fill_color: Color,
    corner_radius: f64,
    layout_passes: u64,
}

impl PanelView {
    pub fn new() -> Self {
        Self {
            height: 0.0,
            fill_color: Color::from_hex(0x000000, 0.0),
            corner_radius: 0.0,
            layout_passes: 0,
        }
    }

    /// Counts layout passes; a change means the panel needs redrawing.
    pub fn layout_passes(&self) -> u64 {
        self.layout_passes
    }

    /// Top edge of the panel inside a container of the given height.
    pub fn top(&self, container_h: f64) -> f64 {
        container_h - self.height
    }

    pub fn hit_test(&self, point: Vec2, container_w: f64, container_h: f64) -> bool {
        point.x >= 0.0
            && point.x <= container_w
            && point.y >= self.top(container_h)
            && point.y <= container_h
    }

    pub fn render(&self, renderer: &dyn Renderer, container_w: f64, container_h: f64) {
        let y = self.top(container_h);
        let radius = self.corner_radius.clamp(0.0, self.height.max(0.0) / 2.0);

        renderer.fill_top_rounded_rect(
            0.0,
            y,
            container_w,
            self.height,
            radius,
            self.fill_color.clamped(),
        );

        // Grabber
        renderer.fill_rounded_rect(
            (container_w - GRABBER_W) / 2.0,
            y + GRABBER_TOP,
            GRABBER_W,
            GRABBER_H,
            GRABBER_H / 2.0,
            Color::from_hex(0xFFFFFF, 0.6),
        );
    }
}

impl PanelSurface for PanelView {
    fn set_height(&mut self, height: f64) {
        self.height = height;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_corner_radius(&mut self, radius: f64) {
        self.corner_radius = radius;
    }

    fn layout_if_needed(&mut self) {
        self.layout_passes += 1;
    }
}

#[cfg(test)]
impl PanelView {
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }
}
