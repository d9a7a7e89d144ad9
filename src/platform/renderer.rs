//! Abstract rendering interface.

use crate::core::types::Color;

pub trait Renderer {
    fn begin_frame(&mut self, width: i32, height: i32);
    fn end_frame(&mut self);

    // Primitives
    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64, color: Color);
    fn fill_rounded_rect(&self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: Color);

    /// Rounded rect with square bottom corners.
    fn fill_top_rounded_rect(&self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: Color);
}
