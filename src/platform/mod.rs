pub mod error;
pub mod renderer;
pub mod renderer_cairo;
pub mod window_x11;
