pub mod animator;
pub mod pan_gesture;
pub mod panel_controller;
pub mod panel_state;
pub mod panel_view;
