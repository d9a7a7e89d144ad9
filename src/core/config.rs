//! Visual and behavioral constants.

// --- Visual colors (hex) ---
pub const BG_COLOR: u32 = 0xF2F2F7;
pub const PANEL_COLLAPSED_COLOR: u32 = 0x0000FF;
pub const PANEL_EXPANDED_COLOR: u32 = 0xFF0000;

// --- Panel geometry ---
pub const PANEL_COLLAPSED_H: f64 = 150.0;
pub const PANEL_EXPANDED_INSET: f64 = 20.0;
pub const PANEL_COLLAPSED_RADIUS: f64 = 0.0;
pub const PANEL_EXPANDED_RADIUS: f64 = 10.0;

// --- Animation ---
pub const ANIM_SETTLE_MS: f64 = 500.0;
pub const ANIM_DAMPING_RATIO: f64 = 0.8;
/// Envelope left at the end of a settle; 0.1% of the starting offset.
pub const SPRING_SETTLE_EPSILON: f64 = 0.001;

// --- Drag mapping ---
pub const PROGRESS_MIN: f64 = 0.001;
pub const PROGRESS_MAX: f64 = 0.999;
pub const REVERSE_THRESHOLD: f64 = 0.3;

// --- Window ---
pub const WINDOW_DEFAULT_W: i32 = 390;
pub const WINDOW_DEFAULT_H: i32 = 844;
pub const FRAME_MS: u64 = 16;

/// Tuning values the panel controller reads at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelConfig {
    pub collapsed_height: f64,
    pub expanded_inset: f64,
    pub collapsed_radius: f64,
    pub expanded_radius: f64,
    pub collapsed_color: u32,
    pub expanded_color: u32,
    pub duration_ms: f64,
    pub damping_ratio: f64,
    pub progress_min: f64,
    pub progress_max: f64,
    pub reverse_threshold: f64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            collapsed_height: PANEL_COLLAPSED_H,
            expanded_inset: PANEL_EXPANDED_INSET,
            collapsed_radius: PANEL_COLLAPSED_RADIUS,
            expanded_radius: PANEL_EXPANDED_RADIUS,
            collapsed_color: PANEL_COLLAPSED_COLOR,
            expanded_color: PANEL_EXPANDED_COLOR,
            duration_ms: ANIM_SETTLE_MS,
            damping_ratio: ANIM_DAMPING_RATIO,
            progress_min: PROGRESS_MIN,
            progress_max: PROGRESS_MAX,
            reverse_threshold: REVERSE_THRESHOLD,
        }
    }
}
