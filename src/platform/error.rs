use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("failed to open X11 display")]
    DisplayUnavailable,

    #[error("failed to create Cairo surface for window {0:#x}")]
    SurfaceCreation(u64),

    #[error("window title contains an interior NUL byte")]
    InvalidTitle(#[from] std::ffi::NulError),
}
