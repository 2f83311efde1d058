/// Errors raised by a display/input backend.
#[derive(thiserror::Error, Debug)]
pub enum PlatformError {
    #[error("display surface is not open")]
    NotOpen,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// World construction and main loop errors.
#[derive(thiserror::Error, Debug)]
pub enum WorldError {
    /// A viewport, world or grid dimension was zero or negative.
    #[error("invalid {name}: {value} (must be positive)")]
    InvalidDimension { name: &'static str, value: i32 },

    #[error("invalid frame rate: {0} (must be positive)")]
    InvalidFrameRate(u32),

    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),
}
