use std::path::PathBuf;

/// Asset loading errors.
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    /// The path does not resolve to a file.
    #[error("asset not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but could not be decoded.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The file exists but its format is not supported.
    #[error("unsupported asset format {}: {message}", path.display())]
    UnsupportedFormat { path: PathBuf, message: String },

    /// Icon bitmaps must cover the full icon square.
    #[error("icon {} is {width}x{height}, needs at least {required}x{required}", path.display())]
    IconTooSmall {
        path: PathBuf,
        width: u32,
        height: u32,
        required: u32,
    },

    /// No audio output could be opened.
    #[error("audio unavailable: {0}")]
    AudioUnavailable(String),
}

impl AssetError {
    /// True when the asset is absent or undecodable, i.e. anything the caller
    /// should treat as "missing".
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            AssetError::NotFound { .. }
                | AssetError::Decode { .. }
                | AssetError::UnsupportedFormat { .. }
        )
    }
}
