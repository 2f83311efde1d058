//! Image decoding and the fallback ("error") tile.

use std::path::Path;
use std::rc::Rc;

use log::{debug, warn};

use crate::error::AssetError;
use crate::types::{Image, Rgba, FALLBACK_TILE_SIZE};

/// Outcome of an image load.
///
/// Loading never fails outright: a missing or undecodable file yields the
/// fallback tile together with the reason it was substituted.
#[derive(Debug, Clone)]
pub enum LoadedImage {
    Loaded(Rc<Image>),
    Fallback {
        image: Rc<Image>,
        reason: Rc<AssetError>,
    },
}

impl LoadedImage {
    pub fn image(&self) -> &Rc<Image> {
        match self {
            LoadedImage::Loaded(image) => image,
            LoadedImage::Fallback { image, .. } => image,
        }
    }

    pub fn into_image(self) -> Rc<Image> {
        match self {
            LoadedImage::Loaded(image) => image,
            LoadedImage::Fallback { image, .. } => image,
        }
    }

    pub fn fallback_reason(&self) -> Option<&Rc<AssetError>> {
        match self {
            LoadedImage::Loaded(_) => None,
            LoadedImage::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, LoadedImage::Fallback { .. })
    }
}

/// Load an image, substituting the fallback tile on any failure.
pub fn load_image(path: impl AsRef<Path>) -> LoadedImage {
    let path = path.as_ref();
    match decode_image(path) {
        Ok(image) => LoadedImage::Loaded(Rc::new(image)),
        Err(err) => {
            warn!("using fallback tile: {}", err);
            LoadedImage::Fallback {
                image: Rc::new(fallback_image()),
                reason: Rc::new(err),
            }
        }
    }
}

/// Decode an image file into RGBA pixels.
pub fn decode_image(path: impl AsRef<Path>) -> Result<Image, AssetError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(AssetError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let decoded = image::open(path).map_err(|source| match source {
        image::ImageError::Unsupported(e) => AssetError::UnsupportedFormat {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
        source => AssetError::Decode {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    let image =
        Image::from_rgba8(width, height, rgba.as_raw()).ok_or_else(|| {
            AssetError::UnsupportedFormat {
                path: path.to_path_buf(),
                message: format!("pixel data does not match {}x{}", width, height),
            }
        })?;

    debug!("loaded image {}x{} from {}", width, height, path.display());
    Ok(image)
}

/// The placeholder drawn for images that could not be loaded.
///
/// A magenta/black checkerboard so it stands out against any artwork.
pub fn fallback_image() -> Image {
    const CHECK: u32 = 8;
    let mut image = Image::new(FALLBACK_TILE_SIZE, FALLBACK_TILE_SIZE);
    for y in 0..FALLBACK_TILE_SIZE {
        for x in 0..FALLBACK_TILE_SIZE {
            let color = if ((x / CHECK) + (y / CHECK)) % 2 == 0 {
                Rgba::MAGENTA
            } else {
                Rgba::BLACK
            };
            image.set(x, y, color);
        }
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_fallback() {
        let loaded = load_image("definitely/not/here.png");
        assert!(loaded.is_fallback());
        assert_eq!(**loaded.image(), fallback_image());
        assert!(matches!(
            loaded.fallback_reason().map(|r| r.as_ref()),
            Some(AssetError::NotFound { .. })
        ));
    }

    #[test]
    fn test_decodes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tile.png");
        image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let loaded = load_image(&path);
        assert!(!loaded.is_fallback());
        let img = loaded.image();
        assert_eq!((img.width(), img.height()), (4, 2));
        assert_eq!(img.get(3, 1), Some(Rgba::opaque(10, 20, 30)));
    }

    #[test]
    fn test_corrupt_png_is_treated_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        let loaded = load_image(&path);
        let reason = loaded.fallback_reason().expect("fallback expected");
        assert!(reason.is_missing());
        assert!(matches!(reason.as_ref(), AssetError::Decode { .. }));
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tile.xyz");
        std::fs::write(&path, b"whatever").unwrap();

        let err = decode_image(&path).unwrap_err();
        assert!(matches!(err, AssetError::UnsupportedFormat { .. }));
        assert!(err.is_missing());
    }

    #[test]
    fn test_fallback_tile_is_checkered() {
        let img = fallback_image();
        assert_eq!(img.width(), FALLBACK_TILE_SIZE);
        assert_eq!(img.get(0, 0), Some(Rgba::MAGENTA));
        assert_eq!(img.get(8, 0), Some(Rgba::BLACK));
        assert_eq!(img.get(8, 8), Some(Rgba::MAGENTA));
    }
}
