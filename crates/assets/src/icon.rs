//! Window icon loading with colour-key transparency.
//!
//! Icons are fixed-size bitmaps. Instead of native alpha, one reserved colour
//! ([`ICON_COLOR_KEY`]) marks fully transparent pixels; every other pixel is
//! opaque regardless of the source file's alpha channel.

use std::path::Path;

use log::debug;

use crate::error::AssetError;
use crate::loader::decode_image;
use crate::types::{Image, Rgb, Rgba, ICON_COLOR_KEY, ICON_SIZE};

/// Load an icon bitmap and apply the colour key.
///
/// Only the top-left `ICON_SIZE` square of the source is used.
pub fn load_icon(path: impl AsRef<Path>) -> Result<Image, AssetError> {
    let path = path.as_ref();
    let raw = decode_image(path)?;
    if raw.width() < ICON_SIZE || raw.height() < ICON_SIZE {
        return Err(AssetError::IconTooSmall {
            path: path.to_path_buf(),
            width: raw.width(),
            height: raw.height(),
            required: ICON_SIZE,
        });
    }

    debug!("icon loaded from {}", path.display());
    Ok(apply_color_key(&raw, ICON_SIZE, ICON_COLOR_KEY))
}

/// Copy the top-left `size` square of `raw`, mapping `key` to transparent and
/// everything else to opaque.
pub fn apply_color_key(raw: &Image, size: u32, key: Rgb) -> Image {
    let mut icon = Image::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let rgb = raw.get(x, y).map(Rgba::rgb).unwrap_or(key);
            let pixel = if rgb == key {
                Rgba::TRANSPARENT
            } else {
                rgb.with_alpha(255)
            };
            icon.set(x, y, pixel);
        }
    }
    icon
}
