//! Asset loading module - images, icons and background music
//!
//! Everything that touches the filesystem lives here so the world model can stay
//! pure. Failures never abort the viewer:
//!
//! - **Images** are substituted with a visibly distinct fallback tile. The
//!   substitution is reported through [`LoadedImage::Fallback`] so callers can
//!   inspect the reason without scraping logs.
//! - **Icons** and **music** are skipped; the caller logs the returned
//!   [`AssetError`] and carries on.
//! - **Unsupported formats** are caught at this boundary and treated like
//!   missing files.
//!
//! # Module Structure
//!
//! - [`loader`]: image decoding and the fallback tile
//! - [`icon`]: colour-keyed window icon
//! - [`cache`]: path-keyed image cache shared by block placements
//! - [`music`]: looping background music (`audio` feature)

pub mod cache;
pub mod error;
pub mod icon;
pub mod loader;
pub mod music;

pub use tile_world_types as types;

pub use cache::ImageCache;
pub use error::AssetError;
pub use icon::{apply_color_key, load_icon};
pub use loader::{decode_image, fallback_image, load_image, LoadedImage};
pub use music::MusicPlayer;
