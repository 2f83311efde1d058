//! Static, image-backed entities placed at world coordinates.

use std::path::Path;
use std::rc::Rc;

use crate::assets::{load_image, AssetError, LoadedImage};
use crate::platform::Surface;
use crate::sprite::Sprite;
use crate::types::{Image, Rect, WorldDimensions};

/// An immovable sprite.
///
/// The block's size always comes from its image. Its position is converted
/// from world space to screen space once, at construction; afterwards only
/// the owning world's scrolling moves it.
#[derive(Debug, Clone)]
pub struct Block {
    image: Rc<Image>,
    bounds: Rect,
    fallback: Option<Rc<AssetError>>,
}

impl Block {
    /// Place `image` with its bottom-left corner at world position `(x, y)`.
    pub fn new(x: i32, y: i32, image: Rc<Image>, dims: WorldDimensions) -> Self {
        let bounds = Rect::new(
            x,
            dims.to_screen_y(y, image.height()),
            image.width(),
            image.height(),
        );
        Self {
            image,
            bounds,
            fallback: None,
        }
    }

    /// Place a loader result, remembering why a fallback was used.
    pub fn from_loaded(x: i32, y: i32, loaded: LoadedImage, dims: WorldDimensions) -> Self {
        let fallback = loaded.fallback_reason().cloned();
        let mut block = Self::new(x, y, loaded.into_image(), dims);
        block.fallback = fallback;
        block
    }

    /// Load `path` and place it. Never fails: unloadable artwork is replaced
    /// by the fallback tile.
    pub fn load(x: i32, y: i32, path: impl AsRef<Path>, dims: WorldDimensions) -> Self {
        Self::from_loaded(x, y, load_image(path), dims)
    }

    pub fn image(&self) -> &Rc<Image> {
        &self.image
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Why the fallback tile is shown, if it is.
    pub fn fallback_reason(&self) -> Option<&AssetError> {
        self.fallback.as_deref()
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

impl Sprite for Block {
    fn draw(&self, target: &mut dyn Surface) {
        target.blit(&self.image, self.bounds.x, self.bounds.y);
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.bounds.translate(dx, dy);
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
