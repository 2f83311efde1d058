use crate::platform::Surface;
use crate::types::Rect;

/// Something the world can composite and scroll.
///
/// The world keeps sprites in insertion order and paints them in that order,
/// so later sprites cover earlier ones.
pub trait Sprite {
    /// Paint at the current screen-space bounds. Must not mutate other state.
    fn draw(&self, target: &mut dyn Surface);

    /// Shift the screen-space bounds in place. Only the owning world calls this.
    fn translate(&mut self, dx: i32, dy: i32);

    /// Current screen-space bounds.
    fn bounds(&self) -> Rect;
}
