//! End-to-end world behaviour through the facade crate, on a headless platform.

use std::rc::Rc;

use tile_world::core::{
    Block, HeadlessPlatform, ScriptedFrame, Unlimited, World, WorldConfig,
};
use tile_world::types::{Direction, Image, Rgba, WorldDimensions};

fn world(frames: Vec<ScriptedFrame>) -> World<HeadlessPlatform, Unlimited> {
    World::with_limiter(
        WorldConfig::new(10, 10, 20, 20, 32),
        HeadlessPlatform::new().with_frames(frames),
        Unlimited::default(),
    )
    .unwrap()
}

#[test]
fn scroll_right_saturates_at_world_edge() {
    let mut w = world(Vec::new());
    for _ in 0..40 {
        w.scroll_right(10);
    }
    assert_eq!(w.offset(), (-320, 0));
    assert_eq!(w.scroll_right(10), 0);
    assert_eq!(w.offset(), (-320, 0));
}

#[test]
fn scroll_up_from_origin_is_noop() {
    let mut w = world(Vec::new());
    assert_eq!(w.scroll_up(10), 0);
    assert_eq!(w.offset(), (0, 0));
}

#[test]
fn block_at_world_origin_sits_on_bottom_row() {
    let dims = WorldDimensions::new(640, 640, 0);
    let block = Block::new(0, 0, Rc::new(Image::filled(32, 32, Rgba::BLACK)), dims);
    assert_eq!(block.bounds().x, 0);
    assert_eq!(block.bounds().y, 608);
}

#[test]
fn missing_image_places_fallback_block() {
    let mut w = world(Vec::new());
    assert!(!w.place_block(64, 0, "no/such/tile.png"));

    let bounds = w.sprites()[0].bounds();
    assert_eq!((bounds.x, bounds.y), (64, 608));
    assert_eq!((bounds.width, bounds.height), (32, 32));
}

#[test]
fn sprites_follow_the_scroll_offset() {
    let mut w = world(Vec::new());
    w.place_image(96, 0, Rc::new(Image::filled(32, 32, Rgba::opaque(1, 2, 3))));
    w.scroll_down(100);
    w.scroll_right(50);

    assert_eq!(w.offset(), (-50, -100));
    let bounds = w.sprites()[0].bounds();
    assert_eq!((bounds.x, bounds.y), (46, 508));
}

#[test]
fn quit_on_third_frame_presents_three_frames() {
    let mut w = world(vec![
        ScriptedFrame::idle(),
        ScriptedFrame::idle(),
        ScriptedFrame::quit(),
        ScriptedFrame::idle(),
    ]);
    let summary = w.run().unwrap();

    assert_eq!(summary.frames, 3);
    assert_eq!(w.platform().presented(), 3);
    assert_eq!(w.limiter().ticks(), 3);
    assert!(w.platform().is_shut_down());
}

#[test]
fn held_key_scrolls_every_frame_until_the_edge() {
    let mut frames = vec![ScriptedFrame::holding(Direction::Down); 40];
    frames.push(ScriptedFrame::quit());
    let mut w = world(frames);

    let summary = w.run().unwrap();
    assert_eq!(summary.frames, 41);
    assert_eq!(w.offset(), (0, -320));
}

#[test]
fn presented_frame_shows_block_after_scrolling_to_ground() {
    let mut frames = vec![ScriptedFrame::holding(Direction::Down); 32];
    frames.push(ScriptedFrame::quit());
    let mut w = world(frames);
    w.place_image(0, 0, Rc::new(Image::filled(32, 32, Rgba::opaque(200, 10, 10))));

    w.run().unwrap();

    // World bottom now lines up with the viewport bottom.
    let frame = w.platform().last_frame().unwrap();
    assert_eq!(frame.get(0, 319), Some(Rgba::opaque(200, 10, 10)));
    assert_eq!(frame.get(0, 287), Some(Rgba::BLACK));
}

#[test]
fn set_icon_hands_keyed_icon_to_platform() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("icon.png");
    let mut png = image::RgbaImage::from_pixel(48, 40, image::Rgba([0, 160, 0, 255]));
    png.put_pixel(3, 4, image::Rgba([100, 100, 100, 255]));
    png.save(&path).unwrap();

    let mut w = world(Vec::new());
    assert!(w.platform().icon().is_none());
    w.set_icon(&path);

    let icon = w.platform().icon().expect("icon should be set");
    assert_eq!((icon.width(), icon.height()), (32, 32));
    assert_eq!(icon.get(3, 4), Some(Rgba::TRANSPARENT));
    assert_eq!(icon.get(0, 0), Some(Rgba::opaque(0, 160, 0)));
}

#[test]
fn unusable_icon_leaves_platform_without_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiny.png");
    image::RgbaImage::from_pixel(8, 8, image::Rgba([0, 0, 0, 255]))
        .save(&path)
        .unwrap();

    let mut w = world(Vec::new());
    w.set_icon(&path);
    assert!(w.platform().icon().is_none());
}
