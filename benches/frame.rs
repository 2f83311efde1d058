use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tile_world::core::{Canvas, HeadlessPlatform, Unlimited, World, WorldConfig};
use tile_world::term::{encode_diff_into, FrameBuffer, PixelView, StatusLine};
use tile_world::types::{Direction, Image, Rgba};

fn filled_world() -> World<HeadlessPlatform, Unlimited> {
    let mut world = World::with_limiter(
        WorldConfig::new(10, 10, 20, 20, 32),
        HeadlessPlatform::new(),
        Unlimited::default(),
    )
    .expect("valid config");
    let tile = Rc::new(Image::filled(32, 32, Rgba::new(90, 140, 60, 200)));
    for y in 0..20 {
        for x in 0..20 {
            world.place_image(x * 32, y * 32, Rc::clone(&tile));
        }
    }
    world
}

fn bench_render_frame(c: &mut Criterion) {
    let mut world = filled_world();

    c.bench_function("render_frame_400_blocks", |b| {
        b.iter(|| {
            world.render_frame().expect("headless present");
        })
    });
}

fn bench_scroll(c: &mut Criterion) {
    let mut world = filled_world();
    let mut direction = Direction::Right;

    c.bench_function("scroll_400_blocks", |b| {
        b.iter(|| {
            if world.scroll(direction, black_box(10)) == 0 {
                direction = match direction {
                    Direction::Right => Direction::Left,
                    _ => Direction::Right,
                };
            }
        })
    });
}

fn bench_pixel_view(c: &mut Criterion) {
    let mut canvas = Canvas::new(320, 320);
    canvas.blit(&Image::filled(100, 100, Rgba::opaque(200, 50, 50)), 40, 40);
    let view = PixelView::new();
    let status = StatusLine::new("bench");
    let mut fb = FrameBuffer::new(120, 40);

    c.bench_function("pixel_view_320px_to_120x40", |b| {
        b.iter(|| {
            view.render_into(black_box(&canvas), Some(&status), &mut fb);
        })
    });
}

fn bench_diff_encode(c: &mut Criterion) {
    let view = PixelView::new();
    let mut a = Canvas::new(320, 320);
    let mut b_canvas = Canvas::new(320, 320);
    a.blit(&Image::filled(32, 32, Rgba::opaque(255, 255, 255)), 0, 0);
    b_canvas.blit(&Image::filled(32, 32, Rgba::opaque(255, 255, 255)), 10, 0);

    let mut prev = FrameBuffer::new(120, 40);
    let mut next = FrameBuffer::new(120, 40);
    view.render_into(&a, None, &mut prev);
    view.render_into(&b_canvas, None, &mut next);
    let mut out = Vec::with_capacity(64 * 1024);

    c.bench_function("diff_encode_scrolled_tile", |b| {
        b.iter(|| {
            out.clear();
            encode_diff_into(black_box(&prev), black_box(&next), &mut out).expect("encode");
        })
    });
}

criterion_group!(
    benches,
    bench_render_frame,
    bench_scroll,
    bench_pixel_view,
    bench_diff_encode
);
criterion_main!(benches);
