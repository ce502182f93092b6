//! Benchmarks for the editing pipeline.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pxedit::tools::{flood_fill, Cell};
use pxedit::{
    blend_pixel, composite_frame, from_json, to_json, Artwork, BlendMode, Colour, History,
    RasterBuffer,
};

/// A buffer with a one-pixel grid of walls every 8 pixels, so fills have
/// to follow a maze of open cells.
fn gridded(size: u32) -> RasterBuffer {
    let mut buffer = RasterBuffer::new(size, size);
    for y in 0..size {
        for x in 0..size {
            if (x % 8 == 7 && y % 16 != 3) || (y % 8 == 7 && x % 16 != 11) {
                buffer.set_pixel(x, y, Colour::BLACK);
            }
        }
    }
    buffer
}

/// An artwork with `layers` filled layers, each using a different blend mode.
fn stacked(size: u32, layers: usize) -> Artwork {
    let mut artwork = Artwork::new("bench", size, size);
    for i in 0..layers {
        let index = if i == 0 { 0 } else { artwork.add_layer() };
        let mut buffer = RasterBuffer::new(size, size);
        for y in 0..size {
            for x in 0..size {
                let shade = ((x * 7 + y * 13 + i as u32 * 31) % 256) as u8;
                buffer.set_pixel(x, y, Colour::new(shade, 255 - shade, shade / 2, 200));
            }
        }
        let layer = artwork.layer_mut(index).unwrap();
        layer.set_frame(1, Some(buffer));
        layer.blend_mode = BlendMode::ALL[i % BlendMode::ALL.len()];
        layer.set_opacity(80);
    }
    artwork
}

// -- Tool benchmarks --

fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill");

    for size in [16u32, 64, 256] {
        let open = RasterBuffer::new(size, size);
        group.bench_with_input(BenchmarkId::new("open", size), &open, |b, buffer| {
            b.iter(|| {
                let mut buffer = buffer.clone();
                flood_fill(&mut buffer, Cell::new(0, 0), black_box(Colour::WHITE), 1)
            })
        });

        let maze = gridded(size);
        group.bench_with_input(BenchmarkId::new("maze", size), &maze, |b, buffer| {
            b.iter(|| {
                let mut buffer = buffer.clone();
                flood_fill(&mut buffer, Cell::new(0, 0), black_box(Colour::WHITE), 1)
            })
        });
    }

    group.finish();
}

// -- Compositing benchmarks --

fn bench_composite(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite");

    for layers in [1usize, 4, 16] {
        let artwork = stacked(64, layers);
        group.bench_with_input(BenchmarkId::new("64x64", layers), &artwork, |b, artwork| {
            b.iter(|| composite_frame(black_box(artwork), 1))
        });
    }

    let backdrop = Colour::new(120, 80, 200, 180);
    let source = Colour::new(30, 220, 90, 140);
    for mode in [BlendMode::Normal, BlendMode::SoftLight, BlendMode::Luminosity] {
        group.bench_function(format!("pixel_{}", mode), |b| {
            b.iter(|| blend_pixel(black_box(backdrop), black_box(source), mode, 0.75))
        });
    }

    group.finish();
}

// -- History and document benchmarks --

fn bench_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("document");
    let artwork = stacked(64, 4);

    group.bench_function("history_commit_20", |b| {
        b.iter(|| {
            let mut history = History::new(20);
            for _ in 0..25 {
                history.commit(black_box(&artwork));
            }
            history
        })
    });

    let json = to_json(&artwork).unwrap();
    group.bench_function("to_json", |b| b.iter(|| to_json(black_box(&artwork)).unwrap()));
    group.bench_function("from_json", |b| b.iter(|| from_json(black_box(&json)).unwrap()));

    group.finish();
}

criterion_group!(benches, bench_fill, bench_composite, bench_document);
criterion_main!(benches);
