// SPDX-License-Identifier: MIT
//
// Criterion benchmarks for the rectification pipeline on a small synthetic
// page photo.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;

use pagewarp_scan::PageScanner;

/// Benchmark the full pipeline (edges through JPEG encoding) on a 400x400
/// image containing a rotated white page, the typical success path.
fn bench_rectify(c: &mut Criterion) {
    let mut img = RgbaImage::from_pixel(400, 400, Rgba([0, 0, 0, 255]));
    let angle = 15f64.to_radians();
    let (sin, cos) = angle.sin_cos();
    let local = [(-150.0, -100.0), (150.0, -100.0), (150.0, 100.0), (-150.0, 100.0)];
    let poly: Vec<Point<i32>> = local
        .iter()
        .map(|&(x, y): &(f64, f64)| {
            Point::new(
                (200.0 + x * cos - y * sin).round() as i32,
                (200.0 + x * sin + y * cos).round() as i32,
            )
        })
        .collect();
    draw_polygon_mut(&mut img, &poly, Rgba([255, 255, 255, 255]));
    let image = DynamicImage::ImageRgba8(img);

    let scanner = PageScanner::new();
    c.bench_function("rectify (400x400 rotated page)", |b| {
        b.iter(|| {
            let outcome = scanner.rectify(black_box(&image), false);
            black_box(outcome);
        });
    });
}

criterion_group!(benches, bench_rectify);
criterion_main!(benches);
