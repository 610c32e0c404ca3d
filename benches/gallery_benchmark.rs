use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{ImageBuffer, Rgb, RgbImage};
use std::fs;

use visual_gallery::{Layout, build_index, compare_all};

fn benchmark_index_and_compare(c: &mut Criterion) {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let layout = Layout::rooted_at(tmp.path());
    fs::create_dir_all(&layout.baseline_dir).unwrap();
    fs::create_dir_all(&layout.recent_dir).unwrap();

    let img: RgbImage = ImageBuffer::from_pixel(64, 48, Rgb([40, 80, 120]));
    for index in 0..50 {
        img.save(layout.baseline_image(index)).unwrap();
        fs::write(layout.baseline_description(index), "fixture").unwrap();
        for version in 0..3 {
            img.save(layout.recent_image(index, version)).unwrap();
            fs::write(layout.recent_description(index, version), "fixture").unwrap();
        }
    }

    c.bench_function("build_index", |b| {
        b.iter(|| build_index(black_box(&layout.baseline_dir), black_box(&layout.recent_dir)))
    });

    let results = build_index(&layout.baseline_dir, &layout.recent_dir).unwrap();
    c.bench_function("compare_all", |b| {
        b.iter(|| compare_all(black_box(&layout), black_box(&results)))
    });
}

criterion_group!(benches, benchmark_index_and_compare);
criterion_main!(benches);
