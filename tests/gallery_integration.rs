//! Integration tests for indexing, comparing and rendering a gallery

use std::fs;
use std::path::Path;

use chrono::{Local, TimeZone};
use image::{ImageBuffer, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use pretty_assertions::assert_eq;

use visual_gallery::{Config, Layout, Status, build_index, compare_all, generate, render_gallery};

fn fixture_layout(root: &Path) -> Layout {
    let layout = Layout::rooted_at(root);
    fs::create_dir_all(&layout.baseline_dir).expect("Failed to create baseline dir");
    fs::create_dir_all(&layout.recent_dir).expect("Failed to create recent dir");
    fs::create_dir_all(&layout.output_dir).expect("Failed to create gallery dir");
    layout
}

fn solid(color: [u8; 3]) -> RgbImage {
    ImageBuffer::from_pixel(8, 6, Rgb(color))
}

/// 1 passes at its latest version, 2 differs in pixels, 3 differs in
/// description, 4 only has a baseline, 5 only has a recent result.
fn populate(layout: &Layout) {
    solid([200, 0, 0]).save(layout.baseline_image(1)).unwrap();
    fs::write(layout.baseline_description(1), "red").unwrap();
    solid([200, 0, 0]).save(layout.recent_image(1, 1)).unwrap();
    solid([0, 0, 0]).save(layout.recent_image(1, 2)).unwrap();
    fs::write(layout.recent_description(1, 2), "red").unwrap();
    solid([200, 0, 0]).save(layout.recent_image(1, 3)).unwrap();
    fs::write(layout.recent_description(1, 3), "red").unwrap();

    solid([0, 200, 0]).save(layout.baseline_image(2)).unwrap();
    solid([0, 201, 0]).save(layout.recent_image(2, 1)).unwrap();

    solid([0, 0, 200]).save(layout.baseline_image(3)).unwrap();
    fs::write(layout.baseline_description(3), "blue").unwrap();
    solid([0, 0, 200]).save(layout.recent_image(3, 1)).unwrap();
    fs::write(layout.recent_description(3, 1), "dark blue").unwrap();

    solid([9, 9, 9]).save(layout.baseline_image(4)).unwrap();
    solid([9, 9, 9]).save(layout.recent_image(5, 1)).unwrap();

    fs::write(layout.baseline_dir.join("notes.txt"), "ignored").unwrap();
    fs::write(layout.recent_dir.join("gallery.css"), "ignored").unwrap();
}

#[test]
fn test_compare_classifies_each_test() {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let layout = fixture_layout(tmp.path());
    populate(&layout);

    let results = build_index(&layout.baseline_dir, &layout.recent_dir).unwrap();
    assert_eq!(results[&1].most_recent, Some(3));

    let entries = compare_all(&layout, &results);
    let outcome: Vec<(u32, bool)> = entries.iter().map(|e| (e.index, e.failed)).collect();
    assert_eq!(
        outcome,
        vec![(1, false), (2, true), (3, true), (4, true), (5, true)]
    );
    assert_eq!(entries[0].status, Status::Success);
    assert_eq!(entries[3].most_recent_image, None);
    assert_eq!(entries[4].baseline_image, None);
}

#[test]
fn test_reencoded_image_with_same_pixels_passes() {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let layout = fixture_layout(tmp.path());

    let img = solid([12, 34, 56]);
    img.save(layout.baseline_image(1)).unwrap();

    // Same pixels, different encoder settings and extra bytes in the file.
    let mut bytes = Vec::new();
    image::codecs::png::PngEncoder::new_with_quality(
        &mut bytes,
        image::codecs::png::CompressionType::Best,
        image::codecs::png::FilterType::Paeth,
    )
    .write_image(img.as_raw(), img.width(), img.height(), image::ColorType::Rgb8)
    .unwrap();
    fs::write(layout.recent_image(1, 1), &bytes).unwrap();

    let results = build_index(&layout.baseline_dir, &layout.recent_dir).unwrap();
    let entries = compare_all(&layout, &results);

    assert!(!entries[0].failed, "re-encoded PNG should compare by pixels");
}

#[test]
fn test_different_colour_type_fails() {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let layout = fixture_layout(tmp.path());

    solid([1, 2, 3]).save(layout.baseline_image(1)).unwrap();
    let rgba: RgbaImage = ImageBuffer::from_pixel(8, 6, Rgba([1, 2, 3, 255]));
    rgba.save(layout.recent_image(1, 1)).unwrap();

    let results = build_index(&layout.baseline_dir, &layout.recent_dir).unwrap();
    assert!(compare_all(&layout, &results)[0].failed);
}

#[test]
fn test_generate_writes_pages_and_stylesheet() {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let layout = fixture_layout(tmp.path());
    populate(&layout);

    let config = Config::defaults().layout(layout.clone());
    let summary = generate(&config).unwrap();

    assert_eq!(summary.total, 5);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, 4);

    let all = fs::read_to_string(layout.output_dir.join("all.html")).unwrap();
    let failed = fs::read_to_string(layout.output_dir.join("failed.html")).unwrap();
    assert!(layout.output_dir.join("gallery.css").exists());

    assert!(all.contains("<title>OVT Gallery: All Tests</title>"));
    assert!(all.contains("Test 1</h2>"));
    assert!(all.contains("src=\"../recent/1-3.png\""));
    assert!(all.contains("src=\"../baseline/1.png\""));

    assert!(failed.contains("<title>OVT Gallery: Failed Tests</title>"));
    assert!(!failed.contains("Test 1</h2>"));
    assert!(failed.contains("Test 2</h2>"));
    assert!(failed.contains("dark blue"));
}

#[test]
fn test_render_empty_gallery() {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let layout = fixture_layout(tmp.path());
    let config = Config::defaults().layout(layout.clone()).title("Empty");
    let time = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

    let summary = render_gallery(&config, Vec::new(), time).unwrap();
    assert_eq!(summary.total, 0);

    for page in ["all.html", "failed.html"] {
        let html = fs::read_to_string(layout.output_dir.join(page)).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("</body>\n</html>"));
        assert!(!html.contains("class=\"test\""));
        assert!(html.contains("Generated 2024-01-02 03:04:05"));
    }
}

#[test]
fn test_custom_stylesheet_is_copied() {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let layout = fixture_layout(tmp.path());
    let css = tmp.path().join("custom.css");
    fs::write(&css, "body { color: red; }").unwrap();

    let config = Config::defaults().layout(layout.clone()).stylesheet(&css);
    generate(&config).unwrap();

    assert_eq!(
        fs::read_to_string(layout.output_dir.join("gallery.css")).unwrap(),
        "body { color: red; }"
    );
}

#[test]
fn test_missing_output_dir_is_an_error() {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let layout = fixture_layout(tmp.path());
    fs::remove_dir_all(&layout.output_dir).unwrap();

    let config = Config::defaults().layout(layout);
    assert!(generate(&config).is_err());
}

#[test]
fn test_missing_recent_dir_is_an_error() {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let layout = fixture_layout(tmp.path());
    fs::remove_dir_all(&layout.recent_dir).unwrap();

    let config = Config::defaults().layout(layout);
    assert!(generate(&config).is_err());
}

#[test]
fn test_rendering_twice_gives_same_classification() {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let layout = fixture_layout(tmp.path());
    populate(&layout);
    let config = Config::defaults().layout(layout);

    let first = generate(&config).unwrap();
    let second = generate(&config).unwrap();
    assert_eq!(first.entries, second.entries);
}
