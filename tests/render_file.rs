extern crate image;
extern crate mandel;
extern crate num;
extern crate tempfile;

use mandel::{build_palette, render_to_file, FrameSpec, Rgb, Viewport};
use num::Complex;

#[test]
fn render_to_file_writes_a_decodable_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("classic.png");

    let viewport = Viewport::from_bounds(-2.0, 0.65, -1.25, 1.25).unwrap();
    let spec = FrameSpec::new(viewport, 24, 18, 80, Complex::new(0.0, 0.0)).unwrap();
    let palette = build_palette(
        80,
        Rgb(0, 0, 0),
        Rgb(255, 128, 255),
        (0.75, 2.0, 0.5),
        Some(Rgb(0, 0, 0)),
    )
    .unwrap();

    render_to_file(&spec, &palette, 2, &path).unwrap();

    let img = image::open(&path).unwrap().to_rgb();
    assert_eq!(img.dimensions(), (24, 18));
    // Pixels near the image center are inside the set and carry the
    // forced interior color.
    let center = img.get_pixel(14, 9);
    assert_eq!(center.0, [0, 0, 0]);
}

#[test]
fn render_to_unwritable_path_is_an_encoding_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.png");

    let viewport = Viewport::from_bounds(-2.0, 0.65, -1.25, 1.25).unwrap();
    let spec = FrameSpec::new(viewport, 8, 8, 16, Complex::new(0.0, 0.0)).unwrap();
    let palette = build_palette(16, Rgb(0, 0, 0), Rgb(255, 255, 255), (1.0, 1.0, 1.0), None).unwrap();

    match render_to_file(&spec, &palette, 1, &path) {
        Err(mandel::RenderError::Encoding(_)) => {}
        other => panic!("expected an encoding error, got {:?}", other),
    }
    assert!(!path.exists());
}
