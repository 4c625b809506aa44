use super::*;

fn opts() -> CpuBackendOpts {
    CpuBackendOpts {
        load_system_fonts: false,
        ..CpuBackendOpts::default()
    }
}

fn backend(width: u32, height: u32, format: PixelFormat) -> CpuBackend {
    let data = vec![0u8; format.stride_for_width(width) * height as usize];
    CpuBackend::create(width, height, format, data, &opts()).unwrap()
}

fn argb(b: &CpuBackend, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * b.width + x) * 4) as usize;
    [b.canvas[i], b.canvas[i + 1], b.canvas[i + 2], b.canvas[i + 3]]
}

#[test]
fn rectangle_fill_covers_whole_pixels() {
    let mut b = backend(4, 4, PixelFormat::Argb32);
    b.rectangle(1.0, 1.0, 2.0, 2.0);
    b.set_source_rgba(1.0, 0.0, 0.0, 1.0);
    b.fill(false);
    assert_eq!(b.status(), Ok(()));
    assert_eq!(argb(&b, 1, 1), [255, 0, 0, 255]);
    assert_eq!(argb(&b, 2, 2), [255, 0, 0, 255]);
    assert_eq!(argb(&b, 0, 0), [0, 0, 0, 0]);
    assert_eq!(argb(&b, 3, 3), [0, 0, 0, 0]);
    assert!(b.path.path.is_empty());
}

#[test]
fn fill_preserve_keeps_the_path() {
    let mut b = backend(2, 2, PixelFormat::Argb32);
    b.rectangle(0.0, 0.0, 1.0, 1.0);
    b.fill(true);
    assert!(!b.path.path.is_empty());
    assert!(b.path.current.is_some());
}

#[test]
fn rgb24_red_fill_packs_little_endian() {
    let mut b = backend(2, 2, PixelFormat::Rgb24);
    b.rectangle(0.0, 0.0, 2.0, 2.0);
    b.set_source_rgba(1.0, 0.0, 0.0, 1.0);
    b.fill(false);
    let data = b.finish();
    assert_eq!(data.len(), 16);
    for px in data.chunks_exact(4) {
        assert_eq!(px, [0x00, 0x00, 0xff, 0x00]);
    }
}

#[test]
fn untouched_pixels_keep_their_exact_bytes() {
    let data: Vec<u8> = (0..16).collect();
    let b = CpuBackend::create(2, 2, PixelFormat::Argb32, data.clone(), &opts()).unwrap();
    assert_eq!(b.finish(), data);

    let mut b = CpuBackend::create(2, 2, PixelFormat::Argb32, data.clone(), &opts()).unwrap();
    b.rectangle(0.0, 0.0, 1.0, 1.0);
    b.set_source_rgba(0.0, 1.0, 0.0, 1.0);
    b.fill(false);
    let out = b.finish();
    assert_eq!(&out[..4], &[0x00, 0xff, 0x00, 0xff]);
    assert_eq!(&out[4..], &data[4..]);
}

#[test]
fn clip_limits_later_painting() {
    let mut b = backend(4, 1, PixelFormat::Argb32);
    b.rectangle(0.0, 0.0, 2.0, 1.0);
    b.clip(false);
    b.set_source_rgba(0.0, 0.0, 1.0, 1.0);
    b.paint(None);
    assert_eq!(argb(&b, 0, 0), [0, 0, 255, 255]);
    assert_eq!(argb(&b, 1, 0), [0, 0, 255, 255]);
    assert_eq!(argb(&b, 2, 0), [0, 0, 0, 0]);

    b.reset_clip();
    b.paint(None);
    assert_eq!(argb(&b, 3, 0), [0, 0, 255, 255]);
}

#[test]
fn paint_with_alpha_blends() {
    let mut b = backend(1, 1, PixelFormat::Argb32);
    b.set_source_rgba(1.0, 1.0, 1.0, 1.0);
    b.paint(Some(0.5));
    let px = argb(&b, 0, 0);
    assert!((127..=128).contains(&px[3]), "{px:?}");
    assert_eq!(px[0], px[3]);
}

#[test]
fn relative_move_without_current_point_sets_status() {
    let mut b = backend(2, 2, PixelFormat::Argb32);
    b.rel_move_to(1.0, 1.0);
    assert_eq!(b.status(), Err(Status::NoCurrentPoint));

    // Sticky: later calls are ignored.
    b.move_to(0.0, 0.0);
    assert!(b.path.path.is_empty());
    assert_eq!(b.status(), Err(Status::NoCurrentPoint));
}

#[test]
fn relative_line_is_measured_in_user_space() {
    let mut b = backend(8, 8, PixelFormat::Argb32);
    b.scale(2.0, 2.0);
    b.move_to(1.0, 1.0);
    b.rel_line_to(1.0, 0.0);
    assert_eq!(b.path.current, Some(Point::new(4.0, 2.0)));
}

#[test]
fn line_to_without_current_point_moves() {
    let mut b = backend(2, 2, PixelFormat::Argb32);
    b.line_to(1.0, 1.0);
    assert_eq!(b.path.path.elements(), &[PathEl::MoveTo(Point::new(1.0, 1.0))]);
    assert_eq!(b.status(), Ok(()));
}

#[test]
fn singular_scale_is_an_invalid_matrix() {
    let mut b = backend(2, 2, PixelFormat::Argb32);
    b.scale(0.0, 1.0);
    assert_eq!(b.status(), Err(Status::InvalidMatrix));
    assert_eq!(b.gs.ctm, Affine::IDENTITY);
}

#[test]
fn antialias_none_thresholds_coverage() {
    let mut b = backend(2, 1, PixelFormat::Argb32);
    b.set_antialias(Antialias::None);
    b.rectangle(0.0, 0.0, 1.4, 1.0);
    b.fill(false);
    assert_eq!(argb(&b, 0, 0), [0, 0, 0, 255]);
    assert_eq!(argb(&b, 1, 0), [0, 0, 0, 0]);

    let mut b = backend(2, 1, PixelFormat::Argb32);
    b.rectangle(0.0, 0.0, 1.4, 1.0);
    b.fill(false);
    let partial = argb(&b, 1, 0)[3];
    assert!(partial > 0 && partial < 255, "{partial}");
}

#[test]
fn zero_width_stroke_draws_nothing() {
    let mut b = backend(4, 4, PixelFormat::Argb32);
    b.set_line_width(0.0);
    b.move_to(0.0, 2.0);
    b.line_to(4.0, 2.0);
    b.stroke(false);
    assert!(b.canvas.iter().all(|&c| c == 0));
    assert!(b.path.path.is_empty());
}

#[test]
fn horizontal_stroke_covers_its_width() {
    let mut b = backend(4, 4, PixelFormat::Argb32);
    b.move_to(0.0, 2.0);
    b.line_to(4.0, 2.0);
    b.stroke(false);
    assert_eq!(argb(&b, 0, 1), [0, 0, 0, 255]);
    assert_eq!(argb(&b, 3, 2), [0, 0, 0, 255]);
    assert_eq!(argb(&b, 0, 0), [0, 0, 0, 0]);
    assert_eq!(argb(&b, 0, 3), [0, 0, 0, 0]);
}

#[test]
fn close_path_reopens_at_the_subpath_start() {
    let mut b = backend(4, 4, PixelFormat::Argb32);
    b.move_to(1.0, 1.0);
    b.line_to(2.0, 1.0);
    b.close_path();
    b.line_to(3.0, 3.0);
    assert_eq!(
        b.path.path.elements(),
        &[
            PathEl::MoveTo(Point::new(1.0, 1.0)),
            PathEl::LineTo(Point::new(2.0, 1.0)),
            PathEl::ClosePath,
            PathEl::MoveTo(Point::new(1.0, 1.0)),
            PathEl::LineTo(Point::new(3.0, 3.0)),
        ]
    );
}

#[test]
fn new_sub_path_clears_the_current_point() {
    let mut b = backend(4, 4, PixelFormat::Argb32);
    b.move_to(1.0, 1.0);
    b.new_sub_path();
    b.rel_line_to(1.0, 0.0);
    assert_eq!(b.status(), Err(Status::NoCurrentPoint));
}

#[test]
fn arc_starts_with_a_line_from_the_current_point() {
    let mut b = backend(8, 8, PixelFormat::Argb32);
    b.move_to(0.0, 0.0);
    b.arc(4.0, 4.0, 2.0, 0.0, std::f64::consts::PI);
    let els = b.path.path.elements();
    assert_eq!(els[1], PathEl::LineTo(Point::new(6.0, 4.0)));
    let end = b.path.current.unwrap();
    assert!((end.x - 2.0).abs() < 1e-9 && (end.y - 4.0).abs() < 1e-9, "{end:?}");
}

#[test]
fn copy_and_append_path_round_trip_through_user_space() {
    let mut b = backend(8, 8, PixelFormat::Argb32);
    b.translate(2.0, 0.0);
    b.rectangle(0.0, 0.0, 1.0, 1.0);
    let copy = b.copy_path();
    assert_eq!(copy.elements()[0], PathEl::MoveTo(Point::new(0.0, 0.0)));
    assert_eq!(CpuBackend::path_segments(&copy), copy.elements().len());

    b.new_path();
    b.identity_matrix();
    b.append_path(&copy);
    assert_eq!(b.path.path.elements()[0], PathEl::MoveTo(Point::new(0.0, 0.0)));
    assert_eq!(b.status(), Ok(()));
}

#[test]
fn surface_source_is_sampled_through_the_ctm() {
    let image = ImageDescriptor {
        width: 1,
        height: 1,
        format: PixelFormat::Argb32,
        data: vec![0xff, 0x00, 0x00, 0xff],
    };
    let mut b = backend(2, 1, PixelFormat::Argb32);
    let pattern = b.create_surface_pattern(&image).unwrap();
    b.translate(1.0, 0.0);
    b.set_source(&pattern);
    b.identity_matrix();
    b.paint(None);
    assert_eq!(argb(&b, 0, 0), [0, 0, 0, 0]);
    assert_eq!(argb(&b, 1, 0), [0, 0, 255, 255]);
}

#[test]
fn empty_text_needs_no_font() {
    let mut b = backend(2, 2, PixelFormat::Argb32);
    assert_eq!(b.text_extents(""), TextExtents::default());
    b.show_text("");
    assert_eq!(b.status(), Ok(()));
}

#[test]
fn zero_sized_surface_accepts_drawing() {
    let mut b = backend(0, 0, PixelFormat::Argb32);
    b.rectangle(0.0, 0.0, 10.0, 10.0);
    b.fill(false);
    b.paint(None);
    assert_eq!(b.status(), Ok(()));
    assert!(b.finish().is_empty());
}

#[test]
fn buffer_must_match_the_stride() {
    let err = CpuBackend::create(2, 2, PixelFormat::Argb32, vec![0; 15], &opts());
    assert!(matches!(err, Err(Status::InvalidStride)));
}

#[test]
fn rgb565_fill_writes_two_bytes_per_pixel() {
    let mut b = backend(1, 1, PixelFormat::Rgb565);
    b.set_source_rgba(1.0, 0.0, 0.0, 1.0);
    b.paint(None);
    assert_eq!(&b.finish()[..2], &[0x00, 0xf8]);
}

#[test]
fn huge_arc_sweep_is_folded_to_a_few_turns() {
    let mut b = backend(4, 4, PixelFormat::Argb32);
    b.arc(2.0, 2.0, 1.0, 0.0, 1e9);
    assert_eq!(b.status(), Ok(()));
    let len = b.path.path.elements().len();
    assert!(len < 64, "{len}");
    b.fill(false);
    assert_eq!(b.status(), Ok(()));

    let mut b = backend(4, 4, PixelFormat::Argb32);
    b.arc_negative(2.0, 2.0, 1.0, 1e300, -1e300);
    assert_eq!(b.status(), Ok(()));
    assert!(b.path.path.elements().len() < 64);
}

#[test]
fn arc_sweep_that_overflows_is_invalid_path_data() {
    let mut b = backend(4, 4, PixelFormat::Argb32);
    b.arc(2.0, 2.0, 1.0, -f64::MAX, f64::MAX);
    assert_eq!(b.status(), Err(Status::InvalidPathData));
}

#[test]
fn huge_arc_radius_keeps_the_curve_count_bounded() {
    let mut b = backend(4, 4, PixelFormat::Argb32);
    b.arc(0.0, 0.0, 1e200, 0.0, std::f64::consts::TAU);
    let len = b.path.path.elements().len();
    assert!(len < 4096, "{len}");
}

#[test]
fn folded_sweep_keeps_winding_parity() {
    let tau = std::f64::consts::TAU;
    let even = arc_sweep(0.0, 10.0 * tau + 1.0, false).unwrap();
    assert!((even - (2.0 * tau + 1.0)).abs() < 1e-9, "{even}");
    let odd = arc_sweep(0.0, 11.0 * tau + 1.0, false).unwrap();
    assert!((odd - (tau + 1.0)).abs() < 1e-9, "{odd}");
    let back = arc_sweep(0.0, 1.0, true).unwrap();
    assert!((back - (1.0 - tau)).abs() < 1e-12, "{back}");
    assert_eq!(arc_sweep(1.0, 2.0, false), Some(1.0));
}
