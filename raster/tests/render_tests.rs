use flo_vector::*;
use flo_raster::*;

const RED:      Color = Color::rgb(255, 0, 0);
const GREEN:    Color = Color::rgb(0, 255, 0);
const BLUE:     Color = Color::rgb(0, 0, 255);

#[test]
fn fill_rectangle_into_frame() {
    let mut pixels      = vec![0u8; 120 * 120 * 4];
    let mut frame       = FrameBuffer::from_bytes(120, 120, PixelFormat::Rgba8, &mut pixels).unwrap();
    let mut renderer    = VectorRenderer::new();

    renderer.fill_path(&mut frame, &Path::rect(0.0, 0.0, 100.0, 100.0), &Transform2D::identity(), &Brush::Solid(RED));

    assert!(frame.pixel(0, 0) == RED);
    assert!(frame.pixel(50, 50) == RED);
    assert!(frame.pixel(99, 99) == RED);
    assert!(frame.pixel(100, 50) == Color::TRANSPARENT);
    assert!(frame.pixel(50, 100) == Color::TRANSPARENT);
}

#[test]
fn gradient_is_exact_at_stops() {
    let gradient = Gradient::linear(Point2D::new(0.5, 0.0), Point2D::new(100.5, 0.0))
        .with_stop(0.0, RED)
        .with_stop(0.5, GREEN)
        .with_stop(1.0, BLUE);

    let mut pixels      = vec![0u8; 110 * 10 * 3];
    let mut frame       = FrameBuffer::from_bytes(110, 10, PixelFormat::Rgb8, &mut pixels).unwrap();
    let mut renderer    = VectorRenderer::new();

    renderer.fill_path(&mut frame, &Path::rect(0.0, 0.0, 110.0, 10.0), &Transform2D::identity(), &Brush::Gradient(gradient));

    // Pixels are evaluated at their centres
    assert!(frame.pixel(0, 5) == RED, "{:?}", frame.pixel(0, 5));
    assert!(frame.pixel(50, 5) == GREEN, "{:?}", frame.pixel(50, 5));
    assert!(frame.pixel(100, 5) == BLUE, "{:?}", frame.pixel(100, 5));
    assert!(frame.pixel(109, 5) == BLUE, "{:?}", frame.pixel(109, 5));

    let between = frame.pixel(25, 5);
    assert!(between.r > 100 && between.r < 155, "{:?}", between);
    assert!(between.g > 100 && between.g < 155, "{:?}", between);
}

#[test]
fn alpha_channel_blends_toward_opaque() {
    let translucent = Color::rgba(255, 0, 0, 128);

    let mut rgba        = vec![0u8; 4 * 4 * 4];
    let mut rgba_frame  = FrameBuffer::from_bytes(4, 4, PixelFormat::Rgba8, &mut rgba).unwrap();
    rgba_frame.blend_span(0, 0, &[255, 255, 255, 255], &Brush::Solid(translucent));

    assert!(rgba_frame.pixel(1, 0) == Color::rgba(128, 0, 0, 128), "{:?}", rgba_frame.pixel(1, 0));

    let mut rgb         = vec![0u8; 4 * 4 * 3];
    let mut rgb_frame   = FrameBuffer::from_bytes(4, 4, PixelFormat::Rgb8, &mut rgb).unwrap();
    rgb_frame.blend_span(0, 0, &[255, 255, 255, 255], &Brush::Solid(translucent));

    assert!(rgb_frame.pixel(1, 0) == Color::rgb(128, 0, 0), "{:?}", rgb_frame.pixel(1, 0));
}

#[test]
fn padded_rows_are_left_alone() {
    let mut pixels      = vec![7u8; 9 * 16 + 12];
    let mut frame       = FrameBuffer::new(4, 10, 16, PixelFormat::Rgb8, &mut pixels).unwrap();
    let mut renderer    = VectorRenderer::new();

    renderer.fill_path(&mut frame, &Path::rect(-10.0, -10.0, 50.0, 50.0), &Transform2D::identity(), &Brush::Solid(BLUE));

    assert!(frame.pixel(3, 9) == BLUE);
    assert!(frame.data()[12..16] == [7, 7, 7, 7]);
}

#[test]
fn buffer_too_small_is_an_error() {
    let mut pixels = vec![0u8; 10];

    match FrameBuffer::from_bytes(2, 2, PixelFormat::Rgb8, &mut pixels) {
        Err(RenderError::BufferTooSmall { required: 12, actual: 10 }) => { }
        Err(other)  => assert!(false, "Unexpected error {}", other),
        Ok(_)       => assert!(false, "Buffer should be too small"),
    }
}

#[test]
fn stroke_line_into_frame() {
    let mut line = Path::new();
    line.move_to(10.0, 50.0);
    line.line_to(90.0, 50.0);

    let mut pixels      = vec![0u8; 100 * 100 * 4];
    let mut frame       = FrameBuffer::from_bytes(100, 100, PixelFormat::Rgba8, &mut pixels).unwrap();
    let mut renderer    = VectorRenderer::new();

    renderer.draw_path(&mut frame, &line, &Transform2D::identity(), &StrokeStyle::stroke(10.0), &Brush::Solid(RED), &Brush::Solid(Color::BLACK));

    // The stroke covers (10, 45)-(90, 55) and the path isn't filled
    assert!(frame.pixel(50, 50) == Color::BLACK);
    assert!(frame.pixel(50, 45) == Color::BLACK);
    assert!(frame.pixel(50, 54) == Color::BLACK);
    assert!(frame.pixel(10, 50) == Color::BLACK);
    assert!(frame.pixel(89, 50) == Color::BLACK);

    assert!(frame.pixel(50, 44) == Color::TRANSPARENT);
    assert!(frame.pixel(50, 55) == Color::TRANSPARENT);
    assert!(frame.pixel(9, 50) == Color::TRANSPARENT);
    assert!(frame.pixel(90, 50) == Color::TRANSPARENT);
}

#[test]
fn flat_caps_extend_the_stroke() {
    let mut line = Path::new();
    line.move_to(10.0, 50.0);
    line.line_to(90.0, 50.0);

    let mut pixels      = vec![0u8; 100 * 100 * 4];
    let mut frame       = FrameBuffer::from_bytes(100, 100, PixelFormat::Rgba8, &mut pixels).unwrap();
    let mut renderer    = VectorRenderer::new();

    renderer.draw_path(&mut frame, &line, &Transform2D::identity(), &StrokeStyle::stroke(10.0).with_cap(CapKind::Flat), &Brush::Solid(RED), &Brush::Solid(Color::BLACK));

    assert!(frame.pixel(5, 50) == Color::BLACK);
    assert!(frame.pixel(94, 50) == Color::BLACK);
    assert!(frame.pixel(4, 50) == Color::TRANSPARENT);
    assert!(frame.pixel(95, 50) == Color::TRANSPARENT);
}

#[test]
fn dashed_stroke_leaves_gaps() {
    let mut line = Path::new();
    line.move_to(0.0, 50.0);
    line.line_to(100.0, 50.0);

    let mut pixels      = vec![0u8; 100 * 100 * 4];
    let mut frame       = FrameBuffer::from_bytes(100, 100, PixelFormat::Rgba8, &mut pixels).unwrap();
    let mut renderer    = VectorRenderer::new();
    let style           = StrokeStyle::stroke(4.0).with_dash_pattern(vec![10.0, 10.0]);

    renderer.draw_path(&mut frame, &line, &Transform2D::identity(), &style, &Brush::Solid(RED), &Brush::Solid(Color::BLACK));

    assert!(frame.pixel(5, 50) == Color::BLACK);
    assert!(frame.pixel(15, 50) == Color::TRANSPARENT);
    assert!(frame.pixel(25, 50) == Color::BLACK);
    assert!(frame.pixel(95, 50) == Color::TRANSPARENT);
}

#[test]
fn repeated_vertex_keeps_the_miter() {
    let style = StrokeStyle::stroke(10.0).with_join(JoinKind::Sharp);

    for repeat in vec![false, true] {
        let mut corner = Path::new();
        corner.move_to(20.0, 20.0);
        corner.line_to(80.0, 20.0);
        if repeat {
            corner.line_to(80.0, 20.0);
        }
        corner.line_to(80.0, 80.0);

        let mut pixels      = vec![0u8; 100 * 100 * 4];
        let mut frame       = FrameBuffer::from_bytes(100, 100, PixelFormat::Rgba8, &mut pixels).unwrap();
        let mut renderer    = VectorRenderer::new();

        renderer.draw_path(&mut frame, &corner, &Transform2D::identity(), &style, &Brush::Solid(RED), &Brush::Solid(Color::BLACK));

        // The outer corner of the miter is only covered by the join
        assert!(frame.pixel(83, 16).a == 255, "{:?} (repeated vertex: {})", frame.pixel(83, 16), repeat);
        assert!(frame.pixel(86, 16) == Color::TRANSPARENT, "{:?} (repeated vertex: {})", frame.pixel(86, 16), repeat);
    }
}

#[test]
fn stroke_is_drawn_over_fill() {
    let mut pixels      = vec![0u8; 100 * 100 * 4];
    let mut frame       = FrameBuffer::from_bytes(100, 100, PixelFormat::Rgba8, &mut pixels).unwrap();
    let mut renderer    = VectorRenderer::new();
    let style           = StrokeStyle::fill().with_width(4.0).with_join(JoinKind::Sharp);

    renderer.draw_path(&mut frame, &Path::rect(20.0, 20.0, 60.0, 60.0), &Transform2D::identity(), &style, &Brush::Solid(RED), &Brush::Solid(BLUE));

    assert!(frame.pixel(50, 50) == RED);
    assert!(frame.pixel(50, 20) == BLUE);
    assert!(frame.pixel(50, 18) == BLUE);
    assert!(frame.pixel(50, 21) == BLUE);
    assert!(frame.pixel(50, 22) == RED);
    assert!(frame.pixel(50, 17) == Color::TRANSPARENT);
}

#[test]
fn identical_paths_share_meshes() {
    let mut pixels      = vec![0u8; 100 * 100 * 4];
    let mut frame       = FrameBuffer::from_bytes(100, 100, PixelFormat::Rgba8, &mut pixels).unwrap();
    let mut renderer    = VectorRenderer::new();
    let style           = StrokeStyle::stroke(2.0);

    renderer.draw_path(&mut frame, &Path::circle(50.0, 50.0, 20.0), &Transform2D::identity(), &style, &Brush::default(), &Brush::default());
    renderer.draw_path(&mut frame, &Path::circle(50.0, 50.0, 20.0), &Transform2D::translate(1.0, 1.0), &style, &Brush::default(), &Brush::default());

    assert!(renderer.cache().path_count() == 1);
    assert!(renderer.cache().mesh_count() == 1);
}

#[test]
fn even_odd_option_applies_to_fills() {
    let mut path = Path::new();
    path.add_rect(0.0, 0.0, 20.0, 20.0);
    path.add_rect(10.0, 10.0, 20.0, 20.0);

    let mut pixels      = vec![0u8; 40 * 40 * 4];
    let mut frame       = FrameBuffer::from_bytes(40, 40, PixelFormat::Rgba8, &mut pixels).unwrap();
    let mut renderer    = VectorRenderer::with_options(RenderOptions::default().with_fill_rule(FillRule::EvenOdd));

    renderer.fill_path(&mut frame, &path, &Transform2D::identity(), &Brush::Solid(GREEN));

    assert!(frame.pixel(5, 5) == GREEN);
    assert!(frame.pixel(15, 15) == Color::TRANSPARENT);
    assert!(frame.pixel(25, 25) == GREEN);
}

#[cfg(feature="render_png")]
#[test]
fn frame_can_be_written_as_png() {
    let mut pixels      = vec![0u8; 32 * 32 * 4];
    let mut frame       = FrameBuffer::from_bytes(32, 32, PixelFormat::Rgba8, &mut pixels).unwrap();
    let mut renderer    = VectorRenderer::new();

    renderer.fill_path(&mut frame, &Path::circle(16.0, 16.0, 10.0), &Transform2D::identity(), &Brush::Solid(BLUE));

    let mut png = vec![];
    write_png(&frame, &mut png).unwrap();

    assert!(png.starts_with(&[137, 80, 78, 71, 13, 10, 26, 10]));
}
