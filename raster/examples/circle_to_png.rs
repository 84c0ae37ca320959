use flo_vector::*;
use flo_raster::*;

use std::fs::{File};
use std::error::{Error};

///
/// Renders a filled and stroked circle with a radial gradient to circle.png
///
pub fn main() -> Result<(), Box<dyn Error>> {
    let width           = 640;
    let height          = 480;
    let mut pixels      = vec![0u8; width * height * 4];
    let mut frame       = FrameBuffer::from_bytes(width, height, PixelFormat::Rgba8, &mut pixels)?;
    frame.clear(Color::WHITE);

    // Circle with a dashed outline
    let circle          = Path::circle(320.0, 240.0, 180.0);
    let style           = StrokeStyle::fill()
        .with_width(12.0)
        .with_join(JoinKind::Round)
        .with_cap(CapKind::Round)
        .with_dash_pattern(vec![40.0, 20.0]);

    // Gradients are evaluated in device coordinates
    let gradient        = Gradient::radial(Point2D::new(260.0, 180.0), Point2D::new(320.0, 240.0), 180.0)
        .with_stop(0.0, Color::rgb(255, 255, 255))
        .with_stop(0.6, Color::rgb(60, 120, 255))
        .with_stop(1.0, Color::rgb(0, 20, 80));

    let mut renderer    = VectorRenderer::with_options(RenderOptions::default().with_gamma(1.2));
    renderer.draw_path(&mut frame, &circle, &Transform2D::identity(), &style, &Brush::Gradient(gradient), &Brush::Solid(Color::rgba(0, 0, 0, 200)));

    // A star drawn with the even-odd rule has a hole in the middle
    let mut star = Path::new();
    star.move_to(320.0, 140.0);
    star.line_to(379.0, 321.0);
    star.line_to(225.0, 209.0);
    star.line_to(415.0, 209.0);
    star.line_to(261.0, 321.0);
    star.close();

    renderer.set_options(renderer.options().with_fill_rule(FillRule::EvenOdd));
    renderer.fill_path(&mut frame, &star, &Transform2D::identity(), &Brush::Solid(Color::rgba(255, 200, 0, 220)));

    write_png(&frame, File::create("circle.png")?)?;

    Ok(())
}
