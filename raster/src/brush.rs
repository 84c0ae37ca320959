use crate::color::*;
use crate::gradient::*;

///
/// How the pixels covered by a shape are coloured
///
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum Brush {
    /// Every pixel is the same colour
    Solid(Color),

    /// The colour is evaluated at the centre of each pixel
    Gradient(Gradient),
}

impl Default for Brush {
    fn default() -> Self {
        Brush::Solid(Color::BLACK)
    }
}

impl From<Color> for Brush {
    fn from(color: Color) -> Brush {
        Brush::Solid(color)
    }
}

impl From<Gradient> for Brush {
    fn from(gradient: Gradient) -> Brush {
        Brush::Gradient(gradient)
    }
}

impl Brush {
    ///
    /// The colour of the pixel at a particular position
    ///
    #[inline]
    pub fn color_at(&self, x: i32, y: i32) -> Color {
        match self {
            Brush::Solid(color)         => *color,
            Brush::Gradient(gradient)   => gradient.color_at(x as f32 + 0.5, y as f32 + 0.5),
        }
    }

    ///
    /// True if this brush never draws anything
    ///
    pub fn is_transparent(&self) -> bool {
        match self {
            Brush::Solid(color)         => color.a == 0,
            Brush::Gradient(gradient)   => gradient.stops().iter().all(|stop| stop.color.a == 0),
        }
    }
}
