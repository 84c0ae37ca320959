///
/// An 8-bit RGBA colour (not premultiplied)
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

///
/// Converts a f32 value between 0 and 1 to a byte
///
#[inline]
fn component_to_byte(component: f32) -> u8 {
    if component < 0.0 {
        0
    } else if component > 1.0 {
        255
    } else {
        (component * 255.0).round() as u8
    }
}

impl Color {
    pub const TRANSPARENT:  Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK:        Color = Color::rgb(0, 0, 0);
    pub const WHITE:        Color = Color::rgb(255, 255, 255);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    ///
    /// An opaque colour
    ///
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 255 }
    }

    ///
    /// Creates a colour from floating point components in the range 0..1
    ///
    pub fn from_components(r: f32, g: f32, b: f32, a: f32) -> Color {
        Color {
            r: component_to_byte(r),
            g: component_to_byte(g),
            b: component_to_byte(b),
            a: component_to_byte(a),
        }
    }

    ///
    /// The components of this colour, as floating point values in the range 0..1
    ///
    pub fn to_components(&self) -> (f32, f32, f32, f32) {
        (self.r as f32 / 255.0, self.g as f32 / 255.0, self.b as f32 / 255.0, self.a as f32 / 255.0)
    }

    #[inline]
    pub fn with_alpha(self, a: u8) -> Color {
        Color { a, ..self }
    }

    ///
    /// Blends between this colour and another (`ratio` of 0 is this colour, 1 is the other colour)
    ///
    pub fn lerp(&self, other: &Color, ratio: f32) -> Color {
        let channel = |from: u8, to: u8| {
            let from    = from as f32;
            let to      = to as f32;

            (from + (to - from) * ratio).round().max(0.0).min(255.0) as u8
        };

        Color {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: channel(self.a, other.a),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lerp_end_points_are_exact() {
        let from    = Color::rgba(10, 20, 30, 40);
        let to      = Color::rgba(250, 0, 128, 255);

        assert!(from.lerp(&to, 0.0) == from);
        assert!(from.lerp(&to, 1.0) == to);
        assert!(from.lerp(&to, 0.5) == Color::rgba(130, 10, 79, 148), "{:?}", from.lerp(&to, 0.5));
    }

    #[test]
    fn components_round_trip() {
        let color = Color::from_components(1.0, 0.5, 0.0, 2.0);

        assert!(color == Color::rgba(255, 128, 0, 255), "{:?}", color);
    }
}
