use crate::color::*;

use flo_vector::*;
use itertools::*;

///
/// Denominators smaller than this are treated as zero when evaluating gradients
///
const GRADIENT_EPSILON: f32 = 1e-6;

///
/// A colour at a position along a gradient
///
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient (0 is the start, 1 is the end)
    pub position: f32,

    pub color: Color,
}

///
/// The geometry that maps pixel positions to positions along a gradient
///
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub enum GradientShape {
    /// Position 0 is at `start` and 1 is at `end`, measured along the line between them
    Linear { start: Point2D, end: Point2D },

    /// Position 0 is at `focus` and 1 is on the circle at `center`, with circles interpolating between them
    Radial { focus: Point2D, center: Point2D, radius: f32 },
}

///
/// Operations used to describe the stops of a gradient
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GradientOp {
    /// Removes any existing stops and starts the gradient with the given colour
    New(Color),

    /// Adds a new gradient stop of the specified colour
    AddStop(f32, Color),
}

///
/// A gradient fill
///
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Gradient {
    pub shape: GradientShape,

    /// Stops, in order of position
    stops: Vec<GradientStop>,
}

impl Gradient {
    ///
    /// Creates a gradient with no stops
    ///
    pub fn new(shape: GradientShape) -> Gradient {
        Gradient {
            shape:  shape,
            stops:  vec![],
        }
    }

    pub fn linear(start: Point2D, end: Point2D) -> Gradient {
        Gradient::new(GradientShape::Linear { start, end })
    }

    pub fn radial(focus: Point2D, center: Point2D, radius: f32) -> Gradient {
        Gradient::new(GradientShape::Radial { focus, center, radius })
    }

    ///
    /// Creates a gradient from a list of gradient operations
    ///
    pub fn from_ops(shape: GradientShape, ops: impl IntoIterator<Item=GradientOp>) -> Gradient {
        let mut gradient = Gradient::new(shape);

        for op in ops {
            match op {
                GradientOp::New(color)          => { gradient.stops.clear(); gradient.add_stop(0.0, color); }
                GradientOp::AddStop(pos, color) => { gradient.add_stop(pos, color); }
            }
        }

        gradient
    }

    ///
    /// Adds a stop to this gradient
    ///
    /// Stops at the same position are kept in the order they were added.
    ///
    pub fn add_stop(&mut self, position: f32, color: Color) {
        let index = self.stops.iter()
            .position(|stop| stop.position > position)
            .unwrap_or(self.stops.len());

        self.stops.insert(index, GradientStop { position, color });
    }

    pub fn with_stop(mut self, position: f32, color: Color) -> Gradient {
        self.add_stop(position, color);
        self
    }

    #[inline]
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    ///
    /// The position along the gradient of a point
    ///
    pub fn position_at(&self, x: f32, y: f32) -> f32 {
        let point = Point2D::new(x, y);

        match self.shape {
            GradientShape::Linear { start, end } => {
                let axis = end - start;

                (point - start).dot(axis) / (axis.dot(axis) + GRADIENT_EPSILON)
            }

            GradientShape::Radial { focus, center, radius } => {
                radial_position(point, focus, center, radius)
            }
        }
    }

    ///
    /// The colour of the gradient at a point
    ///
    #[inline]
    pub fn color_at(&self, x: f32, y: f32) -> Color {
        interpolate_color(&self.stops, self.position_at(x, y))
    }
}

///
/// Finds the circle that passes through a point in the family of circles running from the focus (radius 0) to
/// the outer circle (position 1)
///
fn radial_position(point: Point2D, focus: Point2D, center: Point2D, radius: f32) -> f32 {
    let e = center - focus;
    let d = point - focus;

    // |d - t*e|^2 = (t*radius)^2
    let a = e.dot(e) - radius * radius;
    let b = -2.0 * d.dot(e);
    let c = d.dot(d);

    if a.abs() < GRADIENT_EPSILON {
        // The focus is on the outer circle, so there's only one solution
        let de = d.dot(e);

        if de.abs() < GRADIENT_EPSILON {
            0.0
        } else {
            c / (2.0 * de)
        }
    } else {
        let discriminant = b * b - 4.0 * a * c;

        if discriminant < 0.0 {
            0.0
        } else {
            let root    = discriminant.sqrt();
            let t1      = (-b + root) / (2.0 * a);
            let t2      = (-b - root) / (2.0 * a);

            t1.max(t2)
        }
    }
}

///
/// The colour at a position in a list of gradient stops
///
/// Positions before the first stop or after the last stop use the colour of that stop, and the colour at the
/// position of a stop is exactly the colour of that stop. A list with no stops is transparent.
///
pub fn interpolate_color(stops: &[GradientStop], position: f32) -> Color {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(first), Some(last))   => (first, last),
        _                           => { return Color::TRANSPARENT; }
    };

    if !(position > first.position) {
        return first.color;
    }
    if position >= last.position {
        return last.color;
    }

    for (from, to) in stops.iter().tuple_windows() {
        if position == from.position {
            return from.color;
        }

        if position < to.position {
            let length = to.position - from.position;

            return if length < GRADIENT_EPSILON {
                to.color
            } else {
                from.color.lerp(&to.color, (position - from.position) / length)
            };
        }
    }

    last.color
}
