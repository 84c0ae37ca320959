use crate::brush::*;
use crate::renderer::*;
use crate::rasterizer::*;

use flo_vector::*;
use log::*;

///
/// Options that control how paths are rendered
///
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct RenderOptions {
    /// The fill rule used for the interior of paths (strokes always use the nonzero rule)
    pub fill_rule: FillRule,

    /// Gamma correction applied to coverage values
    pub gamma: f64,

    /// Tolerances used when flattening curves, in pixels
    pub refine: RefineOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            fill_rule:  FillRule::NonZero,
            gamma:      1.0,
            refine:     RefineOptions::default(),
        }
    }
}

impl RenderOptions {
    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> RenderOptions {
        self.fill_rule = fill_rule;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> RenderOptions {
        self.gamma = gamma;
        self
    }

    pub fn with_refine_options(mut self, refine: RefineOptions) -> RenderOptions {
        self.refine = refine;
        self
    }
}

///
/// Renders paths by combining a path cache (to generate stroke outlines) with a rasterizer
///
pub struct VectorRenderer {
    cache:      PathCache,
    rasterizer: Rasterizer,
    options:    RenderOptions,
}

impl Default for VectorRenderer {
    fn default() -> Self {
        VectorRenderer::new()
    }
}

impl VectorRenderer {
    pub fn new() -> VectorRenderer {
        VectorRenderer::with_options(RenderOptions::default())
    }

    pub fn with_options(options: RenderOptions) -> VectorRenderer {
        let mut rasterizer = Rasterizer::new();
        rasterizer.set_gamma(options.gamma);

        VectorRenderer {
            cache:      PathCache::new(),
            rasterizer: rasterizer,
            options:    options,
        }
    }

    #[inline]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.rasterizer.set_gamma(options.gamma);
        self.options = options;
    }

    #[inline]
    pub fn cache(&self) -> &PathCache {
        &self.cache
    }

    #[inline]
    pub fn cache_mut(&mut self) -> &mut PathCache {
        &mut self.cache
    }

    ///
    /// Draws a path with a style, using `fill` for its interior and `stroke` for its outline
    ///
    /// The path is filled if the style requests it, and stroked if the style has a stroke width. Strokes are drawn
    /// on top of the fill.
    ///
    pub fn draw_path(&mut self, target: &mut impl SpanRenderer, path: &Path, transform: &Transform2D, style: &StrokeStyle, fill: &Brush, stroke: &Brush) {
        let mesh = self.cache.find_mesh(path, style);

        if style.fill && !fill.is_transparent() {
            self.rasterizer.reset();
            self.rasterizer.set_fill_rule(self.options.fill_rule);
            self.rasterizer.add_path(mesh.source_path(), transform, &self.options.refine);
            self.rasterizer.render(target, fill);
        }

        if let Some(stroke_path) = mesh.stroke_path() {
            if !stroke.is_transparent() {
                // Stroke pieces overlap, so they're always combined with the nonzero rule
                self.rasterizer.reset();
                self.rasterizer.set_fill_rule(FillRule::NonZero);
                self.rasterizer.add_path(stroke_path, transform, &self.options.refine);
                self.rasterizer.render(target, stroke);
            }
        }

        trace!("Drew path {:x} ({} cells in last outline)", mesh.hash(), self.rasterizer.outline().num_cells());
    }

    ///
    /// Fills a path with a brush, ignoring the style's stroke settings
    ///
    #[inline]
    pub fn fill_path(&mut self, target: &mut impl SpanRenderer, path: &Path, transform: &Transform2D, fill: &Brush) {
        self.draw_path(target, path, transform, &StrokeStyle::fill(), fill, &Brush::default());
    }
}
