use crate::core::actions::compute_pass::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::data::point::Point;
use crate::core::data::viewport::Viewport;
use crate::core::util::pixel_to_complex_coords::pixel_to_complex_coords;

/// `|z|² > 4` means `|z| > 2`: the orbit is guaranteed to diverge.
pub const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// Escape time of `c` under `z -> z² + c` starting from `z₀ = c`.
///
/// Returns the first `k` with `|z_k|² > 4`, or `max_iterations` when the orbit
/// stays bounded that long.
#[must_use]
pub fn escape_time(c: Complex, max_iterations: u32) -> u32 {
    let mut z = c;

    for iteration in 0..max_iterations {
        if z.magnitude_squared() > ESCAPE_RADIUS_SQUARED {
            return iteration;
        }
        z = z * z + c;
    }

    max_iterations
}

/// Snapshot of a viewport bound to a grid resolution, handed to every worker
/// of one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MandelbrotAlgorithm {
    region: ComplexRect,
    max_iterations: u32,
    resolution: usize,
}

impl MandelbrotAlgorithm {
    #[must_use]
    pub fn new(viewport: &Viewport, resolution: usize) -> Self {
        Self {
            region: viewport.region(),
            max_iterations: viewport.max_iterations(),
            resolution,
        }
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

impl FractalAlgorithm for MandelbrotAlgorithm {
    #[inline]
    fn compute(&self, pixel: Point) -> u32 {
        let c = pixel_to_complex_coords(pixel, self.region, self.resolution);

        escape_time(c, self.max_iterations)
    }
}
