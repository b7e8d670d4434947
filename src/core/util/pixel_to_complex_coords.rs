use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PixelToComplexCoordsError {
    PointOutsideGrid { point: Point, resolution: usize },
}

impl fmt::Display for PixelToComplexCoordsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointOutsideGrid { point, resolution } => {
                write!(
                    f,
                    "point (x: {}, y: {}) is outside the {}x{} grid",
                    point.x, point.y, resolution, resolution
                )
            }
        }
    }
}

impl Error for PixelToComplexCoordsError {}

/// Maps pixel `(x, y)` of a `resolution`-sided grid onto `region`.
///
/// Pixel row 0 is the top edge of the region, so the imaginary part
/// decreases as `y` grows. Callers keep `x` and `y` below `resolution`.
#[inline]
#[must_use]
pub fn pixel_to_complex_coords(pixel: Point, region: ComplexRect, resolution: usize) -> Complex {
    debug_assert!((pixel.x as usize) < resolution && (pixel.y as usize) < resolution);

    plane_coords(pixel, region, resolution)
}

/// Maps a selection corner onto `region`. Corners may sit on the far edge of
/// the grid (`x == resolution` or `y == resolution`) so that a selection can
/// cover the last row and column.
pub fn pixel_corner_to_complex_coords(
    corner: Point,
    region: ComplexRect,
    resolution: usize,
) -> Result<Complex, PixelToComplexCoordsError> {
    if corner.x as usize > resolution || corner.y as usize > resolution {
        return Err(PixelToComplexCoordsError::PointOutsideGrid {
            point: corner,
            resolution,
        });
    }

    Ok(plane_coords(corner, region, resolution))
}

fn plane_coords(pixel: Point, region: ComplexRect, resolution: usize) -> Complex {
    let step_real = region.width() / resolution as f64;
    let step_imag = region.height() / resolution as f64;

    Complex {
        real: region.min().real + step_real * f64::from(pixel.x),
        imag: region.max().imag - step_imag * f64::from(pixel.y),
    }
}
