use crate::core::data::point::Point;

/// Per-pixel evaluator the worker pool drives. Implementations must be pure:
/// the same pixel always yields the same count, from any thread.
pub trait FractalAlgorithm {
    fn compute(&self, pixel: Point) -> u32;
}
