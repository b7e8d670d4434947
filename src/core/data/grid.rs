use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;
use std::num::NonZeroUsize;
use std::slice::{ChunksExact, ChunksExactMut};

fn resolution_to_cell_count(resolution: NonZeroUsize) -> usize {
    resolution.get() * resolution.get()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    SizeMismatch { expected_cells: usize, actual_cells: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch {
                expected_cells,
                actual_cells,
            } => {
                write!(
                    f,
                    "grid expects {} cells but {} were supplied",
                    expected_cells, actual_cells
                )
            }
        }
    }
}

impl Error for GridError {}

/// Square matrix of escape iteration counts, one per pixel.
///
/// Cells are stored row-major so that each row is a contiguous slice; this is
/// what lets the worker pool hand out disjoint `&mut` rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    resolution: NonZeroUsize,
    cells: Vec<u32>,
}

impl Grid {
    #[must_use]
    pub fn new(resolution: NonZeroUsize) -> Self {
        Self {
            resolution,
            cells: vec![0; resolution_to_cell_count(resolution)],
        }
    }

    pub fn from_cells(resolution: NonZeroUsize, cells: Vec<u32>) -> Result<Self, GridError> {
        let expected_cells = resolution_to_cell_count(resolution);

        if cells.len() != expected_cells {
            return Err(GridError::SizeMismatch {
                expected_cells,
                actual_cells: cells.len(),
            });
        }

        Ok(Self { resolution, cells })
    }

    #[must_use]
    pub fn resolution(&self) -> usize {
        self.resolution.get()
    }

    /// Iteration count for pixel `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, pixel: Point) -> Option<u32> {
        let (x, y) = (pixel.x as usize, pixel.y as usize);

        if x >= self.resolution() || y >= self.resolution() {
            return None;
        }

        Some(self.cells[y * self.resolution() + x])
    }

    #[must_use]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn rows(&self) -> ChunksExact<'_, u32> {
        self.cells.chunks_exact(self.resolution.get())
    }

    pub fn rows_mut(&mut self) -> ChunksExactMut<'_, u32> {
        self.cells.chunks_exact_mut(self.resolution.get())
    }

    #[must_use]
    pub fn stats(&self, max_iterations: u32) -> GridStats {
        let interior = self
            .cells
            .iter()
            .filter(|&&count| count >= max_iterations)
            .count();

        GridStats {
            interior,
            escaped: self.cells.len() - interior,
            min: self.cells.iter().copied().min().unwrap_or(0),
            max: self.cells.iter().copied().max().unwrap_or(0),
        }
    }
}

/// Summary of a computed grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GridStats {
    /// Cells that reached the iteration cap.
    pub interior: usize,
    pub escaped: usize,
    pub min: u32,
    pub max: u32,
}
