pub mod complex;
pub mod complex_rect;
pub mod grid;
pub mod point;
pub mod viewport;
