pub mod pixel_to_complex_coords;
pub mod strided_rows;
