pub mod engine_config;
pub mod errors;
pub mod mandelbrot_engine;
