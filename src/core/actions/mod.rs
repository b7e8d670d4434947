pub mod cancellation;
pub mod compute_pass;
