pub mod completion_latch;
pub mod ports;
pub mod worker_pool;
