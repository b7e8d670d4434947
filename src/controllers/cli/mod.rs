//! Headless driver: builds an engine from command-line settings and replays a
//! script of navigation steps against it, reporting after every pass.

pub mod args;
pub mod cli_controller;
pub mod navigation_step;
pub mod step_report;
