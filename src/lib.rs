// Library interface for testing

pub mod cli;
pub mod error;
pub mod executor;
pub mod project;
pub mod task;
pub mod utils;
