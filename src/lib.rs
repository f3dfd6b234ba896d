pub mod cli;
pub mod config;
pub mod fetch;
pub mod jobs;
pub mod load;
pub mod logging;
pub mod process;
pub mod tables;
