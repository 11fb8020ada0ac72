pub mod aircraft;
pub mod config;
pub mod error;
pub mod report;
pub mod runway;
pub mod sampler;
pub mod scheduler;
pub mod simulation;
pub mod stats;
pub mod time;
