pub mod config;
pub mod costs;
pub mod engine;
