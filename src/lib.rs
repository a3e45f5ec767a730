pub mod config;
pub mod converter;
pub mod errors;
pub mod graph;
pub mod plugins;
pub mod project;
pub mod resolution;
pub mod types;
