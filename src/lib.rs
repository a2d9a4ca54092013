pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod logging;
pub mod pipeline;

// Layered boundaries: use case and ports, with adapters in infra
pub mod app;
pub mod infra;
