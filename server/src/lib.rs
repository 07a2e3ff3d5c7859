pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod state;
pub mod stats;
pub mod telemetry;
pub mod window;
