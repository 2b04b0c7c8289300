pub mod config;
pub mod encoder;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod presenter;
pub mod server;
pub mod types;
pub mod weather;
