pub mod api;
pub mod app;
pub mod bulletin;
pub mod config;
pub mod error;
pub mod extractor;
pub mod services;
