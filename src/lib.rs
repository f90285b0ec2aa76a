//! RealNest marketplace client: session store, route guards, page view models
//! and the HTTP client they share.

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod pages;
pub mod render;
pub mod routes;
pub mod session;

pub use config::ClientConfig;
pub use error::{ApiError, Result};
