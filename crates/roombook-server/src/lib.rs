//! Roombook HTTP API: configuration, shared state, routing, the bearer
//! token extractor, request/response models and error mapping.

pub mod config;
pub mod error;
pub mod extractor;
pub mod handler;
pub mod model;
pub mod route;
pub mod state;

pub use config::AppConfig;
pub use route::build_router;
pub use state::AppState;
