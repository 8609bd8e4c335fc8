//! Roombook Core: domain models, repository traits, booking rules and
//! the booking service.
//!
//! Nothing in this crate talks to a database or the network; storage is
//! reached only through the traits in [`repository`].

pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use error::{RoombookError, RoombookResult};
