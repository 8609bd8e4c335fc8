//! Domain models for Roombook.
//!
//! These are the core types shared across all crates.

pub mod booking;
pub mod campus;
pub mod room;
pub mod slot;
pub mod user;
