pub mod booking;
pub mod campus;
pub mod health;
pub mod room;
pub mod slot;
pub mod user;
