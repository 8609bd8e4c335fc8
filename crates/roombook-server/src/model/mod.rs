pub mod booking;
pub mod campus;
pub mod pagination;
pub mod room;
pub mod slot;
pub mod user;
