//! User-specific store logic, including the server-side checks on new users.

pub mod entity;

pub use entity::*;
