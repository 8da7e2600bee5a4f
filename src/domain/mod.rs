//! Marketplace rules that do not touch the database.

pub mod appointments;
pub mod cart;
pub mod catalog;
pub mod complaints;
pub mod reviews;
pub mod users;
