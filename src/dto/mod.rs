pub mod appointments;
pub mod auth;
pub mod cart;
pub mod complaints;
pub mod feedback;
pub mod orders;
pub mod payment_methods;
pub mod shops;
pub mod tools;
pub mod tutorials;
