pub mod appointments;
pub mod audit_logs;
pub mod cart_items;
pub mod complaints;
pub mod feedback;
pub mod order_items;
pub mod orders;
pub mod payment_methods;
pub mod repair_shops;
pub mod shop_feedback;
pub mod tools;
pub mod tutorials;
pub mod users;

pub use appointments::Entity as Appointments;
pub use audit_logs::Entity as AuditLogs;
pub use cart_items::Entity as CartItems;
pub use complaints::Entity as Complaints;
pub use feedback::Entity as Feedback;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use payment_methods::Entity as PaymentMethods;
pub use repair_shops::Entity as RepairShops;
pub use shop_feedback::Entity as ShopFeedback;
pub use tools::Entity as Tools;
pub use tutorials::Entity as Tutorials;
pub use users::Entity as Users;
