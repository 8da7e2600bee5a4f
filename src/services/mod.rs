pub mod appointment_service;
pub mod auth_service;
pub mod cart_service;
pub mod complaint_service;
pub mod feedback_service;
pub mod order_service;
pub mod payment_method_service;
pub mod shop_service;
pub mod tool_service;
pub mod tutorial_service;
