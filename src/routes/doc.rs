use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    domain::{appointments::AppointmentStatus, reviews::RatingSummary, users::UserType},
    dto::{
        appointments::{AppointmentList, BookAppointmentRequest, UpdateAppointmentRequest},
        auth::{LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest},
        cart::{AddToCartRequest, CartItemDto, CartList, UpdateCartItemRequest},
        complaints::{ComplaintList, FileComplaintRequest, ReplyComplaintRequest},
        feedback::{CreateFeedbackRequest, CreateShopFeedbackRequest, FeedbackList, ShopFeedbackList},
        orders::{CheckoutRequest, OrderList, OrderWithItems},
        payment_methods::{AddPaymentMethodRequest, PaymentMethodList},
        shops::{
            AvailabilityRequest, CreateShopRequest, ShopCatalog, ShopDetail, ShopList,
            UpdateShopRequest,
        },
        tools::{CreateToolRequest, ToolList, UpdateToolRequest},
        tutorials::{CreateTutorialRequest, TutorialList, UpdateTutorialRequest},
    },
    models::{
        Appointment, CartItem, Complaint, Feedback, Order, OrderItem, PaymentMethod, RepairShop,
        ShopFeedback, Tool, Tutorial, User,
    },
    response::{ApiResponse, Meta},
    routes::{
        appointments, auth, cart, complaints, feedback, health, orders, params, payment_methods,
        profile, shops, tools, tutorials,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::readiness,
        auth::register,
        auth::login,
        profile::get_profile,
        profile::update_profile,
        shops::list_shops,
        shops::get_shop,
        shops::my_shop,
        shops::create_shop,
        shops::update_shop,
        shops::set_availability,
        shops::delete_shop,
        shops::shop_catalog,
        shops::shop_appointments,
        shops::shop_complaints,
        shops::list_reviews,
        shops::review_shop,
        tools::list_tools,
        tools::get_tool,
        tools::create_tool,
        tools::update_tool,
        tools::delete_tool,
        tutorials::list_tutorials,
        tutorials::get_tutorial,
        tutorials::create_tutorial,
        tutorials::update_tutorial,
        tutorials::delete_tutorial,
        appointments::book_appointment,
        appointments::list_appointments,
        appointments::get_appointment,
        appointments::update_appointment,
        appointments::cancel_appointment,
        complaints::file_complaint,
        complaints::list_complaints,
        complaints::reply_to_complaint,
        feedback::submit_feedback,
        feedback::list_feedback,
        payment_methods::add_payment_method,
        payment_methods::list_payment_methods,
        payment_methods::delete_payment_method,
        cart::cart_list,
        cart::add_to_cart,
        cart::update_quantity,
        cart::remove_from_cart,
        cart::checkout,
        orders::list_orders,
        orders::get_order
    ),
    components(
        schemas(
            User,
            UserType,
            RepairShop,
            Tool,
            Tutorial,
            Appointment,
            AppointmentStatus,
            Complaint,
            Feedback,
            ShopFeedback,
            PaymentMethod,
            CartItem,
            Order,
            OrderItem,
            RatingSummary,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            UpdateProfileRequest,
            CreateShopRequest,
            UpdateShopRequest,
            AvailabilityRequest,
            ShopList,
            ShopDetail,
            ShopCatalog,
            CreateToolRequest,
            UpdateToolRequest,
            ToolList,
            CreateTutorialRequest,
            UpdateTutorialRequest,
            TutorialList,
            BookAppointmentRequest,
            UpdateAppointmentRequest,
            AppointmentList,
            FileComplaintRequest,
            ReplyComplaintRequest,
            ComplaintList,
            CreateFeedbackRequest,
            CreateShopFeedbackRequest,
            FeedbackList,
            ShopFeedbackList,
            AddPaymentMethodRequest,
            PaymentMethodList,
            AddToCartRequest,
            UpdateCartItemRequest,
            CartItemDto,
            CartList,
            CheckoutRequest,
            OrderList,
            OrderWithItems,
            params::Pagination,
            Meta,
            ApiResponse<User>,
            ApiResponse<RepairShop>,
            ApiResponse<ShopList>,
            ApiResponse<CartList>,
            ApiResponse<OrderWithItems>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Registration and login"),
        (name = "Profile", description = "Current user profile"),
        (name = "Shops", description = "Repair shop listings"),
        (name = "Tools", description = "Tool catalog"),
        (name = "Tutorials", description = "Repair tutorials"),
        (name = "Appointments", description = "Booking and tracking"),
        (name = "Complaints", description = "Customer complaints"),
        (name = "Feedback", description = "App and shop feedback"),
        (name = "Payments", description = "Saved payment methods"),
        (name = "Cart", description = "Tool cart and checkout"),
        (name = "Orders", description = "Completed cart payments"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_marketplace_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/shops",
            "/api/shops/{id}/availability",
            "/api/appointments/{id}",
            "/api/cart/checkout",
            "/api/payment-methods",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
