mod common;

use chrono::{Datelike, Duration, NaiveTime, Utc};
use common::{create_tool, open_shop, register, shop_request};
use repair_marketplace_api::{
    domain::{appointments::AppointmentStatus, users::UserType},
    dto::{
        appointments::{BookAppointmentRequest, UpdateAppointmentRequest},
        cart::{AddToCartRequest, UpdateCartItemRequest},
        complaints::{FileComplaintRequest, ReplyComplaintRequest},
        feedback::CreateShopFeedbackRequest,
        orders::CheckoutRequest,
        payment_methods::AddPaymentMethodRequest,
        shops::{AvailabilityRequest, UpdateShopRequest},
        tools::UpdateToolRequest,
    },
    entity::{AuditLogs, audit_logs::Column as AuditCol},
    error::AppError,
    middleware::auth::AuthUser,
    routes::params::{CatalogQuery, Pagination, StatusQuery},
    services::{
        appointment_service, cart_service, complaint_service, feedback_service, order_service,
        payment_method_service, shop_service, tool_service,
    },
    state::AppState,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

// Owner lists a shop and tools; a customer fills the cart, pays, books a
// repair, files a complaint and reviews the shop.
#[tokio::test]
async fn cart_checkout_booking_and_complaint_flow() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let _db = common::lock_db().await;
    let state = common::setup_state(&database_url).await?;

    let owner = AuthUser::business(
        register(&state, "owner@example.com", UserType::Business, Some("Fix-It Garage")).await?,
    );
    let customer =
        AuthUser::customer(register(&state, "customer@example.com", UserType::Customer, None).await?);

    // Customers cannot open a shop
    let forbidden = shop_service::create_shop(&state, &customer, shop_request("Fix-It Garage")).await;
    assert!(matches!(forbidden, Err(AppError::Forbidden)));

    let shop = shop_service::create_shop(&state, &owner, shop_request("Fix-It Garage"))
        .await?
        .data
        .expect("shop");
    let second = shop_service::create_shop(&state, &owner, shop_request("Fix-It Garage")).await;
    assert!(matches!(second, Err(AppError::BadRequest(_))));

    let wrench = create_tool(&state, &owner, "Torque Wrench", "Automotive", 1500).await?;
    let pipe = create_tool(&state, &owner, "Pipe Wrench", "Plumbing", 700).await?;

    let automotive = tool_service::list_tools(
        &state,
        CatalogQuery {
            category: Some("Automotive".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("tools");
    assert_eq!(automotive.items.len(), 1);
    assert_eq!(automotive.items[0].id, wrench);

    let everything = tool_service::list_tools(
        &state,
        CatalogQuery {
            category: Some("All".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("tools");
    assert_eq!(everything.items.len(), 2);

    // An empty cart still reports a valid page size
    let empty = cart_service::list_cart(&state, &customer).await?;
    let meta = empty.meta.expect("meta");
    assert_eq!(meta.per_page, Some(1));
    assert_eq!(meta.total, Some(0));

    // Adding the same tool twice merges into one line, capped at five
    add(&state, &customer, wrench, Some(2)).await?;
    let merged = add(&state, &customer, wrench, Some(4)).await?;
    assert_eq!(merged, 5);
    add(&state, &customer, pipe, None).await?;

    let clamped = cart_service::update_quantity(
        &state,
        &customer,
        pipe,
        UpdateCartItemRequest { quantity: 0 },
    )
    .await?
    .data
    .expect("cart item");
    assert_eq!(clamped.quantity, 1);

    let cart = cart_service::list_cart(&state, &customer)
        .await?
        .data
        .expect("cart");
    assert_eq!(cart.items.len(), 2);
    assert_eq!(cart.total_amount, 5 * 1500 + 700);

    let no_cards = payment_method_service::list_payment_methods(&state, &customer).await?;
    assert_eq!(no_cards.meta.expect("meta").per_page, Some(1));

    let expiry_year = i16::try_from(Utc::now().year() + 2)?;
    let expired = payment_method_service::add_payment_method(
        &state,
        &customer,
        card_request(1, 2001),
    )
    .await;
    assert!(matches!(expired, Err(AppError::BadRequest(_))));

    let method = payment_method_service::add_payment_method(
        &state,
        &customer,
        card_request(6, expiry_year),
    )
    .await?
    .data
    .expect("payment method");
    assert_eq!(method.last4, "4242");

    let paid = order_service::checkout(
        &state,
        &customer,
        CheckoutRequest {
            payment_method_id: method.id,
        },
    )
    .await?
    .data
    .expect("order");
    assert_eq!(paid.order.total_amount, 5 * 1500 + 700);
    assert_eq!(paid.order.status, "paid");
    assert_eq!(paid.items.len(), 2);

    let fetched = order_service::get_order(&state, &customer, paid.order.id)
        .await?
        .data
        .expect("order");
    assert_eq!(fetched.order.invoice_number, paid.order.invoice_number);
    assert_eq!(fetched.items.len(), 2);
    assert!(
        fetched
            .items
            .iter()
            .any(|item| item.tool_name == "Torque Wrench" && item.quantity == 5)
    );

    let someone_elses = order_service::get_order(&state, &owner, paid.order.id).await;
    assert!(matches!(someone_elses, Err(AppError::NotFound)));

    let emptied = cart_service::list_cart(&state, &customer)
        .await?
        .data
        .expect("cart");
    assert!(emptied.items.is_empty());

    let again = order_service::checkout(
        &state,
        &customer,
        CheckoutRequest {
            payment_method_id: method.id,
        },
    )
    .await;
    assert!(matches!(again, Err(AppError::BadRequest(_))));

    // Booking follows the shop's availability flag
    shop_service::set_availability(
        &state,
        &owner,
        shop.id,
        AvailabilityRequest {
            is_available: false,
        },
    )
    .await?;
    let closed = appointment_service::book_appointment(&state, &customer, booking(shop.id)).await;
    assert!(matches!(closed, Err(AppError::BadRequest(_))));

    shop_service::set_availability(
        &state,
        &owner,
        shop.id,
        AvailabilityRequest { is_available: true },
    )
    .await?;
    let appointment = appointment_service::book_appointment(&state, &customer, booking(shop.id))
        .await?
        .data
        .expect("appointment");
    assert_eq!(appointment.status, "pending");
    assert_eq!(appointment.rate, 4500);

    let incoming = appointment_service::list_shop_appointments(
        &state,
        &owner,
        StatusQuery {
            status: Some("pending".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("appointments");
    assert_eq!(incoming.items.len(), 1);

    // Only the customer and the shop owner can see a booking
    let bystander =
        AuthUser::customer(register(&state, "bystander@example.com", UserType::Customer, None).await?);
    let hidden = appointment_service::get_appointment(&state, &bystander, appointment.id).await;
    assert!(matches!(hidden, Err(AppError::NotFound)));
    let seen_by_owner = appointment_service::get_appointment(&state, &owner, appointment.id)
        .await?
        .data
        .expect("appointment");
    assert_eq!(seen_by_owner.id, appointment.id);

    for status in [AppointmentStatus::Accepted, AppointmentStatus::Completed] {
        appointment_service::update_appointment(
            &state,
            &owner,
            appointment.id,
            UpdateAppointmentRequest {
                status: Some(status),
                estimated_time: Some("2 hours".into()),
                ..Default::default()
            },
        )
        .await?;
    }
    let reopened = appointment_service::update_appointment(
        &state,
        &owner,
        appointment.id,
        UpdateAppointmentRequest {
            status: Some(AppointmentStatus::Pending),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(reopened, Err(AppError::BadRequest(_))));

    let late_cancel =
        appointment_service::cancel_appointment(&state, &customer, appointment.id).await;
    assert!(matches!(late_cancel, Err(AppError::BadRequest(_))));

    let rebooked = appointment_service::book_appointment(&state, &customer, booking(shop.id))
        .await?
        .data
        .expect("appointment");
    let cancelled = appointment_service::cancel_appointment(&state, &customer, rebooked.id)
        .await?
        .data
        .expect("appointment");
    assert_eq!(cancelled.status, "cancelled");

    let frozen = appointment_service::update_appointment(
        &state,
        &owner,
        rebooked.id,
        UpdateAppointmentRequest {
            status: Some(AppointmentStatus::Accepted),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(frozen, Err(AppError::BadRequest(_))));

    // Complaints resolve the shop by name
    let unknown = complaint_service::file_complaint(
        &state,
        &customer,
        complaint_request("No Such Shop"),
    )
    .await;
    assert!(matches!(unknown, Err(AppError::BadRequest(_))));

    let complaint = complaint_service::file_complaint(
        &state,
        &customer,
        complaint_request("Fix-It Garage"),
    )
    .await?
    .data
    .expect("complaint");
    assert_eq!(complaint.status, "open");
    assert!((1000..=9999).contains(&complaint.complaint_code));

    let replied = complaint_service::reply_to_complaint(
        &state,
        &owner,
        complaint.id,
        ReplyComplaintRequest {
            reply: "Sorry, we will redo the brakes for free".into(),
        },
    )
    .await?
    .data
    .expect("complaint");
    assert_eq!(replied.status, "resolved");
    assert!(replied.reply.is_some());

    // Reviews and the rating summary
    let out_of_range =
        feedback_service::review_shop(&state, &customer, shop.id, review_request(6)).await;
    assert!(matches!(out_of_range, Err(AppError::BadRequest(_))));

    feedback_service::review_shop(&state, &customer, shop.id, review_request(5)).await?;
    feedback_service::review_shop(&state, &customer, shop.id, review_request(4)).await?;

    let reviews = feedback_service::list_shop_reviews(&state, shop.id, Pagination::default())
        .await?
        .data
        .expect("reviews");
    assert_eq!(reviews.items.len(), 2);
    assert_eq!(reviews.summary.count, 2);
    assert!((reviews.summary.average - 4.5).abs() < f64::EPSILON);

    let detail = shop_service::get_shop(&state, shop.id)
        .await?
        .data
        .expect("shop detail");
    assert_eq!(detail.rating.count, 2);

    let checkout_audits = AuditLogs::find()
        .filter(AuditCol::Action.eq("checkout"))
        .filter(AuditCol::UserId.eq(customer.user_id))
        .count(&state.orm)
        .await?;
    assert_eq!(checkout_audits, 1);

    Ok(())
}

// Shop names are unique regardless of case, so a complaint filed by name
// always reaches exactly one owner.
#[tokio::test]
async fn shop_names_route_complaints_to_one_owner() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let _db = common::lock_db().await;
    let state = common::setup_state(&database_url).await?;

    let (first_owner, first_shop) = open_shop(&state, "first@example.com", "Fixers").await?;

    let second_owner = AuthUser::business(
        register(&state, "second@example.com", UserType::Business, Some("Fixers")).await?,
    );
    let duplicate = shop_service::create_shop(&state, &second_owner, shop_request("fixers ")).await;
    assert!(matches!(duplicate, Err(AppError::BadRequest(_))));

    let second_shop = shop_service::create_shop(&state, &second_owner, shop_request("Menders"))
        .await?
        .data
        .expect("shop");

    let renamed = shop_service::update_shop(
        &state,
        &second_owner,
        second_shop.id,
        UpdateShopRequest {
            shop_name: Some("FIXERS".into()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(renamed, Err(AppError::BadRequest(_))));

    // Keeping one's own name is not a clash
    shop_service::update_shop(
        &state,
        &first_owner,
        first_shop,
        UpdateShopRequest {
            shop_name: Some("Fixers".into()),
            ..Default::default()
        },
    )
    .await?;

    let customer =
        AuthUser::customer(register(&state, "customer@example.com", UserType::Customer, None).await?);
    let complaint =
        complaint_service::file_complaint(&state, &customer, complaint_request("  fixers"))
            .await?
            .data
            .expect("complaint");
    assert_eq!(complaint.shop_id, first_shop);
    assert_eq!(complaint.shop_name, "Fixers");

    let first_inbox = complaint_service::list_shop_complaints(&state, &first_owner, StatusQuery::default())
        .await?
        .data
        .expect("complaints");
    assert_eq!(first_inbox.items.len(), 1);

    let second_inbox =
        complaint_service::list_shop_complaints(&state, &second_owner, StatusQuery::default())
            .await?
            .data
            .expect("complaints");
    assert!(second_inbox.items.is_empty());

    Ok(())
}

#[tokio::test]
async fn owners_cannot_touch_other_shops() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let _db = common::lock_db().await;
    let state = common::setup_state(&database_url).await?;

    let (owner, shop) = open_shop(&state, "owner@example.com", "Fix-It Garage").await?;
    let (rival, _) = open_shop(&state, "rival@example.com", "Rival Repairs").await?;
    let tool = create_tool(&state, &owner, "Torque Wrench", "Automotive", 1500).await?;

    let update_shop = shop_service::update_shop(
        &state,
        &rival,
        shop,
        UpdateShopRequest {
            description: Some("Closed forever".into()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(update_shop, Err(AppError::Forbidden)));

    let delete_shop = shop_service::delete_shop(&state, &rival, shop).await;
    assert!(matches!(delete_shop, Err(AppError::Forbidden)));

    let update_tool = tool_service::update_tool(
        &state,
        &rival,
        tool,
        UpdateToolRequest {
            price: Some(1),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(update_tool, Err(AppError::Forbidden)));

    let delete_tool = tool_service::delete_tool(&state, &rival, tool).await;
    assert!(matches!(delete_tool, Err(AppError::Forbidden)));

    // Nothing changed for the real owner
    let kept = tool_service::get_tool(&state, tool).await?.data.expect("tool");
    assert_eq!(kept.price, 1500);
    let detail = shop_service::get_shop(&state, shop).await?.data.expect("shop");
    assert_eq!(detail.shop.description, "Brakes and tyres");

    shop_service::delete_shop(&state, &owner, shop).await?;
    let gone = shop_service::get_shop(&state, shop).await;
    assert!(matches!(gone, Err(AppError::NotFound)));

    Ok(())
}

async fn add(
    state: &AppState,
    user: &AuthUser,
    tool_id: Uuid,
    quantity: Option<i32>,
) -> anyhow::Result<i32> {
    let item = cart_service::add_to_cart(state, user, AddToCartRequest { tool_id, quantity })
        .await?
        .data
        .expect("cart item");
    Ok(item.quantity)
}

fn card_request(exp_month: i16, exp_year: i16) -> AddPaymentMethodRequest {
    AddPaymentMethodRequest {
        card_type: "Visa".into(),
        card_number: "4242 4242 4242 4242".into(),
        nickname: Some("Personal".into()),
        exp_month,
        exp_year,
        cvv: "123".into(),
    }
}

fn booking(shop_id: Uuid) -> BookAppointmentRequest {
    BookAppointmentRequest {
        shop_id,
        date: Utc::now().date_naive() + Duration::days(1),
        time: NaiveTime::from_hms_opt(10, 30, 0).expect("valid time"),
    }
}

fn complaint_request(shop_name: &str) -> FileComplaintRequest {
    FileComplaintRequest {
        shop_name: shop_name.into(),
        description: "Brakes squeal after the service".into(),
        issue_type: "Quality".into(),
        image_url: None,
    }
}

fn review_request(rating: i16) -> CreateShopFeedbackRequest {
    CreateShopFeedbackRequest {
        name: "Test User".into(),
        description: "Quick and friendly".into(),
        rating,
    }
}
