#![allow(dead_code)]

use repair_marketplace_api::{
    db::{create_pool, run_migrations},
    domain::users::UserType,
    dto::{auth::RegisterRequest, shops::CreateShopRequest, tools::CreateToolRequest},
    middleware::auth::AuthUser,
    services::{auth_service, shop_service, tool_service},
    state::{AppState, JwtSettings},
};
use sea_orm::{ConnectionTrait, Statement};
use std::sync::LazyLock;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

static DB_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Held for the whole test: every flow truncates the same tables.
pub async fn lock_db() -> MutexGuard<'static, ()> {
    DB_LOCK.lock().await
}

/// Returns `None` when no database is configured so the caller can skip.
pub fn database_url() -> Option<String> {
    match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            None
        }
    }
}

pub async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let state = AppState::new(
        pool,
        JwtSettings {
            secret: "test-secret".into(),
            ttl_hours: 1,
        },
    );
    run_migrations(&state.orm).await?;

    // Clean tables between runs
    let backend = state.orm.get_database_backend();
    state
        .orm
        .execute(Statement::from_string(
            backend,
            "TRUNCATE TABLE order_items, orders, cart_items, payment_methods, shop_feedback, \
             feedback, complaints, appointments, tutorials, tools, repair_shops, audit_logs, users \
             RESTART IDENTITY CASCADE",
        ))
        .await?;

    Ok(state)
}

pub async fn register(
    state: &AppState,
    email: &str,
    user_type: UserType,
    shop_name: Option<&str>,
) -> anyhow::Result<Uuid> {
    let user = auth_service::register_user(
        state,
        RegisterRequest {
            name: "Test User".into(),
            email: email.into(),
            mobile: "5550001111".into(),
            address: String::new(),
            photo_url: None,
            user_type,
            shop_name: shop_name.map(Into::into),
            password: "secret123".into(),
        },
    )
    .await?
    .data
    .expect("user");
    Ok(user.id)
}

pub fn shop_request(shop_name: &str) -> CreateShopRequest {
    CreateShopRequest {
        shop_name: shop_name.into(),
        category: "Automotive".into(),
        description: "Brakes and tyres".into(),
        owner_name: "Test User".into(),
        hourly_rate: 4500,
        tag: Some("Top Rated".into()),
        contact: "5550001111".into(),
        image_url: None,
        latitude: None,
        longitude: None,
    }
}

/// A business user with a shop, returned as the authenticated owner and the shop id.
pub async fn open_shop(
    state: &AppState,
    email: &str,
    shop_name: &str,
) -> anyhow::Result<(AuthUser, Uuid)> {
    let owner = AuthUser::business(register(state, email, UserType::Business, Some(shop_name)).await?);
    let shop = shop_service::create_shop(state, &owner, shop_request(shop_name))
        .await?
        .data
        .expect("shop");
    Ok((owner, shop.id))
}

pub async fn create_tool(
    state: &AppState,
    owner: &AuthUser,
    name: &str,
    category: &str,
    price: i64,
) -> anyhow::Result<Uuid> {
    let tool = tool_service::create_tool(
        state,
        owner,
        CreateToolRequest {
            name: name.into(),
            category: category.into(),
            price,
            description: String::new(),
            image_url: None,
        },
    )
    .await?
    .data
    .expect("tool");
    Ok(tool.id)
}
