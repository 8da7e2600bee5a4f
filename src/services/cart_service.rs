use chrono::DateTime;
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    audit::record,
    domain::cart::{MAX_QUANTITY, clamp_quantity, line_total},
    dto::cart::{AddToCartRequest, CartItemDto, CartList, UpdateCartItemRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{CartItem, Tool},
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(FromRow)]
struct CartWithToolRow {
    cart_id: Uuid,
    quantity: i32,
    tool_id: Uuid,
    owner_id: Uuid,
    shop_id: Uuid,
    name: String,
    category: String,
    price: i64,
    description: String,
    image_url: Option<String>,
    upload_time: DateTime<chrono::Utc>,
}

impl From<CartWithToolRow> for CartItemDto {
    fn from(row: CartWithToolRow) -> Self {
        let subtotal = line_total(row.price, row.quantity);
        CartItemDto {
            id: row.cart_id,
            tool: Tool {
                id: row.tool_id,
                user_id: row.owner_id,
                shop_id: row.shop_id,
                name: row.name,
                category: row.category,
                price: row.price,
                description: row.description,
                image_url: row.image_url,
                upload_time: row.upload_time,
            },
            quantity: row.quantity,
            subtotal,
        }
    }
}

/// The caller's cart. Carts are small, so the whole cart is returned at once.
pub async fn list_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartList>> {
    let rows = sqlx::query_as::<_, CartWithToolRow>(
        r#"
        SELECT ci.id AS cart_id, ci.quantity,
               t.id AS tool_id, t.user_id AS owner_id, t.shop_id, t.name, t.category,
               t.price, t.description, t.image_url, t.upload_time
        FROM cart_items ci
        JOIN tools t ON t.id = ci.tool_id
        WHERE ci.user_id = $1
        ORDER BY ci.created_at DESC
        "#,
    )
    .bind(user.user_id)
    .fetch_all(&state.pool)
    .await?;

    let items: Vec<CartItemDto> = rows.into_iter().map(CartItemDto::from).collect();
    let total_amount = items.iter().map(|item| item.subtotal).sum();
    let count = items.len() as i64;

    Ok(ApiResponse::success(
        "OK",
        CartList {
            items,
            total_amount,
        },
        Some(Meta::new(1, count.max(1), count)),
    ))
}

pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartItem>> {
    let requested = payload.quantity.unwrap_or(1);
    if requested <= 0 {
        return Err(AppError::bad_request("quantity must be greater than 0"));
    }

    let tool_exist: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM tools WHERE id = $1")
        .bind(payload.tool_id)
        .fetch_optional(&state.pool)
        .await?;
    if tool_exist.is_none() {
        return Err(AppError::bad_request("tool not found"));
    }

    // Re-adding a tool increments in place, capped at MAX_QUANTITY.
    let cart_item = sqlx::query_as::<_, CartItem>(
        r#"
        INSERT INTO cart_items (id, user_id, tool_id, quantity)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id, tool_id)
        DO UPDATE SET quantity = LEAST(cart_items.quantity + EXCLUDED.quantity, $5)
        RETURNING id, tool_id, user_id, quantity, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.user_id)
    .bind(payload.tool_id)
    .bind(clamp_quantity(requested))
    .bind(MAX_QUANTITY)
    .fetch_one(&state.pool)
    .await?;

    record(
        &state.pool,
        user.user_id,
        "cart_update",
        "cart_items",
        serde_json::json!({ "tool_id": payload.tool_id, "quantity": cart_item.quantity }),
    )
    .await;

    Ok(ApiResponse::success("Added to cart", cart_item, None))
}

pub async fn update_quantity(
    state: &AppState,
    user: &AuthUser,
    tool_id: Uuid,
    payload: UpdateCartItemRequest,
) -> AppResult<ApiResponse<CartItem>> {
    let quantity = clamp_quantity(payload.quantity);

    let cart_item = sqlx::query_as::<_, CartItem>(
        r#"
        UPDATE cart_items
        SET quantity = $3
        WHERE tool_id = $1 AND user_id = $2
        RETURNING id, tool_id, user_id, quantity, created_at
        "#,
    )
    .bind(tool_id)
    .bind(user.user_id)
    .bind(quantity)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound)?;

    record(
        &state.pool,
        user.user_id,
        "cart_update",
        "cart_items",
        serde_json::json!({ "tool_id": tool_id, "quantity": quantity }),
    )
    .await;

    Ok(ApiResponse::success("OK", cart_item, None))
}

pub async fn remove_from_cart(
    state: &AppState,
    user: &AuthUser,
    tool_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM cart_items WHERE tool_id = $1 AND user_id = $2")
        .bind(tool_id)
        .bind(user.user_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    record(
        &state.pool,
        user.user_id,
        "cart_remove",
        "cart_items",
        serde_json::json!({ "tool_id": tool_id }),
    )
    .await;

    Ok(ApiResponse::empty("Removed from cart"))
}
