use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Tool;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub tool_id: Uuid,
    /// Defaults to 1.
    pub quantity: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartList {
    pub items: Vec<CartItemDto>,
    pub total_amount: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemDto {
    pub id: Uuid,
    pub tool: Tool,
    pub quantity: i32,
    pub subtotal: i64,
}
