use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::LockType;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::record,
    domain::cart::line_total,
    dto::orders::{CheckoutRequest, OrderList, OrderWithItems},
    entity::{
        cart_items::{Column as CartCol, Entity as CartItems},
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
        payment_methods::{Column as PaymentCol, Entity as PaymentMethods},
        tools::{Column as ToolCol, Entity as Tools, Model as ToolModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, OrderItem},
    response::{ApiResponse, Meta},
    routes::params::StatusQuery,
    state::AppState,
    validation::is_valid_expiry,
};

pub const STATUS_PAID: &str = "paid";

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: StatusQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all().add(OrderCol::UserId.eq(user.user_id));
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(OrderCol::Status.eq(status.clone()));
    }

    let finder = Orders::find()
        .filter(condition)
        .order_by_desc(OrderCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Ok",
        OrderList { items: orders },
        Some(meta),
    ))
}

/// Pay for the caller's whole cart with one of their saved cards.
pub async fn checkout(
    state: &AppState,
    user: &AuthUser,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let txn = state.orm.begin().await?;

    let method = PaymentMethods::find()
        .filter(
            Condition::all()
                .add(PaymentCol::Id.eq(payload.payment_method_id))
                .add(PaymentCol::UserId.eq(user.user_id)),
        )
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::bad_request("Payment method not found"))?;

    if !is_valid_expiry(method.exp_month, method.exp_year, Utc::now().date_naive()) {
        return Err(AppError::bad_request("Payment method has expired"));
    }

    let cart = CartItems::find()
        .filter(CartCol::UserId.eq(user.user_id))
        .order_by_asc(CartCol::CreatedAt)
        .lock(LockType::Update)
        .all(&txn)
        .await?;

    if cart.is_empty() {
        return Err(AppError::bad_request("Cart is empty"));
    }

    let tool_ids: Vec<Uuid> = cart.iter().map(|item| item.tool_id).collect();
    let mut tools: HashMap<Uuid, ToolModel> = Tools::find()
        .filter(ToolCol::Id.is_in(tool_ids))
        .all(&txn)
        .await?
        .into_iter()
        .map(|tool| (tool.id, tool))
        .collect();

    let mut lines = Vec::with_capacity(cart.len());
    let mut total_amount: i64 = 0;
    for item in cart {
        let tool = tools.remove(&item.tool_id).ok_or_else(|| {
            AppError::BadRequest(format!("Tool {} is no longer available", item.tool_id))
        })?;
        if item.quantity <= 0 {
            return Err(AppError::bad_request("Cart has invalid quantity"));
        }
        total_amount += line_total(tool.price, item.quantity);
        lines.push((item, tool));
    }

    let order_id = Uuid::new_v4();
    let now = Utc::now();

    let order = OrderActive {
        id: Set(order_id),
        user_id: Set(user.user_id),
        payment_method_id: Set(Some(method.id)),
        total_amount: Set(total_amount),
        status: Set(STATUS_PAID.into()),
        invoice_number: Set(build_invoice_number(order_id)),
        paid_at: Set(Some(now.into())),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut order_items: Vec<OrderItem> = Vec::with_capacity(lines.len());
    for (item, tool) in &lines {
        let saved = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            tool_id: Set(Some(tool.id)),
            tool_name: Set(tool.name.clone()),
            quantity: Set(item.quantity),
            price: Set(tool.price),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
        order_items.push(OrderItem::from(saved));
    }

    // clear cart
    CartItems::delete_many()
        .filter(CartCol::UserId.eq(user.user_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!(
        order_id = %order.id,
        total = order.total_amount,
        items = order_items.len(),
        "cart checked out"
    );
    record(
        &state.pool,
        user.user_id,
        "checkout",
        "orders",
        serde_json::json!({ "order_id": order.id, "payment_method_id": method.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Payment successful",
        OrderWithItems {
            order: Order::from(order),
            items: order_items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::UserId.eq(user.user_id))
                .add(OrderCol::Id.eq(id)),
        )
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(OrderItem::from)
        .collect();

    Ok(ApiResponse::success(
        "OK",
        OrderWithItems {
            order: Order::from(order),
            items,
        },
        Some(Meta::empty()),
    ))
}

fn build_invoice_number(order_id: Uuid) -> String {
    let date = Utc::now().format("%Y%m%d");
    let suffix = order_id.simple().to_string();
    format!("INV-{}-{}", date, &suffix[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_number_embeds_date_and_id_prefix() {
        let id = Uuid::parse_str("a1b2c3d4-0000-4000-8000-000000000000").unwrap();
        let invoice = build_invoice_number(id);
        assert!(invoice.starts_with("INV-"));
        assert!(invoice.ends_with("-a1b2c3d4"));
        assert_eq!(invoice.len(), "INV-".len() + 8 + 1 + 8);
    }
}
