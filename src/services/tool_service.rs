use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit::record,
    domain::catalog::selected_category,
    dto::tools::{CreateToolRequest, ToolList, UpdateToolRequest},
    entity::tools::{ActiveModel, Column, Entity as Tools, Model as ToolModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Tool,
    response::{ApiResponse, Meta},
    routes::params::CatalogQuery,
    services::shop_service::owned_shop,
    state::AppState,
    validation::{require_non_empty, require_positive_amount},
};

pub async fn list_tools(state: &AppState, query: CatalogQuery) -> AppResult<ApiResponse<ToolList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(category) = selected_category(query.category.as_deref()) {
        condition = condition.add(Column::Category.eq(category));
    }
    if let Some(shop_id) = query.shop_id {
        condition = condition.add(Column::ShopId.eq(shop_id));
    }
    if let Some(search) = query.q.as_ref().filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", search.trim());
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Name).ilike(pattern.clone()))
                .add(Expr::col(Column::Description).ilike(pattern)),
        );
    }

    let finder = Tools::find()
        .filter(condition)
        .order_by_desc(Column::UploadTime);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Tool::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Tools", ToolList { items }, Some(meta)))
}

pub async fn get_tool(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Tool>> {
    let tool = Tools::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Tool::from)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Tool", tool, None))
}

pub async fn create_tool(
    state: &AppState,
    user: &AuthUser,
    payload: CreateToolRequest,
) -> AppResult<ApiResponse<Tool>> {
    let shop = owned_shop(&state.orm, user).await?;
    require_non_empty("name", &payload.name)?;
    require_non_empty("category", &payload.category)?;
    require_positive_amount("price", payload.price)?;

    let tool = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        shop_id: Set(shop.id),
        name: Set(payload.name.trim().to_string()),
        category: Set(payload.category.trim().to_string()),
        price: Set(payload.price),
        description: Set(payload.description),
        image_url: Set(payload.image_url),
        upload_time: NotSet,
    }
    .insert(&state.orm)
    .await?;

    record(
        &state.pool,
        user.user_id,
        "tool_create",
        "tools",
        serde_json::json!({ "tool_id": tool.id, "shop_id": shop.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Tool created",
        Tool::from(tool),
        Some(Meta::empty()),
    ))
}

async fn owned_tool(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ToolModel> {
    let shop = owned_shop(&state.orm, user).await?;
    let tool = Tools::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    if tool.shop_id != shop.id {
        return Err(AppError::Forbidden);
    }
    Ok(tool)
}

pub async fn update_tool(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateToolRequest,
) -> AppResult<ApiResponse<Tool>> {
    let existing = owned_tool(state, user, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        require_non_empty("name", &name)?;
        active.name = Set(name.trim().to_string());
    }
    if let Some(category) = payload.category {
        require_non_empty("category", &category)?;
        active.category = Set(category.trim().to_string());
    }
    if let Some(price) = payload.price {
        require_positive_amount("price", price)?;
        active.price = Set(price);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url));
    }

    let tool = active.update(&state.orm).await?;

    record(
        &state.pool,
        user.user_id,
        "tool_update",
        "tools",
        serde_json::json!({ "tool_id": tool.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        Tool::from(tool),
        Some(Meta::empty()),
    ))
}

pub async fn delete_tool(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let tool = owned_tool(state, user, id).await?;
    Tools::delete_by_id(tool.id).exec(&state.orm).await?;

    record(
        &state.pool,
        user.user_id,
        "tool_delete",
        "tools",
        serde_json::json!({ "tool_id": id }),
    )
    .await;

    Ok(ApiResponse::empty("Deleted"))
}
