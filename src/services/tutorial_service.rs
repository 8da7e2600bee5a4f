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
    dto::tutorials::{CreateTutorialRequest, TutorialList, UpdateTutorialRequest},
    entity::tutorials::{ActiveModel, Column, Entity as Tutorials, Model as TutorialModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Tutorial,
    response::{ApiResponse, Meta},
    routes::params::CatalogQuery,
    services::shop_service::owned_shop,
    state::AppState,
    validation::require_non_empty,
};

pub async fn list_tutorials(
    state: &AppState,
    query: CatalogQuery,
) -> AppResult<ApiResponse<TutorialList>> {
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
                .add(Expr::col(Column::Title).ilike(pattern.clone()))
                .add(Expr::col(Column::Tools).ilike(pattern)),
        );
    }

    let finder = Tutorials::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Tutorial::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Tutorials",
        TutorialList { items },
        Some(meta),
    ))
}

pub async fn get_tutorial(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Tutorial>> {
    let tutorial = Tutorials::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Tutorial::from)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Tutorial", tutorial, None))
}

pub async fn create_tutorial(
    state: &AppState,
    user: &AuthUser,
    payload: CreateTutorialRequest,
) -> AppResult<ApiResponse<Tutorial>> {
    let shop = owned_shop(&state.orm, user).await?;
    require_non_empty("title", &payload.title)?;
    require_non_empty("category", &payload.category)?;

    let tutorial = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        shop_id: Set(shop.id),
        title: Set(payload.title.trim().to_string()),
        category: Set(payload.category.trim().to_string()),
        duration: Set(payload.duration),
        tools: Set(payload.tools),
        description: Set(payload.description),
        video_url: Set(payload.video_url),
        image_url: Set(payload.image_url),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    record(
        &state.pool,
        user.user_id,
        "tutorial_create",
        "tutorials",
        serde_json::json!({ "tutorial_id": tutorial.id, "shop_id": shop.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Tutorial created",
        Tutorial::from(tutorial),
        Some(Meta::empty()),
    ))
}

async fn owned_tutorial(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<TutorialModel> {
    let shop = owned_shop(&state.orm, user).await?;
    let tutorial = Tutorials::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    if tutorial.shop_id != shop.id {
        return Err(AppError::Forbidden);
    }
    Ok(tutorial)
}

pub async fn update_tutorial(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateTutorialRequest,
) -> AppResult<ApiResponse<Tutorial>> {
    let existing = owned_tutorial(state, user, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(title) = payload.title {
        require_non_empty("title", &title)?;
        active.title = Set(title.trim().to_string());
    }
    if let Some(category) = payload.category {
        require_non_empty("category", &category)?;
        active.category = Set(category.trim().to_string());
    }
    if let Some(duration) = payload.duration {
        active.duration = Set(duration);
    }
    if let Some(tools) = payload.tools {
        active.tools = Set(tools);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(video_url) = payload.video_url {
        active.video_url = Set(Some(video_url));
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url));
    }

    let tutorial = active.update(&state.orm).await?;

    record(
        &state.pool,
        user.user_id,
        "tutorial_update",
        "tutorials",
        serde_json::json!({ "tutorial_id": tutorial.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        Tutorial::from(tutorial),
        Some(Meta::empty()),
    ))
}

pub async fn delete_tutorial(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let tutorial = owned_tutorial(state, user, id).await?;
    Tutorials::delete_by_id(tutorial.id).exec(&state.orm).await?;

    record(
        &state.pool,
        user.user_id,
        "tutorial_delete",
        "tutorials",
        serde_json::json!({ "tutorial_id": id }),
    )
    .await;

    Ok(ApiResponse::empty("Deleted"))
}
