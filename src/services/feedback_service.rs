use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit::record,
    dto::feedback::{CreateFeedbackRequest, CreateShopFeedbackRequest, FeedbackList, ShopFeedbackList},
    entity::{
        feedback::{ActiveModel as FeedbackActive, Column as FeedbackCol, Entity as Feedback},
        shop_feedback::{
            ActiveModel as ShopFeedbackActive, Column as ShopFeedbackCol, Entity as ShopFeedback,
        },
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::shop_service::{find_shop, rating_summary},
    state::AppState,
    validation::{require_non_empty, require_rating},
};

pub async fn submit_feedback(
    state: &AppState,
    user: &AuthUser,
    payload: CreateFeedbackRequest,
) -> AppResult<ApiResponse<models::Feedback>> {
    require_non_empty("name", &payload.name)?;
    require_non_empty("content", &payload.content)?;
    require_rating(payload.rating)?;

    let feedback = FeedbackActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        name: Set(payload.name),
        content: Set(payload.content),
        rating: Set(payload.rating),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    record(
        &state.pool,
        user.user_id,
        "feedback_submit",
        "feedback",
        serde_json::json!({ "feedback_id": feedback.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Thanks for your feedback",
        models::Feedback::from(feedback),
        Some(Meta::empty()),
    ))
}

pub async fn list_feedback(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<FeedbackList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Feedback::find().order_by_desc(FeedbackCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(models::Feedback::from)
        .collect();

    Ok(ApiResponse::success(
        "Feedback",
        FeedbackList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn review_shop(
    state: &AppState,
    user: &AuthUser,
    shop_id: Uuid,
    payload: CreateShopFeedbackRequest,
) -> AppResult<ApiResponse<models::ShopFeedback>> {
    require_non_empty("name", &payload.name)?;
    require_non_empty("description", &payload.description)?;
    require_rating(payload.rating)?;
    let shop = find_shop(&state.orm, shop_id).await?;

    let review = ShopFeedbackActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        shop_id: Set(shop.id),
        shop_name: Set(shop.shop_name),
        name: Set(payload.name),
        description: Set(payload.description),
        rating: Set(payload.rating),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    record(
        &state.pool,
        user.user_id,
        "shop_review",
        "shop_feedback",
        serde_json::json!({ "review_id": review.id, "shop_id": shop_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Review added",
        models::ShopFeedback::from(review),
        Some(Meta::empty()),
    ))
}

pub async fn list_shop_reviews(
    state: &AppState,
    shop_id: Uuid,
    pagination: Pagination,
) -> AppResult<ApiResponse<ShopFeedbackList>> {
    let shop = find_shop(&state.orm, shop_id).await?;
    let (page, limit, offset) = pagination.normalize();

    let finder = ShopFeedback::find()
        .filter(ShopFeedbackCol::ShopId.eq(shop.id))
        .order_by_desc(ShopFeedbackCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(models::ShopFeedback::from)
        .collect();

    let summary = rating_summary(&state.orm, shop.id).await?;

    Ok(ApiResponse::success(
        "Reviews",
        ShopFeedbackList { items, summary },
        Some(Meta::new(page, limit, total)),
    ))
}
