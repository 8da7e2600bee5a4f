use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit::record,
    domain::complaints::{STATUS_OPEN, STATUS_RESOLVED, complaint_code},
    dto::complaints::{ComplaintList, FileComplaintRequest, ReplyComplaintRequest},
    entity::complaints::{ActiveModel, Column, Entity as Complaints},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_customer},
    models::Complaint,
    response::{ApiResponse, Meta},
    routes::params::StatusQuery,
    services::shop_service::{find_shop_by_name, owned_shop},
    state::AppState,
    validation::require_non_empty,
};

pub async fn file_complaint(
    state: &AppState,
    user: &AuthUser,
    payload: FileComplaintRequest,
) -> AppResult<ApiResponse<Complaint>> {
    ensure_customer(user)?;
    require_non_empty("shop_name", &payload.shop_name)?;
    require_non_empty("description", &payload.description)?;
    require_non_empty("issue_type", &payload.issue_type)?;

    let shop_name = payload.shop_name.trim();
    let shop = find_shop_by_name(&state.orm, shop_name)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("No shop named {shop_name}")))?;

    let complaint = ActiveModel {
        id: Set(Uuid::new_v4()),
        complaint_code: Set(complaint_code()),
        shop_name: Set(shop.shop_name.clone()),
        shop_id: Set(shop.id),
        user_id: Set(user.user_id),
        description: Set(payload.description),
        issue_type: Set(payload.issue_type),
        image_url: Set(payload.image_url),
        status: Set(STATUS_OPEN.to_string()),
        reply: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(
        complaint_id = %complaint.id,
        code = complaint.complaint_code,
        shop_id = %shop.id,
        "complaint filed"
    );
    record(
        &state.pool,
        user.user_id,
        "complaint_file",
        "complaints",
        serde_json::json!({ "complaint_id": complaint.id, "shop_id": shop.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Complaint filed",
        Complaint::from(complaint),
        Some(Meta::empty()),
    ))
}

async fn paginate(
    state: &AppState,
    mut condition: Condition,
    query: StatusQuery,
) -> AppResult<ApiResponse<ComplaintList>> {
    let (page, limit, offset) = query.pagination().normalize();
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Status.eq(status.clone()));
    }

    let finder = Complaints::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Complaint::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Complaints",
        ComplaintList { items },
        Some(meta),
    ))
}

pub async fn list_my_complaints(
    state: &AppState,
    user: &AuthUser,
    query: StatusQuery,
) -> AppResult<ApiResponse<ComplaintList>> {
    paginate(state, Condition::all().add(Column::UserId.eq(user.user_id)), query).await
}

pub async fn list_shop_complaints(
    state: &AppState,
    user: &AuthUser,
    query: StatusQuery,
) -> AppResult<ApiResponse<ComplaintList>> {
    let shop = owned_shop(&state.orm, user).await?;
    paginate(state, Condition::all().add(Column::ShopId.eq(shop.id)), query).await
}

pub async fn reply_to_complaint(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: ReplyComplaintRequest,
) -> AppResult<ApiResponse<Complaint>> {
    require_non_empty("reply", &payload.reply)?;
    let shop = owned_shop(&state.orm, user).await?;

    let existing = Complaints::find()
        .filter(
            Condition::all()
                .add(Column::Id.eq(id))
                .add(Column::ShopId.eq(shop.id)),
        )
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    active.reply = Set(Some(payload.reply));
    active.status = Set(STATUS_RESOLVED.to_string());
    active.updated_at = Set(Utc::now().into());
    let complaint = active.update(&state.orm).await?;

    record(
        &state.pool,
        user.user_id,
        "complaint_reply",
        "complaints",
        serde_json::json!({ "complaint_id": complaint.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Reply sent",
        Complaint::from(complaint),
        Some(Meta::empty()),
    ))
}
