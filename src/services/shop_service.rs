use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit::record,
    domain::{
        catalog::{filter_by_category, selected_category},
        reviews::{RatingSummary, summarize_ratings},
    },
    dto::shops::{
        AvailabilityRequest, CreateShopRequest, ShopCatalog, ShopDetail, ShopList,
        UpdateShopRequest,
    },
    entity::{
        repair_shops::{ActiveModel, Column, Entity as RepairShops, Model as ShopModel},
        shop_feedback::{Column as FeedbackCol, Entity as ShopFeedback},
        tools::{Column as ToolCol, Entity as Tools},
        tutorials::{Column as TutorialCol, Entity as Tutorials},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_business},
    models::{RepairShop, Tool, Tutorial},
    response::{ApiResponse, Meta},
    routes::params::{CategoryQuery, ShopQuery, ShopSortBy, SortOrder},
    state::AppState,
    validation::{require_non_empty, require_positive_amount},
};

/// The shop owned by the calling business user.
pub async fn owned_shop<C: ConnectionTrait>(conn: &C, user: &AuthUser) -> AppResult<ShopModel> {
    ensure_business(user)?;
    RepairShops::find()
        .filter(Column::UserId.eq(user.user_id))
        .one(conn)
        .await?
        .ok_or_else(|| AppError::bad_request("Create your shop first"))
}

const SHOP_NAME_TAKEN: &str = "A shop with this name already exists";

/// Case-insensitive match on the shop name, which is unique under `lower()`.
pub fn shop_name_matches(name: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(Column::ShopName))).eq(name.trim().to_lowercase())
}

pub async fn find_shop_by_name<C: ConnectionTrait>(conn: &C, name: &str) -> AppResult<Option<ShopModel>> {
    Ok(RepairShops::find()
        .filter(shop_name_matches(name))
        .one(conn)
        .await?)
}

async fn ensure_shop_name_free<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    owner: Option<Uuid>,
) -> AppResult<()> {
    match find_shop_by_name(conn, name).await? {
        Some(shop) if Some(shop.id) != owner => Err(AppError::bad_request(SHOP_NAME_TAKEN)),
        _ => Ok(()),
    }
}

pub async fn find_shop<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<ShopModel> {
    RepairShops::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn rating_summary<C: ConnectionTrait>(conn: &C, shop_id: Uuid) -> AppResult<RatingSummary> {
    let ratings: Vec<i16> = ShopFeedback::find()
        .select_only()
        .column(FeedbackCol::Rating)
        .filter(FeedbackCol::ShopId.eq(shop_id))
        .into_tuple()
        .all(conn)
        .await?;
    Ok(summarize_ratings(&ratings))
}

pub async fn list_shops(state: &AppState, query: ShopQuery) -> AppResult<ApiResponse<ShopList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(category) = selected_category(query.category.as_deref()) {
        condition = condition.add(Column::Category.eq(category));
    }

    if let Some(search) = query.q.as_ref().filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", search.trim());
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::ShopName).ilike(pattern.clone()))
                .add(Expr::col(Column::Description).ilike(pattern.clone()))
                .add(Expr::col(Column::Tag).ilike(pattern)),
        );
    }

    if let Some(available) = query.available {
        condition = condition.add(Column::IsAvailable.eq(available));
    }

    let sort_col = match query.sort_by.unwrap_or(ShopSortBy::CreatedAt) {
        ShopSortBy::CreatedAt => Column::CreatedAt,
        ShopSortBy::HourlyRate => Column::HourlyRate,
        ShopSortBy::ShopName => Column::ShopName,
    };

    let mut finder = RepairShops::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(RepairShop::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Shops", ShopList { items }, Some(meta)))
}

pub async fn get_shop(state: &AppState, id: Uuid) -> AppResult<ApiResponse<ShopDetail>> {
    let shop = find_shop(&state.orm, id).await?;
    let rating = rating_summary(&state.orm, shop.id).await?;
    Ok(ApiResponse::success(
        "Shop",
        ShopDetail {
            shop: shop.into(),
            rating,
        },
        None,
    ))
}

pub async fn my_shop(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<ShopDetail>> {
    ensure_business(user)?;
    let shop = RepairShops::find()
        .filter(Column::UserId.eq(user.user_id))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let rating = rating_summary(&state.orm, shop.id).await?;
    Ok(ApiResponse::success(
        "Shop",
        ShopDetail {
            shop: shop.into(),
            rating,
        },
        None,
    ))
}

/// Tools and tutorials of one shop, optionally narrowed to a category.
pub async fn shop_catalog(
    state: &AppState,
    id: Uuid,
    query: CategoryQuery,
) -> AppResult<ApiResponse<ShopCatalog>> {
    let shop = find_shop(&state.orm, id).await?;

    let tools: Vec<Tool> = Tools::find()
        .filter(ToolCol::ShopId.eq(shop.id))
        .order_by_desc(ToolCol::UploadTime)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Tool::from)
        .collect();

    let tutorials: Vec<Tutorial> = Tutorials::find()
        .filter(TutorialCol::ShopId.eq(shop.id))
        .order_by_desc(TutorialCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Tutorial::from)
        .collect();

    let category = query.category.as_deref();
    Ok(ApiResponse::success(
        "Catalog",
        ShopCatalog {
            tools: filter_by_category(tools, category),
            tutorials: filter_by_category(tutorials, category),
        },
        Some(Meta::empty()),
    ))
}

fn validate_shop(payload: &CreateShopRequest) -> AppResult<()> {
    require_non_empty("shop_name", &payload.shop_name)?;
    require_non_empty("category", &payload.category)?;
    require_non_empty("owner_name", &payload.owner_name)?;
    require_non_empty("contact", &payload.contact)?;
    require_positive_amount("hourly_rate", payload.hourly_rate)?;
    validate_coordinates(payload.latitude, payload.longitude)
}

fn validate_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> AppResult<()> {
    if latitude.is_some_and(|lat| !(-90.0..=90.0).contains(&lat)) {
        return Err(AppError::bad_request("latitude must be between -90 and 90"));
    }
    if longitude.is_some_and(|lng| !(-180.0..=180.0).contains(&lng)) {
        return Err(AppError::bad_request("longitude must be between -180 and 180"));
    }
    Ok(())
}

pub async fn create_shop(
    state: &AppState,
    user: &AuthUser,
    payload: CreateShopRequest,
) -> AppResult<ApiResponse<RepairShop>> {
    ensure_business(user)?;
    validate_shop(&payload)?;

    let existing = RepairShops::find()
        .filter(Column::UserId.eq(user.user_id))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::bad_request("You already have a shop"));
    }
    ensure_shop_name_free(&state.orm, &payload.shop_name, None).await?;

    let shop = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        shop_name: Set(payload.shop_name.trim().to_string()),
        category: Set(payload.category.trim().to_string()),
        description: Set(payload.description),
        owner_name: Set(payload.owner_name),
        hourly_rate: Set(payload.hourly_rate),
        tag: Set(payload.tag),
        contact: Set(payload.contact),
        image_url: Set(payload.image_url),
        latitude: Set(payload.latitude),
        longitude: Set(payload.longitude),
        is_available: Set(true),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(|err| AppError::from(err).unique_as_bad_request(SHOP_NAME_TAKEN))?;

    tracing::info!(shop_id = %shop.id, user_id = %user.user_id, "shop created");
    record(
        &state.pool,
        user.user_id,
        "shop_create",
        "repair_shops",
        serde_json::json!({ "shop_id": shop.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Shop created",
        RepairShop::from(shop),
        Some(Meta::empty()),
    ))
}

async fn owned_shop_by_id(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ShopModel> {
    ensure_business(user)?;
    let shop = find_shop(&state.orm, id).await?;
    if shop.user_id != user.user_id {
        return Err(AppError::Forbidden);
    }
    Ok(shop)
}

pub async fn update_shop(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateShopRequest,
) -> AppResult<ApiResponse<RepairShop>> {
    let existing = owned_shop_by_id(state, user, id).await?;
    validate_coordinates(payload.latitude, payload.longitude)?;

    let mut active: ActiveModel = existing.into();
    if let Some(shop_name) = payload.shop_name {
        require_non_empty("shop_name", &shop_name)?;
        ensure_shop_name_free(&state.orm, &shop_name, Some(id)).await?;
        active.shop_name = Set(shop_name.trim().to_string());
    }
    if let Some(category) = payload.category {
        require_non_empty("category", &category)?;
        active.category = Set(category.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(owner_name) = payload.owner_name {
        require_non_empty("owner_name", &owner_name)?;
        active.owner_name = Set(owner_name);
    }
    if let Some(hourly_rate) = payload.hourly_rate {
        require_positive_amount("hourly_rate", hourly_rate)?;
        active.hourly_rate = Set(hourly_rate);
    }
    if let Some(tag) = payload.tag {
        active.tag = Set(Some(tag));
    }
    if let Some(contact) = payload.contact {
        require_non_empty("contact", &contact)?;
        active.contact = Set(contact);
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url));
    }
    if let Some(latitude) = payload.latitude {
        active.latitude = Set(Some(latitude));
    }
    if let Some(longitude) = payload.longitude {
        active.longitude = Set(Some(longitude));
    }
    active.updated_at = Set(Utc::now().into());

    let shop = active
        .update(&state.orm)
        .await
        .map_err(|err| AppError::from(err).unique_as_bad_request(SHOP_NAME_TAKEN))?;

    record(
        &state.pool,
        user.user_id,
        "shop_update",
        "repair_shops",
        serde_json::json!({ "shop_id": shop.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        RepairShop::from(shop),
        Some(Meta::empty()),
    ))
}

pub async fn set_availability(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: AvailabilityRequest,
) -> AppResult<ApiResponse<RepairShop>> {
    let existing = owned_shop_by_id(state, user, id).await?;

    let mut active: ActiveModel = existing.into();
    active.is_available = Set(payload.is_available);
    active.updated_at = Set(Utc::now().into());
    let shop = active.update(&state.orm).await?;

    tracing::info!(shop_id = %shop.id, available = shop.is_available, "shop availability changed");
    record(
        &state.pool,
        user.user_id,
        "shop_availability",
        "repair_shops",
        serde_json::json!({ "shop_id": shop.id, "is_available": shop.is_available }),
    )
    .await;

    Ok(ApiResponse::success(
        "Availability updated",
        RepairShop::from(shop),
        Some(Meta::empty()),
    ))
}

pub async fn delete_shop(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let shop = owned_shop_by_id(state, user, id).await?;
    let result = RepairShops::delete_by_id(shop.id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    record(
        &state.pool,
        user.user_id,
        "shop_delete",
        "repair_shops",
        serde_json::json!({ "shop_id": id }),
    )
    .await;

    Ok(ApiResponse::empty("Deleted"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> CreateShopRequest {
        CreateShopRequest {
            shop_name: "Fixers".into(),
            category: "Electronics".into(),
            description: String::new(),
            owner_name: "Ana".into(),
            hourly_rate: 2500,
            tag: None,
            contact: "0123456789".into(),
            image_url: None,
            latitude: Some(6.9),
            longitude: Some(79.8),
        }
    }

    #[test]
    fn accepts_complete_shop() {
        assert!(validate_shop(&payload()).is_ok());
    }

    #[test]
    fn rejects_bad_rate_and_coordinates() {
        let mut shop = payload();
        shop.hourly_rate = 0;
        assert!(validate_shop(&shop).is_err());

        let mut shop = payload();
        shop.latitude = Some(91.0);
        assert!(validate_shop(&shop).is_err());

        let mut shop = payload();
        shop.shop_name = " ".into();
        assert!(validate_shop(&shop).is_err());
    }

    #[test]
    fn shop_name_lookup_ignores_case_and_padding() {
        use sea_orm::{DbBackend, QueryTrait};

        let sql = RepairShops::find()
            .filter(shop_name_matches("  Fix-It Garage "))
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains(r#"LOWER("shop_name") = 'fix-it garage'"#), "{sql}");
    }
}
