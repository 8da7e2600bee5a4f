use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::{
        appointments::AppointmentList,
        complaints::ComplaintList,
        feedback::{CreateShopFeedbackRequest, ShopFeedbackList},
        shops::{
            AvailabilityRequest, CreateShopRequest, ShopCatalog, ShopDetail, ShopList,
            UpdateShopRequest,
        },
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{RepairShop, ShopFeedback},
    response::ApiResponse,
    routes::params::{CategoryQuery, Pagination, ShopQuery, StatusQuery},
    services::{appointment_service, complaint_service, feedback_service, shop_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_shops).post(create_shop))
        .route("/mine", get(my_shop))
        .route("/mine/appointments", get(shop_appointments))
        .route("/mine/complaints", get(shop_complaints))
        .route("/{id}", get(get_shop).put(update_shop).delete(delete_shop))
        .route("/{id}/availability", patch(set_availability))
        .route("/{id}/catalog", get(shop_catalog))
        .route("/{id}/feedback", get(list_reviews).post(review_shop))
}

#[utoipa::path(
    get,
    path = "/api/shops",
    params(ShopQuery),
    responses(
        (status = 200, description = "Browse repair shops", body = ApiResponse<ShopList>)
    ),
    tag = "Shops"
)]
pub async fn list_shops(
    State(state): State<AppState>,
    Query(query): Query<ShopQuery>,
) -> AppResult<Json<ApiResponse<ShopList>>> {
    let resp = shop_service::list_shops(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/shops/{id}",
    params(("id" = Uuid, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Shop with rating summary", body = ApiResponse<ShopDetail>),
        (status = 404, description = "Shop not found")
    ),
    tag = "Shops"
)]
pub async fn get_shop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ShopDetail>>> {
    let resp = shop_service::get_shop(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/shops/mine",
    responses(
        (status = 200, description = "The caller's shop", body = ApiResponse<ShopDetail>),
        (status = 403, description = "Not a business account"),
        (status = 404, description = "No shop yet")
    ),
    security(("bearer_auth" = [])),
    tag = "Shops"
)]
pub async fn my_shop(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ShopDetail>>> {
    let resp = shop_service::my_shop(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/shops",
    request_body = CreateShopRequest,
    responses(
        (status = 201, description = "Create shop", body = ApiResponse<RepairShop>),
        (status = 400, description = "Validation failed or shop exists"),
        (status = 403, description = "Not a business account")
    ),
    security(("bearer_auth" = [])),
    tag = "Shops"
)]
pub async fn create_shop(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateShopRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<RepairShop>>)> {
    let resp = shop_service::create_shop(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/shops/{id}",
    params(("id" = Uuid, Path, description = "Shop ID")),
    request_body = UpdateShopRequest,
    responses(
        (status = 200, description = "Updated shop", body = ApiResponse<RepairShop>),
        (status = 403, description = "Not the owner")
    ),
    security(("bearer_auth" = [])),
    tag = "Shops"
)]
pub async fn update_shop(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateShopRequest>,
) -> AppResult<Json<ApiResponse<RepairShop>>> {
    let resp = shop_service::update_shop(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/shops/{id}/availability",
    params(("id" = Uuid, Path, description = "Shop ID")),
    request_body = AvailabilityRequest,
    responses(
        (status = 200, description = "Availability toggled", body = ApiResponse<RepairShop>),
        (status = 403, description = "Not the owner")
    ),
    security(("bearer_auth" = [])),
    tag = "Shops"
)]
pub async fn set_availability(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AvailabilityRequest>,
) -> AppResult<Json<ApiResponse<RepairShop>>> {
    let resp = shop_service::set_availability(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/shops/{id}",
    params(("id" = Uuid, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Deleted shop", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Shop not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Shops"
)]
pub async fn delete_shop(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = shop_service::delete_shop(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/shops/{id}/catalog",
    params(("id" = Uuid, Path, description = "Shop ID"), CategoryQuery),
    responses(
        (status = 200, description = "Tools and tutorials of a shop", body = ApiResponse<ShopCatalog>)
    ),
    tag = "Shops"
)]
pub async fn shop_catalog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<CategoryQuery>,
) -> AppResult<Json<ApiResponse<ShopCatalog>>> {
    let resp = shop_service::shop_catalog(&state, id, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/shops/mine/appointments",
    params(StatusQuery),
    responses(
        (status = 200, description = "Bookings for the caller's shop", body = ApiResponse<AppointmentList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
pub async fn shop_appointments(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<AppointmentList>>> {
    let resp = appointment_service::list_shop_appointments(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/shops/mine/complaints",
    params(StatusQuery),
    responses(
        (status = 200, description = "Complaints against the caller's shop", body = ApiResponse<ComplaintList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Complaints"
)]
pub async fn shop_complaints(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<ComplaintList>>> {
    let resp = complaint_service::list_shop_complaints(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/shops/{id}/feedback",
    params(("id" = Uuid, Path, description = "Shop ID"), Pagination),
    responses(
        (status = 200, description = "Reviews with rating summary", body = ApiResponse<ShopFeedbackList>)
    ),
    tag = "Feedback"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ShopFeedbackList>>> {
    let resp = feedback_service::list_shop_reviews(&state, id, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/shops/{id}/feedback",
    params(("id" = Uuid, Path, description = "Shop ID")),
    request_body = CreateShopFeedbackRequest,
    responses(
        (status = 201, description = "Review a shop", body = ApiResponse<ShopFeedback>),
        (status = 400, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Feedback"
)]
pub async fn review_shop(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateShopFeedbackRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ShopFeedback>>)> {
    let resp = feedback_service::review_shop(&state, &user, id, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
