use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::complaints::{ComplaintList, FileComplaintRequest, ReplyComplaintRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Complaint,
    response::ApiResponse,
    routes::params::StatusQuery,
    services::complaint_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_complaints).post(file_complaint))
        .route("/{id}/reply", patch(reply_to_complaint))
}

#[utoipa::path(
    post,
    path = "/api/complaints",
    request_body = FileComplaintRequest,
    responses(
        (status = 201, description = "File a complaint against a shop", body = ApiResponse<Complaint>),
        (status = 400, description = "Unknown shop or missing fields")
    ),
    security(("bearer_auth" = [])),
    tag = "Complaints"
)]
pub async fn file_complaint(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<FileComplaintRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Complaint>>)> {
    let resp = complaint_service::file_complaint(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/complaints",
    params(StatusQuery),
    responses(
        (status = 200, description = "The caller's complaints", body = ApiResponse<ComplaintList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Complaints"
)]
pub async fn list_complaints(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<ComplaintList>>> {
    let resp = complaint_service::list_my_complaints(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/complaints/{id}/reply",
    params(("id" = Uuid, Path, description = "Complaint ID")),
    request_body = ReplyComplaintRequest,
    responses(
        (status = 200, description = "Shop owner replies", body = ApiResponse<Complaint>),
        (status = 404, description = "Complaint not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Complaints"
)]
pub async fn reply_to_complaint(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReplyComplaintRequest>,
) -> AppResult<Json<ApiResponse<Complaint>>> {
    let resp = complaint_service::reply_to_complaint(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
