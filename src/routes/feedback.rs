use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::feedback::{CreateFeedbackRequest, FeedbackList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Feedback,
    response::ApiResponse,
    routes::params::Pagination,
    services::feedback_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_feedback).post(submit_feedback))
}

#[utoipa::path(
    post,
    path = "/api/feedback",
    request_body = CreateFeedbackRequest,
    responses(
        (status = 201, description = "Submit app feedback", body = ApiResponse<Feedback>),
        (status = 400, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Feedback"
)]
pub async fn submit_feedback(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateFeedbackRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Feedback>>)> {
    let resp = feedback_service::submit_feedback(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/feedback",
    params(Pagination),
    responses(
        (status = 200, description = "List app feedback", body = ApiResponse<FeedbackList>)
    ),
    tag = "Feedback"
)]
pub async fn list_feedback(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<FeedbackList>>> {
    let resp = feedback_service::list_feedback(&state, pagination).await?;
    Ok(Json(resp))
}
