use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::tutorials::{CreateTutorialRequest, TutorialList, UpdateTutorialRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Tutorial,
    response::ApiResponse,
    routes::params::CatalogQuery,
    services::tutorial_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tutorials).post(create_tutorial))
        .route("/{id}", get(get_tutorial).put(update_tutorial).delete(delete_tutorial))
}

#[utoipa::path(
    get,
    path = "/api/tutorials",
    params(CatalogQuery),
    responses(
        (status = 200, description = "List tutorials", body = ApiResponse<TutorialList>)
    ),
    tag = "Tutorials"
)]
pub async fn list_tutorials(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<ApiResponse<TutorialList>>> {
    let resp = tutorial_service::list_tutorials(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/tutorials/{id}",
    params(("id" = Uuid, Path, description = "Tutorial ID")),
    responses(
        (status = 200, description = "Get tutorial", body = ApiResponse<Tutorial>),
        (status = 404, description = "Tutorial not found"),
    ),
    tag = "Tutorials"
)]
pub async fn get_tutorial(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Tutorial>>> {
    let resp = tutorial_service::get_tutorial(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/tutorials",
    request_body = CreateTutorialRequest,
    responses(
        (status = 201, description = "Create tutorial", body = ApiResponse<Tutorial>),
        (status = 403, description = "Not a business account")
    ),
    security(("bearer_auth" = [])),
    tag = "Tutorials"
)]
pub async fn create_tutorial(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateTutorialRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Tutorial>>)> {
    let resp = tutorial_service::create_tutorial(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/tutorials/{id}",
    params(("id" = Uuid, Path, description = "Tutorial ID")),
    request_body = UpdateTutorialRequest,
    responses(
        (status = 200, description = "Updated tutorial", body = ApiResponse<Tutorial>),
        (status = 403, description = "Not the owner")
    ),
    security(("bearer_auth" = [])),
    tag = "Tutorials"
)]
pub async fn update_tutorial(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTutorialRequest>,
) -> AppResult<Json<ApiResponse<Tutorial>>> {
    let resp = tutorial_service::update_tutorial(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/tutorials/{id}",
    params(("id" = Uuid, Path, description = "Tutorial ID")),
    responses(
        (status = 200, description = "Deleted tutorial", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Tutorial not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tutorials"
)]
pub async fn delete_tutorial(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = tutorial_service::delete_tutorial(&state, &user, id).await?;
    Ok(Json(resp))
}
