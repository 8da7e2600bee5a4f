use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::tools::{CreateToolRequest, ToolList, UpdateToolRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Tool,
    response::ApiResponse,
    routes::params::CatalogQuery,
    services::tool_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tools).post(create_tool))
        .route("/{id}", get(get_tool).put(update_tool).delete(delete_tool))
}

#[utoipa::path(
    get,
    path = "/api/tools",
    params(CatalogQuery),
    responses(
        (status = 200, description = "List tools", body = ApiResponse<ToolList>)
    ),
    tag = "Tools"
)]
pub async fn list_tools(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<ApiResponse<ToolList>>> {
    let resp = tool_service::list_tools(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/tools/{id}",
    params(("id" = Uuid, Path, description = "Tool ID")),
    responses(
        (status = 200, description = "Get tool", body = ApiResponse<Tool>),
        (status = 404, description = "Tool not found"),
    ),
    tag = "Tools"
)]
pub async fn get_tool(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Tool>>> {
    let resp = tool_service::get_tool(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/tools",
    request_body = CreateToolRequest,
    responses(
        (status = 201, description = "Create tool", body = ApiResponse<Tool>),
        (status = 403, description = "Not a business account")
    ),
    security(("bearer_auth" = [])),
    tag = "Tools"
)]
pub async fn create_tool(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateToolRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Tool>>)> {
    let resp = tool_service::create_tool(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/tools/{id}",
    params(("id" = Uuid, Path, description = "Tool ID")),
    request_body = UpdateToolRequest,
    responses(
        (status = 200, description = "Updated tool", body = ApiResponse<Tool>),
        (status = 403, description = "Not the owner")
    ),
    security(("bearer_auth" = [])),
    tag = "Tools"
)]
pub async fn update_tool(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateToolRequest>,
) -> AppResult<Json<ApiResponse<Tool>>> {
    let resp = tool_service::update_tool(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/tools/{id}",
    params(("id" = Uuid, Path, description = "Tool ID")),
    responses(
        (status = 200, description = "Deleted tool", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Tool not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tools"
)]
pub async fn delete_tool(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = tool_service::delete_tool(&state, &user, id).await?;
    Ok(Json(resp))
}
