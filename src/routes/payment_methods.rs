use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use uuid::Uuid;

use crate::{
    dto::payment_methods::{AddPaymentMethodRequest, PaymentMethodList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::PaymentMethod,
    response::ApiResponse,
    services::payment_method_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payment_methods).post(add_payment_method))
        .route("/{id}", delete(delete_payment_method))
}

#[utoipa::path(
    post,
    path = "/api/payment-methods",
    request_body = AddPaymentMethodRequest,
    responses(
        (status = 201, description = "Save a card", body = ApiResponse<PaymentMethod>),
        (status = 400, description = "Invalid card details")
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
pub async fn add_payment_method(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddPaymentMethodRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<PaymentMethod>>)> {
    let resp = payment_method_service::add_payment_method(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/payment-methods",
    responses(
        (status = 200, description = "Saved cards", body = ApiResponse<PaymentMethodList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
pub async fn list_payment_methods(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<PaymentMethodList>>> {
    let resp = payment_method_service::list_payment_methods(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/payment-methods/{id}",
    params(("id" = Uuid, Path, description = "Payment method ID")),
    responses(
        (status = 200, description = "Deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Payment method not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
pub async fn delete_payment_method(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = payment_method_service::delete_payment_method(&state, &user, id).await?;
    Ok(Json(resp))
}
