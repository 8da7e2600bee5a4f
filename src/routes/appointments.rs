use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::appointments::{AppointmentList, BookAppointmentRequest, UpdateAppointmentRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Appointment,
    response::ApiResponse,
    routes::params::StatusQuery,
    services::appointment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_appointments).post(book_appointment))
        .route("/{id}", get(get_appointment).patch(update_appointment))
        .route("/{id}/cancel", post(cancel_appointment))
}

#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = BookAppointmentRequest,
    responses(
        (status = 201, description = "Book an appointment", body = ApiResponse<Appointment>),
        (status = 400, description = "Shop unavailable or date in the past"),
        (status = 404, description = "Shop not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
pub async fn book_appointment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<BookAppointmentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Appointment>>)> {
    let resp = appointment_service::book_appointment(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/appointments",
    params(StatusQuery),
    responses(
        (status = 200, description = "The caller's bookings", body = ApiResponse<AppointmentList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
pub async fn list_appointments(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<AppointmentList>>> {
    let resp = appointment_service::list_my_appointments(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    params(("id" = Uuid, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Track one booking", body = ApiResponse<Appointment>),
        (status = 404, description = "Appointment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
pub async fn get_appointment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let resp = appointment_service::get_appointment(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/appointments/{id}",
    params(("id" = Uuid, Path, description = "Appointment ID")),
    request_body = UpdateAppointmentRequest,
    responses(
        (status = 200, description = "Shop owner updates status or time", body = ApiResponse<Appointment>),
        (status = 400, description = "Appointment already finished"),
        (status = 404, description = "Appointment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
pub async fn update_appointment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let resp = appointment_service::update_appointment(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/appointments/{id}/cancel",
    params(("id" = Uuid, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Customer cancels a booking", body = ApiResponse<Appointment>),
        (status = 400, description = "Booking can no longer be cancelled")
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let resp = appointment_service::cancel_appointment(&state, &user, id).await?;
    Ok(Json(resp))
}
