use chrono::Utc;
use sea_orm::sea_query::LockType;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::record,
    domain::appointments::{AppointmentStatus, is_bookable_date},
    dto::appointments::{AppointmentList, BookAppointmentRequest, UpdateAppointmentRequest},
    entity::appointments::{ActiveModel, Column, Entity as Appointments, Model as AppointmentModel},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_customer},
    models::Appointment,
    response::{ApiResponse, Meta},
    routes::params::StatusQuery,
    services::shop_service::{find_shop, owned_shop},
    state::AppState,
};

fn parse_status(value: &str) -> AppResult<AppointmentStatus> {
    AppointmentStatus::parse(value)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown appointment status {value}")))
}

fn stored_status(model: &AppointmentModel) -> AppResult<AppointmentStatus> {
    AppointmentStatus::parse(&model.status).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "appointment {} has unknown status {}",
            model.id,
            model.status
        ))
    })
}

async fn paginate(
    state: &AppState,
    mut condition: Condition,
    query: StatusQuery,
) -> AppResult<ApiResponse<AppointmentList>> {
    let (page, limit, offset) = query.pagination().normalize();
    if let Some(status) = query.status.as_deref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Status.eq(parse_status(status)?.as_str()));
    }

    let finder: Select<Appointments> = Appointments::find()
        .filter(condition)
        .order_by_desc(Column::Date)
        .order_by_desc(Column::Time);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Appointment::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Appointments",
        AppointmentList { items },
        Some(meta),
    ))
}

pub async fn book_appointment(
    state: &AppState,
    user: &AuthUser,
    payload: BookAppointmentRequest,
) -> AppResult<ApiResponse<Appointment>> {
    ensure_customer(user)?;
    if !is_bookable_date(payload.date, Utc::now().date_naive()) {
        return Err(AppError::bad_request("Appointment date is in the past"));
    }

    let shop = find_shop(&state.orm, payload.shop_id).await?;
    if !shop.is_available {
        return Err(AppError::bad_request("Shop is not taking appointments"));
    }

    let appointment = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        shop_id: Set(shop.id),
        shop_name: Set(shop.shop_name.clone()),
        date: Set(payload.date),
        time: Set(payload.time),
        rate: Set(shop.hourly_rate),
        status: Set(AppointmentStatus::Pending.as_str().to_string()),
        estimated_time: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(
        appointment_id = %appointment.id,
        shop_id = %shop.id,
        date = %appointment.date,
        "appointment booked"
    );
    record(
        &state.pool,
        user.user_id,
        "appointment_book",
        "appointments",
        serde_json::json!({ "appointment_id": appointment.id, "shop_id": shop.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Appointment booked",
        Appointment::from(appointment),
        Some(Meta::empty()),
    ))
}

pub async fn list_my_appointments(
    state: &AppState,
    user: &AuthUser,
    query: StatusQuery,
) -> AppResult<ApiResponse<AppointmentList>> {
    let condition = Condition::all().add(Column::UserId.eq(user.user_id));
    paginate(state, condition, query).await
}

pub async fn list_shop_appointments(
    state: &AppState,
    user: &AuthUser,
    query: StatusQuery,
) -> AppResult<ApiResponse<AppointmentList>> {
    let shop = owned_shop(&state.orm, user).await?;
    let condition = Condition::all().add(Column::ShopId.eq(shop.id));
    paginate(state, condition, query).await
}

/// Visible to the customer who booked it and to the owner of the shop.
pub async fn get_appointment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Appointment>> {
    let appointment = Appointments::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if appointment.user_id != user.user_id {
        let shop = find_shop(&state.orm, appointment.shop_id).await?;
        if shop.user_id != user.user_id {
            return Err(AppError::NotFound);
        }
    }

    Ok(ApiResponse::success(
        "Appointment",
        Appointment::from(appointment),
        Some(Meta::empty()),
    ))
}

pub async fn update_appointment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateAppointmentRequest,
) -> AppResult<ApiResponse<Appointment>> {
    let txn = state.orm.begin().await?;
    let shop = owned_shop(&txn, user).await?;

    let existing = Appointments::find()
        .filter(
            Condition::all()
                .add(Column::Id.eq(id))
                .add(Column::ShopId.eq(shop.id)),
        )
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let current = stored_status(&existing)?;
    if current.is_final() {
        return Err(AppError::BadRequest(format!(
            "Appointment is already {}",
            current.as_str()
        )));
    }

    let mut active: ActiveModel = existing.into();
    if let Some(next) = payload.status {
        if !current.can_transition_to(next) {
            return Err(AppError::BadRequest(format!(
                "Cannot move appointment from {} to {}",
                current.as_str(),
                next.as_str()
            )));
        }
        active.status = Set(next.as_str().to_string());
    }
    if let Some(date) = payload.date {
        active.date = Set(date);
    }
    if let Some(time) = payload.time {
        active.time = Set(time);
    }
    if let Some(estimated_time) = payload.estimated_time {
        active.estimated_time = Set(Some(estimated_time));
    }
    active.updated_at = Set(Utc::now().into());

    let appointment = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(appointment_id = %appointment.id, status = %appointment.status, "appointment updated");
    record(
        &state.pool,
        user.user_id,
        "appointment_update",
        "appointments",
        serde_json::json!({ "appointment_id": appointment.id, "status": appointment.status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Appointment updated",
        Appointment::from(appointment),
        Some(Meta::empty()),
    ))
}

pub async fn cancel_appointment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Appointment>> {
    ensure_customer(user)?;
    let txn = state.orm.begin().await?;

    let existing = Appointments::find()
        .filter(
            Condition::all()
                .add(Column::Id.eq(id))
                .add(Column::UserId.eq(user.user_id)),
        )
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    if !stored_status(&existing)?.customer_can_cancel() {
        return Err(AppError::bad_request(
            "Only pending or accepted appointments can be cancelled",
        ));
    }

    let mut active: ActiveModel = existing.into();
    active.status = Set(AppointmentStatus::Cancelled.as_str().to_string());
    active.updated_at = Set(Utc::now().into());
    let appointment = active.update(&txn).await?;
    txn.commit().await?;

    record(
        &state.pool,
        user.user_id,
        "appointment_cancel",
        "appointments",
        serde_json::json!({ "appointment_id": appointment.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Appointment cancelled",
        Appointment::from(appointment),
        Some(Meta::empty()),
    ))
}
