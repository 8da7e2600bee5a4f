use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit::record,
    dto::payment_methods::{AddPaymentMethodRequest, PaymentMethodList},
    entity::payment_methods::{ActiveModel, Column, Entity as PaymentMethods},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::PaymentMethod,
    response::{ApiResponse, Meta},
    state::AppState,
    validation::{
        card_last4, is_valid_card_number, is_valid_cvv, is_valid_expiry, require_non_empty,
    },
};

fn validate_card(payload: &AddPaymentMethodRequest) -> AppResult<()> {
    require_non_empty("card_type", &payload.card_type)?;
    if !is_valid_card_number(&payload.card_number) {
        return Err(AppError::bad_request("Card number must be 16 digits"));
    }
    if !is_valid_cvv(&payload.cvv) {
        return Err(AppError::bad_request("Invalid CVV"));
    }
    if !is_valid_expiry(payload.exp_month, payload.exp_year, Utc::now().date_naive()) {
        return Err(AppError::bad_request("Card is expired or expiry is invalid"));
    }
    Ok(())
}

pub async fn add_payment_method(
    state: &AppState,
    user: &AuthUser,
    payload: AddPaymentMethodRequest,
) -> AppResult<ApiResponse<PaymentMethod>> {
    validate_card(&payload)?;

    // Only the last four digits are persisted; the full number and CVV are dropped here.
    let method = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        card_type: Set(payload.card_type.trim().to_string()),
        last4: Set(card_last4(&payload.card_number)),
        nickname: Set(payload.nickname.filter(|n| !n.trim().is_empty())),
        exp_month: Set(payload.exp_month),
        exp_year: Set(payload.exp_year),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    record(
        &state.pool,
        user.user_id,
        "payment_method_add",
        "payment_methods",
        serde_json::json!({ "payment_method_id": method.id, "last4": method.last4 }),
    )
    .await;

    Ok(ApiResponse::success(
        "Payment method saved",
        PaymentMethod::from(method),
        Some(Meta::empty()),
    ))
}

pub async fn list_payment_methods(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<PaymentMethodList>> {
    let items: Vec<PaymentMethod> = PaymentMethods::find()
        .filter(Column::UserId.eq(user.user_id))
        .order_by_desc(Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(PaymentMethod::from)
        .collect();

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Payment methods",
        PaymentMethodList { items },
        Some(Meta::new(1, total.max(1), total)),
    ))
}

pub async fn delete_payment_method(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = PaymentMethods::delete_many()
        .filter(
            Condition::all()
                .add(Column::Id.eq(id))
                .add(Column::UserId.eq(user.user_id)),
        )
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    record(
        &state.pool,
        user.user_id,
        "payment_method_delete",
        "payment_methods",
        serde_json::json!({ "payment_method_id": id }),
    )
    .await;

    Ok(ApiResponse::empty("Deleted"))
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;

    fn card(number: &str, cvv: &str, month: i16, year: i16) -> AddPaymentMethodRequest {
        AddPaymentMethodRequest {
            card_type: "Visa".into(),
            card_number: number.into(),
            nickname: None,
            exp_month: month,
            exp_year: year,
            cvv: cvv.into(),
        }
    }

    #[test]
    fn validates_card_fields() {
        let next_year = i16::try_from(Utc::now().year() + 1).expect("year fits in i16");
        assert!(validate_card(&card("4111111111111111", "123", 1, next_year)).is_ok());
        assert!(validate_card(&card("411111111111111", "123", 1, next_year)).is_err());
        assert!(validate_card(&card("4111111111111111", "12", 1, next_year)).is_err());
        assert!(validate_card(&card("4111111111111111", "123", 1, 2000)).is_err());
    }
}
