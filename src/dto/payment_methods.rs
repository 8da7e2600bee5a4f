use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::PaymentMethod;

/// Card details as typed by the user. Only `last4` survives validation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddPaymentMethodRequest {
    pub card_type: String,
    pub card_number: String,
    pub nickname: Option<String>,
    pub exp_month: i16,
    pub exp_year: i16,
    pub cvv: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentMethodList {
    pub items: Vec<PaymentMethod>,
}
