use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{domain::appointments::AppointmentStatus, models::Appointment};

#[derive(Debug, Deserialize, ToSchema)]
pub struct BookAppointmentRequest {
    pub shop_id: Uuid,
    pub date: NaiveDate,
    #[schema(value_type = String, example = "14:30:00")]
    pub time: NaiveTime,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAppointmentRequest {
    pub status: Option<AppointmentStatus>,
    pub date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, example = "14:30:00")]
    pub time: Option<NaiveTime>,
    pub estimated_time: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AppointmentList {
    pub items: Vec<Appointment>,
}
