use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Accepted => "accepted",
            AppointmentStatus::InProgress => "in_progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(AppointmentStatus::Pending),
            "accepted" => Some(AppointmentStatus::Accepted),
            "in_progress" => Some(AppointmentStatus::InProgress),
            "completed" => Some(AppointmentStatus::Completed),
            "cancelled" => Some(AppointmentStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled
        )
    }

    /// Finished bookings are frozen; everything else may move freely.
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        !self.is_final() || *self == next
    }

    pub fn customer_can_cancel(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Pending | AppointmentStatus::Accepted
        )
    }
}

pub fn is_bookable_date(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_storage_names() {
        for status in [
            AppointmentStatus::Pending,
            AppointmentStatus::Accepted,
            AppointmentStatus::InProgress,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
        ] {
            assert_eq!(AppointmentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AppointmentStatus::parse("done"), None);
    }

    #[test]
    fn final_states_are_frozen() {
        assert!(AppointmentStatus::Pending.can_transition_to(AppointmentStatus::InProgress));
        assert!(AppointmentStatus::InProgress.can_transition_to(AppointmentStatus::Pending));
        assert!(!AppointmentStatus::Completed.can_transition_to(AppointmentStatus::Pending));
        assert!(!AppointmentStatus::Cancelled.can_transition_to(AppointmentStatus::Accepted));
        assert!(AppointmentStatus::Completed.can_transition_to(AppointmentStatus::Completed));
    }

    #[test]
    fn customer_cancellation_window() {
        assert!(AppointmentStatus::Pending.customer_can_cancel());
        assert!(AppointmentStatus::Accepted.customer_can_cancel());
        assert!(!AppointmentStatus::InProgress.customer_can_cancel());
    }

    #[test]
    fn past_dates_are_not_bookable() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert!(is_bookable_date(today, today));
        assert!(!is_bookable_date(today.pred_opt().unwrap(), today));
    }
}
