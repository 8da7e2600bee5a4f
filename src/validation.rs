//! Input predicates applied before any write reaches the database.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::error::{AppError, AppResult};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid mobile regex"));
static CARD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{16}$").expect("valid card regex"));
static CVV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3,4}$").expect("valid cvv regex"));

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

pub fn is_valid_mobile(mobile: &str) -> bool {
    MOBILE_RE.is_match(mobile)
}

fn strip_card_spaces(number: &str) -> String {
    number.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Card numbers may be typed in groups separated by spaces.
pub fn is_valid_card_number(number: &str) -> bool {
    CARD_RE.is_match(&strip_card_spaces(number))
}

pub fn is_valid_cvv(cvv: &str) -> bool {
    CVV_RE.is_match(cvv)
}

/// A card stays valid through the last day of its expiry month.
pub fn is_valid_expiry(month: i16, year: i16, today: NaiveDate) -> bool {
    if !(1..=12).contains(&month) {
        return false;
    }
    let year = i32::from(year);
    let current_year = today.year();
    let current_month = today.month() as i32;
    year > current_year || (year == current_year && i32::from(month) >= current_month)
}

pub fn is_valid_rating(rating: i16) -> bool {
    (1..=5).contains(&rating)
}

pub fn card_last4(number: &str) -> String {
    let digits = strip_card_spaces(number);
    let start = digits.len().saturating_sub(4);
    digits[start..].to_string()
}

pub fn require_non_empty(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(())
}

pub fn require_email(email: &str) -> AppResult<()> {
    if !is_valid_email(email) {
        return Err(AppError::bad_request("Invalid email address"));
    }
    Ok(())
}

pub fn require_mobile(mobile: &str) -> AppResult<()> {
    if !is_valid_mobile(mobile) {
        return Err(AppError::bad_request("Mobile number must be exactly 10 digits"));
    }
    Ok(())
}

pub fn require_rating(rating: i16) -> AppResult<()> {
    if !is_valid_rating(rating) {
        return Err(AppError::bad_request("rating must be between 1 and 5"));
    }
    Ok(())
}

pub fn require_positive_amount(field: &str, amount: i64) -> AppResult<()> {
    if amount <= 0 {
        return Err(AppError::BadRequest(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_requires_domain_with_dot() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("owner.shop@fix-it.co.uk"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("ab.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn mobile_is_exactly_ten_digits() {
        assert!(is_valid_mobile("0123456789"));
        assert!(!is_valid_mobile("012345678"));
        assert!(!is_valid_mobile("01234567890"));
        assert!(!is_valid_mobile("01234a6789"));
    }

    #[test]
    fn card_number_is_sixteen_digits() {
        assert!(is_valid_card_number("4111111111111111"));
        assert!(is_valid_card_number("4111 1111 1111 1111"));
        assert!(!is_valid_card_number("411111111111111"));
        assert!(!is_valid_card_number("41111111111111112"));
        assert!(!is_valid_card_number("4111-1111-1111-1111"));
    }

    #[test]
    fn cvv_accepts_three_or_four_digits() {
        assert!(is_valid_cvv("123"));
        assert!(is_valid_cvv("1234"));
        assert!(!is_valid_cvv("12"));
        assert!(!is_valid_cvv("12a"));
    }

    #[test]
    fn expiry_checks_month_and_date() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert!(is_valid_expiry(10, 2026, today));
        assert!(is_valid_expiry(1, 2027, today));
        assert!(!is_valid_expiry(9, 2026, today));
        assert!(!is_valid_expiry(13, 2030, today));
        assert!(!is_valid_expiry(0, 2030, today));
    }

    #[test]
    fn last4_ignores_spacing() {
        assert_eq!(card_last4("4111 1111 1111 1234"), "1234");
        assert_eq!(card_last4("12"), "12");
    }

    #[test]
    fn rating_range() {
        assert!(is_valid_rating(1));
        assert!(is_valid_rating(5));
        assert!(!is_valid_rating(0));
        assert!(!is_valid_rating(6));
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert!(require_non_empty("shop_name", "  ").is_err());
        assert!(require_non_empty("shop_name", "Fixers").is_ok());
        assert!(require_positive_amount("price", 0).is_err());
    }
}
