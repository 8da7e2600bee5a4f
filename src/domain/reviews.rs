use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct RatingSummary {
    pub count: i64,
    pub average: f64,
}

/// Average rounded to one decimal place; no ratings yields `0.0`.
pub fn summarize_ratings(ratings: &[i16]) -> RatingSummary {
    if ratings.is_empty() {
        return RatingSummary {
            count: 0,
            average: 0.0,
        };
    }
    let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
    let count = ratings.len() as i64;
    let average = (sum as f64 / count as f64 * 10.0).round() / 10.0;
    RatingSummary { count, average }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_zero_average() {
        let summary = summarize_ratings(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average, 0.0);
    }

    #[test]
    fn rounds_to_one_decimal() {
        let summary = summarize_ratings(&[5, 4, 4]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average, 4.3);
    }

    #[test]
    fn single_rating() {
        assert_eq!(summarize_ratings(&[2]).average, 2.0);
    }
}
