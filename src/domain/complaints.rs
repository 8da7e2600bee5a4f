use uuid::Uuid;

pub const STATUS_OPEN: &str = "open";
pub const STATUS_RESOLVED: &str = "resolved";

/// Human-facing 4-digit reference; collisions are possible.
pub fn complaint_code() -> i32 {
    code_from_seed(Uuid::new_v4().as_u128())
}

fn code_from_seed(seed: u128) -> i32 {
    (seed % 9000) as i32 + 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_four_digits() {
        for _ in 0..200 {
            let code = complaint_code();
            assert!((1000..=9999).contains(&code), "code {code} out of range");
        }
    }

    #[test]
    fn seed_bounds() {
        assert_eq!(code_from_seed(0), 1000);
        assert_eq!(code_from_seed(8999), 9999);
        assert_eq!(code_from_seed(9000), 1000);
    }
}
