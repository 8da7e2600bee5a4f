pub const MIN_QUANTITY: i32 = 1;
pub const MAX_QUANTITY: i32 = 5;

pub fn clamp_quantity(quantity: i32) -> i32 {
    quantity.clamp(MIN_QUANTITY, MAX_QUANTITY)
}

pub fn line_total(unit_price: i64, quantity: i32) -> i64 {
    unit_price * i64::from(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_into_range() {
        assert_eq!(clamp_quantity(0), 1);
        assert_eq!(clamp_quantity(-3), 1);
        assert_eq!(clamp_quantity(3), 3);
        assert_eq!(clamp_quantity(6), 5);
    }

    #[test]
    fn line_total_multiplies() {
        assert_eq!(line_total(1250, 3), 3750);
    }
}
