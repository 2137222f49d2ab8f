//! Human-readable order numbers: `ORD-<epoch-millis>-<3 digits>`.
//!
//! Uniqueness is probabilistic. Two orders created in the same millisecond
//! collide with probability 1/1000; the database's UNIQUE constraint turns a
//! collision into a failed (rolled back) request.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Prefix of every order number.
pub const ORDER_NUMBER_PREFIX: &str = "ORD";

/// Generates an order number for `now`.
pub fn generate_order_number(now: DateTime<Utc>) -> String {
    let suffix: u16 = rand::thread_rng().gen_range(0..1000);
    format_order_number(now.timestamp_millis(), suffix)
}

fn format_order_number(millis: i64, suffix: u16) -> String {
    format!("{}-{}-{:03}", ORDER_NUMBER_PREFIX, millis, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_suffix() {
        assert_eq!(format_order_number(1_700_000_000_123, 7), "ORD-1700000000123-007");
        assert_eq!(format_order_number(1_700_000_000_123, 999), "ORD-1700000000123-999");
    }

    #[test]
    fn test_generated_number_shape() {
        let now = Utc::now();
        let number = generate_order_number(now);
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ORD");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 3);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
    }
}
