//! Order id generators.
//!
//! - `TimestampOrderIdGenerator` - `ORDER-{unix_millis}-{0..1_000_000}`, readable
//!   in gateway dashboards
//! - `UuidOrderIdGenerator` - `ORDER-{uuid v4}`, unguessable

use rand::Rng;
use uuid::Uuid;

use crate::domain::foundation::{OrderId, Timestamp};
use crate::ports::OrderIdGenerator;

const ORDER_PREFIX: &str = "ORDER";
const RANDOM_SUFFIX_BOUND: u32 = 1_000_000;

/// Time-prefixed ids with a random suffix.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimestampOrderIdGenerator;

impl TimestampOrderIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl OrderIdGenerator for TimestampOrderIdGenerator {
    fn next_id(&self) -> OrderId {
        let millis = Timestamp::now().as_unix_millis();
        let suffix = rand::thread_rng().gen_range(0..RANDOM_SUFFIX_BOUND);
        OrderId::from_generated(format!("{}-{}-{}", ORDER_PREFIX, millis, suffix))
    }
}

/// Random v4 UUID ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidOrderIdGenerator;

impl UuidOrderIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl OrderIdGenerator for UuidOrderIdGenerator {
    fn next_id(&self) -> OrderId {
        OrderId::from_generated(format!("{}-{}", ORDER_PREFIX, Uuid::new_v4()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn timestamp_ids_have_expected_shape() {
        let id = TimestampOrderIdGenerator::new().next_id();
        let parts: Vec<&str> = id.as_str().split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ORDER");
        assert!(parts[1].parse::<i64>().unwrap() > 0);
        assert!(parts[2].parse::<u32>().unwrap() < RANDOM_SUFFIX_BOUND);
    }

    #[test]
    fn timestamp_ids_are_mostly_unique_in_a_burst() {
        let generator = TimestampOrderIdGenerator::new();
        let ids: HashSet<OrderId> = (0..100).map(|_| generator.next_id()).collect();
        // Same-millisecond collisions need equal random suffixes.
        assert!(ids.len() >= 99);
    }

    #[test]
    fn uuid_ids_are_unique() {
        let generator = UuidOrderIdGenerator::new();
        let ids: HashSet<OrderId> = (0..1000).map(|_| generator.next_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn uuid_ids_carry_prefix() {
        let id = UuidOrderIdGenerator::new().next_id();
        assert!(id.as_str().starts_with("ORDER-"));
        assert!(Uuid::parse_str(&id.as_str()["ORDER-".len()..]).is_ok());
    }
}
