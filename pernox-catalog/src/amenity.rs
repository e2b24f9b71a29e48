use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::guest::DEFAULT_AGE_CATEGORY;

/// What an amenity charges for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmenityKind {
    ExtraBedAdult,
    ExtraBedChild,
    Pet,
    Service,
}

/// Hotel amenity catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Amenity {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub name: String,
    pub kind: AmenityKind,
}

impl Amenity {
    pub fn new(hotel_id: Uuid, name: impl Into<String>, kind: AmenityKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            hotel_id,
            name: name.into(),
            kind,
        }
    }
}

/// Extra-bed price card of a room product, derived from its bed amenities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtraBedRates {
    pub adult_rate: Decimal,
    pub child_brackets: Vec<ChildRateBracket>,
}

/// Age-banded child extra-bed rate. `from_age` is inclusive, `to_age`
/// exclusive, unlike the inclusive tax overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildRateBracket {
    pub category_code: String,
    pub from_age: i32,
    pub to_age: i32,
    pub rate: Decimal,
}

impl ChildRateBracket {
    pub fn new(
        category_code: impl Into<String>,
        from_age: i32,
        to_age: i32,
        rate: Decimal,
    ) -> Self {
        Self {
            category_code: category_code.into(),
            from_age,
            to_age,
            rate,
        }
    }

    pub fn is_default(&self) -> bool {
        self.category_code == DEFAULT_AGE_CATEGORY
    }

    /// Specific-bracket match; the DEFAULT bracket only applies as fallback.
    pub fn matches_age(&self, age: i32) -> bool {
        !self.is_default() && self.from_age <= age && age < self.to_age
    }
}

/// Amenity included with a room product on every night it is sold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomProductExtra {
    pub room_product_id: Uuid,
    pub amenity_id: Uuid,
}

/// Amenity a rate plan includes on one specific night.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatePlanDailyService {
    pub rate_plan_id: Uuid,
    pub date: NaiveDate,
    pub amenity_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bracket_upper_bound_is_exclusive() {
        let bracket = ChildRateBracket::new("CHILD", 3, 12, dec!(15));
        assert!(bracket.matches_age(3));
        assert!(bracket.matches_age(11));
        assert!(!bracket.matches_age(12));
    }

    #[test]
    fn test_default_bracket_never_matches_directly() {
        let bracket = ChildRateBracket::new(DEFAULT_AGE_CATEGORY, 0, 999, dec!(10));
        assert!(bracket.is_default());
        assert!(!bracket.matches_age(5));
    }
}
