use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sellable pricing arrangement layered over room products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatePlan {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub name: String,
}

impl RatePlan {
    pub fn new(hotel_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            hotel_id,
            name: name.into(),
        }
    }
}

/// Association row between a room product and a rate plan. Occupancy rate
/// adjustments are keyed by its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomProductRatePlan {
    pub id: Uuid,
    pub room_product_id: Uuid,
    pub rate_plan_id: Uuid,
}

impl RoomProductRatePlan {
    pub fn new(room_product_id: Uuid, rate_plan_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            room_product_id,
            rate_plan_id,
        }
    }
}

/// One night's selling price for a room product under a rate plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NightlyPrice {
    pub date: NaiveDate,
    pub net_price: Decimal,
    pub gross_price: Decimal,
    /// Rate-plan discount or markup already folded into both prices; may be
    /// negative.
    pub rate_plan_adjustment: Option<Decimal>,
}

impl NightlyPrice {
    pub fn new(
        date: NaiveDate,
        net_price: Decimal,
        gross_price: Decimal,
        rate_plan_adjustment: Option<Decimal>,
    ) -> Self {
        Self {
            date,
            net_price,
            gross_price,
            rate_plan_adjustment,
        }
    }

    pub fn adjustment(&self) -> Decimal {
        self.rate_plan_adjustment.unwrap_or(Decimal::ZERO)
    }

    /// Gross price with the rate-plan adjustment backed out.
    pub fn gross_before_adjustment(&self) -> Decimal {
        self.gross_price - self.adjustment()
    }

    pub fn net_before_adjustment(&self) -> Decimal {
        self.net_price - self.adjustment()
    }
}

/// Default extra-occupancy rate of a room product. The platform provisions
/// counts 2 through 10; count 1 is never provisioned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyDefaultRate {
    pub room_product_id: Uuid,
    pub extra_guest_count: i32,
    pub rate: Decimal,
}

/// Date-specific override of a single extra-guest-count entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyRateAdjustment {
    pub room_product_rate_plan_id: Uuid,
    pub date: NaiveDate,
    pub extra_guest_count: i32,
    pub rate: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_prices_before_adjustment_back_out_the_adjustment() {
        let night = NightlyPrice::new(date(2025, 7, 1), dec!(90), dec!(100), Some(dec!(-10)));
        assert_eq!(night.gross_before_adjustment(), dec!(110));
        assert_eq!(night.net_before_adjustment(), dec!(100));
    }

    #[test]
    fn test_absent_adjustment_means_identical_prices() {
        let night = NightlyPrice::new(date(2025, 7, 1), dec!(90), dec!(100), None);
        assert_eq!(night.gross_before_adjustment(), night.gross_price);
        assert_eq!(night.net_before_adjustment(), night.net_price);
    }
}
