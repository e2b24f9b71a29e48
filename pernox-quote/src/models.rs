use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pernox_catalog::NightlyPrice;
use pernox_core::PricedAmenity;
use pernox_pricing::{CityTaxBreakdown, ExtraBedCharge, OccupancySurcharge};
use pernox_shared::{GuestMix, RoundingPolicy, StayRange};

/// Calculation phase, logged as the orchestrator advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuotePhase {
    Idle,
    FetchingReferenceData,
    ComputingExtraBeds,
    ProcessingBatches,
    Aggregated,
}

impl fmt::Display for QuotePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuotePhase::Idle => "IDLE",
            QuotePhase::FetchingReferenceData => "FETCHING_REFERENCE_DATA",
            QuotePhase::ComputingExtraBeds => "COMPUTING_EXTRA_BEDS",
            QuotePhase::ProcessingBatches => "PROCESSING_BATCHES",
            QuotePhase::Aggregated => "AGGREGATED",
        };
        write!(f, "{}", name)
    }
}

/// Which charge groups the caller wants computed. All of them by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteFlags {
    #[serde(default = "default_include")]
    pub include_city_tax: bool,
    #[serde(default = "default_include")]
    pub include_occupancy_surcharge: bool,
    #[serde(default = "default_include")]
    pub include_extra_bed: bool,
    #[serde(default = "default_include")]
    pub include_service: bool,
}

fn default_include() -> bool {
    true
}

impl Default for QuoteFlags {
    fn default() -> Self {
        Self {
            include_city_tax: true,
            include_occupancy_surcharge: true,
            include_extra_bed: true,
            include_service: true,
        }
    }
}

/// Nightly selling prices for one (room product, rate plan) combination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomProductDailyPrices {
    pub room_product_id: Uuid,
    pub rate_plan_id: Uuid,
    pub nights: Vec<NightlyPrice>,
}

/// One batch pricing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub hotel_id: Uuid,
    pub stay: StayRange,
    pub guests: GuestMix,
    /// Room count the per-room tax units scale by.
    #[serde(default = "default_rooms")]
    pub rooms: i32,
    #[serde(default)]
    pub rounding: RoundingPolicy,
    pub room_product_prices: Vec<RoomProductDailyPrices>,
    #[serde(default)]
    pub flags: QuoteFlags,
    /// Overrides the orchestrator's configured batch size when set.
    #[serde(default)]
    pub batch_size: Option<usize>,
}

fn default_rooms() -> i32 {
    1
}

/// All charges computed for one (date, room product, rate plan) item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatePricing {
    pub date: NaiveDate,
    pub room_product_id: Uuid,
    pub rate_plan_id: Uuid,
    pub city_tax_breakdown: Vec<CityTaxBreakdown>,
    pub city_tax_amount: Decimal,
    pub city_tax_amount_before_adjustment: Decimal,
    pub occupancy_surcharge: Decimal,
    pub extra_bed_amount: Decimal,
    pub amenities: Vec<PricedAmenity>,
}

/// Extra-bed pricing for one room product, uniform across the stay's dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomProductExtraBed {
    pub room_product_id: Uuid,
    pub charge: ExtraBedCharge,
}

/// Running totals across the whole work list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteTotals {
    pub city_tax: Decimal,
    pub city_tax_before_adjustment: Decimal,
    pub extra_bed: Decimal,
}

/// Aggregated outcome of a batch pricing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub per_date_pricing: Vec<DatePricing>,
    pub occupancy_surcharges: Vec<OccupancySurcharge>,
    pub extra_beds: Vec<RoomProductExtraBed>,
    pub totals: QuoteTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_names_match_wire_codes() {
        assert_eq!(
            QuotePhase::FetchingReferenceData.to_string(),
            "FETCHING_REFERENCE_DATA"
        );
        assert_eq!(
            serde_json::to_string(&QuotePhase::ProcessingBatches).unwrap(),
            "\"PROCESSING_BATCHES\""
        );
    }

    #[test]
    fn test_missing_flags_default_to_all_inclusive() {
        let flags: QuoteFlags = serde_json::from_str("{}").unwrap();
        assert!(flags.include_city_tax);
        assert!(flags.include_occupancy_surcharge);
        assert!(flags.include_extra_bed);
        assert!(flags.include_service);
    }
}
