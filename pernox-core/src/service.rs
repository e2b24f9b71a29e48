use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pernox_shared::{GuestMix, RoundingPolicy, StayRange};

/// One amenity to price, with the requested unit count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmenityOrder {
    pub amenity_id: Uuid,
    pub count: i32,
}

/// Inputs for a single amenity pricing call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmenityPricingRequest {
    pub hotel_id: Uuid,
    pub stay: StayRange,
    pub guests: GuestMix,
    pub rounding: RoundingPolicy,
    pub orders: Vec<AmenityOrder>,
}

/// A priced amenity line as returned by the pricing service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedAmenity {
    pub amenity_id: Uuid,
    pub base_amount: Decimal,
    pub gross_amount: Decimal,
    pub tax_amount: Decimal,
}

/// Adapter trait for the amenity pricing service.
///
/// Callers treat the service as a black box and propagate its failures
/// without retrying.
#[async_trait]
pub trait AmenityPricer: Send + Sync {
    /// Price the ordered amenities for the given stay and guest mix.
    async fn price_amenities(
        &self,
        request: AmenityPricingRequest,
    ) -> Result<Vec<PricedAmenity>, Box<dyn std::error::Error + Send + Sync>>;
}
