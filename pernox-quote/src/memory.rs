use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use pernox_catalog::{
    AgeCategory, Amenity, OccupancyDefaultRate, OccupancyRateAdjustment, RatePlanDailyService,
    RoomProduct, RoomProductExtra, RoomProductRatePlan, TaxAgeGroupOverride, TaxRule,
};
use pernox_core::{AmenityPricer, AmenityPricingRequest, PricedAmenity, ReferenceDataRepository};
use pernox_shared::StayRange;

/// Vector-backed reference data for tests and local wiring.
///
/// Scoping rules mirror the live repositories: rows tied to a hotel or room
/// product are filtered, hotel-wide tables are returned as stored.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReferenceData {
    pub tax_rules: Vec<TaxRule>,
    pub tax_age_group_overrides: Vec<TaxAgeGroupOverride>,
    pub age_categories: Vec<AgeCategory>,
    pub room_products: Vec<RoomProduct>,
    pub room_product_rate_plans: Vec<RoomProductRatePlan>,
    pub occupancy_default_rates: Vec<OccupancyDefaultRate>,
    pub occupancy_rate_adjustments: Vec<OccupancyRateAdjustment>,
    pub room_product_extras: Vec<RoomProductExtra>,
    pub rate_plan_daily_services: Vec<RatePlanDailyService>,
    pub amenities: Vec<Amenity>,
}

#[async_trait]
impl ReferenceDataRepository for InMemoryReferenceData {
    async fn tax_rules(
        &self,
        _hotel_id: Uuid,
    ) -> Result<Vec<TaxRule>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.tax_rules.clone())
    }

    async fn tax_age_group_overrides(
        &self,
        _hotel_id: Uuid,
    ) -> Result<Vec<TaxAgeGroupOverride>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.tax_age_group_overrides.clone())
    }

    async fn age_categories(
        &self,
        _hotel_id: Uuid,
    ) -> Result<Vec<AgeCategory>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.age_categories.clone())
    }

    async fn room_products(
        &self,
        hotel_id: Uuid,
        room_product_ids: &[Uuid],
    ) -> Result<Vec<RoomProduct>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .room_products
            .iter()
            .filter(|room| room.hotel_id == hotel_id && room_product_ids.contains(&room.id))
            .cloned()
            .collect())
    }

    async fn room_product_rate_plans(
        &self,
        _hotel_id: Uuid,
    ) -> Result<Vec<RoomProductRatePlan>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.room_product_rate_plans.clone())
    }

    async fn occupancy_default_rates(
        &self,
        room_product_ids: &[Uuid],
    ) -> Result<Vec<OccupancyDefaultRate>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .occupancy_default_rates
            .iter()
            .filter(|row| room_product_ids.contains(&row.room_product_id))
            .cloned()
            .collect())
    }

    async fn occupancy_rate_adjustments(
        &self,
        _hotel_id: Uuid,
        stay: &StayRange,
    ) -> Result<Vec<OccupancyRateAdjustment>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .occupancy_rate_adjustments
            .iter()
            .filter(|row| stay.contains(row.date))
            .cloned()
            .collect())
    }

    async fn room_product_extras(
        &self,
        room_product_ids: &[Uuid],
    ) -> Result<Vec<RoomProductExtra>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .room_product_extras
            .iter()
            .filter(|row| room_product_ids.contains(&row.room_product_id))
            .cloned()
            .collect())
    }

    async fn rate_plan_daily_services(
        &self,
        rate_plan_ids: &[Uuid],
        stay: &StayRange,
    ) -> Result<Vec<RatePlanDailyService>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .rate_plan_daily_services
            .iter()
            .filter(|row| rate_plan_ids.contains(&row.rate_plan_id) && stay.contains(row.date))
            .cloned()
            .collect())
    }

    async fn amenities(
        &self,
        hotel_id: Uuid,
    ) -> Result<Vec<Amenity>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .amenities
            .iter()
            .filter(|amenity| amenity.hotel_id == hotel_id)
            .cloned()
            .collect())
    }
}

/// Prices every ordered amenity at one flat unit rate, tax free. Stands in
/// for the amenity pricing service in tests and local environments.
#[derive(Debug, Clone)]
pub struct FixedRateAmenityPricer {
    pub unit_rate: Decimal,
}

impl FixedRateAmenityPricer {
    pub fn new(unit_rate: Decimal) -> Self {
        Self { unit_rate }
    }
}

#[async_trait]
impl AmenityPricer for FixedRateAmenityPricer {
    async fn price_amenities(
        &self,
        request: AmenityPricingRequest,
    ) -> Result<Vec<PricedAmenity>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(request
            .orders
            .iter()
            .map(|order| {
                let base = self.unit_rate * Decimal::from(order.count);
                PricedAmenity {
                    amenity_id: order.amenity_id,
                    base_amount: base,
                    gross_amount: base,
                    tax_amount: Decimal::ZERO,
                }
            })
            .collect())
    }
}
