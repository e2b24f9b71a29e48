use async_trait::async_trait;
use uuid::Uuid;

use pernox_catalog::{
    AgeCategory, Amenity, OccupancyDefaultRate, OccupancyRateAdjustment, RatePlanDailyService,
    RoomProduct, RoomProductExtra, RoomProductRatePlan, TaxAgeGroupOverride, TaxRule,
};
use pernox_shared::StayRange;

/// Repository trait for pricing reference data access.
///
/// Implementations load configuration maintained elsewhere in the platform
/// (tax setup, occupancy rates, room amenity links) and never mutate it.
#[async_trait]
pub trait ReferenceDataRepository: Send + Sync {
    /// City tax rules configured for the hotel.
    async fn tax_rules(
        &self,
        hotel_id: Uuid,
    ) -> Result<Vec<TaxRule>, Box<dyn std::error::Error + Send + Sync>>;

    /// Age-based rate overrides for the hotel's tax rules.
    async fn tax_age_group_overrides(
        &self,
        hotel_id: Uuid,
    ) -> Result<Vec<TaxAgeGroupOverride>, Box<dyn std::error::Error + Send + Sync>>;

    /// Guest age categories configured for the hotel.
    async fn age_categories(
        &self,
        hotel_id: Uuid,
    ) -> Result<Vec<AgeCategory>, Box<dyn std::error::Error + Send + Sync>>;

    /// Room products by id, including capacity and extra-bed rate setup.
    async fn room_products(
        &self,
        hotel_id: Uuid,
        room_product_ids: &[Uuid],
    ) -> Result<Vec<RoomProduct>, Box<dyn std::error::Error + Send + Sync>>;

    /// Associations between the hotel's room products and rate plans.
    async fn room_product_rate_plans(
        &self,
        hotel_id: Uuid,
    ) -> Result<Vec<RoomProductRatePlan>, Box<dyn std::error::Error + Send + Sync>>;

    /// Default per-guest occupancy rates for the given room products.
    async fn occupancy_default_rates(
        &self,
        room_product_ids: &[Uuid],
    ) -> Result<Vec<OccupancyDefaultRate>, Box<dyn std::error::Error + Send + Sync>>;

    /// Date-specific occupancy rate adjustments overlapping the stay.
    async fn occupancy_rate_adjustments(
        &self,
        hotel_id: Uuid,
        stay: &StayRange,
    ) -> Result<Vec<OccupancyRateAdjustment>, Box<dyn std::error::Error + Send + Sync>>;

    /// Amenities bundled with the given room products.
    async fn room_product_extras(
        &self,
        room_product_ids: &[Uuid],
    ) -> Result<Vec<RoomProductExtra>, Box<dyn std::error::Error + Send + Sync>>;

    /// Dated services attached to the given rate plans within the stay.
    async fn rate_plan_daily_services(
        &self,
        rate_plan_ids: &[Uuid],
        stay: &StayRange,
    ) -> Result<Vec<RatePlanDailyService>, Box<dyn std::error::Error + Send + Sync>>;

    /// All amenities defined for the hotel.
    async fn amenities(
        &self,
        hotel_id: Uuid,
    ) -> Result<Vec<Amenity>, Box<dyn std::error::Error + Send + Sync>>;
}
