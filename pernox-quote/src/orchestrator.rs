use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;

use chrono::NaiveDate;
use futures_util::future::try_join_all;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use pernox_catalog::{AmenityKind, NightlyPrice, RoomProduct};
use pernox_core::{AmenityOrder, AmenityPricer, AmenityPricingRequest, ReferenceDataRepository};
use pernox_pricing::{
    allocate_capacity, group_breakdown, price_extra_beds, CityTaxEngine, CountOnceTracker,
    OccupancyEngine, TaxContext,
};
use pernox_shared::StayRange;

use crate::config::QuoteConfig;
use crate::models::{
    DatePricing, QuotePhase, QuoteRequest, QuoteResult, QuoteTotals, RoomProductExtraBed,
};

/// Fans the pricing calculators out across every (room product, rate plan,
/// date) combination under a bounded concurrency cap.
pub struct QuoteOrchestrator {
    repository: Arc<dyn ReferenceDataRepository>,
    amenity_pricer: Arc<dyn AmenityPricer>,
    config: QuoteConfig,
}

/// One unit of batch work: a nightly price row with its owning ids.
struct WorkItem {
    room_product_id: Uuid,
    rate_plan_id: Uuid,
    night: NightlyPrice,
}

/// Read-only tables shared by every work item of one calculation.
struct PricingTables {
    tax_engine: CityTaxEngine,
    tax_ctx: TaxContext,
    surcharge_index: HashMap<(Uuid, Uuid, NaiveDate), Decimal>,
    extra_bed_by_room: HashMap<Uuid, Decimal>,
    extras_by_room: HashMap<Uuid, Vec<Uuid>>,
    services_by_plan_date: HashMap<(Uuid, NaiveDate), Vec<Uuid>>,
}

impl QuoteOrchestrator {
    pub fn new(
        repository: Arc<dyn ReferenceDataRepository>,
        amenity_pricer: Arc<dyn AmenityPricer>,
    ) -> Self {
        Self::with_config(repository, amenity_pricer, QuoteConfig::default())
    }

    pub fn with_config(
        repository: Arc<dyn ReferenceDataRepository>,
        amenity_pricer: Arc<dyn AmenityPricer>,
        config: QuoteConfig,
    ) -> Self {
        Self {
            repository,
            amenity_pricer,
            config,
        }
    }

    /// Run the full batch pricing calculation for one request.
    ///
    /// Any reference-data or amenity-pricing failure aborts the whole run;
    /// there are no retries and no partial results.
    pub async fn calculate(&self, request: QuoteRequest) -> Result<QuoteResult, QuoteError> {
        info!(
            "Quote [{}] {}: validating request",
            request.hotel_id,
            QuotePhase::Idle
        );
        request
            .stay
            .validate()
            .map_err(|e| QuoteError::Validation(e.to_string()))?;
        let batch_size = request.batch_size.unwrap_or(self.config.batch_size);
        if batch_size == 0 {
            return Err(QuoteError::Validation(
                "batch_size must be at least 1".to_string(),
            ));
        }

        // 1. Distinct room products and rate plans referenced by the rows.
        let room_product_ids = distinct(
            request
                .room_product_prices
                .iter()
                .map(|group| group.room_product_id),
        );
        let rate_plan_ids = distinct(
            request
                .room_product_prices
                .iter()
                .map(|group| group.rate_plan_id),
        );

        // 2. Fetch every reference table concurrently, exactly once per run.
        info!(
            "Quote [{}] moving to {}",
            request.hotel_id,
            QuotePhase::FetchingReferenceData
        );
        let (
            tax_rules,
            tax_overrides,
            age_categories,
            room_products,
            associations,
            occupancy_defaults,
            occupancy_adjustments,
            room_extras,
            daily_services,
            amenities,
        ) = tokio::try_join!(
            self.repository.tax_rules(request.hotel_id),
            self.repository.tax_age_group_overrides(request.hotel_id),
            self.repository.age_categories(request.hotel_id),
            self.repository.room_products(request.hotel_id, &room_product_ids),
            self.repository.room_product_rate_plans(request.hotel_id),
            self.repository.occupancy_default_rates(&room_product_ids),
            self.repository
                .occupancy_rate_adjustments(request.hotel_id, &request.stay),
            self.repository.room_product_extras(&room_product_ids),
            self.repository
                .rate_plan_daily_services(&rate_plan_ids, &request.stay),
            self.repository.amenities(request.hotel_id),
        )
        .map_err(QuoteError::Repository)?;

        let tax_engine = CityTaxEngine::new(tax_rules, tax_overrides);
        let occupancy_engine = OccupancyEngine::new(
            age_categories,
            occupancy_defaults,
            occupancy_adjustments,
            &associations,
        );

        let pairs = distinct(
            request
                .room_product_prices
                .iter()
                .map(|group| (group.room_product_id, group.rate_plan_id)),
        );
        let occupancy_surcharges = if request.flags.include_occupancy_surcharge {
            occupancy_engine.surcharges(&pairs, &request.stay, &request.guests)
        } else {
            Vec::new()
        };
        let surcharge_index: HashMap<(Uuid, Uuid, NaiveDate), Decimal> = occupancy_surcharges
            .iter()
            .map(|s| ((s.room_product_id, s.rate_plan_id, s.date), s.amount))
            .collect();

        // 3. Extra beds are priced once per room product; the amount applies
        //    uniformly to every date of that room product.
        info!(
            "Quote [{}] moving to {}: {} room products",
            request.hotel_id,
            QuotePhase::ComputingExtraBeds,
            room_products.len()
        );
        let mut extra_beds = Vec::new();
        let mut extra_bed_by_room: HashMap<Uuid, Decimal> = HashMap::new();
        if request.flags.include_extra_bed {
            let pet_amenity_in_catalog = amenities
                .iter()
                .any(|amenity| amenity.kind == AmenityKind::Pet);
            let rooms_by_id: HashMap<Uuid, &RoomProduct> =
                room_products.iter().map(|room| (room.id, room)).collect();
            for room_product_id in &room_product_ids {
                if let Some(room) = rooms_by_id.get(room_product_id) {
                    let allocation = allocate_capacity(
                        &room.capacity,
                        request.guests.adults,
                        request.guests.children(),
                        request.guests.pets,
                    );
                    let charge = price_extra_beds(
                        allocation,
                        &room.extra_beds,
                        &request.guests.children_ages,
                        pet_amenity_in_catalog,
                    );
                    extra_bed_by_room.insert(*room_product_id, charge.total_amount);
                    extra_beds.push(RoomProductExtraBed {
                        room_product_id: *room_product_id,
                        charge,
                    });
                }
            }
        }

        let mut extras_by_room: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for extra in &room_extras {
            extras_by_room
                .entry(extra.room_product_id)
                .or_default()
                .push(extra.amenity_id);
        }
        let mut services_by_plan_date: HashMap<(Uuid, NaiveDate), Vec<Uuid>> = HashMap::new();
        for service in &daily_services {
            services_by_plan_date
                .entry((service.rate_plan_id, service.date))
                .or_default()
                .push(service.amenity_id);
        }

        let tables = PricingTables {
            tax_engine,
            tax_ctx: TaxContext {
                total_rooms: request.rooms,
                adults: request.guests.adults,
                children_ages: request.guests.children_ages.clone(),
                rounding: request.rounding,
            },
            surcharge_index,
            extra_bed_by_room,
            extras_by_room,
            services_by_plan_date,
        };

        // 4. Flatten the work list.
        let mut work = Vec::new();
        for group in &request.room_product_prices {
            for night in &group.nights {
                work.push(WorkItem {
                    room_product_id: group.room_product_id,
                    rate_plan_id: group.rate_plan_id,
                    night: night.clone(),
                });
            }
        }

        // 5. Sequential batches; items inside a batch run concurrently. The
        //    next batch starts only after the previous one fully drains.
        info!(
            "Quote [{}] moving to {}: {} items in batches of {}",
            request.hotel_id,
            QuotePhase::ProcessingBatches,
            work.len(),
            batch_size
        );
        let mut per_date_pricing = Vec::with_capacity(work.len());
        for batch in work.chunks(batch_size) {
            let priced = try_join_all(
                batch
                    .iter()
                    .map(|item| self.price_item(&request, &tables, item)),
            )
            .await?;
            per_date_pricing.extend(priced);
        }

        // 7. Running totals; the extra-bed total sums across room products,
        //    independent of how many dates each one covers.
        let mut totals = QuoteTotals::default();
        for row in &per_date_pricing {
            totals.city_tax += row.city_tax_amount;
            totals.city_tax_before_adjustment += row.city_tax_amount_before_adjustment;
        }
        totals.extra_bed = extra_beds.iter().map(|bed| bed.charge.total_amount).sum();

        info!(
            "Quote [{}] {}: {} per-date rows",
            request.hotel_id,
            QuotePhase::Aggregated,
            per_date_pricing.len()
        );
        Ok(QuoteResult {
            per_date_pricing,
            occupancy_surcharges,
            extra_beds,
            totals,
        })
    }

    // 6. One work item: surcharge lookup, single-date city tax with a fresh
    //    tracker, and delegated amenity pricing for that date.
    async fn price_item(
        &self,
        request: &QuoteRequest,
        tables: &PricingTables,
        item: &WorkItem,
    ) -> Result<DatePricing, QuoteError> {
        let date = item.night.date;

        let occupancy_surcharge = tables
            .surcharge_index
            .get(&(item.room_product_id, item.rate_plan_id, date))
            .copied()
            .unwrap_or(Decimal::ZERO);

        let (city_tax_breakdown, city_tax_amount, city_tax_amount_before_adjustment) =
            if request.flags.include_city_tax {
                let mut tracker = CountOnceTracker::new();
                let charges = tables.tax_engine.charges_for_range(
                    &tables.tax_ctx,
                    &item.night,
                    date,
                    date,
                    &mut tracker,
                );
                let breakdown = group_breakdown(charges);
                let after: Decimal = breakdown.iter().map(|row| row.tax_amount).sum();
                let before: Decimal = breakdown
                    .iter()
                    .map(|row| row.tax_amount_before_adjustment)
                    .sum();
                (breakdown, after, before)
            } else {
                (Vec::new(), Decimal::ZERO, Decimal::ZERO)
            };

        let amenities = if request.flags.include_service {
            let room_ids = tables
                .extras_by_room
                .get(&item.room_product_id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let plan_ids = tables
                .services_by_plan_date
                .get(&(item.rate_plan_id, date))
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let amenity_ids = distinct(room_ids.iter().chain(plan_ids).copied());
            if amenity_ids.is_empty() {
                Vec::new()
            } else {
                let orders = amenity_ids
                    .into_iter()
                    .map(|amenity_id| AmenityOrder {
                        amenity_id,
                        count: 1,
                    })
                    .collect();
                self.amenity_pricer
                    .price_amenities(AmenityPricingRequest {
                        hotel_id: request.hotel_id,
                        stay: StayRange::single_night(date),
                        guests: request.guests.clone(),
                        rounding: request.rounding,
                        orders,
                    })
                    .await
                    .map_err(QuoteError::ServicePricing)?
            }
        } else {
            Vec::new()
        };

        Ok(DatePricing {
            date,
            room_product_id: item.room_product_id,
            rate_plan_id: item.rate_plan_id,
            city_tax_breakdown,
            city_tax_amount,
            city_tax_amount_before_adjustment,
            occupancy_surcharge,
            extra_bed_amount: tables
                .extra_bed_by_room
                .get(&item.room_product_id)
                .copied()
                .unwrap_or(Decimal::ZERO),
            amenities,
        })
    }
}

/// First-seen order, duplicates dropped.
fn distinct<T>(items: impl IntoIterator<Item = T>) -> Vec<T>
where
    T: Copy + Eq + Hash,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(*item)).collect()
}

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("Invalid quote request: {0}")]
    Validation(String),

    #[error("Reference data fetch failed: {0}")]
    Repository(Box<dyn std::error::Error + Send + Sync>),

    #[error("Amenity pricing failed: {0}")]
    ServicePricing(Box<dyn std::error::Error + Send + Sync>),
}
