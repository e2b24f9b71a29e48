pub mod capacity;
pub mod city_tax;
pub mod occupancy;

pub use capacity::{allocate_capacity, price_extra_beds, CapacityAllocation, ExtraBedCharge};
pub use city_tax::{
    group_breakdown, unit_tax_amount, BookingTaxRequest, CityTaxBreakdown, CityTaxEngine,
    CityTaxSummary, CountOnceTracker, RuleCharge, TaxContext,
};
pub use occupancy::{eligible_guest_count, OccupancyEngine, OccupancySurcharge};
