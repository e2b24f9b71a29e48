pub mod amenity;
pub mod guest;
pub mod rates;
pub mod room;
pub mod tax;

pub use amenity::{
    Amenity, AmenityKind, ChildRateBracket, ExtraBedRates, RatePlanDailyService, RoomProductExtra,
};
pub use guest::{AgeCategory, DEFAULT_AGE_CATEGORY};
pub use rates::{
    NightlyPrice, OccupancyDefaultRate, OccupancyRateAdjustment, RatePlan, RoomProductRatePlan,
};
pub use room::{RoomCapacity, RoomProduct};
pub use tax::{TaxAgeGroupOverride, TaxRule, TaxUnit};
