pub mod guests;
pub mod rounding;
pub mod stay;

pub use guests::GuestMix;
pub use rounding::{RoundingMode, RoundingPolicy};
pub use stay::{StayRange, StayRangeError};
