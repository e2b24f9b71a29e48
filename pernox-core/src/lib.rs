pub mod repository;
pub mod service;

pub use repository::ReferenceDataRepository;
pub use service::{AmenityOrder, AmenityPricer, AmenityPricingRequest, PricedAmenity};
