pub mod config;
pub mod memory;
pub mod models;
pub mod orchestrator;

pub use config::{QuoteConfig, DEFAULT_BATCH_SIZE};
pub use memory::{FixedRateAmenityPricer, InMemoryReferenceData};
pub use models::{
    DatePricing, QuoteFlags, QuotePhase, QuoteRequest, QuoteResult, QuoteTotals,
    RoomProductDailyPrices, RoomProductExtraBed,
};
pub use orchestrator::{QuoteError, QuoteOrchestrator};
