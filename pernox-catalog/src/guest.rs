use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Code of the catch-all age category. Never eligible for occupancy
/// surcharges regardless of its flags.
pub const DEFAULT_AGE_CATEGORY: &str = "DEFAULT";

/// Hotel-level guest age classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeCategory {
    pub id: Uuid,
    pub code: String,
    /// Inclusive; an absent bound defaults to 0 below and 999 above.
    pub from_age: Option<i32>,
    pub to_age: Option<i32>,
    /// Whether guests in this category count toward extra-occupancy rates.
    pub include_extra_occupancy_rate: bool,
}

impl AgeCategory {
    pub fn new(
        code: impl Into<String>,
        from_age: Option<i32>,
        to_age: Option<i32>,
        include_extra_occupancy_rate: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            from_age,
            to_age,
            include_extra_occupancy_rate,
        }
    }

    pub fn covers_age(&self, age: i32) -> bool {
        age >= self.from_age.unwrap_or(0) && age <= self.to_age.unwrap_or(999)
    }

    pub fn is_default(&self) -> bool {
        self.code == DEFAULT_AGE_CATEGORY
    }
}
