use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::amenity::ExtraBedRates;

/// Physical capacity limits of a room product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCapacity {
    pub capacity_default: i32,
    pub maximum_adult: i32,
    pub maximum_child: i32,
    /// Configured extra-bed headroom; carried for completeness, allocation
    /// does not read it.
    pub capacity_extra: i32,
    pub maximum_pet: i32,
}

/// A sellable room type with its capacity and extra-bed rate card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomProduct {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub name: String,
    pub capacity: RoomCapacity,
    pub extra_beds: ExtraBedRates,
}

impl RoomProduct {
    pub fn new(
        hotel_id: Uuid,
        name: impl Into<String>,
        capacity: RoomCapacity,
        extra_beds: ExtraBedRates,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            hotel_id,
            name: name.into(),
            capacity,
            extra_beds,
        }
    }
}
