use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pernox_catalog::{
    AgeCategory, OccupancyDefaultRate, OccupancyRateAdjustment, RoomProductRatePlan,
};
use pernox_shared::{GuestMix, StayRange};

/// One surcharge record. Emitted for every (pair, night), zero or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancySurcharge {
    pub room_product_id: Uuid,
    pub rate_plan_id: Uuid,
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Guests counted toward extra-occupancy rates: every adult plus each child
/// covered by a non-DEFAULT category that opts into the surcharge.
pub fn eligible_guest_count(adults: i32, children_ages: &[i32], categories: &[AgeCategory]) -> i32 {
    let eligible_children = children_ages
        .iter()
        .filter(|&&age| {
            categories.iter().any(|category| {
                !category.is_default()
                    && category.include_extra_occupancy_rate
                    && category.covers_age(age)
            })
        })
        .count();
    adults + eligible_children as i32
}

/// Rate tables rebuilt once per calculation for constant-time nightly lookups.
struct OccupancyRateIndex {
    /// (room product, extra guest count) -> default rate.
    defaults: HashMap<(Uuid, i32), Decimal>,
    /// (association id, date, extra guest count) -> adjusted rate.
    adjusted: HashMap<(Uuid, NaiveDate, i32), Decimal>,
    /// (room product, rate plan) -> association id.
    pair_ids: HashMap<(Uuid, Uuid), Uuid>,
}

/// Extra-occupancy surcharge engine.
pub struct OccupancyEngine {
    categories: Vec<AgeCategory>,
    index: OccupancyRateIndex,
}

impl OccupancyEngine {
    pub fn new(
        categories: Vec<AgeCategory>,
        defaults: Vec<OccupancyDefaultRate>,
        adjustments: Vec<OccupancyRateAdjustment>,
        associations: &[RoomProductRatePlan],
    ) -> Self {
        let pair_ids = associations
            .iter()
            .map(|a| ((a.room_product_id, a.rate_plan_id), a.id))
            .collect();
        let defaults = defaults
            .into_iter()
            .map(|row| ((row.room_product_id, row.extra_guest_count), row.rate))
            .collect();
        let adjusted = adjustments
            .into_iter()
            .map(|row| {
                (
                    (row.room_product_rate_plan_id, row.date, row.extra_guest_count),
                    row.rate,
                )
            })
            .collect();
        Self {
            categories,
            index: OccupancyRateIndex {
                defaults,
                adjusted,
                pair_ids,
            },
        }
    }

    pub fn eligible_guest_count(&self, guests: &GuestMix) -> i32 {
        eligible_guest_count(guests.adults, &guests.children_ages, &self.categories)
    }

    /// One record per (pair, night of stay). A party of one eligible guest
    /// (or none) surcharges zero everywhere.
    pub fn surcharges(
        &self,
        pairs: &[(Uuid, Uuid)],
        stay: &StayRange,
        guests: &GuestMix,
    ) -> Vec<OccupancySurcharge> {
        let guest_count = self.eligible_guest_count(guests);
        let mut records = Vec::new();
        for &(room_product_id, rate_plan_id) in pairs {
            for date in stay.night_dates() {
                let amount = if guest_count > 1 {
                    // Guest n=1 has no default entry and contributes zero
                    // unless a date adjustment provisions it.
                    (1..guest_count)
                        .map(|n| self.rate_for(room_product_id, rate_plan_id, date, n))
                        .sum()
                } else {
                    Decimal::ZERO
                };
                records.push(OccupancySurcharge {
                    room_product_id,
                    rate_plan_id,
                    date,
                    amount,
                });
            }
        }
        records
    }

    fn rate_for(
        &self,
        room_product_id: Uuid,
        rate_plan_id: Uuid,
        date: NaiveDate,
        count: i32,
    ) -> Decimal {
        if let Some(pair_id) = self.index.pair_ids.get(&(room_product_id, rate_plan_id)) {
            if let Some(rate) = self.index.adjusted.get(&(*pair_id, date, count)) {
                return *rate;
            }
        }
        self.index
            .defaults
            .get(&(room_product_id, count))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pernox_catalog::DEFAULT_AGE_CATEGORY;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn categories() -> Vec<AgeCategory> {
        vec![
            AgeCategory::new("CHILD", Some(0), Some(6), true),
            AgeCategory::new("TEEN", Some(7), Some(17), false),
            AgeCategory::new(DEFAULT_AGE_CATEGORY, None, None, true),
        ]
    }

    fn fixture() -> (OccupancyEngine, (Uuid, Uuid)) {
        let room_product_id = Uuid::new_v4();
        let rate_plan_id = Uuid::new_v4();
        let association = RoomProductRatePlan::new(room_product_id, rate_plan_id);
        let defaults = [(2, dec!(10)), (3, dec!(20)), (4, dec!(30))]
            .into_iter()
            .map(|(count, rate)| OccupancyDefaultRate {
                room_product_id,
                extra_guest_count: count,
                rate,
            })
            .collect();
        let adjustments = vec![OccupancyRateAdjustment {
            room_product_rate_plan_id: association.id,
            date: date(2025, 7, 1),
            extra_guest_count: 2,
            rate: dec!(15),
        }];
        let engine = OccupancyEngine::new(categories(), defaults, adjustments, &[association]);
        (engine, (room_product_id, rate_plan_id))
    }

    #[test]
    fn test_guest_count_includes_only_opted_in_children() {
        // Age 4 sits in CHILD (opted in); age 12 only in TEEN (opted out).
        assert_eq!(eligible_guest_count(2, &[4, 12], &categories()), 3);
    }

    #[test]
    fn test_default_category_never_adds_guests() {
        let cats = vec![AgeCategory::new(DEFAULT_AGE_CATEGORY, None, None, true)];
        assert_eq!(eligible_guest_count(2, &[4, 12], &cats), 2);
    }

    #[test]
    fn test_surcharge_sums_rates_below_the_guest_count() {
        let (engine, pair) = fixture();
        let stay = StayRange::new(date(2025, 7, 2), date(2025, 7, 3)).unwrap();
        let guests = GuestMix::new(2, vec![4], 0);
        let records = engine.surcharges(&[pair], &stay, &guests);
        // Three eligible guests: entries 1 (absent) and 2 (10).
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, dec!(10));
    }

    #[test]
    fn test_adjusted_rate_overrides_the_default_per_date() {
        let (engine, pair) = fixture();
        let stay = StayRange::new(date(2025, 7, 1), date(2025, 7, 3)).unwrap();
        let guests = GuestMix::new(3, vec![], 0);
        let records = engine.surcharges(&[pair], &stay, &guests);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, date(2025, 7, 1));
        assert_eq!(records[0].amount, dec!(15));
        assert_eq!(records[1].date, date(2025, 7, 2));
        assert_eq!(records[1].amount, dec!(10));
    }

    #[test]
    fn test_single_guest_emits_zero_records_for_every_night() {
        let (engine, pair) = fixture();
        let stay = StayRange::new(date(2025, 7, 1), date(2025, 7, 4)).unwrap();
        let guests = GuestMix::new(1, vec![], 0);
        let records = engine.surcharges(&[pair], &stay, &guests);
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.amount == Decimal::ZERO));
    }

    #[test]
    fn test_missing_entries_contribute_zero() {
        let (engine, pair) = fixture();
        let stay = StayRange::new(date(2025, 7, 2), date(2025, 7, 3)).unwrap();
        let guests = GuestMix::new(6, vec![], 0);
        let records = engine.surcharges(&[pair], &stay, &guests);
        // Entries 2..=4 are provisioned; 1 and 5 fall back to zero.
        assert_eq!(records[0].amount, dec!(60));
    }

    #[test]
    fn test_unknown_pair_still_uses_room_defaults() {
        let (engine, (room_product_id, _)) = fixture();
        let other_plan = Uuid::new_v4();
        let stay = StayRange::new(date(2025, 7, 1), date(2025, 7, 2)).unwrap();
        let guests = GuestMix::new(3, vec![], 0);
        let records = engine.surcharges(&[(room_product_id, other_plan)], &stay, &guests);
        // No association row, so the date adjustment cannot bind; the room
        // default still applies.
        assert_eq!(records[0].amount, dec!(10));
    }
}
