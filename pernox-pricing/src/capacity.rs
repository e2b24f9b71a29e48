use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pernox_catalog::{ExtraBedRates, RoomCapacity};

/// How a requested party splits into base capacity and extra beds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityAllocation {
    pub allocated_adult: i32,
    pub allocated_child: i32,
    pub allocated_pet: i32,
    pub extra_bed_adult: i32,
    pub extra_bed_child: i32,
    /// Base capacity left to children once adults are placed; computed only
    /// when the party exceeds the clamped base capacity.
    pub remaining_room_capacity: Option<i32>,
}

/// Priced extra beds for one room product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraBedCharge {
    pub allocation: CapacityAllocation,
    pub adult_amount: Decimal,
    pub child_amount: Decimal,
    pub total_amount: Decimal,
    /// Set when pets are allocated and the hotel catalogs a pet amenity;
    /// the pet itself is priced elsewhere.
    pub pet_included: bool,
}

/// Splits a requested party into base-capacity guests and extra beds.
pub fn allocate_capacity(
    capacity: &RoomCapacity,
    requested_adult: i32,
    requested_child: i32,
    requested_pet: i32,
) -> CapacityAllocation {
    // 1. Base capacity never exceeds the sum of the per-type maximums.
    let capacity_default = capacity
        .capacity_default
        .min(capacity.maximum_adult + capacity.maximum_child);

    // 2. Overflow beyond the per-type maximums goes to extra beds.
    let extra_bed_adult = (requested_adult - capacity.maximum_adult).max(0);
    let mut extra_bed_child = (requested_child - capacity.maximum_child).max(0);

    // 3. When the whole party exceeds base capacity, children only keep what
    //    the adults leave behind.
    let mut remaining_room_capacity = None;
    if requested_adult + requested_child > capacity_default {
        let remaining = capacity_default - requested_adult.min(capacity.maximum_adult);
        let remaining_child_capacity = remaining.min(capacity.maximum_child);
        extra_bed_child = (requested_child - remaining_child_capacity).max(0);
        remaining_room_capacity = Some(remaining);
    }

    // Pets pass through; no capacity constraint applies to them here.
    CapacityAllocation {
        allocated_adult: requested_adult - extra_bed_adult,
        allocated_child: requested_child - extra_bed_child,
        allocated_pet: requested_pet,
        extra_bed_adult,
        extra_bed_child,
        remaining_room_capacity,
    }
}

/// Prices the extra beds of an allocation. Child slots consume ages from the
/// ascending-sorted list, one age per slot.
pub fn price_extra_beds(
    allocation: CapacityAllocation,
    rates: &ExtraBedRates,
    children_ages: &[i32],
    pet_amenity_in_catalog: bool,
) -> ExtraBedCharge {
    let adult_amount = rates.adult_rate * Decimal::from(allocation.extra_bed_adult);

    let mut sorted_ages = children_ages.to_vec();
    sorted_ages.sort_unstable();
    let child_amount: Decimal = sorted_ages
        .iter()
        .take(allocation.extra_bed_child.max(0) as usize)
        .map(|&age| child_bed_rate(rates, age))
        .sum();

    ExtraBedCharge {
        allocation,
        adult_amount,
        child_amount,
        total_amount: adult_amount + child_amount,
        pet_included: allocation.allocated_pet > 0 && pet_amenity_in_catalog,
    }
}

/// First matching specific bracket wins; the DEFAULT bracket is the fallback.
fn child_bed_rate(rates: &ExtraBedRates, age: i32) -> Decimal {
    rates
        .child_brackets
        .iter()
        .find(|bracket| bracket.matches_age(age))
        .or_else(|| rates.child_brackets.iter().find(|b| b.is_default()))
        .map(|bracket| bracket.rate)
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pernox_catalog::{ChildRateBracket, DEFAULT_AGE_CATEGORY};
    use rust_decimal_macros::dec;

    fn capacity(capacity_default: i32, maximum_adult: i32, maximum_child: i32) -> RoomCapacity {
        RoomCapacity {
            capacity_default,
            maximum_adult,
            maximum_child,
            capacity_extra: 2,
            maximum_pet: 1,
        }
    }

    fn rates() -> ExtraBedRates {
        ExtraBedRates {
            adult_rate: dec!(25),
            child_brackets: vec![
                ChildRateBracket::new("INFANT", 0, 3, dec!(0)),
                ChildRateBracket::new("CHILD", 3, 12, dec!(10)),
                ChildRateBracket::new(DEFAULT_AGE_CATEGORY, 0, 999, dec!(18)),
            ],
        }
    }

    #[test]
    fn test_adult_overflow_becomes_extra_beds() {
        let allocation = allocate_capacity(&capacity(2, 2, 0), 3, 0, 0);
        assert_eq!(allocation.allocated_adult, 2);
        assert_eq!(allocation.extra_bed_adult, 1);
        assert_eq!(allocation.extra_bed_child, 0);
    }

    #[test]
    fn test_full_house_pushes_children_to_extra_beds() {
        let allocation = allocate_capacity(&capacity(2, 2, 2), 2, 2, 0);
        assert_eq!(allocation.remaining_room_capacity, Some(0));
        assert_eq!(allocation.extra_bed_child, 2);
        assert_eq!(allocation.allocated_child, 0);
        assert_eq!(allocation.extra_bed_adult, 0);
        assert_eq!(allocation.allocated_adult, 2);
    }

    #[test]
    fn test_party_within_capacity_needs_no_extra_beds() {
        let allocation = allocate_capacity(&capacity(4, 2, 2), 2, 2, 1);
        assert_eq!(allocation.extra_bed_adult, 0);
        assert_eq!(allocation.extra_bed_child, 0);
        assert_eq!(allocation.remaining_room_capacity, None);
        assert_eq!(allocation.allocated_pet, 1);
    }

    #[test]
    fn test_capacity_default_is_clamped_to_the_maximums() {
        // Misconfigured base capacity above the per-type maximums.
        let allocation = allocate_capacity(&capacity(10, 2, 1), 2, 2, 0);
        assert_eq!(allocation.remaining_room_capacity, Some(1));
        assert_eq!(allocation.extra_bed_child, 1);
        assert_eq!(allocation.allocated_child, 1);
    }

    #[test]
    fn test_extra_beds_price_adults_and_bracketed_children() {
        let allocation = allocate_capacity(&capacity(2, 1, 1), 2, 2, 0);
        assert_eq!(allocation.extra_bed_adult, 1);
        assert_eq!(allocation.extra_bed_child, 1);
        let charge = price_extra_beds(allocation, &rates(), &[14, 2], false);
        // Ages sort to [2, 14]; the single child slot consumes age 2, which
        // lands in the free INFANT bracket.
        assert_eq!(charge.adult_amount, dec!(25));
        assert_eq!(charge.child_amount, dec!(0));
        assert_eq!(charge.total_amount, dec!(25));
    }

    #[test]
    fn test_unbracketed_ages_fall_back_to_the_default_rate() {
        let allocation = allocate_capacity(&capacity(1, 1, 0), 1, 1, 0);
        let charge = price_extra_beds(allocation, &rates(), &[16], false);
        // Age 16 misses INFANT and CHILD; the DEFAULT bracket prices it.
        assert_eq!(charge.child_amount, dec!(18));
    }

    #[test]
    fn test_bracket_upper_bounds_are_exclusive() {
        let allocation = allocate_capacity(&capacity(1, 1, 0), 1, 1, 0);
        let charge = price_extra_beds(allocation, &rates(), &[12], false);
        // Age 12 falls off the CHILD bracket (3..12) onto the default.
        assert_eq!(charge.child_amount, dec!(18));
    }

    #[test]
    fn test_pet_flag_requires_allocation_and_catalog_amenity() {
        let with_pet = allocate_capacity(&capacity(2, 2, 0), 1, 0, 1);
        assert!(price_extra_beds(with_pet, &rates(), &[], true).pet_included);
        assert!(!price_extra_beds(with_pet, &rates(), &[], false).pet_included);
        let without_pet = allocate_capacity(&capacity(2, 2, 0), 1, 0, 0);
        assert!(!price_extra_beds(without_pet, &rates(), &[], true).pet_included);
    }

    #[test]
    fn test_no_rate_card_prices_children_at_zero() {
        let bare = ExtraBedRates {
            adult_rate: dec!(25),
            child_brackets: vec![],
        };
        let allocation = allocate_capacity(&capacity(1, 1, 0), 1, 2, 0);
        let charge = price_extra_beds(allocation, &bare, &[5, 9], false);
        assert_eq!(charge.child_amount, Decimal::ZERO);
    }
}
