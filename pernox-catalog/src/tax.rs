use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Charge basis of a city-tax rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxUnit {
    FixedOnGrossAmountRoom,
    PercentageOnGrossAmountRoom,
    PercentageOnNetAmountRoom,
    PerPersonPerNight,
    PerPersonPerStayFixed,
    PerRoomPerNight,
    /// Accepted on the wire but not priced; always contributes zero.
    PerPersonPerStayPercentage,
}

impl TaxUnit {
    /// Units charged once per stay no matter how many nights carry them.
    pub fn counts_once(self) -> bool {
        matches!(
            self,
            TaxUnit::PercentageOnGrossAmountRoom
                | TaxUnit::PercentageOnNetAmountRoom
                | TaxUnit::PerPersonPerStayFixed
                | TaxUnit::FixedOnGrossAmountRoom
        )
    }

    /// Units where child guests are priced through age-group overrides.
    pub fn has_child_rates(self) -> bool {
        matches!(
            self,
            TaxUnit::PerPersonPerNight | TaxUnit::PerPersonPerStayFixed
        )
    }

    /// Units whose night count is clipped to the rule's validity window.
    pub fn clips_nights(self) -> bool {
        matches!(self, TaxUnit::PerPersonPerNight | TaxUnit::PerRoomPerNight)
    }
}

/// A city-tax rule from the hotel's tax settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRule {
    pub id: Uuid,
    /// Reporting code the final breakdown is grouped by; empty means unset.
    pub code: String,
    pub unit: TaxUnit,
    /// Fixed amount or percentage, depending on `unit`.
    pub value: Decimal,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
}

impl TaxRule {
    pub fn new(code: impl Into<String>, unit: TaxUnit, value: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            unit,
            value,
            valid_from: None,
            valid_to: None,
        }
    }
}

/// Replaces a rule's rate for child guests inside an age window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxAgeGroupOverride {
    pub id: Uuid,
    pub tax_rule_id: Uuid,
    /// Inclusive bounds; `None` leaves that side open.
    pub from_age: Option<i32>,
    pub to_age: Option<i32>,
    pub value: Decimal,
}

impl TaxAgeGroupOverride {
    pub fn new(
        tax_rule_id: Uuid,
        from_age: Option<i32>,
        to_age: Option<i32>,
        value: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tax_rule_id,
            from_age,
            to_age,
            value,
        }
    }

    pub fn applies_to_age(&self, age: i32) -> bool {
        self.from_age.map_or(true, |from| age >= from)
            && self.to_age.map_or(true, |to| age <= to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_units_deserialize_from_platform_codes() {
        let unit: TaxUnit = serde_json::from_str(r#""PER_PERSON_PER_NIGHT""#).unwrap();
        assert_eq!(unit, TaxUnit::PerPersonPerNight);
        let unit: TaxUnit = serde_json::from_str(r#""FIXED_ON_GROSS_AMOUNT_ROOM""#).unwrap();
        assert_eq!(unit, TaxUnit::FixedOnGrossAmountRoom);
        assert_eq!(
            serde_json::to_string(&TaxUnit::PerPersonPerStayPercentage).unwrap(),
            r#""PER_PERSON_PER_STAY_PERCENTAGE""#
        );
    }

    #[test]
    fn test_stay_level_units_count_once() {
        assert!(TaxUnit::FixedOnGrossAmountRoom.counts_once());
        assert!(TaxUnit::PercentageOnGrossAmountRoom.counts_once());
        assert!(TaxUnit::PercentageOnNetAmountRoom.counts_once());
        assert!(TaxUnit::PerPersonPerStayFixed.counts_once());
        assert!(!TaxUnit::PerPersonPerNight.counts_once());
        assert!(!TaxUnit::PerRoomPerNight.counts_once());
        assert!(!TaxUnit::PerPersonPerStayPercentage.counts_once());
    }

    #[test]
    fn test_override_bounds_are_inclusive_and_optional() {
        let rule = TaxRule::new("CTX", TaxUnit::PerPersonPerNight, dec!(2));
        let bounded = TaxAgeGroupOverride::new(rule.id, Some(3), Some(11), dec!(1));
        assert!(bounded.applies_to_age(3));
        assert!(bounded.applies_to_age(11));
        assert!(!bounded.applies_to_age(2));
        assert!(!bounded.applies_to_age(12));

        let open_ended = TaxAgeGroupOverride::new(rule.id, None, Some(17), dec!(0));
        assert!(open_ended.applies_to_age(0));
        assert!(!open_ended.applies_to_age(18));
    }
}
