use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Midpoint handling for monetary rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundingMode {
    HalfUp,
    HalfDown,
    HalfEven,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfDown => RoundingStrategy::MidpointTowardZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// Hotel-supplied rounding configuration: a mode plus a decimal-place count.
///
/// Threaded as a plain value into every formula that turns a percentage rate
/// into a multiplier, so two hotels with different conventions never share
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingPolicy {
    pub mode: RoundingMode,
    pub decimal_places: u32,
}

impl RoundingPolicy {
    pub fn new(mode: RoundingMode, decimal_places: u32) -> Self {
        Self {
            mode,
            decimal_places,
        }
    }

    /// Rounds a value to the configured precision.
    pub fn round(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.decimal_places, self.mode.strategy())
    }

    /// Converts a percentage rate (e.g. 5.5 for 5.5%) into a rounded multiplier.
    pub fn percent_multiplier(&self, rate: Decimal) -> Decimal {
        self.round(rate / Decimal::ONE_HUNDRED)
    }
}

impl Default for RoundingPolicy {
    /// Half-up at four decimal places, the platform-wide convention for
    /// percentage multipliers.
    fn default() -> Self {
        Self {
            mode: RoundingMode::HalfUp,
            decimal_places: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percent_multiplier_half_up_four_places() {
        let policy = RoundingPolicy::default();
        assert_eq!(policy.percent_multiplier(dec!(5.5)), dec!(0.055));
        assert_eq!(policy.percent_multiplier(dec!(3.333333)), dec!(0.0333));
        assert_eq!(policy.percent_multiplier(dec!(0.125)), dec!(0.0013));
    }

    #[test]
    fn test_modes_differ_on_the_midpoint() {
        assert_eq!(
            RoundingPolicy::new(RoundingMode::HalfUp, 2).round(dec!(2.005)),
            dec!(2.01)
        );
        assert_eq!(
            RoundingPolicy::new(RoundingMode::HalfDown, 2).round(dec!(2.005)),
            dec!(2.00)
        );
        assert_eq!(
            RoundingPolicy::new(RoundingMode::HalfEven, 2).round(dec!(2.005)),
            dec!(2.00)
        );
    }

    #[test]
    fn test_policy_deserializes_from_config_json() {
        let policy: RoundingPolicy =
            serde_json::from_str(r#"{"mode":"HALF_UP","decimal_places":4}"#).unwrap();
        assert_eq!(policy, RoundingPolicy::default());
    }
}
