use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A check-in/check-out date pair. Nights run from `from` up to but not
/// including `to`, so a range with equal dates holds no nights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl StayRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, StayRangeError> {
        let range = Self { from, to };
        range.validate()?;
        Ok(range)
    }

    /// A one-night range starting on `date`.
    pub fn single_night(date: NaiveDate) -> Self {
        Self {
            from: date,
            to: date + chrono::Duration::days(1),
        }
    }

    /// Rejects inverted ranges. Deserialized values should be revalidated
    /// before use.
    pub fn validate(&self) -> Result<(), StayRangeError> {
        if self.from > self.to {
            return Err(StayRangeError::Inverted {
                check_in: self.from,
                check_out: self.to,
            });
        }
        Ok(())
    }

    pub fn nights(&self) -> i64 {
        (self.to - self.from).num_days()
    }

    pub fn night_dates(&self) -> impl Iterator<Item = NaiveDate> {
        let to = self.to;
        self.from.iter_days().take_while(move |d| *d < to)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date < self.to
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StayRangeError {
    #[error("Check-out {check_out} is before check-in {check_in}")]
    Inverted {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_range_lists_nights() {
        let stay = StayRange::new(date(2025, 7, 1), date(2025, 7, 4)).unwrap();
        assert_eq!(stay.nights(), 3);
        let nights: Vec<NaiveDate> = stay.night_dates().collect();
        assert_eq!(
            nights,
            vec![date(2025, 7, 1), date(2025, 7, 2), date(2025, 7, 3)]
        );
        assert!(stay.contains(date(2025, 7, 3)));
        assert!(!stay.contains(date(2025, 7, 4)));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = StayRange::new(date(2025, 7, 4), date(2025, 7, 1)).unwrap_err();
        assert!(matches!(err, StayRangeError::Inverted { .. }));
    }

    #[test]
    fn test_same_day_range_has_no_nights() {
        let stay = StayRange::new(date(2025, 7, 1), date(2025, 7, 1)).unwrap();
        assert_eq!(stay.nights(), 0);
        assert_eq!(stay.night_dates().count(), 0);
    }

    #[test]
    fn test_single_night_spans_one_day() {
        let stay = StayRange::single_night(date(2025, 12, 31));
        assert_eq!(stay.nights(), 1);
        assert_eq!(stay.to, date(2026, 1, 1));
    }
}
