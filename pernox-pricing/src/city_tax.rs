use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pernox_catalog::{NightlyPrice, TaxAgeGroupOverride, TaxRule, TaxUnit};
use pernox_shared::RoundingPolicy;

/// Tracks which count-once units have already charged during a calculation.
///
/// The caller owns the tracker and thereby chooses its scope: the whole-stay
/// entry point shares one tracker across every night, while the batch
/// orchestrator builds a fresh one per single-day item.
#[derive(Debug, Clone, Default)]
pub struct CountOnceTracker {
    charged: HashSet<TaxUnit>,
}

impl CountOnceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a rule of this unit may still charge under this tracker.
    /// Per-night units always pass; count-once units pass exactly once.
    pub fn admit(&mut self, unit: TaxUnit) -> bool {
        if !unit.counts_once() {
            return true;
        }
        self.charged.insert(unit)
    }
}

/// Booking-level inputs shared by every per-night tax computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxContext {
    pub total_rooms: i32,
    pub adults: i32,
    pub children_ages: Vec<i32>,
    pub rounding: RoundingPolicy,
}

/// One rule's contribution over one computed range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleCharge {
    pub rule_id: Uuid,
    pub code: String,
    pub unit: TaxUnit,
    pub tax_amount: Decimal,
    pub tax_amount_before_adjustment: Decimal,
}

/// Per-code grouping of rule charges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityTaxBreakdown {
    pub code: String,
    pub tax_amount: Decimal,
    pub tax_amount_before_adjustment: Decimal,
}

/// Whole-stay city-tax request carrying every nightly selling price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingTaxRequest {
    pub total_rooms: i32,
    pub adults: i32,
    pub children_ages: Vec<i32>,
    pub rounding: RoundingPolicy,
    pub nights: Vec<NightlyPrice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityTaxSummary {
    pub total_city_tax_amount: Decimal,
    pub total_city_tax_amount_before_adjustment: Decimal,
    pub city_tax_breakdown: Vec<CityTaxBreakdown>,
}

/// City-tax calculator over a hotel's configured rules and age overrides.
pub struct CityTaxEngine {
    rules: Vec<TaxRule>,
    overrides_by_rule: HashMap<Uuid, Vec<TaxAgeGroupOverride>>,
}

impl CityTaxEngine {
    /// Overrides keep their input order per rule; the first matching window
    /// wins at lookup time.
    pub fn new(rules: Vec<TaxRule>, overrides: Vec<TaxAgeGroupOverride>) -> Self {
        let mut overrides_by_rule: HashMap<Uuid, Vec<TaxAgeGroupOverride>> = HashMap::new();
        for ov in overrides {
            overrides_by_rule.entry(ov.tax_rule_id).or_default().push(ov);
        }
        Self {
            rules,
            overrides_by_rule,
        }
    }

    /// Rules in force for the given range.
    ///
    /// Open-ended rules always apply. A rule with only an end bound applies
    /// while that bound has not passed the range start. Otherwise the start
    /// bound is checked against the range start, except for
    /// PER_PERSON_PER_NIGHT which checks against the range end.
    // TODO: decide whether PER_ROOM_PER_NIGHT should share the range-end
    // comparison; today only PER_PERSON_PER_NIGHT gets it.
    pub fn applicable_rules(&self, from: NaiveDate, to: NaiveDate) -> Vec<&TaxRule> {
        self.rules
            .iter()
            .filter(|rule| Self::rule_applies(rule, from, to))
            .collect()
    }

    fn rule_applies(rule: &TaxRule, from: NaiveDate, to: NaiveDate) -> bool {
        match (rule.valid_from, rule.valid_to) {
            (None, None) => true,
            (None, Some(valid_to)) => valid_to >= from,
            (Some(valid_from), valid_to) => {
                let reference = if rule.unit == TaxUnit::PerPersonPerNight {
                    to
                } else {
                    from
                };
                let from_valid = valid_from <= reference;
                match valid_to {
                    None => from_valid,
                    Some(valid_to) => from_valid && valid_to >= from,
                }
            }
        }
    }

    /// Per-rule charges for one computed range, usually a single night.
    /// Count-once units consult the caller's tracker before charging.
    pub fn charges_for_range(
        &self,
        ctx: &TaxContext,
        prices: &NightlyPrice,
        from: NaiveDate,
        to: NaiveDate,
        tracker: &mut CountOnceTracker,
    ) -> Vec<RuleCharge> {
        let mut charges = Vec::new();
        for rule in self.applicable_rules(from, to) {
            if !tracker.admit(rule.unit) {
                continue;
            }
            charges.push(self.rule_charge(rule, ctx, prices, from, to));
        }
        charges
    }

    /// Whole-stay entry point: one shared tracker across every night, so
    /// count-once units charge on the first night only.
    pub fn calculate_booking(&self, request: &BookingTaxRequest) -> CityTaxSummary {
        let ctx = TaxContext {
            total_rooms: request.total_rooms,
            adults: request.adults,
            children_ages: request.children_ages.clone(),
            rounding: request.rounding,
        };
        let mut tracker = CountOnceTracker::new();
        let mut charges = Vec::new();
        for night in &request.nights {
            charges.extend(self.charges_for_range(
                &ctx,
                night,
                night.date,
                night.date,
                &mut tracker,
            ));
        }
        let breakdown = group_breakdown(charges);
        let total: Decimal = breakdown.iter().map(|row| row.tax_amount).sum();
        let total_before: Decimal = breakdown
            .iter()
            .map(|row| row.tax_amount_before_adjustment)
            .sum();
        CityTaxSummary {
            total_city_tax_amount: total,
            total_city_tax_amount_before_adjustment: total_before,
            city_tax_breakdown: breakdown,
        }
    }

    fn rule_charge(
        &self,
        rule: &TaxRule,
        ctx: &TaxContext,
        prices: &NightlyPrice,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RuleCharge {
        let nights = clipped_night_count(rule, from, to);

        let mut tax_amount = unit_tax_amount(
            rule.unit,
            rule.value,
            ctx.adults,
            nights,
            ctx.total_rooms,
            prices.net_price,
            prices.gross_price,
            ctx.rounding,
        );
        let mut tax_amount_before_adjustment = unit_tax_amount(
            rule.unit,
            rule.value,
            ctx.adults,
            nights,
            ctx.total_rooms,
            prices.net_before_adjustment(),
            prices.gross_before_adjustment(),
            ctx.rounding,
        );

        if rule.unit.has_child_rates() && !ctx.children_ages.is_empty() {
            for &age in &ctx.children_ages {
                let child_rate = self.child_rate(rule, age);
                tax_amount += unit_tax_amount(
                    rule.unit,
                    child_rate,
                    1,
                    nights,
                    ctx.total_rooms,
                    prices.net_price,
                    prices.gross_price,
                    ctx.rounding,
                );
                // Legacy billing scaled the pre-adjustment child amount by the
                // adult count. Pinned by tests until product signs off a fix.
                tax_amount_before_adjustment += unit_tax_amount(
                    rule.unit,
                    child_rate,
                    ctx.adults,
                    nights,
                    ctx.total_rooms,
                    prices.net_before_adjustment(),
                    prices.gross_before_adjustment(),
                    ctx.rounding,
                );
            }
        }

        RuleCharge {
            rule_id: rule.id,
            code: rule.code.clone(),
            unit: rule.unit,
            tax_amount,
            tax_amount_before_adjustment,
        }
    }

    fn child_rate(&self, rule: &TaxRule, age: i32) -> Decimal {
        self.overrides_by_rule
            .get(&rule.id)
            .and_then(|ovs| ovs.iter().find(|ov| ov.applies_to_age(age)))
            .map_or(rule.value, |ov| ov.value)
    }
}

/// Amount one rule charges for one people-count over one range.
/// Zero people or night counts fall back to a single unit.
#[allow(clippy::too_many_arguments)]
pub fn unit_tax_amount(
    unit: TaxUnit,
    rate: Decimal,
    people_count: i32,
    night_count: i64,
    total_rooms: i32,
    price_before_tax: Decimal,
    price_after_tax: Decimal,
    rounding: RoundingPolicy,
) -> Decimal {
    let people = Decimal::from(if people_count == 0 { 1 } else { people_count });
    let nights = Decimal::from(if night_count == 0 { 1 } else { night_count });
    let rooms = Decimal::from(total_rooms);

    match unit {
        TaxUnit::FixedOnGrossAmountRoom => rooms * rate,
        // TODO: confirm the zero-price gate below; a populated price currently
        // contributes nothing for either percentage unit.
        TaxUnit::PercentageOnGrossAmountRoom => {
            if price_after_tax.is_zero() {
                price_after_tax * rounding.percent_multiplier(rate)
            } else {
                Decimal::ZERO
            }
        }
        TaxUnit::PercentageOnNetAmountRoom => {
            if price_before_tax.is_zero() {
                price_before_tax * rounding.percent_multiplier(rate)
            } else {
                Decimal::ZERO
            }
        }
        TaxUnit::PerPersonPerNight => people * nights * rate,
        TaxUnit::PerPersonPerStayFixed => people * rate,
        TaxUnit::PerRoomPerNight => rooms * nights * rate,
        TaxUnit::PerPersonPerStayPercentage => Decimal::ZERO,
    }
}

/// Night count of the range; clipped to the rule's validity window for the
/// per-night units only.
fn clipped_night_count(rule: &TaxRule, from: NaiveDate, to: NaiveDate) -> i64 {
    if rule.unit.clips_nights() {
        let start = rule.valid_from.map_or(from, |v| v.max(from));
        let end = rule.valid_to.map_or(to, |v| v.min(to));
        (end - start).num_days()
    } else {
        (to - from).num_days()
    }
}

/// Flattens rule charges into per-code rows, summing both amounts. Charges
/// with an empty code are dropped; output is sorted by code.
pub fn group_breakdown(charges: impl IntoIterator<Item = RuleCharge>) -> Vec<CityTaxBreakdown> {
    let mut grouped: BTreeMap<String, CityTaxBreakdown> = BTreeMap::new();
    for charge in charges {
        if charge.code.is_empty() {
            continue;
        }
        let row = grouped
            .entry(charge.code.clone())
            .or_insert_with(|| CityTaxBreakdown {
                code: charge.code.clone(),
                tax_amount: Decimal::ZERO,
                tax_amount_before_adjustment: Decimal::ZERO,
            });
        row.tax_amount += charge.tax_amount;
        row.tax_amount_before_adjustment += charge.tax_amount_before_adjustment;
    }
    grouped.into_values().collect()
}
