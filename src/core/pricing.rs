//! Price normalization and per-period price calculation.
//!
//! Absent prices are `None`. Prices that exist but cannot be computed (a
//! reservation record missing the configured term, say) come back as NaN.
//! Both render as "n/a".

use crate::core::catalog::{InstanceType, RawPrice, ReservationPriceRecord};
use crate::core::config::DisplaySettings;
use crate::core::period::Period;

pub const ON_DEMAND: &str = "onDemand";
pub const SPOT: &str = "spot";
pub const OTHER: &str = "other";
pub const EMR: &str = "emr";
pub const EBS_OPTIMIZED: &str = "ebsOptimized";

/// Reduces a reservation record to an hourly rate for `term`.
///
/// A truthy `<term>-effectiveHourly` wins. Otherwise the upfront cost is
/// amortized over one year of hours and added to the recurring hourly fee,
/// whatever period is being displayed.
pub fn normalize_reserved_price(record: &ReservationPriceRecord, term: &str) -> f64 {
    let effective_hourly = record.value(&ReservationPriceRecord::effective_hourly_key(term));
    if effective_hourly != 0.0 && !effective_hourly.is_nan() {
        return effective_hourly;
    }
    let fixed = record.value(&ReservationPriceRecord::upfront_key(term));
    let hourly = record.value(&ReservationPriceRecord::hourly_key(term));
    fixed / Period::Yearly.multiplier() + hourly
}

/// Whether a computed figure should be treated as missing.
pub fn is_missing(value: Option<f64>) -> bool {
    value.is_none_or(f64::is_nan)
}

/// Divides two optional prices, NaN when either is absent.
fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> f64 {
    numerator.unwrap_or(f64::NAN) / denominator.unwrap_or(f64::NAN)
}

/// Computes prices for instance types under one set of display settings.
#[derive(Debug, Clone, Copy)]
pub struct PricingCalculator<'a> {
    settings: &'a DisplaySettings,
}

impl<'a> PricingCalculator<'a> {
    pub fn new(settings: &'a DisplaySettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &'a DisplaySettings {
        self.settings
    }

    fn raw_price<'i>(
        &self,
        instance: &'i InstanceType,
        price_class: &str,
        label: &str,
    ) -> Option<&'i RawPrice> {
        instance
            .prices
            .get(&self.settings.region)?
            .get(price_class)?
            .get(label)
    }

    /// Looks up `prices[region][price_class][label]` and converts it to the
    /// configured period.
    pub fn price_for(
        &self,
        instance: &InstanceType,
        price_class: &str,
        label: &str,
    ) -> Option<f64> {
        let raw = self.raw_price(instance, price_class, label)?;
        let hourly = match raw {
            RawPrice::Hourly(rate) => *rate,
            RawPrice::Reserved(record) if record.covers_term(&self.settings.reservation_term) => {
                normalize_reserved_price(record, &self.settings.reservation_term)
            }
            RawPrice::Reserved(_) => f64::NAN,
            RawPrice::Unrecognized(value) if value.is_null() => return None,
            RawPrice::Unrecognized(_) => f64::NAN,
        };
        Some(hourly * self.settings.period.multiplier())
    }

    pub fn on_demand_price(&self, instance: &InstanceType) -> Option<f64> {
        self.price_for(instance, ON_DEMAND, &self.settings.operating_system)
    }

    pub fn spot_price(&self, instance: &InstanceType) -> Option<f64> {
        self.price_for(instance, SPOT, &self.settings.operating_system)
    }

    pub fn emr_price(&self, instance: &InstanceType) -> Option<f64> {
        self.price_for(instance, OTHER, EMR)
    }

    pub fn ebs_optimized_price(&self, instance: &InstanceType) -> Option<f64> {
        self.price_for(instance, OTHER, EBS_OPTIMIZED)
    }

    pub fn reserved_price(&self, instance: &InstanceType) -> Option<f64> {
        self.price_for(
            instance,
            &self.settings.reservation_type,
            &self.settings.operating_system,
        )
    }

    /// One-time upfront cost of the configured reservation, not scaled to
    /// the display period. Plain hourly reserved prices have none.
    pub fn upfront_cost(&self, instance: &InstanceType) -> Option<f64> {
        let raw = self.raw_price(
            instance,
            &self.settings.reservation_type,
            &self.settings.operating_system,
        )?;
        match raw {
            RawPrice::Reserved(record) => Some(
                record.value(&ReservationPriceRecord::upfront_key(
                    &self.settings.reservation_term,
                )),
            ),
            RawPrice::Hourly(_) | RawPrice::Unrecognized(_) => None,
        }
    }

    /// EMR surcharge as a fraction of the on-demand price.
    pub fn emr_price_percent(&self, instance: &InstanceType) -> f64 {
        ratio(self.emr_price(instance), self.on_demand_price(instance))
    }

    /// Reserved price as a fraction of the on-demand price.
    pub fn reserved_savings(&self, instance: &InstanceType) -> f64 {
        ratio(self.reserved_price(instance), self.on_demand_price(instance))
    }
}
