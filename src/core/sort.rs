//! Orders instance types by a user-selected field.

use crate::core::catalog::{DiskDescriptor, InstanceType};
use crate::core::config::DisplaySettings;
use crate::core::pricing::{self, PricingCalculator};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::debug;

const SIZE_ORDER: [&str; 6] = ["nano", "micro", "small", "medium", "large", "xlarge"];

/// Rank given to sizes outside the vocabulary, after every known size.
const UNKNOWN_SIZE_RANK: u64 = 1 << 31;

const NETWORK_PERFORMANCE_ORDER: [&str; 6] = [
    "very low",
    "low",
    "low to moderate",
    "moderate",
    "high",
    "10 gigabit",
];

static MULTI_XLARGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)xlarge").expect("size pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    #[default]
    ApiName,
    Cpus,
    Ram,
    Disk,
    NetworkPerformance,
    ReservedPrice,
    ReservedSavings,
    OnDemandPrice,
    SpotPrice,
    EmrPrice,
    EbsOptimizedPrice,
    UpfrontCost,
}

impl SortField {
    pub const ALL: [SortField; 12] = [
        SortField::ApiName,
        SortField::Cpus,
        SortField::Ram,
        SortField::Disk,
        SortField::NetworkPerformance,
        SortField::ReservedPrice,
        SortField::ReservedSavings,
        SortField::OnDemandPrice,
        SortField::SpotPrice,
        SortField::EmrPrice,
        SortField::EbsOptimizedPrice,
        SortField::UpfrontCost,
    ];

    /// Resolves a field name, falling back to sorting by name.
    pub fn resolve(name: &str) -> SortField {
        name.parse().unwrap_or_else(|_| {
            debug!("Unknown sort field {name:?}, sorting by name");
            SortField::ApiName
        })
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortField::ApiName => "apiName",
                SortField::Cpus => "cpus",
                SortField::Ram => "ram",
                SortField::Disk => "disk",
                SortField::NetworkPerformance => "networkPerformance",
                SortField::ReservedPrice => "reservedPrice",
                SortField::ReservedSavings => "reservedSavings",
                SortField::OnDemandPrice => "onDemandPrice",
                SortField::SpotPrice => "spotPrice",
                SortField::EmrPrice => "emrPrice",
                SortField::EbsOptimizedPrice => "ebsOptimizedPrice",
                SortField::UpfrontCost => "upfrontCost",
            }
        )
    }
}

impl FromStr for SortField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apiName" | "name" => Ok(SortField::ApiName),
            "cpus" | "vcpus" => Ok(SortField::Cpus),
            "ram" | "memory" => Ok(SortField::Ram),
            "disk" | "storage" => Ok(SortField::Disk),
            "networkPerformance" => Ok(SortField::NetworkPerformance),
            "reservedPrice" => Ok(SortField::ReservedPrice),
            "reservedSavings" => Ok(SortField::ReservedSavings),
            "onDemandPrice" => Ok(SortField::OnDemandPrice),
            "spotPrice" => Ok(SortField::SpotPrice),
            "emrPrice" => Ok(SortField::EmrPrice),
            "ebsOptimizedPrice" => Ok(SortField::EbsOptimizedPrice),
            "upfrontCost" => Ok(SortField::UpfrontCost),
            _ => Err(anyhow::anyhow!("Invalid sort field: {}", s)),
        }
    }
}

/// Ordinal of an instance size: the named sizes first, then `Nxlarge` as
/// `6 + N`, then everything else.
pub fn size_rank(size: &str) -> u64 {
    if let Some(n) = SIZE_ORDER.iter().position(|s| *s == size) {
        return n as u64;
    }
    MULTI_XLARGE
        .captures(size)
        .and_then(|caps| caps[1].parse::<u64>().ok())
        .and_then(|n| n.checked_add(SIZE_ORDER.len() as u64))
        .map_or(UNKNOWN_SIZE_RANK, |rank| rank.min(UNKNOWN_SIZE_RANK))
}

/// Position in the network performance vocabulary, -1 when unknown. Unknown
/// values therefore sort before "very low".
pub fn network_rank(performance: &str) -> i32 {
    NETWORK_PERFORMANCE_ORDER
        .iter()
        .position(|p| *p == performance)
        .map_or(-1, |n| n as i32)
}

fn compare_family(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

pub fn compare_name(a: &InstanceType, b: &InstanceType) -> Ordering {
    let (family_a, size_a) = a.family_and_size();
    let (family_b, size_b) = b.family_and_size();
    compare_family(family_a, family_b).then_with(|| size_rank(size_a).cmp(&size_rank(size_b)))
}

pub fn compare_vcpus(a: &InstanceType, b: &InstanceType) -> Ordering {
    compare_figures(a.vcpus, b.vcpus)
}

pub fn compare_memory(a: &InstanceType, b: &InstanceType) -> Ordering {
    compare_figures(a.memory, b.memory)
}

/// No local disk first, then by total size, SSD before spinning disks of the
/// same size.
pub fn compare_disk(a: Option<&DiskDescriptor>, b: Option<&DiskDescriptor>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_figures(a.total_size(), b.total_size())
            .then_with(|| b.ssd.cmp(&a.ssd)),
    }
}

pub fn compare_network_performance(a: &InstanceType, b: &InstanceType) -> Ordering {
    network_rank(&a.network_performance).cmp(&network_rank(&b.network_performance))
}

/// Compares two prices. A missing price ranks level with a free one and
/// below every positive price.
pub fn compare_prices(a: Option<f64>, b: Option<f64>) -> Ordering {
    let level = |price: Option<f64>| {
        if pricing::is_missing(price) {
            0.0
        } else {
            price.unwrap_or_default()
        }
    };
    compare_figures(level(a), level(b))
}

/// Compares two computed figures, NaN first.
pub fn compare_figures(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// A comparator resolved from display settings.
#[derive(Debug, Clone, Copy)]
pub struct InstanceComparator<'a> {
    field: SortField,
    calculator: PricingCalculator<'a>,
    float_selected: Option<Ordering>,
}

impl<'a> InstanceComparator<'a> {
    pub fn new(field: SortField, settings: &'a DisplaySettings) -> Self {
        let float_selected = settings.calculator.then(|| {
            if settings.sort_ascending {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        });
        Self {
            field,
            calculator: PricingCalculator::new(settings),
            float_selected,
        }
    }

    pub fn from_settings(settings: &'a DisplaySettings) -> Self {
        Self::new(SortField::resolve(&settings.sort_field), settings)
    }

    pub fn field(&self) -> SortField {
        self.field
    }

    pub fn compare(&self, a: &InstanceType, b: &InstanceType) -> Ordering {
        let Some(selected_first) = self.float_selected else {
            return self.compare_field(a, b);
        };
        match (a.is_selected(), b.is_selected()) {
            (true, false) => selected_first,
            (false, true) => selected_first.reverse(),
            _ => self.compare_field(a, b),
        }
    }

    fn compare_field(&self, a: &InstanceType, b: &InstanceType) -> Ordering {
        let calc = &self.calculator;
        let settings = calc.settings();
        let price = |class: &str, label: &str| {
            compare_prices(calc.price_for(a, class, label), calc.price_for(b, class, label))
        };
        match self.field {
            SortField::ApiName => compare_name(a, b),
            SortField::Cpus => compare_vcpus(a, b),
            SortField::Ram => compare_memory(a, b),
            SortField::Disk => compare_disk(a.disk.as_ref(), b.disk.as_ref()),
            SortField::NetworkPerformance => compare_network_performance(a, b),
            SortField::ReservedPrice => price(
                settings.reservation_type.as_str(),
                settings.operating_system.as_str(),
            ),
            SortField::OnDemandPrice => {
                price(pricing::ON_DEMAND, settings.operating_system.as_str())
            }
            SortField::SpotPrice => price(pricing::SPOT, settings.operating_system.as_str()),
            SortField::EbsOptimizedPrice => price(pricing::OTHER, pricing::EBS_OPTIMIZED),
            SortField::UpfrontCost => {
                compare_prices(calc.upfront_cost(a), calc.upfront_cost(b))
            }
            SortField::ReservedSavings => {
                compare_figures(calc.reserved_savings(a), calc.reserved_savings(b))
            }
            SortField::EmrPrice if settings.emr_percent => {
                compare_figures(calc.emr_price_percent(a), calc.emr_price_percent(b))
            }
            SortField::EmrPrice => compare_figures(
                calc.emr_price(a).unwrap_or(f64::NAN),
                calc.emr_price(b).unwrap_or(f64::NAN),
            ),
        }
    }
}

/// Returns the instances ordered per `settings`, leaving `instances` as is.
///
/// The ascending order is reversed as a whole for descending sorts, which
/// also moves selected instances from the back to the front.
pub fn sort_instances<'a>(
    instances: &'a [InstanceType],
    settings: &DisplaySettings,
) -> Vec<&'a InstanceType> {
    let comparator = InstanceComparator::from_settings(settings);
    debug!(
        field = %comparator.field(),
        ascending = settings.sort_ascending,
        calculator = settings.calculator,
        "Sorting {} instance types",
        instances.len()
    );
    let mut sorted: Vec<&InstanceType> = instances.iter().collect();
    sorted.sort_by(|a, b| comparator.compare(a, b));
    if !settings.sort_ascending {
        sorted.reverse();
    }
    sorted
}
