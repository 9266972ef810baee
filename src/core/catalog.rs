//! Instance catalog records as supplied by the hosting application

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;
use std::{fs, path::Path};
use tracing::debug;

/// Matches storage summaries such as `2 x 800 SSD` or `1,920 NVMe SSD`.
static STORAGE_SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+) x )?([\d,.]+)").expect("storage summary pattern is valid")
});

/// Locally attached instance storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskDescriptor {
    pub disks: u32,
    /// GB per disk
    pub size: f64,
    #[serde(default)]
    pub ssd: bool,
}

impl DiskDescriptor {
    pub fn total_size(&self) -> f64 {
        self.disks as f64 * self.size
    }

    /// Parses a human readable storage summary. EBS-only instances and
    /// unparseable summaries have no local disk.
    pub fn parse_storage(summary: &str) -> Option<DiskDescriptor> {
        if summary.contains("EBS") {
            return None;
        }
        let caps = STORAGE_SUMMARY.captures(summary.trim())?;
        let disks = caps
            .get(1)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(1);
        let size = caps[2].replace(',', "").parse::<f64>().ok()?;
        Some(DiskDescriptor {
            disks,
            size,
            ssd: summary.contains("SSD"),
        })
    }
}

/// Reservation pricing for one instance, keyed by `<term>`, `<term>Hourly`
/// and `<term>-effectiveHourly`. Entries are kept as raw JSON so a null or
/// malformed entry only affects its own key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationPriceRecord(pub HashMap<String, serde_json::Value>);

impl ReservationPriceRecord {
    /// Returns the value for `key`, or NaN when absent or not a number.
    pub fn value(&self, key: &str) -> f64 {
        self.0
            .get(key)
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(f64::NAN)
    }

    pub fn upfront_key(term: &str) -> String {
        term.to_string()
    }

    pub fn hourly_key(term: &str) -> String {
        format!("{term}Hourly")
    }

    pub fn effective_hourly_key(term: &str) -> String {
        format!("{term}-effectiveHourly")
    }

    pub fn covers_term(&self, term: &str) -> bool {
        self.0.contains_key(&Self::upfront_key(term))
            || self.0.contains_key(&Self::effective_hourly_key(term))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Hourly(f64),
    Reserved(ReservationPriceRecord),
    /// Anything the catalog carries that is neither a number nor a price record.
    Unrecognized(serde_json::Value),
}

/// region -> reservation class -> operating system or label -> price
pub type PriceTable = HashMap<String, HashMap<String, HashMap<String, RawPrice>>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceType {
    #[serde(alias = "name")]
    pub api_name: String,
    #[serde(alias = "cpus", default)]
    pub vcpus: f64,
    #[serde(alias = "ram", default)]
    pub memory: f64,
    #[serde(alias = "storage", default, deserialize_with = "deserialize_disk")]
    pub disk: Option<DiskDescriptor>,
    #[serde(default)]
    pub network_performance: String,
    #[serde(default)]
    pub prices: PriceTable,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
}

impl InstanceType {
    /// `family.size` split into its two parts. A name without a dot has an
    /// empty size.
    pub fn family_and_size(&self) -> (&str, &str) {
        self.api_name
            .split_once('.')
            .unwrap_or((self.api_name.as_str(), ""))
    }

    /// Whether the user picked this instance in calculator mode.
    pub fn is_selected(&self) -> bool {
        self.quantity.is_some_and(|q| q != 0.0 && !q.is_nan())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DiskField {
    Descriptor(DiskDescriptor),
    Summary(String),
}

fn deserialize_disk<'de, D>(deserializer: D) -> Result<Option<DiskDescriptor>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<DiskField>::deserialize(deserializer)? {
        Some(DiskField::Descriptor(disk)) => Some(disk),
        Some(DiskField::Summary(summary)) => {
            let disk = DiskDescriptor::parse_storage(&summary);
            if disk.is_none() {
                debug!("No local disk for storage summary {summary:?}");
            }
            disk
        }
        None => None,
    })
}

/// Loads a JSON array of instance records.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<InstanceType>> {
    let catalog_str = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read catalog file: {}", path.as_ref().display()))?;

    let instances: Vec<InstanceType> = serde_json::from_str(&catalog_str)
        .with_context(|| format!("Failed to parse catalog file: {}", path.as_ref().display()))?;
    debug!("Loaded {} instance types", instances.len());
    Ok(instances)
}
