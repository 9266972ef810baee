//! Display formatting for prices, ratios and disks. Every function is total:
//! missing input renders as "n/a".

use crate::core::catalog::DiskDescriptor;
use crate::core::pricing::is_missing;

pub const NOT_AVAILABLE: &str = "n/a";

const NBSP: char = '\u{00A0}';

pub fn format_price(value: Option<f64>) -> String {
    match value {
        Some(v) if !is_missing(value) => format!("${v:.3}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Formats a fraction as a whole percentage, rounding halves up.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if !is_missing(value) => format!("{}%", (100.0 * v + 0.5).floor()),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_disk(disk: Option<&DiskDescriptor>) -> String {
    let Some(disk) = disk else {
        return NOT_AVAILABLE.to_string();
    };
    let mut out = format!(
        "{disks}{NBSP}×{NBSP}{size}{NBSP}GB",
        disks = disk.disks,
        size = disk.size
    );
    if disk.ssd {
        out.push(NBSP);
        out.push_str("SSD");
    }
    out
}

pub fn total_disk_size(disk: Option<&DiskDescriptor>) -> Option<f64> {
    disk.map(DiskDescriptor::total_size)
}

pub fn format_total_disk(disk: Option<&DiskDescriptor>) -> String {
    total_disk_size(disk).map_or(NOT_AVAILABLE.to_string(), |size| size.to_string())
}

fn short_size(size: &str) -> Option<&'static str> {
    Some(match size {
        "micro" => "µ",
        "small" => "s",
        "medium" => "m",
        "large" => "l",
        "xlarge" => "xl",
        "2xlarge" => "2xl",
        "4xlarge" => "4xl",
        "8xlarge" => "8xl",
        _ => return None,
    })
}

/// Abbreviates the size part of `family.size`. Sizes without an
/// abbreviation are kept as they are.
pub fn short_size_code(api_name: &str) -> String {
    match api_name.split_once('.') {
        Some((family, size)) => format!("{family}.{}", short_size(size).unwrap_or(size)),
        None => api_name.to_string(),
    }
}
