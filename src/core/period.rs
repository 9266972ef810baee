//! Display periods and their hour multipliers

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

const HOURS_PER_DAY: f64 = 24.0;
const DAYS_PER_YEAR: f64 = 365.25;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Period {
    #[default]
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Period::Hourly => "hourly",
                Period::Daily => "daily",
                Period::Weekly => "weekly",
                Period::Monthly => "monthly",
                Period::Yearly => "yearly",
            }
        )
    }
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::Hourly,
        Period::Daily,
        Period::Weekly,
        Period::Monthly,
        Period::Yearly,
    ];

    /// Number of hours in one period, using average month and year lengths.
    pub fn multiplier(&self) -> f64 {
        match self {
            Period::Hourly => 1.0,
            Period::Daily => HOURS_PER_DAY,
            Period::Weekly => HOURS_PER_DAY * 7.0,
            Period::Monthly => HOURS_PER_DAY * DAYS_PER_YEAR / 12.0,
            Period::Yearly => HOURS_PER_DAY * DAYS_PER_YEAR,
        }
    }
}

impl FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hourly" => Ok(Period::Hourly),
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            "yearly" => Ok(Period::Yearly),
            _ => Err(anyhow::anyhow!("Invalid period: {}", s)),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
