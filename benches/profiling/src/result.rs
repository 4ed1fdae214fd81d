use common::util::{mean, percentile_of_sorted};
use serde::{Deserialize, Serialize};

/// Summary of a set of elapsed times, in milliseconds
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub count: u64,
    pub mean: f64,
    pub min: u64,
    pub max: u64,
    pub q10: u64,
    pub q25: u64,
    pub median: u64,
    pub q75: u64,
    pub q90: u64,
}

impl Distribution {
    /// `sorted` must be in ascending order
    pub fn from_sorted(sorted: &[u64]) -> Self {
        Self {
            count: sorted.len() as u64,
            mean: mean(sorted),
            min: sorted.first().copied().unwrap_or(0),
            max: sorted.last().copied().unwrap_or(0),
            q10: percentile_of_sorted(sorted, 0.1),
            q25: percentile_of_sorted(sorted, 0.25),
            median: percentile_of_sorted(sorted, 0.5),
            q75: percentile_of_sorted(sorted, 0.75),
            q90: percentile_of_sorted(sorted, 0.9),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerStatistics {
    pub name: String,
    #[serde(flatten)]
    pub distribution: Distribution,
    /// Sum of all elapsed times, in seconds
    pub total: f64,
}

impl TimerStatistics {
    pub fn new(name: &str, sorted: &[u64]) -> Self {
        Self {
            name: name.to_owned(),
            distribution: Distribution::from_sorted(sorted),
            total: sorted.iter().sum::<u64>() as f64 / 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerChainTimerStatistics {
    pub name: String,
    pub chain: String,
    #[serde(flatten)]
    pub distribution: Distribution,
}

/// A log entry that could not be parsed, kept for inspection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedEntry {
    pub line: usize,
    pub entry: String,
    pub cause: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_serialize_flat() {
        let stats = TimerStatistics::new("query", &[1000, 2000, 3000]);
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["name"], "query");
        assert_eq!(value["count"], 3);
        assert_eq!(value["median"], 2000);
        assert_eq!(value["min"], 1000);
        assert_eq!(value["max"], 3000);
        assert_eq!(value["total"], 6.0);
        assert!(value.get("distribution").is_none());
    }
}
