use std::{fmt, str::FromStr};

use eyre::{Context, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Statistics of one measured operation, as found in a benchmark document
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q10: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q25: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q75: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q90: Option<f64>,
}

impl BenchmarkRecord {
    pub fn count(&self) -> Result<f64, ChartError> {
        self.count.ok_or_else(|| ChartError::MissingField {
            field: "count",
            name: self.name.clone(),
        })
    }

    /// `[min, q25, median, q75, max]`, the shape a box plot consumes
    pub fn five_number_summary(&self) -> Result<FiveNumberSummary, ChartError> {
        let field = |value: Option<f64>, field: &'static str| {
            value.ok_or_else(|| ChartError::MissingField {
                field,
                name: self.name.clone(),
            })
        };
        Ok(FiveNumberSummary([
            field(self.min, "min")?,
            field(self.q25, "q25")?,
            field(self.median, "median")?,
            field(self.q75, "q75")?,
            field(self.max, "max")?,
        ]))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveNumberSummary(pub [f64; 5]);

impl FiveNumberSummary {
    pub fn min(&self) -> f64 {
        self.0[0]
    }

    pub fn q25(&self) -> f64 {
        self.0[1]
    }

    pub fn median(&self) -> f64 {
        self.0[2]
    }

    pub fn q75(&self) -> f64 {
        self.0[3]
    }

    pub fn max(&self) -> f64 {
        self.0[4]
    }
}

/// Whether a document is split into one chart group per `chain`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    Grouped,
    #[default]
    Ungrouped,
}

/// All records parsed from one input file
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BenchmarkDocument {
    records: Vec<BenchmarkRecord>,
    grouping: Grouping,
}

impl BenchmarkDocument {
    /// A single record carrying `chain` makes the whole document chain grouped
    pub fn new(records: Vec<BenchmarkRecord>) -> Self {
        let grouping = if records.iter().any(|r| r.chain.is_some()) {
            Grouping::Grouped
        } else {
            Grouping::Ungrouped
        };
        Self { records, grouping }
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let records: Vec<BenchmarkRecord> =
            serde_json::from_str(data).context("Parse benchmark records")?;
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    pub fn grouping(&self) -> Grouping {
        self.grouping
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct chains, in order of first appearance
    pub fn chains(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter_map(|r| r.chain.as_deref())
            .unique()
            .collect()
    }

    /// Distinct names, in order of first appearance
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).unique().collect()
    }

    pub fn records_for_chain<'a>(
        &'a self,
        chain: &'a str,
    ) -> impl Iterator<Item = &'a BenchmarkRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.chain.as_deref() == Some(chain))
    }

    pub fn records_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a BenchmarkRecord> + 'a {
        self.records.iter().filter(move |r| r.name == name)
    }
}

/// Central tendency statistic plotted by the bar charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatMode {
    Mean,
    Median,
    Total,
}

impl StatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatMode::Mean => "mean",
            StatMode::Median => "median",
            StatMode::Total => "total",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StatMode::Mean => "Mean",
            StatMode::Median => "Median",
            StatMode::Total => "Total",
        }
    }

    /// Totals are reported in seconds, everything else in milliseconds
    pub fn unit(&self) -> &'static str {
        match self {
            StatMode::Mean | StatMode::Median => "(ms)",
            StatMode::Total => "(s)",
        }
    }

    pub fn value(&self, record: &BenchmarkRecord) -> Option<f64> {
        match self {
            StatMode::Mean => record.mean,
            StatMode::Median => record.median,
            StatMode::Total => record.total,
        }
    }
}

impl fmt::Display for StatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatMode {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mean" => Ok(StatMode::Mean),
            "median" => Ok(StatMode::Median),
            "total" => Ok(StatMode::Total),
            other => Err(ChartError::UnknownMode(other.to_owned())),
        }
    }
}
