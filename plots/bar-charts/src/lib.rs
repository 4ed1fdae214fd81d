use std::path::PathBuf;

use common::{
    config::Settings,
    plot::{BarChartSpec, ChartRenderer},
    record::{BenchmarkDocument, BenchmarkRecord, Grouping, StatMode},
};
use eyre::Result;
use tracing::{debug, error, warn};

pub const X_LABEL: &str = "Query Name";

/// Central tendency bar charts, one per document or one per chain
#[derive(Debug, Clone)]
pub struct BarCharts<'a> {
    settings: &'a Settings,
}

impl<'a> BarCharts<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Renders every chart of `document` and returns the files written
    ///
    /// An unknown `mode` is reported and nothing is drawn.
    pub fn render(
        &self,
        document: &BenchmarkDocument,
        filename: &str,
        mode: &str,
        renderer: &dyn ChartRenderer,
    ) -> Result<Vec<PathBuf>> {
        let mode = match mode.parse::<StatMode>() {
            Ok(mode) => mode,
            Err(err) => {
                error!("{err}, skipping bar charts for {filename}");
                return Ok(Vec::new());
            }
        };

        let mut written = Vec::new();
        for spec in self.chart_specs(document, filename, mode) {
            renderer.bar_chart(&spec)?;
            written.push(spec.filepath);
        }
        Ok(written)
    }

    pub fn chart_specs(
        &self,
        document: &BenchmarkDocument,
        filename: &str,
        mode: StatMode,
    ) -> Vec<BarChartSpec> {
        let dir = self.settings.bar_chart_dir(mode);
        match document.grouping() {
            Grouping::Grouped => {
                let unchained = document
                    .records()
                    .iter()
                    .filter(|r| r.chain.is_none())
                    .count();
                if unchained > 0 {
                    warn!("{unchained} records without a chain in {filename} are not plotted");
                }

                document
                    .chains()
                    .into_iter()
                    .filter_map(|chain| {
                        let bars = self.bars(document.records_for_chain(chain), mode);
                        if bars.is_empty() {
                            debug!("Nothing above threshold for chain {chain} in {filename}");
                            return None;
                        }
                        Some(self.spec(dir.join(format!("{chain}_{filename}.png")), mode, bars))
                    })
                    .collect()
            }
            Grouping::Ungrouped => {
                let bars = self.bars(document.records().iter(), mode);
                if bars.is_empty() {
                    debug!("Nothing above threshold in {filename}");
                    return Vec::new();
                }
                vec![self.spec(dir.join(format!("{filename}.png")), mode, bars)]
            }
        }
    }

    /// Records strictly above the threshold, as `(name, value)`
    fn bars<'r>(
        &self,
        records: impl Iterator<Item = &'r BenchmarkRecord>,
        mode: StatMode,
    ) -> Vec<(String, f64)> {
        let threshold = self.settings.bar.threshold;
        records
            .filter_map(|r| {
                mode.value(r)
                    .filter(|v| *v > threshold)
                    .map(|v| (r.name.clone(), v))
            })
            .collect()
    }

    fn spec(&self, filepath: PathBuf, mode: StatMode, bars: Vec<(String, f64)>) -> BarChartSpec {
        BarChartSpec {
            filepath,
            title: format!("{} Runtime", mode.title()),
            x_label: X_LABEL.to_owned(),
            y_label: format!("{} Runtime {}", mode.title(), mode.unit()),
            bars,
        }
    }
}
