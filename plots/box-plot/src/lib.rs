use std::path::PathBuf;

use common::{
    config::Settings,
    plot::{BoxPlotSpec, ChartRenderer},
    record::{BenchmarkDocument, Grouping},
};
use eyre::{Context, Result};
use tracing::{debug, warn};

pub const X_LABEL: &str = "Chain";
pub const Y_LABEL: &str = "Time (ms)";

/// Distribution box plots, grouped by record name
///
/// A chart is written after every record of a name group and holds the boxes
/// of that group seen so far, so the last write of a group shows all of them.
#[derive(Debug, Clone)]
pub struct BoxPlots<'a> {
    settings: &'a Settings,
}

impl<'a> BoxPlots<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Renders one chart per record and returns the files written, in order
    ///
    /// Charts of the records before a broken one are already written when the
    /// error is returned.
    pub fn render(
        &self,
        document: &BenchmarkDocument,
        filename: &str,
        renderer: &dyn ChartRenderer,
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        self.for_each_spec(document, filename, |spec| {
            renderer.box_plot(&spec)?;
            written.push(spec.filepath);
            Ok(())
        })?;
        Ok(written)
    }

    pub fn chart_specs(
        &self,
        document: &BenchmarkDocument,
        filename: &str,
    ) -> Result<Vec<BoxPlotSpec>> {
        let mut specs = Vec::with_capacity(document.records().len());
        self.for_each_spec(document, filename, |spec| {
            specs.push(spec);
            Ok(())
        })?;
        Ok(specs)
    }

    fn for_each_spec(
        &self,
        document: &BenchmarkDocument,
        filename: &str,
        mut on_spec: impl FnMut(BoxPlotSpec) -> Result<()>,
    ) -> Result<()> {
        for name in document.names() {
            let filepath = self
                .settings
                .output_dir
                .join(format!("{filename}_{name}.png"));
            let mut boxes = Vec::new();
            for record in document.records_named(name) {
                let summary = record
                    .five_number_summary()
                    .context(format!("Box plot of {name} in {filename}"))?;
                let count = record
                    .count()
                    .context(format!("Box plot of {name} in {filename}"))?;
                let label = match (document.grouping(), &record.chain) {
                    (Grouping::Grouped, Some(chain)) => chain.clone(),
                    (Grouping::Grouped, None) => {
                        warn!("Record {name} in {filename} has no chain, labelling it by name");
                        name.to_owned()
                    }
                    (Grouping::Ungrouped, _) => name.to_owned(),
                };
                boxes.push((label, summary));

                on_spec(BoxPlotSpec {
                    filepath: filepath.clone(),
                    title: format!("Runtime Statistics for {count} calls to {name}"),
                    x_label: X_LABEL.to_owned(),
                    y_label: Y_LABEL.to_owned(),
                    boxes: boxes.clone(),
                })?;
            }
            debug!("{} box plots for {name} in {filename}", boxes.len());
        }
        Ok(())
    }
}
