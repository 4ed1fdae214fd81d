use std::path::Path;

use bar_charts::BarCharts;
use box_plot::BoxPlots;
use common::{
    config::Settings,
    loader::{LoadedDocument, load},
    plot::{ChartRenderer, RecordingRenderer},
};
use eyre::Result;
use plot_common::PlotRenderer;
use tracing::debug;

pub enum Chart {
    /// Mode is kept as given, an unknown one is reported per file
    Bar(String),
    BoxPlot,
}

/// Renders every document of `directory`, one after the other
///
/// The first unreadable or malformed document aborts the run.
pub fn render_directory(
    directory: &Path,
    settings: &Settings,
    chart: &Chart,
    dry_run: bool,
) -> Result<()> {
    let plot_renderer;
    let recorder = RecordingRenderer::new();
    let renderer: &dyn ChartRenderer = if dry_run {
        &recorder
    } else {
        plot_renderer = PlotRenderer::new(settings)?;
        &plot_renderer
    };

    for loaded in load(directory)? {
        let LoadedDocument { document, filename } = loaded?;
        let written = match chart {
            Chart::Bar(mode) => {
                BarCharts::new(settings).render(&document, &filename, mode, renderer)?
            }
            Chart::BoxPlot => BoxPlots::new(settings).render(&document, &filename, renderer)?,
        };
        debug!("{} charts for {filename}", written.len());
        if dry_run {
            for path in written {
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}
