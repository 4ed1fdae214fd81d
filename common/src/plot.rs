use core::fmt::Debug;
use std::{
    cell::RefCell,
    fs::create_dir_all,
    path::{Path, PathBuf},
};

use eyre::{Context, Result};

use crate::{error::ChartError, record::FiveNumberSummary};

/// Orientation of the x axis tick labels
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LabelRotation {
    None,
    #[default]
    Rotate90,
    Rotate180,
    Rotate270,
}

impl TryFrom<u16> for LabelRotation {
    type Error = ChartError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(LabelRotation::None),
            90 => Ok(LabelRotation::Rotate90),
            180 => Ok(LabelRotation::Rotate180),
            270 => Ok(LabelRotation::Rotate270),
            other => Err(ChartError::UnsupportedRotation(other)),
        }
    }
}

/// One bar chart, ready to be drawn
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub filepath: PathBuf,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// `(x tick label, bar height)`, in drawing order
    pub bars: Vec<(String, f64)>,
}

/// One box plot, ready to be drawn
#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlotSpec {
    pub filepath: PathBuf,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub boxes: Vec<(String, FiveNumberSummary)>,
}

/// Draws chart specs to image files
pub trait ChartRenderer: Debug {
    fn bar_chart(&self, spec: &BarChartSpec) -> Result<()>;
    fn box_plot(&self, spec: &BoxPlotSpec) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderedChart {
    Bar(BarChartSpec),
    Box(BoxPlotSpec),
}

impl RenderedChart {
    pub fn filepath(&self) -> &Path {
        match self {
            RenderedChart::Bar(spec) => &spec.filepath,
            RenderedChart::Box(spec) => &spec.filepath,
        }
    }
}

/// Keeps the specs it is handed instead of drawing them
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    charts: RefCell<Vec<RenderedChart>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn charts(&self) -> Vec<RenderedChart> {
        self.charts.borrow().clone()
    }

    pub fn bar_charts(&self) -> Vec<BarChartSpec> {
        self.charts
            .borrow()
            .iter()
            .filter_map(|chart| match chart {
                RenderedChart::Bar(spec) => Some(spec.clone()),
                RenderedChart::Box(_) => None,
            })
            .collect()
    }

    pub fn box_plots(&self) -> Vec<BoxPlotSpec> {
        self.charts
            .borrow()
            .iter()
            .filter_map(|chart| match chart {
                RenderedChart::Box(spec) => Some(spec.clone()),
                RenderedChart::Bar(_) => None,
            })
            .collect()
    }
}

impl ChartRenderer for RecordingRenderer {
    fn bar_chart(&self, spec: &BarChartSpec) -> Result<()> {
        self.charts.borrow_mut().push(RenderedChart::Bar(spec.clone()));
        Ok(())
    }

    fn box_plot(&self, spec: &BoxPlotSpec) -> Result<()> {
        self.charts.borrow_mut().push(RenderedChart::Box(spec.clone()));
        Ok(())
    }
}

/// Creates `dir` and its parents, an existing directory is not an error
pub fn ensure_plot_dir(dir: &Path) -> Result<()> {
    create_dir_all(dir).context(format!("Create plot directory {}", dir.display()))
}
