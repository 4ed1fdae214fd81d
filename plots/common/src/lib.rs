use std::{ops::Range, path::Path};

use common::{
    config::{FigureSettings, Settings},
    plot::{BarChartSpec, BoxPlotSpec, ChartRenderer, LabelRotation, ensure_plot_dir},
};
use eyre::Result;
use plotters::{
    coord::{Shift, ranged1d::SegmentValue},
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};
use tracing::debug;

const TITLE_FONT_SIZE: u32 = 28;
const AXIS_LABEL_FONT_SIZE: u32 = 20;
const TICK_LABEL_FONT_SIZE: u32 = 14;
const TICK_LABEL_OFFSET: i32 = 8;
const Y_LABEL_AREA_SIZE: u32 = 90;

const BAR_COLOR: RGBColor = RGBColor(135, 206, 235);
const BOX_COLOR: RGBColor = RGBColor(66, 133, 244);

type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Figure {
    size: (u32, u32),
    rotation: LabelRotation,
}

impl Figure {
    fn new(settings: &FigureSettings) -> Result<Self> {
        Ok(Self {
            size: (settings.width, settings.height),
            rotation: LabelRotation::try_from(settings.x_label_rotation)?,
        })
    }

    /// Anchored so the text always starts at the axis and runs away from the plot
    fn tick_label_style(&self) -> TextStyle<'static> {
        let (transform, anchor) = match self.rotation {
            LabelRotation::None => (FontTransform::None, Pos::new(HPos::Center, VPos::Top)),
            LabelRotation::Rotate90 => {
                (FontTransform::Rotate90, Pos::new(HPos::Left, VPos::Center))
            }
            LabelRotation::Rotate180 => {
                (FontTransform::Rotate180, Pos::new(HPos::Center, VPos::Bottom))
            }
            LabelRotation::Rotate270 => {
                (FontTransform::Rotate270, Pos::new(HPos::Right, VPos::Center))
            }
        };
        let style: TextStyle = ("sans-serif", TICK_LABEL_FONT_SIZE)
            .into_font()
            .transform(transform)
            .into();
        style.pos(anchor)
    }

    /// Room below the plot for the tick labels and the axis description
    fn x_label_area_size<S: AsRef<str>>(&self, labels: &[S]) -> u32 {
        let longest = labels
            .iter()
            .map(|l| l.as_ref().chars().count())
            .max()
            .unwrap_or(0) as u32;
        match self.rotation {
            LabelRotation::None | LabelRotation::Rotate180 => 2 * TICK_LABEL_FONT_SIZE + 40,
            LabelRotation::Rotate90 | LabelRotation::Rotate270 => {
                (longest * TICK_LABEL_FONT_SIZE * 6 / 10 + 50).min(self.size.1 / 2)
            }
        }
    }

    /// Draws `labels` at the matching `points` just below the x axis
    fn draw_tick_labels(
        &self,
        root: &Canvas,
        labels: &[&str],
        points: &[(i32, i32)],
    ) -> Result<()> {
        let style = self.tick_label_style();
        for (label, point) in labels.iter().zip(points) {
            root.draw_text(label, &style, *point)?;
        }
        Ok(())
    }
}

/// Draws charts as PNG files through plotters' bitmap backend
#[derive(Debug, Clone)]
pub struct PlotRenderer {
    bar: Figure,
    box_plot: Figure,
}

impl PlotRenderer {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            bar: Figure::new(&settings.bar.figure)?,
            box_plot: Figure::new(&settings.box_plot)?,
        })
    }

    /// Returns the anchor points of the tick labels
    fn draw_bar_chart(&self, root: &Canvas, spec: &BarChartSpec) -> Result<Vec<(i32, i32)>> {
        let labels = spec.bars.iter().map(|(l, _)| l.as_str()).collect::<Vec<_>>();
        let y_max = spec.bars.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max) * 1.1;

        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, ("sans-serif", TITLE_FONT_SIZE))
            .margin(20)
            .x_label_area_size(self.bar.x_label_area_size(&labels))
            .y_label_area_size(Y_LABEL_AREA_SIZE)
            .build_cartesian_2d(
                segments(labels.len()).into_segmented(),
                0.0..y_max.max(1.0),
            )?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(segments(labels.len()).len() + 1)
            .x_label_formatter(&|_| String::new())
            .x_desc(&spec.x_label)
            .y_desc(&spec.y_label)
            .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
            .draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(BAR_COLOR.filled())
                .margin(4)
                .data(spec.bars.iter().enumerate().map(|(idx, (_, v))| (idx, *v))),
        )?;

        let axis_y = chart.plotting_area().get_pixel_range().1.end + TICK_LABEL_OFFSET;
        let points = (0..labels.len())
            .map(|idx| (chart.backend_coord(&(SegmentValue::CenterOf(idx), 0.0)).0, axis_y))
            .collect::<Vec<_>>();
        self.bar.draw_tick_labels(root, &labels, &points)?;
        Ok(points)
    }

    fn draw_box_plot(&self, root: &Canvas, spec: &BoxPlotSpec) -> Result<Vec<(i32, i32)>> {
        let labels = spec.boxes.iter().map(|(l, _)| l.as_str()).collect::<Vec<_>>();
        let lowest = spec
            .boxes
            .iter()
            .map(|(_, s)| s.min())
            .fold(f64::INFINITY, f64::min);
        let highest = spec
            .boxes
            .iter()
            .map(|(_, s)| s.max())
            .fold(f64::NEG_INFINITY, f64::max);
        let (lowest, highest) = if lowest.is_finite() && highest.is_finite() {
            (lowest, highest)
        } else {
            (0.0, 1.0)
        };
        let pad = ((highest - lowest) * 0.05).max(1.0);

        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, ("sans-serif", TITLE_FONT_SIZE))
            .margin(20)
            .x_label_area_size(self.box_plot.x_label_area_size(&labels))
            .y_label_area_size(Y_LABEL_AREA_SIZE)
            .build_cartesian_2d(
                segments(labels.len()).into_segmented(),
                (lowest - pad)..(highest + pad),
            )?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(segments(labels.len()).len() + 1)
            .x_label_formatter(&|_| String::new())
            .x_desc(&spec.x_label)
            .y_desc(&spec.y_label)
            .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
            .draw()?;

        let plot_width = chart.plotting_area().dim_in_pixel().0 as i32;
        let segment_count = segments(labels.len()).len() + 1;
        let half_width = (plot_width / segment_count as i32 / 4).max(2);
        let cap_width = half_width / 2;

        for (idx, (_, summary)) in spec.boxes.iter().enumerate() {
            let at = |value: f64| chart.backend_coord(&(SegmentValue::CenterOf(idx), value));
            let (x, y_min) = at(summary.min());
            let (_, y_q25) = at(summary.q25());
            let (_, y_median) = at(summary.median());
            let (_, y_q75) = at(summary.q75());
            let (_, y_max) = at(summary.max());

            root.draw(&Rectangle::new(
                [(x - half_width, y_q75), (x + half_width, y_q25)],
                BOX_COLOR.mix(0.3).filled(),
            ))?;
            root.draw(&Rectangle::new(
                [(x - half_width, y_q75), (x + half_width, y_q25)],
                BLACK.stroke_width(1),
            ))?;
            for segment in [
                [(x, y_q75), (x, y_max)],
                [(x, y_q25), (x, y_min)],
                [(x - cap_width, y_max), (x + cap_width, y_max)],
                [(x - cap_width, y_min), (x + cap_width, y_min)],
            ] {
                root.draw(&PathElement::new(segment.to_vec(), BLACK.stroke_width(1)))?;
            }
            root.draw(&PathElement::new(
                vec![(x - half_width, y_median), (x + half_width, y_median)],
                RED.stroke_width(2),
            ))?;
        }

        let axis_y = chart.plotting_area().get_pixel_range().1.end + TICK_LABEL_OFFSET;
        let points = (0..labels.len())
            .map(|idx| (chart.backend_coord(&(SegmentValue::CenterOf(idx), lowest)).0, axis_y))
            .collect::<Vec<_>>();
        self.box_plot.draw_tick_labels(root, &labels, &points)?;
        Ok(points)
    }
}

fn ensure_parent(filepath: &Path) -> Result<()> {
    match filepath.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_plot_dir(parent),
        _ => Ok(()),
    }
}

/// One segment per label, never a single one since that range is degenerate
fn segments(labels: usize) -> Range<usize> {
    0..labels.max(2) - 1
}

impl ChartRenderer for PlotRenderer {
    fn bar_chart(&self, spec: &BarChartSpec) -> Result<()> {
        ensure_parent(&spec.filepath)?;
        let root = BitMapBackend::new(&spec.filepath, self.bar.size).into_drawing_area();
        self.draw_bar_chart(&root, spec)?;
        root.present()?;
        debug!("Generated {}", spec.filepath.display());
        Ok(())
    }

    fn box_plot(&self, spec: &BoxPlotSpec) -> Result<()> {
        ensure_parent(&spec.filepath)?;
        let root = BitMapBackend::new(&spec.filepath, self.box_plot.size).into_drawing_area();
        self.draw_box_plot(&root, spec)?;
        root.present()?;
        debug!("Generated {}", spec.filepath.display());
        Ok(())
    }
}
