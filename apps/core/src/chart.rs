use std::collections::BTreeMap;

use serde::Serialize;

/// The three plots of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotId {
    Radar,
    Ir,
    Dht,
}

impl PlotId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Radar => "radar-plot",
            Self::Ir => "ir-plot",
            Self::Dht => "dht-plot",
        }
    }
}

/// Value axis a series is drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AxisName {
    Y,
    Y2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    PolarMarkers,
    PolarLine,
    Line,
}

/// Named palette; each front end maps it to its own color type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesColor {
    Lime,
    Red,
    Green,
    Yellow,
}

/// Series coordinates. `Theta` replaces only the angular coordinates of a
/// polar series and keeps its radii.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesPatch {
    Cartesian { x: Vec<f64>, y: Vec<f64> },
    Polar { r: Vec<f64>, theta: Vec<f64> },
    Theta(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDef {
    pub name: &'static str,
    pub kind: SeriesKind,
    pub color: SeriesColor,
    pub axis: AxisName,
    pub initial: SeriesPatch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolarLayout {
    pub radial_range: [f64; 2],
    pub radial_tick: f64,
    pub angular_range: [f64; 2],
    pub angular_tick: f64,
    pub clockwise: bool,
    /// Screen direction of 0°, in degrees counter-clockwise from east.
    pub rotation: f64,
}

impl PolarLayout {
    /// Projects `(theta, r)` onto a unit disc, y pointing up.
    pub fn project(&self, theta: f64, r: f64) -> (f64, f64) {
        let span = self.radial_range[1] - self.radial_range[0];
        let scale = if span > 0.0 {
            ((r - self.radial_range[0]) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let direction = if self.clockwise { -theta } else { theta };
        let radians = (self.rotation + direction).to_radians();
        (radians.cos() * scale, radians.sin() * scale)
    }

    /// Angular tick positions across the angular range, both ends included.
    pub fn angular_ticks(&self) -> Vec<f64> {
        ticks(self.angular_range, self.angular_tick)
    }

    /// Radial grid rings, excluding the center.
    pub fn radial_ticks(&self) -> Vec<f64> {
        ticks(self.radial_range, self.radial_tick)
            .into_iter()
            .filter(|tick| *tick > self.radial_range[0])
            .collect()
    }
}

fn ticks(range: [f64; 2], step: f64) -> Vec<f64> {
    if step <= 0.0 || range[1] < range[0] {
        return vec![range[0]];
    }
    let mut out = Vec::new();
    let mut index = 0_u32;
    loop {
        let tick = f64::from(index).mul_add(step, range[0]);
        if tick > range[1] + f64::EPSILON {
            break;
        }
        out.push(tick);
        index += 1;
    }
    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartesianLayout {
    pub title: &'static str,
    pub x_title: &'static str,
    pub y_title: &'static str,
    pub y2_title: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlotLayout {
    Polar(PolarLayout),
    Cartesian(CartesianLayout),
}

/// Rendering surface driven by the session.
pub trait ChartSink {
    fn initialize_plot(&mut self, plot: PlotId, series: Vec<SeriesDef>, layout: PlotLayout);

    fn replace_series(&mut self, plot: PlotId, index: usize, patch: SeriesPatch);

    fn set_axis_range(&mut self, plot: PlotId, axis: AxisName, range: [f64; 2]);
}

/// A chart operation, as recorded by the `Vec<ChartCommand>` sink.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartCommand {
    InitializePlot {
        plot: PlotId,
        series: Vec<SeriesDef>,
        layout: PlotLayout,
    },
    ReplaceSeries {
        plot: PlotId,
        index: usize,
        patch: SeriesPatch,
    },
    SetAxisRange {
        plot: PlotId,
        axis: AxisName,
        range: [f64; 2],
    },
}

impl ChartSink for Vec<ChartCommand> {
    fn initialize_plot(&mut self, plot: PlotId, series: Vec<SeriesDef>, layout: PlotLayout) {
        self.push(ChartCommand::InitializePlot {
            plot,
            series,
            layout,
        });
    }

    fn replace_series(&mut self, plot: PlotId, index: usize, patch: SeriesPatch) {
        self.push(ChartCommand::ReplaceSeries { plot, index, patch });
    }

    fn set_axis_range(&mut self, plot: PlotId, axis: AxisName, range: [f64; 2]) {
        self.push(ChartCommand::SetAxisRange { plot, axis, range });
    }
}

/// Current coordinates of one series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesState {
    pub name: &'static str,
    pub kind: SeriesKind,
    pub color: SeriesColor,
    pub axis: AxisName,
    pub data: SeriesData,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeriesData {
    Cartesian { x: Vec<f64>, y: Vec<f64> },
    Polar { r: Vec<f64>, theta: Vec<f64> },
}

impl SeriesData {
    fn from_patch(patch: SeriesPatch) -> Self {
        match patch {
            SeriesPatch::Cartesian { x, y } => Self::Cartesian { x, y },
            SeriesPatch::Polar { r, theta } => Self::Polar { r, theta },
            SeriesPatch::Theta(theta) => Self::Polar { r: Vec::new(), theta },
        }
    }

    fn apply(&mut self, patch: SeriesPatch) {
        match (self, patch) {
            (Self::Polar { theta, .. }, SeriesPatch::Theta(next)) => *theta = next,
            (data, patch) => *data = Self::from_patch(patch),
        }
    }

    /// Zips the coordinates into plot points, `(x, y)` or `(theta, r)`.
    pub fn points(&self) -> Vec<(f64, f64)> {
        match self {
            Self::Cartesian { x, y } => x.iter().copied().zip(y.iter().copied()).collect(),
            Self::Polar { r, theta } => theta.iter().copied().zip(r.iter().copied()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotState {
    pub layout: PlotLayout,
    pub series: Vec<SeriesState>,
    axis_ranges: BTreeMap<AxisName, [f64; 2]>,
}

impl PlotState {
    pub fn axis_range(&self, axis: AxisName) -> Option<[f64; 2]> {
        self.axis_ranges.get(&axis).copied()
    }
}

/// Retained chart state that front ends draw from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartModel {
    plots: BTreeMap<PlotId, PlotState>,
}

impl ChartModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plot(&self, plot: PlotId) -> Option<&PlotState> {
        self.plots.get(&plot)
    }

    pub fn series(&self, plot: PlotId, index: usize) -> Option<&SeriesState> {
        self.plots.get(&plot)?.series.get(index)
    }

    pub fn axis_range(&self, plot: PlotId, axis: AxisName) -> Option<[f64; 2]> {
        self.plots.get(&plot)?.axis_range(axis)
    }
}

impl ChartSink for ChartModel {
    fn initialize_plot(&mut self, plot: PlotId, series: Vec<SeriesDef>, layout: PlotLayout) {
        let series = series
            .into_iter()
            .map(|def| SeriesState {
                name: def.name,
                kind: def.kind,
                color: def.color,
                axis: def.axis,
                data: SeriesData::from_patch(def.initial),
            })
            .collect();
        self.plots.insert(
            plot,
            PlotState {
                layout,
                series,
                axis_ranges: BTreeMap::new(),
            },
        );
    }

    fn replace_series(&mut self, plot: PlotId, index: usize, patch: SeriesPatch) {
        match self
            .plots
            .get_mut(&plot)
            .and_then(|state| state.series.get_mut(index))
        {
            Some(series) => series.data.apply(patch),
            None => log::warn!("replace on unknown series {}[{index}]", plot.as_str()),
        }
    }

    fn set_axis_range(&mut self, plot: PlotId, axis: AxisName, range: [f64; 2]) {
        match self.plots.get_mut(&plot) {
            Some(state) => {
                state.axis_ranges.insert(axis, range);
            }
            None => log::warn!("relayout on unknown plot {}", plot.as_str()),
        }
    }
}
