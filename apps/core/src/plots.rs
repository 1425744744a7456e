use crate::chart::{
    AxisName, CartesianLayout, PlotId, PlotLayout, PolarLayout, SeriesColor, SeriesDef,
    SeriesKind, SeriesPatch,
};
use crate::radar::SWEEP_RADII;

/// Series index of the accumulated radar point cloud.
pub const RADAR_POINTS: usize = 0;
/// Series index of the radar sweep line.
pub const RADAR_SWEEP: usize = 1;
pub const IR_SERIES: usize = 0;
pub const TEMPERATURE_SERIES: usize = 0;
pub const HUMIDITY_SERIES: usize = 1;

/// Margin added around the IR readings when rescaling its axis.
pub const IR_MARGIN: f64 = 1.0;
pub const TEMPERATURE_MARGIN: f64 = 1.0;
/// Humidity readings jitter more, so its band is wider.
pub const HUMIDITY_MARGIN: f64 = 5.0;

/// Series definitions and layout for every plot, in initialization order.
pub fn default_plots() -> Vec<(PlotId, Vec<SeriesDef>, PlotLayout)> {
    vec![
        (PlotId::Radar, radar_series(), PlotLayout::Polar(radar_layout())),
        (PlotId::Ir, ir_series(), PlotLayout::Cartesian(ir_layout())),
        (PlotId::Dht, dht_series(), PlotLayout::Cartesian(dht_layout())),
    ]
}

pub const fn radar_layout() -> PolarLayout {
    PolarLayout {
        radial_range: SWEEP_RADII,
        radial_tick: 20.0,
        angular_range: [0.0, 180.0],
        angular_tick: 22.5,
        clockwise: true,
        rotation: 0.0,
    }
}

fn radar_series() -> Vec<SeriesDef> {
    vec![
        SeriesDef {
            name: "Points",
            kind: SeriesKind::PolarMarkers,
            color: SeriesColor::Lime,
            axis: AxisName::Y,
            initial: SeriesPatch::Polar {
                r: Vec::new(),
                theta: Vec::new(),
            },
        },
        SeriesDef {
            name: "Sweep",
            kind: SeriesKind::PolarLine,
            color: SeriesColor::Lime,
            axis: AxisName::Y,
            initial: SeriesPatch::Polar {
                r: SWEEP_RADII.to_vec(),
                theta: vec![0.0, 0.0],
            },
        },
    ]
}

const fn ir_layout() -> CartesianLayout {
    CartesianLayout {
        title: "IR Sensor",
        x_title: "Last 20 Readings",
        y_title: "IR Value",
        y2_title: None,
    }
}

fn ir_series() -> Vec<SeriesDef> {
    vec![line("IR Value", SeriesColor::Red, AxisName::Y)]
}

const fn dht_layout() -> CartesianLayout {
    CartesianLayout {
        title: "DHT Sensor",
        x_title: "Last 20 Readings",
        y_title: "Temp (F)",
        y2_title: Some("Humidity (%)"),
    }
}

fn dht_series() -> Vec<SeriesDef> {
    vec![
        line("Temp (F)", SeriesColor::Green, AxisName::Y),
        line("Humidity (%)", SeriesColor::Yellow, AxisName::Y2),
    ]
}

const fn line(name: &'static str, color: SeriesColor, axis: AxisName) -> SeriesDef {
    SeriesDef {
        name,
        kind: SeriesKind::Line,
        color,
        axis,
        initial: SeriesPatch::Cartesian {
            x: Vec::new(),
            y: Vec::new(),
        },
    }
}
