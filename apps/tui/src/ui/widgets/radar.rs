use crate::ui::widgets::series_color;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;
use sensor_radar_core::chart::{PlotLayout, PolarLayout, SeriesKind};
use sensor_radar_core::{ChartModel, PlotId};

/// Segments used to approximate each grid arc.
const ARC_SEGMENTS: u32 = 48;
/// Room around the plotted sector, in unit-disc coordinates.
const CANVAS_MARGIN: f64 = 0.12;

pub fn render_radar(charts: &ChartModel, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Radar ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightGreen));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(plot) = charts.plot(PlotId::Radar) else {
        return;
    };
    let PlotLayout::Polar(layout) = &plot.layout else {
        return;
    };
    if inner.width < 8 || inner.height < 4 {
        return;
    }

    let (x_bounds, y_bounds) = sector_bounds(layout);
    let canvas_area = fit_aspect(inner, x_bounds[1] - x_bounds[0], y_bounds[1] - y_bounds[0]);

    f.render_widget(
        Canvas::default()
            .marker(Marker::Braille)
            .paint(|ctx| {
                for radius in layout.radial_ticks() {
                    for (start, end) in arc_segments(layout, radius) {
                        ctx.draw(&CanvasLine {
                            x1: start.0,
                            y1: start.1,
                            x2: end.0,
                            y2: end.1,
                            color: Color::DarkGray,
                        });
                    }
                }

                for theta in layout.angular_ticks() {
                    let (x, y) = layout.project(theta, layout.radial_range[1]);
                    ctx.draw(&CanvasLine {
                        x1: 0.0,
                        y1: 0.0,
                        x2: x,
                        y2: y,
                        color: Color::DarkGray,
                    });
                }

                ctx.layer();

                for series in &plot.series {
                    let color = series_color(series.color);
                    let projected: Vec<(f64, f64)> = series
                        .data
                        .points()
                        .into_iter()
                        .map(|(theta, r)| layout.project(theta, r))
                        .collect();

                    match series.kind {
                        SeriesKind::PolarMarkers => ctx.draw(&Points {
                            coords: &projected,
                            color,
                        }),
                        SeriesKind::PolarLine | SeriesKind::Line => {
                            for pair in projected.windows(2) {
                                ctx.draw(&CanvasLine {
                                    x1: pair[0].0,
                                    y1: pair[0].1,
                                    x2: pair[1].0,
                                    y2: pair[1].1,
                                    color,
                                });
                            }
                        }
                    }
                }

                for theta in layout.angular_ticks() {
                    if (theta % 45.0).abs() > f64::EPSILON {
                        continue;
                    }
                    let (x, y) = layout.project(theta, layout.radial_range[1]);
                    ctx.print(x * 1.08, y * 1.08, format!("{theta}°"));
                }
            })
            .x_bounds(x_bounds)
            .y_bounds(y_bounds),
        canvas_area,
    );
}

/// Bounding box of the angular sector plus the center, with a margin.
pub fn sector_bounds(layout: &PolarLayout) -> ([f64; 2], [f64; 2]) {
    let mut x = [0.0_f64, 0.0_f64];
    let mut y = [0.0_f64, 0.0_f64];

    for (start, end) in arc_segments(layout, layout.radial_range[1]) {
        for (px, py) in [start, end] {
            x = [x[0].min(px), x[1].max(px)];
            y = [y[0].min(py), y[1].max(py)];
        }
    }

    (
        [x[0] - CANVAS_MARGIN, x[1] + CANVAS_MARGIN],
        [y[0] - CANVAS_MARGIN, y[1] + CANVAS_MARGIN],
    )
}

fn arc_segments(layout: &PolarLayout, radius: f64) -> Vec<((f64, f64), (f64, f64))> {
    let [from, to] = layout.angular_range;
    let step = (to - from) / f64::from(ARC_SEGMENTS);
    (0..ARC_SEGMENTS)
        .map(|i| {
            let a = f64::from(i).mul_add(step, from);
            let b = f64::from(i + 1).mul_add(step, from);
            (layout.project(a, radius), layout.project(b, radius))
        })
        .collect()
}

/// Largest centered rect whose cells keep a `width:height` world ratio.
///
/// Terminal cells are roughly twice as tall as they are wide.
pub fn fit_aspect(area: Rect, world_width: f64, world_height: f64) -> Rect {
    if world_width <= 0.0 || world_height <= 0.0 || area.is_empty() {
        return area;
    }

    let cells_per_row = world_width / world_height * 2.0;
    let full_width = f64::from(area.width);
    let full_height = f64::from(area.height);

    let (width, height) = if full_height * cells_per_row <= full_width {
        (full_height * cells_per_row, full_height)
    } else {
        (full_width, full_width / cells_per_row)
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (width, height) = (
        (width.floor() as u16).clamp(1, area.width),
        (height.floor() as u16).clamp(1, area.height),
    );

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
