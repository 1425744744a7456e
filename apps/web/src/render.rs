use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line as TextLine, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph,
    },
    Frame,
};
use sensor_radar_core::chart::{PlotLayout, PlotState, SeriesColor, SeriesKind, SeriesState};
use sensor_radar_core::plots::{HUMIDITY_SERIES, IR_SERIES, TEMPERATURE_SERIES};
use sensor_radar_core::PlotId;

use crate::dashboard::Dashboard;

const fn series_color(color: SeriesColor) -> Color {
    match color {
        SeriesColor::Lime => Color::LightGreen,
        SeriesColor::Red => Color::Red,
        SeriesColor::Green => Color::Green,
        SeriesColor::Yellow => Color::Yellow,
    }
}

pub fn render_dashboard(dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(3),
        ])
        .split(area);

    render_endpoint_line(dashboard, f, main_layout[0]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_layout[1]);

    render_radar_panel(dashboard, f, content[0]);

    let charts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(content[1]);

    if let Some(plot) = dashboard.charts.plot(PlotId::Ir) {
        render_series(plot, IR_SERIES, f, charts[0]);
    }
    if let Some(plot) = dashboard.charts.plot(PlotId::Dht) {
        render_series(plot, TEMPERATURE_SERIES, f, charts[1]);
        render_series(plot, HUMIDITY_SERIES, f, charts[2]);
    }

    render_footer(dashboard, f, main_layout[2]);
}

fn render_endpoint_line(dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let current = dashboard
        .session
        .endpoint()
        .map_or_else(|| "not set".to_string(), |endpoint| format!("http://{endpoint}/"));

    let line = TextLine::from(vec![
        Span::styled("Endpoint: ", Style::default().fg(Color::Gray)),
        Span::styled(current, Style::default().fg(Color::White)),
        Span::raw("   "),
        Span::styled("> ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}_", dashboard.input),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ]);

    let block = Block::default()
        .title("Sensor Radar")
        .title_style(
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_footer(dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let line = dashboard.last_error.as_ref().map_or_else(
        || {
            TextLine::from(vec![
                Span::styled(
                    format!("{} updates", dashboard.updates),
                    Style::default().fg(Color::Gray),
                ),
                Span::raw("  "),
                Span::styled("Type host[:port], Enter to apply, Esc to clear", Style::default().fg(Color::Gray)),
            ])
        },
        |error| {
            TextLine::from(Span::styled(
                format!("Error fetching data: {error}"),
                Style::default().fg(Color::Red),
            ))
        },
    );

    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(paragraph, area);
}

fn render_radar_panel(dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Radar")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightGreen));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(plot) = dashboard.charts.plot(PlotId::Radar) else {
        return;
    };
    let PlotLayout::Polar(layout) = &plot.layout else {
        return;
    };

    // Sector [0, 180] clockwise from east: the lower half disc.
    let height = inner.height.min(inner.width / 4).max(1);
    let width = (height * 4).min(inner.width);
    let square = Rect {
        x: inner.x + inner.width.saturating_sub(width) / 2,
        y: inner.y + inner.height.saturating_sub(height) / 2,
        width,
        height,
    };

    f.render_widget(
        Canvas::default()
            .marker(Marker::Braille)
            .paint(|ctx| {
                for radius in layout.radial_ticks() {
                    let steps = 36_u32;
                    let [from, to] = layout.angular_range;
                    let step = (to - from) / f64::from(steps);
                    for i in 0..steps {
                        let (x1, y1) = layout.project(f64::from(i).mul_add(step, from), radius);
                        let (x2, y2) =
                            layout.project(f64::from(i + 1).mul_add(step, from), radius);
                        ctx.draw(&CanvasLine {
                            x1,
                            y1,
                            x2,
                            y2,
                            color: Color::DarkGray,
                        });
                    }
                }

                for theta in layout.angular_ticks() {
                    let (x2, y2) = layout.project(theta, layout.radial_range[1]);
                    ctx.draw(&CanvasLine {
                        x1: 0.0,
                        y1: 0.0,
                        x2,
                        y2,
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

                    if series.kind == SeriesKind::PolarMarkers {
                        ctx.draw(&Points {
                            coords: &projected,
                            color,
                        });
                        continue;
                    }

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
            })
            .x_bounds([-1.1, 1.1])
            .y_bounds([-1.1, 0.1]),
        square,
    );
}

fn render_series(plot: &PlotState, index: usize, f: &mut Frame<'_>, area: Rect) {
    let Some(series) = plot.series.get(index) else {
        return;
    };
    let title = match &plot.layout {
        PlotLayout::Cartesian(layout) if index == 0 => layout.title,
        _ => series.name,
    };

    let color = series_color(series.color);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let points = series.data.points();
    if points.is_empty() {
        let paragraph = Paragraph::new("Waiting for readings")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let x_max = points.last().map_or(1.0, |(x, _)| x.max(1.0));
    let y_bounds = plot
        .axis_range(series.axis)
        .unwrap_or_else(|| single_reading_bounds(series));

    let datasets = vec![Dataset::default()
        .name(series.name)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels([
                    Span::raw(format!("{:.1}", y_bounds[0])),
                    Span::raw(format!("{:.1}", y_bounds[1])),
                ]),
        );

    f.render_widget(chart, area);
}

fn single_reading_bounds(series: &SeriesState) -> [f64; 2] {
    series
        .data
        .points()
        .first()
        .map_or([0.0, 1.0], |(_, y)| [y - 1.0, y + 1.0])
}
