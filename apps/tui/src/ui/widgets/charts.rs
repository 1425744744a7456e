use crate::ui::widgets::series_color;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;
use sensor_radar_core::chart::{CartesianLayout, PlotLayout, PlotState, SeriesState};
use sensor_radar_core::plots::{HUMIDITY_SERIES, IR_SERIES, TEMPERATURE_SERIES};
use sensor_radar_core::{ChartModel, PlotId};

pub fn render_ir_chart(charts: &ChartModel, f: &mut Frame<'_>, area: Rect) {
    let Some((plot, layout)) = cartesian(charts, PlotId::Ir) else {
        return;
    };
    let Some(series) = plot.series.get(IR_SERIES) else {
        return;
    };

    render_series_chart(
        f,
        area,
        layout.title,
        layout.x_title,
        layout.y_title,
        series,
        plot.axis_range(series.axis),
    );
}

/// Temperature and humidity share one panel, one chart per axis.
pub fn render_dht_chart(charts: &ChartModel, f: &mut Frame<'_>, area: Rect) {
    let Some((plot, layout)) = cartesian(charts, PlotId::Dht) else {
        return;
    };

    let block = Block::default()
        .title(format!(" {} ", layout.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let rows = [
        (TEMPERATURE_SERIES, layout.y_title, halves[0]),
        (
            HUMIDITY_SERIES,
            layout.y2_title.unwrap_or(layout.y_title),
            halves[1],
        ),
    ];

    for (index, y_title, row) in rows {
        let Some(series) = plot.series.get(index) else {
            continue;
        };
        render_series_chart(
            f,
            row,
            "",
            layout.x_title,
            y_title,
            series,
            plot.axis_range(series.axis),
        );
    }
}

fn cartesian(charts: &ChartModel, id: PlotId) -> Option<(&PlotState, &CartesianLayout)> {
    let plot = charts.plot(id)?;
    match &plot.layout {
        PlotLayout::Cartesian(layout) => Some((plot, layout)),
        PlotLayout::Polar(_) => None,
    }
}

fn render_series_chart(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    x_title: &str,
    y_title: &str,
    series: &SeriesState,
    range: Option<[f64; 2]>,
) {
    let color = series_color(series.color);
    let points = series.data.points();

    let mut block = Block::default();
    if !title.is_empty() {
        block = block
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
    }

    if points.is_empty() {
        let paragraph = Paragraph::new(format!("{}: waiting for readings", series.name))
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let x_bounds = x_bounds(&points);
    let y_bounds = y_bounds(range, &points);

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
                .title(x_title.to_string())
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds, 0)),
        )
        .y_axis(
            Axis::default()
                .title(y_title.to_string())
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds, 1)),
        );

    f.render_widget(chart, area);
}

fn axis_labels(bounds: [f64; 2], precision: usize) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .into_iter()
        .map(|value| Span::raw(format!("{value:.precision$}")))
        .collect()
}

/// Index axis: always at least one unit wide so a single reading still draws.
pub fn x_bounds(points: &[(f64, f64)]) -> [f64; 2] {
    let last = points.last().map_or(0.0, |(x, _)| *x);
    [0.0, last.max(1.0)]
}

/// The session's axis range when one was set, otherwise the data span.
///
/// The session leaves the range unset while a window holds one reading,
/// so that case is widened here for display only.
pub fn y_bounds(range: Option<[f64; 2]>, points: &[(f64, f64)]) -> [f64; 2] {
    if let Some(range) = range {
        return range;
    }

    let mut values = points.iter().map(|(_, y)| *y);
    let Some(first) = values.next() else {
        return [0.0, 1.0];
    };
    let (min, max) = values.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));

    if (max - min).abs() < f64::EPSILON {
        [min - 1.0, max + 1.0]
    } else {
        [min, max]
    }
}
