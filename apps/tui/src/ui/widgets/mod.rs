pub mod charts;
pub mod popup;
pub mod radar;

use ratatui::style::Color;
use sensor_radar_core::chart::SeriesColor;

pub const fn series_color(color: SeriesColor) -> Color {
    match color {
        SeriesColor::Lime => Color::LightGreen,
        SeriesColor::Red => Color::Red,
        SeriesColor::Green => Color::Green,
        SeriesColor::Yellow => Color::Yellow,
    }
}
