//! Sensor state and chart commands shared by the terminal and web
//! dashboards.
//!
//! A [`Session`] owns the endpoint, the radar aggregate and the scalar
//! windows. Each poll result is validated per sensor and turned into
//! [`ChartSink`] commands; [`ChartModel`] keeps the resulting plot state for
//! the front ends to draw.

pub mod chart;
pub mod error;
pub mod plots;
pub mod poll;
pub mod radar;
pub mod reading;
pub mod session;
pub mod window;

pub use chart::{ChartCommand, ChartModel, ChartSink, PlotId};
pub use error::{PollError, Rejection};
pub use poll::{PollTicket, POLL_INTERVAL, REQUEST_TIMEOUT};
pub use radar::{RadarAggregate, RadarSample, RadarSnapshot, SweepLine};
pub use reading::{DhtReading, Envelope, Readings, Validated};
pub use session::{Applied, PollOutcome, Session, SessionSnapshot};
pub use window::{SlidingWindow, WINDOW_CAPACITY};
