use serde::Serialize;

use crate::chart::{AxisName, ChartSink, PlotId, SeriesPatch};
use crate::error::PollError;
use crate::plots::{
    default_plots, HUMIDITY_MARGIN, HUMIDITY_SERIES, IR_MARGIN, IR_SERIES, RADAR_POINTS,
    RADAR_SWEEP, TEMPERATURE_MARGIN, TEMPERATURE_SERIES,
};
use crate::poll::{Freshness, PollGate, PollTicket};
use crate::radar::{RadarAggregate, RadarSample, RadarSnapshot, SweepLine};
use crate::reading::{DhtReading, Envelope, Validated};
use crate::window::SlidingWindow;

/// Which sensors an envelope actually updated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Applied {
    pub radar: bool,
    pub ir: bool,
    pub dht: bool,
}

impl Applied {
    pub const fn any(self) -> bool {
        self.radar || self.ir || self.dht
    }
}

#[derive(Debug)]
pub enum PollOutcome {
    Applied(Applied),
    /// Superseded by a newer request or by an endpoint change.
    Stale,
    Failed(PollError),
}

/// All dashboard state for one session.
///
/// Constructed at startup, mutated only by the endpoint setter and the
/// update routines, dropped when the session ends.
#[derive(Debug, Default)]
pub struct Session {
    endpoint: Option<String>,
    radar: RadarAggregate,
    sweep: Option<SweepLine>,
    ir: SlidingWindow<f64>,
    temperature: SlidingWindow<f64>,
    humidity: SlidingWindow<f64>,
    gate: PollGate,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates every plot on `sink`.
    pub fn initialize(&self, sink: &mut impl ChartSink) {
        for (plot, series, layout) in default_plots() {
            sink.initialize_plot(plot, series, layout);
        }
    }

    /// Commits a trimmed `host[:port]`. Blank input keeps the current value.
    pub fn set_endpoint(&mut self, raw: &str) -> bool {
        let endpoint = raw.trim();
        if endpoint.is_empty() {
            return false;
        }

        if self.endpoint.as_deref() != Some(endpoint) {
            self.gate.reset();
        }
        self.endpoint = Some(endpoint.to_string());
        log::info!("Sensor endpoint set to: {endpoint}");
        true
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn target_url(&self) -> Option<String> {
        self.endpoint
            .as_deref()
            .map(|endpoint| format!("http://{endpoint}/"))
    }

    /// Ticket for the next request, or `None` when polling must be skipped:
    /// no endpoint yet, or the previous request is still outstanding.
    pub fn begin_poll(&mut self) -> Option<PollTicket> {
        let url = self.target_url()?;
        self.gate.begin(url)
    }

    /// Applies the result of the request behind `ticket`.
    ///
    /// Failures are logged and swallowed here; nothing reaches the timer.
    pub fn complete_poll(
        &mut self,
        ticket: &PollTicket,
        result: Result<Envelope, PollError>,
        sink: &mut impl ChartSink,
    ) -> PollOutcome {
        if self.gate.finish(ticket) == Freshness::Stale {
            log::debug!("dropping stale response #{}", ticket.generation());
            return PollOutcome::Stale;
        }

        match result {
            Ok(envelope) => PollOutcome::Applied(self.apply(&envelope, sink)),
            Err(error) => {
                log::error!("Error fetching data: {error}");
                PollOutcome::Failed(error)
            }
        }
    }

    /// Dispatches each sensor of `envelope` to its update routine.
    pub fn apply(&mut self, envelope: &Envelope, sink: &mut impl ChartSink) -> Applied {
        let readings = envelope.readings();
        Applied {
            radar: self.update_radar(readings.radar, sink),
            ir: self.update_ir(readings.ir, sink),
            dht: self.update_dht(readings.dht, sink),
        }
    }

    pub fn update_radar(
        &mut self,
        sample: Validated<RadarSample>,
        sink: &mut impl ChartSink,
    ) -> bool {
        let sample = match sample {
            Ok(sample) => sample,
            Err(rejection) => {
                log::trace!("radar skipped: {rejection}");
                return false;
            }
        };

        self.radar.record(sample);
        let snapshot = self.radar.snapshot();
        sink.replace_series(
            PlotId::Radar,
            RADAR_POINTS,
            SeriesPatch::Polar {
                r: snapshot.distances,
                theta: snapshot.angles,
            },
        );

        let sweep = SweepLine::at(sample.angle);
        sink.replace_series(
            PlotId::Radar,
            RADAR_SWEEP,
            SeriesPatch::Theta(sweep.theta.to_vec()),
        );
        self.sweep = Some(sweep);
        true
    }

    pub fn update_ir(&mut self, value: Validated<f64>, sink: &mut impl ChartSink) -> bool {
        let value = match value {
            Ok(value) => value,
            Err(rejection) => {
                log::trace!("ir skipped: {rejection}");
                return false;
            }
        };

        self.ir.push(value);
        sink.replace_series(
            PlotId::Ir,
            IR_SERIES,
            SeriesPatch::Cartesian {
                x: self.ir.index_sequence(),
                y: self.ir.to_vec(),
            },
        );

        if let Some(range) = self.ir.padded_range(IR_MARGIN) {
            sink.set_axis_range(PlotId::Ir, AxisName::Y, range);
        }
        true
    }

    pub fn update_dht(
        &mut self,
        reading: Validated<DhtReading>,
        sink: &mut impl ChartSink,
    ) -> bool {
        let reading = match reading {
            Ok(reading) => reading,
            Err(rejection) => {
                log::trace!("dht skipped: {rejection}");
                return false;
            }
        };

        // Both windows share one capacity, so they evict together.
        self.temperature.push(reading.temperature);
        self.humidity.push(reading.humidity);
        debug_assert_eq!(self.temperature.len(), self.humidity.len());

        let x = self.temperature.index_sequence();
        sink.replace_series(
            PlotId::Dht,
            TEMPERATURE_SERIES,
            SeriesPatch::Cartesian {
                x: x.clone(),
                y: self.temperature.to_vec(),
            },
        );
        sink.replace_series(
            PlotId::Dht,
            HUMIDITY_SERIES,
            SeriesPatch::Cartesian {
                x,
                y: self.humidity.to_vec(),
            },
        );

        if let (Some(temperature), Some(humidity)) = (
            self.temperature.padded_range(TEMPERATURE_MARGIN),
            self.humidity.padded_range(HUMIDITY_MARGIN),
        ) {
            sink.set_axis_range(PlotId::Dht, AxisName::Y, temperature);
            sink.set_axis_range(PlotId::Dht, AxisName::Y2, humidity);
        }
        true
    }

    pub const fn radar(&self) -> &RadarAggregate {
        &self.radar
    }

    pub const fn sweep(&self) -> Option<SweepLine> {
        self.sweep
    }

    pub const fn ir(&self) -> &SlidingWindow<f64> {
        &self.ir
    }

    pub const fn temperature(&self) -> &SlidingWindow<f64> {
        &self.temperature
    }

    pub const fn humidity(&self) -> &SlidingWindow<f64> {
        &self.humidity
    }

    pub const fn is_polling(&self) -> bool {
        self.gate.is_in_flight()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            endpoint: self.endpoint.clone(),
            radar: self.radar.snapshot(),
            sweep: self.sweep,
            ir: self.ir.to_vec(),
            temperature: self.temperature.to_vec(),
            humidity: self.humidity.to_vec(),
        }
    }
}

/// Serializable copy of the session state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub endpoint: Option<String>,
    pub radar: RadarSnapshot,
    pub sweep: Option<SweepLine>,
    pub ir: Vec<f64>,
    pub temperature: Vec<f64>,
    pub humidity: Vec<f64>,
}
