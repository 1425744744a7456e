use crate::config::AppConfig;
use chrono::{DateTime, Local};
use sensor_radar_core::{Applied, ChartModel, Envelope, PollError, PollOutcome, PollTicket, Session};
use std::time::Instant;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InputMode {
    Normal,
    EditingEndpoint,
}

/// Running totals shown in the status bar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PollStats {
    pub requested: u64,
    pub applied: u64,
    pub failed: u64,
    pub stale: u64,
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub session: Session,
    pub charts: ChartModel,
    pub input_mode: InputMode,
    pub current_input: String,
    pub status_message: String,
    pub last_error: Option<String>,
    pub last_update: Option<DateTime<Local>>,
    pub stats: PollStats,
    pub show_help: bool,
    pub animation_counter: f64,
    pub last_frame: Instant,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let mut session = Session::new();
        let mut charts = ChartModel::new();
        session.initialize(&mut charts);

        let input_mode = match config.endpoint.as_deref() {
            Some(endpoint) if session.set_endpoint(endpoint) => InputMode::Normal,
            _ => InputMode::EditingEndpoint,
        };

        Self {
            running: true,
            session,
            charts,
            input_mode,
            current_input: String::new(),
            status_message: String::new(),
            last_error: None,
            last_update: None,
            stats: PollStats::default(),
            show_help: false,
            animation_counter: 0.0,
            last_frame: Instant::now(),
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        // Update animation counter (cycles between 0 and 2*PI)
        self.animation_counter += delta.as_secs_f64() * 2.0;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }
    }

    pub fn start_editing(&mut self) {
        self.input_mode = InputMode::EditingEndpoint;
        self.current_input = self.session.endpoint().unwrap_or_default().to_string();
    }

    pub fn cancel_editing(&mut self) {
        self.input_mode = InputMode::Normal;
        self.current_input.clear();
    }

    /// Commits the pending input as the endpoint. Blank input keeps the
    /// previous endpoint and stays in edit mode when none is set yet.
    pub fn commit_endpoint(&mut self) {
        if self.session.set_endpoint(&self.current_input) {
            let endpoint = self.session.endpoint().unwrap_or_default();
            self.status_message = format!("Polling http://{endpoint}/");
            self.last_error = None;
            self.cancel_editing();
        } else if self.session.endpoint().is_some() {
            self.cancel_editing();
        } else {
            self.status_message = "Enter a host[:port] to start polling".to_string();
        }
    }

    /// Timer tick: returns the request to issue, if any.
    pub fn on_tick(&mut self) -> Option<PollTicket> {
        let ticket = self.session.begin_poll()?;
        self.stats.requested += 1;
        Some(ticket)
    }

    pub fn on_completed(
        &mut self,
        ticket: &PollTicket,
        result: Result<Envelope, PollError>,
    ) -> Option<Applied> {
        match self.session.complete_poll(ticket, result, &mut self.charts) {
            PollOutcome::Applied(applied) => {
                self.stats.applied += 1;
                self.last_update = Some(Local::now());
                self.last_error = None;
                Some(applied)
            }
            PollOutcome::Failed(error) => {
                self.stats.failed += 1;
                self.last_error = Some(error.to_string());
                None
            }
            PollOutcome::Stale => {
                self.stats.stale += 1;
                None
            }
        }
    }
}
