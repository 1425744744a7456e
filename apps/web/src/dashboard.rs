use ratzilla::event::KeyCode;
use sensor_radar_core::{ChartModel, Envelope, PollError, PollOutcome, PollTicket, Session};

/// Browser-side dashboard state, shared between the timer, the key
/// handler and the draw callback.
#[derive(Debug)]
pub struct Dashboard {
    pub session: Session,
    pub charts: ChartModel,
    pub input: String,
    pub last_error: Option<String>,
    pub updates: u64,
}

impl Dashboard {
    pub fn new(initial_endpoint: Option<&str>) -> Self {
        let mut session = Session::new();
        let mut charts = ChartModel::new();
        session.initialize(&mut charts);
        if let Some(endpoint) = initial_endpoint {
            session.set_endpoint(endpoint);
        }

        Self {
            session,
            charts,
            input: String::new(),
            last_error: None,
            updates: 0,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                if self.session.set_endpoint(&self.input) {
                    self.last_error = None;
                }
                self.input.clear();
            }
            KeyCode::Esc => self.input.clear(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    pub fn on_tick(&mut self) -> Option<PollTicket> {
        self.session.begin_poll()
    }

    pub fn on_completed(&mut self, ticket: &PollTicket, result: Result<Envelope, PollError>) {
        match self.session.complete_poll(ticket, result, &mut self.charts) {
            PollOutcome::Applied(_) => {
                self.updates += 1;
                self.last_error = None;
            }
            PollOutcome::Failed(error) => self.last_error = Some(error.to_string()),
            PollOutcome::Stale => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Dashboard;
    use ratzilla::event::KeyCode;
    use sensor_radar_core::chart::AxisName;
    use sensor_radar_core::{Envelope, PlotId, PollError};

    fn type_text(dashboard: &mut Dashboard, text: &str) {
        for c in text.chars() {
            dashboard.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn starts_idle_without_endpoint() {
        let mut dashboard = Dashboard::new(None);
        assert!(dashboard.on_tick().is_none());
        assert!(dashboard.charts.plot(PlotId::Dht).is_some());
    }

    #[test]
    fn query_endpoint_is_trimmed() {
        let mut dashboard = Dashboard::new(Some(" 192.168.4.1 "));
        let ticket = dashboard.on_tick().unwrap();
        assert_eq!(ticket.url(), "http://192.168.4.1/");
    }

    #[test]
    fn enter_commits_typed_endpoint() {
        let mut dashboard = Dashboard::new(None);
        type_text(&mut dashboard, "sensor.locl");
        dashboard.handle_key(KeyCode::Backspace);
        type_text(&mut dashboard, "al");
        dashboard.handle_key(KeyCode::Enter);

        assert_eq!(dashboard.session.endpoint(), Some("sensor.local"));
        assert!(dashboard.input.is_empty());
    }

    #[test]
    fn blank_enter_keeps_endpoint() {
        let mut dashboard = Dashboard::new(Some("keep-me"));
        type_text(&mut dashboard, "   ");
        dashboard.handle_key(KeyCode::Enter);
        assert_eq!(dashboard.session.endpoint(), Some("keep-me"));
    }

    #[test]
    fn escape_discards_input() {
        let mut dashboard = Dashboard::new(Some("keep-me"));
        type_text(&mut dashboard, "other");
        dashboard.handle_key(KeyCode::Esc);
        dashboard.handle_key(KeyCode::Enter);
        assert_eq!(dashboard.session.endpoint(), Some("keep-me"));
    }

    #[test]
    fn completions_update_charts_and_errors() {
        let mut dashboard = Dashboard::new(Some("host"));

        let ticket = dashboard.on_tick().unwrap();
        dashboard.on_completed(&ticket, Err(PollError::Status(404)));
        assert_eq!(dashboard.last_error.as_deref(), Some("HTTP error! Status: 404"));

        for value in [10.0, 20.0] {
            let ticket = dashboard.on_tick().unwrap();
            let envelope = Envelope::from_json(&format!(r#"{{"ir": {value}}}"#)).unwrap();
            dashboard.on_completed(&ticket, Ok(envelope));
        }

        assert_eq!(dashboard.updates, 2);
        assert!(dashboard.last_error.is_none());
        assert_eq!(
            dashboard.charts.axis_range(PlotId::Ir, AxisName::Y),
            Some([9.0, 21.0])
        );
    }
}
