use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use sensor_radar_core::{Applied, SessionSnapshot};
use std::io::Stdout;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::app::{handle_input, App};
use crate::config::AppConfig;
use crate::poller::{spawn_ticker, HttpFetcher, PollerEvent};
use crate::ui;

// Configure event poll timeout (ms)
const EVENT_POLL_TIMEOUT: u64 = 50;

/// Routes one poller event into the app.
///
/// Ticks issue a request when the session allows one. Completions are
/// applied and return which sensors changed.
pub fn dispatch(
    app: &mut App,
    event: PollerEvent,
    fetcher: &HttpFetcher,
    tx: &UnboundedSender<PollerEvent>,
) -> Option<Applied> {
    match event {
        PollerEvent::Tick => {
            if let Some(ticket) = app.on_tick() {
                fetcher.spawn(ticket, tx.clone());
            }
            None
        }
        PollerEvent::Completed(ticket, result) => app.on_completed(&ticket, result),
    }
}

/// Run the main application event loop
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    config: &AppConfig,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let fetcher = HttpFetcher::new(config.request_timeout);
    let ticker = spawn_ticker(config.poll_interval, tx.clone());

    while app.running {
        // Update animations
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            ticker.abort();
            return Err(eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    handle_input(app, key);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_))
                | Err(_) => {}
            }
        }

        while let Ok(event) = rx.try_recv() {
            dispatch(app, event, &fetcher, &tx);
        }
    }

    ticker.abort();
    Ok(())
}

/// Run the poller without the UI, printing one line per applied response
pub async fn run_headless(app: &mut App, config: &AppConfig, json: bool) -> Result<()> {
    let Some(endpoint) = app.session.endpoint().map(str::to_string) else {
        return Err(eyre!(
            "No sensor endpoint configured. Pass --endpoint or set SENSOR_ENDPOINT"
        ));
    };
    log::info!("Polling http://{endpoint}/ every {}ms", config.poll_interval.as_millis());

    let (tx, mut rx) = mpsc::unbounded_channel();
    let fetcher = HttpFetcher::new(config.request_timeout);
    let ticker = spawn_ticker(config.poll_interval, tx.clone());

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                log::info!("Interrupted, stopping poller");
                break;
            }
            event = rx.recv() => {
                let Some(event) = event else { break };
                let Some(applied) = dispatch(app, event, &fetcher, &tx) else { continue };
                if let Some(line) = headless_line(&app.session.snapshot(), applied, json)? {
                    println!("{line}");
                }
            }
        }
    }

    ticker.abort();
    let stats = app.stats;
    log::info!(
        "Requests: {}, applied: {}, failed: {}, stale: {}",
        stats.requested,
        stats.applied,
        stats.failed,
        stats.stale
    );
    Ok(())
}

#[derive(serde::Serialize)]
struct HeadlessRecord<'a> {
    timestamp: String,
    applied: Applied,
    state: &'a SessionSnapshot,
}

/// Formats one applied response for headless output, or `None` when the
/// response updated no sensor.
pub fn headless_line(
    snapshot: &SessionSnapshot,
    applied: Applied,
    json: bool,
) -> Result<Option<String>> {
    if !applied.any() {
        return Ok(None);
    }

    if json {
        let record = HeadlessRecord {
            timestamp: chrono::Local::now().to_rfc3339(),
            applied,
            state: snapshot,
        };
        return Ok(Some(serde_json::to_string(&record)?));
    }

    let mut parts = Vec::new();
    if applied.radar {
        if let Some(sweep) = snapshot.sweep {
            let angle = sweep.theta[0];
            let distance = snapshot
                .radar
                .angles
                .iter()
                .position(|a| (*a - angle).abs() < f64::EPSILON)
                .map(|i| snapshot.radar.distances[i]);
            match distance {
                Some(distance) => parts.push(format!("radar {angle}° {distance}")),
                None => parts.push(format!("radar {angle}°")),
            }
        }
    }
    if applied.ir {
        if let Some(ir) = snapshot.ir.last() {
            parts.push(format!("ir {ir}"));
        }
    }
    if applied.dht {
        if let (Some(t), Some(h)) = (snapshot.temperature.last(), snapshot.humidity.last()) {
            parts.push(format!("temp {t}F humidity {h}%"));
        }
    }

    Ok(Some(parts.join(" | ")))
}
