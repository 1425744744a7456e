mod console_log;
mod dashboard;
mod fetch;
mod render;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use ratzilla::ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders},
    Terminal,
};
use ratzilla::{DomBackend, WebRenderer};
use sensor_radar_core::{POLL_INTERVAL, REQUEST_TIMEOUT};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::dashboard::Dashboard;

fn main() -> io::Result<()> {
    console_log::init(log::LevelFilter::Info);

    let dashboard = Rc::new(RefCell::new(Dashboard::new(
        query_endpoint().as_deref(),
    )));

    start_polling(&dashboard);

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let dashboard = dashboard.clone();
        move |event| dashboard.borrow_mut().handle_key(event.code)
    });

    terminal.draw_web(move |f| {
        let area = f.area();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        f.render_widget(block, area);

        render::render_dashboard(&dashboard.borrow(), f, inner);
    });

    Ok(())
}

/// Installs the free-running poll timer for the page's lifetime.
fn start_polling(dashboard: &Rc<RefCell<Dashboard>>) {
    let Some(window) = web_sys::window() else {
        log::error!("No window; polling disabled");
        return;
    };

    let tick = {
        let dashboard = dashboard.clone();
        Closure::<dyn FnMut()>::new(move || {
            let Some(ticket) = dashboard.borrow_mut().on_tick() else {
                return;
            };
            let dashboard = dashboard.clone();
            spawn_local(async move {
                let result = fetch::fetch_envelope(ticket.url(), REQUEST_TIMEOUT).await;
                dashboard.borrow_mut().on_completed(&ticket, result);
            });
        })
    };

    let millis = i32::try_from(POLL_INTERVAL.as_millis()).unwrap_or(i32::MAX);
    if let Err(error) = window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        millis,
    ) {
        log::error!("Failed to start poll timer: {error:?}");
        return;
    }

    // The timer lives as long as the page.
    tick.forget();
}

/// Initial endpoint from `?endpoint=host[:port]`.
fn query_endpoint() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search)
        .ok()?
        .get("endpoint")
}
