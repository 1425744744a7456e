use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use sensor_radar_core::{Envelope, PollError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, AbortSignal, Request, RequestInit, RequestMode, Response, Window};

/// GETs `url` and decodes the body, aborting once `timeout` elapses.
pub async fn fetch_envelope(url: &str, timeout: Duration) -> Result<Envelope, PollError> {
    let window = web_sys::window().ok_or_else(|| PollError::Network("no window".to_string()))?;
    let controller = AbortController::new().map_err(js_error)?;

    let timed_out = Rc::new(Cell::new(false));
    let on_timeout = {
        let controller = controller.clone();
        let timed_out = timed_out.clone();
        Closure::once_into_js(move || {
            timed_out.set(true);
            controller.abort();
        })
    };
    let millis = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);
    let handle = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            on_timeout.unchecked_ref::<js_sys::Function>(),
            millis,
        )
        .map_err(js_error)?;

    let body = read_body(&window, url, &controller.signal()).await;
    window.clear_timeout_with_handle(handle);

    match body {
        Ok(body) => Envelope::from_json(&body),
        Err(_) if timed_out.get() => Err(PollError::Timeout(timeout)),
        Err(error) => Err(error),
    }
}

async fn read_body(window: &Window, url: &str, signal: &AbortSignal) -> Result<String, PollError> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);
    opts.set_signal(Some(signal));

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let response: Response = value.dyn_into().map_err(js_error)?;

    if !response.ok() {
        return Err(PollError::Status(response.status()));
    }

    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    text.as_string()
        .ok_or_else(|| PollError::Network("response body is not text".to_string()))
}

fn js_error(value: JsValue) -> PollError {
    PollError::Network(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}
