use reqwest::Client;
use sensor_radar_core::{Envelope, PollError, PollTicket};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Messages delivered to the loop that owns the session.
#[derive(Debug)]
pub enum PollerEvent {
    Tick,
    Completed(PollTicket, Result<Envelope, PollError>),
}

/// Starts the free-running poll timer.
///
/// The first tick fires immediately. The task ends once the receiving loop
/// has gone away.
pub fn spawn_ticker(period: Duration, tx: UnboundedSender<PollerEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if tx.send(PollerEvent::Tick).is_err() {
                break;
            }
        }
    })
}

/// HTTP client with an explicit per-request deadline.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }

    /// GETs `url` and decodes the body. The deadline covers the body read.
    pub async fn fetch(&self, url: &str) -> Result<Envelope, PollError> {
        match tokio::time::timeout(self.timeout, self.fetch_body(url)).await {
            Ok(result) => result,
            Err(_) => Err(PollError::Timeout(self.timeout)),
        }
    }

    async fn fetch_body(&self, url: &str) -> Result<Envelope, PollError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PollError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PollError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PollError::Network(e.to_string()))?;

        Envelope::from_slice(&body)
    }

    /// Runs the request for `ticket` in the background and reports back on `tx`.
    pub fn spawn(
        &self,
        ticket: PollTicket,
        tx: UnboundedSender<PollerEvent>,
    ) -> JoinHandle<()> {
        let fetcher = self.clone();
        tokio::spawn(async move {
            let result = fetcher.fetch(ticket.url()).await;
            // A closed channel means the dashboard is shutting down.
            let _ = tx.send(PollerEvent::Completed(ticket, result));
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{spawn_ticker, HttpFetcher, PollerEvent};
    use sensor_radar_core::{PollError, Session};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    /// Serves one canned HTTP response and returns the bound address.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0_u8; 1024];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        address
    }

    #[tokio::test]
    async fn fetches_and_decodes_envelope() {
        let address = serve_once("200 OK", r#"{"ir": 321, "radar": {"angle": 12, "distance": 8}}"#).await;
        let fetcher = HttpFetcher::new(Duration::from_secs(2));

        let envelope = fetcher.fetch(&format!("http://{address}/")).await.unwrap();
        let readings = envelope.readings();
        assert_eq!(readings.ir, Ok(321.0));
        assert!(readings.radar.is_ok());
        assert!(readings.dht.is_err());
    }

    #[tokio::test]
    async fn server_error_maps_to_status() {
        let address = serve_once("500 Internal Server Error", "oops").await;
        let fetcher = HttpFetcher::new(Duration::from_secs(2));

        let error = fetcher.fetch(&format!("http://{address}/")).await.unwrap_err();
        assert!(matches!(error, PollError::Status(500)));
    }

    #[tokio::test]
    async fn malformed_body_maps_to_decode() {
        let address = serve_once("200 OK", "radar=12").await;
        let fetcher = HttpFetcher::new(Duration::from_secs(2));

        let error = fetcher.fetch(&format!("http://{address}/")).await.unwrap_err();
        assert!(matches!(error, PollError::Decode(_)));
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let holder = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let fetcher = HttpFetcher::new(Duration::from_millis(100));
        let error = fetcher.fetch(&format!("http://{address}/")).await.unwrap_err();
        assert!(matches!(error, PollError::Timeout(timeout) if timeout == Duration::from_millis(100)));
        holder.abort();
    }

    #[tokio::test]
    async fn spawned_request_reports_completion() {
        let address = serve_once("200 OK", r#"{"dht": {"temperature": 70, "humidity": 45}}"#).await;
        let mut session = Session::new();
        session.set_endpoint(&address);
        let ticket = session.begin_poll().unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        HttpFetcher::new(Duration::from_secs(2)).spawn(ticket.clone(), tx);

        match rx.recv().await {
            Some(PollerEvent::Completed(completed, result)) => {
                assert_eq!(completed, ticket);
                assert!(result.is_ok());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn ticker_fires_repeatedly() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_ticker(Duration::from_millis(10), tx);

        for _ in 0..3 {
            assert!(matches!(rx.recv().await, Some(PollerEvent::Tick)));
        }

        drop(rx);
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
