use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "sensor_radar", version, about = "Sensor radar dashboard")]
pub struct CliArgs {
    /// Sensor endpoint as host[:port]
    #[arg(long, value_name = "HOST[:PORT]")]
    pub endpoint: Option<String>,

    /// Poll period in milliseconds
    #[arg(long = "interval-ms", value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Request deadline in milliseconds
    #[arg(long = "timeout-ms", value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Poll without the terminal UI and print readings
    #[arg(long)]
    pub headless: bool,

    /// Print headless readings as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override log file path
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(endpoint) = &self.endpoint {
            std::env::set_var("SENSOR_ENDPOINT", endpoint);
        }
        if let Some(interval) = self.interval_ms {
            std::env::set_var("POLL_INTERVAL_MS", interval.to_string());
        }
        if let Some(timeout) = self.timeout_ms {
            std::env::set_var("POLL_TIMEOUT_MS", timeout.to_string());
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("SENSOR_LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}
