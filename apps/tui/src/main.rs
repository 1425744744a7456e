use clap::Parser;
use color_eyre::Result;
use sensor_radar::app::App;
use sensor_radar::cli::CliArgs;
use sensor_radar::config::init_app_config;
use sensor_radar::logging::init_logging;
use sensor_radar::{event, terminal};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = init_app_config()?;
    let headless = args.headless || !is_terminal();
    init_logging(&config, headless)?;

    let mut app = App::new(&config);

    if headless {
        return event::run_headless(&mut app, &config, args.json).await;
    }

    let mut terminal = terminal::setup()?;

    let result = event::run(&mut terminal, &mut app, &config).await;

    // Restore terminal
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
