// App module for sensor_radar
// Handles dashboard state and keyboard input

pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, InputMode, PollStats};
