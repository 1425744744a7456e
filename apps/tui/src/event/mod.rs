mod loop_handler;

pub use loop_handler::{dispatch, headless_line, run, run_headless};
