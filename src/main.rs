use std::process::ExitCode;

use bandwidth_monitor::{
    font::LabelFont, init_logging, ui::TerminalSurface, Driver, MonitorError, ThreadPacer,
    ViewConfig,
};
use tracing::{error, info};

fn main() -> ExitCode {
    // stderr is still ours until the surface opens
    if let Err(err) = init_logging() {
        eprintln!("warning: logging disabled: {err}");
    }
    let config = ViewConfig::from_env();

    let result = run(&config);
    match &result {
        Ok(cycles) => info!(cycles, "monitor closed"),
        Err(err) => {
            error!(%err, "monitor failed");
            eprintln!("{}", failure_message(err));
        }
    }
    ExitCode::from(exit_status(&result))
}

// The driver, and with it the terminal, is dropped before main reports anything.
fn run(config: &ViewConfig) -> Result<u64, MonitorError> {
    let mut driver = Driver::initialize(
        config,
        ThreadPacer,
        |c| TerminalSurface::open(c.viewport, &c.title),
        |path| LabelFont::load(path),
    )?;
    driver.run()
}

fn exit_status(result: &Result<u64, MonitorError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

fn failure_message(err: &MonitorError) -> String {
    format!("Error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandwidth_monitor::{ConfigError, ResourceError};
    use std::path::PathBuf;

    #[test]
    fn clean_close_exits_zero() {
        assert_eq!(exit_status(&Ok(0)), 0);
        assert_eq!(exit_status(&Ok(12)), 0);
    }

    #[test]
    fn startup_errors_exit_one() {
        let font = MonitorError::from(ResourceError::FontParse {
            path: PathBuf::from("/tmp/x.ttf"),
        });
        let config = MonitorError::from(ConfigError::ZeroPeriod);
        assert_eq!(exit_status(&Err(font)), 1);
        assert_eq!(exit_status(&Err(config)), 1);
    }

    #[test]
    fn failure_message_is_prefixed() {
        let err = MonitorError::from(ConfigError::EmptySourceSet(0));
        assert_eq!(
            failure_message(&err),
            "Error: source count must be positive, got 0"
        );
    }
}
