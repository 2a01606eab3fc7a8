use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str =
    "parserbot=info,parserbot_shell=info,parserbot_settings=info,parserbot_project=info,warn";

/// Installs the stderr subscriber. Safe to call once per process.
pub fn init() {
    let result = tracing_subscriber::registry()
        .with(EnvFilter::new(DEFAULT_FILTER))
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();
    if let Err(err) = result {
        eprintln!("logging already initialised: {err}");
    }
}
