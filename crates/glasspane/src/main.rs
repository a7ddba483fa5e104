mod startup;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use glasspane_core::{Config, Source, config, log};
use startup::StartupError;

#[derive(Parser)]
#[command(
    name = "glasspane",
    version,
    about = "A frameless, always-on-top overlay window for HTML pages"
)]
struct Cli {
    /// Page to show: a local file path or an http(s)/file URL
    source: Option<String>,
    /// Page to show when no SOURCE is given
    #[arg(long, value_name = "PATH", default_value = "2048.html")]
    html: String,
    /// Read configuration from this file instead of ~/.config/glasspane/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = config::load_from(cli.config.as_deref());
    if let Some(path) = log::init(&config.log) {
        glasspane_core::log_info!("logging to {}", path.display());
    }

    let text = startup::source_text(cli.source.as_deref(), &cli.html);
    let result = startup::resolve(text).and_then(|source| launch(&config, source));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            glasspane_core::log_error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(windows)]
fn launch(config: &Config, source: Source) -> Result<(), StartupError> {
    glasspane_core::log_info!("starting with {source}");
    glasspane_windows::run(config, source).map_err(|e| StartupError::Host(e.to_string()))
}

#[cfg(not(windows))]
fn launch(_config: &Config, _source: Source) -> Result<(), StartupError> {
    Err(StartupError::UnsupportedPlatform)
}
