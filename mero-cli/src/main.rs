mod args;
mod commands;
mod error;
mod paths;
mod render;
mod settings;

use std::fs;
use std::fs::File;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use log::error;
use simplelog::Config;
use simplelog::WriteLogger;

use args::Cli;
use settings::Settings;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match paths::settings_file() {
        Some(path) => Settings::load(&path),
        None => Ok(Settings::default()),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&cli, &settings);

    let stdout = io::stdout();
    match commands::run(&cli.command, &settings, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to `--log-file`, or to a rotated `latest.log` in the cache directory.
///
/// Logging is best effort: if no file can be created the run continues
/// without a logger.
fn init_logging(cli: &Cli, settings: &Settings) {
    let level = match cli.verbose {
        0 => settings.level_filter().unwrap_or(LevelFilter::Info),
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let file = match &cli.log_file {
        Some(path) => File::create(path).ok(),
        None => {
            paths::rotate_logs();
            paths::log_file().and_then(|path| {
                if let Some(dir) = path.parent() {
                    fs::create_dir_all(dir).ok()?;
                }
                File::create(path).ok()
            })
        }
    };

    if let Some(file) = file {
        let _ = WriteLogger::init(level, Config::default(), file);
    }
}
