use std::fs::OpenOptions;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::WriteLogger;

/// Attach a file logger at `~/.local/share/shoal/shoal.log`.
/// Best-effort: any failure leaves the shell running without a logger —
/// diagnostics must never block the prompt.
pub fn init(level: &str) {
    let Some(path) = log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let _ = WriteLogger::init(parse_level(level), simplelog::Config::default(), file);
}

fn log_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(std::path::Path::new(&home).join(".local/share/shoal/shoal.log"))
}

fn parse_level(level: &str) -> LevelFilter {
    match level {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    }
}
