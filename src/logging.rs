// src/logging.rs

use color_eyre::eyre::Result;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use std::path::PathBuf;
use tracing_error::ErrorLayer;
use tracing_subscriber::{self, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase();
    pub static ref LOG_ENV: String = format!("{}_LOGLEVEL", *PROJECT_NAME);
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "crtprobe", env!("CARGO_PKG_NAME"))
}

pub fn get_data_dir() -> PathBuf {
    if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

/// Initializes file-based logging using the tracing subscriber.
///
/// Stdout carries the report (or the dashboard), so logs always go to
/// `<data dir>/crtprobe.log`. The filter is read from `RUST_LOG`, then
/// `CRTPROBE_LOGLEVEL`, and defaults to `crtprobe=info`.
pub fn initialize_logging() -> Result<PathBuf> {
    let directory = get_data_dir();
    std::fs::create_dir_all(&directory)?;
    let log_path = directory.join(&*LOG_FILE);
    let log_file = std::fs::File::create(&log_path)?;

    let file_log_level = std::env::var("RUST_LOG")
        .or_else(|_| std::env::var(&*LOG_ENV))
        .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")));

    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::new(file_log_level));

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .init();

    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_the_crate() {
        assert_eq!(PROJECT_NAME.as_str(), "CRTPROBE");
        assert_eq!(LOG_ENV.as_str(), "CRTPROBE_LOGLEVEL");
        assert_eq!(LOG_FILE.as_str(), "crtprobe.log");
    }
}
