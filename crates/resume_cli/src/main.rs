//! CLI smoke entry point.
//!
//! # Responsibility
//! - Resolve `StorageConfig` from the process environment.
//! - Open the configured backend and list stored resumes in sorted order.

use log::info;
use resume_core::{
    core_version, default_log_level, init_logging, open_storage, StorageConfig, StorageKind,
    StrategyKind,
};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_DATABASE_URL: &str = "resumes.db";
const DEFAULT_STORAGE_DIR: &str = "storage";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("resume_cli: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    println!("resume_core version={}", core_version());

    if let Ok(log_dir) = env::var("RESUME_LOG_DIR") {
        let level = env::var("RESUME_LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());
        init_logging(&level, &log_dir)?;
    }

    let config = config_from_env()?;
    let storage = open_storage(&config).map_err(|err| err.to_string())?;
    let resumes = storage.get_all_sorted().map_err(|err| err.to_string())?;

    info!(
        "event=cli_list module=cli status=ok kind={} count={}",
        config.kind,
        resumes.len()
    );
    println!("storage={} count={}", config.kind, resumes.len());
    for resume in resumes {
        println!("{}\t{}", resume.uuid(), resume.full_name());
    }
    Ok(())
}

fn config_from_env() -> Result<StorageConfig, String> {
    let kind = optional_env("RESUME_STORAGE_KIND")
        .map(|value| value.parse::<StorageKind>())
        .transpose()?
        .unwrap_or_default();
    let strategy = optional_env("RESUME_STRATEGY")
        .map(|value| value.parse::<StrategyKind>())
        .transpose()?
        .unwrap_or_default();

    Ok(StorageConfig {
        kind,
        storage_dir: PathBuf::from(
            optional_env("RESUME_STORAGE_DIR").unwrap_or_else(|| DEFAULT_STORAGE_DIR.to_string()),
        ),
        database_url: optional_env("RESUME_DB_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
        user: optional_env("RESUME_DB_USER"),
        password: optional_env("RESUME_DB_PASSWORD"),
        strategy,
    })
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
