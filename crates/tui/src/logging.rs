//! File logging. The terminal belongs to the UI, so events go to a file.

use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::Mutex,
};

use tracing_subscriber::EnvFilter;

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

pub fn init(config: &AppConfig) -> Result<()> {
    let path = Path::new(&config.log_file);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_new(format!(
        "masarif={level},engine={level}",
        level = config.log_level
    ))
    .map_err(|err| AppError::Logging(err.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
