use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::strip_commas;

pub const HEADER: &str = "date,exercise,weight";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data")]
    InvalidData,
}

/// The flat CSV file holding every logged entry.
#[derive(Clone, Debug)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the file with just the header row if it is missing.
    /// Best-effort: a failure is logged and startup carries on.
    pub fn ensure_store(&self) {
        if self.path.exists() {
            return;
        }

        match fs::write(&self.path, format!("{HEADER}\n")) {
            Ok(()) => tracing::info!("Created new data file at: {}", self.path.display()),
            Err(e) => tracing::error!("Error creating data file {}: {}", self.path.display(), e),
        }
    }

    pub fn read_all(&self) -> Result<String, StoreError> {
        Ok(fs::read_to_string(&self.path)?)
    }

    pub fn append_entry(&self, date: &str, exercise: &str, weight: &str) -> Result<(), StoreError> {
        if date.is_empty() || exercise.is_empty() || weight.is_empty() {
            return Err(StoreError::InvalidData);
        }

        let line = format_line(date, exercise, weight);
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        tracing::debug!("Appended entry: {}", line.trim_end());
        Ok(())
    }
}

fn format_line(date: &str, exercise: &str, weight: &str) -> String {
    format!("{},{},{}\n", date, strip_commas(exercise), weight)
}
