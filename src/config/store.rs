// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persistence of the light record list.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::{Map, Value};

use crate::error::ConfigError;

use super::LightRecord;

/// Key of the record list inside the settings document.
pub const LIGHT_CONTROLS_KEY: &str = "light_controls";

/// Storage for the ordered list of persisted light records.
///
/// `load` returns raw JSON so records can be normalized before use;
/// `save` writes back the canonical form.
pub trait SettingsStore: Send + Sync {
    /// Reads the raw record list.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the backing storage cannot be read or parsed.
    fn load(&self) -> Result<Vec<Value>, ConfigError>;

    /// Replaces the stored record list.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the backing storage cannot be written.
    fn save(&self, records: &[LightRecord]) -> Result<(), ConfigError>;
}

/// In-memory settings store.
///
/// Useful for hosts that own persistence themselves and for tests.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    records: Mutex<Vec<Value>>,
    saves: Mutex<usize>,
}

impl MemorySettingsStore {
    /// Creates a store holding the given raw records.
    #[must_use]
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records: Mutex::new(records),
            saves: Mutex::new(0),
        }
    }

    /// Creates a store holding already canonical records.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if a record cannot be serialized.
    pub fn from_records(records: &[LightRecord]) -> Result<Self, ConfigError> {
        Ok(Self::new(to_values(records)?))
    }

    /// Replaces the raw record list, as a host settings dialog would.
    pub fn replace(&self, records: Vec<Value>) {
        *self.records.lock() = records;
    }

    /// Returns a copy of the stored raw records.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Value> {
        self.records.lock().clone()
    }

    /// Returns how many times `save` was called.
    #[must_use]
    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Vec<Value>, ConfigError> {
        Ok(self.snapshot())
    }

    fn save(&self, records: &[LightRecord]) -> Result<(), ConfigError> {
        let values = to_values(records)?;
        *self.records.lock() = values;
        *self.saves.lock() += 1;
        Ok(())
    }
}

/// Settings store backed by a JSON document on disk.
///
/// The document is an object whose `light_controls` key holds the record
/// list. Other keys are preserved on save. A missing file reads as an
/// empty list.
#[derive(Debug, Clone)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    /// Creates a store for the document at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the document path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Map<String, Value>, ConfigError> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "No settings file, using empty light list");
            return Ok(Map::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl SettingsStore for JsonFileSettingsStore {
    fn load(&self) -> Result<Vec<Value>, ConfigError> {
        let mut document = self.read_document()?;
        match document.remove(LIGHT_CONTROLS_KEY) {
            Some(Value::Array(records)) => Ok(records),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => {
                tracing::warn!(value = %other, "light_controls is not a list, ignoring");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, records: &[LightRecord]) -> Result<(), ConfigError> {
        let mut document = self.read_document()?;
        document.insert(
            LIGHT_CONTROLS_KEY.to_string(),
            Value::Array(to_values(records)?),
        );

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&document)?)?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "Saved light settings");
        Ok(())
    }
}

fn to_values(records: &[LightRecord]) -> Result<Vec<Value>, ConfigError> {
    records
        .iter()
        .map(|record| serde_json::to_value(record).map_err(ConfigError::from))
        .collect()
}
