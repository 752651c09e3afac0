// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persisted light configuration.
//!
//! - [`LightRecord`] - the canonical settings record for one light
//! - [`normalize_records`] - repairs raw records loaded from storage
//! - [`SettingsStore`] - where records are read from and written back to

mod normalizer;
mod record;
mod store;

pub use normalizer::{Normalized, normalize_record, normalize_records};
pub use record::{EventField, EventValues, LightRecord};
pub use store::{JsonFileSettingsStore, LIGHT_CONTROLS_KEY, MemorySettingsStore, SettingsStore};
