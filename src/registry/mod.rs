// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory model of the configured lights.
//!
//! The [`LightRegistry`] is rebuilt from settings on startup and on every
//! settings save. It never aliases the persisted records: each
//! [`LightBinding`] holds its own copy of the configuration plus the last
//! percentage dispatched to the light.

mod light_binding;
mod light_registry;

pub use light_binding::LightBinding;
pub use light_registry::LightRegistry;
