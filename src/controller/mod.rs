// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-facing controller.
//!
//! [`LightControls`] ties settings, registry, dispatch and notifications
//! together behind the hooks a printer host calls.

mod api;
mod config;
mod light_controls;

pub use api::{ApiCommand, Caller, parse_percentage};
pub use config::ControllerConfig;
pub use light_controls::LightControls;
