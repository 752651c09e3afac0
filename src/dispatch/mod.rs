// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Applying values to lights.
//!
//! - [`Dispatcher`] - owns the registry; converts, requests, notifies, stores
//! - [`EventRouter`] - applies per-event values on host lifecycle events
//! - [`LightCommand`] - the in-stream `LIGHTCONTROL <name> <value>` command
//!
//! Every entry point degrades to "log and do nothing" on lookup, usage or
//! transport errors; a misconfigured light never interrupts the host.

mod command;
mod dispatcher;
mod router;

pub use command::{COMMAND_KEYWORD, CommandStatus, LightCommand, execute, execute_line};
pub use dispatcher::{Dispatched, Dispatcher};
pub use router::{EventRouter, event_field};
