// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for light control.
//!
//! - [`Percentage`] - Brightness level (0-100%) and its raw 0-255 form
//! - [`UrlTemplate`] - A light's URL with its `{value}` placeholder

mod percentage;
mod url_template;

pub use percentage::Percentage;
pub use url_template::UrlTemplate;
pub(crate) use url_template::is_absolute_url;
