// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Templated light URLs.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Percentage;

/// A light's templated URL, which doubles as its unique identifier.
///
/// The template normally carries one `{value}` placeholder; each occurrence
/// is replaced by the raw (0-255) brightness on every request. It is either a path that
/// gets appended to the configured base URL, or a full `http(s)://` URL.
///
/// # Examples
///
/// ```
/// use light_controls_http::types::{Percentage, UrlTemplate};
///
/// let template = UrlTemplate::new("/led?v={value}");
/// assert_eq!(template.render(Percentage::new(80).unwrap()), "/led?v=204");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    /// The placeholder replaced with the raw value.
    pub const PLACEHOLDER: &'static str = "{value}";

    /// Wraps a template string.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Returns the template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the number of `{value}` placeholders in the template.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.0.matches(Self::PLACEHOLDER).count()
    }

    /// Returns `true` if the template is a complete URL rather than a path.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        is_absolute_url(&self.0)
    }

    /// Substitutes the raw value for every placeholder.
    #[must_use]
    pub fn render(&self, value: Percentage) -> String {
        self.render_raw(value.to_raw())
    }

    /// Substitutes an already converted raw value for every placeholder.
    #[must_use]
    pub fn render_raw(&self, raw: u8) -> String {
        self.0.replace(Self::PLACEHOLDER, &raw.to_string())
    }
}

/// Returns `true` if `url` carries its own `http://` or `https://` scheme.
pub(crate) fn is_absolute_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UrlTemplate {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for UrlTemplate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for UrlTemplate {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UrlTemplate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
