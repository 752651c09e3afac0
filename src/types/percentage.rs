// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness percentage and its conversion to the raw device range.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Brightness level as a percentage (0-100).
///
/// Lights are configured and reported in percent; the device itself is
/// driven with a raw 0-255 value, see [`Percentage::to_raw`].
///
/// # Examples
///
/// ```
/// use light_controls_http::types::Percentage;
///
/// let p = Percentage::new(80).unwrap();
/// assert_eq!(p.value(), 80);
/// assert_eq!(p.to_raw(), 204);
///
/// assert!(Percentage::new(101).is_err());
/// assert_eq!(Percentage::clamped(150), Percentage::MAX);
/// assert_eq!(Percentage::clamped(-10), Percentage::MIN);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percentage(u8);

impl Percentage {
    /// Minimum value (0%).
    pub const MIN: Self = Self(0);

    /// Maximum value (100%).
    pub const MAX: Self = Self(100);

    /// Upper bound of the raw device range.
    pub const RAW_MAX: u8 = 255;

    /// Creates a new percentage.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a percentage, clamping any integer into `[0, 100]`.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        // Infallible after the clamp.
        Self(u8::try_from(value.clamp(0, 100)).unwrap_or(100))
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Converts to the raw device range: `round(value / 100 * 255)`.
    ///
    /// Halves round away from zero, so 50% maps to 128.
    #[must_use]
    pub fn to_raw(&self) -> u8 {
        let scaled = (u16::from(self.0) * u16::from(Self::RAW_MAX) + 50) / 100;
        u8::try_from(scaled).unwrap_or(Self::RAW_MAX)
    }

    /// Parses an integer string and clamps it into range.
    ///
    /// Returns the clamped value together with a flag telling whether
    /// clamping changed the input.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotNumeric` for blank or non-integer input.
    /// Integers too large for `i64` are numeric and clamp by sign.
    pub fn parse_clamped(input: &str) -> Result<(Self, bool), ValueError> {
        let parsed = parse_integer(input)?;
        let clamped = Self::clamped(parsed);
        Ok((clamped, i64::from(clamped.0) != parsed))
    }
}

/// Parses a trimmed, optionally signed integer, saturating on overflow.
fn parse_integer(input: &str) -> Result<i64, ValueError> {
    match input.trim().parse::<i64>() {
        Ok(value) => Ok(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(ValueError::NotNumeric(input.to_string())),
        },
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl FromStr for Percentage {
    type Err = ValueError;

    /// Strict parse: the trimmed input must be an integer in `[0, 100]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = parse_integer(s)?;
        if !(0..=100).contains(&parsed) {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: parsed,
            });
        }
        Ok(Self::clamped(parsed))
    }
}

impl TryFrom<u8> for Percentage {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percentage> for u8 {
    fn from(value: Percentage) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_raw(p: u8) -> u8 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let raw = (f64::from(p) * 255.0 / 100.0).round() as u8;
        raw
    }

    #[test]
    fn to_raw_matches_rounded_formula() {
        for v in 0..=100 {
            let p = Percentage::new(v).unwrap();
            assert_eq!(p.to_raw(), reference_raw(v), "percentage {v}");
        }
    }

    #[test]
    fn to_raw_bounds() {
        assert_eq!(Percentage::MIN.to_raw(), 0);
        assert_eq!(Percentage::MAX.to_raw(), 255);
        assert_eq!(Percentage::new(80).unwrap().to_raw(), 204);
        assert_eq!(Percentage::new(50).unwrap().to_raw(), 128);
    }

    #[test]
    fn new_rejects_over_100() {
        assert!(Percentage::new(100).is_ok());
        assert!(Percentage::new(101).is_err());
    }

    #[test]
    fn clamped_limits_both_ends() {
        assert_eq!(Percentage::clamped(150).value(), 100);
        assert_eq!(Percentage::clamped(-10).value(), 0);
        assert_eq!(Percentage::clamped(42).value(), 42);
        assert_eq!(Percentage::clamped(i64::MAX).value(), 100);
    }

    #[test]
    fn parse_clamped_reports_clamping() {
        assert_eq!(
            Percentage::parse_clamped(" 80 ").unwrap(),
            (Percentage::new(80).unwrap(), false)
        );
        assert_eq!(
            Percentage::parse_clamped("250").unwrap(),
            (Percentage::MAX, true)
        );
        assert!(Percentage::parse_clamped("").is_err());
        assert!(Percentage::parse_clamped("bright").is_err());
    }

    #[test]
    fn parse_clamped_saturates_huge_integers() {
        assert_eq!(
            Percentage::parse_clamped("99999999999999999999").unwrap(),
            (Percentage::MAX, true)
        );
        assert_eq!(
            Percentage::parse_clamped("+99999999999999999999").unwrap(),
            (Percentage::MAX, true)
        );
        assert_eq!(
            Percentage::parse_clamped(" -99999999999999999999 ").unwrap(),
            (Percentage::MIN, true)
        );
        assert!(Percentage::parse_clamped("9999999999999999999x").is_err());
        assert!("99999999999999999999".parse::<Percentage>().is_err());
    }

    #[test]
    fn from_str_is_strict() {
        assert_eq!("25".parse::<Percentage>().unwrap().value(), 25);
        assert!(matches!(
            "101".parse::<Percentage>(),
            Err(ValueError::OutOfRange { actual: 101, .. })
        ));
        assert!(matches!(
            "x".parse::<Percentage>(),
            Err(ValueError::NotNumeric(_))
        ));
    }

    #[test]
    fn serde_uses_plain_number() {
        let p = Percentage::new(42).unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), "42");
        assert!(serde_json::from_str::<Percentage>("120").is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Percentage::new(75).unwrap().to_string(), "75%");
    }
}
