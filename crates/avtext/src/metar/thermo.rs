//! Temperature and dewpoint

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::units::celsius_to_fahrenheit;

/// A temperature, in whole degrees Celsius
///
/// ```
/// use avtext::Temperature;
///
/// let (temp, dew) = Temperature::parse_pair("M05/M12").unwrap();
/// assert_eq!(temp.celsius(), -5);
/// assert_eq!(dew.celsius(), -12);
/// assert_eq!(temp.to_string(), "-5°C (23°F)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Temperature(i16);

impl Temperature {
    /// Construct from degrees Celsius
    pub fn from_celsius(celsius: i16) -> Self {
        Self(celsius)
    }

    /// Parse a single METAR temperature, like `M05` or `18`
    pub fn parse(field: &str) -> Option<Self> {
        let (sign, digits) = match field.strip_prefix('M') {
            Some(rest) => (-1, rest),
            None => (1, field),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self(sign * digits.parse::<i16>().ok()?))
    }

    /// Parse a temperature/dewpoint group, like `28/18`
    pub fn parse_pair(token: &str) -> Option<(Self, Self)> {
        lazy_static! {
            static ref RE: Regex =
                Regex::new(r"^(M?\d{2})/(M?\d{2})$").expect("bad temperature regexp");
        }

        let caps = RE.captures(token)?;
        Some((Self::parse(&caps[1])?, Self::parse(&caps[2])?))
    }

    /// Degrees Celsius
    pub fn celsius(&self) -> i16 {
        self.0
    }

    /// Degrees Fahrenheit, rounded
    pub fn fahrenheit(&self) -> i16 {
        celsius_to_fahrenheit(self.0)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C ({}°F)", self.celsius(), self.fahrenheit())
    }
}
