//! Units of measure and conversions

use std::fmt;

use strum::EnumMessage;

/// Conversion factor from hectopascals to inches of mercury
pub const HPA_TO_INHG: f64 = 0.02953;

/// Unit of a wind speed
///
/// Wind groups end with a unit suffix like "`KT`." The
/// `Display` form is the spoken unit name; the alternate
/// form is the suffix.
///
/// ```
/// use avtext::SpeedUnit;
///
/// let unit = SpeedUnit::from("MPS").unwrap();
/// assert_eq!(unit, SpeedUnit::MetersPerSecond);
/// assert_eq!(unit.to_string(), "meters per second");
/// assert_eq!(format!("{:#}", unit), "MPS");
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
pub enum SpeedUnit {
    /// Knots
    #[strum(serialize = "KT", detailed_message = "knots")]
    Knots,

    /// Meters per second
    #[strum(serialize = "MPS", detailed_message = "meters per second")]
    MetersPerSecond,

    /// Kilometers per hour
    #[strum(serialize = "KMH", detailed_message = "kilometers per hour")]
    KilometersPerHour,
}

impl SpeedUnit {
    /// Parse from a unit suffix, like "`KT`"
    pub fn from<S>(code: S) -> Option<Self>
    where
        S: AsRef<str>,
    {
        str::parse(code.as_ref()).ok()
    }

    /// Human-readable unit name, like "`knots`"
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// Unit suffix, like "`KT`"
    pub fn as_code_str(&self) -> &'static str {
        self.get_serializations()[0]
    }

    /// Convert a speed in this unit to knots
    pub fn to_knots(&self, speed: f64) -> f64 {
        match self {
            SpeedUnit::Knots => speed,
            SpeedUnit::MetersPerSecond => speed * 1.943_844,
            SpeedUnit::KilometersPerHour => speed / 1.852,
        }
    }
}

impl AsRef<str> for SpeedUnit {
    fn as_ref(&self) -> &'static str {
        self.as_code_str()
    }
}

impl fmt::Display for SpeedUnit {
    /// Printable string
    ///
    /// * The normal form is the unit name, like "`knots`"
    /// * The alternate form is the suffix, like "`KT`"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.as_code_str().fmt(f)
        } else {
            self.as_display_str().fmt(f)
        }
    }
}

/// Convert whole degrees Celsius to whole degrees Fahrenheit
///
/// ```
/// assert_eq!(avtext::celsius_to_fahrenheit(28), 82);
/// assert_eq!(avtext::celsius_to_fahrenheit(-40), -40);
/// ```
pub fn celsius_to_fahrenheit(celsius: i16) -> i16 {
    (celsius as f64 * 9.0 / 5.0 + 32.0).round() as i16
}

/// Convert hectopascals to inches of mercury
pub fn hpa_to_inhg(hpa: f64) -> f64 {
    hpa * HPA_TO_INHG
}
