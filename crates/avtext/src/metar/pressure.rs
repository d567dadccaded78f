//! Altimeter setting

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::units::{hpa_to_inhg, HPA_TO_INHG};

/// Altimeter setting (QNH)
///
/// ```
/// use avtext::Pressure;
///
/// let a = Pressure::parse("A3000").unwrap();
/// assert_eq!(a.to_string(), "30.00 inHg");
///
/// let q = Pressure::parse("Q1013").unwrap();
/// assert_eq!(q.to_string(), "1013 hPa");
/// assert_eq!(q.to_dual_units_string(), "1013 hPa (29.91 inHg)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pressure {
    /// Hundredths of an inch of mercury
    InchesHg(u16),

    /// Hectopascals
    Hectopascals(u16),
}

impl Pressure {
    /// Parse an altimeter group, `A####` or `Q####`
    pub fn parse(token: &str) -> Option<Self> {
        lazy_static! {
            static ref RE: Regex = Regex::new(r"^([AQ])(\d{4})$").expect("bad altimeter regexp");
        }

        let caps = RE.captures(token)?;
        let value: u16 = caps[2].parse().ok()?;
        match &caps[1] {
            "A" => Some(Pressure::InchesHg(value)),
            _ => Some(Pressure::Hectopascals(value)),
        }
    }

    /// Setting in inches of mercury
    pub fn inches_hg(&self) -> f64 {
        match self {
            Pressure::InchesHg(hundredths) => *hundredths as f64 / 100.0,
            Pressure::Hectopascals(hpa) => hpa_to_inhg(*hpa as f64),
        }
    }

    /// Setting in hectopascals
    pub fn hectopascals(&self) -> f64 {
        match self {
            Pressure::InchesHg(hundredths) => *hundredths as f64 / 100.0 / HPA_TO_INHG,
            Pressure::Hectopascals(hpa) => *hpa as f64,
        }
    }

    /// Human-readable string which also gives inches of mercury
    ///
    /// Hectopascal settings are followed by their conversion to
    /// inches of mercury. Settings already in inches are
    /// unchanged.
    pub fn to_dual_units_string(&self) -> String {
        match self {
            Pressure::InchesHg(_) => self.to_string(),
            Pressure::Hectopascals(_) => format!("{} ({:.2} inHg)", self, self.inches_hg()),
        }
    }
}

impl fmt::Display for Pressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pressure::InchesHg(hundredths) => {
                write!(f, "{}.{:02} inHg", hundredths / 100, hundredths % 100)
            }
            Pressure::Hectopascals(hpa) => write!(f, "{} hPa", hpa),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_parse_pressure() {
        assert_eq!(Pressure::parse("A2992"), Some(Pressure::InchesHg(2992)));
        assert_eq!(Pressure::parse("Q0998"), Some(Pressure::Hectopascals(998)));
        assert_eq!(Pressure::parse("Q0998").unwrap().to_string(), "998 hPa");
        assert_eq!(Pressure::parse("A2905").unwrap().to_string(), "29.05 inHg");
        assert!(Pressure::parse("Q101").is_none());
        assert!(Pressure::parse("QNH1013").is_none());
    }

    #[test]
    fn test_conversion() {
        let q = Pressure::Hectopascals(1013);
        assert_approx_eq!(q.inches_hg(), 29.913, 1e-3);
        let a = Pressure::InchesHg(2992);
        assert_approx_eq!(a.hectopascals(), 1013.2, 0.1);
        assert_eq!(a.to_dual_units_string(), "29.92 inHg");
    }
}
