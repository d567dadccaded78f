//! Prevailing visibility

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

/// Decoded prevailing visibility
///
/// ```
/// use avtext::Visibility;
///
/// assert_eq!(Visibility::parse("9999"), Some(Visibility::TenKilometersOrMore));
/// assert_eq!(Visibility::parse("0800"), Some(Visibility::Meters(800)));
/// assert_eq!(Visibility::parse("10SM").unwrap().to_string(), "10 statute miles");
/// assert!(Visibility::parse("CAVOK").unwrap().to_string().contains("10 km or more"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Ceiling and visibility OK
    ///
    /// Visibility 10 km or more, no cloud below 5000 ft, and
    /// no significant weather.
    Cavok,

    /// 10 km or more, reported as `9999`
    TenKilometersOrMore,

    /// Visibility in meters
    Meters(u16),

    /// Visibility in statute miles, as reported (may be a fraction)
    StatuteMiles(String),
}

impl Visibility {
    /// Parse a visibility group: `CAVOK`, `9999`, `NNNN`, or `NNSM`
    pub fn parse(token: &str) -> Option<Self> {
        lazy_static! {
            static ref RE: Regex =
                Regex::new(r"^(?:(\d{4})|(\d{1,2}|\d{1,2}/\d{1,2})SM)$")
                    .expect("bad visibility regexp");
        }

        if token == "CAVOK" {
            return Some(Visibility::Cavok);
        }

        let caps = RE.captures(token)?;
        if let Some(meters) = caps.get(1) {
            match meters.as_str() {
                "9999" => Some(Visibility::TenKilometersOrMore),
                m => Some(Visibility::Meters(m.parse().ok()?)),
            }
        } else {
            Some(Visibility::StatuteMiles(caps.get(2)?.as_str().to_owned()))
        }
    }

    /// True if visibility is at least 10 km
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Visibility::Cavok | Visibility::TenKilometersOrMore)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Cavok => write!(
                f,
                "10 km or more (CAVOK: no cloud below 5000 ft and no significant weather)"
            ),
            Visibility::TenKilometersOrMore => write!(f, "10 km or more"),
            Visibility::Meters(m) => write!(f, "{} meters", m),
            Visibility::StatuteMiles(sm) if sm == "1" => write!(f, "1 statute mile"),
            Visibility::StatuteMiles(sm) => write!(f, "{} statute miles", sm),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_visibility() {
        assert_eq!(Visibility::parse("CAVOK"), Some(Visibility::Cavok));
        assert_eq!(Visibility::parse("4000"), Some(Visibility::Meters(4000)));
        assert_eq!(
            Visibility::parse("1/2SM"),
            Some(Visibility::StatuteMiles("1/2".to_owned()))
        );
        assert_eq!(Visibility::parse("1SM").unwrap().to_string(), "1 statute mile");
        assert_eq!(Visibility::parse("999"), None);
        assert_eq!(Visibility::parse("10KM"), None);
    }

    #[test]
    fn test_ten_km_equivalence() {
        let cavok = Visibility::parse("CAVOK").unwrap();
        let nines = Visibility::parse("9999").unwrap();
        assert!(cavok.is_unrestricted());
        assert!(nines.is_unrestricted());
        assert!(cavok.to_string().starts_with("10 km or more"));
        assert_eq!(nines.to_string(), "10 km or more");
    }
}
