//! Departure/arrival region detection

use std::fmt;

use strum::EnumMessage;

/// Which region's routing conventions to apply
///
/// ```
/// use avtext::RegionPreference;
///
/// let pref: RegionPreference = "uk-eu".parse().unwrap();
/// assert_eq!(pref, RegionPreference::UkEurope);
/// assert_eq!(pref.to_string(), "uk-eu");
/// assert_eq!(RegionPreference::default(), RegionPreference::Auto);
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
pub enum RegionPreference {
    /// Guess from the departure and arrival codes
    #[default]
    #[strum(serialize = "auto", detailed_message = "Auto")]
    Auto,

    /// UK and European conventions
    #[strum(serialize = "uk-eu", detailed_message = "UK/Europe")]
    UkEurope,

    /// US and Canadian conventions
    #[strum(serialize = "us", detailed_message = "US/Canada")]
    Us,
}

impl RegionPreference {
    /// Preference code, like "`uk-eu`"
    pub fn as_code_str(&self) -> &'static str {
        self.get_serializations()[0]
    }

    /// Human-readable name, like "`UK/Europe`"
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }
}

impl fmt::Display for RegionPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code_str())
    }
}

/// Rule family for route checks
///
/// Europe is the stricter family and the default when the
/// region cannot be determined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionFamily {
    /// UK and Europe
    Europe,

    /// US and Canada
    Us,
}

/// Geographic classification of a flight
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// Within Europe
    Europe,

    /// Within the US and Canada
    Us,

    /// Between Europe and the US or Canada
    Transatlantic,

    /// Neither endpoint is recognized
    Unknown,
}

/// Detected region of a flight
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegionInfo {
    family: RegionFamily,
    kind: RegionKind,
    label: &'static str,
    uk_involved: bool,
}

impl RegionInfo {
    /// Rule family to apply
    pub fn family(&self) -> RegionFamily {
        self.family
    }

    /// Geographic classification
    pub fn kind(&self) -> RegionKind {
        self.kind
    }

    /// Human-readable label, like "`UK/Europe`"
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// True if either endpoint is in the UK
    pub fn uk_involved(&self) -> bool {
        self.uk_involved
    }

    const fn new(
        family: RegionFamily,
        kind: RegionKind,
        label: &'static str,
        uk_involved: bool,
    ) -> Self {
        Self {
            family,
            kind,
            label,
            uk_involved,
        }
    }
}

impl Default for RegionInfo {
    fn default() -> Self {
        Self::new(
            RegionFamily::Europe,
            RegionKind::Unknown,
            "Auto (default)",
            false,
        )
    }
}

impl fmt::Display for RegionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// Detect the region of a flight
///
/// An explicit preference wins. Otherwise the region follows the
/// ICAO prefixes of the departure and arrival: `E` is Europe,
/// `EG` is the UK, and `K`, `C`, or `P` is the US or Canada.
///
/// ```
/// use avtext::{detect_region, RegionFamily, RegionKind, RegionPreference};
///
/// let region = detect_region(Some("EGLL"), Some("KJFK"), RegionPreference::Auto);
/// assert_eq!(region.kind(), RegionKind::Transatlantic);
/// assert_eq!(region.family(), RegionFamily::Europe);
/// assert!(region.uk_involved());
///
/// let region = detect_region(Some("KJFK"), Some("KORD"), RegionPreference::Auto);
/// assert_eq!(region.kind(), RegionKind::Us);
/// assert_eq!(region.label(), "US/Canada");
/// ```
pub fn detect_region(dep: Option<&str>, arr: Option<&str>, pref: RegionPreference) -> RegionInfo {
    match pref {
        RegionPreference::UkEurope => {
            return RegionInfo::new(RegionFamily::Europe, RegionKind::Europe, "UK/Europe", true)
        }
        RegionPreference::Us => {
            return RegionInfo::new(RegionFamily::Us, RegionKind::Us, "US/Canada", false)
        }
        RegionPreference::Auto => {}
    }

    let dep = Endpoint::from_code(dep);
    let arr = Endpoint::from_code(arr);
    let uk_involved = dep.uk || arr.uk;

    if (dep.europe && arr.us) || (arr.europe && dep.us) {
        RegionInfo::new(
            RegionFamily::Europe,
            RegionKind::Transatlantic,
            "Transatlantic (Europe ↔ US/Canada)",
            uk_involved,
        )
    } else if dep.europe || arr.europe {
        let label = if uk_involved { "UK/Europe" } else { "Europe" };
        RegionInfo::new(RegionFamily::Europe, RegionKind::Europe, label, uk_involved)
    } else if dep.us || arr.us {
        RegionInfo::new(RegionFamily::Us, RegionKind::Us, "US/Canada", false)
    } else {
        RegionInfo::default()
    }
}

/// Region flags for one endpoint
#[derive(Clone, Copy, Debug, Default)]
struct Endpoint {
    europe: bool,
    uk: bool,
    us: bool,
}

impl Endpoint {
    fn from_code(code: Option<&str>) -> Self {
        let code = code.unwrap_or("").trim().to_ascii_uppercase();
        Self {
            europe: code.starts_with('E'),
            uk: code.starts_with("EG"),
            us: code.starts_with(['K', 'C', 'P']),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use strum::IntoEnumIterator;

    #[test]
    fn test_preference() {
        for pref in RegionPreference::iter() {
            let parsed: RegionPreference = pref.to_string().parse().unwrap();
            assert_eq!(parsed, pref);
        }
        assert!("europe".parse::<RegionPreference>().is_err());
        assert_eq!(RegionPreference::Us.as_display_str(), "US/Canada");
    }

    #[test]
    fn test_overrides() {
        let region = detect_region(Some("KJFK"), Some("KLAX"), RegionPreference::UkEurope);
        assert_eq!(region.family(), RegionFamily::Europe);
        assert_eq!(region.kind(), RegionKind::Europe);
        assert!(region.uk_involved());

        let region = detect_region(Some("EGLL"), None, RegionPreference::Us);
        assert_eq!(region.family(), RegionFamily::Us);
        assert!(!region.uk_involved());
    }

    #[test]
    fn test_auto() {
        let region = detect_region(Some("CYYZ"), Some("EDDF"), RegionPreference::Auto);
        assert_eq!(region.kind(), RegionKind::Transatlantic);
        assert!(!region.uk_involved());
        assert_eq!(region.label(), "Transatlantic (Europe ↔ US/Canada)");

        let region = detect_region(Some("LFPG"), Some("EDDF"), RegionPreference::Auto);
        assert_eq!(region.kind(), RegionKind::Europe);
        assert_eq!(region.label(), "Europe");
        assert!(!region.uk_involved());

        let region = detect_region(Some("egcc"), None, RegionPreference::Auto);
        assert_eq!(region.label(), "UK/Europe");
        assert!(region.uk_involved());

        let region = detect_region(None, Some("PHNL"), RegionPreference::Auto);
        assert_eq!(region.family(), RegionFamily::Us);

        let region = detect_region(Some("RJTT"), Some("YSSY"), RegionPreference::Auto);
        assert_eq!(region, RegionInfo::default());
        assert_eq!(region.family(), RegionFamily::Europe);
        assert_eq!(region.kind(), RegionKind::Unknown);
        assert_eq!(region.to_string(), "Auto (default)");

        assert_eq!(
            detect_region(None, None, RegionPreference::Auto),
            RegionInfo::default()
        );
    }
}
