//! Present weather groups

use std::fmt;

use strum::EnumMessage;

/// Weather phenomenon or descriptor code
///
/// Each two-letter code in a present-weather group like `+TSRA`
/// maps to one `WeatherCode`.
///
/// ```
/// use avtext::WeatherCode;
///
/// let code = WeatherCode::from("RA").unwrap();
/// assert_eq!(code, WeatherCode::Rain);
/// assert_eq!(code.as_display_str(), "rain");
/// assert_eq!(format!("{:#}", code), "RA");
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
pub enum WeatherCode {
    /// Shallow
    #[strum(serialize = "MI", detailed_message = "shallow")]
    Shallow,

    /// Patches
    #[strum(serialize = "BC", detailed_message = "patches")]
    Patches,

    /// Partial
    #[strum(serialize = "PR", detailed_message = "partial")]
    Partial,

    /// Drifting
    #[strum(serialize = "DR", detailed_message = "drifting")]
    Drifting,

    /// Blowing
    #[strum(serialize = "BL", detailed_message = "blowing")]
    Blowing,

    /// Showers
    #[strum(serialize = "SH", detailed_message = "showers")]
    Showers,

    /// Thunderstorm
    #[strum(serialize = "TS", detailed_message = "thunderstorm")]
    Thunderstorm,

    /// Freezing
    #[strum(serialize = "FZ", detailed_message = "freezing")]
    Freezing,

    /// In the vicinity of the aerodrome
    #[strum(serialize = "VC", detailed_message = "in vicinity")]
    InVicinity,

    /// Drizzle
    #[strum(serialize = "DZ", detailed_message = "drizzle")]
    Drizzle,

    /// Rain
    #[strum(serialize = "RA", detailed_message = "rain")]
    Rain,

    /// Snow
    #[strum(serialize = "SN", detailed_message = "snow")]
    Snow,

    /// Snow grains
    #[strum(serialize = "SG", detailed_message = "snow grains")]
    SnowGrains,

    /// Ice crystals
    #[strum(serialize = "IC", detailed_message = "ice crystals")]
    IceCrystals,

    /// Ice pellets
    #[strum(serialize = "PL", detailed_message = "ice pellets")]
    IcePellets,

    /// Hail
    #[strum(serialize = "GR", detailed_message = "hail")]
    Hail,

    /// Small hail or snow pellets
    #[strum(serialize = "GS", detailed_message = "small hail")]
    SmallHail,

    /// Mist
    #[strum(serialize = "BR", detailed_message = "mist")]
    Mist,

    /// Fog
    #[strum(serialize = "FG", detailed_message = "fog")]
    Fog,

    /// Smoke
    #[strum(serialize = "FU", detailed_message = "smoke")]
    Smoke,

    /// Volcanic ash
    #[strum(serialize = "VA", detailed_message = "volcanic ash")]
    VolcanicAsh,

    /// Widespread dust
    #[strum(serialize = "DU", detailed_message = "dust")]
    Dust,

    /// Sand
    #[strum(serialize = "SA", detailed_message = "sand")]
    Sand,

    /// Haze
    #[strum(serialize = "HZ", detailed_message = "haze")]
    Haze,

    /// Dust or sand whirls
    #[strum(serialize = "PO", detailed_message = "dust whirls")]
    DustWhirls,

    /// Squalls
    #[strum(serialize = "SQ", detailed_message = "squalls")]
    Squalls,

    /// Funnel cloud
    #[strum(serialize = "FC", detailed_message = "funnel cloud")]
    FunnelCloud,

    /// Sandstorm
    #[strum(serialize = "SS", detailed_message = "sandstorm")]
    Sandstorm,

    /// Duststorm
    #[strum(serialize = "DS", detailed_message = "duststorm")]
    Duststorm,
}

impl WeatherCode {
    /// Parse from a two-letter code, like "`RA`"
    pub fn from<S>(code: S) -> Option<Self>
    where
        S: AsRef<str>,
    {
        str::parse(code.as_ref()).ok()
    }

    /// Human-readable description, like "`rain`"
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// Two-letter code, like "`RA`"
    pub fn as_code_str(&self) -> &'static str {
        self.get_serializations()[0]
    }

    /// True for descriptors, which qualify other phenomena
    pub fn is_descriptor(&self) -> bool {
        matches!(
            self,
            WeatherCode::Shallow
                | WeatherCode::Patches
                | WeatherCode::Partial
                | WeatherCode::Drifting
                | WeatherCode::Blowing
                | WeatherCode::Showers
                | WeatherCode::Thunderstorm
                | WeatherCode::Freezing
                | WeatherCode::InVicinity
        )
    }
}

impl fmt::Display for WeatherCode {
    /// Printable string
    ///
    /// * The normal form is a description like "`rain`"
    /// * The alternate form is the code like "`RA`"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.as_code_str().fmt(f)
        } else {
            self.as_display_str().fmt(f)
        }
    }
}

/// Intensity of a weather group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Intensity {
    /// `-` prefix
    Light,

    /// No prefix
    #[default]
    Moderate,

    /// `+` prefix
    Heavy,
}

/// A present-weather group, like `+TSRA`
///
/// ```
/// use avtext::{Intensity, WeatherCode, WeatherGroup};
///
/// let wx = WeatherGroup::parse("+TSRA").unwrap();
/// assert_eq!(wx.intensity(), Intensity::Heavy);
/// assert_eq!(wx.codes(), &[WeatherCode::Thunderstorm, WeatherCode::Rain]);
/// assert_eq!(wx.to_string(), "Heavy thunderstorm rain");
///
/// assert_eq!(WeatherGroup::parse("VCSH").unwrap().to_string(), "Showers in vicinity");
/// assert!(WeatherGroup::parse("EGLL").is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WeatherGroup {
    intensity: Intensity,
    codes: Vec<WeatherCode>,
}

impl WeatherGroup {
    /// Parse a present-weather token
    ///
    /// The token must consist only of an optional intensity
    /// prefix and known two-letter codes. A lone descriptor
    /// other than `TS` or `SH` is not a weather group.
    pub fn parse(token: &str) -> Option<Self> {
        let (intensity, rest) = if let Some(rest) = token.strip_prefix('+') {
            (Intensity::Heavy, rest)
        } else if let Some(rest) = token.strip_prefix('-') {
            (Intensity::Light, rest)
        } else {
            (Intensity::Moderate, token)
        };

        if rest.is_empty() || rest.len() % 2 != 0 || !rest.is_ascii() {
            return None;
        }

        let codes = (0..rest.len())
            .step_by(2)
            .map(|i| WeatherCode::from(&rest[i..i + 2]))
            .collect::<Option<Vec<WeatherCode>>>()?;

        if let [only] = codes.as_slice() {
            if only.is_descriptor()
                && *only != WeatherCode::Thunderstorm
                && *only != WeatherCode::Showers
            {
                return None;
            }
        }

        Some(Self { intensity, codes })
    }

    /// Intensity prefix
    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    /// Codes, in the order given
    pub fn codes(&self) -> &[WeatherCode] {
        &self.codes
    }
}

impl fmt::Display for WeatherGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words: Vec<&str> = Vec::with_capacity(self.codes.len() + 1);
        match self.intensity {
            Intensity::Heavy => words.push("heavy"),
            Intensity::Light => words.push("light"),
            Intensity::Moderate => {}
        }

        words.extend(
            self.codes
                .iter()
                .filter(|c| **c != WeatherCode::InVicinity)
                .map(WeatherCode::as_display_str),
        );
        if self.codes.contains(&WeatherCode::InVicinity) {
            words.push(WeatherCode::InVicinity.as_display_str());
        }

        write!(f, "{}", capitalize(&words.join(" ")))
    }
}

/// Uppercase the first character of `s`
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    #[test]
    fn check_codebook() {
        let mut seen = HashSet::new();
        for code in WeatherCode::iter() {
            let s = code.as_code_str();
            assert_eq!(s.len(), 2);
            assert!(seen.insert(s), "duplicate code {}", s);
            assert_eq!(Some(code), WeatherCode::from(s));
        }
    }

    #[test]
    fn test_parse_weather() {
        let wx = WeatherGroup::parse("-RA").unwrap();
        assert_eq!(wx.intensity(), Intensity::Light);
        assert_eq!(wx.to_string(), "Light rain");

        let wx = WeatherGroup::parse("FZFG").unwrap();
        assert_eq!(wx.intensity(), Intensity::Moderate);
        assert_eq!(wx.to_string(), "Freezing fog");

        assert_eq!(WeatherGroup::parse("BR").unwrap().to_string(), "Mist");
        assert_eq!(
            WeatherGroup::parse("-SHRASN").unwrap().to_string(),
            "Light showers rain snow"
        );
        assert_eq!(WeatherGroup::parse("TS").unwrap().to_string(), "Thunderstorm");
    }

    #[test]
    fn test_not_weather() {
        assert!(WeatherGroup::parse("").is_none());
        assert!(WeatherGroup::parse("+").is_none());
        assert!(WeatherGroup::parse("RMK").is_none());
        assert!(WeatherGroup::parse("NOSIG").is_none());
        assert!(WeatherGroup::parse("FEW250").is_none());
        assert!(WeatherGroup::parse("DR").is_none());
        assert!(WeatherGroup::parse("VC").is_none());
        assert!(WeatherGroup::parse("AUTO").is_none());
    }
}
