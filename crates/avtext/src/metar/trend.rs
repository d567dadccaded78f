//! Trend forecast indicators

use std::fmt;

use strum::EnumMessage;

/// Trend indicator, like `NOSIG`
///
/// ```
/// use avtext::Trend;
///
/// assert_eq!(Trend::from("BECMG"), Some(Trend::Becoming));
/// assert_eq!(Trend::NoSignificantChange.to_string(), "No significant change");
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
pub enum Trend {
    /// No significant change expected
    #[strum(serialize = "NOSIG", detailed_message = "No significant change")]
    NoSignificantChange,

    /// Temporary fluctuations
    #[strum(serialize = "TEMPO", detailed_message = "Temporary")]
    Temporary,

    /// Conditions becoming
    #[strum(serialize = "BECMG", detailed_message = "Becoming")]
    Becoming,

    /// End of significant weather
    #[strum(serialize = "NSW", detailed_message = "No significant weather")]
    NoSignificantWeather,
}

impl Trend {
    /// Parse from an indicator, like "`TEMPO`"
    pub fn from<S>(code: S) -> Option<Self>
    where
        S: AsRef<str>,
    {
        str::parse(code.as_ref()).ok()
    }

    /// Human-readable string, like "`Temporary`"
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// Indicator, like "`TEMPO`"
    pub fn as_code_str(&self) -> &'static str {
        self.get_serializations()[0]
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.as_code_str().fmt(f)
        } else {
            self.as_display_str().fmt(f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use strum::IntoEnumIterator;

    #[test]
    fn test_trend_codes() {
        for trend in Trend::iter() {
            assert_eq!(Some(trend), Trend::from(trend.as_code_str()));
            assert_eq!(format!("{:#}", trend), trend.as_code_str());
        }
        assert_eq!(Trend::from("nosig"), None);
    }
}
