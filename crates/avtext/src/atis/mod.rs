//! ATIS decoding
//!
//! Online ATIS transcripts have no fixed layout. Each field of an
//! [`AtisReport`] is found by its own extractor, independent of
//! where it appears in the text.

mod extract;
mod remarks;
mod runways;

use std::fmt;

use strum::{EnumMessage, IntoEnumIterator};

pub use runways::RunwayUse;

use extract::{AtisText, EXTRACTORS};

/// A field of an [`AtisReport`]
///
/// Fields are listed in report order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
pub enum AtisField {
    /// ICAO code of the airport
    #[strum(serialize = "airport", detailed_message = "Airport")]
    Airport,

    /// Information letter
    #[strum(serialize = "information", detailed_message = "Information")]
    Information,

    /// Time of the report
    #[strum(serialize = "time", detailed_message = "Time")]
    Time,

    /// Runways in use
    #[strum(serialize = "runways", detailed_message = "Runways")]
    Runways,

    /// Transition level
    #[strum(serialize = "transition_level", detailed_message = "Transition level")]
    TransitionLevel,

    /// Surface wind
    #[strum(serialize = "wind", detailed_message = "Wind")]
    Wind,

    /// Prevailing visibility
    #[strum(serialize = "visibility", detailed_message = "Visibility")]
    Visibility,

    /// Present weather
    #[strum(serialize = "weather", detailed_message = "Weather")]
    Weather,

    /// Sky condition
    #[strum(serialize = "sky", detailed_message = "Sky")]
    Sky,

    /// Air temperature
    #[strum(serialize = "temperature", detailed_message = "Temperature")]
    Temperature,

    /// Dewpoint
    #[strum(serialize = "dewpoint", detailed_message = "Dewpoint")]
    Dewpoint,

    /// Altimeter setting
    #[strum(serialize = "altimeter", detailed_message = "Altimeter")]
    Altimeter,

    /// Trend indicators
    #[strum(serialize = "trend", detailed_message = "Trend")]
    Trend,

    /// Anything else
    #[strum(serialize = "remarks", detailed_message = "Remarks")]
    Remarks,
}

const FIELD_COUNT: usize = 14;

impl AtisField {
    /// Human-readable label, like "`Transition level`"
    pub fn label(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// True for fields which report conditions at the airport
    ///
    /// These are the runway, weather, and transition level
    /// fields. The header fields and remarks are not conditions.
    pub fn is_condition(&self) -> bool {
        !matches!(
            self,
            AtisField::Airport | AtisField::Information | AtisField::Time | AtisField::Remarks
        )
    }
}

impl fmt::Display for AtisField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.label().fmt(f)
    }
}

/// A decoded ATIS
///
/// Each [field](AtisField) holds a decoded, human-readable
/// string. Fields which were not found are empty.
///
/// ```
/// use avtext::{decode_atis, AtisField};
///
/// let atis = decode_atis(
///     "Heathrow information G. 1020Z. Landing runway 27L, departure runway 27R. \
///      Transition level 60. 24012KT 9999 -RA FEW030 18/12 Q1013 NOSIG. \
///      Advise on first contact you have information G.",
///     "EGLL",
/// );
///
/// assert_eq!(atis.get(AtisField::Airport), "EGLL");
/// assert_eq!(atis.get(AtisField::Information), "G (GOLF)");
/// assert_eq!(atis.get(AtisField::Time), "10:20 UTC");
/// assert_eq!(atis.get(AtisField::Runways), "Arrival 27L; Departure 27R");
/// assert_eq!(atis.get(AtisField::TransitionLevel), "FL60");
/// assert_eq!(atis.get(AtisField::Wind), "Wind from 240° at 12 knots");
/// assert_eq!(atis.get(AtisField::Visibility), "10 km or more");
/// assert_eq!(atis.get(AtisField::Weather), "Light rain");
/// assert_eq!(atis.get(AtisField::Altimeter), "1013 hPa (29.91 inHg)");
/// assert_eq!(atis.get(AtisField::Trend), "No significant change");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AtisReport {
    values: [Option<String>; FIELD_COUNT],
}

/// Decode an ATIS transcript
///
/// If `icao_hint` is a valid ICAO code, it is used as the
/// airport. Otherwise the airport is taken from the text, if
/// possible. This function never fails; at worst, every field
/// is empty.
pub fn decode_atis(text: &str, icao_hint: &str) -> AtisReport {
    let src = AtisText::new(text, icao_hint);

    let mut report = AtisReport::default();
    for (field, extract) in EXTRACTORS {
        if let Some(value) = extract(&src) {
            log::trace!("atis: {} = \"{}\"", field, value);
            report.values[*field as usize] = Some(value);
        }
    }
    report
}

impl AtisReport {
    /// Decoded field, or the empty string if not found
    pub fn get(&self, field: AtisField) -> &str {
        self.field(field).unwrap_or("")
    }

    /// Decoded field, if found
    pub fn field(&self, field: AtisField) -> Option<&str> {
        self.values[field as usize].as_deref()
    }

    /// Iterate over every field found, in report order
    pub fn iter(&self) -> impl Iterator<Item = (AtisField, &str)> + '_ {
        AtisField::iter().filter_map(move |f| Some((f, self.field(f)?)))
    }

    /// True if no field was found
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }
}

impl fmt::Display for AtisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .iter()
            .map(|(field, value)| format!("{}: {}", field, value))
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_table() {
        assert_eq!(AtisField::iter().count(), FIELD_COUNT);
        assert_eq!(EXTRACTORS.len(), FIELD_COUNT);
        for (i, (field, _)) in EXTRACTORS.iter().enumerate() {
            assert_eq!(*field as usize, i);
        }
        assert_eq!(
            "transition_level".parse::<AtisField>(),
            Ok(AtisField::TransitionLevel)
        );
    }

    #[test]
    fn test_decode_full() {
        let atis = decode_atis(
            "THIS IS KENNEDY INFORMATION BRAVO. 1851Z. 18010KT 10SM FEW250 28/18 A3000. \
             ILS APPROACH RUNWAY 4R IN USE. DEPARTING RUNWAY 4L. NOTICE TO AIRMEN, TAXIWAY B CLOSED.",
            "kjfk",
        );

        assert_eq!(atis.get(AtisField::Airport), "KJFK");
        assert_eq!(atis.get(AtisField::Information), "B (BRAVO)");
        assert_eq!(atis.get(AtisField::Time), "18:51 UTC");
        assert_eq!(atis.get(AtisField::Runways), "Arrival 04R; Departure 04L");
        assert_eq!(atis.get(AtisField::TransitionLevel), "");
        assert_eq!(atis.get(AtisField::Wind), "Wind from 180° at 10 knots");
        assert_eq!(atis.get(AtisField::Visibility), "10 statute miles");
        assert_eq!(atis.get(AtisField::Weather), "");
        assert_eq!(atis.get(AtisField::Sky), "Few clouds at 25000 feet");
        assert_eq!(atis.get(AtisField::Temperature), "28°C (82°F)");
        assert_eq!(atis.get(AtisField::Dewpoint), "18°C (64°F)");
        assert_eq!(atis.get(AtisField::Altimeter), "30.00 inHg");
        assert_eq!(
            atis.get(AtisField::Remarks),
            "NOTICE TO AIRMEN, TAXIWAY B CLOSED."
        );
    }

    #[test]
    fn test_decode_spoken() {
        let atis = decode_atis(
            "Manchester information Kilo, time 0950 Zulu. Runway in use 23R. \
             Wind 250 degrees 14 knots. Visibility 10 kilometers. Broken 1200 feet. \
             Temperature 9, dewpoint 7. QNH 998.",
            "",
        );

        assert_eq!(atis.get(AtisField::Airport), "");
        assert_eq!(atis.get(AtisField::Information), "K (KILO)");
        assert_eq!(atis.get(AtisField::Time), "09:50 UTC");
        assert_eq!(atis.get(AtisField::Runways), "In use 23R");
        assert_eq!(atis.get(AtisField::Wind), "Wind from 250° at 14 knots");
        assert_eq!(atis.get(AtisField::Visibility), "10 kilometers");
        assert_eq!(atis.get(AtisField::Sky), "Broken clouds at 1200 feet");
        assert_eq!(atis.get(AtisField::Temperature), "9°C (48°F)");
        assert_eq!(atis.get(AtisField::Dewpoint), "7°C (45°F)");
        assert_eq!(atis.get(AtisField::Altimeter), "998 hPa (29.47 inHg)");
        assert_eq!(atis.get(AtisField::Remarks), "");
    }

    #[test]
    fn test_decode_empty() {
        let atis = decode_atis("", "");
        assert!(atis.is_empty());
        assert_eq!(atis.to_string(), "");
        assert_eq!(atis.iter().count(), 0);
    }

    #[test]
    fn test_display_order() {
        let atis = decode_atis("EGCC ATIS INFO K. Q1020 NOSIG", "");
        assert_eq!(
            atis.to_string(),
            "Airport: EGCC
Information: K (KILO)
Altimeter: 1020 hPa (30.12 inHg)
Trend: No significant change"
        );
    }
}
