//! NOTAM Q-codes

use std::fmt;

use strum::EnumMessage;

use crate::qcodes::{lookup_condition, lookup_subject};

/// What a NOTAM is about
///
/// The second and third letters of a Q-code, like the `MR` in
/// `QMRLC`.
///
/// ```
/// use avtext::NotamSubject;
///
/// assert_eq!(NotamSubject::Runway.as_display_str(), "Runway");
/// assert_eq!(format!("{}", NotamSubject::Localizer), "Localizer");
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumIter,
)]
pub enum NotamSubject {
    /// Runway
    #[strum(detailed_message = "Runway")]
    Runway,

    /// Taxiway
    #[strum(detailed_message = "Taxiway")]
    Taxiway,

    /// Movement area
    #[strum(detailed_message = "Movement area")]
    MovementArea,

    /// Apron
    #[strum(detailed_message = "Apron")]
    Apron,

    /// Runway lights
    #[strum(detailed_message = "Runway lights")]
    RunwayLights,

    /// Taxiway lights
    #[strum(detailed_message = "Taxiway lights")]
    TaxiwayLights,

    /// Instrument landing system
    #[strum(detailed_message = "ILS")]
    Ils,

    /// ILS localizer
    #[strum(detailed_message = "Localizer")]
    Localizer,

    /// ILS glide path
    #[strum(detailed_message = "Glide path")]
    GlidePath,

    /// VOR
    #[strum(detailed_message = "VOR")]
    Vor,

    /// DME
    #[strum(detailed_message = "DME")]
    Dme,

    /// NDB
    #[strum(detailed_message = "NDB")]
    Ndb,

    /// The aerodrome as a whole
    #[strum(detailed_message = "Aerodrome")]
    Aerodrome,

    /// Temporary restricted area
    #[strum(detailed_message = "Temporary restricted area")]
    TemporaryRestrictedArea,

    /// Restricted area
    #[strum(detailed_message = "Restricted area")]
    RestrictedArea,

    /// Prohibited area
    #[strum(detailed_message = "Prohibited area")]
    ProhibitedArea,

    /// Danger area
    #[strum(detailed_message = "Danger area")]
    DangerArea,

    /// Military or other exercises
    #[strum(detailed_message = "Exercises")]
    Exercises,

    /// Unmanned aircraft
    #[strum(detailed_message = "Unmanned aircraft")]
    UnmannedAircraft,

    /// Obstacle
    #[strum(detailed_message = "Obstacle")]
    Obstacle,

    /// Obstacle lights
    #[strum(detailed_message = "Obstacle lights")]
    ObstacleLights,

    /// Instrument approach procedure
    #[strum(detailed_message = "Instrument approach procedure")]
    ApproachProcedure,

    /// Standard instrument departure
    #[strum(detailed_message = "Standard instrument departure")]
    Sid,

    /// Standard terminal arrival
    #[strum(detailed_message = "Standard terminal arrival")]
    Star,

    /// ATIS
    #[strum(detailed_message = "ATIS")]
    Atis,

    /// Aerodrome control tower
    #[strum(detailed_message = "Tower")]
    Tower,
}

impl NotamSubject {
    /// Human-readable description
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }
}

impl fmt::Display for NotamSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_display_str().fmt(f)
    }
}

/// What happened to the subject of a NOTAM
///
/// The fourth and fifth letters of a Q-code, like the `LC` in
/// `QMRLC`. Descriptions are lowercase, to follow a
/// [subject](NotamSubject).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumIter,
)]
pub enum NotamCondition {
    /// Closed
    #[strum(detailed_message = "closed")]
    Closed,

    /// Unserviceable
    #[strum(detailed_message = "unserviceable")]
    Unserviceable,

    /// Not available
    #[strum(detailed_message = "not available")]
    NotAvailable,

    /// Changed
    #[strum(detailed_message = "changed")]
    Changed,

    /// Activated
    #[strum(detailed_message = "activated")]
    Activated,

    /// Described in plain language
    #[strum(detailed_message = "see text")]
    PlainLanguage,

    /// Work in progress
    #[strum(detailed_message = "work in progress")]
    WorkInProgress,

    /// Limited
    #[strum(detailed_message = "limited")]
    Limited,

    /// Hours of service changed
    #[strum(detailed_message = "hours of service")]
    HoursOfService,

    /// Trigger NOTAM for a published change
    #[strum(detailed_message = "trigger")]
    Trigger,
}

impl NotamCondition {
    /// Human-readable description
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }
}

impl fmt::Display for NotamCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_display_str().fmt(f)
    }
}

/// A decoded NOTAM Q-code, like `QMRLC`
///
/// The subject and condition are looked up separately. Either
/// may be unknown.
///
/// ```
/// use avtext::{NotamCondition, NotamSubject, QCode};
///
/// let code = QCode::parse("QMRLC").unwrap();
/// assert_eq!(code.subject(), Some(NotamSubject::Runway));
/// assert_eq!(code.condition(), Some(NotamCondition::Closed));
/// assert_eq!(code.to_string(), "Runway: closed");
/// assert_eq!(code.as_str(), "QMRLC");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QCode {
    code: String,
    subject: Option<NotamSubject>,
    condition: Option<NotamCondition>,
}

impl QCode {
    /// Parse a five-letter Q-code
    ///
    /// Returns `None` unless `code` is `Q` followed by four
    /// uppercase letters.
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.len() != 5
            || !code.starts_with('Q')
            || !code.bytes().all(|b| b.is_ascii_uppercase())
        {
            return None;
        }

        Some(Self {
            code: code.to_owned(),
            subject: lookup_subject(&code[1..3]),
            condition: lookup_condition(&code[3..5]),
        })
    }

    /// The code, like "`QMRLC`"
    pub fn as_str(&self) -> &str {
        &self.code
    }

    /// Subject, if known
    pub fn subject(&self) -> Option<NotamSubject> {
        self.subject
    }

    /// Condition, if known
    pub fn condition(&self) -> Option<NotamCondition> {
        self.condition
    }
}

impl fmt::Display for QCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.subject, self.condition) {
            (Some(subj), Some(cond)) => write!(f, "{}: {}", subj, cond),
            (Some(subj), None) => write!(f, "{} ({})", subj, self.code),
            (None, Some(cond)) => write!(f, "{}: {}", self.code, cond),
            (None, None) => self.code.fmt(f),
        }
    }
}

impl AsRef<str> for QCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let code = QCode::parse("QFAXX").unwrap();
        assert_eq!(code.to_string(), "Aerodrome: see text");

        let code = QCode::parse("QMXZZ").unwrap();
        assert_eq!(code.condition(), None);
        assert_eq!(code.to_string(), "Taxiway (QMXZZ)");

        let code = QCode::parse("QZZZZ").unwrap();
        assert_eq!(code.subject(), None);
        assert_eq!(code.to_string(), "QZZZZ");

        assert_eq!(QCode::parse("MRLC"), None);
        assert_eq!(QCode::parse("XMRLC"), None);
        assert_eq!(QCode::parse("QMRL1"), None);
    }
}
