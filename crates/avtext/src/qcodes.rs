//! # NOTAM Q-Codes Known to `avtext`
//!
//! A Q-code has five letters: `Q`, a two-letter subject, and a
//! two-letter condition. `QMRLC` is "runway closed."
//!
//! ## Subjects
//!
//! | `XY` | Description                   |
//! |------|-------------------------------|
//! | `FA` | Aerodrome                     |
//! | `IC` | ILS                           |
//! | `IG` | Glide path                    |
//! | `IL` | Localizer                     |
//! | `LR` | Runway lights                 |
//! | `LX` | Taxiway lights                |
//! | `MA` | Movement area                 |
//! | `MN` | Apron                         |
//! | `MR` | Runway                        |
//! | `MX` | Taxiway                       |
//! | `NB` | NDB                           |
//! | `ND` | DME                           |
//! | `NV` | VOR                           |
//! | `OB` | Obstacle                      |
//! | `OL` | Obstacle lights               |
//! | `PA` | Standard terminal arrival     |
//! | `PD` | Standard instrument departure |
//! | `PI` | Instrument approach procedure |
//! | `RD` | Danger area                   |
//! | `RP` | Prohibited area               |
//! | `RR` | Restricted area               |
//! | `RT` | Temporary restricted area     |
//! | `SA` | ATIS                          |
//! | `ST` | Tower                         |
//! | `WE` | Exercises                     |
//! | `WU` | Unmanned aircraft             |
//!
//! ## Conditions
//!
//! | `XY` | Description       |
//! |------|-------------------|
//! | `AH` | hours of service  |
//! | `AS` | unserviceable     |
//! | `AU` | not available     |
//! | `CA` | activated         |
//! | `CH` | changed           |
//! | `HW` | work in progress  |
//! | `LC` | closed            |
//! | `LT` | limited           |
//! | `TT` | trigger           |
//! | `XX` | see text          |
//!
//! Q-codes are defined in ICAO Doc 8126.
//!
//! ## See Also
//!
//! * [`QCode`](crate::QCode)
//! * [`Notam::q_code()`](crate::Notam::q_code)

use phf::phf_map;

use crate::{NotamCondition, NotamSubject};

/// Database of two-letter Q-code subjects
static SUBJECTS: phf::Map<&'static str, NotamSubject> = phf_map! {
    // aerodrome
    "FA" => NotamSubject::Aerodrome,
    "MA" => NotamSubject::MovementArea,
    "MN" => NotamSubject::Apron,
    "MR" => NotamSubject::Runway,
    "MX" => NotamSubject::Taxiway,

    // lighting
    "LR" => NotamSubject::RunwayLights,
    "LX" => NotamSubject::TaxiwayLights,
    "OL" => NotamSubject::ObstacleLights,

    // navaids
    "IC" => NotamSubject::Ils,
    "IG" => NotamSubject::GlidePath,
    "IL" => NotamSubject::Localizer,
    "NB" => NotamSubject::Ndb,
    "ND" => NotamSubject::Dme,
    "NV" => NotamSubject::Vor,

    // procedures
    "PA" => NotamSubject::Star,
    "PD" => NotamSubject::Sid,
    "PI" => NotamSubject::ApproachProcedure,

    // airspace
    "RD" => NotamSubject::DangerArea,
    "RP" => NotamSubject::ProhibitedArea,
    "RR" => NotamSubject::RestrictedArea,
    "RT" => NotamSubject::TemporaryRestrictedArea,
    "WE" => NotamSubject::Exercises,
    "WU" => NotamSubject::UnmannedAircraft,

    // other
    "OB" => NotamSubject::Obstacle,
    "SA" => NotamSubject::Atis,
    "ST" => NotamSubject::Tower,
};

/// Database of two-letter Q-code conditions
static CONDITIONS: phf::Map<&'static str, NotamCondition> = phf_map! {
    "AH" => NotamCondition::HoursOfService,
    "AS" => NotamCondition::Unserviceable,
    "AU" => NotamCondition::NotAvailable,
    "CA" => NotamCondition::Activated,
    "CH" => NotamCondition::Changed,
    "HW" => NotamCondition::WorkInProgress,
    "LC" => NotamCondition::Closed,
    "LT" => NotamCondition::Limited,
    "TT" => NotamCondition::Trigger,
    "XX" => NotamCondition::PlainLanguage,
};

/// Lookup the subject letters of a Q-code, like "`MR`"
pub(crate) fn lookup_subject(code: &str) -> Option<NotamSubject> {
    SUBJECTS.get(code).copied()
}

/// Lookup the condition letters of a Q-code, like "`LC`"
pub(crate) fn lookup_condition(code: &str) -> Option<NotamCondition> {
    CONDITIONS.get(code).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    use lazy_static::lazy_static;
    use regex::Regex;
    use strum::IntoEnumIterator;

    /// ensure we have populated our codebooks correctly
    #[test]
    fn check_codebooks() {
        lazy_static! {
            static ref ASCII_UPPER: Regex = Regex::new(r"^[A-Z]{2}$").expect("bad test regexp");
        }

        let mut subjects = HashSet::new();
        for (key, val) in SUBJECTS.entries() {
            assert!(ASCII_UPPER.is_match(key));
            subjects.insert(*val);
        }

        let mut conditions = HashSet::new();
        for (key, val) in CONDITIONS.entries() {
            assert!(ASCII_UPPER.is_match(key));
            conditions.insert(*val);
        }

        for subj in NotamSubject::iter() {
            assert!(
                subjects.contains(&subj),
                "subject {} not covered by any codebook entries",
                subj
            );
        }
        for cond in NotamCondition::iter() {
            assert!(
                conditions.contains(&cond),
                "condition {} not covered by any codebook entries",
                cond
            );
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup_subject("MR"), Some(NotamSubject::Runway));
        assert_eq!(lookup_condition("LC"), Some(NotamCondition::Closed));
        assert_eq!(lookup_subject("ZZ"), None);
        assert_eq!(lookup_condition(""), None);
    }
}
