//! NOTAM decoding
//!
//! A block of NOTAM text is split into [chunks](NotamChunk), one
//! per NOTAM. Each chunk is classified by its grammar and decoded
//! into a [`Notam`].

mod abbrev;
mod chunk;
mod fields;
mod qcode;
mod qline;

use std::fmt;

#[cfg(feature = "chrono")]
use chrono::{DateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;

#[cfg(feature = "chrono")]
use crate::metar::InvalidDateErr;

pub use abbrev::expand_notam_abbreviations;
pub use chunk::{split_notam_chunks, NotamChunk};
pub use qcode::{NotamCondition, NotamSubject, QCode};
pub use qline::decode_q_position;

/// A decoded NOTAM
///
/// The free text is always available, with abbreviations
/// expanded. Which other fields are present depends on the
/// format of the NOTAM. The FAA domestic format has an
/// identifier, location, and perhaps a validity period. The ICAO
/// format adds a Q-line and lettered fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notam {
    id: String,
    location: String,
    validity: String,
    valid_from: Option<String>,
    valid_until: Option<String>,
    q_line: Option<String>,
    q_code: Option<QCode>,
    altitudes: Option<String>,
    position: Option<String>,
    schedule: Option<String>,
    text: String,
    raw: String,
}

impl Notam {
    fn new(raw: &str) -> Self {
        Self {
            id: String::new(),
            location: String::new(),
            validity: String::new(),
            valid_from: None,
            valid_until: None,
            q_line: None,
            q_code: None,
            altitudes: None,
            position: None,
            schedule: None,
            text: String::new(),
            raw: raw.to_owned(),
        }
    }

    /// NOTAM identifier, like "`A1234/24`" or "`JFK 01/012`"
    ///
    /// Empty if not found.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Location the NOTAM applies to, like "`EGLL`"
    ///
    /// Empty if not found and no hint was given.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Validity period, like "`2401011200 to PERM`"
    ///
    /// Empty if not found.
    pub fn validity(&self) -> &str {
        &self.validity
    }

    /// Start of validity, as `YYMMDDHHMM`
    pub fn valid_from(&self) -> Option<&str> {
        self.valid_from.as_deref()
    }

    /// End of validity, as `YYMMDDHHMM` or `PERM`
    pub fn valid_until(&self) -> Option<&str> {
        self.valid_until.as_deref()
    }

    /// The `Q)` line, as written
    pub fn q_line(&self) -> Option<&str> {
        self.q_line.as_deref()
    }

    /// Decoded Q-code from the Q-line
    pub fn q_code(&self) -> Option<&QCode> {
        self.q_code.as_ref()
    }

    /// Vertical limits, like "`FL000 to FL999`"
    pub fn altitudes(&self) -> Option<&str> {
        self.altitudes.as_deref()
    }

    /// Affected area, like "`53°21'N 002°16'W within 5 NM`"
    pub fn position(&self) -> Option<&str> {
        self.position.as_deref()
    }

    /// Schedule from the `D)` field
    pub fn schedule(&self) -> Option<&str> {
        self.schedule.as_deref()
    }

    /// Body text with abbreviations expanded
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The NOTAM, as received
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Runways this NOTAM closes
    ///
    /// Runway designators like `RWY 09L/27R` are reported for
    /// both ends. Empty unless the NOTAM says "`CLSD`" or
    /// "`CLOSED`."
    pub fn closed_runways(&self) -> Vec<String> {
        lazy_static! {
            static ref CLOSED: Regex = Regex::new(r"\b(?:CLSD|CLOSED)\b").expect("bad NOTAM regexp");
            static ref RWY: Regex = Regex::new(r"\bRWY\s?(\d{2}[LRC]?(?:/\d{2}[LRC]?)?)\b")
                .expect("bad NOTAM regexp");
        }

        let raw = self.raw.to_uppercase();
        if !CLOSED.is_match(&raw) {
            return vec![];
        }

        let mut out: Vec<String> = Vec::new();
        for caps in RWY.captures_iter(&raw) {
            for rwy in caps[1].split('/') {
                if !out.iter().any(|r| r == rwy) {
                    out.push(rwy.to_owned());
                }
            }
        }
        out
    }

    /// True if the NOTAM mentions a closure, work, obstacle, or
    /// restriction
    pub fn is_highlight(&self) -> bool {
        lazy_static! {
            static ref RE: Regex = Regex::new(
                r"CLSD|CLOS|CLOSED|WORK|PROHIBITED|RESTRICTED|OUT OF SERVICE|OBST"
            )
            .expect("bad NOTAM regexp");
        }

        RE.is_match(&self.raw.to_uppercase())
    }

    /// True if the NOTAM has expired by `now`
    ///
    /// `PERM` NOTAMs never expire. A NOTAM without a parseable
    /// end time is not considered expired.
    ///
    /// Requires `chrono`.
    #[cfg(feature = "chrono")]
    pub fn is_expired_at(&self, now: &DateTime<Utc>) -> bool {
        match self.valid_until.as_deref() {
            None | Some("PERM") => false,
            Some(until) => parse_notam_time(until).map_or(false, |t| t < *now),
        }
    }

    /// True if the NOTAM is in effect at `now`
    ///
    /// Requires `chrono`.
    #[cfg(feature = "chrono")]
    pub fn is_active_at(&self, now: &DateTime<Utc>) -> bool {
        let started = self
            .valid_from
            .as_deref()
            .and_then(|from| parse_notam_time(from).ok())
            .map_or(true, |t| t <= *now);
        started && !self.is_expired_at(now)
    }
}

impl fmt::Display for Notam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut title = String::from("NOTAM");
        if !self.id.is_empty() {
            title.push(' ');
            title.push_str(&self.id);
        }
        if !self.location.is_empty() {
            title.push_str(&format!(" ({})", self.location));
        }

        let mut lines = vec![title];
        if !self.validity.is_empty() {
            lines.push(format!("Validity: {}", self.validity));
        }
        if let Some(q) = &self.q_line {
            lines.push(format!("Q-line: {}", q));
        }
        if let Some(code) = &self.q_code {
            if code.subject().is_some() || code.condition().is_some() {
                lines.push(format!("Subject: {}", code));
            }
        }
        if let Some(alt) = &self.altitudes {
            lines.push(format!("Altitudes: {}", alt));
        }
        if let Some(pos) = &self.position {
            lines.push(format!("Area: {}", pos));
        }
        if let Some(sched) = &self.schedule {
            lines.push(format!("Schedule: {}", sched));
        }
        if !self.text.is_empty() {
            lines.push(self.text.clone());
        }
        write!(f, "{}", lines.join("\n"))
    }
}

/// Counts of NOTAMs by category
///
/// ```
/// use avtext::decode_notams;
///
/// let batch = decode_notams("!JFK 01/012 JFK RWY 04L/22R CLSD\n!JFK 01/013 JFK ILS RWY 22L U/S", "");
/// assert_eq!(batch.summary().to_string(), "Total: 2 • Runway-related: 2 • Nav/procedures: 1");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct NotamSummary {
    total: usize,
    runway: usize,
    taxiway: usize,
    nav: usize,
}

impl NotamSummary {
    /// Count the NOTAMs in `items`
    ///
    /// Categories are detected from the text as received, with
    /// whole-word matches on `RWY`, `TWY`, and navaid names.
    pub fn from_items(items: &[Notam]) -> Self {
        lazy_static! {
            static ref RUNWAY: Regex = Regex::new(r"(?i)\bRWY\b").expect("bad NOTAM regexp");
            static ref TAXIWAY: Regex = Regex::new(r"(?i)\bTWY\b").expect("bad NOTAM regexp");
            static ref NAV: Regex =
                Regex::new(r"(?i)\b(?:VOR|DME|ILS|LOC|NDB)\b").expect("bad NOTAM regexp");
        }

        let count = |re: &Regex| items.iter().filter(|n| re.is_match(&n.raw)).count();
        Self {
            total: items.len(),
            runway: count(&RUNWAY),
            taxiway: count(&TAXIWAY),
            nav: count(&NAV),
        }
    }

    /// Number of NOTAMs
    pub fn total(&self) -> usize {
        self.total
    }

    /// NOTAMs which mention a runway
    pub fn runway(&self) -> usize {
        self.runway
    }

    /// NOTAMs which mention a taxiway
    pub fn taxiway(&self) -> usize {
        self.taxiway
    }

    /// NOTAMs which mention a navaid or procedure
    pub fn nav(&self) -> usize {
        self.nav
    }
}

impl fmt::Display for NotamSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            return Ok(());
        }

        let mut parts = vec![format!("Total: {}", self.total)];
        if self.runway > 0 {
            parts.push(format!("Runway-related: {}", self.runway));
        }
        if self.taxiway > 0 {
            parts.push(format!("Taxiway-related: {}", self.taxiway));
        }
        if self.nav > 0 {
            parts.push(format!("Nav/procedures: {}", self.nav));
        }
        write!(f, "{}", parts.join(" • "))
    }
}

/// Decoded NOTAMs with their summary
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct NotamBatch {
    summary: NotamSummary,
    items: Vec<Notam>,
}

/// Decode a block of NOTAM text
///
/// The text may hold any number of NOTAMs in FAA or ICAO format.
/// If `icao_hint` is a valid ICAO code, it is the location of
/// NOTAMs which do not name their own. This function never
/// fails; empty input yields an empty batch.
///
/// ```
/// use avtext::decode_notams;
///
/// let batch = decode_notams(
///     "A1234/24 NOTAMN
/// Q) EGTT/QMRLC/IV/NBO/A/000/999/5128N00028W005
/// A) EGLL B) 2401011200 C) 2401312359
/// E) RWY 09L/27R CLSD",
///     "",
/// );
///
/// let notam = &batch.items()[0];
/// assert_eq!(notam.id(), "A1234/24");
/// assert_eq!(notam.location(), "EGLL");
/// assert_eq!(notam.validity(), "2401011200 to 2401312359");
/// assert_eq!(notam.position(), Some("51°28'N 000°28'W within 5 NM"));
/// assert_eq!(notam.text(), "Runway 09L/27R Closed");
/// assert_eq!(batch.closed_runways(), vec!["09L", "27R"]);
/// ```
pub fn decode_notams(raw: &str, icao_hint: &str) -> NotamBatch {
    let hint = crate::icao::normalize_hint(icao_hint);

    let items: Vec<Notam> = split_notam_chunks(raw)
        .iter()
        .filter_map(|chunk| {
            let classified = NotamChunk::classify(chunk);
            if classified.is_none() {
                log::debug!("notam: dropping empty chunk");
            }
            classified
        })
        .map(|chunk| {
            log::trace!("notam: decoding {:?}", chunk);
            chunk.decode(hint.as_deref())
        })
        .collect();

    NotamBatch {
        summary: NotamSummary::from_items(&items),
        items,
    }
}

impl NotamBatch {
    /// Category counts
    pub fn summary(&self) -> &NotamSummary {
        &self.summary
    }

    /// Every NOTAM, in input order
    pub fn items(&self) -> &[Notam] {
        &self.items
    }

    /// True if there are no NOTAMs
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every runway closed by any NOTAM, without duplicates
    pub fn closed_runways(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for rwy in self.items.iter().flat_map(Notam::closed_runways) {
            if !out.contains(&rwy) {
                out.push(rwy);
            }
        }
        out
    }

    /// NOTAMs which mention closures, work, obstacles, or
    /// restrictions
    pub fn highlights(&self) -> impl Iterator<Item = &Notam> + '_ {
        self.items.iter().filter(|n| n.is_highlight())
    }
}

impl fmt::Display for NotamBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut blocks = vec![self.summary.to_string()];
        blocks.extend(self.items.iter().map(Notam::to_string));
        write!(f, "{}", blocks.join("\n\n"))
    }
}

/// Parse a NOTAM `YYMMDDHHMM` timestamp
///
/// Years are in the 2000s. Trailing text, like a time zone
/// suffix, is ignored.
///
/// ```
/// use chrono::{TimeZone, Utc};
///
/// let t = avtext::parse_notam_time("2401312359").unwrap();
/// assert_eq!(t, Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 0).unwrap());
/// assert!(avtext::parse_notam_time("2402301200").is_err());
/// assert!(avtext::parse_notam_time("PERM").is_err());
/// ```
///
/// Requires `chrono`.
#[cfg(feature = "chrono")]
pub fn parse_notam_time(stamp: &str) -> Result<DateTime<Utc>, InvalidDateErr> {
    let stamp = stamp.trim();
    let digits = stamp
        .get(0..10)
        .filter(|d| d.bytes().all(|b| b.is_ascii_digit()))
        .ok_or(InvalidDateErr {})?;

    let num = |range: std::ops::Range<usize>| -> Result<u32, InvalidDateErr> {
        digits[range].parse().map_err(|_| InvalidDateErr {})
    };

    Utc.with_ymd_and_hms(
        2000 + num(0..2)? as i32,
        num(2..4)?,
        num(4..6)?,
        num(6..8)?,
        num(8..10)?,
        0,
    )
    .single()
    .ok_or(InvalidDateErr {})
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &str = "A1234/24 NOTAMN
Q) EGTT/QMRLC/IV/NBO/A/000/999/5128N00028W005
A) EGLL B) 2401011200 C) 2401312359
E) RWY 09L/27R CLSD

B0456/24 NOTAMN
Q) EGTT/QMXLC/IV/M/A/000/999/5128N00028W005
A) EGLL B) 2402010800 C) PERM
E) TWY B CLSD BTN TWY A AND TWY C

DVR VOR U/S";

    #[test]
    fn test_decode_batch() {
        let batch = decode_notams(MIXED, "egll");
        assert_eq!(batch.items().len(), 3);
        assert_eq!(
            batch.summary().to_string(),
            "Total: 3 • Runway-related: 1 • Taxiway-related: 1 • Nav/procedures: 1"
        );

        let vor = &batch.items()[2];
        assert_eq!(vor.id(), "");
        assert_eq!(vor.location(), "EGLL");
        assert_eq!(vor.text(), "DVR VOR Unserviceable");

        assert_eq!(batch.closed_runways(), vec!["09L", "27R"]);
        assert_eq!(batch.highlights().count(), 2);
    }

    #[test]
    fn test_decode_empty() {
        let batch = decode_notams("  \n\n ", "");
        assert!(batch.is_empty());
        assert_eq!(batch.summary().total(), 0);
        assert_eq!(batch.summary().to_string(), "");
        assert_eq!(batch.to_string(), "");
    }

    #[test]
    fn test_invalid_hint_ignored() {
        let batch = decode_notams("RWY 27 CLSD", "LONDON");
        assert_eq!(batch.items()[0].location(), "");
    }

    #[test]
    fn test_display() {
        let batch = decode_notams(MIXED, "");
        assert_eq!(
            batch.items()[0].to_string(),
            "NOTAM A1234/24 (EGLL)
Validity: 2401011200 to 2401312359
Q-line: EGTT/QMRLC/IV/NBO/A/000/999/5128N00028W005
Subject: Runway: closed
Altitudes: FL000 to FL999
Area: 51°28'N 000°28'W within 5 NM
Runway 09L/27R Closed"
        );
        assert_eq!(batch.items()[2].to_string(), "NOTAM\nDVR VOR Unserviceable");
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn test_expiry() {
        let batch = decode_notams(MIXED, "");
        let now = Utc.with_ymd_and_hms(2024, 2, 15, 0, 0, 0).unwrap();

        // ended 2024-01-31
        assert!(batch.items()[0].is_expired_at(&now));
        assert!(!batch.items()[0].is_active_at(&now));

        // PERM
        assert!(!batch.items()[1].is_expired_at(&now));
        assert!(batch.items()[1].is_active_at(&now));

        // no validity
        assert!(!batch.items()[2].is_expired_at(&now));

        let before = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(!batch.items()[1].is_active_at(&before));
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn test_parse_notam_time() {
        assert_eq!(
            parse_notam_time("2402281700EST"),
            Ok(Utc.with_ymd_and_hms(2024, 2, 28, 17, 0, 0).unwrap())
        );
        assert_eq!(parse_notam_time("24022817"), Err(InvalidDateErr {}));
        assert_eq!(parse_notam_time("2413011200"), Err(InvalidDateErr {}));
    }
}
