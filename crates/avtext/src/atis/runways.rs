//! Runway-in-use detection

use std::fmt;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Runways announced in an ATIS
///
/// Runway designators are normalized to two digits plus an
/// optional `L`, `R`, or `C` suffix.
///
/// ```
/// use avtext::RunwayUse;
///
/// let rwy = RunwayUse::detect("LANDING RUNWAY 27L, DEPARTURE RUNWAY 27R").unwrap();
/// assert_eq!(rwy.arrival(), &["27L"]);
/// assert_eq!(rwy.departure(), &["27R"]);
/// assert_eq!(rwy.to_string(), "Arrival 27L; Departure 27R");
///
/// let rwy = RunwayUse::detect("RUNWAYS 9L AND 9R IN USE").unwrap();
/// assert_eq!(rwy.in_use(), &["09L", "09R"]);
/// assert_eq!(rwy.to_string(), "In use 09L, 09R");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct RunwayUse {
    arrival: Vec<String>,
    departure: Vec<String>,
    in_use: Vec<String>,
}

// A list of runway designators, like `27L AND 27R`
const LIST: &str = r"(\d{1,2}[LRC]?\b(?:\s*(?:AND|&|,|/)\s*\d{1,2}[LRC]?\b)*)";
const RWY: &str = r"(?:RUNWAYS?|RWYS?)";

impl RunwayUse {
    /// Find runway assignments in uppercase ATIS text
    ///
    /// Phrases naming arrival or departure runways are preferred.
    /// A runway "in use" or "active" is reported on its own. If
    /// nothing else matches, any `RUNWAY ##` phrase is taken as
    /// in use. Returns `None` if no runway is mentioned.
    pub fn detect(text: &str) -> Option<Self> {
        lazy_static! {
            static ref SPOKEN_SIDE: Regex =
                Regex::new(r"\b(\d{1,2})\s+(LEFT|RIGHT|CENTER|CENTRE)\b").expect("bad runway regexp");
            static ref ARRIVAL: Vec<Regex> = vec![
                Regex::new(&format!(
                    r"\b(?:ARRIVALS?|ARRIVING|LANDING|APPROACH|APCH)\s+(?:[A-Z]+\s+){{0,3}}?{}\s+(?:IN\s+USE\s+|ACTIVE\s+)?(?:IS\s+|ARE\s+)?{}",
                    RWY, LIST
                ))
                .expect("bad runway regexp"),
                Regex::new(&format!(
                    r"\b{}\s+{}\s+(?:IS\s+|ARE\s+)?(?:IN\s+USE\s+)?FOR\s+(?:ARRIVALS?|LANDING)",
                    RWY, LIST
                ))
                .expect("bad runway regexp"),
            ];
            static ref DEPARTURE: Vec<Regex> = vec![
                Regex::new(&format!(
                    r"\b(?:DEPARTURES?|DEPARTING|TAKE\s*-?\s*OFF)\s+(?:[A-Z]+\s+){{0,3}}?{}\s+(?:IN\s+USE\s+|ACTIVE\s+)?(?:IS\s+|ARE\s+)?{}",
                    RWY, LIST
                ))
                .expect("bad runway regexp"),
                Regex::new(&format!(
                    r"\b{}\s+{}\s+(?:IS\s+|ARE\s+)?(?:IN\s+USE\s+)?FOR\s+(?:DEPARTURES?|TAKE\s*-?\s*OFF)",
                    RWY, LIST
                ))
                .expect("bad runway regexp"),
            ];
            static ref IN_USE: Vec<Regex> = vec![
                Regex::new(&format!(
                    r"\b{}\s+(?:IN\s+USE|ACTIVE)\s*:?\s+(?:IS\s+|ARE\s+)?{}",
                    RWY, LIST
                ))
                .expect("bad runway regexp"),
                Regex::new(&format!(r"\b{}\s+{}\s+(?:IN\s+USE|ACTIVE)\b", RWY, LIST))
                    .expect("bad runway regexp"),
                Regex::new(&format!(r"\b(?:ACTIVE|IN\s+USE)\s+{}\s+{}", RWY, LIST))
                    .expect("bad runway regexp"),
            ];
            static ref ANY: Regex =
                Regex::new(&format!(r"\b{}\s+{}", RWY, LIST)).expect("bad runway regexp");
        }

        let text = SPOKEN_SIDE.replace_all(text, |caps: &Captures| {
            format!("{}{}", &caps[1], &caps[2][0..1])
        });

        let mut out = RunwayUse {
            arrival: collect(&ARRIVAL, &text),
            departure: collect(&DEPARTURE, &text),
            in_use: collect(&IN_USE, &text),
        };

        if out.is_empty() {
            out.in_use = collect(std::slice::from_ref(&*ANY), &text);
        }

        if out.is_empty() {
            None
        } else {
            Some(out)
        }
    }

    /// Arrival runways
    pub fn arrival(&self) -> &[String] {
        &self.arrival
    }

    /// Departure runways
    pub fn departure(&self) -> &[String] {
        &self.departure
    }

    /// Runways announced as in use, without a direction
    pub fn in_use(&self) -> &[String] {
        &self.in_use
    }

    /// Every distinct runway mentioned, in announcement order
    pub fn all(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for rwy in self.arrival.iter().chain(&self.departure).chain(&self.in_use) {
            if !out.contains(&rwy.as_str()) {
                out.push(rwy);
            }
        }
        out
    }

    /// True if no runway was found
    pub fn is_empty(&self) -> bool {
        self.arrival.is_empty() && self.departure.is_empty() && self.in_use.is_empty()
    }
}

impl fmt::Display for RunwayUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.arrival.is_empty() {
            parts.push(format!("Arrival {}", self.arrival.join(", ")));
        }
        if !self.departure.is_empty() {
            parts.push(format!("Departure {}", self.departure.join(", ")));
        }
        if parts.is_empty() && !self.in_use.is_empty() {
            parts.push(format!("In use {}", self.in_use.join(", ")));
        }
        write!(f, "{}", parts.join("; "))
    }
}

/// Zero-pad a runway designator, like `9L` → `09L`
pub(crate) fn normalize_designator(rwy: &str) -> String {
    let rwy = rwy.trim();
    let digits = rwy.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 1 {
        format!("0{}", rwy)
    } else {
        rwy.to_owned()
    }
}

// Runways from every match of every pattern, deduplicated
fn collect(patterns: &[Regex], text: &str) -> Vec<String> {
    lazy_static! {
        static ref SEPARATOR: Regex = Regex::new(r"\s*(?:AND|&|,|/)\s*").expect("bad runway regexp");
    }

    let mut out: Vec<String> = Vec::new();
    for re in patterns {
        for caps in re.captures_iter(text) {
            for rwy in SEPARATOR.split(&caps[1]) {
                let rwy = normalize_designator(rwy);
                if !rwy.is_empty() && !out.contains(&rwy) {
                    out.push(rwy);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrival_departure() {
        let rwy = RunwayUse::detect("APPROACH ILS RUNWAY 27L. DEPARTURES RUNWAY 27R").unwrap();
        assert_eq!(rwy.arrival(), &["27L"]);
        assert_eq!(rwy.departure(), &["27R"]);
        assert!(rwy.in_use().is_empty());

        let rwy = RunwayUse::detect("RUNWAY 22 FOR LANDING. RUNWAY 29 FOR TAKEOFF").unwrap();
        assert_eq!(rwy.arrival(), &["22"]);
        assert_eq!(rwy.departure(), &["29"]);

        let rwy = RunwayUse::detect("LANDING RUNWAY 4 RIGHT AND 4 LEFT").unwrap();
        assert_eq!(rwy.arrival(), &["04R", "04L"]);
        assert_eq!(rwy.to_string(), "Arrival 04R, 04L");
    }

    #[test]
    fn test_in_use() {
        let rwy = RunwayUse::detect("RWY 05 IN USE").unwrap();
        assert_eq!(rwy.in_use(), &["05"]);

        let rwy = RunwayUse::detect("RUNWAY IN USE 23").unwrap();
        assert_eq!(rwy.in_use(), &["23"]);

        let rwy = RunwayUse::detect("ACTIVE RUNWAY 31L").unwrap();
        assert_eq!(rwy.in_use(), &["31L"]);
    }

    #[test]
    fn test_fallback() {
        let rwy = RunwayUse::detect("EXPECT VECTORS RUNWAY 9, 1020Z").unwrap();
        assert_eq!(rwy.in_use(), &["09"]);
        assert_eq!(rwy.all(), vec!["09"]);

        assert!(RunwayUse::detect("NO RUNWAYS HERE").is_none());
        assert!(RunwayUse::detect("").is_none());
    }

    #[test]
    fn test_normalize_designator() {
        assert_eq!(normalize_designator("9"), "09");
        assert_eq!(normalize_designator("9L"), "09L");
        assert_eq!(normalize_designator("27R"), "27R");
    }
}
