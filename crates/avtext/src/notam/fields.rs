//! NOTAM field extraction

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // `Q)`, `A)`, … at the start of the text or after whitespace
    static ref MARKER: Regex = Regex::new(r"(?:^|\s)([A-GQ])\)").expect("bad NOTAM regexp");
}

/// True if `text` contains an ICAO `Q)` or `A)` field marker
pub(crate) fn has_icao_markers(text: &str) -> bool {
    MARKER
        .captures_iter(text)
        .any(|caps| matches!(&caps[1], "Q" | "A"))
}

/// Value of the lettered field `letter)`
///
/// The value runs up to the next field marker or the end of the
/// text. Returns `None` if the field is missing or empty.
pub(crate) fn extract_field(text: &str, letter: char) -> Option<String> {
    let markers: Vec<(char, usize, usize)> = MARKER
        .captures_iter(text)
        .filter_map(|caps| {
            let m = caps.get(1)?;
            Some((m.as_str().chars().next()?, m.start(), m.end() + 1))
        })
        .collect();

    let idx = markers.iter().position(|(l, _, _)| *l == letter)?;
    let start = markers[idx].2;
    let end = markers.get(idx + 1).map_or(text.len(), |next| next.1);

    let value = text.get(start..end)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

/// NOTAM number, like `A1234/24`
pub(crate) fn extract_notam_id(text: &str) -> Option<String> {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"\b([A-Z]\d{4}/\d{2})\b").expect("bad NOTAM regexp");
    }

    Some(RE.captures(text)?[1].to_owned())
}

/// Start and end of a `YYMMDDHHMM-YYMMDDHHMM` validity range
///
/// The end may also be `PERM`.
pub(crate) fn extract_validity(text: &str) -> Option<(String, String)> {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"(?i)\b(\d{10})\s*(?:-|TO)\s*(\d{10}|PERM)\b")
            .expect("bad NOTAM regexp");
    }

    let caps = RE.captures(text)?;
    Some((caps[1].to_owned(), caps[2].to_uppercase()))
}

/// Render a validity period from its `B)` and `C)` fields
pub(crate) fn format_validity(from: Option<&str>, until: Option<&str>) -> Option<String> {
    match (from, until) {
        (Some(b), Some(c)) => Some(format!("{} to {}", b, c)),
        (Some(b), None) => Some(format!("From {}", b)),
        (None, Some(c)) => Some(format!("Until {}", c)),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ICAO: &str = "A1234/24 NOTAMN
Q) EGTT/QMRLC/IV/NBO/A/000/999/5128N00028W005
A) EGLL B) 2401011200 C) 2401312359
D) DLY 2200-0600
E) RWY 09L/27R CLSD DUE WIP.
MAINT CREW ON RWY";

    #[test]
    fn test_extract_field() {
        assert_eq!(
            extract_field(ICAO, 'Q').as_deref(),
            Some("EGTT/QMRLC/IV/NBO/A/000/999/5128N00028W005")
        );
        assert_eq!(extract_field(ICAO, 'A').as_deref(), Some("EGLL"));
        assert_eq!(extract_field(ICAO, 'B').as_deref(), Some("2401011200"));
        assert_eq!(extract_field(ICAO, 'C').as_deref(), Some("2401312359"));
        assert_eq!(extract_field(ICAO, 'D').as_deref(), Some("DLY 2200-0600"));
        assert_eq!(
            extract_field(ICAO, 'E').as_deref(),
            Some("RWY 09L/27R CLSD DUE WIP.\nMAINT CREW ON RWY")
        );
        assert_eq!(extract_field(ICAO, 'F'), None);
        assert_eq!(extract_field("A) B) EGLL", 'A'), None);
    }

    #[test]
    fn test_markers() {
        assert!(has_icao_markers(ICAO));
        assert!(has_icao_markers("A) KJFK"));
        assert!(!has_icao_markers("RWY 04L CLSD (A) SEE AIP"));
        assert!(!has_icao_markers("E) TEXT ONLY"));
    }

    #[test]
    fn test_id_and_validity() {
        assert_eq!(extract_notam_id(ICAO).as_deref(), Some("A1234/24"));
        assert_eq!(extract_notam_id("NO ID"), None);

        assert_eq!(
            extract_validity("TWY A CLSD 2402010800-2402281700"),
            Some(("2402010800".to_owned(), "2402281700".to_owned()))
        );
        assert_eq!(
            extract_validity("OBST CRANE 2402010800 to perm"),
            Some(("2402010800".to_owned(), "PERM".to_owned()))
        );
        assert_eq!(extract_validity("2402010800"), None);
    }

    #[test]
    fn test_format_validity() {
        assert_eq!(
            format_validity(Some("2401011200"), Some("PERM")).as_deref(),
            Some("2401011200 to PERM")
        );
        assert_eq!(
            format_validity(Some("2401011200"), None).as_deref(),
            Some("From 2401011200")
        );
        assert_eq!(
            format_validity(None, Some("2401312359")).as_deref(),
            Some("Until 2401312359")
        );
        assert_eq!(format_validity(None, None), None);
    }
}
