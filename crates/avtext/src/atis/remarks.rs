//! Free-text remarks
//!
//! Whatever is left of an ATIS after its decoded fields: the
//! sentences which are neither the header nor a weather, runway,
//! or transition level report.

use lazy_static::lazy_static;
use regex::Regex;

use super::extract::{AtisText, EXTRACTORS, INFORMATION_PATTERN};

pub(crate) fn extract(src: &AtisText) -> Option<String> {
    let kept: Vec<&str> = src
        .upper
        .split(". ")
        .map(|s| s.trim().trim_end_matches('.').trim())
        .filter(|s| !s.is_empty() && !is_header(s) && !has_decoded_content(s))
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(format!("{}.", kept.join(". ")))
    }
}

// Airport name + INFORMATION + letter, or a time stamp
fn is_header(sentence: &str) -> bool {
    lazy_static! {
        static ref HEADER: Regex = Regex::new(&format!(
            r"^(?:[A-Z0-9]+\s+){{0,4}}{}(?:,?\s+(?:TIME\s+)?\d{{4}}\s*(?:Z|ZULU|UTC)?)?$",
            INFORMATION_PATTERN
        ))
        .expect("bad ATIS regexp");
        static ref TIME: Regex =
            Regex::new(r"^(?:TIME\s+)?(?:\d{4}\s*(?:Z|ZULU|UTC)|\d{6}Z)$").expect("bad ATIS regexp");
    }

    HEADER.is_match(sentence) || TIME.is_match(sentence)
}

fn has_decoded_content(sentence: &str) -> bool {
    let src = AtisText::new(sentence, "");
    EXTRACTORS
        .iter()
        .filter(|(field, _)| field.is_condition())
        .any(|(_, extract)| extract(&src).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_header() {
        assert!(is_header("HEATHROW INFORMATION G"));
        assert!(is_header("EGCC ATIS INFO K 1020Z"));
        assert!(is_header("1020Z"));
        assert!(is_header("MANCHESTER INFORMATION KILO, TIME 0950 ZULU"));
        assert!(is_header("TIME 0950 ZULU"));
        assert!(is_header("121850Z"));
        assert!(!is_header("ACKNOWLEDGE RECEIPT OF INFORMATION G AND ADVISE CALLSIGN"));
    }

    #[test]
    fn test_extract_remarks() {
        let src = AtisText::new(
            "Heathrow information G. 1020Z. Landing runway 27L. Transition level 60. \
             24012KT 9999 FEW030 18/12 Q1013 NOSIG. Bird activity in the vicinity. \
             Acknowledge receipt of information G and advise aircraft type on first contact.",
            "",
        );
        assert_eq!(
            extract(&src),
            Some(
                "BIRD ACTIVITY IN THE VICINITY. ACKNOWLEDGE RECEIPT OF INFORMATION G AND ADVISE AIRCRAFT TYPE ON FIRST CONTACT."
                    .to_owned()
            )
        );
    }

    #[test]
    fn test_no_remarks() {
        let src = AtisText::new("EGLL ATIS INFO A. 24012KT CAVOK 18/12 Q1013.", "");
        assert_eq!(extract(&src), None);
        assert_eq!(extract(&AtisText::new("", "")), None);
    }
}
