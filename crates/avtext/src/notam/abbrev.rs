//! NOTAM abbreviation expansion

use lazy_static::lazy_static;
use phf::phf_map;
use regex::{Captures, Regex};

/// Abbreviations expanded in NOTAM text
///
/// Keys are matched case-sensitively, as whole words only.
static ABBREVIATIONS: phf::Map<&'static str, &'static str> = phf_map! {
    // movement area
    "RWY" => "Runway",
    "TWY" => "Taxiway",
    "APRON" => "Apron",
    "RAMP" => "Ramp",

    // status
    "CLSD" => "Closed",
    "SVC" => "Service",
    "U/S" => "Unserviceable",
    "UNSERVICEABLE" => "Unserviceable",
    "OPR" => "Operational",
    "WIP" => "Work in progress",
    "MEN AND EQUIP" => "Men and equipment",

    // obstacles and lighting
    "OBST" => "Obstacle",
    "LGT" => "Light",
    "LGTS" => "Lights",
    "PAPI" => "PAPI",
    "RCLL" => "Runway centerline lights",
    "TDZ" => "Touchdown zone",

    // procedures
    "DEP" => "Departure",
    "ARR" => "Arrival",
    "SIDs" => "Standard instrument departures",
    "STARs" => "Standard terminal arrival routes",
    "PROC" => "Procedure",
    "NAV" => "Navigation",
    "VFR" => "Visual flight rules",
    "IFR" => "Instrument flight rules",

    // units
    "TWR" => "Tower",
    "GND" => "Ground",
    "ATC" => "Air traffic control",

    // schedules
    "DLY" => "Daily",
    "EXC" => "Except",
    "BTN" => "Between",
};

/// Expand NOTAM abbreviations to plain language
///
/// Abbreviations like `RWY` and `CLSD` are replaced only where
/// they stand alone as words. Whitespace is collapsed to single
/// spaces. Running the expansion again on its own output changes
/// nothing.
///
/// ```
/// use avtext::expand_notam_abbreviations;
///
/// assert_eq!(
///     expand_notam_abbreviations("RWY 09L/27R  CLSD DLY\n0800-1600"),
///     "Runway 09L/27R Closed Daily 0800-1600"
/// );
/// assert_eq!(expand_notam_abbreviations("RWYX"), "RWYX");
/// ```
pub fn expand_notam_abbreviations(text: &str) -> String {
    lazy_static! {
        static ref RE: Regex = abbreviation_regex();
    }

    let out = RE.replace_all(text, |caps: &Captures| {
        ABBREVIATIONS
            .get(&caps[0])
            .map_or_else(|| caps[0].to_owned(), |full| (*full).to_owned())
    });
    out.split_whitespace().collect::<Vec<&str>>().join(" ")
}

// One alternation over every key. Longer keys come first so that
// `LGTS` is preferred over `LGT`.
fn abbreviation_regex() -> Regex {
    let mut keys: Vec<&str> = ABBREVIATIONS.keys().copied().collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let alternation: Vec<String> = keys.iter().map(|k| regex::escape(k)).collect();
    Regex::new(&format!(r"\b(?:{})\b", alternation.join("|"))).expect("bad abbreviation regexp")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand() {
        assert_eq!(
            expand_notam_abbreviations("TWY A U/S DUE WIP"),
            "Taxiway A Unserviceable DUE Work in progress"
        );
        assert_eq!(
            expand_notam_abbreviations("RWY 27 PAPI LGTS U/S"),
            "Runway 27 PAPI Lights Unserviceable"
        );
        assert_eq!(
            expand_notam_abbreviations("MEN AND EQUIP ON TWY B"),
            "Men and equipment ON Taxiway B"
        );
        assert_eq!(expand_notam_abbreviations(""), "");
    }

    #[test]
    fn test_whole_words_only() {
        assert_eq!(expand_notam_abbreviations("RWYX TWYS XCLSD"), "RWYX TWYS XCLSD");
        assert_eq!(expand_notam_abbreviations("DEPARTURE"), "DEPARTURE");
        // case-sensitive
        assert_eq!(expand_notam_abbreviations("rwy clsd"), "rwy clsd");
    }

    #[test]
    fn test_idempotent() {
        let once = expand_notam_abbreviations(
            "RWY 04L/22R CLSD EXC ARR BTN 2200-0600. RCLL U/S. TWR SVC OPR",
        );
        assert_eq!(
            once,
            "Runway 04L/22R Closed Except Arrival Between 2200-0600. \
             Runway centerline lights Unserviceable. Tower Service Operational"
        );
        assert_eq!(expand_notam_abbreviations(&once), once);
    }

    #[test]
    fn test_table() {
        for (key, full) in ABBREVIATIONS.entries() {
            assert!(key.is_ascii());
            assert!(!full.is_empty());
            assert_eq!(expand_notam_abbreviations(key), *full);
        }
    }
}
