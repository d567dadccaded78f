//! Route cleanup and filing variants

use std::fmt;

use super::limits::{CLEANUP_EUROPE_DCT_NOTE, CLEANUP_US_DCT_NOTE, MIN_ROUTE_TOKENS};
use super::token::{is_oceanic, is_procedure_or_runway, is_speed_level};
use super::{count_dct, RegionFamily, RegionInfo, RegionKind};
use crate::icao::normalize_hint;

/// A cleaned-up route, with notes on what changed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteSuggestion {
    tokens: Vec<String>,
    notes: Vec<String>,
}

impl RouteSuggestion {
    /// Suggested route tokens
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// What was changed, and region advice
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Suggested route as one line
    pub fn route(&self) -> String {
        self.tokens.join(" ")
    }
}

impl fmt::Display for RouteSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Suggested route: {}", self.route())?;
        for note in &self.notes {
            write!(f, "\n  - {}", note)?;
        }
        Ok(())
    }
}

/// Suggest a cleaner version of a route
///
/// In order, this:
///
/// 1. removes a leading `dep` and trailing `arr`;
/// 2. removes runway, SID, STAR, and procedure tokens;
/// 3. keeps only the first speed/level group;
/// 4. collapses repeated `DCT` and trims `DCT` from both ends.
///
/// Each step that changes the route adds a note. If too little
/// of the route is left, the original tokens are returned with
/// a single note instead.
///
/// ```
/// use avtext::{detect_region, suggest_better_route, RegionPreference};
///
/// let region = detect_region(Some("EGLL"), Some("EHAM"), RegionPreference::Auto);
/// let route = ["EGLL", "DCT", "DCT", "DVR", "UL9", "KONAN", "DCT", "EHAM"];
/// let better = suggest_better_route(&route, Some("EGLL"), Some("EHAM"), &region);
/// assert_eq!(better.route(), "DVR UL9 KONAN");
/// assert_eq!(better.notes()[0], "Removed leading departure ICAO (EGLL).");
/// ```
pub fn suggest_better_route<S>(
    tokens: &[S],
    dep: Option<&str>,
    arr: Option<&str>,
    region: &RegionInfo,
) -> RouteSuggestion
where
    S: AsRef<str>,
{
    let original: Vec<String> = tokens.iter().map(|t| t.as_ref().to_owned()).collect();
    let dep = dep.and_then(normalize_hint);
    let arr = arr.and_then(normalize_hint);

    let mut notes = vec![];
    let mut route = original.clone();

    if let Some(dep) = dep {
        if route.first() == Some(&dep) {
            route.remove(0);
            notes.push(format!("Removed leading departure ICAO ({}).", dep));
        }
    }
    if let Some(arr) = arr {
        if route.last() == Some(&arr) {
            route.pop();
            notes.push(format!("Removed trailing arrival ICAO ({}).", arr));
        }
    }

    let before = route.len();
    route.retain(|t| !is_procedure_or_runway(t));
    if route.len() != before {
        notes.push("Removed runway/SID/STAR/procedure tokens.".to_owned());
    }

    let before = route.len();
    let mut seen_speed_level = false;
    route.retain(|t| {
        if !is_speed_level(t) {
            true
        } else if seen_speed_level {
            false
        } else {
            seen_speed_level = true;
            true
        }
    });
    if route.len() != before {
        notes.push("Kept only the first speed/level token.".to_owned());
    }

    let before = route.len();
    route.dedup_by(|a, b| *a == "DCT" && *b == "DCT");
    while route.first().map(String::as_str) == Some("DCT") {
        route.remove(0);
    }
    while route.last().map(String::as_str) == Some("DCT") {
        route.pop();
    }
    if route.len() != before {
        notes.push("Removed repeated and leading/trailing DCT tokens.".to_owned());
    }

    let dct_count = count_dct(&route);
    match region.family() {
        RegionFamily::Europe if dct_count >= CLEANUP_EUROPE_DCT_NOTE => notes.push(
            "UK/Europe tends to prefer airway-structured routes; reduce DCT where possible."
                .to_owned(),
        ),
        RegionFamily::Us if dct_count >= CLEANUP_US_DCT_NOTE => notes.push(
            "US allows more DCT, but very high DCT usage can still be amended.".to_owned(),
        ),
        _ => {}
    }
    if region.kind() == RegionKind::Transatlantic && !has_oceanic_segment(&route) {
        notes.push(
            "Transatlantic flights usually need an oceanic segment (NAT or lat/long points)."
                .to_owned(),
        );
    }

    if route.len() - dct_count < MIN_ROUTE_TOKENS {
        log::debug!("route cleanup left {} tokens; keeping original", route.len());
        return RouteSuggestion {
            tokens: original,
            notes: vec!["Route is too short to safely improve; showing original.".to_owned()],
        };
    }

    RouteSuggestion {
        tokens: route,
        notes,
    }
}

/// True if the route has a NAT track or a latitude/longitude point
///
/// ```
/// assert!(avtext::has_oceanic_segment(&["MALOT", "NATB", "JOOPY"]));
/// assert!(avtext::has_oceanic_segment(&["53N020W"]));
/// assert!(!avtext::has_oceanic_segment(&["MALOT", "JOOPY"]));
/// ```
pub fn has_oceanic_segment<S>(tokens: &[S]) -> bool
where
    S: AsRef<str>,
{
    tokens.iter().any(|t| is_oceanic(t.as_ref()))
}

/// Three ways to file the same route
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilingVariants {
    controller: Vec<String>,
    as_entered: Vec<String>,
    cleanup: Vec<String>,
}

impl FilingVariants {
    /// Without the departure and arrival airports
    pub fn controller_friendly(&self) -> &[String] {
        &self.controller
    }

    /// As entered, for pasting into the FMS
    pub fn as_entered(&self) -> &[String] {
        &self.as_entered
    }

    /// After [`suggest_better_route()`]
    pub fn cleanup(&self) -> &[String] {
        &self.cleanup
    }
}

impl fmt::Display for FilingVariants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Filing variant (controller-friendly): {}",
            self.controller.join(" ")
        )?;
        writeln!(f, "FMC paste (as entered): {}", self.as_entered.join(" "))?;
        write!(f, "Filing variant (cleanup): {}", self.cleanup.join(" "))
    }
}

/// Controller-friendly, as-entered, and cleaned-up forms of a route
///
/// ```
/// use avtext::{filing_variants, RegionInfo};
///
/// let route = ["EGLL", "DVR", "UL9", "KONAN", "DCT", "DCT", "REDFA", "EHAM"];
/// let variants = filing_variants(&route, Some("EGLL"), Some("EHAM"), &RegionInfo::default());
/// assert_eq!(variants.controller_friendly().join(" "), "DVR UL9 KONAN DCT DCT REDFA");
/// assert_eq!(variants.as_entered().len(), 8);
/// assert_eq!(variants.cleanup().join(" "), "DVR UL9 KONAN DCT REDFA");
/// ```
pub fn filing_variants<S>(
    tokens: &[S],
    dep: Option<&str>,
    arr: Option<&str>,
    region: &RegionInfo,
) -> FilingVariants
where
    S: AsRef<str>,
{
    let as_entered: Vec<String> = tokens.iter().map(|t| t.as_ref().to_owned()).collect();
    let dep_hint = dep.and_then(normalize_hint);
    let arr_hint = arr.and_then(normalize_hint);

    let last = as_entered.len().saturating_sub(1);
    let controller = as_entered
        .iter()
        .enumerate()
        .filter(|(i, t)| {
            let is_dep = *i == 0 && dep_hint.as_ref() == Some(*t);
            let is_arr = *i == last && arr_hint.as_ref() == Some(*t);
            !(is_dep || is_arr)
        })
        .map(|(_, t)| t.clone())
        .collect();

    let cleanup = suggest_better_route(&as_entered, dep, arr, region).tokens;

    FilingVariants {
        controller,
        as_entered,
        cleanup,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::route::{detect_region, RegionPreference};

    fn tokens(route: &str) -> Vec<String> {
        route.split_whitespace().map(str::to_owned).collect()
    }

    #[test]
    fn test_too_short() {
        let region = detect_region(Some("EGLL"), Some("EGCC"), RegionPreference::Auto);
        let route = ["EGLL", "DCT", "DCT", "WAYPT", "DCT", "EGCC"];
        let better = suggest_better_route(&route, Some("EGLL"), Some("EGCC"), &region);
        assert_eq!(better.tokens(), route);
        assert_eq!(
            better.notes(),
            ["Route is too short to safely improve; showing original."]
        );
    }

    #[test]
    fn test_cleanup_steps() {
        let region = detect_region(Some("EGLL"), Some("EGCC"), RegionPreference::Auto);
        let route = tokens(
            "EGLL DCT DCT RW27R BPK7G N0450F350 BPK UN57 N0440F360 WELIN DCT DCT POL EGCC",
        );
        let better = suggest_better_route(&route, Some("EGLL"), Some("EGCC"), &region);
        assert_eq!(better.route(), "N0450F350 BPK UN57 WELIN DCT POL");
        assert_eq!(
            better.notes(),
            [
                "Removed leading departure ICAO (EGLL).",
                "Removed trailing arrival ICAO (EGCC).",
                "Removed runway/SID/STAR/procedure tokens.",
                "Kept only the first speed/level token.",
                "Removed repeated and leading/trailing DCT tokens."
            ]
        );
        assert!(better.to_string().starts_with("Suggested route: N0450F350 BPK"));
    }

    #[test]
    fn test_unchanged() {
        let region = RegionInfo::default();
        let route = tokens("DVR UL9 KONAN UL607 REDFA");
        let better = suggest_better_route(&route, None, None, &region);
        assert_eq!(better.tokens(), route.as_slice());
        assert!(better.notes().is_empty());
        assert_eq!(better.to_string(), "Suggested route: DVR UL9 KONAN UL607 REDFA");
    }

    #[test]
    fn test_region_notes() {
        let route = tokens("AAA DCT BBB DCT CCC DCT DDD");

        let region = detect_region(Some("EDDF"), None, RegionPreference::Auto);
        let better = suggest_better_route(&route, None, None, &region);
        assert_eq!(
            better.notes(),
            ["UK/Europe tends to prefer airway-structured routes; reduce DCT where possible."]
        );

        let region = detect_region(Some("KJFK"), None, RegionPreference::Auto);
        let better = suggest_better_route(&route, None, None, &region);
        assert!(better.notes().is_empty());

        let region = detect_region(Some("KJFK"), Some("EGLL"), RegionPreference::Auto);
        let better = suggest_better_route(&tokens("AAA J80 BBB CCC"), None, None, &region);
        assert_eq!(
            better.notes(),
            ["Transatlantic flights usually need an oceanic segment (NAT or lat/long points)."]
        );
    }

    #[test]
    fn test_filing_variants() {
        let region = RegionInfo::default();
        let route = tokens("EGLL DVR UL9 KONAN EGLL");
        let variants = filing_variants(&route, Some("EGLL"), None, &region);
        assert_eq!(variants.controller_friendly().join(" "), "DVR UL9 KONAN EGLL");
        assert_eq!(variants.cleanup().join(" "), "DVR UL9 KONAN EGLL");

        let variants = filing_variants::<&str>(&[], None, None, &region);
        assert!(variants.controller_friendly().is_empty());
        assert_eq!(
            variants.to_string(),
            "Filing variant (controller-friendly): \nFMC paste (as entered): \nFiling variant (cleanup): "
        );
    }
}
