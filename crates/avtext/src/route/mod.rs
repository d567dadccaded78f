//! Flight plan route sanity checks
//!
//! Routes are checked heuristically, without a navigation
//! database. The checks flag routes which ATC is likely to amend:
//! heavy direct routing, missing airways, misplaced endpoints,
//! procedure names in the enroute string, and missing or
//! stray oceanic segments.
//!
//! ```
//! use avtext::{analyze_route, normalize_route_text, tokenize_route};
//! use avtext::{RegionPreference, RouteStatus};
//!
//! let route = tokenize_route(&normalize_route_text("EGLL DVR UL9 KONAN UL607 REDFA EHAM"));
//! let analysis = analyze_route(&route, Some("EGLL"), Some("EHAM"), RegionPreference::Auto);
//! assert_eq!(analysis.status(), RouteStatus::LooksOk);
//! assert!(analysis.reasons().is_empty());
//! ```

mod cleanup;
mod limits;
mod region;
mod token;

use std::fmt;

use strum::EnumMessage;

use crate::icao::{is_valid_icao, normalize_hint};

pub use cleanup::{filing_variants, has_oceanic_segment, suggest_better_route};
pub use cleanup::{FilingVariants, RouteSuggestion};
pub use limits::{is_uk_boundary_fix, RouteLimits};
pub use limits::{
    CLEANUP_EUROPE_DCT_NOTE, CLEANUP_US_DCT_NOTE, DIRECT_ROUTE_MIN_TOKENS, EUROPE_DCT_HEAVY,
    EUROPE_DCT_WARN, MAX_LISTED_UNRECOGNIZED, MAX_SPEED_LEVEL_TOKENS, MIN_ROUTE_TOKENS,
    UK_BOUNDARY_SEARCH_TOKENS, UK_LONG_ROUTE_TOKENS, US_DCT_HEAVY, US_DCT_WARN,
};
pub use region::{detect_region, RegionFamily, RegionInfo, RegionKind, RegionPreference};
pub use token::{classify_tokens, normalize_route_text, tokenize_route};
pub use token::{ClassifiedTokens, TokenKind};

use token::{is_oceanic, is_procedure_or_runway, is_speed_level};

/// Overall verdict on a route
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
pub enum RouteStatus {
    /// Malformed or incomplete
    #[strum(
        message = "Invalid format",
        detailed_message = "The route appears malformed or incomplete."
    )]
    Invalid,

    /// ATC is likely to amend the route
    #[strum(
        message = "Likely reroute",
        detailed_message = "The route may work, but ATC may amend it based on local preferred routings."
    )]
    LikelyReroute,

    /// No problems found
    #[strum(
        message = "Looks OK",
        detailed_message = "Format looks reasonable. Final acceptance depends on local vACC/ATC and current constraints."
    )]
    LooksOk,
}

impl RouteStatus {
    /// Short label, like "`Likely reroute`"
    pub fn label(&self) -> &'static str {
        self.get_message().expect("missing definition")
    }

    /// One-sentence explanation of the verdict
    pub fn description(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of checking a route
///
/// Every reason is a human-readable flag. Suggestions are never
/// empty: when no check produced one, generic advice for the
/// region is given instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteAnalysis {
    tokens: Vec<String>,
    dep: Option<String>,
    arr: Option<String>,
    region: RegionInfo,
    reasons: Vec<String>,
    suggestions: Vec<String>,
    status: RouteStatus,
}

impl RouteAnalysis {
    /// Route tokens, as checked
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Detected region
    pub fn region(&self) -> &RegionInfo {
        &self.region
    }

    /// Problems found, in check order
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Suggested fixes
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Overall verdict
    pub fn status(&self) -> RouteStatus {
        self.status
    }

    /// Number of `DCT` tokens
    pub fn dct_count(&self) -> usize {
        count_dct(&self.tokens)
    }

    /// Departure, arrival, and token counts
    ///
    /// If no departure or arrival was given, the first and last
    /// ICAO-shaped tokens are reported instead.
    ///
    /// ```
    /// use avtext::{analyze_route, RegionPreference};
    ///
    /// let route = ["EGLL", "DCT", "DVR", "UL9", "KONAN", "EHAM"];
    /// let analysis = analyze_route(&route, None, None, RegionPreference::Auto);
    /// assert_eq!(
    ///     analysis.parsed_summary(),
    ///     "Detected departure ICAO: EGLL\nDetected arrival ICAO: EHAM\nTokens: 6 (DCT: 1)"
    /// );
    /// ```
    pub fn parsed_summary(&self) -> String {
        let first = self.tokens.iter().find(|t| is_valid_icao(t));
        let last = self.tokens.iter().rev().find(|t| is_valid_icao(t));

        let mut lines = vec![];
        match (&self.dep, first) {
            (Some(dep), _) => lines.push(format!("Departure: {}", dep)),
            (None, Some(first)) => lines.push(format!("Detected departure ICAO: {}", first)),
            (None, None) => {}
        }
        match (&self.arr, last) {
            (Some(arr), _) => lines.push(format!("Arrival: {}", arr)),
            (None, Some(last)) if Some(last) != first => {
                lines.push(format!("Detected arrival ICAO: {}", last))
            }
            _ => {}
        }
        lines.push(format!(
            "Tokens: {} (DCT: {})",
            self.tokens.len(),
            self.dct_count()
        ));
        lines.join("\n")
    }
}

impl fmt::Display for RouteAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Status: {}", self.status)?;
        writeln!(f, "{}", self.status.description())?;
        writeln!(f, "Region: {}", self.region)?;
        writeln!(f, "{}", self.parsed_summary())?;
        if !self.reasons.is_empty() {
            writeln!(f, "Flags:")?;
            for reason in &self.reasons {
                writeln!(f, "  - {}", reason)?;
            }
        }
        writeln!(f, "Suggestions:")?;
        for suggestion in &self.suggestions {
            writeln!(f, "  - {}", suggestion)?;
        }
        write!(f, "Route: {}", self.tokens.join(" "))
    }
}

/// Checks routes against configurable limits
///
/// Use [`RouteLimits`] to build one, or [`RouteChecker::default()`]
/// for the default limits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteChecker {
    limits: RouteLimits,
}

impl RouteChecker {
    /// Checker with the given limits
    pub fn new(limits: RouteLimits) -> Self {
        Self { limits }
    }

    /// Limits in effect
    pub fn limits(&self) -> &RouteLimits {
        &self.limits
    }

    /// Check a tokenized route
    ///
    /// `tokens` should come from [`tokenize_route()`]. The
    /// departure and arrival hints are optional; invalid hints
    /// are ignored. Checks never fail: problems are reported
    /// as reasons and reflected in the status.
    pub fn analyze<S>(
        &self,
        tokens: &[S],
        dep: Option<&str>,
        arr: Option<&str>,
        pref: RegionPreference,
    ) -> RouteAnalysis
    where
        S: AsRef<str>,
    {
        let tokens: Vec<String> = tokens.iter().map(|t| t.as_ref().to_owned()).collect();
        let dep = dep.and_then(normalize_hint);
        let arr = arr.and_then(normalize_hint);
        let region = detect_region(dep.as_deref(), arr.as_deref(), pref);

        let mut findings = Findings::default();
        let status = self.run_checks(&tokens, dep.as_deref(), arr.as_deref(), &region, &mut findings);

        if findings.suggestions.is_empty() {
            findings.suggestions.extend(
                fallback_suggestions(region.family())
                    .iter()
                    .map(|s| (*s).to_owned()),
            );
        }

        log::debug!(
            "route: {} tokens, region \"{}\", {} reasons: {}",
            tokens.len(),
            region,
            findings.reasons.len(),
            status
        );

        RouteAnalysis {
            tokens,
            dep,
            arr,
            region,
            reasons: findings.reasons,
            suggestions: findings.suggestions,
            status,
        }
    }

    fn run_checks(
        &self,
        tokens: &[String],
        dep: Option<&str>,
        arr: Option<&str>,
        region: &RegionInfo,
        out: &mut Findings,
    ) -> RouteStatus {
        if let Some(illegal) = tokens.iter().find(|t| !is_route_charset(t)) {
            out.reason(format!(
                "Route contains invalid characters in token: {}",
                illegal
            ));
            out.reason("Only letters/numbers and / - are expected in a route line.");
            out.suggest("Remove commas/periods/special symbols and try again.");
            return RouteStatus::Invalid;
        }

        let classes = classify_tokens(tokens);
        let dct_count = classes.count(TokenKind::Direct);
        let meaningful = tokens.len() - dct_count;

        // DCT usage
        let (dct_warn, dct_heavy) = self.limits.dct_thresholds(region.family());
        if dct_count >= dct_heavy {
            out.reason(format!(
                "Heavy DCT usage ({}x). Many FIRs/vACCs prefer structured airways.",
                dct_count
            ));
            out.suggest(
                "Try generating a route with more airways (UL/UT/UQ/etc) or use local preferred routes.",
            );
        } else if dct_count >= dct_warn {
            out.reason(format!(
                "Moderate DCT usage ({}x). You may get a minor reroute.",
                dct_count
            ));
        }

        // fixes with no airways between them
        if region.family() == RegionFamily::Europe
            && meaningful >= self.limits.direct_route_min_tokens()
            && classes.count(TokenKind::Airway) == 0
        {
            out.reason(format!(
                "Route looks too direct ({} points, no airways). European ATC usually expects airway routing.",
                meaningful
            ));
            out.suggest("Join the points with airways, or use the vACC preferred route for this city pair.");
        }

        // endpoints
        if let Some(dep) = dep {
            let first_icao = tokens.iter().find(|t| is_valid_icao(t));
            if tokens.first().map(String::as_str) != Some(dep)
                && first_icao.map(String::as_str) != Some(dep)
            {
                out.reason(format!("Route does not appear to start at {}.", dep));
                out.suggest(format!(
                    "Ensure the route begins with {} (or remove airport codes if your vACC prefers that format).",
                    dep
                ));
            }
        }
        if let Some(arr) = arr {
            let last_icao = tokens.iter().rev().find(|t| is_valid_icao(t));
            if tokens.last().map(String::as_str) != Some(arr)
                && last_icao.map(String::as_str) != Some(arr)
            {
                out.reason(format!("Route does not appear to end at {}.", arr));
                out.suggest(format!(
                    "Ensure the route ends with {} (or remove airport codes if your vACC prefers that format).",
                    arr
                ));
            }
        }

        // UK entry and exit
        if region.uk_involved()
            && tokens.len() >= limits::UK_LONG_ROUTE_TOKENS
            && !tokens
                .iter()
                .take(limits::UK_BOUNDARY_SEARCH_TOKENS)
                .any(|t| is_uk_boundary_fix(t))
        {
            out.reason(
                "No common UK boundary/exit fix found early in the route. UK routes are often amended to a standard entry/exit point.",
            );
            out.suggest("Check the UK standard routes or vACC preferred routes for the expected boundary fix.");
        }

        // procedures
        if tokens.iter().any(|t| is_procedure_or_runway(t)) {
            out.reason("Route line appears to include runway/SID/STAR/procedure text. Many controllers expect those via the FMS/clearance, not in the enroute string.");
            out.suggest("Consider removing runway/SID/STAR names from the route line unless your vACC specifically asks for them.");
        }

        // oceanic
        let oceanic = tokens.iter().any(|t| is_oceanic(t));
        match region.kind() {
            RegionKind::Transatlantic if !oceanic => {
                out.reason("Transatlantic route has no oceanic segment (NAT track or lat/long points). Oceanic routing is usually required.");
                out.suggest("Add the oceanic segment from the current NAT track message, or file lat/long points.");
            }
            RegionKind::Europe if oceanic => {
                out.reason("Route includes NAT or lat/long tokens on a non-transatlantic flight. These may have been pasted by accident.");
                out.suggest("Remove oceanic tokens unless the flight really crosses oceanic airspace.");
            }
            _ => {}
        }

        // NAT designators
        let malformed_nat: Vec<&String> = tokens
            .iter()
            .filter(|t| t.starts_with("NAT") && !is_nat_designator(t))
            .collect();
        for nat in &malformed_nat {
            out.reason(format!("NAT token looks unusual: {}.", nat));
        }
        if !malformed_nat.is_empty() {
            out.suggest("If flying oceanic, use a valid track designator (e.g., NATA) or paste the track routing as published.");
        }

        // speed/level groups
        if tokens.iter().filter(|t| is_speed_level(t)).count()
            > self.limits.max_speed_level_tokens()
        {
            out.reason("Multiple speed/level tokens found. Usually one is enough.");
        }

        // length
        let incomplete = meaningful < self.limits.min_route_tokens();
        if incomplete {
            out.reason("Route is very short. This is likely incomplete.");
            out.suggest("Paste the full enroute string from SimBrief (not just one waypoint).");
        }

        // unknown tokens
        let unknown = classes.unrecognized();
        if !unknown.is_empty() {
            let listed = usize::min(unknown.len(), self.limits.max_listed_unrecognized());
            out.reason(format!(
                "Unrecognized tokens: {}{}",
                unknown[..listed].join(", "),
                if unknown.len() > listed { "…" } else { "" }
            ));
            out.suggest("Double-check for typos. This tool can’t confirm every waypoint without a nav database.");
        }

        if incomplete {
            RouteStatus::Invalid
        } else if out.reasons.len() >= 2 || dct_count >= dct_heavy {
            RouteStatus::LikelyReroute
        } else {
            RouteStatus::LooksOk
        }
    }
}

/// Check a tokenized route with the default limits
///
/// See [`RouteChecker::analyze()`].
///
/// ```
/// use avtext::{analyze_route, RegionPreference, RouteStatus};
///
/// let route = ["EGLL", "DCT", "DCT", "DCT", "DCT", "DCT", "DCT", "DCT", "DCT", "DVR", "KONAN", "EHAM"];
/// let analysis = analyze_route(&route, Some("EGLL"), Some("EHAM"), RegionPreference::Auto);
/// assert_eq!(analysis.status(), RouteStatus::LikelyReroute);
/// assert!(analysis.reasons()[0].starts_with("Heavy DCT usage (8x)"));
/// ```
pub fn analyze_route<S>(
    tokens: &[S],
    dep: Option<&str>,
    arr: Option<&str>,
    pref: RegionPreference,
) -> RouteAnalysis
where
    S: AsRef<str>,
{
    RouteChecker::default().analyze(tokens, dep, arr, pref)
}

#[derive(Clone, Debug, Default)]
struct Findings {
    reasons: Vec<String>,
    suggestions: Vec<String>,
}

impl Findings {
    fn reason<S: Into<String>>(&mut self, reason: S) {
        self.reasons.push(reason.into());
    }

    fn suggest<S: Into<String>>(&mut self, suggestion: S) {
        self.suggestions.push(suggestion.into());
    }
}

/// Generic advice for a region
fn fallback_suggestions(family: RegionFamily) -> [&'static str; 2] {
    match family {
        RegionFamily::Europe => [
            "Check your vACC preferred routes for your departure/arrival pair.",
            "If ATC issues a reroute, read back and update the FMC route accordingly.",
        ],
        RegionFamily::Us => [
            "Check FAA preferred routes or recently cleared routes for your departure/arrival pair.",
            "If ATC issues a reroute, read back and update the FMC route accordingly.",
        ],
    }
}

fn count_dct<S: AsRef<str>>(tokens: &[S]) -> usize {
    tokens.iter().filter(|t| t.as_ref() == "DCT").count()
}

// letters, digits, `/`, and `-` only
fn is_route_charset(token: &str) -> bool {
    token
        .bytes()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'/' || b == b'-')
}

// `NATA` or `NAT12`
fn is_nat_designator(token: &str) -> bool {
    match token.strip_prefix("NAT") {
        Some(rest) if rest.len() == 1 && rest.bytes().all(|b| b.is_ascii_uppercase()) => true,
        Some(rest) => (1..=2).contains(&rest.len()) && rest.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}
