//! Route tokenization and token classes

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use strum::{EnumMessage, IntoEnumIterator};

/// Syntactic class of a route token
///
/// Classes are tested in declaration order, and the first match
/// wins. The classes are heuristic: without a navigation
/// database, a five-letter token is a "waypoint" because it
/// looks like one.
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
    strum_macros::EnumIter,
)]
pub enum TokenKind {
    /// Direct-to, `DCT`
    #[strum(detailed_message = "direct")]
    Direct,

    /// Speed and level, like `N0450F350`
    #[strum(detailed_message = "speed/level")]
    SpeedLevel,

    /// Latitude and longitude, like `52N020W` or `5230N02000W`
    #[strum(detailed_message = "coordinate")]
    Coordinate,

    /// North Atlantic track, like `NATA`
    #[strum(detailed_message = "NAT track")]
    Nat,

    /// Airway designator, like `UL612` or `Q41`
    #[strum(detailed_message = "airway")]
    Airway,

    /// Airport location indicator, like `EGLL`
    #[strum(detailed_message = "ICAO")]
    Icao,

    /// Named fix or navaid, like `DVR` or `KONAN`
    #[strum(detailed_message = "waypoint")]
    Waypoint,

    /// Short-form oceanic point, like `5020N`
    #[strum(detailed_message = "oceanic waypoint")]
    OceanicWaypoint,

    /// None of the above
    #[strum(detailed_message = "unrecognized")]
    Unrecognized,
}

const KIND_COUNT: usize = 9;

impl TokenKind {
    /// Classify one uppercase route token
    ///
    /// ```
    /// use avtext::TokenKind;
    ///
    /// assert_eq!(TokenKind::classify("DCT"), TokenKind::Direct);
    /// assert_eq!(TokenKind::classify("N0450F350"), TokenKind::SpeedLevel);
    /// assert_eq!(TokenKind::classify("UL612"), TokenKind::Airway);
    /// assert_eq!(TokenKind::classify("EGLL"), TokenKind::Icao);
    /// assert_eq!(TokenKind::classify("KONAN"), TokenKind::Waypoint);
    /// assert_eq!(TokenKind::classify("5020N"), TokenKind::OceanicWaypoint);
    /// assert_eq!(TokenKind::classify("27L"), TokenKind::Unrecognized);
    /// ```
    pub fn classify(token: &str) -> Self {
        lazy_static! {
            static ref COORD: Regex =
                Regex::new(r"^(?:\d{2}[NS]\d{3}[EW]|\d{4}[NS]\d{5}[EW])$").expect("bad route regexp");
            static ref NAT: Regex = Regex::new(r"^NAT[A-Z0-9]{1,2}$").expect("bad route regexp");
            static ref AIRWAY: Regex =
                Regex::new(r"^(?:UL|UM|UN|UT|UZ|UQ|UY|UP|U|[ABGJLMNQRTVWYZ])\d{1,3}[A-Z]?$")
                    .expect("bad route regexp");
            static ref ICAO: Regex = Regex::new(r"^[A-Z][A-Z0-9]{3}$").expect("bad route regexp");
            static ref WAYPOINT: Regex = Regex::new(r"^[A-Z]{2,5}\d?$").expect("bad route regexp");
            static ref OCEANIC: Regex =
                Regex::new(r"^(?:\d{4}[NSEW]|\d{2}[NSEW]\d{2})$").expect("bad route regexp");
        }

        if token == "DCT" {
            TokenKind::Direct
        } else if is_speed_level(token) {
            TokenKind::SpeedLevel
        } else if COORD.is_match(token) {
            TokenKind::Coordinate
        } else if NAT.is_match(token) {
            TokenKind::Nat
        } else if AIRWAY.is_match(token) {
            TokenKind::Airway
        } else if ICAO.is_match(token) {
            TokenKind::Icao
        } else if WAYPOINT.is_match(token) {
            TokenKind::Waypoint
        } else if OCEANIC.is_match(token) {
            TokenKind::OceanicWaypoint
        } else {
            TokenKind::Unrecognized
        }
    }

    /// Human-readable class name, like "`airway`"
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_display_str())
    }
}

/// Route tokens, bucketed by [`TokenKind`]
///
/// Every token lands in exactly one bucket. Order within a
/// bucket follows the route.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassifiedTokens {
    buckets: [Vec<String>; KIND_COUNT],
}

impl ClassifiedTokens {
    /// Tokens of the given class
    pub fn get(&self, kind: TokenKind) -> &[String] {
        &self.buckets[kind.index()]
    }

    /// Number of tokens of the given class
    pub fn count(&self, kind: TokenKind) -> usize {
        self.get(kind).len()
    }

    /// Tokens which fit no class
    pub fn unrecognized(&self) -> &[String] {
        self.get(TokenKind::Unrecognized)
    }

    /// Total number of tokens
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// True if there are no tokens
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Non-empty buckets, in class order
    pub fn iter(&self) -> impl Iterator<Item = (TokenKind, &[String])> {
        TokenKind::iter()
            .map(move |kind| (kind, self.get(kind)))
            .filter(|(_, tokens)| !tokens.is_empty())
    }
}

/// Bucket every token by its syntactic class
///
/// ```
/// use avtext::{classify_tokens, TokenKind};
///
/// let classes = classify_tokens(&["EGLL", "DCT", "DVR", "UL9", "KONAN", "!!"]);
/// assert_eq!(classes.get(TokenKind::Waypoint), ["DVR", "KONAN"]);
/// assert_eq!(classes.unrecognized(), ["!!"]);
/// assert_eq!(classes.len(), 6);
/// ```
pub fn classify_tokens<S>(tokens: &[S]) -> ClassifiedTokens
where
    S: AsRef<str>,
{
    let mut out = ClassifiedTokens::default();
    for token in tokens {
        let token = token.as_ref();
        out.buckets[TokenKind::classify(token).index()].push(token.to_owned());
    }
    out
}

/// Clean up a pasted route line
///
/// Line breaks become spaces. A leading `ROUTE:` or `RTE:`
/// label, as found in flight plan printouts, is removed.
/// Whitespace is collapsed and the result is uppercased.
///
/// ```
/// use avtext::normalize_route_text;
///
/// assert_eq!(
///     normalize_route_text("Route: egll dct\r\n  dvr  ul9 konan"),
///     "EGLL DCT DVR UL9 KONAN"
/// );
/// assert_eq!(normalize_route_text("RTEMO DCT ABC"), "RTEMO DCT ABC");
/// ```
pub fn normalize_route_text(text: &str) -> String {
    lazy_static! {
        static ref ROUTE_LABEL: Regex =
            Regex::new(r"(?i)^\s*ROUTE\b\s*[:=-]?\s*").expect("bad route regexp");
        static ref RTE_LABEL: Regex =
            Regex::new(r"(?i)^\s*RTE\b\s*[:=-]?\s*").expect("bad route regexp");
    }

    let text = text.replace(['\r', '\n'], " ");
    let text = ROUTE_LABEL.replace(&text, "");
    let text = RTE_LABEL.replace(&text, "");
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Split a normalized route line into tokens
pub fn tokenize_route(route: &str) -> Vec<String> {
    route.split_whitespace().map(str::to_owned).collect()
}

/// True for a speed/level group, like `N0450F350`
pub(crate) fn is_speed_level(token: &str) -> bool {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^[KN]\d{4}F\d{3}$").expect("bad route regexp");
    }

    RE.is_match(token)
}

/// True for runway, SID, STAR, or procedure tokens
///
/// These belong in the clearance, not the enroute string.
/// Matches runways (`RW27L`, `27L`), the bare words `SID`,
/// `STAR`, `DEPARTURE` and `ARRIVAL`, prefixed names like
/// `SIDBPK`, and named procedures like `DVR1M`.
pub(crate) fn is_procedure_or_runway(token: &str) -> bool {
    lazy_static! {
        static ref RUNWAY: Regex = Regex::new(r"^(?:RW)?\d{2}[LRC]?$").expect("bad route regexp");
        static ref PREFIXED: Regex =
            Regex::new(r"^(?:SID|STAR)[A-Z0-9]+$").expect("bad route regexp");
        static ref NAMED: Regex = Regex::new(r"^[A-Z]{3,5}\d[A-Z]$").expect("bad route regexp");
    }

    matches!(token, "SID" | "STAR" | "DEPARTURE" | "ARRIVAL")
        || RUNWAY.is_match(token)
        || PREFIXED.is_match(token)
        || NAMED.is_match(token)
}

/// True for NAT tracks and latitude/longitude points
pub(crate) fn is_oceanic(token: &str) -> bool {
    matches!(
        TokenKind::classify(token),
        TokenKind::Nat | TokenKind::Coordinate
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_order() {
        // buckets are indexed by discriminant
        for (i, kind) in TokenKind::iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert_eq!(TokenKind::iter().count(), KIND_COUNT);
    }

    #[test]
    fn test_classify() {
        assert_eq!(TokenKind::classify("K0850F390"), TokenKind::SpeedLevel);
        assert_eq!(TokenKind::classify("52N020W"), TokenKind::Coordinate);
        assert_eq!(TokenKind::classify("5230N02000W"), TokenKind::Coordinate);
        assert_eq!(TokenKind::classify("NATA"), TokenKind::Nat);
        assert_eq!(TokenKind::classify("NAT12"), TokenKind::Nat);
        assert_eq!(TokenKind::classify("NATABC"), TokenKind::Unrecognized);
        assert_eq!(TokenKind::classify("Q41"), TokenKind::Airway);
        assert_eq!(TokenKind::classify("J80"), TokenKind::Airway);
        assert_eq!(TokenKind::classify("UN57A"), TokenKind::Airway);
        assert_eq!(TokenKind::classify("L612"), TokenKind::Airway);
        assert_eq!(TokenKind::classify("KJFK"), TokenKind::Icao);
        assert_eq!(TokenKind::classify("LFPG"), TokenKind::Icao);
        assert_eq!(TokenKind::classify("DVR"), TokenKind::Waypoint);
        assert_eq!(TokenKind::classify("MERIT"), TokenKind::Waypoint);
        assert_eq!(TokenKind::classify("HAPIE1"), TokenKind::Waypoint);
        assert_eq!(TokenKind::classify("XYZ123"), TokenKind::Unrecognized);
        assert_eq!(TokenKind::classify("CAN1"), TokenKind::Icao);
        assert_eq!(TokenKind::classify("52N20"), TokenKind::OceanicWaypoint);
        assert_eq!(TokenKind::classify("EG-LL"), TokenKind::Unrecognized);
    }

    #[test]
    fn test_classified_tokens() {
        let route = tokenize_route("EGLL N0450F350 DCT DVR UL9 KONAN DCT 5020N XYZ123 EHAM");
        let classes = classify_tokens(&route);
        assert_eq!(classes.len(), route.len());
        assert!(!classes.is_empty());
        assert_eq!(classes.get(TokenKind::Icao), ["EGLL", "EHAM"]);
        assert_eq!(classes.count(TokenKind::Direct), 2);
        assert_eq!(classes.get(TokenKind::OceanicWaypoint), ["5020N"]);
        assert_eq!(classes.unrecognized(), ["XYZ123"]);

        let kinds: Vec<TokenKind> = classes.iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Direct,
                TokenKind::SpeedLevel,
                TokenKind::Airway,
                TokenKind::Icao,
                TokenKind::Waypoint,
                TokenKind::OceanicWaypoint,
                TokenKind::Unrecognized
            ]
        );

        assert!(classify_tokens::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_route_text("rte=  dvr\nul9"), "DVR UL9");
        assert_eq!(normalize_route_text("ROUTE - EGLL DCT"), "EGLL DCT");
        assert_eq!(normalize_route_text("ROUTES DCT"), "ROUTES DCT");
        assert_eq!(normalize_route_text("   "), "");
        assert_eq!(tokenize_route(""), Vec::<String>::new());
        assert_eq!(tokenize_route("A  B"), vec!["A", "B"]);
    }

    #[test]
    fn test_procedure_or_runway() {
        for token in ["RW27L", "09", "27C", "SID", "ARRIVAL", "SIDBPK7G", "DVR1M", "BPK7G"] {
            assert!(is_procedure_or_runway(token), "{}", token);
        }
        for token in ["DVR", "UL9", "EGLL", "N0450F350", "DCT", "RW"] {
            assert!(!is_procedure_or_runway(token), "{}", token);
        }
    }

    #[test]
    fn test_oceanic() {
        assert!(is_oceanic("NATC"));
        assert!(is_oceanic("55N030W"));
        assert!(!is_oceanic("5530N"));
        assert!(!is_oceanic("DVR"));
    }
}
