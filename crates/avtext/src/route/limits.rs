//! Route checker thresholds

use phf::phf_set;

use super::{RegionFamily, RouteChecker};

/// DCT count which draws a warning on European routes
pub const EUROPE_DCT_WARN: usize = 3;

/// DCT count which makes a European reroute likely
pub const EUROPE_DCT_HEAVY: usize = 6;

/// DCT count which draws a warning on US/Canada routes
pub const US_DCT_WARN: usize = 5;

/// DCT count which makes a US/Canada reroute likely
pub const US_DCT_HEAVY: usize = 8;

/// Non-DCT tokens needed before a route without airways is "too direct"
pub const DIRECT_ROUTE_MIN_TOKENS: usize = 6;

/// Token count at which a UK route should name a boundary fix
pub const UK_LONG_ROUTE_TOKENS: usize = 8;

/// Leading tokens searched for a UK boundary fix
pub const UK_BOUNDARY_SEARCH_TOKENS: usize = 12;

/// Speed/level groups allowed before they are redundant
pub const MAX_SPEED_LEVEL_TOKENS: usize = 2;

/// Fewest non-DCT tokens in a complete route
pub const MIN_ROUTE_TOKENS: usize = 3;

/// Unrecognized tokens listed in a report
pub const MAX_LISTED_UNRECOGNIZED: usize = 8;

/// DCT count at which cleanup notes European airway preference
pub const CLEANUP_EUROPE_DCT_NOTE: usize = 3;

/// DCT count at which cleanup notes heavy US DCT use
pub const CLEANUP_US_DCT_NOTE: usize = 6;

/// UK FIR boundary and exit fixes
static UK_BOUNDARY_FIXES: phf::Set<&'static str> = phf_set! {
    // south and channel
    "DVR", "KONAN", "LOGAN", "REDFA", "SASKI", "TOPPA", "ABNED", "DENUT",
    "ORTAC", "GODOS", "LAMSO", "SOMVA", "TIGER", "MALOT", "LIMRI",

    // north and west
    "ERAKA", "GOMUP", "SUNOT", "BILTO", "RESNO",
};

/// True if `ident` is a known UK boundary or exit fix
pub fn is_uk_boundary_fix(ident: &str) -> bool {
    UK_BOUNDARY_FIXES.contains(ident)
}

/// Builds a route checker
///
/// The defaults are the constants in this module. They are
/// heuristics, not rules: vACCs and FIRs differ in how much
/// direct routing they accept.
///
/// ```
/// use avtext::{RegionFamily, RouteLimits};
///
/// let checker = RouteLimits::new()
///     .with_dct_thresholds(RegionFamily::Europe, 2, 4)
///     .build();
/// assert_eq!(checker.limits().dct_thresholds(RegionFamily::Europe), (2, 4));
/// assert_eq!(checker.limits().dct_thresholds(RegionFamily::Us), (5, 8));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RouteLimits {
    europe_dct: (usize, usize),
    us_dct: (usize, usize),
    direct_route_min_tokens: usize,
    max_speed_level_tokens: usize,
    min_route_tokens: usize,
    max_listed_unrecognized: usize,
}

impl RouteLimits {
    /// Default thresholds
    pub fn new() -> Self {
        Self {
            europe_dct: (EUROPE_DCT_WARN, EUROPE_DCT_HEAVY),
            us_dct: (US_DCT_WARN, US_DCT_HEAVY),
            direct_route_min_tokens: DIRECT_ROUTE_MIN_TOKENS,
            max_speed_level_tokens: MAX_SPEED_LEVEL_TOKENS,
            min_route_tokens: MIN_ROUTE_TOKENS,
            max_listed_unrecognized: MAX_LISTED_UNRECOGNIZED,
        }
    }

    /// Build a route checker
    pub fn build(&self) -> RouteChecker {
        RouteChecker::new(*self)
    }

    /// DCT counts for a warning and for a likely reroute
    ///
    /// Routes with at least `warn` DCT tokens draw a warning.
    /// At `heavy` or more, a reroute is likely. `heavy` is
    /// raised to `warn` if it is smaller.
    pub fn with_dct_thresholds(
        &mut self,
        family: RegionFamily,
        warn: usize,
        heavy: usize,
    ) -> &mut Self {
        let thresholds = (warn, usize::max(warn, heavy));
        match family {
            RegionFamily::Europe => self.europe_dct = thresholds,
            RegionFamily::Us => self.us_dct = thresholds,
        }
        self
    }

    /// Non-DCT tokens before an airway-free route is "too direct"
    ///
    /// Only applies to European routes.
    pub fn with_direct_route_min_tokens(&mut self, tokens: usize) -> &mut Self {
        self.direct_route_min_tokens = tokens;
        self
    }

    /// Speed/level groups allowed before they are redundant
    pub fn with_max_speed_level_tokens(&mut self, tokens: usize) -> &mut Self {
        self.max_speed_level_tokens = tokens;
        self
    }

    /// Fewest non-DCT tokens in a complete route
    pub fn with_min_route_tokens(&mut self, tokens: usize) -> &mut Self {
        self.min_route_tokens = tokens;
        self
    }

    /// Unrecognized tokens listed before the list is cut short
    pub fn with_max_listed_unrecognized(&mut self, tokens: usize) -> &mut Self {
        self.max_listed_unrecognized = tokens;
        self
    }

    /// DCT warning and likely-reroute counts
    pub fn dct_thresholds(&self, family: RegionFamily) -> (usize, usize) {
        match family {
            RegionFamily::Europe => self.europe_dct,
            RegionFamily::Us => self.us_dct,
        }
    }

    /// Non-DCT tokens before an airway-free route is "too direct"
    pub fn direct_route_min_tokens(&self) -> usize {
        self.direct_route_min_tokens
    }

    /// Speed/level groups allowed before they are redundant
    pub fn max_speed_level_tokens(&self) -> usize {
        self.max_speed_level_tokens
    }

    /// Fewest non-DCT tokens in a complete route
    pub fn min_route_tokens(&self) -> usize {
        self.min_route_tokens
    }

    /// Unrecognized tokens listed before the list is cut short
    pub fn max_listed_unrecognized(&self) -> usize {
        self.max_listed_unrecognized
    }
}

impl Default for RouteLimits {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_fixes() {
        assert_eq!(UK_BOUNDARY_FIXES.len(), 20);
        assert!(is_uk_boundary_fix("DVR"));
        assert!(is_uk_boundary_fix("RESNO"));
        assert!(!is_uk_boundary_fix("dvr"));
        assert!(!is_uk_boundary_fix("BPK"));
        for fix in UK_BOUNDARY_FIXES.iter() {
            assert!(fix.len() == 3 || fix.len() == 5);
            assert!(fix.bytes().all(|b| b.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_builder() {
        let limits = RouteLimits::default();
        assert_eq!(limits.dct_thresholds(RegionFamily::Europe), (3, 6));
        assert_eq!(limits.dct_thresholds(RegionFamily::Us), (5, 8));
        assert_eq!(limits.min_route_tokens(), 3);

        let mut limits = RouteLimits::new();
        limits
            .with_dct_thresholds(RegionFamily::Us, 7, 2)
            .with_min_route_tokens(2)
            .with_max_speed_level_tokens(1)
            .with_direct_route_min_tokens(10)
            .with_max_listed_unrecognized(3);
        assert_eq!(limits.dct_thresholds(RegionFamily::Us), (7, 7));
        assert_eq!(limits.min_route_tokens(), 2);
        assert_eq!(limits.max_speed_level_tokens(), 1);
        assert_eq!(limits.direct_route_min_tokens(), 10);
        assert_eq!(limits.max_listed_unrecognized(), 3);
    }
}
