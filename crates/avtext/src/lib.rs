//! # avtext: Aviation Text Decoding
//!
//! This crate decodes the terse, abbreviation-heavy text formats of
//! aviation into structured records with human-readable summaries:
//!
//! * [METAR](https://en.wikipedia.org/wiki/METAR) weather reports,
//!   with [`parse_metar()`]
//! * ATIS broadcasts, as transcribed by flight simulation networks,
//!   with [`decode_atis()`]
//! * [NOTAMs](https://en.wikipedia.org/wiki/NOTAM) in FAA or ICAO
//!   format, with [`decode_notams()`]
//!
//! It also sanity-checks flight plan route strings, flagging routes
//! which air traffic control is likely to amend, with
//! [`analyze_route()`], and picks runways from the surface wind.
//!
//! ## Disclaimer
//!
//! This crate is dual-licensed MIT and Apache 2.0. Read these licenses
//! carefully as they may affect your rights.
//!
//! This crate is intended for flight simulation. It is **not** a
//! substitute for an official briefing, and it must not be used for
//! real-world flight planning or navigation. Decoding is heuristic:
//! fields which cannot be recognized are left empty, and the route
//! checker has no navigation database.
//!
//! ## Example
//!
//! All decoders are pure functions of their input text. None of
//! them fetch data; obtaining the text is up to you.
//!
//! ```
//! use avtext::{decode_atis, decode_notams, parse_metar, AtisField};
//!
//! let metar = parse_metar("KJFK 121851Z 18010KT 10SM FEW250 28/18 A3000").unwrap();
//! assert_eq!(metar.station(), Some("KJFK"));
//! println!("{}", metar);
//!
//! let atis = decode_atis(
//!     "KJFK ATIS INFO C 1851Z. 18010KT 10SM FEW250 28/18 A3000. \
//!      DEPG RWY 31L, LDG RWY 31R. ADVS YOU HAVE INFO C.",
//!     "KJFK",
//! );
//! assert_eq!(atis.get(AtisField::Information), "C (CHARLIE)");
//!
//! let notams = decode_notams(
//!     "!JFK 03/123 JFK RWY 04L/22R CLSD 2403011200-2403012000",
//!     "KJFK",
//! );
//! assert_eq!(notams.closed_runways(), ["04L", "22R"]);
//! ```
//!
//! Route checks operate on tokens:
//!
//! ```
//! use avtext::{analyze_route, normalize_route_text, tokenize_route};
//! use avtext::{RegionPreference, RouteStatus};
//!
//! let route = tokenize_route(&normalize_route_text(
//!     "RTE: EGLL DCT DVR DCT KONAN DCT KOK DCT SUXIM DCT REDFA DCT DCT EHAM",
//! ));
//! let analysis = analyze_route(&route, Some("EGLL"), Some("EHAM"), RegionPreference::Auto);
//! assert_eq!(analysis.status(), RouteStatus::LikelyReroute);
//! println!("{}", analysis);
//! ```
//!
//! ## Crate features
//!
//! * `chrono`: Use [chrono](https://crates.io/crates/chrono) to
//!   resolve report and NOTAM timestamps to calendar dates. This
//!   feature is enabled by default.

mod atis;
mod icao;
mod metar;
mod notam;
mod qcodes;
mod route;
mod runway;
mod units;

pub use atis::{decode_atis, AtisField, AtisReport, RunwayUse};
pub use icao::{is_valid_icao, IcaoCode, IcaoCodeErr};
pub use metar::{
    parse_metar, CloudCover, CloudLayer, Convective, Intensity, InvalidDateErr, MetarDecodeErr,
    MetarReport, ObservationTime, Pressure, ReportKind, ReportModifier, SkyCondition,
    Temperature, Trend, Visibility, WeatherCode, WeatherGroup, Wind, WindDirection,
};
#[cfg(feature = "chrono")]
pub use notam::parse_notam_time;
pub use notam::{
    decode_notams, decode_q_position, expand_notam_abbreviations, split_notam_chunks, Notam,
    NotamBatch, NotamChunk, NotamCondition, NotamSubject, NotamSummary, QCode,
};
pub use route::{
    analyze_route, classify_tokens, detect_region, filing_variants, has_oceanic_segment,
    is_uk_boundary_fix, normalize_route_text, suggest_better_route, tokenize_route,
    ClassifiedTokens, FilingVariants, RegionFamily, RegionInfo, RegionKind, RegionPreference,
    RouteAnalysis, RouteChecker, RouteLimits, RouteStatus, RouteSuggestion, TokenKind,
};
pub use route::{
    CLEANUP_EUROPE_DCT_NOTE, CLEANUP_US_DCT_NOTE, DIRECT_ROUTE_MIN_TOKENS, EUROPE_DCT_HEAVY,
    EUROPE_DCT_WARN, MAX_LISTED_UNRECOGNIZED, MAX_SPEED_LEVEL_TOKENS, MIN_ROUTE_TOKENS,
    UK_BOUNDARY_SEARCH_TOKENS, UK_LONG_ROUTE_TOKENS, US_DCT_HEAVY, US_DCT_WARN,
};
pub use runway::{
    best_runway, likely_runways, runway_heading, wind_components, CrosswindSide, WindComponents,
};
pub use units::{celsius_to_fahrenheit, hpa_to_inhg, SpeedUnit, HPA_TO_INHG};
