//! ICAO location indicators

use std::convert::TryFrom;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// A four-character ICAO location indicator, like "`EGLL`"
///
/// Validation is permissive: any four ASCII letters or digits
/// are accepted, which admits the numbered fields found in
/// some regions. Input is trimmed and uppercased.
///
/// ```
/// use avtext::IcaoCode;
///
/// let code = IcaoCode::new(" egll ").unwrap();
/// assert_eq!(code.as_str(), "EGLL");
/// assert_eq!(code.region_prefix(), 'E');
///
/// assert!(IcaoCode::new("EGL").is_err());
/// assert!(IcaoCode::new("EG-L").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IcaoCode(String);

/// Error validating an ICAO location indicator
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IcaoCodeErr {
    /// No code given
    #[error("invalid ICAO code: empty")]
    Empty,

    /// Not four letters or digits
    #[error("invalid ICAO code \"{0}\": expected four letters or digits")]
    Malformed(String),
}

impl IcaoCode {
    /// Validate and normalize an ICAO code
    pub fn new<S>(code: S) -> Result<Self, IcaoCodeErr>
    where
        S: AsRef<str>,
    {
        let code = code.as_ref().trim().to_ascii_uppercase();
        if code.is_empty() {
            Err(IcaoCodeErr::Empty)
        } else if is_valid_icao(&code) {
            Ok(Self(code))
        } else {
            Err(IcaoCodeErr::Malformed(code))
        }
    }

    /// The code, like "`EGLL`"
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First character, which identifies the ICAO region
    pub fn region_prefix(&self) -> char {
        self.0.chars().next().unwrap_or(' ')
    }
}

/// True if `code` is a four-character ICAO location indicator
///
/// `code` must already be uppercase.
///
/// ```
/// assert!(avtext::is_valid_icao("KJFK"));
/// assert!(avtext::is_valid_icao("K1G4"));
/// assert!(!avtext::is_valid_icao("kjfk"));
/// ```
pub fn is_valid_icao(code: &str) -> bool {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^[A-Z0-9]{4}$").expect("bad ICAO regexp");
    }

    RE.is_match(code)
}

/// Normalize an optional ICAO hint
///
/// Returns the uppercased hint if it is a valid code. Invalid
/// hints are logged and treated as absent.
pub(crate) fn normalize_hint(hint: &str) -> Option<String> {
    match IcaoCode::new(hint) {
        Ok(code) => Some(code.0),
        Err(IcaoCodeErr::Empty) => None,
        Err(err) => {
            log::debug!("ignoring ICAO hint: {}", err);
            None
        }
    }
}

impl fmt::Display for IcaoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for IcaoCode {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for IcaoCode {
    type Error = IcaoCodeErr;

    #[inline]
    fn try_from(inp: String) -> Result<Self, Self::Error> {
        Self::new(inp)
    }
}

impl std::str::FromStr for IcaoCode {
    type Err = IcaoCodeErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
