//! ICAO Q-line decoding

use lazy_static::lazy_static;
use regex::Regex;

use super::QCode;

/// The `Q)` line of an ICAO NOTAM
///
/// ```txt
/// EGTT/QMRLC/IV/NBO/A/000/999/5321N00216W005
/// ^FIR ^code           ^lower  ^position and radius
///                          ^upper
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct QLine {
    raw: String,
    code: String,
    lower: Option<String>,
    upper: Option<String>,
    area: Option<String>,
}

impl QLine {
    /// Split a Q-line on `/`
    ///
    /// Returns `None` if there is no Q-code field.
    pub fn parse(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split('/').map(str::trim).collect();
        if parts.len() < 2 {
            return None;
        }

        let field = |i: usize| {
            parts
                .get(i)
                .filter(|s| !s.is_empty())
                .map(|s| (*s).to_owned())
        };

        // FIR/QCODE/TRAFFIC/PURPOSE/SCOPE/LOWER/UPPER/POSITION
        Some(Self {
            raw: line.trim().to_owned(),
            code: parts[1].to_owned(),
            lower: field(5),
            upper: field(6),
            area: field(7),
        })
    }

    /// The Q-line, as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The decoded Q-code, if well-formed
    pub fn q_code(&self) -> Option<QCode> {
        QCode::parse(&self.code)
    }

    /// Vertical limits, like "`FL000 to FL999`"
    pub fn altitudes(&self) -> Option<String> {
        format_limits(self.lower.as_deref(), self.upper.as_deref())
    }

    /// Center and radius of the affected area
    pub fn position(&self) -> Option<String> {
        self.area.as_deref().map(decode_q_position)
    }
}

/// Render lower and upper flight levels
///
/// A missing side is shown as `---`.
fn format_limits(lower: Option<&str>, upper: Option<&str>) -> Option<String> {
    if lower.is_none() && upper.is_none() {
        return None;
    }
    Some(format!(
        "FL{} to FL{}",
        lower.unwrap_or("---"),
        upper.unwrap_or("---")
    ))
}

/// Decode a Q-line position and radius
///
/// Positions like `5321N00216W005` are latitude and longitude in
/// degrees and minutes, followed by a radius in nautical miles.
/// Anything else is returned unchanged.
///
/// ```
/// use avtext::decode_q_position;
///
/// assert_eq!(
///     decode_q_position("5321N00216W005"),
///     "53°21'N 002°16'W within 5 NM"
/// );
/// assert_eq!(decode_q_position("5321N"), "5321N");
/// ```
pub fn decode_q_position(pos: &str) -> String {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^(\d{2})(\d{2})([NS])(\d{3})(\d{2})([EW])(\d{3})$")
            .expect("bad Q-line regexp");
    }

    let caps = match RE.captures(pos) {
        Some(caps) => caps,
        None => return pos.to_owned(),
    };

    let radius: u16 = caps[7].parse().unwrap_or(0);
    format!(
        "{}°{}'{} {}°{}'{} within {} NM",
        &caps[1], &caps[2], &caps[3], &caps[4], &caps[5], &caps[6], radius
    )
}
