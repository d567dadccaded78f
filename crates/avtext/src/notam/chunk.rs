//! NOTAM chunking and per-chunk grammars

use lazy_static::lazy_static;
use regex::Regex;

use super::abbrev::expand_notam_abbreviations;
use super::fields::{
    extract_field, extract_notam_id, extract_validity, format_validity, has_icao_markers,
};
use super::qline::QLine;
use super::Notam;

/// Split a block of NOTAM text into one chunk per NOTAM
///
/// If any line begins with `!`, the text is split before every
/// such line. Otherwise it is split on blank lines. Carriage
/// returns are removed, chunks are trimmed, and empty chunks are
/// dropped.
///
/// ```
/// use avtext::split_notam_chunks;
///
/// let faa = "!JFK 01/012 JFK RWY 04L/22R CLSD\n\
///            !JFK 01/013 JFK TWY A CLSD\n  \
///            !JFK 01/014 JFK NAV ILS RWY 22L U/S";
/// assert_eq!(split_notam_chunks(faa).len(), 3);
///
/// let icao = "A1234/24 NOTAMN\r\nE) RWY CLSD\r\n\r\nA1235/24 NOTAMN\nE) TWY CLSD";
/// assert_eq!(
///     split_notam_chunks(icao),
///     vec!["A1234/24 NOTAMN\nE) RWY CLSD", "A1235/24 NOTAMN\nE) TWY CLSD"]
/// );
/// ```
pub fn split_notam_chunks(text: &str) -> Vec<String> {
    lazy_static! {
        static ref BLANK_LINE: Regex = Regex::new(r"\n\s*\n").expect("bad NOTAM regexp");
    }

    let text = text.replace('\r', "");
    let text = text.trim();
    if text.is_empty() {
        return vec![];
    }

    let is_bang = |line: &str| line.trim_start().starts_with('!');
    let lines: Vec<&str> = text.split('\n').collect();

    let chunks: Vec<String> = if lines.iter().any(|l| is_bang(l)) {
        let mut out = Vec::new();
        let mut buf: Vec<&str> = Vec::new();
        for line in lines {
            if is_bang(line) && !buf.is_empty() {
                out.push(buf.join("\n"));
                buf.clear();
            }
            buf.push(line);
        }
        out.push(buf.join("\n"));
        out
    } else {
        BLANK_LINE.split(text).map(str::to_owned).collect()
    };

    chunks
        .into_iter()
        .map(|c| c.trim().to_owned())
        .filter(|c| !c.is_empty())
        .collect()
}

/// One NOTAM chunk, classified by its grammar
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotamChunk<'a> {
    /// FAA domestic format, like `!JFK 01/012 JFK RWY 04L/22R CLSD`
    FaaBang(&'a str),

    /// ICAO format with lettered `Q)`, `A)`, `B)`, … fields
    IcaoStructured(&'a str),

    /// Anything else
    Plain(&'a str),
}

impl<'a> NotamChunk<'a> {
    /// Classify a chunk
    ///
    /// Returns `None` if the chunk is empty.
    ///
    /// ```
    /// use avtext::NotamChunk;
    ///
    /// assert!(matches!(NotamChunk::classify("!JFK 01/012 JFK RWY CLSD"), Some(NotamChunk::FaaBang(_))));
    /// assert!(matches!(NotamChunk::classify("A) EGLL E) RWY CLSD"), Some(NotamChunk::IcaoStructured(_))));
    /// assert!(matches!(NotamChunk::classify("RWY 27 CLSD"), Some(NotamChunk::Plain(_))));
    /// assert_eq!(NotamChunk::classify("  \n"), None);
    /// ```
    pub fn classify(chunk: &'a str) -> Option<Self> {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            None
        } else if chunk.starts_with('!') {
            Some(NotamChunk::FaaBang(chunk))
        } else if has_icao_markers(chunk) {
            Some(NotamChunk::IcaoStructured(chunk))
        } else {
            Some(NotamChunk::Plain(chunk))
        }
    }

    /// The chunk text
    pub fn as_str(&self) -> &'a str {
        match self {
            NotamChunk::FaaBang(s) | NotamChunk::IcaoStructured(s) | NotamChunk::Plain(s) => s,
        }
    }

    /// Decode the chunk with its grammar
    ///
    /// `location_hint` is used when the chunk does not name its
    /// location.
    pub fn decode(&self, location_hint: Option<&str>) -> Notam {
        match self {
            NotamChunk::FaaBang(s) => decode_faa(s, location_hint),
            NotamChunk::IcaoStructured(s) => decode_icao(s, location_hint),
            NotamChunk::Plain(s) => decode_plain(s, location_hint),
        }
    }
}

fn decode_faa(chunk: &str, location_hint: Option<&str>) -> Notam {
    lazy_static! {
        static ref RE: Regex =
            Regex::new(r"^!([A-Z0-9]{3,4})\s+(\d{2}/\d{3,4})\s+([A-Z0-9]{3,4})\s+(.+)$")
                .expect("bad NOTAM regexp");
    }

    let one_line = chunk.split_whitespace().collect::<Vec<&str>>().join(" ");
    let mut notam = Notam::new(chunk);

    match RE.captures(&one_line) {
        Some(caps) => {
            notam.id = format!("{} {}", &caps[1], &caps[2]);
            notam.location = caps[1].to_owned();
            notam.text = expand_notam_abbreviations(&caps[4]);
        }
        None => {
            log::debug!("notam: FAA header not recognized: \"{}\"", one_line);
            notam.id = extract_notam_id(&one_line).unwrap_or_default();
            notam.location = location_hint.unwrap_or_default().to_owned();
            notam.text = expand_notam_abbreviations(&one_line);
        }
    }

    notam.set_generic_validity(&one_line);
    notam
}

fn decode_icao(chunk: &str, location_hint: Option<&str>) -> Notam {
    let field = |letter| extract_field(chunk, letter);
    let qline = field('Q').and_then(|q| QLine::parse(&q));
    let (from, until) = (field('B'), field('C'));

    let mut notam = Notam::new(chunk);
    notam.id = extract_notam_id(chunk).unwrap_or_default();
    notam.location = field('A')
        .or_else(|| location_hint.map(str::to_owned))
        .unwrap_or_default();

    match format_validity(from.as_deref(), until.as_deref()) {
        Some(validity) => {
            notam.validity = validity;
            notam.valid_from = from;
            notam.valid_until = until;
        }
        None => notam.set_generic_validity(chunk),
    }

    if let Some(q) = qline {
        notam.q_code = q.q_code();
        notam.altitudes = q.altitudes();
        notam.position = q.position();
        notam.q_line = Some(q.as_str().to_owned());
    }
    if notam.altitudes.is_none() {
        notam.altitudes = match (field('F'), field('G')) {
            (None, None) => None,
            (lower, upper) => Some(format!(
                "{} to {}",
                lower.as_deref().unwrap_or("---"),
                upper.as_deref().unwrap_or("---")
            )),
        };
    }

    notam.schedule = field('D');
    notam.text = expand_notam_abbreviations(&field('E').unwrap_or_else(|| chunk.to_owned()));
    notam
}

fn decode_plain(chunk: &str, location_hint: Option<&str>) -> Notam {
    let mut notam = Notam::new(chunk);
    notam.id = extract_notam_id(chunk).unwrap_or_default();
    notam.location = location_hint.unwrap_or_default().to_owned();
    notam.set_generic_validity(chunk);
    notam.text = expand_notam_abbreviations(chunk);
    notam
}

impl Notam {
    // Validity from a `YYMMDDHHMM-YYMMDDHHMM` range anywhere in `text`
    fn set_generic_validity(&mut self, text: &str) {
        if let Some((from, until)) = extract_validity(text) {
            self.validity = format!("{} to {}", from, until);
            self.valid_from = Some(from);
            self.valid_until = Some(until);
        }
    }
}
