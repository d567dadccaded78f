//! METAR decoding
//!
//! A METAR is consumed left-to-right in its customary field
//! order. Each field is optional: when a token does not match
//! the field expected at its position, that field is left empty
//! and the token is offered to the next field instead. Nothing
//! is ever looked for twice.

mod pressure;
mod sky;
mod thermo;
mod trend;
mod visibility;
mod weather;
mod wind;

use std::fmt;
use std::iter::Peekable;
use std::str::FromStr;

#[cfg(feature = "chrono")]
use chrono::{DateTime, Datelike, TimeZone, Utc};
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use thiserror::Error;

pub use pressure::Pressure;
pub use sky::{CloudCover, CloudLayer, Convective, SkyCondition};
pub use thermo::Temperature;
pub use trend::Trend;
pub use visibility::Visibility;
pub use weather::{Intensity, WeatherCode, WeatherGroup};
pub use wind::{Wind, WindDirection};

/// Error decoding a METAR
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MetarDecodeErr {
    /// The input was empty or only whitespace
    #[error("invalid METAR: no input")]
    Empty,
}

/// A date or time which does not exist on the calendar
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
#[error("invalid date or time")]
pub struct InvalidDateErr {}

/// Report type prefix
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Routine report (`METAR`)
    Metar,

    /// Special report (`SPECI`)
    Speci,
}

/// Report modifier following the observation time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportModifier {
    /// Fully automated observation (`AUTO`)
    Auto,

    /// Corrected report (`COR`)
    Corrected,
}

/// Day-of-month and time of an observation, like `121851Z`
///
/// ```
/// use avtext::ObservationTime;
///
/// let time = ObservationTime::parse("121851Z").unwrap();
/// assert_eq!(time.fields(), (12, 18, 51));
/// assert_eq!(time.to_string(), "day 12 at 18:51 UTC");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObservationTime {
    day: u8,
    hour: u8,
    minute: u8,
}

impl ObservationTime {
    /// Parse a `DDHHMMZ` group
    pub fn parse(token: &str) -> Option<Self> {
        lazy_static! {
            static ref RE: Regex =
                Regex::new(r"^(\d{2})(\d{2})(\d{2})Z$").expect("bad observation time regexp");
        }

        let caps = RE.captures(token)?;
        let day: u8 = caps[1].parse().ok()?;
        let hour: u8 = caps[2].parse().ok()?;
        let minute: u8 = caps[3].parse().ok()?;
        if (1..=31).contains(&day) && hour < 24 && minute < 60 {
            Some(Self { day, hour, minute })
        } else {
            None
        }
    }

    /// Observation (`day`, `hour`, `minute`), UTC
    pub fn fields(&self) -> (u8, u8, u8) {
        (self.day, self.hour, self.minute)
    }

    /// Observation time as a UTC timestamp
    ///
    /// METARs only give the day of the month. The month and year
    /// are taken from the `received` time. An observation day
    /// more than one day after the received day is assumed to
    /// belong to the previous month.
    ///
    /// Requires `chrono`.
    #[cfg(feature = "chrono")]
    pub fn datetime(&self, received: &DateTime<Utc>) -> Result<DateTime<Utc>, InvalidDateErr> {
        let (mut year, mut month) = (received.year(), received.month());
        if self.day as u32 > received.day() + 1 {
            if month == 1 {
                year -= 1;
                month = 12;
            } else {
                month -= 1;
            }
        }

        Utc.with_ymd_and_hms(
            year,
            month,
            self.day as u32,
            self.hour as u32,
            self.minute as u32,
            0,
        )
        .single()
        .ok_or(InvalidDateErr {})
    }
}

impl fmt::Display for ObservationTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "day {} at {:02}:{:02} UTC",
            self.day, self.hour, self.minute
        )
    }
}

/// A decoded METAR
///
/// Every field is optional. A field is `None` (or empty) when
/// its token was missing or malformed.
///
/// ```
/// use avtext::{parse_metar, Pressure};
///
/// let metar = parse_metar("KJFK 121851Z 18010KT 10SM FEW250 28/18 A3000").unwrap();
/// assert_eq!(metar.station(), Some("KJFK"));
/// assert_eq!(metar.time().unwrap().to_string(), "day 12 at 18:51 UTC");
/// assert_eq!(metar.wind().unwrap().to_string(), "Wind from 180° at 10 knots");
/// assert_eq!(metar.visibility().unwrap().to_string(), "10 statute miles");
/// assert_eq!(metar.clouds().unwrap().to_string(), "Few clouds at 25000 feet");
/// assert_eq!(metar.temperature().unwrap().to_string(), "28°C (82°F)");
/// assert_eq!(metar.dewpoint().unwrap().to_string(), "18°C (64°F)");
/// assert_eq!(metar.altimeter(), Some(Pressure::InchesHg(3000)));
/// assert_eq!(metar.altimeter().unwrap().to_string(), "30.00 inHg");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct MetarReport {
    raw: String,
    kind: Option<ReportKind>,
    station: Option<String>,
    time: Option<ObservationTime>,
    modifier: Option<ReportModifier>,
    wind: Option<Wind>,
    visibility: Option<Visibility>,
    weather: Vec<WeatherGroup>,
    clouds: Option<SkyCondition>,
    temperature: Option<Temperature>,
    dewpoint: Option<Temperature>,
    altimeter: Option<Pressure>,
    trend: Vec<Trend>,
    remarks: Option<String>,
}

/// Decode a METAR
///
/// Fields which cannot be decoded are left empty. The only
/// error is an empty input.
///
/// ```
/// use avtext::{parse_metar, MetarDecodeErr};
///
/// assert_eq!(parse_metar("   "), Err(MetarDecodeErr::Empty));
///
/// let metar = parse_metar("EGLL 121850Z 24012G22KT 9999 -RA BKN012 12/09 Q1008 NOSIG").unwrap();
/// assert_eq!(metar.visibility().unwrap().to_string(), "10 km or more");
/// assert_eq!(metar.weather()[0].to_string(), "Light rain");
/// ```
pub fn parse_metar(raw: &str) -> Result<MetarReport, MetarDecodeErr> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(MetarDecodeErr::Empty);
    }

    let mut tokens = raw.split_whitespace().peekable();
    let mut report = MetarReport {
        raw: raw.to_owned(),
        ..Default::default()
    };

    report.kind = take_if(&mut tokens, |t| match t {
        "METAR" => Some(ReportKind::Metar),
        "SPECI" => Some(ReportKind::Speci),
        _ => None,
    });
    report.station = take_if(&mut tokens, parse_station);
    report.time = take_if(&mut tokens, ObservationTime::parse);
    report.modifier = take_if(&mut tokens, |t| match t {
        "AUTO" => Some(ReportModifier::Auto),
        "COR" => Some(ReportModifier::Corrected),
        _ => None,
    });

    report.wind =
        take_if(&mut tokens, Wind::parse).or_else(|| take_split_variable_wind(&mut tokens));
    if let Some(wind) = report.wind {
        if let Some(varying) = take_if(&mut tokens, Wind::parse_variation) {
            report.wind = Some(wind.with_variation(varying));
        }
    }

    report.visibility = take_if(&mut tokens, Visibility::parse);

    while let Some(wx) = take_if(&mut tokens, WeatherGroup::parse) {
        report.weather.push(wx);
    }

    let mut sky = Vec::new();
    while let Some(tok) = take_if(&mut tokens, |t| {
        Some(t).filter(|t| SkyCondition::is_sky_token(t))
    }) {
        sky.push(tok);
    }
    report.clouds = SkyCondition::from_tokens(sky);

    if let Some((temp, dew)) = take_if(&mut tokens, Temperature::parse_pair) {
        report.temperature = Some(temp);
        report.dewpoint = Some(dew);
    }

    report.altimeter = take_if(&mut tokens, Pressure::parse);

    while let Some(trend) = take_if(&mut tokens, Trend::from) {
        report.trend.push(trend);
    }

    if tokens.next_if_eq(&"RMK").is_some() {
        let remarks: Vec<&str> = tokens.by_ref().collect();
        if !remarks.is_empty() {
            report.remarks = Some(remarks.join(" "));
        }
    } else if let Some(tok) = tokens.peek() {
        trace!("metar: stopped at undecoded token \"{}\"", tok);
    }

    Ok(report)
}

impl MetarReport {
    /// Input text, trimmed
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Report type prefix, if given
    pub fn kind(&self) -> Option<ReportKind> {
        self.kind
    }

    /// Reporting station ICAO code
    pub fn station(&self) -> Option<&str> {
        self.station.as_deref()
    }

    /// Day and time of observation
    pub fn time(&self) -> Option<ObservationTime> {
        self.time
    }

    /// Report modifier, if given
    pub fn modifier(&self) -> Option<ReportModifier> {
        self.modifier
    }

    /// Surface wind
    pub fn wind(&self) -> Option<Wind> {
        self.wind
    }

    /// Prevailing visibility
    pub fn visibility(&self) -> Option<&Visibility> {
        self.visibility.as_ref()
    }

    /// Present weather groups, in report order
    pub fn weather(&self) -> &[WeatherGroup] {
        &self.weather
    }

    /// Sky condition
    pub fn clouds(&self) -> Option<&SkyCondition> {
        self.clouds.as_ref()
    }

    /// Air temperature
    pub fn temperature(&self) -> Option<Temperature> {
        self.temperature
    }

    /// Dewpoint
    pub fn dewpoint(&self) -> Option<Temperature> {
        self.dewpoint
    }

    /// Altimeter setting
    pub fn altimeter(&self) -> Option<Pressure> {
        self.altimeter
    }

    /// Trend indicators
    pub fn trend(&self) -> &[Trend] {
        &self.trend
    }

    /// Remarks following `RMK`, verbatim
    pub fn remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }

    /// Human-readable summary, one line per decoded field
    pub fn summary_lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(station) = &self.station {
            out.push(format!("Station: {}", station));
        }
        if let Some(time) = self.time {
            out.push(format!("Observed on {}", time));
        }
        if let Some(wind) = self.wind {
            out.push(wind.to_string());
        }
        if let Some(vis) = &self.visibility {
            out.push(format!("Visibility: {}", vis));
        }
        if !self.weather.is_empty() {
            out.push(format!("Weather: {}", join_display(&self.weather)));
        }
        if let Some(sky) = &self.clouds {
            out.push(format!("Sky condition: {}", sky));
        }
        match (self.temperature, self.dewpoint) {
            (Some(t), Some(d)) => out.push(format!("Temperature: {}, Dewpoint: {}", t, d)),
            (Some(t), None) => out.push(format!("Temperature: {}", t)),
            _ => {}
        }
        match self.altimeter {
            Some(p @ Pressure::InchesHg(_)) => out.push(format!("Altimeter: {}", p)),
            Some(p @ Pressure::Hectopascals(_)) => out.push(format!("Altimeter (QNH): {}", p)),
            None => {}
        }
        if !self.trend.is_empty() {
            out.push(format!("Trend: {}", join_display(&self.trend)));
        }
        if let Some(rmk) = &self.remarks {
            out.push(format!("Additional remarks: {}", rmk));
        }
        out
    }
}

impl fmt::Display for MetarReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary_lines().join("\n"))
    }
}

impl FromStr for MetarReport {
    type Err = MetarDecodeErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_metar(s)
    }
}

impl AsRef<str> for MetarReport {
    #[inline]
    fn as_ref(&self) -> &str {
        self.raw()
    }
}

/// Join displayable items with `", "`
pub(crate) fn join_display<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}

// Consume the next token if `parse` accepts it
fn take_if<'a, I, T, F>(tokens: &mut Peekable<I>, parse: F) -> Option<T>
where
    I: Iterator<Item = &'a str>,
    F: FnOnce(&'a str) -> Option<T>,
{
    let out = parse(*tokens.peek()?)?;
    tokens.next();
    Some(out)
}

// `VRB` given as its own token, followed by `SS(Ggg)UNIT`
fn take_split_variable_wind<'a, I>(tokens: &mut Peekable<I>) -> Option<Wind>
where
    I: Iterator<Item = &'a str> + Clone,
{
    if tokens.peek() != Some(&"VRB") {
        return None;
    }

    let mut ahead = tokens.clone();
    ahead.next();
    let wind = Wind::parse_variable_speed(ahead.peek()?)?;
    tokens.next();
    tokens.next();
    Some(wind)
}

fn parse_station(token: &str) -> Option<String> {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^[A-Z]{4}$").expect("bad station regexp");
    }

    if RE.is_match(token) {
        Some(token.to_owned())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_metar() {
        let metar = parse_metar("KJFK 121851Z 18010KT 10SM FEW250 28/18 A3000").unwrap();
        assert_eq!(
            metar.to_string(),
            "Station: KJFK
Observed on day 12 at 18:51 UTC
Wind from 180° at 10 knots
Visibility: 10 statute miles
Sky condition: Few clouds at 25000 feet
Temperature: 28°C (82°F), Dewpoint: 18°C (64°F)
Altimeter: 30.00 inHg"
        );
        assert!(metar.weather().is_empty());
        assert!(metar.trend().is_empty());
        assert_eq!(metar.remarks(), None);
    }

    #[test]
    fn test_optional_positions() {
        let metar = parse_metar(
            "METAR EGCC 010950Z AUTO 27015G28KT 240V310 4000 +TSRA BR FEW008 BKN020CB M01/M03 Q0998 TEMPO RMK SLP123 T0012",
        )
        .unwrap();
        assert_eq!(metar.kind(), Some(ReportKind::Metar));
        assert_eq!(metar.modifier(), Some(ReportModifier::Auto));
        assert_eq!(
            metar.wind().unwrap().to_string(),
            "Wind from 270° at 15 knots, gusting to 28 knots (varying between 240° and 310°)"
        );
        assert_eq!(metar.visibility(), Some(&Visibility::Meters(4000)));
        assert_eq!(metar.weather().len(), 2);
        assert_eq!(
            join_display(metar.weather()),
            "Heavy thunderstorm rain, Mist"
        );
        assert_eq!(
            metar.clouds().unwrap().to_string(),
            "Few clouds at 800 feet, Broken clouds at 2000 feet (cumulonimbus)"
        );
        assert_eq!(metar.temperature().unwrap().celsius(), -1);
        assert_eq!(metar.dewpoint().unwrap().celsius(), -3);
        assert_eq!(metar.altimeter(), Some(Pressure::Hectopascals(998)));
        assert_eq!(metar.trend(), &[Trend::Temporary]);
        assert_eq!(metar.remarks(), Some("SLP123 T0012"));
        assert!(metar.to_string().contains("Altimeter (QNH): 998 hPa"));
    }

    #[test]
    fn test_split_variable_wind() {
        let metar = parse_metar("LFPG 121830Z VRB 05KT CAVOK 20/10 Q1020").unwrap();
        assert_eq!(metar.wind().unwrap().to_string(), "Variable wind at 5 knots");
        assert_eq!(metar.visibility(), Some(&Visibility::Cavok));
        assert_eq!(metar.clouds(), None);
        assert_eq!(metar.temperature().unwrap().celsius(), 20);

        // VRB not followed by a speed group is not a wind
        let metar = parse_metar("LFPG 121830Z VRB CAVOK").unwrap();
        assert_eq!(metar.wind(), None);
        assert_eq!(metar.visibility(), None);
    }

    #[test]
    fn test_no_backtracking() {
        // station missing: nothing after it can be positioned
        let metar = parse_metar("121851Z KJFK 18010KT").unwrap();
        assert_eq!(metar.station(), None);
        assert_eq!(metar.time(), None);
        assert_eq!(metar.wind(), None);

        // malformed wind: later fields still decode
        let metar = parse_metar("KJFK 121851Z 1801KT 10SM CLR 28/18 A3000").unwrap();
        assert_eq!(metar.wind(), None);
        assert_eq!(metar.visibility(), None);
        assert_eq!(metar.station(), Some("KJFK"));

        let metar = parse_metar("KJFK 121851Z 18010KT 10SM CLR 28/18 A3000").unwrap();
        assert_eq!(metar.clouds(), Some(&SkyCondition::Clear));
    }

    #[test]
    fn test_auto_unknown_cloud_type() {
        let metar =
            parse_metar("EGLL 121850Z AUTO 25012KT 9999 BKN030/// OVC045/// 18/09 Q1016").unwrap();
        assert_eq!(
            metar.clouds().unwrap().to_string(),
            "Broken clouds at 3000 feet, Overcast at 4500 feet"
        );
        assert_eq!(metar.temperature().unwrap().celsius(), 18);
        assert_eq!(metar.dewpoint().unwrap().celsius(), 9);
        assert_eq!(metar.altimeter(), Some(Pressure::Hectopascals(1016)));
    }

    #[test]
    fn test_remarks_in_position() {
        let metar =
            parse_metar("KJFK 121851Z 18010KT 10SM FEW250 28/18 A3000 FOO RMK AO2").unwrap();
        assert_eq!(metar.altimeter(), Some(Pressure::InchesHg(3000)));
        assert_eq!(metar.remarks(), None);

        // out of order: decoding stops at the time group
        let metar = parse_metar("121851Z KJFK RMK X").unwrap();
        assert_eq!(metar.station(), None);
        assert_eq!(metar.remarks(), None);

        let metar = parse_metar("KJFK 121851Z 18010KT A3000 RMK AO2 SLP132").unwrap();
        assert_eq!(metar.remarks(), Some("AO2 SLP132"));
    }

    #[test]
    fn test_remarks_only() {
        let metar = parse_metar("KJFK RMK").unwrap();
        assert_eq!(metar.station(), Some("KJFK"));
        assert_eq!(metar.remarks(), None);

        let metar = parse_metar("RMK AO2").unwrap();
        assert_eq!(metar.remarks(), Some("AO2"));
        assert_eq!(metar.to_string(), "Additional remarks: AO2");
    }

    #[test]
    fn test_observation_time() {
        assert!(ObservationTime::parse("321200Z").is_none());
        assert!(ObservationTime::parse("122460Z").is_none());
        assert!(ObservationTime::parse("1218Z").is_none());
    }

    #[test]
    #[cfg(feature = "chrono")]
    fn test_observation_datetime() {
        let time = ObservationTime::parse("121851Z").unwrap();
        let rx = Utc.with_ymd_and_hms(2024, 3, 12, 19, 0, 0).unwrap();
        assert_eq!(
            time.datetime(&rx).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 12, 18, 51, 0).unwrap()
        );

        // last month's observation, received after the new year
        let time = ObservationTime::parse("312350Z").unwrap();
        let rx = Utc.with_ymd_and_hms(2024, 1, 1, 0, 5, 0).unwrap();
        assert_eq!(
            time.datetime(&rx).unwrap(),
            Utc.with_ymd_and_hms(2023, 12, 31, 23, 50, 0).unwrap()
        );

        // no 31 February
        let rx = Utc.with_ymd_and_hms(2024, 3, 1, 0, 5, 0).unwrap();
        assert_eq!(time.datetime(&rx), Err(InvalidDateErr {}));
    }
}
