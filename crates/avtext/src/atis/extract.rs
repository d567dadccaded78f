//! Field extractors
//!
//! Each extractor looks for exactly one field and knows nothing
//! about the others. METAR-shaped tokens are tried before the
//! spoken phrases used by some ATIS providers.

use lazy_static::lazy_static;
use phf::phf_map;
use regex::Regex;

use super::runways::RunwayUse;
use super::{remarks, AtisField};
use crate::icao::normalize_hint;
use crate::metar::{
    CloudCover, CloudLayer, Pressure, SkyCondition, Temperature, Trend, Visibility, WeatherGroup,
    Wind, WindDirection,
};
use crate::units::SpeedUnit;

/// Normalized ATIS source text
#[derive(Clone, Debug)]
pub(crate) struct AtisText {
    /// Uppercased, whitespace-collapsed text
    pub upper: String,

    /// Uppercased tokens with punctuation removed
    pub tokens: Vec<String>,

    /// Validated airport hint
    pub hint: Option<String>,
}

impl AtisText {
    pub fn new(text: &str, icao_hint: &str) -> Self {
        let upper = text
            .to_uppercase()
            .split_whitespace()
            .collect::<Vec<&str>>()
            .join(" ");
        let tokens = upper
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '/' || c == '+' || c == '-'))
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .collect();

        Self {
            upper,
            tokens,
            hint: normalize_hint(icao_hint),
        }
    }
}

/// Extracts one field, if present
pub(crate) type Extractor = fn(&AtisText) -> Option<String>;

/// Every extractor, in report order
pub(crate) const EXTRACTORS: &[(AtisField, Extractor)] = &[
    (AtisField::Airport, airport),
    (AtisField::Information, information),
    (AtisField::Time, time),
    (AtisField::Runways, runways),
    (AtisField::TransitionLevel, transition_level),
    (AtisField::Wind, wind),
    (AtisField::Visibility, visibility),
    (AtisField::Weather, weather),
    (AtisField::Sky, sky),
    (AtisField::Temperature, temperature),
    (AtisField::Dewpoint, dewpoint),
    (AtisField::Altimeter, altimeter),
    (AtisField::Trend, trend),
    (AtisField::Remarks, remarks::extract),
];

/// NATO phonetic alphabet, word → letter
static PHONETIC: phf::Map<&'static str, char> = phf_map! {
    "ALPHA" => 'A',
    "ALFA" => 'A',
    "BRAVO" => 'B',
    "CHARLIE" => 'C',
    "DELTA" => 'D',
    "ECHO" => 'E',
    "FOXTROT" => 'F',
    "GOLF" => 'G',
    "HOTEL" => 'H',
    "INDIA" => 'I',
    "JULIET" => 'J',
    "JULIETT" => 'J',
    "KILO" => 'K',
    "LIMA" => 'L',
    "MIKE" => 'M',
    "NOVEMBER" => 'N',
    "OSCAR" => 'O',
    "PAPA" => 'P',
    "QUEBEC" => 'Q',
    "ROMEO" => 'R',
    "SIERRA" => 'S',
    "TANGO" => 'T',
    "UNIFORM" => 'U',
    "VICTOR" => 'V',
    "WHISKEY" => 'W',
    "WHISKY" => 'W',
    "XRAY" => 'X',
    "X-RAY" => 'X',
    "YANKEE" => 'Y',
    "ZULU" => 'Z',
};

/// Letter → phonetic word
const PHONETIC_WORDS: [&str; 26] = [
    "ALPHA", "BRAVO", "CHARLIE", "DELTA", "ECHO", "FOXTROT", "GOLF", "HOTEL", "INDIA", "JULIETT",
    "KILO", "LIMA", "MIKE", "NOVEMBER", "OSCAR", "PAPA", "QUEBEC", "ROMEO", "SIERRA", "TANGO",
    "UNIFORM", "VICTOR", "WHISKEY", "XRAY", "YANKEE", "ZULU",
];

/// Phonetic word for an uppercase letter
pub(crate) fn phonetic_word(letter: char) -> Option<&'static str> {
    if letter.is_ascii_uppercase() {
        Some(PHONETIC_WORDS[(letter as u8 - b'A') as usize])
    } else {
        None
    }
}

/// Letter for an uppercase phonetic word or single letter
pub(crate) fn phonetic_letter(word: &str) -> Option<char> {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => Some(c),
        _ => PHONETIC.get(word).copied(),
    }
}

fn airport(src: &AtisText) -> Option<String> {
    lazy_static! {
        static ref RE: Regex = Regex::new(
            r"\b([A-Z]{4})\s+(?:ARRIVAL\s+|DEPARTURE\s+)?(?:ATIS|INFORMATION|INFO)\b"
        )
        .expect("bad ATIS regexp");
    }

    src.hint.clone().or_else(|| {
        RE.captures_iter(&src.upper)
            .map(|caps| caps[1].to_owned())
            .find(|code| {
                !matches!(
                    code.as_str(),
                    "THIS" | "WITH" | "FROM" | "HAVE" | "THAT" | "ATIS" | "INFO"
                )
            })
    })
}

/// Information letter pattern, shared with remarks filtering
pub(crate) const INFORMATION_PATTERN: &str = r"\b(?:INFORMATION|INFO|ATIS)\s+(?:(?:INFORMATION|INFO)\s+)?(ALPHA|ALFA|BRAVO|CHARLIE|DELTA|ECHO|FOXTROT|GOLF|HOTEL|INDIA|JULIETT|JULIET|KILO|LIMA|MIKE|NOVEMBER|OSCAR|PAPA|QUEBEC|ROMEO|SIERRA|TANGO|UNIFORM|VICTOR|WHISKEY|WHISKY|X-RAY|XRAY|YANKEE|ZULU|[A-Z])\b";

fn information(src: &AtisText) -> Option<String> {
    lazy_static! {
        static ref RE: Regex = Regex::new(INFORMATION_PATTERN).expect("bad ATIS regexp");
    }

    let caps = RE.captures(&src.upper)?;
    let letter = phonetic_letter(&caps[1])?;
    Some(format!("{} ({})", letter, phonetic_word(letter)?))
}

fn time(src: &AtisText) -> Option<String> {
    lazy_static! {
        static ref RE: Regex =
            Regex::new(r"\b(\d{2})(\d{2})\s*(?:ZULU|UTC|Z)\b").expect("bad ATIS regexp");
        static ref METAR_TIME: Regex = Regex::new(r"^\d{2}(\d{2})(\d{2})Z$").expect("bad ATIS regexp");
    }

    RE.captures_iter(&src.upper)
        .map(|caps| (caps[1].to_owned(), caps[2].to_owned()))
        .chain(src.tokens.iter().filter_map(|tok| {
            let caps = METAR_TIME.captures(tok)?;
            Some((caps[1].to_owned(), caps[2].to_owned()))
        }))
        .find(|(hh, mm)| {
            hh.parse::<u8>().map_or(false, |h| h < 24) && mm.parse::<u8>().map_or(false, |m| m < 60)
        })
        .map(|(hh, mm)| format!("{}:{} UTC", hh, mm))
}

fn runways(src: &AtisText) -> Option<String> {
    Some(RunwayUse::detect(&src.upper)?.to_string())
}

fn transition_level(src: &AtisText) -> Option<String> {
    lazy_static! {
        static ref RE: Regex =
            Regex::new(r"\b(?:TRANSITION\s+LEVEL|TL)\s+(?:FL\s*|FLIGHT\s+LEVEL\s+)?(\d{2,3})\b")
                .expect("bad ATIS regexp");
    }

    let caps = RE.captures(&src.upper)?;
    Some(format!("FL{}", &caps[1]))
}

fn wind(src: &AtisText) -> Option<String> {
    wind_from_tokens(&src.tokens)
        .or_else(|| wind_from_phrase(&src.upper))
        .map(|w| w.to_string())
}

fn wind_from_tokens(tokens: &[String]) -> Option<Wind> {
    for (i, tok) in tokens.iter().enumerate() {
        let next = tokens.get(i + 1).map(String::as_str);
        let (wind, used) = match Wind::parse(tok) {
            Some(w) => (w, 1),
            None if tok == "VRB" => match next.and_then(Wind::parse_variable_speed) {
                Some(w) => (w, 2),
                None => continue,
            },
            None => continue,
        };

        let varying = tokens
            .get(i + used)
            .and_then(|t| Wind::parse_variation(t));
        return Some(match varying {
            Some(v) => wind.with_variation(v),
            None => wind,
        });
    }
    None
}

fn wind_from_phrase(upper: &str) -> Option<Wind> {
    lazy_static! {
        static ref CALM: Regex = Regex::new(r"\bWINDS?\s+(?:ARE\s+|IS\s+)?CALM\b").expect("bad ATIS regexp");
        static ref VARIABLE: Regex = Regex::new(
            r"\bWINDS?\s+VARIABLE\s+(?:AT\s+)?(\d{1,3})\s*(?:KNOTS?|KTS?)\b"
        )
        .expect("bad ATIS regexp");
        static ref DIRECTIONAL: Regex = Regex::new(
            r"\bWINDS?\s+(\d{3})(?:\s*DEGREES)?\s+(?:AT\s+)?(\d{1,3})(?:\s+(?:GUSTING|GUSTS|GUST|G)\s+(?:TO\s+)?(\d{1,3}))?\s*(?:KNOTS?|KTS?)\b"
        )
        .expect("bad ATIS regexp");
    }

    if CALM.is_match(upper) {
        return Some(Wind::new(WindDirection::Degrees(0), 0, None, SpeedUnit::Knots));
    }

    if let Some(caps) = DIRECTIONAL.captures(upper) {
        let dir: u16 = caps[1].parse().ok()?;
        if dir <= 360 {
            return Some(Wind::new(
                WindDirection::Degrees(dir),
                caps[2].parse().ok()?,
                caps.get(3).and_then(|g| g.as_str().parse().ok()),
                SpeedUnit::Knots,
            ));
        }
    }

    let caps = VARIABLE.captures(upper)?;
    Some(Wind::new(
        WindDirection::Variable,
        caps[1].parse().ok()?,
        None,
        SpeedUnit::Knots,
    ))
}

fn visibility(src: &AtisText) -> Option<String> {
    lazy_static! {
        static ref PHRASE: Regex = Regex::new(
            r"\bVISIBILITY\s+(\d{1,5})\s*(KILOMETERS?|KILOMETRES?|KM|METERS?|METRES?|STATUTE\s+MILES?|MILES?|SM|M)\b"
        )
        .expect("bad ATIS regexp");
    }

    // bare four-digit groups are only visibility beside a wind or VIS
    let from_tokens = src.tokens.iter().enumerate().find_map(|(i, tok)| {
        let vis = Visibility::parse(tok)?;
        if let Visibility::Meters(_) = vis {
            let prev = i.checked_sub(1).and_then(|p| src.tokens.get(p))?;
            let in_context = matches!(prev.as_str(), "VIS" | "VISIBILITY")
                || Wind::parse(prev).is_some()
                || Wind::parse_variation(prev).is_some();
            if !in_context {
                return None;
            }
        }
        Some(vis.to_string())
    });

    from_tokens.or_else(|| {
        let caps = PHRASE.captures(&src.upper)?;
        let unit = match &caps[2] {
            u if u.starts_with("KILOMET") || u == "KM" => "kilometers",
            u if u.starts_with("MET") || u == "M" => "meters",
            _ => "statute miles",
        };
        Some(format!("{} {}", &caps[1], unit))
    })
}

fn weather(src: &AtisText) -> Option<String> {
    let mut groups: Vec<WeatherGroup> = Vec::new();
    for wx in src.tokens.iter().filter_map(|t| WeatherGroup::parse(t)) {
        if !groups.contains(&wx) {
            groups.push(wx);
        }
    }

    if groups.is_empty() {
        None
    } else {
        Some(crate::metar::join_display(&groups))
    }
}

fn sky(src: &AtisText) -> Option<String> {
    lazy_static! {
        static ref CLEAR: Regex = Regex::new(
            r"\b(?:SKY\s+CLEAR|NO\s+SIGNIFICANT\s+CLOUDS?|NO\s+CLOUDS?\s+DETECTED)\b"
        )
        .expect("bad ATIS regexp");
        static ref LAYER: Regex = Regex::new(
            r"\b(FEW|SCATTERED|BROKEN|OVERCAST)\s+(?:CLOUDS?\s+)?(?:AT\s+)?(\d{3,5})(\s*(?:FEET|FT))?\b"
        )
        .expect("bad ATIS regexp");
    }

    if let Some(sky) = SkyCondition::from_tokens(&src.tokens) {
        return Some(sky.to_string());
    }

    if CLEAR.is_match(&src.upper) {
        return Some(SkyCondition::Clear.to_string());
    }

    let layers: Vec<CloudLayer> = LAYER
        .captures_iter(&src.upper)
        .filter_map(|caps| {
            let cover = match &caps[1] {
                "FEW" => CloudCover::Few,
                "SCATTERED" => CloudCover::Scattered,
                "BROKEN" => CloudCover::Broken,
                _ => CloudCover::Overcast,
            };
            let value: u32 = caps[2].parse().ok()?;
            // "BROKEN 025" is hundreds of feet
            let feet = if caps.get(3).is_none() && caps[2].len() == 3 {
                value * 100
            } else {
                value
            };
            Some(CloudLayer::new(cover, feet))
        })
        .collect();

    if layers.is_empty() {
        None
    } else {
        Some(SkyCondition::Layers(layers).to_string())
    }
}

fn temperature_pair(src: &AtisText) -> Option<(Temperature, Temperature)> {
    src.tokens.iter().find_map(|t| Temperature::parse_pair(t))
}

// Spoken temperature, like "TEMPERATURE MINUS 3"
fn spoken_temperature(upper: &str, re: &Regex) -> Option<Temperature> {
    let caps = re.captures(upper)?;
    let value: i16 = caps[2].parse().ok()?;
    Some(Temperature::from_celsius(if caps.get(1).is_some() {
        -value
    } else {
        value
    }))
}

fn temperature(src: &AtisText) -> Option<String> {
    lazy_static! {
        static ref RE: Regex =
            Regex::new(r"\bTEMPERATURE\s+(MINUS\s+|M)?(\d{1,2})\b").expect("bad ATIS regexp");
    }

    temperature_pair(src)
        .map(|(t, _)| t)
        .or_else(|| spoken_temperature(&src.upper, &RE))
        .map(|t| t.to_string())
}

fn dewpoint(src: &AtisText) -> Option<String> {
    lazy_static! {
        static ref RE: Regex =
            Regex::new(r"\bDEW\s*POINT\s+(MINUS\s+|M)?(\d{1,2})\b").expect("bad ATIS regexp");
    }

    temperature_pair(src)
        .map(|(_, d)| d)
        .or_else(|| spoken_temperature(&src.upper, &RE))
        .map(|d| d.to_string())
}

fn altimeter(src: &AtisText) -> Option<String> {
    lazy_static! {
        static ref QNH: Regex = Regex::new(r"\bQNH\s*(\d{3,4})\b").expect("bad ATIS regexp");
        static ref ALTIMETER: Regex =
            Regex::new(r"\bALTIMETER\s+(?:SETTING\s+)?(\d{2})\.?(\d{2})\b").expect("bad ATIS regexp");
    }

    let pressure = src
        .tokens
        .iter()
        .find_map(|t| Pressure::parse(t))
        .or_else(|| {
            // three-digit QNH is below 1000 hPa
            let caps = QNH.captures(&src.upper)?;
            Some(Pressure::Hectopascals(format!("{:0>4}", &caps[1]).parse().ok()?))
        })
        .or_else(|| {
            let caps = ALTIMETER.captures(&src.upper)?;
            Some(Pressure::InchesHg(format!("{}{}", &caps[1], &caps[2]).parse().ok()?))
        })?;

    Some(pressure.to_dual_units_string())
}

fn trend(src: &AtisText) -> Option<String> {
    let mut trends: Vec<Trend> = Vec::new();
    for t in src.tokens.iter().filter_map(Trend::from) {
        if !trends.contains(&t) {
            trends.push(t);
        }
    }

    if trends.is_empty() {
        None
    } else {
        Some(crate::metar::join_display(&trends))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src(text: &str) -> AtisText {
        AtisText::new(text, "")
    }

    #[test]
    fn test_normalize() {
        let s = AtisText::new("Heathrow information G.\n  Wind 240/12,  q1013", "egll");
        assert_eq!(s.upper, "HEATHROW INFORMATION G. WIND 240/12, Q1013");
        assert_eq!(
            s.tokens,
            vec!["HEATHROW", "INFORMATION", "G", "WIND", "240/12", "Q1013"]
        );
        assert_eq!(s.hint.as_deref(), Some("EGLL"));
    }

    #[test]
    fn test_phonetic() {
        assert_eq!(phonetic_letter("BRAVO"), Some('B'));
        assert_eq!(phonetic_letter("K"), Some('K'));
        assert_eq!(phonetic_letter("BR"), None);
        assert_eq!(phonetic_word('J'), Some("JULIETT"));
        assert_eq!(phonetic_word('?'), None);
        for (word, letter) in PHONETIC.entries() {
            assert_eq!(word.chars().next(), Some(*letter));
        }
    }

    #[test]
    fn test_airport_and_information() {
        assert_eq!(airport(&src("EGCC ATIS INFO K")), Some("EGCC".to_owned()));
        assert_eq!(airport(&src("THIS IS ATIS K")), None);
        assert_eq!(airport(&src("ATIS INFORMATION K")), None);
        assert_eq!(
            airport(&AtisText::new("THIS IS ATIS K", "kjfk")),
            Some("KJFK".to_owned())
        );
        assert_eq!(
            information(&src("EGCC ATIS INFO K")),
            Some("K (KILO)".to_owned())
        );
        assert_eq!(
            information(&src("Kennedy information Bravo")),
            Some("B (BRAVO)".to_owned())
        );
        assert_eq!(information(&src("NO LETTER HERE")), None);
    }

    #[test]
    fn test_time() {
        assert_eq!(time(&src("TIME 1020Z")), Some("10:20 UTC".to_owned()));
        assert_eq!(time(&src("0950 ZULU")), Some("09:50 UTC".to_owned()));
        assert_eq!(time(&src("EGLL 121850Z 24012KT")), Some("18:50 UTC".to_owned()));
        assert_eq!(time(&src("QNH 1013")), None);
    }

    #[test]
    fn test_transition_level() {
        assert_eq!(
            transition_level(&src("TRANSITION LEVEL 60")),
            Some("FL60".to_owned())
        );
        assert_eq!(transition_level(&src("TL FL070")), Some("FL070".to_owned()));
        assert_eq!(transition_level(&src("TLOF 60")), None);
    }

    #[test]
    fn test_wind() {
        assert_eq!(
            wind(&src("24012KT 220V280")),
            Some("Wind from 240° at 12 knots (varying between 220° and 280°)".to_owned())
        );
        assert_eq!(
            wind(&src("WIND 270 DEGREES AT 15 GUSTING 25 KNOTS")),
            Some("Wind from 270° at 15 knots, gusting to 25 knots".to_owned())
        );
        assert_eq!(wind(&src("WIND CALM")), Some("Wind calm".to_owned()));
        assert_eq!(
            wind(&src("WIND VARIABLE AT 3 KNOTS")),
            Some("Variable wind at 3 knots".to_owned())
        );
        assert_eq!(
            wind(&src("VRB 04KT")),
            Some("Variable wind at 4 knots".to_owned())
        );
        assert_eq!(wind(&src("NO WIND GIVEN")), None);
    }

    #[test]
    fn test_visibility() {
        assert_eq!(visibility(&src("24012KT 9999")), Some("10 km or more".to_owned()));
        assert_eq!(visibility(&src("24012KT 3000 BR")), Some("3000 meters".to_owned()));
        assert_eq!(visibility(&src("VISIBILITY 6000")), Some("6000 meters".to_owned()));
        // QNH is not a visibility
        assert_eq!(visibility(&src("QNH 1013")), None);
        assert_eq!(
            visibility(&src("VISIBILITY 10 KILOMETERS")),
            Some("10 kilometers".to_owned())
        );
        assert_eq!(
            visibility(&src("VISIBILITY 800M")),
            Some("800 meters".to_owned())
        );
    }

    #[test]
    fn test_weather_and_sky() {
        assert_eq!(
            weather(&src("-RA BR, -RA")),
            Some("Light rain, Mist".to_owned())
        );
        assert_eq!(weather(&src("ADVISE ON FIRST CONTACT")), None);

        assert_eq!(
            sky(&src("FEW012 BKN030")),
            Some("Few clouds at 1200 feet, Broken clouds at 3000 feet".to_owned())
        );
        assert_eq!(sky(&src("CAVOK")), Some("Clear".to_owned()));
        assert_eq!(sky(&src("SKY CLEAR")), Some("Clear".to_owned()));
        assert_eq!(
            sky(&src("BROKEN 4000 FEET, OVERCAST 080")),
            Some("Broken clouds at 4000 feet, Overcast at 8000 feet".to_owned())
        );
    }

    #[test]
    fn test_temperatures() {
        let s = src("18/12 Q1013");
        assert_eq!(temperature(&s), Some("18°C (64°F)".to_owned()));
        assert_eq!(dewpoint(&s), Some("12°C (54°F)".to_owned()));

        let s = src("TEMPERATURE MINUS 3, DEWPOINT MINUS 5");
        assert_eq!(temperature(&s), Some("-3°C (27°F)".to_owned()));
        assert_eq!(dewpoint(&s), Some("-5°C (23°F)".to_owned()));
    }

    #[test]
    fn test_altimeter() {
        assert_eq!(
            altimeter(&src("Q1013")),
            Some("1013 hPa (29.91 inHg)".to_owned())
        );
        assert_eq!(
            altimeter(&src("QNH 998")),
            Some("998 hPa (29.47 inHg)".to_owned())
        );
        assert_eq!(
            altimeter(&src("ALTIMETER 29.92")),
            Some("29.92 inHg".to_owned())
        );
        assert_eq!(altimeter(&src("A3001")), Some("30.01 inHg".to_owned()));
        assert_eq!(altimeter(&src("NONE")), None);
    }

    #[test]
    fn test_trend() {
        assert_eq!(
            trend(&src("NOSIG. BECMG NSW NOSIG")),
            Some("No significant change, Becoming, No significant weather".to_owned())
        );
        assert_eq!(trend(&src("NOTHING")), None);
    }
}
