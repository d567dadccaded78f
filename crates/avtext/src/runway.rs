//! Runway selection from surface wind
//!
//! Runway idents carry their magnetic heading in tens of degrees:
//! runway `27L` points roughly 270°. Wind is resolved into
//! components along and across the runway, and the runway with
//! the most headwind and least crosswind is preferred.
//!
//! Headings are taken from the ident alone. True runway headings
//! and magnetic variation are not considered.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::WindDirection;

/// Weight of crosswind against headwind when scoring runways
const CROSSWIND_PENALTY: f64 = 0.5;

/// Which side the crosswind blows from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CrosswindSide {
    /// From the left of the runway heading
    Left,

    /// From the right of the runway heading
    Right,
}

impl fmt::Display for CrosswindSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrosswindSide::Left => f.write_str("left"),
            CrosswindSide::Right => f.write_str("right"),
        }
    }
}

/// Wind resolved along and across a runway
///
/// ```
/// use avtext::{wind_components, CrosswindSide};
///
/// let wind = wind_components(300.0, 20.0, 270.0);
/// assert_eq!(wind.headwind_kt(), 17);
/// assert_eq!(wind.crosswind_kt(), 10);
/// assert_eq!(wind.crosswind_side(), CrosswindSide::Right);
/// assert_eq!(wind.to_string(), "Headwind 17 kt\nCrosswind 10 kt (from right)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindComponents {
    headwind: f64,
    crosswind: f64,
}

impl WindComponents {
    /// Component along the runway, in the wind's speed unit
    ///
    /// Negative values are a tailwind.
    pub fn headwind(&self) -> f64 {
        self.headwind
    }

    /// Component across the runway
    ///
    /// Positive values blow from the right.
    pub fn crosswind(&self) -> f64 {
        self.crosswind
    }

    /// Headwind, rounded; negative for a tailwind
    pub fn headwind_kt(&self) -> i32 {
        self.headwind.round() as i32
    }

    /// Crosswind magnitude, rounded
    pub fn crosswind_kt(&self) -> i32 {
        self.crosswind.round().abs() as i32
    }

    /// True if the wind is from behind
    pub fn is_tailwind(&self) -> bool {
        self.headwind_kt() < 0
    }

    /// Side the crosswind blows from
    pub fn crosswind_side(&self) -> CrosswindSide {
        if self.crosswind.round() >= 0.0 {
            CrosswindSide::Right
        } else {
            CrosswindSide::Left
        }
    }
}

impl fmt::Display for WindComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_tailwind() {
            writeln!(f, "Tailwind {} kt", -self.headwind_kt())?;
        } else {
            writeln!(f, "Headwind {} kt", self.headwind_kt())?;
        }
        write!(
            f,
            "Crosswind {} kt (from {})",
            self.crosswind_kt(),
            self.crosswind_side()
        )
    }
}

/// Resolve a wind into runway components
///
/// All angles are in degrees.
pub fn wind_components(wind_dir: f64, speed: f64, runway_heading: f64) -> WindComponents {
    let angle = (wind_dir - runway_heading).to_radians();
    WindComponents {
        headwind: speed * angle.cos(),
        crosswind: speed * angle.sin(),
    }
}

/// Heading of a runway from its ident
///
/// Accepts `27L`, `RW27L`, and `RWY 27L`. Returns `None` if
/// the ident has no valid runway number.
///
/// ```
/// assert_eq!(avtext::runway_heading("27L"), Some(270));
/// assert_eq!(avtext::runway_heading("RW09"), Some(90));
/// assert_eq!(avtext::runway_heading("37"), None);
/// ```
pub fn runway_heading(ident: &str) -> Option<u16> {
    lazy_static! {
        static ref RE: Regex =
            Regex::new(r"^(?:RWY?\s*)?(\d{2})[LRC]?$").expect("bad runway regexp");
    }

    let caps = RE.captures(ident.trim())?;
    let number: u16 = caps[1].parse().ok()?;
    if (1..=36).contains(&number) {
        Some(number * 10)
    } else {
        None
    }
}

/// Pick the runway with the best wind
///
/// Each runway scores its headwind less half its crosswind.
/// Ties go to the first runway listed. Runways without a valid
/// ident are skipped.
///
/// ```
/// let runways = ["09L", "27R", "05"];
/// assert_eq!(avtext::best_runway(&runways, 260, 15), Some("27R"));
/// assert_eq!(avtext::best_runway(&runways, 60, 15), Some("05"));
/// ```
pub fn best_runway<S>(runways: &[S], wind_dir: u16, speed: u16) -> Option<&str>
where
    S: AsRef<str>,
{
    let mut best: Option<(&str, f64)> = None;
    for ident in runways {
        let ident = ident.as_ref();
        let heading = match runway_heading(ident) {
            Some(heading) => heading,
            None => {
                log::debug!("skipping runway \"{}\": no heading", ident);
                continue;
            }
        };

        let diff = f64::from(angle_between(wind_dir, heading)).to_radians();
        let speed = f64::from(speed);
        let score = speed * diff.cos() - CROSSWIND_PENALTY * (speed * diff.sin()).abs();
        log::trace!("runway {}: score {:.1}", ident, score);

        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((ident, score));
        }
    }
    best.map(|(ident, _)| ident)
}

/// Runways most closely aligned with the wind
///
/// Every runway with the smallest angle to the wind is
/// returned. A calm or variable wind favors no runway, so all
/// runways are returned, as they are when no ident is valid.
///
/// ```
/// use avtext::{likely_runways, WindDirection};
///
/// let runways = ["09L", "09R", "27L", "27R"];
/// assert_eq!(likely_runways(&runways, WindDirection::Degrees(250)), ["27L", "27R"]);
/// assert_eq!(likely_runways(&runways, WindDirection::Variable).len(), 4);
/// ```
pub fn likely_runways<S>(runways: &[S], wind: WindDirection) -> Vec<&str>
where
    S: AsRef<str>,
{
    let all = || runways.iter().map(|r| r.as_ref()).collect::<Vec<&str>>();

    let wind_dir = match wind {
        WindDirection::Degrees(dir) if dir != 0 => dir,
        _ => return all(),
    };

    let mut best = u16::MAX;
    let mut out = vec![];
    for ident in runways {
        let ident = ident.as_ref();
        if let Some(heading) = runway_heading(ident) {
            let diff = angle_between(wind_dir, heading);
            if diff < best {
                best = diff;
                out.clear();
            }
            if diff == best {
                out.push(ident);
            }
        }
    }

    if out.is_empty() {
        all()
    } else {
        out
    }
}

/// Smallest angle between two headings, 0 to 180
fn angle_between(a: u16, b: u16) -> u16 {
    let diff = (i32::from(a) - i32::from(b)).rem_euclid(360) as u16;
    if diff > 180 {
        360 - diff
    } else {
        diff
    }
}
