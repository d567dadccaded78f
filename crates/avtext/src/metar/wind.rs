//! Surface wind groups

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::units::SpeedUnit;

/// Where the wind is blowing from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WindDirection {
    /// True direction, in degrees
    Degrees(u16),

    /// Variable direction (`VRB`)
    Variable,
}

/// Decoded surface wind
///
/// Wind groups look like `36015G25KT`: a three-digit direction,
/// two- or three-digit speed, optional gust, and a
/// [unit](SpeedUnit) suffix. Directions are given in degrees
/// true.
///
/// ```
/// use avtext::{SpeedUnit, Wind, WindDirection};
///
/// let wind = Wind::parse("36015G25KT").unwrap();
/// assert_eq!(wind.direction(), WindDirection::Degrees(360));
/// assert_eq!(wind.speed(), 15);
/// assert_eq!(wind.gust(), Some(25));
/// assert_eq!(wind.unit(), SpeedUnit::Knots);
/// assert_eq!(
///     wind.to_string(),
///     "Wind from 360° at 15 knots, gusting to 25 knots"
/// );
///
/// let vrb = Wind::parse("VRB03KT").unwrap();
/// assert_eq!(vrb.to_string(), "Variable wind at 3 knots");
///
/// assert_eq!(Wind::parse("00000KT").unwrap().to_string(), "Wind calm");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Wind {
    direction: WindDirection,
    speed: u16,
    gust: Option<u16>,
    unit: SpeedUnit,
    varying: Option<(u16, u16)>,
}

impl Wind {
    /// Construct from decoded parts
    pub fn new(direction: WindDirection, speed: u16, gust: Option<u16>, unit: SpeedUnit) -> Self {
        Self {
            direction,
            speed,
            gust,
            unit,
            varying: None,
        }
    }

    /// Parse a complete wind group, like `24012KT` or `VRB03KT`
    pub fn parse(token: &str) -> Option<Self> {
        lazy_static! {
            static ref RE: Regex =
                Regex::new(r"^(\d{3}|VRB)(\d{2,3})(?:G(\d{2,3}))?(KT|MPS|KMH)$")
                    .expect("bad wind regexp");
        }

        let caps = RE.captures(token)?;
        let direction = match &caps[1] {
            "VRB" => WindDirection::Variable,
            dir => WindDirection::Degrees(parse_direction(dir)?),
        };
        Some(Self::new(
            direction,
            caps[2].parse().ok()?,
            caps.get(3).and_then(|g| g.as_str().parse().ok()),
            SpeedUnit::from(&caps[4])?,
        ))
    }

    /// Parse the speed half of a split variable wind, like `05KT`
    ///
    /// Some reports give `VRB` as its own token. The following
    /// token carries only the speed, gust, and unit.
    pub fn parse_variable_speed(token: &str) -> Option<Self> {
        lazy_static! {
            static ref RE: Regex =
                Regex::new(r"^(\d{2,3})(?:G(\d{2,3}))?(KT|MPS|KMH)$").expect("bad wind regexp");
        }

        let caps = RE.captures(token)?;
        Some(Self::new(
            WindDirection::Variable,
            caps[1].parse().ok()?,
            caps.get(2).and_then(|g| g.as_str().parse().ok()),
            SpeedUnit::from(&caps[3])?,
        ))
    }

    /// Parse a variable-direction qualifier, like `320V030`
    pub fn parse_variation(token: &str) -> Option<(u16, u16)> {
        lazy_static! {
            static ref RE: Regex = Regex::new(r"^(\d{3})V(\d{3})$").expect("bad wind regexp");
        }

        let caps = RE.captures(token)?;
        Some((parse_direction(&caps[1])?, parse_direction(&caps[2])?))
    }

    /// Attach a variable-direction range
    pub fn with_variation(mut self, varying: (u16, u16)) -> Self {
        self.varying = Some(varying);
        self
    }

    /// Wind direction
    pub fn direction(&self) -> WindDirection {
        self.direction
    }

    /// Wind direction in degrees, if not variable
    pub fn direction_degrees(&self) -> Option<u16> {
        match self.direction {
            WindDirection::Degrees(deg) => Some(deg),
            WindDirection::Variable => None,
        }
    }

    /// Sustained speed, in [`unit()`](Wind::unit)
    pub fn speed(&self) -> u16 {
        self.speed
    }

    /// Gust speed, in [`unit()`](Wind::unit)
    pub fn gust(&self) -> Option<u16> {
        self.gust
    }

    /// Unit of speed
    pub fn unit(&self) -> SpeedUnit {
        self.unit
    }

    /// Range of direction variation, `(from, to)` in degrees
    pub fn varying(&self) -> Option<(u16, u16)> {
        self.varying
    }

    /// True if the wind is calm
    pub fn is_calm(&self) -> bool {
        self.speed == 0 && self.gust.is_none()
    }
}

impl fmt::Display for Wind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_calm() {
            return write!(f, "Wind calm");
        }

        match self.direction {
            WindDirection::Degrees(deg) => write!(
                f,
                "Wind from {:03}° at {} {}",
                deg, self.speed, self.unit
            )?,
            WindDirection::Variable => {
                write!(f, "Variable wind at {} {}", self.speed, self.unit)?
            }
        }

        if let Some(gust) = self.gust {
            write!(f, ", gusting to {} {}", gust, self.unit)?;
        }

        if let Some((from, to)) = self.varying {
            write!(f, " (varying between {:03}° and {:03}°)", from, to)?;
        }

        Ok(())
    }
}

fn parse_direction(dir: &str) -> Option<u16> {
    let deg: u16 = dir.parse().ok()?;
    if deg <= 360 {
        Some(deg)
    } else {
        None
    }
}
