//! Cloud groups and sky condition

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use strum::EnumMessage;

/// Cloud amount
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
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
pub enum CloudCover {
    /// 1–2 oktas
    #[strum(serialize = "FEW", detailed_message = "Few clouds")]
    Few,

    /// 3–4 oktas
    #[strum(serialize = "SCT", detailed_message = "Scattered clouds")]
    Scattered,

    /// 5–7 oktas
    #[strum(serialize = "BKN", detailed_message = "Broken clouds")]
    Broken,

    /// 8 oktas
    #[strum(serialize = "OVC", detailed_message = "Overcast")]
    Overcast,

    /// Sky obscured; height is the vertical visibility
    #[strum(serialize = "VV", detailed_message = "Vertical visibility")]
    VerticalVisibility,
}

impl CloudCover {
    /// Parse from a METAR cover code, like "`BKN`"
    pub fn from<S>(code: S) -> Option<Self>
    where
        S: AsRef<str>,
    {
        str::parse(code.as_ref()).ok()
    }

    /// Human-readable string, like "`Broken clouds`"
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// METAR code, like "`BKN`"
    pub fn as_code_str(&self) -> &'static str {
        self.get_serializations()[0]
    }

    /// True if this layer constitutes a ceiling
    pub fn is_ceiling(&self) -> bool {
        *self >= CloudCover::Broken
    }
}

impl fmt::Display for CloudCover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.as_code_str().fmt(f)
        } else {
            self.as_display_str().fmt(f)
        }
    }
}

/// A single cloud layer, like `BKN030CB`
///
/// ```
/// use avtext::{CloudCover, CloudLayer};
///
/// let layer = CloudLayer::parse("FEW250").unwrap();
/// assert_eq!(layer.cover(), CloudCover::Few);
/// assert_eq!(layer.height_ft(), 25000);
/// assert_eq!(layer.to_string(), "Few clouds at 25000 feet");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CloudLayer {
    cover: CloudCover,
    height_ft: u32,
    convective: Option<Convective>,
}

/// Significant convective cloud type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Convective {
    /// `CB`
    Cumulonimbus,

    /// `TCU`
    ToweringCumulus,
}

impl CloudLayer {
    /// Construct a layer
    pub fn new(cover: CloudCover, height_ft: u32) -> Self {
        Self {
            cover,
            height_ft,
            convective: None,
        }
    }

    /// Parse a cloud group like `SCT040` or `BKN030CB`
    ///
    /// Automated stations report an unknown cloud type as `///`,
    /// like `BKN030///`.
    pub fn parse(token: &str) -> Option<Self> {
        lazy_static! {
            static ref RE: Regex = Regex::new(r"^(FEW|SCT|BKN|OVC|VV)(\d{3})(CB|TCU|///)?$")
                .expect("bad cloud regexp");
        }

        let caps = RE.captures(token)?;
        let hundreds: u32 = caps[2].parse().ok()?;
        Some(Self {
            cover: CloudCover::from(&caps[1])?,
            height_ft: hundreds * 100,
            convective: caps.get(3).and_then(|c| match c.as_str() {
                "CB" => Some(Convective::Cumulonimbus),
                "TCU" => Some(Convective::ToweringCumulus),
                _ => None,
            }),
        })
    }

    /// Amount of cloud
    pub fn cover(&self) -> CloudCover {
        self.cover
    }

    /// Height of the base above the aerodrome, in feet
    pub fn height_ft(&self) -> u32 {
        self.height_ft
    }

    /// Convective cloud type, if reported
    pub fn convective(&self) -> Option<Convective> {
        self.convective
    }
}

impl fmt::Display for CloudLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {} feet", self.cover, self.height_ft)?;
        match self.convective {
            Some(Convective::Cumulonimbus) => write!(f, " (cumulonimbus)"),
            Some(Convective::ToweringCumulus) => write!(f, " (towering cumulus)"),
            None => Ok(()),
        }
    }
}

/// Overall sky condition
///
/// Any "clear" code (`CLR`, `SKC`, `NSC`, `NCD`, `CAVOK`) in the
/// group sequence short-circuits to [`SkyCondition::Clear`].
///
/// ```
/// use avtext::SkyCondition;
///
/// let sky = SkyCondition::from_tokens(["FEW020", "BKN035"]).unwrap();
/// assert_eq!(sky.to_string(), "Few clouds at 2000 feet, Broken clouds at 3500 feet");
///
/// let sky = SkyCondition::from_tokens(["NSC"]).unwrap();
/// assert_eq!(sky, SkyCondition::Clear);
/// assert_eq!(sky.to_string(), "Clear");
///
/// assert!(SkyCondition::from_tokens(["RMK"]).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SkyCondition {
    /// No cloud reported
    Clear,

    /// One or more cloud layers, lowest first
    Layers(Vec<CloudLayer>),
}

impl SkyCondition {
    /// True if `token` is a sky-clear code
    pub fn is_clear_code(token: &str) -> bool {
        matches!(token, "CLR" | "SKC" | "NSC" | "NCD" | "CAVOK")
    }

    /// True if `token` is a cloud group or sky-clear code
    pub fn is_sky_token(token: &str) -> bool {
        Self::is_clear_code(token) || CloudLayer::parse(token).is_some()
    }

    /// Build from cloud group tokens
    ///
    /// Tokens which are not cloud groups are ignored. Returns
    /// `None` if no token describes the sky.
    pub fn from_tokens<I, S>(tokens: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut layers = Vec::new();
        let mut clear = false;
        for tok in tokens {
            let tok = tok.as_ref();
            if Self::is_clear_code(tok) {
                clear = true;
            } else if let Some(layer) = CloudLayer::parse(tok) {
                layers.push(layer);
            }
        }

        if clear {
            Some(SkyCondition::Clear)
        } else if layers.is_empty() {
            None
        } else {
            Some(SkyCondition::Layers(layers))
        }
    }

    /// Lowest broken or overcast layer, in feet
    pub fn ceiling_ft(&self) -> Option<u32> {
        match self {
            SkyCondition::Clear => None,
            SkyCondition::Layers(layers) => layers
                .iter()
                .filter(|l| l.cover().is_ceiling())
                .map(CloudLayer::height_ft)
                .min(),
        }
    }
}

impl fmt::Display for SkyCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkyCondition::Clear => write!(f, "Clear"),
            SkyCondition::Layers(layers) => {
                let parts: Vec<String> = layers.iter().map(|l| l.to_string()).collect();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_layer() {
        let layer = CloudLayer::parse("BKN030CB").unwrap();
        assert_eq!(layer.cover(), CloudCover::Broken);
        assert_eq!(layer.height_ft(), 3000);
        assert_eq!(layer.convective(), Some(Convective::Cumulonimbus));
        assert_eq!(layer.to_string(), "Broken clouds at 3000 feet (cumulonimbus)");

        let layer = CloudLayer::parse("VV002").unwrap();
        assert_eq!(layer.to_string(), "Vertical visibility at 200 feet");

        let layer = CloudLayer::parse("OVC010///").unwrap();
        assert_eq!(layer.cover(), CloudCover::Overcast);
        assert_eq!(layer.height_ft(), 1000);
        assert_eq!(layer.convective(), None);
        assert!(SkyCondition::is_sky_token("BKN030///"));

        assert!(CloudLayer::parse("BKN030//").is_none());
        assert!(CloudLayer::parse("BKN30").is_none());
        assert!(CloudLayer::parse("XYZ030").is_none());
    }

    #[test]
    fn test_sky_condition() {
        let sky = SkyCondition::from_tokens(["SCT012", "BKN008", "OVC040"]).unwrap();
        assert_eq!(sky.ceiling_ft(), Some(800));

        let sky = SkyCondition::from_tokens(["FEW010", "CLR"]).unwrap();
        assert_eq!(sky, SkyCondition::Clear);
        assert_eq!(sky.ceiling_ft(), None);

        assert!(SkyCondition::is_sky_token("CAVOK"));
        assert!(!SkyCondition::is_sky_token("9999"));
    }
}
