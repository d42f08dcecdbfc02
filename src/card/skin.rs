//! Presentation skins. Both built-ins drive the same behaviour; they only
//! differ in text, sizing, palette and decoration density.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::session_gate::ENTRY_ANIMATION_MS;

const SCROLL_MESSAGE: &str = "Espero que estés mejorando y sanando poco a poco. Sé que el proceso no siempre es fácil, pero quiero recordarte lo increíble que eres y lo mucho que vales. Hay personas en este mundo que te aprecian más de lo que imaginas (y sí, me incluyo entre ellas).

Hice esto en mis tiempos libres con la esperanza de sacarte una sonrisa. Si lo logré, entonces valió la pena. Y si no, bueno… al menos lo intenté.

Sigue brillando a tu manera, que el mundo es un lugar mejor con alguien como tú en él.";

const LETTER_MESSAGE: &str = "Solo quería dejarte esta cartita para recordarte que no estás sola.

Cada día es un paso más, y cada paso cuenta. Tómate tu tiempo, descansa cuando lo necesites y no olvides sonreír de vez en cuando.

Con mucho cariño.";

/// Count and animation period band for one decoration category.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecorationBand {
    pub count: u32,
    pub min_duration_s: f64,
    /// Durations are drawn from `min_duration_s .. min_duration_s + spread_s`.
    pub spread_s: f64,
}

/// A band as written in a config; absent fields keep the base band's value.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct BandOverrides {
    count: Option<u32>,
    min_duration_s: Option<f64>,
    spread_s: Option<f64>,
}

#[cfg(feature = "serde")]
impl BandOverrides {
    fn over(self, base: DecorationBand) -> DecorationBand {
        DecorationBand {
            count: self.count.unwrap_or(base.count),
            min_duration_s: self.min_duration_s.unwrap_or(base.min_duration_s),
            spread_s: self.spread_s.unwrap_or(base.spread_s),
        }
    }
}

#[cfg(feature = "serde")]
fn flowers_over_scroll<'de, D>(deserializer: D) -> Result<DecorationBand, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(BandOverrides::deserialize(deserializer)?.over(Skin::scroll().flowers))
}

#[cfg(feature = "serde")]
fn hearts_over_scroll<'de, D>(deserializer: D) -> Result<DecorationBand, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(BandOverrides::deserialize(deserializer)?.over(Skin::scroll().hearts))
}

/// CSS colour values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Palette {
    pub page_top: String,
    pub page_bottom: String,
    pub card: String,
    pub card_border: String,
    pub lid: String,
    pub flower: String,
    pub heart: String,
    pub parchment: String,
    pub parchment_shade: String,
    pub ink: String,
    pub accent: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            page_top: "rgba(255, 182, 193, 0.8)".into(),
            page_bottom: "rgba(255, 105, 180, 0.8)".into(),
            card: "#fce7f3".into(),
            card_border: "rgba(255, 182, 193, 0.5)".into(),
            lid: "rgba(255, 192, 203, 0.9)".into(),
            flower: "#fbcfe8".into(),
            heart: "#ef4444".into(),
            parchment: "#f4e4bc".into(),
            parchment_shade: "#d4b483".into(),
            ink: "#4a2810".into(),
            accent: "#ec4899".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Skin {
    pub name: String,
    /// Bubble shown beside the card while it is ajar.
    pub hint: String,
    pub message: String,
    /// CSS `max-width` of the message panel.
    pub panel_max_width: String,
    /// Resting tilt of the closed card, degrees.
    pub card_tilt_deg: f32,
    pub entry_animation_ms: u32,
    pub palette: Palette,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "flowers_over_scroll"))]
    pub flowers: DecorationBand,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "hearts_over_scroll"))]
    pub hearts: DecorationBand,
}

impl Default for Skin {
    fn default() -> Self {
        Self::scroll()
    }
}

impl Skin {
    /// Parchment scroll with a dense field of flowers and hearts.
    pub fn scroll() -> Self {
        Self {
            name: "scroll".into(),
            hint: "¡Ábreme!".into(),
            message: SCROLL_MESSAGE.into(),
            panel_max_width: "32rem".into(),
            card_tilt_deg: 2.0,
            entry_animation_ms: ENTRY_ANIMATION_MS,
            palette: Palette::default(),
            flowers: DecorationBand {
                count: 10,
                min_duration_s: 6.0,
                spread_s: 4.0,
            },
            hearts: DecorationBand {
                count: 10,
                min_duration_s: 5.0,
                spread_s: 4.0,
            },
        }
    }

    /// Wider letter panel, calmer background.
    pub fn letter() -> Self {
        Self {
            name: "letter".into(),
            hint: "¡Ábreme!".into(),
            message: LETTER_MESSAGE.into(),
            panel_max_width: "42rem".into(),
            card_tilt_deg: -2.0,
            entry_animation_ms: ENTRY_ANIMATION_MS,
            palette: Palette {
                page_top: "rgba(221, 214, 254, 0.85)".into(),
                page_bottom: "rgba(244, 114, 182, 0.8)".into(),
                card: "#fdf2f8".into(),
                lid: "rgba(251, 207, 232, 0.95)".into(),
                flower: "#e9d5ff".into(),
                accent: "#a855f7".into(),
                ..Palette::default()
            },
            flowers: DecorationBand {
                count: 6,
                min_duration_s: 8.0,
                spread_s: 4.0,
            },
            hearts: DecorationBand {
                count: 8,
                min_duration_s: 7.0,
                spread_s: 3.0,
            },
        }
    }

    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "scroll" => Some(Self::scroll()),
            "letter" => Some(Self::letter()),
            _ => None,
        }
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_share_behavioural_defaults() {
        let scroll = Skin::builtin("scroll").unwrap();
        let letter = Skin::builtin("letter").unwrap();
        assert_eq!(scroll.entry_animation_ms, ENTRY_ANIMATION_MS);
        assert_eq!(letter.entry_animation_ms, ENTRY_ANIMATION_MS);
        assert_ne!(scroll.panel_max_width, letter.panel_max_width);
        assert_ne!(scroll.message, letter.message);
    }

    #[test]
    fn test_unknown_builtin() {
        assert!(Skin::builtin("postcard").is_none());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_partial_json_falls_back_to_scroll() {
        let scroll = Skin::scroll();
        let skin = Skin::from_json(r#"{"name":"mine","hearts":{"count":3}}"#).unwrap();
        assert_eq!(skin.name, "mine");
        assert_eq!(skin.hearts.count, 3);
        assert_eq!(skin.hearts.min_duration_s, scroll.hearts.min_duration_s);
        assert_eq!(skin.hearts.spread_s, scroll.hearts.spread_s);
        assert_eq!(skin.flowers, scroll.flowers);
        assert_eq!(skin.message, scroll.message);
        assert_eq!(skin.palette, scroll.palette);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_partial_band_keeps_its_own_category_defaults() {
        let scroll = Skin::scroll();
        let json = r#"{"flowers":{"spread_s":1.5},"hearts":{"spread_s":1.5}}"#;
        let skin = Skin::from_json(json).unwrap();
        assert_eq!(skin.flowers.min_duration_s, scroll.flowers.min_duration_s);
        assert_eq!(skin.hearts.min_duration_s, scroll.hearts.min_duration_s);
        assert_ne!(skin.flowers.min_duration_s, skin.hearts.min_duration_s);
        assert_eq!(skin.hearts.spread_s, 1.5);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Skin::from_json("{\"flowers\": 3}").is_err());
    }
}
