//! Floating flowers and hearts scattered behind the card.

use rand::Rng;

use super::skin::{DecorationBand, Skin};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecorationKind {
    Flower,
    Heart,
}

impl DecorationKind {
    pub fn class_name(self) -> &'static str {
        match self {
            DecorationKind::Flower => "gc-decor gc-flower",
            DecorationKind::Heart => "gc-decor gc-heart",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Decoration {
    pub kind: DecorationKind,
    /// Percent of the page height, `0..100`.
    pub top_pct: f64,
    /// Percent of the page width, `0..100`.
    pub left_pct: f64,
    /// Float animation period in seconds.
    pub duration_s: f64,
}

impl Decoration {
    /// Inline style positioning the element and setting its animation period.
    pub fn style(&self) -> String {
        format!(
            "top:{:.2}%;left:{:.2}%;animation-duration:{:.2}s;",
            self.top_pct, self.left_pct, self.duration_s
        )
    }
}

/// Place `band.count` decorations of one kind, each independently uniform.
pub fn scatter<R: Rng + ?Sized>(
    rng: &mut R,
    kind: DecorationKind,
    band: &DecorationBand,
) -> Vec<Decoration> {
    (0..band.count)
        .map(|_| Decoration {
            kind,
            top_pct: rng.gen_range(0.0..100.0),
            left_pct: rng.gen_range(0.0..100.0),
            duration_s: band.min_duration_s + rng.gen_range(0.0..1.0) * band.spread_s,
        })
        .collect()
}

/// All decorations for one mount: flowers first, then hearts.
pub fn scatter_for_skin<R: Rng + ?Sized>(rng: &mut R, skin: &Skin) -> Vec<Decoration> {
    let mut all = scatter(rng, DecorationKind::Flower, &skin.flowers);
    all.extend(scatter(rng, DecorationKind::Heart, &skin.hearts));
    all
}
