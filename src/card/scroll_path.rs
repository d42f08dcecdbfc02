//! Deckle-edge outline for the message parchment, emitted as a CSS
//! `polygon(...)` clip path in percent units.

use std::fmt;

/// Vertical inset of the top and bottom edges.
const EDGE_INSET: f64 = 10.0;
/// Step between points along every edge.
const STEP: u32 = 10;
/// Peak offset of the wave, in percent.
const AMPLITUDE: f64 = 2.0;
/// Phase scaling for the vertical edges (smaller frequency than top/bottom).
const SIDE_PHASE: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipPoint {
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for ClipPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% {}%", pct(self.x), pct(self.y))
    }
}

/// Round to three decimals and normalise `-0`.
fn pct(v: f64) -> f64 {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 { 0.0 } else { r }
}

fn top_bottom_wave(i: u32) -> f64 {
    (i as f64).sin() * AMPLITUDE
}

fn side_wave(i: u32) -> f64 {
    (i as f64 * SIDE_PHASE).sin() * AMPLITUDE
}

/// Points of the wavy rectangle, clockwise from the top-left corner.
/// The ring closes implicitly from the last point back to the first.
pub fn scroll_outline() -> Vec<ClipPoint> {
    let columns = 100 / STEP;
    let mut points = Vec::with_capacity(2 * (columns as usize + 1) + 2 * 9 + 1);
    points.push(ClipPoint { x: 0.0, y: EDGE_INSET });

    // top edge, left to right
    for i in 0..=columns {
        points.push(ClipPoint {
            x: (i * STEP) as f64,
            y: EDGE_INSET + top_bottom_wave(i),
        });
    }
    // right edge, top to bottom
    for y in (STEP..=100 - STEP).step_by(STEP as usize) {
        points.push(ClipPoint {
            x: 100.0 + side_wave(y),
            y: y as f64,
        });
    }
    // bottom edge, right to left
    for i in (0..=columns).rev() {
        points.push(ClipPoint {
            x: (i * STEP) as f64,
            y: 100.0 - EDGE_INSET + top_bottom_wave(i),
        });
    }
    // left edge, bottom to top
    for y in (STEP..=100 - STEP).rev().step_by(STEP as usize) {
        points.push(ClipPoint {
            x: side_wave(y),
            y: y as f64,
        });
    }
    points
}

/// `polygon(x% y%, ...)` ready for a `clip-path` declaration.
pub fn scroll_clip_path() -> String {
    let pairs: Vec<String> = scroll_outline().iter().map(|p| p.to_string()).collect();
    format!("polygon({})", pairs.join(", "))
}
