//! Stylesheet generation and the view -> class name mapping.

use super::mount::CardView;
use super::skin::Skin;

/// Id of the `<style>` element injected once per document.
pub const STYLE_ELEMENT_ID: &str = "gc-styles";

const HEART_PATH: &str = "M12 21.35l-1.45-1.32C5.4 15.36 2 12.28 2 8.5 2 5.42 4.42 3 7.5 3c1.74 0 3.41.81 4.5 2.09C13.09 3.81 14.76 3 16.5 3 19.58 3 22 5.42 22 8.5c0 3.78-3.4 6.86-8.55 11.54L12 21.35z";

pub fn card_class(view: &CardView) -> &'static str {
    if view.entry_animation { "gc-card gc-card-entry" } else { "gc-card" }
}

pub fn hint_class(view: &CardView) -> &'static str {
    if view.hint_visible { "gc-hint gc-visible" } else { "gc-hint" }
}

pub fn lid_class(view: &CardView) -> &'static str {
    if view.card_ajar { "gc-lid gc-lid-open" } else { "gc-lid" }
}

pub fn backdrop_class(view: &CardView) -> &'static str {
    if view.modal_visible { "gc-backdrop" } else { "gc-backdrop gc-hidden" }
}

/// Full stylesheet for one skin: keyframes plus every `gc-*` class.
pub fn stylesheet(skin: &Skin) -> String {
    let p = &skin.palette;
    let entry_s = skin.entry_animation_ms as f64 / 1000.0;
    format!(
        r#"
@keyframes gc-float {{ 0%, 100% {{ transform: translateY(0) rotate({tilt}deg); }} 50% {{ transform: translateY(-12px) rotate({tilt}deg); }} }}
@keyframes gc-drift {{ 0%, 100% {{ transform: translateY(0); }} 50% {{ transform: translateY(-20px); }} }}
@keyframes gc-card-entry {{ 0% {{ opacity: 0; transform: translateY(120px) scale(0.6) rotate(-12deg); }} 70% {{ opacity: 1; transform: translateY(-10px) scale(1.05) rotate({tilt}deg); }} 100% {{ transform: translateY(0) scale(1) rotate({tilt}deg); }} }}
@keyframes gc-sway {{ 0%, 100% {{ transform: rotate(-1deg); }} 50% {{ transform: rotate(1deg); }} }}
@keyframes gc-pulse {{ 0%, 100% {{ transform: translate(-50%, -50%) scale(1); }} 50% {{ transform: translate(-50%, -50%) scale(1.15); }} }}
.gc-page {{ position: relative; min-height: 100vh; display: flex; align-items: center; justify-content: center; overflow: hidden; background-image: linear-gradient(to bottom, {page_top}, {page_bottom}); }}
.gc-decor-layer {{ position: absolute; inset: 0; overflow: hidden; pointer-events: none; }}
.gc-decor {{ position: absolute; animation-name: gc-drift; animation-timing-function: ease-in-out; animation-iteration-count: infinite; }}
.gc-flower {{ width: 3rem; height: 3rem; background: {flower}; border-radius: 50% 0 50% 0; }}
.gc-heart {{ width: 2rem; height: 2rem; background: {heart}; clip-path: path("{heart_path}"); }}
.gc-card {{ position: relative; width: 24rem; height: 16rem; padding: 2rem; display: flex; align-items: center; justify-content: center; background: {card}; border: 2px solid {card_border}; border-radius: 0.5rem; box-shadow: 0 25px 50px -12px rgba(0,0,0,0.25); cursor: pointer; perspective: 800px; animation: gc-float 4s ease-in-out infinite; }}
.gc-card:hover {{ animation-play-state: paused; }}
.gc-card.gc-card-entry {{ animation: gc-card-entry {entry_s}s ease-out both; }}
.gc-card-border {{ position: absolute; inset: 0.5rem; border: 2px solid {flower}; border-radius: 0.5rem; opacity: 0.5; }}
.gc-hint {{ position: absolute; right: -6rem; top: 50%; transform: translateY(-50%); background: #fff; padding: 0.5rem 1rem; border-radius: 9999px; box-shadow: 0 10px 15px rgba(0,0,0,0.1); opacity: 0; transition: opacity 300ms; }}
.gc-hint.gc-visible {{ opacity: 1; }}
.gc-hint p {{ margin: 0; color: {accent}; font-weight: 600; }}
.gc-hint-arrow {{ position: absolute; left: -0.5rem; top: 50%; width: 1rem; height: 1rem; background: #fff; transform: translateY(-50%) rotate(45deg); }}
.gc-lid {{ position: absolute; top: 0; left: 0; width: 100%; height: 6rem; z-index: 10; background: {lid}; clip-path: polygon(0 0, 50% 100%, 100% 0); transform-origin: top; transform: rotateX(0); transition: transform 500ms; }}
.gc-lid.gc-lid-open {{ transform: rotateX(180deg); }}
.gc-lid-heart {{ position: absolute; top: 75%; left: 50%; width: 1.5rem; height: 1.5rem; background: {heart}; clip-path: path("{heart_path}"); animation: gc-pulse 1.5s infinite; }}
.gc-backdrop {{ position: fixed; inset: 0; z-index: 50; display: flex; align-items: center; justify-content: center; padding: 1rem; background: rgba(0,0,0,0.3); backdrop-filter: blur(4px); }}
.gc-hidden {{ display: none; }}
.gc-panel {{ position: relative; width: 100%; max-width: {panel_max}; margin: 0 auto; cursor: default; animation: gc-sway 6s ease-in-out infinite; }}
.gc-close {{ position: absolute; top: -1rem; right: -1rem; z-index: 10; width: 2rem; height: 2rem; border: none; border-radius: 9999px; background: {heart}; color: #fff; font-size: 1.25rem; cursor: pointer; box-shadow: 0 10px 15px rgba(0,0,0,0.2); }}
.gc-parchment {{ width: 100%; overflow: hidden; background-color: {parchment}; background-image: radial-gradient(circle at top left, {shade} 0%, transparent 20%), radial-gradient(circle at top right, {shade} 0%, transparent 20%), radial-gradient(circle at bottom left, {shade} 0%, transparent 20%), radial-gradient(circle at bottom right, {shade} 0%, transparent 20%); box-shadow: 0 0 0 2px {parchment}, 0 10px 25px rgba(0,0,0,0.3), inset 0 0 60px rgba(139,69,19,0.3); }}
.gc-parchment-body {{ position: relative; padding: 3rem; max-height: 80vh; overflow-y: auto; background: repeating-linear-gradient(to right, transparent, transparent 50px, rgba(139,69,19,0.03) 50px, rgba(139,69,19,0.03) 51px); }}
.gc-message {{ position: relative; z-index: 10; margin: 0; color: {ink}; font-family: 'Noto Serif', serif; font-size: 1.25rem; line-height: 1.75; text-align: center; white-space: pre-wrap; text-shadow: 1px 1px 2px rgba(139,69,19,0.1); }}
"#,
        tilt = skin.card_tilt_deg,
        entry_s = entry_s,
        page_top = p.page_top,
        page_bottom = p.page_bottom,
        flower = p.flower,
        heart = p.heart,
        heart_path = HEART_PATH,
        card = p.card,
        card_border = p.card_border,
        accent = p.accent,
        lid = p.lid,
        panel_max = skin.panel_max_width,
        parchment = p.parchment,
        shade = p.parchment_shade,
        ink = p.ink,
    )
}
