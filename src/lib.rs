//! Greeting card core crate.
//!
//! A closed card that lifts its lid on hover and opens into a parchment
//! message on click. Browser entry points live here; everything they drive is
//! in [`card`] and can be exercised natively.

use std::cell::RefCell;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{Element, window};

pub mod card;

use card::dom::CardDom;
use card::{BrowserHost, BrowserSessionStore, MountedCard, Skin};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Ignore if a logger was already installed by the host page.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// A card living in the page. Field order is teardown order: the mount
/// releases its timer and key listener before the DOM goes away.
struct BrowserCard {
    mount: MountedCard<BrowserHost>,
    #[allow(dead_code)] // owned for teardown only
    dom: CardDom,
}

thread_local! {
    static CARD: RefCell<Option<BrowserCard>> = const { RefCell::new(None) };
}

fn container(id: Option<String>) -> Result<Element, JsValue> {
    let doc = window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    match id {
        Some(id) => doc
            .get_element_by_id(&id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", id))),
        None => doc
            .body()
            .map(Element::from)
            .ok_or_else(|| JsValue::from_str("no body")),
    }
}

fn mount_with_skin(container_id: Option<String>, skin: Skin) -> Result<(), JsValue> {
    // Remounting tears the previous card down first.
    unmount_card();

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let parent = container(container_id)?;

    let mut rng = SmallRng::from_entropy();
    let decorations = card::decorations::scatter_for_skin(&mut rng, &skin);
    let mut dom = CardDom::build(&doc, &parent, &skin, &decorations)?;

    let store = BrowserSessionStore::new(&win);
    let mount = MountedCard::mount(
        BrowserHost::new(win),
        &store,
        skin.entry_animation_ms,
    );
    let controller = mount.controller();
    controller.subscribe(dom.renderer());
    dom.bind(&controller)?;
    dom.render(&controller.view());

    log::info!("mounted '{}' card with {} decorations", skin.name, decorations.len());
    CARD.with(|c| c.replace(Some(BrowserCard { mount, dom })));
    Ok(())
}

/// Mount the card into the element with `container_id` (or `<body>`), using a
/// built-in skin: `"scroll"` (default) or `"letter"`.
#[wasm_bindgen]
pub fn mount_card(
    container_id: Option<String>,
    skin: Option<String>,
) -> Result<(), JsValue> {
    let skin = match skin.as_deref() {
        None => Skin::scroll(),
        Some(name) => Skin::builtin(name)
            .ok_or_else(|| JsValue::from_str(&format!("unknown skin '{}'", name)))?,
    };
    mount_with_skin(container_id, skin)
}

/// Mount the card with a skin given as JSON. Missing fields fall back to the
/// `"scroll"` skin.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn mount_card_with_config(
    container_id: Option<String>,
    config_json: &str,
) -> Result<(), JsValue> {
    let skin = Skin::from_json(config_json)
        .map_err(|e| JsValue::from_str(&format!("invalid card config: {}", e)))?;
    mount_with_skin(container_id, skin)
}

/// Tear down the mounted card, if any.
#[wasm_bindgen]
pub fn unmount_card() {
    // Take first so the drop runs without the slot borrowed.
    let previous = CARD.with(|c| c.borrow_mut().take());
    drop(previous);
}

/// `"closed"`, `"ajar"`, `"open"`, or `"unmounted"`.
#[wasm_bindgen]
pub fn card_phase() -> String {
    CARD.with(|c| match c.borrow().as_ref() {
        Some(card) => card.mount.view().phase.as_str().to_string(),
        None => "unmounted".to_string(),
    })
}

/// The parchment clip path, for pages that style their own panel.
#[wasm_bindgen]
pub fn scroll_clip_path() -> String {
    card::scroll_clip_path()
}
