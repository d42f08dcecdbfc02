// Browser tests; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use greeting_card::card::{BrowserHost, Host};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn click(selector: &str) {
    let doc = web_sys::window().unwrap().document().unwrap();
    let el: web_sys::HtmlElement = doc
        .query_selector(selector)
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    el.click();
}

fn press(key: &str) {
    let init = web_sys::KeyboardEventInit::new();
    init.set_key(key);
    let evt =
        web_sys::KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    web_sys::window().unwrap().dispatch_event(&evt).unwrap();
}

#[wasm_bindgen_test]
fn mount_open_close_unmount() {
    greeting_card::mount_card(None, None).unwrap();
    assert_eq!(greeting_card::card_phase(), "closed");

    click(".gc-card");
    assert_eq!(greeting_card::card_phase(), "open");

    // Panel clicks must not close through the backdrop.
    click(".gc-message");
    assert_eq!(greeting_card::card_phase(), "open");

    click(".gc-close");
    assert_eq!(greeting_card::card_phase(), "closed");

    greeting_card::unmount_card();
    assert_eq!(greeting_card::card_phase(), "unmounted");
    let doc = web_sys::window().unwrap().document().unwrap();
    assert!(doc.query_selector(".gc-page").unwrap().is_none());
}

#[wasm_bindgen_test]
fn unknown_skin_is_rejected() {
    assert!(greeting_card::mount_card(None, Some("postcard".into())).is_err());
}

#[wasm_bindgen_test]
fn backdrop_click_and_escape_close() {
    greeting_card::mount_card(None, Some("letter".into())).unwrap();

    click(".gc-card");
    assert_eq!(greeting_card::card_phase(), "open");
    click(".gc-backdrop");
    assert_eq!(greeting_card::card_phase(), "closed");

    click(".gc-card");
    press("Enter");
    assert_eq!(greeting_card::card_phase(), "open");
    press("Escape");
    assert_eq!(greeting_card::card_phase(), "closed");

    greeting_card::unmount_card();
}

#[wasm_bindgen_test]
fn keydown_after_unlisten_is_not_delivered() {
    let host = BrowserHost::new(web_sys::window().unwrap());
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    let listener = host.listen_keys(Box::new(move |key: &str| {
        if key == "Escape" {
            h.set(h.get() + 1);
        }
    }));

    press("Escape");
    assert_eq!(hits.get(), 1);

    host.unlisten(listener);
    press("Escape");
    assert_eq!(hits.get(), 1);
}

#[wasm_bindgen_test]
fn escape_after_unmount_leaves_next_card_alone() {
    greeting_card::mount_card(None, None).unwrap();
    click(".gc-card");
    greeting_card::unmount_card();
    press("Escape");
    assert_eq!(greeting_card::card_phase(), "unmounted");

    greeting_card::mount_card(None, None).unwrap();
    assert_eq!(greeting_card::card_phase(), "closed");
    click(".gc-card");
    press("Escape");
    assert_eq!(greeting_card::card_phase(), "closed");
    greeting_card::unmount_card();
}
