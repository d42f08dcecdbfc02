//! Browser DOM for the card: builds the element tree, wires pointer input to
//! a [`CardController`] and applies [`CardView`] snapshots as class names.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget};

use super::decorations::Decoration;
use super::interaction::CardEvent;
use super::mount::{CardController, CardView};
use super::scroll_path::scroll_clip_path;
use super::skin::Skin;
use super::style::{self, STYLE_ELEMENT_ID};

/// Elements whose classes change with the view.
#[derive(Clone)]
struct Dynamic {
    card: Element,
    hint: Element,
    lid: Element,
    backdrop: Element,
}

impl Dynamic {
    fn apply(&self, view: &CardView) {
        self.card.set_class_name(style::card_class(view));
        self.hint.set_class_name(style::hint_class(view));
        self.lid.set_class_name(style::lid_class(view));
        self.backdrop.set_class_name(style::backdrop_class(view));
    }
}

type Listener = (EventTarget, &'static str, Closure<dyn FnMut(web_sys::Event)>);

pub struct CardDom {
    root: Element,
    close: Element,
    panel: Element,
    dynamic: Dynamic,
    listeners: Vec<Listener>,
}

fn el(doc: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let e = doc.create_element(tag)?;
    e.set_class_name(class);
    Ok(e)
}

/// Insert the skin stylesheet unless the document already carries one.
fn ensure_stylesheet(doc: &Document, skin: &Skin) -> Result<(), JsValue> {
    if let Some(existing) = doc.get_element_by_id(STYLE_ELEMENT_ID) {
        existing.set_text_content(Some(&style::stylesheet(skin)));
        return Ok(());
    }
    let tag = doc.create_element("style")?;
    tag.set_id(STYLE_ELEMENT_ID);
    tag.set_text_content(Some(&style::stylesheet(skin)));
    match doc.head() {
        Some(head) => head.append_child(&tag)?,
        None => doc
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&tag)?,
    };
    Ok(())
}

impl CardDom {
    /// Build the tree and append it to `container`.
    pub fn build(
        doc: &Document,
        container: &Element,
        skin: &Skin,
        decorations: &[Decoration],
    ) -> Result<Self, JsValue> {
        ensure_stylesheet(doc, skin)?;

        let root = el(doc, "div", "gc-page")?;

        // Floating background decorations
        let layer = el(doc, "div", "gc-decor-layer")?;
        for d in decorations {
            let e = el(doc, "div", d.kind.class_name())?;
            e.set_attribute("style", &d.style())?;
            layer.append_child(&e)?;
        }
        root.append_child(&layer)?;

        // Closed card: hint bubble, lid, inner border
        let card = el(doc, "div", "gc-card")?;
        let hint = el(doc, "div", "gc-hint")?;
        let hint_text = doc.create_element("p")?;
        hint_text.set_text_content(Some(&skin.hint));
        hint.append_child(&hint_text)?;
        let arrow = el(doc, "div", "gc-hint-arrow")?;
        hint.append_child(&arrow)?;
        card.append_child(&hint)?;

        let lid = el(doc, "div", "gc-lid")?;
        let lid_heart = el(doc, "div", "gc-lid-heart")?;
        lid.append_child(&lid_heart)?;
        card.append_child(&lid)?;
        let border = el(doc, "div", "gc-card-border")?;
        card.append_child(&border)?;
        root.append_child(&card)?;

        // Overlay: backdrop > panel > (close, parchment > body > message)
        let backdrop = el(doc, "div", "gc-backdrop gc-hidden")?;
        let panel = el(doc, "div", "gc-panel")?;
        let close = el(doc, "button", "gc-close")?;
        close.set_attribute("type", "button")?;
        close.set_attribute("aria-label", "Cerrar")?;
        close.set_text_content(Some("×"));
        panel.append_child(&close)?;

        let parchment = el(doc, "div", "gc-parchment")?;
        parchment.set_attribute("style", &format!("clip-path: {};", scroll_clip_path()))?;
        let body = el(doc, "div", "gc-parchment-body")?;
        let message = el(doc, "p", "gc-message")?;
        message.set_text_content(Some(&skin.message));
        body.append_child(&message)?;
        parchment.append_child(&body)?;
        panel.append_child(&parchment)?;
        backdrop.append_child(&panel)?;
        root.append_child(&backdrop)?;

        container.append_child(&root)?;

        Ok(Self {
            root,
            close,
            panel,
            dynamic: Dynamic {
                card,
                hint,
                lid,
                backdrop,
            },
            listeners: Vec::new(),
        })
    }

    /// Renderer suitable for [`CardController::subscribe`].
    pub fn renderer(&self) -> Rc<dyn Fn(&CardView)> {
        let dynamic = self.dynamic.clone();
        Rc::new(move |view: &CardView| dynamic.apply(view))
    }

    pub fn render(&self, view: &CardView) {
        self.dynamic.apply(view);
    }

    fn listen(
        &mut self,
        target: EventTarget,
        kind: &'static str,
        controller: &CardController,
        event: CardEvent,
        stop_propagation: bool,
    ) -> Result<(), JsValue> {
        let c = controller.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::Event| {
            if stop_propagation {
                evt.stop_propagation();
            }
            c.dispatch(event);
        }) as Box<dyn FnMut(_)>);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        self.listeners.push((target, kind, closure));
        Ok(())
    }

    /// Route pointer input on the card and overlay to `controller`.
    pub fn bind(&mut self, controller: &CardController) -> Result<(), JsValue> {
        let card: EventTarget = self.dynamic.card.clone().into();
        let close: EventTarget = self.close.clone().into();
        let backdrop: EventTarget = self.dynamic.backdrop.clone().into();
        let panel: EventTarget = self.panel.clone().into();

        let enter = CardEvent::PointerEnter;
        let leave = CardEvent::PointerLeave;
        self.listen(card.clone(), "mouseenter", controller, enter, false)?;
        self.listen(card.clone(), "mouseleave", controller, leave, false)?;
        self.listen(card, "click", controller, CardEvent::CardClick, false)?;
        self.listen(close, "click", controller, CardEvent::CloseClick, false)?;
        // Panel clicks stop here so they never reach the backdrop handler.
        self.listen(panel, "click", controller, CardEvent::PanelClick, true)?;
        self.listen(backdrop, "click", controller, CardEvent::BackdropClick, false)?;
        Ok(())
    }
}

impl Drop for CardDom {
    fn drop(&mut self) {
        for (target, kind, closure) in self.listeners.drain(..) {
            let callback = closure.as_ref().unchecked_ref();
            if let Err(err) = target.remove_event_listener_with_callback(kind, callback) {
                log::warn!("{} listener not removed: {:?}", kind, err);
            }
        }
        self.root.remove();
    }
}
