//! Mount lifecycle: ties the entry gate and the interaction state machine to
//! a [`Host`], and releases everything it acquired when dropped.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::host::Host;
use super::interaction::{CardEvent, CardPhase, Interaction};
use super::session_gate::{EntryGate, SessionStore};

/// Snapshot handed to the renderer after every effective change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardView {
    pub phase: CardPhase,
    pub card_ajar: bool,
    pub modal_visible: bool,
    pub hint_visible: bool,
    pub entry_animation: bool,
}

struct CardState {
    interaction: Interaction,
    gate: EntryGate,
}

impl CardState {
    fn view(&self) -> CardView {
        CardView {
            phase: self.interaction.phase(),
            card_ajar: self.interaction.card_ajar(),
            modal_visible: self.interaction.modal_visible(),
            hint_visible: self.interaction.hint_visible(),
            entry_animation: self.gate.is_playing(),
        }
    }
}

type Subscriber = Rc<dyn Fn(&CardView)>;

struct ControllerInner {
    state: RefCell<CardState>,
    attached: Cell<bool>,
    subscriber: RefCell<Option<Subscriber>>,
}

/// Cheap clonable handle used by input listeners and the entry timer.
///
/// Once detached (on unmount) every call is a no-op, so a late callback can
/// never touch a torn-down card.
#[derive(Clone)]
pub struct CardController {
    inner: Rc<ControllerInner>,
}

impl CardController {
    fn new(gate: EntryGate) -> Self {
        Self {
            inner: Rc::new(ControllerInner {
                state: RefCell::new(CardState {
                    interaction: Interaction::new(),
                    gate,
                }),
                attached: Cell::new(true),
                subscriber: RefCell::new(None),
            }),
        }
    }

    pub fn view(&self) -> CardView {
        self.inner.state.borrow().view()
    }

    pub fn is_attached(&self) -> bool {
        self.inner.attached.get()
    }

    /// Install the single change listener, replacing any previous one.
    pub fn subscribe(&self, subscriber: Subscriber) {
        *self.inner.subscriber.borrow_mut() = Some(subscriber);
    }

    /// Feed one input event. Returns true when the view changed.
    pub fn dispatch(&self, event: CardEvent) -> bool {
        if !self.is_attached() {
            return false;
        }
        let view = {
            let mut st = self.inner.state.borrow_mut();
            if !st.interaction.apply(event) {
                return false;
            }
            st.view()
        };
        log::debug!("card {:?} -> {}", event, view.phase.as_str());
        self.notify(&view);
        true
    }

    fn finish_entry_animation(&self) {
        if !self.is_attached() {
            return;
        }
        let view = {
            let mut st = self.inner.state.borrow_mut();
            if !st.gate.finish() {
                return;
            }
            st.view()
        };
        log::debug!("entry animation finished");
        self.notify(&view);
    }

    fn notify(&self, view: &CardView) {
        // Clone out so the subscriber runs without the cell borrowed.
        let subscriber = self.inner.subscriber.borrow().clone();
        if let Some(subscriber) = subscriber {
            subscriber(view);
        }
    }

    fn detach(&self) {
        self.inner.attached.set(false);
        self.inner.subscriber.borrow_mut().take();
    }
}

/// A card bound to a host. Acquires the entry timer and the key listener on
/// [`MountedCard::mount`] and gives both back when dropped.
pub struct MountedCard<H: Host> {
    host: H,
    controller: CardController,
    entry_timer: Option<H::Timer>,
    key_listener: Option<H::Listener>,
}

impl<H: Host> MountedCard<H> {
    pub fn mount(host: H, store: &dyn SessionStore, entry_animation_ms: u32) -> Self {
        let gate = EntryGate::check(store);
        let controller = CardController::new(gate);

        let entry_timer = if gate.is_playing() {
            let c = controller.clone();
            Some(host.schedule_once(
                entry_animation_ms,
                Box::new(move || c.finish_entry_animation()),
            ))
        } else {
            None
        };

        let c = controller.clone();
        let key_listener = host.listen_keys(Box::new(move |key: &str| {
            if let Some(event) = CardEvent::from_key(key) {
                c.dispatch(event);
            }
        }));

        log::debug!("card mounted (entry animation: {})", gate.is_playing());
        Self {
            host,
            controller,
            entry_timer,
            key_listener: Some(key_listener),
        }
    }

    pub fn controller(&self) -> CardController {
        self.controller.clone()
    }

    pub fn view(&self) -> CardView {
        self.controller.view()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Explicit teardown; equivalent to dropping.
    pub fn unmount(self) {}
}

impl<H: Host> Drop for MountedCard<H> {
    fn drop(&mut self) {
        self.controller.detach();
        if let Some(timer) = self.entry_timer.take() {
            self.host.cancel(timer);
        }
        if let Some(listener) = self.key_listener.take() {
            self.host.unlisten(listener);
        }
        log::info!("card unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::host::ManualHost;
    use crate::card::session_gate::{ENTRY_ANIMATION_MS, MemorySessionStore};

    fn mount(host: &ManualHost, store: &MemorySessionStore) -> MountedCard<ManualHost> {
        MountedCard::mount(host.clone(), store, ENTRY_ANIMATION_MS)
    }

    #[test]
    fn test_mount_starts_closed() {
        let card = mount(&ManualHost::new(), &MemorySessionStore::new());
        let view = card.view();
        assert_eq!(view.phase, CardPhase::Closed);
        assert!(!view.card_ajar && !view.modal_visible);
    }

    #[test]
    fn test_entry_animation_window() {
        let host = ManualHost::new();
        let card = mount(&host, &MemorySessionStore::new());
        assert!(card.view().entry_animation);
        host.advance(ENTRY_ANIMATION_MS as u64 - 1);
        assert!(card.view().entry_animation);
        host.advance(1);
        assert!(!card.view().entry_animation);
        host.advance(60_000);
        assert!(!card.view().entry_animation);
    }

    #[test]
    fn test_subscriber_sees_changes_only() {
        let host = ManualHost::new();
        let card = mount(&host, &MemorySessionStore::new());
        let seen: Rc<RefCell<Vec<CardView>>> = Rc::default();
        let s = seen.clone();
        card.controller()
            .subscribe(Rc::new(move |v: &CardView| s.borrow_mut().push(*v)));

        let c = card.controller();
        assert!(c.dispatch(CardEvent::PointerEnter));
        assert!(!c.dispatch(CardEvent::PointerEnter));
        assert!(c.dispatch(CardEvent::CardClick));
        host.advance(ENTRY_ANIMATION_MS as u64);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].phase, CardPhase::Ajar);
        assert_eq!(seen[1].phase, CardPhase::Open);
        assert!(!seen[2].entry_animation);
    }

    #[test]
    fn test_escape_routed_through_host() {
        let host = ManualHost::new();
        let card = mount(&host, &MemorySessionStore::new());
        card.controller().dispatch(CardEvent::CardClick);
        host.press_key("Enter");
        assert_eq!(card.view().phase, CardPhase::Open);
        host.press_key("Escape");
        assert_eq!(card.view().phase, CardPhase::Closed);
    }

    #[test]
    fn test_unmount_releases_timer_and_listener() {
        let host = ManualHost::new();
        let card = mount(&host, &MemorySessionStore::new());
        let controller = card.controller();
        assert_eq!(host.pending_timers(), 1);
        assert_eq!(host.key_listener_count(), 1);

        card.unmount();
        assert_eq!(host.pending_timers(), 0);
        assert_eq!(host.key_listener_count(), 0);
        assert!(!controller.is_attached());

        let before = controller.view();
        host.advance(10_000);
        assert!(!controller.dispatch(CardEvent::CardClick));
        assert_eq!(controller.view(), before);
    }
}
