//! Event-loop services a mounted card borrows: one-shot timers and a global
//! key listener. Both hand back tokens that must be returned on teardown.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub trait Host {
    type Timer;
    type Listener;

    fn schedule_once(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Timer;
    fn cancel(&self, timer: Self::Timer);
    /// Register a window-wide keydown listener receiving `KeyboardEvent.key`.
    fn listen_keys(&self, callback: Box<dyn FnMut(&str)>) -> Self::Listener;
    fn unlisten(&self, listener: Self::Listener);
}

// --- Browser ----------------------------------------------------------------

pub struct BrowserHost {
    window: web_sys::Window,
}

impl BrowserHost {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

pub struct KeyListener {
    closure: Option<Closure<dyn FnMut(web_sys::KeyboardEvent)>>,
}

impl Host for BrowserHost {
    type Timer = Timeout;
    type Listener = KeyListener;

    fn schedule_once(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, callback)
    }

    fn cancel(&self, timer: Timeout) {
        // Dropping a pending Timeout clears it.
        drop(timer);
    }

    fn listen_keys(&self, mut callback: Box<dyn FnMut(&str)>) -> KeyListener {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            callback(&evt.key());
        }) as Box<dyn FnMut(_)>);
        match self
            .window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
        {
            Ok(()) => KeyListener {
                closure: Some(closure),
            },
            Err(err) => {
                log::warn!("keydown listener not registered: {:?}", err);
                KeyListener { closure: None }
            }
        }
    }

    fn unlisten(&self, listener: KeyListener) {
        if let Some(closure) = listener.closure {
            let callback = closure.as_ref().unchecked_ref();
            if let Err(err) = self
                .window
                .remove_event_listener_with_callback("keydown", callback)
            {
                log::warn!("keydown listener not removed: {:?}", err);
            }
        }
    }
}

// --- Manual clock -------------------------------------------------------------

type KeyCallback = Box<dyn FnMut(&str)>;

#[derive(Default)]
struct ManualState {
    now_ms: u64,
    next_id: u64,
    timers: Vec<(u64, u64, Box<dyn FnOnce()>)>, // (id, due_ms, callback)
    listeners: Vec<(u64, KeyCallback)>,
    /// Set while `press_key` holds the listener list outside the state.
    dispatching: bool,
    /// Listener ids removed while `dispatching`; dropped when the list returns.
    removed_while_dispatching: Vec<u64>,
}

impl ManualState {
    fn take_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Host driven by an explicit millisecond clock. Cloning shares the clock, so
/// a caller can keep a handle while a mounted card owns another.
#[derive(Clone, Default)]
pub struct ManualHost {
    state: Rc<RefCell<ManualState>>,
}

#[derive(Debug)]
pub struct ManualTimer(u64);

#[derive(Debug)]
pub struct ManualListener(u64);

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    pub fn key_listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Move the clock forward, firing due timers in deadline order.
    pub fn advance(&self, ms: u64) {
        let target = self.state.borrow().now_ms + ms;
        loop {
            let due = {
                let mut st = self.state.borrow_mut();
                let next = st
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, (_, at, _))| *at <= target)
                    .min_by_key(|(_, (_, at, _))| *at)
                    .map(|(idx, _)| idx);
                match next {
                    Some(idx) => {
                        let (_, at, cb) = st.timers.remove(idx);
                        st.now_ms = st.now_ms.max(at);
                        Some(cb)
                    }
                    None => None,
                }
            };
            match due {
                Some(cb) => cb(),
                None => break,
            }
        }
        self.state.borrow_mut().now_ms = target;
    }

    /// Deliver a keydown to every registered listener.
    /// Listeners removed from inside a callback stay removed.
    pub fn press_key(&self, key: &str) {
        let mut listeners = {
            let mut st = self.state.borrow_mut();
            st.dispatching = true;
            std::mem::take(&mut st.listeners)
        };
        for (id, cb) in listeners.iter_mut() {
            if self.state.borrow().removed_while_dispatching.contains(id) {
                continue;
            }
            cb(key);
        }
        let mut st = self.state.borrow_mut();
        listeners.append(&mut st.listeners);
        let removed = std::mem::take(&mut st.removed_while_dispatching);
        listeners.retain(|(id, _)| !removed.contains(id));
        st.listeners = listeners;
        st.dispatching = false;
    }
}

impl Host for ManualHost {
    type Timer = ManualTimer;
    type Listener = ManualListener;

    fn schedule_once(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> ManualTimer {
        let mut st = self.state.borrow_mut();
        let id = st.take_id();
        let due = st.now_ms + delay_ms as u64;
        st.timers.push((id, due, callback));
        ManualTimer(id)
    }

    fn cancel(&self, timer: ManualTimer) {
        self.state.borrow_mut().timers.retain(|(id, _, _)| *id != timer.0);
    }

    fn listen_keys(&self, callback: Box<dyn FnMut(&str)>) -> ManualListener {
        let mut st = self.state.borrow_mut();
        let id = st.take_id();
        st.listeners.push((id, callback));
        ManualListener(id)
    }

    fn unlisten(&self, listener: ManualListener) {
        let mut st = self.state.borrow_mut();
        st.listeners.retain(|(id, _)| *id != listener.0);
        if st.dispatching {
            st.removed_while_dispatching.push(listener.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_timer_fires_at_deadline_only() {
        let host = ManualHost::new();
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        let _t = host.schedule_once(100, Box::new(move || f.set(true)));
        host.advance(99);
        assert!(!fired.get());
        host.advance(1);
        assert!(fired.get());
        assert_eq!(host.pending_timers(), 0);
        assert_eq!(host.now_ms(), 100);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let host = ManualHost::new();
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        let t = host.schedule_once(10, Box::new(move || f.set(true)));
        host.cancel(t);
        host.advance(1_000);
        assert!(!fired.get());
    }

    #[test]
    fn test_keys_reach_listeners_until_removed() {
        let host = ManualHost::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let l = host.listen_keys(Box::new(move |k: &str| {
            if k == "Escape" {
                h.set(h.get() + 1);
            }
        }));
        host.press_key("Escape");
        host.press_key("a");
        assert_eq!(hits.get(), 1);
        host.unlisten(l);
        assert_eq!(host.key_listener_count(), 0);
        host.press_key("Escape");
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_listener_removed_from_callback_stays_removed() {
        let host = ManualHost::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let target = host.listen_keys(Box::new(move |_k: &str| h.set(h.get() + 1)));

        let slot = Rc::new(RefCell::new(Some(target)));
        let remover_host = host.clone();
        let s = slot.clone();
        let _remover = host.listen_keys(Box::new(move |k: &str| {
            if k == "Escape" {
                if let Some(l) = s.borrow_mut().take() {
                    remover_host.unlisten(l);
                }
            }
        }));
        assert_eq!(host.key_listener_count(), 2);

        host.press_key("Escape");
        assert_eq!(host.key_listener_count(), 1);
        host.press_key("Escape");
        assert_eq!(hits.get(), 1);
    }
}
