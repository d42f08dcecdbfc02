//! Hover / open / modal state machine.
//!
//! The card is tracked with two flags, `card_ajar` (lid lifted) and
//! `modal_visible` (message overlay shown). The three visible phases are
//! derived from them; opening the modal always lifts the lid in the same
//! update, so `modal_visible` never holds without `card_ajar`.

/// Visible phase derived from the two interaction flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardPhase {
    Closed,
    Ajar,
    Open,
}

impl CardPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            CardPhase::Closed => "closed",
            CardPhase::Ajar => "ajar",
            CardPhase::Open => "open",
        }
    }
}

/// Discrete inputs the card reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardEvent {
    PointerEnter,
    PointerLeave,
    CardClick,
    CloseClick,
    BackdropClick,
    /// Click inside the message panel; never reaches the backdrop.
    PanelClick,
    Escape,
}

impl CardEvent {
    /// Map a `KeyboardEvent.key` value to an event. Only Escape is bound.
    pub fn from_key(key: &str) -> Option<CardEvent> {
        match key {
            "Escape" | "Esc" => Some(CardEvent::Escape),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Interaction {
    card_ajar: bool,
    modal_visible: bool,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn card_ajar(&self) -> bool {
        self.card_ajar
    }

    pub fn modal_visible(&self) -> bool {
        self.modal_visible
    }

    pub fn phase(&self) -> CardPhase {
        match (self.card_ajar, self.modal_visible) {
            (_, true) => CardPhase::Open,
            (true, false) => CardPhase::Ajar,
            (false, false) => CardPhase::Closed,
        }
    }

    /// The "open me" bubble shows only while the lid is lifted by hover.
    pub fn hint_visible(&self) -> bool {
        self.card_ajar && !self.modal_visible
    }

    /// Apply one event. Returns true when either flag changed.
    pub fn apply(&mut self, event: CardEvent) -> bool {
        let before = *self;
        match event {
            CardEvent::PointerEnter => {
                if !self.card_ajar {
                    self.card_ajar = true;
                }
            }
            CardEvent::PointerLeave => {
                // The overlay covers the card while open; leave is ignored then.
                if !self.modal_visible {
                    self.card_ajar = false;
                }
            }
            CardEvent::CardClick => {
                self.card_ajar = true;
                self.modal_visible = true;
            }
            CardEvent::CloseClick | CardEvent::BackdropClick | CardEvent::Escape => {
                if self.modal_visible {
                    self.card_ajar = false;
                    self.modal_visible = false;
                }
            }
            CardEvent::PanelClick => {}
        }
        *self != before
    }
}
