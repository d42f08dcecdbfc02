//! Greeting card widget.
//!
//! The card is split into small pieces that can be driven without a browser:
//! - `session_gate`: one-time entry animation keyed on session storage
//! - `interaction`: closed / ajar / open state machine
//! - `scroll_path`: wavy clip-path outline for the message parchment
//! - `decorations`: randomly placed floating flowers and hearts
//! - `host` + `mount`: timer / key listener ownership and teardown
//!
//! `dom` and `style` turn the above into elements and CSS.

pub mod decorations;
pub mod dom;
pub mod host;
pub mod interaction;
pub mod mount;
pub mod scroll_path;
pub mod session_gate;
pub mod skin;
pub mod style;

pub use decorations::{Decoration, DecorationKind};
pub use host::{BrowserHost, Host, ManualHost};
pub use interaction::{CardEvent, CardPhase, Interaction};
pub use mount::{CardController, CardView, MountedCard};
pub use scroll_path::{ClipPoint, scroll_clip_path, scroll_outline};
pub use session_gate::{BrowserSessionStore, EntryGate, MemorySessionStore, SessionStore};
pub use skin::{DecorationBand, Palette, Skin};
