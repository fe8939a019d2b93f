use std::cell::RefCell;
use std::rc::Rc;

use crate::mask::{KeyEventKind, KeyMask, Modifiers, encode_mods};

/// Callback receiving `(key, mods)` for every matching event.
pub type KeyHandler = Rc<dyn Fn(u32, u32)>;

/// Wrap a closure as a [`KeyHandler`].
pub fn handler(f: impl Fn(u32, u32) + 'static) -> KeyHandler {
    Rc::new(f)
}

fn same_handler(a: &KeyHandler, b: &KeyHandler) -> bool {
    // compare data pointers only
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// A registered `(mask, handler)` pair.
#[derive(Clone)]
pub struct Subscription {
    pub mask: KeyMask,
    pub handler: KeyHandler,
}

/// Raw key event from the platform's input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyInput {
    pub scan_code: u32,
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub repeat: bool,
}

impl KeyInput {
    pub fn new(scan_code: u32) -> Self {
        Self {
            scan_code,
            ..Self::default()
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        let mut m = Modifiers::empty();
        m.set(Modifiers::ALT, self.alt);
        m.set(Modifiers::CONTROL, self.ctrl);
        m.set(Modifiers::REPEAT, self.repeat);
        m.set(Modifiers::SHIFT, self.shift);
        m
    }

    /// `(key, mods)` for a key-down or key-up event.
    pub fn encode(&self, kind: KeyEventKind) -> (u32, u32) {
        (self.scan_code, encode_mods(self.modifiers(), kind))
    }
}

/// `(key, mods)` for a character event. No modifier state exists at that phase.
pub fn encode_char(ch: char) -> (u32, u32) {
    (ch as u32, KeyEventKind::KeyPress.mods_bits())
}

/// Receiver of raw key events from an input source.
pub trait KeySink {
    fn key_down(&self, input: &KeyInput) -> usize;
    fn key_up(&self, input: &KeyInput) -> usize;
    fn key_press(&self, ch: char) -> usize;
}

/// Keyboard dispatch table: subscriptions in registration order.
///
/// Firing uses containment (`sub & event == sub`). Removal by mask uses exact
/// equality, so removing `M` leaves `M | extra` registered.
#[derive(Clone, Default)]
pub struct KeyboardTable {
    subscriptions: Vec<Subscription>,
}

impl KeyboardTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, handler: KeyHandler, mask: KeyMask) {
        tracing::debug!(?mask, "keyboard binding added");
        self.subscriptions.push(Subscription { mask, handler });
    }

    /// Remove subscriptions whose mask equals `mask` exactly. With a handler,
    /// only subscriptions holding that same handler go. Returns how many were
    /// removed.
    pub fn remove(&mut self, handler: Option<&KeyHandler>, mask: KeyMask) -> usize {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| {
            let hit = s.mask == mask && handler.is_none_or(|h| same_handler(h, &s.handler));
            !hit
        });
        let removed = before - self.subscriptions.len();
        tracing::debug!(?mask, removed, "keyboard binding removed");
        removed
    }

    /// Handlers matching an event, in registration order.
    ///
    /// Collected up front so a handler may change the table while the event
    /// is still being delivered.
    pub fn matching(&self, key: u32, mods: u32) -> Vec<KeyHandler> {
        let event = KeyMask::for_event(key, mods);
        self.subscriptions
            .iter()
            .filter(|s| s.mask.matches(event))
            .map(|s| Rc::clone(&s.handler))
            .collect()
    }

    /// Invoke every matching handler. Returns the number fired.
    pub fn dispatch(&self, key: u32, mods: u32) -> usize {
        fire(&self.matching(key, mods), key, mods)
    }

    /// Dispatch through a shared table. The borrow is released before any
    /// handler runs, so handlers may add or remove bindings on `table`.
    pub fn dispatch_shared(table: &RefCell<KeyboardTable>, key: u32, mods: u32) -> usize {
        let fired = table.borrow().matching(key, mods);
        fire(&fired, key, mods)
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

fn fire(handlers: &[KeyHandler], key: u32, mods: u32) -> usize {
    tracing::trace!(key, mods, fired = handlers.len(), "key event dispatched");
    for handler in handlers {
        handler(key, mods);
    }
    handlers.len()
}

impl KeySink for KeyboardTable {
    fn key_down(&self, input: &KeyInput) -> usize {
        let (key, mods) = input.encode(KeyEventKind::KeyDown);
        self.dispatch(key, mods)
    }

    fn key_up(&self, input: &KeyInput) -> usize {
        let (key, mods) = input.encode(KeyEventKind::KeyUp);
        self.dispatch(key, mods)
    }

    fn key_press(&self, ch: char) -> usize {
        let (key, mods) = encode_char(ch);
        self.dispatch(key, mods)
    }
}
