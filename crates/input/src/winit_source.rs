//! Translation from winit keyboard events into dispatch table calls.

use winit::event::ElementState;
use winit::keyboard::{ModifiersState, PhysicalKey};

use crate::mask::Modifiers;
use crate::table::{KeyInput, KeySink};

pub fn translate_modifiers(state: ModifiersState) -> Modifiers {
    let mut res = Modifiers::empty();
    if state.shift_key() {
        res.insert(Modifiers::SHIFT);
    }
    if state.control_key() {
        res.insert(Modifiers::CONTROL);
    }
    if state.alt_key() {
        res.insert(Modifiers::ALT);
    }
    res
}

/// Hardware scan code of a physical key, where the platform exposes one.
#[cfg(not(any(target_arch = "wasm32", target_os = "android", target_os = "ios")))]
pub fn scan_code(key: PhysicalKey) -> Option<u32> {
    use winit::platform::scancode::PhysicalKeyExtScancode;
    key.to_scancode()
}

#[cfg(any(target_arch = "wasm32", target_os = "android", target_os = "ios"))]
pub fn scan_code(_key: PhysicalKey) -> Option<u32> {
    None
}

pub fn key_input(scan_code: u32, modifiers: ModifiersState, repeat: bool) -> KeyInput {
    let mods = translate_modifiers(modifiers);
    KeyInput {
        scan_code,
        alt: mods.contains(Modifiers::ALT),
        ctrl: mods.contains(Modifiers::CONTROL),
        shift: mods.contains(Modifiers::SHIFT),
        repeat,
    }
}

/// Forward one winit keyboard event: a key-down or key-up for the scan code,
/// then a key-press per character of `text` on press.
///
/// Returns the total number of handlers fired.
pub fn forward(
    sink: &impl KeySink,
    scan_code: u32,
    state: ElementState,
    modifiers: ModifiersState,
    repeat: bool,
    text: Option<&str>,
) -> usize {
    let input = key_input(scan_code, modifiers, repeat);
    match state {
        ElementState::Pressed => {
            let mut fired = sink.key_down(&input);
            for ch in text.unwrap_or_default().chars() {
                fired += sink.key_press(ch);
            }
            fired
        }
        ElementState::Released => sink.key_up(&input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::{KeyEventKind, KeyMask};
    use crate::table::{KeyboardTable, handler};

    #[test]
    fn modifiers_translate() {
        let m = translate_modifiers(ModifiersState::SHIFT | ModifiersState::ALT);
        assert_eq!(m, Modifiers::SHIFT | Modifiers::ALT);
        assert_eq!(translate_modifiers(ModifiersState::SUPER), Modifiers::empty());
    }

    #[test]
    fn press_with_text_fires_down_and_char() {
        let mut table = KeyboardTable::new();
        table.add(handler(|_, _| {}), KeyMask::kind(KeyEventKind::KeyDown));
        table.add(handler(|_, _| {}), KeyMask::kind(KeyEventKind::KeyPress));
        table.add(handler(|_, _| {}), KeyMask::kind(KeyEventKind::KeyUp));

        let fired = forward(
            &table,
            30,
            ElementState::Pressed,
            ModifiersState::empty(),
            false,
            Some("a"),
        );
        assert_eq!(fired, 2);

        let fired = forward(
            &table,
            30,
            ElementState::Released,
            ModifiersState::empty(),
            false,
            None,
        );
        assert_eq!(fired, 1);
    }

    #[test]
    fn repeat_flag_is_carried() {
        let input = key_input(5, ModifiersState::CONTROL, true);
        assert!(input.repeat);
        assert!(input.ctrl);
        assert!(!input.shift);
    }
}
