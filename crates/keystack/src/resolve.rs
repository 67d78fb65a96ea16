//! # Key event resolution
//!
//! ## Overview
//!
//! This module turns a snapshot of input device state into at most one canonical [Key] per
//! polling tick. Keyboard and mouse input are resolved separately, by [resolve_key] and
//! [resolve_mouse].
//!
//! Only one keyboard key is reported per tick. When several keys were pressed, the first one in
//! a fixed priority order wins, so the result depends only on the device state.
use std::collections::HashSet;

use crossterm::event::{
    KeyCode,
    KeyEvent,
    KeyModifiers,
    MouseButton as TermButton,
    MouseEvent,
    MouseEventKind,
};

use crate::key::{Key, Modifiers};

/// Physical keys that a device can report.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(missing_docs)]
pub enum PhysicalKey {
    Grave,
    Apostrophe,
    Comma,
    Minus,
    Period,
    Slash,
    Semicolon,
    Equal,
    LeftBracket,
    Backslash,
    RightBracket,
    Space,
    Escape,
    Enter,
    Tab,
    Backspace,
    Insert,
    Delete,
    Right,
    Left,
    Down,
    Up,
    PageUp,
    PageDown,
    Home,
    End,
    CapsLock,
    ScrollLock,
    NumLock,
    PrintScreen,
    Pause,
    F(u8),
    Digit(u8),
    Letter(char),
    Keypad(u8),
    KeypadDecimal,
    KeypadDivide,
    KeypadMultiply,
    KeypadSubtract,
    KeypadAdd,
    KeypadEnter,
    KeypadEqual,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    LeftShift,
    RightShift,
    LeftSuper,
    RightSuper,
}

/// Mouse buttons.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MouseButton {
    /// The primary button.
    Left,
    /// The middle button or wheel click.
    Middle,
    /// The secondary button.
    Right,
}

/// Read-only view of input device state during a single tick.
pub trait DeviceState {
    /// Whether `key` is currently held down.
    fn is_key_down(&self, key: PhysicalKey) -> bool;

    /// Whether `key` was pressed, or auto-repeated, during this tick.
    fn is_key_pressed(&self, key: PhysicalKey) -> bool;

    /// Whether `button` was pressed during this tick.
    fn is_button_pressed(&self, button: MouseButton) -> bool;

    /// Whether `button` is currently held down.
    fn is_button_down(&self, button: MouseButton) -> bool;

    /// How far the wheel moved during this tick, as `(x, y)`.
    fn wheel_move(&self) -> (f32, f32);
}

/// A plain-data [DeviceState], for driving resolution programmatically.
#[derive(Clone, Debug, Default)]
pub struct DeviceSnapshot {
    /// Keys held down.
    pub down: HashSet<PhysicalKey>,

    /// Keys pressed or repeated this tick.
    pub pressed: HashSet<PhysicalKey>,

    /// Buttons pressed this tick.
    pub buttons_pressed: HashSet<MouseButton>,

    /// Buttons held down.
    pub buttons_down: HashSet<MouseButton>,

    /// Wheel motion this tick.
    pub wheel: (f32, f32),
}

impl DeviceSnapshot {
    /// Mark a key as pressed (and therefore held) this tick.
    pub fn press(mut self, key: PhysicalKey) -> Self {
        self.pressed.insert(key);
        self.down.insert(key);
        self
    }

    /// Mark a key as held, without a new press this tick.
    pub fn hold(mut self, key: PhysicalKey) -> Self {
        self.down.insert(key);
        self
    }

    /// Mark a mouse button as clicked (and therefore held) this tick.
    pub fn click(mut self, button: MouseButton) -> Self {
        self.buttons_pressed.insert(button);
        self.buttons_down.insert(button);
        self
    }

    /// Mark a mouse button as held.
    pub fn hold_button(mut self, button: MouseButton) -> Self {
        self.buttons_down.insert(button);
        self
    }

    /// Set the wheel motion for this tick.
    pub fn scroll(mut self, x: f32, y: f32) -> Self {
        self.wheel = (x, y);
        self
    }
}

impl DeviceState for DeviceSnapshot {
    fn is_key_down(&self, key: PhysicalKey) -> bool {
        self.down.contains(&key)
    }

    fn is_key_pressed(&self, key: PhysicalKey) -> bool {
        self.pressed.contains(&key)
    }

    fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    fn wheel_move(&self) -> (f32, f32) {
        self.wheel
    }
}

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
const FKEYS: [&str; 12] = [
    "<f1>", "<f2>", "<f3>", "<f4>", "<f5>", "<f6>", "<f7>", "<f8>", "<f9>", "<f10>", "<f11>",
    "<f12>",
];
const LETTERS: [&str; 26] = [
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s",
    "t", "u", "v", "w", "x", "y", "z",
];

/// The keyboard keys in the order they are checked, each with the token it produces.
pub fn resolution_order() -> impl Iterator<Item = (PhysicalKey, &'static str)> {
    use PhysicalKey::*;

    let named = [
        (Grave, "`"),
        (Space, "<space>"),
        (Escape, "<esc>"),
        (Enter, "<enter>"),
        (Tab, "<tab>"),
        (Backspace, "<backspace>"),
        (Insert, "<insert>"),
        (Delete, "<delete>"),
        (Right, "<right>"),
        (Left, "<left>"),
        (Down, "<down>"),
        (Up, "<up>"),
        (PageUp, "<pageup>"),
        (PageDown, "<pagedown>"),
        (Home, "<home>"),
        (End, "<end>"),
        (CapsLock, "<capslock>"),
        (ScrollLock, "<scrolllock>"),
        (NumLock, "<numlock>"),
        (PrintScreen, "<printscreen>"),
        (Pause, "<pause>"),
    ];
    let fkeys = (1u8..=12).zip(FKEYS).map(|(n, t)| (F(n), t));
    let brackets = [(LeftBracket, "["), (Backslash, "\\"), (RightBracket, "]")];
    let keypad = (0u8..=9).zip(DIGITS).map(|(n, t)| (Keypad(n), t));
    let keypad_ops = [
        (KeypadDecimal, "."),
        (KeypadDivide, "/"),
        (KeypadMultiply, "*"),
        (KeypadSubtract, "-"),
        (KeypadAdd, "+"),
        (KeypadEnter, "<enter>"),
        (KeypadEqual, "="),
    ];
    let punctuation = [(Apostrophe, "'"), (Comma, ","), (Minus, "-"), (Period, "."), (Slash, "/")];
    let digits = (0u8..=9).zip(DIGITS).map(|(n, t)| (Digit(n), t));
    let tail = [(Semicolon, ";"), (Equal, "=")];
    let letters = ('a'..='z').zip(LETTERS).map(|(c, t)| (Letter(c), t));

    named
        .into_iter()
        .chain(fkeys)
        .chain(brackets)
        .chain(keypad)
        .chain(keypad_ops)
        .chain(punctuation)
        .chain(digits)
        .chain(tail)
        .chain(letters)
}

/// Determine which modifiers are held. Left and right variants count the same.
pub fn modifiers<S: DeviceState + ?Sized>(state: &S) -> Modifiers {
    use PhysicalKey::*;

    let pairs = [
        (LeftControl, RightControl, Modifiers::CONTROL),
        (LeftAlt, RightAlt, Modifiers::ALT),
        (LeftShift, RightShift, Modifiers::SHIFT),
        (LeftSuper, RightSuper, Modifiers::SUPER),
    ];

    pairs
        .into_iter()
        .filter(|(l, r, _)| state.is_key_down(*l) || state.is_key_down(*r))
        .fold(Modifiers::empty(), |acc, (_, _, m)| acc | m)
}

/// Resolve the keyboard state into a [Key], or the empty key when nothing was pressed.
pub fn resolve_key<S: DeviceState + ?Sized>(state: &S) -> Key {
    let token = resolution_order().find(|(pk, _)| state.is_key_pressed(*pk));

    match token {
        Some((_, token)) => Key::new(modifiers(state), token),
        None => Key::empty(),
    }
}

/// Resolve the mouse state into a [Key], or the empty key when nothing happened.
///
/// Clicks take priority over held buttons, and vertical wheel motion overrides both.
pub fn resolve_mouse<S: DeviceState + ?Sized>(state: &S) -> Key {
    use MouseButton::*;

    let clicks = [(Left, "<lmouse>-click"), (Middle, "<mmouse>-click"), (Right, "<rmouse>-click")];
    let holds = [(Left, "<lmouse>-hold"), (Middle, "<mmouse>-hold"), (Right, "<rmouse>-hold")];

    let mut token = clicks
        .into_iter()
        .find(|(b, _)| state.is_button_pressed(*b))
        .or_else(|| holds.into_iter().find(|(b, _)| state.is_button_down(*b)))
        .map(|(_, t)| t);

    let (_, wheel_y) = state.wheel_move();

    if wheel_y < 0.0 {
        token = Some("<mouse-wheel-down>");
    } else if wheel_y > 0.0 {
        token = Some("<mouse-wheel-up>");
    }

    match token {
        Some(token) => Key::new(modifiers(state), token),
        None => Key::empty(),
    }
}

fn unshift(c: char) -> Option<char> {
    let base = match c {
        '~' => '`',
        '!' => '1',
        '@' => '2',
        '#' => '3',
        '$' => '4',
        '%' => '5',
        '^' => '6',
        '&' => '7',
        '(' => '9',
        ')' => '0',
        '_' => '-',
        '"' => '\'',
        '<' => ',',
        '>' => '.',
        '?' => '/',
        ':' => ';',
        '{' => '[',
        '}' => ']',
        '|' => '\\',
        _ => return None,
    };

    Some(base)
}

fn char_token(c: char) -> Option<(String, bool)> {
    if c == ' ' {
        return Some(("<space>".into(), false));
    }

    if c.is_ascii_uppercase() {
        return Some((c.to_ascii_lowercase().to_string(), true));
    }

    let token = c.to_string();

    if crate::key::is_known_token(&token) {
        return Some((token, false));
    }

    unshift(c).map(|base| (base.to_string(), true))
}

impl From<KeyEvent> for Key {
    fn from(ke: KeyEvent) -> Self {
        let mut mods = Modifiers::empty();

        if ke.modifiers.contains(KeyModifiers::CONTROL) {
            mods |= Modifiers::CONTROL;
        }

        if ke.modifiers.contains(KeyModifiers::ALT) {
            mods |= Modifiers::ALT;
        }

        if ke.modifiers.contains(KeyModifiers::SHIFT) {
            mods |= Modifiers::SHIFT;
        }

        if ke.modifiers.contains(KeyModifiers::SUPER) {
            mods |= Modifiers::SUPER;
        }

        let token = match ke.code {
            KeyCode::Char(c) => {
                match char_token(c) {
                    Some((token, shifted)) => {
                        if shifted {
                            mods |= Modifiers::SHIFT;
                        } else if c.is_ascii_punctuation() || c.is_ascii_digit() {
                            // Terminals on some platforms report SHIFT for symbols that were
                            // typed directly, so only trust it for letters.
                            mods -= Modifiers::SHIFT;
                        }

                        token
                    },
                    None => return Key::empty(),
                }
            },
            KeyCode::BackTab => {
                mods |= Modifiers::SHIFT;
                "<tab>".into()
            },
            KeyCode::F(n @ 1..=12) => format!("<f{n}>"),
            code => {
                let token = match code {
                    KeyCode::Esc => "<esc>",
                    KeyCode::Enter => "<enter>",
                    KeyCode::Tab => "<tab>",
                    KeyCode::Backspace => "<backspace>",
                    KeyCode::Insert => "<insert>",
                    KeyCode::Delete => "<delete>",
                    KeyCode::Right => "<right>",
                    KeyCode::Left => "<left>",
                    KeyCode::Down => "<down>",
                    KeyCode::Up => "<up>",
                    KeyCode::PageUp => "<pageup>",
                    KeyCode::PageDown => "<pagedown>",
                    KeyCode::Home => "<home>",
                    KeyCode::End => "<end>",
                    KeyCode::CapsLock => "<capslock>",
                    KeyCode::ScrollLock => "<scrolllock>",
                    KeyCode::NumLock => "<numlock>",
                    KeyCode::PrintScreen => "<printscreen>",
                    KeyCode::Pause => "<pause>",
                    _ => return Key::empty(),
                };

                token.into()
            },
        };

        Key::new(mods, token)
    }
}

impl From<MouseEvent> for Key {
    fn from(me: MouseEvent) -> Self {
        let token = match me.kind {
            MouseEventKind::Down(TermButton::Left) => "<lmouse>-click",
            MouseEventKind::Down(TermButton::Middle) => "<mmouse>-click",
            MouseEventKind::Down(TermButton::Right) => "<rmouse>-click",
            MouseEventKind::Drag(TermButton::Left) => "<lmouse>-hold",
            MouseEventKind::Drag(TermButton::Middle) => "<mmouse>-hold",
            MouseEventKind::Drag(TermButton::Right) => "<rmouse>-hold",
            MouseEventKind::ScrollUp => "<mouse-wheel-up>",
            MouseEventKind::ScrollDown => "<mouse-wheel-down>",
            _ => return Key::empty(),
        };

        let mut mods = Modifiers::empty();

        if me.modifiers.contains(KeyModifiers::CONTROL) {
            mods |= Modifiers::CONTROL;
        }

        if me.modifiers.contains(KeyModifiers::ALT) {
            mods |= Modifiers::ALT;
        }

        if me.modifiers.contains(KeyModifiers::SHIFT) {
            mods |= Modifiers::SHIFT;
        }

        Key::new(mods, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::is_known_token;
    use PhysicalKey::*;

    #[test]
    fn test_nothing_pressed() {
        let state = DeviceSnapshot::default().hold(LeftControl);

        assert!(resolve_key(&state).is_empty());
        assert!(resolve_mouse(&state).is_empty());
    }

    #[test]
    fn test_single_key() {
        let state = DeviceSnapshot::default().press(Letter('q'));
        assert_eq!(resolve_key(&state), Key::plain("q"));

        let state = DeviceSnapshot::default().press(Keypad(7));
        assert_eq!(resolve_key(&state), Key::plain("7"));

        let state = DeviceSnapshot::default().press(KeypadEnter);
        assert_eq!(resolve_key(&state), Key::plain("<enter>"));

        let state = DeviceSnapshot::default().press(F(11));
        assert_eq!(resolve_key(&state), Key::plain("<f11>"));

        let state = DeviceSnapshot::default().press(Apostrophe);
        assert_eq!(resolve_key(&state), Key::plain("'"));

        let state = DeviceSnapshot::default().press(Grave);
        assert_eq!(resolve_key(&state), Key::plain("`"));
    }

    #[test]
    fn test_modifiers_either_side() {
        let state = DeviceSnapshot::default().hold(RightControl).press(Letter('a'));
        assert_eq!(resolve_key(&state), Key::ctrl("a"));

        let state = DeviceSnapshot::default().hold(LeftControl).press(Letter('a'));
        assert_eq!(resolve_key(&state), Key::ctrl("a"));

        let state = DeviceSnapshot::default()
            .hold(LeftAlt)
            .hold(RightShift)
            .hold(LeftSuper)
            .press(Enter);
        let key = resolve_key(&state);
        assert_eq!(key.modifiers(), Modifiers::ALT | Modifiers::SHIFT | Modifiers::SUPER);
        assert_eq!(key.token(), "<enter>");
    }

    #[test]
    fn test_priority_order() {
        // Named keys come before letters.
        let state = DeviceSnapshot::default().press(Letter('a')).press(Enter);
        assert_eq!(resolve_key(&state), Key::plain("<enter>"));

        // The keypad comes before the digit row.
        let state = DeviceSnapshot::default().press(Digit(1)).press(Keypad(2));
        assert_eq!(resolve_key(&state), Key::plain("2"));

        // Earlier letters win.
        let state = DeviceSnapshot::default().press(Letter('z')).press(Letter('b'));
        assert_eq!(resolve_key(&state), Key::plain("b"));
    }

    #[test]
    fn test_order_tokens_known() {
        for (_, token) in resolution_order() {
            assert!(is_known_token(token), "{token:?} is not in the vocabulary");
        }

        assert_eq!(resolution_order().filter(|(pk, _)| matches!(pk, Letter(_))).count(), 26);
    }

    #[test]
    fn test_mouse() {
        let state = DeviceSnapshot::default().hold_button(MouseButton::Left);
        assert_eq!(resolve_mouse(&state), Key::plain("<lmouse>-hold"));

        // A click beats a hold.
        let state = DeviceSnapshot::default()
            .hold_button(MouseButton::Left)
            .click(MouseButton::Right);
        assert_eq!(resolve_mouse(&state), Key::plain("<rmouse>-click"));

        // Wheel motion overrides buttons.
        let state = DeviceSnapshot::default().click(MouseButton::Left).scroll(0.0, -1.0);
        assert_eq!(resolve_mouse(&state), Key::plain("<mouse-wheel-down>"));

        let state = DeviceSnapshot::default().scroll(0.0, 2.5);
        assert_eq!(resolve_mouse(&state), Key::plain("<mouse-wheel-up>"));

        // Horizontal motion alone isn't reported.
        let state = DeviceSnapshot::default().scroll(1.0, 0.0);
        assert!(resolve_mouse(&state).is_empty());

        let state = DeviceSnapshot::default().hold(LeftControl).click(MouseButton::Middle);
        assert_eq!(resolve_mouse(&state), Key::ctrl("<mmouse>-click"));
    }

    #[test]
    fn test_terminal_keys() {
        let ke = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(Key::from(ke), Key::ctrl("a"));

        let ke = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(Key::from(ke), Key::shift("a"));

        let ke = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE);
        assert_eq!(Key::from(ke), Key::shift("/"));

        let ke = KeyEvent::new(KeyCode::Char('/'), KeyModifiers::SHIFT);
        assert_eq!(Key::from(ke), Key::plain("/"));

        let ke = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(Key::from(ke), Key::plain("<space>"));

        let ke = KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL);
        assert_eq!(Key::from(ke), Key::ctrl("<enter>"));

        let ke = KeyEvent::new(KeyCode::BackTab, KeyModifiers::NONE);
        assert_eq!(Key::from(ke), Key::shift("<tab>"));

        let ke = KeyEvent::new(KeyCode::F(3), KeyModifiers::NONE);
        assert_eq!(Key::from(ke), Key::plain("<f3>"));

        let ke = KeyEvent::new(KeyCode::F(20), KeyModifiers::NONE);
        assert!(Key::from(ke).is_empty());

        let ke = KeyEvent::new(KeyCode::Char('é'), KeyModifiers::NONE);
        assert!(Key::from(ke).is_empty());
    }

    #[test]
    fn test_terminal_mouse() {
        let me = MouseEvent {
            kind: MouseEventKind::Down(TermButton::Left),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(Key::from(me), Key::plain("<lmouse>-click"));

        let me = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::CONTROL,
        };
        assert_eq!(Key::from(me), Key::ctrl("<mouse-wheel-down>"));

        let me = MouseEvent {
            kind: MouseEventKind::Moved,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert!(Key::from(me).is_empty());
    }
}
