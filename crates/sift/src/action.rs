//! # Filter actions
//!
//! ## Overview
//!
//! [FilterAction] lists everything that a key can make an interactive filter do. Keymaps bind
//! keys to these actions, and [InteractiveFilter](crate::filter::InteractiveFilter) carries them
//! out.
//!
//! Three keymaps are provided:
//!
//! * [base_keymap], for editing the input line, moving through the list and committing
//! * [insertion_keymap], for typing printable characters
//! * [file_picker_keymap], the overrides used when picking paths
use keystack::{Key, KeyParseError, Keymap};

/// Behaviour that can be bound to a key inside an interactive filter.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FilterAction {
    /// Type a character at the cursor.
    InsertChar(char),

    /// Move the cursor one character left.
    CursorLeft,

    /// Move the cursor one character right.
    CursorRight,

    /// Move the cursor to the start of the next word.
    NextWordStart,

    /// Move the cursor to the start of the previous word.
    PreviousWord,

    /// Move the cursor to the start of the input.
    BeginningOfLine,

    /// Move the cursor to the end of the input.
    EndOfLine,

    /// Delete the character before the cursor.
    DeleteCharBackward,

    /// Delete the character under the cursor.
    DeleteCharForward,

    /// Delete back to the start of the previous word.
    DeleteWordBackward,

    /// Delete forward to the end of the next word.
    DeleteWordForward,

    /// Copy the whole input.
    Copy,

    /// Copy the whole input and clear it.
    Cut,

    /// Insert the copied text at the cursor.
    Paste,

    /// Select the next item.
    NextItem,

    /// Select the previous item.
    PrevItem,

    /// Move the selection a page forward.
    PageDown,

    /// Move the selection a page backward.
    PageUp,

    /// Commit the selected item.
    OpenSelection,

    /// Commit the raw input instead of a list item.
    OpenInput,

    /// Complete the input from the available candidates.
    Complete,

    /// Close the filter without committing anything.
    Cancel,
}

/// The keymap shared by every filter.
pub fn base_keymap() -> Keymap<FilterAction> {
    use FilterAction::*;

    let bindings = [
        (Key::ctrl("f"), CursorRight),
        (Key::plain("<right>"), CursorRight),
        (Key::ctrl("b"), CursorLeft),
        (Key::plain("<left>"), CursorLeft),
        (Key::ctrl("<right>"), NextWordStart),
        (Key::ctrl("<left>"), PreviousWord),
        (Key::ctrl("a"), BeginningOfLine),
        (Key::plain("<home>"), BeginningOfLine),
        (Key::ctrl("e"), EndOfLine),
        (Key::plain("<end>"), EndOfLine),
        (Key::ctrl("v"), Paste),
        (Key::ctrl("c"), Copy),
        (Key::ctrl("x"), Cut),
        (Key::ctrl("p"), PrevItem),
        (Key::plain("<up>"), PrevItem),
        (Key::ctrl("n"), NextItem),
        (Key::plain("<down>"), NextItem),
        (Key::plain("<pageup>"), PageUp),
        (Key::plain("<pagedown>"), PageDown),
        (Key::plain("<mouse-wheel-up>"), PrevItem),
        (Key::plain("<mouse-wheel-down>"), NextItem),
        (Key::plain("<enter>"), OpenSelection),
        (Key::plain("<backspace>"), DeleteCharBackward),
        (Key::ctrl("<backspace>"), DeleteWordBackward),
        (Key::ctrl("d"), DeleteCharForward),
        (Key::plain("<delete>"), DeleteCharForward),
        (Key::alt("d"), DeleteWordForward),
        (Key::ctrl("g"), Cancel),
        (Key::plain("<esc>"), Cancel),
    ];

    Keymap::from_iter(bindings)
}

const SHIFTED: [(char, char); 21] = [
    ('`', '~'),
    ('1', '!'),
    ('2', '@'),
    ('3', '#'),
    ('4', '$'),
    ('5', '%'),
    ('6', '^'),
    ('7', '&'),
    ('8', '*'),
    ('9', '('),
    ('0', ')'),
    ('-', '_'),
    ('=', '+'),
    ('[', '{'),
    (']', '}'),
    ('\\', '|'),
    (';', ':'),
    ('\'', '"'),
    (',', '<'),
    ('.', '>'),
    ('/', '?'),
];

/// The keymap that types printable characters into the input.
///
/// Shifted letters type upper-case letters, and shifted digits and punctuation type the symbols
/// found above them on a US keyboard.
pub fn insertion_keymap() -> Keymap<FilterAction> {
    let mut keymap = Keymap::new();

    for c in 'a'..='z' {
        keymap.bind(Key::plain(c), FilterAction::InsertChar(c));
        keymap.bind(Key::shift(c), FilterAction::InsertChar(c.to_ascii_uppercase()));
    }

    for (base, shifted) in SHIFTED {
        keymap.bind(Key::plain(base), FilterAction::InsertChar(base));
        keymap.bind(Key::shift(base), FilterAction::InsertChar(shifted));
    }

    // Keypad-only symbols.
    keymap.bind(Key::plain('*'), FilterAction::InsertChar('*'));
    keymap.bind(Key::plain('+'), FilterAction::InsertChar('+'));

    keymap.bind(Key::plain("<space>"), FilterAction::InsertChar(' '));
    keymap.bind(Key::shift("<space>"), FilterAction::InsertChar(' '));

    return keymap;
}

/// Overrides for filters that pick paths: `C-<enter>` opens the typed path, and `<tab>`
/// completes it.
pub fn file_picker_keymap() -> Keymap<FilterAction> {
    Keymap::from_iter([
        (Key::ctrl("<enter>"), FilterAction::OpenInput),
        (Key::plain("<tab>"), FilterAction::Complete),
    ])
}

/// Build a keymap from textual key notation, such as `("C-j", FilterAction::NextItem)`.
pub fn keymap_from_notation<'a, I>(bindings: I) -> Result<Keymap<FilterAction>, KeyParseError>
where
    I: IntoIterator<Item = (&'a str, FilterAction)>,
{
    let mut keymap = Keymap::new();

    for (key, action) in bindings {
        keymap.bind(key.parse()?, action);
    }

    Ok(keymap)
}
