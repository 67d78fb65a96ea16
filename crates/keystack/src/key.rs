//! # Keys
//!
//! ## Overview
//!
//! A [Key] is a set of held [Modifiers] plus a symbolic token naming what was pressed, such as
//! `"a"`, `"<enter>"` or `"<lmouse>-click"`. The tokens are fixed strings so that keybindings
//! written for one input backend keep working with another.
//!
//! Keys can be written down using a small notation: any number of `C-` (control), `A-` (alt),
//! `S-` (shift) and `D-` (super) prefixes followed by a token.
//!
//! ```
//! use keystack::{Key, Modifiers};
//!
//! let key: Key = "C-<enter>".parse().unwrap();
//! assert_eq!(key, Key::new(Modifiers::CONTROL, "<enter>"));
//! assert_eq!(key.to_string(), "C-<enter>");
//! ```
use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{anychar, char},
    combinator::{eof, opt, recognize, value},
    multi::fold_many0,
    sequence::tuple,
    IResult,
};

bitflags! {
    /// Modifier keys held while a [Key] was produced.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct Modifiers: u8 {
        /// Either control key.
        const CONTROL = 0b0001;

        /// Either alt key.
        const ALT = 0b0010;

        /// Either shift key.
        const SHIFT = 0b0100;

        /// Either super key.
        const SUPER = 0b1000;
    }
}

/// Tokens for the named, non-character keys.
pub const NAMED_TOKENS: &[&str] = &[
    "<space>",
    "<esc>",
    "<enter>",
    "<tab>",
    "<backspace>",
    "<insert>",
    "<delete>",
    "<right>",
    "<left>",
    "<down>",
    "<up>",
    "<pageup>",
    "<pagedown>",
    "<home>",
    "<end>",
    "<capslock>",
    "<scrolllock>",
    "<numlock>",
    "<printscreen>",
    "<pause>",
    "<f1>",
    "<f2>",
    "<f3>",
    "<f4>",
    "<f5>",
    "<f6>",
    "<f7>",
    "<f8>",
    "<f9>",
    "<f10>",
    "<f11>",
    "<f12>",
];

/// Tokens produced by mouse buttons and the scroll wheel.
pub const MOUSE_TOKENS: &[&str] = &[
    "<lmouse>-click",
    "<mmouse>-click",
    "<rmouse>-click",
    "<lmouse>-hold",
    "<mmouse>-hold",
    "<rmouse>-hold",
    "<mouse-wheel-up>",
    "<mouse-wheel-down>",
];

/// Punctuation that is its own token. `*` and `+` are only produced by the keypad.
pub const PUNCTUATION: &str = "`',-./;=[]\\*+";

/// Check whether `token` belongs to the key vocabulary.
pub fn is_known_token(token: &str) -> bool {
    let mut chars = token.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_ascii_lowercase() || c.is_ascii_digit() || PUNCTUATION.contains(c),
        (Some('<'), Some(_)) => NAMED_TOKENS.contains(&token) || MOUSE_TOKENS.contains(&token),
        _ => false,
    }
}

/// Errors from parsing the textual key notation.
#[derive(thiserror::Error, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum KeyParseError {
    /// The key string was empty.
    #[error("Empty key string")]
    Empty,

    /// The key string could not be parsed.
    #[error("Invalid key string: {0:?}")]
    Invalid(String),

    /// The key string named a token outside the vocabulary.
    #[error("Unknown key token: {0:?}")]
    UnknownToken(String),
}

/// A canonical key event: modifiers plus a symbolic token.
///
/// The empty key (an empty token) stands for "nothing happened this tick", and never matches a
/// keymap entry.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Key {
    modifiers: Modifiers,
    token: String,
}

impl Key {
    /// Create a new key.
    pub fn new(modifiers: Modifiers, token: impl Into<String>) -> Self {
        Key { modifiers, token: token.into() }
    }

    /// Create a key with no modifiers held.
    pub fn plain(token: impl Into<String>) -> Self {
        Key::new(Modifiers::empty(), token)
    }

    /// Create a key with control held.
    pub fn ctrl(token: impl Into<String>) -> Self {
        Key::new(Modifiers::CONTROL, token)
    }

    /// Create a key with alt held.
    pub fn alt(token: impl Into<String>) -> Self {
        Key::new(Modifiers::ALT, token)
    }

    /// Create a key with shift held.
    pub fn shift(token: impl Into<String>) -> Self {
        Key::new(Modifiers::SHIFT, token)
    }

    /// The key that represents "no event".
    pub fn empty() -> Self {
        Key::default()
    }

    /// Whether this is the empty key.
    pub fn is_empty(&self) -> bool {
        self.token.is_empty()
    }

    /// The symbolic token.
    pub fn token(&self) -> &str {
        self.token.as_str()
    }

    /// The held modifiers.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Whether control was held.
    pub fn control(&self) -> bool {
        self.modifiers.contains(Modifiers::CONTROL)
    }

    /// Whether alt was held.
    pub fn alt_held(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Whether shift was held.
    pub fn shift_held(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Whether super was held.
    pub fn super_held(&self) -> bool {
        self.modifiers.contains(Modifiers::SUPER)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.control() {
            f.write_str("C-")?;
        }

        if self.alt_held() {
            f.write_str("A-")?;
        }

        if self.shift_held() {
            f.write_str("S-")?;
        }

        if self.super_held() {
            f.write_str("D-")?;
        }

        f.write_str(&self.token)
    }
}

fn parse_modifier(input: &str) -> IResult<&str, Modifiers> {
    alt((
        value(Modifiers::CONTROL, tag("C-")),
        value(Modifiers::ALT, tag("A-")),
        value(Modifiers::SHIFT, tag("S-")),
        value(Modifiers::SUPER, tag("D-")),
    ))(input)
}

fn parse_named(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        char('<'),
        take_while1(|c| c != '>'),
        char('>'),
        opt(alt((tag("-click"), tag("-hold")))),
    )))(input)
}

fn parse_token(input: &str) -> IResult<&str, &str> {
    alt((parse_named, recognize(anychar)))(input)
}

fn parse_key(input: &str) -> IResult<&str, (Modifiers, &str)> {
    let (input, mods) = fold_many0(parse_modifier, Modifiers::empty, |acc, m| acc | m)(input)?;
    let (input, token) = parse_token(input)?;
    let (input, _) = eof(input)?;

    Ok((input, (mods, token)))
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() {
            return Err(KeyParseError::Empty);
        }

        let (mods, token) = match parse_key(input) {
            Ok((_, res)) => res,
            Err(_) => return Err(KeyParseError::Invalid(input.to_string())),
        };

        if !is_known_token(token) {
            return Err(KeyParseError::UnknownToken(token.to_string()));
        }

        Ok(Key::new(mods, token))
    }
}
