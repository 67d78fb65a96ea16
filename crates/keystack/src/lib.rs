//! # keystack
//!
//! ## Overview
//!
//! This crate provides the input side of an interactive editor: a canonical [Key] type, the
//! resolution of raw device state into keys, and layered keymaps that decide which command a key
//! runs.
//!
//! Input flows through three steps each tick:
//!
//! * [resolve_key] and [resolve_mouse] read a [DeviceState] snapshot and produce at most one
//!   [Key] each (terminal front-ends can convert [crossterm] events with [From] instead)
//! * a [KeymapStack] looks the key up, starting at its most recently pushed [Keymap]
//! * the matched [Command] runs against the caller's context, and any error it returns is
//!   handed back to the caller
//!
//! ## Example
//!
//! ```
//! use keystack::{command, CommandFn, Dispatch, Key, Keymap, KeymapStack};
//!
//! #[derive(Default)]
//! struct Counter(usize);
//!
//! type Cmd = CommandFn<Counter, String>;
//!
//! let incr: Cmd = command(|c: &mut Counter| {
//!     c.0 += 1;
//!     Ok(())
//! });
//! let twice: Cmd = command(|c: &mut Counter| {
//!     c.0 += 2;
//!     Ok(())
//! });
//!
//! let mut stack = KeymapStack::new();
//! stack.push(Keymap::from_iter([(Key::plain("a"), incr)]));
//! let overrides = stack.push(Keymap::from_iter([(Key::plain("a"), twice)]));
//!
//! let mut counter = Counter::default();
//! let key: Key = "a".parse().unwrap();
//!
//! assert_eq!(stack.dispatch(&key, &mut counter), Ok(Dispatch::Executed));
//! assert_eq!(counter.0, 2);
//!
//! stack.remove(overrides);
//! assert_eq!(stack.dispatch(&key, &mut counter), Ok(Dispatch::Executed));
//! assert_eq!(counter.0, 3);
//!
//! assert_eq!(stack.dispatch(&Key::plain("b"), &mut counter), Ok(Dispatch::Unmapped));
//! ```

// Require docs for public APIs, and disable the more annoying clippy lints.
#![deny(missing_docs)]
#![allow(clippy::bool_to_int_with_if)]
#![allow(clippy::field_reassign_with_default)]
#![allow(clippy::len_without_is_empty)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::match_like_matches_macro)]
#![allow(clippy::needless_return)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]

pub mod key;
pub mod resolve;
pub mod stack;

pub use crossterm;

pub use self::key::{is_known_token, Key, KeyParseError, Modifiers};
pub use self::resolve::{
    resolve_key,
    resolve_mouse,
    DeviceSnapshot,
    DeviceState,
    MouseButton,
    PhysicalKey,
};
pub use self::stack::{command, Command, CommandFn, Dispatch, Keymap, KeymapId, KeymapStack};
