//! # sift
//!
//! ## Overview
//!
//! This crate provides incremental, keyboard-driven filters for editors: a query line that the
//! user types into, and a list of candidates beneath it that's narrowed down and re-ranked as
//! the query changes.
//!
//! The pieces are:
//!
//! * [UserInput], the editable query line
//! * [ListComponent], the candidate list with a selection and a scrolling viewport
//! * [FuzzyScorer], which ranks candidates against the query
//! * [InteractiveFilter], which ties these together and dispatches keys through a
//!   [keystack::KeymapStack] of [FilterAction] keymaps
//!
//! The [sources] module contains ready-made filters for switching buffers and themes, finding
//! and picking files, and jumping to search results. They commit their selections through the
//! [Editor] trait.
//!
//! ## Example
//!
//! ```
//! use sift::{keystack::Key, FilterConfig, FuzzySource, InteractiveFilter};
//!
//! let items = vec!["readme.md".to_string(), "main.go".into(), "reader.go".into()];
//! let config = FilterConfig::default();
//! let source = FuzzySource::new(items, &config, |s| s.clone(), |opened: &mut Vec<String>, s| {
//!     opened.push(s.clone());
//!     Ok(())
//! });
//!
//! let mut filter = InteractiveFilter::new(source, config);
//! let mut opened = vec![];
//!
//! for key in ["r", "e", "<down>", "<enter>"] {
//!     let key: Key = key.parse().unwrap();
//!     filter.tick(&key, &mut opened).unwrap();
//! }
//!
//! assert_eq!(opened, vec!["reader.go"]);
//! assert_eq!(filter.view(5).rows, vec!["readme.md", "reader.go"]);
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

pub mod action;
pub mod clipboard;
pub mod config;
pub mod editor;
pub mod errors;
pub mod filter;
pub mod input;
pub mod list;
pub mod score;
pub mod sources;

pub use keystack;

pub use self::action::{
    base_keymap,
    file_picker_keymap,
    insertion_keymap,
    keymap_from_notation,
    FilterAction,
};
pub use self::clipboard::ClipboardRegister;
pub use self::config::{CursorShape, FilterConfig, ScoringConfig};
pub use self::editor::{Editor, Location};
pub use self::errors::{FilterError, FilterResult};
pub use self::filter::{FilterSource, FilterState, FilterTarget, FilterView, InteractiveFilter};
pub use self::input::UserInput;
pub use self::list::ListComponent;
pub use self::score::{FuzzyScorer, ScoredItem};
pub use self::sources::FuzzySource;
