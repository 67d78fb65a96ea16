//! # Filter sources
//!
//! ## Overview
//!
//! Ready-made [FilterSource](crate::filter::FilterSource) implementations for the pickers an
//! editor usually offers, each committing its selection through an
//! [Editor](crate::editor::Editor).
//!
//! * [buffer_switcher] and [theme_switcher] fuzzy match the editor's open buffers and themes.
//! * [fuzzy_file_finder] fuzzy matches every file beneath a directory.
//! * [grep_finder] fuzzy matches the lines found by a regular expression search.
//! * [file_picker] completes paths on disk as they're typed.
pub mod files;
pub mod fuzzy;
pub mod grep;

pub use self::files::{
    file_picker,
    fuzzy_file_finder,
    list_files,
    FileFinder,
    FilePicker,
    PathItem,
};
pub use self::fuzzy::{
    buffer_switcher,
    theme_switcher,
    BufferItem,
    BufferSwitcher,
    FuzzySource,
    ThemeSwitcher,
};
pub use self::grep::{grep, grep_finder, GrepFinder, GrepLocation};
