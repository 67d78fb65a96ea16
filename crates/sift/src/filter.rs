//! # Interactive filters
//!
//! ## Overview
//!
//! An [InteractiveFilter] combines a [UserInput] query line, a [ListComponent] of candidates,
//! and a [FilterSource] that knows how to produce candidates for a query and what to do with the
//! one the user picks.
//!
//! Keys are dispatched through a [KeymapStack] of [FilterAction] keymaps. Every filter starts
//! with [base_keymap] at the bottom, [insertion_keymap] above it, and then the source's own
//! overrides on top, if it has any. Further keymaps can be pushed by the application.
//!
//! ## Refreshing
//!
//! The candidate list is only rebuilt when the query text differs from the one it was last
//! built for. Any number of edits between two calls to [InteractiveFilter::refresh] result in
//! at most one call to [FilterSource::update]. The first refresh always updates the list, even
//! for an empty query.
//!
//! ## Example
//!
//! ```
//! use sift::{
//!     filter::{FilterSource, InteractiveFilter},
//!     keystack::Key,
//!     FilterConfig,
//!     FilterResult,
//!     ListComponent,
//! };
//!
//! struct Words(Vec<&'static str>);
//!
//! impl FilterSource for Words {
//!     type Item = &'static str;
//!     type Context = Vec<&'static str>;
//!
//!     fn update(&mut self, list: &mut ListComponent<&'static str>, input: &str) {
//!         let items = self.0.iter().copied().filter(|w| w.starts_with(input)).collect();
//!         list.set_items(items);
//!     }
//!
//!     fn repr(&self, item: &&'static str) -> String {
//!         item.to_string()
//!     }
//!
//!     fn open(&mut self, picked: &mut Self::Context, item: &&'static str) -> FilterResult<()> {
//!         picked.push(*item);
//!         Ok(())
//!     }
//! }
//!
//! let words = Words(vec!["apple", "banana", "blueberry"]);
//! let mut filter = InteractiveFilter::new(words, FilterConfig::default());
//! let mut picked = vec![];
//!
//! filter.tick(&Key::plain("b"), &mut picked).unwrap();
//! filter.tick(&Key::plain("<down>"), &mut picked).unwrap();
//! filter.tick(&Key::plain("<enter>"), &mut picked).unwrap();
//!
//! assert_eq!(picked, vec!["blueberry"]);
//! ```
use keystack::{Command, Dispatch, Key, Keymap, KeymapId, KeymapStack};

use crate::action::{base_keymap, insertion_keymap, FilterAction};
use crate::config::{CursorShape, FilterConfig};
use crate::errors::{FilterError, FilterResult};
use crate::input::UserInput;
use crate::list::ListComponent;

/// Produces the candidates for an [InteractiveFilter], and acts on the one that gets picked.
pub trait FilterSource {
    /// The candidates shown in the list.
    type Item;

    /// What committing a candidate acts upon.
    type Context;

    /// Rebuild the list for a new query.
    ///
    /// This is only called when the query has changed since the last update.
    fn update(&mut self, list: &mut ListComponent<Self::Item>, input: &str);

    /// How an item is displayed.
    fn repr(&self, item: &Self::Item) -> String;

    /// Commit the selected item.
    fn open(&mut self, ctx: &mut Self::Context, item: &Self::Item) -> FilterResult<()>;

    /// Commit the raw query text instead of a list item.
    fn open_input(&mut self, _: &mut Self::Context, _: &str) -> FilterResult<()> {
        Err(FilterError::Unsupported("opening the typed input"))
    }

    /// Complete the query text in place.
    fn complete(&mut self, _: &mut UserInput) -> FilterResult<()> {
        Ok(())
    }

    /// Close the filter without committing anything.
    fn cancel(&mut self, _: &mut Self::Context) -> FilterResult<()> {
        Ok(())
    }

    /// Bindings that take precedence over the default keymaps.
    fn keymap(&self) -> Option<Keymap<FilterAction>> {
        None
    }
}

/// The state of an [InteractiveFilter], without its keymaps.
pub struct FilterState<S: FilterSource> {
    input: UserInput,
    list: ListComponent<S::Item>,
    last_input: Option<String>,
    source: S,
    config: FilterConfig,
}

impl<S: FilterSource> FilterState<S> {
    fn new(source: S, config: FilterConfig) -> Self {
        FilterState {
            input: UserInput::new(),
            list: ListComponent::default(),
            last_input: None,
            source,
            config,
        }
    }

    fn is_stale(&self) -> bool {
        self.last_input.as_deref() != Some(self.input.text())
    }

    fn refresh(&mut self) -> bool {
        if !self.is_stale() {
            return false;
        }

        let input = self.input.text().to_string();
        tracing::trace!(input = %input, "refreshing filter");

        self.source.update(&mut self.list, &input);
        self.last_input = Some(input);

        return true;
    }

    /// Carry out a single action.
    pub fn execute(&mut self, action: FilterAction, ctx: &mut S::Context) -> FilterResult<()> {
        match action {
            FilterAction::InsertChar(c) => self.input.insert_char(c),
            FilterAction::CursorLeft => self.input.cursor_left(1),
            FilterAction::CursorRight => self.input.cursor_right(1),
            FilterAction::NextWordStart => self.input.next_word_start(),
            FilterAction::PreviousWord => self.input.previous_word(),
            FilterAction::BeginningOfLine => self.input.beginning_of_line(),
            FilterAction::EndOfLine => self.input.end_of_line(),
            FilterAction::DeleteCharBackward => self.input.delete_char_backward(),
            FilterAction::DeleteCharForward => self.input.delete_char_forward(),
            FilterAction::DeleteWordBackward => self.input.delete_word_backward(),
            FilterAction::DeleteWordForward => self.input.delete_word_forward(),
            FilterAction::Copy => self.input.copy()?,
            FilterAction::Cut => self.input.cut()?,
            FilterAction::Paste => self.input.paste()?,
            FilterAction::NextItem => self.list.next_item(),
            FilterAction::PrevItem => self.list.prev_item(),
            FilterAction::PageDown => self.list.page_down(self.config.page_size),
            FilterAction::PageUp => self.list.page_up(self.config.page_size),
            FilterAction::OpenSelection => {
                // Commit against the list for the current query.
                self.refresh();

                let Some(item) = self.list.selected() else {
                    tracing::debug!("nothing selected to open");
                    return Ok(());
                };

                tracing::debug!(item = %self.source.repr(item), "opening selection");
                self.source.open(ctx, item)?;
            },
            FilterAction::OpenInput => {
                let input = self.input.text().to_string();

                tracing::debug!(input = %input, "opening typed input");
                self.source.open_input(ctx, &input)?;
            },
            FilterAction::Complete => self.source.complete(&mut self.input)?,
            FilterAction::Cancel => self.source.cancel(ctx)?,
        }

        Ok(())
    }
}

/// The context that [FilterAction] commands run against.
pub struct FilterTarget<'a, S: FilterSource> {
    state: &'a mut FilterState<S>,
    ctx: &'a mut S::Context,
}

impl<'a, S: FilterSource> Command<FilterTarget<'a, S>> for FilterAction {
    type Error = FilterError;

    fn execute(&self, target: &mut FilterTarget<'a, S>) -> FilterResult<()> {
        target.state.execute(*self, target.ctx)
    }
}

/// What a host needs to draw a filter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FilterView<'a> {
    /// The query text.
    pub input: &'a str,

    /// The cursor position within the query, in characters.
    pub cursor: usize,

    /// The display column of the cursor.
    pub cursor_column: usize,

    /// How to draw the cursor.
    pub cursor_shape: CursorShape,

    /// The visible items, top to bottom.
    pub rows: Vec<String>,

    /// Which of the rows is selected, if any.
    pub selected_row: Option<usize>,
}

/// An incremental, keyboard-driven filter over a [FilterSource].
pub struct InteractiveFilter<S: FilterSource> {
    keymaps: KeymapStack<FilterAction>,
    state: FilterState<S>,
}

impl<S: FilterSource> InteractiveFilter<S> {
    /// Create a filter over `source` with an empty query.
    pub fn new(source: S, config: FilterConfig) -> Self {
        let mut keymaps = KeymapStack::new();
        keymaps.push(base_keymap());
        keymaps.push(insertion_keymap());

        if let Some(overrides) = source.keymap() {
            keymaps.push(overrides);
        }

        InteractiveFilter { keymaps, state: FilterState::new(source, config) }
    }

    /// The query line.
    pub fn input(&self) -> &UserInput {
        &self.state.input
    }

    /// Mutable access to the query line.
    pub fn input_mut(&mut self) -> &mut UserInput {
        &mut self.state.input
    }

    /// Replace the query text, leaving the cursor at its end.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.input.set_input(text);
    }

    /// The candidate list.
    pub fn list(&self) -> &ListComponent<S::Item> {
        &self.state.list
    }

    /// The source of candidates.
    pub fn source(&self) -> &S {
        &self.state.source
    }

    /// Mutable access to the source of candidates.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.state.source
    }

    /// The keymaps that keys are dispatched through.
    pub fn keymaps(&self) -> &KeymapStack<FilterAction> {
        &self.keymaps
    }

    /// Push a keymap whose bindings override every keymap already on the stack.
    pub fn push_keymap(&mut self, keymap: Keymap<FilterAction>) -> KeymapId {
        self.keymaps.push(keymap)
    }

    /// Remove the topmost keymap.
    pub fn pop_keymap(&mut self) -> Option<Keymap<FilterAction>> {
        self.keymaps.pop()
    }

    /// Remove a previously pushed keymap.
    pub fn remove_keymap(&mut self, id: KeymapId) -> Option<Keymap<FilterAction>> {
        self.keymaps.remove(id)
    }

    /// Whether the query has changed since the list was last rebuilt.
    pub fn is_stale(&self) -> bool {
        self.state.is_stale()
    }

    /// Rebuild the list if the query has changed since the last rebuild.
    ///
    /// Returns whether the list was rebuilt.
    pub fn refresh(&mut self) -> bool {
        self.state.refresh()
    }

    /// Dispatch a key through the keymap stack.
    ///
    /// Keys that aren't bound anywhere are ignored. The list isn't rebuilt until the next
    /// [refresh](InteractiveFilter::refresh).
    pub fn handle_key(&mut self, key: &Key, ctx: &mut S::Context) -> FilterResult<Dispatch> {
        let mut target = FilterTarget { state: &mut self.state, ctx };

        self.keymaps.dispatch(key, &mut target)
    }

    /// Carry out an action directly, without going through the keymaps.
    pub fn execute(&mut self, action: FilterAction, ctx: &mut S::Context) -> FilterResult<()> {
        self.state.execute(action, ctx)
    }

    /// Handle one key, and then refresh the list.
    ///
    /// The list is refreshed even when the key's action fails, and the failure is then
    /// returned.
    pub fn tick(&mut self, key: &Key, ctx: &mut S::Context) -> FilterResult<Dispatch> {
        let res = self.handle_key(key, ctx);
        self.refresh();

        return res;
    }

    /// Describe what should be drawn, given room for `max_lines` list rows.
    ///
    /// This scrolls the list so that the selection is visible.
    pub fn view(&mut self, max_lines: usize) -> FilterView<'_> {
        let state = &mut self.state;
        let source = &state.source;
        let rows = state.list.visible_view(max_lines).map(|item| source.repr(item)).collect();
        let selected_row = if max_lines == 0 { None } else { state.list.selected_row() };

        FilterView {
            input: state.input.text(),
            cursor: state.input.cursor(),
            cursor_column: state.input.cursor_column(),
            cursor_shape: state.config.cursor_shape,
            rows,
            selected_row,
        }
    }
}
