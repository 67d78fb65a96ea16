//! # Fuzzy-matched sources
//!
//! ## Overview
//!
//! [FuzzySource] filters a fixed set of items by fuzzy matching the query against each item's
//! display text. The functions in this module build the usual editor pickers on top of it.
use std::fmt::{self, Display};

use crate::config::FilterConfig;
use crate::editor::Editor;
use crate::errors::FilterResult;
use crate::filter::{FilterSource, InteractiveFilter};
use crate::list::ListComponent;
use crate::score::{FuzzyScorer, ScoredItem};

type ReprFn<T> = Box<dyn Fn(&T) -> String>;
type OpenFn<C, T> = Box<dyn FnMut(&mut C, &T) -> FilterResult<()>>;
type CancelFn<C> = Box<dyn FnMut(&mut C) -> FilterResult<()>>;

/// A source over a fixed set of items, ranked by how well they fuzzy match the query.
pub struct FuzzySource<T, C> {
    items: Vec<T>,
    scorer: FuzzyScorer,
    repr: ReprFn<T>,
    open: OpenFn<C, T>,
    cancel: Option<CancelFn<C>>,
}

impl<T, C> FuzzySource<T, C>
where
    T: Clone + 'static,
    C: 'static,
{
    /// Create a source over `items`.
    ///
    /// `repr` gives the text that queries are matched against, and `open` commits a selected
    /// item.
    pub fn new<R, O>(items: Vec<T>, config: &FilterConfig, repr: R, open: O) -> Self
    where
        R: Fn(&T) -> String + 'static,
        O: FnMut(&mut C, &T) -> FilterResult<()> + 'static,
    {
        FuzzySource {
            items,
            scorer: FuzzyScorer::new(&config.scoring),
            repr: Box::new(repr),
            open: Box::new(open),
            cancel: None,
        }
    }

    /// Run `f` when the filter is cancelled.
    pub fn on_cancel<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut C) -> FilterResult<()> + 'static,
    {
        self.cancel = Some(Box::new(f));
        self
    }

    /// The unfiltered items, in their original order.
    pub fn items(&self) -> &[T] {
        self.items.as_slice()
    }
}

impl<T: Clone, C> FilterSource for FuzzySource<T, C> {
    type Item = ScoredItem<T>;
    type Context = C;

    fn update(&mut self, list: &mut ListComponent<ScoredItem<T>>, input: &str) {
        let FuzzySource { items, scorer, repr, .. } = self;

        list.set_items(scorer.rescore(items, input, |item| repr(item)));
    }

    fn repr(&self, item: &ScoredItem<T>) -> String {
        (self.repr)(&item.item)
    }

    fn open(&mut self, ctx: &mut C, item: &ScoredItem<T>) -> FilterResult<()> {
        (self.open)(ctx, &item.item)
    }

    fn cancel(&mut self, ctx: &mut C) -> FilterResult<()> {
        match &mut self.cancel {
            Some(f) => f(ctx),
            None => Ok(()),
        }
    }
}

/// An open buffer, as listed by the buffer switcher.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BufferItem<Id> {
    /// The buffer's identifier.
    pub id: Id,

    /// The buffer's display name.
    pub name: String,
}

impl<Id> Display for BufferItem<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A filter that switches to one of the editor's open buffers.
pub type BufferSwitcher<E> = InteractiveFilter<FuzzySource<BufferItem<<E as Editor>::BufferId>, E>>;

/// A filter that switches the editor's theme.
pub type ThemeSwitcher<E> = InteractiveFilter<FuzzySource<String, E>>;

fn close<E: Editor>(editor: &mut E) -> FilterResult<()> {
    editor.close_prompt();

    Ok(())
}

/// Create a filter over the editor's open buffers.
pub fn buffer_switcher<E>(editor: &E, config: &FilterConfig) -> BufferSwitcher<E>
where
    E: Editor + 'static,
    E::BufferId: 'static,
{
    let items = editor
        .buffers()
        .into_iter()
        .map(|(id, name)| BufferItem { id, name })
        .collect();

    let repr = |item: &BufferItem<E::BufferId>| item.name.clone();
    let source = FuzzySource::new(items, config, repr, |editor: &mut E, item| {
        editor.activate_buffer(&item.id)?;
        editor.close_prompt();

        Ok(())
    });

    InteractiveFilter::new(source.on_cancel(close), config.clone())
}

/// Create a filter over the editor's themes.
pub fn theme_switcher<E>(editor: &E, config: &FilterConfig) -> ThemeSwitcher<E>
where
    E: Editor + 'static,
{
    let repr = |name: &String| name.clone();
    let source = FuzzySource::new(editor.themes(), config, repr, |editor: &mut E, name| {
        editor.set_theme(name)?;
        editor.close_prompt();

        Ok(())
    });

    InteractiveFilter::new(source.on_cancel(close), config.clone())
}
