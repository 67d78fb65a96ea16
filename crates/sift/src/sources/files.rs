//! # File sources
//!
//! ## Overview
//!
//! Two ways of picking a file:
//!
//! * [fuzzy_file_finder] lists every file beneath a directory once, and then fuzzy matches the
//!   query against their relative paths. Hidden files and anything excluded by `.gitignore` or
//!   `.ignore` files are skipped.
//! * [file_picker] treats the query as the start of a path, and lists whatever exists on disk
//!   with that prefix. `<tab>` completes the query, and `C-<enter>` opens the query as typed,
//!   which allows creating files that don't exist yet.
use std::marker::PhantomData;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use ignore::WalkBuilder;
use unicode_segmentation::UnicodeSegmentation;

use crate::action::{file_picker_keymap, FilterAction};
use crate::config::FilterConfig;
use crate::editor::Editor;
use crate::errors::FilterResult;
use crate::filter::{FilterSource, InteractiveFilter};
use crate::input::UserInput;
use crate::list::ListComponent;
use crate::sources::fuzzy::FuzzySource;

use keystack::Keymap;

/// List the files beneath `root`, as paths relative to it, in sorted order.
pub fn list_files(root: &Path) -> FilterResult<Vec<String>> {
    // Fail early for a missing root, rather than walking nothing.
    let _ = std::fs::metadata(root)?;

    let mut files = Vec::new();

    for entry in WalkBuilder::new(root).require_git(false).build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(root = %root.display(), "skipping unreadable entry: {e}");
                continue;
            },
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        if let Ok(rel) = entry.path().strip_prefix(root) {
            files.push(rel.to_string_lossy().into_owned());
        }
    }

    files.sort();

    tracing::debug!(root = %root.display(), files = files.len(), "listed files");

    return Ok(files);
}

/// A filter over every file beneath a directory.
pub type FileFinder<E> = InteractiveFilter<FuzzySource<String, E>>;

/// Create a filter that fuzzy matches the files beneath `root`.
///
/// Opening a file also closes the prompt.
pub fn fuzzy_file_finder<E>(root: &Path, config: &FilterConfig) -> FilterResult<FileFinder<E>>
where
    E: Editor + 'static,
{
    let files = list_files(root)?;
    let root = root.to_path_buf();

    let repr = |file: &String| file.clone();
    let source = FuzzySource::new(files, config, repr, move |editor: &mut E, file| {
        editor.open_file(&root.join(file), None)?;
        editor.close_prompt();

        Ok(())
    })
    .on_cancel(|editor: &mut E| {
        editor.close_prompt();

        Ok(())
    });

    Ok(InteractiveFilter::new(source, config.clone()))
}

/// A path on disk, as listed by the [FilePicker].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathItem {
    /// The path, as it would be typed.
    pub path: PathBuf,

    /// Whether the path is a directory.
    pub is_dir: bool,
}

impl PathItem {
    fn new(path: PathBuf) -> Self {
        let is_dir = path.is_dir();

        PathItem { path, is_dir }
    }

    /// The path as text, with a trailing separator for directories.
    pub fn text(&self) -> String {
        let mut text = self.path.to_string_lossy().into_owned();

        if self.is_dir && !text.ends_with(MAIN_SEPARATOR) {
            text.push(MAIN_SEPARATOR);
        }

        return text;
    }
}

/// Find the paths that start with `prefix`, in sorted order.
fn expand(prefix: &str) -> FilterResult<Vec<PathItem>> {
    let pattern = format!("{prefix}*");
    let mut paths = Vec::new();

    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) => paths.push(PathItem::new(path)),
            Err(e) => tracing::debug!("skipping unreadable path: {e}"),
        }
    }

    Ok(paths)
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .graphemes(true)
        .zip(b.graphemes(true))
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len())
        .sum();

    &a[..len]
}

/// Lists the paths on disk that start with the query.
pub struct FilePicker<E> {
    _editor: PhantomData<fn(&mut E)>,
}

impl<E> FilePicker<E> {
    /// Create a new path source.
    pub fn new() -> Self {
        FilePicker { _editor: PhantomData }
    }
}

impl<E> Default for FilePicker<E> {
    fn default() -> Self {
        FilePicker::new()
    }
}

impl<E: Editor> FilterSource for FilePicker<E> {
    type Item = PathItem;
    type Context = E;

    fn update(&mut self, list: &mut ListComponent<PathItem>, input: &str) {
        match expand(input) {
            Ok(paths) => list.set_items(paths),
            Err(e) => {
                tracing::warn!(input, "keeping previous paths: {e}");
            },
        }
    }

    fn repr(&self, item: &PathItem) -> String {
        item.text()
    }

    fn open(&mut self, editor: &mut E, item: &PathItem) -> FilterResult<()> {
        editor.open_file(&item.path, None)?;
        editor.close_prompt();

        Ok(())
    }

    fn open_input(&mut self, editor: &mut E, input: &str) -> FilterResult<()> {
        editor.open_file(Path::new(input), None)?;
        editor.close_prompt();

        Ok(())
    }

    /// Complete a unique match in full, or extend the query to the longest prefix shared by
    /// every match.
    fn complete(&mut self, input: &mut UserInput) -> FilterResult<()> {
        let paths = match expand(input.text()) {
            Ok(paths) => paths,
            Err(e) => {
                tracing::debug!("nothing to complete: {e}");
                return Ok(());
            },
        };

        let completion = match paths.as_slice() {
            [] => return Ok(()),
            [only] => only.text(),
            [first, rest @ ..] => {
                let first = first.path.to_string_lossy().into_owned();
                let mut prefix = first.as_str();

                for path in rest {
                    prefix = common_prefix(prefix, &path.path.to_string_lossy());
                }

                prefix.to_string()
            },
        };

        if completion.len() > input.text().len() && completion.starts_with(input.text()) {
            input.set_input(completion);
        }

        Ok(())
    }

    fn cancel(&mut self, editor: &mut E) -> FilterResult<()> {
        editor.close_prompt();

        Ok(())
    }

    fn keymap(&self) -> Option<Keymap<FilterAction>> {
        Some(file_picker_keymap())
    }
}

/// Create a filter that picks paths starting from `dir`, or the working directory.
///
/// The query starts out as the directory's absolute path with a trailing separator, so that its
/// contents are listed right away.
pub fn file_picker<E: Editor>(
    dir: Option<&Path>,
    config: &FilterConfig,
) -> FilterResult<InteractiveFilter<FilePicker<E>>> {
    let dir = match dir {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => std::env::current_dir()?.join(dir),
        None => std::env::current_dir()?,
    };

    let initial = PathItem::new(dir).text();
    let mut filter = InteractiveFilter::new(FilePicker::new(), config.clone());
    filter.set_input(initial);

    Ok(filter)
}
