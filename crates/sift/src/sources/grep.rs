//! # Search results
//!
//! [grep] searches the files beneath a directory for a regular expression, and [grep_finder]
//! lets the user fuzzy filter the matching lines and jump to one of them.
use std::fmt::{self, Display};
use std::path::Path;

use regex::Regex;

use crate::config::FilterConfig;
use crate::editor::{Editor, Location};
use crate::errors::FilterResult;
use crate::filter::InteractiveFilter;
use crate::sources::files::list_files;
use crate::sources::fuzzy::FuzzySource;

/// A line that matched a search.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GrepLocation {
    /// The file, relative to the search root.
    pub filename: String,

    /// Where the first match on the line starts.
    pub location: Location,

    /// The matching line, without surrounding whitespace.
    pub text: String,
}

impl Display for GrepLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Location { line, column } = self.location;

        write!(f, "{}:{line}:{column}: {}", self.filename, self.text)
    }
}

/// Search every file beneath `root` for lines matching `pattern`.
///
/// Files that can't be read as UTF-8 text are skipped.
pub fn grep(root: &Path, pattern: &str) -> FilterResult<Vec<GrepLocation>> {
    let regex = Regex::new(pattern)?;
    let mut results = vec![];

    for filename in list_files(root)? {
        let contents = match std::fs::read_to_string(root.join(&filename)) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!(filename = %filename, "skipping file: {e}");
                continue;
            },
        };

        for (idx, line) in contents.lines().enumerate() {
            let Some(m) = regex.find(line) else {
                continue;
            };

            let column = line[..m.start()].chars().count() + 1;
            let location = Location { line: idx + 1, column };
            let text = line.trim().to_string();

            results.push(GrepLocation { filename: filename.clone(), location, text });
        }
    }

    tracing::debug!(pattern, matches = results.len(), "finished search");

    Ok(results)
}

/// A filter over search results.
pub type GrepFinder<E> = InteractiveFilter<FuzzySource<GrepLocation, E>>;

/// Search beneath `root` for `pattern`, and create a filter over the matching lines.
///
/// Opening a result jumps to the match and closes the prompt.
pub fn grep_finder<E>(
    root: &Path,
    pattern: &str,
    config: &FilterConfig,
) -> FilterResult<GrepFinder<E>>
where
    E: Editor + 'static,
{
    let results = grep(root, pattern)?;
    let root = root.to_path_buf();

    let repr = |loc: &GrepLocation| loc.to_string();
    let source = FuzzySource::new(results, config, repr, move |editor: &mut E, loc| {
        editor.open_file(&root.join(&loc.filename), Some(loc.location))?;
        editor.close_prompt();

        Ok(())
    })
    .on_cancel(|editor: &mut E| {
        editor.close_prompt();

        Ok(())
    });

    Ok(InteractiveFilter::new(source, config.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::testing::TestEditor;
    use crate::errors::FilterError;
    use keystack::Key;
    use std::fs;
    use temp_dir::TempDir;

    fn mktree() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("notes.txt"), "todo: write tests\nnothing here\n").unwrap();
        fs::write(dir.path().join("src/lib.rs"), "fn main() {\n    // todo: remove\n}\n").unwrap();
        fs::write(dir.path().join("image.bin"), [0xff, 0xfe, 0x00, 0x74]).unwrap();
        dir
    }

    #[test]
    fn test_grep() {
        let dir = mktree();
        let results = grep(dir.path(), "todo").unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].filename, "notes.txt");
        assert_eq!(results[0].location, Location { line: 1, column: 1 });
        assert_eq!(results[0].text, "todo: write tests");

        assert_eq!(results[1].location, Location { line: 2, column: 8 });
        assert_eq!(results[1].text, "// todo: remove");
        assert!(results[1].to_string().ends_with(":2:8: // todo: remove"));
    }

    #[test]
    fn test_grep_bad_regex() {
        let dir = mktree();
        let err = grep(dir.path(), "(unclosed").unwrap_err();

        assert!(matches!(err, FilterError::InvalidRegex(_)));
    }

    #[test]
    fn test_grep_finder_jumps_to_match() {
        let dir = mktree();
        let mut editor = TestEditor::default();
        let mut filter = grep_finder(dir.path(), "todo", &FilterConfig::default()).unwrap();
        filter.refresh();
        assert_eq!(filter.list().len(), 2);

        for c in "remove".chars() {
            filter.tick(&Key::plain(c), &mut editor).unwrap();
        }

        assert_eq!(filter.list().len(), 1);

        filter.tick(&Key::plain("<enter>"), &mut editor).unwrap();

        let location = Location { line: 2, column: 8 };
        assert_eq!(editor.opened, vec![(dir.path().join("src/lib.rs"), Some(location))]);
        assert_eq!(editor.closed, 1);
    }
}
