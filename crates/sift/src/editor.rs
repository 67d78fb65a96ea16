//! # Editor collaborator
//!
//! ## Overview
//!
//! The filters in [sources](crate::sources) commit their selections by calling back into the
//! application that created them. [Editor] describes what that application needs to provide.
//!
//! Committing a selection is expected to close the prompt that hosts the filter, by calling
//! [Editor::close_prompt]. The filter itself never cleans up after a commit.
use std::fmt::Debug;
use std::path::Path;

use crate::errors::FilterResult;

/// A position within a file. Lines and columns start at 1.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Location {
    /// The line number.
    pub line: usize,

    /// The column number, counted in characters.
    pub column: usize,
}

/// The application that hosts interactive filters.
pub trait Editor {
    /// Identifies an open buffer.
    type BufferId: Clone + Debug + Eq;

    /// The open buffers and their display names, in the order they should be listed.
    fn buffers(&self) -> Vec<(Self::BufferId, String)>;

    /// The names of the available themes.
    fn themes(&self) -> Vec<String>;

    /// Make a buffer the active one.
    fn activate_buffer(&mut self, id: &Self::BufferId) -> FilterResult<()>;

    /// Switch to a different theme.
    fn set_theme(&mut self, name: &str) -> FilterResult<()>;

    /// Open a file, or switch to it if it's already open, optionally moving to a location.
    fn open_file(&mut self, path: &Path, at: Option<Location>) -> FilterResult<()>;

    /// Close the prompt hosting the current filter.
    fn close_prompt(&mut self);
}

#[cfg(test)]
pub(crate) mod testing {
    use std::path::PathBuf;

    use super::*;
    use crate::errors::FilterError;

    /// An [Editor] that records what it was asked to do.
    #[derive(Debug, Default)]
    pub struct TestEditor {
        pub buffers: Vec<(usize, String)>,
        pub themes: Vec<String>,
        pub active: Option<usize>,
        pub theme: Option<String>,
        pub opened: Vec<(PathBuf, Option<Location>)>,
        pub closed: usize,
        pub fail_open: bool,
    }

    impl TestEditor {
        pub fn with_buffers(names: &[&str]) -> Self {
            let buffers = names.iter().enumerate().map(|(i, n)| (i, n.to_string())).collect();

            TestEditor { buffers, ..Default::default() }
        }

        pub fn with_themes(names: &[&str]) -> Self {
            let themes = names.iter().map(|n| n.to_string()).collect();

            TestEditor { themes, ..Default::default() }
        }
    }

    impl Editor for TestEditor {
        type BufferId = usize;

        fn buffers(&self) -> Vec<(usize, String)> {
            self.buffers.clone()
        }

        fn themes(&self) -> Vec<String> {
            self.themes.clone()
        }

        fn activate_buffer(&mut self, id: &usize) -> FilterResult<()> {
            if !self.buffers.iter().any(|(i, _)| i == id) {
                return Err(FilterError::Failure(format!("no buffer {id}")));
            }

            self.active = Some(*id);

            Ok(())
        }

        fn set_theme(&mut self, name: &str) -> FilterResult<()> {
            self.theme = Some(name.to_string());

            Ok(())
        }

        fn open_file(&mut self, path: &Path, at: Option<Location>) -> FilterResult<()> {
            if self.fail_open {
                let path = path.display().to_string();

                return Err(FilterError::Open(path, "permission denied".into()));
            }

            self.opened.push((path.to_path_buf(), at));

            Ok(())
        }

        fn close_prompt(&mut self) {
            self.closed += 1;
        }
    }
}
