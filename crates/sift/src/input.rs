//! # Single-line input
//!
//! ## Overview
//!
//! [UserInput] is the editable query line at the top of every filter. It holds the typed text,
//! a cursor, and a [ClipboardRegister] for copy, cut and paste.
//!
//! The cursor counts grapheme clusters, so it always sits between two user-perceived characters
//! and `0 <= cursor <= len` holds after every operation. Word motions treat any run of
//! non-whitespace as a word.
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::clipboard::ClipboardRegister;
use crate::errors::FilterResult;

fn is_blank(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}

/// An editable line of text with a cursor.
#[derive(Debug, Default)]
pub struct UserInput {
    text: String,
    idx: usize,
    register: ClipboardRegister,
}

impl UserInput {
    /// Create an empty input line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty input line that uses the given clipboard register.
    pub fn with_register(register: ClipboardRegister) -> Self {
        UserInput { text: String::new(), idx: 0, register }
    }

    /// The current text.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// The cursor position, in grapheme clusters.
    pub fn cursor(&self) -> usize {
        self.idx
    }

    /// The number of grapheme clusters in the text.
    pub fn len(&self) -> usize {
        self.text.graphemes(true).count()
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The display column of the cursor.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.offset(self.idx)].width()
    }

    /// Byte offset of the grapheme at `gidx`, or the end of the text.
    fn offset(&self, gidx: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(gidx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn graphemes(&self) -> Vec<&str> {
        self.text.graphemes(true).collect()
    }

    /// Remove the graphemes in `start..end`, leaving the cursor at `start`.
    fn remove(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }

        let so = self.offset(start);
        let eo = self.offset(end);
        self.text.replace_range(so..eo, "");
        self.idx = start;
    }

    fn word_end(&self) -> usize {
        let gs = self.graphemes();
        let mut i = self.idx;

        while i < gs.len() && is_blank(gs[i]) {
            i += 1;
        }

        while i < gs.len() && !is_blank(gs[i]) {
            i += 1;
        }

        return i;
    }

    fn next_word_pos(&self) -> usize {
        let gs = self.graphemes();
        let mut i = self.idx;

        while i < gs.len() && !is_blank(gs[i]) {
            i += 1;
        }

        while i < gs.len() && is_blank(gs[i]) {
            i += 1;
        }

        return i;
    }

    fn previous_word_pos(&self) -> usize {
        let gs = self.graphemes();
        let mut i = self.idx.min(gs.len());

        while i > 0 && is_blank(gs[i - 1]) {
            i -= 1;
        }

        while i > 0 && !is_blank(gs[i - 1]) {
            i -= 1;
        }

        return i;
    }

    /// Replace the whole text, moving the cursor to the end.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.idx = self.len();
    }

    /// Remove all text.
    pub fn clear(&mut self) {
        self.text.clear();
        self.idx = 0;
    }

    /// Insert a character before the cursor.
    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];

        self.insert_str(c.encode_utf8(&mut buf));
    }

    /// Insert a string before the cursor, leaving the cursor after it.
    pub fn insert_str(&mut self, s: &str) {
        let off = self.offset(self.idx);
        self.text.insert_str(off, s);

        // Combining characters may merge with their neighbours, so recount.
        self.idx = self.text[..off + s.len()].graphemes(true).count();
    }

    /// Delete the character before the cursor.
    pub fn delete_char_backward(&mut self) {
        if self.idx > 0 {
            self.remove(self.idx - 1, self.idx);
        }
    }

    /// Delete the character under the cursor.
    pub fn delete_char_forward(&mut self) {
        if self.idx < self.len() {
            self.remove(self.idx, self.idx + 1);
        }
    }

    /// Delete from the start of the previous word up to the cursor.
    pub fn delete_word_backward(&mut self) {
        let start = self.previous_word_pos();

        self.remove(start, self.idx);
    }

    /// Delete from the cursor to the end of the next word.
    pub fn delete_word_forward(&mut self) {
        let end = self.word_end();

        self.remove(self.idx, end);
    }

    /// Move the cursor `n` characters left, stopping at the beginning.
    pub fn cursor_left(&mut self, n: usize) {
        self.idx = self.idx.saturating_sub(n);
    }

    /// Move the cursor `n` characters right, stopping at the end.
    pub fn cursor_right(&mut self, n: usize) {
        self.idx = self.idx.saturating_add(n).min(self.len());
    }

    /// Move the cursor to the start of the next word.
    pub fn next_word_start(&mut self) {
        self.idx = self.next_word_pos();
    }

    /// Move the cursor to the start of the previous word.
    pub fn previous_word(&mut self) {
        self.idx = self.previous_word_pos();
    }

    /// Move the cursor to the beginning of the line.
    pub fn beginning_of_line(&mut self) {
        self.idx = 0;
    }

    /// Move the cursor to the end of the line.
    pub fn end_of_line(&mut self) {
        self.idx = self.len();
    }

    /// Copy the whole line into the clipboard register.
    pub fn copy(&mut self) -> FilterResult<()> {
        self.register.set(&self.text)
    }

    /// Copy the whole line into the clipboard register, and then clear it.
    pub fn cut(&mut self) -> FilterResult<()> {
        self.copy()?;
        self.clear();

        Ok(())
    }

    /// Insert the clipboard register's contents before the cursor.
    ///
    /// Line breaks are dropped, since the input is a single line.
    pub fn paste(&mut self) -> FilterResult<()> {
        let text = self.register.get()?;
        let text: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();

        self.insert_str(&text);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mkinput(text: &str, idx: usize) -> UserInput {
        let mut input = UserInput::new();
        input.set_input(text);
        input.idx = idx;
        input
    }

    #[test]
    fn test_insert_delete() {
        let mut input = UserInput::new();
        assert_eq!(input.cursor(), 0);

        input.insert_char('a');
        input.insert_char('c');
        input.cursor_left(1);
        input.insert_char('b');
        assert_eq!(input.text(), "abc");
        assert_eq!(input.cursor(), 2);

        input.delete_char_forward();
        assert_eq!(input.text(), "ab");
        assert_eq!(input.cursor(), 2);

        // Nothing to delete after the end.
        input.delete_char_forward();
        assert_eq!(input.text(), "ab");

        input.delete_char_backward();
        input.delete_char_backward();
        input.delete_char_backward();
        assert_eq!(input.text(), "");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_cursor_clamped() {
        let mut input = mkinput("hello", 2);

        input.cursor_right(100);
        assert_eq!(input.cursor(), 5);

        input.cursor_left(100);
        assert_eq!(input.cursor(), 0);

        input.end_of_line();
        assert_eq!(input.cursor(), 5);

        input.beginning_of_line();
        assert_eq!(input.cursor(), 0);

        input.cursor_right(usize::MAX);
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn test_graphemes() {
        let mut input = UserInput::new();
        input.insert_str("cafe");
        input.insert_char('\u{301}');
        assert_eq!(input.text(), "cafe\u{301}");
        assert_eq!(input.len(), 4);
        assert_eq!(input.cursor(), 4);

        input.delete_char_backward();
        assert_eq!(input.text(), "caf");
        assert_eq!(input.cursor(), 3);

        input.set_input("日本語");
        assert_eq!(input.len(), 3);
        assert_eq!(input.cursor_column(), 6);
        input.cursor_left(1);
        assert_eq!(input.cursor_column(), 4);
    }

    #[test]
    fn test_word_motions() {
        let mut input = mkinput("foo bar  baz", 0);

        input.next_word_start();
        assert_eq!(input.cursor(), 4);

        input.next_word_start();
        assert_eq!(input.cursor(), 9);

        input.next_word_start();
        assert_eq!(input.cursor(), 12);

        input.previous_word();
        assert_eq!(input.cursor(), 9);

        input.previous_word();
        assert_eq!(input.cursor(), 4);

        // From the middle of a word, go to its start.
        input.cursor_right(2);
        input.previous_word();
        assert_eq!(input.cursor(), 4);

        input.previous_word();
        assert_eq!(input.cursor(), 0);

        input.previous_word();
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_delete_words() {
        let mut input = mkinput("open some/file.rs now", 17);

        input.delete_word_backward();
        assert_eq!(input.text(), "open  now");
        assert_eq!(input.cursor(), 5);

        input.delete_word_forward();
        assert_eq!(input.text(), "open ");
        assert_eq!(input.cursor(), 5);

        input.delete_word_forward();
        assert_eq!(input.text(), "open ");

        input.delete_word_backward();
        assert_eq!(input.text(), "");
        assert_eq!(input.cursor(), 0);

        input.delete_word_backward();
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_copy_paste() {
        let mut input = mkinput("query", 5);

        input.copy().unwrap();
        input.paste().unwrap();
        assert_eq!(input.text(), "queryquery");
        assert_eq!(input.cursor(), 10);

        input.cut().unwrap();
        assert_eq!(input.text(), "");
        assert_eq!(input.cursor(), 0);

        input.insert_str("<>");
        input.cursor_left(1);
        input.paste().unwrap();
        assert_eq!(input.text(), "<queryquery>");
        assert_eq!(input.cursor(), 11);
    }

    #[test]
    fn test_paste_single_line() {
        let mut register = ClipboardRegister::new();
        register.set("a\nb\r\n").unwrap();

        let mut input = UserInput::with_register(register);
        input.paste().unwrap();
        assert_eq!(input.text(), "ab");
    }
}
