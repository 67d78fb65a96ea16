//! # Selectable lists
//!
//! ## Overview
//!
//! [ListComponent] holds the candidates shown beneath a filter's input line, the index of the
//! selected candidate, and the index of the first candidate in the visible window.
//!
//! Movement is clamped at both ends of the list rather than wrapping around. Whenever the
//! visible window is requested it first scrolls by the smallest amount that brings the selection
//! back into view.
use std::ops::Index;

/// A list of items with a selection and a scrolling viewport.
#[derive(Clone, Debug)]
pub struct ListComponent<T> {
    /// The list of items.
    items: Vec<T>,

    /// Currently selected position.
    selection: usize,

    /// First position in the viewport.
    visible_start: usize,
}

impl<T> ListComponent<T> {
    /// Create a new [ListComponent] given an original set of items.
    pub fn new(items: Vec<T>) -> Self {
        ListComponent { items, selection: 0, visible_start: 0 }
    }

    /// Returns how many items are in this list.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Indicates whether this list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The items, in display order.
    pub fn items(&self) -> &[T] {
        self.items.as_slice()
    }

    /// Index of the selected item. This is 0 when the list is empty.
    pub fn selection(&self) -> usize {
        self.selection
    }

    /// Index of the first item in the viewport.
    pub fn visible_start(&self) -> usize {
        self.visible_start
    }

    /// Get a reference to the selected item.
    pub fn selected(&self) -> Option<&T> {
        self.items.get(self.selection)
    }

    /// Where the selection is drawn, relative to the top of the viewport.
    ///
    /// This is only meaningful after [ListComponent::visible_view] has scrolled the viewport.
    pub fn selected_row(&self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }

        self.selection.checked_sub(self.visible_start)
    }

    fn max_idx(&self) -> usize {
        self.len().saturating_sub(1)
    }

    /// Select the next item, stopping at the last one.
    pub fn next_item(&mut self) {
        self.selection = self.selection.saturating_add(1).min(self.max_idx());
    }

    /// Select the previous item, stopping at the first one.
    pub fn prev_item(&mut self) {
        self.selection = self.selection.saturating_sub(1);
    }

    /// Move the selection `n` items forward, stopping at the last one.
    pub fn page_down(&mut self, n: usize) {
        self.selection = self.selection.saturating_add(n).min(self.max_idx());
    }

    /// Move the selection `n` items backward, stopping at the first one.
    pub fn page_up(&mut self, n: usize) {
        self.selection = self.selection.saturating_sub(n);
    }

    /// Select the first item.
    pub fn first_item(&mut self) {
        self.selection = 0;
    }

    /// Select the last item.
    pub fn last_item(&mut self) {
        self.selection = self.max_idx();
    }

    /// Replace every item.
    ///
    /// The selection stays where it was when it's still in range, and otherwise moves to the
    /// last item.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.selection = self.selection.min(self.max_idx());
        self.visible_start = self.visible_start.min(self.selection);
    }

    /// Take every item out of the list, leaving it empty.
    pub fn take_items(&mut self) -> Vec<T> {
        self.selection = 0;
        self.visible_start = 0;

        std::mem::take(&mut self.items)
    }

    /// Scroll so that the selection is within a viewport of `max_lines` rows.
    fn scroll(&mut self, max_lines: usize) {
        if self.selection < self.visible_start {
            self.visible_start = self.selection;
        } else if self.selection >= self.visible_start + max_lines {
            self.visible_start = self.selection + 1 - max_lines;
        }
    }

    /// The items in a viewport of at most `max_lines` rows.
    ///
    /// The viewport is scrolled first, by the least amount needed to show the selection. A
    /// viewport with no rows is always empty, and doesn't scroll.
    pub fn visible_view(&mut self, max_lines: usize) -> std::slice::Iter<'_, T> {
        if max_lines == 0 || self.is_empty() {
            return self.items[0..0].iter();
        }

        self.scroll(max_lines);

        let end = self.len().min(self.visible_start + max_lines);

        self.items[self.visible_start..end].iter()
    }
}

impl<T> Default for ListComponent<T> {
    fn default() -> Self {
        ListComponent::new(Vec::new())
    }
}

impl<T> Index<usize> for ListComponent<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.items.index(index)
    }
}

impl<T> AsRef<[T]> for ListComponent<T> {
    fn as_ref(&self) -> &[T] {
        self.items.as_ref()
    }
}

impl<T> From<Vec<T>> for ListComponent<T> {
    fn from(items: Vec<T>) -> Self {
        ListComponent::new(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn mklist(n: usize) -> ListComponent<usize> {
        ListComponent::new((0..n).collect())
    }

    #[test]
    fn test_next_prev_clamped() {
        let mut list = mklist(3);
        assert_eq!(list.selection(), 0);

        list.prev_item();
        assert_eq!(list.selection(), 0);

        list.next_item();
        list.next_item();
        assert_eq!(list.selection(), 2);

        // No wrapping at the end.
        list.next_item();
        assert_eq!(list.selection(), 2);
        assert_eq!(list.selected(), Some(&2));

        list.prev_item();
        assert_eq!(list.selection(), 1);
    }

    #[test]
    fn test_empty_list() {
        let mut list: ListComponent<usize> = ListComponent::default();

        list.next_item();
        list.prev_item();
        list.page_down(5);
        list.last_item();
        assert_eq!(list.selection(), 0);
        assert_eq!(list.selected(), None);
        assert_eq!(list.selected_row(), None);
        assert_eq!(list.visible_view(10).count(), 0);
    }

    #[test]
    fn test_paging() {
        let mut list = mklist(25);

        list.page_down(10);
        assert_eq!(list.selection(), 10);

        list.page_down(10);
        list.page_down(10);
        assert_eq!(list.selection(), 24);

        list.page_up(10);
        assert_eq!(list.selection(), 14);

        list.page_up(100);
        assert_eq!(list.selection(), 0);

        list.last_item();
        assert_eq!(list.selection(), 24);

        list.first_item();
        assert_eq!(list.selection(), 0);
    }

    #[test]
    fn test_visible_view_scrolls_minimally() {
        let mut list = mklist(10);

        let view: Vec<_> = list.visible_view(3).copied().collect();
        assert_eq!(view, vec![0, 1, 2]);

        // Moving within the window doesn't scroll.
        list.next_item();
        list.next_item();
        let view: Vec<_> = list.visible_view(3).copied().collect();
        assert_eq!(view, vec![0, 1, 2]);
        assert_eq!(list.selected_row(), Some(2));

        // Moving one past the bottom scrolls by one.
        list.next_item();
        let view: Vec<_> = list.visible_view(3).copied().collect();
        assert_eq!(view, vec![1, 2, 3]);
        assert_eq!(list.visible_start(), 1);

        // Jumping far ahead puts the selection on the last row.
        list.page_down(5);
        let view: Vec<_> = list.visible_view(3).copied().collect();
        assert_eq!(view, vec![6, 7, 8]);

        // Moving one above the top scrolls up by one.
        list.page_up(3);
        let view: Vec<_> = list.visible_view(3).copied().collect();
        assert_eq!(view, vec![5, 6, 7]);
        assert_eq!(list.selected_row(), Some(0));

        // The view is shorter near the end of the list.
        list.last_item();
        let view: Vec<_> = list.visible_view(20).copied().collect();
        assert_eq!(view, vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_visible_view_restartable() {
        let mut list = mklist(5);
        let view = list.visible_view(2);
        let first: Vec<_> = view.clone().collect();
        let second: Vec<_> = view.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_visible_view_zero_lines() {
        let mut list = mklist(5);
        list.last_item();

        assert_eq!(list.visible_view(0).count(), 0);
        assert_eq!(list.visible_start(), 0);
    }

    #[test]
    fn test_set_items_reclamps() {
        let mut list = mklist(10);
        list.page_down(7);
        let _ = list.visible_view(3);
        assert_eq!(list.visible_start(), 5);

        // Still in range, so the selection stays put.
        list.set_items((0..9).collect());
        assert_eq!(list.selection(), 7);

        // A shorter list moves the selection to its end.
        list.set_items(vec![10, 11, 12]);
        assert_eq!(list.selection(), 2);
        assert_eq!(list.visible_start(), 2);
        let view: Vec<_> = list.visible_view(3).copied().collect();
        assert_eq!(view, vec![12]);

        list.set_items(vec![]);
        assert_eq!(list.selection(), 0);
        assert_eq!(list.visible_start(), 0);
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn test_random_navigation() {
        let mut rng = rand::thread_rng();

        for _ in 0..100 {
            let len = rng.gen_range(1..=30);
            let lines = rng.gen_range(1..=8);
            let mut list = mklist(len);

            for _ in 0..200 {
                match rng.gen_range(0..4) {
                    0 => list.next_item(),
                    1 => list.prev_item(),
                    2 => list.page_down(rng.gen_range(0..10)),
                    _ => list.page_up(rng.gen_range(0..10)),
                }

                assert!(list.selection() < len);

                let view: Vec<_> = list.visible_view(lines).copied().collect();
                let start = list.visible_start();

                assert!(start <= list.selection());
                assert!(list.selection() < start + lines);
                assert_eq!(view.len(), lines.min(len - start));
                assert_eq!(view, (start..start + view.len()).collect::<Vec<_>>());
            }
        }
    }
}
