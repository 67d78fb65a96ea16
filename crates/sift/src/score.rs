//! # Fuzzy scoring
//!
//! ## Overview
//!
//! [FuzzyScorer] ranks candidates by how well a query matches them as a subsequence, ignoring
//! case and normalizing accented letters. Contiguous matches, and matches that start at word
//! boundaries, score higher.
//!
//! Scores are recomputed from scratch for every query and are never stored beyond the list they
//! were computed for. Sorting is stable, so candidates with equal scores keep the order they were
//! originally given in.
use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::config::ScoringConfig;

/// An item together with its score against the current query.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScoredItem<T> {
    /// The wrapped item.
    pub item: T,

    /// How well the item matched. Higher is better.
    pub score: u32,
}

impl<T> ScoredItem<T> {
    /// Wrap an item with a score of 0.
    pub fn new(item: T) -> Self {
        ScoredItem { item, score: 0 }
    }
}

/// Scores and sorts items against a query.
pub struct FuzzyScorer {
    matcher: Matcher,
    keep_unmatched: bool,
}

impl FuzzyScorer {
    /// Create a scorer with the given options.
    pub fn new(config: &ScoringConfig) -> Self {
        FuzzyScorer {
            matcher: Matcher::new(Config::DEFAULT),
            keep_unmatched: config.keep_unmatched,
        }
    }

    fn pattern(query: &str) -> Pattern {
        Pattern::new(query, CaseMatching::Ignore, Normalization::Smart, AtomKind::Fuzzy)
    }

    fn score_with(&mut self, pattern: &Pattern, text: &str, buf: &mut Vec<char>) -> Option<u32> {
        pattern.score(Utf32Str::new(text, buf), &mut self.matcher)
    }

    /// Score a single string against `query`, returning `None` when it doesn't match.
    ///
    /// Every string matches the empty query with a score of 0.
    pub fn score(&mut self, query: &str, text: &str) -> Option<u32> {
        if query.is_empty() {
            return Some(0);
        }

        let pattern = Self::pattern(query);
        let mut buf = Vec::new();

        self.score_with(&pattern, text, &mut buf)
    }

    /// Score every item against `query`, and sort them from best to worst match.
    ///
    /// Items that don't match are left out, unless this scorer keeps unmatched items, in which
    /// case they follow all of the matches in their original order.
    pub fn rescore<T, F>(&mut self, items: &[T], query: &str, repr: F) -> Vec<ScoredItem<T>>
    where
        T: Clone,
        F: Fn(&T) -> String,
    {
        if query.is_empty() {
            return items.iter().cloned().map(ScoredItem::new).collect();
        }

        let pattern = Self::pattern(query);
        let mut buf = Vec::new();
        let mut matched = Vec::with_capacity(items.len());
        let mut unmatched = Vec::new();

        for item in items {
            let text = repr(item);

            match self.score_with(&pattern, &text, &mut buf) {
                Some(score) => matched.push(ScoredItem { item: item.clone(), score }),
                None if self.keep_unmatched => unmatched.push(ScoredItem::new(item.clone())),
                None => {},
            }
        }

        // A stable sort keeps ties in their original order.
        matched.sort_by(|a, b| b.score.cmp(&a.score));
        matched.extend(unmatched);

        tracing::debug!(query, matched = matched.len(), total = items.len(), "rescored items");

        return matched;
    }
}

impl Default for FuzzyScorer {
    fn default() -> Self {
        FuzzyScorer::new(&ScoringConfig::default())
    }
}

impl std::fmt::Debug for FuzzyScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzyScorer")
            .field("keep_unmatched", &self.keep_unmatched)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILES: [&str; 3] = ["readme.md", "main.go", "reader.go"];

    fn names(scored: &[ScoredItem<&'static str>]) -> Vec<&'static str> {
        scored.iter().map(|s| s.item).collect()
    }

    fn rescore(scorer: &mut FuzzyScorer, query: &str) -> Vec<ScoredItem<&'static str>> {
        scorer.rescore(&FILES, query, |s| s.to_string())
    }

    #[test]
    fn test_empty_query_keeps_order() {
        let mut scorer = FuzzyScorer::default();
        let res = rescore(&mut scorer, "");

        assert_eq!(names(&res), FILES.to_vec());
        assert!(res.iter().all(|s| s.score == 0));
    }

    #[test]
    fn test_incremental_queries() {
        let mut scorer = FuzzyScorer::default();

        let res = rescore(&mut scorer, "re");
        assert_eq!(names(&res), vec!["readme.md", "reader.go"]);

        let res = rescore(&mut scorer, "rea");
        assert_eq!(names(&res), vec!["readme.md", "reader.go"]);

        // Both match "read" the same way, so the tie keeps the original order.
        let res = rescore(&mut scorer, "read");
        assert_eq!(names(&res), vec!["readme.md", "reader.go"]);
        assert_eq!(res[0].score, res[1].score);
    }

    #[test]
    fn test_keep_unmatched() {
        let mut scorer = FuzzyScorer::new(&ScoringConfig { keep_unmatched: true });

        let res = rescore(&mut scorer, "rea");
        assert_eq!(names(&res), vec!["readme.md", "reader.go", "main.go"]);
        assert_eq!(res[2].score, 0);

        let res = rescore(&mut scorer, "zzz");
        assert_eq!(names(&res), FILES.to_vec());
    }

    #[test]
    fn test_contiguous_ranks_higher() {
        let mut scorer = FuzzyScorer::default();
        let items = ["gxxxxxxo", "go"];
        let res = scorer.rescore(&items, "go", |s| s.to_string());

        assert_eq!(res.len(), 2);
        assert_eq!(res[0].item, "go");
        assert!(res[0].score > res[1].score);
    }

    #[test]
    fn test_case_insensitive() {
        let mut scorer = FuzzyScorer::default();

        assert!(scorer.score("READ", "readme.md").is_some());
        assert!(scorer.score("read", "README.md").is_some());
        assert!(scorer.score("xyz", "README.md").is_none());
        assert_eq!(scorer.score("", "anything"), Some(0));
    }

    #[test]
    fn test_rescore_idempotent() {
        let mut scorer = FuzzyScorer::default();
        let items = ["src/main.rs", "src/lib.rs", "README.md", "Cargo.toml", "src/list.rs"];

        let first = scorer.rescore(&items, "rs", |s| s.to_string());
        let second = scorer.rescore(&items, "rs", |s| s.to_string());
        assert_eq!(first, second);

        // Rescoring the already sorted output doesn't reorder it either.
        let sorted: Vec<_> = first.iter().map(|s| s.item).collect();
        let third = scorer.rescore(&sorted, "rs", |s| s.to_string());
        assert_eq!(first, third);
    }
}
