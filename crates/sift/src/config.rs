//! # Filter configuration
use serde::Deserialize;

/// How the cursor in the input line is drawn.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CursorShape {
    /// An outlined box around the character under the cursor.
    Outline,

    /// A filled block over the character under the cursor.
    #[default]
    Block,

    /// A thin line before the character under the cursor.
    Line,
}

/// Options that control fuzzy scoring.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    /// Keep items that don't match the query, listed after every match in their original order.
    pub keep_unmatched: bool,
}

/// Options shared by every interactive filter.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct FilterConfig {
    /// How to draw the input cursor.
    pub cursor_shape: CursorShape,

    /// How many items a page movement skips.
    pub page_size: usize,

    /// Fuzzy scoring options.
    pub scoring: ScoringConfig,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            cursor_shape: CursorShape::default(),
            page_size: 10,
            scoring: ScoringConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: FilterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, FilterConfig::default());
        assert_eq!(config.page_size, 10);
        assert_eq!(config.cursor_shape, CursorShape::Block);
        assert_eq!(config.scoring.keep_unmatched, false);
    }

    #[test]
    fn test_overrides() {
        let config: FilterConfig = serde_json::from_str(
            r#"{"cursor_shape": "line", "scoring": {"keep_unmatched": true}}"#,
        )
        .unwrap();
        assert_eq!(config.cursor_shape, CursorShape::Line);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.scoring.keep_unmatched, true);
    }
}
