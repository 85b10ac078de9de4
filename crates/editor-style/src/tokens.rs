//! Syntax tokens of one document snapshot and the syntax line splitter.

use crate::color::{Color, ColorId};
use crate::geometry::Fixed;
use crate::layout::Line;
use crate::run::{GlyphCursor, LineSplitter, RenderRun, StrokeStyle};
use crate::scheme::ColorScheme;
use crate::scope::StyleScope;
use crate::style::{TextStyle, TokenStyle};
use std::sync::Arc;

/// A tokenizer output span: `[start, end)` in document runes and its scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Start offset (inclusive), in runes.
    pub start: usize,
    /// End offset (exclusive), in runes.
    pub end: usize,
    /// Scope of the span.
    pub scope: StyleScope,
}

impl Token {
    /// Create a token.
    pub fn new(start: usize, end: usize, scope: impl Into<StyleScope>) -> Self {
        Self {
            start,
            end,
            scope: scope.into(),
        }
    }
}

/// Sorted, non-overlapping syntax spans resolved against a [`ColorScheme`].
#[derive(Debug, Clone)]
pub struct TextTokens {
    tokens: Vec<TokenStyle>,
    scheme: Arc<ColorScheme>,
}

impl TextTokens {
    /// Create an empty token set styled by `scheme`.
    pub fn new(scheme: Arc<ColorScheme>) -> Self {
        Self {
            tokens: Vec::new(),
            scheme,
        }
    }

    /// The scheme tokens are resolved against.
    pub fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    /// Replace every stored span.
    ///
    /// `tokens` must be sorted by start and must not overlap; this is not checked outside
    /// debug builds, and unsorted input makes [`TextTokens::query_range`] results undefined.
    /// Empty spans and spans whose scope resolves to no style are dropped.
    pub fn set(&mut self, tokens: impl IntoIterator<Item = Token>) {
        self.tokens.clear();
        let mut dropped = 0usize;
        for token in tokens {
            let style = self.scheme.get_token_style(token.scope.as_str());
            if token.start >= token.end || style.is_unset() {
                dropped += 1;
                continue;
            }
            self.tokens.push(TokenStyle {
                start: token.start,
                end: token.end,
                style,
            });
        }

        if cfg!(debug_assertions) && !self.tokens.is_sorted_by_key(|t| t.start) {
            tracing::warn!(target: "style.tokens", count = self.tokens.len(), "tokens are not sorted by start offset");
        }
        tracing::debug!(target: "style.tokens", count = self.tokens.len(), dropped, "tokens set");
    }

    /// Remove every span.
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Number of stored spans.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// All stored spans in document order.
    pub fn tokens(&self) -> &[TokenStyle] {
        &self.tokens
    }

    /// Spans intersecting `[start, end)`, in document order.
    ///
    /// Returns nothing when `start >= end`.
    pub fn query_range(&self, start: usize, end: usize) -> &[TokenStyle] {
        if start >= end {
            return &[];
        }

        // Sorted and disjoint: spans before `first` all end at or before `start`.
        let first = self.tokens.partition_point(|t| t.end <= start);
        let count = self.tokens[first..]
            .iter()
            .take_while(|t| t.start < end)
            .count();
        &self.tokens[first..first + count]
    }

    /// Resolve a color id of the scheme.
    pub fn color(&self, id: ColorId) -> Color {
        self.scheme.color(id)
    }

    fn style_run(&self, run: &mut RenderRun, token: &TokenStyle) {
        let fg = self.color(token.style.foreground());
        let bg = self.color(token.style.background());
        if fg.is_set() {
            run.fg = Some(fg);
        }
        if bg.is_set() {
            run.bg = Some(bg);
        }

        let text_style = token.style.text_style();
        run.text_style = text_style;
        if text_style.contains(TextStyle::UNDERLINE) {
            run.underline = Some(StrokeStyle::default());
        }
        if text_style.contains(TextStyle::SQUIGGLE) {
            run.squiggle = Some(StrokeStyle::default());
        }
        if text_style.contains(TextStyle::STRIKETHROUGH) {
            run.strikethrough = Some(StrokeStyle::default());
        }
        if text_style.contains(TextStyle::BORDER) {
            run.border = Some(StrokeStyle::default());
        }
    }
}

/// Partitions the line: every glyph lands in exactly one run, styled where a token covers it.
impl LineSplitter for TextTokens {
    fn split(&self, line: &Line, runs: &mut Vec<RenderRun>) {
        runs.clear();
        if line.glyphs.is_empty() {
            return;
        }

        let tokens = self.query_range(line.rune_off, line.rune_end());
        if tokens.is_empty() {
            runs.push(RenderRun::new(0..line.glyphs.len(), Fixed::ZERO));
            return;
        }

        let mut cursor = GlyphCursor::new(line);
        for token in tokens {
            // Gap before the token.
            cursor.read_until(token.start);
            if cursor.pending() > 0 {
                runs.push(cursor.take_run());
            }

            cursor.read_until(token.end);
            if cursor.pending() > 0 {
                let mut run = cursor.take_run();
                self.style_run(&mut run, token);
                runs.push(run);
            }
        }

        cursor.read_until(line.rune_end());
        if cursor.pending() > 0 {
            runs.push(cursor.take_run());
        }

        tracing::trace!(target: "style.tokens", line = line.rune_off, tokens = tokens.len(), runs = runs.len(), "line split");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Palette;
    use crate::layout::Glyph;
    use pretty_assertions::assert_eq;

    const RED: Color = Color::rgb(0xFF, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 0xFF);

    fn scheme() -> Arc<ColorScheme> {
        let mut scheme = ColorScheme::new("test", Palette::with_foreground(Color::rgb(1, 1, 1)));
        scheme.add_style("keyword", TextStyle::BOLD, RED, Color::UNSET).unwrap();
        scheme
            .add_style("string", TextStyle::UNDERLINE | TextStyle::ITALIC, BLUE, RED)
            .unwrap();
        Arc::new(scheme)
    }

    fn line(rune_off: usize, glyphs: usize) -> Line {
        let mut line = Line::new(rune_off);
        for idx in 0..glyphs {
            line.push(Glyph {
                x: Fixed::from_int(idx as i32 * 8),
                advance: Fixed::from_int(8),
                runes: 1,
                ..Glyph::default()
            });
        }
        line
    }

    fn tokens() -> TextTokens {
        let mut tokens = TextTokens::new(scheme());
        tokens.set([
            Token::new(0, 3, "keyword"),
            Token::new(5, 9, "string.quoted"),
            Token::new(12, 20, "keyword"),
        ]);
        tokens
    }

    #[test]
    fn test_query_range() {
        let tokens = tokens();
        let starts = |s: &[TokenStyle]| s.iter().map(|t| t.start).collect::<Vec<_>>();

        assert_eq!(starts(tokens.query_range(0, 100)), vec![0, 5, 12]);
        assert_eq!(starts(tokens.query_range(3, 5)), Vec::<usize>::new());
        assert_eq!(starts(tokens.query_range(2, 6)), vec![0, 5]);
        assert_eq!(starts(tokens.query_range(8, 13)), vec![5, 12]);
        assert_eq!(starts(tokens.query_range(20, 30)), Vec::<usize>::new());
    }

    #[test]
    fn test_query_range_degenerate() {
        let tokens = tokens();
        assert!(tokens.query_range(5, 5).is_empty());
        assert!(tokens.query_range(8, 3).is_empty());
    }

    #[test]
    fn test_set_replaces_and_drops_empty() {
        let mut tokens = tokens();
        tokens.set([Token::new(4, 4, "keyword"), Token::new(1, 2, "keyword")]);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens.tokens()[0].start, 1);

        tokens.clear();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_set_drops_unresolved_styles() {
        let empty = Arc::new(ColorScheme::new("empty", Palette::default()));
        let mut tokens = TextTokens::new(empty);
        tokens.set([Token::new(0, 3, "keyword")]);
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_split_partitions_line() {
        let tokens = tokens();
        let line = line(0, 10);
        let mut runs = Vec::new();
        tokens.split(&line, &mut runs);

        let ranges: Vec<_> = runs.iter().map(|r| r.glyphs.clone()).collect();
        assert_eq!(ranges, vec![0..3, 3..5, 5..9, 9..10]);

        assert_eq!(runs[0].fg, Some(RED));
        assert_eq!(runs[0].text_style, TextStyle::BOLD);
        assert!(!runs[1].is_styled());
        assert_eq!(runs[1].offset, Fixed::from_int(24));
        assert_eq!(runs[2].fg, Some(BLUE));
        assert_eq!(runs[2].bg, Some(RED));
        assert_eq!(runs[2].underline, Some(StrokeStyle::default()));
        assert_eq!(runs[2].squiggle, None);
        assert!(!runs[3].is_styled());
    }

    #[test]
    fn test_split_clips_to_line() {
        let tokens = tokens();
        // Line covering runes [10, 15): the token [12, 20) is cut at the line end.
        let line = line(10, 5);
        let mut runs = vec![RenderRun::default(); 4];
        tokens.split(&line, &mut runs);

        let ranges: Vec<_> = runs.iter().map(|r| r.glyphs.clone()).collect();
        assert_eq!(ranges, vec![0..2, 2..5]);
        assert_eq!(runs[1].fg, Some(RED));
    }

    #[test]
    fn test_split_without_tokens() {
        let tokens = TextTokens::new(scheme());
        let line = line(0, 4);
        let mut runs = Vec::new();
        tokens.split(&line, &mut runs);
        assert_eq!(runs, vec![RenderRun::new(0..4, Fixed::ZERO)]);
    }

    #[test]
    fn test_split_empty_line_emits_nothing() {
        let tokens = tokens();
        let mut runs = vec![RenderRun::default()];
        tokens.split(&Line::new(3), &mut runs);
        assert!(runs.is_empty());
    }
}
