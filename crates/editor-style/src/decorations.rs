//! Decorations: styling ranges independent of syntax (search hits, diagnostics, markers).
//!
//! Decorations may overlap freely. They are indexed by range in a [`DecorationTree`], tagged
//! with the producer that owns them (its *source*) for bulk removal, and painted in priority
//! order.

use crate::color::Color;
use crate::error::StyleError;
use crate::intervals::IntervalTree;
use crate::layout::Line;
use crate::run::{GlyphCursor, LineSplitter, RenderRun, StrokeStyle};

/// A styled document range.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Decoration {
    /// Producer tag, e.g. `"search"` or `"lint"`.
    pub source: String,
    /// Paint order: higher paints later (on top).
    pub priority: i32,
    /// Start offset (inclusive), in runes.
    pub start: usize,
    /// End offset (exclusive), in runes.
    pub end: usize,
    /// Background fill. Ignored when unset.
    pub background: Option<Color>,
    /// Straight underline.
    pub underline: Option<Color>,
    /// Wavy underline.
    pub squiggle: Option<Color>,
    /// Strikethrough.
    pub strikethrough: Option<Color>,
    /// Stroked bounding box.
    pub border: Option<Color>,
}

impl Decoration {
    /// Create an unstyled decoration over `[start, end)`.
    pub fn new(source: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            source: source.into(),
            start,
            end,
            ..Self::default()
        }
    }

    /// Set the paint priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Fill the background.
    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Add an underline. An unset color strokes with the painter default.
    #[must_use]
    pub fn with_underline(mut self, color: Color) -> Self {
        self.underline = Some(color);
        self
    }

    /// Add a wavy underline.
    #[must_use]
    pub fn with_squiggle(mut self, color: Color) -> Self {
        self.squiggle = Some(color);
        self
    }

    /// Add a strikethrough.
    #[must_use]
    pub fn with_strikethrough(mut self, color: Color) -> Self {
        self.strikethrough = Some(color);
        self
    }

    /// Add a border.
    #[must_use]
    pub fn with_border(mut self, color: Color) -> Self {
        self.border = Some(color);
        self
    }

    /// Whether the decoration covers no rune.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    fn style_run(&self, run: &mut RenderRun) {
        fn stroke(color: Option<Color>) -> Option<StrokeStyle> {
            color.map(|c| StrokeStyle {
                color: c.is_set().then_some(c),
            })
        }

        if let Some(bg) = self.background.filter(|c| c.is_set()) {
            run.bg = Some(bg);
        }
        run.underline = stroke(self.underline);
        run.squiggle = stroke(self.squiggle);
        run.strikethrough = stroke(self.strikethrough);
        run.border = stroke(self.border);
    }
}

/// Range index of possibly overlapping decorations.
///
/// Zero-width decorations (`start == end`) are kept beside the interval index. They are
/// returned by queries but never produce render runs.
#[derive(Debug, Clone, Default)]
pub struct DecorationTree {
    tree: IntervalTree<Decoration>,
    points: Vec<Decoration>,
}

impl DecorationTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert decorations.
    ///
    /// Every range is validated first: if any decoration has `start > end` nothing is
    /// inserted.
    pub fn insert(
        &mut self,
        decorations: impl IntoIterator<Item = Decoration>,
    ) -> Result<(), StyleError> {
        let decorations: Vec<Decoration> = decorations.into_iter().collect();
        if let Some(bad) = decorations.iter().find(|d| d.start > d.end) {
            return Err(StyleError::InvalidRange {
                start: bad.start,
                end: bad.end,
            });
        }

        let count = decorations.len();
        for decoration in decorations {
            self.insert_one(decoration);
        }
        tracing::debug!(target: "style.decorations", count, total = self.len(), "decorations inserted");
        Ok(())
    }

    fn insert_one(&mut self, decoration: Decoration) {
        if decoration.is_empty() {
            self.points.push(decoration);
        } else {
            self.tree.insert(decoration.start, decoration.end, decoration);
        }
    }

    /// Decorations covering `pos`, plus zero-width decorations anchored at `pos`.
    pub fn query(&self, pos: usize) -> Vec<&Decoration> {
        let mut found: Vec<&Decoration> = self
            .tree
            .query_range(pos, pos.saturating_add(1))
            .into_iter()
            .map(|interval| &interval.value)
            .collect();
        found.extend(self.points.iter().filter(|d| d.start == pos));
        found
    }

    /// Decorations intersecting `[start, end)`, plus zero-width decorations anchored inside it.
    ///
    /// Returns nothing when `start >= end`.
    pub fn query_range(&self, start: usize, end: usize) -> Vec<&Decoration> {
        if start >= end {
            return Vec::new();
        }

        let mut found: Vec<&Decoration> = self
            .tree
            .query_range(start, end)
            .into_iter()
            .map(|interval| &interval.value)
            .collect();
        found.extend(self.points.iter().filter(|d| d.start >= start && d.start < end));
        found
    }

    /// Remove every decoration tagged `source`; returns how many were removed.
    ///
    /// Zero means there was nothing to remove.
    pub fn remove_by_source(&mut self, source: &str) -> usize {
        let removed = self.remove_where(|d| d.source == source);
        tracing::debug!(target: "style.decorations", source, removed, "decorations removed by source");
        removed
    }

    /// Remove decorations whose range is exactly `[start, end)`; returns how many were removed.
    pub fn remove_range(&mut self, start: usize, end: usize) -> usize {
        self.remove_where(|d| d.start == start && d.end == end)
    }

    /// Remove every decoration; returns how many there were.
    pub fn remove_all(&mut self) -> usize {
        let removed = self.tree.clear() + self.points.len();
        self.points.clear();
        tracing::debug!(target: "style.decorations", removed, "all decorations removed");
        removed
    }

    fn remove_where(&mut self, matches: impl Fn(&Decoration) -> bool) -> usize {
        let removed = self.tree.retain(|interval| !matches(&interval.value));
        let before = self.points.len();
        self.points.retain(|d| !matches(d));
        removed + before - self.points.len()
    }

    /// Track the insertion of `len` runes at `pos`.
    ///
    /// Start edges keep their position when text is inserted exactly at them; end edges move
    /// along. A zero-width decoration at `pos` therefore grows to cover the inserted text.
    pub fn apply_insert(&mut self, pos: usize, len: usize) {
        if len == 0 {
            return;
        }

        self.tree.update_for_insertion(pos, len);
        self.sync_tree_ranges();

        let mut grown = Vec::new();
        let mut idx = 0;
        while idx < self.points.len() {
            let point = &mut self.points[idx];
            if point.start > pos {
                point.start += len;
            }
            if point.end >= pos {
                point.end += len;
            }
            if point.is_empty() {
                idx += 1;
            } else {
                grown.push(self.points.swap_remove(idx));
            }
        }
        for decoration in grown {
            self.tree.insert(decoration.start, decoration.end, decoration);
        }
    }

    /// Track the deletion of the runes in `[start, end)`.
    ///
    /// Edges inside the deleted span collapse onto `start`; decorations left empty become
    /// zero-width decorations.
    pub fn apply_delete(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }

        let delta = end - start;
        let map = |offset: usize| {
            if offset <= start {
                offset
            } else if offset >= end {
                offset - delta
            } else {
                start
            }
        };
        for point in &mut self.points {
            point.start = map(point.start);
            point.end = map(point.end);
        }

        let collapsed = self.tree.update_for_deletion(start, end);
        self.sync_tree_ranges();
        for interval in collapsed {
            let mut decoration = interval.value;
            decoration.start = interval.start;
            decoration.end = interval.end;
            self.points.push(decoration);
        }
    }

    fn sync_tree_ranges(&mut self) {
        for (start, end, decoration) in self.tree.values_mut() {
            decoration.start = start;
            decoration.end = end;
        }
    }

    /// Iterate over every decoration: ranged ones in start order, then zero-width ones.
    pub fn iter(&self) -> impl Iterator<Item = &Decoration> {
        self.tree
            .iter()
            .map(|interval| &interval.value)
            .chain(self.points.iter())
    }

    /// Number of decorations.
    pub fn len(&self) -> usize {
        self.tree.len() + self.points.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty() && self.points.is_empty()
    }
}

/// Emits one run per decoration intersecting the line, clipped to the line and ordered by
/// ascending priority. Runs carry only non-text styling.
///
/// A decoration starting inside a multi-rune glyph (e.g. on a combining mark) yields no run on
/// that line, even if it covers later glyphs.
impl LineSplitter for DecorationTree {
    fn split(&self, line: &Line, runs: &mut Vec<RenderRun>) {
        runs.clear();

        let line_start = line.rune_off;
        let line_end = line.rune_end();
        let mut decorations = self.query_range(line_start, line_end);
        if decorations.is_empty() {
            return;
        }
        decorations.sort_by_key(|d| d.priority);

        let mut cursor = GlyphCursor::new(line);
        for decoration in decorations {
            let start = decoration.start.max(line_start);
            let end = decoration.end.min(line_end);

            if cursor.rune_off() > start {
                cursor.reset();
            }
            cursor.skip_until(start);
            // A glyph spanning several runes may straddle `start`.
            if cursor.rune_off() != start {
                continue;
            }

            cursor.read_until(end);
            if cursor.pending() > 0 {
                let mut run = cursor.take_run();
                decoration.style_run(&mut run);
                runs.push(run);
            }
        }

        tracing::trace!(target: "style.decorations", line = line_start, runs = runs.len(), "line split");
    }
}
