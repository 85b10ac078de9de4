//! Render runs: the unit the painter consumes.

use crate::color::Color;
use crate::geometry::{Fixed, Point, Rect};
use crate::layout::{Glyph, Line};
use crate::style::TextStyle;
use std::ops::Range;

/// Stroke decoration of a run (underline, squiggle, strikethrough or border).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrokeStyle {
    /// Stroke color; `None` paints with the painter's default color.
    pub color: Option<Color>,
}

impl StrokeStyle {
    /// Stroke with an explicit color.
    pub fn with_color(color: Color) -> Self {
        Self { color: Some(color) }
    }
}

/// A run of adjacent glyphs of one line sharing the same style.
///
/// Glyphs are referenced by index range into the owning [`Line`] so that run buffers can be
/// reused across lines without copying glyphs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderRun {
    /// Glyph index range in the line.
    pub glyphs: Range<usize>,
    /// Pixel offset of the first glyph relative to the start of the line.
    pub offset: Fixed,
    /// Text color. Left empty for decoration runs.
    pub fg: Option<Color>,
    /// Background fill.
    pub bg: Option<Color>,
    /// Bold/italic and the other style flags the run was resolved from.
    pub text_style: TextStyle,
    /// Straight underline.
    pub underline: Option<StrokeStyle>,
    /// Wavy underline.
    pub squiggle: Option<StrokeStyle>,
    /// Strikethrough.
    pub strikethrough: Option<StrokeStyle>,
    /// Stroked bounding box.
    pub border: Option<StrokeStyle>,
}

impl RenderRun {
    /// An unstyled run.
    pub fn new(glyphs: Range<usize>, offset: Fixed) -> Self {
        Self {
            glyphs,
            offset,
            ..Self::default()
        }
    }

    /// Number of glyphs this run covers.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the run covers no glyph.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Whether the run carries any styling at all.
    pub fn is_styled(&self) -> bool {
        self.fg.is_some()
            || self.bg.is_some()
            || !self.text_style.is_empty()
            || self.underline.is_some()
            || self.squiggle.is_some()
            || self.strikethrough.is_some()
            || self.border.is_some()
    }

    /// The glyphs of the run.
    pub fn glyphs<'a>(&self, line: &'a Line) -> &'a [Glyph] {
        line.glyphs.get(self.glyphs.clone()).unwrap_or(&[])
    }

    /// Width of the run.
    pub fn advance(&self, line: &Line) -> Fixed {
        self.glyphs(line)
            .iter()
            .fold(Fixed::ZERO, |width, glyph| width + glyph.advance)
    }

    /// Bounding box relative to the dot of the first glyph of the run.
    pub fn bounds(&self, line: &Line) -> Rect {
        let glyphs = self.glyphs(line);
        if glyphs.is_empty() {
            return Rect::default();
        }

        let mut min_y = Fixed::ZERO;
        let mut max_y = Fixed::ZERO;
        let mut max_x = Fixed::ZERO;
        for glyph in glyphs {
            min_y = min_y.min(-glyph.ascent);
            max_y = max_y.max(glyph.descent);
            max_x += glyph.advance;
        }

        Rect::new(Point::new(0, min_y.floor()), Point::new(max_x.ceil(), max_y.ceil()))
    }
}

/// A styling source able to split a line into render runs.
///
/// Implementations clear `runs` and fill it with runs in emission order. The buffer is owned
/// by the caller and reused across lines.
pub trait LineSplitter {
    /// Split `line` into runs.
    fn split(&self, line: &Line, runs: &mut Vec<RenderRun>);
}

impl<S: LineSplitter + ?Sized> LineSplitter for &S {
    fn split(&self, line: &Line, runs: &mut Vec<RenderRun>) {
        (**self).split(line, runs);
    }
}

/// Walks the glyphs of a line by rune offset, collecting a pending run.
#[derive(Debug)]
pub(crate) struct GlyphCursor<'a> {
    line: &'a Line,
    /// Next unread glyph.
    glyph_off: usize,
    /// Rune offset of the next unread glyph.
    rune_off: usize,
    /// Advance up to the next unread glyph.
    advance: Fixed,
    /// First glyph of the pending run.
    run_start: usize,
    run_offset: Fixed,
}

impl<'a> GlyphCursor<'a> {
    pub(crate) fn new(line: &'a Line) -> Self {
        Self {
            line,
            glyph_off: 0,
            rune_off: line.rune_off,
            advance: Fixed::ZERO,
            run_start: 0,
            run_offset: Fixed::ZERO,
        }
    }

    /// Rune offset of the next unread glyph.
    pub(crate) fn rune_off(&self) -> usize {
        self.rune_off
    }

    /// Rewind to the start of the line, dropping the pending run.
    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.line);
    }

    /// Read glyphs into the pending run until the cursor reaches `rune_off` (or the line ends).
    pub(crate) fn read_until(&mut self, rune_off: usize) {
        while self.rune_off < rune_off {
            let Some(glyph) = self.line.glyphs.get(self.glyph_off) else {
                break;
            };
            self.advance += glyph.advance;
            self.rune_off += glyph.runes as usize;
            self.glyph_off += 1;
        }
    }

    /// Like [`GlyphCursor::read_until`], but the glyphs read are dropped.
    pub(crate) fn skip_until(&mut self, rune_off: usize) {
        self.read_until(rune_off);
        self.run_start = self.glyph_off;
        self.run_offset = self.advance;
    }

    /// Number of glyphs in the pending run.
    pub(crate) fn pending(&self) -> usize {
        self.glyph_off - self.run_start
    }

    /// Take the pending run, starting a new empty one at the cursor.
    pub(crate) fn take_run(&mut self) -> RenderRun {
        let run = RenderRun::new(self.run_start..self.glyph_off, self.run_offset);
        self.run_start = self.glyph_off;
        self.run_offset = self.advance;
        run
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(runes: &[u16]) -> Line {
        let mut line = Line::new(100);
        for (idx, &r) in runes.iter().enumerate() {
            line.push(Glyph {
                x: Fixed::from_int(idx as i32 * 10),
                y: 20,
                advance: Fixed::from_int(10),
                ascent: Fixed::from_int(12),
                descent: Fixed::from_int(5),
                runes: r,
                ..Glyph::default()
            });
        }
        line
    }

    #[test]
    fn test_run_bounds_and_advance() {
        let line = line(&[1, 1, 1]);
        let run = RenderRun::new(1..3, Fixed::from_int(10));
        assert_eq!(run.len(), 2);
        assert_eq!(run.advance(&line), Fixed::from_int(20));
        assert_eq!(run.bounds(&line), Rect::from_coords(0, -12, 20, 5));
        assert_eq!(RenderRun::default().bounds(&line), Rect::default());
        assert!(!run.is_styled());
    }

    #[test]
    fn test_run_glyphs_out_of_range() {
        let line = line(&[1]);
        assert!(RenderRun::new(3..5, Fixed::ZERO).glyphs(&line).is_empty());
    }

    #[test]
    fn test_cursor_runs() {
        let line = line(&[1, 2, 1, 1]);
        let mut cursor = GlyphCursor::new(&line);

        cursor.read_until(102);
        assert_eq!(cursor.rune_off(), 103);
        assert_eq!(cursor.pending(), 2);
        let first = cursor.take_run();
        assert_eq!(first.glyphs, 0..2);
        assert_eq!(first.offset, Fixed::ZERO);

        cursor.read_until(1000);
        let rest = cursor.take_run();
        assert_eq!(rest.glyphs, 2..4);
        assert_eq!(rest.offset, Fixed::from_int(20));
        assert_eq!(cursor.pending(), 0);
    }

    #[test]
    fn test_cursor_skip_and_reset() {
        let line = line(&[1, 1, 1]);
        let mut cursor = GlyphCursor::new(&line);

        cursor.skip_until(102);
        assert_eq!(cursor.pending(), 0);
        cursor.read_until(103);
        let run = cursor.take_run();
        assert_eq!(run.glyphs, 2..3);
        assert_eq!(run.offset, Fixed::from_int(20));

        cursor.reset();
        assert_eq!(cursor.rune_off(), 100);
    }
}
