//! Shaped lines as consumed by the splitters and the painter.
//!
//! Shaping itself happens elsewhere (see [`MonospaceShaper`](crate::shaper::MonospaceShaper)
//! for a reference provider); this module only defines the read-only shape of its output.

use crate::geometry::{Fixed, Point, Rect};

/// Glyph ink bounds relative to the glyph's dot (baseline origin), y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphBounds {
    /// Left edge.
    pub min_x: Fixed,
    /// Top edge (negative above the baseline).
    pub min_y: Fixed,
    /// Right edge.
    pub max_x: Fixed,
    /// Bottom edge.
    pub max_y: Fixed,
}

/// A shaped glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Glyph {
    /// Font-specific glyph id, opaque to this crate.
    pub id: u32,
    /// Dot position in document pixels.
    pub x: Fixed,
    /// Baseline position in document pixels.
    pub y: i32,
    /// Logical advance.
    pub advance: Fixed,
    /// Distance from the baseline to the top of the line box.
    pub ascent: Fixed,
    /// Distance from the baseline to the bottom of the line box.
    pub descent: Fixed,
    /// Ink bounds.
    pub bounds: GlyphBounds,
    /// Number of runes (Unicode scalar values) this glyph represents.
    pub runes: u16,
}

/// A visual line of glyphs with its metrics and document position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    /// Horizontal offset of the line start.
    pub x_off: Fixed,
    /// Baseline position.
    pub y_off: i32,
    /// Sum of glyph advances.
    pub width: Fixed,
    /// Line ascent.
    pub ascent: Fixed,
    /// Line descent.
    pub descent: Fixed,
    /// Glyphs in visual order.
    pub glyphs: Vec<Glyph>,
    /// Number of runes represented by the line.
    pub runes: usize,
    /// Rune offset of the first rune of the line in the document.
    pub rune_off: usize,
}

impl Line {
    /// Create an empty line starting at document rune `rune_off`.
    pub fn new(rune_off: usize) -> Self {
        Self {
            rune_off,
            ..Self::default()
        }
    }

    /// Append a glyph, updating the line metrics.
    ///
    /// Glyph ascent/descent derive from the line's font metrics, so the last glyph's values
    /// become the line's.
    pub fn push(&mut self, glyph: Glyph) {
        self.y_off = glyph.y;
        if glyph.x < self.x_off {
            self.x_off = glyph.x;
        }
        self.width += glyph.advance;
        self.ascent = glyph.ascent;
        self.descent = glyph.descent;
        self.runes += glyph.runes as usize;
        self.glyphs.push(glyph);
    }

    /// Glyphs of the line.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Rune offset just past the line.
    pub fn rune_end(&self) -> usize {
        self.rune_off + self.runes
    }

    /// Move the line (and its glyphs) to baseline `y_off`.
    pub fn set_y_off(&mut self, y_off: i32) {
        self.y_off = y_off;
        for glyph in &mut self.glyphs {
            glyph.y = y_off;
        }
    }

    /// Logical bounds in document pixels.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            Point::new(self.x_off.floor(), self.y_off - self.ascent.ceil()),
            Point::new((self.x_off + self.width).ceil(), self.y_off + self.descent.ceil()),
        )
    }
}
