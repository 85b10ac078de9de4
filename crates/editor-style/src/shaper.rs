//! A reference line provider for monospace text.
//!
//! Real editors shape through a font stack; this shaper lays out one glyph per grapheme
//! cluster on a fixed cell grid, which is enough to drive the splitters and the painter in
//! terminals, tests and benchmarks.

use crate::geometry::Fixed;
use crate::layout::{Glyph, GlyphBounds, Line};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Font metrics and layout options of a [`MonospaceShaper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaperConfig {
    /// Advance of one cell.
    pub cell_advance: Fixed,
    /// Line ascent.
    pub ascent: Fixed,
    /// Line descent.
    pub descent: Fixed,
    /// Extra space between lines.
    pub line_gap: Fixed,
    /// Tab stop interval, in cells.
    pub tab_width: usize,
}

impl Default for ShaperConfig {
    fn default() -> Self {
        Self {
            cell_advance: Fixed::from_int(8),
            ascent: Fixed::from_int(12),
            descent: Fixed::from_int(4),
            line_gap: Fixed::ZERO,
            tab_width: 4,
        }
    }
}

/// Lays out text on a fixed cell grid.
#[derive(Debug, Clone, Default)]
pub struct MonospaceShaper {
    config: ShaperConfig,
}

impl MonospaceShaper {
    /// Create a shaper.
    pub fn new(config: ShaperConfig) -> Self {
        Self { config }
    }

    /// The shaper configuration.
    pub fn config(&self) -> &ShaperConfig {
        &self.config
    }

    /// Distance between two baselines, in pixels.
    pub fn line_height(&self) -> i32 {
        (self.config.ascent + self.config.descent + self.config.line_gap).ceil()
    }

    /// Width of a grapheme cluster in cells, given the cell column it starts at.
    fn cluster_cells(&self, cluster: &str, column: usize) -> usize {
        if cluster == "\t" {
            let tab_width = self.config.tab_width.max(1);
            tab_width - column % tab_width
        } else {
            UnicodeWidthStr::width(cluster)
        }
    }

    /// Shape `text` into one [`Line`] per `\n`-separated line.
    ///
    /// A trailing `\r` is not shaped but still counts as a rune, as does every `\n`, so rune
    /// offsets match the document. Baselines start at the first line's ascent.
    pub fn shape(&self, text: &str) -> Vec<Line> {
        let config = &self.config;
        let line_height = self.line_height();
        let mut lines = Vec::new();
        let mut rune_off = 0usize;
        let mut y = config.ascent.ceil();

        for raw in text.split('\n') {
            let (content, cr) = match raw.strip_suffix('\r') {
                Some(content) => (content, 1),
                None => (raw, 0),
            };

            let mut line = Line::new(rune_off);
            line.y_off = y;
            line.ascent = config.ascent;
            line.descent = config.descent;

            let mut column = 0usize;
            let mut x = Fixed::ZERO;
            for cluster in content.graphemes(true) {
                let cells = self.cluster_cells(cluster, column);
                let advance = config.cell_advance * cells as i32;
                line.push(Glyph {
                    id: cluster.chars().next().map_or(0, u32::from),
                    x,
                    y,
                    advance,
                    ascent: config.ascent,
                    descent: config.descent,
                    bounds: GlyphBounds {
                        min_x: Fixed::ZERO,
                        min_y: -config.ascent,
                        max_x: advance,
                        max_y: config.descent,
                    },
                    runes: cluster.chars().count() as u16,
                });
                column += cells;
                x += advance;
            }

            rune_off = line.rune_end() + cr + 1;
            y += line_height;
            lines.push(line);
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_rune_offsets() {
        let shaper = MonospaceShaper::default();
        let lines = shaper.shape("fn a\r\nb\n");

        assert_eq!(lines.len(), 3);
        assert_eq!((lines[0].rune_off, lines[0].runes), (0, 4));
        assert_eq!((lines[1].rune_off, lines[1].runes), (6, 1));
        assert_eq!((lines[2].rune_off, lines[2].runes), (8, 0));
        assert!(lines[2].glyphs.is_empty());

        assert_eq!(lines[0].y_off, 12);
        assert_eq!(lines[1].y_off, 28);
    }

    #[test]
    fn test_shape_clusters_and_widths() {
        let shaper = MonospaceShaper::default();
        // "e" + combining acute is one cluster of two runes; "中" is two cells wide.
        let line = &shaper.shape("e\u{301}中x")[0];

        assert_eq!(line.glyphs.len(), 3);
        assert_eq!(line.glyphs[0].runes, 2);
        assert_eq!(line.glyphs[1].advance, Fixed::from_int(16));
        assert_eq!(line.glyphs[2].x, Fixed::from_int(24));
        assert_eq!(line.runes, 4);
        assert_eq!(line.width, Fixed::from_int(32));
    }

    #[test]
    fn test_shape_tab_stops() {
        let shaper = MonospaceShaper::new(ShaperConfig {
            tab_width: 4,
            ..ShaperConfig::default()
        });
        let line = &shaper.shape("ab\tc")[0];
        // The tab fills cells 2..4.
        assert_eq!(line.glyphs[2].advance, Fixed::from_int(16));
        assert_eq!(line.glyphs[3].x, Fixed::from_int(32));
    }
}
