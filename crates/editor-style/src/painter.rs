//! Backend-agnostic text painter.
//!
//! [`TextPainter`] walks the visible lines of a frame, asks the syntax and decoration
//! [`LineSplitter`]s for runs, and turns them into fill/stroke calls on a [`PaintBackend`].

use crate::color::Color;
use crate::geometry::{Fixed, Path, Point, PointF, Rect, RectF};
use crate::layout::{Glyph, Line};
use crate::run::{LineSplitter, RenderRun};
use crate::style::TextStyle;

/// Drawing surface the painter emits into. Coordinates are in pixels relative to the viewport
/// origin.
pub trait PaintBackend {
    /// Restrict subsequent drawing to `rect` until the matching [`PaintBackend::pop_clip`].
    fn push_clip(&mut self, rect: Rect);

    /// Drop the innermost clip.
    fn pop_clip(&mut self);

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: RectF, color: Color);

    /// Stroke a path with a line of `width` pixels.
    fn stroke_path(&mut self, path: &Path, width: f32, color: Color);

    /// Fill glyph outlines.
    ///
    /// `origin` is the dot of the first glyph; glyph `i` sits at
    /// `origin.x + (glyphs[i].x - glyphs[0].x)`.
    fn fill_glyphs(&mut self, origin: PointF, glyphs: &[Glyph], text_style: TextStyle, color: Color);
}

/// Painter settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PainterConfig {
    /// Width of underline, strikethrough, border and squiggle strokes, in pixels.
    pub stroke_width: f32,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self { stroke_width: 1.0 }
    }
}

/// Paints styled lines into a viewport.
#[derive(Debug, Clone, Default)]
pub struct TextPainter {
    config: PainterConfig,
    /// Document-space rectangle to fill with text.
    viewport: Rect,
    scroll_off: Point,
    /// Space outside the text bounds needed so that no part of a glyph is clipped.
    padding: Rect,
    /// Runs of the line being painted, reused across lines.
    run_buffer: Vec<RenderRun>,
}

impl TextPainter {
    /// Create a painter.
    pub fn new(config: PainterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Set the document rectangle to paint and the current scroll offset.
    pub fn set_viewport(&mut self, viewport: Rect, scroll_off: Point) {
        self.viewport = viewport;
        self.scroll_off = scroll_off;
    }

    /// The painted document rectangle.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Glyph overhang accumulated so far.
    pub fn padding(&self) -> Rect {
        self.padding
    }

    /// Whether the logical bounds of `glyph` intersect the viewport.
    pub fn is_glyph_visible(&self, glyph: &Glyph) -> bool {
        let bounds = Rect::from_coords(
            glyph.x.floor(),
            glyph.y - glyph.ascent.ceil(),
            (glyph.x + glyph.advance).ceil(),
            glyph.y + glyph.descent.ceil(),
        );
        bounds.touches(&self.viewport)
    }

    /// Grow the padding by how far `glyph`'s ink overhangs its logical box.
    fn update_padding(&mut self, glyph: &Glyph) {
        let bounds = glyph.bounds;
        self.padding.min.x = self.padding.min.x.min(bounds.min_x.floor());
        self.padding.max.x = self.padding.max.x.max((bounds.max_x - glyph.advance).ceil());
        self.padding.min.y = self.padding.min.y.min((bounds.min_y + glyph.ascent).floor());
        self.padding.max.y = self.padding.max.y.max((bounds.max_y - glyph.descent).ceil());
    }

    /// Lines intersecting the viewport vertically. Lines are ordered top to bottom, so the
    /// walk stops at the first line below it.
    fn visible_lines(viewport: Rect, lines: &[Line]) -> impl Iterator<Item = &Line> {
        lines
            .iter()
            .take_while(move |line| line.y_off - line.ascent.floor() <= viewport.max.y)
            .filter(move |line| {
                line.descent.ceil() + line.y_off >= viewport.min.y && !line.glyphs.is_empty()
            })
    }

    /// Paint one frame.
    ///
    /// Text runs come from `syntax`; without it every line is a single unstyled run painted
    /// with `default_color`. Decoration runs come from `decorations` and are painted after the
    /// text of each line; without it there is no decoration pass.
    pub fn paint<B: PaintBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        lines: &[Line],
        default_color: Color,
        syntax: Option<&dyn LineSplitter>,
        decorations: Option<&dyn LineSplitter>,
    ) {
        let viewport = self.viewport;
        for line in Self::visible_lines(viewport, lines) {
            for glyph in &line.glyphs {
                self.update_padding(glyph);
            }
        }

        let clip = Rect::new(
            viewport.min + self.padding.min,
            viewport.max + self.padding.max,
        )
        .offset(Point::new(-self.scroll_off.x, -self.scroll_off.y));
        backend.push_clip(clip);

        let mut runs = std::mem::take(&mut self.run_buffer);
        let mut painted = 0usize;
        let mut run_count = 0usize;
        for line in Self::visible_lines(viewport, lines) {
            let line_off =
                PointF::new(line.x_off.to_f32(), line.y_off as f32) - PointF::from(viewport.min);

            match syntax {
                Some(source) => source.split(line, &mut runs),
                None => {
                    runs.clear();
                    runs.push(RenderRun::new(0..line.glyphs.len(), Fixed::ZERO));
                }
            }
            run_count += runs.len();
            self.paint_runs(backend, line_off, line, &runs, default_color, false);

            if let Some(source) = decorations {
                source.split(line, &mut runs);
                run_count += runs.len();
                self.paint_runs(backend, line_off, line, &runs, default_color, true);
            }
            painted += 1;
        }
        self.run_buffer = runs;

        backend.pop_clip();
        tracing::trace!(target: "style.painter", lines = lines.len(), painted, runs = run_count, "frame painted");
    }

    fn paint_runs<B: PaintBackend + ?Sized>(
        &self,
        backend: &mut B,
        line_off: PointF,
        line: &Line,
        runs: &[RenderRun],
        default_color: Color,
        decoration_pass: bool,
    ) {
        for run in runs {
            let glyphs = run.glyphs(line);
            let Some(first) = glyphs.first() else {
                continue;
            };
            let origin = line_off + PointF::new(run.offset.round() as f32, 0.0);

            if let Some(bg) = run.bg {
                backend.fill_rect(RectF::from(run.bounds(line)).offset(origin), bg);
            }

            if !decoration_pass {
                let color = run.fg.unwrap_or(default_color);
                backend.fill_glyphs(origin, glyphs, run.text_style, color);
            }

            let advance = run.advance(line);
            if let Some(stroke) = run.underline {
                let y = first.descent.to_f32();
                let mut path = Path::new();
                path.move_to(origin + PointF::new(0.0, y));
                path.line_to(origin + PointF::new(advance.to_f32(), y));
                self.stroke(backend, &path, stroke.color.unwrap_or(default_color));
            }
            if let Some(stroke) = run.strikethrough {
                let y = ((first.ascent + first.descent) / 2 - first.ascent).to_f32();
                let mut path = Path::new();
                path.move_to(origin + PointF::new(0.0, y));
                path.line_to(origin + PointF::new(advance.to_f32(), y));
                self.stroke(backend, &path, stroke.color.unwrap_or(default_color));
            }
            if let Some(stroke) = run.border {
                let path = Path::rect(RectF::from(run.bounds(line)).offset(origin));
                self.stroke(backend, &path, stroke.color.unwrap_or(default_color));
            }
            if let Some(stroke) = run.squiggle
                && let Some(path) = squiggle_path(origin, first.descent, advance)
            {
                self.stroke(backend, &path, stroke.color.unwrap_or(default_color));
            }
        }
    }

    fn stroke<B: PaintBackend + ?Sized>(&self, backend: &mut B, path: &Path, color: Color) {
        if !color.is_set() {
            return;
        }
        backend.stroke_path(path, self.config.stroke_width, color);
    }
}

/// Wavy line under a run, built from quadratic curves alternating above and below the descent
/// line.
///
/// The amplitude is half the descent and there are `advance / (2 * amplitude)` whole waves of
/// two segments each. Runs too short for one wave get no squiggle.
fn squiggle_path(origin: PointF, descent: Fixed, advance: Fixed) -> Option<Path> {
    let amplitude = descent / 2;
    if amplitude <= Fixed::ZERO {
        return None;
    }

    let waves = advance.to_bits() / (amplitude.to_bits() * 2);
    if waves <= 0 {
        return None;
    }

    let segments = waves * 2;
    let segment_width = advance / segments;
    let base_y = descent;

    let mut path = Path::new();
    path.move_to(origin + PointF::new(0.0, base_y.to_f32()));

    let mut x = Fixed::ZERO;
    let mut offset = amplitude;
    for _ in 0..segments {
        let next_x = x + segment_width;
        let ctrl_x = x + segment_width / 2;
        path.quad_to(
            origin + PointF::new(ctrl_x.to_f32(), (base_y + offset).to_f32()),
            origin + PointF::new(next_x.to_f32(), base_y.to_f32()),
        );
        x = next_x;
        offset = -offset;
    }
    Some(path)
}
