#![warn(missing_docs)]
//! Editor Style - styling and render-run pipeline for code editors
//!
//! # Overview
//!
//! `editor-style` decides, for every visible glyph of a shaped line, which colors and
//! decorative strokes apply, and turns possibly overlapping style ranges into ordered,
//! paint-ready runs. It does not tokenize, shape or rasterize: tokens come from an external
//! tokenizer, lines from an external shaper, and drawing goes through a [`PaintBackend`].
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────────────────────┐   ┌─────────────────────────────┐
//! │ ColorScheme (scope → style)  │   │ DecorationTree (overlapping │
//! │ TextTokens (sorted spans)    │   │ ranges, tagged by source)   │
//! └──────────────┬───────────────┘   └──────────────┬──────────────┘
//!                │ LineSplitter                     │ LineSplitter
//!                ▼                                  ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │ TextPainter: cull lines, paint text runs, then decoration runs │
//! └───────────────────────────────┬───────────────────────────────┘
//!                                 ▼
//!                           PaintBackend
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use editor_style::{
//!     Color, ColorScheme, LineSplitter, MonospaceShaper, Palette, TextStyle, TextTokens, Token,
//! };
//! use std::sync::Arc;
//!
//! let red = Color::rgb(0xFF, 0, 0);
//! let mut scheme = ColorScheme::new("demo", Palette::with_foreground(Color::rgb(0xEE, 0xEE, 0xEE)));
//! scheme.add_style("keyword", TextStyle::BOLD, red, Color::UNSET).unwrap();
//!
//! let mut tokens = TextTokens::new(Arc::new(scheme));
//! tokens.set([Token::new(0, 7, "keyword")]);
//!
//! let lines = MonospaceShaper::default().shape("function");
//! let mut runs = Vec::new();
//! tokens.split(&lines[0], &mut runs);
//!
//! assert_eq!(runs.len(), 2);
//! assert_eq!(runs[0].glyphs, 0..7);
//! assert_eq!(runs[0].fg, Some(red));
//! assert_eq!(runs[1].glyphs, 7..8);
//! ```
//!
//! # Module Description
//!
//! - [`color`] - Colors, the deduplicating color registry and palettes
//! - [`style`] - Text style flags and the packed style metadata codec
//! - [`scope`] - Dotted style scopes
//! - [`scheme`] - Color schemes with parent-scope fallback
//! - [`tokens`] - Syntax spans and the syntax line splitter
//! - [`intervals`] - Interval index
//! - [`decorations`] - Decoration tree and the decoration line splitter
//! - [`layout`] / [`geometry`] - Shaped lines and geometry primitives
//! - [`run`] - Render runs and the [`LineSplitter`] trait
//! - [`painter`] - Text painter and paint backend trait
//! - [`shaper`] - Monospace reference shaper
//!
//! # Threading
//!
//! Everything here is single-threaded per frame. Token and decoration sets are mutated
//! between frames and read during painting; schemes are shared behind `Arc`.

pub mod color;
pub mod decorations;
pub mod error;
pub mod geometry;
pub mod intervals;
pub mod layout;
pub mod painter;
pub mod run;
pub mod scheme;
pub mod scope;
pub mod shaper;
pub mod style;
pub mod tokens;

pub use color::{Color, ColorId, ColorRegistry, Palette, PaletteAlpha};
pub use decorations::{Decoration, DecorationTree};
pub use error::StyleError;
pub use geometry::{Fixed, Path, PathSegment, Point, PointF, Rect, RectF};
pub use intervals::{Interval, IntervalTree};
pub use layout::{Glyph, GlyphBounds, Line};
pub use painter::{PaintBackend, PainterConfig, TextPainter};
pub use run::{LineSplitter, RenderRun, StrokeStyle};
pub use scheme::{ColorScheme, DEFAULT_SCOPE};
pub use scope::StyleScope;
pub use shaper::{MonospaceShaper, ShaperConfig};
pub use style::{MAX_COLOR_ID, MAX_SCOPE_INDEX, StyleMeta, TextStyle, TokenStyle};
pub use tokens::{TextTokens, Token};
