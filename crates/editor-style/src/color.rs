//! Colors and the color registry.
//!
//! Styles never carry colors by value. A [`ColorRegistry`] hands out small, stable integer ids
//! and the packed [`StyleMeta`](crate::style::StyleMeta) stores those ids instead.

use crate::error::StyleError;
use std::fmt;

/// Color id handed out by a [`ColorRegistry`].
pub type ColorId = usize;

/// A non-premultiplied RGBA color packed as `0xRRGGBBAA`.
///
/// The all-zero value is reserved to mean "unset"; see [`Color::is_set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(u32);

impl Color {
    /// The unset color.
    pub const UNSET: Self = Self(0);

    /// Create a color from its channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self((r as u32) << 24 | (g as u32) << 16 | (b as u32) << 8 | a as u32)
    }

    /// Create a fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xFF)
    }

    /// Create a color from a raw `0xRRGGBBAA` value.
    pub const fn from_u32(value: u32) -> Self {
        Self(value)
    }

    /// Raw `0xRRGGBBAA` value.
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// Red channel.
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Whether the color holds a value (anything but [`Color::UNSET`]).
    pub const fn is_set(self) -> bool {
        self.0 != 0
    }

    /// Scale the alpha channel by `alpha / 255`.
    #[must_use]
    pub const fn mul_alpha(self, alpha: u8) -> Self {
        let a = (self.a() as u32 * alpha as u32 / 0xFF) as u8;
        Self((self.0 & !0xFF) | a as u32)
    }

    /// Parse `RRGGBB` or `RRGGBBAA`, with an optional leading `#`.
    ///
    /// Six-digit input is fully opaque.
    pub fn from_hex(value: &str) -> Result<Self, StyleError> {
        let hex = value.strip_prefix('#').unwrap_or(value);
        if hex.len() != 6 && hex.len() != 8 {
            return Err(StyleError::InvalidColor {
                value: value.to_string(),
                message: "length must be 6 or 8 hex digits".to_string(),
            });
        }

        let mut channels = [0xFFu8; 4];
        for (idx, channel) in channels.iter_mut().enumerate().take(hex.len() / 2) {
            let digits = hex.get(idx * 2..idx * 2 + 2).ok_or_else(|| StyleError::InvalidColor {
                value: value.to_string(),
                message: "non-ASCII input".to_string(),
            })?;
            *channel = u8::from_str_radix(digits, 16).map_err(|err| StyleError::InvalidColor {
                value: value.to_string(),
                message: err.to_string(),
            })?;
        }

        let [r, g, b, a] = channels;
        Ok(Self::rgba(r, g, b, a))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Color[R: {}, G: {}, B: {}, A: {}]",
            self.r(),
            self.g(),
            self.b(),
            self.a()
        )
    }
}

/// Deduplicating color store.
///
/// Equal colors always receive the same id; ids follow insertion order and stay stable for the
/// lifetime of the registry (until [`ColorRegistry::clear`]).
#[derive(Debug, Clone, Default)]
pub struct ColorRegistry {
    colors: Vec<Color>,
}

impl ColorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `color` and return its id. Re-adding an equal color returns the existing id.
    pub fn add(&mut self, color: Color) -> ColorId {
        if let Some(idx) = self.colors.iter().position(|c| *c == color) {
            return idx;
        }

        self.colors.push(color);
        self.colors.len() - 1
    }

    /// Id of an already registered color.
    pub fn id_of(&self, color: Color) -> Option<ColorId> {
        self.colors.iter().position(|c| *c == color)
    }

    /// Look up a color by id. Unknown ids yield [`Color::UNSET`].
    pub fn get(&self, id: ColorId) -> Color {
        self.colors.get(id).copied().unwrap_or(Color::UNSET)
    }

    /// Forget every registered color.
    pub fn clear(&mut self) {
        self.colors.clear();
    }

    /// Number of registered colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Alpha factors used to derive the highlight colors of a [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteAlpha {
    /// Applied to the contrast background for selections. Defaults to `0x60`.
    pub selection: u8,
    /// Applied to the contrast background for the current-line highlight. Defaults to `0x30`.
    pub current_line: u8,
    /// Applied to the foreground for line numbers. Defaults to `0xb6`.
    pub line_number: u8,
}

impl Default for PaletteAlpha {
    fn default() -> Self {
        Self {
            selection: 0x60,
            current_line: 0x30,
            line_number: 0xb6,
        }
    }
}

/// Editor-wide default colors owned by a color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Palette {
    /// Default text color.
    pub foreground: Color,
    /// Default background color.
    pub background: Color,
    /// Selection highlight.
    pub selection: Color,
    /// Current line highlight.
    pub current_line: Color,
    /// Line number color.
    pub line_number: Color,
}

impl Palette {
    /// Palette with only a foreground set.
    pub fn with_foreground(foreground: Color) -> Self {
        Self {
            foreground,
            ..Self::default()
        }
    }

    /// Derive highlight colors from a theme's base colors.
    pub fn from_theme(
        foreground: Color,
        background: Color,
        contrast_background: Color,
        alpha: PaletteAlpha,
    ) -> Self {
        Self {
            foreground,
            background,
            selection: contrast_background.mul_alpha(alpha.selection),
            current_line: contrast_background.mul_alpha(alpha.current_line),
            line_number: foreground.mul_alpha(alpha.line_number),
        }
    }
}
