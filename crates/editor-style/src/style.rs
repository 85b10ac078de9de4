//! Packed style metadata.
//!
//! [`StyleMeta`] encodes everything a renderer needs to style a syntax span into 4 bytes, the
//! same way `TokenMetadata` works in Monaco/VS Code:
//!
//! ```text
//! Bits:  31   ...   0
//! [3][7][8][8][6] = 32
//!  |  |  |  |  |
//!  |  |  |  |  └── text style flags (6 bits: bold, italic, underline, squiggle, strikethrough, border)
//!  |  |  |  └───── background color id (8 bits, 0-255)
//!  |  |  └──────── foreground color id (8 bits, 0-255)
//!  |  └─────────── scope index (7 bits, 0-127)
//!  └────────────── reserved (3 bits)
//! ```
//!
//! Color ids index the owning scheme's [`ColorRegistry`](crate::color::ColorRegistry).

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Independently combinable text style flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextStyle: u8 {
        /// Bold text.
        const BOLD          = 0b0000_0001;
        /// Italic text.
        const ITALIC        = 0b0000_0010;
        /// Straight underline.
        const UNDERLINE     = 0b0000_0100;
        /// Wavy underline.
        const SQUIGGLE      = 0b0000_1000;
        /// Strikethrough.
        const STRIKETHROUGH = 0b0001_0000;
        /// Stroked bounding box.
        const BORDER        = 0b0010_0000;
    }
}

const TEXT_STYLE_OFFSET: u32 = 0;
const BACKGROUND_OFFSET: u32 = 6;
const FOREGROUND_OFFSET: u32 = 14;
const SCOPE_OFFSET: u32 = 22;

const TEXT_STYLE_BITS: u32 = 0b11_1111;
const COLOR_BITS: u32 = 0xFF;
const SCOPE_BITS: u32 = 0b111_1111;

/// Largest scope index representable in a [`StyleMeta`].
pub const MAX_SCOPE_INDEX: usize = SCOPE_BITS as usize;
/// Largest color id representable in a [`StyleMeta`].
pub const MAX_COLOR_ID: usize = COLOR_BITS as usize;

/// Bit-packed style of a syntax span. The zero value means "no style".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StyleMeta(u32);

impl StyleMeta {
    /// The unset style.
    pub const UNSET: Self = Self(0);

    /// Pack the four fields.
    ///
    /// Every field is masked to its bit width first, so out-of-range values are silently
    /// truncated. Schemes bound their scope and color counts at registration time, which keeps
    /// real inputs in range.
    pub const fn pack(scope: usize, fg: usize, bg: usize, text_style: TextStyle) -> Self {
        let mut bits = 0u32;
        bits |= (scope as u32 & SCOPE_BITS) << SCOPE_OFFSET;
        bits |= (fg as u32 & COLOR_BITS) << FOREGROUND_OFFSET;
        bits |= (bg as u32 & COLOR_BITS) << BACKGROUND_OFFSET;
        bits |= (text_style.bits() as u32 & TEXT_STYLE_BITS) << TEXT_STYLE_OFFSET;
        Self(bits)
    }

    /// Inverse of [`StyleMeta::pack`]: `(scope, fg, bg, text_style)`.
    pub const fn unpack(self) -> (usize, usize, usize, TextStyle) {
        (
            self.scope(),
            self.foreground(),
            self.background(),
            self.text_style(),
        )
    }

    /// Reinterpret raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether this is the unset style.
    pub const fn is_unset(self) -> bool {
        self.0 == 0
    }

    /// Scope index.
    pub const fn scope(self) -> usize {
        ((self.0 >> SCOPE_OFFSET) & SCOPE_BITS) as usize
    }

    /// Foreground color id.
    pub const fn foreground(self) -> usize {
        ((self.0 >> FOREGROUND_OFFSET) & COLOR_BITS) as usize
    }

    /// Background color id.
    pub const fn background(self) -> usize {
        ((self.0 >> BACKGROUND_OFFSET) & COLOR_BITS) as usize
    }

    /// Text style flags.
    pub const fn text_style(self) -> TextStyle {
        TextStyle::from_bits_truncate(((self.0 >> TEXT_STYLE_OFFSET) & TEXT_STYLE_BITS) as u8)
    }
}

impl fmt::Display for StyleMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scope={} FG={} BG={} Style={:06b}",
            self.scope(),
            self.foreground(),
            self.background(),
            self.text_style().bits()
        )
    }
}

/// A resolved syntax span: `[start, end)` in document runes plus its packed style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenStyle {
    /// Start offset (inclusive), in runes.
    pub start: usize,
    /// End offset (exclusive), in runes.
    pub end: usize,
    /// Packed style.
    pub style: StyleMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_roundtrip() {
        let flags = TextStyle::BOLD | TextStyle::SQUIGGLE | TextStyle::BORDER;
        for (scope, fg, bg) in [(0, 0, 0), (1, 2, 3), (127, 255, 255), (64, 0, 200)] {
            let meta = StyleMeta::pack(scope, fg, bg, flags);
            assert_eq!(meta.unpack(), (scope, fg, bg, flags));
        }
    }

    #[test]
    fn test_pack_roundtrip_random() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x57_71e);
        for flag_bits in 0..=TEXT_STYLE_BITS as u8 {
            let flags = TextStyle::from_bits_truncate(flag_bits);
            for scope in 0..=MAX_SCOPE_INDEX {
                let fg = rng.gen_range(0..=MAX_COLOR_ID);
                let bg = rng.gen_range(0..=MAX_COLOR_ID);
                let meta = StyleMeta::pack(scope, fg, bg, flags);
                assert_eq!(meta.unpack(), (scope, fg, bg, flags), "bits {:#034b}", meta.bits());
            }
        }

        // Color ids at both ends with every scope.
        for scope in 0..=MAX_SCOPE_INDEX {
            for (fg, bg) in [(0, MAX_COLOR_ID), (MAX_COLOR_ID, 0), (MAX_COLOR_ID, MAX_COLOR_ID)] {
                let meta = StyleMeta::pack(scope, fg, bg, TextStyle::all());
                assert_eq!(meta.unpack(), (scope, fg, bg, TextStyle::all()));
            }
        }
    }

    #[test]
    fn test_pack_layout() {
        let meta = StyleMeta::pack(1, 1, 1, TextStyle::BOLD);
        assert_eq!(meta.bits(), (1 << 22) | (1 << 14) | (1 << 6) | 1);
        assert!(StyleMeta::pack(0, 0, 0, TextStyle::empty()).is_unset());
    }

    #[test]
    fn test_pack_truncates_overflow() {
        let meta = StyleMeta::pack(128 + 5, 256 + 7, 256 + 9, TextStyle::ITALIC);
        assert_eq!(meta.unpack(), (5, 7, 9, TextStyle::ITALIC));
        // Reserved bits stay clear.
        assert_eq!(meta.bits() >> 29, 0);
    }

    #[test]
    fn test_all_flags_fit() {
        let meta = StyleMeta::pack(3, 4, 5, TextStyle::all());
        assert_eq!(meta.text_style(), TextStyle::all());
        assert_eq!(meta.scope(), 3);
    }
}
