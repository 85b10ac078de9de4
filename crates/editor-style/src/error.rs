//! Error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Configuration-time errors produced by `editor-style`.
///
/// Nothing on the per-frame path (queries, splitting, painting) returns this type.
pub enum StyleError {
    #[error("invalid style scope '{0}'")]
    /// A scope string is empty, or has an empty dot-separated segment.
    InvalidScope(String),

    #[error("too many style scopes (limit {limit})")]
    /// The scheme already holds as many scopes as the packed scope field can address.
    ScopeCapacity {
        /// Maximum number of scopes a scheme can hold.
        limit: usize,
    },

    #[error("too many distinct colors (limit {limit})")]
    /// The scheme's color registry is full for the packed color fields.
    ColorCapacity {
        /// Maximum number of colors a scheme can hold.
        limit: usize,
    },

    #[error("invalid range {start}..{end}")]
    /// A range whose start lies after its end.
    InvalidRange {
        /// Range start (rune offset).
        start: usize,
        /// Range end (rune offset).
        end: usize,
    },

    #[error("invalid hex color '{value}': {message}")]
    /// A hexadecimal color string could not be parsed.
    InvalidColor {
        /// The offending input.
        value: String,
        /// What was wrong with it.
        message: String,
    },
}
