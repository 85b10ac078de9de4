#![warn(missing_docs)]
//! `editor-style-theme` - YAML color themes for `editor-style`.
//!
//! A theme file names the editor's base colors and a list of scoped styles:
//!
//! ```yaml
//! name: dracula
//! foreground: "#f8f8f2"
//! background: "#282a36"
//! styles:
//!   - scope: keyword
//!     foreground: "#ff79c6"
//!     font_style: [bold]
//! ```
//!
//! [`ThemeLoader`] turns such files into shared [`editor_style::ColorScheme`]s ready to hand to
//! `TextTokens`.

mod definition;
mod error;
mod loader;

pub use definition::{AlphaDefinition, FontStyle, StyleDefinition, ThemeDefinition};
pub use error::ThemeError;
pub use loader::ThemeLoader;
