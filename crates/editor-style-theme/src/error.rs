use editor_style::StyleError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading a theme.
pub enum ThemeError {
    #[error("YAML parse error: {0}")]
    /// YAML parsing failed.
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    /// Filesystem I/O failed.
    Io(#[from] std::io::Error),

    #[error("invalid theme: {0}")]
    /// A theme-level color could not be parsed.
    Style(#[from] StyleError),

    #[error("invalid style '{scope}': {source}")]
    /// A style entry has a bad color or was refused by the scheme.
    InvalidStyle {
        /// Scope of the rejected entry.
        scope: String,
        /// Why it was rejected.
        source: StyleError,
    },
}
