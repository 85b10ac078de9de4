use crate::error::ThemeError;
use editor_style::{Color, ColorScheme, Palette, PaletteAlpha, StyleError, TextStyle};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
/// Raw YAML theme definition.
pub struct ThemeDefinition {
    /// Theme name, used as the cache key.
    pub name: String,

    /// Default text color.
    pub foreground: String,

    #[serde(default)]
    /// Editor background.
    pub background: Option<String>,

    #[serde(default)]
    /// Base color of selection and current-line highlights. Defaults to the foreground.
    pub contrast_background: Option<String>,

    #[serde(default)]
    /// Alpha factors for derived highlight colors.
    pub alpha: AlphaDefinition,

    #[serde(default)]
    /// Per-scope styles, registered in order.
    pub styles: Vec<StyleDefinition>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
/// `alpha:` block of a theme. Missing fields keep their [`PaletteAlpha`] defaults.
pub struct AlphaDefinition {
    /// Selection alpha.
    pub selection: u8,
    /// Current-line alpha.
    pub current_line: u8,
    /// Line-number alpha.
    pub line_number: u8,
}

impl Default for AlphaDefinition {
    fn default() -> Self {
        let alpha = PaletteAlpha::default();
        Self {
            selection: alpha.selection,
            current_line: alpha.current_line,
            line_number: alpha.line_number,
        }
    }
}

impl From<AlphaDefinition> for PaletteAlpha {
    fn from(value: AlphaDefinition) -> Self {
        Self {
            selection: value.selection,
            current_line: value.current_line,
            line_number: value.line_number,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
/// One entry of `styles:`.
pub struct StyleDefinition {
    /// Dotted scope, e.g. `keyword.control`.
    pub scope: String,

    #[serde(default)]
    /// Text color; unset when missing.
    pub foreground: Option<String>,

    #[serde(default)]
    /// Background color; unset when missing.
    pub background: Option<String>,

    #[serde(default)]
    /// Text style flags.
    pub font_style: Vec<FontStyle>,
}

impl StyleDefinition {
    /// Combined text style of all `font_style` flags.
    pub fn text_style(&self) -> TextStyle {
        self.font_style
            .iter()
            .fold(TextStyle::empty(), |acc, flag| acc | TextStyle::from(*flag))
    }

    fn register(&self, scheme: &mut ColorScheme) -> Result<usize, StyleError> {
        let fg = parse_color(self.foreground.as_deref())?;
        let bg = parse_color(self.background.as_deref())?;
        scheme.add_style(self.scope.as_str(), self.text_style(), fg, bg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
/// A `font_style` flag.
pub enum FontStyle {
    /// Bold text.
    Bold,
    /// Italic text.
    Italic,
    /// Straight underline.
    Underline,
    /// Wavy underline.
    Squiggle,
    /// Strikethrough.
    Strikethrough,
    /// Stroked bounding box.
    Border,
}

impl From<FontStyle> for TextStyle {
    fn from(value: FontStyle) -> Self {
        match value {
            FontStyle::Bold => TextStyle::BOLD,
            FontStyle::Italic => TextStyle::ITALIC,
            FontStyle::Underline => TextStyle::UNDERLINE,
            FontStyle::Squiggle => TextStyle::SQUIGGLE,
            FontStyle::Strikethrough => TextStyle::STRIKETHROUGH,
            FontStyle::Border => TextStyle::BORDER,
        }
    }
}

fn parse_color(value: Option<&str>) -> Result<Color, StyleError> {
    value.map_or(Ok(Color::UNSET), Color::from_hex)
}

impl ThemeDefinition {
    /// Parse a YAML theme.
    pub fn from_yaml(yaml: &str) -> Result<Self, ThemeError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Palette described by the theme.
    pub fn palette(&self) -> Result<Palette, ThemeError> {
        let foreground = Color::from_hex(&self.foreground)?;
        let background = parse_color(self.background.as_deref())?;
        let contrast = match self.contrast_background.as_deref() {
            Some(hex) => Color::from_hex(hex)?,
            None => foreground,
        };

        Ok(Palette::from_theme(foreground, background, contrast, self.alpha.into()))
    }

    /// Build a color scheme: the palette plus every style entry, in order.
    pub fn build(&self) -> Result<ColorScheme, ThemeError> {
        let mut scheme = ColorScheme::new(self.name.clone(), self.palette()?);

        for style in &self.styles {
            style
                .register(&mut scheme)
                .map_err(|source| ThemeError::InvalidStyle {
                    scope: style.scope.clone(),
                    source,
                })?;
        }

        Ok(scheme)
    }
}
