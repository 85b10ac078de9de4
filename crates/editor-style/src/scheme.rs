//! Color schemes: scope name → packed style resolution.
//!
//! A [`ColorScheme`] maps registered [`StyleScope`]s to a text style plus foreground/background
//! colors. Lookups walk up the scope hierarchy (`keyword.control.if` → `keyword.control` →
//! `keyword`) until a registered ancestor is found, falling back to the scheme default. This
//! gives CSS-like specificity without explicit cascade rules.

use crate::color::{Color, ColorId, ColorRegistry, Palette};
use crate::error::StyleError;
use crate::scope::{StyleScope, is_valid_scope, parent_scope};
use crate::style::{MAX_COLOR_ID, MAX_SCOPE_INDEX, StyleMeta, TextStyle};
use std::collections::HashMap;

/// Name of the implicitly registered fallback scope.
pub const DEFAULT_SCOPE: &str = "_default_";

/// Non-packed style of a registered scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawStyle {
    text_style: TextStyle,
    fg: ColorId,
    bg: ColorId,
}

impl RawStyle {
    fn pack(self, scope_index: usize) -> StyleMeta {
        StyleMeta::pack(scope_index, self.fg, self.bg, self.text_style)
    }
}

/// Token scopes and their styles used for syntax highlighting.
///
/// Scope indices are 1-based: index 0 is never handed out, so a registered style can never
/// pack to [`StyleMeta::UNSET`].
#[derive(Debug, Clone, Default)]
pub struct ColorScheme {
    name: String,
    palette: Palette,
    colors: ColorRegistry,
    /// Registered scopes; the scope at position `i` has index `i + 1`.
    scopes: Vec<StyleScope>,
    scope_index: HashMap<StyleScope, usize>,
    styles: HashMap<usize, RawStyle>,
}

impl ColorScheme {
    /// Create an empty scheme.
    pub fn new(name: impl Into<String>, palette: Palette) -> Self {
        Self {
            name: name.into(),
            palette,
            ..Self::default()
        }
    }

    /// Scheme name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Editor-wide default colors.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Register a style for `scope` and return the scope index.
    ///
    /// Registering the same scope again keeps its index and replaces its style. The first call
    /// also registers [`DEFAULT_SCOPE`] with the palette foreground and no background, so that
    /// every lookup resolves to something.
    pub fn add_style(
        &mut self,
        scope: impl Into<StyleScope>,
        text_style: TextStyle,
        fg: Color,
        bg: Color,
    ) -> Result<usize, StyleError> {
        let scope = scope.into();
        if !scope.is_valid() {
            return Err(StyleError::InvalidScope(scope.to_string()));
        }

        if !self.scope_index.contains_key(DEFAULT_SCOPE) {
            let fg = self.palette.foreground;
            self.insert_style(StyleScope::new(DEFAULT_SCOPE), TextStyle::empty(), fg, Color::UNSET)?;
        }

        self.insert_style(scope, text_style, fg, bg)
    }

    fn insert_style(
        &mut self,
        scope: StyleScope,
        text_style: TextStyle,
        fg: Color,
        bg: Color,
    ) -> Result<usize, StyleError> {
        let mut new_colors = 0;
        if self.colors.id_of(fg).is_none() {
            new_colors += 1;
        }
        if bg != fg && self.colors.id_of(bg).is_none() {
            new_colors += 1;
        }
        if self.colors.len() + new_colors > MAX_COLOR_ID + 1 {
            return Err(StyleError::ColorCapacity {
                limit: MAX_COLOR_ID + 1,
            });
        }

        let index = match self.scope_index.get(&scope) {
            Some(&index) => index,
            None => {
                if self.scopes.len() >= MAX_SCOPE_INDEX {
                    return Err(StyleError::ScopeCapacity {
                        limit: MAX_SCOPE_INDEX,
                    });
                }
                self.scopes.push(scope.clone());
                let index = self.scopes.len();
                self.scope_index.insert(scope.clone(), index);
                index
            }
        };

        let fg = self.colors.add(fg);
        let bg = self.colors.add(bg);
        self.styles.insert(index, RawStyle { text_style, fg, bg });

        tracing::debug!(target: "style.scheme", scheme = %self.name, %scope, index, "style registered");
        Ok(index)
    }

    /// Re-pack the style of an already resolved scope index.
    ///
    /// Returns [`StyleMeta::UNSET`] when the index has no style.
    pub fn get_style_by_id(&self, scope_index: usize) -> StyleMeta {
        match self.styles.get(&scope_index) {
            Some(style) => style.pack(scope_index),
            None => StyleMeta::UNSET,
        }
    }

    /// Resolve `scope` to a packed style.
    ///
    /// The most specific registered scope wins: the scope itself, else its nearest registered
    /// ancestor, else the scheme default. Returns [`StyleMeta::UNSET`] only when no style was
    /// ever added to the scheme.
    pub fn get_token_style(&self, scope: &str) -> StyleMeta {
        let mut current = scope;
        while is_valid_scope(current) {
            if let Some(style) = self
                .scope_index
                .get(current)
                .and_then(|index| self.styles.get(index).map(|style| style.pack(*index)))
            {
                return style;
            }
            current = parent_scope(current);
        }

        match self.scope_index.get(DEFAULT_SCOPE) {
            Some(&index) => self.get_style_by_id(index),
            None => {
                tracing::warn!(target: "style.scheme", scheme = %self.name, scope, "no default style registered");
                StyleMeta::UNSET
            }
        }
    }

    /// Index of a registered scope (exact match only).
    pub fn scope_index(&self, scope: &str) -> Option<usize> {
        self.scope_index.get(scope).copied()
    }

    /// Scope registered under `index`.
    pub fn scope(&self, index: usize) -> Option<&StyleScope> {
        index.checked_sub(1).and_then(|pos| self.scopes.get(pos))
    }

    /// All registered scopes, in index order (the first has index 1).
    pub fn scopes(&self) -> &[StyleScope] {
        &self.scopes
    }

    /// Look up a color id. Unknown ids yield [`Color::UNSET`].
    pub fn color(&self, id: ColorId) -> Color {
        self.colors.get(id)
    }

    /// The scheme's color registry.
    pub fn colors(&self) -> &ColorRegistry {
        &self.colors
    }
}
