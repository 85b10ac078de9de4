use crate::definition::ThemeDefinition;
use crate::error::ThemeError;
use editor_style::ColorScheme;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
/// Loads YAML themes into ready color schemes, cached by theme name.
pub struct ThemeLoader {
    by_name: HashMap<String, Arc<ColorScheme>>,
}

impl ThemeLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a previously loaded scheme by theme name.
    pub fn get(&self, name: &str) -> Option<Arc<ColorScheme>> {
        self.by_name.get(name).cloned()
    }

    /// Names of all loaded themes, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of loaded themes.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether no theme has been loaded.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Loads a theme from a YAML string. A theme with the same name replaces the cached one.
    pub fn load_from_str(&mut self, yaml: &str) -> Result<Arc<ColorScheme>, ThemeError> {
        let definition = ThemeDefinition::from_yaml(yaml)?;
        self.insert(&definition)
    }

    /// Loads a theme from a filesystem path.
    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> Result<Arc<ColorScheme>, ThemeError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        debug!(target: "style.theme", path = %path.display(), "reading theme file");
        self.load_from_str(&yaml)
    }

    fn insert(&mut self, definition: &ThemeDefinition) -> Result<Arc<ColorScheme>, ThemeError> {
        let scheme = Arc::new(definition.build()?);
        debug!(
            target: "style.theme",
            name = %definition.name,
            styles = definition.styles.len(),
            "theme loaded"
        );
        self.by_name
            .insert(definition.name.clone(), scheme.clone());
        Ok(scheme)
    }
}
