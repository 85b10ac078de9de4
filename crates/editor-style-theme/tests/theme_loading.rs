use editor_style::{Color, LineSplitter, MonospaceShaper, TextStyle, TextTokens, Token};
use editor_style_theme::{ThemeError, ThemeLoader};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_dracula_from_path() {
    let mut loader = ThemeLoader::new();
    let scheme = loader.load_from_path(fixture("dracula.yaml")).unwrap();

    assert_eq!(scheme.name(), "dracula");
    let palette = scheme.palette();
    assert_eq!(palette.foreground, Color::rgb(0xf8, 0xf8, 0xf2));
    assert_eq!(palette.background, Color::rgb(0x28, 0x2a, 0x36));
    assert_eq!(palette.selection, Color::rgba(0x44, 0x47, 0x5a, 0x60));
    assert_eq!(palette.current_line, Color::rgba(0x44, 0x47, 0x5a, 0x30));

    // Default scope plus six styles.
    assert_eq!(scheme.scopes().len(), 7);

    let control = scheme.get_token_style("keyword.control.flow");
    assert_eq!(control.text_style(), TextStyle::BOLD | TextStyle::ITALIC);

    let invalid = scheme.get_token_style("invalid.illegal");
    assert_eq!(scheme.color(invalid.background()), Color::rgb(0xff, 0x55, 0x55));
    assert!(invalid.text_style().contains(TextStyle::SQUIGGLE));
}

#[test]
fn test_loaded_schemes_are_cached_by_name() {
    let mut loader = ThemeLoader::new();
    assert!(loader.is_empty());
    let loaded = loader.load_from_path(fixture("dracula.yaml")).unwrap();
    loader
        .load_from_str("name: light\nforeground: \"#000000\"\n")
        .unwrap();

    assert_eq!(loader.len(), 2);
    assert_eq!(loader.names(), vec!["dracula", "light"]);
    let cached = loader.get("dracula").unwrap();
    assert!(std::sync::Arc::ptr_eq(&loaded, &cached));
    assert!(loader.get("missing").is_none());
}

#[test]
fn test_reloading_a_name_replaces_the_scheme() {
    let mut loader = ThemeLoader::new();
    loader.load_from_str("name: t\nforeground: \"#000000\"\n").unwrap();
    loader.load_from_str("name: t\nforeground: \"#ffffff\"\n").unwrap();

    assert_eq!(loader.len(), 1);
    assert_eq!(
        loader.get("t").unwrap().palette().foreground,
        Color::rgb(0xff, 0xff, 0xff)
    );
}

#[test]
fn test_load_errors() {
    let mut loader = ThemeLoader::new();
    assert!(matches!(
        loader.load_from_path(fixture("missing.yaml")),
        Err(ThemeError::Io(_))
    ));
    assert!(matches!(
        loader.load_from_str("name: [unterminated"),
        Err(ThemeError::Yaml(_))
    ));
    assert!(matches!(
        loader.load_from_str("name: t\nforeground: \"#000\"\n"),
        Err(ThemeError::Style(_))
    ));
    assert!(matches!(
        loader.load_from_str("name: t\nforeground: \"#000000\"\nstyles:\n  - scope: a..b\n"),
        Err(ThemeError::InvalidStyle { .. })
    ));
    assert!(loader.is_empty());
}

#[test]
fn test_theme_drives_syntax_runs() {
    let mut loader = ThemeLoader::new();
    let scheme = loader.load_from_path(fixture("dracula.yaml")).unwrap();

    let mut tokens = TextTokens::new(scheme);
    tokens.set([
        Token::new(0, 2, "keyword.declaration"),
        Token::new(3, 7, "entity.name.function.rust"),
    ]);

    let lines = MonospaceShaper::default().shape("fn main() {}");
    let mut runs = Vec::new();
    tokens.split(&lines[0], &mut runs);

    let styled: Vec<_> = runs
        .iter()
        .map(|run| (run.glyphs.clone(), run.fg))
        .collect();
    assert_eq!(
        styled,
        vec![
            (0..2, Some(Color::rgb(0xff, 0x79, 0xc6))),
            (2..3, None),
            (3..7, Some(Color::rgb(0x50, 0xfa, 0x7b))),
            (7..12, None),
        ]
    );
}
