//! `editor-style-highlight-simple` - Simple (regex-based) tokenizing for `editor-style`.
//!
//! This crate is intended for lightweight formats (JSON/INI/etc.) where a full grammar is
//! unnecessary. Its output feeds [`editor_style::TextTokens::set`] directly.

use editor_style::{StyleScope, TextTokens, Token};
use regex::Regex;

/// A single regex tokenizing rule.
#[derive(Debug, Clone)]
pub struct RegexRule {
    regex: Regex,
    scope: StyleScope,
    capture_group: Option<usize>,
}

impl RegexRule {
    /// Tokens produced by this rule carry `scope`.
    pub fn new(pattern: &str, scope: impl Into<StyleScope>) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            scope: scope.into(),
            capture_group: None,
        })
    }

    /// Tokenize only a capture group of each match.
    ///
    /// Example (INI key):
    /// - pattern: `^\\s*([^=\\s]+)\\s*=`
    /// - capture_group: `1` (the key)
    pub fn with_capture_group(mut self, group: usize) -> Self {
        self.capture_group = Some(group);
        self
    }

    /// Scope assigned to matches.
    pub fn scope(&self) -> &StyleScope {
        &self.scope
    }

    /// Byte ranges of every match (or capture group) in `line`.
    fn matches(&self, line: &str) -> Vec<(usize, usize)> {
        match self.capture_group {
            Some(group) => self
                .regex
                .captures_iter(line)
                .filter_map(|caps| caps.get(group).map(|m| (m.start(), m.end())))
                .collect(),
            None => self
                .regex
                .find_iter(line)
                .map(|m| (m.start(), m.end()))
                .collect(),
        }
    }
}

/// A simple regex-based tokenizer.
///
/// Rules run line by line and are ordered: where two matches overlap, the one starting first
/// wins, and at equal starts the earlier rule wins. The output is sorted and non-overlapping.
#[derive(Debug, Clone)]
pub struct RegexTokenizer {
    rules: Vec<RegexRule>,
}

impl RegexTokenizer {
    /// Create a tokenizer from ordered rules.
    pub fn new(rules: Vec<RegexRule>) -> Self {
        Self { rules }
    }

    /// The rules, in priority order.
    pub fn rules(&self) -> &[RegexRule] {
        &self.rules
    }

    /// Run all rules over `text` and return tokens in rune (char) offsets.
    ///
    /// Lines are split on `\n`; a trailing `\r` is not matched against but still counts as a
    /// rune, so offsets line up with the document.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut found: Vec<(usize, usize, usize)> = Vec::new();
        let mut line_start = 0usize;

        for raw_line in text.split('\n') {
            let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);

            for (rule_idx, rule) in self.rules.iter().enumerate() {
                for (start_byte, end_byte) in rule.matches(line) {
                    if let Some((start, end)) = rune_range(line, start_byte, end_byte) {
                        found.push((line_start + start, line_start + end, rule_idx));
                    }
                }
            }

            line_start += raw_line.chars().count() + 1;
        }

        found.sort_by_key(|&(start, _, rule_idx)| (start, rule_idx));

        let mut tokens = Vec::with_capacity(found.len());
        let mut covered = 0usize;
        for (start, end, rule_idx) in found {
            if start < covered {
                continue;
            }
            covered = end;
            tokens.push(Token::new(start, end, self.rules[rule_idx].scope.clone()));
        }

        tracing::trace!(target: "style.tokens", rules = self.rules.len(), tokens = tokens.len(), "text tokenized");
        tokens
    }

    /// Tokenize `text` and replace the token set of `tokens` with the result.
    pub fn apply(&self, text: &str, tokens: &mut TextTokens) {
        tokens.set(self.tokenize(text));
    }

    /// A small default JSON grammar (strings, numbers, booleans, null).
    pub fn json_default(scopes: SimpleJsonScopes) -> Result<Self, regex::Error> {
        Ok(Self::new(vec![
            // JSON string (single-line, handles escapes)
            RegexRule::new(r#""(?:\\.|[^"\\])*""#, scopes.string)?,
            // JSON number
            RegexRule::new(r#"-?(?:0|[1-9]\d*)(?:\.\d+)?(?:[eE][+-]?\d+)?"#, scopes.number)?,
            // JSON boolean / null
            RegexRule::new(r#"\b(?:true|false)\b"#, scopes.boolean)?,
            RegexRule::new(r#"\bnull\b"#, scopes.null)?,
        ]))
    }

    /// A small default INI grammar (section, key, comment).
    pub fn ini_default(scopes: SimpleIniScopes) -> Result<Self, regex::Error> {
        Ok(Self::new(vec![
            // Comment: ;... or #...
            RegexRule::new(r#"^\s*[;#].*$"#, scopes.comment)?,
            // Section header: [section]
            RegexRule::new(r#"^\s*\[([^\]]+)\]\s*$"#, scopes.section)?.with_capture_group(1),
            // Key: key = value
            RegexRule::new(r#"^\s*([^=\s]+)\s*="#, scopes.key)?.with_capture_group(1),
        ]))
    }
}

/// Scopes used by [`RegexTokenizer::json_default`].
#[derive(Debug, Clone, Copy)]
pub struct SimpleJsonScopes {
    /// String literals.
    pub string: &'static str,
    /// Numbers.
    pub number: &'static str,
    /// `true` / `false`.
    pub boolean: &'static str,
    /// `null`.
    pub null: &'static str,
}

impl Default for SimpleJsonScopes {
    fn default() -> Self {
        Self {
            string: "string.quoted.double.json",
            number: "constant.numeric.json",
            boolean: "constant.language.boolean.json",
            null: "constant.language.null.json",
        }
    }
}

/// Scopes used by [`RegexTokenizer::ini_default`].
#[derive(Debug, Clone, Copy)]
pub struct SimpleIniScopes {
    /// `[section]` names.
    pub section: &'static str,
    /// Keys of `key = value` lines.
    pub key: &'static str,
    /// `;` and `#` comment lines.
    pub comment: &'static str,
}

impl Default for SimpleIniScopes {
    fn default() -> Self {
        Self {
            section: "entity.name.section.ini",
            key: "variable.other.key.ini",
            comment: "comment.line.ini",
        }
    }
}

fn rune_range(line: &str, start_byte: usize, end_byte: usize) -> Option<(usize, usize)> {
    if start_byte >= end_byte || end_byte > line.len() {
        return None;
    }

    let start = line.get(..start_byte)?.chars().count();
    let end = start + line.get(start_byte..end_byte)?.chars().count();
    Some((start, end))
}
