//! Dotted style scopes.

use std::borrow::Borrow;
use std::fmt;

/// A TextMate-style dotted scope name, e.g. `keyword.control.if` or `entity.name.function`.
///
/// A scope is valid when it is non-empty and none of its dot-separated segments is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StyleScope(String);

impl StyleScope {
    /// Wrap a scope string. No validation happens here; see [`StyleScope::is_valid`].
    pub fn new(scope: impl Into<String>) -> Self {
        Self(scope.into())
    }

    /// The scope string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the notation is valid.
    pub fn is_valid(&self) -> bool {
        is_valid_scope(&self.0)
    }

    /// The scope with its last segment stripped.
    ///
    /// Single-segment and invalid scopes yield the (invalid) empty scope.
    pub fn parent(&self) -> StyleScope {
        Self(parent_scope(&self.0).to_string())
    }

    /// Whether `other` is a direct sub-scope of `self`.
    pub fn is_child(&self, other: &StyleScope) -> bool {
        self.is_valid() && other.is_valid() && parent_scope(&other.0) == self.0
    }
}

impl fmt::Display for StyleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StyleScope {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StyleScope {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for StyleScope {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StyleScope {
    fn borrow(&self) -> &str {
        &self.0
    }
}

pub(crate) fn is_valid_scope(scope: &str) -> bool {
    !scope.is_empty() && scope.split('.').all(|segment| !segment.is_empty())
}

/// Allocation-free parent walk used by scheme lookups.
pub(crate) fn parent_scope(scope: &str) -> &str {
    if !is_valid_scope(scope) {
        return "";
    }

    match scope.rfind('.') {
        Some(idx) => &scope[..idx],
        None => "",
    }
}
