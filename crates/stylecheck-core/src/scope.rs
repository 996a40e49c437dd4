//! Visibility scopes and scope-range filtering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Compile-time visibility class of a declaration.
///
/// Ordered from most to least visible, so `a <= b` reads
/// "`a` is at least as visible as `b`".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// `public`
    Public,
    /// `protected`
    Protected,
    /// No visibility keyword.
    Package,
    /// `private`
    Private,
    /// Member of an anonymous class body.
    #[serde(rename = "anoninner")]
    AnonInner,
}

impl Scope {
    /// Every scope, most visible first.
    pub const ALL: [Self; 5] = [
        Self::Public,
        Self::Protected,
        Self::Package,
        Self::Private,
        Self::AnonInner,
    ];

    /// Returns the configuration name of this scope.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Package => "package",
            Self::Private => "private",
            Self::AnonInner => "anoninner",
        }
    }

    /// Returns `true` if `self` is at least as visible as `other`.
    #[must_use]
    pub fn is_in(self, other: Self) -> bool {
        self <= other
    }

    /// Returns the less visible of the two scopes.
    #[must_use]
    pub fn least_visible(self, other: Self) -> Self {
        self.max(other)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a scope name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scope '{0}' (expected one of: public, protected, package, private, anoninner)")]
pub struct UnknownScope(pub String);

impl FromStr for Scope {
    type Err = UnknownScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|scope| scope.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownScope(s.to_string()))
    }
}

/// Scope range shared by scope-aware checks.
///
/// `scope` is the least visible scope still checked; `None` checks every
/// scope, anonymous-class members included. `exclude_scope` always wins: a
/// declaration resolved to the excluded scope, or to anything more visible
/// than it, is skipped even when `scope` admits it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeFilter {
    /// Least visible scope still checked.
    pub scope: Option<Scope>,
    /// Scope (and everything more visible) that is never checked.
    pub exclude_scope: Option<Scope>,
}

impl ScopeFilter {
    /// Creates a filter that accepts every scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrows the checked range to `scope` and everything more visible.
    #[must_use]
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Excludes `scope` and everything more visible.
    #[must_use]
    pub fn exclude_scope(mut self, scope: Scope) -> Self {
        self.exclude_scope = Some(scope);
        self
    }

    /// Returns `true` if a declaration resolved to `resolved` must be checked.
    #[must_use]
    pub fn accepts(&self, resolved: Scope) -> bool {
        if self.exclude_scope.is_some_and(|ex| resolved.is_in(ex)) {
            return false;
        }
        self.scope.map_or(true, |floor| resolved.is_in(floor))
    }
}
