//! Dependency specifier types for pnpm workspaces
//!
//! Handles the two pnpm-only protocols that need rewriting before publish:
//! - `workspace:` (`workspace:*`, `workspace:^`, `workspace:~`, `workspace:1.2.3`)
//! - `catalog:` (`catalog:`, `catalog:react18`)
//!
//! Everything else (`^1.2.3`, `file:../x`, git URLs) is left alone.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of a workspace specifier
pub const WORKSPACE_PROTOCOL: &str = "workspace:";

/// Prefix of a catalog specifier
pub const CATALOG_PROTOCOL: &str = "catalog:";

/// Catalog used when a `catalog:` specifier names none, or names an unknown one
pub const DEFAULT_CATALOG: &str = "default";

/// Range operator put in front of a workspace project's version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeOperator {
    /// Caret range (e.g., `^1.2.3`) - compatible with major version
    Caret,
    /// Tilde range (e.g., `~1.2.3`) - compatible with minor version
    Tilde,
    /// Bare version, no operator
    Exact,
}

impl RangeOperator {
    /// Map the part after `workspace:` to an operator.
    ///
    /// `""`, `*` and `^` mean caret, `~` means tilde, and any longer suffix
    /// keeps its leading `^`/`~`. A suffix starting with a digit pins the
    /// exact version; anything else passes the version through bare.
    pub fn from_workspace_suffix(suffix: &str) -> Self {
        match suffix {
            "" | "*" | "^" => RangeOperator::Caret,
            "~" => RangeOperator::Tilde,
            s if s.starts_with('^') => RangeOperator::Caret,
            s if s.starts_with('~') => RangeOperator::Tilde,
            _ => RangeOperator::Exact,
        }
    }

    /// The operator as it appears in a version range
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeOperator::Caret => "^",
            RangeOperator::Tilde => "~",
            RangeOperator::Exact => "",
        }
    }

    /// Prefix `version` with this operator
    pub fn apply(&self, version: &str) -> String {
        format!("{}{}", self.as_str(), version)
    }
}

impl fmt::Display for RangeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw specifier from a manifest, classified by protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specifier<'a> {
    /// `workspace:<suffix>`, suffix trimmed
    Workspace { suffix: &'a str },
    /// `catalog:<name>`, name trimmed and defaulted to `default`
    Catalog { name: &'a str },
    /// Anything this tool does not rewrite
    Other(&'a str),
}

impl<'a> Specifier<'a> {
    /// Classify a raw specifier string
    pub fn parse(raw: &'a str) -> Self {
        if let Some(suffix) = raw.strip_prefix(WORKSPACE_PROTOCOL) {
            Specifier::Workspace {
                suffix: suffix.trim(),
            }
        } else if let Some(name) = raw.strip_prefix(CATALOG_PROTOCOL) {
            let name = name.trim();
            Specifier::Catalog {
                name: if name.is_empty() { DEFAULT_CATALOG } else { name },
            }
        } else {
            Specifier::Other(raw)
        }
    }

    /// Returns true if this specifier is one we resolve
    pub fn is_resolvable(&self) -> bool {
        !matches!(self, Specifier::Other(_))
    }
}
