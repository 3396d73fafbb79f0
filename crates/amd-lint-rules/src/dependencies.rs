//! Static resolution of dependency lists.

use amd_lint_core::{JsNode, NodeKind};

/// What is statically known about a dependency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyResolution {
    /// The list is countable. One entry per slot, holding the module name
    /// when the slot is a string literal.
    Known(Vec<Option<String>>),
    /// The list is computed at runtime.
    Unknown,
}

impl DependencyResolution {
    /// Resolves a dependency-list expression.
    ///
    /// - `["a", b, , "c"]` is known with four slots; `b` and the hole have no name.
    /// - `"a"` is known with the single dependency `a`.
    /// - Identifiers, calls, spreads and everything else are unknown.
    #[must_use]
    pub fn resolve(expr: JsNode<'_>) -> Self {
        match expr.kind() {
            NodeKind::ArrayLiteral => {
                let slots = expr.elements();
                if slots
                    .iter()
                    .flatten()
                    .any(|n| n.kind() == NodeKind::SpreadElement)
                {
                    return Self::Unknown;
                }
                Self::Known(
                    slots
                        .iter()
                        .map(|slot| slot.and_then(|n| n.string_value()))
                        .collect(),
                )
            }
            NodeKind::StringLiteral => Self::Known(vec![expr.string_value()]),
            _ => Self::Unknown,
        }
    }

    /// Number of dependencies, when known.
    #[must_use]
    pub fn count(&self) -> Option<usize> {
        match self {
            Self::Known(names) => Some(names.len()),
            Self::Unknown => None,
        }
    }
}
