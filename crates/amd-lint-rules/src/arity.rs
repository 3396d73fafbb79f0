//! Dependency-count versus parameter-count comparison.

use serde::Deserialize;
use std::collections::BTreeSet;

/// Policy for dependencies that have no matching callback parameter.
///
/// Deserializes from `false`, `true` or a list of dependency names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ExtraDependenciesRepr")]
pub enum ExtraDependencies {
    /// Every unbound dependency is reported.
    #[default]
    Forbidden,
    /// Unbound dependencies are never reported.
    Allowed,
    /// Unbound dependencies are tolerated only when all of them are listed.
    AllowList(BTreeSet<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExtraDependenciesRepr {
    Flag(bool),
    Names(Vec<String>),
}

impl TryFrom<ExtraDependenciesRepr> for ExtraDependencies {
    type Error = String;

    fn try_from(repr: ExtraDependenciesRepr) -> Result<Self, Self::Error> {
        match repr {
            ExtraDependenciesRepr::Flag(true) => Ok(Self::Allowed),
            ExtraDependenciesRepr::Flag(false) => Ok(Self::Forbidden),
            ExtraDependenciesRepr::Names(names) => {
                let mut set = BTreeSet::new();
                for name in names {
                    if !set.insert(name.clone()) {
                        return Err(format!(
                            "duplicate dependency name `{name}` in allowExtraDependencies"
                        ));
                    }
                }
                Ok(Self::AllowList(set))
            }
        }
    }
}

impl ExtraDependencies {
    /// Builds an allow-list policy.
    #[must_use]
    pub fn allow_list<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AllowList(names.into_iter().map(Into::into).collect())
    }

    /// Whether the unbound tail of the dependency list is tolerated.
    ///
    /// Slots without a literal name never match an allow-list.
    #[must_use]
    pub fn tolerates(&self, extra: &[Option<String>]) -> bool {
        match self {
            Self::Forbidden => false,
            Self::Allowed => true,
            Self::AllowList(allowed) => extra
                .iter()
                .all(|name| name.as_ref().is_some_and(|n| allowed.contains(n))),
        }
    }
}

/// Outcome of comparing a callback against its dependency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArityVerdict {
    /// Counts agree, or the surplus is tolerated.
    Ok,
    /// More dependencies than parameters.
    TooFew {
        /// Dependency count.
        expected: usize,
        /// Parameter count.
        actual: usize,
    },
    /// More parameters than dependencies.
    TooMany {
        /// Dependency count.
        expected: usize,
        /// Parameter count.
        actual: usize,
    },
}

impl ArityVerdict {
    /// Compares `actual` parameters with the dependency slots in `names`.
    ///
    /// Surplus parameters are always a finding. Surplus dependencies are
    /// checked against `policy`, using only the slots at `[actual, expected)`.
    #[must_use]
    pub fn judge(names: &[Option<String>], actual: usize, policy: &ExtraDependencies) -> Self {
        let expected = names.len();
        if actual > expected {
            Self::TooMany { expected, actual }
        } else if actual < expected && !policy.tolerates(&names[actual..]) {
            Self::TooFew { expected, actual }
        } else {
            Self::Ok
        }
    }

    /// The diagnostic message, or `None` for [`ArityVerdict::Ok`].
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Ok => None,
            Self::TooFew { expected, actual } => Some(format!(
                "Not enough parameters in callback (expected {expected}, found {actual})."
            )),
            Self::TooMany { expected, actual } => Some(format!(
                "Too many parameters in callback (expected {expected}, found {actual})."
            )),
        }
    }
}
