//! Recognition of module-definition call shapes.
//!
//! [`classify`] looks at one call expression and decides whether it is a
//! `define`, `require` or `requirejs` call with a statically located
//! dependency list and callback. Calls that do not fit any shape are not
//! applicable and yield `None`; that covers the CommonJS wrapper
//! `define(function (require, exports, module) {})`, object-literal
//! factories and anything called through a member expression.

use amd_lint_core::{JsNode, NodeKind};

/// The loader entry point a call goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loader {
    /// `define(...)`
    Define,
    /// `require(...)`
    Require,
    /// `requirejs(...)`
    RequireJs,
}

impl Loader {
    /// Maps a callee identifier to a loader.
    #[must_use]
    pub fn from_callee(name: &str) -> Option<Self> {
        match name {
            "define" => Some(Self::Define),
            "require" => Some(Self::Require),
            "requirejs" => Some(Self::RequireJs),
            _ => None,
        }
    }

    /// The callee identifier for this loader.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Define => "define",
            Self::Require => "require",
            Self::RequireJs => "requirejs",
        }
    }

    /// `define` takes a leading string as a module id, never as a
    /// dependency, so only `require`/`requirejs` accept the bare-string
    /// single-dependency shorthand.
    fn accepts_bare_string(self) -> bool {
        !matches!(self, Self::Define)
    }
}

/// The parts of a recognized module-definition call.
#[derive(Debug, Clone, Copy)]
pub struct ModuleCall<'a> {
    /// Leading module id of the named form.
    pub module_id: Option<JsNode<'a>>,
    /// The dependency list expression (array, string or anything else).
    pub dependencies: JsNode<'a>,
    /// The callback whose parameters receive the dependencies.
    pub callback: JsNode<'a>,
    /// Error callback; never counted against the dependencies.
    pub errback: Option<JsNode<'a>>,
}

impl ModuleCall<'_> {
    /// Returns true when an error callback follows the callback.
    #[must_use]
    pub fn has_errback(&self) -> bool {
        self.errback.is_some()
    }
}

/// A recognized module-definition call.
#[derive(Debug, Clone, Copy)]
pub enum CallShape<'a> {
    /// `define(deps, callback)`
    DefineAnonymous(ModuleCall<'a>),
    /// `define("id", deps, callback)`
    DefineNamed(ModuleCall<'a>),
    /// `require(deps, callback[, errback])`
    Require(ModuleCall<'a>),
    /// `requirejs(deps, callback[, errback])`
    RequireJs(ModuleCall<'a>),
}

impl<'a> CallShape<'a> {
    fn new(loader: Loader, call: ModuleCall<'a>) -> Self {
        match loader {
            Loader::Define if call.module_id.is_some() => Self::DefineNamed(call),
            Loader::Define => Self::DefineAnonymous(call),
            Loader::Require => Self::Require(call),
            Loader::RequireJs => Self::RequireJs(call),
        }
    }

    /// Returns the extracted call parts.
    #[must_use]
    pub fn call(&self) -> &ModuleCall<'a> {
        match self {
            Self::DefineAnonymous(call)
            | Self::DefineNamed(call)
            | Self::Require(call)
            | Self::RequireJs(call) => call,
        }
    }

    /// Returns the loader this call goes through.
    #[must_use]
    pub fn loader(&self) -> Loader {
        match self {
            Self::DefineAnonymous(_) | Self::DefineNamed(_) => Loader::Define,
            Self::Require(_) => Loader::Require,
            Self::RequireJs(_) => Loader::RequireJs,
        }
    }
}

/// Classifies a call expression, or returns `None` when it is not a
/// recognized module-definition call.
#[must_use]
pub fn classify(call: JsNode<'_>) -> Option<CallShape<'_>> {
    let loader = Loader::from_callee(call.callee_name()?)?;
    let args = call.arguments();

    // Spread arguments make every position unknowable.
    if args.iter().any(|a| a.kind() == NodeKind::SpreadElement) {
        return None;
    }

    let module_call = match args.as_slice() {
        [deps, callback] if callback.is_function() && is_dependency_list(loader, *deps) => {
            ModuleCall {
                module_id: None,
                dependencies: *deps,
                callback: *callback,
                errback: None,
            }
        }
        [deps, callback, errback]
            if callback.is_function()
                && errback.is_function()
                && is_dependency_list(loader, *deps) =>
        {
            ModuleCall {
                module_id: None,
                dependencies: *deps,
                callback: *callback,
                errback: Some(*errback),
            }
        }
        [id, deps, callback]
            if id.kind() == NodeKind::StringLiteral
                && callback.is_function()
                && is_dependency_list(loader, *deps) =>
        {
            ModuleCall {
                module_id: Some(*id),
                dependencies: *deps,
                callback: *callback,
                errback: None,
            }
        }
        _ => return None,
    };

    Some(CallShape::new(loader, module_call))
}

/// Whether `node` can stand in the dependency-list position.
///
/// Factories and object literals cannot. Whether the list is statically
/// countable is decided later by the resolver.
fn is_dependency_list(loader: Loader, node: JsNode<'_>) -> bool {
    match node.kind() {
        NodeKind::FunctionExpression
        | NodeKind::ArrowFunction
        | NodeKind::FunctionDeclaration
        | NodeKind::ObjectLiteral => false,
        NodeKind::StringLiteral => loader.accepts_bare_string(),
        _ => true,
    }
}
