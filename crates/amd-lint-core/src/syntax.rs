//! JavaScript syntax tree model backed by Tree-sitter.
//!
//! [`SourceFile`] owns the parsed tree; [`JsNode`] is a cheap, copyable
//! handle that exposes the handful of accessors module-definition rules
//! need (callee, arguments, parameters, array elements, string values)
//! without leaking grammar details into rule code.

use std::path::PathBuf;
use tree_sitter::{Language, Node, Parser, Tree};

use crate::types::Location;

/// Errors produced while parsing a JavaScript source file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The JavaScript grammar could not be loaded into the parser.
    #[error("failed to load JavaScript grammar: {0}")]
    Language(String),

    /// The parser returned no tree.
    #[error("parser produced no syntax tree")]
    NoTree,

    /// The source contains a syntax error.
    #[error("syntax error at line {line}, column {column}")]
    Syntax {
        /// Line of the first error (1-indexed).
        line: usize,
        /// Column of the first error (1-indexed).
        column: usize,
    },
}

/// A parsed JavaScript source file.
pub struct SourceFile {
    source: String,
    tree: Tree,
}

impl SourceFile {
    /// Parses JavaScript source text.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Syntax`] pointing at the first `ERROR` or
    /// `MISSING` node when the source is not valid JavaScript.
    pub fn parse(source: impl Into<String>) -> Result<Self, ParseError> {
        let source = source.into();
        let language: Language = tree_sitter_javascript::LANGUAGE.into();

        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| ParseError::Language(e.to_string()))?;

        let tree = parser.parse(&source, None).ok_or(ParseError::NoTree)?;

        if let Some(error) = first_error(tree.root_node()) {
            let pos = error.start_position();
            return Err(ParseError::Syntax {
                line: pos.row + 1,
                column: pos.column + 1,
            });
        }

        Ok(Self { source, tree })
    }

    /// Returns the source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the `program` node.
    #[must_use]
    pub fn root(&self) -> JsNode<'_> {
        JsNode {
            node: self.tree.root_node(),
            source: &self.source,
        }
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("len", &self.source.len())
            .finish_non_exhaustive()
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// Node kinds the rules care about. Everything else is [`NodeKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `callee(args)`
    CallExpression,
    /// The parenthesized argument list of a call.
    Arguments,
    /// `[a, b]`
    ArrayLiteral,
    /// `{ key: value }`
    ObjectLiteral,
    /// `function (a) {}` and `function* (a) {}`
    FunctionExpression,
    /// `(a) => {}` and `a => a`
    ArrowFunction,
    /// `function name(a) {}`
    FunctionDeclaration,
    /// A bare identifier reference or binding.
    Identifier,
    /// `"text"` or `'text'`
    StringLiteral,
    /// `` `text` ``
    TemplateString,
    /// `...expr`
    SpreadElement,
    /// `object.property`
    MemberExpression,
    /// `name = value` inside `var`, `let`, or `const`.
    VariableDeclarator,
    /// `left = right` and compound forms such as `left += right`.
    AssignmentExpression,
    /// Line or block comment.
    Comment,
    /// Any other node.
    Other,
}

impl NodeKind {
    fn from_grammar(kind: &str) -> Self {
        match kind {
            "call_expression" => Self::CallExpression,
            "arguments" => Self::Arguments,
            "array" => Self::ArrayLiteral,
            "object" => Self::ObjectLiteral,
            "function_expression" | "function" | "generator_function" => Self::FunctionExpression,
            "arrow_function" => Self::ArrowFunction,
            "function_declaration" | "generator_function_declaration" => {
                Self::FunctionDeclaration
            }
            "identifier" => Self::Identifier,
            "string" => Self::StringLiteral,
            "template_string" => Self::TemplateString,
            "spread_element" => Self::SpreadElement,
            "member_expression" => Self::MemberExpression,
            "variable_declarator" => Self::VariableDeclarator,
            "assignment_expression" | "augmented_assignment_expression" => {
                Self::AssignmentExpression
            }
            "comment" => Self::Comment,
            _ => Self::Other,
        }
    }
}

/// A borrowed handle to a node in a [`SourceFile`].
#[derive(Clone, Copy)]
pub struct JsNode<'a> {
    node: Node<'a>,
    source: &'a str,
}

impl<'a> JsNode<'a> {
    fn wrap(&self, node: Node<'a>) -> Self {
        Self {
            node,
            source: self.source,
        }
    }

    /// Returns the node kind tag.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        NodeKind::from_grammar(self.node.kind())
    }

    /// Returns the raw grammar kind (e.g. `"property_identifier"`).
    #[must_use]
    pub fn grammar_kind(&self) -> &'static str {
        self.node.kind()
    }

    /// Identifier unique within the owning tree.
    #[must_use]
    pub fn id(&self) -> usize {
        self.node.id()
    }

    /// Returns the source text covered by this node.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// Line number (1-indexed).
    #[must_use]
    pub fn start_line(&self) -> usize {
        self.node.start_position().row + 1
    }

    /// Column number (1-indexed, in bytes).
    #[must_use]
    pub fn start_column(&self) -> usize {
        self.node.start_position().column + 1
    }

    /// Byte range of this node in the source.
    #[must_use]
    pub fn byte_range(&self) -> std::ops::Range<usize> {
        self.node.start_byte()..self.node.end_byte()
    }

    /// Builds a [`Location`] for this node in `file`.
    #[must_use]
    pub fn location(&self, file: PathBuf) -> Location {
        let range = self.byte_range();
        Location::new(file, self.start_line(), self.start_column())
            .with_span(range.start, range.end - range.start)
    }

    /// Returns the child stored under a grammar field (e.g. `"left"`).
    #[must_use]
    pub fn field(&self, name: &str) -> Option<Self> {
        self.node.child_by_field_name(name).map(|n| self.wrap(n))
    }

    /// Returns all named children in source order.
    #[must_use]
    pub fn named_children(&self) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .named_children(&mut cursor)
            .map(|n| self.wrap(n))
            .collect()
    }

    fn named_children_without_comments(&self) -> Vec<Self> {
        self.named_children()
            .into_iter()
            .filter(|n| n.kind() != NodeKind::Comment)
            .collect()
    }

    /// Strips any parentheses wrapped around this expression.
    ///
    /// `(function (a) {})` yields the function node itself.
    #[must_use]
    pub fn unparenthesized(&self) -> Self {
        let mut node = *self;
        while node.grammar_kind() == "parenthesized_expression" {
            match node.named_children_without_comments().first() {
                Some(inner) => node = *inner,
                None => break,
            }
        }
        node
    }

    /// Returns the first line of the statement or declaration containing
    /// this node, or the node's own line at the top level.
    #[must_use]
    pub fn statement_line(&self) -> usize {
        let mut current = Some(self.node);
        while let Some(node) = current {
            let kind = node.kind();
            if kind.ends_with("_statement") || kind.ends_with("_declaration") {
                return node.start_position().row + 1;
            }
            current = node.parent();
        }
        self.start_line()
    }

    /// Returns true for function and arrow function expressions.
    #[must_use]
    pub fn is_function(&self) -> bool {
        matches!(
            self.kind(),
            NodeKind::FunctionExpression | NodeKind::ArrowFunction
        )
    }

    /// Returns the identifier name, if this node is an identifier.
    #[must_use]
    pub fn identifier_name(&self) -> Option<&'a str> {
        (self.kind() == NodeKind::Identifier).then(|| self.text())
    }

    /// Returns the callee of a call expression.
    #[must_use]
    pub fn callee(&self) -> Option<Self> {
        if self.kind() != NodeKind::CallExpression {
            return None;
        }
        self.field("function")
    }

    /// Returns the callee name when the callee is a plain identifier.
    #[must_use]
    pub fn callee_name(&self) -> Option<&'a str> {
        self.callee()?.identifier_name()
    }

    /// Returns the arguments of a call expression, comments skipped and
    /// parentheses stripped.
    ///
    /// Tagged templates and non-call nodes have no argument list.
    #[must_use]
    pub fn arguments(&self) -> Vec<Self> {
        match self.callee().and(self.field("arguments")) {
            Some(args) if args.kind() == NodeKind::Arguments => args
                .named_children_without_comments()
                .into_iter()
                .map(|a| a.unparenthesized())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Returns the declared parameters of a function or arrow function.
    ///
    /// Rest, default, and destructured parameters each count as one.
    #[must_use]
    pub fn parameters(&self) -> Vec<Self> {
        match self.kind() {
            NodeKind::ArrowFunction => {
                if let Some(single) = self.field("parameter") {
                    return vec![single];
                }
                self.formal_parameters()
            }
            NodeKind::FunctionExpression | NodeKind::FunctionDeclaration => {
                self.formal_parameters()
            }
            _ => Vec::new(),
        }
    }

    fn formal_parameters(&self) -> Vec<Self> {
        self.field("parameters")
            .map(|p| p.named_children_without_comments())
            .unwrap_or_default()
    }

    /// Returns the number of declared parameters.
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.parameters().len()
    }

    /// Returns the slots of an array literal.
    ///
    /// Holes (`[a, , b]`) are `None`, so the slot count matches the
    /// array's runtime `length`. A trailing comma does not add a slot.
    #[must_use]
    pub fn elements(&self) -> Vec<Option<Self>> {
        if self.kind() != NodeKind::ArrayLiteral {
            return Vec::new();
        }

        let mut slots = Vec::new();
        let mut current: Option<Self> = None;
        let mut cursor = self.node.walk();
        for child in self.node.children(&mut cursor) {
            match child.kind() {
                "[" | "comment" => {}
                "," => slots.push(current.take()),
                "]" => {
                    if current.is_some() {
                        slots.push(current.take());
                    }
                }
                _ => current = Some(self.wrap(child).unparenthesized()),
            }
        }
        slots
    }

    /// Returns the decoded value of a string literal.
    #[must_use]
    pub fn string_value(&self) -> Option<String> {
        if self.kind() != NodeKind::StringLiteral {
            return None;
        }

        let mut value = String::new();
        let mut cursor = self.node.walk();
        for child in self.node.children(&mut cursor) {
            let text = child.utf8_text(self.source.as_bytes()).unwrap_or("");
            match child.kind() {
                "string_fragment" => value.push_str(text),
                "escape_sequence" => decode_escape(text, &mut value),
                _ => {}
            }
        }
        Some(value)
    }
}

impl std::fmt::Debug for JsNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}@{}:{}",
            self.node.kind(),
            self.start_line(),
            self.start_column()
        )
    }
}

/// Appends the character(s) denoted by a JavaScript escape sequence.
fn decode_escape(escape: &str, out: &mut String) {
    let body = escape.strip_prefix('\\').unwrap_or(escape);
    let mut chars = body.chars();
    let Some(first) = chars.next() else {
        return;
    };

    let decoded = match first {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        'v' => Some('\u{b}'),
        // Line continuation contributes nothing to the value.
        '\n' | '\r' | '\u{2028}' | '\u{2029}' => None,
        'x' => u32::from_str_radix(&body[1..], 16)
            .ok()
            .and_then(char::from_u32),
        'u' => {
            let hex = body[1..].trim_start_matches('{').trim_end_matches('}');
            u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
        }
        '0'..='7' => u32::from_str_radix(body, 8).ok().and_then(char::from_u32),
        other => Some(other),
    };

    if let Some(c) = decoded {
        out.push(c);
    }
}
