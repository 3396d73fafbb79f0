//! Pre-order traversal over a [`SourceFile`].
//!
//! Modeled on `syn::visit`: every hook has a default implementation that
//! simply walks the node's children. Override the hooks you care about
//! and call [`walk_node`] from them to keep descending.
//!
//! ```ignore
//! struct CallCounter(usize);
//!
//! impl<'a> Visit<'a> for CallCounter {
//!     fn visit_call_expression(&mut self, node: JsNode<'a>) {
//!         self.0 += 1;
//!         walk_node(self, node);
//!     }
//! }
//! ```

use crate::syntax::{JsNode, NodeKind, SourceFile};

/// Syntax tree visitor. Hooks fire once per node, in document order.
pub trait Visit<'a> {
    /// Dispatches on the node kind. Rarely overridden.
    fn visit_node(&mut self, node: JsNode<'a>) {
        match node.kind() {
            NodeKind::CallExpression => self.visit_call_expression(node),
            NodeKind::VariableDeclarator => self.visit_variable_declarator(node),
            NodeKind::AssignmentExpression => self.visit_assignment_expression(node),
            _ => walk_node(self, node),
        }
    }

    /// Called for every call expression.
    fn visit_call_expression(&mut self, node: JsNode<'a>) {
        walk_node(self, node);
    }

    /// Called for every `var`/`let`/`const` declarator.
    fn visit_variable_declarator(&mut self, node: JsNode<'a>) {
        walk_node(self, node);
    }

    /// Called for every plain or compound assignment.
    fn visit_assignment_expression(&mut self, node: JsNode<'a>) {
        walk_node(self, node);
    }
}

/// Visits every named child of `node`.
pub fn walk_node<'a, V>(visitor: &mut V, node: JsNode<'a>)
where
    V: Visit<'a> + ?Sized,
{
    for child in node.named_children() {
        visitor.visit_node(child);
    }
}

/// Visits the whole file, starting at the `program` node.
pub fn walk_file<'a, V>(visitor: &mut V, file: &'a SourceFile)
where
    V: Visit<'a> + ?Sized,
{
    visitor.visit_node(file.root());
}
