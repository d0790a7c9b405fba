//! Canonical node construction.
//!
//! [`Ir`] is the one place that knows what a well-formed `FUNCTION`, `BLOCK`,
//! `VAR`, … looks like. Every constructor validates payloads and child shapes
//! before allocating the new parent, so a rejected call leaves no half-built node
//! behind.
//!
//! # Example
//!
//! ```
//! use canopy_ir::arena::Arena;
//!
//! let mut arena = Arena::new();
//! let mut ir = arena.ir();
//! let name = ir.name("f");
//! let params = ir.param_list(&[])?;
//! let body = ir.block(&[])?;
//! let function = ir.function(name, params, body)?;
//! let script = ir.script(&[function])?;
//! assert_eq!(arena.child_count(script), 1);
//! # Ok::<(), canopy_ir::errors::IrError>(())
//! ```

use crate::{
    arena::Arena,
    errors::IrError,
    kind::Kind,
    node::{NodeData, NodeId, Payload},
    position::SourcePosition,
};

impl Arena {
    /// Borrows the arena through the canonical-form factory.
    pub fn ir(&mut self) -> Ir<'_> {
        Ir { arena: self }
    }
}

/// Factory for canonical node shapes.
pub struct Ir<'a> {
    arena: &'a mut Arena,
}

impl Ir<'_> {
    #[must_use]
    pub fn arena(&self) -> &Arena {
        self.arena
    }

    pub fn empty(&mut self) -> NodeId {
        self.leaf(Kind::Empty)
    }

    pub fn name(&mut self, name: &str) -> NodeId {
        self.text(Kind::Name, name)
    }

    pub fn string(&mut self, value: &str) -> NodeId {
        self.text(Kind::String, value)
    }

    pub fn number(&mut self, value: f64) -> NodeId {
        self.arena.new_number(value)
    }

    pub fn true_node(&mut self) -> NodeId {
        self.leaf(Kind::True)
    }

    pub fn false_node(&mut self) -> NodeId {
        self.leaf(Kind::False)
    }

    pub fn null_node(&mut self) -> NodeId {
        self.leaf(Kind::Null)
    }

    pub fn this_node(&mut self) -> NodeId {
        self.leaf(Kind::This)
    }

    /// `PARAM_LIST` over `params`, each a `NAME` or a binding pattern.
    ///
    /// # Errors
    ///
    /// [`IrError::InvalidArgument`] for a non-binding child,
    /// [`IrError::InvalidTreeState`] for an attached one.
    pub fn param_list(&mut self, params: &[NodeId]) -> Result<NodeId, IrError> {
        for &param in params {
            self.expect_one_of(
                param,
                &[
                    Kind::Name,
                    Kind::DefaultValue,
                    Kind::IterRest,
                    Kind::ArrayPattern,
                    Kind::ObjectPattern,
                ],
                "parameter",
            )?;
        }
        self.parent(Kind::ParamList, params, "param_list")
    }

    /// `BLOCK` over statement nodes.
    ///
    /// # Errors
    ///
    /// [`IrError::InvalidArgument`] for a non-statement child,
    /// [`IrError::InvalidTreeState`] for an attached one.
    pub fn block(&mut self, statements: &[NodeId]) -> Result<NodeId, IrError> {
        self.expect_statements(statements)?;
        self.parent(Kind::Block, statements, "block")
    }

    /// `SCRIPT` over statement nodes.
    ///
    /// # Errors
    ///
    /// Same as [`Ir::block`].
    pub fn script(&mut self, statements: &[NodeId]) -> Result<NodeId, IrError> {
        self.expect_statements(statements)?;
        self.parent(Kind::Script, statements, "script")
    }

    /// `FUNCTION` with children `NAME`, `PARAM_LIST`, `BLOCK`.
    ///
    /// # Errors
    ///
    /// [`IrError::InvalidArgument`] if a part has the wrong kind,
    /// [`IrError::InvalidTreeState`] if a part is attached elsewhere.
    pub fn function(
        &mut self,
        name: NodeId,
        params: NodeId,
        body: NodeId,
    ) -> Result<NodeId, IrError> {
        self.expect_one_of(name, &[Kind::Name], "function name")?;
        self.expect_one_of(params, &[Kind::ParamList], "function parameters")?;
        self.expect_one_of(body, &[Kind::Block], "function body")?;
        self.parent(Kind::Function, &[name, params, body], "function")
    }

    /// `EXPR_RESULT` wrapping an expression.
    ///
    /// # Errors
    ///
    /// [`IrError::InvalidArgument`] if `expr` is not an expression.
    pub fn expr_result(&mut self, expr: NodeId) -> Result<NodeId, IrError> {
        self.expect_expression(expr)?;
        self.parent(Kind::ExprResult, &[expr], "expr_result")
    }

    /// `RETURN`, optionally with a value.
    ///
    /// # Errors
    ///
    /// [`IrError::InvalidArgument`] if `value` is not an expression.
    pub fn return_node(&mut self, value: Option<NodeId>) -> Result<NodeId, IrError> {
        match value {
            Some(value) => {
                self.expect_expression(value)?;
                self.parent(Kind::Return, &[value], "return")
            }
            None => Ok(self.leaf(Kind::Return)),
        }
    }

    /// `VAR` declaring `name`, with the initializer hung under the name.
    ///
    /// # Errors
    ///
    /// [`IrError::InvalidArgument`] if `name` is not a `NAME` or `value` is not
    /// an expression, [`IrError::InvalidTreeState`] if either is attached or
    /// `name` already carries an initializer.
    pub fn var(&mut self, name: NodeId, value: Option<NodeId>) -> Result<NodeId, IrError> {
        self.expect_one_of(name, &[Kind::Name], "declared name")?;
        self.arena.check_all_detached(&[name], "var")?;
        if let Some(value) = value {
            self.expect_expression(value)?;
            if self.arena.has_children(name) {
                return Err(IrError::invalid_tree_state(
                    name,
                    "var: declared name already has an initializer",
                ));
            }
            self.arena.add_child_back(name, value)?;
        }
        self.parent(Kind::Var, &[name], "var")
    }

    /// `CALL` of `target` with `args`.
    ///
    /// # Errors
    ///
    /// [`IrError::InvalidArgument`] for a non-expression part.
    pub fn call(&mut self, target: NodeId, args: &[NodeId]) -> Result<NodeId, IrError> {
        self.expect_expression(target)?;
        for &arg in args {
            if self.arena.kind(arg) != Kind::IterSpread {
                self.expect_expression(arg)?;
            }
        }
        let mut children = Vec::with_capacity(args.len() + 1);
        children.push(target);
        children.extend_from_slice(args);
        self.parent(Kind::Call, &children, "call")
    }

    /// `ASSIGN` of `value` to a name or property target.
    ///
    /// # Errors
    ///
    /// [`IrError::InvalidArgument`] if `target` is not assignable or `value` is
    /// not an expression.
    pub fn assign(&mut self, target: NodeId, value: NodeId) -> Result<NodeId, IrError> {
        self.expect_one_of(
            target,
            &[
                Kind::Name,
                Kind::GetProp,
                Kind::GetElem,
                Kind::ArrayPattern,
                Kind::ObjectPattern,
            ],
            "assignment target",
        )?;
        self.expect_expression(value)?;
        self.parent(Kind::Assign, &[target, value], "assign")
    }

    /// `GETPROP` of `property` on `target`; the property name is a `STRING` child.
    ///
    /// # Errors
    ///
    /// [`IrError::InvalidArgument`] if `target` is not an expression.
    pub fn getprop(&mut self, target: NodeId, property: &str) -> Result<NodeId, IrError> {
        self.expect_expression(target)?;
        self.arena.check_all_detached(&[target], "getprop")?;
        let property = self.string(property);
        self.parent(Kind::GetProp, &[target, property], "getprop")
    }

    fn leaf(&mut self, kind: Kind) -> NodeId {
        self.arena
            .alloc(NodeData::new(kind, Payload::Generic, SourcePosition::UNKNOWN))
    }

    fn text(&mut self, kind: Kind, value: &str) -> NodeId {
        self.arena.alloc(NodeData::new(
            kind,
            Payload::Text(value.into()),
            SourcePosition::UNKNOWN,
        ))
    }

    fn parent(
        &mut self,
        kind: Kind,
        children: &[NodeId],
        operation: &str,
    ) -> Result<NodeId, IrError> {
        self.arena.check_all_detached(children, operation)?;
        let parent = self.leaf(kind);
        self.arena.add_children_back(parent, children)?;
        Ok(parent)
    }

    fn expect_one_of(&self, id: NodeId, kinds: &[Kind], role: &str) -> Result<(), IrError> {
        let kind = self.arena.kind(id);
        if kinds.contains(&kind) {
            Ok(())
        } else {
            Err(IrError::invalid_argument(format!(
                "{role} cannot be a {kind} node"
            )))
        }
    }

    fn expect_expression(&self, id: NodeId) -> Result<(), IrError> {
        let kind = self.arena.kind(id);
        if kind.may_be_expression() {
            Ok(())
        } else {
            Err(IrError::invalid_argument(format!(
                "{kind} node is not an expression"
            )))
        }
    }

    fn expect_statements(&self, statements: &[NodeId]) -> Result<(), IrError> {
        for &statement in statements {
            let kind = self.arena.kind(statement);
            if !kind.may_be_statement() {
                return Err(IrError::invalid_argument(format!(
                    "{kind} node is not a statement"
                )));
            }
        }
        Ok(())
    }
}
