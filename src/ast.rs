use crate::interpreter::{
    evaluator::function::core::BuiltinDef,
    value::core::{Value, ValueKind},
};

/// Index of a node inside an [`ExprTree`].
pub type NodeId = usize;

/// A node of an expression tree.
#[derive(Debug, Clone)]
pub enum Node {
    /// A literal, or a variable reference that has already been looked up.
    Leaf(Value),
    /// A variable reference, looked up in the depot when the tree is resolved.
    Variable(String),
    /// A builtin call.
    ///
    /// `children` holds exactly `builtin.arity()` entries until the call is
    /// resolved. Once it is, `cached` holds the result, the children are
    /// released and `children` is emptied.
    Call {
        /// The registry entry being called.
        builtin:  BuiltinDef,
        /// Argument sub-trees in call order.
        children: Vec<NodeId>,
        /// The result, once computed.
        cached:   Option<Value>,
    },
    /// A node whose value has been moved into its parent.
    Released,
}

impl Node {
    /// Returns `true` for nodes that need no further computation.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Leaf(_) | Self::Call { cached: Some(_), .. })
    }
}

/// The expression of one statement, stored as an arena of nodes.
///
/// Children are always pushed before their parent, so the root is the last
/// node and ids only ever point at earlier entries. The tree belongs to the
/// statement that built it and is dropped as a whole once the statement has
/// executed.
#[derive(Debug, Clone)]
pub struct ExprTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root:  NodeId,
}

impl ExprTree {
    /// The root node.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.nodes[self.root]
    }

    /// Returns `true` once the root has a value.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.root().is_resolved()
    }
}

/// What a statement does with the value of its expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// `MAT name = expr` or `NUM name = expr`.
    Declare {
        /// The variable being declared.
        name: String,
        /// The kind the keyword promises.
        kind: ValueKind,
    },
    /// `name = expr`.
    Assign {
        /// The variable being reassigned.
        name: String,
    },
    /// `OUT = expr`.
    Output,
}

impl Target {
    /// Pairs the target with the resolved value of its expression.
    #[must_use]
    pub fn with_value(self, value: Value) -> Statement {
        match self {
            Self::Declare { name, kind } => Statement::Declare { name, kind, value },
            Self::Assign { name } => Statement::Assign { name, value },
            Self::Output => Statement::Output(value),
        }
    }
}

/// A fully evaluated statement, ready to be executed.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Bind a new variable.
    Declare {
        /// The variable being declared.
        name:  String,
        /// The kind the declaration promises.
        kind:  ValueKind,
        /// The value to bind.
        value: Value,
    },
    /// Replace the value of an existing variable.
    Assign {
        /// The variable being reassigned.
        name:  String,
        /// The new value.
        value: Value,
    },
    /// Print a value.
    Output(Value),
}
