use crate::{
    ast::{ExprTree, Node, NodeId},
    error::{Diagnostic, ErrorLog},
    interpreter::{
        evaluator::function::core::Registry,
        parser::{
            core::ParseResult,
            literal::{is_literal, parse_literal},
            splitter::split_call,
        },
    },
};

impl ExprTree {
    /// Builds the expression tree for one statement's expression.
    ///
    /// The whole text is classified first:
    /// 1. starting with `[`, `-` or a digit, it is a literal leaf;
    /// 2. containing a `(`, it is a builtin call whose arguments are built
    ///    recursively;
    /// 3. anything else is a variable reference, looked up only when the tree
    ///    is resolved.
    ///
    /// When several arguments of a call fail, every failure but the last is
    /// recorded in `errors` and the last one is returned.
    ///
    /// # Parameters
    /// - `text`: The expression.
    /// - `registry`: Builtins that calls may name.
    /// - `line`: Line number for error reporting.
    /// - `errors`: Receives the failures of sibling arguments.
    ///
    /// # Errors
    /// `SyntaxError`, `DimensionError` (ragged matrix literal),
    /// `UnknownFunction` or `ArityError`.
    ///
    /// # Example
    /// ```
    /// use openmat::{
    ///     ast::{ExprTree, Node},
    ///     error::ErrorLog,
    ///     interpreter::evaluator::function::core::Registry,
    /// };
    ///
    /// let registry = Registry::standard();
    /// let mut errors = ErrorLog::new();
    ///
    /// let tree = ExprTree::build("ADD(MUL(2,3),x)", &registry, 1, &mut errors).unwrap();
    /// let Node::Call { builtin, children, .. } = tree.root() else {
    ///     panic!("expected a call at the root");
    /// };
    /// assert_eq!(builtin.name, "ADD");
    /// assert_eq!(children.len(), 2);
    /// assert!(!tree.is_resolved());
    /// ```
    pub fn build(text: &str,
                 registry: &Registry,
                 line: usize,
                 errors: &mut ErrorLog)
                 -> ParseResult<Self> {
        let mut tree = Self { nodes: Vec::new(),
                              root:  0, };
        tree.root = tree.build_node(text, registry, line, errors)?;
        log::trace!("built tree for {text:?}: {:?}", tree.nodes);
        Ok(tree)
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn build_node(&mut self,
                  text: &str,
                  registry: &Registry,
                  line: usize,
                  errors: &mut ErrorLog)
                  -> ParseResult<NodeId> {
        if text.is_empty() {
            return Err(Diagnostic::syntax("missing expression", line));
        }

        if is_literal(text) {
            let value = parse_literal(text, line)?;
            return Ok(self.push(Node::Leaf(value)));
        }

        if !text.contains('(') {
            return Ok(self.push(Node::Variable(text.to_string())));
        }

        let parts = split_call(text, line)?;
        let builtin =
            *registry.get(parts.name)
                     .ok_or_else(|| Diagnostic::UnknownFunction { name: parts.name.to_string(),
                                                                  line })?;
        builtin.check_arity(parts.arguments.len(), line)?;

        let mut children = Vec::with_capacity(parts.arguments.len());
        let mut failures = Vec::new();
        for argument in parts.arguments {
            match self.build_node(argument, registry, line, errors) {
                Ok(child) => children.push(child),
                Err(e) => failures.push(e),
            }
        }
        if let Some(last) = failures.pop() {
            failures.into_iter().for_each(|e| errors.record(e));
            return Err(last);
        }

        Ok(self.push(Node::Call { builtin,
                                  children,
                                  cached: None }))
    }
}
