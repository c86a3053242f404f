use crate::{
    ast::{ExprTree, Node, NodeId},
    error::{Diagnostic, ErrorLog},
    interpreter::{depot::Depot, evaluator::core::EvalResult, value::core::Value},
};

impl ExprTree {
    /// Collapses the tree into a single value.
    ///
    /// Nodes are resolved post-order. Variable references are looked up in
    /// `depot`; calls resolve all of their children, hand the resulting values
    /// to the builtin, cache its result and release the children. A node that
    /// is already resolved is returned as-is, so resolving twice is a no-op.
    /// A call that fails keeps its children and can be resolved again.
    ///
    /// When several arguments of a call fail, every failure but the last is
    /// recorded in `errors` and the last one is returned.
    ///
    /// # Parameters
    /// - `depot`: Variables visible to the expression.
    /// - `line`: Line number for error reporting.
    /// - `errors`: Receives the failures of sibling arguments.
    ///
    /// # Example
    /// ```
    /// use openmat::{
    ///     ast::ExprTree,
    ///     error::ErrorLog,
    ///     interpreter::{
    ///         depot::Depot, evaluator::function::core::Registry, value::core::Value,
    ///     },
    /// };
    ///
    /// let registry = Registry::standard();
    /// let mut errors = ErrorLog::new();
    /// let mut depot = Depot::new();
    /// depot.insert("x", Value::Scalar(4.0)).unwrap();
    ///
    /// let mut tree = ExprTree::build("ADD(MUL(2,3),x)", &registry, 1, &mut errors).unwrap();
    /// assert_eq!(tree.resolve(&depot, 1, &mut errors).unwrap(), Value::Scalar(10.0));
    /// assert!(tree.is_resolved());
    /// ```
    pub fn resolve(&mut self,
                   depot: &Depot,
                   line: usize,
                   errors: &mut ErrorLog)
                   -> EvalResult<Value> {
        self.resolve_node(self.root, depot, line, errors)
    }

    fn resolve_node(&mut self,
                    id: NodeId,
                    depot: &Depot,
                    line: usize,
                    errors: &mut ErrorLog)
                    -> EvalResult<Value> {
        let (builtin, children) = match &mut self.nodes[id] {
            Node::Leaf(value) | Node::Call { cached: Some(value), .. } => return Ok(value.clone()),
            Node::Variable(name) => {
                let value = depot.lookup(name).map_err(|e| e.at(line))?.clone();
                self.nodes[id] = Node::Leaf(value.clone());
                return Ok(value);
            },
            Node::Call { builtin, children, .. } => (*builtin, children.clone()),
            Node::Released => {
                return Err(Diagnostic::TypeError { details: format!("expression node {id} was \
                                                                     already consumed by its parent"),
                                                   line });
            },
        };

        let mut operands = Vec::with_capacity(children.len());
        let mut failures = Vec::new();
        for &child in &children {
            match self.resolve_node(child, depot, line, errors) {
                Ok(value) => operands.push(value),
                Err(e) => failures.push(e),
            }
        }
        if let Some(last) = failures.pop() {
            failures.into_iter().for_each(|e| errors.record(e));
            return Err(last);
        }

        // Children stay in place until the call succeeds, so a failed call can
        // be resolved again.
        let value = builtin.invoke(&operands, line)?;
        log::trace!("{} resolved to a {}", builtin.name, value.kind());

        for &child in &children {
            self.nodes[child] = Node::Released;
        }
        if let Node::Call { children, cached, .. } = &mut self.nodes[id] {
            children.clear();
            *cached = Some(value.clone());
        }
        Ok(value)
    }
}
