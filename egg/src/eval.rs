use crate::forms::SpecialForms;
use crate::parser::{Literal, Node, SyntaxError};
use crate::scope::Scope;
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;
use std::rc::Rc;
use thiserror::Error;
use tracing::trace;

pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

#[derive(Clone, PartialEq, Debug, Error)]
pub enum EvalError {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("undefined binding: {0}")]
    Reference(String),
    #[error("applying a non-function")]
    NotCallable,
    #[error("type error: {0}")]
    Type(String),
    #[error("{name} expects {expected} arguments, got {found}")]
    Arity { name: String, expected: usize, found: usize },
    #[error("bad special form: {0}")]
    BadForm(String),
    #[error("call depth limit of {0} exceeded")]
    CallDepth(usize),
}

/// Tree walking evaluator. Each instance owns its own table of special
/// forms, so evaluators with different language extensions can coexist.
#[derive(Clone, Debug)]
pub struct Evaluator {
    forms: SpecialForms,
    max_call_depth: usize,
}

impl Default for Evaluator {
    fn default() -> Evaluator {
        Evaluator::new()
    }
}

impl Evaluator {
    /// Evaluator without any special forms.
    pub fn new() -> Evaluator {
        Evaluator::with_forms(SpecialForms::new())
    }

    /// Evaluator with the standard forms (if, while, do, define, set, fun).
    pub fn standard() -> Evaluator {
        Evaluator::with_forms(SpecialForms::standard())
    }

    pub fn with_forms(forms: SpecialForms) -> Evaluator {
        Evaluator{forms, max_call_depth: DEFAULT_MAX_CALL_DEPTH}
    }

    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Evaluator {
        self.max_call_depth = max_call_depth;
        self
    }

    pub fn max_call_depth(&self) -> usize { self.max_call_depth }

    pub fn forms(&self) -> &SpecialForms { &self.forms }

    /// Register a special form. A later registration under the same name
    /// replaces the earlier one.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
        where F: Fn(&Evaluator, &[Node], &Rc<Scope>) -> Result<Value, EvalError>
                 + Send + Sync + 'static
    {
        self.forms.register(name, handler);
    }

    pub fn evaluate(&self, node: &Node, scope: &Rc<Scope>) -> Result<Value, EvalError> {
        match node {
            Node::Literal(Literal::String(s)) => Ok(Value::String(s.clone())),
            Node::Literal(Literal::Number(n)) => Ok(Value::Number(*n)),
            Node::Identifier(name) => scope.get(name)
                .ok_or_else(|| EvalError::Reference(name.clone())),
            Node::Application { operator, arguments } =>
                ensure_sufficient_stack(|| self.apply(operator, arguments, scope)),
        }
    }

    fn apply(&self, operator: &Node, arguments: &[Node], scope: &Rc<Scope>) -> Result<Value, EvalError> {
        // forms go by name, a binding of the same name doesn't hide them
        if let Node::Identifier(name) = operator {
            if let Some(form) = self.forms.get(name) {
                trace!(form = %name, nargs = arguments.len(), "special form");
                return form(self, arguments, scope);
            }
        }
        let op = self.evaluate(operator, scope)?;
        let args = arguments.iter()
            .map(|arg| self.evaluate(arg, scope))
            .collect::<Result<Vec<_>, _>>()?;
        match op {
            Value::Callable(procedure) => {
                trace!(callee = procedure.name(), nargs = args.len(), "call");
                procedure.call(self, args)
            },
            _ => Err(EvalError::NotCallable),
        }
    }
}
