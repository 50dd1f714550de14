use crate::builtin::top_scope;
use crate::config::Config;
use crate::eval::{EvalError, Evaluator};
use crate::parser::Parser;
use crate::scope::Scope;
use crate::value::Value;
use std::rc::Rc;
use tracing::debug;

/// Parser, standard evaluator and a top scope that lives across runs.
///
/// A function bound in the scope it closes over, as in
/// `define(f, fun(x, f(x)))`, forms an `Rc` cycle with that scope. The
/// scope and everything bound in it then outlive the interpreter. This is
/// accepted, an interpreter usually lives as long as the process.
pub struct Interpreter {
    parser: Parser,
    evaluator: Evaluator,
    scope: Rc<Scope>,
}

impl Default for Interpreter {
    fn default() -> Interpreter {
        Interpreter::new(&Config::default())
    }
}

impl Interpreter {
    pub fn new(config: &Config) -> Interpreter {
        let parser = if config.comments { Parser::with_comments() } else { Parser::new() };
        Interpreter {
            parser,
            evaluator: Evaluator::standard().with_max_call_depth(config.max_call_depth),
            scope: top_scope(),
        }
    }

    pub fn evaluator_mut(&mut self) -> &mut Evaluator { &mut self.evaluator }

    pub fn scope(&self) -> &Rc<Scope> { &self.scope }

    /// Parse and evaluate `source`. Definitions stay visible to later runs.
    pub fn run(&self, source: &str) -> Result<Value, EvalError> {
        let program = self.parser.parse(source)?;
        debug!(source_len = source.len(), "run");
        self.evaluator.evaluate(&program, &self.scope)
    }
}

/// Evaluate a whole program in a fresh top scope.
pub fn run(source: &str) -> Result<Value, EvalError> {
    Interpreter::default().run(source)
}
