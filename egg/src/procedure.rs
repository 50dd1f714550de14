use crate::eval::{EvalError, Evaluator};
use crate::parser::Node;
use crate::scope::Scope;
use crate::value::Value;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

pub type NativeFn = Rc<dyn Fn(&[Value]) -> Result<Value, EvalError>>;

thread_local! {
    static CALL_DEPTH: Cell<usize> = const { Cell::new(0) };
}

// Counts active calls of egg functions on this thread while alive
struct CallGuard;

impl CallGuard {
    fn enter(limit: usize) -> Result<CallGuard, EvalError> {
        CALL_DEPTH.with(|depth| {
            if depth.get() >= limit {
                return Err(EvalError::CallDepth(limit));
            }
            depth.set(depth.get() + 1);
            Ok(CallGuard)
        })
    }
}

impl Drop for CallGuard {
    fn drop(&mut self) {
        CALL_DEPTH.with(|depth| depth.set(depth.get() - 1));
    }
}

enum Body {
    Egg(Node),
    Native(NativeFn),
}

/// A callable value: either a Rust closure or a function built by `fun`.
pub struct Procedure {
    name: String,
    params: Vec<String>,
    body: Body,
    env: Option<Rc<Scope>>,
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.body {
            Body::Native(_) => write!(f, "<native {}>", self.name),
            Body::Egg(_) => write!(f, "<fun({})>", self.params.join(", ")),
        }
    }
}

impl Procedure {
    pub fn new(params: Vec<String>, body: Node, env: Rc<Scope>) -> Procedure {
        Procedure{name: "fun".to_string(), params, body: Body::Egg(body), env: Some(env)}
    }

    pub fn native(name: impl Into<String>, fp: NativeFn) -> Procedure {
        Procedure{name: name.into(), params: Vec::new(), body: Body::Native(fp), env: None}
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn params(&self) -> &[String] { &self.params }

    pub fn call(&self, evaluator: &Evaluator, args: Vec<Value>) -> Result<Value, EvalError> {
        match self.body {
            Body::Native(ref fp) => fp(&args),
            Body::Egg(ref body) => {
                if args.len() != self.params.len() {
                    return Err(EvalError::Arity {
                        name: self.name.clone(),
                        expected: self.params.len(),
                        found: args.len(),
                    });
                }
                let outer = match self.env {
                    Some(ref env) => env.clone(),
                    None => Rc::new(Scope::new()),
                };
                let local = Scope::nested(outer, self.params.iter().cloned().zip(args));
                let _guard = CallGuard::enter(evaluator.max_call_depth())?;
                evaluator.evaluate(body, &Rc::new(local))
            }
        }
    }
}
