use crate::eval::{EvalError, Evaluator};
use crate::parser::Node;
use crate::procedure::Procedure;
use crate::scope::Scope;
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use tracing::debug;

/// Handler for a special form. It gets the argument nodes unevaluated and
/// decides itself what to evaluate and when.
pub type SpecialForm =
    Arc<dyn Fn(&Evaluator, &[Node], &Rc<Scope>) -> Result<Value, EvalError> + Send + Sync>;

macro_rules! check {
    ($argcheck:expr, $err:expr) => {
        if ! $argcheck { return Err(EvalError::BadForm($err.to_string())); }
    }
}

/// Special forms by name.
#[derive(Clone, Default)]
pub struct SpecialForms {
    forms: HashMap<String, SpecialForm>,
}

impl fmt::Debug for SpecialForms {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

impl SpecialForms {
    pub fn new() -> SpecialForms {
        SpecialForms::default()
    }

    /// if, while, do, define, set and fun.
    pub fn standard() -> SpecialForms {
        let mut forms = SpecialForms::new();
        forms.register("if", eval_if);
        forms.register("while", eval_while);
        forms.register("do", eval_do);
        forms.register("define", eval_define);
        forms.register("set", eval_set);
        forms.register("fun", eval_fun);
        forms
    }

    /// Add a form, replacing any previous one with the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
        where F: Fn(&Evaluator, &[Node], &Rc<Scope>) -> Result<Value, EvalError>
                 + Send + Sync + 'static
    {
        let name = name.into();
        debug!(form = %name, "register special form");
        self.forms.insert(name, Arc::new(handler));
    }

    pub fn get(&self, name: &str) -> Option<&SpecialForm> {
        self.forms.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.forms.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.forms.keys().map(|k| k.as_str()).collect();
        names.sort();
        names
    }
}

fn eval_if(ev: &Evaluator, args: &[Node], scope: &Rc<Scope>) -> Result<Value, EvalError> {
    check!(args.len() == 3, "if expects 3 arguments");
    if ev.evaluate(&args[0], scope)?.is_truthy() {
        ev.evaluate(&args[1], scope)
    } else {
        ev.evaluate(&args[2], scope)
    }
}

fn eval_while(ev: &Evaluator, args: &[Node], scope: &Rc<Scope>) -> Result<Value, EvalError> {
    check!(args.len() == 2, "while expects 2 arguments");
    while ev.evaluate(&args[0], scope)?.is_truthy() {
        ev.evaluate(&args[1], scope)?;
    }
    // there's no unit value, loops produce false
    Ok(Value::Bool(false))
}

fn eval_do(ev: &Evaluator, args: &[Node], scope: &Rc<Scope>) -> Result<Value, EvalError> {
    let mut value = Value::Bool(false);
    for arg in args {
        value = ev.evaluate(arg, scope)?;
    }
    Ok(value)
}

fn eval_define(ev: &Evaluator, args: &[Node], scope: &Rc<Scope>) -> Result<Value, EvalError> {
    check!(args.len() == 2, "define expects 2 arguments");
    let Node::Identifier(ref name) = args[0] else {
        return Err(EvalError::BadForm(format!("cannot define {}", args[0])));
    };
    let value = ev.evaluate(&args[1], scope)?;
    scope.define(name.clone(), value.clone());
    Ok(value)
}

fn eval_set(ev: &Evaluator, args: &[Node], scope: &Rc<Scope>) -> Result<Value, EvalError> {
    check!(args.len() == 2, "set expects 2 arguments");
    let Node::Identifier(ref name) = args[0] else {
        return Err(EvalError::BadForm(format!("cannot set {}", args[0])));
    };
    let value = ev.evaluate(&args[1], scope)?;
    if !scope.assign(name, value.clone()) {
        return Err(EvalError::Reference(name.clone()));
    }
    Ok(value)
}

fn eval_fun(_: &Evaluator, args: &[Node], scope: &Rc<Scope>) -> Result<Value, EvalError> {
    let Some((body, params)) = args.split_last() else {
        return Err(EvalError::BadForm("fun needs a body".to_string()));
    };
    let params = params.iter()
        .map(|p| match p {
            Node::Identifier(name) => Ok(name.clone()),
            other => Err(EvalError::BadForm(format!("parameter {} is not a word", other))),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::Callable(Rc::new(Procedure::new(params, body.clone(), scope.clone()))))
}
