use crate::eval::EvalError;
use crate::procedure::Procedure;
use std::fmt;
use std::rc::Rc;

/// Runtime values produced by evaluation.
#[derive(Clone, Debug)]
pub enum Value {
    String(String),
    Number(f64),
    Bool(bool),
    Callable(Rc<Procedure>),
    Array(Rc<Vec<Value>>),
}

impl Value {
    pub fn native<F>(name: &str, f: F) -> Value
        where F: Fn(&[Value]) -> Result<Value, EvalError> + 'static
    {
        Value::Callable(Rc::new(Procedure::native(name, Rc::new(f))))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Callable(_) => "function",
            Value::Array(_) => "array",
        }
    }

    // Only `false` itself is falsy
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false))
    }

    pub fn num(&self) -> Result<f64, EvalError> {
        match self {
            Value::Number(n) => Ok(*n),
            o => Err(EvalError::Type(format!("expected number, found {}", o.type_name())))
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::String(l), Value::String(r)) => l == r,
            (Value::Number(l), Value::Number(r)) => l == r,
            (Value::Bool(l), Value::Bool(r)) => l == r,
            (Value::Callable(l), Value::Callable(r)) => Rc::ptr_eq(l, r),
            (Value::Array(l), Value::Array(r)) => Rc::ptr_eq(l, r),
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Value { Value::Number(n) }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value { Value::Bool(b) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value { Value::String(s.to_string()) }
}

impl From<String> for Value {
    fn from(s: String) -> Value { Value::String(s) }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Callable(p) => write!(f, "{:?}", p),
            Value::Array(items) => {
                let items = items.iter()
                    .map(|i| i.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{}]", items)
            }
        }
    }
}
