use crate::eval::EvalError;
use crate::scope::Scope;
use crate::value::Value;
use std::cmp::Ordering;
use std::rc::Rc;

// a shorthand for checking number of arguments before running a builtin
macro_rules! nargs {
    ($name:expr, $args:expr, $n:expr) => {
        if $args.len() != $n {
            return Err(EvalError::Arity {
                name: $name.to_string(), expected: $n, found: $args.len()
            });
        }
    }
}

fn arith(name: &'static str, op: fn(f64, f64) -> f64) -> Value {
    Value::native(name, move |args| {
        nargs!(name, args, 2);
        Ok(Value::Number(op(args[0].num()?, args[1].num()?)))
    })
}

fn plus(args: &[Value]) -> Result<Value, EvalError> {
    nargs!("+", args, 2);
    match (&args[0], &args[1]) {
        (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
        (l, r) if matches!(l, Value::String(_)) || matches!(r, Value::String(_)) =>
            Ok(Value::String(format!("{}{}", l, r))),
        (l, r) => Err(EvalError::Type(
            format!("can't add {} and {}", l.type_name(), r.type_name()))),
    }
}

fn compare(name: &'static str, accept: fn(Ordering) -> bool) -> Value {
    Value::native(name, move |args| {
        nargs!(name, args, 2);
        let ordering = match (&args[0], &args[1]) {
            (Value::Number(l), Value::Number(r)) => l.partial_cmp(r),
            (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
            (l, r) => return Err(EvalError::Type(
                format!("can't compare {} and {}", l.type_name(), r.type_name()))),
        };
        Ok(Value::Bool(ordering.is_some_and(accept)))
    })
}

fn array(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Array(Rc::new(args.to_vec())))
}

fn length(args: &[Value]) -> Result<Value, EvalError> {
    nargs!("length", args, 1);
    match &args[0] {
        Value::Array(items) => Ok(Value::Number(items.len() as f64)),
        Value::String(s) => Ok(Value::Number(s.chars().count() as f64)),
        o => Err(EvalError::Type(format!("{} has no length", o.type_name()))),
    }
}

fn element(args: &[Value]) -> Result<Value, EvalError> {
    nargs!("element", args, 2);
    let Value::Array(ref items) = args[0] else {
        return Err(EvalError::Type(
            format!("expected array, found {}", args[0].type_name())));
    };
    let idx = args[1].num()?;
    if idx < 0.0 || idx.fract() != 0.0 || idx >= items.len() as f64 {
        return Err(EvalError::Type(
            format!("index {} out of bounds for array of {}", idx, items.len())));
    }
    Ok(items[idx as usize].clone())
}

fn print(args: &[Value]) -> Result<Value, EvalError> {
    nargs!("print", args, 1);
    println!("{}", args[0]);
    Ok(args[0].clone())
}

/// Bindings every program starts with.
pub fn builtins() -> Vec<(&'static str, Value)> {
    vec![
        ("true", Value::Bool(true)),
        ("false", Value::Bool(false)),
        ("+", Value::native("+", plus)),
        ("-", arith("-", |l, r| l - r)),
        ("*", arith("*", |l, r| l * r)),
        ("/", arith("/", |l, r| l / r)),
        ("%", arith("%", |l, r| l % r)),
        ("==", Value::native("==", |args| {
            nargs!("==", args, 2);
            Ok(Value::Bool(args[0] == args[1]))
        })),
        ("!=", Value::native("!=", |args| {
            nargs!("!=", args, 2);
            Ok(Value::Bool(args[0] != args[1]))
        })),
        ("<", compare("<", Ordering::is_lt)),
        (">", compare(">", Ordering::is_gt)),
        ("<=", compare("<=", Ordering::is_le)),
        (">=", compare(">=", Ordering::is_ge)),
        ("array", Value::native("array", array)),
        ("length", Value::native("length", length)),
        ("element", Value::native("element", element)),
        ("print", Value::native("print", print)),
    ]
}

pub fn top_scope() -> Rc<Scope> {
    Rc::new(Scope::from_bindings(builtins()))
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::Evaluator;

    fn call(name: &str, args: Vec<Value>) -> Result<Value, EvalError> {
        match top_scope().get(name) {
            Some(Value::Callable(p)) => p.call(&Evaluator::new(), args),
            other => panic!("{} is not a builtin: {:?}", name, other),
        }
    }

    #[test]
    fn arithmetic() {
        assert_eq!(call("+", vec![2.0.into(), 3.0.into()]), Ok(Value::Number(5.0)));
        assert_eq!(call("-", vec![2.0.into(), 3.0.into()]), Ok(Value::Number(-1.0)));
        assert_eq!(call("*", vec![2.0.into(), 3.0.into()]), Ok(Value::Number(6.0)));
        assert_eq!(call("/", vec![3.0.into(), 2.0.into()]), Ok(Value::Number(1.5)));
        assert_eq!(call("%", vec![7.0.into(), 4.0.into()]), Ok(Value::Number(3.0)));
    }

    #[test]
    fn plus_concatenates_strings() {
        assert_eq!(call("+", vec!["a".into(), "b".into()]), Ok(Value::from("ab")));
        assert_eq!(call("+", vec!["n=".into(), 4.0.into()]), Ok(Value::from("n=4")));
        assert!(matches!(call("+", vec![true.into(), 1.0.into()]), Err(EvalError::Type(_))));
    }

    #[test]
    fn comparisons() {
        assert_eq!(call("<", vec![1.0.into(), 2.0.into()]), Ok(Value::Bool(true)));
        assert_eq!(call(">=", vec![1.0.into(), 2.0.into()]), Ok(Value::Bool(false)));
        assert_eq!(call("<=", vec!["a".into(), "b".into()]), Ok(Value::Bool(true)));
        assert_eq!(call("==", vec!["a".into(), "a".into()]), Ok(Value::Bool(true)));
        assert_eq!(call("!=", vec![1.0.into(), "1".into()]), Ok(Value::Bool(true)));
        assert!(matches!(call("<", vec![1.0.into(), "1".into()]), Err(EvalError::Type(_))));
    }

    #[test]
    fn wrong_arity() {
        assert_eq!(call("-", vec![1.0.into()]), Err(EvalError::Arity {
            name: "-".to_string(), expected: 2, found: 1
        }));
    }

    #[test]
    fn arrays() {
        let arr = call("array", vec![1.0.into(), "two".into()]).unwrap();
        assert_eq!(arr.to_string(), "[1, two]");
        assert_eq!(call("length", vec![arr.clone()]), Ok(Value::Number(2.0)));
        assert_eq!(call("element", vec![arr.clone(), 1.0.into()]), Ok(Value::from("two")));
        assert!(call("element", vec![arr.clone(), 2.0.into()]).is_err());
        assert!(call("element", vec![arr, 0.5.into()]).is_err());
    }
}
