use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Variable bindings visible to an evaluation. Function calls evaluate their
/// body in a scope nested inside the one the function was created in.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: RefCell<HashMap<String, Value>>,
    outer: Option<Rc<Scope>>,
}

impl Scope {
    pub fn new() -> Scope {
        Scope::default()
    }

    pub fn from_bindings<I, S>(bindings: I) -> Scope
        where I: IntoIterator<Item=(S, Value)>, S: Into<String>
    {
        let bindings = bindings.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Scope { bindings: RefCell::new(bindings), outer: None }
    }

    pub fn nested<I, S>(outer: Rc<Scope>, bindings: I) -> Scope
        where I: IntoIterator<Item=(S, Value)>, S: Into<String>
    {
        let mut scope = Scope::from_bindings(bindings);
        scope.outer = Some(outer);
        scope
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        match self.bindings.borrow().get(name) {
            Some(value) => Some(value.clone()),
            None => self.outer.as_ref().and_then(|outer| outer.get(name)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Bind `name` in this scope, shadowing any outer binding.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Update the nearest existing binding of `name`. Returns false, leaving
    /// every scope untouched, if nothing binds it.
    pub fn assign(&self, name: &str, value: Value) -> bool {
        match self.lookup(name) {
            Some(scope) => {
                scope.bindings.borrow_mut().insert(name.to_string(), value);
                true
            },
            None => false,
        }
    }

    fn lookup(&self, name: &str) -> Option<&Scope> {
        if self.bindings.borrow().contains_key(name) {
            Some(self)
        } else if let Some(ref outer) = self.outer {
            outer.lookup(name)
        } else {
            None
        }
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Scope;
    use crate::value::Value;
    use std::rc::Rc;

    #[test]
    fn lookup_walks_outward() {
        let top = Rc::new(Scope::from_bindings([("x", Value::Number(1.0))]));
        let inner = Scope::nested(top.clone(), [("y", Value::Number(2.0))]);
        assert_eq!(inner.get("x"), Some(Value::Number(1.0)));
        assert_eq!(inner.get("y"), Some(Value::Number(2.0)));
        assert_eq!(top.get("y"), None);
    }

    #[test]
    fn define_shadows_locally() {
        let top = Rc::new(Scope::from_bindings([("x", Value::Number(1.0))]));
        let inner = Scope::nested(top.clone(), Vec::<(String, Value)>::new());
        inner.define("x", Value::Number(5.0));
        assert_eq!(inner.get("x"), Some(Value::Number(5.0)));
        assert_eq!(top.get("x"), Some(Value::Number(1.0)));
    }

    #[test]
    fn assign_updates_nearest_binding() {
        let top = Rc::new(Scope::from_bindings([("x", Value::Number(1.0))]));
        let inner = Scope::nested(top.clone(), Vec::<(String, Value)>::new());
        assert!(inner.assign("x", Value::Number(7.0)));
        assert_eq!(top.get("x"), Some(Value::Number(7.0)));
        assert!(!inner.assign("nope", Value::Bool(true)));
        assert!(!inner.contains("nope"));
    }
}
