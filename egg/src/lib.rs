mod builtin;
mod config;
mod eval;
mod forms;
mod interpreter;
mod procedure;
mod scanner;
mod scope;
mod stack;
mod value;

pub use parser::{parse, Literal, Node, Parsed, Parser, SyntaxError};
pub use scanner::{skip_space, skip_space_and_comments};
pub use eval::{EvalError, Evaluator, DEFAULT_MAX_CALL_DEPTH};
pub use forms::{SpecialForm, SpecialForms};
pub use procedure::{NativeFn, Procedure};
pub use scope::Scope;
pub use value::Value;
pub use builtin::{builtins, top_scope};
pub use config::Config;
pub use interpreter::{run, Interpreter};

mod parser;
