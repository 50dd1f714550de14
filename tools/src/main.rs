use egg::{Config, EvalError, Interpreter};
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

// Logging stays off unless RUST_LOG is set, eg: RUST_LOG=egg=trace
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};
        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn report(result: Result<egg::Value, EvalError>) {
    match result {
        Err(EvalError::Syntax(e)) => println!("Parse err: {}", e),
        Err(e) => println!("Eval err: {}", e),
        Ok(value) => println!("{}", value),
    }
}

fn main() -> Result<(), String> {
    init_tracing();
    let config = Config::from_env();
    tracing::debug!(?config, "starting");
    let interp = Interpreter::new(&config);

    let files: Vec<String> = std::env::args().skip(1).collect();
    if !files.is_empty() {
        for path in files {
            let source = std::fs::read_to_string(&path)
                .map_err(|e| format!("Can't read {}: {}", path, e))?;
            report(interp.run(&source));
        }
        return Ok(());
    }

    use rustyline::error::ReadlineError;
    let mut rl = rustyline::DefaultEditor::new().map_err(|e| e.to_string())?;
    loop {
        match rl.readline("~> ") {
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
            Err(e) => return Err(format!("Readline err: {:?}", e)),
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                report(interp.run(&line));
            }
        }
    }
}
