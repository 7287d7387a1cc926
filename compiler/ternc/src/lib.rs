//! Tern command-line runner.
//!
//! `tern run <file>` reads a script, runs it on a fresh interpreter, and
//! reports the first error with its location and call backtrace. The
//! binary in `main.rs` only parses arguments and picks the exit code.

use std::fmt::Write as _;
use std::sync::Once;

use tern_eval::{
    disabled_pacer, silent_handler, EvalError, Interpreter, InterpreterBuilder, Value,
};

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber when `RUST_LOG` is set.
///
/// Safe to call more than once; only the first call has an effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Options accepted by `tern run`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Ignore `delay`; statements run back to back.
    pub no_delay: bool,
    /// Discard `print`/`println` output.
    pub quiet: bool,
    /// Override the interpreter's call depth limit.
    pub max_depth: Option<usize>,
}

impl RunOptions {
    /// Interpreter builder configured from these options.
    pub fn builder(&self) -> InterpreterBuilder {
        let mut builder = Interpreter::builder();
        if self.no_delay {
            builder = builder.pacer(disabled_pacer());
        }
        if self.quiet {
            builder = builder.print_handler(silent_handler());
        }
        if let Some(depth) = self.max_depth {
            builder = builder.max_call_depth(depth);
        }
        builder
    }
}

/// Parse `run` arguments into options and the script path.
///
/// Flags may appear before or after the path; the first non-flag argument
/// is the path.
pub fn parse_run_args(args: &[String]) -> Result<(RunOptions, String), String> {
    let mut options = RunOptions::default();
    let mut path = None;
    for arg in args {
        if arg == "--no-delay" {
            options.no_delay = true;
        } else if arg == "--quiet" || arg == "-q" {
            options.quiet = true;
        } else if let Some(depth) = arg.strip_prefix("--max-depth=") {
            let depth = depth
                .parse()
                .map_err(|_| format!("invalid --max-depth value '{depth}'"))?;
            options.max_depth = Some(depth);
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        } else if path.is_none() {
            path = Some(arg.clone());
        } else {
            return Err(format!("unexpected argument '{arg}'"));
        }
    }
    let path = path.ok_or_else(|| "missing file path".to_string())?;
    Ok((options, path))
}

/// Run `source` on a fresh interpreter configured by `options`.
pub fn run_source(source: &str, options: &RunOptions) -> Result<Value, EvalError> {
    let mut interpreter = options.builder().build();
    interpreter.run(source)
}

/// Render an evaluation error the way the CLI prints it.
///
/// ```text
/// error[AssertionError]: assertion failed: n > 0
///   --> countdown.tern:4:12
///   in function `tick`
///   in function `main`
/// ```
pub fn render_error(err: &EvalError, path: &str, source: &str) -> String {
    let mut out = format!("error[{}]: {}", err.category(), err.kind);
    if let Some(span) = err.span {
        let (line, col) = span.line_col(source);
        let _ = write!(out, "\n  --> {path}:{line}:{col}");
    }
    for function in &err.backtrace {
        let _ = write!(out, "\n  in function `{function}`");
    }
    out
}

/// Read and run the script at `path`, printing the outcome.
///
/// Returns the process exit code.
pub fn run_file(path: &str, options: &RunOptions) -> i32 {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: cannot read '{path}': {e}");
            return 1;
        }
    };

    tracing::debug!(path, bytes = source.len(), "running script");
    match run_source(&source, options) {
        Ok(Value::Void) => 0,
        Ok(value) => {
            println!("=> {value}");
            0
        }
        Err(err) => {
            eprintln!("{}", render_error(&err, path, &source));
            1
        }
    }
}
