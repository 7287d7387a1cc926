//! Tern CLI
//!
//! `tern run <file> [options]` or `tern <file> [options]`.

use ternc::{init_tracing, parse_run_args, run_file};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let run_args = match args[1].as_str() {
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        "version" | "--version" | "-V" => {
            println!("tern {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        "run" => &args[2..],
        _ => &args[1..],
    };

    let (options, path) = match parse_run_args(run_args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    let code = run_file(&path, &options);
    if code != 0 {
        std::process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: tern run <file> [options]");
    eprintln!("       tern <file> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --no-delay         Ignore the `delay` variable");
    eprintln!("  -q, --quiet        Discard print/println output");
    eprintln!("  --max-depth=<n>    Maximum nested function calls (default: 512)");
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=tern_eval=debug) to enable tracing.");
}
