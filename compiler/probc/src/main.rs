//! Prob front-end CLI
//!
//! Compiles surface text to trace trees and core forms and reports
//! diagnostics.

mod commands;

use commands::{compile_file, explain_error, CompileArgs};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "compile" => {
            let Some(compile_args) = CompileArgs::parse(&args[2..]) else {
                eprintln!("Usage: probc compile <file.prob> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --tree           Print the trace tree of every form");
                eprintln!("  --core           Print the desugared core form of every form");
                eprintln!("  --ns=<name>      Namespace procedures capture (default: user)");
                eprintln!("  --no-check       Skip the per-node well-formedness check");
                eprintln!("  --no-color       Plain diagnostics");
                std::process::exit(1);
            };
            compile_file(&compile_args);
        }
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: probc --explain <ERROR_CODE>");
                eprintln!("Example: probc --explain E2001");
                std::process::exit(1);
            }
            explain_error(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("probc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // A bare source path compiles it with default options.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("prob"))
            {
                compile_file(&CompileArgs::for_path(command));
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

/// Install a hierarchical tracing subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=prob_canon=debug`.
fn init_tracing() {
    use tracing_subscriber::{prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_err() {
        return;
    }
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            tracing_tree::HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_targets(true)
                .with_indent_lines(true),
        )
        .init();
}

fn print_usage() {
    println!("Prob front end");
    println!();
    println!("Usage: probc <command> [options]");
    println!();
    println!("Commands:");
    println!("  compile <file.prob>  Compile a source file and report diagnostics");
    println!("  --explain <code>     Explain an error code (e.g., E2001)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Compile options:");
    println!("  --tree               Print the trace tree of every form");
    println!("  --core               Print the desugared core form of every form");
    println!("  --ns=<name>          Namespace procedures capture (default: user)");
    println!("  --no-check           Skip the per-node well-formedness check");
    println!("  --no-color           Plain diagnostics");
    println!();
    println!("Examples:");
    println!("  probc compile model.prob --tree");
    println!("  probc compile model.prob --core --ns=models");
    println!("  probc --explain W3001");
}
