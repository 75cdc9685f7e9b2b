//! Command implementations.

use prob_canon::{CompileOptions, Compiler, Namespace, NamespaceTable};
use prob_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use prob_diagnostic::ErrorCode;
use prob_ir::StringInterner;
use prob_trie::MemoryTrie;

/// Options of `probc compile`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileArgs {
    pub path: String,
    pub print_tree: bool,
    pub print_core: bool,
    pub namespace: Namespace,
    pub check_nodes: bool,
    pub color: ColorMode,
}

impl CompileArgs {
    pub fn for_path(path: &str) -> Self {
        CompileArgs {
            path: path.to_string(),
            print_tree: false,
            print_core: false,
            namespace: Namespace::default(),
            check_nodes: true,
            color: ColorMode::Auto,
        }
    }

    /// Parse the arguments after `compile`. Flags may come before or after
    /// the path; `None` when no path is given.
    pub fn parse(args: &[String]) -> Option<Self> {
        let mut parsed = CompileArgs::for_path("");
        let mut path = None;
        for arg in args {
            if arg == "--tree" {
                parsed.print_tree = true;
            } else if arg == "--core" {
                parsed.print_core = true;
            } else if let Some(ns) = arg.strip_prefix("--ns=") {
                parsed.namespace = Namespace::new(ns);
            } else if arg == "--no-check" {
                parsed.check_nodes = false;
            } else if arg == "--no-color" {
                parsed.color = ColorMode::Never;
            } else if !arg.starts_with('-') && path.is_none() {
                path = Some(arg.clone());
            } else {
                eprintln!("warning: ignoring unknown option '{arg}'");
            }
        }
        parsed.path = path?;
        Some(parsed)
    }
}

fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Compile a source file, print what was asked for, and report diagnostics.
pub fn compile_file(args: &CompileArgs) {
    let source = read_file(&args.path);
    tracing::debug!(path = %args.path, bytes = source.len(), "compiling file");
    let interner = StringInterner::new();
    let env = NamespaceTable::new();
    let options = CompileOptions::default()
        .with_namespace(args.namespace.clone())
        .with_node_check(args.check_nodes);
    let compiler = Compiler::new(&interner, &MemoryTrie, &env, options);

    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let mut emitter = TerminalEmitter::with_color_mode(std::io::stderr(), args.color, is_tty)
        .with_source(&args.path, &source);

    let module = match compiler.compile_source(&source) {
        Ok(module) => module,
        Err(err) => {
            emitter.emit(&err.to_diagnostic());
            emitter.emit_summary(1, 0);
            emitter.flush();
            std::process::exit(1);
        }
    };

    for (i, form) in module.forms.iter().enumerate() {
        if args.print_tree || args.print_core {
            println!(";; form {i}");
        }
        if args.print_tree {
            println!("{}", form.tree);
        }
        if args.print_core {
            println!("{}", form.core.display(&interner));
        }
    }

    for procedure in module.procedures() {
        let name = procedure.name.map_or("<anonymous>", |n| interner.lookup(n));
        println!("{name} {} ({} nodes)", procedure.identity, procedure.body.size());
    }

    let warnings: Vec<_> = module.warnings().collect();
    for warning in &warnings {
        emitter.emit(warning);
    }
    if !warnings.is_empty() {
        emitter.emit_summary(0, warnings.len());
    }
    emitter.flush();
}

/// Print the description of an error code.
pub fn explain_error(code_str: &str) {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format EXXXX (errors) or WXXXX (warnings) where X is a digit.");
        eprintln!("Examples: E0001, E1001, E2001, W3001");
        std::process::exit(1);
    };
    let stage = if code.is_reader_error() {
        "reader"
    } else if code.is_structural_error() {
        "structural"
    } else if code.is_naming_error() {
        "naming"
    } else if code.is_warning() {
        "style warning"
    } else {
        "internal"
    };
    println!("{code} ({stage}): {}", code.description());
}
