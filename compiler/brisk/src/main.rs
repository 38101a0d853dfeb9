//! Brisk CLI.

use brisk::commands::{eval_source, lex_file, parse_file, run_file, FAILURE};

fn print_usage() {
    println!("Brisk scripting language");
    println!();
    println!("Usage: brisk <command> [args]");
    println!();
    println!("Commands:");
    println!("  run <file>       Execute a script file");
    println!("  eval <source>    Evaluate an expression and print its value");
    println!("  tokens <file>    Print the tokens of a file");
    println!("  parse <file>     Print the syntax tree of a file");
    println!("  help             Show this message");
    println!("  version          Show the version");
    println!();
    println!("Set BRISK_LOG (e.g. BRISK_LOG=brisk_eval=debug) for diagnostic logs,");
    println!("and BRISK_LOG_TREE=1 to render them as span trees.");
}

fn main() {
    brisk::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    let Some(command) = args.get(1) else {
        print_usage();
        return;
    };
    let operand = args.get(2).map(String::as_str);

    let code = match (command.as_str(), operand) {
        ("run", Some(path)) => run_file(path),
        ("eval", Some(source)) => eval_source(source),
        ("tokens", Some(path)) => lex_file(path),
        ("parse", Some(path)) => parse_file(path),
        ("run" | "tokens" | "parse", None) => {
            eprintln!("Usage: brisk {command} <file>");
            FAILURE
        }
        ("eval", None) => {
            eprintln!("Usage: brisk eval <source>");
            FAILURE
        }
        ("help" | "--help" | "-h", _) => {
            print_usage();
            0
        }
        ("version" | "--version" | "-V", _) => {
            println!("brisk {}", env!("CARGO_PKG_VERSION"));
            0
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            FAILURE
        }
    };
    if code != 0 {
        std::process::exit(code);
    }
}
