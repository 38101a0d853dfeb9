//! CLI command implementations.
//!
//! Each command reports failures on stderr and returns the process exit
//! code, so `main` stays a plain argument match.

use std::path::Path;

use brisk_eval::{Runtime, ScriptError};

use crate::corelib;
use crate::diagnostics::render_error;

/// Exit code for any failed command.
pub const FAILURE: i32 = 1;

fn read_file(path: &str) -> Result<String, i32> {
    std::fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read {path}: {e}");
        FAILURE
    })
}

fn report(path: &str, source: Option<&str>, err: &ScriptError) -> i32 {
    match (source, err.position()) {
        (Some(source), Some(_)) => eprint!("{}", render_error(path, source, err)),
        _ => eprintln!("error: {err}"),
    }
    FAILURE
}

/// A runtime with the `System` library loaded.
pub fn default_runtime() -> Runtime {
    Runtime::new([corelib::library()])
}

/// `brisk run <file>`: execute a script file as a module.
pub fn run_file(path: &str) -> i32 {
    let runtime = default_runtime();
    match runtime.execute_file(Path::new(path)) {
        Ok(_) => 0,
        Err(err) => {
            let source = std::fs::read_to_string(path).ok();
            report(path, source.as_deref(), &err)
        }
    }
}

/// `brisk eval <source>`: evaluate a snippet and print its value.
pub fn eval_source(source: &str) -> i32 {
    let runtime = default_runtime();
    match runtime.execute_expr(source, &runtime.create_namespace()) {
        Ok(value) => {
            println!("{value}");
            0
        }
        Err(err) => report("<expr>", Some(source), &err),
    }
}

/// `brisk tokens <file>`: one token per line.
pub fn lex_file(path: &str) -> i32 {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(code) => return code,
    };
    match brisk_lexer::tokenize(&source) {
        Ok(tokens) => {
            for token in &tokens {
                let position = token.position.to_string();
                let kind = token.kind.to_string();
                println!("{position:>7}  {kind:<12} {:?}", token.text);
            }
            0
        }
        Err(err) => report(path, Some(&source), &ScriptError::Lex(err)),
    }
}

/// `brisk parse <file>`: the syntax tree in debug form.
pub fn parse_file(path: &str) -> i32 {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(code) => return code,
    };
    match brisk_parse::parse(&source) {
        Ok(tree) => {
            println!("{tree:#?}");
            0
        }
        Err(err) => report(path, Some(&source), &ScriptError::from(err)),
    }
}
