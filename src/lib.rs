pub mod span;
pub mod diagnostics;
pub mod types;
pub mod lexer;
pub mod parser;
pub mod typeck;
pub mod coerce;
pub mod pretty;

use std::path::Path;

use diagnostics::CompileError;
use parser::ast::Program;
use typeck::env::TypeMap;

/// Lex and parse a source string.
pub fn parse_source(source: &str) -> Result<Program, CompileError> {
    let tokens = lexer::lex(source)?;
    let mut parser = parser::Parser::new(&tokens, source);
    parser.parse_program()
}

/// Parse and legality-check a source string. Returns the program and
/// the global type map the lowering pass is driven with.
pub fn check_source(source: &str) -> Result<(Program, TypeMap), CompileError> {
    let program = parse_source(source)?;
    let globals = typeck::type_check(&program)?;
    Ok((program, globals))
}

/// Full pipeline: lex → parse → check → lower. The returned program
/// carries every implicit coercion as an explicit conversion node.
pub fn lower_source(source: &str) -> Result<Program, CompileError> {
    let (program, globals) = check_source(source)?;
    coerce::coerce_program(&program, &globals)
}

/// `lower_source` over a file on disk.
pub fn lower_file(path: &Path) -> Result<Program, CompileError> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| CompileError::io(format!("failed to read {}: {e}", path.display())))?;
    lower_source(&source)
}
