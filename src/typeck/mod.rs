pub mod check;
pub mod env;
pub mod infer;

use std::collections::HashSet;

use crate::diagnostics::CompileError;
use crate::parser::ast::Program;
use crate::types::Type;
use env::TypeMap;

/// Assignment compatibility: equal types, or one of the two widenings
/// the lowering pass can make explicit (int into a float target, char
/// into an int target). Everything else is rejected here so the pass
/// never sees it.
fn assignable(target: Type, source: Type) -> bool {
    target == source
        || (target == Type::Float && source == Type::Int)
        || (target == Type::Int && source == Type::Char)
}

/// Legality-check a parsed program. Returns the global type map the
/// lowering pass is driven with.
pub fn type_check(program: &Program) -> Result<TypeMap, CompileError> {
    let mut globals = TypeMap::new();
    for g in &program.globals {
        if globals.contains(&g.node.name.node) {
            return Err(CompileError::type_err(
                format!("duplicate global '{}'", g.node.name.node),
                g.node.name.span,
            ));
        }
        globals.insert(g.node.name.node.clone(), g.node.ty);
    }

    let mut fn_names = HashSet::new();
    for f in &program.functions {
        let name = &f.node.name;
        if !fn_names.insert(name.node.clone()) {
            return Err(CompileError::type_err(
                format!("duplicate function '{}'", name.node),
                name.span,
            ));
        }
        if globals.contains(&name.node) {
            return Err(CompileError::type_err(
                format!("function '{}' collides with a global of the same name", name.node),
                name.span,
            ));
        }
    }

    for f in &program.functions {
        let func = &f.node;
        let mut names = HashSet::new();
        for d in func.params.iter().chain(&func.locals) {
            if !names.insert(d.node.name.node.clone()) {
                return Err(CompileError::type_err(
                    format!(
                        "duplicate declaration of '{}' in function '{}'",
                        d.node.name.node, func.name.node
                    ),
                    d.node.name.span,
                ));
            }
        }

        check::check_function(func, &program.functions, &globals)?;
    }

    Ok(globals)
}
