use std::collections::HashMap;

use crate::parser::ast::{Decl, Function};
use crate::span::Spanned;
use crate::types::Type;

/// Identifier → declared type. One of these is built per function for
/// both checking and lowering, so the two passes always agree on what
/// a name means.
#[derive(Debug, Clone, Default)]
pub struct TypeMap {
    entries: HashMap<String, Type>,
}

impl TypeMap {
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    pub fn insert(&mut self, name: impl Into<String>, ty: Type) {
        self.entries.insert(name.into(), ty);
    }

    /// Merge `other` in; its entries win on collision.
    pub fn merge(&mut self, other: &TypeMap) {
        for (name, ty) in &other.entries {
            self.entries.insert(name.clone(), *ty);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Type> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Map a declaration list (globals, params, or locals).
pub fn typing(decls: &[Spanned<Decl>]) -> TypeMap {
    let mut map = TypeMap::new();
    for d in decls {
        map.insert(d.node.name.node.clone(), d.node.ty);
    }
    map
}

/// Build the environment `func`'s body is checked and lowered under.
///
/// Layers merge in this order, later entries winning on collision:
/// every function signature (name → declared return type, so calls and
/// recursion resolve), then the global map, then locals, then params,
/// so a parameter shadows a same-named local or global. The checker
/// rejects programs where a function name collides with a global, so
/// the signature/global overlap is never observable.
pub fn function_env(
    functions: &[Spanned<Function>],
    globals: &TypeMap,
    func: &Function,
) -> TypeMap {
    let mut env = TypeMap::new();
    for f in functions {
        env.insert(f.node.name.node.clone(), f.node.return_type);
    }
    env.merge(globals);
    if !func.locals.is_empty() {
        env.merge(&typing(&func.locals));
    }
    if !func.params.is_empty() {
        env.merge(&typing(&func.params));
    }
    env
}
