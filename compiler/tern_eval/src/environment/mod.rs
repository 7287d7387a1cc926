//! Scope arena for variable lookup.
//!
//! Every block, loop iteration, conditional branch and function call runs in
//! a fresh child scope. Scopes live in a single arena and refer to their
//! parent by index, so the parent chain never owns anything and lookup is
//! iterative index-chasing. Execution is strictly nested, which makes the
//! arena a stack: a child is always pushed on top of the scope that was
//! current when it was created, and popped before that scope continues.

use rustc_hash::FxHashMap;

use crate::value::{Value, ValueType};

/// Whether a variable binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    /// Binding can be reassigned (`var x = ...`).
    Mutable,
    /// Binding cannot be reassigned or incremented (`val x = ...`).
    Final,
}

impl Mutability {
    /// Returns `true` if this is `Final`.
    #[inline]
    pub fn is_final(self) -> bool {
        matches!(self, Mutability::Final)
    }
}

/// Error returned by [`Environment::assign`] and [`Environment::define`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// Variable exists but is final.
    Final,
    /// Variable not found in any scope.
    Undefined,
    /// Variable has a declared type the new value does not match.
    TypeMismatch { expected: ValueType },
}

/// A variable binding.
#[derive(Clone, Debug)]
pub struct Variable {
    pub mutability: Mutability,
    /// Declared type; `None` accepts anything.
    pub ty: Option<ValueType>,
    pub value: Value,
}

impl Variable {
    /// Create a new binding.
    pub fn new(mutability: Mutability, ty: Option<ValueType>, value: Value) -> Self {
        Variable {
            mutability,
            ty,
            value,
        }
    }

    /// Returns `true` if this binding cannot change.
    #[inline]
    pub fn is_final(&self) -> bool {
        self.mutability.is_final()
    }

    /// Whether `value` satisfies this binding's declared type.
    #[inline]
    pub fn accepts(&self, value: &Value) -> bool {
        self.ty.map_or(true, |ty| ty.accepts(value))
    }
}

/// Index of a scope in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    /// The outermost scope.
    pub const ROOT: ScopeId = ScopeId(0);
}

/// A single scope containing variable bindings.
#[derive(Debug)]
struct Scope {
    variables: FxHashMap<String, Variable>,
    parent: Option<ScopeId>,
    depth: usize,
}

impl Scope {
    fn new(parent: Option<ScopeId>, depth: usize) -> Self {
        Scope {
            variables: FxHashMap::default(),
            parent,
            depth,
        }
    }
}

/// Arena of scopes, root at index 0 and the current scope on top.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Environment {
    /// Create an environment holding only the root scope.
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::new(None, 0)],
        }
    }

    /// The scope new bindings go into.
    #[inline]
    pub fn current(&self) -> ScopeId {
        ScopeId(self.scopes.len() - 1)
    }

    /// Nesting depth of the current scope; the root is 0.
    #[inline]
    pub fn depth(&self) -> usize {
        self.scopes.last().map_or(0, |scope| scope.depth)
    }

    /// Whether the current scope is the root.
    #[inline]
    pub fn at_root(&self) -> bool {
        self.scopes.len() == 1
    }

    /// Push a child of the current scope and make it current.
    pub fn push_scope(&mut self) -> ScopeId {
        let parent = self.current();
        let depth = self.depth() + 1;
        self.scopes.push(Scope::new(Some(parent), depth));
        self.current()
    }

    /// Discard the current scope. The root scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Discard every scope above the root.
    pub fn reset_to_root(&mut self) {
        self.scopes.truncate(1);
    }

    /// Bind `name` in the current scope.
    ///
    /// Replaces an existing binding of the same scope unless it is final.
    /// Bindings in enclosing scopes are shadowed, never touched.
    pub fn define(&mut self, name: &str, variable: Variable) -> Result<(), AssignError> {
        let current = self.current();
        self.define_in(current, name, variable)
    }

    /// Bind `name` in the root scope unconditionally, replacing any binding.
    ///
    /// Host registration only; scripts go through [`define`](Self::define).
    pub fn bind_global(&mut self, name: &str, variable: Variable) {
        self.scopes[ScopeId::ROOT.0]
            .variables
            .insert(name.to_string(), variable);
    }

    fn define_in(&mut self, id: ScopeId, name: &str, variable: Variable) -> Result<(), AssignError> {
        let scope = &mut self.scopes[id.0];
        if scope.variables.get(name).is_some_and(Variable::is_final) {
            return Err(AssignError::Final);
        }
        scope.variables.insert(name.to_string(), variable);
        Ok(())
    }

    /// Find the innermost scope that binds `name`.
    pub fn resolve(&self, name: &str) -> Option<ScopeId> {
        let mut id = Some(self.current());
        while let Some(ScopeId(index)) = id {
            let scope = &self.scopes[index];
            if scope.variables.contains_key(name) {
                return Some(ScopeId(index));
            }
            id = scope.parent;
        }
        None
    }

    /// Look up a variable, walking from the current scope to the root.
    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        let id = self.resolve(name)?;
        self.scopes[id.0].variables.get(name)
    }

    /// Mutable variant of [`lookup`](Self::lookup).
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Variable> {
        let id = self.resolve(name)?;
        self.scopes[id.0].variables.get_mut(name)
    }

    /// Look up a variable in the root scope only.
    pub fn lookup_global(&self, name: &str) -> Option<&Variable> {
        self.scopes[ScopeId::ROOT.0].variables.get(name)
    }

    /// Assign to the innermost binding of `name`, enforcing `final` and the
    /// declared type.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        let variable = self.lookup_mut(name).ok_or(AssignError::Undefined)?;
        if variable.is_final() {
            return Err(AssignError::Final);
        }
        if let Some(expected) = variable.ty {
            if !expected.accepts(&value) {
                return Err(AssignError::TypeMismatch { expected });
            }
        }
        variable.value = value;
        Ok(())
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
