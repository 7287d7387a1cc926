//! RAII-style scope guards for Interpreter environment management.
//!
//! [`ScopedInterpreter`] pushes a child scope on creation and pops it on
//! drop, so early returns through `?` and unwinding never leave a stale
//! scope on the arena.

use std::ops::{Deref, DerefMut};

use super::Interpreter;

/// RAII guard that ensures environment scope cleanup on drop.
///
/// Access the interpreter through this guard; it implements `Deref` and
/// `DerefMut`.
///
/// ```text
/// let mut scoped = interpreter.scoped();
/// scoped.define(name, variable)?;
/// scoped.exec_statements(&mut cursor, false)?;
/// // scope popped here
/// ```
pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope();
        tracing::debug!(depth = self.interpreter.env.depth(), "pop scope");
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Push a child of the current scope; it is popped when the guard drops.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_> {
        self.env.push_scope();
        tracing::debug!(depth = self.env.depth(), "push scope");
        ScopedInterpreter { interpreter: self }
    }

    /// Run `f` in a fresh child scope.
    #[inline]
    pub fn with_env_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }
}
