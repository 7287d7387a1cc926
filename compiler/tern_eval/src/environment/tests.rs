#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;

fn var(value: i64) -> Variable {
    Variable::new(Mutability::Mutable, None, Value::Number(value))
}

fn val(value: i64) -> Variable {
    Variable::new(Mutability::Final, None, Value::Number(value))
}

fn number_of(env: &Environment, name: &str) -> Option<i64> {
    env.lookup(name).and_then(|v| v.value.as_number())
}

#[test]
fn define_and_lookup() {
    let mut env = Environment::new();
    env.define("x", var(42)).unwrap();
    assert_eq!(number_of(&env, "x"), Some(42));
    assert!(env.lookup("y").is_none());
}

#[test]
fn child_shadows_parent() {
    let mut env = Environment::new();
    env.define("x", val(1)).unwrap();

    env.push_scope();
    env.define("x", val(2)).unwrap();
    assert_eq!(number_of(&env, "x"), Some(2));

    env.pop_scope();
    assert_eq!(number_of(&env, "x"), Some(1));
}

#[test]
fn lookup_walks_parent_chain() {
    let mut env = Environment::new();
    env.define("outer", var(7)).unwrap();
    env.push_scope();
    env.push_scope();
    assert_eq!(env.depth(), 2);
    assert_eq!(number_of(&env, "outer"), Some(7));
    assert_eq!(env.resolve("outer"), Some(ScopeId::ROOT));
}

#[test]
fn assign_updates_innermost_binding() {
    let mut env = Environment::new();
    env.define("x", var(1)).unwrap();
    env.push_scope();
    assert!(env.assign("x", Value::Number(5)).is_ok());
    env.pop_scope();
    assert_eq!(number_of(&env, "x"), Some(5));
}

#[test]
fn assign_to_final_fails() {
    let mut env = Environment::new();
    env.define("x", val(1)).unwrap();
    assert_eq!(env.assign("x", Value::Number(2)), Err(AssignError::Final));
    assert_eq!(number_of(&env, "x"), Some(1));
}

#[test]
fn assign_to_undefined_fails() {
    let mut env = Environment::new();
    assert_eq!(env.assign("nope", Value::Number(2)), Err(AssignError::Undefined));
}

#[test]
fn assign_checks_declared_type() {
    let mut env = Environment::new();
    env.define(
        "x",
        Variable::new(Mutability::Mutable, Some(ValueType::Number), Value::text("s")),
    )
    .unwrap();
    assert!(!env.lookup("x").unwrap().accepts(&Value::text("t")));
    assert_eq!(
        env.assign("x", Value::text("t")),
        Err(AssignError::TypeMismatch {
            expected: ValueType::Number
        })
    );
    assert!(env.assign("x", Value::Number(3)).is_ok());
}

#[test]
fn redefining_final_in_same_scope_fails() {
    let mut env = Environment::new();
    env.define("x", val(1)).unwrap();
    assert_eq!(env.define("x", var(2)), Err(AssignError::Final));

    env.push_scope();
    assert!(env.define("x", var(3)).is_ok());
}

#[test]
fn redefining_mutable_replaces() {
    let mut env = Environment::new();
    env.define("x", var(1)).unwrap();
    env.define("x", val(2)).unwrap();
    assert_eq!(number_of(&env, "x"), Some(2));
    assert!(env.lookup("x").unwrap().is_final());
}

#[test]
fn root_is_never_popped() {
    let mut env = Environment::new();
    env.define("x", var(1)).unwrap();
    env.pop_scope();
    assert!(env.at_root());
    assert_eq!(number_of(&env, "x"), Some(1));
}

#[test]
fn reset_to_root_discards_children() {
    let mut env = Environment::new();
    env.push_scope();
    env.define("inner", var(1)).unwrap();
    env.push_scope();
    env.reset_to_root();
    assert!(env.at_root());
    assert_eq!(env.depth(), 0);
    assert!(env.lookup("inner").is_none());
}

#[test]
fn bind_global_from_nested_scope_replaces_final() {
    let mut env = Environment::new();
    env.define("g", val(1)).unwrap();
    env.push_scope();
    env.bind_global("g", var(9));
    env.pop_scope();
    assert_eq!(env.lookup_global("g").and_then(|v| v.value.as_number()), Some(9));
}
