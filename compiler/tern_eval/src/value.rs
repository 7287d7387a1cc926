//! Runtime values for the Tern interpreter.

use std::fmt;
use std::rc::Rc;

use tern_lexer::Token;

use crate::EvalResult;

/// Host-supplied routine backing a native function.
///
/// Receives the already-evaluated arguments. Natives run synchronously and
/// must not call back into the interpreter that invoked them.
pub type NativeFn = Rc<dyn Fn(&[Value]) -> EvalResult>;

/// Declarable runtime type of a variable or parameter.
///
/// An absent type (`Option::None` at the use sites, `any` in source) accepts
/// every value, including `Void`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Number,
    String,
    Boolean,
    Function,
}

impl ValueType {
    /// Look up a type by its source spelling (`number`, `string`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "number" => Some(ValueType::Number),
            "string" => Some(ValueType::String),
            "boolean" => Some(ValueType::Boolean),
            "function" => Some(ValueType::Function),
            _ => None,
        }
    }

    /// The source spelling of this type.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
            ValueType::Function => "function",
        }
    }

    /// Structural check: does `value` have this runtime type?
    #[inline]
    pub fn accepts(self, value: &Value) -> bool {
        value.value_type() == Some(self)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    /// 64-bit integer; Tern has no floating point.
    Number(i64),
    /// Immutable string, shared on clone.
    Text(Rc<str>),
    Boolean(bool),
    Function(Rc<FunctionValue>),
    /// Absence of a value: calls without `return`, natives like `print`.
    Void,
}

impl Value {
    /// Create a text value.
    #[inline]
    pub fn text(s: impl Into<Rc<str>>) -> Self {
        Value::Text(s.into())
    }

    /// Runtime type, or `None` for `Void`.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Value::Number(_) => Some(ValueType::Number),
            Value::Text(_) => Some(ValueType::String),
            Value::Boolean(_) => Some(ValueType::Boolean),
            Value::Function(_) => Some(ValueType::Function),
            Value::Void => None,
        }
    }

    /// Name of the runtime type for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.value_type().map_or("void", ValueType::name)
    }

    /// Truthiness used by `assert`, `if` and `while`.
    ///
    /// `false`, `0`, `""` and `Void` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0,
            Value::Text(s) => !s.is_empty(),
            Value::Boolean(b) => *b,
            Value::Function(_) => true,
            Value::Void => false,
        }
    }

    /// Get as number, if this is one.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Structural equality; values of different types are never equal.
    /// Functions compare by identity.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Void, Value::Void) => true,
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Function(func) => write!(f, "<function {}>", func.name),
            Value::Void => f.write_str("void"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Text(s) => write!(f, "Text({s:?})"),
            Value::Boolean(b) => write!(f, "Boolean({b})"),
            Value::Function(func) => write!(f, "Function({})", func.name),
            Value::Void => f.write_str("Void"),
        }
    }
}

/// A declared parameter: `name` or `name: type`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: Option<ValueType>,
}

impl Parameter {
    /// Parameter that accepts any value.
    pub fn untyped(name: impl Into<String>) -> Self {
        Parameter {
            name: name.into(),
            ty: None,
        }
    }

    /// Parameter with a declared type.
    pub fn typed(name: impl Into<String>, ty: ValueType) -> Self {
        Parameter {
            name: name.into(),
            ty: Some(ty),
        }
    }
}

/// What runs when a function is called.
#[derive(Clone)]
pub enum FunctionBody {
    /// Captured, unevaluated block tokens (without the braces).
    Tokens(Rc<[Token]>),
    /// Host routine. Variadic natives skip arity and parameter type checks.
    Native { func: NativeFn, variadic: bool },
}

impl fmt::Debug for FunctionBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionBody::Tokens(tokens) => write!(f, "Tokens({} tokens)", tokens.len()),
            FunctionBody::Native { variadic, .. } => {
                f.debug_struct("Native").field("variadic", variadic).finish()
            }
        }
    }
}

/// A callable function: interpreted or native.
#[derive(Clone, Debug)]
pub struct FunctionValue {
    pub name: String,
    pub parameters: Vec<Parameter>,
    /// Recorded from the declaration; not enforced on return.
    pub return_type: Option<ValueType>,
    pub body: FunctionBody,
}

impl FunctionValue {
    /// Whether this function is backed by a host routine.
    pub fn is_native(&self) -> bool {
        matches!(self.body, FunctionBody::Native { .. })
    }
}
