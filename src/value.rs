use crate::context::Context;

/// A single storable value: the variant set is closed and a value's tag is
/// fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Real(f64),
    Text(String),
    IntList(Vec<i32>),
    Sub(Context),
}

impl Value {
    /// The type discriminator used in the persisted format and in error
    /// messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::IntList(_) => "intlist",
            Value::Sub(_) => "context",
        }
    }

    pub fn as_sub(&self) -> Option<&Context> {
        if let Value::Sub(ctx) = self {
            Some(ctx)
        } else {
            None
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Real(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<i32>> for Value {
    fn from(v: Vec<i32>) -> Self {
        Value::IntList(v)
    }
}

impl From<&[i32]> for Value {
    fn from(v: &[i32]) -> Self {
        Value::IntList(v.to_vec())
    }
}

impl From<Context> for Value {
    fn from(ctx: Context) -> Self {
        Value::Sub(ctx)
    }
}
