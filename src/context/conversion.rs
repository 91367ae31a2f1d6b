// Author: Dustin Pilgrim
// License: MIT

use crate::context::Context;
use crate::{CtxError, Value};

impl TryFrom<Value> for f64 {
    type Error = CtxError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Real(x) => Ok(x),
            other => Err(CtxError::TypeError {
                message: format!("Expected real, got {}", other.type_name()),
                line: 0,
                column: 0,
                hint: Some("Store the value as a real".into()),
                code: Some(402),
            }),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = CtxError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Real(x) => Ok(x as f32),
            other => Err(CtxError::TypeError {
                message: format!("Expected real, got {}", other.type_name()),
                line: 0,
                column: 0,
                hint: Some("Store the value as a real".into()),
                code: Some(402),
            }),
        }
    }
}

impl TryFrom<Value> for i32 {
    type Error = CtxError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Real(x) => {
                if x >= i32::MIN as f64 && x <= i32::MAX as f64 {
                    Ok(x as i32)
                } else {
                    Err(CtxError::TypeError {
                        message: format!("Real {} out of range for i32", x),
                        line: 0,
                        column: 0,
                        hint: Some("Use a value within i32 range".into()),
                        code: Some(407),
                    })
                }
            }
            other => Err(CtxError::TypeError {
                message: format!("Expected real, got {}", other.type_name()),
                line: 0,
                column: 0,
                hint: Some("Store the value as a real".into()),
                code: Some(402),
            }),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = CtxError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Real(x) => Ok(x as i64),
            other => Err(CtxError::TypeError {
                message: format!("Expected real, got {}", other.type_name()),
                line: 0,
                column: 0,
                hint: Some("Store the value as a real".into()),
                code: Some(402),
            }),
        }
    }
}

impl TryFrom<Value> for usize {
    type Error = CtxError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Real(x) => {
                if x >= 0.0 && x.is_finite() {
                    Ok(x as usize)
                } else {
                    Err(CtxError::TypeError {
                        message: format!("Real {} out of range for usize", x),
                        line: 0,
                        column: 0,
                        hint: Some("Use a non-negative finite value".into()),
                        code: Some(409),
                    })
                }
            }
            other => Err(CtxError::TypeError {
                message: format!("Expected real, got {}", other.type_name()),
                line: 0,
                column: 0,
                hint: Some("Store the value as a real".into()),
                code: Some(402),
            }),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = CtxError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(CtxError::TypeError {
                message: format!("Expected text, got {}", other.type_name()),
                line: 0,
                column: 0,
                hint: Some("Store the value as text".into()),
                code: Some(401),
            }),
        }
    }
}

impl TryFrom<Value> for Vec<i32> {
    type Error = CtxError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::IntList(items) => Ok(items),
            other => Err(CtxError::TypeError {
                message: format!("Expected intlist, got {}", other.type_name()),
                line: 0,
                column: 0,
                hint: Some("Store the value as an intlist".into()),
                code: Some(405),
            }),
        }
    }
}

impl TryFrom<Value> for Context {
    type Error = CtxError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Sub(ctx) => Ok(ctx),
            other => Err(CtxError::TypeError {
                message: format!("Expected context, got {}", other.type_name()),
                line: 0,
                column: 0,
                hint: Some("Store the value as a nested context".into()),
                code: Some(410),
            }),
        }
    }
}
