use std::fmt;

/// The main error type for context loading, parsing and validation.
#[derive(Debug, Clone, PartialEq)]
pub enum CtxError {
    SyntaxError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    InvalidToken {
        token: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    UnexpectedEof {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a typed payload cannot be read back as its declared type,
    /// or when a stored value is requested as an incompatible type.
    TypeError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a quoted attribute value is not closed.
    UnclosedString {
        quote: char,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when an element is still open at end of input.
    UnclosedTag {
        tag: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised for unexpected characters in markup.
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised for an unrecognized `type` discriminator on a variable element.
    UnknownType {
        type_name: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised by the validation layer when a value fails a declared check.
    ValidationError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl fmt::Display for CtxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CtxError::SyntaxError { message, line, column, hint, code } =>
                write!(f, "[CTX] Syntax Error at {}:{}: {}{}{}",
                    line, column, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            CtxError::InvalidToken { token, line, column, hint, code } =>
                write!(f, "[CTX] Invalid Token '{}' at {}:{}{}{}",
                    token, line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            CtxError::UnexpectedEof { message, line, column, hint, code } =>
                write!(f, "[CTX] Unexpected EOF at {}:{}: {}{}{}",
                    line, column, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            CtxError::TypeError { message, line, column, hint, code } =>
                write!(f, "[CTX] Type Error at {}:{}: {}{}{}",
                    line, column, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            CtxError::UnclosedString { quote, line, column, hint, code } =>
                write!(f, "[CTX] Unclosed string starting with '{}' at {}:{}{}{}",
                    quote, line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            CtxError::UnclosedTag { tag, line, column, hint, code } =>
                write!(f, "[CTX] Unclosed element <{}> at {}:{}{}{}",
                    tag, line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            CtxError::UnexpectedCharacter { character, line, column, hint, code } =>
                write!(f, "[CTX] Unexpected character '{}' at {}:{}{}{}",
                    character, line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            CtxError::UnknownType { type_name, line, column, hint, code } =>
                write!(f, "[CTX] Unknown type '{}' at {}:{}{}{}",
                    type_name, line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            CtxError::ValidationError { message, hint, code } =>
                write!(f, "[CTX] Validation Error: {}{}{}",
                    message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            CtxError::FileError { message, path, hint, code } =>
                write!(f, "[CTX] File Error '{}': {}{}{}",
                    path, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
        }
    }
}

impl std::error::Error for CtxError {}

impl CtxError {
    /// Helper for file-related errors when loading/saving contexts.
    ///
    /// Keeps a consistent error code and a friendly default hint.
    pub fn file_error(message: String, path: String) -> Self {
        CtxError::FileError {
            message,
            path,
            hint: Some("Check file path and permissions".into()),
            code: Some(300),
        }
    }
}
