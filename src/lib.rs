pub mod context;
pub mod error;
pub mod export;
pub mod lexer;
pub mod parser;
pub mod path;
pub mod utils;
pub mod value;

pub use context::Context;
pub use error::CtxError;
pub use value::Value;
