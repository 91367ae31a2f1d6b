use crate::lexer::{Lexer, Token};
use crate::CtxError;
use crate::context::Context;
use crate::value::Value;

mod document;
mod value;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    peek: Option<Token>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Self, CtxError> {
        let mut lexer = Lexer::new(input);
        let peek = Some(lexer.next_token()?);
        Ok(Self { lexer, peek })
    }

    pub(crate) fn bump(&mut self) -> Result<Token, CtxError> {
        let curr = self.peek.take().ok_or(CtxError::UnexpectedEof {
            message: "Unexpected end of input".into(),
            line: self.lexer.line(),
            column: self.lexer.column(),
            hint: None,
            code: Some(201),
        })?;
        self.peek = Some(self.lexer.next_token()?);
        Ok(curr)
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.peek.as_ref()
    }

    pub(crate) fn expect(&mut self, expected: Token) -> Result<Token, CtxError> {
        let token = self.bump()?;
        if token != expected {
            return Err(CtxError::SyntaxError {
                message: format!("Expected {:?}, got {:?}", expected, token),
                line: self.lexer.line(),
                column: self.lexer.column(),
                hint: Some("Check the document structure".into()),
                code: Some(202),
            });
        }
        Ok(token)
    }

    pub(crate) fn line(&self) -> usize {
        self.lexer.line()
    }

    pub(crate) fn column(&self) -> usize {
        self.lexer.column()
    }

    // Re-export main public methods
    pub fn parse_document(&mut self) -> Result<Context, CtxError> {
        document::parse_document(self)
    }
}
