use super::*;
use super::scanner::{bump, decode_entity, skip_comment, skip_declaration, skip_whitespace};

pub(super) fn next_token(lexer: &mut Lexer) -> Result<Token, CtxError> {
    if lexer.in_content {
        if let Some(text) = tokenize_text(lexer)? {
            return Ok(text);
        }
        // whitespace-only run: formatting between elements
    }

    skip_whitespace(lexer);

    match lexer.peek {
        Some('<') => tokenize_angle(lexer),
        Some('>') => {
            bump(lexer);
            lexer.in_content = true;
            Ok(Token::Gt)
        }
        Some('/') => tokenize_self_close(lexer),
        Some('=') => {
            bump(lexer);
            Ok(Token::Equals)
        }
        Some('"') | Some('\'') => tokenize_quoted(lexer),
        Some(c) if is_name_start(c) => tokenize_name(lexer),
        Some(ch) => tokenize_unexpected_char(lexer, ch),
        None => Ok(Token::Eof),
    }
}

/// Character data between a closed tag and the next '<'.
///
/// Returns None when the raw run is whitespace-only; decoded references
/// count as significant, so escaped whitespace survives.
fn tokenize_text(lexer: &mut Lexer) -> Result<Option<Token>, CtxError> {
    let mut content = String::new();
    let mut significant = false;

    while let Some(ch) = lexer.peek {
        if ch == '<' {
            break;
        }
        if ch == '&' {
            bump(lexer); // consume '&'
            content.push(decode_entity(lexer)?);
            significant = true;
        } else {
            if !ch.is_whitespace() {
                significant = true;
            }
            content.push(ch);
            bump(lexer);
        }
    }

    lexer.in_content = false;
    if significant {
        Ok(Some(Token::Text(content)))
    } else {
        Ok(None)
    }
}

fn tokenize_angle(lexer: &mut Lexer) -> Result<Token, CtxError> {
    bump(lexer); // consume '<'
    match lexer.peek {
        Some('/') => {
            bump(lexer);
            Ok(Token::LtSlash)
        }
        Some('!') => {
            skip_comment(lexer)?;
            next_token(lexer)
        }
        Some('?') => {
            skip_declaration(lexer)?;
            next_token(lexer)
        }
        _ => Ok(Token::Lt),
    }
}

fn tokenize_self_close(lexer: &mut Lexer) -> Result<Token, CtxError> {
    bump(lexer); // consume '/'
    if lexer.peek == Some('>') {
        bump(lexer);
        lexer.in_content = true;
        Ok(Token::SlashGt)
    } else {
        Err(CtxError::UnexpectedCharacter {
            character: '/',
            line: lexer.line,
            column: lexer.column,
            hint: Some("'/' in markup is only valid as '/>'".into()),
            code: Some(104),
        })
    }
}

fn tokenize_quoted(lexer: &mut Lexer) -> Result<Token, CtxError> {
    let quote = bump(lexer).unwrap();
    let mut content = String::new();

    while let Some(ch) = lexer.peek {
        if ch == quote {
            bump(lexer); // consume the closing quote
            return Ok(Token::Quoted(content));
        }

        if ch == '&' {
            bump(lexer); // consume '&'
            content.push(decode_entity(lexer)?);
        } else {
            content.push(ch);
            bump(lexer);
        }
    }

    Err(CtxError::UnclosedString {
        quote,
        line: lexer.line,
        column: lexer.column,
        hint: Some("Attribute value not closed".into()),
        code: Some(101),
    })
}

fn tokenize_name(lexer: &mut Lexer) -> Result<Token, CtxError> {
    let mut name = String::new();

    while let Some(ch) = lexer.peek {
        if is_name_char(ch) {
            name.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }

    Ok(Token::Name(name))
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '.'
}

fn tokenize_unexpected_char(lexer: &mut Lexer, ch: char) -> Result<Token, CtxError> {
    bump(lexer);
    Err(CtxError::UnexpectedCharacter {
        character: ch,
        line: lexer.line,
        column: lexer.column,
        hint: Some("Unexpected character in markup".into()),
        code: Some(104),
    })
}
