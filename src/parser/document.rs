use super::*;

pub(super) fn parse_document(parser: &mut Parser) -> Result<Context, CtxError> {
    parser.expect(Token::Lt)?;

    let ctx = match parser.bump()? {
        Token::Name(name) if name == "context" => parse_context(parser)?,
        tok => {
            return Err(CtxError::InvalidToken {
                token: format!("{:?}", tok),
                line: parser.line(),
                column: parser.column(),
                hint: Some("Expected a <context> root element".into()),
                code: Some(209),
            });
        }
    };

    // Nothing but trailing whitespace may follow the root element
    match parser.bump()? {
        Token::Eof => Ok(ctx),
        tok => Err(CtxError::InvalidToken {
            token: format!("{:?}", tok),
            line: parser.line(),
            column: parser.column(),
            hint: Some("Expected end of input after the root element".into()),
            code: Some(205),
        }),
    }
}

/// Parse a context element; `<context` has already been consumed.
fn parse_context(parser: &mut Parser) -> Result<Context, CtxError> {
    let mut ctx = Context::new();

    for (key, val) in parse_attributes(parser)? {
        if key == "path" {
            ctx.set_path(val);
        } else {
            return Err(CtxError::SyntaxError {
                message: format!("Unexpected attribute '{}' on <context>", key),
                line: parser.line(),
                column: parser.column(),
                hint: Some("<context> takes only a 'path' attribute".into()),
                code: Some(203),
            });
        }
    }

    match parser.bump()? {
        Token::SlashGt => return Ok(ctx), // empty element
        Token::Gt => {}
        tok => {
            return Err(CtxError::InvalidToken {
                token: format!("{:?}", tok),
                line: parser.line(),
                column: parser.column(),
                hint: Some("Expected '>' or '/>'".into()),
                code: Some(205),
            });
        }
    }

    loop {
        match parser.bump()? {
            Token::Lt => match parser.bump()? {
                Token::Name(n) if n == "var" => {
                    let (name, value) = parse_var(parser)?;
                    ctx.add(&name, value);
                }
                Token::Name(n) if n == "context" => {
                    let child = parse_context(parser)?;
                    ctx.attach_child(child);
                }
                tok => {
                    return Err(CtxError::InvalidToken {
                        token: format!("{:?}", tok),
                        line: parser.line(),
                        column: parser.column(),
                        hint: Some("Expected a <var> or <context> element".into()),
                        code: Some(205),
                    });
                }
            },
            Token::LtSlash => {
                close_tag(parser, "context")?;
                return Ok(ctx);
            }
            Token::Eof => {
                return Err(CtxError::UnclosedTag {
                    tag: "context".into(),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("Missing </context>".into()),
                    code: Some(207),
                });
            }
            tok => {
                return Err(CtxError::InvalidToken {
                    token: format!("{:?}", tok),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("Character data is only valid inside <var> elements".into()),
                    code: Some(205),
                });
            }
        }
    }
}

/// Parse a variable element; `<var` has already been consumed.
fn parse_var(parser: &mut Parser) -> Result<(String, Value), CtxError> {
    let mut name = None;
    let mut type_tag = None;

    for (key, val) in parse_attributes(parser)? {
        match key.as_str() {
            "name" => name = Some(val),
            "type" => type_tag = Some(val),
            other => {
                return Err(CtxError::SyntaxError {
                    message: format!("Unexpected attribute '{}' on <var>", other),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("<var> takes 'name' and 'type' attributes".into()),
                    code: Some(203),
                });
            }
        }
    }

    let name = name.ok_or_else(|| missing_attribute(parser, "name"))?;
    let type_tag = type_tag.ok_or_else(|| missing_attribute(parser, "type"))?;

    // Context-valued variables wrap a nested <context> element
    if type_tag == "context" {
        parser.expect(Token::Gt)?;
        parser.expect(Token::Lt)?;
        match parser.bump()? {
            Token::Name(n) if n == "context" => {}
            tok => {
                return Err(CtxError::InvalidToken {
                    token: format!("{:?}", tok),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("A context-typed <var> wraps a <context> element".into()),
                    code: Some(205),
                });
            }
        }
        let sub = parse_context(parser)?;
        parser.expect(Token::LtSlash)?;
        close_tag(parser, "var")?;
        return Ok((name, Value::Sub(sub)));
    }

    let payload = match parser.bump()? {
        Token::SlashGt => String::new(),
        Token::Gt => match parser.bump()? {
            Token::Text(text) => {
                parser.expect(Token::LtSlash)?;
                close_tag(parser, "var")?;
                text
            }
            Token::LtSlash => {
                close_tag(parser, "var")?;
                String::new()
            }
            Token::Eof => {
                return Err(CtxError::UnclosedTag {
                    tag: "var".into(),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("Missing </var>".into()),
                    code: Some(207),
                });
            }
            tok => {
                return Err(CtxError::InvalidToken {
                    token: format!("{:?}", tok),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("Expected payload text or </var>".into()),
                    code: Some(205),
                });
            }
        },
        tok => {
            return Err(CtxError::InvalidToken {
                token: format!("{:?}", tok),
                line: parser.line(),
                column: parser.column(),
                hint: Some("Expected '>' or '/>'".into()),
                code: Some(205),
            });
        }
    };

    let value = value::parse_payload(&type_tag, &payload, parser.line(), parser.column())?;
    Ok((name, value))
}

fn parse_attributes(parser: &mut Parser) -> Result<Vec<(String, String)>, CtxError> {
    let mut attrs = Vec::new();

    while let Some(Token::Name(_)) = parser.peek() {
        let key = if let Token::Name(k) = parser.bump()? {
            k
        } else {
            unreachable!()
        };
        parser.expect(Token::Equals)?;
        let val = match parser.bump()? {
            Token::Quoted(v) => v,
            tok => {
                return Err(CtxError::SyntaxError {
                    message: format!("Expected quoted value for attribute '{}', got {:?}", key, tok),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("Attribute values are quoted".into()),
                    code: Some(204),
                });
            }
        };
        attrs.push((key, val));
    }

    Ok(attrs)
}

/// Consume `name >` of a closing tag; `</` has already been consumed.
fn close_tag(parser: &mut Parser, expected: &str) -> Result<(), CtxError> {
    match parser.bump()? {
        Token::Name(n) if n == expected => {}
        Token::Name(n) => {
            return Err(CtxError::SyntaxError {
                message: format!("Mismatched closing tag </{}>, expected </{}>", n, expected),
                line: parser.line(),
                column: parser.column(),
                hint: Some("Elements must close in nesting order".into()),
                code: Some(206),
            });
        }
        tok => {
            return Err(CtxError::InvalidToken {
                token: format!("{:?}", tok),
                line: parser.line(),
                column: parser.column(),
                hint: Some("Expected a closing tag name".into()),
                code: Some(206),
            });
        }
    }
    parser.expect(Token::Gt)?;
    Ok(())
}

fn missing_attribute(parser: &Parser, attr: &str) -> CtxError {
    CtxError::SyntaxError {
        message: format!("Missing '{}' attribute on <var>", attr),
        line: parser.line(),
        column: parser.column(),
        hint: Some("Every <var> carries 'name' and 'type'".into()),
        code: Some(204),
    }
}
