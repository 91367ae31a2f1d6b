use super::*;

/// Advance the character iterator and update line/column tracking
pub(super) fn bump(lexer: &mut Lexer) -> Option<char> {
    let curr = lexer.peek;
    if let Some(c) = curr {
        if c == '\n' {
            lexer.line += 1;
            lexer.column = 0;
        } else {
            lexer.column += 1;
        }
    }
    lexer.peek = lexer.input.next();
    curr
}

/// Skip whitespace between markup tokens
pub(super) fn skip_whitespace(lexer: &mut Lexer) {
    while let Some(c) = lexer.peek {
        if c.is_whitespace() {
            bump(lexer);
        } else {
            break;
        }
    }
}

/// Skip a `<!-- ... -->` comment; the leading `<` is consumed, `!` is next.
pub(super) fn skip_comment(lexer: &mut Lexer) -> Result<(), CtxError> {
    bump(lexer); // consume '!'
    for _ in 0..2 {
        if bump(lexer) != Some('-') {
            return Err(CtxError::SyntaxError {
                message: "Malformed comment opener".into(),
                line: lexer.line,
                column: lexer.column,
                hint: Some("Comments start with <!--".into()),
                code: Some(105),
            });
        }
    }

    let mut dashes = 0;
    while let Some(ch) = bump(lexer) {
        match ch {
            '-' => dashes += 1,
            '>' if dashes >= 2 => return Ok(()),
            _ => dashes = 0,
        }
    }

    Err(CtxError::UnexpectedEof {
        message: "Unclosed comment".into(),
        line: lexer.line,
        column: lexer.column,
        hint: Some("Comments end with -->".into()),
        code: Some(105),
    })
}

/// Skip a `<?...?>` declaration; the leading `<` is consumed, `?` is next.
pub(super) fn skip_declaration(lexer: &mut Lexer) -> Result<(), CtxError> {
    bump(lexer); // consume '?'

    let mut question = false;
    while let Some(ch) = bump(lexer) {
        match ch {
            '?' => question = true,
            '>' if question => return Ok(()),
            _ => question = false,
        }
    }

    Err(CtxError::UnexpectedEof {
        message: "Unclosed XML declaration".into(),
        line: lexer.line,
        column: lexer.column,
        hint: Some("Declarations end with ?>".into()),
        code: Some(106),
    })
}

/// Decode one `&...;` reference; the leading '&' is already consumed.
pub(super) fn decode_entity(lexer: &mut Lexer) -> Result<char, CtxError> {
    let mut name = String::new();
    while let Some(c) = lexer.peek {
        if c == ';' {
            bump(lexer);
            return entity_char(&name, lexer);
        }
        if name.len() > 8 {
            // longest accepted form is &#x10FFFF;
            break;
        }
        name.push(c);
        bump(lexer);
    }

    Err(CtxError::SyntaxError {
        message: format!("Unterminated entity reference '&{}'", name),
        line: lexer.line,
        column: lexer.column,
        hint: Some("Entity references end with ';'".into()),
        code: Some(102),
    })
}

fn entity_char(name: &str, lexer: &Lexer) -> Result<char, CtxError> {
    let decoded = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            if let Some(digits) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(digits, 16).ok().and_then(char::from_u32)
            } else if let Some(digits) = name.strip_prefix('#') {
                digits.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                None
            }
        }
    };

    decoded.ok_or_else(|| CtxError::SyntaxError {
        message: format!("Unknown entity reference '&{};'", name),
        line: lexer.line,
        column: lexer.column,
        hint: Some("Use &amp;, &lt;, &gt;, &quot;, &apos; or a numeric reference".into()),
        code: Some(103),
    })
}
