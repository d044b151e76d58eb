use super::Scanner;
use crate::defs::AttributeMap;
use crate::error::{Result, ScanError};
use crate::lexer::token::TokenKind;

impl<'src> Scanner<'src> {
    /// `<< Name, Name("arg", "a" . "b"), ... >>`. Arguments are string
    /// literals only; adjacent literals joined with `.` are concatenated at
    /// scan time. Anything else in argument position is fatal.
    pub(crate) fn consume_attributes(&mut self) -> Result<AttributeMap> {
        self.expect_kind(TokenKind::Sl, "`<<`")?;
        let mut map = AttributeMap::new();
        loop {
            let Some(token) = self.tq.peek(0) else {
                return Err(ScanError::UnexpectedEof { expected: "`>>`" });
            };
            if token.kind == TokenKind::Sr {
                // Also tolerates a trailing comma.
                self.tq.shift("`>>`")?;
                break;
            }

            let name = self.expect_name()?;
            let mut args = Vec::new();
            if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::OpenParen) {
                self.tq.shift("`(`")?;
                loop {
                    let Some(next) = self.tq.peek(0) else {
                        return Err(ScanError::UnexpectedEof { expected: "`)`" });
                    };
                    if next.kind == TokenKind::CloseParen {
                        self.tq.shift("`)`")?;
                        break;
                    }

                    let mut value = self.expect_attribute_string()?;
                    while self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Dot) {
                        self.tq.shift("`.`")?;
                        value.push_str(&self.expect_attribute_string()?);
                    }
                    args.push(value);

                    let sep = self.tq.shift("`,` or `)`")?;
                    match sep.kind {
                        TokenKind::Comma => {}
                        TokenKind::CloseParen => break,
                        _ => {
                            return Err(ScanError::UnsupportedAttributeExpression {
                                text: self.tq.text(sep).to_owned(),
                                offset: sep.span.start,
                            });
                        }
                    }
                }
            }
            map.insert(name, args);

            let sep = self.tq.shift("`,` or `>>`")?;
            match sep.kind {
                TokenKind::Comma => {}
                TokenKind::Sr => break,
                _ => return Err(self.unexpected(sep)),
            }
        }
        Ok(map)
    }

    fn expect_attribute_string(&mut self) -> Result<String> {
        let token = self.tq.shift("a string literal")?;
        if token.kind == TokenKind::StringLiteral {
            Ok(unquote(self.tq.text(token)))
        } else {
            Err(ScanError::UnsupportedAttributeExpression {
                text: self.tq.text(token).to_owned(),
                offset: token.span.start,
            })
        }
    }
}

/// Strip the quotes off a string literal token and decode the escapes that
/// matter for attribute values.
fn unquote(raw: &str) -> String {
    let bytes = raw.as_bytes();
    if bytes.len() < 2 {
        return raw.to_owned();
    }
    let quote = bytes[0];
    let inner = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('\'') if quote == b'\'' => out.push('\''),
            Some('"') if quote == b'"' => out.push('"'),
            Some('n') if quote == b'"' => out.push('\n'),
            Some('t') if quote == b'"' => out.push('\t'),
            Some('r') if quote == b'"' => out.push('\r'),
            Some('$') if quote == b'"' => out.push('$'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
