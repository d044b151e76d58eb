use super::{Modifiers, Scanner};
use crate::context::Context;
use crate::defs::{AttributeMap, FunctionDef, ParamDef, Visibility};
use crate::error::{Result, ScanError};
use crate::lexer::token::TokenKind;

impl<'src> Scanner<'src> {
    /// Function or method. The body, if any, is skipped by brace balance and
    /// never scanned for nested definitions. Parameter and return typehints
    /// see the union of the method's own generics and the enclosing class's.
    pub(crate) fn consume_function(
        &mut self,
        ctx: &Context,
        modifiers: Modifiers,
        attributes: AttributeMap,
        docblock: Option<String>,
        is_method: bool,
    ) -> Result<FunctionDef> {
        self.expect_kind(TokenKind::Function, "`function`")?;

        let returns_by_ref = if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Ampersand) {
            self.tq.shift("`&`")?;
            true
        } else {
            false
        };

        let name = self.expect_name()?;

        let generics = if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Lt) {
            self.consume_generic_params(ctx)?
        } else {
            Vec::new()
        };
        // Own generics only in the declared list; the context union makes the
        // class's generics resolvable too.
        let fn_ctx = ctx.with_generics(generics.iter().map(|g| g.name.clone()));

        let params = self.consume_params(&fn_ctx)?;

        let return_type = if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Colon) {
            self.tq.shift("`:`")?;
            Some(self.consume_typehint(&fn_ctx)?)
        } else {
            None
        };

        let body = self.tq.shift("`{` or `;`")?;
        match body.kind {
            TokenKind::OpenBrace => {
                self.tq.unshift(body);
                self.skip_braced_body()?;
            }
            TokenKind::SemiColon => {} // abstract or interface signature
            _ => return Err(self.unexpected(body)),
        }

        Ok(FunctionDef {
            name: if is_method { name } else { ctx.qualify(&name) },
            generics,
            params,
            return_type,
            returns_by_ref,
            is_async: modifiers.is_async,
            is_static: modifiers.is_static,
            is_abstract: modifiers.is_abstract,
            is_final: modifiers.is_final,
            visibility: modifiers.visibility,
            attributes,
            docblock,
        })
    }

    fn consume_params(&mut self, fn_ctx: &Context) -> Result<Vec<ParamDef>> {
        self.expect_kind(TokenKind::OpenParen, "`(`")?;
        let mut params = Vec::new();
        loop {
            let Some(token) = self.tq.peek(0) else {
                return Err(ScanError::UnexpectedEof { expected: "`)`" });
            };
            if token.kind == TokenKind::CloseParen {
                // Also tolerates a trailing comma.
                self.tq.shift("`)`")?;
                break;
            }

            let attributes = if token.kind == TokenKind::Sl {
                self.consume_attributes()?
            } else {
                AttributeMap::new()
            };

            let mut visibility = None;
            while let Some(next) = self.tq.peek(0) {
                match next.kind {
                    TokenKind::Public => visibility = Some(Visibility::Public),
                    TokenKind::Protected => visibility = Some(Visibility::Protected),
                    TokenKind::Private => visibility = Some(Visibility::Private),
                    _ => break,
                }
                self.tq.shift("a visibility modifier")?;
            }

            let is_inout = if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Inout) {
                self.tq.shift("`inout`")?;
                true
            } else {
                false
            };

            let typehint = match self.tq.peek(0) {
                Some(t) if !matches!(
                    t.kind,
                    TokenKind::Variable | TokenKind::Ampersand | TokenKind::Ellipsis
                ) =>
                {
                    Some(self.consume_typehint(fn_ctx)?)
                }
                _ => None,
            };

            let by_ref = if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Ampersand) {
                self.tq.shift("`&`")?;
                true
            } else {
                false
            };
            let is_variadic = if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Ellipsis) {
                self.tq.shift("`...`")?;
                true
            } else {
                false
            };

            let name = match self.tq.peek(0) {
                Some(t) if t.kind == TokenKind::Variable => {
                    self.tq.shift("a parameter name")?;
                    self.tq.text(t).trim_start_matches('$').to_owned()
                }
                // A bare `...` parameter has no name.
                _ if is_variadic => String::new(),
                Some(t) => return Err(self.unexpected(t)),
                None => return Err(ScanError::UnexpectedEof { expected: "a parameter name" }),
            };

            let (has_default, default) =
                if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Eq) {
                    self.tq.shift("`=`")?;
                    let raw = self
                        .consume_value_span(&[TokenKind::Comma, TokenKind::CloseParen])?;
                    (true, Some(raw))
                } else {
                    (false, None)
                };

            params.push(ParamDef {
                name,
                typehint,
                is_variadic,
                is_inout,
                by_ref,
                has_default,
                default,
                visibility,
                attributes,
            });

            let sep = self.tq.shift("`,` or `)`")?;
            match sep.kind {
                TokenKind::Comma => {}
                TokenKind::CloseParen => break,
                _ => return Err(self.unexpected(sep)),
            }
        }
        Ok(params)
    }
}
