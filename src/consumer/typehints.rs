use super::Scanner;
use crate::context::Context;
use crate::defs::{ConstraintKind, GenericConstraint, GenericParam, Typehint, Variance};
use crate::error::{Result, ScanError};
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

impl<'src> Scanner<'src> {
    /// Consume one typehint: optional `?`, then a dotted name, tuple, shape
    /// or callable, then an optional `<...>` generic argument list.
    /// Whitespace never matters; the lexer already removed it.
    pub(crate) fn consume_typehint(&mut self, ctx: &Context) -> Result<Typehint> {
        let mut nullable = false;
        if let Some(token) = self.tq.peek(0) {
            if token.kind == TokenKind::Question {
                self.tq.shift("`?`")?;
                nullable = true;
            }
        }

        let Some(next) = self.tq.peek(0) else {
            return Err(ScanError::UnexpectedEof { expected: "a typehint" });
        };

        if next.kind == TokenKind::OpenParen {
            return self.consume_parenthesized_typehint(ctx, nullable);
        }
        if next.kind == TokenKind::Shape && self.tq.peek(1).map(|t| t.kind) == Some(TokenKind::OpenParen)
        {
            // shape(...) fields are not scanned.
            self.tq.shift("`shape`")?;
            self.skip_balanced_parens()?;
            return Ok(Typehint {
                name: "shape".to_owned(),
                nullable,
                generics: Vec::new(),
                is_alias: false,
            });
        }

        let absolute = if next.kind == TokenKind::NsSeparator {
            self.tq.shift("`\\`")?;
            true
        } else {
            false
        };

        let mut name = self.expect_name()?;
        while self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::NsSeparator)
            && self.tq.peek(1).is_some_and(|t| t.kind.is_name_eligible())
        {
            self.tq.shift("`\\`")?;
            let part = self.expect_name()?;
            name.push('\\');
            name.push_str(&part);
        }

        // `this` and in-scope generic parameters are recorded verbatim; they
        // are placeholders, not namespace-resolvable type names.
        let is_alias = !absolute && !name.contains('\\') && (name == "this" || ctx.is_generic(&name));
        let resolved = if is_alias {
            name
        } else {
            ctx.resolve_type_name(&name, absolute)
        };

        let generics = if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Lt) {
            self.consume_generic_args(ctx)?
        } else {
            Vec::new()
        };

        Ok(Typehint {
            name: resolved,
            nullable,
            generics,
            is_alias,
        })
    }

    /// `(int, string)` tuples and `(function(...): T)` callables.
    fn consume_parenthesized_typehint(&mut self, ctx: &Context, nullable: bool) -> Result<Typehint> {
        self.expect_kind(TokenKind::OpenParen, "`(`")?;

        if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Function) {
            // Function type signatures are not scanned.
            let mut depth = 1usize;
            while depth > 0 {
                let token = self.tq.shift("`)`")?;
                match token.kind {
                    TokenKind::OpenParen => depth += 1,
                    TokenKind::CloseParen => depth -= 1,
                    _ => {}
                }
            }
            return Ok(Typehint {
                name: "callable".to_owned(),
                nullable,
                generics: Vec::new(),
                is_alias: false,
            });
        }

        let mut members = Vec::new();
        loop {
            if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::CloseParen) {
                self.tq.shift("`)`")?;
                break;
            }
            members.push(self.consume_typehint(ctx)?);
            let token = self.tq.shift("`,` or `)`")?;
            match token.kind {
                TokenKind::Comma => {}
                TokenKind::CloseParen => break,
                _ => return Err(self.unexpected(token)),
            }
        }

        Ok(Typehint {
            name: "tuple".to_owned(),
            nullable,
            generics: members,
            is_alias: false,
        })
    }

    /// Nested generic argument list: `<` typehint {`,` typehint} [`,`] `>`.
    fn consume_generic_args(&mut self, ctx: &Context) -> Result<Vec<Typehint>> {
        self.expect_kind(TokenKind::Lt, "`<`")?;
        let mut args = Vec::new();
        loop {
            // Also handles empty lists and trailing commas.
            if matches!(
                self.tq.peek(0).map(|t| t.kind),
                Some(TokenKind::Gt | TokenKind::Sr)
            ) {
                self.close_generic_list()?;
                break;
            }
            args.push(self.consume_typehint(ctx)?);
            let token = self.tq.shift("`,` or `>`")?;
            match token.kind {
                TokenKind::Comma => {}
                TokenKind::Gt => break,
                TokenKind::Sr => {
                    self.split_shift_right(token);
                    break;
                }
                _ => return Err(self.unexpected(token)),
            }
        }
        Ok(args)
    }

    /// Generic parameter list on a declaration: variance markers and
    /// `as`/`super` constraints are recorded, not interpreted.
    pub(crate) fn consume_generic_params(&mut self, ctx: &Context) -> Result<Vec<GenericParam>> {
        self.expect_kind(TokenKind::Lt, "`<`")?;
        let mut params = Vec::new();
        loop {
            let Some(token) = self.tq.peek(0) else {
                return Err(ScanError::UnexpectedEof { expected: "`>`" });
            };
            if matches!(token.kind, TokenKind::Gt | TokenKind::Sr) {
                self.close_generic_list()?;
                break;
            }

            let variance = match token.kind {
                TokenKind::Plus => {
                    self.tq.shift("`+`")?;
                    Some(Variance::Covariant)
                }
                TokenKind::Minus => {
                    self.tq.shift("`-`")?;
                    Some(Variance::Contravariant)
                }
                _ => None,
            };
            let name = self.expect_name()?;

            let mut constraints = Vec::new();
            while let Some(next) = self.tq.peek(0) {
                let relation = match next.kind {
                    TokenKind::As => ConstraintKind::As,
                    TokenKind::Super => ConstraintKind::Super,
                    _ => break,
                };
                self.tq.shift("a constraint")?;
                constraints.push(GenericConstraint {
                    relation,
                    typehint: self.consume_typehint(ctx)?,
                });
            }
            params.push(GenericParam {
                name,
                variance,
                constraints,
            });

            let token = self.tq.shift("`,` or `>`")?;
            match token.kind {
                TokenKind::Comma => {}
                TokenKind::Gt => break,
                TokenKind::Sr => {
                    self.split_shift_right(token);
                    break;
                }
                _ => return Err(self.unexpected(token)),
            }
        }
        Ok(params)
    }

    /// Close one generic list where the next token is known to be `>` or `>>`.
    fn close_generic_list(&mut self) -> Result<()> {
        let token = self.tq.shift("`>`")?;
        match token.kind {
            TokenKind::Gt => Ok(()),
            TokenKind::Sr => {
                self.split_shift_right(token);
                Ok(())
            }
            _ => Err(self.unexpected(token)),
        }
    }

    /// A `>>` closing a nested generic list counts as two `>`: consume one
    /// half and give the other back to the queue.
    fn split_shift_right(&mut self, token: Token) {
        let mid = token.span.start + 1;
        self.tq.unshift(Token {
            kind: TokenKind::Gt,
            span: Span::new(mid, token.span.end),
        });
    }

    pub(crate) fn skip_balanced_parens(&mut self) -> Result<()> {
        self.expect_kind(TokenKind::OpenParen, "`(`")?;
        let mut depth = 1usize;
        while depth > 0 {
            let token = self.tq.shift("`)`")?;
            match token.kind {
                TokenKind::OpenParen => depth += 1,
                TokenKind::CloseParen => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }
}
