use super::{Scanner, ScopeKind};
use crate::context::Context;
use crate::defs::{NamespaceDef, Typehint};
use crate::error::Result;
use crate::lexer::token::TokenKind;

impl<'src> Scanner<'src> {
    /// `namespace Foo\Bar;` or `namespace Foo\Bar { ... }`. An empty name is
    /// valid; implicit global-namespace blocks use it. The semicolon form
    /// owns the remainder of the file as its body.
    pub(crate) fn consume_namespace(
        &mut self,
        ctx: &Context,
        docblock: Option<String>,
    ) -> Result<NamespaceDef> {
        self.expect_kind(TokenKind::Namespace, "`namespace`")?;

        let mut parts = Vec::new();
        let terminator;
        loop {
            let token = self.tq.shift("`{` or `;`")?;
            match token.kind {
                k if k.is_name_eligible() => parts.push(self.tq.text(token).to_owned()),
                TokenKind::NsSeparator => {}
                TokenKind::OpenBrace | TokenKind::SemiColon => {
                    terminator = token.kind;
                    break;
                }
                _ => return Err(self.unexpected(token)),
            }
        }

        let name = parts.join("\\");
        let child = ctx.with_namespace(&name);
        let scope = if terminator == TokenKind::OpenBrace {
            self.consume_scope(&child, ScopeKind::Namespace)?
        } else {
            self.consume_scope(&child, ScopeKind::File)?
        };

        Ok(NamespaceDef {
            name,
            scope,
            docblock,
        })
    }

    /// `use [function|const|type] Foo\Bar [as Baz] {, ...} ;` registers
    /// alias -> qualified-name mappings in the enclosing scope's context.
    pub(crate) fn consume_use_imports(&mut self, ctx: &mut Context) -> Result<()> {
        self.expect_kind(TokenKind::Use, "`use`")?;

        // An import-kind marker, only when a name follows it.
        if let Some(token) = self.tq.peek(0) {
            if matches!(token.kind, TokenKind::Function | TokenKind::Const | TokenKind::Type)
                && self.tq.peek(1).is_some_and(|t| {
                    t.kind.is_name_eligible() || t.kind == TokenKind::NsSeparator
                })
            {
                self.tq.shift("an import kind")?;
            }
        }

        loop {
            if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::NsSeparator) {
                self.tq.shift("`\\`")?;
            }
            let mut parts = vec![self.expect_name()?];
            while self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::NsSeparator) {
                self.tq.shift("`\\`")?;
                parts.push(self.expect_name()?);
            }
            let qualified = parts.join("\\");

            let alias = if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::As) {
                self.tq.shift("`as`")?;
                self.expect_name()?
            } else {
                parts.last().cloned().unwrap_or_default()
            };
            ctx.add_alias(alias, qualified);

            let sep = self.tq.shift("`,` or `;`")?;
            match sep.kind {
                TokenKind::Comma => {}
                TokenKind::SemiColon => break,
                _ => return Err(self.unexpected(sep)),
            }
        }
        Ok(())
    }

    /// `use TraitA, TraitB;` inside a class-like body. A trailing
    /// `{ ... }` conflict-resolution block is skipped by brace balance.
    pub(crate) fn consume_used_traits(&mut self, ctx: &Context) -> Result<Vec<Typehint>> {
        self.expect_kind(TokenKind::Use, "`use`")?;
        let mut traits = Vec::new();
        loop {
            traits.push(self.consume_typehint(ctx)?);
            let sep = self.tq.shift("`,` or `;`")?;
            match sep.kind {
                TokenKind::Comma => {}
                TokenKind::SemiColon => break,
                TokenKind::OpenBrace => {
                    self.tq.unshift(sep);
                    self.skip_braced_body()?;
                    break;
                }
                _ => return Err(self.unexpected(sep)),
            }
        }
        Ok(traits)
    }
}
