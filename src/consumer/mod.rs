//! The token-stream consumer engine: a recursive scope-tracking state
//! machine that walks the token queue and produces definition records.

pub mod attributes;
pub mod class_like;
pub mod functions;
pub mod namespaces;
pub mod typehints;

use tracing::trace;

use crate::context::Context;
use crate::defs::{AttributeMap, Scope, Visibility};
use crate::error::{Result, ScanError};
use crate::lexer::token::{Token, TokenKind};
use crate::queue::TokenQueue;
use crate::span::Span;

/// What kind of scope body is being consumed. The file top level ends at
/// queue exhaustion; the other two end at a matching `}`. Class bodies admit
/// members (properties, constants, used traits) that file scopes reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    File,
    Namespace,
    ClassBody,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Modifiers {
    pub is_abstract: bool,
    pub is_final: bool,
    pub is_static: bool,
    pub is_async: bool,
    pub visibility: Option<Visibility>,
}

pub struct Scanner<'src> {
    pub(crate) tq: TokenQueue<'src>,
}

impl<'src> Scanner<'src> {
    pub fn new(tq: TokenQueue<'src>) -> Self {
        Self { tq }
    }

    /// Consume one scope body and aggregate everything declared directly in
    /// it. `ctx` is never mutated in place beyond this invocation's local
    /// copy; nested consumers get derived copies.
    pub fn consume_scope(&mut self, parent: &Context, kind: ScopeKind) -> Result<Scope> {
        let mut ctx = parent.clone();
        let mut scope = Scope::default();
        let mut attributes = AttributeMap::new();
        let mut docblock: Option<String> = None;

        loop {
            let Some(token) = self.tq.peek(0) else {
                if kind == ScopeKind::File {
                    break;
                }
                return Err(ScanError::UnexpectedEof { expected: "`}`" });
            };
            trace!(kind = ?token.kind, offset = token.span.start, "scope dispatch");

            match token.kind {
                TokenKind::DocComment => {
                    docblock = Some(self.tq.text(token).to_owned());
                    self.tq.shift("a doc comment")?;
                }
                TokenKind::SemiColon => {
                    // Empty statement.
                    self.tq.shift("`;`")?;
                }
                TokenKind::CloseBrace if kind != ScopeKind::File => {
                    self.tq.shift("`}`")?;
                    break;
                }
                TokenKind::Sl => {
                    let group = self.consume_attributes()?;
                    attributes.extend(group);
                }
                TokenKind::Namespace => {
                    let ns = self.consume_namespace(&ctx, docblock.take())?;
                    attributes.clear();
                    scope.namespaces.push(ns);
                }
                TokenKind::Use => {
                    if kind == ScopeKind::ClassBody {
                        let traits = self.consume_used_traits(&ctx)?;
                        scope.used_traits.extend(traits);
                    } else {
                        self.consume_use_imports(&mut ctx)?;
                    }
                    // Attributes and doc comments cannot apply to a `use`
                    // statement and must not carry over past it.
                    attributes.clear();
                    docblock = None;
                }
                TokenKind::Function => {
                    let func = self.consume_function(
                        &ctx,
                        Modifiers::default(),
                        std::mem::take(&mut attributes),
                        docblock.take(),
                        kind == ScopeKind::ClassBody,
                    )?;
                    scope.functions.push(func);
                }
                TokenKind::Class | TokenKind::Interface | TokenKind::Trait => {
                    let class = self.consume_class_like(
                        &ctx,
                        Modifiers::default(),
                        std::mem::take(&mut attributes),
                        docblock.take(),
                    )?;
                    scope.classes.push(class);
                }
                TokenKind::Enum => {
                    let def = self.consume_enum(
                        &ctx,
                        std::mem::take(&mut attributes),
                        docblock.take(),
                    )?;
                    scope.enums.push(def);
                }
                TokenKind::Type | TokenKind::Newtype if kind != ScopeKind::ClassBody => {
                    let alias = self.consume_type_alias(
                        &ctx,
                        std::mem::take(&mut attributes),
                        docblock.take(),
                    )?;
                    scope.type_aliases.push(alias);
                }
                TokenKind::Const => {
                    self.consume_constants(
                        &ctx,
                        Modifiers::default(),
                        std::mem::take(&mut attributes),
                        docblock.take(),
                        &mut scope,
                    )?;
                }
                TokenKind::Variable if kind == ScopeKind::ClassBody => {
                    let props = self.consume_properties(
                        &ctx,
                        Modifiers::default(),
                        std::mem::take(&mut attributes),
                        docblock.take(),
                    )?;
                    scope.properties.extend(props);
                }
                k if k.is_member_modifier() => {
                    let modifiers = self.consume_modifiers()?;
                    self.consume_modified_declaration(
                        &ctx,
                        kind,
                        modifiers,
                        std::mem::take(&mut attributes),
                        docblock.take(),
                        &mut scope,
                    )?;
                }
                _ => return Err(self.unexpected(token)),
            }
        }

        Ok(scope)
    }

    /// Dispatch after a run of modifier keywords.
    fn consume_modified_declaration(
        &mut self,
        ctx: &Context,
        kind: ScopeKind,
        modifiers: Modifiers,
        attributes: AttributeMap,
        docblock: Option<String>,
        scope: &mut Scope,
    ) -> Result<()> {
        let Some(next) = self.tq.peek(0) else {
            return Err(ScanError::UnexpectedEof { expected: "a declaration" });
        };
        match next.kind {
            TokenKind::Function => {
                let func = self.consume_function(
                    ctx,
                    modifiers,
                    attributes,
                    docblock,
                    kind == ScopeKind::ClassBody,
                )?;
                scope.functions.push(func);
            }
            TokenKind::Class | TokenKind::Interface | TokenKind::Trait => {
                let class = self.consume_class_like(ctx, modifiers, attributes, docblock)?;
                scope.classes.push(class);
            }
            TokenKind::Const => {
                self.consume_constants(ctx, modifiers, attributes, docblock, scope)?;
            }
            _ if kind == ScopeKind::ClassBody => {
                let props = self.consume_properties(ctx, modifiers, attributes, docblock)?;
                scope.properties.extend(props);
            }
            _ => return Err(self.unexpected(next)),
        }
        Ok(())
    }

    pub(crate) fn consume_modifiers(&mut self) -> Result<Modifiers> {
        let mut modifiers = Modifiers::default();
        while let Some(token) = self.tq.peek(0) {
            match token.kind {
                TokenKind::Abstract => modifiers.is_abstract = true,
                TokenKind::Final => modifiers.is_final = true,
                TokenKind::Static => modifiers.is_static = true,
                TokenKind::Async => modifiers.is_async = true,
                TokenKind::Public => modifiers.visibility = Some(Visibility::Public),
                TokenKind::Protected => modifiers.visibility = Some(Visibility::Protected),
                TokenKind::Private => modifiers.visibility = Some(Visibility::Private),
                _ => break,
            }
            self.tq.shift("a modifier")?;
        }
        Ok(modifiers)
    }

    pub(crate) fn unexpected(&self, token: Token) -> ScanError {
        ScanError::UnexpectedToken {
            text: self.tq.text(token).to_owned(),
            offset: token.span.start,
        }
    }

    pub(crate) fn expect_kind(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token> {
        let token = self.tq.shift(expected)?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(self.unexpected(token))
        }
    }

    /// Shift a token that must be acceptable as a name: an ordinary
    /// identifier or any reserved-looking kind.
    pub(crate) fn expect_name(&mut self) -> Result<String> {
        let token = self.tq.shift("a name")?;
        if token.kind.is_name_eligible() {
            Ok(self.tq.text(token).to_owned())
        } else {
            Err(self.unexpected(token))
        }
    }

    /// Skip a `{ ... }` body by brace balance alone. Bodies are never scanned
    /// for nested definitions; string literals are single tokens, so braces
    /// inside them cannot disturb the count.
    pub(crate) fn skip_braced_body(&mut self) -> Result<()> {
        self.expect_kind(TokenKind::OpenBrace, "`{`")?;
        let mut depth = 1usize;
        while depth > 0 {
            let token = self.tq.shift("`}`")?;
            match token.kind {
                TokenKind::OpenBrace => depth += 1,
                TokenKind::CloseBrace => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }

    /// Consume a raw value span (default values, constant initializers) up to
    /// one of `stop` at bracket depth zero, returning the source text
    /// verbatim. The tokens are consumed but never interpreted.
    pub(crate) fn consume_value_span(&mut self, stop: &[TokenKind]) -> Result<String> {
        let mut depth = 0usize;
        let mut span: Option<Span> = None;
        loop {
            let Some(token) = self.tq.peek(0) else {
                return Err(ScanError::UnexpectedEof { expected: "a value terminator" });
            };
            if depth == 0 && stop.contains(&token.kind) {
                break;
            }
            match token.kind {
                TokenKind::OpenParen | TokenKind::OpenBracket | TokenKind::OpenBrace => depth += 1,
                TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseBrace => {
                    if depth == 0 {
                        return Err(self.unexpected(token));
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.tq.shift("a value")?;
            span = Some(match span {
                None => token.span,
                Some(acc) => acc.to(token.span),
            });
        }
        Ok(span.map(|s| self.tq.slice(s).to_owned()).unwrap_or_default())
    }
}
