use super::{Modifiers, Scanner, ScopeKind};
use crate::context::Context;
use crate::defs::{
    AliasKind, AttributeMap, ClassKind, ClassLikeDef, ConstantDef, EnumDef, EnumValue,
    PropertyDef, Scope, TypeAliasDef, TypeConstantDef, Visibility,
};
use crate::error::{Result, ScanError};
use crate::lexer::token::TokenKind;

impl<'src> Scanner<'src> {
    /// Class, interface or trait. The member scope's context carries this
    /// declaration's name and the union of its generics with any enclosing
    /// ones, so members resolve `this` and outer generic parameters.
    pub(crate) fn consume_class_like(
        &mut self,
        ctx: &Context,
        modifiers: Modifiers,
        attributes: AttributeMap,
        docblock: Option<String>,
    ) -> Result<ClassLikeDef> {
        let keyword = self.tq.shift("`class`, `interface` or `trait`")?;
        let kind = match keyword.kind {
            TokenKind::Class => ClassKind::Class,
            TokenKind::Interface => ClassKind::Interface,
            TokenKind::Trait => ClassKind::Trait,
            _ => return Err(self.unexpected(keyword)),
        };

        let name = self.expect_name()?;
        let qualified = ctx.qualify(&name);

        let generics = if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Lt) {
            self.consume_generic_params(ctx)?
        } else {
            Vec::new()
        };
        let body_ctx = ctx
            .with_generics(generics.iter().map(|g| g.name.clone()))
            .with_enclosing_class(&qualified);

        let mut parent = None;
        let mut interfaces = Vec::new();

        if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Extends) {
            self.tq.shift("`extends`")?;
            if kind == ClassKind::Class {
                parent = Some(self.consume_typehint(&body_ctx)?);
            } else {
                // Interfaces may extend several others.
                loop {
                    interfaces.push(self.consume_typehint(&body_ctx)?);
                    if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Comma) {
                        self.tq.shift("`,`")?;
                    } else {
                        break;
                    }
                }
            }
        }

        if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Implements) {
            self.tq.shift("`implements`")?;
            loop {
                interfaces.push(self.consume_typehint(&body_ctx)?);
                if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Comma) {
                    self.tq.shift("`,`")?;
                } else {
                    break;
                }
            }
        }

        self.expect_kind(TokenKind::OpenBrace, "`{`")?;
        let contents = self.consume_scope(&body_ctx, ScopeKind::ClassBody)?;

        Ok(ClassLikeDef {
            name: qualified,
            kind,
            is_abstract: modifiers.is_abstract,
            is_final: modifiers.is_final,
            generics,
            parent,
            interfaces,
            contents,
            attributes,
            docblock,
        })
    }

    /// `enum Name : Base [as Constraint] { NAME = value; ... }`
    pub(crate) fn consume_enum(
        &mut self,
        ctx: &Context,
        attributes: AttributeMap,
        docblock: Option<String>,
    ) -> Result<EnumDef> {
        self.expect_kind(TokenKind::Enum, "`enum`")?;
        let name = self.expect_name()?;
        let qualified = ctx.qualify(&name);

        let base = if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Colon) {
            self.tq.shift("`:`")?;
            Some(self.consume_typehint(ctx)?)
        } else {
            None
        };
        let constraint = if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::As) {
            self.tq.shift("`as`")?;
            Some(self.consume_typehint(ctx)?)
        } else {
            None
        };

        self.expect_kind(TokenKind::OpenBrace, "`{`")?;
        let mut values = Vec::new();
        loop {
            let Some(token) = self.tq.peek(0) else {
                return Err(ScanError::UnexpectedEof { expected: "`}`" });
            };
            match token.kind {
                TokenKind::CloseBrace => {
                    self.tq.shift("`}`")?;
                    break;
                }
                TokenKind::DocComment | TokenKind::SemiColon => {
                    self.tq.shift("an enum value")?;
                }
                _ => {
                    let value_name = self.expect_name()?;
                    self.expect_kind(TokenKind::Eq, "`=`")?;
                    let value = self
                        .consume_value_span(&[TokenKind::SemiColon, TokenKind::CloseBrace])?;
                    values.push(EnumValue {
                        name: value_name,
                        value,
                    });
                }
            }
        }

        Ok(EnumDef {
            name: qualified,
            base,
            constraint,
            values,
            attributes,
            docblock,
        })
    }

    /// `type Foo<T> = Bar<T>;` / `newtype Foo as Bar = Baz;`
    pub(crate) fn consume_type_alias(
        &mut self,
        ctx: &Context,
        attributes: AttributeMap,
        docblock: Option<String>,
    ) -> Result<TypeAliasDef> {
        let keyword = self.tq.shift("`type` or `newtype`")?;
        let kind = match keyword.kind {
            TokenKind::Type => AliasKind::Type,
            TokenKind::Newtype => AliasKind::Newtype,
            _ => return Err(self.unexpected(keyword)),
        };

        let name = self.expect_name()?;
        let qualified = ctx.qualify(&name);
        let generics = if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Lt) {
            self.consume_generic_params(ctx)?
        } else {
            Vec::new()
        };
        let alias_ctx = ctx.with_generics(generics.iter().map(|g| g.name.clone()));

        let constraint = if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::As) {
            self.tq.shift("`as`")?;
            Some(self.consume_typehint(&alias_ctx)?)
        } else {
            None
        };

        self.expect_kind(TokenKind::Eq, "`=`")?;
        let value = self.consume_typehint(&alias_ctx)?;
        self.expect_kind(TokenKind::SemiColon, "`;`")?;

        Ok(TypeAliasDef {
            name: qualified,
            kind,
            generics,
            constraint,
            value,
            attributes,
            docblock,
        })
    }

    /// `const [typehint] NAME = value {, NAME = value} ;`, `abstract const`,
    /// and `const type` type constants. Initializers are raw token spans.
    pub(crate) fn consume_constants(
        &mut self,
        ctx: &Context,
        modifiers: Modifiers,
        attributes: AttributeMap,
        docblock: Option<String>,
        scope: &mut Scope,
    ) -> Result<()> {
        self.expect_kind(TokenKind::Const, "`const`")?;

        // `const type T ...` declares a type constant; a plain constant
        // named `type` is still fine because `=` follows immediately.
        if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Type)
            && self.tq.peek(1).is_some_and(|t| t.kind.is_name_eligible())
        {
            self.tq.shift("`type`")?;
            let name = self.expect_name()?;
            let constraint = if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::As) {
                self.tq.shift("`as`")?;
                Some(self.consume_typehint(ctx)?)
            } else {
                None
            };
            let value = if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Eq) {
                self.tq.shift("`=`")?;
                Some(self.consume_typehint(ctx)?)
            } else {
                None
            };
            self.expect_kind(TokenKind::SemiColon, "`;`")?;
            scope.type_constants.push(TypeConstantDef {
                name,
                constraint,
                value,
                is_abstract: modifiers.is_abstract,
                docblock,
            });
            return Ok(());
        }

        // A declared typehint is present unless the name is immediately
        // followed by `=`, `;` or `,`.
        let has_typehint = !(self.tq.peek(0).is_some_and(|t| t.kind.is_name_eligible())
            && self.tq.peek(1).is_some_and(|t| {
                matches!(t.kind, TokenKind::Eq | TokenKind::SemiColon | TokenKind::Comma)
            }));
        let typehint = if has_typehint {
            Some(self.consume_typehint(ctx)?)
        } else {
            None
        };

        loop {
            let name = self.expect_name()?;
            let value = if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Eq) {
                self.tq.shift("`=`")?;
                Some(self.consume_value_span(&[TokenKind::Comma, TokenKind::SemiColon])?)
            } else {
                None
            };
            scope.constants.push(ConstantDef {
                name,
                typehint: typehint.clone(),
                value,
                is_abstract: modifiers.is_abstract,
                attributes: attributes.clone(),
                docblock: docblock.clone(),
            });

            let sep = self.tq.shift("`,` or `;`")?;
            match sep.kind {
                TokenKind::Comma => {}
                TokenKind::SemiColon => break,
                _ => return Err(self.unexpected(sep)),
            }
        }
        Ok(())
    }

    /// One property statement; several declarators may share a typehint.
    pub(crate) fn consume_properties(
        &mut self,
        ctx: &Context,
        modifiers: Modifiers,
        attributes: AttributeMap,
        docblock: Option<String>,
    ) -> Result<Vec<PropertyDef>> {
        let typehint = match self.tq.peek(0) {
            Some(t) if t.kind != TokenKind::Variable => Some(self.consume_typehint(ctx)?),
            _ => None,
        };

        let mut props = Vec::new();
        loop {
            let token = self.expect_kind(TokenKind::Variable, "a property name")?;
            let name = self.tq.text(token).trim_start_matches('$').to_owned();
            let default = if self.tq.peek(0).map(|t| t.kind) == Some(TokenKind::Eq) {
                self.tq.shift("`=`")?;
                Some(self.consume_value_span(&[TokenKind::Comma, TokenKind::SemiColon])?)
            } else {
                None
            };
            props.push(PropertyDef {
                name,
                typehint: typehint.clone(),
                is_static: modifiers.is_static,
                visibility: modifiers.visibility.unwrap_or(Visibility::Public),
                default,
                attributes: attributes.clone(),
                docblock: docblock.clone(),
            });

            let sep = self.tq.shift("`,` or `;`")?;
            match sep.kind {
                TokenKind::Comma => {}
                TokenKind::SemiColon => break,
                _ => return Err(self.unexpected(sep)),
            }
        }
        Ok(props)
    }
}
