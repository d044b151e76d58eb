use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Declaration keywords
    Function, Class, Interface, Trait, Enum,
    Extends, Implements, Use, Namespace, As, Const,
    Abstract, Final, Static, Public, Protected, Private,
    Async, Inout,

    // Contextual keywords: open a declaration at scope level, but are also
    // legal as plain names.
    Type, Newtype,

    // Reserved-looking names: lexically keywords (HHVM gives them dedicated
    // token types), grammatically acceptable wherever a name is expected.
    Dict, Vec, Keyset, Varray, Darray, Shape,
    Select, On, Category, Super, Attribute,

    // Identifiers & literals
    Identifier,
    Variable, // $name
    StringLiteral,
    LNumber,
    DNumber,
    InlineHtml,

    // Comments
    Comment,
    DocComment,

    NsSeparator, // \

    // Symbols
    OpenBrace, CloseBrace,
    OpenParen, CloseParen,
    OpenBracket, CloseBracket,
    Comma, SemiColon, Colon, DoubleColon,
    Question, // ?
    Coalesce, // ??
    Eq, EqEq, EqEqEq,
    DoubleArrow, // =>
    Arrow, // ->
    NullSafeArrow, // ?->
    Dot, ConcatEq, Ellipsis,
    Lt, Gt, LtEq, GtEq, Spaceship,
    Sl, // <<  (also opens an attribute list)
    Sr, // >>  (also closes an attribute list, or two generic lists)
    Plus, Minus, Asterisk, Slash, Percent, Pow,
    Inc, Dec, PlusEq, MinusEq, MulEq, DivEq,
    Ampersand, AmpAmp, Pipe, PipePipe, Caret,
    Bang, BangEq, BangEqEq, Tilde, At, Dollar,

    CloseTag, // ?>

    // Lexing failure
    Error,
}

impl TokenKind {
    /// Whether a token of this kind is acceptable wherever a name is
    /// grammatically expected: function names, class names, namespace
    /// segments, imported/aliased names, attribute names. New
    /// reserved-looking names go here and nowhere else.
    pub fn is_name_eligible(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Type
                | TokenKind::Newtype
                | TokenKind::Dict
                | TokenKind::Vec
                | TokenKind::Keyset
                | TokenKind::Varray
                | TokenKind::Darray
                | TokenKind::Shape
                | TokenKind::Select
                | TokenKind::On
                | TokenKind::Category
                | TokenKind::Super
                | TokenKind::Attribute
        )
    }

    pub fn is_visibility(self) -> bool {
        matches!(self, TokenKind::Public | TokenKind::Protected | TokenKind::Private)
    }

    pub fn is_member_modifier(self) -> bool {
        self.is_visibility()
            || matches!(
                self,
                TokenKind::Static | TokenKind::Abstract | TokenKind::Final | TokenKind::Async
            )
    }
}
