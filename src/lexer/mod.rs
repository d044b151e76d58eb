pub mod token;

use memchr::{memchr, memchr2};

use crate::context::SourceDialect;
use crate::span::Span;
use token::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq)]
enum LexerState {
    Initial,
    Scripting,
}

pub struct Lexer<'src> {
    input: &'src [u8],
    cursor: usize,
    state: LexerState,
    dialect: Option<SourceDialect>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            input: source.as_bytes(),
            cursor: 0,
            state: LexerState::Initial,
            dialect: None,
        }
    }

    /// Tokenize the whole unit. The dialect is fixed by the first open tag;
    /// a file without one is inline HTML from start to end.
    pub fn tokenize(mut self) -> (SourceDialect, Vec<Token>) {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        (self.dialect.unwrap_or(SourceDialect::Php), tokens)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.cursor).copied()
    }

    fn peek_at(&self, n: usize) -> Option<u8> {
        self.input.get(self.cursor + n).copied()
    }

    fn advance(&mut self) {
        self.cursor += 1;
    }

    fn advance_n(&mut self, n: usize) {
        self.cursor += n;
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == b'_' || c >= 0x80 {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn next_in_initial(&mut self) -> Option<Token> {
        if self.cursor >= self.input.len() {
            return None;
        }
        let start = self.cursor;

        // Find the next open tag; everything before it is inline HTML.
        let mut search = self.cursor;
        loop {
            match memchr(b'<', &self.input[search..]) {
                Some(off) => {
                    let lt = search + off;
                    if self.input.get(lt + 1) == Some(&b'?') {
                        if lt > start {
                            self.cursor = lt;
                            return Some(Token {
                                kind: TokenKind::InlineHtml,
                                span: Span::new(start, lt),
                            });
                        }
                        return Some(self.open_tag(lt));
                    }
                    search = lt + 1;
                }
                None => {
                    self.cursor = self.input.len();
                    return Some(Token {
                        kind: TokenKind::InlineHtml,
                        span: Span::new(start, self.cursor),
                    });
                }
            }
        }
    }

    fn open_tag(&mut self, start: usize) -> Token {
        let rest = &self.input[start..];
        let (len, dialect) = if rest.starts_with(b"<?php") {
            (5, SourceDialect::Php)
        } else if rest.starts_with(b"<?hh") {
            (4, SourceDialect::Hack)
        } else if rest.starts_with(b"<?=") {
            (3, SourceDialect::Php)
        } else {
            (2, SourceDialect::Php)
        };
        self.cursor = start + len;
        self.state = LexerState::Scripting;
        if self.dialect.is_none() {
            self.dialect = Some(dialect);
        }
        // The tag itself carries no definition content; report it as inline
        // HTML so the queue drops it with the rest.
        Token {
            kind: TokenKind::InlineHtml,
            span: Span::new(start, self.cursor),
        }
    }

    fn read_single_quoted(&mut self) -> TokenKind {
        // Cursor sits just past the opening quote.
        loop {
            match memchr2(b'\'', b'\\', &self.input[self.cursor..]) {
                Some(off) => {
                    let pos = self.cursor + off;
                    if self.input[pos] == b'\\' {
                        self.cursor = pos + 2;
                    } else {
                        self.cursor = pos + 1;
                        return TokenKind::StringLiteral;
                    }
                }
                None => {
                    self.cursor = self.input.len();
                    return TokenKind::Error;
                }
            }
        }
    }

    fn read_double_quoted(&mut self, quote: u8) -> TokenKind {
        loop {
            match memchr2(quote, b'\\', &self.input[self.cursor..]) {
                Some(off) => {
                    let pos = self.cursor + off;
                    if self.input[pos] == b'\\' {
                        self.cursor = pos + 2;
                    } else {
                        self.cursor = pos + 1;
                        return TokenKind::StringLiteral;
                    }
                }
                None => {
                    self.cursor = self.input.len();
                    return TokenKind::Error;
                }
            }
        }
    }

    fn read_heredoc(&mut self) -> TokenKind {
        // Cursor sits just past `<<<`.
        while self.peek() == Some(b' ') || self.peek() == Some(b'\t') {
            self.advance();
        }
        let quote = match self.peek() {
            Some(q @ (b'"' | b'\'')) => {
                self.advance();
                Some(q)
            }
            _ => None,
        };
        let label_start = self.cursor;
        self.read_identifier();
        let label = self.input[label_start..self.cursor].to_vec();
        if label.is_empty() {
            return TokenKind::Error;
        }
        if let Some(q) = quote {
            if self.peek() == Some(q) {
                self.advance();
            } else {
                return TokenKind::Error;
            }
        }

        // Scan line by line for the closing label.
        loop {
            match memchr(b'\n', &self.input[self.cursor..]) {
                Some(off) => {
                    self.cursor += off + 1;
                    let mut pos = self.cursor;
                    while self.input.get(pos) == Some(&b' ') || self.input.get(pos) == Some(&b'\t') {
                        pos += 1;
                    }
                    if self.input[pos..].starts_with(&label) {
                        let after = pos + label.len();
                        let boundary = match self.input.get(after) {
                            Some(c) => !(c.is_ascii_alphanumeric() || *c == b'_'),
                            None => true,
                        };
                        if boundary {
                            self.cursor = after;
                            return TokenKind::StringLiteral;
                        }
                    }
                }
                None => {
                    self.cursor = self.input.len();
                    return TokenKind::Error;
                }
            }
        }
    }

    fn read_number(&mut self) -> TokenKind {
        let mut is_float = false;
        if self.peek() == Some(b'0')
            && matches!(self.peek_at(1), Some(b'x' | b'X' | b'b' | b'B' | b'o' | b'O'))
        {
            self.advance_n(2);
            while let Some(c) = self.peek() {
                if c.is_ascii_alphanumeric() || c == b'_' {
                    self.advance();
                } else {
                    break;
                }
            }
            return TokenKind::LNumber;
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == b'_' {
                self.advance();
            } else if c == b'.' && !is_float && matches!(self.peek_at(1), Some(d) if d.is_ascii_digit()) {
                is_float = true;
                self.advance();
            } else if c == b'e' || c == b'E' {
                match self.peek_at(1) {
                    Some(d) if d.is_ascii_digit() => {}
                    Some(b'+' | b'-') => self.advance(),
                    _ => break,
                }
                is_float = true;
                self.advance();
            } else {
                break;
            }
        }
        if is_float { TokenKind::DNumber } else { TokenKind::LNumber }
    }

    fn read_line_comment(&mut self) -> TokenKind {
        match memchr(b'\n', &self.input[self.cursor..]) {
            Some(off) => self.cursor += off,
            None => self.cursor = self.input.len(),
        }
        TokenKind::Comment
    }

    fn read_block_comment(&mut self) -> TokenKind {
        // Cursor sits just past `/*`.
        let is_doc = self.peek() == Some(b'*') && self.peek_at(1) != Some(b'/');
        loop {
            match memchr(b'*', &self.input[self.cursor..]) {
                Some(off) => {
                    self.cursor += off + 1;
                    if self.peek() == Some(b'/') {
                        self.advance();
                        return if is_doc { TokenKind::DocComment } else { TokenKind::Comment };
                    }
                }
                None => {
                    self.cursor = self.input.len();
                    return TokenKind::Error;
                }
            }
        }
    }

    fn keyword_or_identifier(&self, start: usize) -> TokenKind {
        let text = &self.input[start..self.cursor];
        // XHP-flavored names keep their case.
        match text {
            b"Category" => return TokenKind::Category,
            b"Super" => return TokenKind::Super,
            b"Attribute" => return TokenKind::Attribute,
            _ => {}
        }
        match text.to_ascii_lowercase().as_slice() {
            b"function" => TokenKind::Function,
            b"class" => TokenKind::Class,
            b"interface" => TokenKind::Interface,
            b"trait" => TokenKind::Trait,
            b"enum" => TokenKind::Enum,
            b"extends" => TokenKind::Extends,
            b"implements" => TokenKind::Implements,
            b"use" => TokenKind::Use,
            b"namespace" => TokenKind::Namespace,
            b"as" => TokenKind::As,
            b"const" => TokenKind::Const,
            b"abstract" => TokenKind::Abstract,
            b"final" => TokenKind::Final,
            b"static" => TokenKind::Static,
            b"public" => TokenKind::Public,
            b"var" => TokenKind::Public,
            b"protected" => TokenKind::Protected,
            b"private" => TokenKind::Private,
            b"async" => TokenKind::Async,
            b"inout" => TokenKind::Inout,
            b"type" => TokenKind::Type,
            b"newtype" => TokenKind::Newtype,
            b"dict" => TokenKind::Dict,
            b"vec" => TokenKind::Vec,
            b"keyset" => TokenKind::Keyset,
            b"varray" => TokenKind::Varray,
            b"darray" => TokenKind::Darray,
            b"shape" => TokenKind::Shape,
            b"select" => TokenKind::Select,
            b"on" => TokenKind::On,
            b"super" => TokenKind::Super,
            _ => TokenKind::Identifier,
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        if self.state == LexerState::Initial {
            return self.next_in_initial();
        }

        self.skip_whitespace();
        let start = self.cursor;
        let c = self.peek()?;
        self.advance();

        let kind = match c {
            b'$' => match self.peek() {
                Some(n) if n.is_ascii_alphabetic() || n == b'_' || n >= 0x80 => {
                    self.read_identifier();
                    TokenKind::Variable
                }
                _ => TokenKind::Dollar,
            },
            b'\'' => self.read_single_quoted(),
            b'"' => self.read_double_quoted(b'"'),
            b'`' => self.read_double_quoted(b'`'),
            b'/' => match self.peek() {
                Some(b'/') => {
                    self.advance();
                    self.read_line_comment()
                }
                Some(b'*') => {
                    self.advance();
                    self.read_block_comment()
                }
                Some(b'=') => {
                    self.advance();
                    TokenKind::DivEq
                }
                _ => TokenKind::Slash,
            },
            b'#' => self.read_line_comment(),
            b'\\' => TokenKind::NsSeparator,
            b'<' => match self.peek() {
                Some(b'<') => {
                    self.advance();
                    if self.peek() == Some(b'<') {
                        self.advance();
                        self.read_heredoc()
                    } else {
                        TokenKind::Sl
                    }
                }
                Some(b'=') => {
                    self.advance();
                    if self.peek() == Some(b'>') {
                        self.advance();
                        TokenKind::Spaceship
                    } else {
                        TokenKind::LtEq
                    }
                }
                _ => TokenKind::Lt,
            },
            b'>' => match self.peek() {
                Some(b'>') => {
                    self.advance();
                    TokenKind::Sr
                }
                Some(b'=') => {
                    self.advance();
                    TokenKind::GtEq
                }
                _ => TokenKind::Gt,
            },
            b'?' => match self.peek() {
                Some(b'>') => {
                    self.advance();
                    self.state = LexerState::Initial;
                    TokenKind::CloseTag
                }
                Some(b'?') => {
                    self.advance();
                    TokenKind::Coalesce
                }
                Some(b'-') if self.peek_at(1) == Some(b'>') => {
                    self.advance_n(2);
                    TokenKind::NullSafeArrow
                }
                _ => TokenKind::Question,
            },
            b'-' => match self.peek() {
                Some(b'>') => {
                    self.advance();
                    TokenKind::Arrow
                }
                Some(b'-') => {
                    self.advance();
                    TokenKind::Dec
                }
                Some(b'=') => {
                    self.advance();
                    TokenKind::MinusEq
                }
                _ => TokenKind::Minus,
            },
            b'.' => match self.peek() {
                Some(b'.') if self.peek_at(1) == Some(b'.') => {
                    self.advance_n(2);
                    TokenKind::Ellipsis
                }
                Some(b'=') => {
                    self.advance();
                    TokenKind::ConcatEq
                }
                _ => TokenKind::Dot,
            },
            b'=' => match self.peek() {
                Some(b'=') => {
                    self.advance();
                    if self.peek() == Some(b'=') {
                        self.advance();
                        TokenKind::EqEqEq
                    } else {
                        TokenKind::EqEq
                    }
                }
                Some(b'>') => {
                    self.advance();
                    TokenKind::DoubleArrow
                }
                _ => TokenKind::Eq,
            },
            b':' => {
                if self.peek() == Some(b':') {
                    self.advance();
                    TokenKind::DoubleColon
                } else {
                    TokenKind::Colon
                }
            }
            b'!' => match self.peek() {
                Some(b'=') => {
                    self.advance();
                    if self.peek() == Some(b'=') {
                        self.advance();
                        TokenKind::BangEqEq
                    } else {
                        TokenKind::BangEq
                    }
                }
                _ => TokenKind::Bang,
            },
            b'&' => {
                if self.peek() == Some(b'&') {
                    self.advance();
                    TokenKind::AmpAmp
                } else {
                    TokenKind::Ampersand
                }
            }
            b'|' => {
                if self.peek() == Some(b'|') {
                    self.advance();
                    TokenKind::PipePipe
                } else {
                    TokenKind::Pipe
                }
            }
            b'+' => match self.peek() {
                Some(b'+') => {
                    self.advance();
                    TokenKind::Inc
                }
                Some(b'=') => {
                    self.advance();
                    TokenKind::PlusEq
                }
                _ => TokenKind::Plus,
            },
            b'*' => match self.peek() {
                Some(b'*') => {
                    self.advance();
                    TokenKind::Pow
                }
                Some(b'=') => {
                    self.advance();
                    TokenKind::MulEq
                }
                _ => TokenKind::Asterisk,
            },
            b'%' => TokenKind::Percent,
            b'^' => TokenKind::Caret,
            b'~' => TokenKind::Tilde,
            b'@' => TokenKind::At,
            b',' => TokenKind::Comma,
            b';' => TokenKind::SemiColon,
            b'(' => TokenKind::OpenParen,
            b')' => TokenKind::CloseParen,
            b'{' => TokenKind::OpenBrace,
            b'}' => TokenKind::CloseBrace,
            b'[' => TokenKind::OpenBracket,
            b']' => TokenKind::CloseBracket,
            c if c.is_ascii_digit() => {
                self.cursor -= 1;
                self.read_number()
            }
            c if c.is_ascii_alphabetic() || c == b'_' || c >= 0x80 => {
                self.read_identifier();
                self.keyword_or_identifier(start)
            }
            _ => TokenKind::Error,
        };

        Some(Token {
            kind,
            span: Span::new(start, self.cursor),
        })
    }
}
