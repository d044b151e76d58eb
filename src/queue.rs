use std::collections::VecDeque;

use crate::error::{Result, ScanError};
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// Ordered token queue for one source unit. The position only ever moves
/// forward, except for `unshift`, which re-queues a synthetic token (used to
/// split `>>` into two `>` when closing nested generic lists).
pub struct TokenQueue<'src> {
    source: &'src str,
    tokens: VecDeque<Token>,
}

impl<'src> TokenQueue<'src> {
    /// Build a queue from raw lexer output. Plain comments, inline HTML and
    /// close tags carry no definition content and are dropped here; doc
    /// comments stay so the scope consumer can attach them.
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        let tokens = tokens
            .into_iter()
            .filter(|t| {
                !matches!(
                    t.kind,
                    TokenKind::Comment | TokenKind::InlineHtml | TokenKind::CloseTag
                )
            })
            .collect();
        Self { source, tokens }
    }

    pub fn have_tokens(&self) -> bool {
        !self.tokens.is_empty()
    }

    pub fn shift(&mut self, expected: &'static str) -> Result<Token> {
        self.tokens
            .pop_front()
            .ok_or(ScanError::UnexpectedEof { expected })
    }

    pub fn peek(&self, n: usize) -> Option<Token> {
        self.tokens.get(n).copied()
    }

    pub fn unshift(&mut self, token: Token) {
        self.tokens.push_front(token);
    }

    pub fn text(&self, token: Token) -> &'src str {
        &self.source[token.span.start..token.span.end]
    }

    pub fn slice(&self, span: Span) -> &'src str {
        &self.source[span.start..span.end]
    }
}
