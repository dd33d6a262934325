//! Token stream over raw page markup.
//!
//! Detail pages are scanned without building a tree. Markup goes through the
//! html5ever tokenizer, so script, style and textarea bodies stay text and
//! malformed input never stops the stream early. Runs of text, comments and
//! doctypes collapse into a single [`Token::Other`].

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    self, BufferQueue, TagKind, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use html5ever::TokenizerResult;
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::trace;

/// An opening tag with lowercased name and its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub attrs: HashMap<String, String>,
}

impl Tag {
    /// Creates a tag without attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), attrs: HashMap::new() }
    }

    /// Adds an attribute. The first value of a repeated name is kept.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.entry(key.into()).or_insert_with(|| value.into());
        self
    }

    /// Returns the attribute value, if present.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    fn from_html(tag: &tokenizer::Tag) -> Self {
        tag.attrs
            .iter()
            .fold(Self::new(&*tag.name), |acc, attr| acc.with_attr(&*attr.name.local, &*attr.value))
    }
}

/// One markup event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Open(Tag),
    Close(String),
    Other,
}

/// Iterator of [`Token`]s; `None` marks the end of the stream.
pub struct TokenStream {
    tokens: std::vec::IntoIter<Token>,
}

impl TokenStream {
    /// Tokenizes `markup`.
    pub fn new(markup: &str) -> Self {
        let input = BufferQueue::default();
        input.push_back(StrTendril::from_slice(markup));

        let tokenizer = Tokenizer::new(Collector::default(), TokenizerOpts::default());
        while !matches!(tokenizer.feed(&input), TokenizerResult::Done) {}
        tokenizer.end();

        let tokens = tokenizer.sink.tokens.into_inner();
        trace!("Tokenized {} bytes into {} tokens", markup.len(), tokens.len());

        Self { tokens: tokens.into_iter() }
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.tokens.next()
    }
}

/// Receives tokenizer output and switches raw-text states the way a tree builder would.
#[derive(Default)]
struct Collector {
    tokens: RefCell<Vec<Token>>,
}

impl Collector {
    fn push(&self, token: Token) {
        let mut tokens = self.tokens.borrow_mut();
        if token == Token::Other && tokens.last() == Some(&Token::Other) {
            return;
        }
        tokens.push(token);
    }
}

impl TokenSink for Collector {
    type Handle = ();

    fn process_token(&self, token: tokenizer::Token, _line: u64) -> TokenSinkResult<()> {
        match token {
            tokenizer::TagToken(tag) if tag.kind == TagKind::StartTag => {
                let next = if tag.self_closing { None } else { raw_content(&tag.name) };
                self.push(Token::Open(Tag::from_html(&tag)));
                return next.unwrap_or(TokenSinkResult::Continue);
            }
            tokenizer::TagToken(tag) => self.push(Token::Close(tag.name.to_string())),
            tokenizer::CharacterTokens(_)
            | tokenizer::CommentToken(_)
            | tokenizer::DoctypeToken(_) => self.push(Token::Other),
            tokenizer::ParseError(_)
            | tokenizer::NullCharacterToken
            | tokenizer::EOFToken => {}
        }

        TokenSinkResult::Continue
    }
}

/// Tokenizer state for the body of elements whose content is not markup.
fn raw_content(name: &str) -> Option<TokenSinkResult<()>> {
    let kind = match name {
        "script" => RawKind::ScriptData,
        "style" | "xmp" | "iframe" | "noembed" | "noframes" | "noscript" => RawKind::Rawtext,
        "textarea" | "title" => RawKind::Rcdata,
        "plaintext" => return Some(TokenSinkResult::Plaintext),
        _ => return None,
    };
    Some(TokenSinkResult::RawData(kind))
}
