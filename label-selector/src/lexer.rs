use serde::Serialize;
use strum_macros::{EnumIter, IntoStaticStr};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TokenKind {
    Word,
    Equal,
    NotEqual,
    Not,
    Comma,
    OpenParen,
    CloseParen,
    Space,
    Error,
    End,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name)
    }
}

/// A lexical unit of a label selector.
///
/// `text` borrows the exact matched slice of the input and `offset` is the
/// byte position where it starts. The synthetic end token has empty text and
/// an offset equal to the input length.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, offset: usize) -> Self {
        Self { kind, text, offset }
    }

    pub fn end(input: &'a str) -> Self {
        Self::new(TokenKind::End, "", input.len())
    }

    /// Byte offset just past the end of this token.
    pub fn end_offset(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// Characters allowed inside keys and values.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/')
}

/// Splits `input` into tokens covering every byte, left to right.
///
/// Scanning is total: a character that starts no known token becomes a
/// single-character `Error` token and scanning continues after it. No `End`
/// token is appended.
pub fn scan(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let kind = match c {
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            ',' => TokenKind::Comma,
            '!' => {
                if chars.next_if(|&(_, next)| next == '=').is_some() {
                    TokenKind::NotEqual
                } else {
                    TokenKind::Not
                }
            }
            '=' => {
                // "==" is the same operator as "="
                chars.next_if(|&(_, next)| next == '=');
                TokenKind::Equal
            }
            c if c.is_whitespace() => {
                while chars.next_if(|&(_, next)| next.is_whitespace()).is_some() {}
                TokenKind::Space
            }
            c if is_word_char(c) => {
                while chars.next_if(|&(_, next)| is_word_char(next)).is_some() {}
                TokenKind::Word
            }
            _ => TokenKind::Error,
        };
        let end = chars.peek().map_or(input.len(), |&(i, _)| i);
        tokens.push(Token::new(kind, &input[start..end], start));
    }

    tokens
}
