use crate::lexer::Token;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Longest prefix or suffix shown around an offending token.
const CONTEXT_LIMIT: usize = 30;
const PREFIX_KEEP: usize = 27;
const SUFFIX_KEEP: usize = 28;
const ELLIPSIS: &str = "...";

/// Error types for label selector parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelSelectorError {
    EmptySelector,
    InvalidCharacter {
        offset: usize,
        context: String,
    },
    UnexpectedToken {
        expected: &'static str,
        offset: usize,
        context: String,
    },
    Incomplete,
    Internal(String),
    EmptyValueSet {
        key: String,
    },
    InvalidWord {
        word: String,
    },
}

impl LabelSelectorError {
    pub fn invalid_character(input: &str, token: &Token) -> Self {
        LabelSelectorError::InvalidCharacter {
            offset: token.offset,
            context: token_context(input, token),
        }
    }

    pub fn unexpected_token(expected: &'static str, input: &str, token: &Token) -> Self {
        LabelSelectorError::UnexpectedToken {
            expected,
            offset: token.offset,
            context: token_context(input, token),
        }
    }

    /// Byte offset of the offending token, if the error is tied to one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            LabelSelectorError::InvalidCharacter { offset, .. }
            | LabelSelectorError::UnexpectedToken { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

impl std::fmt::Display for LabelSelectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelSelectorError::EmptySelector => write!(f, "empty label selector not allowed"),
            LabelSelectorError::InvalidCharacter { context, .. } => {
                write!(f, "invalid label_selector: {}", context)
            }
            LabelSelectorError::UnexpectedToken {
                expected, context, ..
            } => write!(f, "{}: {}", expected, context),
            LabelSelectorError::Incomplete => {
                write!(f, "Expecting completion of the selector, hit the end")
            }
            LabelSelectorError::Internal(msg) => write!(f, "internal error: {}", msg),
            LabelSelectorError::EmptyValueSet { key } => {
                write!(f, "set-based requirement for key '{}' needs at least one value", key)
            }
            LabelSelectorError::InvalidWord { word } => {
                write!(f, "'{}' is not a valid label key or value", word)
            }
        }
    }
}

impl std::error::Error for LabelSelectorError {}

/// All errors reported for one selector, in the order they were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors {
    errors: Vec<LabelSelectorError>,
}

impl ParseErrors {
    pub fn new(errors: Vec<LabelSelectorError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[LabelSelectorError] {
        &self.errors
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn first(&self) -> Option<&LabelSelectorError> {
        self.errors.first()
    }
}

impl From<LabelSelectorError> for ParseErrors {
    fn from(err: LabelSelectorError) -> Self {
        ParseErrors::new(vec![err])
    }
}

impl std::fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl std::error::Error for ParseErrors {}

impl Serialize for ParseErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ParseErrors", 1)?;
        state.serialize_field("errors", &self.messages())?;
        state.end()
    }
}

/// Renders the input around `token` as `<prefix><<text>><suffix>`.
///
/// A prefix longer than 30 characters keeps its last 27 behind a leading
/// "...", a suffix longer than 30 characters keeps its first 28 followed by
/// "...". Lengths are counted in characters.
pub fn token_context(input: &str, token: &Token) -> String {
    let mut context = String::new();

    if token.offset > 0 {
        let prefix = &input[..token.offset];
        let len = prefix.chars().count();
        if len > CONTEXT_LIMIT {
            context.push_str(ELLIPSIS);
            context.extend(prefix.chars().skip(len - PREFIX_KEEP));
        } else {
            context.push_str(prefix);
        }
    }

    context.push_str("<<");
    context.push_str(token.text);
    context.push_str(">>");

    if token.end_offset() < input.len() {
        let suffix = &input[token.end_offset()..];
        if suffix.chars().count() > CONTEXT_LIMIT {
            context.extend(suffix.chars().take(SUFFIX_KEEP));
            context.push_str(ELLIPSIS);
        } else {
            context.push_str(suffix);
        }
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    #[test]
    fn test_context_without_prefix_or_suffix() {
        let token = Token::new(TokenKind::Error, "*", 0);
        assert_eq!(token_context("*", &token), "<<*>>");
    }

    #[test]
    fn test_context_at_end_of_input() {
        let input = "abc in(";
        assert_eq!(token_context(input, &Token::end(input)), "abc in(<<>>");
    }

    #[test]
    fn test_context_middle() {
        let token = Token::new(TokenKind::Error, "*", 3);
        assert_eq!(token_context("abc*=def", &token), "abc<<*>>=def");
    }

    #[test]
    fn test_context_prefix_exactly_thirty_is_kept() {
        let input = format!("{}*", "a".repeat(30));
        let token = Token::new(TokenKind::Error, "*", 30);
        assert_eq!(token_context(&input, &token), format!("{}<<*>>", "a".repeat(30)));
    }

    #[test]
    fn test_context_long_prefix_is_truncated() {
        let input = format!("{}{}*", "x".repeat(10), "a".repeat(27));
        let token = Token::new(TokenKind::Error, "*", 37);
        let context = token_context(&input, &token);
        assert_eq!(context, format!("...{}<<*>>", "a".repeat(27)));
    }

    #[test]
    fn test_context_long_suffix_is_truncated() {
        let input = format!("*{}{}", "b".repeat(28), "z".repeat(5));
        let token = Token::new(TokenKind::Error, "*", 0);
        let context = token_context(&input, &token);
        assert_eq!(context, format!("<<*>>{}...", "b".repeat(28)));
    }

    #[test]
    fn test_context_suffix_skips_whole_token() {
        let token = Token::new(TokenKind::Word, "def", 5);
        assert_eq!(token_context("!abc def,g", &token), "!abc <<def>>,g");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            LabelSelectorError::EmptySelector.to_string(),
            "empty label selector not allowed"
        );
        assert_eq!(
            LabelSelectorError::Incomplete.to_string(),
            "Expecting completion of the selector, hit the end"
        );
        let input = "abc*";
        let token = Token::new(TokenKind::Error, "*", 3);
        let err = LabelSelectorError::invalid_character(input, &token);
        assert_eq!(err.to_string(), "invalid label_selector: abc<<*>>");
        assert_eq!(err.offset(), Some(3));
    }

    #[test]
    fn test_parse_errors_serialize() {
        let errors = ParseErrors::from(LabelSelectorError::EmptySelector);
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"errors":["empty label selector not allowed"]}"#);
        assert_eq!(errors.to_string(), "empty label selector not allowed");
    }
}
