//! Lexing of a single console input line.
//!
//! A line is split on whitespace into three kinds of token: quoted strings
//! (`"..."`, `'...'` or `` `...` ``), angle-bracket tags (`<urgent>`) and bare
//! words. A backslash directly before the closing delimiter of a quoted
//! string stands for the delimiter itself.

use crate::error::TokenizeError;
use serde::{Deserialize, Serialize};
use std::iter::Peekable;
use std::str::CharIndices;

pub const BACKSLASH: char = '\\';
pub const TAG_OPEN: char = '<';
pub const TAG_CLOSE: char = '>';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Word,
    QuotedString,
    Tag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    /// Byte offset of the token's first character in the input line.
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            offset,
        }
    }

    pub fn word(value: impl Into<String>) -> Self {
        Self::new(TokenKind::Word, value, 0)
    }

    pub fn is_tag(&self) -> bool {
        self.kind == TokenKind::Tag
    }
}

pub fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'' | '`')
}

fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !is_quote(c) && c != TAG_OPEN && c != TAG_CLOSE
}

pub fn tokenize(line: &str) -> Result<Vec<Token>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut chars = line.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let token = match c {
            q if is_quote(q) => lex_quoted(line, &mut chars, start, q)?,
            TAG_OPEN => lex_tag(line, &mut chars, start)?,
            TAG_CLOSE => return Err(TokenizeError::UnexpectedTagClose { offset: start }),
            _ => lex_word(&mut chars, start),
        };
        tokens.push(token);
    }

    Ok(tokens)
}

fn lex_quoted(
    line: &str,
    chars: &mut Peekable<CharIndices<'_>>,
    start: usize,
    quote: char,
) -> Result<Token, TokenizeError> {
    chars.next();
    let mut value = String::new();

    while let Some((_, c)) = chars.next() {
        if c == quote {
            return Ok(Token::new(TokenKind::QuotedString, value, start));
        }
        if c == BACKSLASH && matches!(chars.peek(), Some(&(_, next)) if next == quote) {
            chars.next();
            value.push(quote);
            continue;
        }
        value.push(c);
    }

    Err(TokenizeError::UnterminatedQuote {
        quote,
        fragment: line[start..].to_string(),
    })
}

fn lex_tag(
    line: &str,
    chars: &mut Peekable<CharIndices<'_>>,
    start: usize,
) -> Result<Token, TokenizeError> {
    chars.next();
    let mut inner = String::new();

    for (_, c) in chars.by_ref() {
        if c == TAG_CLOSE {
            let name = inner.trim();
            if name.is_empty() {
                return Err(TokenizeError::EmptyTag { offset: start });
            }
            return Ok(Token::new(TokenKind::Tag, name, start));
        }
        inner.push(c);
    }

    Err(TokenizeError::UnterminatedTag {
        fragment: line[start..].to_string(),
    })
}

fn lex_word(chars: &mut Peekable<CharIndices<'_>>, start: usize) -> Token {
    let mut value = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if !is_word_char(c) {
            break;
        }
        value.push(c);
        chars.next();
    }
    Token::new(TokenKind::Word, value, start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_values(line: &str) -> Vec<(TokenKind, String)> {
        tokenize(line)
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.value))
            .collect()
    }

    #[test]
    fn words_tags_and_quotes() {
        assert_eq!(
            kinds_and_values(r#"add "Buy milk" <urgent> now"#),
            vec![
                (TokenKind::Word, "add".to_string()),
                (TokenKind::QuotedString, "Buy milk".to_string()),
                (TokenKind::Tag, "urgent".to_string()),
                (TokenKind::Word, "now".to_string()),
            ]
        );
    }

    #[test]
    fn quoted_title_is_a_single_token() {
        for title in ["Buy milk", "  padded  ", "tabs\tinside", "<not a tag>", "it's"] {
            let tokens = tokenize(&format!("\"{title}\"")).unwrap();
            assert_eq!(tokens.len(), 1, "title {title:?}");
            assert_eq!(tokens[0].kind, TokenKind::QuotedString);
            assert_eq!(tokens[0].value, title);
        }
    }

    #[test]
    fn all_three_quote_styles() {
        let tokens = tokenize(r#""one" 'two' `three`"#).unwrap();
        let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["one", "two", "three"]);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::QuotedString));
    }

    #[test]
    fn other_quote_kinds_are_literal_inside_quotes() {
        let tokens = tokenize(r#""say 'hi' `now`""#).unwrap();
        assert_eq!(tokens[0].value, "say 'hi' `now`");
    }

    #[test]
    fn escaped_delimiter_is_unescaped() {
        let tokens = tokenize(r#""say \"hi\"""#).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].value, r#"say "hi""#);
    }

    #[test]
    fn other_backslashes_are_kept() {
        let tokens = tokenize(r#""C:\temp\new""#).unwrap();
        assert_eq!(tokens[0].value, r"C:\temp\new");
    }

    #[test]
    fn empty_quotes_yield_empty_value() {
        let tokens = tokenize(r#"update 1 """#).unwrap();
        assert_eq!(tokens[2].kind, TokenKind::QuotedString);
        assert_eq!(tokens[2].value, "");
    }

    #[test]
    fn offsets_point_at_token_start() {
        let tokens = tokenize(r#"add  "x" <t>"#).unwrap();
        let offsets: Vec<usize> = tokens.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![0, 5, 9]);
    }

    #[test]
    fn adjacent_tokens_split_without_whitespace() {
        assert_eq!(
            kinds_and_values(r#"milk<home>"x""#),
            vec![
                (TokenKind::Word, "milk".to_string()),
                (TokenKind::Tag, "home".to_string()),
                (TokenKind::QuotedString, "x".to_string()),
            ]
        );
    }

    #[test]
    fn tag_value_is_trimmed() {
        assert_eq!(kinds_and_values("< work >")[0].1, "work");
    }

    #[test]
    fn unterminated_quote_fails() {
        let err = tokenize(r#"add "unterminated"#).unwrap_err();
        assert_eq!(
            err,
            TokenizeError::UnterminatedQuote {
                quote: '"',
                fragment: "\"unterminated".to_string(),
            }
        );
    }

    #[test]
    fn trailing_escaped_quote_is_unterminated() {
        assert!(matches!(
            tokenize(r#""abc\""#),
            Err(TokenizeError::UnterminatedQuote { .. })
        ));
    }

    #[test]
    fn empty_tag_fails() {
        assert_eq!(
            tokenize("add x <>").unwrap_err(),
            TokenizeError::EmptyTag { offset: 6 }
        );
        assert!(matches!(
            tokenize("<   >"),
            Err(TokenizeError::EmptyTag { .. })
        ));
    }

    #[test]
    fn unterminated_tag_fails() {
        assert_eq!(
            tokenize("<unterminated").unwrap_err(),
            TokenizeError::UnterminatedTag {
                fragment: "<unterminated".to_string(),
            }
        );
    }

    #[test]
    fn stray_tag_close_fails() {
        assert_eq!(
            tokenize("add x > y").unwrap_err(),
            TokenizeError::UnexpectedTagClose { offset: 6 }
        );
    }

    #[test]
    fn blank_line_has_no_tokens() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize(" \t  ").unwrap().is_empty());
    }
}
