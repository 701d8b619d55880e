use crate::error::{ParseError, Result};
use crate::tokenizer::{tokenize, Token, TokenKind};
use crate::types::Verb;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// FieldEdit
// ---------------------------------------------------------------------------

/// What a command says about one optional field.
///
/// `Omitted` leaves the field alone, `Cleared` came from an explicitly empty
/// quoted string (`""`), `Set` carries the new trimmed value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "edit", content = "value", rename_all = "snake_case")]
pub enum FieldEdit {
    #[default]
    Omitted,
    Cleared,
    Set(String),
}

impl FieldEdit {
    fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            FieldEdit::Cleared
        } else {
            FieldEdit::Set(trimmed.to_string())
        }
    }

    /// True when the user supplied the field, including an explicit clear.
    pub fn is_provided(&self) -> bool {
        !matches!(self, FieldEdit::Omitted)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            FieldEdit::Set(v) => Some(v),
            FieldEdit::Omitted | FieldEdit::Cleared => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ParsedCommand
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommand {
    pub verb: Verb,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default)]
    pub title: FieldEdit,
    #[serde(default)]
    pub description: FieldEdit,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl ParsedCommand {
    pub fn new(verb: Verb) -> Self {
        Self {
            verb,
            identifier: None,
            title: FieldEdit::Omitted,
            description: FieldEdit::Omitted,
            tags: BTreeSet::new(),
        }
    }

    pub fn tags_provided(&self) -> bool {
        !self.tags.is_empty()
    }

    /// True if the command changes at least one field of a task.
    pub fn has_edits(&self) -> bool {
        self.title.is_provided() || self.description.is_provided() || self.tags_provided()
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Tokenize and parse one input line.
pub fn parse_line(line: &str) -> Result<ParsedCommand> {
    let tokens = tokenize(line)?;
    Ok(parse(&tokens)?)
}

pub fn parse(tokens: &[Token]) -> std::result::Result<ParsedCommand, ParseError> {
    let Some((head, body)) = tokens.split_first() else {
        return Err(ParseError::new("empty command", verb_list()));
    };
    if head.kind != TokenKind::Word {
        return Err(ParseError::new(
            format!("a command must start with a verb, found '{}'", head.value),
            verb_list(),
        ));
    }
    let verb: Verb = head.value.parse()?;
    let mut cmd = ParsedCommand::new(verb);

    match verb {
        Verb::Add => {
            let fields = parse_fields(verb, body)?;
            if !matches!(fields.title, FieldEdit::Set(_)) {
                return Err(ParseError::new("a new task needs a non-empty title", verb.usage()));
            }
            fields.apply_to(&mut cmd);
        }
        Verb::Update => {
            let Some((ident, rest)) = body.split_first() else {
                return Err(ParseError::new(
                    "update needs the task to change (number, id or title)",
                    verb.usage(),
                ));
            };
            cmd.identifier = Some(identifier_value(verb, ident)?);
            parse_fields(verb, rest)?.apply_to(&mut cmd);
        }
        Verb::Delete | Verb::Complete | Verb::Incomplete => match body {
            [ident] => cmd.identifier = Some(identifier_value(verb, ident)?),
            [] => {
                return Err(ParseError::new(
                    format!("{verb} needs a task number, id or title"),
                    verb.usage(),
                ))
            }
            [_, extra, ..] => {
                return Err(ParseError::new(
                    format!(
                        "{verb} takes a single task, unexpected '{}'; quote titles with spaces",
                        extra.value
                    ),
                    verb.usage(),
                ))
            }
        },
        Verb::List | Verb::Help | Verb::Exit => {
            if let Some(extra) = body.first() {
                return Err(ParseError::new(
                    format!("{verb} takes no arguments, unexpected '{}'", extra.value),
                    verb.usage(),
                ));
            }
        }
    }

    Ok(cmd)
}

fn verb_list() -> String {
    let names: Vec<&str> = Verb::all().iter().map(|v| v.as_str()).collect();
    names.join(" | ")
}

fn identifier_value(verb: Verb, token: &Token) -> std::result::Result<String, ParseError> {
    if token.is_tag() {
        return Err(ParseError::new(
            format!("expected a task number, id or title, found tag <{}>", token.value),
            verb.usage(),
        ));
    }
    let value = token.value.trim();
    if value.is_empty() {
        return Err(ParseError::new("task identifier cannot be empty", verb.usage()));
    }
    Ok(value.to_string())
}

struct Fields {
    title: FieldEdit,
    description: FieldEdit,
    tags: BTreeSet<String>,
}

impl Fields {
    fn apply_to(self, cmd: &mut ParsedCommand) {
        cmd.title = self.title;
        cmd.description = self.description;
        cmd.tags = self.tags;
    }
}

/// Title / description / tags as shared by `add` and `update`.
///
/// With quotes present the first quoted value is the title and the second the
/// description. Without quotes, the words before the first tag form the title.
fn parse_fields(verb: Verb, body: &[Token]) -> std::result::Result<Fields, ParseError> {
    let usage = verb.usage();
    let has_quotes = body.iter().any(|t| t.kind == TokenKind::QuotedString);

    let mut quoted: Vec<&str> = Vec::new();
    let mut words: Vec<&str> = Vec::new();
    let mut tags = BTreeSet::new();
    let mut seen_tag = false;

    for token in body {
        match token.kind {
            TokenKind::Tag => {
                seen_tag = true;
                tags.insert(token.value.trim().to_lowercase());
            }
            TokenKind::QuotedString => quoted.push(&token.value),
            TokenKind::Word if has_quotes => {
                return Err(ParseError::new(
                    format!("unexpected word '{}' next to quoted values", token.value),
                    usage,
                ));
            }
            TokenKind::Word if seen_tag => {
                return Err(ParseError::new(
                    format!(
                        "unexpected word '{}' after tags; quote the title instead",
                        token.value
                    ),
                    usage,
                ));
            }
            TokenKind::Word => words.push(&token.value),
        }
    }

    if quoted.len() > 2 {
        return Err(ParseError::new(
            format!(
                "expected a title and an optional description, found {} quoted values",
                quoted.len()
            ),
            usage,
        ));
    }

    let title = match quoted.first() {
        Some(text) => FieldEdit::from_text(text),
        None if !words.is_empty() => FieldEdit::from_text(&words.join(" ")),
        None => FieldEdit::Omitted,
    };
    let description = quoted
        .get(1)
        .map(|text| FieldEdit::from_text(text))
        .unwrap_or_default();

    Ok(Fields {
        title,
        description,
        tags,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
