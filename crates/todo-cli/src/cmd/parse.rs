use crate::output::{print_json, print_table};
use todo_core::command::{parse_line, FieldEdit, ParsedCommand};
use todo_core::tokenizer::{tokenize, TokenKind};
use todo_core::types::Verb;

/// Rebuild one command line from shell arguments. A single argument is taken
/// as the whole line.
pub fn join_args(args: &[String]) -> String {
    if let [line] = args {
        return line.clone();
    }
    args.iter()
        .map(|arg| {
            if arg.is_empty() || arg.chars().any(char::is_whitespace) {
                format!("\"{}\"", arg.replace('"', "\\\""))
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn run_parse(line: &str, json: bool) -> anyhow::Result<()> {
    let cmd = parse_line(line)?;
    if json {
        print_json(&cmd)?;
    } else {
        println!("{}", describe(&cmd));
    }
    Ok(())
}

pub fn run_tokenize(line: &str, json: bool) -> anyhow::Result<()> {
    let tokens = tokenize(line)?;
    if json {
        return print_json(&tokens);
    }
    let rows: Vec<Vec<String>> = tokens
        .iter()
        .map(|t| {
            let kind = match t.kind {
                TokenKind::Word => "word",
                TokenKind::QuotedString => "quoted_string",
                TokenKind::Tag => "tag",
            };
            vec![t.offset.to_string(), kind.to_string(), format!("{:?}", t.value)]
        })
        .collect();
    print_table(&["OFFSET", "KIND", "VALUE"], &rows);
    Ok(())
}

fn describe_field(field: &FieldEdit) -> String {
    match field {
        FieldEdit::Omitted => "(unchanged)".to_string(),
        FieldEdit::Cleared => "(cleared)".to_string(),
        FieldEdit::Set(value) => format!("{value:?}"),
    }
}

/// Multi-line summary of a parsed command. Fields the verb does not use are
/// left out.
pub fn describe(cmd: &ParsedCommand) -> String {
    let mut lines = vec![format!("verb:        {}", cmd.verb)];
    if let Some(identifier) = &cmd.identifier {
        lines.push(format!("identifier:  {identifier:?}"));
    }
    if cmd.has_edits() || cmd.verb == Verb::Update {
        lines.push(format!("title:       {}", describe_field(&cmd.title)));
        lines.push(format!("description: {}", describe_field(&cmd.description)));
        let tags: Vec<&str> = cmd.tags.iter().map(String::as_str).collect();
        let tags = if tags.is_empty() {
            "(none)".to_string()
        } else {
            tags.join(", ")
        };
        lines.push(format!("tags:        {tags}"));
    }
    lines.join("\n")
}
