//! One console session: the state machine, the task list and the config,
//! plus the per-line dispatch that ties them together.

use crate::command::{parse, FieldEdit, ParsedCommand};
use crate::config::Config;
use crate::error::{ParseError, Result, TodoError};
use crate::handler::handler;
use crate::resolve::resolve_identifier;
use crate::state::{PendingAction, StateData, StateMachine};
use crate::task::{Task, TaskStore};
use crate::tokenizer::{tokenize, Token, TokenKind};
use crate::types::{CliState, Verb};

const FIELD_USAGE: &str = r#""New title" "New description" <tag>"#;
const CONFIRM_USAGE: &str = "yes | no";

/// Text produced by handling one line, printed before the next prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
}

impl Reply {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn text(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
        }
    }

    fn with(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug)]
pub struct Session {
    machine: StateMachine,
    store: TaskStore,
    config: Config,
}

impl Session {
    pub fn new(config: Config) -> Self {
        tracing::info!(confirm_delete = config.confirm_delete, "session started");
        Self {
            machine: StateMachine::with_history_limit(config.history_limit),
            store: TaskStore::new(),
            config,
        }
    }

    pub fn state(&self) -> CliState {
        self.machine.current()
    }

    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_finished(&self) -> bool {
        self.machine.is_terminal()
    }

    /// Prompt for the current state, e.g. `todo [add task]> `.
    pub fn prompt(&self) -> String {
        handler(self.state()).prompt_line(&self.config.prompt)
    }

    /// End the session and return the final task summary.
    pub fn close(self) -> String {
        let summary = self.store.summarize();
        tracing::info!(
            state = %self.machine.current(),
            transitions = self.machine.history().len(),
            %summary,
            "session closed"
        );
        summary
    }

    /// Handle one input line in the current state.
    ///
    /// Every error is recoverable: the state is left as it was and the caller
    /// re-prompts.
    pub fn handle_line(&mut self, line: &str) -> Result<Reply> {
        let line = line.trim();
        let state = self.state();
        tracing::debug!(%state, line, "dispatch");

        if line.is_empty() && !state.is_terminal() {
            return Ok(Reply::empty());
        }

        match state {
            CliState::MainMenu => self.main_menu(line),
            CliState::AddingTask => self.adding(line),
            CliState::UpdatingTask => self.updating(line),
            CliState::DeletingTask => self.deleting(line),
            CliState::ConfirmationDialog => self.confirming(line),
            CliState::Exiting => Err(TodoError::InvalidStateOperation {
                state: state.to_string(),
                operation: "accept input".to_string(),
            }),
        }
    }

    // -----------------------------------------------------------------------
    // Per-state handlers
    // -----------------------------------------------------------------------

    fn main_menu(&mut self, line: &str) -> Result<Reply> {
        let tokens = tokenize(line)?;

        if let [only] = tokens.as_slice() {
            match bare_verb(only) {
                Some(Verb::Add) => return self.enter(CliState::AddingTask),
                Some(Verb::Delete) => return self.enter(CliState::DeletingTask),
                _ => {}
            }
        }

        let cmd = parse(&tokens)?;
        match cmd.verb {
            Verb::Add => self.add_task(&cmd),
            Verb::Update => {
                let id = self.resolve(&cmd)?;
                if cmd.has_edits() {
                    let task = self.store.update(&id, &cmd)?;
                    Ok(Reply::text(format!("Updated task: {}", task.title)))
                } else {
                    let title = self.store.get(&id)?.title.clone();
                    self.machine.transition_to(CliState::UpdatingTask)?;
                    self.machine.set_data(StateData::EditingTask { task_id: id })?;
                    Ok(Reply::text(format!("Editing task: {title}"))
                        .with(handler(CliState::UpdatingTask).prompt))
                }
            }
            Verb::Delete => {
                let id = self.resolve(&cmd)?;
                self.machine.transition_to(CliState::DeletingTask)?;
                self.delete_or_confirm(id)
            }
            Verb::Complete | Verb::Incomplete => {
                let id = self.resolve(&cmd)?;
                let done = cmd.verb == Verb::Complete;
                let task = self.store.set_completed(&id, done)?;
                let status = if done { "Completed" } else { "Reopened" };
                Ok(Reply::text(format!("{status} task: {}", task.title)))
            }
            Verb::List => Ok(self.render_list()),
            Verb::Help => Ok(Reply::text(handler(CliState::MainMenu).render_options())),
            Verb::Exit => {
                self.machine.transition_to(CliState::Exiting)?;
                Ok(Reply::text(handler(CliState::Exiting).prompt))
            }
        }
    }

    fn adding(&mut self, line: &str) -> Result<Reply> {
        if let Some(reply) = self.leave_keyword(line)? {
            return Ok(reply);
        }
        let tokens = with_verb(Verb::Add, strip_verb(Verb::Add, tokenize(line)?));
        let cmd = parse(&tokens)?;
        let reply = self.add_task(&cmd)?;
        self.machine.transition_to(CliState::MainMenu)?;
        Ok(reply)
    }

    fn updating(&mut self, line: &str) -> Result<Reply> {
        if let Some(reply) = self.leave_keyword(line)? {
            return Ok(reply);
        }
        let task_id = self.machine.editing_task()?;
        let mut tokens = vec![Token::word(task_id.as_str())];
        tokens.extend(strip_verb(Verb::Update, tokenize(line)?));
        let cmd = parse(&with_verb(Verb::Update, tokens))?;
        if !cmd.has_edits() {
            return Err(ParseError::new("nothing to change", FIELD_USAGE).into());
        }
        if cmd.title == FieldEdit::Cleared {
            return Err(ParseError::new(
                "the title cannot be cleared; repeat it to clear only the description",
                r#""Title" """#,
            )
            .into());
        }
        let title = self.store.update(&task_id, &cmd)?.title.clone();
        self.machine.transition_to(CliState::MainMenu)?;
        Ok(Reply::text(format!("Updated task: {title}")))
    }

    fn deleting(&mut self, line: &str) -> Result<Reply> {
        if let Some(reply) = self.leave_keyword(line)? {
            return Ok(reply);
        }
        let mut tokens = strip_verb(Verb::Delete, tokenize(line)?);
        // Only an identifier is expected here, so unquoted titles are allowed.
        if tokens.len() > 1 && tokens.iter().all(|t| t.kind == TokenKind::Word) {
            let words: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
            tokens = vec![Token::word(words.join(" "))];
        }
        let cmd = parse(&with_verb(Verb::Delete, tokens))?;
        let id = self.resolve(&cmd)?;
        self.delete_or_confirm(id)
    }

    fn confirming(&mut self, line: &str) -> Result<Reply> {
        let action = self.machine.pending_confirmation()?;
        let answer = line.to_ascii_lowercase();

        match answer.as_str() {
            "y" | "yes" => match action {
                PendingAction::DeleteTask { task_id, .. } => {
                    let removed = self.store.remove(&task_id);
                    self.machine.transition_to(CliState::MainMenu)?;
                    Ok(Reply::text(format!("Deleted task: {}", removed?.title)))
                }
                PendingAction::Exit => {
                    self.machine.transition_to(CliState::Exiting)?;
                    Ok(Reply::text(handler(CliState::Exiting).prompt))
                }
            },
            "n" | "no" => {
                self.machine.transition_to(CliState::MainMenu)?;
                Ok(Reply::text("Cancelled."))
            }
            _ => Err(ParseError::new(
                format!("please answer yes or no, not '{line}'"),
                CONFIRM_USAGE,
            )
            .into()),
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn enter(&mut self, state: CliState) -> Result<Reply> {
        self.machine.transition_to(state)?;
        Ok(Reply::text(handler(state).prompt))
    }

    /// `cancel` and `exit` inside the add / update / delete flows.
    fn leave_keyword(&mut self, line: &str) -> Result<Option<Reply>> {
        if line.eq_ignore_ascii_case("cancel") {
            self.machine.transition_to(CliState::MainMenu)?;
            return Ok(Some(Reply::text("Cancelled.")));
        }
        if matches!(line.parse::<Verb>(), Ok(Verb::Exit)) {
            self.machine.transition_to(CliState::ConfirmationDialog)?;
            self.machine
                .set_data(StateData::PendingConfirmation(PendingAction::Exit))?;
            return Ok(Some(
                Reply::text("Leave without finishing?")
                    .with(handler(CliState::ConfirmationDialog).prompt),
            ));
        }
        Ok(None)
    }

    fn add_task(&mut self, cmd: &ParsedCommand) -> Result<Reply> {
        let id = self.store.add(cmd)?;
        let title = &self.store.get(&id)?.title;
        Ok(Reply::text(format!("Added task {}: {title}", self.store.len())))
    }

    fn resolve(&self, cmd: &ParsedCommand) -> Result<String> {
        let identifier = cmd.identifier.as_deref().ok_or_else(|| {
            ParseError::new(
                format!("{} needs a task number, id or title", cmd.verb),
                cmd.verb.usage(),
            )
        })?;
        resolve_identifier(identifier, &self.store)
    }

    /// Called in `DeletingTask` once the task is known.
    fn delete_or_confirm(&mut self, task_id: String) -> Result<Reply> {
        self.machine.require(CliState::DeletingTask, "delete a task")?;
        let title = self.store.get(&task_id)?.title.clone();

        if self.config.confirm_delete {
            self.machine.transition_to(CliState::ConfirmationDialog)?;
            self.machine
                .set_data(StateData::PendingConfirmation(PendingAction::DeleteTask {
                    task_id,
                    title: title.clone(),
                }))?;
            return Ok(Reply::text(format!("Delete task '{title}'?"))
                .with(handler(CliState::ConfirmationDialog).prompt));
        }

        self.store.remove(&task_id)?;
        self.machine.transition_to(CliState::MainMenu)?;
        Ok(Reply::text(format!("Deleted task: {title}")))
    }

    fn render_list(&self) -> Reply {
        if self.store.is_empty() {
            return Reply::text(r#"No tasks yet. Try: add "Buy milk""#);
        }
        let mut reply = Reply::empty();
        for (i, task) in self.store.tasks().iter().enumerate() {
            reply = reply.with(self.render_task(i + 1, task));
            if let Some(description) = &task.description {
                reply = reply.with(format!("        {description}"));
            }
        }
        reply.with(self.store.summarize())
    }

    fn render_task(&self, position: usize, task: &Task) -> String {
        let mark = if task.completed { 'x' } else { ' ' };
        let mut line = format!("{position:>3}. [{mark}] {}", task.title);
        for tag in &task.tags {
            line.push_str(&format!(" <{tag}>"));
        }
        if self.config.show_ids {
            line.push_str(&format!(" ({})", task.short_id()));
        }
        line
    }
}

fn bare_verb(token: &Token) -> Option<Verb> {
    if token.kind != TokenKind::Word {
        return None;
    }
    token.value.parse().ok()
}

/// Drop a leading word naming `verb`, so `add "x"` typed inside the add flow
/// means the same as `"x"`.
fn strip_verb(verb: Verb, mut tokens: Vec<Token>) -> Vec<Token> {
    if tokens.first().and_then(bare_verb) == Some(verb) {
        tokens.remove(0);
    }
    tokens
}

fn with_verb(verb: Verb, tokens: Vec<Token>) -> Vec<Token> {
    let mut full = vec![Token::word(verb.as_str())];
    full.extend(tokens);
    full
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
