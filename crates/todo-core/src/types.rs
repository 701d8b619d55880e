use crate::error::{ParseError, TodoError};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Verb
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verb {
    Add,
    Update,
    Delete,
    Complete,
    Incomplete,
    List,
    Help,
    Exit,
}

impl Verb {
    pub fn all() -> &'static [Verb] {
        &[
            Verb::Add,
            Verb::Update,
            Verb::Delete,
            Verb::Complete,
            Verb::Incomplete,
            Verb::List,
            Verb::Help,
            Verb::Exit,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Add => "add",
            Verb::Update => "update",
            Verb::Delete => "delete",
            Verb::Complete => "complete",
            Verb::Incomplete => "incomplete",
            Verb::List => "list",
            Verb::Help => "help",
            Verb::Exit => "exit",
        }
    }

    /// A complete, valid example of the verb. Shown with every parse error.
    pub fn usage(self) -> &'static str {
        match self {
            Verb::Add => r#"add "Buy milk" "optional description" <tag>"#,
            Verb::Update => r#"update 1 "New title" "New description" <tag>"#,
            Verb::Delete => "delete 1",
            Verb::Complete => "complete 1",
            Verb::Incomplete => "incomplete 1",
            Verb::List => "list",
            Verb::Help => "help",
            Verb::Exit => "exit",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Verb {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "add" => Ok(Verb::Add),
            "update" => Ok(Verb::Update),
            "delete" => Ok(Verb::Delete),
            "complete" => Ok(Verb::Complete),
            "incomplete" => Ok(Verb::Incomplete),
            "list" => Ok(Verb::List),
            "help" => Ok(Verb::Help),
            "exit" | "quit" | "q" => Ok(Verb::Exit),
            _ => Err(ParseError::new(
                format!("unknown command '{s}'"),
                Verb::Help.usage(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// CliState
// ---------------------------------------------------------------------------

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CliState {
    #[default]
    MainMenu,
    AddingTask,
    UpdatingTask,
    DeletingTask,
    ConfirmationDialog,
    Exiting,
}

impl CliState {
    pub fn all() -> &'static [CliState] {
        &[
            CliState::MainMenu,
            CliState::AddingTask,
            CliState::UpdatingTask,
            CliState::DeletingTask,
            CliState::ConfirmationDialog,
            CliState::Exiting,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CliState::MainMenu => "main_menu",
            CliState::AddingTask => "adding_task",
            CliState::UpdatingTask => "updating_task",
            CliState::DeletingTask => "deleting_task",
            CliState::ConfirmationDialog => "confirmation_dialog",
            CliState::Exiting => "exiting",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, CliState::Exiting)
    }
}

impl fmt::Display for CliState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CliState {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CliState::all()
            .iter()
            .copied()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| {
                ParseError::new(
                    format!("unknown state '{s}'"),
                    "main_menu | adding_task | updating_task | deleting_task | confirmation_dialog | exiting",
                )
                .into()
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
