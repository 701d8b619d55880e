//! Prompt and option metadata for each console state.

use crate::types::CliState;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateOption {
    pub input: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateHandler {
    pub state: CliState,
    pub title: &'static str,
    pub prompt: &'static str,
    pub options: &'static [StateOption],
}

impl StateHandler {
    /// The input line prompt, e.g. `todo [main menu]> `.
    pub fn prompt_line(&self, prefix: &str) -> String {
        format!("{prefix} [{}]> ", self.title)
    }

    /// Option listing as shown by `help`, one option per line.
    pub fn render_options(&self) -> String {
        let width = self.options.iter().map(|o| o.input.len()).max().unwrap_or(0);
        let lines: Vec<String> = self
            .options
            .iter()
            .map(|o| format!("  {:width$}  {}", o.input, o.description, width = width))
            .collect();
        lines.join("\n")
    }
}

const fn option(input: &'static str, description: &'static str) -> StateOption {
    StateOption { input, description }
}

const LEAVE_OPTIONS: [StateOption; 2] = [
    option("cancel", "return to the main menu"),
    option("exit", "quit the session (asks for confirmation)"),
];

static MAIN_MENU: StateHandler = StateHandler {
    state: CliState::MainMenu,
    title: "main menu",
    prompt: "Enter a command (type 'help' for options).",
    options: &[
        option(r#"add "Title" "description" <tag>"#, "add a task"),
        option("add", "add a task step by step"),
        option("list", "show all tasks"),
        option(r#"update <n> "Title" "description" <tag>"#, "change a task"),
        option("update <n>", "change a task step by step"),
        option("delete <n>", "delete a task"),
        option("complete <n>", "mark a task as done"),
        option("incomplete <n>", "mark a task as not done"),
        option("help", "show this list"),
        option("exit", "quit"),
    ],
};

static ADDING_TASK: StateHandler = StateHandler {
    state: CliState::AddingTask,
    title: "add task",
    prompt: "Enter the new task: title, optional description and tags.",
    options: &[
        option(r#""Title" "description" <tag>"#, "create the task"),
        LEAVE_OPTIONS[0],
        LEAVE_OPTIONS[1],
    ],
};

static UPDATING_TASK: StateHandler = StateHandler {
    state: CliState::UpdatingTask,
    title: "update task",
    prompt: "Enter the fields to change; \"New title\" \"\" clears the description.",
    options: &[
        option(r#""Title" "description" <tag>"#, "apply the changes"),
        LEAVE_OPTIONS[0],
        LEAVE_OPTIONS[1],
    ],
};

static DELETING_TASK: StateHandler = StateHandler {
    state: CliState::DeletingTask,
    title: "delete task",
    prompt: "Which task? Enter its number, id or title.",
    options: &[
        option("<n | id | title>", "choose the task to delete"),
        LEAVE_OPTIONS[0],
        LEAVE_OPTIONS[1],
    ],
};

static CONFIRMATION_DIALOG: StateHandler = StateHandler {
    state: CliState::ConfirmationDialog,
    title: "confirm",
    prompt: "Are you sure? (yes/no)",
    options: &[
        option("yes", "go ahead"),
        option("no", "back to the main menu"),
    ],
};

static EXITING: StateHandler = StateHandler {
    state: CliState::Exiting,
    title: "exiting",
    prompt: "Goodbye.",
    options: &[],
};

pub fn handler(state: CliState) -> &'static StateHandler {
    match state {
        CliState::MainMenu => &MAIN_MENU,
        CliState::AddingTask => &ADDING_TASK,
        CliState::UpdatingTask => &UPDATING_TASK,
        CliState::DeletingTask => &DELETING_TASK,
        CliState::ConfirmationDialog => &CONFIRMATION_DIALOG,
        CliState::Exiting => &EXITING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_state_has_its_own_handler() {
        for &state in CliState::all() {
            assert_eq!(handler(state).state, state);
        }
    }

    #[test]
    fn only_exiting_has_no_options() {
        for &state in CliState::all() {
            assert_eq!(handler(state).options.is_empty(), state.is_terminal());
        }
    }

    #[test]
    fn prompt_line_uses_title() {
        assert_eq!(
            handler(CliState::MainMenu).prompt_line("todo"),
            "todo [main menu]> "
        );
    }

    #[test]
    fn rendered_options_are_aligned() {
        let text = handler(CliState::ConfirmationDialog).render_options();
        assert_eq!(text, "  yes  go ahead\n  no   back to the main menu");
    }
}
