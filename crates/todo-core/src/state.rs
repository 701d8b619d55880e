use crate::error::{Result, TodoError};
use crate::types::CliState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

pub const DEFAULT_HISTORY_LIMIT: usize = 64;

// ---------------------------------------------------------------------------
// Transition table
// ---------------------------------------------------------------------------

/// States reachable from `from` in one step.
pub fn allowed_targets(from: CliState) -> &'static [CliState] {
    use CliState::*;
    match from {
        MainMenu => &[AddingTask, UpdatingTask, DeletingTask, Exiting],
        AddingTask | UpdatingTask | DeletingTask => &[MainMenu, ConfirmationDialog],
        ConfirmationDialog => &[MainMenu, Exiting],
        Exiting => &[],
    }
}

pub fn is_transition_allowed(from: CliState, to: CliState) -> bool {
    allowed_targets(from).contains(&to)
}

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition {
    pub from: CliState,
    pub to: CliState,
    pub at: DateTime<Utc>,
}

/// The action a confirmation dialog will carry out on "yes".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PendingAction {
    DeleteTask { task_id: String, title: String },
    Exit,
}

/// Auxiliary data owned by a single state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateData {
    EditingTask { task_id: String },
    PendingConfirmation(PendingAction),
}

impl StateData {
    /// The only state allowed to hold this data.
    pub fn owner(&self) -> CliState {
        match self {
            StateData::EditingTask { .. } => CliState::UpdatingTask,
            StateData::PendingConfirmation(_) => CliState::ConfirmationDialog,
        }
    }
}

// ---------------------------------------------------------------------------
// StateMachine
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Inner {
    current: CliState,
    data: HashMap<CliState, StateData>,
    history: VecDeque<StateTransition>,
    history_limit: usize,
}

/// Console interaction mode. Starts in `MainMenu`; `Exiting` is terminal.
///
/// All methods take `&self`; the mutex is held only while state is read or
/// mutated.
#[derive(Debug)]
pub struct StateMachine {
    inner: Mutex<Inner>,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(history_limit: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                current: CliState::MainMenu,
                data: HashMap::new(),
                history: VecDeque::new(),
                history_limit,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Inner is plain data; a poisoned lock is still consistent.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn current(&self) -> CliState {
        self.lock().current
    }

    pub fn is_terminal(&self) -> bool {
        self.current().is_terminal()
    }

    /// Move to `target`, returning the state that was left. Data held by the
    /// left state is dropped. A disallowed target leaves everything unchanged.
    pub fn transition_to(&self, target: CliState) -> Result<CliState> {
        let outcome = {
            let mut inner = self.lock();
            let from = inner.current;
            if is_transition_allowed(from, target) {
                inner.data.remove(&from);
                inner.current = target;
                if inner.history_limit > 0 {
                    if inner.history.len() == inner.history_limit {
                        inner.history.pop_front();
                    }
                    inner.history.push_back(StateTransition {
                        from,
                        to: target,
                        at: Utc::now(),
                    });
                }
                Ok(from)
            } else {
                Err(from)
            }
        };

        match outcome {
            Ok(from) => {
                tracing::debug!(%from, to = %target, "state transition");
                Ok(from)
            }
            Err(from) => {
                tracing::warn!(%from, to = %target, "rejected state transition");
                Err(TodoError::InvalidTransition {
                    from: from.to_string(),
                    to: target.to_string(),
                })
            }
        }
    }

    /// Attach auxiliary data to the current state. The data's owner must be
    /// the active state.
    pub fn set_data(&self, data: StateData) -> Result<()> {
        let mut inner = self.lock();
        let owner = data.owner();
        if inner.current != owner {
            return Err(TodoError::InvalidStateOperation {
                state: inner.current.to_string(),
                operation: format!("store {owner} data"),
            });
        }
        inner.data.insert(owner, data);
        Ok(())
    }

    pub fn data(&self, state: CliState) -> Option<StateData> {
        self.lock().data.get(&state).cloned()
    }

    /// Id of the task being edited. Only valid in `UpdatingTask`.
    pub fn editing_task(&self) -> Result<String> {
        let inner = self.lock();
        match inner.data.get(&CliState::UpdatingTask) {
            Some(StateData::EditingTask { task_id }) if inner.current == CliState::UpdatingTask => {
                Ok(task_id.clone())
            }
            _ => Err(TodoError::InvalidStateOperation {
                state: inner.current.to_string(),
                operation: "read the task under edit".to_string(),
            }),
        }
    }

    /// The action awaiting confirmation. Only valid in `ConfirmationDialog`.
    pub fn pending_confirmation(&self) -> Result<PendingAction> {
        let inner = self.lock();
        match inner.data.get(&CliState::ConfirmationDialog) {
            Some(StateData::PendingConfirmation(action))
                if inner.current == CliState::ConfirmationDialog =>
            {
                Ok(action.clone())
            }
            _ => Err(TodoError::InvalidStateOperation {
                state: inner.current.to_string(),
                operation: "confirm an action".to_string(),
            }),
        }
    }

    /// Fail with `InvalidStateOperation` unless the machine is in `state`.
    pub fn require(&self, state: CliState, operation: &str) -> Result<()> {
        let current = self.current();
        if current == state {
            Ok(())
        } else {
            Err(TodoError::InvalidStateOperation {
                state: current.to_string(),
                operation: operation.to_string(),
            })
        }
    }

    /// Accepted transitions, oldest first.
    pub fn history(&self) -> Vec<StateTransition> {
        self.lock().history.iter().cloned().collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
