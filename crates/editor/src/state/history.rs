//! Undo/redo log of committed edit commands

use crate::edit::EditCommand;
use crate::host::SceneHost;

use super::selection::SelectionState;

/// Committed commands, most recent last
#[derive(Debug)]
pub struct CommandHistory {
    /// Undo stack - applied commands
    undo_stack: Vec<EditCommand>,
    /// Redo stack - undone commands
    redo_stack: Vec<EditCommand>,
    limit: usize,
}

impl CommandHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record an already-applied command
    pub fn add(&mut self, cmd: EditCommand) {
        self.undo_stack.push(cmd);
        self.redo_stack.clear();
        if self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
        }
    }

    /// Undo last command
    pub fn undo<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        selection: &mut SelectionState,
    ) -> bool {
        match self.undo_stack.pop() {
            Some(mut cmd) => {
                cmd.undo(host, selection);
                self.redo_stack.push(cmd);
                true
            }
            None => false,
        }
    }

    /// Redo last undone command
    pub fn redo<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        selection: &mut SelectionState,
    ) -> bool {
        match self.redo_stack.pop() {
            Some(mut cmd) => {
                cmd.redo(host, selection);
                self.undo_stack.push(cmd);
                true
            }
            None => false,
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undoable commands
    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    pub fn last(&self) -> Option<&EditCommand> {
        self.undo_stack.last()
    }

    /// Labels of the undoable commands, oldest first
    pub fn labels(&self) -> Vec<&'static str> {
        self.undo_stack.iter().map(EditCommand::label).collect()
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(100)
    }
}
