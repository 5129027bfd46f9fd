use crate::model::{Checklist, Item, ItemState};

const UNDO_STACK_LIMIT: usize = 500;

/// A single undoable mutation. Each variant carries everything needed to
/// invert itself without consulting the live list: `Remove` captures the
/// target's state and position at the moment of removal, so undo restores
/// it exactly even after surrounding items have shifted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    /// A new item was appended (always active)
    Add { value: String },
    /// An active item was crossed out
    Complete { value: String },
    /// A crossed item was made active again
    Uncomplete { value: String },
    /// An item was removed entirely
    Remove {
        value: String,
        prev_state: ItemState,
        index: usize,
    },
}

impl Patch {
    /// Build a `Remove` patch against the current list, capturing the
    /// target's state and index. Returns None for a value not present —
    /// a Remove patch is only constructible from a live item.
    pub fn remove(list: &Checklist, value: &str) -> Option<Patch> {
        let index = list.position(value)?;
        let prev_state = list.items()[index].state;
        Some(Patch::Remove {
            value: value.to_string(),
            prev_state,
            index,
        })
    }
}

/// The undo/redo engine. Owns the two patch stacks; the checklist it drives
/// is passed in by the caller on each call so the app keeps a single owner.
pub struct ActionLog {
    undo: Vec<Patch>,
    redo: Vec<Patch>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    /// Apply a patch's forward effect and record it. Clears the redo stack:
    /// once the timeline branches, the alternate future is gone.
    ///
    /// Validation happens before a patch is constructed (duplicate adds and
    /// removes of absent values never reach here), not inside.
    pub fn execute(&mut self, list: &mut Checklist, patch: Patch) {
        apply_forward(&patch, list);
        self.undo.push(patch);
        if self.undo.len() > UNDO_STACK_LIMIT {
            self.undo.drain(..self.undo.len() - UNDO_STACK_LIMIT);
        }
        self.redo.clear();
    }

    /// Undo the last patch, moving it to the redo stack. Returns false
    /// (a silent no-op) when there is nothing to undo.
    pub fn undo(&mut self, list: &mut Checklist) -> bool {
        let Some(patch) = self.undo.pop() else {
            return false;
        };
        apply_inverse(&patch, list);
        self.redo.push(patch);
        true
    }

    /// Re-apply the last undone patch, moving it back to the undo stack.
    /// Returns false when there is nothing to redo.
    pub fn redo(&mut self, list: &mut Checklist) -> bool {
        let Some(patch) = self.redo.pop() else {
            return false;
        };
        apply_forward(&patch, list);
        self.undo.push(patch);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

/// Forward effect of a patch
fn apply_forward(patch: &Patch, list: &mut Checklist) {
    match patch {
        Patch::Add { value } => list.append(value),
        Patch::Complete { value } => {
            list.set_state(value, ItemState::Crossed);
        }
        Patch::Uncomplete { value } => {
            list.set_state(value, ItemState::Active);
        }
        Patch::Remove { value, .. } => {
            list.remove(value);
        }
    }
}

/// Inverse effect of a patch
fn apply_inverse(patch: &Patch, list: &mut Checklist) {
    match patch {
        Patch::Add { value } => {
            list.remove(value);
        }
        Patch::Complete { value } => {
            list.set_state(value, ItemState::Active);
        }
        Patch::Uncomplete { value } => {
            list.set_state(value, ItemState::Crossed);
        }
        Patch::Remove {
            value,
            prev_state,
            index,
        } => {
            list.insert_at(
                *index,
                Item {
                    value: value.clone(),
                    state: *prev_state,
                },
            );
        }
    }
}
