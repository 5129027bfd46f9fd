use serde::{Deserialize, Serialize};

/// Checklist entry state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Active,
    Crossed,
}

impl ItemState {
    pub fn is_crossed(self) -> bool {
        matches!(self, ItemState::Crossed)
    }
}

/// A single checklist entry. The `value` text doubles as the identity key:
/// a checklist never holds two items with the same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub value: String,
    pub state: ItemState,
}

impl Item {
    /// Create a new active item
    pub fn new(value: impl Into<String>) -> Self {
        Item {
            value: value.into(),
            state: ItemState::Active,
        }
    }
}
