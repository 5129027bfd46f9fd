use super::item::{Item, ItemState};

/// The in-memory ordered checklist. A pure container: every mutation goes
/// through one of the patch-application methods below, driven by the
/// action log — nothing else writes to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checklist {
    items: Vec<Item>,
}

impl Checklist {
    pub fn new() -> Self {
        Checklist { items: Vec::new() }
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        Checklist { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.position(value).is_some()
    }

    pub fn position(&self, value: &str) -> Option<usize> {
        self.items.iter().position(|i| i.value == value)
    }

    pub fn get(&self, value: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.value == value)
    }

    /// Forward effect of `Add`: append a new active item at the end
    pub fn append(&mut self, value: &str) {
        self.items.push(Item::new(value));
    }

    /// Forward effect of `Complete`/`Uncomplete`. Returns false if no item
    /// has the given value.
    pub fn set_state(&mut self, value: &str, state: ItemState) -> bool {
        match self.items.iter_mut().find(|i| i.value == value) {
            Some(item) => {
                item.state = state;
                true
            }
            None => false,
        }
    }

    /// Forward effect of `Remove`: take the item out by value, returning it
    /// together with the index it occupied.
    pub fn remove(&mut self, value: &str) -> Option<(Item, usize)> {
        let index = self.position(value)?;
        Some((self.items.remove(index), index))
    }

    /// Inverse of `Remove`: put an item back at its captured position.
    /// The index is clamped so a stale capture can never panic.
    pub fn insert_at(&mut self, index: usize, item: Item) {
        let idx = index.min(self.items.len());
        self.items.insert(idx, item);
    }
}
