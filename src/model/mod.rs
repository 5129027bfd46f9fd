pub mod checklist;
pub mod item;

pub use checklist::*;
pub use item::*;
