pub mod app;
pub mod input;
pub mod render;
pub mod save;
pub mod theme;
pub mod undo;

pub use app::run;
