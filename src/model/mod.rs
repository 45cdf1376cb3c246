pub mod display;
pub mod item;
pub mod parser;

pub use display::TaskDisplay;
pub use item::{Task, TaskKind};
