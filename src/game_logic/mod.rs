mod engine;
pub mod movegen;
pub mod rules;

pub use engine::{ClickOutcome, GameState};
