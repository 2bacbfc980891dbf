pub mod board;
pub mod config;
pub mod eval;
pub mod rules;

pub use board::{Outcome, Piece, Square, TitanState};
pub use config::{ConfigError, GameConfig};
pub use rules::{ParseActionError, RulesError, TitanAction, TitanGame};
