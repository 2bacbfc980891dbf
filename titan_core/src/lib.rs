//! Game-tree search for two-player zero-sum games, plus the Titan Clash game it ships with.
//!
//! [`engine`] is game agnostic: implement [`engine::Game`] and hand it to an
//! [`engine::AlphaBetaEngine`]. [`logic`] holds the Titan Clash rules.

pub mod engine;
pub mod logic;
