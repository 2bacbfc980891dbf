use serde::Serialize;
use std::fmt;
use std::hash::Hash;
use std::time::Duration;

pub mod minimax;
pub mod search;
pub mod tt;


pub use minimax::MinimaxEngine;
pub use search::AlphaBetaEngine;

/// Minimax value, always from the maximizing side's point of view.
pub type Score = f64;

/// Search window sentinel. Any real utility or evaluation must stay far below it.
pub const INF: Score = 1_048_576.0;

/// Rules of a deterministic, turn-alternating, zero-sum two-player game.
///
/// Every method is a pure function of its arguments. States handed to the
/// engine are never mutated; successors are produced by [`Game::result`].
/// Two states with the same [`Game::canonical_key`] must agree on legality,
/// terminality, utility and evaluation, otherwise memoized values are wrong.
pub trait Game {
    type State;
    type Action: Clone + PartialEq + fmt::Debug;
    type Key: Eq + Hash;
    type Error: std::error::Error + 'static;

    /// Legal actions in the order the engine should try them.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    fn result(&self, state: &Self::State, action: &Self::Action)
        -> Result<Self::State, Self::Error>;

    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Only meaningful when `is_terminal(state)` holds. Positive favors the maximizer.
    fn utility(&self, state: &Self::State) -> Score;

    /// `depth` is the ply below the root of the current search.
    fn cutoff_test(&self, state: &Self::State, depth: usize) -> bool;

    fn eval(&self, state: &Self::State) -> Score;

    fn canonical_key(&self, state: &Self::State) -> Self::Key;

    fn maximizer_to_move(&self, state: &Self::State) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError<E: std::error::Error + 'static> {
    /// The root state offers no action to attribute a value to.
    #[error("no legal moves available")]
    NoLegalMoves,

    #[error(transparent)]
    Game(#[from] E),
}

/// Outcome of one completed top-level search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult<A> {
    value: Score,
    best_move: Option<A>,
    elapsed: Duration,
    nodes: u64,
    cutoff: bool,
}

impl<A> SearchResult<A> {
    #[must_use]
    pub const fn new(
        value: Score,
        best_move: Option<A>,
        elapsed: Duration,
        nodes: u64,
        cutoff: bool,
    ) -> Self {
        Self {
            value,
            best_move,
            elapsed,
            nodes,
            cutoff,
        }
    }

    /// Minimax value of the chosen move from the maximizer's perspective.
    #[must_use]
    pub const fn value(&self) -> Score {
        self.value
    }

    #[must_use]
    pub const fn best_move(&self) -> Option<&A> {
        self.best_move.as_ref()
    }

    #[must_use]
    pub fn into_move(self) -> Option<A> {
        self.best_move
    }

    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Internal nodes expanded. Leaves and table hits are not counted.
    #[must_use]
    pub const fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Whether some branch stopped at the depth limit instead of a terminal state.
    #[must_use]
    pub const fn cutoff(&self) -> bool {
        self.cutoff
    }
}

impl<A: fmt::Display> fmt::Display for SearchResult<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.best_move {
            Some(mv) => write!(f, "Chosen move: {mv}")?,
            None => write!(f, "Chosen move: none")?,
        }
        write!(
            f,
            " with value {} (Elapsed time: {:.4} sec, Nodes expanded: {})",
            self.value,
            self.elapsed.as_secs_f64(),
            self.nodes
        )
    }
}

/// Something that picks moves for either side of a [`Game`].
pub trait Searcher<G: Game> {
    fn game(&self) -> &G;

    fn choose_move_as_maximizer(
        &self,
        state: &G::State,
    ) -> Result<SearchResult<G::Action>, SearchError<G::Error>>;

    fn choose_move_as_minimizer(
        &self,
        state: &G::State,
    ) -> Result<SearchResult<G::Action>, SearchError<G::Error>>;

    /// Searches on behalf of whichever side is to move in `state`.
    fn choose_move(
        &self,
        state: &G::State,
    ) -> Result<SearchResult<G::Action>, SearchError<G::Error>> {
        if self.game().maximizer_to_move(state) {
            self.choose_move_as_maximizer(state)
        } else {
            self.choose_move_as_minimizer(state)
        }
    }
}
