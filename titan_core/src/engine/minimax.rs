use crate::engine::{Game, Score, SearchError, SearchResult, Searcher, INF};
use std::sync::Arc;
use std::time::Instant;

/// Plain depth-limited minimax: no pruning, no memo.
///
/// Expands every internal node it reaches, so it is only practical for shallow
/// searches. Used to cross-check [`super::AlphaBetaEngine`].
pub struct MinimaxEngine<G: Game> {
    game: Arc<G>,
}

impl<G: Game> MinimaxEngine<G> {
    pub const fn new(game: Arc<G>) -> Self {
        Self { game }
    }

    fn search_root(
        &self,
        state: &G::State,
        maximizing: bool,
    ) -> Result<SearchResult<G::Action>, SearchError<G::Error>> {
        let start = Instant::now();
        let actions = self.game.actions(state);
        if actions.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let mut nodes = 0;
        let mut cutoff = false;
        let mut best_value = if maximizing { -INF } else { INF };
        let mut best_move = None;
        for action in actions {
            let child = self.game.result(state, &action)?;
            let value = self.value(&child, !maximizing, 1, &mut nodes, &mut cutoff)?;
            let improves = if maximizing {
                value > best_value
            } else {
                value < best_value
            };
            if improves || best_move.is_none() {
                best_value = value;
                best_move = Some(action);
            }
        }

        Ok(SearchResult::new(
            best_value,
            best_move,
            start.elapsed(),
            nodes,
            cutoff,
        ))
    }

    fn value(
        &self,
        state: &G::State,
        maximizing: bool,
        depth: usize,
        nodes: &mut u64,
        cutoff: &mut bool,
    ) -> Result<Score, SearchError<G::Error>> {
        if self.game.is_terminal(state) {
            return Ok(self.game.utility(state));
        }
        if self.game.cutoff_test(state, depth) {
            *cutoff = true;
            return Ok(self.game.eval(state));
        }
        let actions = self.game.actions(state);
        if actions.is_empty() {
            return Ok(self.game.eval(state));
        }

        *nodes += 1;
        let mut best = if maximizing { -INF } else { INF };
        for action in actions {
            let child = self.game.result(state, &action)?;
            let value = self.value(&child, !maximizing, depth + 1, nodes, cutoff)?;
            best = if maximizing {
                best.max(value)
            } else {
                best.min(value)
            };
        }
        Ok(best)
    }
}

impl<G: Game> Searcher<G> for MinimaxEngine<G> {
    fn game(&self) -> &G {
        &self.game
    }

    fn choose_move_as_maximizer(
        &self,
        state: &G::State,
    ) -> Result<SearchResult<G::Action>, SearchError<G::Error>> {
        self.search_root(state, true)
    }

    fn choose_move_as_minimizer(
        &self,
        state: &G::State,
    ) -> Result<SearchResult<G::Action>, SearchError<G::Error>> {
        self.search_root(state, false)
    }
}
