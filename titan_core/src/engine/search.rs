use crate::engine::tt::{TTFlag, TranspositionTable};
use crate::engine::{Game, Score, SearchError, SearchResult, Searcher, INF};
use log::{debug, trace};
use std::sync::Arc;
use std::time::Instant;

/// Mutable state of one top-level search. Built fresh per call and dropped with it.
struct SearchContext<K> {
    tt: TranspositionTable<K>,
    nodes: u64,
    cutoff: bool,
}

impl<K: Eq + std::hash::Hash> SearchContext<K> {
    fn new() -> Self {
        Self {
            tt: TranspositionTable::new(),
            nodes: 0,
            cutoff: false,
        }
    }
}

/// Depth-limited minimax with alpha-beta pruning and a per-call transposition table.
///
/// The engine itself only holds the game rules, so one instance can serve any
/// number of sequential or concurrent searches.
pub struct AlphaBetaEngine<G: Game> {
    game: Arc<G>,
}

impl<G: Game> Clone for AlphaBetaEngine<G> {
    fn clone(&self) -> Self {
        Self {
            game: Arc::clone(&self.game),
        }
    }
}

impl<G: Game> AlphaBetaEngine<G> {
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

        let mut ctx = SearchContext::new();
        let mut alpha = -INF;
        let mut beta = INF;
        let mut best_value = if maximizing { -INF } else { INF };
        let mut best_move = None;

        for action in actions {
            let child = self.game.result(state, &action)?;
            let value = if maximizing {
                self.min_value(&mut ctx, &child, alpha, beta, 1)?
            } else {
                self.max_value(&mut ctx, &child, alpha, beta, 1)?
            };
            trace!("root action {action:?} -> {value}");

            let improves = if maximizing {
                value > best_value
            } else {
                value < best_value
            };
            if improves || best_move.is_none() {
                best_value = value;
                best_move = Some(action);
            }

            // The root has no parent window, so it only tightens its own bound.
            if maximizing {
                alpha = alpha.max(best_value);
            } else {
                beta = beta.min(best_value);
            }
        }

        let elapsed = start.elapsed();
        debug!(
            "search done: value={best_value} nodes={} elapsed={elapsed:?} tt(entries={}, probes={}, hits={}, stores={})",
            ctx.nodes,
            ctx.tt.len(),
            ctx.tt.probes(),
            ctx.tt.hits(),
            ctx.tt.stores()
        );

        Ok(SearchResult::new(
            best_value,
            best_move,
            elapsed,
            ctx.nodes,
            ctx.cutoff,
        ))
    }

    fn max_value(
        &self,
        ctx: &mut SearchContext<G::Key>,
        state: &G::State,
        mut alpha: Score,
        beta: Score,
        depth: usize,
    ) -> Result<Score, SearchError<G::Error>> {
        let key = self.game.canonical_key(state);
        if let Some(value) = ctx.tt.probe(&key, alpha, beta, depth) {
            return Ok(value);
        }
        if self.game.is_terminal(state) {
            return Ok(self.game.utility(state));
        }
        if self.game.cutoff_test(state, depth) {
            ctx.cutoff = true;
            return Ok(self.game.eval(state));
        }

        let actions = self.game.actions(state);
        if actions.is_empty() {
            // Dead end below the root: score it as a leaf.
            return Ok(self.game.eval(state));
        }

        ctx.nodes += 1;
        let alpha_orig = alpha;
        let mut value = -INF;
        for action in actions {
            let child = self.game.result(state, &action)?;
            value = value.max(self.min_value(ctx, &child, alpha, beta, depth + 1)?);
            if value >= beta {
                ctx.tt.store(key, value, depth, TTFlag::LowerBound);
                return Ok(value);
            }
            alpha = alpha.max(value);
        }

        let flag = if value <= alpha_orig {
            TTFlag::UpperBound
        } else {
            TTFlag::Exact
        };
        ctx.tt.store(key, value, depth, flag);
        Ok(value)
    }

    fn min_value(
        &self,
        ctx: &mut SearchContext<G::Key>,
        state: &G::State,
        alpha: Score,
        mut beta: Score,
        depth: usize,
    ) -> Result<Score, SearchError<G::Error>> {
        let key = self.game.canonical_key(state);
        if let Some(value) = ctx.tt.probe(&key, alpha, beta, depth) {
            return Ok(value);
        }
        if self.game.is_terminal(state) {
            return Ok(self.game.utility(state));
        }
        if self.game.cutoff_test(state, depth) {
            ctx.cutoff = true;
            return Ok(self.game.eval(state));
        }

        let actions = self.game.actions(state);
        if actions.is_empty() {
            return Ok(self.game.eval(state));
        }

        ctx.nodes += 1;
        let beta_orig = beta;
        let mut value = INF;
        for action in actions {
            let child = self.game.result(state, &action)?;
            value = value.min(self.max_value(ctx, &child, alpha, beta, depth + 1)?);
            if value <= alpha {
                ctx.tt.store(key, value, depth, TTFlag::UpperBound);
                return Ok(value);
            }
            beta = beta.min(value);
        }

        let flag = if value >= beta_orig {
            TTFlag::LowerBound
        } else {
            TTFlag::Exact
        };
        ctx.tt.store(key, value, depth, flag);
        Ok(value)
    }
}

impl<G: Game> Searcher<G> for AlphaBetaEngine<G> {
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
