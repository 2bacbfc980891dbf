use crate::players::Player;
use anyhow::{ensure, Result};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::sync::Arc;
use titan_core::engine::{AlphaBetaEngine, Game, MinimaxEngine, SearchResult, Searcher};
use titan_core::logic::{GameConfig, TitanAction, TitanGame, TitanState};
use tracing::{debug, info, warn};

/// Alternates `titan` and `pantheon` from the opening position until the game ends.
///
/// Stops early, without a verdict, when a player offers no move or `max_moves`
/// plies have been played.
pub fn play_game<R: BufRead, W: Write>(
    game: &TitanGame,
    titan: &Player,
    pantheon: &Player,
    max_moves: u32,
    input: &mut R,
    out: &mut W,
) -> Result<TitanState> {
    let mut state = game.initial_state();

    while !game.is_terminal(&state) {
        if state.moves_made >= max_moves {
            warn!(max_moves, "move limit reached");
            writeln!(out, "Move limit of {max_moves} reached, the game is a draw.")?;
            return Ok(state);
        }

        let player = if state.titan_to_move { titan } else { pantheon };
        let Some(action) = player.propose_move(game, &state, input, out)? else {
            warn!(moves_made = state.moves_made, "no move proposed, abandoning game");
            writeln!(out, "Game abandoned.")?;
            return Ok(state);
        };

        ensure!(
            game.actions(&state).contains(&action),
            "The action <{action}> is not legal in this state"
        );
        state = game.result(&state, &action)?;
        debug!(%action, key = %state.key_string(), "move applied");
    }

    info!(moves = state.moves_made, life = state.life, outcome = ?state.outcome, "game over");
    write!(out, "{state}")?;
    writeln!(out, "{}", game.congratulate(&state))?;
    Ok(state)
}

/// One depth of the benchmark. The search report is flattened into the row.
#[derive(Debug, Serialize)]
pub struct BenchRow {
    pub depth: usize,
    #[serde(flatten)]
    pub search: SearchResult<TitanAction>,
}

/// Searches the opening position once per depth limit, as the Titan.
///
/// With `verify`, every value is cross-checked against unpruned minimax.
pub fn run_depth_bench<W: Write>(
    base: &GameConfig,
    depths: &[usize],
    json: bool,
    verify: bool,
    out: &mut W,
) -> Result<Vec<BenchRow>> {
    let mut rows = Vec::with_capacity(depths.len());

    for &depth in depths {
        info!(depth, "running depth");
        let game = Arc::new(TitanGame::new(base.clone().with_depth_limit(depth)));
        let state = game.initial_state();

        let result = AlphaBetaEngine::new(Arc::clone(&game)).choose_move_as_maximizer(&state)?;
        if verify {
            let reference = MinimaxEngine::new(Arc::clone(&game)).choose_move_as_maximizer(&state)?;
            ensure!(
                (reference.value() - result.value()).abs() < 1e-9,
                "depth {depth}: alpha-beta value {} differs from minimax value {}",
                result.value(),
                reference.value()
            );
            debug!(
                depth,
                pruned_nodes = result.nodes(),
                minimax_nodes = reference.nodes(),
                "verified against minimax"
            );
        }

        if !json {
            writeln!(out, "Depth {depth}: {result}")?;
        }
        rows.push(BenchRow { depth, search: result });
    }

    if json {
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)?;
    }
    Ok(rows)
}
