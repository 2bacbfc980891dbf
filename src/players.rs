use anyhow::Result;
use clap::ValueEnum;
use std::io::{BufRead, Write};
use std::sync::Arc;
use titan_core::engine::{AlphaBetaEngine, Game, Searcher};
use titan_core::logic::{TitanAction, TitanGame, TitanState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    /// Moves typed at the console
    Human,
    /// Search without commentary
    Silent,
    /// Search and print the search report
    Verbose,
}

/// Anything that can propose a move for the side it plays.
pub enum Player {
    Human,
    SilentAgent(AlphaBetaEngine<TitanGame>),
    VerboseAgent(AlphaBetaEngine<TitanGame>),
}

impl Player {
    pub fn new(kind: PlayerKind, game: &Arc<TitanGame>) -> Self {
        match kind {
            PlayerKind::Human => Self::Human,
            PlayerKind::Silent => Self::SilentAgent(AlphaBetaEngine::new(Arc::clone(game))),
            PlayerKind::Verbose => Self::VerboseAgent(AlphaBetaEngine::new(Arc::clone(game))),
        }
    }

    /// `Ok(None)` means the player has nothing to offer: no legal move, or the input closed.
    pub fn propose_move<R: BufRead, W: Write>(
        &self,
        game: &TitanGame,
        state: &TitanState,
        input: &mut R,
        out: &mut W,
    ) -> Result<Option<TitanAction>> {
        match self {
            Self::Human => ask_human(game, state, input, out),
            Self::SilentAgent(engine) => Ok(engine.choose_move(state)?.into_move()),
            Self::VerboseAgent(engine) => {
                writeln!(out, "Thinking...")?;
                let result = engine.choose_move(state)?;
                writeln!(out, "...done")?;
                writeln!(out, "{result}")?;
                Ok(result.into_move())
            }
        }
    }
}

fn ask_human<R: BufRead, W: Write>(
    game: &TitanGame,
    state: &TitanState,
    input: &mut R,
    out: &mut W,
) -> Result<Option<TitanAction>> {
    write!(out, "{state}")?;
    let moves = game.actions(state);
    let Some(example) = moves.first() else {
        writeln!(out, "No valid moves available.")?;
        return Ok(None);
    };
    writeln!(out, "Player turn! Type your move (example: {example})")?;

    loop {
        write!(out, "Your Move: ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match line.trim().parse::<TitanAction>() {
            Ok(action) if moves.contains(&action) => return Ok(Some(action)),
            Ok(_) => writeln!(out, "Not a valid move")?,
            Err(err) => writeln!(out, "Not a valid move: {err}")?,
        }
    }
}
